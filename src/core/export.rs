// LeadTrack - core/export.rs
//
// CSV and JSON writers for lead lists.
// Core layer: writes to any Write trait object.

use crate::core::model::Lead;
use crate::util::error::ExportError;
use std::io::Write;

/// CSV header, in the column order of the Leads table.
pub const CSV_HEADER: [&str; 8] = [
    "name",
    "contact",
    "status",
    "qualification",
    "interestField",
    "source",
    "assignedTo",
    "updatedAt",
];

/// Export leads to CSV. `target` names the destination for error messages.
pub fn export_csv<W: Write>(leads: &[Lead], writer: W, target: &str) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        target: target.to_string(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADER).map_err(csv_err)?;

    for lead in leads {
        csv_writer
            .write_record([
                &lead.name,
                &lead.contact,
                &lead.status,
                &lead.qualification,
                &lead.interest_field,
                &lead.source,
                &lead.assigned_to,
                &lead.updated_at,
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;

    Ok(leads.len())
}

/// Export leads as a pretty-printed JSON array, using the storage field names.
pub fn export_json<W: Write>(
    leads: &[Lead],
    mut writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut writer, leads).map_err(|e| ExportError::Json {
        target: target.to_string(),
        source: e,
    })?;
    writeln!(writer).map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;
    Ok(leads.len())
}
