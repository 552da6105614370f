// LeadTrack - ui/table.rs
//
// Plain-text rendering of lead lists, filter summaries, and catalogs.
// Column widths follow the Leads table layout (given in pixels there) at
// PX_PER_CHAR pixels per character.

use crate::core::filter::FilterSet;
use crate::core::model::{Lead, LeadField};
use std::fmt::Write;

/// Pixels per character when converting column widths.
const PX_PER_CHAR: usize = 8;

/// Gap between columns, in characters.
const COLUMN_GAP: &str = "  ";

/// A table column: header label, pixel width, and the lead attribute shown.
pub struct Column {
    pub label: &'static str,
    pub width_px: usize,
    pub value: fn(&Lead) -> &str,
}

impl Column {
    pub fn width_chars(&self) -> usize {
        self.width_px.div_ceil(PX_PER_CHAR)
    }
}

/// Leads table columns, in display order.
pub const COLUMNS: [Column; 8] = [
    Column { label: "Name", width_px: 150, value: name_of },
    Column { label: "Contact", width_px: 160, value: contact_of },
    Column { label: "Status", width_px: 100, value: status_of },
    Column { label: "Qualification", width_px: 120, value: qualification_of },
    Column { label: "Interest", width_px: 140, value: interest_of },
    Column { label: "Source", width_px: 120, value: source_of },
    Column { label: "Assigned To", width_px: 120, value: assigned_to_of },
    Column { label: "Updated At", width_px: 160, value: updated_at_of },
];

fn name_of(l: &Lead) -> &str {
    &l.name
}
fn contact_of(l: &Lead) -> &str {
    &l.contact
}
fn status_of(l: &Lead) -> &str {
    &l.status
}
fn qualification_of(l: &Lead) -> &str {
    &l.qualification
}
fn interest_of(l: &Lead) -> &str {
    &l.interest_field
}
fn source_of(l: &Lead) -> &str {
    &l.source
}
fn assigned_to_of(l: &Lead) -> &str {
    &l.assigned_to
}
fn updated_at_of(l: &Lead) -> &str {
    &l.updated_at
}

/// Render leads as a fixed-width table with a header row.
/// `empty_message` is printed instead when there are no leads.
pub fn render_leads<'a>(leads: impl IntoIterator<Item = &'a Lead>, empty_message: &str) -> String {
    let mut out = String::new();
    let mut rows = 0usize;

    for lead in leads {
        if rows == 0 {
            push_row(&mut out, COLUMNS.iter().map(|c| (c.label.to_string(), c.width_chars())));
            push_row(
                &mut out,
                COLUMNS.iter().map(|c| ("-".repeat(c.width_chars()), c.width_chars())),
            );
        }
        push_row(
            &mut out,
            COLUMNS.iter().map(|c| ((c.value)(lead).to_string(), c.width_chars())),
        );
        rows += 1;
    }

    if rows == 0 {
        out.push_str(empty_message);
        out.push('\n');
    }
    out
}

fn push_row(out: &mut String, cells: impl Iterator<Item = (String, usize)>) {
    let mut line = String::new();
    for (i, (text, width)) in cells.enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let cell = fit(&text, width);
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Truncate `text` to `width` characters, marking the cut with an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('\u{2026}');
    cut
}

/// One-line description of a filter set, e.g.
/// `ALL conditions (AND): Status = New, Source = (unset)`.
pub fn describe_filter(filter: &FilterSet) -> String {
    let conditions: Vec<String> = filter
        .predicates
        .iter()
        .map(|p| {
            let field = p.field.map(|f| f.label()).unwrap_or("(unknown field)");
            let value = if p.value.is_empty() {
                "(unset)"
            } else {
                p.value.as_str()
            };
            format!("{field} = {value}")
        })
        .collect();
    let mode = filter.mode.label();
    if conditions.is_empty() {
        format!("{mode}: (no conditions)")
    } else {
        format!("{mode}: {}", conditions.join(", "))
    }
}

/// List the value catalog of one field, or of all fields.
pub fn render_catalog(field: Option<LeadField>) -> String {
    let fields: Vec<LeadField> = match field {
        Some(f) => vec![f],
        None => LeadField::all().to_vec(),
    };
    let mut out = String::new();
    for f in fields {
        let _ = writeln!(out, "{}:", f.label());
        for value in f.values() {
            let _ = writeln!(out, "  {value}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{MatchMode, Predicate};
    use crate::core::seed::seed_leads;

    #[test]
    fn test_column_widths_in_characters() {
        let widths: Vec<_> = COLUMNS.iter().map(Column::width_chars).collect();
        assert_eq!(widths, vec![19, 20, 13, 15, 18, 15, 15, 20]);
    }

    #[test]
    fn test_render_has_header_rule_and_rows() {
        let leads = seed_leads();
        let out = render_leads(&leads[..2], "none");
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].starts_with("Kari Legros"));
        assert!(lines[3].contains("Bridget Hayes"));
    }

    #[test]
    fn test_render_empty_prints_message() {
        let out = render_leads(std::iter::empty(), "No leads match your filters.");
        assert_eq!(out, "No leads match your filters.\n");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit("Dr. Lawrence Cummings IV", 10), "Dr. Lawre\u{2026}");
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_describe_filter() {
        let filter = FilterSet::new(
            vec![
                Predicate::new(LeadField::Status, "New"),
                Predicate::new(LeadField::Source, ""),
                Predicate::from_label("Priority", "High"),
            ],
            MatchMode::Any,
        );
        assert_eq!(
            describe_filter(&filter),
            "ANY condition (OR): Status = New, Source = (unset), (unknown field) = High"
        );
    }

    #[test]
    fn test_render_catalog_single_field() {
        let out = render_catalog(Some(LeadField::Status));
        assert_eq!(out, "Status:\n  New\n  Follow-Up\n  Qualified\n  Converted\n");
    }
}
