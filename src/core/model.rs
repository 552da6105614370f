// LeadTrack - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// The serialised field names of `Lead` are the storage contract: any writer
// of the "leads" key must produce exactly these names.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Lead
// =============================================================================

/// A sales-prospect record.
///
/// Every field is a free-form string. Stored records may omit any field or
/// carry a non-string scalar; both are normalised on read so that matching
/// never has to deal with a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredLead")]
pub struct Lead {
    pub name: String,

    /// Phone-like contact string, e.g. "+91 98765 43210".
    pub contact: String,

    pub status: String,

    pub source: String,

    pub qualification: String,

    pub interest_field: String,

    pub assigned_to: String,

    /// Display-formatted timestamp, e.g. "May 22, 2025 11:02 PM".
    pub updated_at: String,
}

/// On-disk shape of a lead as any writer may have produced it.
///
/// Older records (and the built-in samples) use the key `interest`. It is
/// read as a separate key so a record carrying both is still valid;
/// `interestField` wins whenever it is present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLead {
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    contact: String,
    #[serde(default, deserialize_with = "lenient_string")]
    status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    source: String,
    #[serde(default, deserialize_with = "lenient_string")]
    qualification: String,
    #[serde(default, deserialize_with = "lenient_present")]
    interest_field: Option<String>,
    #[serde(default, deserialize_with = "lenient_present")]
    interest: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    assigned_to: String,
    #[serde(default, deserialize_with = "lenient_string")]
    updated_at: String,
}

impl From<StoredLead> for Lead {
    fn from(raw: StoredLead) -> Self {
        Lead {
            name: raw.name,
            contact: raw.contact,
            status: raw.status,
            source: raw.source,
            qualification: raw.qualification,
            interest_field: raw.interest_field.or(raw.interest).unwrap_or_default(),
            assigned_to: raw.assigned_to,
            updated_at: raw.updated_at,
        }
    }
}

/// Coerce any JSON value into a string the way a loosely-typed writer would
/// expect: strings as-is, numbers and booleans via their textual form, and
/// `null`, arrays, and objects as the empty string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            String::new()
        }
    })
}

/// Like `lenient_string`, but records that the key was present at all.
fn lenient_present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(Some)
}

// =============================================================================
// Filterable fields
// =============================================================================

/// The lead attributes a filter predicate can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadField {
    Status,
    Source,
    Qualification,
    InterestField,
    AssignedTo,
}

impl LeadField {
    /// Returns all fields in catalog order.
    pub fn all() -> &'static [LeadField] {
        &[
            LeadField::Status,
            LeadField::Source,
            LeadField::Qualification,
            LeadField::InterestField,
            LeadField::AssignedTo,
        ]
    }

    /// Human-readable label, as offered in the filter field picker.
    pub fn label(&self) -> &'static str {
        match self {
            LeadField::Status => "Status",
            LeadField::Source => "Source",
            LeadField::Qualification => "Qualification",
            LeadField::InterestField => "Interest Field",
            LeadField::AssignedTo => "Assigned To",
        }
    }

    /// Serialised attribute name on `Lead`.
    pub fn attribute(&self) -> &'static str {
        match self {
            LeadField::Status => "status",
            LeadField::Source => "source",
            LeadField::Qualification => "qualification",
            LeadField::InterestField => "interestField",
            LeadField::AssignedTo => "assignedTo",
        }
    }

    /// The fixed value catalog offered for this field.
    pub fn values(&self) -> &'static [&'static str] {
        match self {
            LeadField::Status => STATUS_VALUES,
            LeadField::Source => SOURCE_VALUES,
            LeadField::Qualification => QUALIFICATION_VALUES,
            LeadField::InterestField => INTEREST_FIELD_VALUES,
            LeadField::AssignedTo => ASSIGNED_TO_VALUES,
        }
    }

    /// Read this field's value from a lead.
    pub fn get<'a>(&self, lead: &'a Lead) -> &'a str {
        match self {
            LeadField::Status => &lead.status,
            LeadField::Source => &lead.source,
            LeadField::Qualification => &lead.qualification,
            LeadField::InterestField => &lead.interest_field,
            LeadField::AssignedTo => &lead.assigned_to,
        }
    }

    /// Parse a field from its label ("Interest Field") or attribute name
    /// ("interestField"), case-insensitively. Spaces, dashes, and underscores
    /// are ignored so "assigned_to" and "assigned-to" also work.
    pub fn parse(input: &str) -> Option<LeadField> {
        let wanted = normalise_label(input);
        LeadField::all()
            .iter()
            .copied()
            .find(|f| normalise_label(f.label()) == wanted || normalise_label(f.attribute()) == wanted)
    }

    /// Whether `value` is one of this field's catalog entries (case-insensitive).
    pub fn is_catalog_value(&self, value: &str) -> bool {
        let lower = value.to_lowercase();
        self.values().iter().any(|v| v.to_lowercase() == lower)
    }
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn normalise_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Catalogs
// =============================================================================

pub const STATUS_VALUES: &[&str] = &["New", "Follow-Up", "Qualified", "Converted"];

pub const SOURCE_VALUES: &[&str] = &["Website", "Cold Call", "Email Campaign", "Social Media"];

pub const QUALIFICATION_VALUES: &[&str] = &["High School", "Bachelors", "Masters", "PhD", "Other"];

pub const INTEREST_FIELD_VALUES: &[&str] = &[
    "Web Development",
    "Mobile Development",
    "Data Science",
    "Digital Marketing",
    "UI/UX Design",
];

pub const ASSIGNED_TO_VALUES: &[&str] = &["John Doe", "Jane Smith", "Emily Davis", "Robert Johnson"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let lead: Lead = serde_json::from_str(r#"{"name":"Only Name"}"#).unwrap();
        assert_eq!(lead.name, "Only Name");
        assert_eq!(lead.status, "");
        assert_eq!(lead.interest_field, "");
    }

    #[test]
    fn test_non_string_values_are_coerced() {
        let lead: Lead = serde_json::from_str(
            r#"{"name":null,"contact":9876543210,"status":true,"source":["x"],"assignedTo":{"a":1}}"#,
        )
        .unwrap();
        assert_eq!(lead.name, "");
        assert_eq!(lead.contact, "9876543210");
        assert_eq!(lead.status, "true");
        assert_eq!(lead.source, "");
        assert_eq!(lead.assigned_to, "");
    }

    #[test]
    fn test_interest_alias_accepted() {
        let lead: Lead = serde_json::from_str(r#"{"interest":"Data Science"}"#).unwrap();
        assert_eq!(lead.interest_field, "Data Science");
    }

    #[test]
    fn test_interest_field_wins_over_legacy_interest() {
        let lead: Lead =
            serde_json::from_str(r#"{"name":"Both","interest":"AI","interestField":"Data Science"}"#)
                .unwrap();
        assert_eq!(lead.interest_field, "Data Science");

        let lead: Lead =
            serde_json::from_str(r#"{"interestField":"Web Development","interest":"AI"}"#).unwrap();
        assert_eq!(lead.interest_field, "Web Development");
    }

    #[test]
    fn test_null_interest_field_does_not_fall_back() {
        let lead: Lead = serde_json::from_str(r#"{"interest":"AI","interestField":null}"#).unwrap();
        assert_eq!(lead.interest_field, "");
    }

    #[test]
    fn test_lead_list_with_both_interest_keys_loads() {
        let leads: Vec<Lead> = serde_json::from_str(
            r#"[{"name":"Good"},{"name":"Both","interest":"AI","interestField":"Data Science"}]"#,
        )
        .unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Good");
        assert_eq!(leads[1].interest_field, "Data Science");
    }

    #[test]
    fn test_serialised_field_names() {
        let lead = Lead {
            interest_field: "UI/UX Design".to_string(),
            assigned_to: "Jane Smith".to_string(),
            updated_at: "May 17, 2025 3:02 PM".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&lead).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "assignedTo",
                "contact",
                "interestField",
                "name",
                "qualification",
                "source",
                "status",
                "updatedAt"
            ]
        );
    }

    #[test]
    fn test_get_reads_every_field() {
        let lead = Lead {
            status: "s".into(),
            source: "so".into(),
            qualification: "q".into(),
            interest_field: "i".into(),
            assigned_to: "a".into(),
            ..Default::default()
        };
        let got: Vec<_> = LeadField::all().iter().map(|f| f.get(&lead)).collect();
        assert_eq!(got, vec!["s", "so", "q", "i", "a"]);
    }

    #[test]
    fn test_parse_field_labels() {
        assert_eq!(LeadField::parse("Status"), Some(LeadField::Status));
        assert_eq!(LeadField::parse("interest field"), Some(LeadField::InterestField));
        assert_eq!(LeadField::parse("interestField"), Some(LeadField::InterestField));
        assert_eq!(LeadField::parse("assigned_to"), Some(LeadField::AssignedTo));
        assert_eq!(LeadField::parse("Priority"), None);
    }

    #[test]
    fn test_catalog_membership_is_case_insensitive() {
        assert!(LeadField::Status.is_catalog_value("follow-up"));
        assert!(LeadField::Qualification.is_catalog_value("PHD"));
        assert!(!LeadField::InterestField.is_catalog_value("AI"));
    }
}
