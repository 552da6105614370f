// LeadTrack - core/filter.rs
//
// Multi-field lead filter. A filter set is an ordered list of
// (field, value) predicates combined with ALL (AND) or ANY (OR).
// Core layer: pure logic, no I/O or UI dependencies.
//
// Matching rules:
//   - a predicate with an empty value is false, it is never skipped
//   - a predicate whose field label was not recognised is false
//   - otherwise both sides are lower-cased and compared for equality
//   - ALL over zero predicates keeps everything, ANY over zero keeps nothing

use crate::core::model::{Lead, LeadField};
use crate::util::error::FilterError;

/// How predicate results are combined for a single lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Every predicate must hold (logical AND).
    #[default]
    All,
    /// At least one predicate must hold (logical OR).
    Any,
}

impl MatchMode {
    pub fn label(&self) -> &'static str {
        match self {
            MatchMode::All => "ALL conditions (AND)",
            MatchMode::Any => "ANY condition (OR)",
        }
    }

    /// Parse "all"/"and" or "any"/"or", case-insensitively.
    pub fn parse(input: &str) -> Result<Self, FilterError> {
        match input.trim().to_lowercase().as_str() {
            "all" | "and" => Ok(MatchMode::All),
            "any" | "or" => Ok(MatchMode::Any),
            _ => Err(FilterError::InvalidMode {
                input: input.to_string(),
            }),
        }
    }
}

/// A single (field, value) condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Selected field. `None` when the field label was not recognised;
    /// such a predicate never matches.
    pub field: Option<LeadField>,

    /// Selected value. Empty means "not chosen yet" and never matches.
    pub value: String,
}

impl Predicate {
    pub fn new(field: LeadField, value: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            value: value.into(),
        }
    }

    /// An unset row: Status with no value.
    pub fn empty() -> Self {
        Self::new(LeadField::Status, "")
    }

    /// Build a predicate from a field label and value. Unknown labels are
    /// kept as an unmatchable predicate instead of failing.
    pub fn from_label(field: &str, value: impl Into<String>) -> Self {
        let parsed = LeadField::parse(field);
        if parsed.is_none() {
            tracing::warn!(field, "Unknown filter field; condition will never match");
        }
        Self {
            field: parsed,
            value: value.into(),
        }
    }

    /// Parse `FIELD=VALUE`. Whitespace around both parts is trimmed and an
    /// empty value is allowed (`Status=`).
    pub fn parse(input: &str) -> Result<Self, FilterError> {
        let (field, value) = input
            .split_once('=')
            .ok_or_else(|| FilterError::InvalidCondition {
                input: input.to_string(),
            })?;
        let field = field.trim();
        if field.is_empty() {
            return Err(FilterError::InvalidCondition {
                input: input.to_string(),
            });
        }
        Ok(Self::from_label(field, value.trim()))
    }

    /// Evaluate this predicate against one lead.
    pub fn matches(&self, lead: &Lead) -> bool {
        if self.value.is_empty() {
            return false;
        }
        let Some(field) = self.field else {
            return false;
        };
        field.get(lead).to_lowercase() == self.value.to_lowercase()
    }
}

/// Ordered predicates plus a combination mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    pub predicates: Vec<Predicate>,
    pub mode: MatchMode,
}

impl FilterSet {
    pub fn new(predicates: Vec<Predicate>, mode: MatchMode) -> Self {
        Self { predicates, mode }
    }

    /// Whether a lead satisfies the predicate combination.
    pub fn matches(&self, lead: &Lead) -> bool {
        let mut results = self.predicates.iter().map(|p| p.matches(lead));
        match self.mode {
            MatchMode::All => results.all(|hit| hit),
            MatchMode::Any => results.any(|hit| hit),
        }
    }
}

/// Apply a filter set to a slice of leads, returning indices of matches.
///
/// Indices are into the original slice and ascending, so the output is an
/// order-preserving subsequence of the input.
pub fn apply_filters(leads: &[Lead], filter: &FilterSet) -> Vec<usize> {
    leads
        .iter()
        .enumerate()
        .filter(|(_, lead)| filter.matches(lead))
        .map(|(idx, _)| idx)
        .collect()
}

/// Apply a filter set and return owned copies of the matching leads.
pub fn filter_leads(leads: &[Lead], filter: &FilterSet) -> Vec<Lead> {
    apply_filters(leads, filter)
        .into_iter()
        .map(|idx| leads[idx].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lead(name: &str, status: &str, source: &str) -> Lead {
        Lead {
            name: name.to_string(),
            status: status.to_string(),
            source: source.to_string(),
            ..Default::default()
        }
    }

    fn names(leads: &[Lead]) -> Vec<&str> {
        leads.iter().map(|l| l.name.as_str()).collect()
    }

    fn sample() -> Vec<Lead> {
        vec![
            make_lead("A", "New", "Website"),
            make_lead("B", "Qualified", "Website"),
        ]
    }

    #[test]
    fn test_all_mode_single_predicate() {
        let filter = FilterSet::new(vec![Predicate::new(LeadField::Status, "New")], MatchMode::All);
        assert_eq!(names(&filter_leads(&sample(), &filter)), vec!["A"]);
    }

    #[test]
    fn test_any_mode_matches_either_predicate() {
        let filter = FilterSet::new(
            vec![
                Predicate::new(LeadField::Status, "New"),
                Predicate::new(LeadField::Source, "Website"),
            ],
            MatchMode::Any,
        );
        assert_eq!(names(&filter_leads(&sample(), &filter)), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_value_is_false_not_ignored() {
        let filter = FilterSet::new(vec![Predicate::empty()], MatchMode::All);
        assert!(apply_filters(&sample(), &filter).is_empty());

        // An unset row next to a real one still fails ALL.
        let filter = FilterSet::new(
            vec![Predicate::new(LeadField::Status, "New"), Predicate::empty()],
            MatchMode::All,
        );
        assert!(apply_filters(&sample(), &filter).is_empty());

        // Under ANY it contributes nothing.
        let filter = FilterSet::new(
            vec![Predicate::new(LeadField::Status, "New"), Predicate::empty()],
            MatchMode::Any,
        );
        assert_eq!(apply_filters(&sample(), &filter), vec![0]);
    }

    #[test]
    fn test_only_unset_rows_under_any_match_nothing() {
        let mut leads = sample();
        // A lead whose attributes are themselves empty must not match either.
        leads.push(make_lead("Blank", "", ""));
        let filter = FilterSet::new(
            vec![Predicate::empty(), Predicate::new(LeadField::Source, "")],
            MatchMode::Any,
        );
        assert!(apply_filters(&leads, &filter).is_empty());
    }

    #[test]
    fn test_zero_predicates_all_keeps_everything_any_keeps_nothing() {
        let leads = sample();
        let all = FilterSet::new(Vec::new(), MatchMode::All);
        let any = FilterSet::new(Vec::new(), MatchMode::Any);
        assert_eq!(filter_leads(&leads, &all), leads);
        assert!(filter_leads(&leads, &any).is_empty());
    }

    #[test]
    fn test_case_insensitive_match() {
        let leads = vec![make_lead("A", "FOLLOW-UP", "cold call")];
        let filter = FilterSet::new(
            vec![
                Predicate::new(LeadField::Status, "Follow-Up"),
                Predicate::new(LeadField::Source, "Cold Call"),
            ],
            MatchMode::All,
        );
        assert_eq!(apply_filters(&leads, &filter), vec![0]);
    }

    #[test]
    fn test_missing_attribute_matches_nothing() {
        let leads = vec![Lead {
            name: "No status".to_string(),
            ..Default::default()
        }];
        let filter = FilterSet::new(vec![Predicate::new(LeadField::Status, "New")], MatchMode::Any);
        assert!(apply_filters(&leads, &filter).is_empty());
    }

    #[test]
    fn test_unknown_field_never_matches() {
        let unknown = Predicate::from_label("Priority", "High");
        assert_eq!(unknown.field, None);
        let filter = FilterSet::new(
            vec![unknown, Predicate::new(LeadField::Source, "Website")],
            MatchMode::Any,
        );
        assert_eq!(apply_filters(&sample(), &filter), vec![0, 1]);
        let filter = FilterSet {
            mode: MatchMode::All,
            ..filter
        };
        assert!(apply_filters(&sample(), &filter).is_empty());
    }

    #[test]
    fn test_refiltering_is_a_no_op() {
        let leads = vec![
            make_lead("A", "New", "Website"),
            make_lead("B", "New", "Cold Call"),
            make_lead("C", "Converted", "Website"),
            make_lead("D", "new", "Email Campaign"),
        ];
        for mode in [MatchMode::All, MatchMode::Any] {
            let filter = FilterSet::new(
                vec![
                    Predicate::new(LeadField::Status, "new"),
                    Predicate::new(LeadField::Source, "Website"),
                ],
                mode,
            );
            let once = filter_leads(&leads, &filter);
            let twice = filter_leads(&once, &filter);
            assert_eq!(once, twice, "mode {mode:?}");
        }
    }

    #[test]
    fn test_output_preserves_input_order() {
        let leads = vec![
            make_lead("C", "New", ""),
            make_lead("X", "Converted", ""),
            make_lead("A", "New", ""),
            make_lead("B", "New", ""),
        ];
        let filter = FilterSet::new(vec![Predicate::new(LeadField::Status, "New")], MatchMode::All);
        let idx = apply_filters(&leads, &filter);
        assert_eq!(idx, vec![0, 2, 3]);
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let leads = vec![make_lead("A", "New", ""), make_lead("A", "New", "")];
        let filter = FilterSet::new(vec![Predicate::new(LeadField::Status, "New")], MatchMode::All);
        assert_eq!(filter_leads(&leads, &filter).len(), 2);
    }

    #[test]
    fn test_parse_condition() {
        let p = Predicate::parse("Interest Field = Data Science").unwrap();
        assert_eq!(p, Predicate::new(LeadField::InterestField, "Data Science"));

        let p = Predicate::parse("status=").unwrap();
        assert_eq!(p, Predicate::empty());

        // Values may themselves contain '='.
        let p = Predicate::parse("Source=a=b").unwrap();
        assert_eq!(p.value, "a=b");

        assert!(matches!(
            Predicate::parse("Status"),
            Err(FilterError::InvalidCondition { .. })
        ));
        assert!(matches!(
            Predicate::parse("=New"),
            Err(FilterError::InvalidCondition { .. })
        ));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(MatchMode::parse("AND").unwrap(), MatchMode::All);
        assert_eq!(MatchMode::parse("any").unwrap(), MatchMode::Any);
        assert_eq!(MatchMode::parse(" Or ").unwrap(), MatchMode::Any);
        assert!(MatchMode::parse("xor").is_err());
    }
}
