// LeadTrack - core/seed.rs
//
// Built-in sample leads shown alongside persisted data.
// Which views include them is decided by `SeedPolicy`.

use crate::core::model::Lead;

/// Raw seed rows: name, contact, status, qualification, interest, source,
/// assigned to, updated at.
#[rustfmt::skip]
const SEED_ROWS: [[&str; 8]; 10] = [
    ["Kari Legros", "+91 98765 43210", "Follow-Up", "Masters", "Mobile Development", "Email Campaign", "John Doe", "May 22, 2025 11:02 PM"],
    ["Bridget Hayes", "+91 91234 56789", "Qualified", "PhD", "Digital Marketing", "Website", "John Doe", "May 21, 2025 11:34 PM"],
    ["Dr. Lawrence Cummings IV", "+91 99887 76655", "Qualified", "High School", "Mobile Development", "Cold Call", "Jane Smith", "May 20, 2025 3:06 PM"],
    ["Amos D\u{2019}Amore", "+91 78900 11223", "Converted", "Bachelors", "Data Science", "Social Media", "Jane Smith", "May 19, 2025 3:03 PM"],
    ["Miss Norma Predovic", "+91 80045 66778", "Converted", "High School", "Data Science", "Website", "Emily Davis", "May 19, 2025 1:12 AM"],
    ["Raul Kub", "+91 98765 11100", "Qualified", "Other", "Web Development", "Social Media", "Jane Smith", "May 18, 2025 8:54 PM"],
    ["Rickey Swift", "+91 90909 00011", "New", "Masters", "Mobile Development", "Social Media", "Robert Johnson", "May 18, 2025 5:19 PM"],
    ["Ernestine Leannon", "+91 98012 34567", "New", "High School", "Web Development", "Website", "Emily Davis", "May 17, 2025 7:23 PM"],
    ["Ashley Ebert", "+91 88888 99999", "Follow-Up", "PhD", "UI/UX Design", "Social Media", "Jane Smith", "May 17, 2025 3:02 PM"],
    ["Kevin Miles", "+91 91111 22222", "Qualified", "Bachelors", "AI", "Cold Call", "John Doe", "May 16, 2025 11:11 AM"],
];

/// The fixed list of sample leads, in display order.
pub fn seed_leads() -> Vec<Lead> {
    SEED_ROWS
        .iter()
        .map(|row| Lead {
            name: row[0].to_string(),
            contact: row[1].to_string(),
            status: row[2].to_string(),
            qualification: row[3].to_string(),
            interest_field: row[4].to_string(),
            source: row[5].to_string(),
            assigned_to: row[6].to_string(),
            updated_at: row[7].to_string(),
        })
        .collect()
}

/// Controls which views append the sample leads to the persisted list.
///
/// The defaults reproduce the long-standing behaviour: the Leads view shows
/// samples, the Filter view only sees persisted leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPolicy {
    pub leads_view: bool,
    pub filter_view: bool,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            leads_view: crate::util::constants::DEFAULT_SEED_IN_LEADS_VIEW,
            filter_view: crate::util::constants::DEFAULT_SEED_IN_FILTER_VIEW,
        }
    }
}

/// Append the sample leads after `persisted` when `include` is set.
/// Persisted leads always come first.
pub fn with_seed(mut persisted: Vec<Lead>, include: bool) -> Vec<Lead> {
    if include {
        persisted.extend(seed_leads());
    }
    persisted
}
