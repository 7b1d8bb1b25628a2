//! The fixed alumni schema.
//!
//! The source export's header row is corrupted (every intended header token is
//! concatenated into the first column's name), so field identity cannot come
//! from the file. This table is the authority: 71 `(name, policy)` pairs in
//! the physical column order the export is agreed to use. Data columns start
//! at physical index 1; physical column 0 is the header artifact.

/// Coercion policy for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    Text,
}

use FieldType::{Boolean, Float, Integer, Text};

/// Number of logical fields every record carries, no more, no fewer.
pub const FIELD_COUNT: usize = 71;

/// Physical columns expected in the file: one header artifact plus the data.
pub const EXPECTED_COLUMNS: usize = FIELD_COUNT + 1;

/// Declared field order. Changing the order here is a schema version change
/// and must track the upstream export's column layout.
pub static FIELDS: [(&str, FieldType); FIELD_COUNT] = [
    ("alumni_id", Integer),
    ("full_name", Text),
    ("gender", Text),
    ("gender_code", Text),
    ("age", Integer),
    ("state_us", Text),
    ("major", Text),
    ("gpa", Float),
    ("enrollment_year", Integer),
    ("grad_year", Integer),
    ("years_since_grad", Integer),
    ("ssc_percent", Float),
    ("hsc_percent", Float),
    ("degree_percent", Float),
    ("degree_type", Text),
    ("employability_test_score", Float),
    ("mba_specialization", Text),
    ("mba_percent", Float),
    ("workex", Text),
    ("workex_years", Text),
    ("placement_status", Text),
    ("salary", Float),
    ("communication", Text),
    ("confidence", Text),
    ("commitment", Text),
    ("general_knowledge", Text),
    ("presentation_skills", Text),
    ("logical_thinking", Text),
    ("punctuality", Text),
    ("attitude", Text),
    ("leader", Text),
    ("data_structures", Text),
    ("algorithms", Text),
    ("oop", Text),
    ("databases", Text),
    ("debugging", Text),
    ("events_attended", Integer),
    ("mentorship_interest", Boolean),
    ("donation_last_year", Float),
    ("donation_next_year", Float),
    ("events_score", Float),
    ("mentorship_score", Float),
    ("engagement_score", Float),
    ("donor_score", Float),
    ("email", Text),
    ("location_city", Text),
    ("location_country", Text),
    ("degree_level", Text),
    ("field_of_study", Text),
    ("current_company", Text),
    ("current_title", Text),
    ("industry", Text),
    ("employment_type", Text),
    ("employment_start_date", Text),
    ("employment_end_date", Text),
    ("employment_is_current", Boolean),
    ("employment_salary_min", Float),
    ("employment_salary_max", Float),
    ("mentor_status", Text),
    ("mentoring_session_count", Integer),
    ("mentoring_feedback_score", Float),
    ("match_score", Float),
    ("consent_type", Text),
    ("consent_status", Boolean),
    ("granted_at", Text),
    ("channel", Text),
    ("profile_completeness", Float),
    ("certifications_count", Integer),
    ("created_at", Text),
    ("updated_at", Text),
    ("school_name", Text),
];

/// Look up the policy for a field name. Linear scan; the table is tiny and
/// this only runs outside the realignment loop.
pub fn policy_of(name: &str) -> Option<FieldType> {
    FIELDS.iter().find(|(n, _)| *n == name).map(|(_, t)| *t)
}
