//! Output rows

use crate::course::CourseCode;
use serde::{Deserialize, Serialize};

/// One receiving-side requirement course and its sending-side equivalent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRow {
    /// Title of the requirement block the course sits under
    pub requirement_title: String,
    pub for_course: CourseCode,
    /// Boolean course expression, e.g. `MATH 1A and (PHYS 4A or PHYS 4AH)`
    pub sending_equivalent: String,
}

/// An [`OutputRow`] tagged with the agreement it came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingRecord {
    #[serde(rename = "academicYearId")]
    pub academic_year_id: u32,

    #[serde(rename = "sendingCollege")]
    pub sending_college: String,

    #[serde(rename = "receivingUniversity")]
    pub receiving_university: String,

    pub major: String,

    pub requirement_title: String,
    pub for_course: CourseCode,

    #[serde(rename = "sending_equiv")]
    pub sending_equivalent: String,
}

/// The accumulated result of one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub generated_at: String,
    pub record_count: usize,
    pub records: Vec<MappingRecord>,
}

impl ExtractionReport {
    pub fn new(records: Vec<MappingRecord>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            record_count: records.len(),
            records,
        }
    }
}
