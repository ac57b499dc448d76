//! Course codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical "<prefix> <number>" course identifier, e.g. `MATH 1A`
///
/// A code only exists when both parts are non-empty after trimming; there is
/// no empty `CourseCode`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(String);

impl CourseCode {
    /// Format a code from its subject prefix and course number
    pub fn from_parts(prefix: Option<&str>, number: Option<&str>) -> Option<Self> {
        let prefix = prefix.map(str::trim).unwrap_or_default();
        let number = number.map(str::trim).unwrap_or_default();

        if prefix.is_empty() || number.is_empty() {
            return None;
        }

        Some(Self(format!("{} {}", prefix, number)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Anything that carries a prefix/course-number pair
///
/// Receiving-side course objects and sending-side course items both format
/// through [`CourseSource::course_code`], so the two sides always agree on
/// spacing and trimming.
pub trait CourseSource {
    fn prefix(&self) -> Option<&str>;
    fn course_number(&self) -> Option<&str>;

    fn course_code(&self) -> Option<CourseCode> {
        CourseCode::from_parts(self.prefix(), self.course_number())
    }
}
