//! Medical record types and validation rules.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{limit_length, require_text, FieldErrors};

/// Maximum length of a record title.
pub const MAX_TITLE_LEN: usize = 200;

/// Kind of entry in a pet's medical history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Checkup,
    Vaccine,
    Surgery,
    Other,
}

impl RecordType {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Checkup => "checkup",
            RecordType::Vaccine => "vaccine",
            RecordType::Surgery => "surgery",
            RecordType::Other => "other",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkup" => Ok(RecordType::Checkup),
            "vaccine" => Ok(RecordType::Vaccine),
            "surgery" => Ok(RecordType::Surgery),
            "other" => Ok(RecordType::Other),
            _ => Err(CoreError::Validation(format!(
                "Invalid record type '{s}'. Must be one of: checkup, vaccine, surgery, other"
            ))),
        }
    }
}

impl TryFrom<String> for RecordType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validate a medical record entry.
///
/// A follow-up date is only meaningful for vaccines and may not precede
/// the date of the record itself.
pub fn validate_record(
    record_type: RecordType,
    title: &str,
    description: &str,
    recorded_on: NaiveDate,
    next_due_on: Option<NaiveDate>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = require_text(&mut errors, "title", title);
    limit_length(&mut errors, "title", &title, MAX_TITLE_LEN);
    require_text(&mut errors, "description", description);

    if let Some(next) = next_due_on {
        if record_type != RecordType::Vaccine {
            errors.push("next_date", "is only allowed for vaccine records");
        } else if next < recorded_on {
            errors.push("next_date", "must not be before the record date");
        }
    }

    errors.into_result(())
}
