//! Core data model types for classbook.
//!
//! A [`Student`] is one row of the remote collection. The wire format is
//! `{id, name, average}`; the field names used by the legacy PHP backend
//! (`numEt`, `nom`, `moyenne`) are accepted as aliases, and numbers may
//! arrive quoted.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Averages at or above this mark pass.
pub const PASS_THRESHOLD: f64 = 10.0;
/// Averages at or above this mark (and below [`PASS_THRESHOLD`]) retake the year.
pub const RETAKE_THRESHOLD: f64 = 5.0;

/// A student record as held by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Assigned by the store at creation; never changes.
    #[serde(alias = "numEt", deserialize_with = "lenient_number")]
    pub id: i64,
    #[serde(alias = "nom")]
    pub name: String,
    /// Grade average, nominally 0-20. Not range-checked.
    #[serde(alias = "moyenne", deserialize_with = "lenient_number")]
    pub average: f64,
}

impl Student {
    pub fn new(id: i64, name: impl Into<String>, average: f64) -> Self {
        Self {
            id,
            name: name.into(),
            average,
        }
    }

    /// Classification of this student's average.
    pub fn status(&self) -> Status {
        Status::classify(self.average)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse::<T>()
            .map_err(|e| de::Error::custom(format!("invalid number '{text}': {e}"))),
    }
}

/// Pass/retake/exclude classification of an average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Retake,
    Excluded,
}

impl Status {
    /// Map an average to its band. Lower bounds are inclusive; NaN falls
    /// through to `Excluded`.
    pub fn classify(average: f64) -> Self {
        if average >= PASS_THRESHOLD {
            Status::Passed
        } else if average >= RETAKE_THRESHOLD {
            Status::Retake
        } else {
            Status::Excluded
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Passed => write!(f, "passed"),
            Status::Retake => write!(f, "retake"),
            Status::Excluded => write!(f, "excluded"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passed" | "admis" => Ok(Status::Passed),
            "retake" | "redoublant" => Ok(Status::Retake),
            "excluded" | "exclu" => Ok(Status::Excluded),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A validated add-form submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStudent {
    pub name: String,
    pub average: f64,
}

impl NewStudent {
    /// Validate raw form text. The name is trimmed; the average must parse
    /// to a finite number.
    pub fn parse(name: &str, average: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: parse_name(name)?,
            average: parse_average(average)?,
        })
    }
}

pub(crate) fn parse_name(text: &str) -> Result<String, ValidationError> {
    let name = text.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

pub(crate) fn parse_average(text: &str) -> Result<f64, ValidationError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidAverage(text.to_string())),
    }
}

/// Render an average for an editable text field. Whole numbers keep one
/// decimal place so `4.0` does not collapse to `4`.
pub fn format_average(average: f64) -> String {
    if average.is_finite() && average.fract() == 0.0 {
        format!("{average:.1}")
    } else {
        format!("{average}")
    }
}
