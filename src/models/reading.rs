use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::level::BloodPressureLevel;
use crate::pipeline::extraction::validity::{DIASTOLIC_RANGE, PULSE_RANGE, SYSTOLIC_RANGE};
use crate::pipeline::extraction::{BloodPressureCandidate, BloodPressureValues};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReadingError {
    #[error("{field} value {value} is outside {min}-{max}")]
    OutOfRange {
        field: &'static str,
        value: u16,
        min: u16,
        max: u16,
    },

    #[error("Systolic {systolic} must be greater than diastolic {diastolic}")]
    NotSystolicAboveDiastolic { systolic: u16, diastolic: u16 },

    #[error("Extracted reading is missing {0}")]
    IncompleteCandidate(&'static str),
}

/// Values for a reading about to be saved, typed by hand or taken from OCR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReading {
    pub systolic: u16,
    pub diastolic: u16,
    pub pulse: u16,
    pub measured_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl NewReading {
    /// Take the values of a complete OCR candidate.
    ///
    /// Two-value and single-value candidates are rejected; the caller should
    /// ask the user for the missing values instead of inventing defaults.
    pub fn from_candidate(
        candidate: &BloodPressureCandidate,
        measured_at: DateTime<Utc>,
    ) -> Result<Self, ReadingError> {
        match candidate.values {
            BloodPressureValues::Full {
                systolic,
                diastolic,
                pulse,
            } => Ok(Self {
                systolic,
                diastolic,
                pulse,
                measured_at,
                note: None,
            }),
            BloodPressureValues::PressureOnly { .. } => {
                Err(ReadingError::IncompleteCandidate("pulse"))
            }
            BloodPressureValues::SystolicOnly { .. } => {
                Err(ReadingError::IncompleteCandidate("diastolic and pulse"))
            }
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Apply the same range and ordering rules the extractor enforces.
    pub fn validate(&self) -> Result<(), ReadingError> {
        check_range("systolic", self.systolic, &SYSTOLIC_RANGE)?;
        check_range("diastolic", self.diastolic, &DIASTOLIC_RANGE)?;
        check_range("pulse", self.pulse, &PULSE_RANGE)?;
        if self.systolic <= self.diastolic {
            return Err(ReadingError::NotSystolicAboveDiastolic {
                systolic: self.systolic,
                diastolic: self.diastolic,
            });
        }
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: u16,
    range: &std::ops::RangeInclusive<u16>,
) -> Result<(), ReadingError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ReadingError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// A saved blood-pressure reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    pub id: Uuid,
    pub systolic: u16,
    pub diastolic: u16,
    pub pulse: u16,
    pub measured_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial edit of a saved reading. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingUpdate {
    pub systolic: Option<u16>,
    pub diastolic: Option<u16>,
    pub pulse: Option<u16>,
    pub measured_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl BloodPressureReading {
    /// Validate and stamp a new reading with an id and timestamps.
    pub fn create(new: NewReading, now: DateTime<Utc>) -> Result<Self, ReadingError> {
        new.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            systolic: new.systolic,
            diastolic: new.diastolic,
            pulse: new.pulse,
            measured_at: new.measured_at,
            note: new.note,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an edit. The reading is left untouched if the result would be invalid.
    pub fn apply_update(
        &mut self,
        update: ReadingUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), ReadingError> {
        let merged = NewReading {
            systolic: update.systolic.unwrap_or(self.systolic),
            diastolic: update.diastolic.unwrap_or(self.diastolic),
            pulse: update.pulse.unwrap_or(self.pulse),
            measured_at: update.measured_at.unwrap_or(self.measured_at),
            note: update.note.or_else(|| self.note.clone()),
        };
        merged.validate()?;

        self.systolic = merged.systolic;
        self.diastolic = merged.diastolic;
        self.pulse = merged.pulse;
        self.measured_at = merged.measured_at;
        self.note = merged.note;
        self.updated_at = now;
        Ok(())
    }

    pub fn level(&self) -> BloodPressureLevel {
        BloodPressureLevel::classify(self.systolic, self.diastolic)
    }
}
