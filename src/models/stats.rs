use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::reading::BloodPressureReading;

/// Summary figures over a set of readings. All zero when there are none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingStats {
    pub avg_systolic: u16,
    pub avg_diastolic: u16,
    pub avg_pulse: u16,
    pub min_systolic: u16,
    pub max_systolic: u16,
    pub min_diastolic: u16,
    pub max_diastolic: u16,
    pub total_readings: usize,
}

/// History window for trend views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    Week,
    Month,
    HalfYear,
    Year,
}

impl TimePeriod {
    pub fn days(self) -> i64 {
        match self {
            TimePeriod::Week => 7,
            TimePeriod::Month => 30,
            TimePeriod::HalfYear => 180,
            TimePeriod::Year => 365,
        }
    }

    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

pub fn calculate_stats(readings: &[BloodPressureReading]) -> ReadingStats {
    if readings.is_empty() {
        return ReadingStats::default();
    }

    let average = |value: fn(&BloodPressureReading) -> u16| -> u16 {
        let sum: u64 = readings.iter().map(|r| u64::from(value(r))).sum();
        (sum as f64 / readings.len() as f64).round() as u16
    };
    let systolic = readings.iter().map(|r| r.systolic);
    let diastolic = readings.iter().map(|r| r.diastolic);

    ReadingStats {
        avg_systolic: average(|r| r.systolic),
        avg_diastolic: average(|r| r.diastolic),
        avg_pulse: average(|r| r.pulse),
        min_systolic: systolic.clone().min().unwrap_or_default(),
        max_systolic: systolic.max().unwrap_or_default(),
        min_diastolic: diastolic.clone().min().unwrap_or_default(),
        max_diastolic: diastolic.max().unwrap_or_default(),
        total_readings: readings.len(),
    }
}

/// Readings measured within `period` before `now`, newest first.
pub fn readings_in_period(
    readings: &[BloodPressureReading],
    period: TimePeriod,
    now: DateTime<Utc>,
) -> Vec<BloodPressureReading> {
    let start = period.start(now);
    let mut selected: Vec<BloodPressureReading> = readings
        .iter()
        .filter(|r| r.measured_at >= start)
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.measured_at.cmp(&a.measured_at));
    selected
}
