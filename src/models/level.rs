use serde::{Deserialize, Serialize};

/// Hypertension category of a systolic/diastolic pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureLevel {
    Normal,
    Elevated,
    #[serde(rename = "stage_1")]
    Stage1,
    #[serde(rename = "stage_2")]
    Stage2,
    Crisis,
}

impl BloodPressureLevel {
    /// Classify a reading. The higher category of the two values wins, so a
    /// high diastolic alone is enough to raise the level.
    pub fn classify(systolic: u16, diastolic: u16) -> Self {
        if systolic >= 180 || diastolic >= 120 {
            BloodPressureLevel::Crisis
        } else if systolic >= 140 || diastolic >= 90 {
            BloodPressureLevel::Stage2
        } else if systolic >= 130 || diastolic >= 85 {
            BloodPressureLevel::Stage1
        } else if systolic >= 120 {
            BloodPressureLevel::Elevated
        } else {
            BloodPressureLevel::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BloodPressureLevel::Normal => "normal",
            BloodPressureLevel::Elevated => "elevated",
            BloodPressureLevel::Stage1 => "stage_1",
            BloodPressureLevel::Stage2 => "stage_2",
            BloodPressureLevel::Crisis => "crisis",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            BloodPressureLevel::Normal => "Normal",
            BloodPressureLevel::Elevated => "High-normal",
            BloodPressureLevel::Stage1 => "Hypertension (stage 1)",
            BloodPressureLevel::Stage2 => "Hypertension (stage 2)",
            BloodPressureLevel::Crisis => "Hypertensive crisis",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(BloodPressureLevel::classify(115, 75), BloodPressureLevel::Normal);
    }

    #[test]
    fn elevated() {
        assert_eq!(BloodPressureLevel::classify(125, 75), BloodPressureLevel::Elevated);
    }

    #[test]
    fn stage_1() {
        assert_eq!(BloodPressureLevel::classify(135, 87), BloodPressureLevel::Stage1);
    }

    #[test]
    fn stage_2() {
        assert_eq!(BloodPressureLevel::classify(145, 95), BloodPressureLevel::Stage2);
    }

    #[test]
    fn crisis() {
        assert_eq!(BloodPressureLevel::classify(185, 125), BloodPressureLevel::Crisis);
        assert_eq!(BloodPressureLevel::classify(150, 120), BloodPressureLevel::Crisis);
    }

    #[test]
    fn diastolic_alone_raises_level() {
        assert_eq!(BloodPressureLevel::classify(115, 92), BloodPressureLevel::Stage2);
        assert_eq!(BloodPressureLevel::classify(110, 85), BloodPressureLevel::Stage1);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(BloodPressureLevel::classify(120, 60), BloodPressureLevel::Elevated);
        assert_eq!(BloodPressureLevel::classify(130, 60), BloodPressureLevel::Stage1);
        assert_eq!(BloodPressureLevel::classify(140, 60), BloodPressureLevel::Stage2);
        assert_eq!(BloodPressureLevel::classify(180, 60), BloodPressureLevel::Crisis);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(BloodPressureLevel::Normal < BloodPressureLevel::Elevated);
        assert!(BloodPressureLevel::Stage2 < BloodPressureLevel::Crisis);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&BloodPressureLevel::Stage1).unwrap();
        assert_eq!(json, "\"stage_1\"");
        assert_eq!(BloodPressureLevel::Stage1.as_str(), "stage_1");
    }
}
