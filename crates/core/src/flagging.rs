//! Clinical measurement flagging.
//!
//! A measurement is *flagged* when its value falls into a critical band for its type. The
//! classification is a pure function of `(type, value)`: no clock, no store, no configuration.
//!
//! | Type | Value format | Flagged when |
//! |---|---|---|
//! | Blood Pressure | `systolic/diastolic` | systolic ≥ 180 or diastolic ≥ 120 |
//! | Heart Rate | number (bpm) | outside 60–100 |
//! | Respiratory Rate | number (breaths/min) | outside 12–20 |
//! | Blood Oxygen Level | number (%) | outside 95–100 |
//!
//! Type labels match case-insensitively. Unknown types and values that cannot be parsed for
//! their type are never flagged.

/// Hypertensive crisis thresholds.
pub const CRISIS_SYSTOLIC: f64 = 180.0;
pub const CRISIS_DIASTOLIC: f64 = 120.0;

/// Inclusive normal range for a single-number vital sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

impl NormalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Measurement types with a flagging rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vital {
    BloodPressure,
    HeartRate,
    RespiratoryRate,
    BloodOxygenLevel,
}

impl Vital {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "blood pressure" => Some(Vital::BloodPressure),
            "heart rate" => Some(Vital::HeartRate),
            "respiratory rate" => Some(Vital::RespiratoryRate),
            "blood oxygen level" => Some(Vital::BloodOxygenLevel),
            _ => None,
        }
    }

    /// Normal range for single-number vitals; `None` for blood pressure.
    pub fn normal_range(self) -> Option<NormalRange> {
        match self {
            Vital::BloodPressure => None,
            Vital::HeartRate => Some(NormalRange::new(60.0, 100.0)),
            Vital::RespiratoryRate => Some(NormalRange::new(12.0, 20.0)),
            Vital::BloodOxygenLevel => Some(NormalRange::new(95.0, 100.0)),
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses `"systolic/diastolic"`.
pub fn parse_blood_pressure(value: &str) -> Option<(f64, f64)> {
    let (systolic, diastolic) = value.split_once('/')?;
    Some((parse_number(systolic)?, parse_number(diastolic)?))
}

/// Returns true when a measurement of `kind` with `value` is critical.
pub fn is_critical(kind: &str, value: &str) -> bool {
    let Some(vital) = Vital::from_label(kind) else {
        return false;
    };

    match vital {
        Vital::BloodPressure => parse_blood_pressure(value)
            .is_some_and(|(sys, dia)| sys >= CRISIS_SYSTOLIC || dia >= CRISIS_DIASTOLIC),
        other => match (other.normal_range(), parse_number(value)) {
            (Some(range), Some(v)) => !range.contains(v),
            _ => false,
        },
    }
}
