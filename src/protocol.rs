//! Line-oriented telemetry protocol.
//!
//! The device emits one sample per line:
//!
//! ```text
//! > 23.50;24.10;55.00
//! ```
//!
//! i.e. the marker `"> "` followed by temperature A, temperature B and the duty
//! cycle in percent, separated by semicolons. Anything else is rejected.

use chrono::{DateTime, Local};
use thiserror::Error;

/// Marker every sample line starts with.
pub const LINE_PREFIX: &str = "> ";

/// Separator between the numeric fields.
pub const FIELD_SEPARATOR: char = ';';

/// Number of numeric fields carried by a sample line.
pub const FIELD_COUNT: usize = 3;

/// One decoded telemetry reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    temperature_a: f64,
    temperature_b: f64,
    duty_cycle: f64,
    captured_at: DateTime<Local>,
}

impl Sample {
    pub fn new(
        temperature_a: f64,
        temperature_b: f64,
        duty_cycle: f64,
        captured_at: DateTime<Local>,
    ) -> Self {
        Self {
            temperature_a,
            temperature_b,
            duty_cycle,
            captured_at,
        }
    }

    pub fn temperature_a(&self) -> f64 {
        self.temperature_a
    }

    pub fn temperature_b(&self) -> f64 {
        self.temperature_b
    }

    /// Duty cycle in percent.
    pub fn duty_cycle(&self) -> f64 {
        self.duty_cycle
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }
}

/// Why a line was not accepted as a sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSample {
    #[error("line does not start with \"> \"")]
    MissingPrefix,
    #[error("expected 3 fields, found {found}")]
    FieldCount { found: usize },
    #[error("field {index} is not a number: {value:?}")]
    InvalidNumber { index: usize, value: String },
}

/// Parse a line, stamping the sample with the current local time.
pub fn parse(line: &str) -> Result<Sample, MalformedSample> {
    parse_at(line, Local::now())
}

/// Parse a line, stamping the sample with `captured_at`.
pub fn parse_at(line: &str, captured_at: DateTime<Local>) -> Result<Sample, MalformedSample> {
    let body = line
        .strip_prefix(LINE_PREFIX)
        .ok_or(MalformedSample::MissingPrefix)?;

    let fields: Vec<&str> = body.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(MalformedSample::FieldCount {
            found: fields.len(),
        });
    }

    let mut values = [0.0f64; FIELD_COUNT];
    for (index, (slot, raw)) in values.iter_mut().zip(&fields).enumerate() {
        *slot = parse_field(raw).ok_or_else(|| MalformedSample::InvalidNumber {
            index,
            value: raw.to_string(),
        })?;
    }

    let [a, b, duty] = values;
    Ok(Sample::new(a, b, duty, captured_at))
}

fn parse_field(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a reading as a wire line (without the trailing newline).
pub fn format_line(temperature_a: f64, temperature_b: f64, duty_cycle: f64) -> String {
    format!("{LINE_PREFIX}{temperature_a:.2}{FIELD_SEPARATOR}{temperature_b:.2}{FIELD_SEPARATOR}{duty_cycle:.2}")
}
