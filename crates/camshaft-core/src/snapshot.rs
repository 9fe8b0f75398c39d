//! Read model handed to renderers once per tick.
//!
//! The snapshot carries full-precision values in SI units; layout, unit
//! conversion (m/s to km/h, m³ to cc, fractions to percent) and numeric
//! truncation are entirely the renderer's business.

use crate::engine::TransmissionMode;

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Transient status line (gear shifts, mode changes) with its remaining
/// display time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Notice {
    pub text: String,
    pub remaining_secs: f64,
}

impl Notice {
    pub fn new(text: impl Into<String>, remaining_secs: f64) -> Self {
        Self {
            text: text.into(),
            remaining_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// DisplaySnapshot
// ---------------------------------------------------------------------------

/// Immutable projection of the whole simulation, produced once per tick.
///
/// `PartialEq` is field-exact; two runs from the same seed and command
/// sequence produce bit-identical snapshots, which the determinism check
/// relies on.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplaySnapshot {
    pub tick: u64,

    // Dynamic engine state
    pub rpm: f64,
    pub temperature: f64,
    pub acceleration: f64,
    pub jerk: f64,

    // Drivetrain
    pub gear: usize,
    pub gear_count: usize,
    pub transmission_mode: TransmissionMode,
    pub vehicle_speed: f64,

    // Performance metrics
    pub displacement: f64,
    pub power_kw: f64,
    pub torque_nm: f64,
    pub thermal_efficiency: f64,
    pub volumetric_efficiency: f64,
    pub fuel_consumption: f64,
    pub bsfc: f64,
    pub co2_emissions: f64,
    pub nox_emissions: f64,

    // Status
    pub water_injection: bool,
    pub notice: Option<Notice>,
    pub fps: f64,
}
