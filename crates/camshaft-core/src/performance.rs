//! Derived performance metrics and the per-tick recomputation pipeline.
//!
//! Everything here is rederived from the engine constants and the current
//! dynamic state once per tick, with two exceptions: volumetric efficiency is
//! persistent state that the upgrade pass scales and the final step clamps,
//! and fuel/NOx pick up their upgrade multipliers *before* being rederived
//! further down the pipeline, so those two multipliers only matter through
//! power and thermal efficiency. Both quirks are load-bearing upstream
//! behavior; the step order below is fixed.

use crate::engine::{EngineSpec, EngineState};
use crate::upgrade::UpgradeRegistry;

/// Lower heating value of gasoline, kJ/kg.
pub const FUEL_ENERGY_KJ_PER_KG: f64 = 43_000.0;

/// CO2 mass emitted per unit of fuel burned (gasoline stoichiometry).
pub const CO2_PER_UNIT_FUEL: f64 = 3.2;

/// NOx formation reference temperature, °C.
pub const NOX_REFERENCE_TEMP_C: f64 = 90.0;

/// Volumetric efficiency is clamped to this range after every recompute.
pub const VOLUMETRIC_RANGE: (f64, f64) = (0.7, 1.0);

// ---------------------------------------------------------------------------
// PerformanceMetrics
// ---------------------------------------------------------------------------

/// Output of the performance pipeline.
///
/// Units: displacement m³, piston speed m/s, power kW, torque N·m,
/// efficiencies as fractions, fuel kg/h; BSFC/CO2/NOx follow the upstream
/// formulas and are reported as-is.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PerformanceMetrics {
    pub displacement: f64,
    pub rod_stroke_ratio: f64,
    pub piston_speed: f64,
    pub power_kw: f64,
    pub torque_nm: f64,
    pub thermal_efficiency: f64,
    pub volumetric_efficiency: f64,
    pub fuel_consumption: f64,
    pub bsfc: f64,
    pub co2_emissions: f64,
    pub nox_emissions: f64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMetrics {
    /// Metrics before the first recompute: volumetric efficiency seeds at
    /// 0.9 and NOx at 0.5, everything else at zero.
    pub fn new() -> Self {
        Self {
            displacement: 0.0,
            rod_stroke_ratio: 0.0,
            piston_speed: 0.0,
            power_kw: 0.0,
            torque_nm: 0.0,
            thermal_efficiency: 0.0,
            volumetric_efficiency: 0.9,
            fuel_consumption: 0.0,
            bsfc: 0.0,
            co2_emissions: 0.0,
            nox_emissions: 0.5,
        }
    }

    /// Run the full pipeline for the current state.
    ///
    /// Step order: base metrics, active upgrade multipliers, fuel/emissions
    /// derivation, water-injection adjustment, temperature-deviation penalty,
    /// volumetric clamp.
    pub fn recompute(
        &mut self,
        spec: &EngineSpec,
        state: &EngineState,
        upgrades: &UpgradeRegistry,
        water_injection: bool,
    ) {
        self.displacement = displacement(spec);
        self.rod_stroke_ratio = spec.rod_length / spec.stroke;
        self.piston_speed = mean_piston_speed(spec.stroke, state.rpm);
        self.power_kw = power_kw(spec.mean_effective_pressure, self.displacement, state.rpm);
        self.torque_nm = torque_nm(self.power_kw, state.rpm);
        self.thermal_efficiency = otto_thermal_efficiency(spec.compression_ratio);

        for upgrade in upgrades.active() {
            let effect = upgrade.effect();
            self.power_kw *= effect.power;
            self.fuel_consumption *= effect.fuel;
            self.thermal_efficiency *= effect.thermal;
            self.volumetric_efficiency *= effect.volumetric;
            self.nox_emissions *= effect.nox;
        }

        // Fuel and NOx are rederived from power/thermal/temperature here, so
        // upgrade multipliers applied to them above are superseded.
        self.fuel_consumption =
            self.power_kw * 3600.0 / (FUEL_ENERGY_KJ_PER_KG * self.thermal_efficiency);
        self.bsfc = self.fuel_consumption * 3600.0 / self.power_kw;
        self.co2_emissions = self.bsfc * CO2_PER_UNIT_FUEL;
        self.nox_emissions = 0.01
            * self.power_kw
            * (1.0 + (state.temperature - NOX_REFERENCE_TEMP_C) / 100.0);

        if water_injection {
            self.thermal_efficiency *= 1.1;
            self.nox_emissions *= 0.8;
        }

        let deviation = (state.temperature - spec.optimal_temperature).abs();
        if deviation > 10.0 {
            self.thermal_efficiency *= 1.0 - 0.001 * deviation;
        }

        let (vol_min, vol_max) = VOLUMETRIC_RANGE;
        self.volumetric_efficiency = self.volumetric_efficiency.clamp(vol_min, vol_max);
    }
}

// ---------------------------------------------------------------------------
// Base formulas
// ---------------------------------------------------------------------------

/// Swept volume across all cylinders, m³.
pub fn displacement(spec: &EngineSpec) -> f64 {
    std::f64::consts::FRAC_PI_4 * spec.bore * spec.bore * spec.stroke * spec.cylinders as f64
}

/// Mean piston speed, m/s: two strokes per revolution.
pub fn mean_piston_speed(stroke: f64, rpm: f64) -> f64 {
    2.0 * stroke * rpm / 60.0
}

/// Brake power in kW from mean effective pressure (Pa), displacement (m³)
/// and rpm, for a four-stroke cycle (one power stroke per two revolutions).
pub fn power_kw(mean_effective_pressure: f64, displacement: f64, rpm: f64) -> f64 {
    mean_effective_pressure * displacement * rpm / 120_000.0
}

/// Torque in N·m back-derived from power and rpm.
pub fn torque_nm(power_kw: f64, rpm: f64) -> f64 {
    power_kw * 1000.0 * 60.0 / (2.0 * std::f64::consts::PI * rpm)
}

/// Otto-cycle air-standard efficiency, `1 - r^(1-γ)` with γ = 1.4.
pub fn otto_thermal_efficiency(compression_ratio: f64) -> f64 {
    1.0 - compression_ratio.powf(-0.4)
}

// ===========================================================================
// Tests
// ===========================================================================
