//! Engine constants, dynamic state, and the per-tick orchestrator.
//!
//! [`Simulation`] owns every subsystem (state, metrics, gearbox, upgrade
//! registry, RNG) and advances them with [`Simulation::update`]: apply the
//! tick's command if any, integrate jerk → acceleration → rpm, drift the
//! temperature, roll the stochastic water-injection toggle, run the
//! automatic shift logic, recompute metrics and road speed, then manage the
//! transient status notice.

use crate::command::ControlCommand;
use crate::gearbox::Gearbox;
use crate::performance::PerformanceMetrics;
use crate::rng::SimRng;
use crate::snapshot::{DisplaySnapshot, Notice};
use crate::upgrade::{UnknownUpgrade, Upgrade, UpgradeRegistry};

// ---------------------------------------------------------------------------
// Tuning constants
// ---------------------------------------------------------------------------

/// Automatic upshift threshold, rpm.
pub const SHIFT_UP_RPM: f64 = 4000.0;
/// Automatic downshift threshold, rpm.
pub const SHIFT_DOWN_RPM: f64 = 2000.0;
/// Engine speed change absorbed by a gear shift, rpm.
pub const SHIFT_RPM_STEP: f64 = 1500.0;
/// Engine speed change from one pedal tap, rpm.
pub const PEDAL_RPM_STEP: f64 = 100.0;
/// Coolant-limited temperature band, °C.
pub const TEMP_FLOOR_C: f64 = 85.0;
pub const TEMP_CEIL_C: f64 = 110.0;
/// Jerk and acceleration saturation limits.
pub const JERK_LIMIT: f64 = 500.0;
pub const ACCEL_LIMIT: f64 = 50.0;
/// How long a status notice stays on screen, seconds.
pub const NOTICE_SECS: f64 = 3.0;

/// Magnitude of the per-tick random jerk kick.
const JERK_KICK: i64 = 100;
/// rpm moved per unit of acceleration per second.
const RPM_PER_ACCEL: f64 = 10.0;
/// Per-tick probability of the water-injection system flipping state.
const WATER_TOGGLE_CHANCE: f64 = 0.005;
/// Cranking speed a fresh engine settles at, before bound clamping.
const INITIAL_RPM: f64 = 1000.0;

// ---------------------------------------------------------------------------
// EngineSpec
// ---------------------------------------------------------------------------

/// Immutable physical description of the engine and drivetrain.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineSpec {
    /// Cylinder bore, m.
    pub bore: f64,
    /// Piston stroke, m.
    pub stroke: f64,
    pub compression_ratio: f64,
    pub cylinders: u32,
    /// Connecting rod length, m.
    pub rod_length: f64,
    pub idle_rpm: f64,
    pub max_rpm: f64,
    /// Mean effective pressure, Pa.
    pub mean_effective_pressure: f64,
    /// Coolant temperature the engine is tuned for, °C.
    pub optimal_temperature: f64,
    /// Driven wheel radius, m.
    pub wheel_radius: f64,
    pub final_drive_ratio: f64,
}

impl Default for EngineSpec {
    /// The reference engine: a 1.5 litre three-cylinder.
    fn default() -> Self {
        Self {
            bore: 0.086,
            stroke: 0.086,
            compression_ratio: 11.0,
            cylinders: 3,
            rod_length: 0.143,
            idle_rpm: 800.0,
            max_rpm: 6000.0,
            mean_effective_pressure: 1.0e6,
            optimal_temperature: 90.0,
            wheel_radius: 0.3175,
            final_drive_ratio: 3.73,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineState
// ---------------------------------------------------------------------------

/// Dynamic scalars, each clamped to its band after every mutation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineState {
    pub rpm: f64,
    /// Coolant temperature, °C, held within `[TEMP_FLOOR_C, TEMP_CEIL_C]`.
    pub temperature: f64,
    /// m/s², held within ±[`ACCEL_LIMIT`].
    pub acceleration: f64,
    /// m/s³, held within ±[`JERK_LIMIT`].
    pub jerk: f64,
}

impl EngineState {
    /// State of a freshly started engine: cranked to roughly 1000 rpm at
    /// operating temperature, at rest.
    pub fn new(spec: &EngineSpec) -> Self {
        Self {
            rpm: INITIAL_RPM.clamp(spec.idle_rpm, spec.max_rpm),
            temperature: spec.optimal_temperature.clamp(TEMP_FLOOR_C, TEMP_CEIL_C),
            acceleration: 0.0,
            jerk: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// TransmissionMode
// ---------------------------------------------------------------------------

/// Who decides gear changes: the simulation or the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransmissionMode {
    Automatic,
    Manual,
}

impl TransmissionMode {
    pub fn toggled(self) -> Self {
        match self {
            TransmissionMode::Automatic => TransmissionMode::Manual,
            TransmissionMode::Manual => TransmissionMode::Automatic,
        }
    }
}

impl std::fmt::Display for TransmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TransmissionMode::Automatic => "Automatic",
            TransmissionMode::Manual => "Manual",
        })
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// The whole simulated vehicle, advanced one tick at a time.
pub struct Simulation {
    pub spec: EngineSpec,
    pub state: EngineState,
    pub metrics: PerformanceMetrics,
    pub gearbox: Gearbox,
    pub upgrades: UpgradeRegistry,
    mode: TransmissionMode,
    water_injection: bool,
    vehicle_speed: f64,
    notice: Option<Notice>,
    rng: SimRng,
    tick: u64,
}

impl Simulation {
    /// Reference engine, default gearbox, given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self::with_spec(EngineSpec::default(), Gearbox::default(), seed)
    }

    /// Build from an explicit spec and gearbox. Metrics and road speed are
    /// computed immediately so the first snapshot is already consistent.
    pub fn with_spec(spec: EngineSpec, gearbox: Gearbox, seed: u64) -> Self {
        let state = EngineState::new(&spec);
        let mut sim = Self {
            spec,
            state,
            metrics: PerformanceMetrics::new(),
            gearbox,
            upgrades: UpgradeRegistry::new(),
            mode: TransmissionMode::Automatic,
            water_injection: false,
            vehicle_speed: 0.0,
            notice: None,
            rng: SimRng::new(seed),
            tick: 0,
        };
        sim.recompute_metrics();
        sim.update_vehicle_speed();
        sim
    }

    pub fn mode(&self) -> TransmissionMode {
        self.mode
    }

    pub fn water_injection(&self) -> bool {
        self.water_injection
    }

    /// Road speed, m/s.
    pub fn vehicle_speed(&self) -> f64 {
        self.vehicle_speed
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Ticks advanced since construction.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Activate an upgrade by identifier and fold its effect into the
    /// metrics. Unknown identifiers change nothing.
    pub fn apply_upgrade(&mut self, id: &str) -> Result<Upgrade, UnknownUpgrade> {
        let upgrade = self.upgrades.apply(id)?;
        self.recompute_metrics();
        Ok(upgrade)
    }

    /// Force the water-injection system on or off and recompute.
    pub fn set_water_injection(&mut self, active: bool) {
        self.water_injection = active;
        self.recompute_metrics();
    }

    /// Flip Automatic ↔ Manual and report the new mode through the notice.
    pub fn toggle_transmission_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.notice = Some(Notice::new(
            format!("Transmission mode switched to {}", self.mode),
            NOTICE_SECS,
        ));
    }

    /// Throttle tap: rpm step, warm-up that tapers as the engine gets hot,
    /// immediate recompute, then the shift-threshold check. The threshold
    /// shift here ignores the transmission mode and posts no notice.
    pub fn accelerate(&mut self) {
        self.state.rpm = (self.state.rpm + PEDAL_RPM_STEP).min(self.spec.max_rpm);

        let warm_up = 0.5 * (1.0 - (self.state.temperature - 90.0) / 100.0);
        self.state.temperature = (self.state.temperature + warm_up.max(0.0)).min(TEMP_CEIL_C);

        self.recompute_metrics();
        self.update_vehicle_speed();

        if self.state.rpm > SHIFT_UP_RPM && !self.gearbox.in_top_gear() {
            self.gearbox.shift_up();
            self.state.rpm -= SHIFT_RPM_STEP;
        }
    }

    /// Engine braking: rpm step down with a cool-down that only acts above
    /// 90 °C, mirroring [`accelerate`](Self::accelerate).
    pub fn decelerate(&mut self) {
        self.state.rpm = (self.state.rpm - PEDAL_RPM_STEP).max(self.spec.idle_rpm);

        let cool_down = 0.2 * ((self.state.temperature - 90.0) / 100.0);
        self.state.temperature = (self.state.temperature - cool_down.max(0.0)).max(TEMP_FLOOR_C);

        self.recompute_metrics();
        self.update_vehicle_speed();

        if self.state.rpm < SHIFT_DOWN_RPM && !self.gearbox.in_bottom_gear() {
            self.gearbox.shift_down();
            self.state.rpm += SHIFT_RPM_STEP;
        }
    }

    /// Driver upshift. Only honored in Manual mode; a clamped shift still
    /// posts a notice so the driver learns the box is at its limit.
    pub fn manual_shift_up(&mut self) {
        if self.mode != TransmissionMode::Manual {
            return;
        }
        if self.gearbox.in_top_gear() {
            self.notice = Some(Notice::new("Already in highest gear", NOTICE_SECS));
            return;
        }
        self.gearbox.shift_up();
        self.state.rpm = (self.state.rpm - SHIFT_RPM_STEP).max(self.spec.idle_rpm);
        self.notice = Some(Notice::new(
            format!("Manually shifted up to gear {}", self.gearbox.current_gear()),
            NOTICE_SECS,
        ));
    }

    /// Driver downshift, Manual mode only.
    pub fn manual_shift_down(&mut self) {
        if self.mode != TransmissionMode::Manual {
            return;
        }
        if self.gearbox.in_bottom_gear() {
            self.notice = Some(Notice::new("Already in lowest gear", NOTICE_SECS));
            return;
        }
        self.gearbox.shift_down();
        self.state.rpm = (self.state.rpm + SHIFT_RPM_STEP).min(self.spec.max_rpm);
        self.notice = Some(Notice::new(
            format!(
                "Manually shifted down to gear {}",
                self.gearbox.current_gear()
            ),
            NOTICE_SECS,
        ));
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the simulation by `dt` seconds, applying at most one command
    /// first.
    pub fn update(&mut self, dt: f64, command: Option<ControlCommand>) {
        if let Some(command) = command {
            self.apply_command(command);
        }

        // Stochastic jerk kick drives the acceleration random walk, which in
        // turn drives rpm.
        let kick = self.rng.range_i64(-JERK_KICK, JERK_KICK) as f64;
        self.state.jerk = (self.state.jerk + kick * dt).clamp(-JERK_LIMIT, JERK_LIMIT);
        self.state.acceleration =
            (self.state.acceleration + self.state.jerk * dt).clamp(-ACCEL_LIMIT, ACCEL_LIMIT);
        self.state.rpm = (self.state.rpm + self.state.acceleration * dt * RPM_PER_ACCEL)
            .clamp(self.spec.idle_rpm, self.spec.max_rpm);

        // Warm up under load, cool off on the overrun.
        let temp_rate = if self.state.acceleration > 0.0 { 0.5 } else { -0.2 };
        self.state.temperature =
            (self.state.temperature + temp_rate * dt).clamp(TEMP_FLOOR_C, TEMP_CEIL_C);

        if self.rng.chance(WATER_TOGGLE_CHANCE) {
            self.set_water_injection(!self.water_injection);
        }

        let previous_gear = self.gearbox.current_gear();

        if self.mode == TransmissionMode::Automatic {
            if self.state.rpm > SHIFT_UP_RPM && !self.gearbox.in_top_gear() {
                self.gearbox.shift_up();
                self.state.rpm -= SHIFT_RPM_STEP;
            } else if self.state.rpm < SHIFT_DOWN_RPM && !self.gearbox.in_bottom_gear() {
                self.gearbox.shift_down();
                self.state.rpm += SHIFT_RPM_STEP;
            }
        }

        self.state.rpm = self
            .state
            .rpm
            .clamp(self.spec.idle_rpm, self.spec.max_rpm);

        self.recompute_metrics();
        self.update_vehicle_speed();

        if self.gearbox.current_gear() != previous_gear {
            self.notice = Some(Notice::new(
                format!("Shifted to gear {}", self.gearbox.current_gear()),
                NOTICE_SECS,
            ));
        } else if let Some(notice) = &mut self.notice {
            notice.remaining_secs -= dt;
            if notice.remaining_secs <= 0.0 {
                self.notice = None;
            }
        }

        self.tick += 1;
    }

    /// Project the current state for the renderer.
    pub fn snapshot(&self, fps: f64) -> DisplaySnapshot {
        DisplaySnapshot {
            tick: self.tick,
            rpm: self.state.rpm,
            temperature: self.state.temperature,
            acceleration: self.state.acceleration,
            jerk: self.state.jerk,
            gear: self.gearbox.current_gear(),
            gear_count: self.gearbox.gear_count(),
            transmission_mode: self.mode,
            vehicle_speed: self.vehicle_speed,
            displacement: self.metrics.displacement,
            power_kw: self.metrics.power_kw,
            torque_nm: self.metrics.torque_nm,
            thermal_efficiency: self.metrics.thermal_efficiency,
            volumetric_efficiency: self.metrics.volumetric_efficiency,
            fuel_consumption: self.metrics.fuel_consumption,
            bsfc: self.metrics.bsfc,
            co2_emissions: self.metrics.co2_emissions,
            nox_emissions: self.metrics.nox_emissions,
            water_injection: self.water_injection,
            notice: self.notice.clone(),
            fps,
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn apply_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Accelerate => self.accelerate(),
            ControlCommand::Decelerate => self.decelerate(),
            ControlCommand::ShiftUp => self.manual_shift_up(),
            ControlCommand::ShiftDown => self.manual_shift_down(),
            ControlCommand::ToggleMode => self.toggle_transmission_mode(),
        }
    }

    fn recompute_metrics(&mut self) {
        self.metrics
            .recompute(&self.spec, &self.state, &self.upgrades, self.water_injection);
    }

    fn update_vehicle_speed(&mut self) {
        let wheel_rpm =
            self.state.rpm / (self.gearbox.current_ratio() * self.spec.final_drive_ratio);
        self.vehicle_speed =
            wheel_rpm * 2.0 * std::f64::consts::PI * self.spec.wheel_radius / 60.0;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;
    const EPS: f64 = 1e-9;

    fn sim() -> Simulation {
        Simulation::new(42)
    }

    fn manual_sim() -> Simulation {
        let mut sim = sim();
        sim.toggle_transmission_mode();
        sim
    }

    #[test]
    fn fresh_engine_is_consistent() {
        let sim = sim();
        assert_eq!(sim.state.rpm, 1000.0);
        assert_eq!(sim.state.temperature, 90.0);
        assert_eq!(sim.gearbox.current_gear(), 1);
        assert_eq!(sim.mode(), TransmissionMode::Automatic);
        assert!(!sim.water_injection());
        assert!(sim.notice().is_none());
        // Metrics and speed are already derived.
        assert!(sim.metrics.power_kw > 0.0);
        assert!(sim.vehicle_speed() > 0.0);
        assert_eq!(sim.tick(), 0);
    }

    #[test]
    fn vehicle_speed_follows_gearing() {
        let sim = sim();
        let wheel_rpm = 1000.0 / (3.42 * 3.73);
        let expected = wheel_rpm * 2.0 * std::f64::consts::PI * 0.3175 / 60.0;
        assert!((sim.vehicle_speed() - expected).abs() < EPS);
    }

    #[test]
    fn accelerate_bumps_rpm_and_warms() {
        let mut sim = sim();
        sim.accelerate();
        assert_eq!(sim.state.rpm, 1100.0);
        // At 90 °C the warm-up step is exactly 0.5.
        assert!((sim.state.temperature - 90.5).abs() < EPS);
    }

    #[test]
    fn accelerate_caps_at_max_rpm() {
        let mut sim = sim();
        sim.gearbox = Gearbox::new(vec![3.42]); // single gear: no shifts
        sim.state.rpm = 5950.0;
        sim.accelerate();
        assert_eq!(sim.state.rpm, 6000.0);
    }

    #[test]
    fn decelerate_floors_at_idle() {
        let mut sim = sim();
        sim.state.rpm = 850.0;
        sim.decelerate();
        assert_eq!(sim.state.rpm, 800.0);
    }

    #[test]
    fn decelerate_never_cools_below_ninety() {
        let mut sim = sim();
        sim.decelerate();
        assert_eq!(sim.state.temperature, 90.0);

        sim.state.temperature = 100.0;
        sim.decelerate();
        // 0.2 × (10/100)
        assert!((sim.state.temperature - 99.98).abs() < EPS);
    }

    #[test]
    fn accelerate_past_threshold_shifts_up() {
        let mut sim = sim();
        sim.state.rpm = 3950.0;
        sim.accelerate();
        assert_eq!(sim.gearbox.current_gear(), 2);
        assert_eq!(sim.state.rpm, 4050.0 - 1500.0);
        // Pedal-path shifts post no notice.
        assert!(sim.notice().is_none());
    }

    #[test]
    fn pedal_shift_ignores_transmission_mode() {
        let mut sim = manual_sim();
        sim.state.rpm = 3950.0;
        sim.accelerate();
        assert_eq!(sim.gearbox.current_gear(), 2);
    }

    #[test]
    fn decelerate_past_threshold_shifts_down() {
        let mut sim = sim();
        sim.gearbox.shift_up();
        sim.state.rpm = 2050.0;
        sim.decelerate();
        assert_eq!(sim.gearbox.current_gear(), 1);
        assert_eq!(sim.state.rpm, 1950.0 + 1500.0);
    }

    #[test]
    fn manual_shift_requires_manual_mode() {
        let mut sim = sim();
        sim.manual_shift_up();
        assert_eq!(sim.gearbox.current_gear(), 1);
        assert!(sim.notice().is_none());
    }

    #[test]
    fn manual_upshift_drops_rpm_and_notifies() {
        let mut sim = manual_sim();
        sim.state.rpm = 3000.0;
        sim.manual_shift_up();
        assert_eq!(sim.gearbox.current_gear(), 2);
        assert_eq!(sim.state.rpm, 1500.0);
        let notice = sim.notice().unwrap();
        assert_eq!(notice.text, "Manually shifted up to gear 2");
        assert_eq!(notice.remaining_secs, NOTICE_SECS);
    }

    #[test]
    fn manual_upshift_floors_rpm_at_idle() {
        let mut sim = manual_sim();
        sim.state.rpm = 900.0;
        sim.manual_shift_up();
        assert_eq!(sim.state.rpm, 800.0);
    }

    #[test]
    fn manual_downshift_caps_rpm_at_max() {
        let mut sim = manual_sim();
        sim.gearbox.shift_up();
        sim.state.rpm = 5800.0;
        sim.manual_shift_down();
        assert_eq!(sim.gearbox.current_gear(), 1);
        assert_eq!(sim.state.rpm, 6000.0);
    }

    #[test]
    fn manual_upshift_at_top_gear_reports_limit() {
        let mut sim = manual_sim();
        for _ in 0..4 {
            sim.gearbox.shift_up();
        }
        let rpm_before = sim.state.rpm;
        sim.manual_shift_up();
        assert_eq!(sim.gearbox.current_gear(), 5);
        assert_eq!(sim.state.rpm, rpm_before);
        assert_eq!(sim.notice().unwrap().text, "Already in highest gear");
    }

    #[test]
    fn manual_downshift_at_first_gear_reports_limit() {
        let mut sim = manual_sim();
        sim.manual_shift_down();
        assert_eq!(sim.gearbox.current_gear(), 1);
        assert_eq!(sim.notice().unwrap().text, "Already in lowest gear");
    }

    #[test]
    fn toggle_mode_flips_and_notifies() {
        let mut sim = sim();
        sim.toggle_transmission_mode();
        assert_eq!(sim.mode(), TransmissionMode::Manual);
        assert_eq!(
            sim.notice().unwrap().text,
            "Transmission mode switched to Manual"
        );

        sim.toggle_transmission_mode();
        assert_eq!(sim.mode(), TransmissionMode::Automatic);
        assert_eq!(
            sim.notice().unwrap().text,
            "Transmission mode switched to Automatic"
        );
    }

    #[test]
    fn auto_upshift_during_tick() {
        let mut sim = sim();
        sim.state.rpm = 4200.0;
        sim.update(DT, None);

        assert_eq!(sim.gearbox.current_gear(), 2);
        // 4200 − 1500, give or take one tick of drift.
        assert!((sim.state.rpm - 2700.0).abs() < 5.0);
        let notice = sim.notice().unwrap();
        assert_eq!(notice.text, "Shifted to gear 2");
        assert_eq!(notice.remaining_secs, NOTICE_SECS);
    }

    #[test]
    fn auto_downshift_during_tick() {
        let mut sim = sim();
        sim.gearbox.shift_up();
        sim.state.rpm = 1900.0;
        sim.update(DT, None);

        assert_eq!(sim.gearbox.current_gear(), 1);
        assert!((sim.state.rpm - 3400.0).abs() < 5.0);
        assert_eq!(sim.notice().unwrap().text, "Shifted to gear 1");
    }

    #[test]
    fn no_auto_shift_in_manual_mode() {
        let mut sim = manual_sim();
        sim.state.rpm = 4200.0;
        sim.update(DT, None);
        assert_eq!(sim.gearbox.current_gear(), 1);
        assert!((sim.state.rpm - 4200.0).abs() < 5.0);
    }

    #[test]
    fn notice_decrements_and_expires() {
        let mut sim = manual_sim();
        sim.state.rpm = 3000.0;
        sim.manual_shift_up();
        assert_eq!(sim.notice().unwrap().remaining_secs, 3.0);

        for _ in 0..5 {
            sim.update(0.5, None);
        }
        let notice = sim.notice().unwrap();
        assert!((notice.remaining_secs - 0.5).abs() < EPS);

        sim.update(0.5, None);
        assert!(sim.notice().is_none());
    }

    #[test]
    fn commands_route_through_update() {
        let mut sim = sim();
        sim.update(DT, Some(ControlCommand::ToggleMode));
        assert_eq!(sim.mode(), TransmissionMode::Manual);

        let rpm_before = sim.state.rpm;
        sim.update(DT, Some(ControlCommand::Accelerate));
        assert!(sim.state.rpm > rpm_before + 90.0);
    }

    #[test]
    fn apply_upgrade_scales_metrics() {
        let mut sim = sim();
        let base_power = sim.metrics.power_kw;
        let applied = sim.apply_upgrade("turbocharger").unwrap();
        assert_eq!(applied, Upgrade::Turbocharger);
        assert!((sim.metrics.power_kw - base_power * 1.2).abs() < EPS);
    }

    #[test]
    fn apply_unknown_upgrade_changes_nothing() {
        let mut sim = sim();
        let before = sim.metrics.clone();
        let err = sim.apply_upgrade("afterburner").unwrap_err();
        assert_eq!(err.to_string(), "Unknown upgrade: afterburner");
        assert_eq!(sim.metrics, before);
        assert_eq!(sim.upgrades.active_count(), 0);
    }

    #[test]
    fn water_injection_recomputes_immediately() {
        let mut sim = sim();
        let dry_thermal = sim.metrics.thermal_efficiency;
        sim.set_water_injection(true);
        assert!(sim.water_injection());
        assert!((sim.metrics.thermal_efficiency - dry_thermal * 1.1).abs() < EPS);
    }

    #[test]
    fn tick_counter_increments() {
        let mut sim = sim();
        for _ in 0..10 {
            sim.update(DT, None);
        }
        assert_eq!(sim.tick(), 10);
        assert_eq!(sim.snapshot(60.0).tick, 10);
    }

    #[test]
    fn snapshot_mirrors_simulation() {
        let mut sim = sim();
        sim.update(DT, Some(ControlCommand::Accelerate));
        let snap = sim.snapshot(59.9);

        assert_eq!(snap.rpm, sim.state.rpm);
        assert_eq!(snap.temperature, sim.state.temperature);
        assert_eq!(snap.gear, sim.gearbox.current_gear());
        assert_eq!(snap.gear_count, 5);
        assert_eq!(snap.transmission_mode, sim.mode());
        assert_eq!(snap.power_kw, sim.metrics.power_kw);
        assert_eq!(snap.vehicle_speed, sim.vehicle_speed());
        assert_eq!(snap.fps, 59.9);
    }
}
