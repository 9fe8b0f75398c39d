//! Engine upgrade catalog and activation registry.
//!
//! The catalog is a closed set: every upgrade the simulation understands is a
//! variant of [`Upgrade`], and its effect is a record of independent
//! multipliers over the performance metrics. The registry tracks which
//! upgrades are active; activation is one-way (there is no removal path, as
//! on a real engine once the part is bolted on).

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Upgrade catalog
// ---------------------------------------------------------------------------

/// Every upgrade the performance model understands.
///
/// String identifiers (config files, status messages) use the snake_case
/// form of the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Upgrade {
    DirectInjection,
    Turbocharger,
    VariableValveTiming,
    ExhaustGasRecirculation,
    WasteHeatRecovery,
    SmartCooling,
    AdvancedMaterials,
    EnhancedEcu,
    CylinderDeactivation,
    VariableCompression,
    CeramicCoating,
}

impl Upgrade {
    /// All upgrades, in catalog order. Effect application iterates in this
    /// order (immaterial for the result: the multipliers are independent).
    pub const ALL: [Upgrade; 11] = [
        Upgrade::DirectInjection,
        Upgrade::Turbocharger,
        Upgrade::VariableValveTiming,
        Upgrade::ExhaustGasRecirculation,
        Upgrade::WasteHeatRecovery,
        Upgrade::SmartCooling,
        Upgrade::AdvancedMaterials,
        Upgrade::EnhancedEcu,
        Upgrade::CylinderDeactivation,
        Upgrade::VariableCompression,
        Upgrade::CeramicCoating,
    ];

    /// String identifier used in config files and status messages.
    pub fn id(self) -> &'static str {
        match self {
            Upgrade::DirectInjection => "direct_injection",
            Upgrade::Turbocharger => "turbocharger",
            Upgrade::VariableValveTiming => "variable_valve_timing",
            Upgrade::ExhaustGasRecirculation => "exhaust_gas_recirculation",
            Upgrade::WasteHeatRecovery => "waste_heat_recovery",
            Upgrade::SmartCooling => "smart_cooling",
            Upgrade::AdvancedMaterials => "advanced_materials",
            Upgrade::EnhancedEcu => "enhanced_ecu",
            Upgrade::CylinderDeactivation => "cylinder_deactivation",
            Upgrade::VariableCompression => "variable_compression",
            Upgrade::CeramicCoating => "ceramic_coating",
        }
    }

    /// The multiplier record this upgrade contributes while active.
    pub fn effect(self) -> UpgradeEffect {
        match self {
            Upgrade::DirectInjection => UpgradeEffect {
                fuel: 0.9,
                thermal: 1.05,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::Turbocharger => UpgradeEffect {
                power: 1.2,
                volumetric: 1.15,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::VariableValveTiming => UpgradeEffect {
                volumetric: 1.1,
                fuel: 0.95,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::ExhaustGasRecirculation => UpgradeEffect {
                nox: 0.7,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::WasteHeatRecovery => UpgradeEffect {
                thermal: 1.05,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::SmartCooling => UpgradeEffect {
                thermal: 1.02,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::AdvancedMaterials => UpgradeEffect {
                power: 1.05,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::EnhancedEcu => UpgradeEffect {
                fuel: 0.95,
                power: 1.05,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::CylinderDeactivation => UpgradeEffect {
                fuel: 0.92,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::VariableCompression => UpgradeEffect {
                thermal: 1.08,
                fuel: 0.93,
                ..UpgradeEffect::IDENTITY
            },
            Upgrade::CeramicCoating => UpgradeEffect {
                thermal: 1.03,
                ..UpgradeEffect::IDENTITY
            },
        }
    }
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Upgrade {
    type Err = UnknownUpgrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Upgrade::ALL
            .iter()
            .copied()
            .find(|u| u.id() == s)
            .ok_or_else(|| UnknownUpgrade(s.to_string()))
    }
}

/// Identifier not present in the upgrade catalog. Non-fatal: the caller
/// reports it as a status line and the registry is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown upgrade: {0}")]
pub struct UnknownUpgrade(pub String);

// ---------------------------------------------------------------------------
// UpgradeEffect
// ---------------------------------------------------------------------------

/// Independent multipliers an active upgrade applies during metric
/// recomputation. Fields default to 1.0 (no effect).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeEffect {
    pub power: f64,
    pub fuel: f64,
    pub thermal: f64,
    pub volumetric: f64,
    pub nox: f64,
}

impl UpgradeEffect {
    /// The no-op effect: every multiplier 1.0.
    pub const IDENTITY: UpgradeEffect = UpgradeEffect {
        power: 1.0,
        fuel: 1.0,
        thermal: 1.0,
        volumetric: 1.0,
        nox: 1.0,
    };
}

impl Default for UpgradeEffect {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// UpgradeRegistry
// ---------------------------------------------------------------------------

/// Activation flags for the whole catalog.
///
/// Created fully populated with every upgrade inactive; only [`activate`]
/// (or [`apply`], its parsing wrapper) mutates it.
///
/// [`activate`]: UpgradeRegistry::activate
/// [`apply`]: UpgradeRegistry::apply
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpgradeRegistry {
    active: [bool; Upgrade::ALL.len()],
}

impl Default for UpgradeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UpgradeRegistry {
    /// Fresh registry with every upgrade inactive.
    pub fn new() -> Self {
        Self {
            active: [false; Upgrade::ALL.len()],
        }
    }

    /// Parse an identifier and activate it. Unknown identifiers leave the
    /// registry untouched.
    pub fn apply(&mut self, id: &str) -> Result<Upgrade, UnknownUpgrade> {
        let upgrade = id.parse::<Upgrade>()?;
        self.activate(upgrade);
        Ok(upgrade)
    }

    /// Mark an upgrade active. Idempotent.
    pub fn activate(&mut self, upgrade: Upgrade) {
        self.active[upgrade as usize] = true;
    }

    /// Whether an upgrade is currently active.
    pub fn is_active(&self, upgrade: Upgrade) -> bool {
        self.active[upgrade as usize]
    }

    /// Active upgrades in catalog order.
    pub fn active(&self) -> impl Iterator<Item = Upgrade> + '_ {
        Upgrade::ALL.iter().copied().filter(|u| self.is_active(*u))
    }

    /// Number of active upgrades.
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
