//! Setup file loading: format detection, deserialization, validation.
//!
//! Reads a [`SetupData`] from RON, JSON, or TOML (chosen by file extension)
//! and resolves it into a validated [`SimSetup`] ready to hand to the
//! simulation.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use camshaft_core::engine::EngineSpec;
use camshaft_core::gearbox::Gearbox;
use camshaft_core::runner::DEFAULT_HZ;

use crate::schema::SetupData;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a setup file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A field value fails validation.
    #[error("invalid {field}: {detail}")]
    Invalid { field: &'static str, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported setup file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(ConfigError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its detected format.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let parse_err = |detail: String| ConfigError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_err(e.to_string())),
    }
}

// ===========================================================================
// Resolution
// ===========================================================================

/// A validated setup, resolved into core types.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSetup {
    pub spec: EngineSpec,
    /// Gear ratios for the gearbox, shortest first.
    pub gear_ratios: Vec<f64>,
    /// RNG seed; `None` means the caller derives one.
    pub seed: Option<u64>,
    pub target_fps: u32,
    /// Explicit startup upgrades; `None` means the caller picks.
    pub initial_upgrades: Option<Vec<String>>,
}

impl Default for SimSetup {
    /// The reference engine in a stock five-speed car.
    fn default() -> Self {
        Self {
            spec: EngineSpec::default(),
            gear_ratios: Gearbox::default().ratios().to_vec(),
            seed: None,
            target_fps: DEFAULT_HZ,
            initial_upgrades: None,
        }
    }
}

/// Load a setup file and resolve it into a validated [`SimSetup`].
pub fn load_setup(path: &Path) -> Result<SimSetup, ConfigError> {
    let data: SetupData = deserialize_file(path)?;
    resolve_setup(&data)
}

/// Validate a deserialized [`SetupData`] and resolve it into core types.
///
/// Drivetrain geometry folds into the [`EngineSpec`]; the gear ratio list
/// stays separate so the caller builds the gearbox itself.
pub fn resolve_setup(data: &SetupData) -> Result<SimSetup, ConfigError> {
    let engine = &data.engine;
    require_positive("engine.bore", engine.bore)?;
    require_positive("engine.stroke", engine.stroke)?;
    require_positive("engine.rod_length", engine.rod_length)?;
    require_positive(
        "engine.mean_effective_pressure",
        engine.mean_effective_pressure,
    )?;
    require_positive("engine.idle_rpm", engine.idle_rpm)?;
    require_finite("engine.max_rpm", engine.max_rpm)?;
    require_finite("engine.optimal_temperature", engine.optimal_temperature)?;
    require_finite("engine.compression_ratio", engine.compression_ratio)?;
    if engine.compression_ratio <= 1.0 {
        return Err(ConfigError::Invalid {
            field: "engine.compression_ratio",
            detail: format!("must exceed 1, got {}", engine.compression_ratio),
        });
    }
    if engine.cylinders == 0 {
        return Err(ConfigError::Invalid {
            field: "engine.cylinders",
            detail: "engine needs at least one cylinder".to_string(),
        });
    }
    if engine.max_rpm < engine.idle_rpm {
        return Err(ConfigError::Invalid {
            field: "engine.max_rpm",
            detail: format!(
                "must be at least idle_rpm ({}), got {}",
                engine.idle_rpm, engine.max_rpm
            ),
        });
    }

    let drivetrain = &data.drivetrain;
    require_positive("drivetrain.final_drive_ratio", drivetrain.final_drive_ratio)?;
    require_positive("drivetrain.wheel_radius", drivetrain.wheel_radius)?;
    if drivetrain.gear_ratios.is_empty() {
        return Err(ConfigError::Invalid {
            field: "drivetrain.gear_ratios",
            detail: "at least one gear ratio is required".to_string(),
        });
    }
    for (i, &ratio) in drivetrain.gear_ratios.iter().enumerate() {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "drivetrain.gear_ratios",
                detail: format!("gear {} ratio must be positive, got {ratio}", i + 1),
            });
        }
    }

    let simulation = &data.simulation;
    if simulation.target_fps == 0 {
        return Err(ConfigError::Invalid {
            field: "simulation.target_fps",
            detail: "target frame rate must be nonzero".to_string(),
        });
    }

    Ok(SimSetup {
        spec: EngineSpec {
            bore: engine.bore,
            stroke: engine.stroke,
            compression_ratio: engine.compression_ratio,
            cylinders: engine.cylinders,
            rod_length: engine.rod_length,
            idle_rpm: engine.idle_rpm,
            max_rpm: engine.max_rpm,
            mean_effective_pressure: engine.mean_effective_pressure,
            optimal_temperature: engine.optimal_temperature,
            wheel_radius: drivetrain.wheel_radius,
            final_drive_ratio: drivetrain.final_drive_ratio,
        },
        gear_ratios: drivetrain.gear_ratios.clone(),
        seed: simulation.seed,
        target_fps: simulation.target_fps,
        initial_upgrades: simulation.initial_upgrades.clone(),
    })
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            detail: format!("must be positive, got {value}"),
        })
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            detail: format!("must be finite, got {value}"),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
