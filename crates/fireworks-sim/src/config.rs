//! Simulation configuration (parsed from TOML)

use fireworks_core::{FireworksError, Result};

/// Hard ceiling on pool capacity
pub const MAX_POOL_CAPACITY: usize = 100_000;

/// Configuration for one fireworks simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Pool capacity, fixed for the lifetime of the simulation
    pub max_particles: usize,
    /// Target number of rockets in flight
    pub max_rockets: usize,
    /// Random seed; `None` derives one from the wall clock
    pub seed: Option<u64>,
    /// Seconds between full counter rescans
    pub resync_interval: f32,
    /// Life span the renderer normalizes haze alpha against
    pub haze_fade_life: f32,
    /// Rockets launch at least this far from the left and right edges
    pub launch_margin: f32,
    /// Particles beyond the viewport by more than this are culled
    pub cull_margin: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_particles: 250,
            max_rockets: 1,
            seed: None,
            resync_interval: 5.0,
            haze_fade_life: 3.0,
            launch_margin: 200.0,
            cull_margin: 50.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a SimulationConfig from a TOML table. Missing or mistyped keys
    /// keep their defaults.
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("max_particles") {
            let n = v.as_integer().unwrap_or(250).max(0) as usize;
            config.max_particles = n.min(MAX_POOL_CAPACITY);
        }
        if let Some(v) = table.get("max_rockets") {
            config.max_rockets = v.as_integer().unwrap_or(1).max(0) as usize;
        }
        if let Some(v) = table.get("seed") {
            config.seed = v.as_integer().map(|s| s as u64);
        }
        if let Some(v) = table.get("resync_interval") {
            config.resync_interval = toml_f32(v, config.resync_interval);
        }
        if let Some(v) = table.get("haze_fade_life") {
            config.haze_fade_life = toml_f32(v, config.haze_fade_life);
        }
        if let Some(v) = table.get("launch_margin") {
            config.launch_margin = toml_f32(v, config.launch_margin);
        }
        if let Some(v) = table.get("cull_margin") {
            config.cull_margin = toml_f32(v, config.cull_margin);
        }

        config
    }

    /// Parse from a TOML document. Settings are read from a `[simulation]`
    /// table when present, otherwise from the top level.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let root: toml::value::Table = toml::from_str(source)?;
        let config = match root.get("simulation") {
            Some(toml::Value::Table(table)) => Self::from_toml(table),
            Some(other) => {
                return Err(FireworksError::InvalidFieldType {
                    expected: "table".to_string(),
                    got: other.type_str().to_string(),
                })
            }
            None => Self::from_toml(&root),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_particles == 0 {
            return Err(FireworksError::ValueOutOfRange {
                field: "max_particles".to_string(),
                min: 1.0,
                max: MAX_POOL_CAPACITY as f64,
                value: 0.0,
            });
        }
        if self.max_rockets > self.max_particles {
            return Err(FireworksError::ValueOutOfRange {
                field: "max_rockets".to_string(),
                min: 0.0,
                max: self.max_particles as f64,
                value: self.max_rockets as f64,
            });
        }
        if self.resync_interval <= 0.0 {
            return Err(FireworksError::ConfigError(format!(
                "resync_interval must be positive, got {}",
                self.resync_interval
            )));
        }
        if self.haze_fade_life <= 0.0 {
            return Err(FireworksError::ConfigError(format!(
                "haze_fade_life must be positive, got {}",
                self.haze_fade_life
            )));
        }
        Ok(())
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}
