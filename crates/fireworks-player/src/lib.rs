//! Fireworks Player - headless show host
//!
//! Reads the `[player]` settings, wires a `FireworksSystem` into a
//! `HostLoop` and plays the show in real time.

use anyhow::{Context, Result};
use fireworks_core::{FireworksError, Viewport};
use fireworks_runtime::{FrameClock, FrameStats, HostLoop};
use fireworks_sim::{FireworksSystem, SimulationConfig};
use std::path::Path;
use std::time::Duration;

/// Settings read from the `[player]` table
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Seconds of show time before the player exits
    pub duration: f64,
    /// Seconds between stat log lines
    pub report_interval: f64,
    /// Frame rate the loop sleeps towards
    pub target_fps: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: Viewport::PREVIEW.width,
            height: Viewport::PREVIEW.height,
            duration: 10.0,
            report_interval: 1.0,
            target_fps: 60.0,
        }
    }
}

impl PlayerConfig {
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("width") {
            config.width = toml_f64(v, config.width as f64) as f32;
        }
        if let Some(v) = table.get("height") {
            config.height = toml_f64(v, config.height as f64) as f32;
        }
        if let Some(v) = table.get("duration") {
            config.duration = toml_f64(v, config.duration);
        }
        if let Some(v) = table.get("report_interval") {
            config.report_interval = toml_f64(v, config.report_interval);
        }
        if let Some(v) = table.get("target_fps") {
            config.target_fps = toml_f64(v, config.target_fps);
        }

        config
    }

    /// Read the `[player]` table of a TOML document; defaults when absent
    pub fn from_toml_str(source: &str) -> fireworks_core::Result<Self> {
        let root: toml::value::Table = toml::from_str(source)?;
        let config = match root.get("player") {
            Some(toml::Value::Table(table)) => Self::from_toml(table),
            Some(other) => {
                return Err(FireworksError::InvalidFieldType {
                    expected: "table".to_string(),
                    got: other.type_str().to_string(),
                })
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> fireworks_core::Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FireworksError::ConfigError(format!(
                "viewport must have positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if self.report_interval <= 0.0 {
            return Err(FireworksError::ConfigError(format!(
                "report_interval must be positive, got {}",
                self.report_interval
            )));
        }
        if self.target_fps <= 0.0 {
            return Err(FireworksError::ConfigError(format!(
                "target_fps must be positive, got {}",
                self.target_fps
            )));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps)
    }
}

fn toml_f64(v: &toml::Value, default: f64) -> f64 {
    v.as_float()
        .or_else(|| v.as_integer().map(|i| i as f64))
        .unwrap_or(default)
}

/// Everything the player needs, parsed from one `fireworks.toml`
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    pub simulation: SimulationConfig,
    pub player: PlayerConfig,
}

impl ShowConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(Self {
            simulation: SimulationConfig::from_toml_str(source)
                .context("Invalid [simulation] settings")?,
            player: PlayerConfig::from_toml_str(source).context("Invalid [player] settings")?,
        })
    }

    /// Load from `path`, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("Failed to load {}", path.display()))
    }
}

/// Build a host loop with the fireworks system registered
pub fn build_host(config: &ShowConfig) -> HostLoop {
    let mut host = HostLoop::new(config.player.viewport());
    host.add_system(Box::new(
        FireworksSystem::new(config.simulation.clone())
            .with_report_interval(config.player.report_interval),
    ));
    host
}

/// Logs frame statistics on a fixed show-time cadence
pub struct StatsReporter {
    interval: f64,
    next_report: f64,
}

impl StatsReporter {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            next_report: interval,
        }
    }

    /// Returns true when a line was logged for this frame
    pub fn observe(&mut self, clock: &FrameClock, stats: &FrameStats) -> bool {
        if clock.total_time < self.next_report {
            return false;
        }
        log::info!(
            "[player] t={:.1}s frame {} fps {:.1}",
            clock.total_time,
            clock.frame_count,
            stats.fps().unwrap_or(0.0)
        );
        while self.next_report <= clock.total_time {
            self.next_report += self.interval;
        }
        true
    }
}

/// Play the show for the configured duration, sleeping towards the target
/// frame rate between frames
pub fn play(config: &ShowConfig) -> Result<()> {
    let mut host = build_host(config);
    let mut reporter = StatsReporter::new(config.player.report_interval);
    let budget = config.player.frame_budget();
    let duration = config.player.duration;
    let mut last_frame = std::time::Instant::now();

    log::info!(
        "[player] Playing {:.1}s at {}x{}",
        duration,
        config.player.width,
        config.player.height
    );

    host.run(|clock, stats| {
        if clock.total_time >= duration {
            return true;
        }
        reporter.observe(clock, stats);
        let spent = last_frame.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        last_frame = std::time::Instant::now();
        false
    })?;

    log::info!("[player] Show finished after {} frames", host.clock.frame_count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.viewport(), Viewport::PREVIEW);
        assert_eq!(config.duration, 10.0);
        assert_eq!(config.report_interval, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_player_section() {
        let config = PlayerConfig::from_toml_str(
            r#"
[simulation]
max_particles = 400

[player]
width = 1280
height = 720.0
duration = 2.5
"#,
        )
        .unwrap();
        assert_eq!(config.viewport(), Viewport::new(1280.0, 720.0));
        assert_eq!(config.duration, 2.5);
        assert_eq!(config.report_interval, 1.0);
    }

    #[test]
    fn missing_player_section_uses_defaults() {
        let config = PlayerConfig::from_toml_str("max_particles = 10").unwrap();
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn rejects_degenerate_viewport() {
        let err = PlayerConfig::from_toml_str("[player]\nwidth = 0").unwrap_err();
        assert!(matches!(err, FireworksError::ConfigError(_)));
    }

    #[test]
    fn show_config_reads_both_sections() {
        let show = ShowConfig::from_toml_str(
            r#"
[simulation]
max_rockets = 4
seed = 9

[player]
report_interval = 0.5
"#,
        )
        .unwrap();
        assert_eq!(show.simulation.max_rockets, 4);
        assert_eq!(show.simulation.seed, Some(9));
        assert_eq!(show.player.report_interval, 0.5);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let show =
            ShowConfig::load_or_default(Path::new("definitely/not/here/fireworks.toml")).unwrap();
        assert_eq!(show.player, PlayerConfig::default());
        assert_eq!(show.simulation, SimulationConfig::default());
    }

    #[test]
    fn host_steps_the_show() {
        let mut show = ShowConfig::default();
        show.simulation.seed = Some(5);
        let mut host = build_host(&show);
        assert_eq!(host.system_names(), vec!["particles"]);
        for _ in 0..30 {
            host.step(1.0 / 30.0).unwrap();
        }
        assert_eq!(host.clock.frame_count, 30);
        host.shutdown().unwrap();
    }

    #[test]
    fn reporter_fires_once_per_interval() {
        let mut clock = FrameClock::new();
        let mut stats = FrameStats::default();
        let mut reporter = StatsReporter::new(1.0);
        let mut reports = 0;
        for _ in 0..100 {
            let dt = clock.advance(0.05);
            stats.record(dt);
            if reporter.observe(&clock, &stats) {
                reports += 1;
            }
        }
        // 5 seconds of show time
        assert!((4..=5).contains(&reports));
    }
}
