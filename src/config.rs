//! Configuration management for the emotion analyzer
//!
//! This module provides runtime configuration loading from JSON files, so
//! classifier thresholds, rendering size and server limits can be adjusted
//! without recompilation. Defaults reproduce the stock rule table.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable overriding the HTTP bind address
pub const HTTP_ADDR_ENV: &str = "EMOTION_HTTP_ADDR";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub classifier: ClassifierConfig,
    pub visualization: VisualizationConfig,
}

/// HTTP surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for `emotion_cli serve`
    pub addr: SocketAddr,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Bind address, honouring `EMOTION_HTTP_ADDR` when it parses
    pub fn resolved_addr(&self) -> SocketAddr {
        match std::env::var(HTTP_ADDR_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!(
                    "[Config] Ignoring {}={:?}: {}. Using {}.",
                    HTTP_ADDR_ENV,
                    raw,
                    err,
                    self.addr
                );
                self.addr
            }),
            Err(_) => self.addr,
        }
    }
}

/// Decision table thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Uploads strictly above this size (KB) use the variance rules
    pub large_upload_kb: f64,
    /// Uploads strictly below this size (KB) use the repetition rules
    pub small_upload_kb: f64,
    /// Large uploads with variance above this are Angry
    pub angry_variance: f64,
    /// Large uploads with variance above this (but not Angry) are Happy
    pub happy_variance: f64,
    /// Small uploads with repetition above this are Fearful
    pub fearful_repetition: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            large_upload_kb: 200.0,
            small_upload_kb: 50.0,
            angry_variance: 100.0,
            happy_variance: 50.0,
            fearful_repetition: 0.3,
        }
    }
}

/// Synthetic visualization parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels (both panels)
    pub height: u32,
    /// Synthetic waveform duration in seconds
    pub duration_secs: f64,
    /// Synthetic waveform sample rate in Hz
    pub sample_rate: u32,
    /// Heat-map frequency bins
    pub frequency_bins: usize,
    /// Heat-map time bins
    pub time_bins: usize,
    /// Top of the heat-map frequency axis in Hz
    pub max_frequency_hz: f64,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            duration_secs: 3.0,
            sample_rate: 22_050,
            frequency_bins: 100,
            time_bins: 100,
            max_frequency_hz: 5000.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration; defaults when the file is missing or invalid.
    /// Missing keys fall back to their defaults individually.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file("assets/emotion_config.json")
    }
}
