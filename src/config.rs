// PanView -- Pannable, zoomable image viewport with crop-before-resample rendering
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of PanView.
//
// PanView is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::{
    fs::{create_dir_all, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use serde::{Deserialize, Serialize};

use crate::error::{PanviewError, PanviewResult};

/// Tunables of the viewport. Every field has a default so partial files load.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Multiplier applied per zoom step (divisor when zooming out)
    pub scale_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Screen pixels retained beyond each viewport edge when cropping
    pub crop_padding: f64,
    /// Screen pixels of the image that must stay inside each viewport edge
    pub pan_boundary: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            scale_step: 15.0 / 8.0,
            min_scale: 1.0 / 8.0,
            max_scale: 20.0,
            crop_padding: 1.0,
            pan_boundary: 50.0,
        }
    }
}

impl ViewportConfig {
    fn config_dir() -> PathBuf {
        let mut dir = dirs::config_dir().unwrap_or_default();
        dir.push("panview");
        dir
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("panview.json")
    }

    /// Checks the values a viewport cannot work with.
    ///
    /// `min_scale >= max_scale` is accepted: equal bounds pin the scale to that
    /// value, inverted bounds freeze it.
    pub fn validate(&self) -> PanviewResult<()> {
        if !self.scale_step.is_finite() || self.scale_step <= 1.0 {
            return Err(PanviewError::Config(format!(
                "scale_step must be greater than 1, got {}",
                self.scale_step
            )));
        }
        for (name, value) in [("min_scale", self.min_scale), ("max_scale", self.max_scale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PanviewError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("crop_padding", self.crop_padding),
            ("pan_boundary", self.pan_boundary),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PanviewError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> PanviewResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> PanviewResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        log::debug!("loaded {config:?} from {path:?}");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> PanviewResult<()> {
        if let Some(dir) = path.parent() {
            create_dir_all(dir)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

fn read_config() -> ViewportConfig {
    let path = ViewportConfig::config_file();
    match ViewportConfig::load(&path) {
        Ok(config) => config,
        Err(PanviewError::Io(_)) => {
            let config = ViewportConfig::default();
            match config.save(&path) {
                Ok(_) => log::info!("Saved default configuration to {path:?}"),
                Err(e) => log::warn!("Failed to save default configuration to {path:?}: {e}"),
            }
            config
        }
        Err(e) => {
            log::warn!("Ignoring {path:?}: {e}");
            ViewportConfig::default()
        }
    }
}

/// User configuration, read once per process.
pub fn config<'a>() -> &'a ViewportConfig {
    static CONFIG: OnceLock<ViewportConfig> = OnceLock::new();
    CONFIG.get_or_init(read_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewportConfig::default();
        assert_eq!(config.scale_step, 1.875);
        assert_eq!(config.min_scale, 0.125);
        assert_eq!(config.max_scale, 20.0);
        assert_eq!(config.crop_padding, 1.0);
        assert_eq!(config.pan_boundary, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = ViewportConfig::from_json(r#"{ "max_scale": 8.0, "pan_boundary": 10 }"#)
            .expect("valid config");
        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.pan_boundary, 10.0);
        assert_eq!(config.scale_step, 1.875);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ViewportConfig {
            scale_step: 2.0,
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&config).expect("serialize");
        assert_eq!(ViewportConfig::from_json(&json).expect("parse"), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ViewportConfig::from_json(r#"{ "scale_step": 1.0 }"#),
            Err(PanviewError::Config(_))
        ));
        assert!(matches!(
            ViewportConfig::from_json(r#"{ "min_scale": 0.0 }"#),
            Err(PanviewError::Config(_))
        ));
        assert!(matches!(
            ViewportConfig::from_json(r#"{ "pan_boundary": -1.0 }"#),
            Err(PanviewError::Config(_))
        ));
        assert!(matches!(
            ViewportConfig::from_json("{ not json"),
            Err(PanviewError::Json(_))
        ));
    }

    #[test]
    fn test_degenerate_range_accepted() {
        let config = ViewportConfig {
            min_scale: 4.0,
            max_scale: 2.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("panview-test-{}", std::process::id()))
            .join("panview.json");
        let config = ViewportConfig {
            crop_padding: 2.0,
            ..Default::default()
        };
        config.save(&path).expect("save");
        assert_eq!(ViewportConfig::load(&path).expect("load"), config);
        let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
    }
}
