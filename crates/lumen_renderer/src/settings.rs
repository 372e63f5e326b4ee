//! Render configuration.
//!
//! Every section deserializes with defaults for missing fields, so a
//! settings file only needs to mention what it changes.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{RenderError, RenderResult};

/// Sub-samples per pixel, `columns` across by `rows` down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: u32,
    pub rows: u32,
}

impl Grid {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Total sub-samples, `None` if the count does not fit in a `u32`.
    pub fn sample_count(&self) -> Option<u32> {
        self.columns.checked_mul(self.rows)
    }
}

/// Jittered grid supersampling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AntiAliasing {
    pub enabled: bool,
    pub samples: Option<Grid>,
}

/// Corner-based adaptive supersampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveSampling {
    pub enabled: bool,
    /// Maximum number of quadrant subdivision levels
    pub max_depth: u32,
    /// Largest per-channel difference (0-255 scale) between corner samples
    /// that still counts as agreement
    pub tolerance: f64,
}

impl Default for AdaptiveSampling {
    fn default() -> Self {
        Self {
            enabled: false,
            max_depth: 3,
            tolerance: 1.0,
        }
    }
}

/// Recursion limits of the shader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recursion {
    /// Recursion level of primary rays; level 1 computes local effects only
    pub max_depth: u32,
    /// Paths whose accumulated coefficients all fall below this are dropped
    pub min_attenuation: f64,
}

impl Default for Recursion {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_attenuation: 0.001,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threads {
    pub worker_count: usize,
}

impl Default for Threads {
    fn default() -> Self {
        Self {
            worker_count: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub anti_aliasing: AntiAliasing,
    pub adaptive: AdaptiveSampling,
    pub recursion: Recursion,
    pub threads: Threads,
    /// Seed for sub-sample jitter; random when unset
    pub seed: Option<u64>,
}

impl RenderSettings {
    /// Enable grid supersampling with `columns` by `rows` sub-samples.
    pub fn with_anti_aliasing(mut self, columns: u32, rows: u32) -> Self {
        self.anti_aliasing = AntiAliasing {
            enabled: true,
            samples: Some(Grid::new(columns, rows)),
        };
        self
    }

    /// Enable adaptive supersampling.
    pub fn with_adaptive(mut self, max_depth: u32, tolerance: f64) -> Self {
        self.adaptive = AdaptiveSampling {
            enabled: true,
            max_depth,
            tolerance,
        };
        self
    }

    pub fn with_recursion(mut self, max_depth: u32, min_attenuation: f64) -> Self {
        self.recursion = Recursion {
            max_depth,
            min_attenuation,
        };
        self
    }

    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.threads.worker_count = worker_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the settings before a render starts.
    pub fn validate(&self) -> RenderResult<()> {
        if self.recursion.max_depth < 1 {
            return Err(invalid("recursion depth must be at least 1"));
        }
        let min_k = self.recursion.min_attenuation;
        if !min_k.is_finite() || min_k < 0.0 {
            return Err(invalid(format!(
                "minimum attenuation must be a non-negative number, got {min_k}"
            )));
        }
        if self.threads.worker_count < 1 {
            return Err(invalid("worker count must be at least 1"));
        }
        if self.anti_aliasing.enabled {
            match self.anti_aliasing.samples {
                None => return Err(invalid("anti-aliasing enabled without a sample grid")),
                Some(grid) if matches!(grid.sample_count(), None | Some(0)) => {
                    return Err(invalid(format!(
                        "sample grid must be non-empty and not too large, got {}x{}",
                        grid.columns, grid.rows
                    )))
                }
                Some(_) => {}
            }
        }
        if self.adaptive.enabled {
            if self.adaptive.max_depth < 1 {
                return Err(invalid("adaptive subdivision depth must be at least 1"));
            }
            let tolerance = self.adaptive.tolerance;
            if tolerance.is_nan() || tolerance < 0.0 {
                return Err(invalid("adaptive tolerance must be non-negative"));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> RenderError {
    RenderError::InvalidSettings(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::default();
        assert!(!settings.anti_aliasing.enabled);
        assert!(!settings.adaptive.enabled);
        assert_eq!(settings.adaptive.max_depth, 3);
        assert_eq!(settings.recursion.max_depth, 10);
        assert_eq!(settings.recursion.min_attenuation, 0.001);
        assert!(settings.threads.worker_count >= 1);
        assert_eq!(settings.seed, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_deserialize_empty() {
        let settings: RenderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{
            "anti_aliasing": { "enabled": true, "samples": { "columns": 4, "rows": 2 } },
            "recursion": { "max_depth": 3 },
            "threads": { "worker_count": 2 },
            "seed": 7
        }"#;
        let settings: RenderSettings = serde_json::from_str(json).unwrap();

        assert!(settings.anti_aliasing.enabled);
        assert_eq!(settings.anti_aliasing.samples, Some(Grid::new(4, 2)));
        assert_eq!(settings.recursion.max_depth, 3);
        assert_eq!(settings.recursion.min_attenuation, 0.001);
        assert_eq!(settings.threads.worker_count, 2);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let settings = RenderSettings::default()
            .with_anti_aliasing(3, 3)
            .with_adaptive(2, 0.5)
            .with_workers(4)
            .with_seed(42);
        let json = serde_json::to_string(&settings).unwrap();
        let back: RenderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            RenderSettings::default().with_recursion(0, 0.001),
            RenderSettings::default().with_recursion(10, -1.0),
            RenderSettings::default().with_workers(0),
            RenderSettings::default().with_anti_aliasing(0, 4),
            RenderSettings {
                anti_aliasing: AntiAliasing {
                    enabled: true,
                    samples: None,
                },
                ..Default::default()
            },
            RenderSettings::default().with_adaptive(0, 1.0),
            RenderSettings::default().with_anti_aliasing(70_000, 70_000),
        ];
        for settings in bad {
            assert!(
                matches!(settings.validate(), Err(RenderError::InvalidSettings(_))),
                "{settings:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_sample_count_overflow() {
        assert_eq!(Grid::new(4, 3).sample_count(), Some(12));
        assert_eq!(Grid::new(70_000, 70_000).sample_count(), None);

        let json = r#"{ "anti_aliasing": { "enabled": true, "samples": { "columns": 70000, "rows": 70000 } } }"#;
        let settings: RenderSettings = serde_json::from_str(json).unwrap();
        assert!(matches!(
            settings.validate(),
            Err(RenderError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_disabled_sections_are_not_checked() {
        let settings = RenderSettings {
            anti_aliasing: AntiAliasing {
                enabled: false,
                samples: None,
            },
            adaptive: AdaptiveSampling {
                enabled: false,
                max_depth: 0,
                tolerance: 1.0,
            },
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }
}
