//! Layer stack configuration.
//!
//! Stacks come either from a YAML file:
//!
//! ```yaml
//! policy: gamma
//! gamma: 2.2
//! layers:
//!   - lut: looks/warm.cube
//!     opacity: 0.26
//!     name: warm
//!   - lut: /abs/path/teal.cube
//!     enabled: false
//! ```
//!
//! or from repeated `--lut PATH[@OPACITY]` arguments. Relative LUT paths in a
//! config file resolve against the file's directory.

use anyhow::{Context, Result};
use lutstack_color::{BlendPolicy, Layer, LayerStack};
use lutstack_lut::{Interpolation, LutCache};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Blend policy names accepted on the command line and in YAML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyName {
    /// Straight mix of encoded values
    #[default]
    Linear,
    /// Mix in a power-law space (see `gamma`, `opacity_scale`)
    Gamma,
    /// Mix in linear light via the sRGB curve
    LinearLight,
    /// Gamma 1.8 with 0.7 opacity scale
    EditorCompat,
}

impl PolicyName {
    /// Resolves to a [`BlendPolicy`], using `gamma`/`opacity_scale` for `Gamma`.
    pub fn resolve(self, gamma: Option<f32>, opacity_scale: Option<f32>) -> BlendPolicy {
        match self {
            Self::Linear => BlendPolicy::Linear,
            Self::LinearLight => BlendPolicy::LinearLight,
            Self::EditorCompat => BlendPolicy::EDITOR_COMPAT,
            Self::Gamma => BlendPolicy::Gamma {
                gamma: gamma.unwrap_or(lutstack_transfer::gamma::EDITOR_GAMMA),
                opacity_scale: opacity_scale.unwrap_or(1.0),
            },
        }
    }
}

/// Interpolation names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InterpName {
    /// Nearest grid node
    Nearest,
    /// Trilinear, red then green then blue
    #[value(alias = "linear")]
    Trilinear,
    /// Tetrahedral over the same cell
    #[value(alias = "tetra")]
    Tetrahedral,
}

impl From<InterpName> for Interpolation {
    fn from(name: InterpName) -> Self {
        match name {
            InterpName::Nearest => Self::Nearest,
            InterpName::Trilinear => Self::Trilinear,
            InterpName::Tetrahedral => Self::Tetrahedral,
        }
    }
}

/// One layer entry of a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    pub lut: PathBuf,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub name: Option<String>,
}

fn default_opacity() -> f32 {
    1.0
}

fn default_enabled() -> bool {
    true
}

/// A whole stack description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackConfig {
    #[serde(default)]
    pub policy: PolicyName,
    #[serde(default)]
    pub gamma: Option<f32>,
    #[serde(default)]
    pub opacity_scale: Option<f32>,
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

impl StackConfig {
    /// Parses YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Invalid stack config")
    }

    /// Reads a config file and resolves relative LUT paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config = Self::from_yaml(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        debug!(path = %path.display(), layers = config.layers.len(), "loaded stack config");
        Ok(config)
    }

    /// Makes relative LUT paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for layer in &mut self.layers {
            if layer.lut.is_relative() {
                layer.lut = base.join(&layer.lut);
            }
        }
    }

    /// Builds a config from `--lut` arguments.
    pub fn from_specs(specs: &[LutSpec]) -> Self {
        Self {
            layers: specs
                .iter()
                .map(|s| LayerConfig {
                    lut: s.path.clone(),
                    opacity: s.opacity,
                    enabled: true,
                    name: None,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Blend policy, with `over` taking precedence over the file's setting.
    pub fn blend_policy(&self, over: Option<PolicyName>) -> BlendPolicy {
        over.unwrap_or(self.policy).resolve(self.gamma, self.opacity_scale)
    }

    /// Loads every table through `cache` and assembles the stack.
    ///
    /// Tables that fail to load become pass-through layers; only exceeding
    /// the layer limit is an error.
    pub fn build_stack(&self, cache: &mut LutCache, policy: BlendPolicy) -> Result<LayerStack> {
        let mut stack = LayerStack::new().with_policy(policy);
        for entry in &self.layers {
            let name = entry.name.clone().unwrap_or_else(|| {
                entry
                    .lut
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            let layer = Layer::from_load_result(cache.load_cube(&entry.lut), entry.opacity)
                .with_enabled(entry.enabled)
                .with_name(name);
            stack.push(layer).context("Too many layers")?;
        }
        Ok(stack)
    }
}

/// `PATH[@OPACITY]` layer argument.
#[derive(Debug, Clone, PartialEq)]
pub struct LutSpec {
    pub path: PathBuf,
    pub opacity: f32,
}

impl FromStr for LutSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty LUT path".into());
        }
        // A trailing `@x` that is not a number stays part of the path.
        if let Some((path, opacity)) = s.rsplit_once('@') {
            if let Ok(opacity) = opacity.parse::<f32>() {
                if path.is_empty() {
                    return Err(format!("missing LUT path in '{}'", s));
                }
                if !(0.0..=1.0).contains(&opacity) {
                    return Err(format!("opacity {} out of range [0, 1]", opacity));
                }
                return Ok(Self {
                    path: PathBuf::from(path),
                    opacity,
                });
            }
        }
        Ok(Self {
            path: PathBuf::from(s),
            opacity: 1.0,
        })
    }
}
