//! Engine loading configuration.

use std::path::PathBuf;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`EngineConfig::library_path`].
pub const ENV_LIBRARY_PATH: &str = "FASTNOISE_LIB";
/// Environment variable overriding [`EngineConfig::simd_level`].
pub const ENV_SIMD_LEVEL: &str = "FASTNOISE_SIMD_LEVEL";
/// Environment variable overriding [`EngineConfig::grid_convention`].
pub const ENV_GRID_CONVENTION: &str = "FASTNOISE_GRID_CONVENTION";

/// Base name of the engine library; the platform prefix/suffix is added on load.
pub const LIBRARY_NAME: &str = "FastNoise";

/// Which grid-generation ABI the loaded library exposes.
///
/// `Stepped` takes a float offset and a per-axis step size; `Frequency` is the older
/// integer-start plus single-frequency form. The two are not assumed to be equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridConvention {
    #[default]
    Stepped,
    Frequency,
}

impl GridConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridConvention::Stepped => "stepped",
            GridConvention::Frequency => "frequency",
        }
    }
}

impl std::fmt::Display for GridConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stepped" | "step" => Ok(GridConvention::Stepped),
            "frequency" | "legacy" => Ok(GridConvention::Frequency),
            other => Err(format!("unknown grid convention '{other}'")),
        }
    }
}

/// Where to find the engine and how to allocate nodes from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Explicit library path. `None` lets the OS loader find the platform library name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,
    /// Highest SIMD feature level nodes may use. 0 lets the engine pick.
    #[serde(default)]
    pub simd_level: u32,
    #[serde(default)]
    pub grid_convention: GridConvention,
}

impl EngineConfig {
    /// Defaults overlaid with `FASTNOISE_LIB`, `FASTNOISE_SIMD_LEVEL` and
    /// `FASTNOISE_GRID_CONVENTION`. Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = EngineConfig::default();

        if let Some(path) = lookup(ENV_LIBRARY_PATH).filter(|p| !p.trim().is_empty()) {
            config.library_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(ENV_SIMD_LEVEL) {
            match raw.trim().parse::<u32>() {
                Ok(level) => config.simd_level = level,
                Err(err) => warn!("ignoring {ENV_SIMD_LEVEL}='{raw}': {err}"),
            }
        }

        if let Some(raw) = lookup(ENV_GRID_CONVENTION) {
            match raw.parse::<GridConvention>() {
                Ok(convention) => config.grid_convention = convention,
                Err(err) => warn!("ignoring {ENV_GRID_CONVENTION}: {err}"),
            }
        }

        config
    }

    /// Path handed to the dynamic loader.
    pub fn resolved_library_path(&self) -> PathBuf {
        self.library_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(libloading::library_filename(LIBRARY_NAME)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_use_platform_library_name() {
        let config = EngineConfig::default();
        let path = config.resolved_library_path();
        let file = path.to_string_lossy();
        assert!(file.contains(LIBRARY_NAME), "unexpected library file {file}");
        assert_eq!(config.simd_level, 0);
        assert_eq!(config.grid_convention, GridConvention::Stepped);
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ENV_LIBRARY_PATH, "/opt/noise/libFastNoise.so"),
            (ENV_SIMD_LEVEL, "4"),
            (ENV_GRID_CONVENTION, "Frequency"),
        ]));
        assert_eq!(
            config.library_path,
            Some(PathBuf::from("/opt/noise/libFastNoise.so"))
        );
        assert_eq!(config.simd_level, 4);
        assert_eq!(config.grid_convention, GridConvention::Frequency);
    }

    #[test]
    fn bad_env_values_fall_back_to_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ENV_LIBRARY_PATH, "  "),
            (ENV_SIMD_LEVEL, "fast"),
            (ENV_GRID_CONVENTION, "diagonal"),
        ]));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "simd_level": 2, "grid_convention": "frequency" }"#)
                .expect("config should parse");
        assert_eq!(config.simd_level, 2);
        assert_eq!(config.grid_convention, GridConvention::Frequency);
        assert!(config.library_path.is_none());
    }
}
