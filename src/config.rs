use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Batch configuration
// ---------------------------------------------------------------------------

/// Everything the batch driver needs to find and render a run of examples.
///
/// Read from an optional JSON file, then overridden from the command line:
///
/// ```json
/// { "base_dir": "plotting/data/Test5", "first_example": 0, "last_example": 6 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Directory holding `coords<N>.csv`, `soln<N>.csv`, `group<N>.csv`;
    /// figures are written here too.
    pub base_dir: PathBuf,
    pub first_example: u32,
    /// Inclusive.
    pub last_example: u32,
    /// Fixed grid side. `None` infers it from the coordinate ordering.
    pub grid_side: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::new(),
            first_example: 0,
            last_example: 0,
            grid_side: None,
        }
    }
}

impl BatchConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reject configurations the batch driver cannot act on.
    pub fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            bail!("no base directory given (pass it on the command line or set `base_dir`)");
        }
        if self.first_example > self.last_example {
            bail!(
                "first example {} is after last example {}",
                self.first_example,
                self.last_example
            );
        }
        if self.grid_side == Some(0) {
            bail!("grid side must be positive");
        }
        Ok(())
    }

    pub fn examples(&self) -> RangeInclusive<u32> {
        self.first_example..=self.last_example
    }

    pub fn paths(&self, example: u32) -> ExamplePaths {
        ExamplePaths::new(&self.base_dir, example)
    }

    /// `<base>/ExampleNum<N>.eps`
    pub fn figure_path(&self, example: u32) -> PathBuf {
        self.base_dir.join(format!("ExampleNum{example}.eps"))
    }
}

// ---------------------------------------------------------------------------
// Per-example input paths
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplePaths {
    pub example: u32,
    pub coords: PathBuf,
    pub solution: PathBuf,
    pub group: PathBuf,
}

impl ExamplePaths {
    pub fn new(base_dir: &Path, example: u32) -> Self {
        ExamplePaths {
            example,
            coords: base_dir.join(format!("coords{example}.csv")),
            solution: base_dir.join(format!("soln{example}.csv")),
            group: base_dir.join(format!("group{example}.csv")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_example_paths() {
        let paths = ExamplePaths::new(Path::new("/data/Test5"), 3);
        assert_eq!(paths.coords, Path::new("/data/Test5/coords3.csv"));
        assert_eq!(paths.solution, Path::new("/data/Test5/soln3.csv"));
        assert_eq!(paths.group, Path::new("/data/Test5/group3.csv"));
    }

    #[test]
    fn figure_path_is_eps_in_base_dir() {
        let config = BatchConfig {
            base_dir: PathBuf::from("out"),
            ..BatchConfig::default()
        };
        assert_eq!(config.figure_path(4), Path::new("out/ExampleNum4.eps"));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config =
            BatchConfig::from_json_str(r#"{ "base_dir": "data", "last_example": 6 }"#).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("data"));
        assert_eq!(config.examples(), 0..=6);
        assert_eq!(config.grid_side, None);
        config.validate().unwrap();
    }

    #[test]
    fn json_accepts_grid_side() {
        let config =
            BatchConfig::from_json_str(r#"{ "base_dir": "d", "grid_side": 101 }"#).unwrap();
        assert_eq!(config.grid_side, Some(101));
    }

    #[test]
    fn json_rejects_unknown_keys() {
        assert!(BatchConfig::from_json_str(r#"{ "base": "d" }"#).is_err());
        // Figures are always EPS; there is no format switch.
        assert!(BatchConfig::from_json_str(r#"{ "base_dir": "d", "format": "png" }"#).is_err());
    }

    #[test]
    fn validation_catches_bad_settings() {
        assert!(BatchConfig::default().validate().is_err());

        let reversed = BatchConfig {
            base_dir: PathBuf::from("d"),
            first_example: 3,
            last_example: 1,
            ..BatchConfig::default()
        };
        assert!(reversed.validate().is_err());

        let zero_side = BatchConfig {
            base_dir: PathBuf::from("d"),
            grid_side: Some(0),
            ..BatchConfig::default()
        };
        assert!(zero_side.validate().is_err());
    }
}
