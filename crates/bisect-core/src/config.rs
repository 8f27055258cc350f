//! Harness file layout and synthetic-session parameters.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{BisectError, ErrorInfo};
use crate::KNOWN_BAD_MARKER;

/// File layout and marker values shared by every harness step.
///
/// Every file name is resolved against `work_dir` (absolute names are kept
/// as-is), so the defaults reproduce the historical layout: all files live in
/// the current directory under their well-known names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Directory holding the session files.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    /// Immutable object list.
    #[serde(default = "default_objects_file")]
    pub objects_file: PathBuf,
    /// Mutable working set, index-aligned with the object list.
    #[serde(default = "default_working_set_file")]
    pub working_set_file: PathBuf,
    /// Zero-byte file whose presence means setup has completed.
    #[serde(default = "default_setup_sentinel")]
    pub setup_sentinel: PathBuf,
    /// Marker recording the selection last applied by `switch-tmp`.
    #[serde(default = "default_tmp_file")]
    pub tmp_file: PathBuf,
    /// Working-set value that the oracle always judges bad.
    #[serde(default = "default_bad_marker")]
    pub bad_marker: i64,
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_objects_file() -> PathBuf {
    PathBuf::from("objects.txt")
}

fn default_working_set_file() -> PathBuf {
    PathBuf::from("working_set.txt")
}

fn default_setup_sentinel() -> PathBuf {
    PathBuf::from("is_setup")
}

fn default_tmp_file() -> PathBuf {
    PathBuf::from("tmp_file")
}

fn default_bad_marker() -> i64 {
    KNOWN_BAD_MARKER
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            objects_file: default_objects_file(),
            working_set_file: default_working_set_file(),
            setup_sentinel: default_setup_sentinel(),
            tmp_file: default_tmp_file(),
            bad_marker: default_bad_marker(),
        }
    }
}

impl HarnessConfig {
    /// Default layout rooted at `work_dir`.
    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::default()
        }
    }

    /// Loads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, BisectError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            BisectError::Config(ErrorInfo::new("config.read", err.to_string()).with_path(path))
        })?;
        let config: HarnessConfig = serde_yaml::from_str(&contents).map_err(|err| {
            BisectError::Config(ErrorInfo::new("config.parse", err.to_string()).with_path(path))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects layouts that would make the session files ambiguous.
    pub fn validate(&self) -> Result<(), BisectError> {
        let names = [
            ("objects_file", &self.objects_file),
            ("working_set_file", &self.working_set_file),
            ("setup_sentinel", &self.setup_sentinel),
            ("tmp_file", &self.tmp_file),
        ];
        for (field, name) in names {
            if name.as_os_str().is_empty() {
                return Err(BisectError::Config(
                    ErrorInfo::new("config.invalid", "file name must not be empty")
                        .with_context("field", field),
                ));
            }
        }
        if self.objects_file == self.working_set_file {
            return Err(BisectError::Config(
                ErrorInfo::new(
                    "config.invalid",
                    "objects and working set must be distinct files",
                )
                .with_context("objects_file", self.objects_file.display().to_string()),
            ));
        }
        if self.bad_marker == crate::GOOD_MARKER {
            return Err(BisectError::Config(
                ErrorInfo::new("config.invalid", "bad marker collides with the good marker")
                    .with_context("bad_marker", self.bad_marker.to_string())
                    .with_hint("pick any non-zero value"),
            ));
        }
        Ok(())
    }

    /// Resolved path of the object list.
    pub fn objects_path(&self) -> PathBuf {
        self.work_dir.join(&self.objects_file)
    }

    /// Resolved path of the working set.
    pub fn working_set_path(&self) -> PathBuf {
        self.work_dir.join(&self.working_set_file)
    }

    /// Resolved path of the setup sentinel.
    pub fn sentinel_path(&self) -> PathBuf {
        self.work_dir.join(&self.setup_sentinel)
    }

    /// Resolved path of the `switch-tmp` marker.
    pub fn tmp_path(&self) -> PathBuf {
        self.work_dir.join(&self.tmp_file)
    }
}

/// Parameters for generating a synthetic session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Number of objects in the generated list.
    #[serde(default = "default_num_objects")]
    pub num_objects: usize,
    /// How many of them carry the bad marker.
    #[serde(default = "default_num_bad")]
    pub num_bad: usize,
    /// Master seed for placing the bad objects.
    #[serde(default)]
    pub seed: u64,
}

fn default_num_objects() -> usize {
    1238
}

fn default_num_bad() -> usize {
    23
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            num_objects: default_num_objects(),
            num_bad: default_num_bad(),
            seed: 0,
        }
    }
}

impl GenConfig {
    /// Checks that the requested bad count fits in the object list.
    pub fn validate(&self) -> Result<(), BisectError> {
        if self.num_bad > self.num_objects {
            return Err(BisectError::Config(
                ErrorInfo::new("config.invalid", "more bad objects than objects")
                    .with_context("num_objects", self.num_objects.to_string())
                    .with_context("num_bad", self.num_bad.to_string()),
            ));
        }
        Ok(())
    }
}
