//! Flat-file persistence for the object list, the working set and selections.
//!
//! Every file holds one integer per line. Writes overwrite the target in
//! place; there is no locking and no temporary-file rename, so a process
//! killed mid-write can leave a truncated working set behind.

use std::fs;
use std::path::{Path, PathBuf};

use bisect_core::errors::{BisectError, ErrorInfo};
use bisect_core::HarnessConfig;
use tracing::debug;

use crate::selection::Selection;
use crate::session::Session;

/// Parses newline-delimited integers.
///
/// Only the final newline is optional; an empty line anywhere else is a
/// `store.parse` error like any other non-integer line.
pub fn parse_int_lines(contents: &str, path: &Path) -> Result<Vec<i64>, BisectError> {
    let mut values = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        let value = trimmed.parse::<i64>().map_err(|err| {
            BisectError::Store(
                ErrorInfo::new("store.parse", format!("line is not an integer: {err}"))
                    .with_path(path)
                    .with_context("line", (idx + 1).to_string())
                    .with_context("text", trimmed),
            )
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Renders integers one per line with a trailing newline.
pub fn render_int_lines<I: IntoIterator<Item = i64>>(values: I) -> String {
    let mut out = String::new();
    for value in values {
        out.push_str(&value.to_string());
        out.push('\n');
    }
    out
}

/// Reads a file of newline-delimited integers.
pub fn read_int_lines(path: &Path) -> Result<Vec<i64>, BisectError> {
    let contents =
        fs::read_to_string(path).map_err(|err| BisectError::io("store.read", path, err))?;
    let values = parse_int_lines(&contents, path)?;
    debug!(path = %path.display(), entries = values.len(), "read integer list");
    Ok(values)
}

/// Overwrites `path` with one integer per line.
pub fn write_int_lines(path: &Path, values: &[i64]) -> Result<(), BisectError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| BisectError::io("store.mkdir", parent, err))?;
        }
    }
    fs::write(path, render_int_lines(values.iter().copied()))
        .map_err(|err| BisectError::io("store.write", path, err))?;
    debug!(path = %path.display(), entries = values.len(), "wrote integer list");
    Ok(())
}

/// File-backed adapter around [`Session`] for cross-process drivers.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: HarnessConfig,
}

impl FileStore {
    /// Creates a store over the layout described by `config`.
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Layout in use.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Reads the working set.
    pub fn read_working_set(&self) -> Result<Vec<i64>, BisectError> {
        read_int_lines(&self.config.working_set_path())
    }

    /// Overwrites the working set.
    pub fn write_working_set(&self, values: &[i64]) -> Result<(), BisectError> {
        write_int_lines(&self.config.working_set_path(), values)
    }

    /// Reads the immutable object list.
    pub fn read_objects_file(&self) -> Result<Vec<i64>, BisectError> {
        read_int_lines(&self.config.objects_path())
    }

    /// Overwrites the object list; only used when creating a session.
    pub fn write_objects_file(&self, values: &[i64]) -> Result<(), BisectError> {
        write_int_lines(&self.config.objects_path(), values)
    }

    /// Reads a selection file. Relative paths are taken as given, not
    /// against the work directory, since the driver names them.
    pub fn read_object_index(&self, path: &Path) -> Result<Selection, BisectError> {
        read_int_lines(path).map(Selection::new)
    }

    /// Loads both lists and checks that they agree.
    pub fn load_session(&self) -> Result<Session, BisectError> {
        let objects = self.read_objects_file()?;
        let working = self.read_working_set()?;
        Session::new(objects, working).map_err(|err| match err {
            BisectError::Store(info) => BisectError::Store(
                info.with_path(&self.config.working_set_path())
                    .with_hint("regenerate the working set from the object list"),
            ),
            other => other,
        })
    }

    /// Persists the working set. The object list is never rewritten here.
    pub fn save_session(&self, session: &Session) -> Result<(), BisectError> {
        self.write_working_set(session.working_set())
    }

    /// Writes a brand new session: object list and working set.
    pub fn create_session(&self, session: &Session) -> Result<(), BisectError> {
        self.write_objects_file(session.objects())?;
        self.write_working_set(session.working_set())
    }

    /// Records the selection file applied by `switch-tmp`.
    ///
    /// The path is stored as its raw OS bytes followed by a newline, so
    /// [`FileStore::last_tmp`] returns exactly the path that was recorded.
    pub fn record_tmp(&self, selection_path: &Path) -> Result<PathBuf, BisectError> {
        let tmp = self.config.tmp_path();
        let mut contents = selection_path.as_os_str().as_encoded_bytes().to_vec();
        contents.push(b'\n');
        fs::write(&tmp, contents).map_err(|err| BisectError::io("store.write", &tmp, err))?;
        Ok(tmp)
    }

    /// Selection path last recorded by `switch-tmp`, if any.
    pub fn last_tmp(&self) -> Result<Option<PathBuf>, BisectError> {
        let tmp = self.config.tmp_path();
        if !tmp.exists() {
            return Ok(None);
        }
        let mut contents = fs::read(&tmp).map_err(|err| BisectError::io("store.read", &tmp, err))?;
        if contents.last() == Some(&b'\n') {
            contents.pop();
        }
        if contents.is_empty() {
            return Ok(None);
        }
        Ok(Some(path_from_bytes(contents)))
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    use std::os::unix::ffi::OsStringExt;
    PathBuf::from(std::ffi::OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}
