use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::foundation::error::{PublishError, PublishResult};

/// Sink contract for the files a publish emits.
///
/// Every failure is an [`PublishError::Io`]-class error and aborts the publish.
pub trait OutputSink {
    /// Create `path` and any missing parents.
    fn create_dir(&mut self, path: &Path) -> PublishResult<()>;
    /// Write `contents` to `path`, replacing any existing file.
    fn write_text(&mut self, path: &Path, contents: &str) -> PublishResult<()>;
    /// Remove the directory tree at `path` if it exists.
    fn remove_dir(&mut self, path: &Path) -> PublishResult<()>;
    /// Recursively copy the directory `from` into `to`.
    fn copy_dir(&mut self, from: &Path, to: &Path) -> PublishResult<()>;
}

/// [`OutputSink`] writing to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn create_dir(&mut self, path: &Path) -> PublishResult<()> {
        std::fs::create_dir_all(path).map_err(|e| PublishError::io(path, e))
    }

    fn write_text(&mut self, path: &Path, contents: &str) -> PublishResult<()> {
        std::fs::write(path, contents).map_err(|e| PublishError::io(path, e))
    }

    fn remove_dir(&mut self, path: &Path) -> PublishResult<()> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PublishError::io(path, e)),
        }
    }

    fn copy_dir(&mut self, from: &Path, to: &Path) -> PublishResult<()> {
        self.create_dir(to)?;
        let entries = std::fs::read_dir(from).map_err(|e| PublishError::io(from, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| PublishError::io(from, e))?;
            let src = entry.path();
            let dst = to.join(entry.file_name());
            let ty = entry.file_type().map_err(|e| PublishError::io(&src, e))?;
            if ty.is_dir() {
                self.copy_dir(&src, &dst)?;
            } else {
                std::fs::copy(&src, &dst).map_err(|e| PublishError::io(&dst, e))?;
            }
        }
        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemorySink {
    dirs: Vec<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    copies: Vec<(PathBuf, PathBuf)>,
    fail_under: BTreeSet<PathBuf>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation targeting `path` (or a path below it) fail with an IO error.
    pub fn fail_under(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_under.insert(path.into());
        self
    }

    /// Directories created, in call order (repeats included).
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Text files written, by path.
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    /// Contents of the file at `path`, if written.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Directory copies requested, as `(from, to)` pairs.
    pub fn copies(&self) -> &[(PathBuf, PathBuf)] {
        &self.copies
    }

    fn check(&self, path: &Path) -> PublishResult<()> {
        if self.fail_under.iter().any(|p| path.starts_with(p)) {
            return Err(PublishError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "write refused"),
            ));
        }
        Ok(())
    }
}

impl OutputSink for InMemorySink {
    fn create_dir(&mut self, path: &Path) -> PublishResult<()> {
        self.check(path)?;
        self.dirs.push(path.to_path_buf());
        Ok(())
    }

    fn write_text(&mut self, path: &Path, contents: &str) -> PublishResult<()> {
        self.check(path)?;
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn remove_dir(&mut self, path: &Path) -> PublishResult<()> {
        self.check(path)?;
        self.dirs.retain(|d| !d.starts_with(path));
        self.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn copy_dir(&mut self, from: &Path, to: &Path) -> PublishResult<()> {
        self.check(to)?;
        self.copies.push((from.to_path_buf(), to.to_path_buf()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/output.rs"]
mod tests;
