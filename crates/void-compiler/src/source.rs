//! Locating and reading Void source files.

use crate::SourceError;
use log::{debug, trace, warn};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use void_types::{CompileErrors, SourceFile, VoidError};

/// File extension of Void source files.
pub const SOURCE_EXTENSION: &str = "void";

/// The source files under a root path.
///
/// The root may be a single file or a directory, which is searched
/// recursively. Symbolic links to directories are not followed.
#[derive(Debug, Clone)]
pub struct SourceSet {
    root: PathBuf,
    extension: String,
}

impl SourceSet {
    /// Sources under `root` with the default extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: SOURCE_EXTENSION.to_string(),
        }
    }

    /// Match files with `extension` (without the leading dot) instead.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    pub fn is_dir(&self) -> bool {
        self.root.is_dir()
    }

    /// All matching files, sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>, SourceError> {
        if !self.exists() {
            return Err(SourceError::NotFound(self.root.clone()));
        }

        let mut found = Vec::new();
        if self.is_dir() {
            self.walk(&self.root, &mut found)?;
        } else if self.matches(&self.root) {
            found.push(self.root.clone());
        }
        found.sort();

        debug!(
            "discovered {} source file(s) under {}",
            found.len(),
            self.root.display()
        );
        Ok(found)
    }

    /// Load every matching file, in [`SourceSet::discover`] order.
    pub fn load_all(&self) -> Result<Vec<SourceFile>, SourceError> {
        self.discover()?.iter().map(|path| load_source(path)).collect()
    }

    /// Load every matching file, reporting unreadable ones instead of
    /// stopping at the first.
    ///
    /// Only a failure to discover the files is returned as an error.
    pub fn load_each(&self) -> Result<(Vec<SourceFile>, CompileErrors), SourceError> {
        let mut sources = Vec::new();
        let mut errors = CompileErrors::empty();
        for path in self.discover()? {
            match load_source(&path) {
                Ok(source) => sources.push(source),
                Err(err) => {
                    warn!("skipping source: {err}");
                    errors.push_error(VoidError::from(err));
                }
            }
        }
        Ok((sources, errors))
    }

    fn walk(&self, dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), SourceError> {
        let entries = fs::read_dir(dir).map_err(|err| SourceError::io(dir, err))?;
        for entry in entries {
            let entry = entry.map_err(|err| SourceError::io(dir, err))?;
            let file_type = entry
                .file_type()
                .map_err(|err| SourceError::io(entry.path(), err))?;
            let path = entry.path();
            if file_type.is_dir() {
                self.walk(&path, found)?;
            } else if file_type.is_symlink() && path.is_dir() {
                trace!("not following directory link {}", path.display());
            } else if self.matches(&path) {
                trace!("found source {}", path.display());
                found.push(path);
            }
        }
        Ok(())
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str())
    }
}

/// Read the file at `path` into a [`SourceFile`] named after the path.
pub fn load_source(path: &Path) -> Result<SourceFile, SourceError> {
    let source = fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    Ok(SourceFile::new(path.display().to_string(), source))
}

/// Read the file at `path` line by line, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let file = fs::File::open(path).map_err(|err| read_error(path, err))?;
    BufReader::new(file)
        .lines()
        .map(|line| line.map_err(|err| SourceError::io(path, err)))
        .collect()
}

fn read_error(path: &Path, err: io::Error) -> SourceError {
    match err.kind() {
        io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::io(path, err),
    }
}
