//! Builder-style configuration for loading a [`Database`].
//!
//! For the system-wide data files, `Builder::new().build()` is all you need!

use std::path::PathBuf;

use crate::Database;

/// Where data files are looked for unless configured otherwise. Set `TABLETDB_DATADIR` at
/// compile time to change it.
pub const DEFAULT_DATA_DIR: &str = match option_env!("TABLETDB_DATADIR") {
    Some(dir) => dir,
    None => "/usr/share/libwacom",
};
/// Name of the stylus file within the data directory.
pub const STYLUS_FILE: &str = "libwacom.stylus";
/// Only files ending in this (case sensitive) are read as tablet descriptions.
pub const TABLET_SUFFIX: &str = ".tablet";

/// Pre-load configuration for a [`Database`].
#[derive(Clone, Debug)]
pub struct Builder {
    data_dir: PathBuf,
    stylus_file: Option<PathBuf>,
}
impl Default for Builder {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.into(),
            stylus_file: None,
        }
    }
}

/// # Configuration
impl Builder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Directory to scan for `*.tablet` files. Also where the stylus file is found,
    /// unless [overridden](Self::stylus_file).
    #[must_use]
    pub fn data_dir(self, dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            ..self
        }
    }
    /// Read stylus definitions from this file rather than [`STYLUS_FILE`] in the data directory.
    #[must_use]
    pub fn stylus_file(self, path: impl Into<PathBuf>) -> Self {
        Self {
            stylus_file: Some(path.into()),
            ..self
        }
    }
}
/// # Finishing
impl Builder {
    /// Load the database. This never fails - a missing directory or unreadable file only results in
    /// fewer entries, with the reason logged.
    #[must_use]
    pub fn build(self) -> Database {
        let stylus_file = self
            .stylus_file
            .unwrap_or_else(|| self.data_dir.join(STYLUS_FILE));
        Database::load(&self.data_dir, stylus_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn stylus_file_defaults_into_data_dir() {
        let builder = Builder::new().data_dir("/tmp/tablets");
        assert_eq!(builder.data_dir, Path::new("/tmp/tablets"));
        assert_eq!(builder.stylus_file, None);

        let builder = builder.stylus_file("/tmp/other.stylus");
        assert_eq!(builder.data_dir, Path::new("/tmp/tablets"));
        assert_eq!(
            builder.stylus_file.as_deref(),
            Some(Path::new("/tmp/other.stylus"))
        );
    }
}
