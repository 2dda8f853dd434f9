//! # The database
//!
//! Loaded once from a directory of data files, then read-only. Lookups hand out references that
//! live as long as the [`Database`], while the [resolver](crate::resolve) hands out owned copies.
//!
//! A `Database` is [`Send`] and [`Sync`] and has no interior mutability, so any number of threads
//! may query it at once. Dropping it frees every record, but never affects copies already resolved.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::builder::TABLET_SUFFIX;
use crate::device::Device;
use crate::matching::MatchKey;
use crate::parse;
use crate::stylus::Stylus;

/// See [module level docs](`crate::database`) for details.
#[derive(Debug, Default)]
pub struct Database {
    devices: HashMap<MatchKey, Device>,
    styli: HashMap<u32, Stylus>,
}

impl Database {
    /// Load every `*.tablet` file in `data_dir` and the stylus definitions in `stylus_file`.
    ///
    /// Files are read in lexicographic order of their names, skipping hidden files. When two tablets
    /// share a match key, the one read last replaces the earlier one. Files that fail to parse, and
    /// tablets without a usable match key, are skipped with a warning.
    ///
    /// A missing directory or stylus file results in an empty database (or empty stylus table) rather
    /// than an error.
    #[must_use]
    pub fn load(data_dir: impl AsRef<Path>, stylus_file: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let stylus_file = stylus_file.as_ref();
        let mut db = Self::default();

        for path in tablet_files(data_dir) {
            match parse::parse_device(&path) {
                Ok(device) => db.insert_device(device, &path),
                Err(err) => tracing::warn!("skipping tablet: {err}"),
            }
        }

        match parse::parse_stylus_entries(stylus_file) {
            Ok(styli) => db.styli = styli,
            Err(err) => tracing::warn!("no styli loaded: {err}"),
        }

        tracing::debug!(
            data_dir = %data_dir.display(),
            devices = db.devices.len(),
            styli = db.styli.len(),
            "loaded database"
        );
        db
    }

    /// Load from the default data directory. See [`Builder`](crate::Builder) for more options.
    #[must_use]
    pub fn load_default() -> Self {
        crate::Builder::new().build()
    }

    /// Insert or replace by match key. Devices without one can't be indexed and are dropped.
    fn insert_device(&mut self, device: Device, path: &Path) {
        let Some(key) = device.match_key() else {
            tracing::warn!(path = %path.display(), "skipping tablet without a usable DeviceMatch");
            return;
        };
        if let Some(replaced) = self.devices.insert(key, device) {
            tracing::warn!(
                path = %path.display(),
                "match key {key} already used by {:?}, replacing it",
                replaced.product().unwrap_or("an unnamed tablet")
            );
        }
    }

    #[must_use]
    pub fn device(&self, key: &MatchKey) -> Option<&Device> {
        self.devices.get(key)
    }
    /// Look up a device by the string form of its match key, e.g. `"usb:0x56a:0x81"` or `"generic"`.
    /// Malformed keys match nothing.
    #[must_use]
    pub fn lookup_device(&self, match_key: &str) -> Option<&Device> {
        let key = match_key.parse().ok()?;
        self.device(&key)
    }
    #[must_use]
    pub fn stylus(&self, id: u32) -> Option<&Stylus> {
        self.styli.get(&id)
    }

    /// Every device, in no particular order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }
    /// Every stylus, in no particular order.
    pub fn styli(&self) -> impl Iterator<Item = &Stylus> {
        self.styli.values()
    }
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
    #[must_use]
    pub fn stylus_count(&self) -> usize {
        self.styli.len()
    }
}

/// Paths of the non-hidden `*.tablet` files in `dir`, sorted by name.
fn tablet_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "data directory does not exist");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(dir = %dir.display(), "failed to read data directory: {err}");
            return Vec::new();
        }
    };

    let mut names: Vec<_> = entries
        .filter_map(|entry| {
            entry
                .inspect_err(|err| tracing::warn!(dir = %dir.display(), "skipping entry: {err}"))
                .ok()
        })
        .map(|entry| entry.file_name())
        .filter(|name| name.to_str().is_some_and(is_tablet_file))
        .collect();
    names.sort();
    names.into_iter().map(|name| dir.join(name)).collect()
}

fn is_tablet_file(name: &str) -> bool {
    !name.starts_with('.') && name.len() > TABLET_SUFFIX.len() && name.ends_with(TABLET_SUFFIX)
}
