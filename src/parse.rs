//! Reading tablet and stylus descriptions out of data files.
//!
//! A tablet file looks like:
//! ```text
//! [Device]
//! Vendor=Wacom
//! Product=Intuos4 6x9
//! Width=9
//! Height=6
//! Class=Intuos4
//! DeviceMatch=usb:0x056a:0x00b9
//! Styli=0x802;0x80a;
//!
//! [Features]
//! Stylus=true
//! Ring=true
//! Buttons=9
//! ```
//! and the stylus file has one section per stylus, named by its hex ID:
//! ```text
//! [0x802]
//! Name=Grip Pen
//! Buttons=2
//! HasEraser=true
//! Type=General
//! ```
//! Keys that are missing or hold a malformed value fall back to a default. Only a file that
//! can't be read at all fails.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::device::{Class, Device, Features};
use crate::keyfile::{KeyFile, KeyFileError};
use crate::matching::{self, HardwareId, MatchKey, GENERIC_MATCH};
use crate::stylus::{Stylus, StylusType};

const DEVICE_SECTION: &str = "Device";
const FEATURES_SECTION: &str = "Features";

#[derive(thiserror::Error, Debug)]
#[error("failed to load {}: {source}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    #[source]
    pub source: KeyFileError,
}

/// Parse one tablet description.
///
/// A file with no usable `DeviceMatch` still yields a device, but one with no
/// [match key](Device::match_key).
/// # Errors
/// If the file can't be read or isn't a well-formed document.
pub fn parse_device(path: impl AsRef<Path>) -> Result<Device, ParseError> {
    let path = path.as_ref();
    let file = load(path)?;
    Ok(device_from_keyfile(&file, path))
}

/// Parse the stylus file into a map from stylus ID to stylus.
///
/// Sections whose name isn't a non-zero hex number are skipped with a warning. If two sections
/// name the same ID the later one wins.
/// # Errors
/// If the file can't be read or isn't a well-formed document.
pub fn parse_stylus_entries(path: impl AsRef<Path>) -> Result<HashMap<u32, Stylus>, ParseError> {
    let path = path.as_ref();
    let file = load(path)?;
    Ok(styli_from_keyfile(&file, path))
}

fn load(path: &Path) -> Result<KeyFile, ParseError> {
    KeyFile::load(path).map_err(|source| ParseError {
        path: path.to_owned(),
        source,
    })
}

/// Absent keys are `None` silently, malformed ones with a warning.
fn optional<T>(value: Result<T, KeyFileError>, path: &Path) -> Option<T> {
    match value {
        Ok(value) => Some(value),
        Err(err) if err.is_missing() => None,
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring value: {err}");
            None
        }
    }
}

fn unsigned(value: Result<i32, KeyFileError>, key: &str, path: &Path) -> Option<u32> {
    let value = optional(value, path)?;
    u32::try_from(value)
        .inspect_err(|_| tracing::warn!(path = %path.display(), "ignoring negative {key}={value}"))
        .ok()
}

pub(crate) fn device_from_keyfile(file: &KeyFile, path: &Path) -> Device {
    let string = |key: &str| optional(file.string(DEVICE_SECTION, key), path);
    let class = string("Class").map_or(Class::Unknown, |class| Class::from_name(&class));

    let match_key = match string("DeviceMatch") {
        None => {
            tracing::warn!(path = %path.display(), "no DeviceMatch");
            None
        }
        Some(generic) if generic == GENERIC_MATCH => Some(MatchKey::Generic),
        Some(matchstr) => matchstr
            .parse::<HardwareId>()
            .inspect_err(|err| {
                tracing::warn!(path = %path.display(), "failed to match {matchstr:?} for product/vendor IDs: {err}");
            })
            .ok()
            .map(MatchKey::Hardware),
    };

    let styli = optional(file.string_list(DEVICE_SECTION, "Styli"), path)
        .unwrap_or_default()
        .iter()
        .flat_map(|item| item.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter_map(|item| {
            let id = parse_c_integer(item).filter(|&id| id != 0);
            if id.is_none() {
                tracing::warn!(path = %path.display(), "ignoring invalid stylus ID {item:?}");
            }
            id
        })
        .collect();

    let features = Features::KEYS
        .iter()
        .filter(|(key, _)| optional(file.boolean(FEATURES_SECTION, key), path).unwrap_or(false))
        .fold(Features::empty(), |features, (_, flag)| features | *flag);

    Device {
        vendor: string("Vendor"),
        product: string("Product"),
        width: unsigned(file.integer(DEVICE_SECTION, "Width"), "Width", path).unwrap_or(0),
        height: unsigned(file.integer(DEVICE_SECTION, "Height"), "Height", path).unwrap_or(0),
        class,
        match_key,
        buttons: unsigned(file.integer(FEATURES_SECTION, "Buttons"), "Buttons", path).unwrap_or(0),
        features,
        styli,
    }
}

pub(crate) fn styli_from_keyfile(file: &KeyFile, path: &Path) -> HashMap<u32, Stylus> {
    let mut styli = HashMap::new();
    for section in file.sections() {
        let Some(id) = matching::parse_hex(section).and_then(NonZeroU32::new) else {
            tracing::warn!(path = %path.display(), "failed to parse stylus ID {section:?}");
            continue;
        };

        let is_eraser = optional(file.boolean(section, "IsEraser"), path).unwrap_or(false);
        let (has_eraser, buttons) = if is_eraser {
            (false, Some(0))
        } else {
            (
                optional(file.boolean(section, "HasEraser"), path).unwrap_or(false),
                unsigned(file.integer(section, "Buttons"), "Buttons", path),
            )
        };
        let stylus_type = optional(file.string(section, "Type"), path)
            .map_or(StylusType::Unknown, |name| StylusType::from_name(&name));

        let stylus = Stylus::new(
            id,
            optional(file.string(section, "Name"), path),
            is_eraser,
            has_eraser,
            buttons,
            stylus_type,
        );
        if styli.insert(id.get(), stylus).is_some() {
            tracing::warn!(path = %path.display(), "duplicate definition for stylus ID {:#x}", id.get());
        }
    }
    styli
}

/// An integer with its radix given by its prefix: `0x` for hex, `0` for octal, otherwise decimal.
fn parse_c_integer(s: &str) -> Option<u32> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        matching::parse_hex(hex)
    } else if s.len() > 1 && s.starts_with('0') {
        u32::from_str_radix(&s[1..], 8).ok()
    } else {
        s.parse().ok()
    }
}
