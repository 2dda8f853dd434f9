//! # Resolving hardware to tablets
//!
//! Finds the [`Device`] describing some hardware, identified by device node, by bus and IDs, or
//! by product name. Every successful lookup returns an owned copy of the record, which stays
//! usable after the [`Database`] is dropped.

use std::path::{Path, PathBuf};

use crate::device::Device;
use crate::enumerate::{self, Enumerator, Node};
use crate::matching::{parse_hex, Bus, HardwareId, MatchKey};
use crate::Database;

/// Errors that may occur while resolving a tablet.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// A required argument was empty or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The path doesn't lead to a tablet.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: &'static str },
    /// The device is attached through a bus that tablets can't be resolved on.
    #[error("unsupported bus {0:?}")]
    UnsupportedBus(String),
    /// No record matches the hardware, even after any fallback.
    #[error("unknown model: {0}")]
    UnknownModel(String),
}

/// What to do when no record matches the hardware exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Fallback {
    /// Fail with [`LookupError::UnknownModel`].
    #[default]
    None,
    /// Use the [generic](MatchKey::Generic) record, if the database has one.
    Generic,
}

impl Database {
    /// Resolve the tablet behind a device node, such as `/dev/input/event7`.
    ///
    /// # Errors
    /// * [`LookupError::InvalidArgument`] if `path` is empty.
    /// * [`LookupError::InvalidPath`] if `enumerator` doesn't know the path or it isn't a tablet.
    /// * [`LookupError::UnsupportedBus`] for serial tablets and anything not on USB or bluetooth.
    /// * [`LookupError::UnknownModel`] if the IDs can't be read, or match nothing after `fallback`.
    pub fn resolve_path<E: Enumerator>(
        &self,
        enumerator: &E,
        path: impl AsRef<Path>,
        fallback: Fallback,
    ) -> Result<Device, LookupError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(LookupError::InvalidArgument("path is empty"));
        }
        let id = hardware_id(enumerator, path)?;
        tracing::debug!(path = %path.display(), "resolved to {id}");
        self.find(id, fallback).cloned()
    }

    /// Resolve a tablet from its bus and IDs.
    ///
    /// # Errors
    /// * [`LookupError::InvalidArgument`] if `bus` is [`Bus::Unknown`].
    /// * [`LookupError::UnknownModel`] if nothing matches after `fallback`.
    pub fn resolve_id(
        &self,
        bus: Bus,
        vendor_id: u32,
        product_id: u32,
        fallback: Fallback,
    ) -> Result<Device, LookupError> {
        let id = HardwareId::new(bus, vendor_id, product_id)
            .map_err(|_| LookupError::InvalidArgument("bus is unknown"))?;
        self.find(id, fallback).cloned()
    }

    /// Resolve a USB tablet from its vendor and product ID. There is no fallback.
    ///
    /// # Errors
    /// [`LookupError::UnknownModel`] if nothing matches.
    pub fn resolve_usb_id(&self, vendor_id: u32, product_id: u32) -> Result<Device, LookupError> {
        self.find(HardwareId::usb(vendor_id, product_id), Fallback::None)
            .cloned()
    }

    /// Resolve a tablet by its exact (case sensitive) [product name](Device::product).
    ///
    /// If several tablets share a name, which one is returned is unspecified and may differ
    /// between databases loaded from the same files.
    ///
    /// # Errors
    /// * [`LookupError::InvalidArgument`] if `name` is empty.
    /// * [`LookupError::UnknownModel`] if no tablet has that name.
    pub fn resolve_name(&self, name: &str) -> Result<Device, LookupError> {
        if name.is_empty() {
            return Err(LookupError::InvalidArgument("name is empty"));
        }
        self.devices()
            .find(|device| device.product() == Some(name))
            .cloned()
            .ok_or_else(|| LookupError::UnknownModel(format!("no tablet named {name:?}")))
    }

    fn find(&self, id: HardwareId, fallback: Fallback) -> Result<&Device, LookupError> {
        self.device(&id.into())
            .or_else(|| match fallback {
                Fallback::None => None,
                Fallback::Generic => {
                    let generic = self.device(&MatchKey::Generic);
                    if generic.is_some() {
                        tracing::debug!("no tablet matches {id}, falling back to generic");
                    }
                    generic
                }
            })
            .ok_or_else(|| LookupError::UnknownModel(format!("no tablet matches {id}")))
    }
}

/// Ask the enumerator what hardware is behind `path`.
fn hardware_id<E: Enumerator>(enumerator: &E, path: &Path) -> Result<HardwareId, LookupError> {
    let invalid_path = |reason| LookupError::InvalidPath {
        path: path.to_owned(),
        reason,
    };
    let unknown = |reason: &str| LookupError::UnknownModel(format!("{}: {reason}", path.display()));

    let node = enumerator
        .device_for_path(path)
        .ok_or_else(|| invalid_path("no such device"))?;
    if !node.property_bool(enumerate::PROP_INPUT_TABLET) {
        return Err(invalid_path("not a tablet"));
    }

    let (node, bus_name) = match node.property(enumerate::PROP_BUS) {
        Some(bus_name) => (node, bus_name),
        // Bluetooth tablets don't report a bus, their parent holds the IDs.
        None => (
            node.parent()
                .ok_or_else(|| unknown("no bus and no parent device"))?,
            Bus::Bluetooth.name().to_owned(),
        ),
    };

    let bus = Bus::from_name(&bus_name);
    let ids = match bus {
        Bus::Usb => node
            .property(enumerate::PROP_VENDOR_ID)
            .and_then(|vendor| parse_hex(&vendor))
            .zip(
                node.property(enumerate::PROP_MODEL_ID)
                    .and_then(|product| parse_hex(&product)),
            ),
        Bus::Bluetooth => node
            .property(enumerate::PROP_PRODUCT)
            .and_then(|product| parse_product(&product)),
        Bus::Serial | Bus::Unknown => return Err(LookupError::UnsupportedBus(bus_name)),
    };

    match ids {
        Some((vendor_id, product_id)) if vendor_id != 0 && product_id != 0 => {
            HardwareId::new(bus, vendor_id, product_id)
                .map_err(|_| LookupError::UnsupportedBus(bus_name))
        }
        _ => Err(unknown("no vendor and product ID")),
    }
}

/// Vendor and product IDs out of a `PRODUCT` property such as `5/56a/81/100`.
///
/// The bus type is decimal, the IDs hex. The version only needs to start with a decimal number,
/// anything after it is ignored.
fn parse_product(property: &str) -> Option<(u32, u32)> {
    let mut fields = property.splitn(4, '/');
    let (Some(bus), Some(vendor), Some(product), Some(version)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };
    bus.trim_start().parse::<i32>().ok()?;
    let version = version.trim_start();
    let version = version.strip_prefix(['+', '-']).unwrap_or(version);
    if !version.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some((parse_hex(vendor)?, parse_hex(product)?))
}
