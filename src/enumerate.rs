//! # Device enumeration
//!
//! Resolving a device node such as `/dev/input/event7` to a tablet needs the system's device
//! manager to say what is behind it. That's abstracted by [`Enumerator`] and [`Node`], so the
//! resolver can be driven by udev or by anything else that can answer the same questions.
//!
//! The properties read are the udev ones:
//! * `ID_INPUT_TABLET` - set to `1` on tablets.
//! * `ID_BUS` - `usb`, `bluetooth`, ... Absent on bluetooth tablets, where the parent device has the IDs.
//! * `ID_VENDOR_ID`, `ID_MODEL_ID` - USB vendor and product IDs, in hex.
//! * `PRODUCT` - `<bus>/<vendor>/<product>/<version>`, IDs in hex.

use std::path::Path;

pub const PROP_INPUT_TABLET: &str = "ID_INPUT_TABLET";
pub const PROP_BUS: &str = "ID_BUS";
pub const PROP_VENDOR_ID: &str = "ID_VENDOR_ID";
pub const PROP_MODEL_ID: &str = "ID_MODEL_ID";
pub const PROP_PRODUCT: &str = "PRODUCT";

/// A device known to the system's device manager.
pub trait Node: Sized {
    /// The value of a property, if set and valid UTF-8.
    fn property(&self, key: &str) -> Option<String>;
    /// The device this one hangs off of, if any.
    fn parent(&self) -> Option<Self>;

    /// A property interpreted as a flag, `1` or `true` being set.
    fn property_bool(&self, key: &str) -> bool {
        self.property(key)
            .is_some_and(|value| value == "1" || value.eq_ignore_ascii_case("true"))
    }
}

/// Looks up devices by their device node.
pub trait Enumerator {
    type Node: Node;
    /// The input device behind `path`, or `None` if there isn't one.
    fn device_for_path(&self, path: &Path) -> Option<Self::Node>;
}

#[cfg(udev_enum)]
pub use udev_impl::UdevEnumerator;

#[cfg(udev_enum)]
mod udev_impl {
    use super::{Enumerator, Node};
    use std::path::Path;

    /// Queries udev's `input` subsystem.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct UdevEnumerator;

    impl Enumerator for UdevEnumerator {
        type Node = udev::Device;
        fn device_for_path(&self, path: &Path) -> Option<udev::Device> {
            use std::os::unix::fs::{FileTypeExt, MetadataExt};

            let metadata = std::fs::metadata(path)
                .inspect_err(|err| tracing::debug!(path = %path.display(), "stat failed: {err}"))
                .ok()?;
            let file_type = metadata.file_type();
            let dev_type = if file_type.is_char_device() {
                udev::DeviceType::Character
            } else if file_type.is_block_device() {
                udev::DeviceType::Block
            } else {
                return None;
            };
            let device = udev::Device::from_devnum(dev_type, metadata.rdev())
                .inspect_err(|err| tracing::debug!(path = %path.display(), "not known to udev: {err}"))
                .ok()?;
            (device.subsystem().and_then(std::ffi::OsStr::to_str) == Some("input")).then_some(device)
        }
    }

    impl Node for udev::Device {
        fn property(&self, key: &str) -> Option<String> {
            self.property_value(key)?.to_str().map(str::to_owned)
        }
        fn parent(&self) -> Option<Self> {
            udev::Device::parent(self)
        }
    }
}
