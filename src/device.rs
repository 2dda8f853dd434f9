//! # Tablets
//!
//! A [`Device`] describes the static capabilities of one model of tablet: its physical size,
//! which [features](Features) it has, how many buttons are on it, and which [styli](crate::stylus)
//! can be used with it.
//!
//! Devices handed out by the [resolver](crate::Database::resolve_usb_id) are deep copies, owned by
//! the caller and independent of the database they came from.

use crate::matching::{Bus, MatchKey};

bitflags::bitflags! {
    /// Physical input capabilities of a tablet.
    #[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        /// Accepts input from a stylus.
        const STYLUS = 1;
        /// Accepts finger touches.
        const TOUCH = 2;
        /// Has a touch ring.
        const RING = 4;
        /// Has a second touch ring.
        const RING2 = 8;
        /// Has a vertical touch strip.
        const VSTRIP = 16;
        /// Has a horizontal touch strip.
        const HSTRIP = 32;
        /// Built into a screen or computer, rather than standalone.
        const BUILTIN = 64;
        /// Can be used rotated 180°, e.g. for left-handed use.
        const REVERSIBLE = 128;
    }
}

impl Features {
    /// Name of the data file key for each flag.
    pub(crate) const KEYS: [(&'static str, Features); 8] = [
        ("Stylus", Features::STYLUS),
        ("Touch", Features::TOUCH),
        ("Ring", Features::RING),
        ("Ring2", Features::RING2),
        ("VStrip", Features::VSTRIP),
        ("HStrip", Features::HSTRIP),
        ("BuiltIn", Features::BUILTIN),
        ("Reversible", Features::REVERSIBLE),
    ];
}

/// The product family a tablet belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Class {
    #[default]
    Unknown,
    Intuos3,
    Intuos4,
    Cintiq,
    Bamboo,
    Graphire,
}
impl Class {
    /// Parse a class name as written in data files. Anything unrecognized is [`Class::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

/// See [module level docs](`crate::device`) for details.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Device {
    pub(crate) vendor: Option<String>,
    pub(crate) product: Option<String>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) class: Class,
    /// `None` if the data file had no usable `DeviceMatch`. Such devices never make it into a database.
    pub(crate) match_key: Option<MatchKey>,
    pub(crate) buttons: u32,
    pub(crate) features: Features,
    pub(crate) styli: smallvec::SmallVec<[u32; 8]>,
}

impl Device {
    /// Human readable vendor name, e.g. `"Wacom"`.
    #[must_use]
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }
    /// Human readable model name, e.g. `"Wacom Intuos4 6x9"`.
    #[must_use]
    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }
    /// Width of the sensing area, as given in the data file.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Height of the sensing area, as given in the data file.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
    #[must_use]
    pub fn class(&self) -> Class {
        self.class
    }
    #[must_use]
    pub fn match_key(&self) -> Option<MatchKey> {
        self.match_key
    }
    /// The canonical string form of the [match key](Self::match_key).
    #[must_use]
    pub fn match_str(&self) -> Option<String> {
        self.match_key.map(|key| key.to_string())
    }
    /// Vendor ID, 0 for the generic device.
    #[must_use]
    pub fn vendor_id(&self) -> u32 {
        self.hardware_id().map_or(0, |id| id.vendor_id())
    }
    /// Product ID, 0 for the generic device.
    #[must_use]
    pub fn product_id(&self) -> u32 {
        self.hardware_id().map_or(0, |id| id.product_id())
    }
    /// The bus this tablet connects through, [`Bus::Unknown`] for the generic device.
    #[must_use]
    pub fn bus(&self) -> Bus {
        self.hardware_id().map_or(Bus::Unknown, |id| id.bus())
    }
    fn hardware_id(&self) -> Option<crate::matching::HardwareId> {
        self.match_key.and_then(|key| key.hardware())
    }
    /// Whether this is the catch-all record used for unrecognized hardware.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.match_key.is_some_and(|key| key.is_generic())
    }
    /// Number of buttons on the tablet itself, not counting stylus buttons.
    #[must_use]
    pub fn buttons(&self) -> u32 {
        self.buttons
    }
    #[must_use]
    pub fn features(&self) -> Features {
        self.features
    }
    /// IDs of the [styli](crate::stylus::Stylus) that work with this tablet, in data file order.
    /// Look them up with [`Database::stylus`](crate::Database::stylus).
    #[must_use]
    pub fn supported_styli(&self) -> &[u32] {
        &self.styli
    }

    #[must_use]
    pub fn has_stylus(&self) -> bool {
        self.features.contains(Features::STYLUS)
    }
    #[must_use]
    pub fn has_touch(&self) -> bool {
        self.features.contains(Features::TOUCH)
    }
    #[must_use]
    pub fn has_ring(&self) -> bool {
        self.features.contains(Features::RING)
    }
    #[must_use]
    pub fn has_ring2(&self) -> bool {
        self.features.contains(Features::RING2)
    }
    #[must_use]
    pub fn has_vstrip(&self) -> bool {
        self.features.contains(Features::VSTRIP)
    }
    #[must_use]
    pub fn has_hstrip(&self) -> bool {
        self.features.contains(Features::HSTRIP)
    }
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.features.contains(Features::BUILTIN)
    }
    #[must_use]
    pub fn is_reversible(&self) -> bool {
        self.features.contains(Features::REVERSIBLE)
    }
}
