//! # Match keys
//!
//! Every tablet in the database is indexed by the hardware that reports it: the bus it's attached
//! through along with the vendor and product ID, written as `"<bus>:0x<vendor>:0x<product>"`, e.g.
//! `usb:0x56a:0x81`. One special record instead uses the key `generic` and serves as a fallback
//! for hardware that is not otherwise known.
//!
//! The string form is always regenerated from the parsed IDs, so `usb:0x056A:0x0081` and
//! `usb:0x56a:0x81` name the same key.

/// Name of the [`MatchKey::Generic`] key, as written in data files.
pub const GENERIC_MATCH: &str = "generic";

/// The physical connection a tablet reports through.
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
#[strum(serialize_all = "lowercase")]
pub enum Bus {
    #[default]
    Unknown,
    Usb,
    Serial,
    Bluetooth,
}
impl Bus {
    /// Parse a bus name, with anything unrecognized becoming [`Bus::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Unknown)
    }
    /// The bus name as used in match keys. Defined for every variant, but a key can only
    /// be formed from a known bus.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MatchKeyError {
    /// The bus name was not one of `usb`, `serial`, or `bluetooth`.
    #[error("unknown bus {0:?}")]
    UnknownBus(String),
    /// A key can't be formed for hardware of unknown connection type.
    #[error("cannot form a match key for an unknown bus")]
    UnknownBusVariant,
    #[error("malformed match key {0:?}, expected <bus>:<vendor hex>:<product hex>")]
    Malformed(String),
}

/// A bus, vendor ID, and product ID triple. The bus is never [`Bus::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HardwareId {
    bus: Bus,
    vendor_id: u32,
    product_id: u32,
}
impl HardwareId {
    /// # Errors
    /// [`MatchKeyError::UnknownBusVariant`] if `bus` is [`Bus::Unknown`].
    pub fn new(bus: Bus, vendor_id: u32, product_id: u32) -> Result<Self, MatchKeyError> {
        if bus == Bus::Unknown {
            return Err(MatchKeyError::UnknownBusVariant);
        }
        Ok(Self {
            bus,
            vendor_id,
            product_id,
        })
    }
    /// Shorthand for a USB device, which can never fail.
    #[must_use]
    pub fn usb(vendor_id: u32, product_id: u32) -> Self {
        Self {
            bus: Bus::Usb,
            vendor_id,
            product_id,
        }
    }
    #[must_use]
    pub fn bus(&self) -> Bus {
        self.bus
    }
    #[must_use]
    pub fn vendor_id(&self) -> u32 {
        self.vendor_id
    }
    #[must_use]
    pub fn product_id(&self) -> u32 {
        self.product_id
    }
}
impl std::fmt::Display for HardwareId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:0x{:x}:0x{:x}",
            self.bus.name(),
            self.vendor_id,
            self.product_id
        )
    }
}
impl std::str::FromStr for HardwareId {
    type Err = MatchKeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MatchKeyError::Malformed(s.to_owned());
        let mut fields = s.splitn(3, ':');
        let (Some(bus), Some(vendor), Some(product)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };
        let vendor_id = parse_hex(vendor).ok_or_else(malformed)?;
        // Whatever trails the product ID is ignored, e.g. `usb:0x56a:0x81;`.
        let (product_id, _) = split_hex(product).ok_or_else(malformed)?;
        match Bus::from_name(bus.trim()) {
            Bus::Unknown => Err(MatchKeyError::UnknownBus(bus.to_owned())),
            bus => Self::new(bus, vendor_id, product_id),
        }
    }
}

/// Hex number with an optional `0x` prefix.
pub(crate) fn parse_hex(s: &str) -> Option<u32> {
    match split_hex(s)? {
        (value, rest) if rest.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Leading hex number with an optional `0x` prefix, and the text after it.
pub(crate) fn split_hex(s: &str) -> Option<(u32, &str)> {
    let s = s.trim_start();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let end = digits
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = u32::from_str_radix(&digits[..end], 16).ok()?;
    Some((value, &digits[end..]))
}

/// The key a tablet record is indexed by. See the [module docs](self).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchKey {
    /// The catch-all record, used as a fallback for unknown hardware.
    Generic,
    Hardware(HardwareId),
}
impl MatchKey {
    /// Build the key for some hardware.
    /// # Errors
    /// [`MatchKeyError::UnknownBusVariant`] if `bus` is [`Bus::Unknown`].
    pub fn encode(bus: Bus, vendor_id: u32, product_id: u32) -> Result<Self, MatchKeyError> {
        HardwareId::new(bus, vendor_id, product_id).map(Self::Hardware)
    }
    /// The hardware named by this key, or `None` for the generic key.
    #[must_use]
    pub fn hardware(&self) -> Option<HardwareId> {
        match self {
            Self::Generic => None,
            Self::Hardware(id) => Some(*id),
        }
    }
    #[must_use]
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic)
    }
}
impl From<HardwareId> for MatchKey {
    fn from(value: HardwareId) -> Self {
        Self::Hardware(value)
    }
}
impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic => f.write_str(GENERIC_MATCH),
            Self::Hardware(id) => id.fmt(f),
        }
    }
}
impl std::str::FromStr for MatchKey {
    type Err = MatchKeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only the exact sentinel, the hardware form is what's normalized.
        if s == GENERIC_MATCH {
            Ok(Self::Generic)
        } else {
            s.parse().map(Self::Hardware)
        }
    }
}
