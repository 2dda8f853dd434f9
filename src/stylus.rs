//! # Styli
//!
//! Descriptions of the pens, airbrushes, and erasers that can be used with a [tablet](crate::device).
//! Styli are identified by the tool ID baked into the hardware (the `wacom_id` reported by most
//! tablet APIs), which is also how [`Device::supported_styli`](crate::device::Device::supported_styli)
//! refers to them.
//!
//! An eraser is a stylus in its own right. A pen with an eraser on its back end shows up as
//! two entries, the pen with [`Stylus::has_eraser`] set and the eraser with
//! [`Stylus::is_eraser`] set.

/// Broad category of a stylus.
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
pub enum StylusType {
    /// Not given by the data file. Never returned by [`Stylus::stylus_type`].
    #[default]
    Unknown,
    General,
    Inking,
    Airbrush,
    Classic,
    Marker,
}
impl StylusType {
    /// Parse a type name as written in data files. Anything unrecognized is [`StylusType::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

/// Button count reported when the data file doesn't give one.
pub const DEFAULT_BUTTONS: u32 = 2;

/// See [module level docs](`crate::stylus`) for details.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stylus {
    pub(crate) id: u32,
    pub(crate) name: Option<String>,
    pub(crate) is_eraser: bool,
    pub(crate) has_eraser: bool,
    /// `None` if unspecified.
    pub(crate) buttons: Option<u32>,
    pub(crate) stylus_type: StylusType,
}

impl Stylus {
    /// Build a stylus, with eraser status taking precedence over the other fields:
    /// an eraser never has buttons or an eraser of its own.
    pub(crate) fn new(
        id: std::num::NonZeroU32,
        name: Option<String>,
        is_eraser: bool,
        has_eraser: bool,
        buttons: Option<u32>,
        stylus_type: StylusType,
    ) -> Self {
        Self {
            id: id.get(),
            name,
            is_eraser,
            has_eraser: has_eraser && !is_eraser,
            buttons: if is_eraser { Some(0) } else { buttons },
            stylus_type,
        }
    }

    /// The hardware tool ID. Never zero.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    #[must_use]
    pub fn is_eraser(&self) -> bool {
        self.is_eraser
    }
    /// Whether the other end of this stylus is an eraser. Always `false` for erasers.
    #[must_use]
    pub fn has_eraser(&self) -> bool {
        self.has_eraser
    }
    /// Number of buttons on the barrel. Styli without a count in the data file are assumed
    /// to have [`DEFAULT_BUTTONS`].
    #[must_use]
    pub fn buttons(&self) -> u32 {
        self.buttons.unwrap_or_else(|| {
            tracing::warn!(
                "stylus {:#x} has no number of buttons defined, falling back to {DEFAULT_BUTTONS}",
                self.id
            );
            DEFAULT_BUTTONS
        })
    }
    /// The button count exactly as given by the data file.
    #[must_use]
    pub fn buttons_specified(&self) -> Option<u32> {
        self.buttons
    }
    /// The kind of stylus. Styli without a type in the data file are reported as [`StylusType::General`].
    #[must_use]
    pub fn stylus_type(&self) -> StylusType {
        if self.stylus_type == StylusType::Unknown {
            tracing::warn!(
                "stylus {:#x} has no type defined, falling back to General",
                self.id
            );
            return StylusType::General;
        }
        self.stylus_type
    }
    /// The type exactly as given by the data file, possibly [`StylusType::Unknown`].
    #[must_use]
    pub fn stylus_type_specified(&self) -> StylusType {
        self.stylus_type
    }
}
