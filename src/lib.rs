//! # Read-only database of [Tablet](device) and [Stylus](stylus) capabilities 🗂️✨
//!
//! Knows, for a wide range of graphics tablets, what the hardware can do: its size, its buttons,
//! rings, and strips, whether it takes touch input, and which styli work with it. Tablets are
//! described by a directory of `*.tablet` data files and styli by a single stylus file, all
//! read once when the [`Database`] is loaded.
//!
//! To get started, create a [`Builder`] (or call [`Database::load`] with explicit paths), then
//! resolve hardware with one of:
//! * [`Database::resolve_path`] for a device node like `/dev/input/event7`, through an
//!   [`Enumerator`](enumerate::Enumerator) such as the udev one.
//! * [`Database::resolve_usb_id`] or [`Database::resolve_id`] for known IDs.
//! * [`Database::resolve_name`] for a product name.
//!
//! ```no_run
//! let db = tabletdb::Builder::new().build();
//! let tablet = db.resolve_usb_id(0x56a, 0xb9)?;
//! for id in tablet.supported_styli() {
//!     if let Some(stylus) = db.stylus(*id) {
//!         println!("{:?} works with {:?}", stylus.name(), tablet.product());
//!     }
//! }
//! # Ok::<(), tabletdb::LookupError>(())
//! ```
//!
//! ## Logging
//! Skipped files and entries, and values filled in with defaults, are reported through
//! [`tracing`]. Nothing is printed unless the application installs a subscriber.

#![warn(clippy::pedantic)]

pub mod builder;
pub mod database;
pub mod device;
pub mod enumerate;
pub mod keyfile;
pub mod matching;
pub mod parse;
pub mod resolve;
pub mod stylus;

pub use builder::Builder;
pub use database::Database;
pub use device::{Class, Device, Features};
pub use matching::{Bus, HardwareId, MatchKey};
pub use resolve::{Fallback, LookupError};
pub use stylus::{Stylus, StylusType};
