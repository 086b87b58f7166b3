//! Enum helpers.
//!
//! - [`FlagsExt`]: set, clear and test flags on every `bitflags` type
//! - [`DisplayString`]: display names declared with strum properties
//! - [`Description`]: descriptions declared with strum messages

mod display;
mod flags;

pub use display::{Description, DisplayString, DISPLAY_PROPERTY};
pub use flags::FlagsExt;
