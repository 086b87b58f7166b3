//! Numeric and character helpers.
//!
//! - [`DecimalExt`]: decimal-style rounding, checked conversions and Chinese grouping on `f64`
//! - [`CharExt`]: classification, numeric values and culture-aware casing on `char`
//! - [`Utf16Ext`]: surrogate handling on UTF-16 code units
//!
//! ```rust
//! use pure_ext::numeric::{CharExt, DecimalExt, Utf16Ext};
//!
//! assert_eq!(DecimalExt::round(2.5_f64), 2.0);
//! assert_eq!(123_456_789.0_f64.to_chinese_format_n(), "1 2345 6789.00");
//! assert_eq!('\u{00BD}'.get_numeric_value(), 0.5);
//! assert_eq!(0xD83D_u16.convert_to_utf32(0xDE00)?, 0x1F600);
//! # Ok::<(), pure_ext::Error>(())
//! ```

mod category;
mod chars;
mod decimal;
mod utf16;

pub use category::UnicodeCategory;
pub use chars::CharExt;
pub use decimal::{abs_all, DecimalExt, MidpointRounding, MAX_ROUNDING_DIGITS};
pub use utf16::Utf16Ext;
