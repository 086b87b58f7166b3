use crate::{
    numeric::category::{categorize, UnicodeCategory},
    Error, Result,
};

const HIGH_SURROGATE_START: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;
const LOW_SURROGATE_START: u16 = 0xDC00;
const LOW_SURROGATE_END: u16 = 0xDFFF;

/// Helpers on UTF-16 code units
pub trait Utf16Ext: Copy {
    /// In `0xD800..=0xDBFF`
    fn is_high_surrogate(self) -> bool;

    /// In `0xDC00..=0xDFFF`
    fn is_low_surrogate(self) -> bool;

    /// Either half of a surrogate pair
    fn is_surrogate(self) -> bool;

    /// `self` is a high surrogate and `low` a low surrogate
    fn is_surrogate_pair(self, low: u16) -> bool;

    /// Combines a surrogate pair into the code point it encodes
    ///
    /// # Errors
    /// Returns [`Error::InvalidSurrogatePair`] if `self` and `low` are not a valid pair.
    fn convert_to_utf32(self, low: u16) -> Result<u32>;

    /// The character of a code unit that is not a surrogate
    fn to_char(self) -> Option<char>;

    /// The general category, [`UnicodeCategory::Surrogate`] for either half of a pair
    fn get_unicode_category(self) -> UnicodeCategory;
}

impl Utf16Ext for u16 {
    fn is_high_surrogate(self) -> bool {
        (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(&self)
    }

    fn is_low_surrogate(self) -> bool {
        (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&self)
    }

    fn is_surrogate(self) -> bool {
        (HIGH_SURROGATE_START..=LOW_SURROGATE_END).contains(&self)
    }

    fn is_surrogate_pair(self, low: u16) -> bool {
        self.is_high_surrogate() && low.is_low_surrogate()
    }

    fn convert_to_utf32(self, low: u16) -> Result<u32> {
        if !self.is_surrogate_pair(low) {
            return Err(Error::InvalidSurrogatePair(self, low));
        }

        let high_bits = u32::from(self - HIGH_SURROGATE_START) << 10;
        let low_bits = u32::from(low - LOW_SURROGATE_START);
        Ok(0x10000 + high_bits + low_bits)
    }

    fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self))
    }

    fn get_unicode_category(self) -> UnicodeCategory {
        match self.to_char() {
            Some(c) => categorize(c),
            None => UnicodeCategory::Surrogate,
        }
    }
}
