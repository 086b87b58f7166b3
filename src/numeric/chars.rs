use crate::{
    cultures::Culture,
    numeric::category::{categorize, decimal_digit_value, UnicodeCategory},
};

/// Values of the Roman numerals U+2160 to U+216F (and their lowercase forms U+2170 to U+217F)
const ROMAN_NUMERALS: [u16; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 50, 100, 500, 1000];

/// Character classification, numeric values and case mapping
pub trait CharExt: Copy {
    /// A string made of `count` copies of the character
    fn repeat(self, count: usize) -> String;

    /// Every character from `self` to `to`, both included. Descending when `to < self`.
    ///
    /// Surrogate code points are not characters and are skipped.
    fn to_range(self, to: char) -> Vec<char>;

    /// The general category
    fn get_unicode_category(self) -> UnicodeCategory;

    /// The numeric value of digits, fractions, Roman and circled numerals, `-1.0` otherwise
    fn get_numeric_value(self) -> f64;

    /// Cc
    fn is_control(self) -> bool;

    /// Nd, a decimal digit of any script
    fn is_digit(self) -> bool;

    /// Lu, Ll, Lt, Lm or Lo
    fn is_letter(self) -> bool;

    /// A letter or a decimal digit
    fn is_letter_or_digit(self) -> bool;

    /// Ll
    fn is_lower(self) -> bool;

    /// Lu
    fn is_upper(self) -> bool;

    /// Nd, Nl or No
    fn is_number(self) -> bool;

    /// Any punctuation category
    fn is_punctuation(self) -> bool;

    /// Zs, Zl or Zp
    fn is_separator(self) -> bool;

    /// Sm, Sc, Sk or So
    fn is_symbol(self) -> bool;

    /// Unicode white space
    fn is_white_space(self) -> bool;

    /// Lowercase mapping independent of any culture
    fn to_lower_invariant(self) -> char;

    /// Uppercase mapping independent of any culture
    fn to_upper_invariant(self) -> char;

    /// Lowercase mapping, there is no ambient culture so this is the invariant mapping
    fn to_lower(self) -> char {
        self.to_lower_invariant()
    }

    /// Uppercase mapping, there is no ambient culture so this is the invariant mapping
    fn to_upper(self) -> char {
        self.to_upper_invariant()
    }

    /// Lowercase mapping of `culture`. Turkish and Azeri map `I` to dotless `ı` and `İ` to `i`.
    fn to_lower_in(self, culture: Culture) -> char;

    /// Uppercase mapping of `culture`. Turkish and Azeri map `i` to dotted `İ` and `ı` to `I`.
    fn to_upper_in(self, culture: Culture) -> char;
}

/// Turkish and Azeri case the dotted and dotless i differently
fn has_turkic_casing(culture: Culture) -> bool {
    let language = culture.tag().split('-').next().unwrap_or_default();
    language == "tr" || language == "az"
}

/// Keep mappings that produce a single character, anything else leaves `c` unchanged
fn single<I: Iterator<Item = char>>(c: char, mut mapped: I) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(first), None) => first,
        _ => c,
    }
}

impl CharExt for char {
    fn repeat(self, count: usize) -> String {
        std::iter::repeat(self).take(count).collect()
    }

    fn to_range(self, to: char) -> Vec<char> {
        if self <= to {
            (self..=to).collect()
        } else {
            (to..=self).rev().collect()
        }
    }

    fn get_unicode_category(self) -> UnicodeCategory {
        categorize(self)
    }

    fn get_numeric_value(self) -> f64 {
        if let Some(digit) = decimal_digit_value(self) {
            return f64::from(digit);
        }

        let code = self as u32;
        match code {
            0x00B2 => 2.0,
            0x00B3 => 3.0,
            0x00B9 => 1.0,
            0x00BC => 0.25,
            0x00BD => 0.5,
            0x00BE => 0.75,
            0x2070 => 0.0,
            0x2074..=0x2079 => f64::from(code - 0x2070),
            0x2080..=0x2089 => f64::from(code - 0x2080),
            0x2150..=0x215E => {
                const VULGAR: [f64; 15] = [
                    1.0 / 7.0,
                    1.0 / 9.0,
                    0.1,
                    1.0 / 3.0,
                    2.0 / 3.0,
                    0.2,
                    0.4,
                    0.6,
                    0.8,
                    1.0 / 6.0,
                    5.0 / 6.0,
                    0.125,
                    0.375,
                    0.625,
                    0.875,
                ];
                VULGAR[(code - 0x2150) as usize]
            }
            0x2160..=0x216F => f64::from(ROMAN_NUMERALS[(code - 0x2160) as usize]),
            0x2170..=0x217F => f64::from(ROMAN_NUMERALS[(code - 0x2170) as usize]),
            0x2460..=0x2473 => f64::from(code - 0x245F),
            0x2474..=0x2487 => f64::from(code - 0x2473),
            0x2488..=0x249B => f64::from(code - 0x2487),
            0x3007 => 0.0,
            0x3021..=0x3029 => f64::from(code - 0x3020),
            _ => -1.0,
        }
    }

    fn is_control(self) -> bool {
        char::is_control(self)
    }

    fn is_digit(self) -> bool {
        decimal_digit_value(self).is_some()
    }

    fn is_letter(self) -> bool {
        categorize(self).is_letter()
    }

    fn is_letter_or_digit(self) -> bool {
        self.is_letter() || CharExt::is_digit(self)
    }

    fn is_lower(self) -> bool {
        categorize(self) == UnicodeCategory::LowercaseLetter
    }

    fn is_upper(self) -> bool {
        categorize(self) == UnicodeCategory::UppercaseLetter
    }

    fn is_number(self) -> bool {
        categorize(self).is_number()
    }

    fn is_punctuation(self) -> bool {
        categorize(self).is_punctuation()
    }

    fn is_separator(self) -> bool {
        categorize(self).is_separator()
    }

    fn is_symbol(self) -> bool {
        categorize(self).is_symbol()
    }

    fn is_white_space(self) -> bool {
        self.is_whitespace()
    }

    fn to_lower_invariant(self) -> char {
        single(self, self.to_lowercase())
    }

    fn to_upper_invariant(self) -> char {
        single(self, self.to_uppercase())
    }

    fn to_lower_in(self, culture: Culture) -> char {
        if has_turkic_casing(culture) {
            match self {
                'I' => return '\u{0131}',
                '\u{0130}' => return 'i',
                _ => {}
            }
        }
        self.to_lower_invariant()
    }

    fn to_upper_in(self, culture: Culture) -> char {
        if has_turkic_casing(culture) {
            match self {
                'i' => return '\u{0130}',
                '\u{0131}' => return 'I',
                _ => {}
            }
        }
        self.to_upper_invariant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat() {
        assert_eq!('a'.repeat(3), "aaa");
        assert_eq!('é'.repeat(2), "éé");
        assert_eq!('x'.repeat(0), "");
    }

    #[test]
    fn test_to_range() {
        assert_eq!('a'.to_range('e'), vec!['a', 'b', 'c', 'd', 'e']);
        assert_eq!('e'.to_range('a'), vec!['e', 'd', 'c', 'b', 'a']);
        assert_eq!('q'.to_range('q'), vec!['q']);

        let around_surrogates = '\u{D7FF}'.to_range('\u{E000}');
        assert_eq!(around_surrogates, vec!['\u{D7FF}', '\u{E000}']);
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!('7'.get_numeric_value(), 7.0);
        assert_eq!('\u{0665}'.get_numeric_value(), 5.0);
        assert_eq!('\u{00BD}'.get_numeric_value(), 0.5);
        assert_eq!('\u{00B2}'.get_numeric_value(), 2.0);
        assert_eq!('\u{216B}'.get_numeric_value(), 12.0);
        assert_eq!('\u{216F}'.get_numeric_value(), 1000.0);
        assert_eq!('\u{2473}'.get_numeric_value(), 20.0);
        assert_eq!('\u{2155}'.get_numeric_value(), 0.2);
        assert_eq!('x'.get_numeric_value(), -1.0);
    }

    #[test]
    fn test_classification() {
        assert!(CharExt::is_digit('5'));
        assert!(CharExt::is_digit('\u{0661}'));
        assert!(!CharExt::is_digit('\u{00BD}'));
        assert!('\u{00BD}'.is_number());
        assert!('\u{2163}'.is_number());

        assert!('Ж'.is_letter());
        assert!('\u{4E2D}'.is_letter_or_digit());
        assert!(!'-'.is_letter_or_digit());

        assert!('a'.is_lower());
        assert!(!'A'.is_lower());
        assert!('A'.is_upper());
        assert!(!'\u{01C5}'.is_upper());

        assert!('!'.is_punctuation());
        assert!('+'.is_symbol());
        assert!('\u{20AC}'.is_symbol());
        assert!(' '.is_separator());
        assert!(!'\n'.is_separator());
        assert!('\n'.is_white_space());
        assert!(CharExt::is_control('\u{0007}'));
    }

    #[test]
    fn test_combining_marks_and_ordinals() {
        assert_eq!(
            '\u{0903}'.get_unicode_category(),
            UnicodeCategory::SpacingCombiningMark
        );
        assert_eq!(
            '\u{0941}'.get_unicode_category(),
            UnicodeCategory::NonSpacingMark
        );
        assert!(!'\u{0903}'.is_letter());
        assert!(!'\u{093F}'.is_letter_or_digit());

        assert_eq!('\u{00AA}'.get_unicode_category(), UnicodeCategory::OtherLetter);
        assert!('\u{00AA}'.is_letter());
        assert!(!'\u{00AA}'.is_lower());
    }

    #[test]
    fn test_invariant_casing() {
        assert_eq!('A'.to_lower_invariant(), 'a');
        assert_eq!('a'.to_upper_invariant(), 'A');
        assert_eq!('Ж'.to_lower(), 'ж');
        assert_eq!('ж'.to_upper(), 'Ж');
        // multi character mappings keep the input
        assert_eq!('ß'.to_upper_invariant(), 'ß');
        assert_eq!('5'.to_upper_invariant(), '5');
    }

    #[test]
    fn test_turkic_casing() {
        assert_eq!('I'.to_lower_in(Culture::TurkishTurkey), '\u{0131}');
        assert_eq!('\u{0130}'.to_lower_in(Culture::Turkish), 'i');
        assert_eq!('i'.to_upper_in(Culture::AzeriLatinAzerbaijan), '\u{0130}');
        assert_eq!('\u{0131}'.to_upper_in(Culture::TurkishTurkey), 'I');

        assert_eq!('I'.to_lower_in(Culture::EnglishUnitedStates), 'i');
        assert_eq!('i'.to_upper_in(Culture::GermanGermany), 'I');
        assert_eq!('A'.to_lower_in(Culture::TurkishTurkey), 'a');
    }
}
