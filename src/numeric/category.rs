//! Unicode general categories.
//!
//! Categories come from the Unicode Character Database tables of `unicode-general-category`.
//! Unassigned code points report [`UnicodeCategory::OtherNotAssigned`].

use strum::{Display, EnumIter};
use unicode_general_category::{get_general_category, GeneralCategory};

/// The Unicode general category of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum UnicodeCategory {
    /// Lu
    UppercaseLetter,
    /// Ll
    LowercaseLetter,
    /// Lt
    TitlecaseLetter,
    /// Lm
    ModifierLetter,
    /// Lo
    OtherLetter,
    /// Mn
    NonSpacingMark,
    /// Mc
    SpacingCombiningMark,
    /// Me
    EnclosingMark,
    /// Nd
    DecimalDigitNumber,
    /// Nl
    LetterNumber,
    /// No
    OtherNumber,
    /// Zs
    SpaceSeparator,
    /// Zl
    LineSeparator,
    /// Zp
    ParagraphSeparator,
    /// Cc
    Control,
    /// Cf
    Format,
    /// Cs
    Surrogate,
    /// Co
    PrivateUse,
    /// Pc
    ConnectorPunctuation,
    /// Pd
    DashPunctuation,
    /// Ps
    OpenPunctuation,
    /// Pe
    ClosePunctuation,
    /// Pi
    InitialQuotePunctuation,
    /// Pf
    FinalQuotePunctuation,
    /// Po
    OtherPunctuation,
    /// Sm
    MathSymbol,
    /// Sc
    CurrencySymbol,
    /// Sk
    ModifierSymbol,
    /// So
    OtherSymbol,
    /// Cn
    OtherNotAssigned,
}

impl UnicodeCategory {
    /// Lu, Ll, Lt, Lm or Lo
    #[must_use]
    pub fn is_letter(self) -> bool {
        matches!(
            self,
            UnicodeCategory::UppercaseLetter
                | UnicodeCategory::LowercaseLetter
                | UnicodeCategory::TitlecaseLetter
                | UnicodeCategory::ModifierLetter
                | UnicodeCategory::OtherLetter
        )
    }

    /// Nd, Nl or No
    #[must_use]
    pub fn is_number(self) -> bool {
        matches!(
            self,
            UnicodeCategory::DecimalDigitNumber
                | UnicodeCategory::LetterNumber
                | UnicodeCategory::OtherNumber
        )
    }

    /// Zs, Zl or Zp
    #[must_use]
    pub fn is_separator(self) -> bool {
        matches!(
            self,
            UnicodeCategory::SpaceSeparator
                | UnicodeCategory::LineSeparator
                | UnicodeCategory::ParagraphSeparator
        )
    }

    /// Any of the punctuation categories
    #[must_use]
    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            UnicodeCategory::ConnectorPunctuation
                | UnicodeCategory::DashPunctuation
                | UnicodeCategory::OpenPunctuation
                | UnicodeCategory::ClosePunctuation
                | UnicodeCategory::InitialQuotePunctuation
                | UnicodeCategory::FinalQuotePunctuation
                | UnicodeCategory::OtherPunctuation
        )
    }

    /// Sm, Sc, Sk or So
    #[must_use]
    pub fn is_symbol(self) -> bool {
        matches!(
            self,
            UnicodeCategory::MathSymbol
                | UnicodeCategory::CurrencySymbol
                | UnicodeCategory::ModifierSymbol
                | UnicodeCategory::OtherSymbol
        )
    }
}

impl From<GeneralCategory> for UnicodeCategory {
    fn from(category: GeneralCategory) -> Self {
        use GeneralCategory as G;
        use UnicodeCategory as U;

        #[allow(unreachable_patterns)]
        match category {
            G::UppercaseLetter => U::UppercaseLetter,
            G::LowercaseLetter => U::LowercaseLetter,
            G::TitlecaseLetter => U::TitlecaseLetter,
            G::ModifierLetter => U::ModifierLetter,
            G::OtherLetter => U::OtherLetter,
            G::NonspacingMark => U::NonSpacingMark,
            G::SpacingMark => U::SpacingCombiningMark,
            G::EnclosingMark => U::EnclosingMark,
            G::DecimalNumber => U::DecimalDigitNumber,
            G::LetterNumber => U::LetterNumber,
            G::OtherNumber => U::OtherNumber,
            G::SpaceSeparator => U::SpaceSeparator,
            G::LineSeparator => U::LineSeparator,
            G::ParagraphSeparator => U::ParagraphSeparator,
            G::Control => U::Control,
            G::Format => U::Format,
            G::Surrogate => U::Surrogate,
            G::PrivateUse => U::PrivateUse,
            G::ConnectorPunctuation => U::ConnectorPunctuation,
            G::DashPunctuation => U::DashPunctuation,
            G::OpenPunctuation => U::OpenPunctuation,
            G::ClosePunctuation => U::ClosePunctuation,
            G::InitialPunctuation => U::InitialQuotePunctuation,
            G::FinalPunctuation => U::FinalQuotePunctuation,
            G::OtherPunctuation => U::OtherPunctuation,
            G::MathSymbol => U::MathSymbol,
            G::CurrencySymbol => U::CurrencySymbol,
            G::ModifierSymbol => U::ModifierSymbol,
            G::OtherSymbol => U::OtherSymbol,
            G::Unassigned => U::OtherNotAssigned,
            _ => U::OtherNotAssigned,
        }
    }
}

/// Classify `c` into its general category
pub(crate) fn categorize(c: char) -> UnicodeCategory {
    get_general_category(c).into()
}

/// The value of `c` if it is a decimal digit of any script
///
/// Decimal digits are encoded in contiguous runs starting at zero, so the value is the distance
/// to the start of the run modulo ten.
pub(crate) fn decimal_digit_value(c: char) -> Option<u32> {
    if categorize(c) != UnicodeCategory::DecimalDigitNumber {
        return None;
    }

    let code = c as u32;
    let mut start = code;
    while let Some(previous) = start.checked_sub(1).and_then(char::from_u32) {
        if categorize(previous) != UnicodeCategory::DecimalDigitNumber {
            break;
        }
        start -= 1;
    }
    Some((code - start) % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_ascii() {
        assert_eq!(categorize('A'), UnicodeCategory::UppercaseLetter);
        assert_eq!(categorize('z'), UnicodeCategory::LowercaseLetter);
        assert_eq!(categorize('7'), UnicodeCategory::DecimalDigitNumber);
        assert_eq!(categorize(' '), UnicodeCategory::SpaceSeparator);
        assert_eq!(categorize('\t'), UnicodeCategory::Control);
        assert_eq!(categorize('_'), UnicodeCategory::ConnectorPunctuation);
        assert_eq!(categorize('-'), UnicodeCategory::DashPunctuation);
        assert_eq!(categorize('('), UnicodeCategory::OpenPunctuation);
        assert_eq!(categorize(']'), UnicodeCategory::ClosePunctuation);
        assert_eq!(categorize('!'), UnicodeCategory::OtherPunctuation);
        assert_eq!(categorize('+'), UnicodeCategory::MathSymbol);
        assert_eq!(categorize('$'), UnicodeCategory::CurrencySymbol);
        assert_eq!(categorize('^'), UnicodeCategory::ModifierSymbol);
    }

    #[test]
    fn test_categorize_other_scripts() {
        assert_eq!(categorize('\u{0663}'), UnicodeCategory::DecimalDigitNumber);
        assert_eq!(categorize('\u{2163}'), UnicodeCategory::LetterNumber);
        assert_eq!(categorize('\u{00BD}'), UnicodeCategory::OtherNumber);
        assert_eq!(categorize('\u{4E2D}'), UnicodeCategory::OtherLetter);
        assert_eq!(categorize('\u{01C5}'), UnicodeCategory::TitlecaseLetter);
        assert_eq!(categorize('\u{02B0}'), UnicodeCategory::ModifierLetter);
        assert_eq!(categorize('\u{0301}'), UnicodeCategory::NonSpacingMark);
        assert_eq!(categorize('\u{200B}'), UnicodeCategory::Format);
        assert_eq!(categorize('\u{E000}'), UnicodeCategory::PrivateUse);
        assert_eq!(categorize('\u{2028}'), UnicodeCategory::LineSeparator);
        assert_eq!(categorize('\u{00AB}'), UnicodeCategory::InitialQuotePunctuation);
        assert_eq!(categorize('\u{20AC}'), UnicodeCategory::CurrencySymbol);
        assert_eq!(categorize('\u{00A9}'), UnicodeCategory::OtherSymbol);
    }

    #[test]
    fn test_decimal_digit_value() {
        assert_eq!(decimal_digit_value('0'), Some(0));
        assert_eq!(decimal_digit_value('9'), Some(9));
        assert_eq!(decimal_digit_value('\u{0669}'), Some(9));
        assert_eq!(decimal_digit_value('\u{FF15}'), Some(5));
        assert_eq!(decimal_digit_value('a'), None);
        assert_eq!(decimal_digit_value('\u{1D7FF}'), Some(9));
        assert_eq!(decimal_digit_value('\u{1E950}'), Some(0));
        assert_eq!(decimal_digit_value('\u{00B2}'), None);
    }

    #[test]
    fn test_categorize_marks() {
        assert_eq!(categorize('\u{0903}'), UnicodeCategory::SpacingCombiningMark);
        assert_eq!(categorize('\u{093F}'), UnicodeCategory::SpacingCombiningMark);
        assert_eq!(categorize('\u{0941}'), UnicodeCategory::NonSpacingMark);
        assert_eq!(categorize('\u{20DD}'), UnicodeCategory::EnclosingMark);
        assert_eq!(categorize('\u{0915}'), UnicodeCategory::OtherLetter);
    }

    #[test]
    fn test_categorize_other_lowercase() {
        assert_eq!(categorize('\u{00AA}'), UnicodeCategory::OtherLetter);
        assert_eq!(categorize('\u{00BA}'), UnicodeCategory::OtherLetter);
        assert_eq!(categorize('\u{02B0}'), UnicodeCategory::ModifierLetter);
        assert_eq!(categorize('\u{0378}'), UnicodeCategory::OtherNotAssigned);
    }

    #[test]
    fn test_group_predicates() {
        assert!(UnicodeCategory::TitlecaseLetter.is_letter());
        assert!(UnicodeCategory::LetterNumber.is_number());
        assert!(UnicodeCategory::LineSeparator.is_separator());
        assert!(UnicodeCategory::FinalQuotePunctuation.is_punctuation());
        assert!(UnicodeCategory::CurrencySymbol.is_symbol());
        assert!(!UnicodeCategory::Control.is_symbol());
    }
}
