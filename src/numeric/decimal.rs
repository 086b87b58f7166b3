use crate::{Error, Result};

/// Largest number of fractional digits accepted by the rounding helpers
pub const MAX_ROUNDING_DIGITS: u32 = 28;

/// Beyond this many fractional digits an `f64` carries no further precision
const SIGNIFICANT_DIGITS: u32 = 15;

/// How a value exactly halfway between two candidates is rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MidpointRounding {
    /// Toward the nearest even number (banker's rounding)
    #[default]
    ToEven,
    /// Away from zero
    AwayFromZero,
}

/// Decimal-style arithmetic on `f64`.
///
/// `round`, `abs`, `floor`, `max` and `min` share their names with inherent `f64` methods, which
/// method call syntax prefers. Call them as `DecimalExt::round(value)` to get the decimal
/// semantics (rounding defaults to [`MidpointRounding::ToEven`]).
///
/// Values lying within a few ULPs of a rounding midpoint are treated as exactly on it, so
/// `2.345` rounds like the decimal literal it was written as rather than like its binary
/// approximation.
pub trait DecimalExt: Sized {
    /// Round to an integral value, halfway values go to the even neighbour
    fn round(self) -> f64;

    /// Round to `digits` fractional digits, halfway values go to the even neighbour
    ///
    /// # Errors
    /// Returns [`Error::Argument`] if `digits` exceeds [`MAX_ROUNDING_DIGITS`]
    fn round_digits(self, digits: u32) -> Result<f64>;

    /// Round to an integral value with the given midpoint rule
    fn round_with(self, mode: MidpointRounding) -> f64;

    /// Round to `digits` fractional digits with the given midpoint rule
    ///
    /// # Errors
    /// Returns [`Error::Argument`] if `digits` exceeds [`MAX_ROUNDING_DIGITS`]
    fn round_digits_with(self, digits: u32, mode: MidpointRounding) -> Result<f64>;

    /// Same as [`DecimalExt::round_digits`]
    ///
    /// # Errors
    /// Returns [`Error::Argument`] if `decimal_points` exceeds [`MAX_ROUNDING_DIGITS`]
    fn round_decimal_points(self, decimal_points: u32) -> Result<f64> {
        self.round_digits(decimal_points)
    }

    /// Round to two fractional digits
    fn round_to_two_decimal_points(self) -> f64;

    /// Round to two fractional digits, as a monetary amount
    fn to_money(self) -> f64 {
        self.round_to_two_decimal_points()
    }

    /// Absolute value
    fn abs(self) -> f64;

    /// Smallest integral value greater than or equal to `self`
    fn ceiling(self) -> f64;

    /// Largest integral value less than or equal to `self`
    fn floor(self) -> f64;

    /// Integral part, rounding toward zero
    fn truncate(self) -> f64;

    /// `-1`, `0` or `1` by the sign of `self`. NaN reports `0`.
    fn sign(self) -> i32;

    /// The larger of both values
    fn max(self, other: f64) -> f64;

    /// The smaller of both values
    fn min(self, other: f64) -> f64;

    /// `self / divisor`
    ///
    /// # Errors
    /// Returns [`Error::Argument`] if `divisor` is zero
    fn divide(self, divisor: f64) -> Result<f64>;

    /// `self * multiplier`
    fn multiply(self, multiplier: f64) -> f64;

    /// `self - subtrahend`
    fn subtract(self, subtrahend: f64) -> f64;

    /// The value itself
    fn to_double(self) -> f64;

    /// Nearest `f32`
    fn to_single(self) -> f32;

    /// Truncating conversion to `u8`
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the value does not fit
    fn to_byte(self) -> Result<u8>;

    /// Truncating conversion to `i8`
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the value does not fit
    fn to_sbyte(self) -> Result<i8>;

    /// Truncating conversion to `i16`
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the value does not fit
    fn to_int16(self) -> Result<i16>;

    /// Truncating conversion to `u16`
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the value does not fit
    fn to_uint16(self) -> Result<u16>;

    /// Truncating conversion to `i32`
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the value does not fit
    fn to_int32(self) -> Result<i32>;

    /// Truncating conversion to `u32`
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the value does not fit
    fn to_uint32(self) -> Result<u32>;

    /// Truncating conversion to `i64`
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the value does not fit
    fn to_int64(self) -> Result<i64>;

    /// Truncating conversion to `u64`
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the value does not fit
    fn to_uint64(self) -> Result<u64>;

    /// OLE Automation currency: the value scaled by 10 000, rounded to an integer
    ///
    /// # Errors
    /// Returns [`Error::Overflow`] if the scaled value does not fit an `i64`
    fn to_oa_currency(self) -> Result<i64>;

    /// Two fractional digits with the integral part grouped in fours: `"9 8765 4321.00"`
    fn to_chinese_format_n(self) -> String;

    /// As [`DecimalExt::to_chinese_format_n`] with a leading yuan sign: `"¥9 8765 4321.00"`
    fn to_chinese_format_c(self) -> String;
}

/// Snap values a few ULPs away from a `.5` midpoint onto it
fn snap_to_midpoint(value: f64) -> f64 {
    let nearest_half = (value * 2.0).round() / 2.0;
    let is_midpoint = nearest_half.fract().abs() == 0.5;
    if is_midpoint && (value - nearest_half).abs() <= value.abs() * f64::EPSILON * 4.0 {
        nearest_half
    } else {
        value
    }
}

fn round_integral(value: f64, mode: MidpointRounding) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let value = snap_to_midpoint(value);
    match mode {
        MidpointRounding::ToEven => value.round_ties_even(),
        MidpointRounding::AwayFromZero => value.round(),
    }
}

fn round_fraction(value: f64, digits: u32, mode: MidpointRounding) -> Result<f64> {
    if digits > MAX_ROUNDING_DIGITS {
        return Err(argument_error!(
            "Rounding digits must be between 0 and {}, got {}",
            MAX_ROUNDING_DIGITS,
            digits
        ));
    }
    if digits > SIGNIFICANT_DIGITS || !value.is_finite() {
        return Ok(value);
    }

    let scale = 10_f64.powi(digits as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return Ok(value);
    }
    Ok(round_integral(scaled, mode) / scale)
}

/// Group the integral digits of `value` in fours, two fractional digits
fn group_by_four(value: f64) -> String {
    let rounded = round_integral(value * 100.0, MidpointRounding::AwayFromZero) / 100.0;
    let formatted = format!("{:.2}", rounded.abs());
    let (integral, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let digits: Vec<char> = integral.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 4 + 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 4 == 0 {
            grouped.push(' ');
        }
        grouped.push(*digit);
    }
    grouped.push('.');
    grouped.push_str(fraction);
    grouped
}

impl DecimalExt for f64 {
    fn round(self) -> f64 {
        round_integral(self, MidpointRounding::ToEven)
    }

    fn round_digits(self, digits: u32) -> Result<f64> {
        round_fraction(self, digits, MidpointRounding::ToEven)
    }

    fn round_with(self, mode: MidpointRounding) -> f64 {
        round_integral(self, mode)
    }

    fn round_digits_with(self, digits: u32, mode: MidpointRounding) -> Result<f64> {
        round_fraction(self, digits, mode)
    }

    fn round_to_two_decimal_points(self) -> f64 {
        let scaled = round_integral(self * 100.0, MidpointRounding::ToEven);
        scaled / 100.0
    }

    fn abs(self) -> f64 {
        f64::abs(self)
    }

    fn ceiling(self) -> f64 {
        self.ceil()
    }

    fn floor(self) -> f64 {
        f64::floor(self)
    }

    fn truncate(self) -> f64 {
        self.trunc()
    }

    fn sign(self) -> i32 {
        if self > 0.0 {
            1
        } else if self < 0.0 {
            -1
        } else {
            0
        }
    }

    fn max(self, other: f64) -> f64 {
        f64::max(self, other)
    }

    fn min(self, other: f64) -> f64 {
        f64::min(self, other)
    }

    fn divide(self, divisor: f64) -> Result<f64> {
        if divisor == 0.0 {
            return Err(argument_error!("Attempted to divide {} by zero", self));
        }
        Ok(self / divisor)
    }

    fn multiply(self, multiplier: f64) -> f64 {
        self * multiplier
    }

    fn subtract(self, subtrahend: f64) -> f64 {
        self - subtrahend
    }

    fn to_double(self) -> f64 {
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    fn to_single(self) -> f32 {
        self as f32
    }

    checked_conversion! {
        to_byte => u8,
        to_sbyte => i8,
        to_int16 => i16,
        to_uint16 => u16,
        to_int32 => i32,
        to_uint32 => u32,
        to_int64 => i64,
        to_uint64 => u64,
    }

    fn to_oa_currency(self) -> Result<i64> {
        let scaled = round_integral(self * 10_000.0, MidpointRounding::ToEven);
        scaled.to_int64().map_err(|_| Error::Overflow {
            value: self,
            target: "OA currency",
        })
    }

    fn to_chinese_format_n(self) -> String {
        let grouped = group_by_four(self);
        if self.is_sign_negative() && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
            format!("-{grouped}")
        } else {
            grouped
        }
    }

    fn to_chinese_format_c(self) -> String {
        let grouped = group_by_four(self);
        if self.is_sign_negative() && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
            format!("¥-{grouped}")
        } else {
            format!("¥{grouped}")
        }
    }
}

/// Absolute values of every element
pub fn abs_all<I>(values: I) -> impl Iterator<Item = f64>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().map(f64::abs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_even() {
        assert_eq!(DecimalExt::round(2.5_f64), 2.0_f64);
        assert_eq!(DecimalExt::round(3.5_f64), 4.0_f64);
        assert_eq!(DecimalExt::round(-2.5_f64), -2.0_f64);
        assert_eq!(DecimalExt::round(2.6_f64), 3.0_f64);
        assert_eq!(2.5_f64.round_with(MidpointRounding::AwayFromZero), 3.0_f64);
        assert_eq!((-2.5_f64).round_with(MidpointRounding::AwayFromZero), -3.0_f64);
    }

    #[test]
    fn test_round_digits() {
        assert_eq!(2.345_f64.round_digits(2).unwrap(), 2.34_f64);
        assert_eq!(
            2.345_f64
                .round_digits_with(2, MidpointRounding::AwayFromZero)
                .unwrap(),
            2.35_f64
        );
        assert_eq!(1.005_f64.round_decimal_points(2).unwrap(), 1.0_f64);
        assert_eq!(1.2345_f64.round_digits(0).unwrap(), 1.0_f64);
        assert_eq!(0.1_f64.round_digits(20).unwrap(), 0.1_f64);
        assert!(matches!(1.0_f64.round_digits(29), Err(Error::Argument { .. })));
    }

    #[test]
    fn test_money() {
        assert_eq!(12.345_f64.to_money(), 12.34_f64);
        assert_eq!(12.355_f64.round_to_two_decimal_points(), 12.36_f64);
        assert_eq!(7.0_f64.to_money(), 7.0_f64);
    }

    #[test]
    fn test_forwarding() {
        assert_eq!(DecimalExt::abs(-3.25_f64), 3.25_f64);
        assert_eq!(1.2_f64.ceiling(), 2.0_f64);
        assert_eq!(DecimalExt::floor(-1.2_f64), -2.0_f64);
        assert_eq!((-1.7_f64).truncate(), -1.0_f64);
        assert_eq!((-0.1_f64).sign(), -1);
        assert_eq!(0.0_f64.sign(), 0);
        assert_eq!(f64::NAN.sign(), 0);
        assert_eq!(DecimalExt::max(1.0_f64, 2.0_f64), 2.0_f64);
        assert_eq!(DecimalExt::min(1.0_f64, 2.0_f64), 1.0_f64);
        assert_eq!(6.0_f64.multiply(7.0_f64), 42.0_f64);
        assert_eq!(6.0_f64.subtract(7.0_f64), -1.0_f64);
        assert_eq!(1.5_f64.to_double(), 1.5_f64);
        assert_eq!(1.5_f64.to_single(), 1.5_f32);
    }

    #[test]
    fn test_divide() {
        assert_eq!(9.0_f64.divide(3.0_f64).unwrap(), 3.0_f64);
        assert!(matches!(1.0_f64.divide(0.0_f64), Err(Error::Argument { .. })));
    }

    #[test]
    fn test_checked_conversions() {
        assert_eq!(255.9_f64.to_byte().unwrap(), 255);
        assert!(matches!(
            256.0_f64.to_byte(),
            Err(Error::Overflow { target: "u8", .. })
        ));
        assert!((-1.0_f64).to_byte().is_err());
        assert_eq!((-0.9_f64).to_byte().unwrap(), 0);
        assert_eq!((-128.5_f64).to_sbyte().unwrap(), -128);
        assert_eq!(65_535.0_f64.to_uint16().unwrap(), u16::MAX);
        assert_eq!((-2_147_483_648.0_f64).to_int32().unwrap(), i32::MIN);
        assert!(2_147_483_648.0_f64.to_int32().is_err());
        assert!(9.3e18_f64.to_int64().is_err());
        assert!(f64::NAN.to_uint64().is_err());
        assert!(f64::INFINITY.to_int16().is_err());
        assert_eq!(4_294_967_295.0_f64.to_uint32().unwrap(), u32::MAX);
    }

    #[test]
    fn test_oa_currency() {
        assert_eq!(1.2345_f64.to_oa_currency().unwrap(), 12_345);
        assert_eq!((-0.5_f64).to_oa_currency().unwrap(), -5_000);
        assert!(1e20_f64.to_oa_currency().is_err());
    }

    #[test]
    fn test_chinese_format() {
        assert_eq!(987_654_321.0_f64.to_chinese_format_n(), "9 8765 4321.00");
        assert_eq!(987_654_321.0_f64.to_chinese_format_c(), "¥9 8765 4321.00");
        assert_eq!(1234.5_f64.to_chinese_format_n(), "1234.50");
        assert_eq!(12_345.678_f64.to_chinese_format_n(), "1 2345.68");
        assert_eq!(0.0_f64.to_chinese_format_n(), "0.00");
        assert_eq!((-54_321.0_f64).to_chinese_format_n(), "-5 4321.00");
        assert_eq!((-54_321.0_f64).to_chinese_format_c(), "¥-5 4321.00");
    }

    #[test]
    fn test_abs_all() {
        let values: Vec<f64> = abs_all(vec![-1.0_f64, 2.0_f64, -3.5_f64]).collect();
        assert_eq!(values, vec![1.0_f64, 2.0_f64, 3.5_f64]);
    }
}
