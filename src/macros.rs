#![allow(unused_macros)]

/// Generates checked conversions from `f64` to integer types.
///
/// The value is truncated toward zero first. NaN, infinities and values outside the target range
/// yield [`crate::Error::Overflow`].
///
/// ```rust, ignore
/// impl DecimalExt for f64 {
///     checked_conversion! {
///         to_byte => u8,
///         to_int32 => i32,
///     }
/// }
/// ```
macro_rules! checked_conversion {
    ($($(#[$meta:meta])* $name:ident => $target:ty),* $(,)?) => {
        $(
            $(#[$meta])*
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn $name(self) -> crate::Result<$target> {
                let truncated = self.trunc();
                // MAX as f64 may round up for 64 bit targets, so the upper bound is exclusive
                let in_range = truncated >= <$target>::MIN as f64
                    && truncated < <$target>::MAX as f64 + 1.0;
                if in_range {
                    Ok(truncated as $target)
                } else {
                    Err(crate::Error::Overflow {
                        value: self,
                        target: stringify!($target),
                    })
                }
            }
        )*
    };
}
