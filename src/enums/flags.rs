use bitflags::Flags;

/// Set, clear and test flags on any `bitflags` type.
///
/// Unknown bits survive every operation, only the listed flags are touched.
///
/// ```rust
/// use bitflags::bitflags;
/// use pure_ext::enums::FlagsExt;
///
/// bitflags! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     struct Access: u8 {
///         const READ = 0x1;
///         const WRITE = 0x2;
///         const EXECUTE = 0x4;
///     }
/// }
///
/// let access = Access::READ.set_flags(&[Access::WRITE, Access::EXECUTE]);
/// assert!(access.has_flags(&[Access::READ, Access::EXECUTE]));
/// assert_eq!(access.clear_flag(Access::WRITE), Access::READ | Access::EXECUTE);
/// ```
pub trait FlagsExt: Flags + Copy {
    /// Returns `self` with `flag` set
    #[must_use]
    fn set_flag(self, flag: Self) -> Self {
        self.set_flags(&[flag])
    }

    /// Returns `self` with every flag in `flags` set
    #[must_use]
    fn set_flags(self, flags: &[Self]) -> Self {
        flags.iter().fold(self, |result, flag| result.union(*flag))
    }

    /// Returns `self` with `flag` removed
    #[must_use]
    fn clear_flag(self, flag: Self) -> Self {
        self.clear_flags(&[flag])
    }

    /// Returns `self` with every flag in `flags` removed
    #[must_use]
    fn clear_flags(self, flags: &[Self]) -> Self {
        flags
            .iter()
            .fold(self, |result, flag| result.difference(*flag))
    }

    /// Check that every flag in `flags` is a single named flag of the type and is set on `self`.
    ///
    /// Combined values and bits without a name never count as set.
    fn has_flags(&self, flags: &[Self]) -> bool {
        flags.iter().all(|flag| {
            let named = Self::FLAGS
                .iter()
                .any(|named| named.value().bits() == flag.bits());
            named && self.contains(*flag)
        })
    }
}

impl<T: Flags + Copy> FlagsExt for T {}

#[cfg(test)]
mod tests {
    use bitflags::bitflags;

    use super::*;

    bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Permissions: u32 {
            const READ = 0x1;
            const WRITE = 0x2;
            const DELETE = 0x4;
        }
    }

    #[test]
    fn test_set_and_clear() {
        let permissions = Permissions::empty().set_flag(Permissions::READ);
        assert_eq!(permissions, Permissions::READ);

        let permissions = permissions.set_flags(&[Permissions::WRITE, Permissions::DELETE]);
        assert_eq!(permissions, Permissions::all());

        let permissions = permissions.clear_flags(&[Permissions::READ, Permissions::DELETE]);
        assert_eq!(permissions, Permissions::WRITE);
        assert_eq!(permissions.clear_flag(Permissions::WRITE), Permissions::empty());
    }

    #[test]
    fn test_unknown_bits_are_kept() {
        let raw = Permissions::from_bits_retain(0x81);
        let cleared = raw.clear_flag(Permissions::READ);
        assert_eq!(cleared.bits(), 0x80);
        assert_eq!(cleared.set_flag(Permissions::WRITE).bits(), 0x82);
    }

    #[test]
    fn test_has_flags() {
        let permissions = Permissions::READ | Permissions::WRITE;
        assert!(permissions.has_flags(&[Permissions::READ]));
        assert!(permissions.has_flags(&[Permissions::READ, Permissions::WRITE]));
        assert!(!permissions.has_flags(&[Permissions::DELETE]));
        assert!(permissions.has_flags(&[]));

        // combined and unnamed values are not single defined flags
        assert!(!permissions.has_flags(&[Permissions::READ | Permissions::WRITE]));
        assert!(!permissions.has_flags(&[Permissions::from_bits_retain(0x10)]));
    }
}
