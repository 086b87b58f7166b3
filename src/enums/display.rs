use strum::{EnumMessage, EnumProperty};

use crate::{Error, Result};

/// Name of the strum property holding a display string
pub const DISPLAY_PROPERTY: &str = "display";

/// A human readable name attached to an enum variant with `#[strum(props(display = "..."))]`.
///
/// Variants without the property fall back to their plain name.
///
/// ```rust
/// use pure_ext::enums::DisplayString;
/// use strum::{AsRefStr, EnumProperty};
///
/// #[derive(AsRefStr, EnumProperty)]
/// enum OperatingSystem {
///     #[strum(props(display = "MS-DOS"))]
///     Msdos,
///     #[strum(props(display = "Windows XP"))]
///     Xp,
///     Linux,
/// }
///
/// assert_eq!(OperatingSystem::Msdos.display_string(), "MS-DOS");
/// assert_eq!(OperatingSystem::Xp.display_string(), "Windows XP");
/// assert_eq!(OperatingSystem::Linux.display_string(), "Linux");
/// ```
pub trait DisplayString {
    /// The display string, or the variant name if there is none
    fn display_string(&self) -> &str;
}

impl<T> DisplayString for T
where
    T: EnumProperty + AsRef<str>,
{
    fn display_string(&self) -> &str {
        match self.get_str(DISPLAY_PROPERTY) {
            Some(display) => display,
            None => self.as_ref(),
        }
    }
}

/// The description attached to an enum variant with `#[strum(message = "...")]`
pub trait Description {
    /// The description of this variant
    ///
    /// # Errors
    /// Returns [`Error::MissingDescription`] if the variant has none
    fn description(&self) -> Result<&'static str>;
}

impl<T> Description for T
where
    T: EnumMessage + AsRef<str>,
{
    fn description(&self) -> Result<&'static str> {
        self.get_message()
            .ok_or_else(|| Error::MissingDescription(self.as_ref().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use strum::{AsRefStr, EnumIter, EnumMessage, EnumProperty, IntoEnumIterator};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, AsRefStr, EnumIter, EnumMessage, EnumProperty)]
    enum Status {
        #[strum(message = "Waiting for review", props(display = "In Review"))]
        Pending,
        #[strum(message = "Merged into main")]
        Done,
        Abandoned,
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Status::Pending.display_string(), "In Review");
        assert_eq!(Status::Done.display_string(), "Done");
        assert_eq!(Status::Abandoned.display_string(), "Abandoned");
    }

    #[test]
    fn test_description() {
        assert_eq!(Status::Pending.description().unwrap(), "Waiting for review");
        assert_eq!(Status::Done.description().unwrap(), "Merged into main");
        assert!(matches!(
            Status::Abandoned.description(),
            Err(Error::MissingDescription(ref name)) if name == "Abandoned"
        ));
    }

    #[test]
    fn test_display_string_is_stable() {
        for status in Status::iter() {
            assert_eq!(status.display_string(), status.display_string());
        }
    }
}
