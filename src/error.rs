use thiserror::Error;

use crate::typesystem::Token;

macro_rules! argument_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Argument {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Argument {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Precondition violations (a non-interface passed where an interface is required, an open
/// generic definition closed with the wrong number of arguments, ...) are reported immediately.
/// Failures raised by user supplied closures (cache factories, constructors, member getters) are
/// propagated unchanged.
///
/// # Error Categories
///
/// ## Argument Errors
/// - [`Error::Argument`] - A precondition on an argument was violated
/// - [`Error::NotInterfaceType`] - An interface type was required
///
/// ## Type System Errors
/// - [`Error::TypeInsert`] - Failed to register a new type in the registry
/// - [`Error::TypeNotFound`] - Requested type not found in the registry
/// - [`Error::MissingConstructor`] - No constructor matches the activation request
/// - [`Error::Activation`] - The type can not be instantiated at all
/// - [`Error::RecursionLimit`] - Maximum recursion depth exceeded
///
/// ## Value Errors
/// - [`Error::InvalidCast`] - A stored or created value has an unexpected type
/// - [`Error::MissingDescription`] - An enum variant carries no description
/// - [`Error::Overflow`] - A numeric conversion does not fit the target type
/// - [`Error::InvalidSurrogatePair`] - Two UTF-16 units do not form a surrogate pair
///
/// # Examples
///
/// ```rust
/// use pure_ext::{Error, MemoryCache};
///
/// let cache = MemoryCache::new();
/// cache.add_or_get_existing("answer", 42_u32)?;
///
/// match cache.add_or_get_existing("answer", String::from("42")) {
///     Err(Error::InvalidCast { key, .. }) => assert_eq!(key, "answer"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// # Ok::<(), pure_ext::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A precondition on an argument was violated.
    ///
    /// The error includes the source location where the violation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the violated precondition
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Argument - {file}:{line}: {message}")]
    Argument {
        /// The message to be printed for the Argument error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The supplied type is not an interface.
    ///
    /// Raised by the interface queries of [`crate::typesystem::TypeExt`]. The associated value is
    /// the full name of the offending type.
    #[error("Type '{0}' is not an interface type")]
    NotInterfaceType(String),

    /// Failed to insert new type into the `TypeRegistry`.
    #[error("Failed to insert new type into TypeRegistry - {0}")]
    TypeInsert(Token),

    /// Failed to find type in the `TypeRegistry`.
    #[error("Failed to find type in TypeRegistry - {0}")]
    TypeNotFound(Token),

    /// No constructor of the type accepts the supplied arguments.
    #[error("No constructor on '{type_name}' accepts {arity} argument(s)")]
    MissingConstructor {
        /// Full name of the type that was activated
        type_name: String,
        /// Number of arguments supplied
        arity: usize,
    },

    /// The type can not be instantiated (abstract, interface, open generic, ...).
    #[error("Cannot create an instance of '{0}'")]
    Activation(String),

    /// A value does not have the requested type.
    ///
    /// Raised when a cache key is read back with another value type than it was stored with, or
    /// when an activated instance can not be cast to the requested type.
    #[error("Value for '{key}' is not of type {expected}")]
    InvalidCast {
        /// Cache key or type name the value belongs to
        key: String,
        /// The requested Rust type
        expected: &'static str,
    },

    /// The enum variant has no description attached.
    #[error("Variant '{0}' has no description")]
    MissingDescription(String),

    /// A numeric conversion overflowed the target type.
    #[error("Value {value} was either too large or too small for {target}")]
    Overflow {
        /// The value that was converted
        value: f64,
        /// The target type of the conversion
        target: &'static str,
    },

    /// The two UTF-16 code units are not a high/low surrogate pair.
    #[error("Invalid surrogate pair 0x{0:04x} 0x{1:04x}")]
    InvalidSurrogatePair(u16, u16),

    /// Recursion limit reached.
    ///
    /// To prevent unbounded recursion during hierarchy walks and generic instantiation, a
    /// maximum depth is enforced (see [`crate::TypeSystemConfig`]). The associated value shows
    /// the limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}
