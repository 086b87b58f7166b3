//! # pure-ext Prelude
//!
//! Re-exports the commonly used types and the extension traits, so one glob import brings every
//! extension method into scope.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all pure-ext operations
pub use crate::Error;

/// The result type used throughout pure-ext
pub use crate::Result;

// ================================================================================================
// Caching
// ================================================================================================

/// Concurrent get-or-create cache and its configuration
pub use crate::cache::{CacheConfig, MemoryCache};

/// Cache values derived from a receiver
pub use crate::cache::FromCache;

// ================================================================================================
// Value Helpers
// ================================================================================================

/// Flag, display name and description helpers for enums
pub use crate::enums::{Description, DisplayString, FlagsExt};

/// Numeric, character and UTF-16 helpers
pub use crate::numeric::{CharExt, DecimalExt, MidpointRounding, UnicodeCategory, Utf16Ext};

/// Range checks, comparers and default-value helpers
pub use crate::comparable::{
    AscendingComparer, ComparableExt, Comparer, DescendingComparer, MembershipExt, ValueExt,
};

/// Cultures and their tags
pub use crate::cultures::Culture;

/// Paged lists
pub use crate::collections::{PagedList, PagedVec, TypedPagedList};

// ================================================================================================
// Type System
// ================================================================================================

/// Registry, descriptors and configuration
pub use crate::typesystem::{
    TypeDescriptor, TypeFlavor, TypeRc, TypeRegistry, TypeSystemConfig, WellKnownType,
};

/// Builders for types and members
pub use crate::typesystem::{
    ConstructorBuilder, EventBuilder, FieldBuilder, MethodBuilder, PropertyBuilder, TypeBuilder,
};

/// Queries over registered types
pub use crate::typesystem::{AttributeProvider, Declaration, TypeExt};
