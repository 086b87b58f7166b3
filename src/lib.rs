// Copyright 2025 Pure.Ext Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # pure-ext
//!
//! A collection of extension helpers in pure Rust: a get-or-create cache wrapper, enum flag and
//! display-name helpers, decimal-style numeric wrappers, `char` and UTF-16 helpers, a culture tag
//! table, paged lists, range checks and a reflection-style type system over an explicit registry.
//!
//! ## Features
//!
//! - **Caching** - Get-or-create values by key in a concurrent in-process cache, with optional
//!   absolute expiration and automatically derived keys
//! - **Enums** - Set, clear and test flags of any `bitflags` type, read display names and
//!   descriptions declared with `strum`
//! - **Numerics** - Banker's rounding, checked conversions and Chinese digit grouping on `f64`,
//!   Unicode categories and culture-aware casing on `char`, surrogate handling on `u16`
//! - **Cultures** - 225 cultures with their tags
//! - **Type system** - Base type walks, interface checks, generic closing, nullable and numeric
//!   queries, activation and C#-style declarations over registered types
//!
//! ## Quick Start
//!
//! ```rust
//! use pure_ext::prelude::*;
//!
//! // Cache a computed value under a key
//! let cache = MemoryCache::new();
//! let first = cache.add_or_get_existing_with("answer", |_| 6 * 7)?;
//! let second = cache.add_or_get_existing_with("answer", |_| 0)?;
//! assert_eq!(*first, 42);
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//!
//! // Exclusive and inclusive range checks
//! assert!(5.between(1, 10));
//! assert!(!1.between(1, 10));
//! assert!(1.in_range(1, 10));
//!
//! // Culture tags
//! assert_eq!(Culture::JapaneseJapan.tag(), "ja-JP");
//! # Ok::<(), pure_ext::Error>(())
//! ```
//!
//! ### Type introspection
//!
//! ```rust
//! use pure_ext::prelude::*;
//!
//! let registry = TypeRegistry::new()?;
//! let int32 = registry.well_known(WellKnownType::Int32)?;
//! let nullable = registry.get_nullable_type(&int32)?;
//!
//! assert!(nullable.is_nullable_type());
//! assert!(nullable.is_numeric_type());
//! assert_eq!(nullable.declaration(), "int?");
//! # Ok::<(), pure_ext::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`cache`] - [`MemoryCache`] and the [`cache::FromCache`] extension
//! - [`enums`] - Flag, display name and description helpers
//! - [`numeric`] - `f64`, `char` and `u16` helpers
//! - [`cultures`] - The [`cultures::Culture`] table
//! - [`collections`] - Paged lists
//! - [`comparable`] - Range checks, comparers and default-value helpers
//! - [`typesystem`] - The type registry and its queries
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! Precondition violations fail immediately with a descriptive [`Error`]. Failures raised by
//! caller supplied closures propagate unchanged.
//!
//! ```rust
//! use pure_ext::{Error, numeric::DecimalExt};
//!
//! match 300.0_f64.to_byte() {
//!     Ok(value) => println!("fits: {}", value),
//!     Err(Error::Overflow { target, .. }) => println!("does not fit into {}", target),
//!     Err(e) => println!("other error: {}", e),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate reports through the [`log`](https://docs.rs/log) facade and installs no logger.
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use pure_ext::prelude::*;
///
/// assert!(3.is_in(&[1, 2, 3]));
/// assert_eq!(DecimalExt::round(2.5_f64), 2.0);
/// ```
pub mod prelude;

/// Get-or-create caching over a concurrent in-process cache
pub mod cache;

/// Paged lists
pub mod collections;

/// Range checks, comparers and default-value helpers
pub mod comparable;

/// Cultures and their tags
pub mod cultures;

/// Enum flag, display name and description helpers
pub mod enums;

/// Numeric, character and UTF-16 helpers
pub mod numeric;

/// Reflection-style type system over an explicit registry
///
/// See the module documentation for the building blocks and [`typesystem::TypeExt`] for the
/// queries.
pub mod typesystem;

/// `pure-ext` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `pure-ext` Error type
///
/// The error type for all fallible operations in this crate.
pub use error::Error;

/// The process-wide cache and its configuration.
///
/// See [`cache::MemoryCache`].
pub use cache::{CacheConfig, MemoryCache};

/// Limits of the type system.
///
/// See [`typesystem::TypeSystemConfig`].
pub use typesystem::{TypeRegistry, TypeSystemConfig};
