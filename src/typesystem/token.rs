//! Tokens identifying types and members inside a [`crate::typesystem::TypeRegistry`].
//!
//! A token is a 32-bit value. The high byte names the kind of entry (type definition, type
//! specification, method, ...), the low 24 bits are a per-kind row number handed out by the
//! registry. Well-known types use the reserved `0xF0` kind.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A token representing a reference to a registry entry.
///
/// - The high byte (bits 24-31) indicates the kind of entry
/// - The low 24 bits (bits 0-23) indicate the row within that kind
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token of the given kind and row
    #[must_use]
    pub fn from_parts(kind: TokenKind, row: u32) -> Self {
        Token(((kind as u32) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the kind byte from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if this token belongs to one of the seeded well-known types
    #[must_use]
    pub fn is_well_known(&self) -> bool {
        self.table() == TokenKind::WellKnown as u8
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// The kind of registry entry a token refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// A user defined type
    TypeDef = 0x02,
    /// A field
    Field = 0x04,
    /// A method or constructor
    Method = 0x06,
    /// A method parameter
    Param = 0x08,
    /// An event
    Event = 0x14,
    /// A property
    Property = 0x17,
    /// A constructed type (closed generic, array, generic parameter)
    TypeSpec = 0x1B,
    /// A type seeded by the registry itself
    WellKnown = 0xF0,
}
