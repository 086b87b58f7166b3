//! Type, method and field attribute flags.
//!
//! The values follow the layout the CLI uses for `TypeAttributes`, `MethodAttributes` and
//! `FieldAttributes`, split into logical groups the same way: an access part that is an
//! enumerated value inside a mask, and a modifier part that is a true bitmask.
//!
//! # Key Types
//! - [`TypeAttributes`]: visibility, layout and semantics of a type
//! - [`MethodAccessFlags`], [`MethodModifiers`]: method visibility and modifiers
//! - [`FieldAttributes`]: field visibility and modifiers
//! - [`ParamModifier`]: how a parameter is passed

use bitflags::bitflags;

/// Bitmask for `ACCESS` state extraction
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for type visibility extraction
pub const TYPE_VISIBILITY_MASK: u32 = 0x0007;
/// Bitmask for field access extraction
pub const FIELD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Type attribute flags
    pub struct TypeAttributes: u32 {
        /// Type is not visible outside its assembly
        const NOT_PUBLIC = 0x0000_0000;
        /// Type is visible everywhere
        const PUBLIC = 0x0000_0001;
        /// Nested type with public visibility
        const NESTED_PUBLIC = 0x0000_0002;
        /// Nested type with private visibility
        const NESTED_PRIVATE = 0x0000_0003;
        /// Type is an interface
        const INTERFACE = 0x0000_0020;
        /// Type is abstract
        const ABSTRACT = 0x0000_0080;
        /// Type can not be derived from
        const SEALED = 0x0000_0100;
        /// Name is special
        const SPECIAL_NAME = 0x0000_0400;
        /// Type is serializable
        const SERIALIZABLE = 0x0000_2000;
    }
}

impl TypeAttributes {
    /// Extract the visibility part of the flags
    #[must_use]
    pub fn visibility(&self) -> Self {
        Self::from_bits_truncate(self.bits() & TYPE_VISIBILITY_MASK)
    }

    /// Returns true if the visibility part is `PUBLIC` or `NESTED_PUBLIC`
    #[must_use]
    pub fn is_public(&self) -> bool {
        let visibility = self.visibility();
        visibility == Self::PUBLIC || visibility == Self::NESTED_PUBLIC
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let access = flags & METHOD_ACCESS_MASK;
        Self::from_bits_truncate(access)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Field attribute flags
    pub struct FieldAttributes: u32 {
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessibly by anyone in the Assembly
        const ASSEMBLY = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field can only be initialized, not written to after init
        const INIT_ONLY = 0x0020;
        /// Value is a compile time constant
        const LITERAL = 0x0040;
    }
}

impl FieldAttributes {
    /// Extract the access part of the flags
    #[must_use]
    pub fn access(&self) -> Self {
        Self::from_bits_truncate(self.bits() & FIELD_ACCESS_MASK)
    }
}

/// How a parameter is passed to a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamModifier {
    /// Passed by value
    #[default]
    None,
    /// Passed by reference (`ref`)
    Ref,
    /// Output parameter (`out`)
    Out,
    /// Read-only reference (`in`)
    In,
    /// Variable argument list (`params`)
    Params,
}

impl ParamModifier {
    /// The keyword used in a declaration, if any
    #[must_use]
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            ParamModifier::None => None,
            ParamModifier::Ref => Some("ref"),
            ParamModifier::Out => Some("out"),
            ParamModifier::In => Some("in"),
            ParamModifier::Params => Some("params"),
        }
    }
}
