use std::sync::{Arc, Weak};

use strum::{Display, EnumIter};

use crate::typesystem::{Token, TokenKind, TypeDescriptor, TypeRc};

/// A vector that holds `TypeRef` instances (weak references)
pub type TypeRefList = Arc<boxcar::Vec<TypeRef>>;

/// A smart reference to a `TypeDescriptor` that holds a weak reference, so that cyclic
/// relations (a type whose interface mentions the type itself, members pointing at their
/// declaring type) do not leak. The owning [`crate::typesystem::TypeRegistry`] keeps every
/// descriptor alive.
#[derive(Clone, Debug)]
pub struct TypeRef {
    weak_ref: Weak<TypeDescriptor>,
}

impl TypeRef {
    /// Create a new `TypeRef` from a strong reference
    pub fn new(strong_ref: &TypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<TypeRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the token of the referenced type (if still alive)
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.upgrade().map(|t| t.token)
    }

    /// Get the name of the referenced type (if still alive)
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|t| t.name.clone())
    }
}

impl From<TypeRc> for TypeRef {
    fn from(strong_ref: TypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

impl From<&TypeRc> for TypeRef {
    fn from(strong_ref: &TypeRc) -> Self {
        Self::new(strong_ref)
    }
}

#[allow(missing_docs)]
/// The shape of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFlavor {
    // Base primitive types
    Void,
    Boolean,
    Char,
    I1,
    U1,
    I2,
    U2,
    I4,
    U4,
    I8,
    U8,
    R4,
    R8,
    I,
    U,
    Decimal,
    DateTime,
    Object,
    String,

    // Complex types
    Array {
        /// The rank (number of dimensions)
        rank: u32,
    },
    Pointer,
    ByRef,
    GenericParameter {
        /// Index in the generic parameters list
        index: u32,
        /// Whether it's a method parameter (true) or type parameter (false)
        method: bool,
    },

    // Type categories
    Class,
    ValueType,
    Interface,
    Enum,

    // Fallback
    Unknown,
}

impl TypeFlavor {
    /// Check if this is a runtime primitive (`IsPrimitive`: booleans, chars, integers, floats
    /// and native integers; not decimal, string or object)
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TypeFlavor::Boolean
                | TypeFlavor::Char
                | TypeFlavor::I1
                | TypeFlavor::U1
                | TypeFlavor::I2
                | TypeFlavor::U2
                | TypeFlavor::I4
                | TypeFlavor::U4
                | TypeFlavor::I8
                | TypeFlavor::U8
                | TypeFlavor::R4
                | TypeFlavor::R8
                | TypeFlavor::I
                | TypeFlavor::U
        )
    }

    /// Check if this is a value type
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        self.is_primitive()
            || matches!(
                self,
                TypeFlavor::Decimal
                    | TypeFlavor::DateTime
                    | TypeFlavor::ValueType
                    | TypeFlavor::Enum
            )
    }

    /// Check if this is a reference type
    #[must_use]
    pub fn is_reference_type(&self) -> bool {
        matches!(
            self,
            TypeFlavor::Object
                | TypeFlavor::String
                | TypeFlavor::Class
                | TypeFlavor::Interface
                | TypeFlavor::Array { .. }
        )
    }

    /// The type code of a flavor. Enumerations report `Int32` here, the descriptor replaces
    /// it with the code of the actual underlying type.
    #[must_use]
    pub fn type_code(&self) -> TypeCode {
        match self {
            TypeFlavor::Boolean => TypeCode::Boolean,
            TypeFlavor::Char => TypeCode::Char,
            TypeFlavor::I1 => TypeCode::SByte,
            TypeFlavor::U1 => TypeCode::Byte,
            TypeFlavor::I2 => TypeCode::Int16,
            TypeFlavor::U2 => TypeCode::UInt16,
            TypeFlavor::I4 | TypeFlavor::Enum => TypeCode::Int32,
            TypeFlavor::U4 => TypeCode::UInt32,
            TypeFlavor::I8 => TypeCode::Int64,
            TypeFlavor::U8 => TypeCode::UInt64,
            TypeFlavor::R4 => TypeCode::Single,
            TypeFlavor::R8 => TypeCode::Double,
            TypeFlavor::Decimal => TypeCode::Decimal,
            TypeFlavor::DateTime => TypeCode::DateTime,
            TypeFlavor::String => TypeCode::String,
            _ => TypeCode::Object,
        }
    }
}

/// Classification of a type by its underlying runtime kind
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum TypeCode {
    Empty,
    Object,
    DBNull,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    DateTime,
    String,
}

impl TypeCode {
    /// `Char` through `Decimal`: the character kind counts as numeric
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        (TypeCode::Char..=TypeCode::Decimal).contains(self)
    }
}

/// The types every registry is seeded with.
///
/// The declaration order is the initialization order: a base always precedes the types
/// deriving from it.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum WellKnownType {
    Object,
    ValueType,
    Enum,
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    IntPtr,
    UIntPtr,
    Decimal,
    DateTime,
    String,
    Array,
    Nullable,
    Enumerable,
    GenericEnumerable,
}

impl WellKnownType {
    /// The fixed token of this type
    #[must_use]
    pub fn token(&self) -> Token {
        Token::from_parts(TokenKind::WellKnown, *self as u32 + 1)
    }

    /// The namespace of this type
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        match self {
            WellKnownType::Enumerable => "System.Collections",
            WellKnownType::GenericEnumerable => "System.Collections.Generic",
            _ => "System",
        }
    }

    /// The name of this type
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            WellKnownType::Object => "Object",
            WellKnownType::ValueType => "ValueType",
            WellKnownType::Enum => "Enum",
            WellKnownType::Void => "Void",
            WellKnownType::Boolean => "Boolean",
            WellKnownType::Char => "Char",
            WellKnownType::SByte => "SByte",
            WellKnownType::Byte => "Byte",
            WellKnownType::Int16 => "Int16",
            WellKnownType::UInt16 => "UInt16",
            WellKnownType::Int32 => "Int32",
            WellKnownType::UInt32 => "UInt32",
            WellKnownType::Int64 => "Int64",
            WellKnownType::UInt64 => "UInt64",
            WellKnownType::Single => "Single",
            WellKnownType::Double => "Double",
            WellKnownType::IntPtr => "IntPtr",
            WellKnownType::UIntPtr => "UIntPtr",
            WellKnownType::Decimal => "Decimal",
            WellKnownType::DateTime => "DateTime",
            WellKnownType::String => "String",
            WellKnownType::Array => "Array",
            WellKnownType::Nullable => "Nullable`1",
            WellKnownType::Enumerable => "IEnumerable",
            WellKnownType::GenericEnumerable => "IEnumerable`1",
        }
    }

    /// The flavor of this type
    #[must_use]
    pub fn flavor(&self) -> TypeFlavor {
        match self {
            WellKnownType::Object => TypeFlavor::Object,
            WellKnownType::ValueType | WellKnownType::Enum | WellKnownType::Array => {
                TypeFlavor::Class
            }
            WellKnownType::Void => TypeFlavor::Void,
            WellKnownType::Boolean => TypeFlavor::Boolean,
            WellKnownType::Char => TypeFlavor::Char,
            WellKnownType::SByte => TypeFlavor::I1,
            WellKnownType::Byte => TypeFlavor::U1,
            WellKnownType::Int16 => TypeFlavor::I2,
            WellKnownType::UInt16 => TypeFlavor::U2,
            WellKnownType::Int32 => TypeFlavor::I4,
            WellKnownType::UInt32 => TypeFlavor::U4,
            WellKnownType::Int64 => TypeFlavor::I8,
            WellKnownType::UInt64 => TypeFlavor::U8,
            WellKnownType::Single => TypeFlavor::R4,
            WellKnownType::Double => TypeFlavor::R8,
            WellKnownType::IntPtr => TypeFlavor::I,
            WellKnownType::UIntPtr => TypeFlavor::U,
            WellKnownType::Decimal => TypeFlavor::Decimal,
            WellKnownType::DateTime => TypeFlavor::DateTime,
            WellKnownType::String => TypeFlavor::String,
            WellKnownType::Nullable => TypeFlavor::ValueType,
            WellKnownType::Enumerable | WellKnownType::GenericEnumerable => {
                TypeFlavor::Interface
            }
        }
    }

    /// The base type of this type, `None` for `Object`, `Void` and interfaces
    #[must_use]
    pub fn base(&self) -> Option<WellKnownType> {
        match self {
            WellKnownType::Object
            | WellKnownType::Void
            | WellKnownType::Enumerable
            | WellKnownType::GenericEnumerable => None,
            WellKnownType::ValueType | WellKnownType::String | WellKnownType::Array => {
                Some(WellKnownType::Object)
            }
            _ => Some(WellKnownType::ValueType),
        }
    }

    /// Names of the generic parameters of this type
    #[must_use]
    pub fn generic_params(&self) -> &'static [&'static str] {
        match self {
            WellKnownType::Nullable | WellKnownType::GenericEnumerable => &["T"],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_flavor_is_primitive() {
        assert!(TypeFlavor::Boolean.is_primitive());
        assert!(TypeFlavor::Char.is_primitive());
        assert!(TypeFlavor::I4.is_primitive());
        assert!(TypeFlavor::R8.is_primitive());
        assert!(TypeFlavor::I.is_primitive());

        assert!(!TypeFlavor::Decimal.is_primitive());
        assert!(!TypeFlavor::String.is_primitive());
        assert!(!TypeFlavor::Object.is_primitive());
        assert!(!TypeFlavor::Array { rank: 1 }.is_primitive());
        assert!(!TypeFlavor::Class.is_primitive());
    }

    #[test]
    fn test_flavor_value_and_reference() {
        assert!(TypeFlavor::Decimal.is_value_type());
        assert!(TypeFlavor::Enum.is_value_type());
        assert!(TypeFlavor::ValueType.is_value_type());
        assert!(!TypeFlavor::String.is_value_type());

        assert!(TypeFlavor::String.is_reference_type());
        assert!(TypeFlavor::Array { rank: 2 }.is_reference_type());
        assert!(!TypeFlavor::I4.is_reference_type());
        assert!(!TypeFlavor::GenericParameter {
            index: 0,
            method: false
        }
        .is_reference_type());
    }

    #[test]
    fn test_type_code_numeric_range() {
        let numeric: Vec<TypeCode> = TypeCode::iter().filter(TypeCode::is_numeric).collect();
        assert_eq!(
            numeric,
            vec![
                TypeCode::Char,
                TypeCode::SByte,
                TypeCode::Byte,
                TypeCode::Int16,
                TypeCode::UInt16,
                TypeCode::Int32,
                TypeCode::UInt32,
                TypeCode::Int64,
                TypeCode::UInt64,
                TypeCode::Single,
                TypeCode::Double,
                TypeCode::Decimal,
            ]
        );
        assert!(!TypeCode::Boolean.is_numeric());
        assert!(!TypeCode::String.is_numeric());
    }

    #[test]
    fn test_flavor_type_code() {
        assert_eq!(TypeFlavor::U1.type_code(), TypeCode::Byte);
        assert_eq!(TypeFlavor::I.type_code(), TypeCode::Object);
        assert_eq!(TypeFlavor::Class.type_code(), TypeCode::Object);
        assert_eq!(TypeFlavor::String.type_code(), TypeCode::String);
    }

    #[test]
    fn test_well_known_tokens_unique() {
        let tokens: HashSet<Token> = WellKnownType::iter().map(|w| w.token()).collect();
        assert_eq!(tokens.len(), WellKnownType::iter().count());
        assert!(tokens.iter().all(Token::is_well_known));
    }

    #[test]
    fn test_well_known_bases_precede() {
        let order: Vec<WellKnownType> = WellKnownType::iter().collect();
        for (index, kind) in order.iter().enumerate() {
            if let Some(base) = kind.base() {
                let base_index = order.iter().position(|k| *k == base).unwrap();
                assert!(base_index < index, "{kind:?} initialized before {base:?}");
            }
        }
    }
}
