//! Reflection-style type system over an explicit registry.
//!
//! Rust has no runtime type information beyond `TypeId`, so the types a program wants to
//! introspect are described explicitly and registered in a [`TypeRegistry`]. The registry is
//! seeded with the well-known runtime types (`System.Object`, the primitive value types,
//! `System.Nullable`1`, `System.Collections.Generic.IEnumerable`1`, ...); user types are added
//! with the builders.
//!
//! # Key Components
//!
//! - [`TypeDescriptor`]: A registered type with its hierarchy, generics and members
//! - [`TypeRegistry`]: Owns every descriptor, closes generic definitions, builds arrays
//! - [`TypeBuilder`], [`MethodBuilder`], ...: Construct types and members
//! - [`TypeExt`]: Hierarchy, interface, nullable and activation queries
//! - [`AttributeProvider`]: Custom attribute lookup with inheritance
//! - [`Declaration`]: C#-style declaration rendering
//!
//! # Examples
//!
//! ```rust
//! use pure_ext::typesystem::{TypeBuilder, TypeExt, TypeRegistry};
//!
//! let registry = TypeRegistry::new()?;
//! let disposable = TypeBuilder::new("IDisposable")
//!     .namespace("System")
//!     .interface()
//!     .build(&registry)?;
//! let stream = TypeBuilder::new("Stream")
//!     .namespace("System.IO")
//!     .abstract_class()
//!     .implements(&disposable)
//!     .build(&registry)?;
//!
//! assert!(stream.is_implement_interface(&disposable)?);
//! assert_eq!(stream.base_types().count(), 0);
//! # Ok::<(), pure_ext::Error>(())
//! ```

mod activator;
mod attributes;
mod base;
mod builder;
mod config;
mod declaration;
mod flags;
mod introspect;
mod members;
mod registry;
mod token;

use std::{
    any::TypeId,
    sync::{Arc, OnceLock},
};

pub use activator::{
    ActivationContext, ConstructorDescriptor, ConstructorFn, ConstructorList, ConstructorRc,
};
pub use attributes::{AttributeProvider, CustomAttribute, CustomAttributeList, CustomAttributeRc};
pub use base::{TypeCode, TypeFlavor, TypeRef, TypeRefList, WellKnownType};
pub use builder::{
    ConstructorBuilder, EventBuilder, FieldBuilder, MethodBuilder, PropertyBuilder, TypeBuilder,
};
pub use config::TypeSystemConfig;
pub use declaration::Declaration;
pub use flags::{
    FieldAttributes, MethodAccessFlags, MethodModifiers, ParamModifier, TypeAttributes,
    FIELD_ACCESS_MASK, METHOD_ACCESS_MASK, TYPE_VISIBILITY_MASK,
};
pub use introspect::{BaseTypes, TypeExt};
pub use members::{
    EventDescriptor, EventList, EventRc, FieldDescriptor, FieldList, FieldRc, Getter, Member,
    MemberKind, MethodDescriptor, MethodImpl, MethodImplList, MethodList, MethodRc,
    ParamDescriptor, PropertyDescriptor, PropertyList, PropertyRc, Value,
};
pub use registry::TypeRegistry;
pub use token::{Token, TokenKind};

/// Reference to a `TypeDescriptor`
pub type TypeRc = Arc<TypeDescriptor>;

/// A registered type.
///
/// Combines the identity of a type (token, namespace, name), its shape ([`TypeFlavor`] and
/// [`TypeAttributes`]), its relations (base type, interfaces, generic parameters and arguments,
/// element type) and its members. Relations are set once, members are append-only.
///
/// A closed generic type (`List<int>`) shares the member lists of its generic definition.
pub struct TypeDescriptor {
    /// Token
    pub token: Token,
    /// Namespace, can be empty
    pub namespace: String,
    /// Name, generic definitions carry the arity suffix (`List`1`)
    pub name: String,
    /// The shape of the type
    pub flavor: TypeFlavor,
    /// Visibility and semantics
    pub flags: TypeAttributes,
    /// This types base aka 'extends'
    base: OnceLock<TypeRef>,
    /// All interfaces this type declares
    pub interfaces: TypeRefList,
    /// Generic parameters of a generic definition
    pub generic_params: TypeRefList,
    /// Generic arguments of a closed generic type
    pub generic_args: TypeRefList,
    /// The open definition of a closed generic type
    generic_definition: OnceLock<TypeRef>,
    /// Element type of arrays and pointers
    element_type: OnceLock<TypeRef>,
    /// Underlying integral type of an enumeration
    underlying: OnceLock<TypeRef>,
    /// The Rust type that instances of this type are represented with
    rust_type: OnceLock<TypeId>,
    /// All fields this type has
    pub fields: FieldList,
    /// All properties this type has
    pub properties: PropertyList,
    /// All methods this type has
    pub methods: MethodList,
    /// All events this type has
    pub events: EventList,
    /// All instance constructors this type has
    pub constructors: ConstructorList,
    /// Explicit interface implementations
    pub method_impls: MethodImplList,
    /// All custom attributes this type has
    pub custom_attributes: CustomAttributeList,
}

impl TypeDescriptor {
    /// Create a new instance of a `TypeDescriptor`, without relations or members
    pub fn new(
        token: Token,
        namespace: impl Into<String>,
        name: impl Into<String>,
        flavor: TypeFlavor,
        flags: TypeAttributes,
    ) -> Self {
        TypeDescriptor {
            token,
            namespace: namespace.into(),
            name: name.into(),
            flavor,
            flags,
            base: OnceLock::new(),
            interfaces: Arc::new(boxcar::Vec::new()),
            generic_params: Arc::new(boxcar::Vec::new()),
            generic_args: Arc::new(boxcar::Vec::new()),
            generic_definition: OnceLock::new(),
            element_type: OnceLock::new(),
            underlying: OnceLock::new(),
            rust_type: OnceLock::new(),
            fields: Arc::new(boxcar::Vec::new()),
            properties: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            events: Arc::new(boxcar::Vec::new()),
            constructors: Arc::new(boxcar::Vec::new()),
            method_impls: Arc::new(boxcar::Vec::new()),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Create a closed generic type over `definition`, sharing its member lists
    pub(crate) fn new_closed(token: Token, definition: &TypeRc) -> Self {
        let closed = TypeDescriptor {
            token,
            namespace: definition.namespace.clone(),
            name: definition.name.clone(),
            flavor: definition.flavor,
            flags: definition.flags,
            base: OnceLock::new(),
            interfaces: Arc::new(boxcar::Vec::new()),
            generic_params: Arc::new(boxcar::Vec::new()),
            generic_args: Arc::new(boxcar::Vec::new()),
            generic_definition: OnceLock::new(),
            element_type: OnceLock::new(),
            underlying: OnceLock::new(),
            rust_type: OnceLock::new(),
            fields: definition.fields.clone(),
            properties: definition.properties.clone(),
            methods: definition.methods.clone(),
            events: definition.events.clone(),
            constructors: definition.constructors.clone(),
            method_impls: definition.method_impls.clone(),
            custom_attributes: definition.custom_attributes.clone(),
        };
        closed.generic_definition.set(definition.into()).ok();
        closed
    }

    /// Access the base type of this type, if it exists
    pub fn base(&self) -> Option<TypeRc> {
        self.base.get().and_then(TypeRef::upgrade)
    }

    /// Set the base type. Returns false if it was already set, or if `base` is this type or
    /// one of its descendants.
    pub fn set_base(&self, base: &TypeRc) -> bool {
        let mut current = Some(base.clone());
        for _ in 0..=config::MAX_BASE_WALK {
            let Some(ancestor) = current else {
                return self.base.set(base.into()).is_ok();
            };
            if std::ptr::eq(Arc::as_ptr(&ancestor), self) {
                return false;
            }
            current = ancestor.base();
        }
        false
    }

    /// The open generic definition of a closed generic type
    pub fn generic_definition(&self) -> Option<TypeRc> {
        self.generic_definition.get().and_then(TypeRef::upgrade)
    }

    /// The element type of an array or pointer
    pub fn element_type(&self) -> Option<TypeRc> {
        self.element_type.get().and_then(TypeRef::upgrade)
    }

    pub(crate) fn set_element_type(&self, element: &TypeRc) -> bool {
        self.element_type.set(element.into()).is_ok()
    }

    /// The underlying integral type of an enumeration
    pub fn enum_underlying_type(&self) -> Option<TypeRc> {
        self.underlying.get().and_then(TypeRef::upgrade)
    }

    pub(crate) fn set_enum_underlying_type(&self, underlying: &TypeRc) -> bool {
        self.underlying.set(underlying.into()).is_ok()
    }

    /// The Rust type instances of this type are represented with, if declared
    pub fn rust_type(&self) -> Option<TypeId> {
        self.rust_type.get().copied()
    }

    pub(crate) fn set_rust_type(&self, id: TypeId) -> bool {
        self.rust_type.set(id).is_ok()
    }

    /// Returns the full name of the type.
    ///
    /// `Namespace.Name`, without a leading dot for types in the global namespace. Closed
    /// generic types list their arguments (`System.Nullable`1[System.Int32]`), arrays and
    /// pointers are rendered from their element type (`System.Int32[]`, `System.Byte*`).
    pub fn fullname(&self) -> String {
        if let Some(element) = self.element_type() {
            let suffix = match self.flavor {
                TypeFlavor::Array { rank } => array_suffix(rank),
                TypeFlavor::Pointer => "*".to_string(),
                TypeFlavor::ByRef => "&".to_string(),
                _ => String::new(),
            };
            return format!("{}{}", element.fullname(), suffix);
        }

        let mut fullname = if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        };

        if self.generic_args.count() > 0 {
            let args: Vec<String> = self
                .generic_args
                .iter()
                .map(|(_, arg)| {
                    arg.upgrade()
                        .map_or_else(|| "?".to_string(), |arg| arg.fullname())
                })
                .collect();
            fullname.push('[');
            fullname.push_str(&args.join(","));
            fullname.push(']');
        }

        fullname
    }

    /// The type is an interface
    pub fn is_interface(&self) -> bool {
        self.flavor == TypeFlavor::Interface
    }

    /// The type is a reference type that is neither an interface nor a generic parameter
    pub fn is_class(&self) -> bool {
        matches!(
            self.flavor,
            TypeFlavor::Class | TypeFlavor::Object | TypeFlavor::String | TypeFlavor::Array { .. }
        )
    }

    /// The type is a value type (primitives, structs, enumerations, `Nullable<T>`)
    pub fn is_value_type(&self) -> bool {
        self.flavor.is_value_type()
    }

    /// The type is an enumeration
    pub fn is_enum(&self) -> bool {
        self.flavor == TypeFlavor::Enum
    }

    /// The type can not be instantiated directly, interfaces are abstract as well
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeAttributes::ABSTRACT) || self.is_interface()
    }

    /// The type can not be derived from
    pub fn is_sealed(&self) -> bool {
        self.flags.contains(TypeAttributes::SEALED)
    }

    /// The type is an array
    pub fn is_array(&self) -> bool {
        matches!(self.flavor, TypeFlavor::Array { .. })
    }

    /// The type is a pointer
    pub fn is_pointer(&self) -> bool {
        self.flavor == TypeFlavor::Pointer
    }

    /// The type is a runtime primitive (see [`TypeFlavor::is_primitive`])
    pub fn is_primitive(&self) -> bool {
        self.flavor.is_primitive()
    }

    /// The type is a generic definition or a closed generic type
    pub fn is_generic_type(&self) -> bool {
        self.is_generic_type_definition() || self.generic_args.count() > 0
    }

    /// The type is an open generic definition (`List<T>`)
    pub fn is_generic_type_definition(&self) -> bool {
        self.generic_params.count() > 0
    }

    /// The type is a generic parameter (`T`)
    pub fn is_generic_parameter(&self) -> bool {
        matches!(self.flavor, TypeFlavor::GenericParameter { .. })
    }

    /// The type is `System.Object`
    pub fn is_object(&self) -> bool {
        self.token == WellKnownType::Object.token()
    }

    /// The type is `System.String`
    pub fn is_string(&self) -> bool {
        self.token == WellKnownType::String.token()
    }

    /// The generic arguments of a closed type, or the generic parameters of a definition
    pub fn generic_arguments(&self) -> Vec<TypeRc> {
        let source = if self.generic_args.count() > 0 {
            &self.generic_args
        } else {
            &self.generic_params
        };
        source.iter().filter_map(|(_, arg)| arg.upgrade()).collect()
    }

    /// The generic parameter of this definition with the given name
    pub fn generic_param(&self, name: &str) -> Option<TypeRc> {
        self.generic_params
            .iter()
            .filter_map(|(_, param)| param.upgrade())
            .find(|param| param.name == name)
    }

    /// The type code, enumerations report the code of their underlying type
    pub fn type_code(&self) -> TypeCode {
        if self.is_enum() {
            return self
                .enum_underlying_type()
                .map_or(TypeCode::Int32, |underlying| underlying.type_code());
        }
        self.flavor.type_code()
    }

    /// All members (fields, properties, methods, events) in that order
    pub fn members(&self) -> Vec<Member> {
        let mut members = Vec::new();
        members.extend(self.fields.iter().map(|(_, f)| Member::Field(f.clone())));
        members.extend(
            self.properties
                .iter()
                .map(|(_, p)| Member::Property(p.clone())),
        );
        members.extend(self.methods.iter().map(|(_, m)| Member::Method(m.clone())));
        members.extend(self.events.iter().map(|(_, e)| Member::Event(e.clone())));
        members
    }

    /// The first member with the given name
    pub fn get_member(&self, name: &str) -> Option<Member> {
        self.members().into_iter().find(|member| member.name() == name)
    }

    /// All methods with the given name
    pub fn get_methods(&self, name: &str) -> Vec<MethodRc> {
        self.methods
            .iter()
            .filter(|(_, method)| method.name == name)
            .map(|(_, method)| method.clone())
            .collect()
    }
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("token", &self.token)
            .field("fullname", &self.fullname())
            .field("flavor", &self.flavor)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

pub(crate) fn array_suffix(rank: u32) -> String {
    let commas = rank.saturating_sub(1) as usize;
    format!("[{}]", ",".repeat(commas))
}
