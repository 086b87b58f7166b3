//! Queries over registered types.
//!
//! [`TypeExt`] answers the hierarchy, interface, generic, nullable and activation questions
//! about a [`TypeRc`]. Queries that need to construct new types (nullable wrappers,
//! enumerable lookups) live on [`crate::typesystem::TypeRegistry`].
//!
//! # Examples
//!
//! ```rust
//! use pure_ext::typesystem::{TypeBuilder, TypeExt, TypeRegistry};
//!
//! let registry = TypeRegistry::new()?;
//! let animal = TypeBuilder::new("Animal").abstract_class().build(&registry)?;
//! let dog = TypeBuilder::new("Dog").extends(&animal).build(&registry)?;
//! let puppy = TypeBuilder::new("Puppy").extends(&dog).build(&registry)?;
//!
//! let names: Vec<String> = puppy.base_types().map(|t| t.name.clone()).collect();
//! assert_eq!(names, ["Dog", "Animal"]);
//! assert!(animal.is_assignable_from(&puppy));
//! # Ok::<(), pure_ext::Error>(())
//! ```

use std::collections::HashSet;

use crate::{
    typesystem::{
        activator, config::MAX_BASE_WALK, MethodRc, Token, TypeRc, Value, WellKnownType,
    },
    Error, Result,
};

/// Lazy iterator over the ancestors of a type.
///
/// Follows the base relation until the root `System.Object` or a missing base. The root
/// object type itself is never yielded. Every call to [`TypeExt::base_types`] starts a fresh
/// walk. The walk yields at most a fixed number of ancestors, so a chain that was closed into
/// a loop still ends.
#[derive(Clone)]
pub struct BaseTypes {
    next: Option<TypeRc>,
    remaining: usize,
}

impl Iterator for BaseTypes {
    type Item = TypeRc;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if current.is_object() || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.next = current.base();
        Some(current)
    }
}

/// Introspection queries on a type
pub trait TypeExt {
    /// All ancestors, nearest first, without `System.Object`
    fn base_types(&self) -> BaseTypes;

    /// The type itself, its base types, then all its interfaces
    fn hierarchy_types(&self) -> Vec<TypeRc>;

    /// All implemented interfaces: declared ones first, then those inherited from base types,
    /// then super-interfaces. Each interface appears once.
    fn interfaces(&self) -> Vec<TypeRc>;

    /// Check if a value of type `other` can be stored in a location of this type
    fn is_assignable_from(&self, other: &TypeRc) -> bool;

    /// Check if this type implements `interface` (an interface implements itself)
    ///
    /// # Errors
    /// Returns [`Error::NotInterfaceType`] if `interface` is not an interface
    fn is_implement_interface(&self, interface: &TypeRc) -> Result<bool>;

    /// The first ancestor, starting at the base type, that implements `interface`
    ///
    /// # Errors
    /// Returns [`Error::NotInterfaceType`] if `interface` is not an interface
    fn get_implement_type(&self, interface: &TypeRc) -> Result<Option<TypeRc>>;

    /// The first implemented interface that is assignable to `interface`
    ///
    /// # Errors
    /// Returns [`Error::NotInterfaceType`] if `interface` is not an interface
    fn get_direct_implement_interface(&self, interface: &TypeRc) -> Result<Option<TypeRc>>;

    /// Check if this exact type, not one of its ancestors, provides the implementation of
    /// `interface`
    ///
    /// # Errors
    /// Returns [`Error::NotInterfaceType`] if `interface` is not an interface
    fn is_direct_implement_interface(&self, interface: &TypeRc) -> Result<bool>;

    /// The methods implementing each method of `interface`, as `(interface method, target)`
    /// pairs in interface declaration order. Unimplemented methods are skipped.
    ///
    /// # Errors
    /// Returns [`Error::NotInterfaceType`] if `interface` is not an interface
    fn interface_map(&self, interface: &TypeRc) -> Result<Vec<(MethodRc, MethodRc)>>;

    /// The first hierarchy type that is a closed form of `definition`
    fn get_generic_implement_type(&self, definition: &TypeRc) -> Option<TypeRc>;

    /// The open definition of a closed generic type, the type itself for a definition, `None`
    /// for non-generic types
    fn generic_type_definition(&self) -> Option<TypeRc>;

    /// Check if `checking` is this type or one of its ancestors
    fn is_base_type(&self, checking: &TypeRc) -> bool;

    /// Check if this open generic definition is the definition of `to_check` or of one of its
    /// ancestors
    fn is_subclass_of_raw_generic(&self, to_check: &TypeRc) -> bool;

    /// Check if this is `Nullable<T>` (or the `Nullable<T>` definition itself)
    fn is_nullable_type(&self) -> bool;

    /// `T` for `Nullable<T>`, the type itself otherwise
    fn get_non_nullable_type(&self) -> TypeRc;

    /// Check for integer, floating point, decimal and char types, nullable or not. Enums are
    /// not numeric.
    fn is_numeric_type(&self) -> bool;

    /// Check for a compiler generated anonymous type
    fn is_anonymous_type(&self) -> bool;

    /// Neither abstract, an open generic definition, nor an array
    fn is_concrete_type(&self) -> bool;

    /// A plain, non-generic class other than string or array
    fn is_valid_structural_type(&self) -> bool;

    /// Not an open definition, not a pointer, not `System.Object`
    fn is_valid_structural_property_type(&self) -> bool;

    /// Create an instance through a public constructor accepting `args`
    ///
    /// # Errors
    /// Returns [`Error::Activation`] for types that can not be instantiated and
    /// [`Error::MissingConstructor`] if no constructor accepts the arguments
    fn create_instance(&self, args: &[Value]) -> Result<Value>;

    /// Create an instance and cast it to `T`
    ///
    /// # Errors
    /// As [`TypeExt::create_instance`], plus [`Error::InvalidCast`] if the instance is not a
    /// `T`
    fn create_instance_as<T: std::any::Any + Send + Sync>(
        &self,
        args: &[Value],
    ) -> Result<std::sync::Arc<T>>;

    /// Create an instance through a parameterless constructor, including non-public ones if
    /// `non_public` is set
    ///
    /// # Errors
    /// As [`TypeExt::create_instance`]
    fn create_instance_non_public(&self, non_public: bool) -> Result<Value>;

    /// The default value: `None` for reference and nullable types, the parameterless
    /// instance for value types
    ///
    /// # Errors
    /// As [`TypeExt::create_instance`]
    fn get_default_value(&self) -> Result<Option<Value>>;
}

fn require_interface(interface: &TypeRc) -> Result<()> {
    if interface.is_interface() {
        Ok(())
    } else {
        Err(Error::NotInterfaceType(interface.fullname()))
    }
}

fn contains(types: &[TypeRc], token: Token) -> bool {
    types.iter().any(|t| t.token == token)
}

impl TypeExt for TypeRc {
    fn base_types(&self) -> BaseTypes {
        BaseTypes {
            next: self.base(),
            remaining: MAX_BASE_WALK,
        }
    }

    fn hierarchy_types(&self) -> Vec<TypeRc> {
        let mut result = vec![self.clone()];
        result.extend(self.base_types());
        result.extend(self.interfaces());
        result
    }

    fn interfaces(&self) -> Vec<TypeRc> {
        let mut seen = HashSet::new();
        let mut result: Vec<TypeRc> = Vec::new();

        let owners = std::iter::once(self.clone()).chain(self.base_types());
        for owner in owners {
            for (_, interface) in owner.interfaces.iter() {
                if let Some(interface) = interface.upgrade() {
                    if seen.insert(interface.token) {
                        result.push(interface);
                    }
                }
            }
        }

        let mut index = 0;
        while index < result.len() {
            let supers: Vec<TypeRc> = result[index]
                .interfaces
                .iter()
                .filter_map(|(_, interface)| interface.upgrade())
                .collect();
            for interface in supers {
                if seen.insert(interface.token) {
                    result.push(interface);
                }
            }
            index += 1;
        }

        result.retain(|interface| interface.token != self.token);
        result
    }

    fn is_assignable_from(&self, other: &TypeRc) -> bool {
        if self.token == other.token {
            return true;
        }
        if self.is_object() {
            return !other.is_pointer();
        }
        if self.is_interface() {
            return contains(&other.interfaces(), self.token);
        }
        if other.base_types().any(|base| base.token == self.token) {
            return true;
        }
        if self.is_nullable_type() {
            if let Some(inner) = self.generic_args.get(0).and_then(|arg| arg.upgrade()) {
                return inner.token == other.token;
            }
        }
        false
    }

    fn is_implement_interface(&self, interface: &TypeRc) -> Result<bool> {
        require_interface(interface)?;
        Ok(interface.is_assignable_from(self))
    }

    fn get_implement_type(&self, interface: &TypeRc) -> Result<Option<TypeRc>> {
        require_interface(interface)?;
        for base in self.base_types() {
            if base.is_implement_interface(interface)? {
                return Ok(Some(base));
            }
        }
        Ok(None)
    }

    fn get_direct_implement_interface(&self, interface: &TypeRc) -> Result<Option<TypeRc>> {
        require_interface(interface)?;
        Ok(self
            .interfaces()
            .into_iter()
            .find(|candidate| interface.is_assignable_from(candidate)))
    }

    fn is_direct_implement_interface(&self, interface: &TypeRc) -> Result<bool> {
        require_interface(interface)?;
        if !contains(&self.interfaces(), interface.token) {
            return Ok(false);
        }

        let map = self.interface_map(interface)?;
        let Some((_, target)) = map.first() else {
            return Ok(false);
        };

        Ok(target.declaring_type().is_some_and(|declaring| {
            declaring.token == self.token
                || self
                    .generic_definition()
                    .is_some_and(|definition| definition.token == declaring.token)
        }))
    }

    fn interface_map(&self, interface: &TypeRc) -> Result<Vec<(MethodRc, MethodRc)>> {
        require_interface(interface)?;

        let interface_methods: Vec<MethodRc> = match interface.generic_definition() {
            Some(definition) => definition.methods.iter().map(|(_, m)| m.clone()).collect(),
            None => interface.methods.iter().map(|(_, m)| m.clone()).collect(),
        };

        let implementors: Vec<TypeRc> = std::iter::once(self.clone())
            .chain(self.base_types())
            .collect();

        let mut map = Vec::with_capacity(interface_methods.len());
        for interface_method in interface_methods {
            let target = implementors.iter().find_map(|implementor| {
                let explicit = implementor.method_impls.iter().find_map(|(_, imp)| {
                    (imp.interface_method.token == interface_method.token)
                        .then(|| imp.body.clone())
                });
                explicit.or_else(|| {
                    implementor.methods.iter().find_map(|(_, method)| {
                        (method.is_public()
                            && !method.is_static()
                            && method.name == interface_method.name
                            && method.params.len() == interface_method.params.len())
                        .then(|| method.clone())
                    })
                })
            });

            if let Some(target) = target {
                map.push((interface_method, target));
            }
        }

        Ok(map)
    }

    fn get_generic_implement_type(&self, definition: &TypeRc) -> Option<TypeRc> {
        self.hierarchy_types().into_iter().find(|candidate| {
            candidate.is_generic_type()
                && candidate
                    .generic_type_definition()
                    .is_some_and(|found| found.token == definition.token)
        })
    }

    fn generic_type_definition(&self) -> Option<TypeRc> {
        if self.is_generic_type_definition() {
            return Some(self.clone());
        }
        self.generic_definition()
    }

    fn is_base_type(&self, checking: &TypeRc) -> bool {
        if self.is_object() {
            return false;
        }
        self.token == checking.token || self.base_types().any(|base| base.token == checking.token)
    }

    fn is_subclass_of_raw_generic(&self, to_check: &TypeRc) -> bool {
        std::iter::once(to_check.clone())
            .chain(to_check.base_types())
            .filter(|candidate| !candidate.is_object())
            .any(|candidate| {
                let current = if candidate.is_generic_type() {
                    candidate.generic_type_definition().unwrap_or(candidate)
                } else {
                    candidate
                };
                current.token == self.token
            })
    }

    fn is_nullable_type(&self) -> bool {
        let nullable = WellKnownType::Nullable.token();
        self.token == nullable
            || self
                .generic_definition()
                .is_some_and(|definition| definition.token == nullable)
    }

    fn get_non_nullable_type(&self) -> TypeRc {
        if self.is_nullable_type() {
            if let Some(inner) = self.generic_args.get(0).and_then(|arg| arg.upgrade()) {
                return inner;
            }
        }
        self.clone()
    }

    fn is_numeric_type(&self) -> bool {
        let ty = self.get_non_nullable_type();
        !ty.is_enum() && ty.type_code().is_numeric()
    }

    fn is_anonymous_type(&self) -> bool {
        const PREFIX: &str = "<>f__AnonymousType";
        let fullname = self.fullname();
        fullname.chars().count() > PREFIX.len() && fullname.starts_with(PREFIX)
    }

    fn is_concrete_type(&self) -> bool {
        !self.is_abstract() && !self.is_generic_type_definition() && !self.is_array()
    }

    fn is_valid_structural_type(&self) -> bool {
        !self.is_generic_type()
            && !self.is_value_type()
            && !self.is_primitive()
            && !self.is_interface()
            && !self.is_array()
            && !self.is_string()
            && self.is_valid_structural_property_type()
    }

    fn is_valid_structural_property_type(&self) -> bool {
        !self.is_generic_type_definition() && !self.is_pointer() && !self.is_object()
    }

    fn create_instance(&self, args: &[Value]) -> Result<Value> {
        activator::activate(self, args, false)
    }

    fn create_instance_as<T: std::any::Any + Send + Sync>(
        &self,
        args: &[Value],
    ) -> Result<std::sync::Arc<T>> {
        self.create_instance(args)?
            .downcast::<T>()
            .map_err(|_| Error::InvalidCast {
                key: self.fullname(),
                expected: std::any::type_name::<T>(),
            })
    }

    fn create_instance_non_public(&self, non_public: bool) -> Result<Value> {
        activator::activate(self, &[], non_public)
    }

    fn get_default_value(&self) -> Result<Option<Value>> {
        if !self.is_value_type() || self.is_nullable_type() {
            return Ok(None);
        }

        if self.is_enum() {
            if let Some(underlying) = self.enum_underlying_type() {
                return underlying.create_instance(&[]).map(Some);
            }
        }

        self.create_instance(&[]).map(Some)
    }
}
