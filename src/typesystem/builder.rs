//! Fluent builders for types and their members.
//!
//! [`TypeBuilder`] registers a new type in a [`TypeRegistry`]; the member builders attach
//! methods, fields, properties, events and constructors to an already registered type.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pure_ext::typesystem::{
//!     ConstructorBuilder, MethodBuilder, TypeBuilder, TypeExt, TypeRegistry, WellKnownType,
//! };
//!
//! let registry = TypeRegistry::new()?;
//! let int32 = registry.well_known(WellKnownType::Int32)?;
//!
//! let counter = TypeBuilder::new("Counter")
//!     .namespace("App")
//!     .rust_type::<u64>()
//!     .build(&registry)?;
//! ConstructorBuilder::new()
//!     .factory(|_| Ok(Arc::new(0_u64)))
//!     .build(&registry, &counter)?;
//! MethodBuilder::new("Add")
//!     .param("amount", &int32)
//!     .build(&registry, &counter)?;
//!
//! let value = counter.create_instance(&[])?;
//! assert_eq!(value.downcast_ref::<u64>(), Some(&0));
//! # Ok::<(), pure_ext::Error>(())
//! ```

use std::{
    any::{Any, TypeId},
    sync::{Arc, OnceLock},
};

use crate::{
    typesystem::{
        ActivationContext, ConstructorDescriptor, ConstructorFn, ConstructorRc, CustomAttribute,
        EventDescriptor, EventRc, FieldAttributes, FieldDescriptor, FieldRc, Getter,
        MethodAccessFlags, MethodDescriptor, MethodImpl, MethodModifiers, MethodRc,
        ParamDescriptor, ParamModifier, PropertyDescriptor, PropertyRc, TokenKind,
        TypeAttributes, TypeDescriptor, TypeExt, TypeFlavor, TypeRc, TypeRegistry, Value,
        WellKnownType, FIELD_ACCESS_MASK, TYPE_VISIBILITY_MASK,
    },
    Error, Result,
};

/// A base type or interface, either concrete or a generic definition closed over the type's
/// own parameters
enum Relation {
    Type(TypeRc),
    Open {
        definition: TypeRc,
        params: Vec<String>,
    },
}

/// Provides a fluent API for building and registering a type
pub struct TypeBuilder {
    namespace: String,
    name: String,
    flavor: TypeFlavor,
    flags: TypeAttributes,
    base: Option<Relation>,
    interfaces: Vec<Relation>,
    generic_params: Vec<String>,
    underlying: Option<TypeRc>,
    rust_type: Option<TypeId>,
    attributes: Vec<CustomAttribute>,
}

impl TypeBuilder {
    /// Start a new public class
    ///
    /// ## Arguments
    /// * `name` - Name of the type, without the generic arity suffix
    pub fn new(name: impl Into<String>) -> Self {
        TypeBuilder {
            namespace: String::new(),
            name: name.into(),
            flavor: TypeFlavor::Class,
            flags: TypeAttributes::PUBLIC,
            base: None,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            underlying: None,
            rust_type: None,
            attributes: Vec::new(),
        }
    }

    /// Set the namespace
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Make the type visible everywhere (default)
    #[must_use]
    pub fn public(mut self) -> Self {
        self.flags = self.visibility(TypeAttributes::PUBLIC);
        self
    }

    /// Make the type visible only inside its assembly
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.flags = self.visibility(TypeAttributes::NOT_PUBLIC);
        self
    }

    fn visibility(&self, visibility: TypeAttributes) -> TypeAttributes {
        TypeAttributes::from_bits_retain(self.flags.bits() & !TYPE_VISIBILITY_MASK) | visibility
    }

    /// Build an interface
    #[must_use]
    pub fn interface(mut self) -> Self {
        self.flavor = TypeFlavor::Interface;
        self.flags |= TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT;
        self
    }

    /// Build a struct
    #[must_use]
    pub fn value_type(mut self) -> Self {
        self.flavor = TypeFlavor::ValueType;
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Build an enumeration over an integral type
    #[must_use]
    pub fn enumeration(mut self, underlying: &TypeRc) -> Self {
        self.flavor = TypeFlavor::Enum;
        self.flags |= TypeAttributes::SEALED;
        self.underlying = Some(underlying.clone());
        self
    }

    /// Build an abstract class
    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.flavor = TypeFlavor::Class;
        self.flags |= TypeAttributes::ABSTRACT;
        self
    }

    /// Prevent derivation
    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.flags |= TypeAttributes::SEALED;
        self
    }

    /// Set the base type
    #[must_use]
    pub fn extends(mut self, base: &TypeRc) -> Self {
        self.base = Some(Relation::Type(base.clone()));
        self
    }

    /// Derive from a generic definition closed over parameters of the type being built
    /// (`class Repository<T> : Store<T>`)
    #[must_use]
    pub fn extends_generic(mut self, definition: &TypeRc, params: &[&str]) -> Self {
        self.base = Some(Relation::Open {
            definition: definition.clone(),
            params: params.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Declare an implemented interface
    #[must_use]
    pub fn implements(mut self, interface: &TypeRc) -> Self {
        self.interfaces.push(Relation::Type(interface.clone()));
        self
    }

    /// Implement a generic interface closed over parameters of the type being built
    /// (`class Bag<T> : IEnumerable<T>`)
    #[must_use]
    pub fn implements_generic(mut self, definition: &TypeRc, params: &[&str]) -> Self {
        self.interfaces.push(Relation::Open {
            definition: definition.clone(),
            params: params.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Declare a generic parameter, turning the type into a generic definition
    #[must_use]
    pub fn generic_param(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    /// Declare the Rust type that represents instances of this type
    #[must_use]
    pub fn rust_type<T: Any>(mut self) -> Self {
        self.rust_type = Some(TypeId::of::<T>());
        self
    }

    /// Attach a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Register the type
    ///
    /// # Errors
    /// Returns [`Error::Argument`] for an invalid base type or an unknown generic parameter,
    /// [`Error::NotInterfaceType`] if a declared interface is not an interface, and
    /// [`Error::RecursionLimit`] if the hierarchy is deeper than
    /// [`crate::TypeSystemConfig::max_hierarchy_depth`]
    pub fn build(self, registry: &TypeRegistry) -> Result<TypeRc> {
        let name = if self.generic_params.is_empty() || self.name.contains('`') {
            self.name
        } else {
            format!("{}`{}", self.name, self.generic_params.len())
        };

        let new_type = Arc::new(TypeDescriptor::new(
            registry.next_token(TokenKind::TypeDef),
            self.namespace,
            name,
            self.flavor,
            self.flags,
        ));

        if let Some(id) = self.rust_type {
            new_type.set_rust_type(id);
        }

        for (index, param) in self.generic_params.iter().enumerate() {
            let param = registry.create_generic_param(param, index)?;
            new_type.generic_params.push(param.into());
        }

        let base = match self.base {
            Some(relation) => Some(resolve(registry, &new_type, relation)?),
            None => match self.flavor {
                TypeFlavor::Interface => None,
                TypeFlavor::ValueType => Some(registry.well_known(WellKnownType::ValueType)?),
                TypeFlavor::Enum => Some(registry.well_known(WellKnownType::Enum)?),
                _ => Some(registry.well_known(WellKnownType::Object)?),
            },
        };

        if let Some(base) = base {
            if base.is_interface() || base.is_sealed() || base.is_generic_parameter() {
                return Err(argument_error!(
                    "Type '{}' can not derive from '{}'",
                    new_type.fullname(),
                    base.fullname()
                ));
            }
            if self.flavor == TypeFlavor::Interface {
                return Err(argument_error!(
                    "Interface '{}' can not have a base type",
                    new_type.fullname()
                ));
            }

            let depth = base.base_types().count() + 1;
            if depth > registry.config().max_hierarchy_depth {
                return Err(Error::RecursionLimit(registry.config().max_hierarchy_depth));
            }
            new_type.set_base(&base);
        }

        for relation in self.interfaces {
            let interface = resolve(registry, &new_type, relation)?;
            if !interface.is_interface() {
                return Err(Error::NotInterfaceType(interface.fullname()));
            }
            new_type.interfaces.push(interface.into());
        }

        if self.flavor == TypeFlavor::Enum {
            let underlying = match self.underlying {
                Some(underlying) => underlying,
                None => registry.well_known(WellKnownType::Int32)?,
            };
            let integral = matches!(
                underlying.flavor,
                TypeFlavor::I1
                    | TypeFlavor::U1
                    | TypeFlavor::I2
                    | TypeFlavor::U2
                    | TypeFlavor::I4
                    | TypeFlavor::U4
                    | TypeFlavor::I8
                    | TypeFlavor::U8
            );
            if !integral {
                return Err(argument_error!(
                    "'{}' is not a valid enumeration underlying type",
                    underlying.fullname()
                ));
            }
            new_type.set_enum_underlying_type(&underlying);
        }

        for attribute in self.attributes {
            new_type.custom_attributes.push(Arc::new(attribute));
        }

        registry.insert(&new_type);
        Ok(new_type)
    }
}

fn resolve(registry: &TypeRegistry, new_type: &TypeRc, relation: Relation) -> Result<TypeRc> {
    match relation {
        Relation::Type(ty) => Ok(ty),
        Relation::Open { definition, params } => {
            let args = params
                .iter()
                .map(|name| {
                    new_type.generic_param(name).ok_or_else(|| {
                        argument_error!(
                            "Type '{}' has no generic parameter '{}'",
                            new_type.name,
                            name
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            registry.make_generic_type(&definition, &args)
        }
    }
}

fn param_descriptor(
    name: impl Into<String>,
    param_type: &TypeRc,
    modifier: ParamModifier,
    default_value: Option<&str>,
) -> ParamDescriptor {
    ParamDescriptor {
        name: name.into(),
        param_type: param_type.into(),
        modifier,
        default_value: default_value.map(ToString::to_string),
    }
}

/// Build a getter that downcasts the instance to `O` and projects a `V` out of it
fn typed_getter<O, V, F>(member: String, read: F) -> Getter
where
    O: Any,
    V: Any + Send + Sync,
    F: Fn(&O) -> V + Send + Sync + 'static,
{
    Arc::new(move |instance: &Value| {
        instance
            .downcast_ref::<O>()
            .map(|owner| Arc::new(read(owner)) as Value)
            .ok_or_else(|| Error::InvalidCast {
                key: member.clone(),
                expected: std::any::type_name::<O>(),
            })
    })
}

/// Provides a fluent API for adding a method to a type
pub struct MethodBuilder {
    name: String,
    access: MethodAccessFlags,
    modifiers: MethodModifiers,
    return_type: Option<TypeRc>,
    generic_params: Vec<String>,
    params: Vec<ParamDescriptor>,
    overrides: Option<MethodRc>,
    implements: Option<MethodRc>,
    attributes: Vec<CustomAttribute>,
}

impl MethodBuilder {
    /// Start a new public instance method returning `System.Void`
    pub fn new(name: impl Into<String>) -> Self {
        MethodBuilder {
            name: name.into(),
            access: MethodAccessFlags::PUBLIC,
            modifiers: MethodModifiers::HIDE_BY_SIG,
            return_type: None,
            generic_params: Vec::new(),
            params: Vec::new(),
            overrides: None,
            implements: None,
            attributes: Vec::new(),
        }
    }

    /// `public`
    #[must_use]
    pub fn public(mut self) -> Self {
        self.access = MethodAccessFlags::PUBLIC;
        self
    }

    /// `protected`
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.access = MethodAccessFlags::FAMILY;
        self
    }

    /// `internal`
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.access = MethodAccessFlags::ASSEM;
        self
    }

    /// `private`
    #[must_use]
    pub fn private(mut self) -> Self {
        self.access = MethodAccessFlags::PRIVATE;
        self
    }

    /// `protected internal`
    #[must_use]
    pub fn protected_internal(mut self) -> Self {
        self.access = MethodAccessFlags::FAM_OR_ASSEM;
        self
    }

    /// `static`
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::STATIC;
        self
    }

    /// `virtual`, introduces a new slot
    #[must_use]
    pub fn virtual_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::VIRTUAL | MethodModifiers::NEW_SLOT;
        self
    }

    /// `abstract`, the declaring type must be abstract
    #[must_use]
    pub fn abstract_method(mut self) -> Self {
        self.modifiers |=
            MethodModifiers::ABSTRACT | MethodModifiers::VIRTUAL | MethodModifiers::NEW_SLOT;
        self
    }

    /// `override` of a virtual base method
    #[must_use]
    pub fn overrides(mut self, base: &MethodRc) -> Self {
        self.modifiers |= MethodModifiers::VIRTUAL;
        self.modifiers.remove(MethodModifiers::NEW_SLOT);
        self.overrides = Some(base.clone());
        self
    }

    /// Explicitly implement an interface method
    #[must_use]
    pub fn implements(mut self, interface_method: &MethodRc) -> Self {
        self.implements = Some(interface_method.clone());
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, return_type: &TypeRc) -> Self {
        self.return_type = Some(return_type.clone());
        self
    }

    /// Append a by-value parameter
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, param_type: &TypeRc) -> Self {
        self.params
            .push(param_descriptor(name, param_type, ParamModifier::None, None));
        self
    }

    /// Append a parameter with a passing modifier and an optional default value
    #[must_use]
    pub fn param_with(
        mut self,
        name: impl Into<String>,
        param_type: &TypeRc,
        modifier: ParamModifier,
        default_value: Option<&str>,
    ) -> Self {
        self.params
            .push(param_descriptor(name, param_type, modifier, default_value));
        self
    }

    /// Declare a generic method parameter
    #[must_use]
    pub fn generic_param(mut self, name: impl Into<String>) -> Self {
        self.generic_params.push(name.into());
        self
    }

    /// Attach a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add the method to `declaring`
    ///
    /// # Errors
    /// Returns [`Error::Argument`] for an abstract method on a concrete type or an override of
    /// a non-virtual method, and [`Error::NotInterfaceType`] if the implemented method is not
    /// declared by an interface
    pub fn build(self, registry: &TypeRegistry, declaring: &TypeRc) -> Result<MethodRc> {
        if self.modifiers.contains(MethodModifiers::ABSTRACT) && !declaring.is_abstract() {
            return Err(argument_error!(
                "Abstract method '{}' on concrete type '{}'",
                self.name,
                declaring.fullname()
            ));
        }

        if let Some(base) = &self.overrides {
            if !base.is_virtual() {
                return Err(argument_error!(
                    "Method '{}' overrides non-virtual '{}'",
                    self.name,
                    base.name
                ));
            }
        }

        if let Some(interface_method) = &self.implements {
            if let Some(interface) = interface_method.declaring_type() {
                if !interface.is_interface() {
                    return Err(Error::NotInterfaceType(interface.fullname()));
                }
            }
        }

        let return_type = match self.return_type {
            Some(return_type) => return_type,
            None => registry.well_known(WellKnownType::Void)?,
        };

        let method = Arc::new(MethodDescriptor {
            token: registry.next_token(TokenKind::Method),
            name: self.name,
            declaring_type: declaring.into(),
            access: self.access,
            modifiers: self.modifiers,
            return_type: (&return_type).into(),
            generic_params: self.generic_params,
            params: self.params,
            overrides: OnceLock::new(),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        });
        if let Some(base) = self.overrides {
            method.overrides.set(base).ok();
        }
        for attribute in self.attributes {
            method.custom_attributes.push(Arc::new(attribute));
        }

        declaring.methods.push(method.clone());
        if let Some(interface_method) = self.implements {
            declaring.method_impls.push(MethodImpl {
                interface_method,
                body: method.clone(),
            });
        }

        Ok(method)
    }
}

/// Provides a fluent API for adding a field to a type
pub struct FieldBuilder {
    name: String,
    field_type: TypeRc,
    flags: FieldAttributes,
    getter: Option<Getter>,
    attributes: Vec<CustomAttribute>,
}

impl FieldBuilder {
    /// Start a new private instance field
    pub fn new(name: impl Into<String>, field_type: &TypeRc) -> Self {
        FieldBuilder {
            name: name.into(),
            field_type: field_type.clone(),
            flags: FieldAttributes::PRIVATE,
            getter: None,
            attributes: Vec::new(),
        }
    }

    /// `public`
    #[must_use]
    pub fn public(mut self) -> Self {
        self.flags = self.access(FieldAttributes::PUBLIC);
        self
    }

    /// `protected`
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.flags = self.access(FieldAttributes::FAMILY);
        self
    }

    /// `internal`
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.flags = self.access(FieldAttributes::ASSEMBLY);
        self
    }

    fn access(&self, access: FieldAttributes) -> FieldAttributes {
        FieldAttributes::from_bits_retain(self.flags.bits() & !FIELD_ACCESS_MASK) | access
    }

    /// `static`
    #[must_use]
    pub fn static_field(mut self) -> Self {
        self.flags |= FieldAttributes::STATIC;
        self
    }

    /// `readonly`
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.flags |= FieldAttributes::INIT_ONLY;
        self
    }

    /// Read the field through a type-erased closure
    #[must_use]
    pub fn getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(getter));
        self
    }

    /// Read the field from instances represented as `O`
    #[must_use]
    pub fn reads<O, V, F>(mut self, read: F) -> Self
    where
        O: Any,
        V: Any + Send + Sync,
        F: Fn(&O) -> V + Send + Sync + 'static,
    {
        self.getter = Some(typed_getter(self.name.clone(), read));
        self
    }

    /// Attach a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add the field to `declaring`
    ///
    /// # Errors
    /// Returns [`Error::Argument`] for instance fields on interfaces
    pub fn build(self, registry: &TypeRegistry, declaring: &TypeRc) -> Result<FieldRc> {
        if declaring.is_interface() && !self.flags.contains(FieldAttributes::STATIC) {
            return Err(argument_error!(
                "Interface '{}' can not declare instance field '{}'",
                declaring.fullname(),
                self.name
            ));
        }

        let field = Arc::new(FieldDescriptor {
            token: registry.next_token(TokenKind::Field),
            name: self.name,
            declaring_type: declaring.into(),
            field_type: (&self.field_type).into(),
            flags: self.flags,
            getter: self.getter,
            custom_attributes: Arc::new(boxcar::Vec::new()),
        });
        for attribute in self.attributes {
            field.custom_attributes.push(Arc::new(attribute));
        }

        declaring.fields.push(field.clone());
        Ok(field)
    }
}

/// Provides a fluent API for adding a property to a type
pub struct PropertyBuilder {
    name: String,
    property_type: TypeRc,
    getter: Option<Getter>,
    attributes: Vec<CustomAttribute>,
}

impl PropertyBuilder {
    /// Start a new property without accessor
    pub fn new(name: impl Into<String>, property_type: &TypeRc) -> Self {
        PropertyBuilder {
            name: name.into(),
            property_type: property_type.clone(),
            getter: None,
            attributes: Vec::new(),
        }
    }

    /// Read the property through a type-erased closure
    #[must_use]
    pub fn getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.getter = Some(Arc::new(getter));
        self
    }

    /// Read the property from instances represented as `O`
    #[must_use]
    pub fn reads<O, V, F>(mut self, read: F) -> Self
    where
        O: Any,
        V: Any + Send + Sync,
        F: Fn(&O) -> V + Send + Sync + 'static,
    {
        self.getter = Some(typed_getter(self.name.clone(), read));
        self
    }

    /// Attach a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add the property to `declaring`
    ///
    /// # Errors
    /// Currently infallible, returns `Result` for symmetry with the other builders
    pub fn build(self, registry: &TypeRegistry, declaring: &TypeRc) -> Result<PropertyRc> {
        let property = Arc::new(PropertyDescriptor {
            token: registry.next_token(TokenKind::Property),
            name: self.name,
            declaring_type: declaring.into(),
            property_type: (&self.property_type).into(),
            getter: self.getter,
            custom_attributes: Arc::new(boxcar::Vec::new()),
        });
        for attribute in self.attributes {
            property.custom_attributes.push(Arc::new(attribute));
        }

        declaring.properties.push(property.clone());
        Ok(property)
    }
}

/// Provides a fluent API for adding an event to a type
pub struct EventBuilder {
    name: String,
    handler_type: TypeRc,
    attributes: Vec<CustomAttribute>,
}

impl EventBuilder {
    /// Start a new event with the given delegate type
    pub fn new(name: impl Into<String>, handler_type: &TypeRc) -> Self {
        EventBuilder {
            name: name.into(),
            handler_type: handler_type.clone(),
            attributes: Vec::new(),
        }
    }

    /// Attach a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add the event to `declaring`
    ///
    /// # Errors
    /// Currently infallible, returns `Result` for symmetry with the other builders
    pub fn build(self, registry: &TypeRegistry, declaring: &TypeRc) -> Result<EventRc> {
        let event = Arc::new(EventDescriptor {
            token: registry.next_token(TokenKind::Event),
            name: self.name,
            declaring_type: declaring.into(),
            handler_type: (&self.handler_type).into(),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        });
        for attribute in self.attributes {
            event.custom_attributes.push(Arc::new(attribute));
        }

        declaring.events.push(event.clone());
        Ok(event)
    }
}

/// Provides a fluent API for adding an instance constructor to a type
pub struct ConstructorBuilder {
    access: MethodAccessFlags,
    params: Vec<ParamDescriptor>,
    factory: Option<ConstructorFn>,
}

impl Default for ConstructorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructorBuilder {
    /// Start a new public parameterless constructor
    pub fn new() -> Self {
        ConstructorBuilder {
            access: MethodAccessFlags::PUBLIC,
            params: Vec::new(),
            factory: None,
        }
    }

    /// `public`
    #[must_use]
    pub fn public(mut self) -> Self {
        self.access = MethodAccessFlags::PUBLIC;
        self
    }

    /// `private`
    #[must_use]
    pub fn private(mut self) -> Self {
        self.access = MethodAccessFlags::PRIVATE;
        self
    }

    /// `protected`
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.access = MethodAccessFlags::FAMILY;
        self
    }

    /// Append a parameter
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, param_type: &TypeRc) -> Self {
        self.params
            .push(param_descriptor(name, param_type, ParamModifier::None, None));
        self
    }

    /// Set the body that creates the instance
    #[must_use]
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&ActivationContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Add the constructor to `declaring`
    ///
    /// # Errors
    /// Returns [`Error::Argument`] without a factory or when `declaring` is an interface
    pub fn build(self, registry: &TypeRegistry, declaring: &TypeRc) -> Result<ConstructorRc> {
        if declaring.is_interface() {
            return Err(argument_error!(
                "Interface '{}' can not declare constructors",
                declaring.fullname()
            ));
        }
        let Some(factory) = self.factory else {
            return Err(argument_error!(
                "Constructor of '{}' has no factory",
                declaring.fullname()
            ));
        };

        let constructor = Arc::new(ConstructorDescriptor {
            token: registry.next_token(TokenKind::Method),
            access: self.access,
            params: self.params,
            factory,
        });

        declaring.constructors.push(constructor.clone());
        Ok(constructor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let registry = TypeRegistry::new().unwrap();

        let class = TypeBuilder::new("Order").namespace("App").build(&registry).unwrap();
        assert!(class.base().unwrap().is_object());
        assert!(class.flags.is_public());
        assert!(class.is_class());

        let point = TypeBuilder::new("Point").value_type().build(&registry).unwrap();
        assert_eq!(
            point.base().unwrap().token,
            WellKnownType::ValueType.token()
        );
        assert!(point.is_value_type());
        assert!(point.is_sealed());

        let shape = TypeBuilder::new("IShape").interface().build(&registry).unwrap();
        assert!(shape.base().is_none());
        assert!(shape.is_interface());

        let hidden = TypeBuilder::new("Hidden").internal().build(&registry).unwrap();
        assert!(!hidden.flags.is_public());
    }

    #[test]
    fn test_build_enumeration() {
        let registry = TypeRegistry::new().unwrap();
        let byte = registry.well_known(WellKnownType::Byte).unwrap();
        let color = TypeBuilder::new("Color")
            .enumeration(&byte)
            .build(&registry)
            .unwrap();

        assert!(color.is_enum());
        assert_eq!(color.base().unwrap().token, WellKnownType::Enum.token());
        assert_eq!(color.enum_underlying_type().unwrap().token, byte.token);
        assert_eq!(color.type_code(), crate::typesystem::TypeCode::Byte);

        let string = registry.well_known(WellKnownType::String).unwrap();
        assert!(TypeBuilder::new("Bad")
            .enumeration(&string)
            .build(&registry)
            .is_err());
    }

    #[test]
    fn test_build_generic_definition() {
        let registry = TypeRegistry::new().unwrap();
        let enumerable = registry.well_known(WellKnownType::GenericEnumerable).unwrap();
        let bag = TypeBuilder::new("Bag")
            .namespace("App")
            .generic_param("T")
            .implements_generic(&enumerable, &["T"])
            .build(&registry)
            .unwrap();

        assert_eq!(bag.name, "Bag`1");
        assert!(bag.is_generic_type_definition());
        let param = bag.generic_param("T").unwrap();
        assert!(param.is_generic_parameter());
        assert!(registry.get_by_fullname("T").is_none());

        assert!(TypeBuilder::new("Broken")
            .generic_param("T")
            .implements_generic(&enumerable, &["U"])
            .build(&registry)
            .is_err());
    }

    #[test]
    fn test_build_rejects_invalid_base() {
        let registry = TypeRegistry::new().unwrap();
        let int32 = registry.well_known(WellKnownType::Int32).unwrap();
        let shape = TypeBuilder::new("IShape").interface().build(&registry).unwrap();
        let order = TypeBuilder::new("Order").build(&registry).unwrap();

        assert!(matches!(
            TypeBuilder::new("Sub").extends(&int32).build(&registry),
            Err(Error::Argument { .. })
        ));
        assert!(matches!(
            TypeBuilder::new("Sub").extends(&shape).build(&registry),
            Err(Error::Argument { .. })
        ));
        assert!(matches!(
            TypeBuilder::new("Sub").implements(&order).build(&registry),
            Err(Error::NotInterfaceType(_))
        ));
    }

    #[test]
    fn test_build_hierarchy_limit() {
        let registry = TypeRegistry::with_config(crate::TypeSystemConfig {
            max_hierarchy_depth: 2,
            max_generic_depth: 32,
        })
        .unwrap();

        // Object is not counted
        let a = TypeBuilder::new("A").build(&registry).unwrap();
        let b = TypeBuilder::new("B").extends(&a).build(&registry).unwrap();
        let c = TypeBuilder::new("C").extends(&b).build(&registry).unwrap();
        assert!(matches!(
            TypeBuilder::new("D").extends(&c).build(&registry),
            Err(Error::RecursionLimit(2))
        ));
    }

    #[test]
    fn test_method_builder_preconditions() {
        let registry = TypeRegistry::new().unwrap();
        let concrete = TypeBuilder::new("Concrete").build(&registry).unwrap();
        let base_method = MethodBuilder::new("Run").build(&registry, &concrete).unwrap();

        assert!(MethodBuilder::new("Abstract")
            .abstract_method()
            .build(&registry, &concrete)
            .is_err());
        assert!(MethodBuilder::new("Run")
            .overrides(&base_method)
            .build(&registry, &concrete)
            .is_err());
        assert!(matches!(
            MethodBuilder::new("Explicit")
                .implements(&base_method)
                .build(&registry, &concrete),
            Err(Error::NotInterfaceType(_))
        ));
    }

    #[test]
    fn test_method_builder_modifiers() {
        let registry = TypeRegistry::new().unwrap();
        let shape = TypeBuilder::new("Shape")
            .abstract_class()
            .build(&registry)
            .unwrap();
        let circle = TypeBuilder::new("Circle").extends(&shape).build(&registry).unwrap();

        let area = MethodBuilder::new("Area")
            .abstract_method()
            .build(&registry, &shape)
            .unwrap();
        assert!(area.is_abstract());
        assert!(area.is_virtual());
        assert_eq!(area.return_type.token(), Some(WellKnownType::Void.token()));

        let circle_area = MethodBuilder::new("Area")
            .overrides(&area)
            .build(&registry, &circle)
            .unwrap();
        assert!(circle_area.is_virtual());
        assert!(!circle_area.modifiers.contains(MethodModifiers::NEW_SLOT));
        assert_eq!(circle_area.overridden().unwrap().token, area.token);
        assert_eq!(circle.methods.count(), 1);
    }

    #[test]
    fn test_constructor_builder() {
        let registry = TypeRegistry::new().unwrap();
        let shape = TypeBuilder::new("IShape").interface().build(&registry).unwrap();
        let order = TypeBuilder::new("Order").build(&registry).unwrap();

        assert!(ConstructorBuilder::new().build(&registry, &order).is_err());
        assert!(ConstructorBuilder::new()
            .factory(|_| Ok(Arc::new(())))
            .build(&registry, &shape)
            .is_err());

        let ctor = ConstructorBuilder::new()
            .private()
            .factory(|_| Ok(Arc::new(1_u8)))
            .build(&registry, &order)
            .unwrap();
        assert!(!ctor.is_public());
        assert_eq!(order.constructors.count(), 1);
    }

    #[test]
    fn test_field_builder_access() {
        let registry = TypeRegistry::new().unwrap();
        let int32 = registry.well_known(WellKnownType::Int32).unwrap();
        let order = TypeBuilder::new("Order").build(&registry).unwrap();

        let field = FieldBuilder::new("count", &int32)
            .public()
            .static_field()
            .build(&registry, &order)
            .unwrap();
        assert_eq!(field.flags.access(), FieldAttributes::PUBLIC);
        assert!(field.flags.contains(FieldAttributes::STATIC));

        let field = FieldBuilder::new("secret", &int32)
            .build(&registry, &order)
            .unwrap();
        assert_eq!(field.flags.access(), FieldAttributes::PRIVATE);
    }
}
