//! Members of a type: fields, properties, methods and events.
//!
//! Member descriptors reference their declaring type and their value type weakly, the owning
//! [`crate::typesystem::TypeRegistry`] keeps those alive. Fields and properties may carry a
//! getter closure that reads the member from a runtime instance.

use std::{
    any::Any,
    sync::{Arc, OnceLock},
};

use crate::{
    typesystem::{
        CustomAttributeList, FieldAttributes, MethodAccessFlags, MethodModifiers, ParamModifier,
        Token, TypeRc, TypeRef,
    },
    Result,
};

/// A type-erased runtime value
pub type Value = Arc<dyn Any + Send + Sync>;

/// Reads a member value from an instance
pub type Getter = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// A reference to a `FieldDescriptor`
pub type FieldRc = Arc<FieldDescriptor>;
/// A vector that holds a list of `FieldDescriptor`
pub type FieldList = Arc<boxcar::Vec<FieldRc>>;
/// A reference to a `PropertyDescriptor`
pub type PropertyRc = Arc<PropertyDescriptor>;
/// A vector that holds a list of `PropertyDescriptor`
pub type PropertyList = Arc<boxcar::Vec<PropertyRc>>;
/// A reference to an `EventDescriptor`
pub type EventRc = Arc<EventDescriptor>;
/// A vector that holds a list of `EventDescriptor`
pub type EventList = Arc<boxcar::Vec<EventRc>>;
/// A reference to a `MethodDescriptor`
pub type MethodRc = Arc<MethodDescriptor>;
/// A vector that holds a list of `MethodDescriptor`
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;
/// A vector that holds a list of `MethodImpl`
pub type MethodImplList = Arc<boxcar::Vec<MethodImpl>>;

/// A field of a type
pub struct FieldDescriptor {
    /// Token
    pub token: Token,
    /// Name of the field
    pub name: String,
    /// The type that declares this field
    pub declaring_type: TypeRef,
    /// The type of the field
    pub field_type: TypeRef,
    /// Access and modifiers
    pub flags: FieldAttributes,
    /// Reads the field from an instance
    pub getter: Option<Getter>,
    /// All custom attributes this field has
    pub custom_attributes: CustomAttributeList,
}

impl FieldDescriptor {
    /// Read the value of this field from `instance`, `None` without a getter
    ///
    /// # Errors
    /// Propagates the failure of the getter
    pub fn get_value(&self, instance: &Value) -> Result<Option<Value>> {
        match &self.getter {
            Some(getter) => Ok(Some(getter(instance)?)),
            None => Ok(None),
        }
    }
}

/// A property of a type
pub struct PropertyDescriptor {
    /// Token
    pub token: Token,
    /// Name of the property
    pub name: String,
    /// The type that declares this property
    pub declaring_type: TypeRef,
    /// The type of the property
    pub property_type: TypeRef,
    /// The `get` accessor
    pub getter: Option<Getter>,
    /// All custom attributes this property has
    pub custom_attributes: CustomAttributeList,
}

impl PropertyDescriptor {
    /// Read the value of this property from `instance`, `None` for write-only properties
    ///
    /// # Errors
    /// Propagates the failure of the getter
    pub fn get_value(&self, instance: &Value) -> Result<Option<Value>> {
        match &self.getter {
            Some(getter) => Ok(Some(getter(instance)?)),
            None => Ok(None),
        }
    }
}

/// An event of a type
pub struct EventDescriptor {
    /// Token
    pub token: Token,
    /// Name of the event
    pub name: String,
    /// The type that declares this event
    pub declaring_type: TypeRef,
    /// The delegate type of the handlers
    pub handler_type: TypeRef,
    /// All custom attributes this event has
    pub custom_attributes: CustomAttributeList,
}

/// A parameter of a method or constructor
#[derive(Clone)]
pub struct ParamDescriptor {
    /// Name of the parameter
    pub name: String,
    /// The declared type of the parameter
    pub param_type: TypeRef,
    /// How the argument is passed
    pub modifier: ParamModifier,
    /// The default value, as it appears in source
    pub default_value: Option<String>,
}

/// A method of a type
pub struct MethodDescriptor {
    /// Token
    pub token: Token,
    /// Name of the method
    pub name: String,
    /// The type that declares this method
    pub declaring_type: TypeRef,
    /// Visibility
    pub access: MethodAccessFlags,
    /// Static, virtual, abstract, ...
    pub modifiers: MethodModifiers,
    /// The return type, `System.Void` if nothing is returned
    pub return_type: TypeRef,
    /// Names of the generic method parameters
    pub generic_params: Vec<String>,
    /// The parameters
    pub params: Vec<ParamDescriptor>,
    /// The base class method this method overrides
    pub(crate) overrides: OnceLock<MethodRc>,
    /// All custom attributes this method has
    pub custom_attributes: CustomAttributeList,
}

impl MethodDescriptor {
    /// Accessible by anyone
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access == MethodAccessFlags::PUBLIC
    }

    /// Accessible by the type and its sub-types (`protected`)
    #[must_use]
    pub fn is_family(&self) -> bool {
        self.access == MethodAccessFlags::FAMILY
    }

    /// Accessible inside the assembly (`internal`)
    #[must_use]
    pub fn is_assembly(&self) -> bool {
        self.access == MethodAccessFlags::ASSEM
    }

    /// Accessible only by the declaring type
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.access == MethodAccessFlags::PRIVATE
    }

    /// Defined on the type instead of the instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }

    /// Method takes part in virtual dispatch
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.modifiers.contains(MethodModifiers::VIRTUAL)
    }

    /// Method has no implementation
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(MethodModifiers::ABSTRACT)
    }

    /// Method declares generic parameters of its own
    #[must_use]
    pub fn is_generic_method(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// The method this one overrides
    #[must_use]
    pub fn overridden(&self) -> Option<MethodRc> {
        self.overrides.get().cloned()
    }

    /// The type that declares the first definition of this method along the override chain
    #[must_use]
    pub fn base_definition_type(&self) -> Option<TypeRc> {
        let mut current = self.overridden();
        let mut declaring = self.declaring_type.upgrade();
        while let Some(method) = current {
            declaring = method.declaring_type.upgrade();
            current = method.overridden();
        }
        declaring
    }

    /// The declaring type
    #[must_use]
    pub fn declaring_type(&self) -> Option<TypeRc> {
        self.declaring_type.upgrade()
    }
}

/// Binds an interface method to the method implementing it (`void IFoo.Bar()`)
#[derive(Clone)]
pub struct MethodImpl {
    /// The interface method
    pub interface_method: MethodRc,
    /// The implementation
    pub body: MethodRc,
}

/// Kind of a `Member`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A field
    Field,
    /// A property
    Property,
    /// A method
    Method,
    /// An event
    Event,
}

/// Any member of a type
#[derive(Clone)]
pub enum Member {
    /// A field
    Field(FieldRc),
    /// A property
    Property(PropertyRc),
    /// A method
    Method(MethodRc),
    /// An event
    Event(EventRc),
}

impl Member {
    /// Name of the member
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Property(property) => &property.name,
            Member::Method(method) => &method.name,
            Member::Event(event) => &event.name,
        }
    }

    /// Kind of the member
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Field(_) => MemberKind::Field,
            Member::Property(_) => MemberKind::Property,
            Member::Method(_) => MemberKind::Method,
            Member::Event(_) => MemberKind::Event,
        }
    }

    /// The type that declares this member
    #[must_use]
    pub fn declaring_type(&self) -> Option<TypeRc> {
        match self {
            Member::Field(field) => field.declaring_type.upgrade(),
            Member::Property(property) => property.declaring_type.upgrade(),
            Member::Method(method) => method.declaring_type.upgrade(),
            Member::Event(event) => event.declaring_type.upgrade(),
        }
    }

    /// The type of the member: field type, property type, method return type or event handler
    /// type
    #[must_use]
    pub fn member_type(&self) -> Option<TypeRc> {
        match self {
            Member::Field(field) => field.field_type.upgrade(),
            Member::Property(property) => property.property_type.upgrade(),
            Member::Method(method) => method.return_type.upgrade(),
            Member::Event(event) => event.handler_type.upgrade(),
        }
    }

    /// Read the member from `instance`. Only fields and properties have values, methods and
    /// events yield `None`.
    ///
    /// # Errors
    /// Propagates the failure of the getter
    pub fn member_value(&self, instance: &Value) -> Result<Option<Value>> {
        match self {
            Member::Field(field) => field.get_value(instance),
            Member::Property(property) => property.get_value(instance),
            Member::Method(_) | Member::Event(_) => Ok(None),
        }
    }
}
