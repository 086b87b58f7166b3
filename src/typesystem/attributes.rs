//! Custom attributes attached to types and members.
//!
//! Attributes are identified by name. A lookup accepts the full name
//! (`System.ObsoleteAttribute`), the short name (`ObsoleteAttribute`) or the short name without
//! the conventional `Attribute` suffix (`Obsolete`).
//!
//! With `inherit` set, types also report the inheritable attributes of their base types and
//! methods those of the methods they override. Fields, properties and events never inherit.

use std::sync::Arc;

use crate::typesystem::{
    EventDescriptor, FieldDescriptor, MethodDescriptor, PropertyDescriptor, TypeDescriptor,
};

/// A reference to a `CustomAttribute`
pub type CustomAttributeRc = Arc<CustomAttribute>;
/// A vector that holds a list of `CustomAttribute`
pub type CustomAttributeList = Arc<boxcar::Vec<CustomAttributeRc>>;

/// Upper bound for inheritance walks, registries reject deeper hierarchies on insert
const MAX_INHERITANCE_WALK: usize = 1024;

/// A custom attribute instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAttribute {
    /// Full name of the attribute type
    pub name: String,
    /// Positional constructor arguments, rendered as strings
    pub args: Vec<String>,
    /// Named arguments (`Name = value`)
    pub named_args: Vec<(String, String)>,
    /// Whether derived types and overriding methods see this attribute (`AttributeUsage.Inherited`)
    pub inherited: bool,
}

impl CustomAttribute {
    /// Create a new inheritable attribute without arguments
    pub fn new(name: impl Into<String>) -> Self {
        CustomAttribute {
            name: name.into(),
            args: Vec::new(),
            named_args: Vec::new(),
            inherited: true,
        }
    }

    /// Add a positional argument
    #[must_use]
    pub fn with_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Add a named argument
    #[must_use]
    pub fn with_named_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named_args.push((name.into(), value.into()));
        self
    }

    /// Mark the attribute as not visible to derived types
    #[must_use]
    pub fn not_inherited(mut self) -> Self {
        self.inherited = false;
        self
    }

    /// The name without namespace
    #[must_use]
    pub fn short_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }

    /// Check if this attribute is known under `name`
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let short = self.short_name();
        self.name == name || short == name || short.strip_suffix("Attribute") == Some(name)
    }

    /// Look up a named argument
    #[must_use]
    pub fn named_arg(&self, name: &str) -> Option<&str> {
        self.named_args
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Access to the custom attributes of a type or member
pub trait AttributeProvider {
    /// The attributes declared directly on this item
    fn declared_attributes(&self) -> &CustomAttributeList;

    /// The item attributes are inherited from, if any
    fn inheritance_parent(&self) -> Option<Arc<Self>>
    where
        Self: Sized,
    {
        None
    }

    /// All attributes matching `name`, own declarations first.
    ///
    /// ## Arguments
    /// * `name` - Full, short, or suffix-less attribute name
    /// * `inherit` - Also search the inheritance chain, honoring [`CustomAttribute::inherited`]
    fn get_custom_attributes(&self, name: &str, inherit: bool) -> Vec<CustomAttributeRc>
    where
        Self: Sized,
    {
        let mut result: Vec<CustomAttributeRc> = self
            .declared_attributes()
            .iter()
            .filter(|(_, attr)| attr.matches(name))
            .map(|(_, attr)| attr.clone())
            .collect();

        if inherit {
            let mut current = self.inheritance_parent();
            let mut hops = 0;
            while let Some(parent) = current {
                if hops >= MAX_INHERITANCE_WALK {
                    break;
                }
                hops += 1;

                result.extend(
                    parent
                        .declared_attributes()
                        .iter()
                        .filter(|(_, attr)| attr.inherited && attr.matches(name))
                        .map(|(_, attr)| attr.clone()),
                );
                current = parent.inheritance_parent();
            }
        }

        result
    }

    /// Check if an attribute matching `name` is present
    fn is_defined(&self, name: &str, inherit: bool) -> bool
    where
        Self: Sized,
    {
        !self.get_custom_attributes(name, inherit).is_empty()
    }
}

impl AttributeProvider for TypeDescriptor {
    fn declared_attributes(&self) -> &CustomAttributeList {
        &self.custom_attributes
    }

    fn inheritance_parent(&self) -> Option<Arc<Self>> {
        self.base()
    }
}

impl AttributeProvider for MethodDescriptor {
    fn declared_attributes(&self) -> &CustomAttributeList {
        &self.custom_attributes
    }

    fn inheritance_parent(&self) -> Option<Arc<Self>> {
        self.overridden()
    }
}

impl AttributeProvider for FieldDescriptor {
    fn declared_attributes(&self) -> &CustomAttributeList {
        &self.custom_attributes
    }
}

impl AttributeProvider for PropertyDescriptor {
    fn declared_attributes(&self) -> &CustomAttributeList {
        &self.custom_attributes
    }
}

impl AttributeProvider for EventDescriptor {
    fn declared_attributes(&self) -> &CustomAttributeList {
        &self.custom_attributes
    }
}
