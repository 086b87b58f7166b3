//! Instance creation through registered constructors.
//!
//! A constructor is a factory closure plus a parameter list. Activation picks the first
//! constructor whose visibility is allowed, whose arity matches and whose parameters accept
//! the Rust type of every argument.

use std::{any::Any, sync::Arc};

use crate::{
    typesystem::{MethodAccessFlags, ParamDescriptor, Token, TypeDescriptor, TypeRc, Value},
    Error, Result,
};

/// A constructor body: builds a value from the activation context
pub type ConstructorFn = Arc<dyn Fn(&ActivationContext<'_>) -> Result<Value> + Send + Sync>;
/// A reference to a `ConstructorDescriptor`
pub type ConstructorRc = Arc<ConstructorDescriptor>;
/// A vector that holds a list of `ConstructorDescriptor`
pub type ConstructorList = Arc<boxcar::Vec<ConstructorRc>>;

/// Inputs of a constructor call
pub struct ActivationContext<'a> {
    /// The type being instantiated. For a closed generic type this is the closed type, while
    /// the constructor itself was registered on the definition.
    pub target: &'a TypeRc,
    /// The arguments, already matched against the constructor parameters
    pub args: &'a [Value],
}

impl ActivationContext<'_> {
    /// Access argument `index` as a `T`
    ///
    /// # Errors
    /// Returns [`Error::Argument`] if the index is out of range and [`Error::InvalidCast`] if
    /// the argument is not a `T`
    pub fn arg<T: Any>(&self, index: usize) -> Result<&T> {
        let Some(value) = self.args.get(index) else {
            return Err(argument_error!(
                "Argument index {} out of range for {} argument(s)",
                index,
                self.args.len()
            ));
        };
        value.downcast_ref::<T>().ok_or_else(|| Error::InvalidCast {
            key: format!("argument {index}"),
            expected: std::any::type_name::<T>(),
        })
    }
}

/// An instance constructor
pub struct ConstructorDescriptor {
    /// Token
    pub token: Token,
    /// Visibility
    pub access: MethodAccessFlags,
    /// The parameters
    pub params: Vec<ParamDescriptor>,
    /// Builds the instance
    pub factory: ConstructorFn,
}

impl ConstructorDescriptor {
    /// Visible to everyone
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access == MethodAccessFlags::PUBLIC
    }

    /// Check if the arguments fit the parameters.
    ///
    /// Parameters whose type declares a Rust representation only accept values of exactly
    /// that Rust type, all other parameters accept any value.
    #[must_use]
    pub fn accepts(&self, args: &[Value]) -> bool {
        if args.len() != self.params.len() {
            return false;
        }

        self.params.iter().zip(args).all(|(param, arg)| {
            match param.param_type.upgrade().and_then(|t| t.rust_type()) {
                Some(expected) => (**arg).type_id() == expected,
                None => true,
            }
        })
    }
}

/// Create an instance of `target`.
///
/// ## Arguments
/// * `target` - The type to instantiate
/// * `args` - Constructor arguments
/// * `non_public` - Also consider non-public constructors
pub(crate) fn activate(target: &TypeRc, args: &[Value], non_public: bool) -> Result<Value> {
    if !is_activatable(target) {
        return Err(Error::Activation(target.fullname()));
    }

    let constructor = target
        .constructors
        .iter()
        .map(|(_, ctor)| ctor)
        .filter(|ctor| non_public || ctor.is_public())
        .find(|ctor| ctor.accepts(args));

    match constructor {
        Some(ctor) => {
            log::trace!("Activating {} with {} argument(s)", target.fullname(), args.len());
            (ctor.factory)(&ActivationContext { target, args })
        }
        None => Err(Error::MissingConstructor {
            type_name: target.fullname(),
            arity: args.len(),
        }),
    }
}

fn is_activatable(target: &TypeDescriptor) -> bool {
    !(target.is_abstract()
        || target.is_generic_type_definition()
        || target.is_generic_parameter()
        || target.is_pointer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::AnimalKingdom,
        typesystem::{TypeExt, WellKnownType},
    };

    #[test]
    fn test_activate_with_args() {
        let kingdom = AnimalKingdom::new();
        let rex = kingdom.create_dog("Rex", 3);
        let dog = rex.downcast_ref::<crate::test::Animal>().unwrap();
        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.legs, 3);
    }

    #[test]
    fn test_activate_rejects_wrong_argument_types() {
        let kingdom = AnimalKingdom::new();
        let args: Vec<Value> = vec![Arc::new(5_u8), Arc::new(4_i32)];
        let result = kingdom.dog.create_instance(&args);
        assert!(matches!(
            result,
            Err(Error::MissingConstructor { arity: 2, .. })
        ));
    }

    #[test]
    fn test_activate_abstract_and_interface() {
        let kingdom = AnimalKingdom::new();
        assert!(matches!(
            kingdom.animal.create_instance(&[]),
            Err(Error::Activation(_))
        ));
        assert!(matches!(
            kingdom.ibark.create_instance(&[]),
            Err(Error::Activation(_))
        ));
    }

    #[test]
    fn test_activate_non_public() {
        let kingdom = AnimalKingdom::new();
        assert!(matches!(
            kingdom.puppy.create_instance_non_public(false),
            Err(Error::MissingConstructor { arity: 0, .. })
        ));
        let puppy = kingdom.puppy.create_instance_non_public(true).unwrap();
        assert_eq!(
            puppy.downcast_ref::<crate::test::Animal>().unwrap().name,
            "puppy"
        );
    }

    #[test]
    fn test_activate_primitive_default() {
        let kingdom = AnimalKingdom::new();
        let int32 = kingdom.registry.well_known(WellKnownType::Int32).unwrap();
        let value = int32.create_instance(&[]).unwrap();
        assert_eq!(*value.downcast_ref::<i32>().unwrap(), 0);
    }

    #[test]
    fn test_context_arg() {
        let target = AnimalKingdom::new().dog;
        let args: Vec<Value> = vec![Arc::new(String::from("x"))];
        let context = ActivationContext {
            target: &target,
            args: &args,
        };
        assert_eq!(context.arg::<String>(0).unwrap(), "x");
        assert!(matches!(
            context.arg::<i32>(0),
            Err(Error::InvalidCast { .. })
        ));
        assert!(matches!(context.arg::<i32>(1), Err(Error::Argument { .. })));
    }
}
