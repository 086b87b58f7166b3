//! Shared fixtures for the unit tests.
//!
//! [`AnimalKingdom`] registers a small class hierarchy in namespace `Zoo`:
//!
//! ```text
//! interface INoise          { int Volume(); }
//! interface IBark : INoise  { void Bark(); }
//!
//! [Serializable, Obsolete]
//! abstract class Animal     { string Name; int legs; virtual string Speak(); protected abstract void Eat(); }
//! class Dog : Animal, IBark { Dog(string, int); void Bark(); override string Speak(); int INoise.Volume(); event Barked; }
//! class Puppy : Dog         { private Puppy(); }
//! class Kennel<T> : IEnumerable<T>
//! class DogKennel : Kennel<Dog>
//! enum Color : byte
//! ```
//!
//! Instances of the animals are represented by [`Animal`].

use std::sync::Arc;

use crate::typesystem::{
    ConstructorBuilder, CustomAttribute, EventBuilder, FieldBuilder, MethodBuilder, MethodRc,
    PropertyBuilder, TypeBuilder, TypeRc, TypeRegistry, Value, WellKnownType,
};

/// The runtime representation of `Zoo.Animal` and its subclasses
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub name: String,
    pub legs: i32,
}

pub struct AnimalKingdom {
    pub registry: TypeRegistry,
    pub inoise: TypeRc,
    pub ibark: TypeRc,
    pub animal: TypeRc,
    pub dog: TypeRc,
    pub puppy: TypeRc,
    pub handler: TypeRc,
    pub kennel: TypeRc,
    pub dog_kennel: TypeRc,
    pub color: TypeRc,
}

impl AnimalKingdom {
    pub fn new() -> Self {
        let registry = TypeRegistry::new().unwrap();
        let void = registry.well_known(WellKnownType::Void).unwrap();
        let int32 = registry.well_known(WellKnownType::Int32).unwrap();
        let string = registry.well_known(WellKnownType::String).unwrap();
        let byte = registry.well_known(WellKnownType::Byte).unwrap();
        let enumerable = registry
            .well_known(WellKnownType::GenericEnumerable)
            .unwrap();

        let inoise = TypeBuilder::new("INoise")
            .namespace("Zoo")
            .interface()
            .build(&registry)
            .unwrap();
        let volume = MethodBuilder::new("Volume")
            .abstract_method()
            .returns(&int32)
            .build(&registry, &inoise)
            .unwrap();

        let ibark = TypeBuilder::new("IBark")
            .namespace("Zoo")
            .interface()
            .implements(&inoise)
            .build(&registry)
            .unwrap();
        MethodBuilder::new("Bark")
            .abstract_method()
            .build(&registry, &ibark)
            .unwrap();

        let handler = TypeBuilder::new("BarkHandler")
            .namespace("Zoo")
            .sealed()
            .build(&registry)
            .unwrap();

        let animal = TypeBuilder::new("Animal")
            .namespace("Zoo")
            .abstract_class()
            .attribute(CustomAttribute::new("System.SerializableAttribute"))
            .attribute(CustomAttribute::new("System.ObsoleteAttribute").not_inherited())
            .build(&registry)
            .unwrap();
        PropertyBuilder::new("Name", &string)
            .reads(|animal: &Animal| animal.name.clone())
            .build(&registry, &animal)
            .unwrap();
        FieldBuilder::new("legs", &int32)
            .reads(|animal: &Animal| animal.legs)
            .build(&registry, &animal)
            .unwrap();
        let speak = MethodBuilder::new("Speak")
            .virtual_method()
            .returns(&string)
            .attribute(
                CustomAttribute::new("System.ComponentModel.DescriptionAttribute")
                    .with_arg("Makes a sound"),
            )
            .build(&registry, &animal)
            .unwrap();
        MethodBuilder::new("Eat")
            .protected()
            .abstract_method()
            .returns(&void)
            .build(&registry, &animal)
            .unwrap();

        let dog = TypeBuilder::new("Dog")
            .namespace("Zoo")
            .extends(&animal)
            .implements(&ibark)
            .rust_type::<Animal>()
            .build(&registry)
            .unwrap();
        ConstructorBuilder::new()
            .param("name", &string)
            .param("legs", &int32)
            .factory(|ctx| {
                let animal: Value = Arc::new(Animal {
                    name: ctx.arg::<String>(0)?.clone(),
                    legs: *ctx.arg::<i32>(1)?,
                });
                Ok(animal)
            })
            .build(&registry, &dog)
            .unwrap();
        MethodBuilder::new("Bark").build(&registry, &dog).unwrap();
        MethodBuilder::new("Speak")
            .overrides(&speak)
            .returns(&string)
            .build(&registry, &dog)
            .unwrap();
        MethodBuilder::new("Zoo.INoise.Volume")
            .private()
            .returns(&int32)
            .implements(&volume)
            .build(&registry, &dog)
            .unwrap();
        EventBuilder::new("Barked", &handler)
            .build(&registry, &dog)
            .unwrap();

        let puppy = TypeBuilder::new("Puppy")
            .namespace("Zoo")
            .extends(&dog)
            .build(&registry)
            .unwrap();
        ConstructorBuilder::new()
            .private()
            .factory(|_| {
                let animal: Value = Arc::new(Animal {
                    name: "puppy".to_string(),
                    legs: 4,
                });
                Ok(animal)
            })
            .build(&registry, &puppy)
            .unwrap();

        let kennel = TypeBuilder::new("Kennel")
            .namespace("Zoo")
            .generic_param("T")
            .implements_generic(&enumerable, &["T"])
            .build(&registry)
            .unwrap();
        ConstructorBuilder::new()
            .factory(|ctx| {
                let residents: Value = Arc::new(vec![ctx.target.fullname()]);
                Ok(residents)
            })
            .build(&registry, &kennel)
            .unwrap();

        let dogs = registry
            .make_generic_type(&kennel, &[dog.clone()])
            .unwrap();
        let dog_kennel = TypeBuilder::new("DogKennel")
            .namespace("Zoo")
            .extends(&dogs)
            .build(&registry)
            .unwrap();

        let color = TypeBuilder::new("Color")
            .namespace("Zoo")
            .enumeration(&byte)
            .build(&registry)
            .unwrap();

        AnimalKingdom {
            registry,
            inoise,
            ibark,
            animal,
            dog,
            puppy,
            handler,
            kennel,
            dog_kennel,
            color,
        }
    }

    /// Look up a registered type by its full name
    pub fn well_known(&self, fullname: &str) -> TypeRc {
        self.registry
            .get_by_fullname(fullname)
            .unwrap_or_else(|| panic!("{fullname} is not registered"))
    }

    /// The first method named `name` declared by `ty`
    pub fn method(&self, ty: &TypeRc, name: &str) -> MethodRc {
        ty.get_methods(name)
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("{} has no method {name}", ty.fullname()))
    }

    /// Instantiate `Zoo.Dog` through its public constructor
    pub fn create_dog(&self, name: &str, legs: i32) -> Value {
        use crate::typesystem::TypeExt;

        let args: Vec<Value> = vec![Arc::new(name.to_string()), Arc::new(legs)];
        self.dog.create_instance(&args).unwrap()
    }
}
