//! Central type registry.
//!
//! The `TypeRegistry` owns every [`TypeDescriptor`] and hands out tokens for new types and
//! members. It is seeded with the well-known runtime types, closes generic definitions,
//! builds array and pointer types, and answers name and interface lookups.
//!
//! # Registry Architecture
//!
//! - **Token-based lookup**: Primary storage in a `SkipMap`
//! - **Name-based lookup**: Secondary `DashMap` index by full name (generic parameters are not
//!   indexed)
//! - **Rust type lookup**: First type registered with a given `TypeId`
//! - **Construction caches**: Closed generic types and array/pointer types are deduplicated
//!
//! # Thread Safety
//!
//! All operations take `&self`. Lookups never block, construction of a closed generic or array
//! type is atomic per key: concurrent requests for `List<int>` yield the same descriptor, with its
//! base type and interfaces attached. Closed generic types are built by one thread at a time and
//! stay private to that thread until the outermost construction succeeds. A failed construction
//! leaves nothing behind.
//!
//! # Examples
//!
//! ```rust
//! use pure_ext::typesystem::{TypeExt, TypeRegistry, WellKnownType};
//!
//! let registry = TypeRegistry::new()?;
//! let int32 = registry.well_known(WellKnownType::Int32)?;
//! let nullable = registry.get_nullable_type(&int32)?;
//!
//! assert_eq!(nullable.fullname(), "System.Nullable`1[System.Int32]");
//! assert!(nullable.is_nullable_type());
//! assert_eq!(nullable.get_non_nullable_type().token, int32.token);
//! # Ok::<(), pure_ext::Error>(())
//! ```

use std::{
    any::{Any, TypeId},
    sync::{
        atomic::{AtomicBool, AtomicU32, Ordering},
        Arc, Condvar, Mutex, MutexGuard, PoisonError,
    },
    thread::{self, ThreadId},
    time::SystemTime,
};

use crossbeam_skiplist::SkipMap;
use dashmap::{mapref::entry::Entry, DashMap};
use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::{
    typesystem::{
        ConstructorDescriptor, MethodAccessFlags, Token, TokenKind, TypeAttributes,
        TypeDescriptor, TypeExt, TypeFlavor, TypeRc, TypeSystemConfig, Value, WellKnownType,
    },
    Error, Result,
};

/// Key of the array / pointer construction cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DerivedKind {
    Array(u32),
    Pointer,
}

/// Key of the closed generic cache: definition and argument tokens
type GenericKey = (Token, Vec<Token>);

/// A closed generic type, shared with other threads once `complete` is set
struct GenericInstance {
    closed: TypeRc,
    complete: AtomicBool,
}

/// Ownership of generic construction, reentrant for the owning thread
#[derive(Default)]
struct Construction {
    state: Mutex<ConstructionState>,
    released: Condvar,
}

#[derive(Default)]
struct ConstructionState {
    owner: Option<ThreadId>,
    depth: usize,
    /// Instances created since the outermost construction started
    pending: Vec<GenericKey>,
}

/// Held for the duration of one `close_generic` call.
///
/// Dropping the outermost guard publishes every pending instance if that call succeeded and
/// discards them otherwise, then hands construction to the next waiting thread.
struct ConstructionGuard<'a> {
    registry: &'a TypeRegistry,
    succeeded: bool,
}

impl ConstructionGuard<'_> {
    fn state(&self) -> MutexGuard<'_, ConstructionState> {
        self.registry
            .construction
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn track(&self, key: GenericKey) {
        self.state().pending.push(key);
    }

    fn untrack(&self, key: &GenericKey) {
        self.state().pending.retain(|pending| pending != key);
    }
}

impl Drop for ConstructionGuard<'_> {
    fn drop(&mut self) {
        let registry = self.registry;
        let mut state = self.state();
        state.depth = state.depth.saturating_sub(1);
        if state.depth > 0 {
            return;
        }

        for key in std::mem::take(&mut state.pending) {
            if self.succeeded {
                registry.publish_instance(&key);
            } else {
                registry.generic_instances.remove(&key);
            }
        }
        state.owner = None;
        drop(state);
        registry.construction.released.notify_all();
    }
}

/// Registry of all known types.
///
/// # Performance Characteristics
///
/// - **Token lookup**: O(log n) using skip list
/// - **Name lookup**: O(1) average using the hash index, O(n) for case-insensitive fallback
/// - **Registration**: O(log n) + O(1) for indexing
pub struct TypeRegistry {
    /// Primary type storage indexed by token
    types: SkipMap<Token, TypeRc>,
    /// Per kind row counters for new tokens
    counters: DashMap<TokenKind, AtomicU32>,
    /// Secondary index: types indexed by full name
    types_by_fullname: DashMap<String, Vec<Token>>,
    /// Secondary index: first type registered for a Rust type
    types_by_rust_type: DashMap<TypeId, Token>,
    /// Closed generic types, by definition and arguments
    generic_instances: DashMap<GenericKey, GenericInstance>,
    /// Serialises the construction of closed generic types
    construction: Construction,
    /// Array and pointer types, by element type
    derived_types: DashMap<(Token, DerivedKind), TypeRc>,
    /// Limits for recursive walks
    config: TypeSystemConfig,
}

impl TypeRegistry {
    /// Create a new registry with the default [`TypeSystemConfig`], seeded with the well-known
    /// types.
    ///
    /// # Errors
    /// Returns an error if the well-known types can not be initialized, which indicates an
    /// internal inconsistency
    pub fn new() -> Result<Self> {
        Self::with_config(TypeSystemConfig::default())
    }

    /// Create a new registry with custom limits
    ///
    /// # Errors
    /// Returns an error if the well-known types can not be initialized
    pub fn with_config(config: TypeSystemConfig) -> Result<Self> {
        let registry = TypeRegistry {
            types: SkipMap::new(),
            counters: DashMap::new(),
            types_by_fullname: DashMap::new(),
            types_by_rust_type: DashMap::new(),
            generic_instances: DashMap::new(),
            construction: Construction::default(),
            derived_types: DashMap::new(),
            config,
        };

        registry.initialize_well_known()?;
        Ok(registry)
    }

    /// The limits this registry enforces
    pub fn config(&self) -> &TypeSystemConfig {
        &self.config
    }

    /// Get the next available token of a kind
    pub fn next_token(&self, kind: TokenKind) -> Token {
        let row = self
            .counters
            .entry(kind)
            .or_insert_with(|| AtomicU32::new(1))
            .fetch_add(1, Ordering::Relaxed);
        debug_assert!(row <= 0x00FF_FFFF, "We ran out of rows for {kind:?}");

        Token::from_parts(kind, row)
    }

    fn initialize_well_known(&self) -> Result<()> {
        for kind in WellKnownType::iter() {
            let new_type = Arc::new(TypeDescriptor::new(
                kind.token(),
                kind.namespace(),
                kind.name(),
                kind.flavor(),
                well_known_flags(kind),
            ));

            if let Some(base) = kind.base() {
                new_type.set_base(&self.well_known(base)?);
            }

            for (index, name) in kind.generic_params().iter().enumerate() {
                let param = self.create_generic_param(name, index)?;
                new_type.generic_params.push(param.into());
            }

            self.attach_runtime_representation(kind, &new_type);
            self.insert(&new_type);
        }

        let enumerable = self.well_known(WellKnownType::Enumerable)?;
        self.well_known(WellKnownType::GenericEnumerable)?
            .interfaces
            .push(enumerable.clone().into());
        self.well_known(WellKnownType::Array)?
            .interfaces
            .push(enumerable.into());

        let char_enumerable = self.make_generic_type(
            &self.well_known(WellKnownType::GenericEnumerable)?,
            &[self.well_known(WellKnownType::Char)?],
        )?;
        self.well_known(WellKnownType::String)?
            .interfaces
            .push(char_enumerable.into());

        Ok(())
    }

    /// Runtime primitives and `Decimal` get a parameterless constructor that yields the Rust
    /// default value
    fn attach_runtime_representation(&self, kind: WellKnownType, new_type: &TypeRc) {
        match kind {
            WellKnownType::Boolean => self.attach_default::<bool>(new_type),
            WellKnownType::Char => self.attach_default::<char>(new_type),
            WellKnownType::SByte => self.attach_default::<i8>(new_type),
            WellKnownType::Byte => self.attach_default::<u8>(new_type),
            WellKnownType::Int16 => self.attach_default::<i16>(new_type),
            WellKnownType::UInt16 => self.attach_default::<u16>(new_type),
            WellKnownType::Int32 => self.attach_default::<i32>(new_type),
            WellKnownType::UInt32 => self.attach_default::<u32>(new_type),
            WellKnownType::Int64 => self.attach_default::<i64>(new_type),
            WellKnownType::UInt64 => self.attach_default::<u64>(new_type),
            WellKnownType::Single => self.attach_default::<f32>(new_type),
            WellKnownType::Double | WellKnownType::Decimal => {
                self.attach_default::<f64>(new_type);
            }
            WellKnownType::IntPtr => self.attach_default::<isize>(new_type),
            WellKnownType::UIntPtr => self.attach_default::<usize>(new_type),
            WellKnownType::DateTime => {
                new_type.set_rust_type(TypeId::of::<SystemTime>());
                self.attach_constructor(new_type, || Arc::new(SystemTime::UNIX_EPOCH));
            }
            WellKnownType::String => {
                new_type.set_rust_type(TypeId::of::<String>());
            }
            _ => {}
        }
    }

    fn attach_default<T: Default + Any + Send + Sync>(&self, new_type: &TypeRc) {
        new_type.set_rust_type(TypeId::of::<T>());
        self.attach_constructor(new_type, || Arc::new(T::default()));
    }

    fn attach_constructor(&self, new_type: &TypeRc, make: fn() -> Value) {
        new_type.constructors.push(Arc::new(ConstructorDescriptor {
            token: self.next_token(TokenKind::Method),
            access: MethodAccessFlags::PUBLIC,
            params: Vec::new(),
            factory: Arc::new(move |_| Ok(make())),
        }));
    }

    /// Create and register a generic type parameter (`T`)
    ///
    /// ## Arguments
    /// * `name` - Name of the parameter
    /// * `index` - Position in the parameter list of the declaring definition
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if `System.Object` is missing
    pub(crate) fn create_generic_param(&self, name: &str, index: usize) -> Result<TypeRc> {
        let param = Arc::new(TypeDescriptor::new(
            self.next_token(TokenKind::TypeSpec),
            "",
            name,
            TypeFlavor::GenericParameter {
                index: u32::try_from(index)
                    .map_err(|_| argument_error!("Too many generic parameters: {}", index))?,
                method: false,
            },
            TypeAttributes::NOT_PUBLIC,
        ));
        param.set_base(&self.well_known(WellKnownType::Object)?);

        self.insert(&param);
        Ok(param)
    }

    /// Insert a `TypeDescriptor` into the registry
    ///
    /// ## Arguments
    /// * `new_type` - The type to register
    pub fn insert(&self, new_type: &TypeRc) {
        self.types.insert(new_type.token, new_type.clone());

        if let Some(id) = new_type.rust_type() {
            self.types_by_rust_type.entry(id).or_insert(new_type.token);
        }

        if new_type.is_generic_parameter() {
            return;
        }

        let fullname = new_type.fullname();
        let mut tokens = self.types_by_fullname.entry(fullname.clone()).or_default();
        if !tokens.is_empty() {
            log::warn!(
                "Type '{}' registered more than once ({} and {})",
                fullname,
                tokens[0],
                new_type.token
            );
        }
        tokens.push(new_type.token);

        log::trace!("Registered type '{}' as {}", fullname, new_type.token);
    }

    /// Look up a type by its token
    pub fn get(&self, token: &Token) -> Option<TypeRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Get one of the seeded well-known types
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the type is not registered
    pub fn well_known(&self, kind: WellKnownType) -> Result<TypeRc> {
        self.get(&kind.token())
            .ok_or_else(|| Error::TypeNotFound(kind.token()))
    }

    /// Look up the first type registered under a full name (`Namespace.Name`)
    pub fn get_by_fullname(&self, fullname: &str) -> Option<TypeRc> {
        let tokens = self.types_by_fullname.get(fullname)?;
        tokens.iter().find_map(|token| self.get(token))
    }

    /// Look up the first type registered with `T` as its Rust representation
    pub fn get_by_rust_type<T: Any>(&self) -> Option<TypeRc> {
        let token = *self.types_by_rust_type.get(&TypeId::of::<T>())?;
        self.get(&token)
    }

    /// Count of types in the registry
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over all types in the registry
    pub fn iter(&self) -> crossbeam_skiplist::map::Iter<'_, Token, TypeRc> {
        self.types.iter()
    }

    /// Get all types in the registry, in token order
    pub fn all_types(&self) -> Vec<TypeRc> {
        self.types
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Resolve a type by name.
    ///
    /// The lookup ignores case. An assembly-qualified name (`Name, Assembly, Version=...`) is
    /// retried with everything from the first comma stripped.
    pub fn parse_type(&self, type_name: &str) -> Option<TypeRc> {
        let type_name = type_name.trim();
        if let Some(found) = self.lookup_ignore_case(type_name) {
            return Some(found);
        }

        let (name, _qualification) = type_name.split_once(',')?;
        self.lookup_ignore_case(name.trim())
    }

    fn lookup_ignore_case(&self, type_name: &str) -> Option<TypeRc> {
        if type_name.is_empty() {
            return None;
        }
        if let Some(found) = self.get_by_fullname(type_name) {
            return Some(found);
        }

        let token = self
            .types_by_fullname
            .iter()
            .find(|entry| entry.key().eq_ignore_ascii_case(type_name))
            .and_then(|entry| entry.value().first().copied())?;
        self.get(&token)
    }

    /// Close a generic definition over `args`.
    ///
    /// Generic parameters of the definition are substituted through its base type and
    /// interfaces. Closed types are deduplicated: the same definition and arguments always
    /// yield the same descriptor.
    ///
    /// # Errors
    /// Returns [`Error::Argument`] if `definition` is not a generic definition or the number
    /// of arguments differs from its parameters, and [`Error::RecursionLimit`] if substitution
    /// nests deeper than [`TypeSystemConfig::max_generic_depth`]
    pub fn make_generic_type(&self, definition: &TypeRc, args: &[TypeRc]) -> Result<TypeRc> {
        self.close_generic(definition, args, 0)
    }

    fn close_generic(&self, definition: &TypeRc, args: &[TypeRc], depth: usize) -> Result<TypeRc> {
        if depth > self.config.max_generic_depth {
            return Err(Error::RecursionLimit(self.config.max_generic_depth));
        }

        if !definition.is_generic_type_definition() {
            return Err(argument_error!(
                "Type '{}' is not a generic type definition",
                definition.fullname()
            ));
        }

        let expected = definition.generic_params.count();
        if args.len() != expected {
            return Err(argument_error!(
                "Type '{}' expects {} generic argument(s), got {}",
                definition.fullname(),
                expected,
                args.len()
            ));
        }

        let key: GenericKey = (
            definition.token,
            args.iter().map(|arg| arg.token).collect::<Vec<_>>(),
        );
        if let Some(closed) = self.completed_instance(&key) {
            return Ok(closed);
        }

        let mut guard = self.enter_construction();
        let closed = match self.generic_instances.entry(key.clone()) {
            // Either finished while this thread waited, or still being built further up the
            // stack of this thread (self-referential definitions)
            Entry::Occupied(existing) => {
                guard.succeeded = true;
                return Ok(existing.get().closed.clone());
            }
            Entry::Vacant(slot) => {
                let closed = Arc::new(TypeDescriptor::new_closed(
                    self.next_token(TokenKind::TypeSpec),
                    definition,
                ));
                for arg in args {
                    closed.generic_args.push(arg.into());
                }
                slot.insert(GenericInstance {
                    closed: closed.clone(),
                    complete: AtomicBool::new(false),
                });
                closed
            }
        };
        guard.track(key.clone());

        match self.attach_generic_relations(&closed, definition, args, depth) {
            Ok(()) => {
                guard.succeeded = true;
                Ok(closed)
            }
            Err(error) => {
                guard.untrack(&key);
                self.generic_instances.remove(&key);
                Err(error)
            }
        }
    }

    /// Substitute the base type and interfaces of `definition` into `closed`
    fn attach_generic_relations(
        &self,
        closed: &TypeRc,
        definition: &TypeRc,
        args: &[TypeRc],
        depth: usize,
    ) -> Result<()> {
        if let Some(base) = definition.base() {
            let base = self.substitute(&base, args, depth + 1)?;
            closed.set_base(&base);
        }

        for (_, interface) in definition.interfaces.iter() {
            if let Some(interface) = interface.upgrade() {
                let interface = self.substitute(&interface, args, depth + 1)?;
                closed.interfaces.push(interface.into());
            }
        }
        Ok(())
    }

    /// A closed generic type whose construction has finished
    fn completed_instance(&self, key: &GenericKey) -> Option<TypeRc> {
        let instance = self.generic_instances.get(key)?;
        instance
            .complete
            .load(Ordering::Acquire)
            .then(|| instance.closed.clone())
    }

    /// Register a finished closed generic type and make it visible to other threads
    fn publish_instance(&self, key: &GenericKey) {
        let Some(closed) = self
            .generic_instances
            .get(key)
            .map(|instance| instance.closed.clone())
        else {
            return;
        };

        self.insert(&closed);
        if let Some(instance) = self.generic_instances.get(key) {
            instance.complete.store(true, Ordering::Release);
        }
    }

    /// Wait until no other thread builds generic types, then take ownership
    fn enter_construction(&self) -> ConstructionGuard<'_> {
        let current = thread::current().id();
        let construction = &self.construction;
        let mut state = construction
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while state.owner.is_some_and(|owner| owner != current) {
            state = construction
                .released
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.owner = Some(current);
        state.depth += 1;

        ConstructionGuard {
            registry: self,
            succeeded: false,
        }
    }

    /// Replace the type parameters of a definition inside `ty` with `args`
    fn substitute(&self, ty: &TypeRc, args: &[TypeRc], depth: usize) -> Result<TypeRc> {
        if depth > self.config.max_generic_depth {
            return Err(Error::RecursionLimit(self.config.max_generic_depth));
        }

        match ty.flavor {
            TypeFlavor::GenericParameter {
                index,
                method: false,
            } => args.get(index as usize).cloned().ok_or_else(|| {
                argument_error!(
                    "Generic parameter '{}' has no argument at position {}",
                    ty.name,
                    index
                )
            }),
            TypeFlavor::Array { rank } => match ty.element_type() {
                Some(element) => {
                    let element = self.substitute(&element, args, depth + 1)?;
                    self.make_array_type(&element, rank)
                }
                None => Ok(ty.clone()),
            },
            TypeFlavor::Pointer => match ty.element_type() {
                Some(element) => {
                    let element = self.substitute(&element, args, depth + 1)?;
                    self.make_pointer_type(&element)
                }
                None => Ok(ty.clone()),
            },
            _ => match ty.generic_definition() {
                Some(definition) if ty.generic_args.count() > 0 => {
                    let substituted = ty
                        .generic_arguments()
                        .iter()
                        .map(|arg| self.substitute(arg, args, depth + 1))
                        .collect::<Result<Vec<_>>>()?;
                    self.close_generic(&definition, &substituted, depth + 1)
                }
                _ => Ok(ty.clone()),
            },
        }
    }

    /// Get the array type over `element` with the given rank.
    ///
    /// Arrays derive from `System.Array`; single-dimensional arrays also implement
    /// `IEnumerable<element>`.
    ///
    /// # Errors
    /// Returns [`Error::Argument`] for a rank of zero
    pub fn make_array_type(&self, element: &TypeRc, rank: u32) -> Result<TypeRc> {
        if rank == 0 {
            return Err(argument_error!("Array rank must be at least 1"));
        }

        let key = (element.token, DerivedKind::Array(rank));
        if let Some(existing) = self.derived_types.get(&key) {
            return Ok(existing.clone());
        }

        let array_base = self.well_known(WellKnownType::Array)?;
        let enumerable = if rank == 1 {
            Some(self.make_generic_type(
                &self.well_known(WellKnownType::GenericEnumerable)?,
                std::slice::from_ref(element),
            )?)
        } else {
            None
        };

        let array = match self.derived_types.entry(key) {
            Entry::Occupied(existing) => return Ok(existing.get().clone()),
            Entry::Vacant(slot) => {
                let array = Arc::new(TypeDescriptor::new(
                    self.next_token(TokenKind::TypeSpec),
                    element.namespace.clone(),
                    format!("{}{}", element.name, super::array_suffix(rank)),
                    TypeFlavor::Array { rank },
                    TypeAttributes::PUBLIC | TypeAttributes::SEALED | TypeAttributes::SERIALIZABLE,
                ));
                array.set_element_type(element);
                array.set_base(&array_base);
                if let Some(enumerable) = &enumerable {
                    array.interfaces.push(enumerable.into());
                }
                slot.insert(array.clone());
                array
            }
        };

        self.insert(&array);
        Ok(array)
    }

    /// Get the unmanaged pointer type over `element`
    ///
    /// # Errors
    /// Returns [`Error::Argument`] when `element` is a reference type
    pub fn make_pointer_type(&self, element: &TypeRc) -> Result<TypeRc> {
        if element.flavor.is_reference_type() {
            return Err(argument_error!(
                "Can not create a pointer to reference type '{}'",
                element.fullname()
            ));
        }

        let pointer = match self
            .derived_types
            .entry((element.token, DerivedKind::Pointer))
        {
            Entry::Occupied(existing) => return Ok(existing.get().clone()),
            Entry::Vacant(slot) => {
                let pointer = Arc::new(TypeDescriptor::new(
                    self.next_token(TokenKind::TypeSpec),
                    element.namespace.clone(),
                    format!("{}*", element.name),
                    TypeFlavor::Pointer,
                    TypeAttributes::NOT_PUBLIC,
                ));
                pointer.set_element_type(element);
                slot.insert(pointer.clone());
                pointer
            }
        };

        self.insert(&pointer);
        Ok(pointer)
    }

    /// Wrap a value type into `Nullable<T>`. Reference types and types that already are
    /// nullable are returned unchanged.
    ///
    /// # Errors
    /// Returns an error if the closed type can not be built
    pub fn get_nullable_type(&self, ty: &TypeRc) -> Result<TypeRc> {
        if ty.is_value_type() && !ty.is_nullable_type() {
            let nullable = self.well_known(WellKnownType::Nullable)?;
            return self.make_generic_type(&nullable, std::slice::from_ref(ty));
        }
        Ok(ty.clone())
    }

    /// Find the closed `IEnumerable<X>` a type implements.
    ///
    /// Searches, in order: the element type of arrays, the generic arguments of generic types,
    /// all interfaces (recursively), then the base chain. `System.String` is never treated as a
    /// sequence.
    ///
    /// # Errors
    /// Returns an error if a candidate type can not be built or the search exceeds
    /// [`TypeSystemConfig::max_hierarchy_depth`]
    pub fn get_enumerable_type(&self, ty: &TypeRc) -> Result<Option<TypeRc>> {
        self.find_enumerable(ty, 0)
    }

    fn find_enumerable(&self, ty: &TypeRc, depth: usize) -> Result<Option<TypeRc>> {
        if depth > self.config.max_hierarchy_depth {
            return Err(Error::RecursionLimit(self.config.max_hierarchy_depth));
        }
        if ty.is_string() {
            return Ok(None);
        }

        let generic_enumerable = self.well_known(WellKnownType::GenericEnumerable)?;
        if ty.is_array() {
            if let Some(element) = ty.element_type() {
                return self
                    .make_generic_type(&generic_enumerable, &[element])
                    .map(Some);
            }
        }

        if ty.is_generic_type() {
            for arg in ty.generic_arguments() {
                let candidate = self.make_generic_type(&generic_enumerable, &[arg])?;
                if candidate.is_assignable_from(ty) {
                    return Ok(Some(candidate));
                }
            }
        }

        for interface in ty.interfaces() {
            if let Some(found) = self.find_enumerable(&interface, depth + 1)? {
                return Ok(Some(found));
            }
        }

        match ty.base() {
            Some(base) if !base.is_object() => self.find_enumerable(&base, depth + 1),
            _ => Ok(None),
        }
    }

    /// The element type of a sequence type.
    ///
    /// Non-generic types report their array element type, generic types the argument of the
    /// `IEnumerable<X>` they implement.
    ///
    /// # Errors
    /// See [`TypeRegistry::get_enumerable_type`]
    pub fn get_enumerable_element_type(&self, ty: &TypeRc) -> Result<Option<TypeRc>> {
        if !ty.is_generic_type() {
            return Ok(ty.element_type());
        }

        Ok(self
            .get_enumerable_type(ty)?
            .and_then(|enumerable| enumerable.generic_arguments().into_iter().next()))
    }

    /// Every registered type implementing `interface`, in token order.
    ///
    /// # Errors
    /// Returns [`Error::NotInterfaceType`] if `interface` is not an interface
    pub fn find_implementors(&self, interface: &TypeRc) -> Result<Vec<TypeRc>> {
        if !interface.is_interface() {
            return Err(Error::NotInterfaceType(interface.fullname()));
        }

        let candidates = self.all_types();
        Ok(candidates
            .into_par_iter()
            .filter(|candidate| {
                candidate.token != interface.token
                    && !candidate.is_generic_parameter()
                    && interface.is_assignable_from(candidate)
            })
            .collect())
    }

    /// Close `definition` over `type_args`, instantiate it through its parameterless
    /// constructor and cast the instance to `T`. Yields `None` if the instance is not a `T`.
    ///
    /// # Errors
    /// Returns an error if the type can not be closed or instantiated
    pub fn create_generic_type_instance<T: Any + Send + Sync>(
        &self,
        definition: &TypeRc,
        type_args: &[TypeRc],
    ) -> Result<Option<Arc<T>>> {
        let closed = self.make_generic_type(definition, type_args)?;
        let instance = closed.create_instance(&[])?;
        Ok(instance.downcast::<T>().ok())
    }
}

fn well_known_flags(kind: WellKnownType) -> TypeAttributes {
    match kind.flavor() {
        TypeFlavor::Interface => {
            TypeAttributes::PUBLIC | TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT
        }
        TypeFlavor::Object => TypeAttributes::PUBLIC | TypeAttributes::SERIALIZABLE,
        TypeFlavor::Class => {
            TypeAttributes::PUBLIC | TypeAttributes::ABSTRACT | TypeAttributes::SERIALIZABLE
        }
        TypeFlavor::Void => TypeAttributes::PUBLIC | TypeAttributes::SEALED,
        _ => TypeAttributes::PUBLIC | TypeAttributes::SEALED | TypeAttributes::SERIALIZABLE,
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{test::AnimalKingdom, typesystem::TypeBuilder};

    #[test]
    fn test_registry_seeded() {
        let registry = TypeRegistry::new().unwrap();
        assert!(registry.len() >= WellKnownType::iter().count());

        for kind in WellKnownType::iter() {
            let ty = registry.well_known(kind).unwrap();
            assert_eq!(ty.token, kind.token());
            let by_name = registry.get_by_fullname(&ty.fullname()).unwrap();
            assert_eq!(by_name.token, ty.token);
        }

        let string = registry.well_known(WellKnownType::String).unwrap();
        assert_eq!(string.fullname(), "System.String");
        assert_eq!(string.base().unwrap().fullname(), "System.Object");

        let int32 = registry.get_by_rust_type::<i32>().unwrap();
        assert_eq!(int32.token, WellKnownType::Int32.token());
        let double = registry.get_by_rust_type::<f64>().unwrap();
        assert_eq!(double.token, WellKnownType::Double.token());
    }

    #[test]
    fn test_next_token_per_kind() {
        let registry = TypeRegistry::new().unwrap();
        let first = registry.next_token(TokenKind::TypeDef);
        let second = registry.next_token(TokenKind::TypeDef);
        assert_eq!(first.table(), 0x02);
        assert_eq!(second.row(), first.row() + 1);
    }

    #[test]
    fn test_parse_type() {
        let registry = TypeRegistry::new().unwrap();
        let int32 = registry.well_known(WellKnownType::Int32).unwrap();

        assert_eq!(registry.parse_type("System.Int32").unwrap().token, int32.token);
        assert_eq!(registry.parse_type("system.int32").unwrap().token, int32.token);
        assert_eq!(
            registry
                .parse_type("System.Int32, mscorlib, Version=4.0.0.0, Culture=neutral")
                .unwrap()
                .token,
            int32.token
        );
        assert!(registry.parse_type("System.Int128").is_none());
        assert!(registry.parse_type("").is_none());
    }

    #[test]
    fn test_make_generic_type_dedup() {
        let registry = TypeRegistry::new().unwrap();
        let nullable = registry.well_known(WellKnownType::Nullable).unwrap();
        let int32 = registry.well_known(WellKnownType::Int32).unwrap();

        let first = registry
            .make_generic_type(&nullable, &[int32.clone()])
            .unwrap();
        let second = registry.make_generic_type(&nullable, &[int32]).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.generic_definition().unwrap().token, nullable.token);
        assert!(!first.is_generic_type_definition());
        assert!(first.is_generic_type());
    }

    #[test]
    fn test_make_generic_type_concurrent() {
        let registry = Arc::new(TypeRegistry::new().unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let nullable = registry.well_known(WellKnownType::Nullable).unwrap();
                    let byte = registry.well_known(WellKnownType::Byte).unwrap();
                    registry.make_generic_type(&nullable, &[byte]).unwrap().token
                })
            })
            .collect();

        let tokens: Vec<Token> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(tokens.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_closed_types_complete_across_threads() {
        let kingdom = AnimalKingdom::new();
        let registry = &kingdom.registry;
        let shelter = TypeBuilder::new("Shelter")
            .namespace("Zoo")
            .generic_param("T")
            .extends_generic(&kingdom.kennel, &["T"])
            .build(registry)
            .unwrap();
        let args = [
            registry.well_known(WellKnownType::Int64).unwrap(),
            registry.well_known(WellKnownType::DateTime).unwrap(),
            registry.well_known(WellKnownType::Decimal).unwrap(),
            kingdom.puppy.clone(),
        ];
        let kennel = kingdom.kennel.token;

        let closed: Vec<Vec<TypeRc>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|worker| {
                    let shelter = &shelter;
                    let args = &args;
                    scope.spawn(move || {
                        (0..args.len())
                            .map(|i| {
                                let arg = &args[(i + worker) % args.len()];
                                let ty = registry
                                    .make_generic_type(shelter, std::slice::from_ref(arg))
                                    .unwrap();

                                let base = ty.base().expect("closed base is attached");
                                assert_eq!(base.generic_definition().unwrap().token, kennel);
                                let enumerable = registry.get_enumerable_type(&ty).unwrap();
                                assert_eq!(
                                    enumerable.unwrap().generic_arguments()[0].token,
                                    arg.token
                                );
                                ty
                            })
                            .collect()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for arg in &args {
            let tokens: Vec<Token> = closed
                .iter()
                .flatten()
                .filter(|ty| ty.generic_arguments()[0].token == arg.token)
                .map(|ty| ty.token)
                .collect();
            assert_eq!(tokens.len(), 8);
            assert!(tokens.windows(2).all(|pair| pair[0] == pair[1]));
            assert!(registry.get(&tokens[0]).is_some());
        }
    }

    #[test]
    fn test_failed_close_leaves_nothing() {
        let registry = TypeRegistry::new().unwrap();
        let int32 = registry.well_known(WellKnownType::Int32).unwrap();
        let broken = TypeBuilder::new("Broken")
            .generic_param("T")
            .build(&registry)
            .unwrap();
        // refers to a parameter the definition does not declare
        let stray = registry.create_generic_param("U", 3).unwrap();
        broken.interfaces.push((&stray).into());

        let before = registry.len();
        for _ in 0..2 {
            assert!(matches!(
                registry.make_generic_type(&broken, &[int32.clone()]),
                Err(Error::Argument { .. })
            ));
        }
        assert_eq!(registry.len(), before);
        assert!(registry
            .generic_instances
            .iter()
            .all(|entry| entry.key().0 != broken.token));
    }

    #[test]
    fn test_make_generic_type_preconditions() {
        let registry = TypeRegistry::new().unwrap();
        let int32 = registry.well_known(WellKnownType::Int32).unwrap();
        let nullable = registry.well_known(WellKnownType::Nullable).unwrap();

        assert!(matches!(
            registry.make_generic_type(&int32, &[int32.clone()]),
            Err(Error::Argument { .. })
        ));
        assert!(matches!(
            registry.make_generic_type(&nullable, &[int32.clone(), int32]),
            Err(Error::Argument { .. })
        ));
    }

    #[test]
    fn test_generic_substitution() {
        let kingdom = AnimalKingdom::new();
        let int32 = kingdom.well_known("System.Int32");

        // Kennel<T> : IEnumerable<T>
        let kennel = kingdom
            .registry
            .make_generic_type(&kingdom.kennel, &[int32.clone()])
            .unwrap();
        assert_eq!(kennel.fullname(), "Zoo.Kennel`1[System.Int32]");

        let interfaces: Vec<String> = kennel.interfaces().iter().map(|i| i.fullname()).collect();
        assert!(interfaces.contains(&"System.Collections.Generic.IEnumerable`1[System.Int32]".to_string()));
        assert!(interfaces.contains(&"System.Collections.IEnumerable".to_string()));
    }

    #[test]
    fn test_generic_depth_limit() {
        let registry = TypeRegistry::with_config(TypeSystemConfig {
            max_hierarchy_depth: 64,
            max_generic_depth: 0,
        });
        // Seeding closes IEnumerable<Char>, which substitutes one level deep
        assert!(matches!(registry, Err(Error::RecursionLimit(0))));
    }

    #[test]
    fn test_make_array_type() {
        let registry = TypeRegistry::new().unwrap();
        let int32 = registry.well_known(WellKnownType::Int32).unwrap();

        let array = registry.make_array_type(&int32, 1).unwrap();
        assert_eq!(array.fullname(), "System.Int32[]");
        assert_eq!(array.element_type().unwrap().token, int32.token);
        assert_eq!(
            array.base().unwrap().token,
            WellKnownType::Array.token()
        );
        assert!(Arc::ptr_eq(
            &array,
            &registry.make_array_type(&int32, 1).unwrap()
        ));

        let matrix = registry.make_array_type(&int32, 2).unwrap();
        assert_eq!(matrix.fullname(), "System.Int32[,]");
        assert!(matrix.interfaces.count() == 0);

        assert!(registry.make_array_type(&int32, 0).is_err());
    }

    #[test]
    fn test_make_pointer_type() {
        let registry = TypeRegistry::new().unwrap();
        let byte = registry.well_known(WellKnownType::Byte).unwrap();
        let pointer = registry.make_pointer_type(&byte).unwrap();
        assert_eq!(pointer.fullname(), "System.Byte*");
        assert!(pointer.is_pointer());

        let string = registry.well_known(WellKnownType::String).unwrap();
        assert!(registry.make_pointer_type(&string).is_err());
    }

    #[test]
    fn test_get_enumerable_type() {
        let kingdom = AnimalKingdom::new();
        let registry = &kingdom.registry;
        let int32 = kingdom.well_known("System.Int32");
        let string = kingdom.well_known("System.String");

        let array = registry.make_array_type(&int32, 1).unwrap();
        let enumerable = registry.get_enumerable_type(&array).unwrap().unwrap();
        assert_eq!(
            enumerable.fullname(),
            "System.Collections.Generic.IEnumerable`1[System.Int32]"
        );

        assert!(registry.get_enumerable_type(&string).unwrap().is_none());
        assert!(registry.get_enumerable_type(&int32).unwrap().is_none());

        // DogKennel : Kennel<Dog>
        let enumerable = registry
            .get_enumerable_type(&kingdom.dog_kennel)
            .unwrap()
            .unwrap();
        assert_eq!(
            enumerable.generic_arguments()[0].token,
            kingdom.dog.token
        );
    }

    #[test]
    fn test_get_enumerable_element_type() {
        let kingdom = AnimalKingdom::new();
        let registry = &kingdom.registry;
        let int32 = kingdom.well_known("System.Int32");

        let array = registry.make_array_type(&int32, 1).unwrap();
        assert_eq!(
            registry
                .get_enumerable_element_type(&array)
                .unwrap()
                .unwrap()
                .token,
            int32.token
        );

        let kennel = registry
            .make_generic_type(&kingdom.kennel, &[kingdom.dog.clone()])
            .unwrap();
        assert_eq!(
            registry
                .get_enumerable_element_type(&kennel)
                .unwrap()
                .unwrap()
                .token,
            kingdom.dog.token
        );

        assert!(registry
            .get_enumerable_element_type(&kingdom.dog)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_implementors() {
        let kingdom = AnimalKingdom::new();
        let implementors = kingdom.registry.find_implementors(&kingdom.ibark).unwrap();
        let names: Vec<String> = implementors.iter().map(|t| t.fullname()).collect();
        assert_eq!(names, vec!["Zoo.Dog", "Zoo.Puppy"]);

        assert!(matches!(
            kingdom.registry.find_implementors(&kingdom.dog),
            Err(Error::NotInterfaceType(_))
        ));
    }

    #[test]
    fn test_duplicate_fullname_keeps_first() {
        let registry = TypeRegistry::new().unwrap();
        let first = TypeBuilder::new("Twin").namespace("App").build(&registry).unwrap();
        let _second = TypeBuilder::new("Twin").namespace("App").build(&registry).unwrap();
        assert_eq!(registry.get_by_fullname("App.Twin").unwrap().token, first.token);
    }

    #[test]
    fn test_create_generic_type_instance() {
        let kingdom = AnimalKingdom::new();
        let int32 = kingdom.well_known("System.Int32");

        let kennel = kingdom
            .registry
            .create_generic_type_instance::<Vec<String>>(&kingdom.kennel, &[int32.clone()])
            .unwrap()
            .unwrap();
        assert_eq!(kennel.as_slice(), ["Zoo.Kennel`1[System.Int32]".to_string()]);

        let wrong = kingdom
            .registry
            .create_generic_type_instance::<String>(&kingdom.kennel, &[int32])
            .unwrap();
        assert!(wrong.is_none());
    }
}
