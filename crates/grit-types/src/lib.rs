//! Nominal type model and reflection horizon for the grit test generator.
//!
//! This crate plays the role Java reflection plays for the generator: a
//! compact `Type` representation, a class registry (`TypeStore`) acting as
//! the reflection horizon, and the two compatibility relations the generator
//! needs: wide assignability for producer filtering, and the narrow
//! eight-pair boxing equivalence for input-slot compatibility.
//!
//! The subtyping implementation is intentionally best-effort (suitable for a
//! randomized generator) rather than a full JLS implementation.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

// === Identifiers =============================================================

/// Identifier for a class or interface registered in a [`TypeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// Identifier for a class-level type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVarId(pub u32);

// === Type representation =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveType::Boolean)
    }

    /// Binary name of the box class for this primitive.
    pub fn box_class_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub def: ClassId,
    pub args: Vec<Type>,
}

/// A nominal type descriptor.
///
/// Equality and hashing are structural: two parameterized instantiations of
/// the same class are distinct types, which is what cycle-breaking in graph
/// searches over types must key on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The special `void` type.
    Void,

    /// Primitive types: int, boolean, etc.
    Primitive(PrimitiveType),

    /// Reference to a class/interface, possibly with type arguments.
    Class(ClassType),

    /// Array type.
    Array(Box<Type>),

    /// Type variable from a generic class declaration. Only appears inside
    /// registered supertype declarations; never in generator requests.
    TypeVar(TypeVarId),

    /// The null type.
    Null,
}

impl Type {
    pub fn class(def: ClassId, args: Vec<Type>) -> Self {
        Type::Class(ClassType { def, args })
    }

    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn int() -> Self {
        Type::Primitive(PrimitiveType::Int)
    }

    pub fn boolean() -> Self {
        Type::Primitive(PrimitiveType::Boolean)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Class(_) | Type::Array(_) | Type::TypeVar(_))
    }

    /// Element type, for arrays.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(elem) => Some(elem.as_ref()),
            _ => None,
        }
    }

    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            Type::Class(ClassType { def, .. }) => Some(*def),
            _ => None,
        }
    }

    /// True for types whose values cannot appear as a method receiver:
    /// primitives, `java.lang.String`, and the null type.
    pub fn is_nonreceiver(&self, env: &dyn TypeEnv) -> bool {
        match self {
            Type::Primitive(_) | Type::Null | Type::Void => true,
            Type::Class(ClassType { def, .. }) => *def == env.well_known().string,
            _ => false,
        }
    }

    /// Human-readable name, e.g. `java.util.List<java.lang.String>` or `int[]`.
    pub fn display_name(&self, env: &dyn TypeEnv) -> String {
        match self {
            Type::Void => "void".to_string(),
            Type::Null => "null".to_string(),
            Type::Primitive(p) => p.to_string(),
            Type::Array(elem) => format!("{}[]", elem.display_name(env)),
            Type::TypeVar(id) => format!("T#{}", id.0),
            Type::Class(ClassType { def, args }) => {
                let base = env
                    .class(*def)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| format!("class#{}", def.0));
                if args.is_empty() {
                    base
                } else {
                    let args = args
                        .iter()
                        .map(|a| a.display_name(env))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{base}<{args}>")
                }
            }
        }
    }
}

// === Class metadata ==========================================================

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDef {
    pub params: Vec<Type>,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<Type>,
    pub return_type: Type,
    pub is_static: bool,
    pub is_public: bool,
}

/// Reflection metadata for one class, the analogue of a runtime class handle:
/// modifiers plus declared members in declaration order.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    pub kind: ClassKind,
    pub is_abstract: bool,
    pub type_params: Vec<TypeVarId>,
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
    pub constructors: Vec<ConstructorDef>,
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    /// Whether a constructor of this class can produce a value: concrete
    /// classes only. Interfaces are never instantiable regardless of the
    /// stored abstract flag.
    pub fn is_instantiable(&self) -> bool {
        !self.is_abstract && self.kind == ClassKind::Class
    }

    pub fn public_constructors(&self) -> impl Iterator<Item = &ConstructorDef> {
        self.constructors.iter().filter(|c| c.is_public)
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods.iter().filter(|m| m.is_public)
    }
}

/// Ids of classes the generator needs by name.
#[derive(Debug, Clone)]
pub struct WellKnownTypes {
    pub object: ClassId,
    pub string: ClassId,
    pub boolean_box: ClassId,
    pub byte_box: ClassId,
    pub short_box: ClassId,
    pub char_box: ClassId,
    pub int_box: ClassId,
    pub long_box: ClassId,
    pub float_box: ClassId,
    pub double_box: ClassId,
}

impl WellKnownTypes {
    pub fn box_of(&self, prim: PrimitiveType) -> ClassId {
        match prim {
            PrimitiveType::Boolean => self.boolean_box,
            PrimitiveType::Byte => self.byte_box,
            PrimitiveType::Short => self.short_box,
            PrimitiveType::Char => self.char_box,
            PrimitiveType::Int => self.int_box,
            PrimitiveType::Long => self.long_box,
            PrimitiveType::Float => self.float_box,
            PrimitiveType::Double => self.double_box,
        }
    }

    fn unbox(&self, id: ClassId) -> Option<PrimitiveType> {
        use PrimitiveType::*;
        for prim in [Boolean, Byte, Short, Char, Int, Long, Float, Double] {
            if self.box_of(prim) == id {
                return Some(prim);
            }
        }
        None
    }
}

pub trait TypeEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;
    fn lookup_class(&self, name: &str) -> Option<ClassId>;
    fn well_known(&self) -> &WellKnownTypes;
}

// === The reflection horizon ==================================================

/// Insertion-ordered class registry.
///
/// Registration order is significant: producer discovery enumerates members
/// in declaration order and classes in registration order, which is what
/// makes a generation run reproducible for a fixed horizon.
#[derive(Debug)]
pub struct TypeStore {
    classes: Vec<ClassDef>,
    class_by_name: HashMap<String, ClassId>,
    next_type_param: u32,
    well_known: WellKnownTypes,
}

impl TypeStore {
    /// A horizon seeded with the minimal JDK subset the generator relies on:
    /// `Object`, `String`, the eight box classes (each with its `valueOf`
    /// factory and unboxing accessor), `java.util.List`, and
    /// `java.util.ArrayList`.
    pub fn with_minimal_jdk() -> Self {
        let mut classes = Vec::new();
        let mut class_by_name = HashMap::new();

        let add = |classes: &mut Vec<ClassDef>,
                   class_by_name: &mut HashMap<String, ClassId>,
                   def: ClassDef| {
            let id = ClassId(classes.len() as u32);
            class_by_name.insert(def.name.clone(), id);
            classes.push(def);
            id
        };

        let object = add(
            &mut classes,
            &mut class_by_name,
            ClassDef {
                name: "java.lang.Object".to_string(),
                kind: ClassKind::Class,
                is_abstract: false,
                type_params: vec![],
                super_class: None,
                interfaces: vec![],
                constructors: vec![ConstructorDef {
                    params: vec![],
                    is_public: true,
                }],
                methods: vec![],
            },
        );
        let object_ty = Type::class(object, vec![]);

        let string = add(
            &mut classes,
            &mut class_by_name,
            ClassDef {
                name: "java.lang.String".to_string(),
                kind: ClassKind::Class,
                is_abstract: false,
                type_params: vec![],
                super_class: Some(object_ty.clone()),
                interfaces: vec![],
                constructors: vec![],
                methods: vec![],
            },
        );

        let mut boxes = Vec::new();
        use PrimitiveType::*;
        for prim in [Boolean, Byte, Short, Char, Int, Long, Float, Double] {
            let unbox_method = match prim {
                Boolean => "booleanValue",
                Byte => "byteValue",
                Short => "shortValue",
                Char => "charValue",
                Int => "intValue",
                Long => "longValue",
                Float => "floatValue",
                Double => "doubleValue",
            };
            let id = ClassId(classes.len() as u32);
            let box_ty = Type::class(id, vec![]);
            let def = ClassDef {
                name: prim.box_class_name().to_string(),
                kind: ClassKind::Class,
                is_abstract: false,
                type_params: vec![],
                super_class: Some(object_ty.clone()),
                interfaces: vec![],
                constructors: vec![],
                methods: vec![
                    MethodDef {
                        name: "valueOf".to_string(),
                        params: vec![Type::Primitive(prim)],
                        return_type: box_ty,
                        is_static: true,
                        is_public: true,
                    },
                    MethodDef {
                        name: unbox_method.to_string(),
                        params: vec![],
                        return_type: Type::Primitive(prim),
                        is_static: false,
                        is_public: true,
                    },
                ],
            };
            class_by_name.insert(def.name.clone(), id);
            classes.push(def);
            boxes.push(id);
        }

        let well_known = WellKnownTypes {
            object,
            string,
            boolean_box: boxes[0],
            byte_box: boxes[1],
            short_box: boxes[2],
            char_box: boxes[3],
            int_box: boxes[4],
            long_box: boxes[5],
            float_box: boxes[6],
            double_box: boxes[7],
        };

        let mut store = Self {
            classes,
            class_by_name,
            next_type_param: 0,
            well_known,
        };

        // java.util.List<E> and java.util.ArrayList<E> implements List<E>.
        let list_e = store.add_type_param();
        let list = store.add_class(ClassDef {
            name: "java.util.List".to_string(),
            kind: ClassKind::Interface,
            is_abstract: false,
            type_params: vec![list_e],
            super_class: None,
            interfaces: vec![],
            constructors: vec![],
            methods: vec![],
        });
        let array_list_e = store.add_type_param();
        store.add_class(ClassDef {
            name: "java.util.ArrayList".to_string(),
            kind: ClassKind::Class,
            is_abstract: false,
            type_params: vec![array_list_e],
            super_class: Some(Type::class(store.well_known.object, vec![])),
            interfaces: vec![Type::class(list, vec![Type::TypeVar(array_list_e)])],
            constructors: vec![ConstructorDef {
                params: vec![],
                is_public: true,
            }],
            methods: vec![],
        });

        store
    }

    pub fn add_type_param(&mut self) -> TypeVarId {
        let id = TypeVarId(self.next_type_param);
        self.next_type_param += 1;
        id
    }

    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        self.add_class_with(|_| def)
    }

    /// Register a class whose definition needs its own id, e.g. for
    /// self-referencing member signatures.
    pub fn add_class_with(&mut self, def: impl FnOnce(ClassId) -> ClassDef) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        let def = def(id);
        if self.class_by_name.contains_key(&def.name) {
            // Two ids for the same binary name would corrupt every lookup.
            // This is a programmer error in tests/builders.
            panic!("duplicate class definition for {}", def.name);
        }
        self.class_by_name.insert(def.name.clone(), id);
        self.classes.push(def);
        id
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.lookup_class(name)
    }

    /// Classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, def)| (ClassId(i as u32), def))
    }
}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.0 as usize)
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        if let Some(id) = self.class_by_name.get(name).copied() {
            return Some(id);
        }

        // Best-effort support for the implicit `java.lang.*` universe scope,
        // so callers can say `Integer` for `java.lang.Integer`.
        if !name.contains('.') {
            let jlang = format!("java.lang.{name}");
            return self.class_by_name.get(&jlang).copied();
        }

        None
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}

// === Subtyping / assignability ==============================================

fn primitive_widening(from: PrimitiveType, to: PrimitiveType) -> bool {
    use PrimitiveType::*;
    if from == to {
        return true;
    }
    match (from, to) {
        (Byte, Short | Int | Long | Float | Double) => true,
        (Short, Int | Long | Float | Double) => true,
        (Char, Int | Long | Float | Double) => true,
        (Int, Long | Float | Double) => true,
        (Long, Float | Double) => true,
        (Float, Double) => true,
        _ => false,
    }
}

fn substitute(ty: &Type, subst: &HashMap<TypeVarId, Type>) -> Type {
    match ty {
        Type::TypeVar(id) => subst.get(id).cloned().unwrap_or(Type::TypeVar(*id)),
        Type::Array(elem) => Type::Array(Box::new(substitute(elem, subst))),
        Type::Class(ClassType { def, args }) => {
            Type::class(*def, args.iter().map(|a| substitute(a, subst)).collect())
        }
        other => other.clone(),
    }
}

fn type_args_compatible(env: &dyn TypeEnv, def: ClassId, sub: &[Type], super_: &[Type]) -> bool {
    let type_param_len = env.class(def).map(|c| c.type_params.len()).unwrap_or(0);
    let sub_raw = sub.is_empty() && type_param_len != 0;
    let super_raw = super_.is_empty() && type_param_len != 0;

    // Raw target types behave like erasure: any instantiation is assignable
    // to the raw form, not the other way around.
    if super_raw {
        return true;
    }
    if sub_raw {
        return false;
    }
    sub == super_
}

fn is_subtype_class(env: &dyn TypeEnv, sub: &Type, super_: &Type) -> bool {
    let Type::Class(ClassType {
        def: super_def,
        args: super_args,
    }) = super_
    else {
        return false;
    };

    let mut queue = VecDeque::new();
    let mut seen = HashSet::new();
    queue.push_back(sub.clone());

    while let Some(current) = queue.pop_front() {
        let Type::Class(ClassType { def, args }) = current else {
            continue;
        };
        if !seen.insert((def, args.clone())) {
            continue;
        }

        if def == *super_def {
            if type_args_compatible(env, def, &args, super_args) {
                return true;
            }
            // A different instantiation of the same class is not a supertype,
            // but keep walking: the class may reach it again through erasure.
            continue;
        }

        let Some(class_def) = env.class(def) else {
            continue;
        };

        let subst = class_def
            .type_params
            .iter()
            .copied()
            .zip(args.into_iter())
            .collect::<HashMap<_, _>>();

        if let Some(sc) = &class_def.super_class {
            queue.push_back(substitute(sc, &subst));
        }
        for iface in &class_def.interfaces {
            queue.push_back(substitute(iface, &subst));
        }
        // Every interface implicitly has Object as a supertype.
        if class_def.kind == ClassKind::Interface {
            queue.push_back(Type::class(env.well_known().object, vec![]));
        }
    }

    false
}

/// Nominal subtyping: superclass/interface walking with type-argument
/// substitution, primitive widening, and array covariance for reference
/// element types.
pub fn is_subtype(env: &dyn TypeEnv, sub: &Type, super_: &Type) -> bool {
    if sub == super_ {
        return true;
    }

    match (sub, super_) {
        (Type::Void, _) | (_, Type::Void) => false,

        (Type::Null, t) => t.is_reference(),

        (Type::Primitive(a), Type::Primitive(b)) => primitive_widening(*a, *b),

        (Type::Array(sub_elem), Type::Array(super_elem)) => {
            if sub_elem.is_reference() && super_elem.is_reference() {
                is_subtype(env, sub_elem, super_elem)
            } else {
                sub_elem == super_elem
            }
        }

        // Arrays extend Object.
        (Type::Array(_), Type::Class(ClassType { def, .. })) => *def == env.well_known().object,

        (Type::Class(_), Type::Class(_)) => is_subtype_class(env, sub, super_),

        _ => false,
    }
}

/// Assignment compatibility: subtyping plus boxing and unboxing conversions.
///
/// This is the *wide* relation used to filter producers; slot compatibility
/// inside a synthesized sequence uses [`are_equivalent_considering_boxing`]
/// instead.
pub fn is_assignable(env: &dyn TypeEnv, from: &Type, to: &Type) -> bool {
    if is_subtype(env, from, to) {
        return true;
    }

    // Boxing (and possible reference widening after boxing).
    if let Type::Primitive(p) = from {
        let boxed = Type::class(env.well_known().box_of(*p), vec![]);
        if &boxed == to || is_subtype(env, &boxed, to) {
            return true;
        }
    }

    // Unboxing (and possible primitive widening after unboxing).
    if let (Type::Class(ClassType { def, .. }), Type::Primitive(target)) = (from, to) {
        if let Some(prim) = env.well_known().unbox(*def) {
            return primitive_widening(prim, *target);
        }
    }

    false
}

// === Boxing equivalence ======================================================

/// True iff `a` and `b` are structurally equal, or form one of the eight
/// primitive/box pairs. Symmetric and reflexive; not transitive with
/// subtyping (`Integer ~ int` holds but `Object ~ int` does not).
pub fn are_equivalent_considering_boxing(env: &dyn TypeEnv, a: &Type, b: &Type) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Type::Primitive(p), Type::Class(ClassType { def, args }))
        | (Type::Class(ClassType { def, args }), Type::Primitive(p)) => {
            args.is_empty() && env.well_known().box_of(*p) == *def
        }
        _ => false,
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        };
        f.write_str(name)
    }
}
