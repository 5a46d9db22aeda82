use grit_types::{
    is_assignable, is_subtype, ClassDef, ClassKind, ConstructorDef, PrimitiveType, Type, TypeEnv,
    TypeStore,
};

fn env_with_shapes() -> (TypeStore, Type, Type, Type) {
    let mut env = TypeStore::with_minimal_jdk();
    let object = Type::class(env.well_known().object, vec![]);

    let shape = env.add_class(ClassDef {
        name: "geom.Shape".to_string(),
        kind: ClassKind::Interface,
        is_abstract: false,
        type_params: vec![],
        super_class: None,
        interfaces: vec![],
        constructors: vec![],
        methods: vec![],
    });
    let shape_ty = Type::class(shape, vec![]);

    let circle = env.add_class(ClassDef {
        name: "geom.Circle".to_string(),
        kind: ClassKind::Class,
        is_abstract: false,
        type_params: vec![],
        super_class: Some(object),
        interfaces: vec![shape_ty.clone()],
        constructors: vec![ConstructorDef {
            params: vec![],
            is_public: true,
        }],
        methods: vec![],
    });
    let circle_ty = Type::class(circle, vec![]);

    let object_ty = Type::class(env.well_known().object, vec![]);
    (env, object_ty, shape_ty, circle_ty)
}

#[test]
fn class_is_assignable_to_implemented_interface_and_object() {
    let (env, object, shape, circle) = env_with_shapes();
    assert!(is_assignable(&env, &circle, &shape));
    assert!(is_assignable(&env, &circle, &object));
    assert!(is_assignable(&env, &shape, &object));
    assert!(!is_assignable(&env, &shape, &circle));
}

#[test]
fn reference_arrays_are_covariant_primitive_arrays_are_not() {
    let (env, object, shape, circle) = env_with_shapes();

    let circles = Type::array(circle);
    let shapes = Type::array(shape);
    assert!(is_assignable(&env, &circles, &shapes));
    assert!(!is_assignable(&env, &shapes, &circles));
    assert!(is_assignable(&env, &circles, &object));

    let ints = Type::array(Type::int());
    let longs = Type::array(Type::Primitive(PrimitiveType::Long));
    assert!(!is_assignable(&env, &ints, &longs));
    assert!(is_assignable(&env, &ints, &ints));
}

#[test]
fn boxing_and_unboxing_participate_in_assignability() {
    let env = TypeStore::with_minimal_jdk();
    let integer = Type::class(env.well_known().int_box, vec![]);
    let object = Type::class(env.well_known().object, vec![]);

    assert!(is_assignable(&env, &Type::int(), &integer));
    assert!(is_assignable(&env, &Type::int(), &object));
    assert!(is_assignable(&env, &integer, &Type::int()));
    // Unboxing may widen, but boxing never crosses primitives.
    let long = Type::Primitive(PrimitiveType::Long);
    assert!(is_assignable(&env, &integer, &long));
    let long_box = Type::class(env.well_known().long_box, vec![]);
    assert!(!is_assignable(&env, &Type::int(), &long_box));
}

#[test]
fn primitive_widening_follows_the_jls_table() {
    let env = TypeStore::with_minimal_jdk();
    use PrimitiveType::*;
    let widens = |a: PrimitiveType, b: PrimitiveType| {
        is_subtype(&env, &Type::Primitive(a), &Type::Primitive(b))
    };
    assert!(widens(Byte, Int));
    assert!(widens(Char, Int));
    assert!(widens(Int, Double));
    assert!(widens(Float, Double));
    assert!(!widens(Int, Char));
    assert!(!widens(Boolean, Int));
    assert!(!widens(Double, Float));
}

#[test]
fn parameterized_instantiations_are_distinct_but_raw_accepts_all() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").expect("List in minimal JDK");
    let array_list = env
        .class_id("java.util.ArrayList")
        .expect("ArrayList in minimal JDK");
    let string = Type::class(env.well_known().string, vec![]);
    let integer = Type::class(env.well_known().int_box, vec![]);

    let list_string = Type::class(list, vec![string.clone()]);
    let list_integer = Type::class(list, vec![integer]);
    let list_raw = Type::class(list, vec![]);
    let array_list_string = Type::class(array_list, vec![string]);

    assert!(is_assignable(&env, &array_list_string, &list_string));
    assert!(!is_assignable(&env, &array_list_string, &list_integer));
    assert!(is_assignable(&env, &array_list_string, &list_raw));
    assert!(!is_assignable(&env, &list_raw, &list_string));
}

#[test]
fn null_is_assignable_to_references_only() {
    let (env, object, _, circle) = env_with_shapes();
    assert!(is_assignable(&env, &Type::Null, &object));
    assert!(is_assignable(&env, &Type::Null, &circle));
    assert!(is_assignable(&env, &Type::Null, &Type::array(object)));
    assert!(!is_assignable(&env, &Type::Null, &Type::int()));
}
