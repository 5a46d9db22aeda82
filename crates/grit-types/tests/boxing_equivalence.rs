use pretty_assertions::assert_eq;

use grit_types::{are_equivalent_considering_boxing, PrimitiveType, Type, TypeEnv, TypeStore};

const PRIMITIVES: [PrimitiveType; 8] = [
    PrimitiveType::Boolean,
    PrimitiveType::Byte,
    PrimitiveType::Short,
    PrimitiveType::Char,
    PrimitiveType::Int,
    PrimitiveType::Long,
    PrimitiveType::Float,
    PrimitiveType::Double,
];

#[test]
fn each_primitive_pairs_with_its_own_box_and_no_other() {
    let env = TypeStore::with_minimal_jdk();
    for prim in PRIMITIVES {
        let prim_ty = Type::Primitive(prim);
        for other in PRIMITIVES {
            let box_ty = Type::class(env.well_known().box_of(other), vec![]);
            let expected = prim == other;
            assert_eq!(
                are_equivalent_considering_boxing(&env, &prim_ty, &box_ty),
                expected,
                "{prim} vs box of {other}"
            );
        }
    }
}

#[test]
fn relation_is_reflexive_and_symmetric() {
    let env = TypeStore::with_minimal_jdk();
    let mut types: Vec<Type> = PRIMITIVES.iter().map(|p| Type::Primitive(*p)).collect();
    types.extend(
        PRIMITIVES
            .iter()
            .map(|p| Type::class(env.well_known().box_of(*p), vec![])),
    );
    types.push(Type::class(env.well_known().string, vec![]));
    types.push(Type::class(env.well_known().object, vec![]));

    for a in &types {
        assert!(are_equivalent_considering_boxing(&env, a, a));
        for b in &types {
            assert_eq!(
                are_equivalent_considering_boxing(&env, a, b),
                are_equivalent_considering_boxing(&env, b, a),
            );
        }
    }
}

#[test]
fn equivalence_does_not_absorb_subtyping() {
    let env = TypeStore::with_minimal_jdk();
    let object = Type::class(env.well_known().object, vec![]);
    // int is assignable to Object (through boxing plus widening), but the
    // slot-compatibility relation must not accept it.
    assert!(!are_equivalent_considering_boxing(
        &env,
        &Type::int(),
        &object
    ));
    assert!(!are_equivalent_considering_boxing(
        &env,
        &Type::class(env.well_known().int_box, vec![]),
        &object
    ));
}

#[test]
fn distinct_unequal_reference_types_are_never_equivalent() {
    let env = TypeStore::with_minimal_jdk();
    let string = Type::class(env.well_known().string, vec![]);
    let integer = Type::class(env.well_known().int_box, vec![]);
    assert!(!are_equivalent_considering_boxing(&env, &string, &integer));
    assert!(!are_equivalent_considering_boxing(
        &env,
        &Type::array(string.clone()),
        &string
    ));
}
