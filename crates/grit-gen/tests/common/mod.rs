//! Shared horizon fixture: a handful of classes under test registered next
//! to the minimal JDK, plus an executor with their callables wired up.
#![allow(dead_code)]

use grit_sequence::{HorizonExecutor, TypedOperation, Value};
use grit_types::{
    ClassDef, ClassId, ClassKind, ConstructorDef, MethodDef, Type, TypeEnv, TypeStore,
};

pub struct Cut {
    pub env: TypeStore,
    pub point: ClassId,
    pub shape: ClassId,
    pub factories: ClassId,
    pub chain_a: ClassId,
    pub chain_b: ClassId,
    pub wrap: ClassId,
}

pub fn horizon() -> Cut {
    let mut env = TypeStore::with_minimal_jdk();
    let object = Type::class(env.well_known().object, vec![]);
    let string = Type::class(env.well_known().string, vec![]);
    let list = env.class_id("java.util.List").expect("List in minimal JDK");
    let list_string = Type::class(list, vec![string]);

    // geom.Point: the plain concrete CUT.
    let point = env.add_class(ClassDef {
        name: "geom.Point".to_string(),
        kind: ClassKind::Class,
        is_abstract: false,
        type_params: vec![],
        super_class: Some(object.clone()),
        interfaces: vec![],
        constructors: vec![ConstructorDef {
            params: vec![Type::int(), Type::int()],
            is_public: true,
        }],
        methods: vec![MethodDef {
            name: "getX".to_string(),
            params: vec![],
            return_type: Type::int(),
            is_static: false,
            is_public: true,
        }],
    });

    // geom.Shape: abstract, public constructor, no factory anywhere.
    let shape = env.add_class(ClassDef {
        name: "geom.Shape".to_string(),
        kind: ClassKind::Class,
        is_abstract: true,
        type_params: vec![],
        super_class: Some(object.clone()),
        interfaces: vec![],
        constructors: vec![ConstructorDef {
            params: vec![],
            is_public: true,
        }],
        methods: vec![],
    });

    // util.Factories: unrelated class with a static factory for List<String>.
    let factories = env.add_class(ClassDef {
        name: "util.Factories".to_string(),
        kind: ClassKind::Class,
        is_abstract: false,
        type_params: vec![],
        super_class: Some(object.clone()),
        interfaces: vec![],
        constructors: vec![],
        methods: vec![MethodDef {
            name: "make".to_string(),
            params: vec![],
            return_type: list_string,
            is_static: true,
            is_public: true,
        }],
    });

    // link.B first, so link.A can reference it. B offers no public way in;
    // tests seed B values by hand through `b_instance`.
    let chain_b = env.add_class(ClassDef {
        name: "link.B".to_string(),
        kind: ClassKind::Class,
        is_abstract: false,
        type_params: vec![],
        super_class: Some(object.clone()),
        interfaces: vec![],
        constructors: vec![],
        methods: vec![],
    });

    let chain_a = env.add_class(ClassDef {
        name: "link.A".to_string(),
        kind: ClassKind::Class,
        is_abstract: false,
        type_params: vec![],
        super_class: Some(object.clone()),
        interfaces: vec![],
        constructors: vec![ConstructorDef {
            params: vec![Type::class(chain_b, vec![])],
            is_public: true,
        }],
        methods: vec![],
    });

    // util.Wrap: its only producer takes a Wrap, so the pool must already
    // hold one.
    let wrap = env.add_class_with(|id| ClassDef {
        name: "util.Wrap".to_string(),
        kind: ClassKind::Class,
        is_abstract: false,
        type_params: vec![],
        super_class: Some(object),
        interfaces: vec![],
        constructors: vec![],
        methods: vec![MethodDef {
            name: "copy".to_string(),
            params: vec![Type::class(id, vec![])],
            return_type: Type::class(id, vec![]),
            is_static: true,
            is_public: true,
        }],
    });

    Cut {
        env,
        point,
        shape,
        factories,
        chain_a,
        chain_b,
        wrap,
    }
}

impl Cut {
    pub fn point_ty(&self) -> Type {
        Type::class(self.point, vec![])
    }

    pub fn shape_ty(&self) -> Type {
        Type::class(self.shape, vec![])
    }

    pub fn a_ty(&self) -> Type {
        Type::class(self.chain_a, vec![])
    }

    pub fn b_ty(&self) -> Type {
        Type::class(self.chain_b, vec![])
    }

    pub fn wrap_ty(&self) -> Type {
        Type::class(self.wrap, vec![])
    }

    pub fn list_string_ty(&self) -> Type {
        let list = self
            .env
            .class_id("java.util.List")
            .expect("List in minimal JDK");
        Type::class(list, vec![Type::class(self.env.well_known().string, vec![])])
    }

    pub fn point_ctor(&self) -> TypedOperation {
        TypedOperation::constructor(self.point_ty(), vec![Type::int(), Type::int()])
    }

    pub fn factories_make(&self) -> TypedOperation {
        TypedOperation::method(
            Type::class(self.factories, vec![]),
            "make",
            true,
            vec![],
            self.list_string_ty(),
        )
    }

    pub fn a_ctor(&self) -> TypedOperation {
        TypedOperation::constructor(self.a_ty(), vec![self.b_ty()])
    }

    /// A factory the horizon does not declare, so discovery never sees it.
    /// Tests use it to seed `link.B` values by hand.
    pub fn b_instance(&self) -> TypedOperation {
        TypedOperation::method(self.b_ty(), "instance", true, vec![], self.b_ty())
    }

    /// Another undeclared factory, for seeding `util.Wrap` values by hand.
    pub fn wrap_seed(&self) -> TypedOperation {
        TypedOperation::method(self.wrap_ty(), "seed", true, vec![], self.wrap_ty())
    }

    pub fn wrap_copy(&self) -> TypedOperation {
        TypedOperation::method(
            self.wrap_ty(),
            "copy",
            true,
            vec![self.wrap_ty()],
            self.wrap_ty(),
        )
    }

    pub fn integer_value_of(&self) -> TypedOperation {
        let int_box = Type::class(self.env.well_known().int_box, vec![]);
        TypedOperation::method(int_box.clone(), "valueOf", true, vec![Type::int()], int_box)
    }

    pub fn object_ctor(&self) -> TypedOperation {
        TypedOperation::constructor(Type::class(self.env.well_known().object, vec![]), vec![])
    }

    /// An executor with callables for every fixture operation registered.
    pub fn executor(&self) -> HorizonExecutor<'_> {
        let mut executor = HorizonExecutor::new(&self.env);

        let point = self.point;
        executor.register(self.point_ctor(), move |args| {
            Ok(Value::object(point, args.to_vec()))
        });

        let list = self
            .env
            .class_id("java.util.ArrayList")
            .expect("ArrayList in minimal JDK");
        executor.register(self.factories_make(), move |_| {
            Ok(Value::object(list, vec![]))
        });

        let chain_a = self.chain_a;
        executor.register(self.a_ctor(), move |args| {
            Ok(Value::object(chain_a, args.to_vec()))
        });

        let chain_b = self.chain_b;
        executor.register(self.b_instance(), move |_| {
            Ok(Value::object(chain_b, vec![]))
        });

        let wrap = self.wrap;
        executor.register(self.wrap_seed(), move |_| Ok(Value::object(wrap, vec![])));
        executor.register(self.wrap_copy(), move |args| Ok(args[0].clone()));

        let int_box = self.env.well_known().int_box;
        executor.register(self.integer_value_of(), move |args| {
            Ok(Value::object(int_box, args.to_vec()))
        });

        let object = self.env.well_known().object;
        executor.register(self.object_ctor(), move |_| {
            Ok(Value::object(object, vec![]))
        });

        executor
    }
}
