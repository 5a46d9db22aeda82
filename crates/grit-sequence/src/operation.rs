use std::fmt;

use grit_types::{Type, TypeEnv};

use crate::value::Literal;

/// What a [`TypedOperation`] actually invokes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Callable {
    Constructor,
    Method { name: String, is_static: bool },
    NonreceiverInit { literal: Literal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Constructor,
    InstanceMethod,
    StaticMethod,
    NonreceiverInit,
}

/// A callable bundled with its static signature.
///
/// Operations are value-equal on the full signature: two references to the
/// same constructor or method compare equal, which is what both pool
/// idempotence and the executor's callable registry key on. For instance
/// methods the receiver occupies input slot 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedOperation {
    callable: Callable,
    declaring_type: Type,
    input_types: Vec<Type>,
    return_type: Type,
}

impl TypedOperation {
    pub fn constructor(declaring_type: Type, params: Vec<Type>) -> Self {
        Self {
            callable: Callable::Constructor,
            return_type: declaring_type.clone(),
            declaring_type,
            input_types: params,
        }
    }

    /// An instance or static method. For instance methods the declaring type
    /// is prepended as input slot 0.
    pub fn method(
        declaring_type: Type,
        name: impl Into<String>,
        is_static: bool,
        params: Vec<Type>,
        return_type: Type,
    ) -> Self {
        let mut input_types = Vec::with_capacity(params.len() + 1);
        if !is_static {
            input_types.push(declaring_type.clone());
        }
        input_types.extend(params);
        Self {
            callable: Callable::Method {
                name: name.into(),
                is_static,
            },
            declaring_type,
            input_types,
            return_type,
        }
    }

    /// A literal initialization: no inputs, output is the literal's type.
    pub fn nonreceiver_init(env: &dyn TypeEnv, literal: Literal) -> Self {
        let ty = literal.ty(env);
        Self {
            callable: Callable::NonreceiverInit { literal },
            declaring_type: ty.clone(),
            input_types: vec![],
            return_type: ty,
        }
    }

    pub fn kind(&self) -> OperationKind {
        match &self.callable {
            Callable::Constructor => OperationKind::Constructor,
            Callable::Method {
                is_static: true, ..
            } => OperationKind::StaticMethod,
            Callable::Method { .. } => OperationKind::InstanceMethod,
            Callable::NonreceiverInit { .. } => OperationKind::NonreceiverInit,
        }
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    pub fn declaring_type(&self) -> &Type {
        &self.declaring_type
    }

    pub fn input_types(&self) -> &[Type] {
        &self.input_types
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn arity(&self) -> usize {
        self.input_types.len()
    }

    /// Human-readable signature, e.g. `java.lang.Integer.valueOf/1`.
    pub fn display_name(&self, env: &dyn TypeEnv) -> String {
        let declaring = self.declaring_type.display_name(env);
        match &self.callable {
            Callable::Constructor => format!("{declaring}.<init>/{}", self.arity()),
            Callable::Method { name, .. } => format!("{declaring}.{name}/{}", self.arity()),
            Callable::NonreceiverInit { literal } => format!("{declaring} = {literal:?}"),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Constructor => "constructor",
            OperationKind::InstanceMethod => "instance method",
            OperationKind::StaticMethod => "static method",
            OperationKind::NonreceiverInit => "nonreceiver init",
        };
        f.write_str(name)
    }
}
