use std::hash::{Hash, Hasher};
use std::sync::Arc;

use grit_types::{ClassId, PrimitiveType, Type, TypeEnv};

/// A runtime value produced by executing a statement.
///
/// Object values are opaque to the generator: a class id plus whatever state
/// the executor's callables chose to store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Object {
        class: ClassId,
        fields: Arc<Vec<Value>>,
    },
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn object(class: ClassId, fields: Vec<Value>) -> Self {
        Value::Object {
            class,
            fields: Arc::new(fields),
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// A compile-time constant a sequence can start from without calling
/// anything: a primitive, a string, or a typed null.
#[derive(Debug, Clone)]
pub enum Literal {
    /// A null constant of the given reference type.
    Null(Type),
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
}

impl Literal {
    /// The declared type of this constant.
    pub fn ty(&self, env: &dyn TypeEnv) -> Type {
        match self {
            Literal::Null(ty) => ty.clone(),
            Literal::Boolean(_) => Type::Primitive(PrimitiveType::Boolean),
            Literal::Byte(_) => Type::Primitive(PrimitiveType::Byte),
            Literal::Short(_) => Type::Primitive(PrimitiveType::Short),
            Literal::Char(_) => Type::Primitive(PrimitiveType::Char),
            Literal::Int(_) => Type::Primitive(PrimitiveType::Int),
            Literal::Long(_) => Type::Primitive(PrimitiveType::Long),
            Literal::Float(_) => Type::Primitive(PrimitiveType::Float),
            Literal::Double(_) => Type::Primitive(PrimitiveType::Double),
            Literal::Str(_) => Type::class(env.well_known().string, vec![]),
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Literal::Null(_) => Value::Null,
            Literal::Boolean(v) => Value::Boolean(*v),
            Literal::Byte(v) => Value::Byte(*v),
            Literal::Short(v) => Value::Short(*v),
            Literal::Char(v) => Value::Char(*v),
            Literal::Int(v) => Value::Int(*v),
            Literal::Long(v) => Value::Long(*v),
            Literal::Float(v) => Value::Float(*v),
            Literal::Double(v) => Value::Double(*v),
            Literal::Str(v) => Value::Str(v.clone()),
        }
    }
}

// Literals participate in operation signatures, which must be hashable.
// Floats hash and compare by bit pattern; NaN literals are equal to
// themselves here, which is what signature identity wants.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        use Literal::*;
        match (self, other) {
            (Null(a), Null(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Byte(a), Byte(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (Str(a), Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Literal::Null(ty) => ty.hash(state),
            Literal::Boolean(v) => v.hash(state),
            Literal::Byte(v) => v.hash(state),
            Literal::Short(v) => v.hash(state),
            Literal::Char(v) => v.hash(state),
            Literal::Int(v) => v.hash(state),
            Literal::Long(v) => v.hash(state),
            Literal::Float(v) => v.to_bits().hash(state),
            Literal::Double(v) => v.to_bits().hash(state),
            Literal::Str(v) => v.hash(state),
        }
    }
}
