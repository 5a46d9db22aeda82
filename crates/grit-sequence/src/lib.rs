//! Call sequences and their execution for the grit test generator.
//!
//! A [`Sequence`] is an immutable list of statements; each statement applies
//! a [`TypedOperation`] to the outputs of earlier statements. Sequences are
//! pooled by terminal output type in a [`SequenceCollection`] and run through
//! a [`SequenceExecutor`], which reports a per-statement
//! [`ExecutionOutcome`].

pub mod exec;
pub mod operation;
pub mod pool;
pub mod sequence;
pub mod value;

pub use exec::{
    CheckGenerator, DummyCheckGenerator, DummyVisitor, EvalError, ExecutableSequence,
    ExecutionOutcome, ExecutionVisitor, HorizonExecutor, SequenceExecutor,
};
pub use operation::{Callable, OperationKind, TypedOperation};
pub use pool::SequenceCollection;
pub use sequence::{Sequence, SequenceError, Statement};
pub use value::{Literal, Value};
