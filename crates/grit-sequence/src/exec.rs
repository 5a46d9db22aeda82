use std::collections::HashMap;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::trace;

use grit_types::TypeEnv;

use crate::operation::{Callable, TypedOperation};
use crate::sequence::Sequence;
use crate::value::Value;

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    NotExecuted,
    Normal(Value),
    Exceptional(String),
    Timeout,
}

impl ExecutionOutcome {
    pub fn is_normal(&self) -> bool {
        matches!(self, ExecutionOutcome::Normal(_))
    }

    /// The produced value, for normal outcomes.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ExecutionOutcome::Normal(v) => Some(v),
            _ => None,
        }
    }
}

/// A sequence coupled with per-statement execution outcomes.
#[derive(Debug, Clone)]
pub struct ExecutableSequence {
    pub sequence: Sequence,
    outcomes: Vec<ExecutionOutcome>,
}

impl ExecutableSequence {
    pub fn new(sequence: Sequence) -> Self {
        let outcomes = vec![ExecutionOutcome::NotExecuted; sequence.len()];
        Self { sequence, outcomes }
    }

    pub fn outcome(&self, index: usize) -> &ExecutionOutcome {
        &self.outcomes[index]
    }

    /// Outcome of the last statement, the one whose value the generator
    /// wants. Sequences always have at least one statement.
    pub fn terminal_outcome(&self) -> &ExecutionOutcome {
        self.outcomes
            .last()
            .expect("sequences have at least one statement")
    }

    fn set_outcome(&mut self, index: usize, outcome: ExecutionOutcome) {
        self.outcomes[index] = outcome;
    }
}

/// Per-statement hook invoked around execution. The generator's salvage
/// phase runs under [`DummyVisitor`].
pub trait ExecutionVisitor {
    fn visit_before(&mut self, _sequence: &Sequence, _index: usize) {}
    fn visit_after(&mut self, _sequence: &Sequence, _index: usize, _outcome: &ExecutionOutcome) {}
}

/// Produces checks (assertions, contracts) over an executed sequence. The
/// generator's salvage phase runs under [`DummyCheckGenerator`], which
/// produces none.
pub trait CheckGenerator {
    fn visit(&self, _executed: &ExecutableSequence) {}
}

#[derive(Debug, Default)]
pub struct DummyVisitor;

impl ExecutionVisitor for DummyVisitor {}

#[derive(Debug, Default)]
pub struct DummyCheckGenerator;

impl CheckGenerator for DummyCheckGenerator {}

/// Failure raised by a callable during evaluation. `Raised` is the analogue
/// of user code throwing; the other variants are wiring faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("no callable registered for operation `{0}`")]
    Unregistered(String),

    #[error("callable expected {expected} arguments, got {actual}")]
    BadArity { expected: usize, actual: usize },

    #[error("null receiver")]
    NullReceiver,

    #[error("{0}")]
    Raised(String),
}

impl EvalError {
    pub fn raised(message: impl Into<String>) -> Self {
        EvalError::Raised(message.into())
    }
}

/// Runs a sequence statement by statement, stopping at the first non-normal
/// outcome. No failure escapes: every error is absorbed into the per
/// statement outcome.
pub trait SequenceExecutor {
    fn execute(
        &self,
        sequence: &Sequence,
        visitor: &mut dyn ExecutionVisitor,
        checks: &dyn CheckGenerator,
    ) -> ExecutableSequence;
}

type CallableFn = Box<dyn Fn(&[Value]) -> Result<Value, EvalError>>;

/// In-memory interpreter executor: a registry of callables keyed by
/// operation signature, plus a wall-clock per-statement deadline.
///
/// `NonreceiverInit` statements evaluate to their literal without a
/// registered callable; every other operation must be registered or its
/// statement reports `Exceptional`. The deadline is best-effort: it is
/// checked after each callable returns, so a non-terminating callable cannot
/// be preempted in-process.
pub struct HorizonExecutor<'env> {
    env: &'env dyn TypeEnv,
    callables: HashMap<TypedOperation, CallableFn>,
    statement_deadline: Duration,
}

impl<'env> HorizonExecutor<'env> {
    pub fn new(env: &'env dyn TypeEnv) -> Self {
        Self {
            env,
            callables: HashMap::new(),
            statement_deadline: Duration::from_secs(5),
        }
    }

    pub fn with_statement_deadline(mut self, deadline: Duration) -> Self {
        self.statement_deadline = deadline;
        self
    }

    /// Register the implementation of `operation`. A later registration for
    /// the same signature replaces the earlier one.
    pub fn register(
        &mut self,
        operation: TypedOperation,
        callable: impl Fn(&[Value]) -> Result<Value, EvalError> + 'static,
    ) {
        self.callables.insert(operation, Box::new(callable));
    }

    fn eval(&self, operation: &TypedOperation, args: &[Value]) -> Result<Value, EvalError> {
        if let Callable::NonreceiverInit { literal } = operation.callable() {
            return Ok(literal.value());
        }
        let callable = self
            .callables
            .get(operation)
            .ok_or_else(|| EvalError::Unregistered(operation.display_name(self.env)))?;
        if args.len() != operation.arity() {
            return Err(EvalError::BadArity {
                expected: operation.arity(),
                actual: args.len(),
            });
        }
        callable(args)
    }
}

impl SequenceExecutor for HorizonExecutor<'_> {
    fn execute(
        &self,
        sequence: &Sequence,
        visitor: &mut dyn ExecutionVisitor,
        checks: &dyn CheckGenerator,
    ) -> ExecutableSequence {
        let mut executed = ExecutableSequence::new(sequence.clone());

        'statements: for index in 0..sequence.len() {
            visitor.visit_before(sequence, index);
            let statement = &sequence.statements()[index];

            let mut args = Vec::with_capacity(statement.inputs.len());
            for &input in &statement.inputs {
                match executed.outcome(input) {
                    ExecutionOutcome::Normal(value) => args.push(value.clone()),
                    _ => {
                        // Executors short-circuit on the first failure, so a
                        // referenced statement without a value means the run
                        // already stopped.
                        break 'statements;
                    }
                }
            }

            let start = Instant::now();
            let result = self.eval(&statement.operation, &args);
            let outcome = if start.elapsed() > self.statement_deadline {
                ExecutionOutcome::Timeout
            } else {
                match result {
                    Ok(value) => ExecutionOutcome::Normal(value),
                    Err(err) => ExecutionOutcome::Exceptional(err.to_string()),
                }
            };

            visitor.visit_after(sequence, index, &outcome);
            let stop = !outcome.is_normal();
            executed.set_outcome(index, outcome);
            if stop {
                trace!(index, "execution stopped at first non-normal outcome");
                break;
            }
        }

        checks.visit(&executed);
        executed
    }
}
