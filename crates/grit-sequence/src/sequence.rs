use std::sync::Arc;

use thiserror::Error;

use grit_types::{Type, TypeEnv};

use crate::operation::TypedOperation;
use crate::value::Literal;

/// One step of a sequence: an operation applied to the outputs of earlier
/// statements. Each input is the index of a statement strictly before this
/// one in the same sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub operation: TypedOperation,
    pub inputs: Vec<usize>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("statement {statement} refers forward to statement {input}")]
    ForwardReference { statement: usize, input: usize },

    #[error("terminal operation wants {expected} inputs but {actual} were resolved")]
    ArityMismatch { expected: usize, actual: usize },
}

/// An immutable, ordered list of statements.
///
/// Sequences are value types: structural equality and hashing over the
/// statement list, cheap cloning via a shared backing slice. Extension never
/// mutates; it builds a new sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    statements: Arc<[Statement]>,
}

impl Sequence {
    /// A single-statement sequence initializing a literal constant.
    pub fn literal(env: &dyn TypeEnv, literal: Literal) -> Self {
        let operation = TypedOperation::nonreceiver_init(env, literal);
        Self {
            statements: Arc::from(vec![Statement {
                operation,
                inputs: vec![],
            }]),
        }
    }

    /// Concatenate `parts` and append `(operation, input_indices)` as the
    /// terminal statement.
    ///
    /// Input references inside each part are rebased by that part's offset in
    /// the combined sequence; `input_indices` are already global. Fails if
    /// any terminal input does not point strictly before the terminal
    /// statement, or if the index count does not match the operation's arity.
    pub fn concatenate(
        operation: TypedOperation,
        parts: &[Sequence],
        input_indices: Vec<usize>,
    ) -> Result<Self, SequenceError> {
        let total: usize = parts.iter().map(|p| p.len()).sum();

        if input_indices.len() != operation.arity() {
            return Err(SequenceError::ArityMismatch {
                expected: operation.arity(),
                actual: input_indices.len(),
            });
        }
        if let Some(&bad) = input_indices.iter().find(|&&i| i >= total) {
            return Err(SequenceError::ForwardReference {
                statement: total,
                input: bad,
            });
        }

        let mut statements = Vec::with_capacity(total + 1);
        let mut offset = 0;
        for part in parts {
            for stmt in part.statements.iter() {
                statements.push(Statement {
                    operation: stmt.operation.clone(),
                    inputs: stmt.inputs.iter().map(|i| i + offset).collect(),
                });
            }
            offset += part.len();
        }
        statements.push(Statement {
            operation,
            inputs: input_indices,
        });

        Ok(Self {
            statements: Arc::from(statements),
        })
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn statement(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    /// Output type of statement `index`.
    pub fn variable_type(&self, index: usize) -> Option<&Type> {
        self.statements.get(index).map(|s| s.operation.return_type())
    }

    /// Output type of the terminal statement.
    pub fn last_variable_type(&self) -> Option<&Type> {
        self.statements.last().map(|s| s.operation.return_type())
    }

    /// True when every input reference points strictly backward.
    pub fn is_well_formed(&self) -> bool {
        self.statements
            .iter()
            .enumerate()
            .all(|(i, s)| s.inputs.iter().all(|&r| r < i))
    }
}
