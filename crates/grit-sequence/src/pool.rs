use std::collections::HashMap;

use tracing::trace;

use grit_types::{is_assignable, Type, TypeEnv};

use crate::sequence::Sequence;
use crate::value::Literal;

/// The pool: previously built sequences keyed by terminal output type.
///
/// Keys are kept in first-insertion order and sequences in per-key insertion
/// order, so a query's result order is stable for a fixed pool state. That
/// stability is what makes a generation run reproducible under a fixed seed.
#[derive(Debug, Default)]
pub struct SequenceCollection {
    order: Vec<Type>,
    by_type: HashMap<Type, Vec<Sequence>>,
}

impl SequenceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `sequence` under its terminal type. Idempotent on structural
    /// equality; sequences without statements are ignored.
    pub fn add(&mut self, sequence: Sequence) {
        let Some(ty) = sequence.last_variable_type().cloned() else {
            return;
        };
        if !self.by_type.contains_key(&ty) {
            self.order.push(ty.clone());
            self.by_type.insert(ty.clone(), Vec::new());
        }
        let bucket = self.by_type.get_mut(&ty).expect("bucket was just ensured");
        if !bucket.contains(&sequence) {
            bucket.push(sequence);
        }
    }

    /// Sequences whose terminal variable can satisfy a slot of `requested`.
    ///
    /// With `exact_type_match` the terminal type must equal `requested`;
    /// otherwise it must be assignable to it. With `only_receivers`,
    /// sequences whose terminal type cannot be a method receiver are
    /// dropped.
    pub fn query(
        &self,
        env: &dyn TypeEnv,
        requested: &Type,
        exact_type_match: bool,
        only_receivers: bool,
    ) -> Vec<Sequence> {
        let mut out = Vec::new();
        for ty in &self.order {
            let matches = if exact_type_match {
                ty == requested
            } else {
                is_assignable(env, ty, requested)
            };
            if !matches {
                continue;
            }
            if only_receivers && ty.is_nonreceiver(env) {
                continue;
            }
            out.extend(self.by_type[ty].iter().cloned());
        }
        trace!(
            requested = %requested.display_name(env),
            exact_type_match,
            only_receivers,
            found = out.len(),
            "pool query"
        );
        out
    }

    /// Total number of pooled sequences.
    pub fn size(&self) -> usize {
        self.by_type.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Seed the pool with single-statement literal sequences. This is the
    /// host's entry point for priming primitive and string constants before
    /// generation starts.
    pub fn seed_literals(&mut self, env: &dyn TypeEnv, literals: impl IntoIterator<Item = Literal>) {
        for literal in literals {
            self.add(Sequence::literal(env, literal));
        }
    }
}
