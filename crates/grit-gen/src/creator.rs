use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use grit_sequence::{
    DummyCheckGenerator, DummyVisitor, Sequence, SequenceCollection, SequenceExecutor,
};
use grit_types::{Type, TypeEnv};

use crate::config::{resolve_class_names, ConfigError, GeneratorConfig};
use crate::producers::find_producers;
use crate::synthesis::synthesize;
use crate::trackers::Diagnostics;

/// Counters accumulated across construction calls, for host-side reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub producers_found: usize,
    pub candidates_synthesized: usize,
    pub executions: usize,
    pub salvaged: usize,
}

/// Top-down input construction over a pool of previously built sequences.
///
/// The creator owns the configuration and the seeded random source; the
/// pool and the diagnostics context belong to the host and are passed into
/// each call. Everything here is single-threaded and synchronous; a
/// multi-threaded host serializes calls or wraps pool and diagnostics in
/// one lock.
pub struct InputCreator<'env, E> {
    env: &'env dyn TypeEnv,
    executor: E,
    config: GeneratorConfig,
    rng: StdRng,
    stats: GenerationStats,
}

impl<'env, E: SequenceExecutor> InputCreator<'env, E> {
    pub fn new(env: &'env dyn TypeEnv, executor: E, config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            env,
            executor,
            config,
            rng,
            stats: GenerationStats::default(),
        }
    }

    /// Construct inputs of type `target`, on demand.
    ///
    /// Discovers producers reachable from the specified classes and the
    /// target, synthesizes one candidate per producer in discovery order,
    /// executes each, and salvages successful results into `pool`. The
    /// returned list is the final pool query under the configured match
    /// flags; it may be empty even after successful salvages, and repeated
    /// calls converge as intermediate values accumulate.
    ///
    /// The only surfaced failure is an unresolvable specified class name.
    /// Everything else (no producers, missing inputs, failed executions) is
    /// absorbed into an empty or shorter result.
    pub fn create_input_for_type(
        &mut self,
        pool: &mut SequenceCollection,
        diagnostics: &mut Diagnostics,
        target: &Type,
    ) -> Result<Vec<Sequence>, ConfigError> {
        let specified: Vec<&str> = diagnostics.specified_classes().collect();
        let mut frontier = resolve_class_names(self.env, specified)?;
        if !frontier.contains(target) {
            frontier.push(target.clone());
        }

        let producers = find_producers(self.env, target, &frontier, diagnostics);
        self.stats.producers_found += producers.len();

        if producers.is_empty() {
            warn!(
                target = %target.display_name(self.env),
                "no producer methods found; cannot generate inputs for this type"
            );
            diagnostics.record_uninstantiable(target.clone());
            return Ok(Vec::new());
        }

        for producer in &producers {
            if let Some(candidate) = synthesize(self.env, pool, &mut self.rng, producer) {
                self.stats.candidates_synthesized += 1;
                self.execute_and_add_to_pool(pool, candidate);
            }
        }

        Ok(pool.query(
            self.env,
            target,
            self.config.exact_type_match,
            self.config.only_receivers,
        ))
    }

    /// Execute a candidate under dummy hooks and pool it when the terminal
    /// statement produced a non-null value. Everything else is discarded
    /// silently: exceptional and timed-out candidates are an expected cost
    /// of probing.
    fn execute_and_add_to_pool(&mut self, pool: &mut SequenceCollection, candidate: Sequence) {
        self.stats.executions += 1;
        let executed =
            self.executor
                .execute(&candidate, &mut DummyVisitor, &DummyCheckGenerator);

        let salvage = executed
            .terminal_outcome()
            .value()
            .is_some_and(|v| !v.is_null());
        if salvage {
            debug!(
                terminal = %candidate
                    .last_variable_type()
                    .map(|t| t.display_name(self.env))
                    .unwrap_or_default(),
                statements = candidate.len(),
                "salvaged candidate into the pool"
            );
            pool.add(candidate);
            self.stats.salvaged += 1;
        }
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
