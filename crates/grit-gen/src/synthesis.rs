use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

use grit_sequence::{Sequence, SequenceCollection, TypedOperation};
use grit_types::{are_equivalent_considering_boxing, Type, TypeEnv};

/// Build one candidate sequence ending in `operation`, drawing one pooled
/// sequence per input slot.
///
/// Slot queries use exact matching for primitive slots (so an `int` slot is
/// not fed a `long`) and allow non-receiver results. After all parts are
/// drawn, every slot is resolved to a concrete statement index by walking
/// the input types left to right and claiming boxing-equivalent indices
/// positionally: the n-th slot of a type takes the n-th compatible index, so
/// two same-typed slots always land on two different producing statements.
///
/// Returns `None` when some slot has no pooled candidates or not enough
/// distinct compatible statements exist.
pub fn synthesize(
    env: &dyn TypeEnv,
    pool: &SequenceCollection,
    rng: &mut StdRng,
    operation: &TypedOperation,
) -> Option<Sequence> {
    let input_types = operation.input_types();

    let mut parts: Vec<Sequence> = Vec::with_capacity(input_types.len());
    let mut type_to_indices: HashMap<Type, Vec<usize>> = HashMap::new();
    let mut next_index = 0;

    for input_type in input_types {
        let candidates = pool.query(env, input_type, input_type.is_primitive(), false);
        if candidates.is_empty() {
            trace!(
                operation = %operation.display_name(env),
                slot_type = %input_type.display_name(env),
                "no pooled inputs for slot"
            );
            return None;
        }

        let drawn = candidates[rng.gen_range(0..candidates.len())].clone();
        for statement_index in 0..drawn.len() {
            let ty = drawn
                .variable_type(statement_index)
                .expect("index is within the drawn sequence")
                .clone();
            type_to_indices.entry(ty).or_default().push(next_index);
            next_index += 1;
        }
        parts.push(drawn);
    }

    let mut claimed: HashMap<Type, usize> = HashMap::new();
    let mut input_indices = Vec::with_capacity(input_types.len());
    for input_type in input_types {
        let compatible = compatible_indices(env, &type_to_indices, input_type);
        if compatible.is_empty() {
            return None;
        }
        let count = claimed.entry(input_type.clone()).or_insert(0);
        if *count >= compatible.len() {
            // Same-typed slots outnumber distinct producing statements.
            return None;
        }
        input_indices.push(compatible[*count]);
        *count += 1;
    }

    Sequence::concatenate(operation.clone(), &parts, input_indices).ok()
}

/// Statement indices whose output type can fill a slot of type `slot`,
/// considering boxing equivalence but not subtyping. Sorted ascending so the
/// positional claim is deterministic.
fn compatible_indices(
    env: &dyn TypeEnv,
    type_to_indices: &HashMap<Type, Vec<usize>>,
    slot: &Type,
) -> Vec<usize> {
    let mut out = Vec::new();
    for (ty, indices) in type_to_indices {
        if are_equivalent_considering_boxing(env, ty, slot) {
            out.extend_from_slice(indices);
        }
    }
    out.sort_unstable();
    out
}
