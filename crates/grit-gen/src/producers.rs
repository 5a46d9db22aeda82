use std::collections::{HashSet, VecDeque};

use tracing::trace;

use grit_sequence::TypedOperation;
use grit_types::{is_assignable, Type, TypeEnv};

use crate::trackers::Diagnostics;

/// Breadth-first search for operations whose return type is assignable to
/// `target`, starting from `frontier` (the specified classes plus the target
/// itself).
///
/// For each reachable class this emits its public constructors (when the
/// class type is assignable to `target` and the class is concrete) and its
/// public methods returning something assignable to `target`. Parameter
/// types of every enumerated public method join the worklist, producers and
/// non-producers alike, which is how the search reaches transitively needed
/// classes.
///
/// The result preserves discovery order and contains no duplicate
/// signatures. An empty result is a valid outcome; discovery itself never
/// fails.
pub fn find_producers(
    env: &dyn TypeEnv,
    target: &Type,
    frontier: &[Type],
    diagnostics: &mut Diagnostics,
) -> Vec<TypedOperation> {
    let mut result = Vec::new();
    let mut emitted: HashSet<TypedOperation> = HashSet::new();
    let mut processed: HashSet<Type> = HashSet::new();
    let mut worklist: VecDeque<Type> = frontier.iter().cloned().collect();

    while let Some(current) = worklist.pop_front() {
        // The processed set keys on structural type identity, so distinct
        // parameterized instantiations of one class are visited separately.
        if processed.contains(&current) || current.is_nonreceiver(env) {
            continue;
        }
        processed.insert(current.clone());

        if let Some(name) = touched_class_name(env, &current) {
            diagnostics.record_touched_class(&name);
        }

        let Some(def_id) = current.class_id() else {
            // Arrays and type variables carry no members of their own.
            continue;
        };
        let Some(class_def) = env.class(def_id) else {
            continue;
        };

        let enqueue = |worklist: &mut VecDeque<Type>, param: &Type| {
            if !param.is_primitive() && !processed.contains(param) {
                worklist.push_back(param.clone());
            }
        };

        if is_assignable(env, &current, target) && class_def.is_instantiable() {
            for ctor in class_def.public_constructors() {
                let op = TypedOperation::constructor(current.clone(), ctor.params.clone());
                for param in op.input_types() {
                    enqueue(&mut worklist, param);
                }
                if emitted.insert(op.clone()) {
                    result.push(op);
                }
            }
        }

        for method in class_def.public_methods() {
            let op = TypedOperation::method(
                current.clone(),
                method.name.clone(),
                method.is_static,
                method.params.clone(),
                method.return_type.clone(),
            );
            for param in op.input_types() {
                enqueue(&mut worklist, param);
            }
            if !is_assignable(env, &method.return_type, target) {
                continue;
            }
            if emitted.insert(op.clone()) {
                result.push(op);
            }
        }
    }

    trace!(
        target = %target.display_name(env),
        producers = result.len(),
        classes_visited = processed.len(),
        "producer discovery finished"
    );
    result
}

/// The class name to record for unspecified-class tracking: the class
/// itself, or the innermost element class for arrays.
fn touched_class_name(env: &dyn TypeEnv, ty: &Type) -> Option<String> {
    match ty {
        Type::Array(elem) => touched_class_name(env, elem),
        Type::Class(_) => {
            let id = ty.class_id()?;
            env.class(id).map(|c| c.name.clone())
        }
        _ => None,
    }
}
