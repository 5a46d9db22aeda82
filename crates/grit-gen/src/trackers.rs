use std::collections::BTreeSet;

use grit_types::Type;

/// Generation diagnostics the host can inspect after (or between) runs.
///
/// The three trackers are additive: classes and types are recorded and never
/// removed. `uninstantiable_types` in particular is *not* a negative cache;
/// a type recorded there is still searched again on a later call, because
/// the horizon or the pool may have changed in the meantime.
#[derive(Debug, Default)]
pub struct Diagnostics {
    specified_classes: BTreeSet<String>,
    unspecified_classes: BTreeSet<String>,
    uninstantiable_types: Vec<Type>,
}

impl Diagnostics {
    /// Initialize with the user-specified class names. The specified set is
    /// fixed for the lifetime of this context.
    pub fn new(specified_classes: impl IntoIterator<Item = String>) -> Self {
        Self {
            specified_classes: specified_classes.into_iter().collect(),
            unspecified_classes: BTreeSet::new(),
            uninstantiable_types: Vec::new(),
        }
    }

    pub fn specified_classes(&self) -> impl Iterator<Item = &str> {
        self.specified_classes.iter().map(String::as_str)
    }

    pub fn is_specified(&self, class_name: &str) -> bool {
        self.specified_classes.contains(class_name)
    }

    /// Record a class the producer search touched that the user did not
    /// specify. Specified classes are ignored.
    pub fn record_touched_class(&mut self, class_name: &str) {
        if !self.specified_classes.contains(class_name) {
            self.unspecified_classes.insert(class_name.to_string());
        }
    }

    pub fn unspecified_classes(&self) -> impl Iterator<Item = &str> {
        self.unspecified_classes.iter().map(String::as_str)
    }

    /// Record a type the creator found no producers for.
    pub fn record_uninstantiable(&mut self, ty: Type) {
        if !self.uninstantiable_types.contains(&ty) {
            self.uninstantiable_types.push(ty);
        }
    }

    pub fn uninstantiable_types(&self) -> &[Type] {
        &self.uninstantiable_types
    }
}
