//! Transitive closure over computed-to-computed dependencies.
//!
//! [`expand_computed_closure`] walks computed dependencies breadth-first from
//! a seed set. A visited set guarantees each name is processed once, so
//! cycles, self-loops and diamonds all terminate without duplicates. Names
//! with no definition are recorded as unresolved and, under the default
//! [`UnresolvedPolicy::Include`], kept in the closure.
//!
//! [`expanded_input_deps`] then folds in the direct input dependencies of
//! every computed value in a closure, which is how an output that reads only
//! computed values ends up listing the inputs behind them.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use toolgraph_core::ComputedDef;
use tracing::warn;

use crate::config::UnresolvedPolicy;
use crate::diagnostics::Warning;

/// Name lookup over the IR's computed definitions.
#[derive(Debug, Clone, Default)]
pub struct ComputedIndex<'a> {
    defs: IndexMap<&'a str, &'a ComputedDef>,
}

impl<'a> ComputedIndex<'a> {
    /// Indexes definitions by name. The first definition of a name wins.
    pub fn new(defs: &'a [ComputedDef]) -> Self {
        let mut index = IndexMap::with_capacity(defs.len());
        for def in defs {
            index.entry(def.name.as_str()).or_insert(def);
        }
        ComputedIndex { defs: index }
    }

    pub fn get(&self, name: &str) -> Option<&'a ComputedDef> {
        self.defs.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Result of a closure expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Closure {
    /// Computed names reachable from the seeds (seeds included), in
    /// breadth-first discovery order.
    pub members: IndexSet<String>,
    /// Reached names with no definition, in discovery order.
    pub unresolved: IndexSet<String>,
}

impl Closure {
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// One [`Warning::UnresolvedComputed`] per unresolved name.
    pub fn warnings(&self) -> Vec<Warning> {
        self.unresolved
            .iter()
            .map(|name| Warning::UnresolvedComputed { name: name.clone() })
            .collect()
    }
}

/// Expands `seeds` into the full set of computed values they depend on.
pub fn expand_computed_closure<I>(
    seeds: I,
    index: &ComputedIndex<'_>,
    policy: UnresolvedPolicy,
) -> Closure
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut visited: IndexSet<String> = IndexSet::new();
    let mut unresolved: IndexSet<String> = IndexSet::new();
    let mut queue: VecDeque<String> = seeds
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();

    while let Some(name) = queue.pop_front() {
        if visited.contains(&name) {
            continue;
        }
        visited.insert(name.clone());

        match index.get(&name) {
            Some(def) => {
                for dep in &def.computed_deps {
                    if !visited.contains(dep) {
                        queue.push_back(dep.clone());
                    }
                }
            }
            None => {
                warn!(name = %name, "unresolved computed reference");
                unresolved.insert(name);
            }
        }
    }

    let members = match policy {
        UnresolvedPolicy::Include => visited,
        UnresolvedPolicy::Exclude => visited
            .into_iter()
            .filter(|name| !unresolved.contains(name))
            .collect(),
    };

    Closure {
        members,
        unresolved,
    }
}

/// Unions `direct` with the direct input dependencies of every computed
/// value in `closure`. Direct inputs come first, then closure order.
pub fn expanded_input_deps(
    direct: &IndexSet<String>,
    closure: &Closure,
    index: &ComputedIndex<'_>,
) -> IndexSet<String> {
    let mut inputs = direct.clone();
    for def in closure.members.iter().filter_map(|name| index.get(name)) {
        inputs.extend(def.input_deps.iter().cloned());
    }
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(closure: &Closure) -> Vec<&str> {
        closure.members.iter().map(String::as_str).collect()
    }

    fn diamond() -> Vec<ComputedDef> {
        vec![
            ComputedDef::new("a"),
            ComputedDef::new("b").reading_computed(["a"]),
            ComputedDef::new("c").reading_computed(["a"]),
            ComputedDef::new("d").reading_computed(["b", "c"]),
        ]
    }

    #[test]
    fn diamond_visits_shared_ancestor_once() {
        let defs = diamond();
        let index = ComputedIndex::new(&defs);
        let closure = expand_computed_closure(["d"], &index, UnresolvedPolicy::Include);

        assert_eq!(closure.len(), 4);
        assert_eq!(names(&closure), vec!["d", "b", "c", "a"]);
        assert!(closure.unresolved.is_empty());
        assert!(closure.warnings().is_empty());
    }

    #[test]
    fn cycle_terminates() {
        let defs = vec![
            ComputedDef::new("a").reading_computed(["b"]),
            ComputedDef::new("b").reading_computed(["a"]),
        ];
        let index = ComputedIndex::new(&defs);
        let closure = expand_computed_closure(["a"], &index, UnresolvedPolicy::Include);
        assert_eq!(names(&closure), vec!["a", "b"]);
    }

    #[test]
    fn self_loop_terminates() {
        let defs = vec![ComputedDef::new("a").reading_computed(["a"])];
        let index = ComputedIndex::new(&defs);
        let closure = expand_computed_closure(["a"], &index, UnresolvedPolicy::Include);
        assert_eq!(names(&closure), vec!["a"]);
    }

    #[test]
    fn unknown_name_is_included_and_reported_once() {
        let defs = vec![ComputedDef::new("a")];
        let index = ComputedIndex::new(&defs);
        let closure =
            expand_computed_closure(["a", "missing"], &index, UnresolvedPolicy::Include);

        assert!(closure.contains("a"));
        assert!(closure.contains("missing"));

        let warnings = closure.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().contains("missing"));
    }

    #[test]
    fn unknown_name_reached_twice_is_reported_once() {
        let defs = vec![
            ComputedDef::new("a").reading_computed(["ghost"]),
            ComputedDef::new("b").reading_computed(["ghost"]),
        ];
        let index = ComputedIndex::new(&defs);
        let closure = expand_computed_closure(["a", "b"], &index, UnresolvedPolicy::Include);
        assert_eq!(names(&closure), vec!["a", "b", "ghost"]);
        assert_eq!(closure.warnings().len(), 1);
    }

    #[test]
    fn exclude_policy_drops_unknown_names_but_still_reports() {
        let defs = vec![ComputedDef::new("a").reading_computed(["missing"])];
        let index = ComputedIndex::new(&defs);
        let closure = expand_computed_closure(["a"], &index, UnresolvedPolicy::Exclude);

        assert_eq!(names(&closure), vec!["a"]);
        assert_eq!(closure.unresolved.len(), 1);
        assert_eq!(
            closure.warnings(),
            vec![Warning::UnresolvedComputed {
                name: "missing".into()
            }]
        );
    }

    #[test]
    fn empty_seed_gives_empty_closure() {
        let defs = diamond();
        let index = ComputedIndex::new(&defs);
        let closure =
            expand_computed_closure(Vec::<String>::new(), &index, UnresolvedPolicy::Include);
        assert!(closure.is_empty());
    }

    #[test]
    fn inputs_propagate_through_chain() {
        let defs = vec![
            ComputedDef::new("base").reading_inputs(["dataset"]),
            ComputedDef::new("filtered")
                .reading_computed(["base"])
                .reading_inputs(["n_rows"]),
        ];
        let index = ComputedIndex::new(&defs);
        let closure = expand_computed_closure(["filtered"], &index, UnresolvedPolicy::Include);

        let direct: IndexSet<String> = IndexSet::new();
        let inputs = expanded_input_deps(&direct, &closure, &index);
        let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
        assert_eq!(inputs, vec!["n_rows", "dataset"]);
    }

    #[test]
    fn direct_inputs_come_first_and_are_not_duplicated() {
        let defs = vec![ComputedDef::new("c").reading_inputs(["x", "y"])];
        let index = ComputedIndex::new(&defs);
        let closure = expand_computed_closure(["c"], &index, UnresolvedPolicy::Include);

        let direct: IndexSet<String> = ["y".to_string(), "z".to_string()].into_iter().collect();
        let inputs = expanded_input_deps(&direct, &closure, &index);
        let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
        assert_eq!(inputs, vec!["y", "z", "x"]);
    }
}
