//! # Grounding
//!
//! The [`Grounder`] expands every parameterized action schema in a domain
//! into the finite pool of [`GroundedAction`]s valid for a problem's object
//! universe. Grounding happens once per planning run; the search engine
//! treats the resulting pool as a static list it filters on every expansion.
//!
//! ## Binding order
//!
//! The pool order is a documented contract, not an accident: schemas in
//! declaration order, then agents in declaration order, then one binding
//! tuple per combination of objects in ascending name order with the *last*
//! parameter slot varying fastest. Given the same domain and problem, two
//! runs produce byte-identical pools, which makes both search modes
//! reproducible.
//!
//! ## Modes
//!
//! The default [`GroundingMode::Lenient`] binds every slot against the whole
//! object universe regardless of the slot's declared type: type annotations
//! stay purely declarative, at the cost of over-generating bindings for
//! typed domains. [`GroundingMode::Strict`] restricts each slot to objects
//! of its declared type; a slot with an unknown type simply yields no
//! bindings for that schema, never an error.

use crate::{Agent, Domain, Fact, GroundedAction, Problem};
use std::collections::{HashMap, HashSet};

/// How parameter slots are bound to objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundingMode {
    /// Bind every slot against the entire object universe, ignoring the
    /// slot's declared type (the default)
    #[default]
    Lenient,
    /// Bind each slot only to objects of the slot's declared type
    Strict,
}

/// Expands action schemas into grounded actions for one object universe.
///
/// # Examples
///
/// ```
/// use stripsrs::{
///     ActionSchema, Domain, FactTemplate, Grounder, Object, Predicate, Problem,
/// };
///
/// let mut domain = Domain::new("blocks");
/// domain.add_predicate(Predicate::new("on-table", ["block"]));
/// domain.add_predicate(Predicate::new("in-hand", ["block"]));
/// domain.add_action(
///     ActionSchema::new("pickup")
///         .with_parameter("b", "block")
///         .with_precondition(FactTemplate::new("on-table", ["b"]))
///         .with_effect(FactTemplate::new("in-hand", ["b"])),
/// );
///
/// let mut problem = Problem::new("task");
/// problem.add_object(Object::typed("a", "block"));
/// problem.add_object(Object::typed("b", "block"));
///
/// let pool = Grounder::new().ground(&domain, &problem);
/// // One slot, two objects: M^N = 2 grounded actions
/// assert_eq!(pool.len(), 2);
/// assert_eq!(pool[0].signature(), "pickup(a)");
/// assert_eq!(pool[1].signature(), "pickup(b)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Grounder {
    mode: GroundingMode,
}

impl Grounder {
    /// Creates a grounder with the default lenient mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grounder with the given mode.
    pub fn with_mode(mode: GroundingMode) -> Self {
        Self { mode }
    }

    /// Expands every schema in the domain against the problem's universe.
    ///
    /// In multi-agent domains the agent set is an outer product dimension:
    /// a schema with N slots over M objects and K agents yields up to
    /// K × M^N grounded actions (fewer under the distinctness constraint).
    pub fn ground(&self, domain: &Domain, problem: &Problem) -> Vec<GroundedAction> {
        // One `None` entry keeps single-agent domains on the same code path.
        let agents: Vec<Option<&Agent>> = if domain.agents.is_empty() {
            vec![None]
        } else {
            domain.agents.iter().map(Some).collect()
        };

        let mut pool = Vec::new();
        for schema in &domain.actions {
            let before = pool.len();
            let slot_pools = self.slot_pools(schema.parameters.as_slice(), problem);

            for agent in &agents {
                let mut seen_sets: HashSet<Vec<String>> = HashSet::new();
                for binding in cartesian(&slot_pools) {
                    if schema.unique {
                        let mut key = binding.clone();
                        key.sort();
                        if key.windows(2).any(|w| w[0] == w[1]) {
                            continue; // repeated object under distinctness
                        }
                        if !seen_sets.insert(key) {
                            continue; // set-equivalent binding already kept
                        }
                    }

                    let namemap: HashMap<&str, &str> = schema
                        .parameters
                        .iter()
                        .zip(binding.iter())
                        .map(|((slot, _), object)| (slot.as_str(), object.as_str()))
                        .collect();

                    let substitute = |args: &[String]| -> Vec<String> {
                        args.iter()
                            .map(|a| namemap.get(a.as_str()).copied().unwrap_or(a).to_string())
                            .collect()
                    };

                    let preconditions: Vec<Fact> = schema
                        .precondition
                        .iter()
                        .map(|t| Fact::new(&t.predicate, substitute(&t.args)))
                        .collect();
                    let effects: Vec<Fact> = schema
                        .effect
                        .iter()
                        .map(|t| Fact::new(&t.predicate, substitute(&t.args)))
                        .collect();

                    pool.push(GroundedAction::new(
                        &schema.name,
                        agent.map(|a| (*a).clone()),
                        binding,
                        preconditions,
                        effects,
                    ));
                }
            }
            log::debug!(
                "Grounded schema '{}' into {} actions",
                schema.name,
                pool.len() - before
            );
        }
        log::info!(
            "Grounded {} schemas into {} actions",
            domain.actions.len(),
            pool.len()
        );
        pool
    }

    /// The candidate objects for each parameter slot, in ascending name
    /// order.
    fn slot_pools(&self, parameters: &[(String, String)], problem: &Problem) -> Vec<Vec<String>> {
        parameters
            .iter()
            .map(|(_, type_name)| match self.mode {
                GroundingMode::Lenient => problem.object_names(),
                GroundingMode::Strict => problem
                    .objects()
                    .filter(|o| o.type_name.as_deref() == Some(type_name.as_str()))
                    .map(|o| o.name.clone())
                    .collect(),
            })
            .collect()
    }
}

/// Cartesian product of the slot pools, last slot varying fastest.
///
/// A schema with no parameters yields one empty binding; an empty pool for
/// any slot yields no bindings at all.
fn cartesian(pools: &[Vec<String>]) -> Vec<Vec<String>> {
    if pools.iter().any(|p| p.is_empty()) {
        return Vec::new();
    }
    let mut out = vec![Vec::new()];
    for pool in pools {
        let mut next = Vec::with_capacity(out.len() * pool.len());
        for prefix in &out {
            for item in pool {
                let mut binding = prefix.clone();
                binding.push(item.clone());
                next.push(binding);
            }
        }
        out = next;
    }
    out
}
