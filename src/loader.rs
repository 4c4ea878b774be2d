//! # Domain and problem loading
//!
//! This module is the boundary with the external data-loading collaborator:
//! it converts JSON domain/problem definitions into validated [`Domain`] and
//! [`Problem`] values. The core stays free of file I/O — callers read the
//! definition text themselves (or build the structures directly) and hand
//! strings to [`domain_from_json`] / [`problem_from_json`].
//!
//! ## Shapes
//!
//! ```json
//! {
//!   "domain": "blocks",
//!   "types": ["block"],
//!   "predicates": { "on-table": ["block"], "in-hand": ["block"] },
//!   "agents": { "a1": 50 },
//!   "action": {
//!     "pickup": {
//!       "parameters": { "block": ["x"] },
//!       "precondition": { "on-table": ["x"] },
//!       "effect": { "in-hand": ["x"] },
//!       "unique": true
//!     }
//!   }
//! }
//! ```
//!
//! ```json
//! {
//!   "name": "task01",
//!   "objects": { "a": "block", "d": 60 },
//!   "init": [["on-table", ["a"]]],
//!   "goal": [["in-hand", ["a"]]]
//! }
//! ```
//!
//! An object value is either a type name or a weight; agent capacities and
//! weights also accept the single-element list form (`[60]`). A
//! precondition/effect value is one argument tuple or a list of tuples.

use crate::{
    ActionSchema, Agent, Domain, Fact, FactTemplate, Object, PlannerError, Predicate, Problem,
    Result,
};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct DomainSpec {
    domain: String,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    predicates: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    agents: BTreeMap<String, Scalar>,
    #[serde(default)]
    action: BTreeMap<String, ActionSpec>,
}

#[derive(Debug, Deserialize)]
struct ActionSpec {
    #[serde(default)]
    parameters: BTreeMap<String, Vec<String>>,
    precondition: Option<BTreeMap<String, ArgSpec>>,
    effect: Option<BTreeMap<String, ArgSpec>>,
    #[serde(default)]
    unique: bool,
}

/// One argument tuple, or several for a predicate asserted more than once.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArgSpec {
    One(Vec<String>),
    Many(Vec<Vec<String>>),
}

impl ArgSpec {
    fn tuples(self) -> Vec<Vec<String>> {
        match self {
            ArgSpec::One(tuple) => vec![tuple],
            ArgSpec::Many(tuples) => tuples,
        }
    }
}

/// A number, or the single-element list form the original weight notation
/// uses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f32),
    List(Vec<f32>),
}

impl Scalar {
    fn value(&self) -> Option<f32> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::List(values) => values.first().copied(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ObjectSpec {
    Type(String),
    Weight(Scalar),
}

#[derive(Debug, Deserialize)]
struct ProblemSpec {
    name: String,
    #[serde(default)]
    objects: BTreeMap<String, ObjectSpec>,
    #[serde(default)]
    init: Vec<(String, Vec<String>)>,
    #[serde(default)]
    goal: Vec<(String, Vec<String>)>,
}

/// Parses and validates a domain definition from JSON text.
///
/// Action parameter slots are ordered by ascending type name, then by
/// position within the type's slot list; agents and schemas take ascending
/// name order. That ordering feeds straight into the grounder's documented
/// binding order.
///
/// # Errors
///
/// Returns [`PlannerError::Serialization`] for malformed JSON and
/// [`PlannerError::InvalidDomain`] for a well-formed definition that fails
/// validation (missing precondition/effect map, undeclared predicate, bad
/// capacity).
///
/// # Examples
///
/// ```
/// use stripsrs::loader::domain_from_json;
///
/// let domain = domain_from_json(
///     r#"{
///         "domain": "blocks",
///         "types": ["block"],
///         "predicates": { "on-table": ["block"], "in-hand": ["block"] },
///         "action": {
///             "pickup": {
///                 "parameters": { "block": ["x"] },
///                 "precondition": { "on-table": ["x"] },
///                 "effect": { "in-hand": ["x"] }
///             }
///         }
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(domain.name, "blocks");
/// assert_eq!(domain.actions.len(), 1);
/// ```
pub fn domain_from_json(text: &str) -> Result<Domain> {
    let spec: DomainSpec = serde_json::from_str(text)?;

    let mut domain = Domain::new(spec.domain);
    for type_name in spec.types {
        domain.add_type(type_name);
    }
    for (name, parameters) in spec.predicates {
        domain.add_predicate(Predicate::new(name, parameters));
    }
    for (name, capacity) in spec.agents {
        let capacity = capacity.value().ok_or_else(|| {
            PlannerError::InvalidDomain(format!("agent '{}' has an empty capacity", name))
        })?;
        domain.add_agent(Agent::new(name, capacity));
    }
    for (name, action) in spec.action {
        let mut schema = ActionSchema::new(&name);
        for (type_name, slots) in action.parameters {
            for slot in slots {
                schema = schema.with_parameter(slot, &type_name);
            }
        }
        let precondition = action.precondition.ok_or_else(|| {
            PlannerError::InvalidDomain(format!("action '{}' is missing its precondition map", name))
        })?;
        for (predicate, args) in precondition {
            for tuple in args.tuples() {
                schema = schema.with_precondition(FactTemplate::new(&predicate, tuple));
            }
        }
        let effect = action.effect.ok_or_else(|| {
            PlannerError::InvalidDomain(format!("action '{}' is missing its effect map", name))
        })?;
        for (predicate, args) in effect {
            for tuple in args.tuples() {
                schema = schema.with_effect(FactTemplate::new(&predicate, tuple));
            }
        }
        if action.unique {
            schema = schema.distinct();
        }
        domain.add_action(schema);
    }

    domain.validate()?;
    log::debug!(
        "Loaded domain '{}': {} predicates, {} agents, {} schemas",
        domain.name,
        domain.predicates.len(),
        domain.agents.len(),
        domain.actions.len()
    );
    Ok(domain)
}

/// Parses a problem definition from JSON text.
///
/// Validation against a domain happens separately (the planner runs it
/// before grounding), since a problem definition alone cannot know the
/// predicate vocabulary.
///
/// # Examples
///
/// ```
/// use stripsrs::loader::problem_from_json;
///
/// let problem = problem_from_json(
///     r#"{
///         "name": "task01",
///         "objects": { "a": "block", "d": 60 },
///         "init": [["on-table", ["a"]]],
///         "goal": [["in-hand", ["a"]]]
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(problem.weight_of("d"), Some(60.0));
/// assert_eq!(problem.goal().len(), 1);
/// ```
pub fn problem_from_json(text: &str) -> Result<Problem> {
    let spec: ProblemSpec = serde_json::from_str(text)?;

    let mut problem = Problem::new(spec.name);
    for (name, object) in spec.objects {
        match object {
            ObjectSpec::Type(type_name) => problem.add_object(Object::typed(name, type_name)),
            ObjectSpec::Weight(scalar) => {
                let weight = scalar.value().ok_or_else(|| {
                    PlannerError::InvalidProblem(format!("object '{}' has an empty weight", name))
                })?;
                problem.add_object(Object::weighted(name, weight));
            }
        }
    }
    for (predicate, args) in spec.init {
        problem.add_init(Fact::new(predicate, args));
    }
    for (predicate, args) in spec.goal {
        problem.add_goal(Fact::new(predicate, args));
    }
    log::debug!(
        "Loaded problem '{}': {} objects, {} init facts, {} goal facts",
        problem.name,
        problem.object_names().len(),
        problem.init().len(),
        problem.goal().len()
    );
    Ok(problem)
}
