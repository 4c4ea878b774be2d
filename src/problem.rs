//! # Problem instances
//!
//! A [`Problem`] pairs a [`Domain`](crate::Domain) with one concrete task:
//! the object universe (each object carrying a type tag or, in the
//! multi-agent variant, a weight), the initial fact set, and the goal fact
//! set. Like the domain, a problem is immutable for the duration of a
//! planning run.
//!
//! The object universe is kept in ascending name order, which is part of
//! the grounder's documented determinism contract.
//!
//! ## Basic usage
//!
//! ```
//! use stripsrs::{Fact, Object, Problem};
//!
//! let mut problem = Problem::new("task01");
//! problem.add_object(Object::typed("a", "block"));
//! problem.add_init(Fact::new("on-table", ["a"]));
//! problem.add_goal(Fact::new("in-hand", ["a"]));
//!
//! assert_eq!(problem.initial_state().len(), 1);
//! ```

use crate::{Domain, Fact, PlannerError, Result, WorldState};
use std::collections::BTreeMap;

/// An object in the universe: a name plus either a type tag or a weight.
///
/// The weight form is used by multi-agent domains, where an agent may only
/// act on objects strictly lighter than its capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// The object name
    pub name: String,
    /// The declared type, when the type form is used
    pub type_name: Option<String>,
    /// The weight, when the weight form is used
    pub weight: Option<f32>,
}

impl Object {
    /// Creates an object with a type tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::Object;
    ///
    /// let block = Object::typed("A", "Block");
    /// assert_eq!(block.name, "a");
    /// assert_eq!(block.type_name.as_deref(), Some("block"));
    /// assert!(block.weight.is_none());
    /// ```
    pub fn typed(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            type_name: Some(type_name.into().to_lowercase()),
            weight: None,
        }
    }

    /// Creates an object with a weight.
    pub fn weighted(name: impl Into<String>, weight: f32) -> Self {
        Self {
            name: name.into().to_lowercase(),
            type_name: None,
            weight: Some(weight),
        }
    }
}

/// A problem instance: name, object universe, initial facts and goal facts.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    /// The problem name
    pub name: String,
    objects: BTreeMap<String, Object>,
    init: Vec<Fact>,
    goal: Vec<Fact>,
}

impl Problem {
    /// Creates a new empty problem.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            ..Default::default()
        }
    }

    /// Adds an object to the universe. A later object with the same name
    /// replaces the earlier one.
    pub fn add_object(&mut self, object: Object) {
        self.objects.insert(object.name.clone(), object);
    }

    /// Appends a fact to the initial state.
    pub fn add_init(&mut self, fact: Fact) {
        self.init.push(fact);
    }

    /// Appends a fact to the goal set.
    pub fn add_goal(&mut self, fact: Fact) {
        self.goal.push(fact);
    }

    /// The object universe, in ascending name order.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Object names, in ascending order. This is the binding order the
    /// grounder iterates for every parameter slot.
    pub fn object_names(&self) -> Vec<String> {
        self.objects.keys().cloned().collect()
    }

    /// Looks up an object by name.
    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.get(name)
    }

    /// Looks up an object's weight, if it has one.
    pub fn weight_of(&self, name: &str) -> Option<f32> {
        self.objects.get(name).and_then(|o| o.weight)
    }

    /// The initial facts as given.
    pub fn init(&self) -> &[Fact] {
        &self.init
    }

    /// The goal fact set.
    pub fn goal(&self) -> &[Fact] {
        &self.goal
    }

    /// The initial state as a [`WorldState`]. Its facts carry no agent tag;
    /// `None` is the sentinel for the synthetic root node.
    pub fn initial_state(&self) -> WorldState {
        WorldState::from_facts(self.init.iter().cloned())
    }

    /// Validates the problem against a domain, failing fast before search.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidProblem`] if an initial or goal fact
    /// references an object outside the declared universe or an undeclared
    /// predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::{Domain, Fact, Object, Predicate, Problem};
    ///
    /// let mut domain = Domain::new("blocks");
    /// domain.add_predicate(Predicate::new("in-hand", ["block"]));
    ///
    /// let mut problem = Problem::new("task01");
    /// problem.add_object(Object::typed("a", "block"));
    /// problem.add_goal(Fact::new("in-hand", ["b"])); // 'b' is undeclared
    ///
    /// assert!(problem.validate(&domain).is_err());
    /// ```
    pub fn validate(&self, domain: &Domain) -> Result<()> {
        for (section, facts) in [("init", &self.init), ("goal", &self.goal)] {
            for fact in facts {
                if !domain.has_predicate(fact.predicate()) {
                    return Err(PlannerError::InvalidProblem(format!(
                        "{} fact references undeclared predicate '{}'",
                        section,
                        fact.predicate()
                    )));
                }
                for arg in fact.args() {
                    if !self.objects.contains_key(arg) {
                        return Err(PlannerError::InvalidProblem(format!(
                            "{} fact '{}' references object '{}' outside the universe",
                            section, fact, arg
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Predicate;

    fn blocks_domain() -> Domain {
        let mut domain = Domain::new("blocks");
        domain.add_predicate(Predicate::new("on-table", ["block"]));
        domain.add_predicate(Predicate::new("in-hand", ["block"]));
        domain
    }

    #[test]
    fn test_objects_are_sorted_by_name() {
        let mut problem = Problem::new("task");
        problem.add_object(Object::typed("c", "block"));
        problem.add_object(Object::typed("a", "block"));
        problem.add_object(Object::typed("b", "block"));
        assert_eq!(problem.object_names(), ["a", "b", "c"]);
    }

    #[test]
    fn test_weight_lookup() {
        let mut problem = Problem::new("task");
        problem.add_object(Object::weighted("d", 60.0));
        problem.add_object(Object::typed("a", "block"));
        assert_eq!(problem.weight_of("d"), Some(60.0));
        assert_eq!(problem.weight_of("a"), None);
        assert_eq!(problem.weight_of("missing"), None);
    }

    #[test]
    fn test_valid_problem() {
        let mut problem = Problem::new("task");
        problem.add_object(Object::typed("a", "block"));
        problem.add_init(Fact::new("on-table", ["a"]));
        problem.add_goal(Fact::new("in-hand", ["a"]));
        assert!(problem.validate(&blocks_domain()).is_ok());
    }

    #[test]
    fn test_goal_with_undeclared_object_rejected() {
        let mut problem = Problem::new("task");
        problem.add_object(Object::typed("a", "block"));
        problem.add_goal(Fact::new("in-hand", ["b"]));
        let err = problem.validate(&blocks_domain()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidProblem(_)));
        assert!(format!("{}", err).contains("'b'"));
    }

    #[test]
    fn test_init_with_undeclared_predicate_rejected() {
        let mut problem = Problem::new("task");
        problem.add_object(Object::typed("a", "block"));
        problem.add_init(Fact::new("held", ["a"]));
        let err = problem.validate(&blocks_domain()).unwrap_err();
        assert!(format!("{}", err).contains("held"));
    }

    #[test]
    fn test_initial_state_is_untagged() {
        let mut problem = Problem::new("task");
        problem.add_object(Object::typed("a", "block"));
        problem.add_init(Fact::new("on-table", ["a"]));
        let state = problem.initial_state();
        assert!(state.iter().all(|f| f.agent().is_none()));
    }
}
