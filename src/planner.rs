//! # Planner orchestration
//!
//! The [`Planner`] wires a validated [`Domain`] into the [`Grounder`] and a
//! [`SearchStrategy`] and runs one problem at a time to completion:
//!
//! 1. Domain validation happens once, at construction (fail fast).
//! 2. For each problem: validate it against the domain, ground the schemas
//!    into the full action pool, then hand the pool to the search strategy.
//!
//! ## Basic usage
//!
//! ```
//! use stripsrs::{
//!     ActionSchema, Domain, Fact, FactTemplate, Object, Planner, Predicate, Problem,
//! };
//!
//! // Domain: one type, two predicates, one schema
//! let mut domain = Domain::new("blocks");
//! domain.add_type("block");
//! domain.add_predicate(Predicate::new("on-table", ["block"]));
//! domain.add_predicate(Predicate::new("in-hand", ["block"]));
//! domain.add_action(
//!     ActionSchema::new("pickup")
//!         .with_parameter("b", "block")
//!         .with_precondition(FactTemplate::new("on-table", ["b"]))
//!         .with_effect(FactTemplate::new("in-hand", ["b"])),
//! );
//!
//! // Problem: one block on the table, goal is to hold it
//! let mut problem = Problem::new("task01");
//! problem.add_object(Object::typed("a", "block"));
//! problem.add_init(Fact::new("on-table", ["a"]));
//! problem.add_goal(Fact::new("in-hand", ["a"]));
//!
//! let planner = Planner::new(domain).unwrap();
//! let plan = planner.plan(&problem).unwrap().expect("solvable");
//! assert_eq!(plan.len(), 1);
//! assert_eq!(plan.steps()[0].signature(), "pickup(a)");
//! ```

use crate::grounder::{Grounder, GroundingMode};
use crate::search::{BreadthFirstSearch, SearchStrategy};
use crate::{Domain, Plan, Problem, Result};

/// The planning orchestrator: domain + grounder + search strategy.
///
/// The domain is validated eagerly in the constructors, so a `Planner`
/// always holds a well-formed domain. Each call to [`Planner::plan`] is an
/// independent, single-threaded run; the frontier, visited set and
/// backpointers live inside the strategy invocation and are dropped when it
/// returns.
pub struct Planner {
    domain: Domain,
    grounder: Grounder,
    strategy: Box<dyn SearchStrategy>,
}

impl Planner {
    /// Creates a planner with the default breadth-first strategy and
    /// lenient grounding.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidDomain`](crate::PlannerError::InvalidDomain)
    /// if the domain fails validation.
    pub fn new(domain: Domain) -> Result<Self> {
        Self::with_strategy(domain, Box::new(BreadthFirstSearch::new()))
    }

    /// Creates a planner with a custom search strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::{BestFirstSearch, Domain, Planner};
    ///
    /// let domain = Domain::new("empty");
    /// let planner = Planner::with_strategy(domain, Box::new(BestFirstSearch::new())).unwrap();
    /// # let _ = planner;
    /// ```
    pub fn with_strategy(domain: Domain, strategy: Box<dyn SearchStrategy>) -> Result<Self> {
        domain.validate()?;
        Ok(Self {
            domain,
            grounder: Grounder::new(),
            strategy,
        })
    }

    /// Switches the grounding mode (lenient by default).
    pub fn grounding_mode(mut self, mode: GroundingMode) -> Self {
        self.grounder = Grounder::with_mode(mode);
        self
    }

    /// The validated domain this planner was built from.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Plans one problem to completion.
    ///
    /// Validates the problem, grounds the full action pool once, then runs
    /// the configured search strategy over it.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(plan))` — a goal-satisfying plan (empty when the initial
    ///   state already matches the goal)
    /// * `Ok(None)` — no solution exists in the reachable state space
    /// * `Err(..)` — validation failure or expansion bound hit
    pub fn plan(&self, problem: &Problem) -> Result<Option<Plan>> {
        problem.validate(&self.domain)?;

        let pool = self.grounder.ground(&self.domain, problem);
        log::info!(
            "Planning '{}' over '{}': {} grounded actions",
            problem.name,
            self.domain.name,
            pool.len()
        );

        let outcome = self.strategy.search(&pool, problem)?;
        if outcome.is_none() {
            log::warn!("No solution found for problem '{}'", problem.name);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ActionSchema, Agent, BestFirstSearch, Fact, FactTemplate, Object, PlannerError,
        Predicate, Problem,
    };

    fn blocks_domain() -> Domain {
        let mut domain = Domain::new("blocks");
        domain.add_type("block");
        domain.add_predicate(Predicate::new("on-table", ["block"]));
        domain.add_predicate(Predicate::new("in-hand", ["block"]));
        domain.add_action(
            ActionSchema::new("pickup")
                .with_parameter("b", "block")
                .with_precondition(FactTemplate::new("on-table", ["b"]))
                .with_effect(FactTemplate::new("in-hand", ["b"])),
        );
        domain
    }

    fn pickup_problem() -> Problem {
        let mut problem = Problem::new("task01");
        problem.add_object(Object::typed("a", "block"));
        problem.add_init(Fact::new("on-table", ["a"]));
        problem.add_goal(Fact::new("in-hand", ["a"]));
        problem
    }

    #[test]
    fn test_single_step_plan() {
        let planner = Planner::new(blocks_domain()).unwrap();
        let plan = planner.plan(&pickup_problem()).unwrap().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps()[0].signature(), "pickup(a)");
        assert!(plan.steps()[0].state.contains(&Fact::new("in-hand", ["a"])));
    }

    #[test]
    fn test_invalid_domain_rejected_at_construction() {
        let mut domain = blocks_domain();
        domain.add_action(
            ActionSchema::new("drop")
                .with_precondition(FactTemplate::new("undeclared", ["b"]))
                .with_effect(FactTemplate::new("on-table", ["b"])),
        );
        // Planner boxes its strategy, so go through Option to get the error.
        let err = Planner::new(domain).err().unwrap();
        assert!(matches!(err, PlannerError::InvalidDomain(_)));
    }

    #[test]
    fn test_invalid_problem_rejected_before_search() {
        let planner = Planner::new(blocks_domain()).unwrap();
        let mut problem = pickup_problem();
        problem.add_goal(Fact::new("in-hand", ["b"])); // 'b' is undeclared
        let err = planner.plan(&problem).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidProblem(_)));
    }

    #[test]
    fn test_unreachable_goal_reports_no_solution() {
        let planner = Planner::new(blocks_domain()).unwrap();
        let mut problem = Problem::new("stuck");
        problem.add_object(Object::typed("a", "block"));
        problem.add_init(Fact::new("in-hand", ["a"]));
        problem.add_goal(Fact::new("on-table", ["a"]));
        assert!(planner.plan(&problem).unwrap().is_none());
    }

    #[test]
    fn test_best_first_strategy() {
        let planner =
            Planner::with_strategy(blocks_domain(), Box::new(BestFirstSearch::new())).unwrap();
        let plan = planner.plan(&pickup_problem()).unwrap().unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_multi_agent_capacity_selects_stronger_agent() {
        let mut domain = blocks_domain();
        domain.add_agent(Agent::new("a1", 50.0));
        domain.add_agent(Agent::new("a2", 100.0));

        let mut problem = Problem::new("heavy");
        problem.add_object(Object::weighted("d", 60.0));
        problem.add_init(Fact::new("on-table", ["d"]));
        problem.add_goal(Fact::new("in-hand", ["d"]));

        let planner = Planner::new(domain).unwrap();
        let plan = planner.plan(&problem).unwrap().unwrap();
        assert_eq!(plan.len(), 1);
        // Only a2's capacity clears the 60-unit object.
        assert_eq!(plan.steps()[0].agent.as_deref(), Some("a2"));
    }
}
