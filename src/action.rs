//! # Grounded actions
//!
//! A [`GroundedAction`] is an action schema whose parameter slots have all
//! been bound to concrete objects (and, in multi-agent domains, to an acting
//! agent). It carries fully-instantiated precondition and effect facts — no
//! free parameter names survive grounding — and provides the two operations
//! the search engine is built on: the applicability test and the state
//! transition.
//!
//! ## Transition rule
//!
//! The update is a simplified STRIPS rule with no separate delete list:
//!
//! ```text
//! next = (state − preconditions) ∪ (effects − preconditions)
//! ```
//!
//! computed on agent-tag-stripped fact sets, after which every fact in the
//! successor is re-tagged with the acting agent. A precondition fact that is
//! not re-asserted by an effect is consumed by the transition.
//!
//! ## Basic usage
//!
//! ```
//! use stripsrs::{Fact, GroundedAction, Problem, WorldState};
//!
//! let pickup = GroundedAction::new(
//!     "pickup",
//!     None,
//!     ["a"],
//!     [Fact::new("on-table", ["a"])],
//!     [Fact::new("in-hand", ["a"])],
//! );
//!
//! let problem = Problem::new("task");
//! let state = WorldState::from_facts([Fact::new("on-table", ["a"])]);
//! assert!(pickup.is_applicable(&state, &problem));
//!
//! let next = pickup.apply(&state);
//! assert!(next.contains(&Fact::new("in-hand", ["a"])));
//! assert!(!next.contains(&Fact::new("on-table", ["a"])));
//! ```

use crate::{Agent, Fact, Problem, WorldState};
use std::collections::BTreeSet;
use std::fmt;

/// An action schema bound to concrete objects and, optionally, an agent.
///
/// Immutable once constructed; the grounder produces the full pool once per
/// planning run and the search engine filters it on every expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundedAction {
    /// The schema name this action was grounded from
    pub name: String,
    /// The acting agent, if the domain declares agents
    pub agent: Option<Agent>,
    /// The ordered bound arguments, one per parameter slot
    pub args: Vec<String>,
    /// Fully-instantiated precondition facts (untagged)
    pub preconditions: Vec<Fact>,
    /// Fully-instantiated effect facts (untagged)
    pub effects: Vec<Fact>,
}

impl GroundedAction {
    /// Creates a grounded action from its parts.
    pub fn new<A, P, E>(
        name: impl Into<String>,
        agent: Option<Agent>,
        args: A,
        preconditions: P,
        effects: E,
    ) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        P: IntoIterator<Item = Fact>,
        E: IntoIterator<Item = Fact>,
    {
        Self {
            name: name.into().to_lowercase(),
            agent,
            args: args.into_iter().map(|a| a.into().to_lowercase()).collect(),
            preconditions: preconditions.into_iter().collect(),
            effects: effects.into_iter().collect(),
        }
    }

    /// The acting agent's name, if any.
    pub fn agent_name(&self) -> Option<&str> {
        self.agent.as_ref().map(|a| a.name.as_str())
    }

    /// Checks whether this action can be taken in the given state.
    ///
    /// Two gates, in order:
    ///
    /// 1. **Capacity** (multi-agent only): the acting agent's capacity must
    ///    be strictly greater than the weight of every weighted object
    ///    referenced by a precondition. An agent never acts on an object at
    ///    or above its capacity.
    /// 2. **Preconditions**: every precondition fact must be present in the
    ///    agent-tag-stripped projection of the state.
    pub fn is_applicable(&self, state: &WorldState, problem: &Problem) -> bool {
        if let Some(agent) = &self.agent {
            for pre in &self.preconditions {
                for arg in pre.args() {
                    if let Some(weight) = problem.weight_of(arg) {
                        if agent.capacity <= weight {
                            return false;
                        }
                    }
                }
            }
        }
        let projected = state.projection();
        self.preconditions
            .iter()
            .all(|pre| projected.contains(&pre.untagged()))
    }

    /// Applies this action to a state, producing the successor state.
    ///
    /// Computes `(state − preconditions) ∪ (effects − preconditions)` on
    /// untagged fact sets, then re-tags every surviving fact with the
    /// acting agent. The caller is responsible for only applying actions
    /// that are applicable.
    pub fn apply(&self, state: &WorldState) -> WorldState {
        let pre: BTreeSet<Fact> = self.preconditions.iter().map(Fact::untagged).collect();
        let eff: BTreeSet<Fact> = self.effects.iter().map(Fact::untagged).collect();

        let mut next: BTreeSet<Fact> = state.projection();
        next.retain(|f| !pre.contains(f));
        next.extend(eff.difference(&pre).cloned());

        WorldState::from_facts(next).retagged(self.agent_name())
    }

    /// The action signature, e.g. `pickup(a)` or `a1: pickup(d)`.
    pub fn signature(&self) -> String {
        match self.agent_name() {
            Some(agent) => format!("{}: {}({})", agent, self.name, self.args.join(", ")),
            None => format!("{}({})", self.name, self.args.join(", ")),
        }
    }
}

impl fmt::Display for GroundedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}
