//! # Plans
//!
//! A [`Plan`] is the output of a successful search: the initial world state
//! followed by an ordered sequence of [`PlanStep`]s, each recording the
//! grounded action taken, the acting agent (absent for agentless domains and
//! for the synthetic initial node) and the world state the action produced.
//!
//! A plan with zero steps is a valid result: it means the initial state
//! already satisfied the goal. It is distinct from "no solution", which the
//! planner reports as an absent plan (`Ok(None)`).

use crate::WorldState;
use std::fmt;

/// One step of a plan: the action taken and the state it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    /// The acting agent, if the domain declares agents
    pub agent: Option<String>,
    /// The grounded action's schema name
    pub action: String,
    /// The bound arguments of the action
    pub args: Vec<String>,
    /// The world state resulting from the action
    pub state: WorldState,
}

impl PlanStep {
    /// The step's action signature, e.g. `pickup(a)` or `a1: pickup(d)`.
    pub fn signature(&self) -> String {
        match &self.agent {
            Some(agent) => format!("{}: {}({})", agent, self.action, self.args.join(", ")),
            None => format!("{}({})", self.action, self.args.join(", ")),
        }
    }
}

/// An ordered sequence of steps from the initial state to a goal state.
///
/// # Examples
///
/// ```
/// use stripsrs::{Fact, Plan, WorldState};
///
/// let plan = Plan::new(WorldState::from_facts([Fact::new("on-table", ["a"])]));
/// assert!(plan.is_empty());
/// assert_eq!(plan.len(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    initial: WorldState,
    steps: Vec<PlanStep>,
}

impl Plan {
    /// Creates an empty plan rooted at the given initial state.
    pub fn new(initial: WorldState) -> Self {
        Self {
            initial,
            steps: Vec::new(),
        }
    }

    /// Appends a step.
    pub fn push(&mut self, step: PlanStep) {
        self.steps.push(step);
    }

    /// The initial state the plan starts from.
    pub fn initial_state(&self) -> &WorldState {
        &self.initial
    }

    /// The steps, in execution order.
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Number of actions in the plan.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan contains no actions (the initial state already
    /// satisfied the goal).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The final world state, after the last step.
    pub fn final_state(&self) -> &WorldState {
        self.steps.last().map(|s| &s.state).unwrap_or(&self.initial)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "0. <initial> {}", self.initial)?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{}. {} -> {}", i + 1, step.signature(), step.state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fact;

    fn one_step_plan() -> Plan {
        let mut plan = Plan::new(WorldState::from_facts([Fact::new("on-table", ["a"])]));
        plan.push(PlanStep {
            agent: Some("a1".to_string()),
            action: "pickup".to_string(),
            args: vec!["a".to_string()],
            state: WorldState::from_facts([Fact::new("in-hand", ["a"]).tagged("a1")]),
        });
        plan
    }

    #[test]
    fn test_empty_plan_final_state_is_initial() {
        let initial = WorldState::from_facts([Fact::new("p", ["x"])]);
        let plan = Plan::new(initial.clone());
        assert!(plan.is_empty());
        assert_eq!(plan.final_state(), &initial);
    }

    #[test]
    fn test_step_signature() {
        let plan = one_step_plan();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps()[0].signature(), "a1: pickup(a)");
    }

    #[test]
    fn test_display_lists_initial_then_steps() {
        let rendered = format!("{}", one_step_plan());
        assert!(rendered.starts_with("0. <initial> {on-table(a)}"));
        assert!(rendered.contains("1. a1: pickup(a) -> {in-hand(a)@a1}"));
    }
}
