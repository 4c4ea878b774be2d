mod action;
mod domain;
mod error;
mod fact;
mod grounder;
pub mod loader;
mod plan;
mod planner;
mod problem;
mod search;
mod state;

pub use action::GroundedAction;
pub use domain::{ActionSchema, Agent, Domain, FactTemplate, Predicate};
pub use error::{PlannerError, Result};
pub use fact::Fact;
pub use grounder::{Grounder, GroundingMode};
pub use plan::{Plan, PlanStep};
pub use planner::Planner;
pub use problem::{Object, Problem};
pub use search::{BestFirstSearch, BreadthFirstSearch, SearchStrategy};
pub use state::WorldState;
