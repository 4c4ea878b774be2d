//! # Forward state-space search
//!
//! This module provides the search engine that explores the graph of
//! reachable [`WorldState`]s using a static pool of [`GroundedAction`]s.
//! Two interchangeable strategies share one node model:
//!
//! * [`BreadthFirstSearch`] — plain FIFO exploration. Because the frontier
//!   is processed in non-decreasing depth order, the first plan found has
//!   the smallest possible action count.
//! * [`BestFirstSearch`] — the same loop, but each successor batch is
//!   sorted by descending goal-fact overlap before it is appended to the
//!   frontier. This is a greedy re-ordering of the batch, not a full
//!   priority queue over the whole frontier; ties keep generation order.
//!
//! Both strategies own their frontier, visited set and backpointers for the
//! duration of one invocation — there is no shared search state between
//! runs. Both accept an optional expansion bound that guards against
//! runaway exploration of large universes and fails with
//! [`PlannerError::SearchExhausted`] when exceeded.
//!
//! "No solution" is a normal terminal outcome, returned as `Ok(None)`.

use crate::{Fact, GroundedAction, Plan, PlanStep, PlannerError, Problem, Result, WorldState};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Trait defining the interface for search strategies.
///
/// A strategy consumes the grounded action pool and a problem (initial
/// state, goal set, object weights) and either finds a plan, proves the
/// reachable space contains no goal state, or gives up at its expansion
/// bound.
///
/// # Examples
///
/// ```
/// use stripsrs::{GroundedAction, Plan, Problem, Result, SearchStrategy};
///
/// struct FirstApplicable;
///
/// impl SearchStrategy for FirstApplicable {
///     fn search(&self, actions: &[GroundedAction], problem: &Problem) -> Result<Option<Plan>> {
///         let state = problem.initial_state();
///         for action in actions {
///             if action.is_applicable(&state, problem) {
///                 let next = action.apply(&state);
///                 if next.matches_goal(problem.goal()) {
///                     let mut plan = Plan::new(state);
///                     plan.push(stripsrs::PlanStep {
///                         agent: action.agent_name().map(String::from),
///                         action: action.name.clone(),
///                         args: action.args.clone(),
///                         state: next,
///                     });
///                     return Ok(Some(plan));
///                 }
///             }
///         }
///         Ok(None)
///     }
/// }
/// ```
pub trait SearchStrategy {
    /// Searches for a plan from the problem's initial state to its goal.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(plan))` — a goal-satisfying path (empty when the initial
    ///   state already matches the goal)
    /// * `Ok(None)` — the frontier emptied without reaching the goal
    /// * `Err(PlannerError::SearchExhausted)` — the expansion bound was hit
    fn search(&self, actions: &[GroundedAction], problem: &Problem) -> Result<Option<Plan>>;
}

/// A node in the search space: a state plus the backpointer that produced it.
#[derive(Debug, Clone)]
struct Node {
    /// The state at this node
    state: WorldState,
    /// Index of the parent node, `None` for the synthetic root
    parent: Option<usize>,
    /// Action that led to this state from the parent
    action: Option<GroundedAction>,
}

/// Owns the frontier, visited set and backpointer arena for one invocation.
struct SearchContext {
    /// All nodes created during the search; backpointers index into this
    nodes: Vec<Node>,
    /// FIFO frontier of node indices
    frontier: VecDeque<usize>,
    /// Projections of states already expanded
    visited: HashSet<BTreeSet<Fact>>,
    /// Number of states expanded so far
    expanded: usize,
    /// Optional bound on expansions
    max_expansions: Option<usize>,
}

impl SearchContext {
    fn new(initial: WorldState, max_expansions: Option<usize>) -> Self {
        let root = Node {
            state: initial,
            parent: None,
            action: None,
        };
        let mut frontier = VecDeque::new();
        frontier.push_back(0);
        Self {
            nodes: vec![root],
            frontier,
            visited: HashSet::new(),
            expanded: 0,
            max_expansions,
        }
    }

    /// Pops the next frontier node that has not been expanded yet.
    fn next_node(&mut self) -> Option<usize> {
        while let Some(idx) = self.frontier.pop_front() {
            if !self.visited.contains(&self.nodes[idx].state.projection()) {
                return Some(idx);
            }
        }
        None
    }

    /// Counts one expansion, failing when the bound is exceeded.
    fn count_expansion(&mut self) -> Result<()> {
        if let Some(max) = self.max_expansions {
            if self.expanded >= max {
                return Err(PlannerError::SearchExhausted {
                    expanded: self.expanded,
                });
            }
        }
        self.expanded += 1;
        Ok(())
    }

    fn mark_visited(&mut self, idx: usize) {
        let projection = self.nodes[idx].state.projection();
        self.visited.insert(projection);
    }

    fn is_visited(&self, state: &WorldState) -> bool {
        self.visited.contains(&state.projection())
    }

    /// Records a successor and enqueues it.
    fn push_successor(&mut self, state: WorldState, parent: usize, action: GroundedAction) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            state,
            parent: Some(parent),
            action: Some(action),
        });
        self.frontier.push_back(idx);
    }

    /// Walks the backpointers from the goal node to the root and reverses
    /// the chain into a plan.
    fn reconstruct(&self, goal_idx: usize) -> Plan {
        let mut steps = Vec::new();
        let mut current = goal_idx;
        while let Some(parent) = self.nodes[current].parent {
            let node = &self.nodes[current];
            // Every non-root node was produced by an action.
            if let Some(action) = &node.action {
                steps.push(PlanStep {
                    agent: action.agent_name().map(String::from),
                    action: action.name.clone(),
                    args: action.args.clone(),
                    state: node.state.clone(),
                });
            }
            current = parent;
        }
        steps.reverse();

        let mut plan = Plan::new(self.nodes[0].state.clone());
        for step in steps {
            plan.push(step);
        }
        plan
    }
}

/// Shared search loop: breadth-first when `best_first` is false, greedy
/// goal-overlap ordering when true.
fn run(
    actions: &[GroundedAction],
    problem: &Problem,
    max_expansions: Option<usize>,
    best_first: bool,
) -> Result<Option<Plan>> {
    let goal = problem.goal();
    let mut ctx = SearchContext::new(problem.initial_state(), max_expansions);

    while let Some(idx) = ctx.next_node() {
        if ctx.nodes[idx].state.matches_goal(goal) {
            let plan = ctx.reconstruct(idx);
            log::info!(
                "Found a {}-step plan after expanding {} states",
                plan.len(),
                ctx.expanded
            );
            return Ok(Some(plan));
        }

        ctx.count_expansion()?;
        ctx.mark_visited(idx);

        let state = ctx.nodes[idx].state.clone();
        let mut batch: Vec<(usize, WorldState, &GroundedAction)> = actions
            .iter()
            .filter(|a| a.is_applicable(&state, problem))
            .map(|a| {
                let successor = a.apply(&state);
                let score = successor.goal_overlap(goal);
                (score, successor, a)
            })
            .collect();

        if best_first {
            // Stable sort: ties keep generation (grounding) order.
            batch.sort_by(|a, b| b.0.cmp(&a.0));
        }

        log::debug!(
            "Expanded state #{} with {} applicable actions",
            ctx.expanded,
            batch.len()
        );

        for (_, successor, action) in batch {
            if ctx.is_visited(&successor) {
                continue;
            }
            ctx.push_successor(successor, idx, action.clone());
        }
    }

    log::info!("Frontier exhausted after {} expansions: no solution", ctx.expanded);
    Ok(None)
}

/// FIFO breadth-first exploration.
///
/// Guarantees the shortest action-count plan when one exists, and reports
/// "no solution" (`Ok(None)`) once the full reachable space is explored.
///
/// # Examples
///
/// ```
/// use stripsrs::BreadthFirstSearch;
///
/// let unbounded = BreadthFirstSearch::new();
/// let bounded = BreadthFirstSearch::with_max_expansions(10_000);
/// # let _ = (unbounded, bounded);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BreadthFirstSearch {
    max_expansions: Option<usize>,
}

impl BreadthFirstSearch {
    /// Creates an unbounded breadth-first search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a breadth-first search that fails with
    /// [`PlannerError::SearchExhausted`] after `max` expansions.
    pub fn with_max_expansions(max: usize) -> Self {
        Self {
            max_expansions: Some(max),
        }
    }
}

impl SearchStrategy for BreadthFirstSearch {
    fn search(&self, actions: &[GroundedAction], problem: &Problem) -> Result<Option<Plan>> {
        run(actions, problem, self.max_expansions, false)
    }
}

/// Greedy best-first exploration guided by goal-fact overlap.
///
/// Each successor batch is scored by how many goal facts the successor
/// already contains (agent tags ignored) and sorted descending before being
/// appended to the frontier. The overlap counter is cheap guidance, not an
/// admissible heuristic, so plans are not guaranteed minimal.
#[derive(Debug, Clone, Default)]
pub struct BestFirstSearch {
    max_expansions: Option<usize>,
}

impl BestFirstSearch {
    /// Creates an unbounded best-first search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a best-first search that fails with
    /// [`PlannerError::SearchExhausted`] after `max` expansions.
    pub fn with_max_expansions(max: usize) -> Self {
        Self {
            max_expansions: Some(max),
        }
    }
}

impl SearchStrategy for BestFirstSearch {
    fn search(&self, actions: &[GroundedAction], problem: &Problem) -> Result<Option<Plan>> {
        run(actions, problem, self.max_expansions, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Agent, Object};

    fn action(name: &str, pre: &str, eff: &str) -> GroundedAction {
        GroundedAction::new(
            name,
            None,
            ["a"],
            [Fact::new(pre, ["a"])],
            [Fact::new(eff, ["a"])],
        )
    }

    fn chain_problem(goal_pred: &str) -> Problem {
        let mut problem = Problem::new("chain");
        problem.add_object(Object::typed("a", "block"));
        problem.add_init(Fact::new("p", ["a"]));
        problem.add_goal(Fact::new(goal_pred, ["a"]));
        problem
    }

    #[test]
    fn test_bfs_single_step() {
        let actions = vec![action("step", "p", "q")];
        let plan = BreadthFirstSearch::new()
            .search(&actions, &chain_problem("q"))
            .unwrap()
            .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps()[0].signature(), "step(a)");
        assert!(plan.final_state().matches_goal(&[Fact::new("q", ["a"])]));
    }

    #[test]
    fn test_bfs_finds_shortest_plan() {
        // p -> q -> r in two steps, plus a one-step shortcut p -> r.
        let actions = vec![
            action("slow1", "p", "q"),
            action("slow2", "q", "r"),
            action("shortcut", "p", "r"),
        ];
        let plan = BreadthFirstSearch::new()
            .search(&actions, &chain_problem("r"))
            .unwrap()
            .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps()[0].action, "shortcut");
    }

    #[test]
    fn test_bfs_multi_step_plan_in_order() {
        let actions = vec![action("first", "p", "q"), action("second", "q", "r")];
        let plan = BreadthFirstSearch::new()
            .search(&actions, &chain_problem("r"))
            .unwrap()
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.steps()[0].action, "first");
        assert_eq!(plan.steps()[1].action, "second");
    }

    #[test]
    fn test_no_solution_is_a_value() {
        let actions = vec![action("step", "p", "q")];
        let outcome = BreadthFirstSearch::new()
            .search(&actions, &chain_problem("unreachable"))
            .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn test_goal_already_satisfied_yields_empty_plan() {
        let actions = vec![action("step", "p", "q")];
        let plan = BreadthFirstSearch::new()
            .search(&actions, &chain_problem("p"))
            .unwrap()
            .unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.final_state(), &chain_problem("p").initial_state());
    }

    #[test]
    fn test_expansion_bound_hits() {
        let actions = vec![action("step", "p", "q")];
        let err = BreadthFirstSearch::with_max_expansions(0)
            .search(&actions, &chain_problem("q"))
            .unwrap_err();
        assert!(matches!(err, PlannerError::SearchExhausted { expanded: 0 }));
    }

    #[test]
    fn test_best_first_reaches_same_goal() {
        let actions = vec![action("first", "p", "q"), action("second", "q", "r")];
        let plan = BestFirstSearch::new()
            .search(&actions, &chain_problem("r"))
            .unwrap()
            .unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_best_first_visits_higher_overlap_first() {
        // Two goal facts; "both" establishes two of them, "one" only one.
        // Greedy ordering must put "both"'s successor ahead in the frontier.
        let both = GroundedAction::new(
            "both",
            None,
            ["a"],
            [Fact::new("p", ["a"])],
            [Fact::new("q", ["a"]), Fact::new("r", ["a"])],
        );
        let one = GroundedAction::new(
            "one",
            None,
            ["a"],
            [Fact::new("p", ["a"])],
            [Fact::new("q", ["a"])],
        );
        let mut problem = Problem::new("overlap");
        problem.add_object(Object::typed("a", "block"));
        problem.add_init(Fact::new("p", ["a"]));
        problem.add_goal(Fact::new("q", ["a"]));
        problem.add_goal(Fact::new("r", ["a"]));

        // "one" is generated first; the sort must still prefer "both".
        let actions = vec![one, both];
        let plan = BestFirstSearch::with_max_expansions(2)
            .search(&actions, &problem)
            .unwrap()
            .unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps()[0].action, "both");
    }

    #[test]
    fn test_capacity_gated_action_never_in_successors() {
        let mut problem = Problem::new("heavy");
        problem.add_object(Object::weighted("d", 60.0));
        problem.add_init(Fact::new("on-table", ["d"]));
        problem.add_goal(Fact::new("in-hand", ["d"]));

        let weak = GroundedAction::new(
            "pickup",
            Some(Agent::new("a1", 50.0)),
            ["d"],
            [Fact::new("on-table", ["d"])],
            [Fact::new("in-hand", ["d"])],
        );
        let outcome = BreadthFirstSearch::new().search(&[weak], &problem).unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn test_plan_reports_acting_agent_per_step() {
        let mut problem = Problem::new("tagged");
        problem.add_object(Object::weighted("d", 10.0));
        problem.add_init(Fact::new("on-table", ["d"]));
        problem.add_goal(Fact::new("in-hand", ["d"]));

        let pickup = GroundedAction::new(
            "pickup",
            Some(Agent::new("a1", 50.0)),
            ["d"],
            [Fact::new("on-table", ["d"])],
            [Fact::new("in-hand", ["d"])],
        );
        let plan = BreadthFirstSearch::new()
            .search(&[pickup], &problem)
            .unwrap()
            .unwrap();
        assert_eq!(plan.steps()[0].agent.as_deref(), Some("a1"));
        assert!(plan.steps()[0]
            .state
            .contains(&Fact::new("in-hand", ["d"]).tagged("a1")));
    }

    #[test]
    fn test_visited_dedup_ignores_tags() {
        // Two agents can reach the same projected state; it must only be
        // expanded once, so the search still terminates.
        let mut problem = Problem::new("two-agents");
        problem.add_object(Object::weighted("d", 10.0));
        problem.add_init(Fact::new("on-table", ["d"]));
        problem.add_goal(Fact::new("unreachable", ["d"]));

        let actions: Vec<GroundedAction> = ["a1", "a2"]
            .iter()
            .map(|name| {
                GroundedAction::new(
                    "flip",
                    Some(Agent::new(*name, 50.0)),
                    ["d"],
                    [Fact::new("on-table", ["d"])],
                    [Fact::new("in-hand", ["d"])],
                )
            })
            .collect();
        let outcome = BreadthFirstSearch::with_max_expansions(100)
            .search(&actions, &problem);
        // Terminates by frontier exhaustion, not by the bound.
        assert!(matches!(outcome, Ok(None)));
    }
}
