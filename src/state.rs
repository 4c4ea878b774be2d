//! # World states
//!
//! This module provides the [`WorldState`] structure: an unordered set of
//! ground [`Fact`]s describing everything currently true. World states are
//! the nodes of the search space, and their identity is their fact set —
//! two states containing the same facts are the same search node.
//!
//! ## Tagged storage, untagged comparison
//!
//! In multi-agent domains, facts are *stored* with the tag of the agent that
//! produced them but *compared* with the tag stripped. Every membership,
//! goal and visited-state check in the planner therefore goes through
//! [`WorldState::projection`], and successor states re-attach the acting
//! agent's tag after the set algebra is done. Keeping this convention exact
//! is what makes goal and visited tests match across agents.
//!
//! ## Basic usage
//!
//! ```
//! use stripsrs::{Fact, WorldState};
//!
//! let mut state = WorldState::new();
//! state.insert(Fact::new("on-table", ["a"]));
//! state.insert(Fact::new("clear", ["a"]));
//!
//! assert_eq!(state.len(), 2);
//! assert!(state.contains(&Fact::new("on-table", ["a"])));
//!
//! // Goal test: projected set equality against a goal fact set
//! let goal = [Fact::new("on-table", ["a"]), Fact::new("clear", ["a"])];
//! assert!(state.matches_goal(&goal));
//! ```

use crate::Fact;
use std::collections::BTreeSet;
use std::fmt;

/// An unordered set of ground facts; the identity of a search node.
///
/// Equality and hashing are by set content, which is what allows the search
/// engine to deduplicate visited states structurally.
///
/// # Examples
///
/// ```
/// use stripsrs::{Fact, WorldState};
///
/// let a = WorldState::from_facts([Fact::new("p", ["x"]), Fact::new("q", ["y"])]);
/// let b = WorldState::from_facts([Fact::new("q", ["y"]), Fact::new("p", ["x"])]);
///
/// // Insertion order is irrelevant
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WorldState {
    facts: BTreeSet<Fact>,
}

impl WorldState {
    /// Creates a new empty world state.
    pub fn new() -> Self {
        Self {
            facts: BTreeSet::new(),
        }
    }

    /// Creates a world state from an iterator of facts.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::{Fact, WorldState};
    ///
    /// let state = WorldState::from_facts([Fact::new("on-table", ["a"])]);
    /// assert_eq!(state.len(), 1);
    /// ```
    pub fn from_facts<I>(facts: I) -> Self
    where
        I: IntoIterator<Item = Fact>,
    {
        Self {
            facts: facts.into_iter().collect(),
        }
    }

    /// Inserts a fact, returning `true` if it was not already present.
    pub fn insert(&mut self, fact: Fact) -> bool {
        self.facts.insert(fact)
    }

    /// Checks whether the state contains the fact exactly as given,
    /// including its agent tag.
    pub fn contains(&self, fact: &Fact) -> bool {
        self.facts.contains(fact)
    }

    /// Number of facts in the state.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the state holds no facts.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterates over the facts in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// The agent-tag-stripped projection of this state.
    ///
    /// All comparisons between fact sets in the planner (preconditions,
    /// goal, visited states) operate on this projection; the tags are
    /// bookkeeping for reporting, not part of a state's truth content.
    pub fn projection(&self) -> BTreeSet<Fact> {
        self.facts.iter().map(Fact::untagged).collect()
    }

    /// Returns a copy of this state with every fact re-tagged with the
    /// given acting agent, or untagged when `agent` is `None`.
    pub fn retagged(&self, agent: Option<&str>) -> Self {
        let facts = self
            .facts
            .iter()
            .map(|f| match agent {
                Some(name) => f.untagged().tagged(name),
                None => f.untagged(),
            })
            .collect();
        Self { facts }
    }

    /// Goal test: the projection of this state is set-equal to the goal
    /// fact set (goal facts are compared untagged as well).
    ///
    /// Note this is equality, not subset: the transition rule consumes
    /// preconditions that are not re-asserted, so a goal-satisfying state
    /// contains exactly the goal facts.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::{Fact, WorldState};
    ///
    /// let state = WorldState::from_facts([Fact::new("in-hand", ["a"]).tagged("a1")]);
    /// let goal = [Fact::new("in-hand", ["a"])];
    /// assert!(state.matches_goal(&goal));
    ///
    /// let bigger = WorldState::from_facts([
    ///     Fact::new("in-hand", ["a"]),
    ///     Fact::new("on-table", ["b"]),
    /// ]);
    /// assert!(!bigger.matches_goal(&goal));
    /// ```
    pub fn matches_goal(&self, goal: &[Fact]) -> bool {
        let projected = self.projection();
        let goal: BTreeSet<Fact> = goal.iter().map(Fact::untagged).collect();
        projected == goal
    }

    /// Goal-overlap heuristic score: the count of goal facts already
    /// present in this state, ignoring agent tags.
    ///
    /// This is a simple greedy guidance counter, not an admissible
    /// heuristic.
    pub fn goal_overlap(&self, goal: &[Fact]) -> usize {
        let projected = self.projection();
        goal.iter()
            .filter(|g| projected.contains(&g.untagged()))
            .count()
    }
}

impl FromIterator<Fact> for WorldState {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        Self::from_facts(iter)
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, fact) in self.facts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", fact)?;
        }
        write!(f, "}}")
    }
}
