//! # Ground facts
//!
//! A [`Fact`] is an atomic ground proposition: a predicate name applied to an
//! ordered list of arguments, optionally tagged with the agent whose action
//! produced it. Facts are immutable value types; two facts with the same
//! predicate, arguments and tag are interchangeable everywhere in the planner,
//! which is what makes visited-state deduplication work.
//!
//! ## The agent tag
//!
//! In multi-agent domains every fact stored in a world state carries the name
//! of the agent that last acted. The tag is bookkeeping, not truth content:
//! goal tests, visited-state checks and precondition matching all compare
//! facts with the tag projected away (see [`Fact::untagged`]). `None` is the
//! distinguished sentinel used for untagged facts and for the synthetic
//! initial state, so single-agent domains never pay for the tag at all.
//!
//! ## Basic usage
//!
//! ```
//! use stripsrs::Fact;
//!
//! let fact = Fact::new("on-table", ["a"]);
//! assert_eq!(fact.predicate(), "on-table");
//! assert_eq!(fact.args(), ["a"]);
//! assert!(fact.agent().is_none());
//!
//! // Tag the fact with an acting agent, then project the tag away again
//! let tagged = fact.clone().tagged("A1");
//! assert_eq!(tagged.agent(), Some("a1")); // identifiers are case-normalized
//! assert_eq!(tagged.untagged(), fact);
//! ```

use std::fmt;

/// An atomic ground proposition: predicate name, ordered arguments and an
/// optional agent tag.
///
/// Equality, ordering and hashing are structural over all three components,
/// so facts can live in `BTreeSet`s and `HashSet`s and equal facts are
/// always interchangeable.
///
/// # Examples
///
/// ```
/// use stripsrs::Fact;
///
/// let a = Fact::new("on", ["a", "b"]);
/// let b = Fact::new("ON", ["A", "B"]);
///
/// // Identifiers are lowercased on construction, so these are equal
/// assert_eq!(a, b);
/// assert_eq!(format!("{}", a), "on(a, b)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fact {
    /// The predicate name
    predicate: String,
    /// The ordered argument list (object names or literals)
    args: Vec<String>,
    /// The agent whose action produced this fact, if any
    agent: Option<String>,
}

impl Fact {
    /// Creates a new untagged fact.
    ///
    /// The predicate name and every argument are lowercased, matching the
    /// case-normalization applied to objects and agents at load time.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::Fact;
    ///
    /// let fact = Fact::new("in-hand", ["A"]);
    /// assert_eq!(fact.predicate(), "in-hand");
    /// assert_eq!(fact.args(), ["a"]);
    /// ```
    pub fn new<I, S>(predicate: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            predicate: predicate.into().to_lowercase(),
            args: args.into_iter().map(|a| a.into().to_lowercase()).collect(),
            agent: None,
        }
    }

    /// Returns this fact tagged with the given acting agent.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::Fact;
    ///
    /// let fact = Fact::new("on-table", ["d"]).tagged("a1");
    /// assert_eq!(fact.agent(), Some("a1"));
    /// ```
    pub fn tagged(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into().to_lowercase());
        self
    }

    /// Returns a copy of this fact with the agent tag cleared.
    ///
    /// This is the projection used whenever two fact sets are compared:
    /// goal tests, visited-state membership and precondition matching all
    /// operate on untagged facts.
    pub fn untagged(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            args: self.args.clone(),
            agent: None,
        }
    }

    /// Gets the predicate name.
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Gets the ordered argument list.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Gets the agent tag, if present.
    pub fn agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.predicate, self.args.join(", "))?;
        if let Some(agent) = &self.agent {
            write!(f, "@{}", agent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_normalizes_case() {
        let fact = Fact::new("On-Table", ["A", "B"]);
        assert_eq!(fact.predicate(), "on-table");
        assert_eq!(fact.args(), ["a", "b"]);
        assert_eq!(fact.agent(), None);
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Fact::new("on", ["a", "b"]);
        let b = Fact::new("on", ["a", "b"]);
        let c = Fact::new("on", ["b", "a"]);
        assert_eq!(a, b);
        assert_ne!(a, c); // argument order is meaningful
    }

    #[test]
    fn test_tag_distinguishes_facts() {
        let plain = Fact::new("on-table", ["a"]);
        let tagged = plain.clone().tagged("a1");
        assert_ne!(plain, tagged);
        assert_eq!(tagged.untagged(), plain);
    }

    #[test]
    fn test_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(Fact::new("on-table", ["a"]).tagged("a1"));
        assert!(set.contains(&Fact::new("on-table", ["a"]).tagged("A1")));
        assert!(!set.contains(&Fact::new("on-table", ["a"])));
    }

    #[test]
    fn test_display() {
        let fact = Fact::new("on", ["a", "b"]);
        assert_eq!(format!("{}", fact), "on(a, b)");
        assert_eq!(format!("{}", fact.tagged("a1")), "on(a, b)@a1");
    }

    #[test]
    fn test_untagged_is_sentinel_for_root() {
        // The synthetic initial node carries no agent; None is the sentinel.
        let fact = Fact::new("on-table", ["a"]);
        assert!(fact.agent().is_none());
        assert_eq!(fact.untagged(), fact);
    }
}
