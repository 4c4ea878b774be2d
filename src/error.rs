use thiserror::Error;

/// Custom error types for the STRIPS planning system.
///
/// Domain and problem validation failures are surfaced eagerly, before any
/// grounding or search work starts. Search-time non-reachability is *not* an
/// error (it is reported as an absent plan); only hitting the configured
/// expansion bound is.
///
/// # Examples
///
/// ```
/// use stripsrs::PlannerError;
/// use std::error::Error;
///
/// let error = PlannerError::InvalidDomain(
///     "action 'pickup' references undeclared predicate 'holding'".to_string(),
/// );
/// assert_eq!(
///     format!("{}", error),
///     "Invalid domain: action 'pickup' references undeclared predicate 'holding'"
/// );
///
/// // Errors can be converted to std::error::Error trait objects
/// let boxed: Box<dyn Error> = Box::new(error);
/// ```
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A malformed domain description: an action schema referencing an
    /// undeclared predicate, an empty precondition/effect template set,
    /// or a duplicate schema name
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// A malformed problem description: an initial or goal fact referencing
    /// an object outside the declared universe or an undeclared predicate
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// The search hit its configured expansion bound before reaching the goal
    #[error("Search exhausted after expanding {expanded} states")]
    SearchExhausted {
        /// Number of states expanded before the bound was hit
        expanded: usize,
    },

    /// A wrapper around standard IO errors, for callers that read domain or
    /// problem definitions from disk before handing them to the loader
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A wrapper around serde_json errors raised while parsing a domain or
    /// problem definition
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for planning operations.
///
/// # Examples
///
/// ```
/// use stripsrs::{PlannerError, Result};
///
/// fn check(universe_has_object: bool) -> Result<()> {
///     if universe_has_object {
///         Ok(())
///     } else {
///         Err(PlannerError::InvalidProblem(
///             "goal references object 'b'".to_string(),
///         ))
///     }
/// }
///
/// assert!(check(true).is_ok());
/// assert!(check(false).is_err());
/// ```
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_domain_display() {
        let err = PlannerError::InvalidDomain("missing effect map".to_string());
        assert_eq!(format!("{}", err), "Invalid domain: missing effect map");
    }

    #[test]
    fn test_invalid_problem_display() {
        let err = PlannerError::InvalidProblem("unknown object 'b'".to_string());
        assert_eq!(format!("{}", err), "Invalid problem: unknown object 'b'");
    }

    #[test]
    fn test_search_exhausted_display() {
        let err = PlannerError::SearchExhausted { expanded: 128 };
        assert_eq!(
            format!("{}", err),
            "Search exhausted after expanding 128 states"
        );
    }

    #[test]
    fn test_error_trait() {
        let err = PlannerError::SearchExhausted { expanded: 0 };
        let _ = err.source(); // Should be None
    }
}
