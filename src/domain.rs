//! # Domain model
//!
//! A [`Domain`] holds everything that is true across all problem instances of
//! a planning task: the declared object types, the predicate signatures, the
//! agents with their carrying capacities, and the parameterized
//! [`ActionSchema`]s the grounder later expands into concrete actions.
//!
//! The domain is immutable for the duration of a planning run and is
//! validated eagerly: a schema referencing an undeclared predicate or
//! carrying an empty precondition/effect template set fails with
//! [`PlannerError::InvalidDomain`](crate::PlannerError::InvalidDomain)
//! before any grounding work starts.
//!
//! ## Basic usage
//!
//! ```
//! use stripsrs::{ActionSchema, Domain, FactTemplate, Predicate};
//!
//! let mut domain = Domain::new("blocks");
//! domain.add_type("block");
//! domain.add_predicate(Predicate::new("on-table", ["block"]));
//! domain.add_predicate(Predicate::new("in-hand", ["block"]));
//!
//! let pickup = ActionSchema::new("pickup")
//!     .with_parameter("b", "block")
//!     .with_precondition(FactTemplate::new("on-table", ["b"]))
//!     .with_effect(FactTemplate::new("in-hand", ["b"]));
//! domain.add_action(pickup);
//!
//! assert!(domain.validate().is_ok());
//! ```

use crate::{PlannerError, Result};
use std::collections::HashSet;

/// A declared predicate signature: name plus ordered parameter types.
///
/// Signatures are declarative; in the default (lenient) grounding mode the
/// parameter types are not enforced when binding objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// The predicate name
    pub name: String,
    /// The declared parameter types, in order
    pub parameters: Vec<String>,
}

impl Predicate {
    /// Creates a new predicate signature.
    pub fn new<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into().to_lowercase(),
            parameters: parameters
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .collect(),
        }
    }
}

/// An agent: a named actor with a carrying capacity.
///
/// An agent may only act on objects strictly lighter than its capacity;
/// the check happens at applicability time, see
/// [`GroundedAction::is_applicable`](crate::GroundedAction::is_applicable).
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// The agent name
    pub name: String,
    /// The carrying capacity
    pub capacity: f32,
}

impl Agent {
    /// Creates a new agent.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::Agent;
    ///
    /// let agent = Agent::new("A1", 50.0);
    /// assert_eq!(agent.name, "a1");
    /// assert_eq!(agent.capacity, 50.0);
    /// ```
    pub fn new(name: impl Into<String>, capacity: f32) -> Self {
        Self {
            name: name.into().to_lowercase(),
            capacity,
        }
    }
}

/// A precondition or effect template inside an action schema: a predicate
/// name applied to parameter-slot names (or literals that pass through
/// grounding unchanged).
#[derive(Debug, Clone, PartialEq)]
pub struct FactTemplate {
    /// The predicate name
    pub predicate: String,
    /// Slot names or literal arguments, in order
    pub args: Vec<String>,
}

impl FactTemplate {
    /// Creates a new template.
    pub fn new<I, S>(predicate: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            predicate: predicate.into().to_lowercase(),
            args: args.into_iter().map(|a| a.into().to_lowercase()).collect(),
        }
    }
}

/// A parameterized action schema.
///
/// The parameter slots are an explicit *ordered* list of
/// `(slot name, declared type)` pairs: the binding order produced by the
/// grounder follows this list, which makes grounding order a documented
/// contract rather than an accident of map iteration.
///
/// # Examples
///
/// ```
/// use stripsrs::{ActionSchema, FactTemplate};
///
/// let stack = ActionSchema::new("stack")
///     .with_parameter("x", "block")
///     .with_parameter("y", "block")
///     .with_precondition(FactTemplate::new("in-hand", ["x"]))
///     .with_precondition(FactTemplate::new("clear", ["y"]))
///     .with_effect(FactTemplate::new("on", ["x", "y"]))
///     .distinct();
///
/// assert_eq!(stack.parameters.len(), 2);
/// assert!(stack.unique);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSchema {
    /// The schema name
    pub name: String,
    /// Ordered `(slot name, declared type)` pairs
    pub parameters: Vec<(String, String)>,
    /// Precondition fact templates
    pub precondition: Vec<FactTemplate>,
    /// Effect fact templates
    pub effect: Vec<FactTemplate>,
    /// Whether bound parameters must be pairwise distinct
    pub unique: bool,
}

impl ActionSchema {
    /// Creates a new schema with no parameters, preconditions or effects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            parameters: Vec::new(),
            precondition: Vec::new(),
            effect: Vec::new(),
            unique: false,
        }
    }

    /// Appends a parameter slot with its declared type.
    pub fn with_parameter(mut self, slot: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters
            .push((slot.into().to_lowercase(), type_name.into().to_lowercase()));
        self
    }

    /// Appends a precondition template.
    pub fn with_precondition(mut self, template: FactTemplate) -> Self {
        self.precondition.push(template);
        self
    }

    /// Appends an effect template.
    pub fn with_effect(mut self, template: FactTemplate) -> Self {
        self.effect.push(template);
        self
    }

    /// Requires bound parameters to be pairwise distinct.
    pub fn distinct(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// The domain model: type list, predicate signatures, agents and action
/// schemas. Immutable for the duration of one planning run.
#[derive(Debug, Clone, Default)]
pub struct Domain {
    /// The domain name
    pub name: String,
    /// Declared object types
    pub types: Vec<String>,
    /// Declared predicate signatures
    pub predicates: Vec<Predicate>,
    /// Agents, in declaration order (empty in single-agent domains)
    pub agents: Vec<Agent>,
    /// Action schemas, in declaration order
    pub actions: Vec<ActionSchema>,
}

impl Domain {
    /// Creates a new empty domain.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            ..Default::default()
        }
    }

    /// Declares an object type.
    pub fn add_type(&mut self, name: impl Into<String>) {
        self.types.push(name.into().to_lowercase());
    }

    /// Declares a predicate signature.
    pub fn add_predicate(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    /// Declares an agent.
    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    /// Declares an action schema.
    pub fn add_action(&mut self, action: ActionSchema) {
        self.actions.push(action);
    }

    /// Looks up an agent by name.
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// Checks whether a predicate name is declared.
    pub fn has_predicate(&self, name: &str) -> bool {
        self.predicates.iter().any(|p| p.name == name)
    }

    /// Validates the domain, failing fast before any grounding work.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidDomain`] if a schema name is
    /// duplicated, a schema has an empty precondition or effect template
    /// set, or a template references an undeclared predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripsrs::{ActionSchema, Domain, FactTemplate};
    ///
    /// let mut domain = Domain::new("broken");
    /// domain.add_action(
    ///     ActionSchema::new("pickup")
    ///         .with_parameter("b", "block")
    ///         .with_precondition(FactTemplate::new("on-table", ["b"]))
    ///         .with_effect(FactTemplate::new("in-hand", ["b"])),
    /// );
    ///
    /// // Neither predicate is declared
    /// assert!(domain.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for action in &self.actions {
            if !seen.insert(action.name.as_str()) {
                return Err(PlannerError::InvalidDomain(format!(
                    "duplicate action schema '{}'",
                    action.name
                )));
            }
            if action.precondition.is_empty() {
                return Err(PlannerError::InvalidDomain(format!(
                    "action '{}' is missing its precondition map",
                    action.name
                )));
            }
            if action.effect.is_empty() {
                return Err(PlannerError::InvalidDomain(format!(
                    "action '{}' is missing its effect map",
                    action.name
                )));
            }
            for template in action.precondition.iter().chain(action.effect.iter()) {
                if !self.has_predicate(&template.predicate) {
                    return Err(PlannerError::InvalidDomain(format!(
                        "action '{}' references undeclared predicate '{}'",
                        action.name, template.predicate
                    )));
                }
            }
        }
        Ok(())
    }
}
