//! Role policy model and pure evaluation.
//!
//! A `Policy` is a requirement attached to a routing subtree: a kind
//! (ALL / ANY / NONE) plus a non-empty set of role names. Evaluation against
//! a resolved role set is a pure function producing a `Decision`; delivering
//! the deny response is the gateway's job, not this module's.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Result, RouteGateError};

/// Role names held by or required of a principal.
///
/// `BTreeSet` keeps iteration order stable so deny reasons are deterministic
/// for the same `(policy, roles)` input.
pub type RoleSet = BTreeSet<String>;

/// How the required roles relate to the principal's resolved roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Every required role must be held.
    All,
    /// At least one required role must be held.
    Any,
    /// No required role may be held.
    None,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::All => "all",
            PolicyKind::Any => "any",
            PolicyKind::None => "none",
        }
    }
}

/// Outcome of evaluating one policy for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub allow: bool,
    /// Empty on allow; on deny, names the roles that caused the denial.
    pub reason: String,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allow: true,
            reason: String::new(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allow: false,
            reason: reason.into(),
        }
    }
}

/// An authorization requirement guarding a routing subtree.
///
/// Immutable once constructed; the role set is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    kind: PolicyKind,
    roles: RoleSet,
}

impl Policy {
    /// Build a policy. An empty role set is a configuration error and fails
    /// here, before anything is attached to a routing tree.
    pub fn new<I, S>(kind: PolicyKind, roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: RoleSet = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(RouteGateError::Configuration(
                "at least one role name must be provided".into(),
            ));
        }
        Ok(Self { kind, roles })
    }

    pub fn all<I, S>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PolicyKind::All, roles)
    }

    pub fn any<I, S>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PolicyKind::Any, roles)
    }

    pub fn none<I, S>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PolicyKind::None, roles)
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Evaluate this policy against the principal's resolved roles.
    ///
    /// Deterministic: no clock, no randomness, no hidden state.
    pub fn evaluate(&self, held: &RoleSet) -> Decision {
        match self.kind {
            PolicyKind::All => {
                let missing: Vec<&str> = self.roles.difference(held).map(String::as_str).collect();
                if missing.is_empty() {
                    Decision::allow()
                } else {
                    Decision::deny(format!("lacks required role(s) {}", missing.join(" and ")))
                }
            }
            PolicyKind::Any => {
                if self.roles.intersection(held).next().is_some() {
                    Decision::allow()
                } else {
                    let wanted: Vec<&str> = self.roles.iter().map(String::as_str).collect();
                    Decision::deny(format!(
                        "has none of the sufficient role(s) {}",
                        wanted.join(" or ")
                    ))
                }
            }
            PolicyKind::None => {
                let offending: Vec<&str> =
                    self.roles.intersection(held).map(String::as_str).collect();
                if offending.is_empty() {
                    Decision::allow()
                } else {
                    Decision::deny(format!(
                        "has forbidden role(s) {}",
                        offending.join(" and ")
                    ))
                }
            }
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<&str> = self.roles.iter().map(String::as_str).collect();
        write!(f, "(authorize {}: {})", self.kind.as_str(), roles.join(","))
    }
}

/// Collect role names into a `RoleSet`.
pub fn role_set<I, S>(roles: I) -> RoleSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    roles.into_iter().map(Into::into).collect()
}
