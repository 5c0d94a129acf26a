//! Permission predicates
//!
//! A [`Predicate`] is the lowered, self-contained form of a permission
//! expression. Leaves carry plain permission names only, so a predicate can be
//! stored, embedded in generated markup and evaluated later without any
//! further parsing.

pub mod codec;

pub use codec::{deserialize, from_json, serialize, to_json, CodecError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A lowered permission predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Predicate {
    /// True iff the permission set contains `val`
    Has { val: String },
    /// True iff the permission set contains at least one of `val`
    Some { val: Vec<String> },
    /// True iff the permission set contains all of `val`
    Every { val: Vec<String> },
    And { lhs: Box<Predicate>, rhs: Box<Predicate> },
    Or { lhs: Box<Predicate>, rhs: Box<Predicate> },
    Not { expr: Box<Predicate> },
}

impl Predicate {
    pub fn has(permission: impl Into<String>) -> Self {
        Self::Has { val: permission.into() }
    }

    pub fn some<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Some { val: permissions.into_iter().map(Into::into).collect() }
    }

    pub fn every<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Every { val: permissions.into_iter().map(Into::into).collect() }
    }

    pub fn and(lhs: Predicate, rhs: Predicate) -> Self {
        Self::And { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn or(lhs: Predicate, rhs: Predicate) -> Self {
        Self::Or { lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn not(expr: Predicate) -> Self {
        Self::Not { expr: Box::new(expr) }
    }

    /// Every permission name referenced by this predicate, sorted and deduplicated
    pub fn permissions(&self) -> Vec<&str> {
        let mut names = BTreeSet::new();
        self.collect_permissions(&mut names);
        names.into_iter().collect()
    }

    fn collect_permissions<'p>(&'p self, names: &mut BTreeSet<&'p str>) {
        match self {
            Predicate::Has { val } => {
                names.insert(val.as_str());
            }
            Predicate::Some { val } | Predicate::Every { val } => {
                names.extend(val.iter().map(String::as_str));
            }
            Predicate::And { lhs, rhs } | Predicate::Or { lhs, rhs } => {
                lhs.collect_permissions(names);
                rhs.collect_permissions(names);
            }
            Predicate::Not { expr } => expr.collect_permissions(names),
        }
    }
}

/// Renders the predicate as source text; for identifier names it compiles back
/// to the same predicate
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Has { val } => write!(f, "Has({})", val),
            Predicate::Some { val } => write!(f, "Some({})", val.join(", ")),
            Predicate::Every { val } => write!(f, "Every({})", val.join(", ")),
            Predicate::And { lhs, rhs } => write!(f, "({} And {})", lhs, rhs),
            Predicate::Or { lhs, rhs } => write!(f, "({} Or {})", lhs, rhs),
            Predicate::Not { expr } => write!(f, "Not {}", expr),
        }
    }
}
