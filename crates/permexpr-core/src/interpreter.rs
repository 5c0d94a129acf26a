//! Predicate evaluation against a caller-held permission set

use crate::predicate::Predicate;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// Read-only view of a user's granted permissions
pub trait PermissionSet {
    /// Check whether `permission` is granted
    fn contains_permission(&self, permission: &str) -> bool;
}

impl<S: BuildHasher> PermissionSet for HashSet<String, S> {
    fn contains_permission(&self, permission: &str) -> bool {
        self.contains(permission)
    }
}

impl<S: BuildHasher> PermissionSet for HashSet<&str, S> {
    fn contains_permission(&self, permission: &str) -> bool {
        self.contains(permission)
    }
}

impl PermissionSet for BTreeSet<String> {
    fn contains_permission(&self, permission: &str) -> bool {
        self.contains(permission)
    }
}

impl PermissionSet for BTreeSet<&str> {
    fn contains_permission(&self, permission: &str) -> bool {
        self.contains(permission)
    }
}

impl PermissionSet for [String] {
    fn contains_permission(&self, permission: &str) -> bool {
        self.iter().any(|p| p == permission)
    }
}

impl PermissionSet for [&str] {
    fn contains_permission(&self, permission: &str) -> bool {
        self.iter().any(|p| *p == permission)
    }
}

impl<const N: usize> PermissionSet for [&str; N] {
    fn contains_permission(&self, permission: &str) -> bool {
        self.as_slice().contains_permission(permission)
    }
}

impl PermissionSet for Vec<String> {
    fn contains_permission(&self, permission: &str) -> bool {
        self.as_slice().contains_permission(permission)
    }
}

impl PermissionSet for Vec<&str> {
    fn contains_permission(&self, permission: &str) -> bool {
        self.as_slice().contains_permission(permission)
    }
}

impl<T: PermissionSet + ?Sized> PermissionSet for &T {
    fn contains_permission(&self, permission: &str) -> bool {
        (**self).contains_permission(permission)
    }
}

/// Evaluate a predicate against a permission set
///
/// `AND` and `OR` short-circuit. `EVERY` over an empty list is vacuously true
/// and `SOME` over an empty list is false.
pub fn evaluate<P: PermissionSet + ?Sized>(predicate: &Predicate, permissions: &P) -> bool {
    match predicate {
        Predicate::Has { val } => permissions.contains_permission(val),
        Predicate::Some { val } => val.iter().any(|p| permissions.contains_permission(p)),
        Predicate::Every { val } => val.iter().all(|p| permissions.contains_permission(p)),
        Predicate::And { lhs, rhs } => evaluate(lhs, permissions) && evaluate(rhs, permissions),
        Predicate::Or { lhs, rhs } => evaluate(lhs, permissions) || evaluate(rhs, permissions),
        Predicate::Not { expr } => !evaluate(expr, permissions),
    }
}
