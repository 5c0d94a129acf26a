use crate::interpreter::{evaluate, PermissionSet};
use crate::predicate::{self, Predicate};
use crate::Result;
use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use tracing::debug;

/// Compiled sources kept by [`Guard::new`]
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// What a guarded element is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Expression source, compiled on first use
    Source(String),
    /// An already-lowered predicate
    Predicate(Predicate),
}

impl Binding {
    /// Build a binding from the embeddable serialized form
    pub fn from_serialized(text: &str) -> Result<Self> {
        Ok(Binding::Predicate(predicate::deserialize(text)?))
    }
}

impl From<Predicate> for Binding {
    fn from(predicate: Predicate) -> Self {
        Binding::Predicate(predicate)
    }
}

impl From<&str> for Binding {
    fn from(source: &str) -> Self {
        Binding::Source(source.to_string())
    }
}

/// Guard decision result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub kind: DecisionKind,
    pub reason: Option<String>,
}

impl Decision {
    pub fn from_bool(allowed: bool) -> Self {
        Self {
            kind: if allowed { DecisionKind::Allow } else { DecisionKind::Deny },
            reason: None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.kind == DecisionKind::Allow
    }
}

/// Decision kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    Allow,
    Deny,
}

/// Runtime permission guard
///
/// Source bindings are compiled on first use and kept in a bounded LRU cache
/// keyed by their text.
pub struct Guard {
    compiled: Mutex<LruCache<String, Predicate>>,
}

impl Guard {
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self::with_capacity(capacity)
    }

    /// Create a guard that keeps at most `capacity` compiled sources
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self { compiled: Mutex::new(LruCache::new(capacity)) }
    }

    /// Decide whether `permissions` satisfy the binding
    pub fn decide<P: PermissionSet + ?Sized>(
        &self,
        binding: &Binding,
        permissions: &P,
    ) -> Result<Decision> {
        let allowed = match binding {
            Binding::Predicate(predicate) => evaluate(predicate, permissions),
            Binding::Source(source) => {
                let predicate = self.resolve(source)?;
                evaluate(&predicate, permissions)
            }
        };

        let mut decision = Decision::from_bool(allowed);
        if !allowed {
            decision.reason = Some(match binding {
                Binding::Source(source) => format!("`{}` is not satisfied", source),
                Binding::Predicate(predicate) => format!("`{}` is not satisfied", predicate),
            });
        }
        debug!(kind = ?decision.kind, "guard decision");
        Ok(decision)
    }

    pub fn is_permitted<P: PermissionSet + ?Sized>(
        &self,
        binding: &Binding,
        permissions: &P,
    ) -> Result<bool> {
        Ok(self.decide(binding, permissions)?.is_allowed())
    }

    /// Number of compiled sources currently cached
    pub fn cached(&self) -> usize {
        self.compiled.lock().len()
    }

    fn resolve(&self, source: &str) -> Result<Predicate> {
        if let Some(predicate) = self.compiled.lock().get(source) {
            return Ok(predicate.clone());
        }

        let predicate = crate::compile(source)?;
        self.compiled.lock().put(source.to_string(), predicate.clone());
        Ok(predicate)
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compiled = self.compiled.lock();
        f.debug_struct("Guard")
            .field("cached", &compiled.len())
            .field("capacity", &compiled.cap())
            .finish()
    }
}
