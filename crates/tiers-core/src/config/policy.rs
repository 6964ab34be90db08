//! Field-level override policies
//!
//! Every field of a scope configuration declares how a child scope's value
//! combines with its parent's. Structs list their fields once with
//! [`inherit_fields!`]; the macro generates the [`Inherit`] impl and the
//! introspectable [`FieldPolicies`] table from that single declaration.

use serde::Serialize;
use std::fmt;

/// How a child field combines with the same field in the parent scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// Child wins when set to a non-empty string
    OverrideIfNonEmpty,
    /// Child wins whenever set, including explicit `false` or `0`
    OverrideIfSet,
    /// Nested struct, merged field by field
    Recurse,
    /// Parent entries followed by child entries not already present
    AppendCollection,
    /// Keyed, environment-scoped merge of variable lists
    MergeByKeyAndEnvironment,
}

impl fmt::Display for OverridePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverridePolicy::OverrideIfNonEmpty => "override-if-non-empty",
            OverridePolicy::OverrideIfSet => "override-if-set",
            OverridePolicy::Recurse => "recurse",
            OverridePolicy::AppendCollection => "append-collection",
            OverridePolicy::MergeByKeyAndEnvironment => "merge-by-key-and-environment",
        };
        f.write_str(name)
    }
}

/// A value that can be folded over the same value from a parent scope.
pub trait Inherit: Sized {
    /// Combine `self` (child) with `parent`, producing a new value.
    fn inherit(&self, parent: &Self) -> Self;

    /// True when no field carries a value.
    fn is_unset(&self) -> bool;
}

/// Declared policy for every field of a struct, in declaration order.
pub trait FieldPolicies {
    const FIELD_POLICIES: &'static [(&'static str, OverridePolicy)];
}

/// Combination rule for one field type.
pub trait Policy<T> {
    fn apply(child: &T, parent: &T) -> T;
    fn is_unset(value: &T) -> bool;
}

/// Rule implementations, one marker per [`OverridePolicy`] variant.
pub mod rules {
    use super::{Inherit, Policy};

    pub struct OverrideIfNonEmpty;
    pub struct OverrideIfSet;
    pub struct Recurse;
    pub struct AppendCollection;
    pub struct MergeByKeyAndEnvironment;

    impl Policy<Option<String>> for OverrideIfNonEmpty {
        fn apply(child: &Option<String>, parent: &Option<String>) -> Option<String> {
            if Self::is_unset(child) {
                parent.clone()
            } else {
                child.clone()
            }
        }

        fn is_unset(value: &Option<String>) -> bool {
            value.as_deref().is_none_or(str::is_empty)
        }
    }

    impl<T: Clone> Policy<Option<T>> for OverrideIfSet {
        fn apply(child: &Option<T>, parent: &Option<T>) -> Option<T> {
            child.clone().or_else(|| parent.clone())
        }

        fn is_unset(value: &Option<T>) -> bool {
            value.is_none()
        }
    }

    impl<T: Inherit + Clone> Policy<T> for Recurse {
        // An unset child takes no part. An unset parent still goes through
        // `inherit` so keyed collections on the child side get merged.
        fn apply(child: &T, parent: &T) -> T {
            if child.is_unset() {
                parent.clone()
            } else {
                child.inherit(parent)
            }
        }

        fn is_unset(value: &T) -> bool {
            value.is_unset()
        }
    }

    impl<T: Clone + PartialEq> Policy<Vec<T>> for AppendCollection {
        fn apply(child: &Vec<T>, parent: &Vec<T>) -> Vec<T> {
            let mut merged = parent.clone();
            for entry in child {
                if !merged.contains(entry) {
                    merged.push(entry.clone());
                }
            }
            merged
        }

        fn is_unset(value: &Vec<T>) -> bool {
            value.is_empty()
        }
    }
}

/// Implement [`Inherit`] and [`FieldPolicies`] from a field → policy list.
///
/// ```ignore
/// inherit_fields!(GitRepository {
///     production_branch => OverrideIfNonEmpty,
///     repo => OverrideIfNonEmpty,
/// });
/// ```
#[macro_export]
macro_rules! inherit_fields {
    ($ty:ty { $($field:ident => $policy:ident),+ $(,)? }) => {
        impl $crate::config::policy::Inherit for $ty {
            fn inherit(&self, parent: &Self) -> Self {
                Self {
                    $($field: <$crate::config::policy::rules::$policy as $crate::config::policy::Policy<_>>::apply(
                        &self.$field,
                        &parent.$field,
                    ),)+
                }
            }

            fn is_unset(&self) -> bool {
                $(<$crate::config::policy::rules::$policy as $crate::config::policy::Policy<_>>::is_unset(&self.$field))&&+
            }
        }

        impl $crate::config::policy::FieldPolicies for $ty {
            const FIELD_POLICIES: &'static [(&'static str, $crate::config::policy::OverridePolicy)] = &[
                $((stringify!($field), $crate::config::policy::OverridePolicy::$policy),)+
            ];
        }
    };
}
