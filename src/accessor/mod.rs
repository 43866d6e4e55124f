//! Bean-style accessor classification.
//!
//! A method is a getter when it takes no parameters, returns a value and is
//! named `get<Name>` (or `is<Name>` with a boolean return type). It is a
//! setter when it takes exactly one parameter, returns `void` and is named
//! `set<Name>`. Everything else, and every method carrying the override
//! marker, is [`AccessorKind::Other`].
//!
//! The rules live in a table with one record per accessor kind; callers pick
//! rules through an explicit [`AccessorKind`] rather than through dispatch on
//! the kind itself.

mod rules;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::MethodDescriptor;

pub use rules::{AccessorRule, RULES, rule_for};

/// Accessor category of a single method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    /// Property getter (`getX()` / `isX()`).
    Getter,
    /// Property setter (`setX(value)`).
    Setter,
    /// Any other method.
    Other,
}

/// Property a getter or setter gives access to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBinding {
    /// Property name, e.g. `bar` for `getBar`.
    pub name: String,
    /// Property type: the getter's return type or the setter's parameter type.
    pub type_name: String,
}

/// Set of accessor kinds a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorCategory {
    /// Getters only.
    Getter,
    /// Setters only.
    Setter,
    /// Getters and setters.
    #[default]
    GetterAndSetter,
}

impl AccessorCategory {
    /// Returns the accessor kinds this category includes.
    #[must_use]
    pub const fn kinds(self) -> &'static [AccessorKind] {
        match self {
            Self::Getter => &[AccessorKind::Getter],
            Self::Setter => &[AccessorKind::Setter],
            Self::GetterAndSetter => &[AccessorKind::Getter, AccessorKind::Setter],
        }
    }

    /// Returns true when `kind` belongs to this category.
    #[must_use]
    pub fn includes(self, kind: AccessorKind) -> bool {
        self.kinds().contains(&kind)
    }
}

/// Error returned when an accessor category name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported accessor category '{0}': valid options are 'getters', 'setters' or 'accessors'")]
pub struct UnknownCategory(pub String);

impl FromStr for AccessorCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "getter" | "getters" => Ok(Self::Getter),
            "setter" | "setters" => Ok(Self::Setter),
            "accessor" | "accessors" | "all" | "getter_and_setter" => Ok(Self::GetterAndSetter),
            _ => Err(UnknownCategory(s.to_owned())),
        }
    }
}

impl fmt::Display for AccessorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Getter => write!(f, "getters"),
            Self::Setter => write!(f, "setters"),
            Self::GetterAndSetter => write!(f, "accessors"),
        }
    }
}

/// Classifies a method. Override-marked methods are always `Other`.
#[must_use]
pub fn classify(method: &MethodDescriptor) -> AccessorKind {
    if method.is_override() {
        return AccessorKind::Other;
    }
    RULES
        .iter()
        .find(|rule| rule.matches(method))
        .map_or(AccessorKind::Other, |rule| rule.kind)
}

/// Returns the property a getter or setter accesses, ignoring the override
/// marker.
///
/// The override marker only excludes a method from filtering; the property
/// itself is still derived from the signature.
#[must_use]
pub fn binding(method: &MethodDescriptor) -> Option<PropertyBinding> {
    RULES.iter().find_map(|rule| rule.bind(method))
}

/// Returns the property name of a getter or setter.
#[must_use]
pub fn property_name(method: &MethodDescriptor) -> Option<String> {
    binding(method).map(|binding| binding.name)
}

/// Returns the property type of a getter or setter.
#[must_use]
pub fn property_type(method: &MethodDescriptor) -> Option<String> {
    binding(method).map(|binding| binding.type_name)
}

/// Returns the methods whose kind is in `kinds`, in declaration order.
#[must_use]
pub fn filter_by_kinds<'a>(
    methods: &'a [MethodDescriptor],
    kinds: &[AccessorKind],
) -> Vec<&'a MethodDescriptor> {
    methods
        .iter()
        .filter(|method| {
            let kind = classify(method);
            kind != AccessorKind::Other && kinds.contains(&kind)
        })
        .collect()
}

/// Returns the methods belonging to `category`, in declaration order.
#[must_use]
pub fn filter_by_category(
    methods: &[MethodDescriptor],
    category: AccessorCategory,
) -> Vec<&MethodDescriptor> {
    filter_by_kinds(methods, category.kinds())
}
