//! Matching rules for each accessor kind.

use crate::model::MethodDescriptor;

use super::{AccessorKind, PropertyBinding};

/// Return types accepted for `is<Name>` getters.
const BOOLEAN_TYPES: [&str; 3] = ["boolean", "Boolean", "java.lang.Boolean"];

/// Matcher and property extractor for one accessor kind.
#[derive(Debug, Clone, Copy)]
pub struct AccessorRule {
    /// Kind this rule recognises.
    pub kind: AccessorKind,
    extract: fn(&MethodDescriptor) -> Option<PropertyBinding>,
}

impl AccessorRule {
    /// Returns true when the method's signature matches this rule.
    #[must_use]
    pub fn matches(&self, method: &MethodDescriptor) -> bool {
        self.bind(method).is_some()
    }

    /// Returns the property the method accesses when it matches this rule.
    #[must_use]
    pub fn bind(&self, method: &MethodDescriptor) -> Option<PropertyBinding> {
        (self.extract)(method)
    }
}

/// All accessor rules, getters first.
pub static RULES: [AccessorRule; 2] = [
    AccessorRule {
        kind: AccessorKind::Getter,
        extract: getter_binding,
    },
    AccessorRule {
        kind: AccessorKind::Setter,
        extract: setter_binding,
    },
];

/// Looks up the rule for `kind`. `Other` has no rule.
#[must_use]
pub fn rule_for(kind: AccessorKind) -> Option<&'static AccessorRule> {
    RULES.iter().find(|rule| rule.kind == kind)
}

fn getter_binding(method: &MethodDescriptor) -> Option<PropertyBinding> {
    if !method.parameters.is_empty() || method.is_void() {
        return None;
    }
    let return_type = method.return_type.as_deref()?.trim();

    let name = property_suffix(&method.name, "get").or_else(|| {
        BOOLEAN_TYPES
            .contains(&return_type)
            .then(|| property_suffix(&method.name, "is"))
            .flatten()
    })?;

    Some(PropertyBinding {
        name,
        type_name: return_type.to_owned(),
    })
}

fn setter_binding(method: &MethodDescriptor) -> Option<PropertyBinding> {
    let [parameter] = method.parameters.as_slice() else {
        return None;
    };
    if !method.is_void() {
        return None;
    }
    let name = property_suffix(&method.name, "set")?;

    Some(PropertyBinding {
        name,
        type_name: parameter.type_name.trim().to_owned(),
    })
}

/// Strips `prefix` and lower-cases the first letter of the remainder.
///
/// The remainder must be non-empty and start with an uppercase letter, so
/// `getaway` and `get` are not accessors. Like bean decapitalisation, a
/// remainder opening with two uppercase letters is kept as is (`getURL`
/// names `URL`).
fn property_suffix(method_name: &str, prefix: &str) -> Option<String> {
    let rest = method_name.strip_prefix(prefix)?;
    let mut chars = rest.chars();
    let first = chars.next().filter(|first| first.is_uppercase())?;
    if chars.clone().next().is_some_and(char::is_uppercase) {
        return Some(rest.to_owned());
    }

    let mut name: String = first.to_lowercase().collect();
    name.push_str(chars.as_str());
    Some(name)
}
