//! Values passed into and out of the injection and check passes.

use crate::literal::DefaultValue;
use indexmap::IndexMap;
use std::fmt;

/// Property name → runtime default, in author order.
pub type Defaults = IndexMap<String, DefaultValue>;

/// One property whose documentation doesn't match its default.
///
/// Used both for properties missing from the interface (injection) and
/// for wrong or absent literals (check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub interface: String,
    pub property: String,
    pub expected: String,
    /// Literal currently documented; `None` when there is none.
    pub found: Option<String>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: expected {}, found {}",
            self.interface,
            self.property,
            self.expected,
            self.found.as_deref().unwrap_or("nothing")
        )
    }
}

/// Result of an injection pass over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectReport {
    pub text: String,
    /// Members whose comment was created or rewritten.
    pub updated: usize,
    /// Requested properties with no member in the interface.
    pub missing: Vec<Outcome>,
    /// False when the interface itself wasn't found.
    pub interface_found: bool,
}

/// Result of a read-only check over one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub mismatches: Vec<Outcome>,
}

impl CheckReport {
    pub fn ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}
