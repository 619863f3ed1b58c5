//! Diagnostics gathered while binding one command line.

use serde::{Deserialize, Serialize};

/// Classification of everything noteworthy seen during a binding call.
///
/// - `unexpected`: values that could not be converted to the field's type
/// - `missing`: value-taking arguments given without a value
/// - `ignored`: tokens that matched no field (warnings only)
/// - `mandatory`: mandatory fields absent from the command line
/// - `duplicated`: arguments given more than once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Results {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unexpected: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicated: Vec<String>,
}

impl Results {
    /// Any unexpected, missing, mandatory or duplicated entry.
    pub fn has_errors(&self) -> bool {
        !self.unexpected.is_empty()
            || !self.missing.is_empty()
            || !self.mandatory.is_empty()
            || !self.duplicated.is_empty()
    }

    /// Any ignored token.
    pub fn has_warnings(&self) -> bool {
        !self.ignored.is_empty()
    }
}
