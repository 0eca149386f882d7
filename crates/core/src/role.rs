#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Free-text role label ("Repositor", "Gerente de Loja").
///
/// Equality and hashing go through [`RoleLabel::key`], so two labels that differ
/// only in case or surrounding whitespace name the same role. The label as
/// entered is kept for display.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleLabel {
    label: String,
    key: String,
}

impl RoleLabel {
    pub fn try_new(value: impl Into<String>) -> Result<Self, RoleLabelError> {
        let value = value.into();
        let label = value.trim();
        if label.is_empty() {
            return Err(RoleLabelError::Empty);
        }
        if label.chars().count() > 200 {
            return Err(RoleLabelError::TooLong);
        }
        if label.chars().any(|c| c.is_control()) {
            return Err(RoleLabelError::ContainsControl);
        }
        Ok(Self {
            key: role_key(label),
            label: label.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    /// Normalized form used for storage lookups.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matches(&self, other: &str) -> bool {
        role_key(other) == self.key
    }
}

pub fn role_key(value: &str) -> String {
    value.trim().to_lowercase()
}

impl PartialEq for RoleLabel {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RoleLabel {}

impl std::hash::Hash for RoleLabel {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl TryFrom<String> for RoleLabel {
    type Error = RoleLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RoleLabel> for String {
    fn from(value: RoleLabel) -> Self {
        value.label
    }
}

impl std::fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleLabelError {
    Empty,
    TooLong,
    ContainsControl,
}

impl RoleLabelError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "role must not be empty",
            Self::TooLong => "role is too long",
            Self::ContainsControl => "role contains control characters",
        }
    }
}

impl std::fmt::Display for RoleLabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
