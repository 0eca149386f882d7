#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($name:ident) => {
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(ItemId);
row_id!(EmployeeId);
row_id!(ResponseId);

/// Employee display name. Matched exactly (after trimming) when resolving identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeName(String);

impl EmployeeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn try_new(value: impl Into<String>) -> Result<Self, EmployeeNameError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EmployeeNameError::Empty);
        }
        if trimmed.chars().count() > 200 {
            return Err(EmployeeNameError::TooLong);
        }
        if trimmed.chars().any(|c| c.is_control()) {
            return Err(EmployeeNameError::ContainsControl);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for EmployeeName {
    type Error = EmployeeNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<EmployeeName> for String {
    fn from(value: EmployeeName) -> Self {
        value.0
    }
}

impl std::fmt::Display for EmployeeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmployeeNameError {
    Empty,
    TooLong,
    ContainsControl,
}

impl EmployeeNameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "employee name must not be empty",
            Self::TooLong => "employee name is too long",
            Self::ContainsControl => "employee name contains control characters",
        }
    }
}

impl std::fmt::Display for EmployeeNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
