//! Core data types.

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter},
};

use crate::error::{ValidationError, ValidationErrorKind};

/// The database token that asks for the first database with a result.
pub const FIRST_MATCH: &str = "!";

/// The database token that asks for the results of every database.
pub const ALL_DATABASES: &str = "*";

/// A validated database name.
///
/// A name is a single command token, so it can't contain whitespace or
/// control characters, and it can't be one of the reserved dispatch tokens
/// `!` and `*`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatabaseName(String);

impl DatabaseName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate a database name.
    pub fn verify(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::Empty));
        }

        if value == FIRST_MATCH || value == ALL_DATABASES {
            return Err(ValidationError::new(ValidationErrorKind::Reserved {
                value: value.to_string(),
            }));
        }

        if let Some((at, ch)) = value
            .chars()
            .enumerate()
            .find(|(_, ch)| ch.is_whitespace() || ch.is_control())
        {
            return Err(ValidationError::new(ValidationErrorKind::InvalidCharAt {
                ch,
                at,
            }));
        }

        Ok(())
    }
}

impl TryFrom<&str> for DatabaseName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self(value.to_string()))
    }
}

impl TryFrom<String> for DatabaseName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        Ok(Self(value))
    }
}

impl AsRef<str> for DatabaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DatabaseName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for DatabaseName {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_validation() {
        assert!(DatabaseName::try_from("jargon").is_ok());
        assert!(DatabaseName::try_from("web1913").is_ok());

        assert!(DatabaseName::try_from("").is_err());
        assert!(DatabaseName::try_from("!").is_err());
        assert!(DatabaseName::try_from("*").is_err());
        assert!(DatabaseName::try_from("two words").is_err());
        assert!(DatabaseName::try_from("tab\there").is_err());
        assert!(DatabaseName::try_from("new\nline").is_err());
    }

    #[test]
    fn test_database_name_lookup_by_str() {
        use std::collections::BTreeMap;

        let mut map = BTreeMap::new();
        map.insert(DatabaseName::try_from("jargon").unwrap(), 1);

        assert_eq!(map.get("jargon"), Some(&1));
        assert_eq!(map.get("other"), None);
    }
}
