//! Error types for building and addressing a diagram

use thiserror::Error;

/// Errors that can occur while building a diagram or looking up its parts
#[derive(Debug, Error, PartialEq)]
pub enum DiagramError {
    /// The oracle has no placement for a sort
    #[error("layout oracle has no placement for sort '{sort}'")]
    MissingOracleNode { sort: String },

    /// Two sorts share a name; containers are told apart by name
    #[error("duplicate sort '{sort}'")]
    DuplicateSort { sort: String },

    /// Reference to a container name that does not exist
    #[error("unknown sort '{name}'{}", format_suggestions(suggestions))]
    UnknownContainer {
        name: String,
        suggestions: Vec<String>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

impl DiagramError {
    /// Create a missing oracle node error
    pub fn missing_node(sort: impl Into<String>) -> Self {
        Self::MissingOracleNode { sort: sort.into() }
    }

    /// Create a duplicate sort error
    pub fn duplicate(sort: impl Into<String>) -> Self {
        Self::DuplicateSort { sort: sort.into() }
    }

    /// Create an unknown container error with suggestions
    pub fn unknown(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UnknownContainer {
            name: name.into(),
            suggestions,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownContainer { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_node_display() {
        let err = DiagramError::missing_node("kinase");
        assert_eq!(
            err.to_string(),
            "layout oracle has no placement for sort 'kinase'"
        );
    }

    #[test]
    fn test_unknown_container_display() {
        let err = DiagramError::unknown("kinas", vec!["kinase".to_string()]);
        assert_eq!(err.to_string(), "unknown sort 'kinas' (did you mean kinase?)");

        let err = DiagramError::unknown("zzz", vec![]);
        assert_eq!(err.to_string(), "unknown sort 'zzz'");
        assert_eq!(err.suggestions(), Some(&[][..]));
    }
}
