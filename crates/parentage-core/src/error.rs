//! Core error types.

use thiserror::Error;

use crate::identity::IdentityField;

/// Errors raised while constructing core values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A parent identity component was empty.
    #[error("parent identity {field} must not be empty")]
    EmptyComponent {
        /// The offending component.
        field: IdentityField,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_component_display_names_field() {
        let err = CoreError::EmptyComponent {
            field: IdentityField::Version,
        };
        assert_eq!(err.to_string(), "parent identity version must not be empty");
    }
}
