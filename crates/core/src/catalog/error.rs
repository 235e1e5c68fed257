//! Catalog error types.

use thiserror::Error;

/// Errors raised while loading or validating a requirement catalog.
///
/// Lookups never fail; these only surface when a catalog is authored or
/// loaded from a file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be parsed.
    #[error("Catalog could not be parsed: {0}")]
    Parse(String),

    /// A requirement has an empty name.
    #[error("Template {template} contains a requirement with a blank name")]
    BlankName {
        /// The template list containing the blank entry.
        template: String,
    },

    /// The same requirement name appears twice in one template list.
    #[error("Template {template} lists requirement '{name}' more than once")]
    DuplicateRequirement {
        /// The template list.
        template: String,
        /// The duplicated name.
        name: String,
    },

    /// A validity period of zero months would expire documents immediately.
    #[error("Requirement '{name}' has a validity period of zero months")]
    ZeroValidity {
        /// The offending requirement.
        name: String,
    },
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Parse(_) => 400,
            Self::BlankName { .. } | Self::DuplicateRequirement { .. } | Self::ZeroValidity { .. } => {
                422
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "CATALOG_PARSE_ERROR",
            Self::BlankName { .. } => "CATALOG_BLANK_NAME",
            Self::DuplicateRequirement { .. } => "CATALOG_DUPLICATE_REQUIREMENT",
            Self::ZeroValidity { .. } => "CATALOG_ZERO_VALIDITY",
        }
    }
}

impl From<CatalogError> for kyc_shared::AppError {
    fn from(err: CatalogError) -> Self {
        Self::from_status(err.status_code(), err.to_string())
    }
}
