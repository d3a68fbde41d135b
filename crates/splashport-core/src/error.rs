use std::fmt;

use thiserror::Error;

/// Wizard stage, used for precondition diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Anonymous,
    Authenticated,
    ApiKeySet,
    OrganizationSelected,
    NetworkSelected,
    SsidSelected,
    ClientsListed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Anonymous => "anonymous",
            Self::Authenticated => "authenticated",
            Self::ApiKeySet => "api key set",
            Self::OrganizationSelected => "organization selected",
            Self::NetworkSelected => "network selected",
            Self::SsidSelected => "SSID selected",
            Self::ClientsListed => "clients listed",
        };
        f.write_str(s)
    }
}

/// Errors from wizard transitions.
///
/// Lookup misses get their own variants because each has a distinct,
/// documented failure mode (see DESIGN.md); everything HTTP-shaped comes
/// through from `splashport-api`.
#[derive(Debug, Error)]
pub enum WizardError {
    /// A transition was attempted out of order.
    #[error("wizard is at stage '{actual}', this step requires '{expected}'")]
    WrongStage { expected: Stage, actual: Stage },

    /// No scraped org-picker link contains the supplied name.
    #[error("no organization link matches '{name}'")]
    OrganizationLinkNotFound { name: String },

    /// The supplied name matched a scraped link but no REST organization,
    /// so there is no id to fetch networks with.
    #[error("organization '{name}' is missing from the REST organization list")]
    OrganizationIdUnresolved { name: String },

    /// Error from either outbound surface.
    #[error(transparent)]
    Api(#[from] splashport_api::Error),

    /// CSV serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure flushing the CSV buffer.
    #[error("CSV write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl WizardError {
    /// Returns `true` when the operator should be sent back to login.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_auth())
    }
}
