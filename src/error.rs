use thiserror::Error;

/// Errors an engine mutation can report.
///
/// Both variants abort the operation with no state change. Scheduling
/// advisories are deliberately not errors: they ride along on the successful
/// outcome and the caller decides whether to keep the committed event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// ZIP code is not exactly five ASCII digits.
    #[error("invalid zip code '{0}': expected exactly 5 digits")]
    InvalidZipCode(String),

    /// The ZIP is claimed by another active client (or the requesting client
    /// is unknown) and exclusivity blocks the event.
    #[error("zip code {zip} is assigned to another client")]
    TerritoryConflict { zip: String },
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
