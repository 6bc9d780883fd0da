use thiserror::Error;

/// Failures surfaced to callers of report generation and maintenance recording.
///
/// Malformed record fields never show up here; they degrade to defaults inside the
/// calculators. Only a missing asset, a failing store or a failing renderer does.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Store error: {0}")]
    Store(anyhow::Error),

    #[error(transparent)]
    Render(anyhow::Error),
}

impl ReportError {
    /// True when the caller should present "report unavailable" for an unknown asset.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReportError::AssetNotFound(_))
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
