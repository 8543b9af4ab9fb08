use pronote_core::RecordFamily;
use pronote_portal::PortalError;
use pronote_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// One record family could not be fetched or mapped. Siblings are
    /// unaffected; the family is reported as an empty list.
    #[error("{family} fetch failed: {reason}")]
    PartialFetchFailure {
        family: RecordFamily,
        reason: String,
    },

    /// Writing the assembled snapshot failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl NormalizeError {
    pub(crate) fn partial(family: RecordFamily, reason: impl std::fmt::Display) -> Self {
        Self::PartialFetchFailure {
            family,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn portal(family: RecordFamily) -> impl FnOnce(PortalError) -> Self {
        move |error| Self::partial(family, error)
    }
}
