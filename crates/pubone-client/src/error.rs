//! Error types for the PubOne client

use thiserror::Error;

use crate::session::SessionError;

/// Closed error vocabulary of the client.
///
/// The absence/mismatch variants are the expected negative results of
/// [`crate::PubOneClient::validate`], not transport failures; callers are
/// expected to match on them.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller input failed structural validation before any request was made.
    #[error("{message}")]
    InvalidIdentifier { message: String },

    #[error("pmid=`{pmid}` is missing in PubOne")]
    PmidAbsent { pmid: u64 },

    #[error("pmcid=`{pmcid}` is missing in PubOne")]
    PmcidAbsent { pmcid: u64 },

    #[error("pmid=`{pmid}` and pmcid=`{pmcid}` are both missing in PubOne")]
    PmidPmcidAbsent { pmid: u64, pmcid: u64 },

    #[error("pmid=`{pmid}` and pmcid=`{pmcid}` are not matching to the same article in PubOne")]
    PmidPmcidMismatch { pmid: u64, pmcid: u64 },

    /// Transport failure, server error, or a structurally unexpected
    /// registry response.
    #[error("PubOne service is failing with the following diagnostics: {reason}")]
    UpstreamServiceFailed { reason: String },

    /// A response combination the registry contract says cannot happen.
    #[error("PubOne contract violation: {detail}")]
    ServiceContractViolation { detail: String },
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Error::UpstreamServiceFailed {
            reason: err.to_string(),
        }
    }
}
