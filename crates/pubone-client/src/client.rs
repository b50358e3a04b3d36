//! PubOne client: lookup gateway, pair validation, bulk retrieval

use serde_json::Value;

use crate::batch::QueryBatches;
use crate::error::Error;
use crate::identifiers::{validate_id, validate_id_list};
use crate::session::{Session, SessionConfig};
use crate::validate::{classify, ValidatedArticle};

/// Production endpoint of the PubOne registry.
pub const PUBONE_EP: &str = "http://pubone.linkerd.ncbi.nlm.nih.gov";

/// Registry endpoint families. The three differ only in response schema;
/// batching and token syntax are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Article identity records (`lojson`).
    Record,
    /// Citation records (`citjson`).
    Citation,
    /// CSL-JSON records (`csljson`).
    CslJson,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Record => "lojson",
            Endpoint::Citation => "citjson",
            Endpoint::CslJson => "csljson",
        }
    }
}

/// Client for the PubOne article identity and citation registry.
///
/// Holds no per-call state; every [`validate`](Self::validate) and
/// [`fetch`](Self::fetch) call is independent.
pub struct PubOneClient {
    endpoint: String,
    session: Session,
}

impl PubOneClient {
    pub fn new(endpoint: impl Into<String>, session: Session) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Client against the production endpoint with the patient
    /// command-line session preset.
    pub fn with_defaults() -> Self {
        Self::new(PUBONE_EP, Session::new(SessionConfig::command_line()))
    }

    /// Checks whether `pmid` and `pmcid` refer to the same article in
    /// PubOne. At least one must be given.
    ///
    /// On success returns the registry-normalized identifiers and DOI; the
    /// negative outcomes are the absence/mismatch variants of [`Error`].
    pub async fn validate(
        &self,
        pmid: Option<u64>,
        pmcid: Option<u64>,
    ) -> Result<ValidatedArticle, Error> {
        let pmid = validate_id(pmid, "pmid")?;
        let pmcid = validate_id(pmcid, "pmcid")?;
        if pmid.is_none() && pmcid.is_none() {
            return Err(Error::InvalidIdentifier {
                message: "at least one of `pmid` or `pmcid` must be specified".to_string(),
            });
        }

        let mut tokens = Vec::new();
        if let Some(pmid) = pmid {
            tokens.push(format!("pubmed_{pmid}"));
        }
        if let Some(pmcid) = pmcid {
            tokens.push(format!("pmc_{pmcid}"));
        }

        let payload = self.lookup(Endpoint::Record, &tokens.join(",")).await?;
        classify(pmid, pmcid, &payload)
    }

    /// Fetches records for every given identifier from the selected
    /// endpoint, batching the identifiers into length-bounded query groups
    /// and concatenating the responses in request order.
    ///
    /// There is no partial-success contract: if any batch fails, the whole
    /// call fails and previously fetched batches are discarded.
    pub async fn fetch(
        &self,
        kind: Endpoint,
        pmids: Option<&[u64]>,
        pmcids: Option<&[u64]>,
    ) -> Result<Vec<Value>, Error> {
        validate_id_list(pmids, "pmid")?;
        validate_id_list(pmcids, "pmcid")?;
        if pmids.is_none() && pmcids.is_none() {
            return Err(Error::InvalidIdentifier {
                message: "at least one of `pmids` or `pmcids` must be specified".to_string(),
            });
        }

        let mut merged = Vec::new();
        for group in QueryBatches::new(pmids.unwrap_or_default(), pmcids.unwrap_or_default()) {
            let payload = self.lookup(kind, &group).await?;
            match payload {
                Value::Array(items) => merged.extend(items),
                // A one-token group can come back as a bare object.
                record @ Value::Object(_) => merged.push(record),
                other => {
                    return Err(Error::UpstreamServiceFailed {
                        reason: format!(
                            "expected a JSON array or object from the registry, got `{other}`"
                        ),
                    })
                }
            }
        }
        Ok(merged)
    }

    /// Issues one query-group GET and decodes the body. Retry policy lives
    /// entirely in the session.
    async fn lookup(&self, kind: Endpoint, tokens: &str) -> Result<Value, Error> {
        let url = format!("{}/{}/{}", self.endpoint, kind.path(), tokens);
        let body = self.session.get(&url).await?;
        serde_json::from_str(&body).map_err(|e| Error::UpstreamServiceFailed {
            reason: format!("undecodable registry response: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Record.path(), "lojson");
        assert_eq!(Endpoint::Citation.path(), "citjson");
        assert_eq!(Endpoint::CslJson.path(), "csljson");
    }

    #[tokio::test]
    async fn test_validate_requires_at_least_one_id() {
        let client = PubOneClient::with_defaults();
        assert!(matches!(
            client.validate(None, None).await,
            Err(Error::InvalidIdentifier { .. })
        ));
    }

    #[tokio::test]
    async fn test_validate_rejects_zero_before_any_request() {
        let client = PubOneClient::with_defaults();
        assert!(matches!(
            client.validate(Some(0), None).await,
            Err(Error::InvalidIdentifier { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_requires_at_least_one_list() {
        let client = PubOneClient::with_defaults();
        assert!(matches!(
            client.fetch(Endpoint::Record, None, None).await,
            Err(Error::InvalidIdentifier { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_rejects_zero_element_before_any_request() {
        let client = PubOneClient::with_defaults();
        assert!(matches!(
            client.fetch(Endpoint::Record, Some(&[1, 0]), None).await,
            Err(Error::InvalidIdentifier { .. })
        ));
    }
}
