//! Decision engine classifying a registry response against a
//! caller-supplied identifier pair
//!
//! Classification is pure: it takes the decoded JSON payload and the
//! identifiers the caller asked about, and produces either a positive
//! [`ValidatedArticle`] or one typed failure. "Exists" for an identifier
//! means the caller supplied it and it equals the registry-normalized value
//! from the record; a caller-absent identifier is excluded from the
//! comparison.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::identifiers::{normalize_pmcid, normalize_pmid};

/// One raw identity record as returned by the registry.
#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    pmcid: Option<String>,
    #[serde(default)]
    doi: Option<String>,
}

/// A positively validated article, in registry-normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedArticle {
    pub pmid: Option<u64>,
    pub pmcid: Option<u64>,
    pub doi: Option<String>,
}

/// Classifies a registry payload. Precondition: at least one of `pmid` /
/// `pmcid` is present (enforced by the caller before the lookup).
pub(crate) fn classify(
    pmid: Option<u64>,
    pmcid: Option<u64>,
    payload: &Value,
) -> Result<ValidatedArticle, Error> {
    let records = match payload {
        Value::Array(items) => items,
        other => {
            return Err(Error::UpstreamServiceFailed {
                reason: format!("expected a JSON array from the registry, got `{other}`"),
            })
        }
    };

    match (pmid, pmcid, records.len()) {
        // A two-record response means the two identifiers resolve to two
        // different articles; no per-record comparison is needed.
        (Some(pmid), Some(pmcid), 2) => Err(Error::PmidPmcidMismatch { pmid, pmcid }),
        (Some(pmid), Some(pmcid), 0) => Err(Error::PmidPmcidAbsent { pmid, pmcid }),
        (Some(pmid), None, 0) => Err(Error::PmidAbsent { pmid }),
        (None, Some(pmcid), 0) => Err(Error::PmcidAbsent { pmcid }),
        (_, _, 1) => classify_single_record(pmid, pmcid, &records[0]),
        (_, _, count) => Err(Error::ServiceContractViolation {
            detail: format!(
                "registry returned {count} records for pmid={pmid:?} pmcid={pmcid:?}"
            ),
        }),
    }
}

fn classify_single_record(
    pmid: Option<u64>,
    pmcid: Option<u64>,
    record: &Value,
) -> Result<ValidatedArticle, Error> {
    let record: RawArticle =
        serde_json::from_value(record.clone()).map_err(|e| Error::UpstreamServiceFailed {
            reason: format!("malformed registry record: {e}"),
        })?;

    let found_pmid = normalize_pmid(record.id.as_deref());
    let found_pmcid = normalize_pmcid(record.pmcid.as_deref())?;

    let pmid_exists = pmid.is_some() && pmid == found_pmid;
    let pmcid_exists = pmcid.is_some() && pmcid == found_pmcid;

    match (pmid, pmcid, pmid_exists, pmcid_exists) {
        (Some(_), Some(_), true, true)
        | (Some(_), None, true, _)
        | (None, Some(_), _, true) => Ok(ValidatedArticle {
            pmid: found_pmid,
            pmcid: found_pmcid,
            doi: record.doi,
        }),
        (Some(_), Some(pmcid), true, false) => Err(Error::PmcidAbsent { pmcid }),
        (Some(pmid), Some(_), false, true) => Err(Error::PmidAbsent { pmid }),
        _ => Err(Error::ServiceContractViolation {
            detail: format!(
                "single record (pmid={found_pmid:?}, pmcid={found_pmcid:?}) matches \
                 neither pmid={pmid:?} nor pmcid={pmcid:?}"
            ),
        }),
    }
}
