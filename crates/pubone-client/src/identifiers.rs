//! Identifier validation and normalization for PMID / PMCID values
//!
//! Caller-supplied identifiers are positive integers. Registry-returned
//! identifiers arrive as strings; PMCIDs come in the form
//! `PMC<digits>[.<digits>]`, where the part after the period is a spurious
//! version suffix that must be discarded.

use crate::error::Error;

/// Checks a caller-supplied identifier. `None` passes through; zero is
/// rejected (negative values are unrepresentable in this API).
pub(crate) fn validate_id(value: Option<u64>, name: &str) -> Result<Option<u64>, Error> {
    match value {
        Some(0) => Err(Error::InvalidIdentifier {
            message: format!("`{name}` must be a positive integer value, 0 provided instead"),
        }),
        other => Ok(other),
    }
}

/// Checks every element of a caller-supplied identifier list. A single
/// malformed element fails the whole list; nothing is silently skipped.
pub(crate) fn validate_id_list(list: Option<&[u64]>, item_name: &str) -> Result<(), Error> {
    if let Some(items) = list {
        for &item in items {
            validate_id(Some(item), item_name)?;
        }
    }
    Ok(())
}

/// Parses a registry-returned PMID string. Absent unless the input is a
/// well-formed digit string.
pub fn normalize_pmid(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.parse::<u64>().ok())
}

/// Parses a registry-returned PMCID string, discarding the version suffix:
/// `"PMC6081977.3"` → `6081977`.
///
/// Strips every character other than digits and `.`, parses the remainder
/// as a float, and truncates toward zero. A present but unparseable value
/// is a malformed registry record, not an absent identifier.
pub fn normalize_pmcid(raw: Option<&str>) -> Result<Option<u64>, Error> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let value: f64 = cleaned.parse().map_err(|_| Error::UpstreamServiceFailed {
        reason: format!("unparseable pmcid `{raw}` in registry record"),
    })?;

    Ok(Some(value.trunc() as u64))
}
