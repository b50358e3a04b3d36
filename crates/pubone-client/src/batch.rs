//! Length-bounded grouping of registry query tokens
//!
//! The registry accepts comma-joined token lists in the request path, so the
//! serialized length of one group must stay under the URL budget. Tokens are
//! emitted in input order: all `pubmed_<id>` first, then all `pmc_<id>`.

/// A group is flushed before its comma-joined length would reach this bound.
const MAX_GROUP_LEN: usize = 2000;

/// Iterator over comma-joined query groups, each shorter than
/// [`MAX_GROUP_LEN`] characters.
pub(crate) struct QueryBatches<'a> {
    pmids: std::slice::Iter<'a, u64>,
    pmcids: std::slice::Iter<'a, u64>,
    pending: Option<String>,
}

impl<'a> QueryBatches<'a> {
    pub(crate) fn new(pmids: &'a [u64], pmcids: &'a [u64]) -> Self {
        Self {
            pmids: pmids.iter(),
            pmcids: pmcids.iter(),
            pending: None,
        }
    }

    fn next_token(&mut self) -> Option<String> {
        if let Some(id) = self.pmids.next() {
            return Some(format!("pubmed_{id}"));
        }
        self.pmcids.next().map(|id| format!("pmc_{id}"))
    }
}

impl Iterator for QueryBatches<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut group = self.pending.take().or_else(|| self.next_token())?;

        while let Some(token) = self.next_token() {
            if group.len() + 1 + token.len() >= MAX_GROUP_LEN {
                self.pending = Some(token);
                return Some(group);
            }
            group.push(',');
            group.push_str(&token);
        }

        Some(group)
    }
}
