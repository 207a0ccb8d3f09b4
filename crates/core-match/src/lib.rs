//! Candidate storage and tiered matching.
//!
//! `MasterList` is built once from the input stream and never reordered.
//! `filter` ranks it against a query into three tiers (exact, prefix,
//! substring), keeping master order inside each tier. The result is a
//! `MatchView` of master indices, always recomputed from the full list so
//! shortening the query brings back items a longer query had dropped.

use anyhow::{Context, Result};
use std::io::BufRead;
use std::sync::Arc;
use tracing::trace;

/// Immutable, insertion-ordered candidate list. Cloning shares the storage.
#[derive(Debug, Clone, Default)]
pub struct MasterList {
    items: Arc<[String]>,
}

impl MasterList {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Read one candidate per `\n`-terminated line. The terminator is
    /// stripped; invalid UTF-8 is replaced lossily; empty lines are kept.
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut items = Vec::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            let n = reader
                .read_until(b'\n', &mut line)
                .context("reading candidate lines")?;
            if n == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            items.push(String::from_utf8_lossy(&line).into_owned());
        }
        trace!(target: "match", count = items.len(), "master_list_read");
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.items.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

/// Comparison rule applied uniformly to all three tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Sensitive,
    /// ASCII letters compare without case; all other bytes compare exactly.
    Insensitive,
}

impl CaseMode {
    fn eq(self, a: &[u8], b: &[u8]) -> bool {
        match self {
            CaseMode::Sensitive => a == b,
            CaseMode::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Exact,
    Prefix,
    Substring,
}

/// Classify `candidate` against `query`; `None` means no match.
pub fn classify(candidate: &str, query: &str, case: CaseMode) -> Option<Tier> {
    let c = candidate.as_bytes();
    let q = query.as_bytes();
    if c.len() == q.len() && case.eq(c, q) {
        return Some(Tier::Exact);
    }
    if c.len() < q.len() {
        return None;
    }
    if case.eq(&c[..q.len()], q) {
        return Some(Tier::Prefix);
    }
    if c.windows(q.len()).skip(1).any(|w| case.eq(w, q)) {
        return Some(Tier::Substring);
    }
    None
}

/// Ranked result of one `filter` call: master indices in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchView {
    indices: Vec<usize>,
}

impl MatchView {
    /// Every master item in master order (used when nothing is filtered).
    pub fn identity(master: &MasterList) -> Self {
        Self {
            indices: (0..master.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Master index of the item at view position `pos`.
    pub fn get(&self, pos: usize) -> Option<usize> {
        self.indices.get(pos).copied()
    }

    /// View position of master item `master_idx`, if it matched.
    pub fn position_of(&self, master_idx: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == master_idx)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Text of the item at view position `pos`.
    pub fn text<'m>(&self, master: &'m MasterList, pos: usize) -> Option<&'m str> {
        self.get(pos).and_then(|i| master.get(i))
    }

    pub fn texts<'a>(&'a self, master: &'a MasterList) -> impl Iterator<Item = &'a str> + 'a {
        self.indices.iter().filter_map(move |&i| master.get(i))
    }
}

/// Rank `master` against `query`: exact, then prefix, then substring, each in
/// master order. Pure: depends only on its arguments.
pub fn filter(master: &MasterList, query: &str, case: CaseMode) -> MatchView {
    let mut exact = Vec::new();
    let mut prefix = Vec::new();
    let mut substring = Vec::new();
    for (idx, item) in master.iter().enumerate() {
        match classify(item, query, case) {
            Some(Tier::Exact) => exact.push(idx),
            Some(Tier::Prefix) => prefix.push(idx),
            Some(Tier::Substring) => substring.push(idx),
            None => {}
        }
    }
    trace!(
        target: "match",
        query_len = query.len(),
        exact = exact.len(),
        prefix = prefix.len(),
        substring = substring.len(),
        "filter"
    );
    let mut indices = exact;
    indices.append(&mut prefix);
    indices.append(&mut substring);
    MatchView { indices }
}
