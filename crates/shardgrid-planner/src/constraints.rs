//! Splits pinned items from freely balanced ones.

use regex::Regex;
use shardgrid_core::Options;

use crate::classify::Entry;
use crate::error::{PlanError, PlanResult};

/// How items are selected for the shared or isolated group(s).
#[derive(Debug, Clone, Default)]
pub enum Pinning {
    /// Identifier matches any pattern (`single_process`).
    Patterns(Vec<Regex>),
    /// Any tag matches the pattern (`single_process_tag`).
    Tag(Regex),
    #[default]
    None,
}

impl Pinning {
    /// Compile the pinning rule. Identifier patterns win over the tag pattern.
    pub fn from_options(options: &Options) -> PlanResult<Self> {
        if !options.single_process.is_empty() {
            let patterns = options
                .single_process
                .iter()
                .map(|p| compile(p))
                .collect::<PlanResult<Vec<_>>>()?;
            return Ok(Pinning::Patterns(patterns));
        }
        if let Some(tag) = &options.single_process_tag {
            return Ok(Pinning::Tag(compile(tag)?));
        }
        Ok(Pinning::None)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            Pinning::Patterns(patterns) => patterns.iter().any(|p| p.is_match(&entry.id)),
            Pinning::Tag(pattern) => entry.tags.iter().any(|t| pattern.is_match(t)),
            Pinning::None => false,
        }
    }
}

fn compile(pattern: &str) -> PlanResult<Regex> {
    Regex::new(pattern).map_err(|source| PlanError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Partition entries into `(isolated, remaining)`, preserving order in both.
pub fn separate(entries: Vec<Entry>, pinning: &Pinning) -> (Vec<Entry>, Vec<Entry>) {
    entries.into_iter().partition(|entry| pinning.matches(entry))
}
