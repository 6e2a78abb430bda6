//! Attach weights to items before planning.
//!
//! Every item gets a weight from the resolver. Items the resolver knows
//! nothing about draw from a missing-data budget (`allowed_missing_percent`
//! of the item count, 50% by default); once the budget is spent the log is
//! considered too stale to plan with. Items without data receive
//! `unknown_weight`, or the average of the known weights. Tags survive
//! sizing so tag pinning still applies to runtime-weighted items.

use regex::Regex;
use shardgrid_core::{Item, Options, WeightResolver};
use tracing::{debug, warn};

use crate::error::{RuntimeError, RuntimeResult};

pub const DEFAULT_ALLOWED_MISSING_PERCENT: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct SizingOptions {
    pub allowed_missing_percent: f64,
    /// Items with a tag matching this pattern are dropped.
    pub ignore_tag_pattern: Option<Regex>,
    /// Weight for items without data. Defaults to the known average.
    pub unknown_weight: Option<f64>,
    /// Shown in the error when the budget is exceeded.
    pub source: String,
}

impl Default for SizingOptions {
    fn default() -> Self {
        Self {
            allowed_missing_percent: DEFAULT_ALLOWED_MISSING_PERCENT,
            ignore_tag_pattern: None,
            unknown_weight: None,
            source: "<memory>".to_string(),
        }
    }
}

impl SizingOptions {
    pub fn from_options(options: &Options) -> RuntimeResult<Self> {
        let allowed_missing_percent = options
            .allowed_missing_percent
            .unwrap_or(DEFAULT_ALLOWED_MISSING_PERCENT);
        if !(0.0..=100.0).contains(&allowed_missing_percent) {
            return Err(RuntimeError::InvalidPercent(allowed_missing_percent));
        }

        let ignore_tag_pattern = options
            .ignore_tag_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| RuntimeError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(Self {
            allowed_missing_percent,
            ignore_tag_pattern,
            unknown_weight: None,
            source: options
                .runtime_log
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<memory>".to_string()),
        })
    }

    /// Whether `item` carries a tag matching the ignore pattern.
    pub fn ignores(&self, item: &Item) -> bool {
        self.ignore_tag_pattern
            .as_ref()
            .is_some_and(|pattern| item.tags().iter().any(|t| pattern.is_match(t)))
    }
}

/// Resolve a weight for every item, sorted by id. Tagged items come back as
/// `Item::WeightedTagged`, the rest as `Item::Weighted`.
pub fn attach_weights<R>(
    items: Vec<Item>,
    resolver: &R,
    options: &SizingOptions,
) -> RuntimeResult<Vec<Item>>
where
    R: WeightResolver + ?Sized,
{
    let (ignored, mut items): (Vec<Item>, Vec<Item>) =
        items.into_iter().partition(|item| options.ignores(item));
    if !ignored.is_empty() {
        debug!(ignored = ignored.len(), "dropped items matching ignore tag pattern");
    }

    items.sort_by(|a, b| a.id().cmp(b.id()));

    let tests = items.len();
    let mut budget = tests as f64 * options.allowed_missing_percent / 100.0;
    let mut resolved = Vec::with_capacity(tests);
    for item in items {
        let weight = resolver.weight_for(item.id());
        if weight.is_none() {
            budget -= 1.0;
            if budget < 0.0 {
                return Err(RuntimeError::LogTooSmall {
                    log: options.source.clone(),
                    tests,
                });
            }
        }
        resolved.push((item, weight));
    }

    let known: Vec<f64> = resolved.iter().filter_map(|(_, w)| *w).collect();
    let missing = resolved.len() - known.len();
    let fallback = options.unknown_weight.unwrap_or_else(|| {
        if known.is_empty() {
            1.0
        } else {
            known.iter().sum::<f64>() / known.len() as f64
        }
    });
    if missing > 0 {
        warn!(missing, fallback, "items without runtime data use fallback weight");
    }

    Ok(resolved
        .into_iter()
        .map(|(item, weight)| item.with_weight(weight.unwrap_or(fallback)))
        .collect())
}
