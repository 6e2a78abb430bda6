//! Planning entry points.
//!
//! `plan` runs the full pipeline for one batch of items:
//! classify → explicit groups *or* (separate → isolate → balance) → sort.

use serde::Serialize;
use shardgrid_core::{Group, Item, Options};
use tracing::debug;

use crate::classify::classify;
use crate::constraints::{Pinning, separate};
use crate::error::{PlanError, PlanResult};
use crate::explicit::SpecifiedGroups;
use crate::isolation;
use crate::report::format_estimate;

/// The outcome of planning: exactly `num_groups` groups, in worker order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub groups: Vec<Group>,
}

impl Plan {
    pub fn total_size(&self) -> f64 {
        self.groups.iter().map(Group::size).sum()
    }

    pub fn report(&self) -> String {
        format_estimate(&self.groups)
    }

    pub fn into_ids(self) -> Vec<Vec<String>> {
        self.groups.into_iter().map(Group::into_items).collect()
    }
}

/// Partition `items` into `num_groups` balanced groups.
pub fn plan(items: Vec<Item>, num_groups: usize, options: &Options) -> PlanResult<Plan> {
    if num_groups == 0 {
        return Err(PlanError::NoGroups);
    }

    let classified = classify(items)?;
    debug!(
        shape = ?classified.shape,
        items = classified.entries.len(),
        num_groups,
        "classified items"
    );

    if let Some(spec) = &options.specify_groups {
        let groups = SpecifiedGroups::parse(spec).resolve(classified.entries, num_groups)?;
        return Ok(finish(groups));
    }

    let pinning = Pinning::from_options(options)?;
    let (isolated, remaining) = separate(classified.entries, &pinning);
    let mut groups = isolation::allocate(isolated, remaining, num_groups, options.isolate_count())?;

    for group in &mut groups {
        group.sort_items();
    }
    Ok(finish(groups))
}

/// Balance `(id, weight)` pairs, largest first.
pub fn balance_by_weight(
    items: Vec<(String, f64)>,
    num_groups: usize,
    options: &Options,
) -> PlanResult<Plan> {
    let items = items
        .into_iter()
        .map(|(id, weight)| Item::Weighted(id, weight))
        .collect();
    plan(items, num_groups, options)
}

/// Balance `(id, tags)` pairs by count, in input order.
pub fn balance_by_tags(
    items: Vec<(String, Vec<String>)>,
    num_groups: usize,
    options: &Options,
) -> PlanResult<Plan> {
    let items = items
        .into_iter()
        .map(|(id, tags)| Item::Tagged(id, tags))
        .collect();
    plan(items, num_groups, options)
}

fn finish(groups: Vec<Group>) -> Plan {
    for (i, group) in groups.iter().enumerate() {
        debug!(group = i + 1, tests = group.len(), size = group.size(), "estimated group");
    }
    Plan { groups }
}
