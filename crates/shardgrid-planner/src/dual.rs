//! Dual-partition allocator.
//!
//! Splits the process budget between two disjoint categories (e.g. UI and
//! API scenarios) in proportion to their total weight, then plans each
//! category on its own share.
//!
//! ```text
//! share(w) = max(round(N * w / total), 1)   if w > 0
//!          = 0                               otherwise
//! if share1 + share2 > N: decrement the larger share (tie → the second)
//! ```
//!
//! Rounding is half away from zero. The result lists the first category's
//! groups, then the second's.

use regex::Regex;
use shardgrid_core::{Group, Item, Options};
use tracing::{info, warn};

use crate::error::{PlanError, PlanResult};
use crate::planner::{Plan, plan};

/// A named set of items planned on its own share of processes.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub items: Vec<Item>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn weight(&self) -> f64 {
        self.items.iter().map(Item::weight).sum()
    }

    /// Items with any tag matching `tag` go to the second category, all
    /// others to the first.
    pub fn split_by_tag(
        items: Vec<Item>,
        first: impl Into<String>,
        second: impl Into<String>,
        tag: &Regex,
    ) -> (Category, Category) {
        let (tagged, rest): (Vec<Item>, Vec<Item>) = items
            .into_iter()
            .partition(|item| item.tags().iter().any(|t| tag.is_match(t)));
        (Category::new(first, rest), Category::new(second, tagged))
    }
}

/// Divide `num_groups` between two categories by weight.
pub fn split_group_budget(
    num_groups: usize,
    first_weight: f64,
    second_weight: f64,
) -> (usize, usize) {
    let total = first_weight + second_weight;
    let mut first = share(num_groups, total, first_weight);
    let mut second = share(num_groups, total, second_weight);

    if first + second > num_groups {
        if first > second {
            first -= 1;
        } else {
            second -= 1;
        }
    }
    (first, second)
}

fn share(num_groups: usize, total: f64, weight: f64) -> usize {
    if weight > 0.0 {
        ((num_groups as f64 * (weight / total)).round() as usize).max(1)
    } else {
        0
    }
}

/// Plan two categories on proportional shares of `num_groups`.
pub fn plan_by_category(
    first: Category,
    second: Category,
    num_groups: usize,
    options: &Options,
) -> PlanResult<Plan> {
    if num_groups == 0 {
        return Err(PlanError::NoGroups);
    }

    let (first_groups, second_groups) =
        split_group_budget(num_groups, first.weight(), second.weight());

    for (category, groups) in [(&first, first_groups), (&second, second_groups)] {
        info!(
            category = %category.name,
            groups,
            weight = category.weight(),
            "allotted processes"
        );
    }

    let mut groups = plan_share(first, first_groups, options)?;
    groups.extend(plan_share(second, second_groups, options)?);
    Ok(Plan { groups })
}

fn plan_share(
    category: Category,
    num_groups: usize,
    options: &Options,
) -> PlanResult<Vec<Group>> {
    if num_groups == 0 {
        if !category.items.is_empty() {
            warn!(
                category = %category.name,
                dropped = category.items.len(),
                "category received no processes; its items are not scheduled"
            );
        }
        return Ok(Vec::new());
    }
    Ok(plan(category.items, num_groups, options)?.groups)
}
