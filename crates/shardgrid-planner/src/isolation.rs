//! Isolation allocator.
//!
//! Two distinct policies for pinned items:
//!
//! - `isolate_count == 0`: pinned items **share** group 0, then everything
//!   else is balanced across all groups (group 0 included)
//! - `isolate_count == k >= 1`: pinned items are balanced across the first
//!   `k` groups so each gets an exclusive slot; the rest are balanced across
//!   groups `k..`

use shardgrid_core::Group;
use tracing::debug;

use crate::balancer::{balance, empty_groups};
use crate::classify::Entry;
use crate::error::{PlanError, PlanResult};

pub fn allocate(
    isolated: Vec<Entry>,
    remaining: Vec<Entry>,
    num_groups: usize,
    isolate_count: usize,
) -> PlanResult<Vec<Group>> {
    if isolate_count >= num_groups {
        return Err(PlanError::IsolationBudgetExceeded {
            isolate_count,
            num_groups,
        });
    }

    debug!(
        isolated = isolated.len(),
        remaining = remaining.len(),
        isolate_count,
        num_groups,
        "allocating pinned items"
    );

    if isolate_count == 0 {
        let mut groups = empty_groups(num_groups);
        let rest = groups.split_off(1);
        let mut groups = balance(groups, isolated.into_iter().map(Entry::into_sized));
        groups.extend(rest);
        return Ok(balance(groups, remaining.into_iter().map(Entry::into_sized)));
    }

    let mut groups = balance(
        empty_groups(isolate_count),
        isolated.into_iter().map(Entry::into_sized),
    );
    groups.extend(balance(
        empty_groups(num_groups - isolate_count),
        remaining.into_iter().map(Entry::into_sized),
    ));
    Ok(groups)
}
