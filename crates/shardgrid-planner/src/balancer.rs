//! Greedy balancer: always feed the lightest group.
//!
//! Items are assigned in the order given, each to the group with the
//! smallest accumulated size. Ties go to the earliest group, which keeps
//! the output stable. Fed largest-first this is the classic LPT heuristic:
//! no group ends up heavier than `total / groups + max_weight`.

use shardgrid_core::Group;

/// Assign every `(id, weight)` pair to the currently lightest group.
///
/// Takes ownership of the working groups, which may already hold pinned
/// items, and hands them back once every item is placed. `groups` must not
/// be empty when there are items to place.
pub fn balance<I>(mut groups: Vec<Group>, items: I) -> Vec<Group>
where
    I: IntoIterator<Item = (String, f64)>,
{
    for (id, weight) in items {
        debug_assert!(!groups.is_empty(), "no groups to place {id:?} in");
        let Some(idx) = lightest(&groups) else {
            break;
        };
        groups[idx].push(id, weight);
    }
    groups
}

/// Index of the first group with the smallest size.
pub fn lightest(groups: &[Group]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, group) in groups.iter().enumerate() {
        match best {
            Some((_, size)) if group.size() >= size => {}
            _ => best = Some((idx, group.size())),
        }
    }
    best.map(|(idx, _)| idx)
}

/// `count` fresh, empty groups.
pub fn empty_groups(count: usize) -> Vec<Group> {
    (0..count).map(|_| Group::new()).collect()
}
