//! Explicit group assignment (`--specify-groups`).
//!
//! Micro-format: groups are separated by `|`, identifiers within a group by
//! `,`. `a,b|c|d` asks for `[a, b]` in group 0, `[c]` in group 1 and `[d]`
//! in group 2. Whitespace around identifiers is trimmed and empty
//! identifiers are skipped. Trailing empty groups are dropped; an empty group
//! in the middle (`a||b`) is kept and stays empty.

use std::collections::{HashMap, HashSet};

use shardgrid_core::Group;
use tracing::debug;

use crate::balancer::{balance, empty_groups};
use crate::classify::Entry;
use crate::error::{PlanError, PlanResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifiedGroups {
    segments: Vec<Vec<String>>,
}

impl SpecifiedGroups {
    pub fn parse(spec: &str) -> Self {
        let mut segments: Vec<Vec<String>> = spec
            .split('|')
            .map(|segment| {
                segment
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect()
            })
            .collect();

        while segments.last().is_some_and(Vec::is_empty) {
            segments.pop();
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Vec<String>] {
        &self.segments
    }

    /// Every named identifier, in the order given.
    pub fn named(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().flatten().map(String::as_str)
    }

    /// Place named items verbatim and balance the rest into trailing groups.
    ///
    /// Explicit groups keep the user's order; only the balanced trailing
    /// groups are sorted.
    pub fn resolve(&self, entries: Vec<Entry>, num_groups: usize) -> PlanResult<Vec<Group>> {
        let explicit = self.segments.len();
        if explicit > num_groups {
            return Err(PlanError::SpecifyGroupsTooMany {
                segments: explicit,
                num_groups,
            });
        }

        let weights: HashMap<&str, f64> = entries
            .iter()
            .rev()
            .map(|e| (e.id.as_str(), e.weight))
            .collect();

        let mut seen = HashSet::new();
        let mut missing = Vec::new();
        let mut duplicates = Vec::new();
        for id in self.named() {
            if !seen.insert(id) {
                if !duplicates.iter().any(|d| d == id) {
                    duplicates.push(id.to_string());
                }
            } else if !weights.contains_key(id) {
                missing.push(id.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(PlanError::SpecifyGroupsUnknownItem(missing));
        }
        if !duplicates.is_empty() {
            return Err(PlanError::SpecifyGroupsDuplicate(duplicates));
        }

        let mut groups: Vec<Group> = self
            .segments
            .iter()
            .map(|segment| {
                let mut group = Group::new();
                for id in segment {
                    group.push(id.as_str(), weights.get(id.as_str()).copied().unwrap_or(1.0));
                }
                group
            })
            .collect();

        let unnamed: Vec<Entry> = entries
            .into_iter()
            .filter(|e| !seen.contains(e.id.as_str()))
            .collect();

        if explicit == num_groups {
            if !unnamed.is_empty() {
                return Err(PlanError::SpecifyGroupsUnrouted(
                    unnamed.into_iter().map(|e| e.id).collect(),
                ));
            }
            return Ok(groups);
        }

        debug!(
            explicit,
            unnamed = unnamed.len(),
            trailing = num_groups - explicit,
            "balancing items not named in specified groups"
        );

        let mut trailing = balance(
            empty_groups(num_groups - explicit),
            unnamed.into_iter().map(Entry::into_sized),
        );
        for group in &mut trailing {
            group.sort_items();
        }
        groups.extend(trailing);
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, f64)]) -> Vec<Entry> {
        pairs
            .iter()
            .map(|(id, weight)| Entry {
                id: id.to_string(),
                weight: *weight,
                tags: Vec::new(),
            })
            .collect()
    }

    fn contents(groups: &[Group]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|g| g.items().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn parse_splits_pipes_and_commas() {
        let spec = SpecifiedGroups::parse("a, b|c| d ,e");
        assert_eq!(
            spec.segments().to_vec(),
            vec![vec!["a", "b"], vec!["c"], vec!["d", "e"]]
        );
    }

    #[test]
    fn parse_drops_trailing_empty_segments_only() {
        let spec = SpecifiedGroups::parse("a||b||");
        assert_eq!(spec.segments().len(), 3);
        assert!(spec.segments()[1].is_empty());

        assert!(SpecifiedGroups::parse("").segments().is_empty());
    }

    #[test]
    fn explicit_groups_unsorted_trailing_sorted() {
        let spec = SpecifiedGroups::parse("b,a|c");
        let groups = spec
            .resolve(entries(&[("d", 5.0), ("a", 1.0), ("b", 1.0), ("c", 1.0), ("e", 1.0)]), 3)
            .unwrap();

        assert_eq!(contents(&groups), vec![vec!["b", "a"], vec!["c"], vec!["d", "e"]]);
        assert_eq!(groups[0].size(), 2.0);
        assert_eq!(groups[2].size(), 6.0);
    }

    #[test]
    fn too_many_segments() {
        let err = SpecifiedGroups::parse("a|b|c")
            .resolve(entries(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]), 2)
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::SpecifyGroupsTooMany {
                segments: 3,
                num_groups: 2
            }
        ));
    }

    #[test]
    fn unknown_items_reported_together() {
        let err = SpecifiedGroups::parse("x,a|y")
            .resolve(entries(&[("a", 1.0)]), 3)
            .unwrap_err();
        match err {
            PlanError::SpecifyGroupsUnknownItem(missing) => assert_eq!(missing, vec!["x", "y"]),
            other => panic!("expected SpecifyGroupsUnknownItem, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = SpecifiedGroups::parse("a|a,b")
            .resolve(entries(&[("a", 1.0), ("b", 1.0)]), 3)
            .unwrap_err();
        match err {
            PlanError::SpecifyGroupsDuplicate(dups) => assert_eq!(dups, vec!["a"]),
            other => panic!("expected SpecifyGroupsDuplicate, got {other:?}"),
        }
    }

    #[test]
    fn full_specification_with_leftovers_is_unrouted() {
        let err = SpecifiedGroups::parse("a|b")
            .resolve(entries(&[("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 1.0)]), 2)
            .unwrap_err();
        match err {
            PlanError::SpecifyGroupsUnrouted(rest) => assert_eq!(rest, vec!["c", "d"]),
            other => panic!("expected SpecifyGroupsUnrouted, got {other:?}"),
        }
    }

    #[test]
    fn full_specification_without_leftovers() {
        let groups = SpecifiedGroups::parse("b|a")
            .resolve(entries(&[("a", 1.0), ("b", 1.0)]), 2)
            .unwrap();
        assert_eq!(contents(&groups), vec![vec!["b"], vec!["a"]]);
    }
}
