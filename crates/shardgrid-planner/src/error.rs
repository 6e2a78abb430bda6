//! Planner error types.

use thiserror::Error;

/// Configuration errors that abort planning. No groups are produced.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("number of processes must be at least 1")]
    NoGroups,

    #[error("invalid weight {weight} for {id}: weights must be finite and non-negative")]
    InvalidWeight { id: String, weight: f64 },

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "number of isolated processes ({isolate_count}) must be less than the total number of processes ({num_groups})"
    )]
    IsolationBudgetExceeded {
        isolate_count: usize,
        num_groups: usize,
    },

    #[error(
        "number of processes separated by pipe ({segments}) must be less than or equal to the total number of processes ({num_groups})"
    )]
    SpecifyGroupsTooMany { segments: usize, num_groups: usize },

    #[error("could not find {0:?} from --specify-groups in the selected files & folders")]
    SpecifyGroupsUnknownItem(Vec<String>),

    #[error("{0:?} named more than once in --specify-groups")]
    SpecifyGroupsDuplicate(Vec<String>),

    #[error(
        "the number of groups in --specify-groups matches the number of processes, but these items \
         are not in any group: {0:?}; raise the process count or add them to a group"
    )]
    SpecifyGroupsUnrouted(Vec<String>),
}

pub type PlanResult<T> = Result<T, PlanError>;
