//! shardgrid-planner — weighted partitioning of test suites into process groups.
//!
//! Given work items (optionally weighted or tagged) and a process count,
//! produces exactly that many groups with total weight as even as a greedy
//! pass allows, while honoring pinning, isolation and explicit assignment.
//!
//! # Pipeline
//!
//! ```text
//! items ──► classify ──┬── specify_groups set ──► explicit::resolve
//!                      │
//!                      └── otherwise ──► constraints::separate
//!                                          └─► isolation::allocate
//!                                                └─► balancer::balance
//! ```
//!
//! `dual::plan_by_category` wraps the pipeline for two weighted categories,
//! and `report::format_estimate` renders the per-group summary.

pub mod balancer;
pub mod classify;
pub mod constraints;
pub mod dual;
pub mod error;
pub mod explicit;
pub mod isolation;
pub mod planner;
pub mod report;

pub use classify::{Classified, Entry, Shape, classify};
pub use constraints::Pinning;
pub use dual::{Category, plan_by_category, split_group_budget};
pub use error::{PlanError, PlanResult};
pub use explicit::SpecifiedGroups;
pub use planner::{Plan, balance_by_tags, balance_by_weight, plan};
pub use report::format_estimate;
