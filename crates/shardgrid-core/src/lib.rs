pub mod config;
pub mod resolver;
pub mod types;

pub use config::{Options, ShardgridConfig, SplitConfig};
pub use resolver::WeightResolver;
pub use types::*;
