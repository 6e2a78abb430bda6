//! shardgrid.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShardgridConfig {
    /// Default number of process groups when `-n` is not given.
    pub groups: Option<usize>,
    #[serde(default)]
    pub options: Options,
    pub split: Option<SplitConfig>,
}

/// Planner options. Keys not listed here are ignored when parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Patterns for items that must share one group.
    pub single_process: Vec<String>,
    /// Tag pattern for items that must share one group.
    pub single_process_tag: Option<String>,
    /// Give a single pinned item its own group.
    pub isolate: bool,
    /// Number of exclusive groups for pinned items. Only honored above 1.
    pub isolate_count: Option<usize>,
    /// Explicit assignment, e.g. `a,b|c|d,e`.
    pub specify_groups: Option<String>,
    /// Items carrying a tag that matches this pattern are not scheduled.
    pub ignore_tag_pattern: Option<String>,
    pub runtime_log: Option<PathBuf>,
    /// Share of items allowed to be missing from the runtime log (0-100).
    pub allowed_missing_percent: Option<f64>,
}

/// Two-category split for the dual-partition allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    pub first: String,
    pub second: String,
    /// Items with a tag matching this pattern go to the second category.
    pub tag: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            first: "ui".to_string(),
            second: "api".to_string(),
            tag: "@api".to_string(),
        }
    }
}

impl Options {
    /// Effective number of exclusive groups reserved for pinned items.
    pub fn isolate_count(&self) -> usize {
        match self.isolate_count {
            Some(count) if count > 1 => count,
            _ if self.isolate => 1,
            _ => 0,
        }
    }

    /// Layer `overrides` on top of `self`. Set fields in `overrides` win.
    pub fn merge(self, overrides: Options) -> Options {
        Options {
            single_process: if overrides.single_process.is_empty() {
                self.single_process
            } else {
                overrides.single_process
            },
            single_process_tag: overrides.single_process_tag.or(self.single_process_tag),
            isolate: overrides.isolate || self.isolate,
            isolate_count: overrides.isolate_count.or(self.isolate_count),
            specify_groups: overrides.specify_groups.or(self.specify_groups),
            ignore_tag_pattern: overrides.ignore_tag_pattern.or(self.ignore_tag_pattern),
            runtime_log: overrides.runtime_log.or(self.runtime_log),
            allowed_missing_percent: overrides
                .allowed_missing_percent
                .or(self.allowed_missing_percent),
        }
    }
}

impl ShardgridConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ShardgridConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a starter shardgrid.toml.
    pub fn scaffold(groups: usize, runtime_log: Option<&Path>) -> Self {
        ShardgridConfig {
            groups: Some(groups),
            options: Options {
                runtime_log: runtime_log.map(Path::to_path_buf),
                allowed_missing_percent: runtime_log.map(|_| 50.0),
                ..Options::default()
            },
            split: None,
        }
    }
}
