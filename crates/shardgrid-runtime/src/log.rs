//! Runtime log parsing.
//!
//! One `id:seconds` entry per line. The id may itself contain colons
//! (`features/a.feature:12`), so each line is split on its last `:`.
//! Lines that do not parse are skipped and later entries win.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use shardgrid_core::WeightResolver;
use tracing::debug;

use crate::error::{RuntimeError, RuntimeResult};

#[derive(Debug, Clone, Default)]
pub struct RuntimeLog {
    path: Option<PathBuf>,
    times: HashMap<String, f64>,
}

impl RuntimeLog {
    pub fn parse(content: &str) -> Self {
        let mut times = HashMap::new();
        for line in content.lines() {
            let Some((id, secs)) = line.trim().rsplit_once(':') else {
                continue;
            };
            if id.is_empty() {
                continue;
            }
            match secs.trim().parse::<f64>() {
                Ok(secs) if secs.is_finite() && secs >= 0.0 => {
                    times.insert(id.to_string(), secs);
                }
                _ => debug!(line, "skipping unparsable runtime log line"),
            }
        }
        Self { path: None, times }
    }

    pub fn from_file(path: &Path) -> RuntimeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut log = Self::parse(&content);
        log.path = Some(path.to_path_buf());
        debug!(path = %path.display(), entries = log.len(), "loaded runtime log");
        Ok(log)
    }

    /// Where the log was read from, or `"<memory>"`.
    pub fn source(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string())
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl WeightResolver for RuntimeLog {
    fn weight_for(&self, id: &str) -> Option<f64> {
        self.times.get(id).copied()
    }
}
