use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use regex::Regex;
use serde::Deserialize;
use shardgrid_core::{Item, Options, ShardgridConfig, SplitConfig};
use shardgrid_planner::{Category, Plan};
use shardgrid_runtime::{RuntimeLog, SizingOptions, attach_weights};

const DEFAULT_CONFIG: &str = "shardgrid.toml";

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Item list (.json, .toml, or one id per line)
    #[arg(short, long)]
    pub items: PathBuf,
    /// Number of process groups (default: `groups` from shardgrid.toml)
    #[arg(short = 'n', long)]
    pub groups: Option<usize>,
    /// Config file (default: ./shardgrid.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Pattern for items that must share one process (repeatable)
    #[arg(long = "single-process")]
    pub single_process: Vec<String>,
    /// Tag pattern for items that must share one process
    #[arg(long)]
    pub single_process_tag: Option<String>,
    /// Run pinned items in their own process
    #[arg(long)]
    pub isolate: bool,
    /// Number of processes reserved for pinned items
    #[arg(long)]
    pub isolate_count: Option<usize>,
    /// Explicit groups, e.g. `a,b|c|d`
    #[arg(long)]
    pub specify_groups: Option<String>,
    /// Skip items tagged with a match for this pattern
    #[arg(long)]
    pub ignore_tag_pattern: Option<String>,
    /// Runtime log (`id:seconds` per line) used to weigh items
    #[arg(long)]
    pub runtime_log: Option<PathBuf>,
    /// Share of items allowed to be missing from the runtime log
    #[arg(long)]
    pub allowed_missing_percent: Option<f64>,
    /// Split items by this tag into two categories planned separately
    #[arg(long)]
    pub split_tag: Option<String>,
    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

impl PlanArgs {
    fn options(&self) -> Options {
        Options {
            single_process: self.single_process.clone(),
            single_process_tag: self.single_process_tag.clone(),
            isolate: self.isolate,
            isolate_count: self.isolate_count,
            specify_groups: self.specify_groups.clone(),
            ignore_tag_pattern: self.ignore_tag_pattern.clone(),
            runtime_log: self.runtime_log.clone(),
            allowed_missing_percent: self.allowed_missing_percent,
        }
    }
}

pub fn plan(args: &PlanArgs) -> anyhow::Result<()> {
    let plan = build_plan(args)?;

    eprint!("{}", plan.report());
    print!("{}", render(&plan, &args.format)?);

    Ok(())
}

/// Text prints one space-separated group per line; json the whole plan
/// with group sizes.
fn render(plan: &Plan, format: &str) -> anyhow::Result<String> {
    match format {
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(plan)?)),
        _ => Ok(plan
            .groups
            .iter()
            .map(|group| format!("{}\n", group.items().join(" ")))
            .collect()),
    }
}

pub fn build_plan(args: &PlanArgs) -> anyhow::Result<Plan> {
    let config = load_config(args.config.as_deref())?;
    let options = config.options.merge(args.options());
    let num_groups = args
        .groups
        .or(config.groups)
        .context("number of groups not given: pass -n or set `groups` in shardgrid.toml")?;

    let items = load_items(&args.items)?;
    let sizing = SizingOptions::from_options(&options)?;
    let log = options
        .runtime_log
        .as_deref()
        .map(RuntimeLog::from_file)
        .transpose()?;

    let split = args
        .split_tag
        .clone()
        .map(|tag| SplitConfig {
            tag,
            ..SplitConfig::default()
        })
        .or(config.split);

    match split {
        Some(split) => {
            let tag = Regex::new(&split.tag)
                .with_context(|| format!("invalid split tag pattern {:?}", split.tag))?;
            let (first, second) = Category::split_by_tag(items, split.first, split.second, &tag);
            let first = Category::new(first.name, size(first.items, log.as_ref(), &sizing)?);
            let second = Category::new(second.name, size(second.items, log.as_ref(), &sizing)?);
            Ok(shardgrid_planner::plan_by_category(first, second, num_groups, &options)?)
        }
        None => {
            let items = size(items, log.as_ref(), &sizing)?;
            Ok(shardgrid_planner::plan(items, num_groups, &options)?)
        }
    }
}

/// Weigh items from the runtime log, or only drop ignored ones without it.
fn size(
    items: Vec<Item>,
    log: Option<&RuntimeLog>,
    sizing: &SizingOptions,
) -> anyhow::Result<Vec<Item>> {
    match log {
        Some(log) => {
            let sizing = SizingOptions {
                source: log.source(),
                ..sizing.clone()
            };
            Ok(attach_weights(items, log, &sizing)?)
        }
        None => Ok(items.into_iter().filter(|item| !sizing.ignores(item)).collect()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ShardgridConfig> {
    match path {
        Some(path) => ShardgridConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            ShardgridConfig::from_file(Path::new(DEFAULT_CONFIG))
        }
        None => Ok(ShardgridConfig::default()),
    }
}

#[derive(Deserialize)]
struct ItemsFile {
    items: Vec<Item>,
}

/// Read items from `.json`, `.toml`, or a plain id-per-line list.
pub fn load_items(path: &Path) -> anyhow::Result<Vec<Item>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read items from {}", path.display()))?;

    let items = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str::<ItemsFile>(&content)?.items,
        _ => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Item::Plain(line.to_string()))
            .collect(),
    };
    tracing::debug!(path = %path.display(), "loaded items");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_items_from_each_format() {
        let dir = tempfile::tempdir().unwrap();

        let json = write(dir.path(), "items.json", r#"[["a", 2.0], ["b", 1]]"#);
        assert_eq!(
            load_items(&json).unwrap(),
            vec![Item::Weighted("a".into(), 2.0), Item::Weighted("b".into(), 1.0)]
        );

        let toml = write(dir.path(), "items.toml", "items = [[\"a\", [\"@ui\"]], \"b\"]\n");
        assert_eq!(
            load_items(&toml).unwrap(),
            vec![Item::Tagged("a".into(), vec!["@ui".into()]), Item::Plain("b".into())]
        );

        let list = write(dir.path(), "files.txt", "spec/a_spec.rb\n\n  spec/b_spec.rb\n");
        assert_eq!(
            load_items(&list).unwrap(),
            vec![Item::Plain("spec/a_spec.rb".into()), Item::Plain("spec/b_spec.rb".into())]
        );
    }

    #[test]
    fn plans_with_runtime_log_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(dir.path(), "files.txt", "a\nb\nc\nd\n");
        let log = write(dir.path(), "runtime.log", "a:10\nb:6\nc:4\nd:1\n");
        let config = write(
            dir.path(),
            "shardgrid.toml",
            &format!("groups = 2\n\n[options]\nruntime_log = {:?}\n", log.display().to_string()),
        );

        let args = PlanArgs {
            items,
            config: Some(config),
            ..PlanArgs::default()
        };
        let plan = build_plan(&args).unwrap();

        assert_eq!(plan.total_size(), 21.0);
        // a(10) | b(6), c(4) → b, d(1) → a
        assert_eq!(plan.into_ids(), vec![vec!["a", "d"], vec!["b", "c"]]);
    }

    #[test]
    fn split_tag_plans_categories() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(
            dir.path(),
            "items.json",
            r#"[["ui1", ["@ui"]], ["api1", ["@api"]], ["ui2", ["@ui"]], ["ui3", []]]"#,
        );

        let args = PlanArgs {
            items,
            groups: Some(4),
            split_tag: Some("^@api$".into()),
            ..PlanArgs::default()
        };
        let plan = build_plan(&args).unwrap();

        // Weights 3 vs 1 over 4 groups → 3 + 1.
        assert_eq!(
            plan.into_ids(),
            vec![vec!["ui1"], vec!["ui2"], vec!["ui3"], vec!["api1"]]
        );
    }

    #[test]
    fn tag_pinning_applies_to_runtime_weighted_items() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(
            dir.path(),
            "items.json",
            r#"[["s1", ["@serial"]], ["a", []], ["s2", ["@serial"]], ["b", []]]"#,
        );
        let log = write(dir.path(), "runtime.log", "s1:5\na:5\ns2:5\nb:5\n");

        let args = PlanArgs {
            items,
            groups: Some(2),
            runtime_log: Some(log),
            single_process_tag: Some("@serial".into()),
            ..PlanArgs::default()
        };
        let plan = build_plan(&args).unwrap();

        assert_eq!(plan.total_size(), 20.0);
        assert_eq!(plan.into_ids(), vec![vec!["s1", "s2"], vec!["a", "b"]]);
    }

    #[test]
    fn renders_text_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(dir.path(), "items.json", r#"[["a", 3.0], ["b", 1.0]]"#);
        let args = PlanArgs {
            items,
            groups: Some(2),
            ..PlanArgs::default()
        };
        let plan = build_plan(&args).unwrap();

        assert_eq!(render(&plan, "text").unwrap(), "a\nb\n");

        let json: serde_json::Value =
            serde_json::from_str(&render(&plan, "json").unwrap()).unwrap();
        assert_eq!(json["groups"][0]["items"], serde_json::json!(["a"]));
        assert_eq!(json["groups"][0]["size"], 3.0);
        assert_eq!(json["groups"][1]["size"], 1.0);
    }

    #[test]
    fn missing_group_count_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(dir.path(), "files.txt", "a\n");
        let config = write(dir.path(), "shardgrid.toml", "");

        let args = PlanArgs {
            items,
            config: Some(config),
            ..PlanArgs::default()
        };
        let err = build_plan(&args).unwrap_err();
        assert!(err.to_string().contains("number of groups"));
    }

    #[test]
    fn planner_errors_surface() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(dir.path(), "files.txt", "a\nb\n");

        let args = PlanArgs {
            items,
            groups: Some(2),
            specify_groups: Some("x".into()),
            ..PlanArgs::default()
        };
        let err = build_plan(&args).unwrap_err();
        assert!(err.to_string().contains("could not find"));
    }
}
