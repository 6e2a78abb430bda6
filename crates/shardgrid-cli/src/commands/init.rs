use std::path::Path;

use shardgrid_core::ShardgridConfig;

pub fn init(path: &str, groups: usize, runtime_log: Option<&str>) -> anyhow::Result<()> {
    let output = Path::new(path).join("shardgrid.toml");
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }

    let config = ShardgridConfig::scaffold(groups, runtime_log.map(Path::new));
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_parseable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        init(path, 6, Some("tmp/runtime.log")).unwrap();

        let config = ShardgridConfig::from_file(&dir.path().join("shardgrid.toml")).unwrap();
        assert_eq!(config.groups, Some(6));
        assert_eq!(config.options.allowed_missing_percent, Some(50.0));
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shardgrid.toml"), "groups = 1\n").unwrap();

        let err = init(dir.path().to_str().unwrap(), 2, None).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
