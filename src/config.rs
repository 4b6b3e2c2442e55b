use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

/// Environment variable that overrides the project root.
pub const ROOT_ENV_VAR: &str = "GUTENTALLY_ROOT";

static PATHS: OnceLock<ProjectPaths> = OnceLock::new();

/// Default locations for every pipeline stage, all derived from one project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub proj_root: PathBuf,
    pub data_dir: PathBuf,
    pub raw_data_dir: PathBuf,
    pub processed_data_dir: PathBuf,
    pub analyzed_dir: PathBuf,
    pub result_dir: PathBuf,
}

impl ProjectPaths {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let proj_root = root.into();
        let data_dir = proj_root.join("data");
        Self {
            raw_data_dir: data_dir.join("raw"),
            processed_data_dir: data_dir.join("processed"),
            analyzed_dir: proj_root.join("analyzed"),
            result_dir: proj_root.join("results"),
            data_dir,
            proj_root,
        }
    }

    /// Creates the directories the pipeline writes into.
    pub fn ensure_output_dirs(&self) -> Result<()> {
        for dir in [&self.processed_data_dir, &self.analyzed_dir, &self.result_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {:?}", dir))?;
        }
        Ok(())
    }
}

/// Picks the project root: explicit override, then `GUTENTALLY_ROOT`, then the working directory.
pub fn resolve_root(root_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = root_override {
        return Ok(root.to_path_buf());
    }
    match env::var_os(ROOT_ENV_VAR) {
        Some(root) if !root.is_empty() => Ok(PathBuf::from(root)),
        _ => env::current_dir().context("Failed to determine current directory"),
    }
}

/// Loads `.env` and fixes the process-wide paths. Later calls return the first result.
pub fn init(root_override: Option<&Path>) -> Result<&'static ProjectPaths> {
    if let Some(paths) = PATHS.get() {
        return Ok(paths);
    }

    match dotenv::dotenv() {
        Ok(file) => debug!(action = "load", component = "dotenv", file_path = ?file, "Loaded environment file"),
        Err(e) => debug!(action = "load", component = "dotenv", error = %e, "No environment file loaded"),
    }

    let paths = ProjectPaths::from_root(resolve_root(root_override)?);
    info!(action = "resolve", component = "project_paths", proj_root = ?paths.proj_root, "Project paths resolved");
    Ok(PATHS.get_or_init(|| paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn layout_hangs_off_the_root() {
        let paths = ProjectPaths::from_root("/srv/books");
        let root = Path::new("/srv/books");

        assert_eq!(paths.proj_root, root);
        assert_eq!(paths.data_dir, root.join("data"));
        assert_eq!(paths.raw_data_dir, root.join("data").join("raw"));
        assert_eq!(paths.processed_data_dir, root.join("data").join("processed"));
        assert_eq!(paths.analyzed_dir, root.join("analyzed"));
        assert_eq!(paths.result_dir, root.join("results"));
    }

    #[test]
    fn explicit_root_wins() {
        let root = resolve_root(Some(Path::new("/tmp/elsewhere"))).unwrap();
        assert_eq!(root, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn ensure_output_dirs_creates_everything() {
        let temp = TempDir::new().unwrap();
        let paths = ProjectPaths::from_root(temp.path());

        paths.ensure_output_dirs().unwrap();
        assert!(paths.processed_data_dir.is_dir());
        assert!(paths.analyzed_dir.is_dir());
        assert!(paths.result_dir.is_dir());

        // Running twice is harmless.
        paths.ensure_output_dirs().unwrap();
    }

    #[test]
    fn init_is_stable_across_calls() {
        let first = init(None).unwrap();
        let second = init(Some(Path::new("/ignored/after/first"))).unwrap();
        assert_eq!(first, second);
    }
}
