use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory (local or in the home directory)
pub const DIR_NAME: &str = ".flowtime";

/// Environment override for the data directory
pub const DIR_ENV: &str = "FLOWTIME_DIR";

/// Get the flowtime directory - checks for local .flowtime first, then
/// FLOWTIME_DIR, then falls back to global ~/.flowtime
pub fn get_flowtime_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_flowtime(&current_dir) {
        return Ok(local_dir);
    }

    if let Some(dir) = env::var_os(DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DIR_NAME))
}

/// Find local .flowtime directory by walking up the directory tree
fn find_local_flowtime(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Ensure the flowtime directory exists
pub fn ensure_flowtime_dir() -> Result<PathBuf> {
    let dir = get_flowtime_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .flowtime directory in the current directory
pub fn init_local_flowtime() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    init_flowtime_in(&current_dir)
}

fn init_flowtime_in(parent: &Path) -> Result<PathBuf> {
    let dir = parent.join(DIR_NAME);

    if dir.exists() {
        anyhow::bail!("Flowtime directory already exists: {}", dir.display());
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    Ok(dir)
}

/// Path to config.json
pub fn config_file() -> Result<PathBuf> {
    Ok(ensure_flowtime_dir()?.join("config.json"))
}

/// Default path for an analytics report on `date`
pub fn report_file(date: chrono::NaiveDate) -> Result<PathBuf> {
    Ok(ensure_flowtime_dir()?.join(format!("report-{}.md", date.format("%Y-%m-%d"))))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "[1, 2]").unwrap();
        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("[1, 2]"));

        atomic_write(&test_file, "[]").unwrap();
        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");

        assert_eq!(read_file(&test_file).unwrap(), None);
    }

    #[test]
    fn test_find_local_flowtime_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root_dir = temp_dir.path().join(DIR_NAME);
        fs::create_dir_all(&root_dir).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_flowtime(&nested), Some(root_dir));
    }

    #[test]
    fn test_init_refuses_existing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();

        let dir = init_flowtime_in(temp_dir.path()).unwrap();
        assert!(dir.is_dir());
        assert!(init_flowtime_in(temp_dir.path()).is_err());
    }
}
