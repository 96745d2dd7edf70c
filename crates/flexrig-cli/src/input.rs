//! Loading profile files and writing command output.

use std::path::Path;

use anyhow::{Context, Result};
use flexrig_profile::ProfileLibrary;

/// Loads a profile library (a single profile or an array of profiles).
pub fn load_library(path: &str) -> Result<ProfileLibrary> {
    ProfileLibrary::load(Path::new(path))
        .with_context(|| format!("Failed to load profile file: {}", path))
}

/// Writes `content` to `output`, or prints it when no path is given.
pub fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path)),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let err = load_library("/nonexistent/profiles.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/profiles.json"));
    }

    #[test]
    fn test_load_and_write() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("profiles.json");
        std::fs::write(&path, r#"[{"name": "A"}, {"name": "B"}]"#).unwrap();

        let library = load_library(path.to_str().unwrap()).unwrap();
        assert_eq!(library.len(), 2);

        let out = tmp.path().join("out.txt");
        write_output(Some(out.to_str().unwrap()), "hello").unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "hello");
    }
}
