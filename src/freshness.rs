//! Mtime-based freshness detection for generated artifacts.
//!
//! An artifact is fresh when it exists and its modification time is at
//! least the source's modification time. Fresh artifacts are reused
//! instead of re-encoded.

use std::path::Path;
use std::time::SystemTime;

/// Get the modification time of a file.
///
/// Returns `None` if the file doesn't exist or mtime cannot be read.
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Check if an artifact is at least as new as the given source mtime.
///
/// Returns `true` if the artifact exists and `artifact mtime >= source
/// mtime`, meaning regeneration can be skipped.
pub fn is_artifact_fresh(artifact: &Path, source_mtime: SystemTime) -> bool {
    artifact
        .metadata()
        .and_then(|m| m.modified())
        .map(|artifact_time| artifact_time >= source_mtime)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_get_mtime_missing_file() {
        assert!(get_mtime(Path::new("/nonexistent/file.svg")).is_none());
    }

    #[test]
    fn test_missing_artifact_is_stale() {
        assert!(!is_artifact_fresh(
            Path::new("/nonexistent/file.jpg"),
            SystemTime::now()
        ));
    }

    #[test]
    fn test_artifact_freshness() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.svg");
        let artifact = dir.path().join("a.jpg");
        fs::write(&source, "source").unwrap();
        fs::write(&artifact, "artifact").unwrap();

        let base = SystemTime::now();
        File::open(&source).unwrap().set_modified(base).unwrap();

        // Artifact newer than source: fresh.
        File::open(&artifact)
            .unwrap()
            .set_modified(base + Duration::from_secs(10))
            .unwrap();
        let source_mtime = get_mtime(&source).unwrap();
        assert!(is_artifact_fresh(&artifact, source_mtime));

        // Equal mtimes still count as fresh.
        File::open(&artifact).unwrap().set_modified(base).unwrap();
        assert!(is_artifact_fresh(&artifact, source_mtime));

        // Source newer than artifact: stale.
        File::open(&source)
            .unwrap()
            .set_modified(base + Duration::from_secs(20))
            .unwrap();
        let source_mtime = get_mtime(&source).unwrap();
        assert!(!is_artifact_fresh(&artifact, source_mtime));
    }
}
