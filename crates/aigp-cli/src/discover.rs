//! # Input File Discovery
//!
//! Expands the positional arguments of `aigp validate` into the ordered
//! list of files to check.
//!
//! Each argument is treated as a glob pattern (`**` recurses). An argument
//! that matches nothing but names an existing file is taken literally, which
//! covers file names containing glob metacharacters such as `[`. Only
//! regular files are kept. A file reachable through several arguments is
//! checked once, at its first position.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Expand `patterns` into a deduplicated, order-preserving file list.
///
/// Never fails: an unparsable pattern or an unreadable directory entry is
/// logged and skipped. An empty result means nothing matched.
pub fn resolve_files<S: AsRef<str>>(patterns: &[S]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let mut matched = expand(pattern);
        if matched.is_empty() && Path::new(pattern).is_file() {
            matched.push(PathBuf::from(pattern));
        }
        tracing::debug!(pattern, matched = matched.len(), "expanded input pattern");

        for path in matched {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    files
}

/// Files matching one glob pattern, in the order `glob` yields them.
fn expand(pattern: &str) -> Vec<PathBuf> {
    let entries = match glob::glob(pattern) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(pattern, error = %e, "invalid glob pattern");
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, b"{}").unwrap();
        path
    }

    fn pattern(dir: &Path, tail: &str) -> String {
        format!("{}/{}", dir.display(), tail)
    }

    #[test]
    fn star_matches_files_in_one_directory() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "exam3.1.json");
        let b = touch(dir.path(), "exam3.2.json");
        touch(dir.path(), "notes.txt");

        let files = resolve_files(&[pattern(dir.path(), "*.json")]);
        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn double_star_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let top = touch(dir.path(), "top.json");
        let deep = touch(dir.path(), "nested/deeper/batch.json");

        let files = resolve_files(&[pattern(dir.path(), "**/*.json")]);
        assert!(files.contains(&top));
        assert!(files.contains(&deep));
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn directories_are_never_returned() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("looks.json")).unwrap();
        let real = touch(dir.path(), "real.json");

        let files = resolve_files(&[pattern(dir.path(), "*.json")]);
        assert_eq!(files, vec![real]);
    }

    #[test]
    fn overlapping_patterns_keep_first_position() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.json");
        let b = touch(dir.path(), "b.json");

        let files = resolve_files(&[
            b.display().to_string(),
            pattern(dir.path(), "*.json"),
            a.display().to_string(),
        ]);
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn literal_path_with_metacharacters_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let odd = touch(dir.path(), "batch[1].json");

        let files = resolve_files(&[odd.display().to_string()]);
        assert_eq!(files, vec![odd]);
    }

    #[test]
    fn nothing_matched_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = resolve_files(&[pattern(dir.path(), "*.json"), "[".to_string()]);
        assert!(files.is_empty());
    }
}
