use crate::error::ScanError;
use crate::models::Config;
use ignore::WalkBuilder;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Find every file below the configured root whose name ends with one of the configured extensions
pub fn discover_files(config: &Config) -> Result<Vec<PathBuf>, ScanError> {
    let root = config.root.as_path();

    match root.metadata() {
        Ok(metadata) if !metadata.is_dir() => {
            return Err(ScanError::RootNotDirectory(root.to_path_buf()));
        }
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        Err(source) => {
            return Err(ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            });
        }
    }

    let mut walker = WalkBuilder::new(root);
    walker
        .standard_filters(config.respect_gitignore)
        .sort_by_file_name(|a, b| a.cmp(b));

    if !config.ignored_dirs.is_empty() {
        let ignored_dirs = config.ignored_dirs.clone();
        walker.filter_entry(move |entry| {
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            if !is_dir || entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !ignored_dirs.iter().any(|ignored| *ignored == name)
        });
    }

    let mut files = Vec::new();
    for result in walker.build() {
        let entry = result.map_err(|source| ScanError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        // symlinks count when their target is a file
        let is_file = entry
            .file_type()
            .map(|ft| ft.is_file() || (ft.is_symlink() && entry.path().is_file()))
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        if matches_extension(entry.path(), &config.extensions) {
            files.push(entry.into_path());
        }
    }

    log::debug!(
        "Discovered {} file(s) under {} matching {:?}",
        files.len(),
        root.display(),
        config.extensions
    );

    Ok(files)
}

/// Check whether a file name ends with any of the given suffixes
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    extensions
        .iter()
        .any(|ext| !ext.is_empty() && name.ends_with(ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> Config {
        Config {
            root: root.to_path_buf(),
            ..Config::default()
        }
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "package main\n").unwrap();
    }

    #[test]
    fn test_matches_extension() {
        let extensions = vec![".go".to_string()];
        assert!(matches_extension(Path::new("server.go"), &extensions));
        assert!(matches_extension(Path::new("a/b/server_test.go"), &extensions));
        assert!(!matches_extension(Path::new("server.go.bak"), &extensions));
        assert!(!matches_extension(Path::new("script.py"), &extensions));
        assert!(!matches_extension(Path::new("server.go"), &[String::new()]));
    }

    #[test]
    fn test_discovers_matching_files_at_any_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "main.go");
        touch(root, "pkg/db/database.go");
        touch(root, "pkg/db/schema.sql");
        touch(root, "scripts/find_todos.py");
        touch(root, ".hidden/secret.go");
        fs::create_dir_all(root.join("empty.go")).unwrap();

        let files = discover_files(&config_for(root)).unwrap();

        let mut relative: Vec<String> = files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        relative.sort();
        assert_eq!(relative, vec![".hidden/secret.go", "main.go", "pkg/db/database.go"]);
    }

    #[test]
    fn test_discovery_order_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["c.go", "a.go", "b/z.go", "b/y.go"] {
            touch(temp_dir.path(), name);
        }
        let config = config_for(temp_dir.path());

        let first = discover_files(&config).unwrap();
        let second = discover_files(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_ignored_dirs_are_pruned() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "main.go");
        touch(temp_dir.path(), "vendor/lib/lib.go");

        let config = Config {
            ignored_dirs: vec!["vendor".to_string()],
            ..config_for(temp_dir.path())
        };
        let files = discover_files(&config).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.go"));
    }

    #[test]
    fn test_multiple_extensions() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "main.go");
        touch(temp_dir.path(), "lib.rs");
        touch(temp_dir.path(), "notes.txt");

        let config = Config {
            extensions: vec![".go".to_string(), ".rs".to_string()],
            ..config_for(temp_dir.path())
        };
        assert_eq!(discover_files(&config).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(&temp_dir.path().join("does-not-exist"));

        let err = discover_files(&config).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
        assert!(err.is_discovery());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_discovered() {
        let temp_dir = TempDir::new().unwrap();
        let target_dir = TempDir::new().unwrap();
        touch(target_dir.path(), "real.go");
        fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        std::os::unix::fs::symlink(
            target_dir.path().join("real.go"),
            temp_dir.path().join("src/link.go"),
        )
        .unwrap();
        std::os::unix::fs::symlink(target_dir.path(), temp_dir.path().join("linked_dir.go"))
            .unwrap();

        let files = discover_files(&config_for(temp_dir.path())).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/link.go"));
    }

    #[test]
    fn test_unreadable_root_is_not_reported_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "main.go");
        let config = config_for(&temp_dir.path().join("main.go").join("sub"));

        let err = discover_files(&config).unwrap_err();
        assert!(matches!(err, ScanError::RootUnreadable { .. }));
        assert!(err.is_discovery());
    }

    #[test]
    fn test_file_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "main.go");
        let config = config_for(&temp_dir.path().join("main.go"));

        let err = discover_files(&config).unwrap_err();
        assert!(matches!(err, ScanError::RootNotDirectory(_)));
    }
}
