use crate::editing::{Line, Snapshot};
use crate::models::{SCREENPLAY_EXTENSION, ScreenplayFile};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid screenplay file {path}: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid screenplay directory: {0}")]
    InvalidScreenplayDir(String),
}

/// Read a screenplay file: a JSON array of `{"class", "content"}` objects
pub fn read_screenplay(relative_path: &RelativePath, root: &Path) -> Result<Vec<Line>, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let content = fs::read_to_string(&absolute_path)?;
    parse_screenplay(&content).map_err(|source| IoError::Format {
        path: absolute_path,
        source,
    })
}

/// Write a snapshot as a screenplay file
pub fn write_screenplay(
    relative_path: &RelativePath,
    root: &Path,
    snapshot: &Snapshot,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serialize_screenplay(snapshot.lines()).map_err(|source| IoError::Format {
        path: absolute_path.clone(),
        source,
    })?;
    fs::write(&absolute_path, content)?;
    log::info!(
        "Saved {} lines to {}",
        snapshot.len(),
        absolute_path.display()
    );
    Ok(())
}

pub fn parse_screenplay(content: &str) -> Result<Vec<Line>, serde_json::Error> {
    serde_json::from_str(content)
}

pub fn serialize_screenplay(lines: &[Line]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(lines)
}

/// Find every screenplay under `root`, sorted by path
pub fn scan_screenplays(root: &Path) -> Result<Vec<ScreenplayFile>, IoError> {
    if !root.exists() {
        return Err(IoError::InvalidScreenplayDir(
            "screenplay directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();

    Ok(files
        .iter()
        .filter_map(|path| path.strip_prefix(root).ok())
        .filter_map(|relative| RelativePathBuf::from_path(relative).ok())
        .map(ScreenplayFile::new)
        .collect())
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == SCREENPLAY_EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_screenplay_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidScreenplayDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Classification;
    use crate::tests::{create_test_file, create_test_screenplay_dir};
    use pretty_assertions::assert_eq;

    const PILOT: &str = r#"[
        {"class": "scene-heading", "content": "INT. DINER - NIGHT"},
        {"class": "character", "content": "WAITRESS"},
        {"class": "dialogue", "content": "Coffee?"}
    ]"#;

    #[test]
    fn test_read_screenplay() {
        let dir = create_test_screenplay_dir();
        create_test_file(&dir, "Pilot.lss", PILOT);

        let lines = read_screenplay(RelativePath::new("Pilot.lss"), dir.path()).unwrap();

        assert_eq!(
            lines,
            vec![
                Line::new(Classification::SceneHeading, "INT. DINER - NIGHT"),
                Line::new(Classification::Character, "WAITRESS"),
                Line::new(Classification::Dialogue, "Coffee?"),
            ]
        );
    }

    #[test]
    fn test_read_empty_array() {
        let dir = create_test_screenplay_dir();
        create_test_file(&dir, "Blank.lss", "[]");

        let lines = read_screenplay(RelativePath::new("Blank.lss"), dir.path()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_read_not_found() {
        let dir = create_test_screenplay_dir();
        let result = read_screenplay(RelativePath::new("missing.lss"), dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_read_rejects_unknown_class() {
        let dir = create_test_screenplay_dir();
        create_test_file(
            &dir,
            "Bad.lss",
            r#"[{"class": "montage", "content": "x"}]"#,
        );

        let result = read_screenplay(RelativePath::new("Bad.lss"), dir.path());

        let err = result.unwrap_err();
        assert!(matches!(err, IoError::Format { .. }));
        assert!(err.to_string().contains("Bad.lss"));
    }

    #[test]
    fn test_write_then_read() {
        let dir = create_test_screenplay_dir();
        let snapshot = Snapshot {
            version: 3,
            lines: vec![
                Line::new(Classification::SceneHeading, "EXT. FIELD - DAY"),
                Line::new(Classification::Action, "Wind."),
            ],
        };
        let path = RelativePath::new("season1/Episode 1.lss");

        write_screenplay(path, dir.path(), &snapshot).unwrap();

        assert!(dir.path().join("season1").is_dir());
        let lines = read_screenplay(path, dir.path()).unwrap();
        assert_eq!(lines, snapshot.lines);
    }

    #[test]
    fn test_written_file_uses_class_key() {
        let dir = create_test_screenplay_dir();
        let snapshot = Snapshot {
            version: 1,
            lines: vec![Line::new(Classification::Transition, "CUT TO:")],
        };

        write_screenplay(RelativePath::new("t.lss"), dir.path(), &snapshot).unwrap();

        let raw = fs::read_to_string(dir.path().join("t.lss")).unwrap();
        assert!(raw.contains(r#""class": "transition""#));
        assert!(raw.contains(r#""content": "CUT TO:""#));
    }

    #[test]
    fn test_scan_finds_nested_screenplays_only() {
        let dir = create_test_screenplay_dir();
        create_test_file(&dir, "B.lss", "[]");
        create_test_file(&dir, "A.lss", "[]");
        create_test_file(&dir, "notes.md", "# not a screenplay");
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts").join("C.lss"), "[]").unwrap();

        let files = scan_screenplays(dir.path()).unwrap();

        let titles: Vec<&str> = files.iter().map(|f| f.title()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(files[2].display_path(), "drafts/C");
    }

    #[test]
    fn test_scan_invalid_directory() {
        let result = scan_screenplays(Path::new("/this/path/does/not/exist"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("screenplay directory")
        );
    }

    #[test]
    fn test_validate_screenplay_dir() {
        let dir = create_test_screenplay_dir();
        assert!(validate_screenplay_dir(dir.path()).is_ok());
        assert!(matches!(
            validate_screenplay_dir(Path::new("/nonexistent/path")),
            Err(IoError::InvalidScreenplayDir(_))
        ));
    }
}
