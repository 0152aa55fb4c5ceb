use relative_path::{RelativePath, RelativePathBuf};

/// File extension used for stored screenplays
pub const SCREENPLAY_EXTENSION: &str = "lss";

/// A screenplay file with a relative path and its title
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenplayFile {
    relative_path: RelativePathBuf,
    title: String,
    display_path: String,
}

impl ScreenplayFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let title = Self::extract_title(&relative_path);
        let display_path = strip_extension(relative_path.as_str()).to_string();

        Self {
            relative_path,
            title,
            display_path,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    /// Path for a title, e.g. `Pilot` → `Pilot.lss`
    pub fn for_title(title: &str) -> Self {
        Self::from_relative_str(&format!("{title}.{SCREENPLAY_EXTENSION}"))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without the `.lss` extension
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Relative path without the `.lss` extension
    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    fn extract_title(path: &RelativePath) -> String {
        path.file_name()
            .map(strip_extension)
            .unwrap_or("Untitled")
            .to_string()
    }
}

fn strip_extension(name: &str) -> &str {
    name.strip_suffix(".lss").unwrap_or(name)
}

impl From<RelativePathBuf> for ScreenplayFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for ScreenplayFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}
