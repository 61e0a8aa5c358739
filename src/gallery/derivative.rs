use std::fmt;
use std::path::{Path, PathBuf};

/// Source image extensions the optimizer picks up (matched case-insensitively)
pub const SOURCE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Extension of every generated derivative
pub const DERIVATIVE_EXTENSION: &str = "webp";

/// The two files generated next to each source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivativeKind {
    /// Square, cover-cropped grid image
    Thumbnail,
    /// Size-capped image for the detail view
    Full,
}

impl DerivativeKind {
    /// Suffix appended to the source base name
    pub fn suffix(self) -> &'static str {
        match self {
            DerivativeKind::Thumbnail => "thumb",
            DerivativeKind::Full => "full",
        }
    }

    /// `<base>-thumb.webp` / `<base>-full.webp`
    pub fn file_name(self, base_name: &str) -> String {
        format!("{}-{}.{}", base_name, self.suffix(), DERIVATIVE_EXTENSION)
    }
}

impl fmt::Display for DerivativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivativeKind::Thumbnail => f.write_str("thumb"),
            DerivativeKind::Full => f.write_str("full"),
        }
    }
}

/// Base name of a source image, or `None` if the file is not a source.
///
/// "IMG_01.JPG" -> Some("IMG_01"), "IMG_01-thumb.webp" -> None
pub fn source_base_name(file_name: &str) -> Option<&str> {
    let (base, ext) = file_name.rsplit_once('.')?;
    if base.is_empty() {
        return None;
    }

    let ext = ext.to_lowercase();
    if SOURCE_EXTENSIONS.contains(&ext.as_str()) {
        Some(base)
    } else {
        None
    }
}

/// A source image found in a category folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Category (folder) name
    pub category: String,
    /// File name including extension (e.g., "photo.jpg")
    pub file_name: String,
    /// File name without the source extension
    pub base_name: String,
    /// Full path to the source file
    pub path: PathBuf,
}

impl SourceImage {
    /// Build from a file inside `category_dir`, if it is a source image
    pub fn from_path(category: &str, path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let base_name = source_base_name(file_name)?;

        Some(Self {
            category: category.to_string(),
            file_name: file_name.to_string(),
            base_name: base_name.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// Expected path of a derivative (doesn't generate, just returns the path)
    pub fn derivative_path(&self, kind: DerivativeKind) -> PathBuf {
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        dir.join(kind.file_name(&self.base_name))
    }

    /// "category/file" label used in logs
    pub fn label(&self) -> String {
        format!("{}/{}", self.category, self.file_name)
    }
}
