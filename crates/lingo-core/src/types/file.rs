//! The backing-file identity object.
//!
//! A [`TranslationFile`] pins down *which* JSON file a catalog is bound to.
//! Identity is the resolved path; the derived `name` is the file stem.
//! Resolution validates the conventional layout up front so later I/O can
//! assume a well-formed target:
//!
//! ```text
//! <root>/Translations/<name>.json      catalogs
//! <root>/BackUp/<name>-backup.json     backups (created on demand)
//! ```

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::CatalogError;

/// The directory under the root that holds catalog files.
pub const TRANSLATIONS_DIR: &str = "Translations";

/// The directory under the root that holds backup snapshots.
pub const BACKUP_DIR: &str = "BackUp";

/// The only file extension a catalog may carry.
pub const CATALOG_EXTENSION: &str = "json";

/// A resolved, validated reference to the JSON file backing a catalog.
///
/// The file must exist and carry the `.json` extension at resolution time;
/// violations surface as the corresponding [`CatalogError`] kind instead of
/// silently degrading. Equality and hashing are by path, so two references
/// to the same file compare equal regardless of how they were constructed.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use lingo_core::TranslationFile;
///
/// let file = TranslationFile::resolve(Utf8Path::new("/app"), "main")?;
/// assert_eq!(file.name(), "main");
/// assert_eq!(file.path().as_str(), "/app/Translations/main.json");
/// # Ok::<(), lingo_core::CatalogError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationFile {
    path: Utf8PathBuf,
    name: String,
}

impl TranslationFile {
    /// Resolves a catalog by name under `<root>/Translations`.
    ///
    /// The name may be given with or without the `.json` extension.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::FileNotSpecified`] if the name is blank.
    /// - [`CatalogError::FolderMissing`] if `<root>/Translations` does not exist.
    /// - [`CatalogError::InvalidExtension`] if the name carries a non-JSON extension.
    /// - [`CatalogError::FileMissing`] if the file does not exist.
    pub fn resolve(root: &Utf8Path, name: &str) -> Result<Self, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::FileNotSpecified);
        }

        let dir = root.join(TRANSLATIONS_DIR);
        if !dir.is_dir() {
            return Err(CatalogError::FolderMissing(dir));
        }

        let file_name = if Utf8Path::new(name).extension().is_some() {
            name.to_owned()
        } else {
            format!("{name}.{CATALOG_EXTENSION}")
        };
        Self::from_path(dir.join(file_name))
    }

    /// Builds a reference from a full path to an existing catalog file.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::FileNotSpecified`] if the path is blank.
    /// - [`CatalogError::InvalidExtension`] if the extension is not `.json`.
    /// - [`CatalogError::FileMissing`] if the file does not exist.
    pub fn from_path(path: impl Into<Utf8PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        validate_target(&path)?;

        if !path.is_file() {
            return Err(CatalogError::FileMissing(path.into_string()));
        }

        let name = path
            .file_stem()
            .map(str::to_owned)
            .ok_or(CatalogError::FileNotSpecified)?;

        Ok(Self { path, name })
    }

    /// Returns the resolved path of the backing file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the catalog name (the file stem).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backup snapshot path for this catalog.
    ///
    /// For a file under the conventional `Translations` directory the
    /// backup lands in the sibling `<root>/BackUp`; otherwise `BackUp` is
    /// placed next to the file itself. The directory is not created here.
    #[must_use]
    pub fn backup_path(&self) -> Utf8PathBuf {
        let parent = self.path.parent().unwrap_or(Utf8Path::new(""));
        let base = match parent.file_name() {
            Some(TRANSLATIONS_DIR) => parent.parent().unwrap_or(parent),
            _ => parent,
        };
        base.join(BACKUP_DIR)
            .join(format!("{}-backup.{CATALOG_EXTENSION}", self.name))
    }
}

impl std::fmt::Display for TranslationFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' ({})", self.name, self.path)
    }
}

/// Validates a save target before any I/O is attempted.
///
/// # Errors
///
/// - [`CatalogError::FileNotSpecified`] if the path is blank.
/// - [`CatalogError::InvalidExtension`] if the extension is not `.json`.
pub fn validate_target(path: &Utf8Path) -> Result<(), CatalogError> {
    if path.as_str().trim().is_empty() {
        return Err(CatalogError::FileNotSpecified);
    }
    match path.extension() {
        Some(CATALOG_EXTENSION) => Ok(()),
        Some(other) => Err(CatalogError::InvalidExtension(format!(".{other}"))),
        None => Err(CatalogError::InvalidExtension(String::new())),
    }
}

/// Creates the conventional `Translations` directory under the root.
///
/// Returns the directory path. Creating an already-existing directory is
/// not an error.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the directory cannot be created.
pub fn ensure_layout(root: &Utf8Path) -> Result<Utf8PathBuf, CatalogError> {
    let dir = root.join(TRANSLATIONS_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn catalog_root() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        fs::create_dir(root.join(TRANSLATIONS_DIR)).unwrap();
        (tmp, root)
    }

    #[test]
    fn test_resolve_appends_json_extension() {
        let (_tmp, root) = catalog_root();
        fs::write(root.join("Translations/main.json"), "[]").unwrap();

        let file = TranslationFile::resolve(&root, "main").unwrap();
        assert_eq!(file.name(), "main");
        assert!(file.path().as_str().ends_with("main.json"));
    }

    #[test]
    fn test_resolve_accepts_name_with_extension() {
        let (_tmp, root) = catalog_root();
        fs::write(root.join("Translations/main.json"), "[]").unwrap();

        let file = TranslationFile::resolve(&root, "main.json").unwrap();
        assert_eq!(file.name(), "main");
    }

    #[test]
    fn test_resolve_blank_name_fails_fast() {
        let (_tmp, root) = catalog_root();
        assert!(matches!(
            TranslationFile::resolve(&root, "  "),
            Err(CatalogError::FileNotSpecified)
        ));
    }

    #[test]
    fn test_resolve_missing_folder() {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        assert!(matches!(
            TranslationFile::resolve(&root, "main"),
            Err(CatalogError::FolderMissing(_))
        ));
    }

    #[test]
    fn test_resolve_missing_file() {
        let (_tmp, root) = catalog_root();
        assert!(matches!(
            TranslationFile::resolve(&root, "absent"),
            Err(CatalogError::FileMissing(_))
        ));
    }

    #[test]
    fn test_resolve_rejects_wrong_extension() {
        let (_tmp, root) = catalog_root();
        fs::write(root.join("Translations/main.xml"), "[]").unwrap();
        assert!(matches!(
            TranslationFile::resolve(&root, "main.xml"),
            Err(CatalogError::InvalidExtension(ext)) if ext == ".xml"
        ));
    }

    #[test]
    fn test_equality_is_by_path() {
        let (_tmp, root) = catalog_root();
        fs::write(root.join("Translations/main.json"), "[]").unwrap();

        let a = TranslationFile::resolve(&root, "main").unwrap();
        let b = TranslationFile::from_path(root.join("Translations/main.json")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_backup_path_under_conventional_layout() {
        let (_tmp, root) = catalog_root();
        fs::write(root.join("Translations/main.json"), "[]").unwrap();

        let file = TranslationFile::resolve(&root, "main").unwrap();
        assert_eq!(file.backup_path(), root.join("BackUp/main-backup.json"));
    }

    #[test]
    fn test_backup_path_for_arbitrary_location() {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        fs::write(root.join("strings.json"), "[]").unwrap();

        let file = TranslationFile::from_path(root.join("strings.json")).unwrap();
        assert_eq!(file.backup_path(), root.join("BackUp/strings-backup.json"));
    }

    #[test]
    fn test_validate_target() {
        assert!(validate_target(Utf8Path::new("out/main.json")).is_ok());
        assert!(matches!(
            validate_target(Utf8Path::new("")),
            Err(CatalogError::FileNotSpecified)
        ));
        assert!(matches!(
            validate_target(Utf8Path::new("out/main.yaml")),
            Err(CatalogError::InvalidExtension(_))
        ));
        assert!(matches!(
            validate_target(Utf8Path::new("out/main")),
            Err(CatalogError::InvalidExtension(_))
        ));
    }

    #[test]
    fn test_ensure_layout_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

        let dir = ensure_layout(&root).unwrap();
        assert!(dir.is_dir());
        assert_eq!(ensure_layout(&root).unwrap(), dir);
    }
}
