//! The JSON persistence gateway.
//!
//! Reads and writes the backing file as raw text and delegates
//! encode/decode to `serde_json`. Two policies from the original data
//! format are load-bearing here:
//!
//! - **Missing = empty**: blank content (or a bare JSON `null`) decodes to
//!   an empty catalog rather than an error. A malformed *non-empty*
//!   payload fails with [`CatalogError::InvalidContent`].
//! - **I/O failure is a boolean**: [`save`] reports write failures as
//!   `Ok(false)` so batch-save callers can choose their own retry policy;
//!   only pre-I/O validation raises an error.
//!
//! Writes go through a temp-file-then-rename so the common crash path
//! never leaves a torn catalog behind.

use camino::Utf8Path;

use lingo_core::{validate_target, CatalogError, TranslationFile, TranslationGroup};

/// Decodes raw catalog text into groups.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidContent`] for a malformed non-empty
/// payload.
pub fn decode(raw: &str) -> Result<Vec<TranslationGroup>, CatalogError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(CatalogError::InvalidContent)
}

/// Encodes groups into the interop JSON document.
#[must_use]
pub fn encode(groups: &[TranslationGroup]) -> String {
    // Serializing plain data structs cannot fail; pretty output keeps the
    // file hand-editable by translators.
    serde_json::to_string_pretty(groups).unwrap_or_else(|_| "[]".to_owned())
}

/// Loads all groups from a resolved translation file.
///
/// # Errors
///
/// - [`CatalogError::Io`] if the file cannot be read.
/// - [`CatalogError::InvalidContent`] if the payload is malformed.
pub fn load(file: &TranslationFile) -> Result<Vec<TranslationGroup>, CatalogError> {
    let raw = std::fs::read_to_string(file.path())?;
    let groups = decode(&raw)?;
    tracing::debug!(file = %file, count = groups.len(), "catalog loaded");
    Ok(groups)
}

/// Saves groups to the given path, creating parent directories on demand.
///
/// Validation runs before any I/O: a blank path fails with
/// [`CatalogError::FileNotSpecified`] and a non-`.json` target with
/// [`CatalogError::InvalidExtension`]. After validation, I/O failure is
/// reported as `Ok(false)` rather than an error.
pub fn save(path: &Utf8Path, groups: &[TranslationGroup]) -> Result<bool, CatalogError> {
    validate_target(path)?;
    let payload = encode(groups);
    Ok(write_atomic(path, &payload))
}

/// Writes the payload via a sibling temp file and a rename.
fn write_atomic(path: &Utf8Path, payload: &str) -> bool {
    let parent = path.parent().unwrap_or(Utf8Path::new("."));
    if let Err(error) = std::fs::create_dir_all(parent) {
        tracing::warn!(path = %path, error = %error, "could not create catalog directory");
        return false;
    }

    let tmp = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or("catalog.json")
    ));
    if let Err(error) = std::fs::write(&tmp, payload) {
        tracing::warn!(path = %tmp, error = %error, "could not write temp catalog");
        return false;
    }
    if let Err(error) = std::fs::rename(&tmp, path) {
        tracing::warn!(path = %path, error = %error, "could not move catalog into place");
        let _ = std::fs::remove_file(&tmp);
        return false;
    }

    tracing::debug!(path = %path, "catalog saved");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use lingo_core::Translation;
    use std::fs;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        (tmp, root)
    }

    #[test]
    fn test_decode_blank_is_empty_catalog() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("   \n").unwrap().is_empty());
        assert!(decode("null").unwrap().is_empty());
    }

    #[test]
    fn test_decode_malformed_nonempty_fails() {
        assert!(matches!(
            decode("{ not json"),
            Err(CatalogError::InvalidContent(_))
        ));
        assert!(matches!(
            decode(r#"{"Name": "half"#),
            Err(CatalogError::InvalidContent(_))
        ));
    }

    #[test]
    fn test_decode_interop_document() {
        let raw = r#"[
            { "Name": "greeting",
              "Translations": [ { "LanguageCode": "en", "Text": "Hello" } ] }
        ]"#;
        let groups = decode(raw).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "greeting");
        assert_eq!(groups[0].text_for("en"), Some("Hello"));
    }

    #[test]
    fn test_save_validates_before_io() {
        let groups = vec![TranslationGroup::new("a")];
        assert!(matches!(
            save(Utf8Path::new(""), &groups),
            Err(CatalogError::FileNotSpecified)
        ));
        assert!(matches!(
            save(Utf8Path::new("/tmp/catalog.txt"), &groups),
            Err(CatalogError::InvalidExtension(_))
        ));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_tmp, root) = temp_root();
        let path = root.join("Translations/main.json");
        let groups = vec![
            TranslationGroup::with_translations(
                "greeting",
                [
                    Translation::new("en", "Hello"),
                    Translation::new("fr", "Bonjour"),
                ],
            ),
            TranslationGroup::new("empty"),
        ];

        assert!(save(&path, &groups).unwrap());

        let file = TranslationFile::from_path(path).unwrap();
        let loaded = load(&file).unwrap();
        assert_eq!(loaded, groups);
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let (_tmp, root) = temp_root();
        let path = root.join("main.json");
        assert!(save(&path, &[]).unwrap());

        let names: Vec<String> = fs::read_dir(&root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["main.json".to_owned()]);
    }

    #[test]
    fn test_save_io_failure_is_false_not_error() {
        // A directory cannot be overwritten by a file rename.
        let (_tmp, root) = temp_root();
        let path = root.join("blocked.json");
        fs::create_dir(&path).unwrap();

        assert_eq!(save(&path, &[]).unwrap(), false);
    }

    #[test]
    fn test_saved_document_uses_interop_field_names() {
        let (_tmp, root) = temp_root();
        let path = root.join("main.json");
        let groups = vec![TranslationGroup::with_translations(
            "greeting",
            [Translation::new("en", "Hello")],
        )];
        assert!(save(&path, &groups).unwrap());

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"Name\""));
        assert!(raw.contains("\"LanguageCode\""));
        assert!(raw.contains("\"Text\""));
    }
}
