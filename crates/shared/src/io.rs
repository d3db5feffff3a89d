use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::models::Document;

/// Read the input document. Invalid UTF-8 is replaced rather than rejected.
pub fn read_text_file(path: &Path) -> Result<Document, AppError> {
    if !path.is_file() {
        return Err(AppError::validation(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let bytes = fs::read(path).map_err(|e| {
        AppError::validation(format!("Failed to read {}: {}", path.display(), e))
    })?;

    Document::new(String::from_utf8_lossy(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_and_trims() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("article.txt");
        fs::write(&path, "\n\nThe ferry sails at noon.\n").unwrap();

        let doc = read_text_file(&path).unwrap();
        assert_eq!(doc.text(), "The ferry sails at noon.");
    }

    #[test]
    fn missing_file_is_validation_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let err = read_text_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().starts_with("File not found:"));
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let err = read_text_file(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("File not found:"));
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "   \n\t").unwrap();

        let err = read_text_file(&path).unwrap_err();
        assert_eq!(err.to_string(), "Input file is empty");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9 open").unwrap();

        let doc = read_text_file(&path).unwrap();
        assert_eq!(doc.text(), "caf\u{fffd} open");
    }
}
