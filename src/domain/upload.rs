// Uploaded data file metadata
use serde::{Deserialize, Serialize};

pub const ALLOWED_EXTENSIONS: [&str; 5] = ["csv", "json", "xls", "xlsx", "zip"];
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload CSV, JSON, XLS, or ZIP files only.")]
    InvalidFileType(String),

    #[error("File size must be less than {}.", size_label(.limit))]
    FileTooLarge { size: u64, limit: u64 },
}

/// The analysis never reads file contents; only the metadata is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

impl UploadedFile {
    pub fn validate(name: &str, size: u64, max_bytes: u64) -> Result<Self, UploadError> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::InvalidFileType(name.to_string()));
        }

        if size > max_bytes {
            return Err(UploadError::FileTooLarge {
                size,
                limit: max_bytes,
            });
        }

        Ok(Self {
            name: name.to_string(),
            size,
        })
    }
}

/// Human-readable size, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let rounded = (scaled * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[unit])
}

fn size_label(bytes: &u64) -> String {
    format_file_size(*bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_extensions() {
        for name in ["data.csv", "DATA.JSON", "a.b.xlsx", "bundle.zip", "sheet.xls"] {
            assert!(UploadedFile::validate(name, 10, DEFAULT_MAX_UPLOAD_BYTES).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_rejects_unknown_extension() {
        assert_eq!(
            UploadedFile::validate("readings.txt", 10, DEFAULT_MAX_UPLOAD_BYTES),
            Err(UploadError::InvalidFileType("readings.txt".to_string()))
        );
        assert!(UploadedFile::validate("csv", 10, DEFAULT_MAX_UPLOAD_BYTES).is_err());
    }

    #[test]
    fn test_rejects_oversized() {
        let err = UploadedFile::validate("big.csv", DEFAULT_MAX_UPLOAD_BYTES + 1, DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 50 MB.");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
