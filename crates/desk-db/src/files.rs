//! Upload storage on the local filesystem.
//!
//! Stored names are `<32 hex chars>-<sanitized original name>`, so two uploads
//! of the same document never collide and no client-supplied path component
//! reaches the filesystem.

use std::io;
use std::path::{Path, PathBuf};

use desk_core::errors::ValidationErrors;
use desk_config::UploadsConfig;

/// Accepted extensions and the MIME types each may arrive with.
const ALLOWED_TYPES: &[(&str, &[&str])] = &[
    ("pdf", &["application/pdf"]),
    ("doc", &["application/msword"]),
    (
        "docx",
        &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
    ),
    ("xls", &["application/vnd.ms-excel"]),
    (
        "xlsx",
        &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
    ),
    ("csv", &["text/csv", "application/csv", "application/vnd.ms-excel"]),
];

const MAX_STORED_NAME_CHARS: usize = 120;

/// A file as received from the client, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Where an accepted file landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    max_file_bytes: u64,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, max_file_bytes: u64) -> Self {
        Self {
            dir: dir.into(),
            max_file_bytes,
        }
    }

    #[must_use]
    pub fn from_config(config: &UploadsConfig) -> Self {
        Self::new(&config.dir, config.max_file_bytes)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub const fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    /// Record every rule `file` breaks under the `file` field.
    pub fn check(&self, file: Option<&UploadedFile>, errors: &mut ValidationErrors) {
        let Some(file) = file else {
            errors.push("file", "is required");
            return;
        };
        if !is_allowed_type(&file.original_name, &file.content_type) {
            errors.push("file", "must be a PDF, DOC, DOCX, XLS, XLSX or CSV file");
        }
        if file.bytes.len() as u64 > self.max_file_bytes {
            errors.push(
                "file",
                format!("must be at most {} bytes", self.max_file_bytes),
            );
        }
    }

    /// Write `file` under the upload directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory or file cannot be written.
    pub async fn save(&self, file: &UploadedFile) -> io::Result<StoredFile> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut prefix = [0u8; 16];
        getrandom::fill(&mut prefix)
            .map_err(|e| io::Error::other(format!("failed to generate file prefix: {e}")))?;
        let prefix: String = prefix.iter().map(|b| format!("{b:02x}")).collect();

        let filename = format!("{prefix}-{}", sanitize_filename(&file.original_name));
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, &file.bytes).await?;

        Ok(StoredFile {
            filename,
            path,
            size: file.bytes.len() as u64,
        })
    }

    /// Delete a stored file. A file that is already gone counts as removed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error for anything other than `NotFound`.
    pub async fn remove(&self, path: &Path) -> io::Result<()> {
        match tokio::fs::remove_file(path).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// MIME essence: parameters stripped, lowercased.
fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Both the extension and the declared MIME type must be on the allow-list,
/// and they must agree with each other.
#[must_use]
pub fn is_allowed_type(original_name: &str, content_type: &str) -> bool {
    let Some(ext) = extension(original_name) else {
        return false;
    };
    let mime = mime_essence(content_type);
    ALLOWED_TYPES
        .iter()
        .any(|(allowed_ext, mimes)| *allowed_ext == ext && mimes.contains(&mime.as_str()))
}

/// Reduce a client-supplied name to a safe final path component.
#[must_use]
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return "upload".to_string();
    }

    let char_count = cleaned.chars().count();
    if char_count <= MAX_STORED_NAME_CHARS {
        return cleaned.to_string();
    }
    // Keep the tail so the extension survives truncation.
    cleaned.chars().skip(char_count - MAX_STORED_NAME_CHARS).collect()
}
