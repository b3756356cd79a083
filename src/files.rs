//! Upload packing: logical project paths to multipart file parts.
//!
//! The service expects one part per file named `files[<logical-path>]`.
//! Field names go into part headers verbatim, so paths holding `"`, CR or LF
//! are rejected. Packing never touches the file system: local paths are
//! opened only when the multipart form is assembled, so a missing file
//! surfaces there as [`ApiError::Io`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use reqwest::Body;
use reqwest::multipart::Part;

use crate::error::ApiError;

/// Content source for one uploaded file.
#[derive(Debug)]
pub enum FileSource {
    /// Local file, opened as an async read stream at send time.
    Path(PathBuf),
    /// In-memory content.
    Bytes {
        /// File name reported in the part's `Content-Disposition`.
        file_name: Option<String>,
        /// File contents.
        data: Vec<u8>,
    },
    /// Caller-provided stream, used unchanged.
    Stream {
        /// File name reported in the part's `Content-Disposition`.
        file_name: Option<String>,
        /// Body stream (see `reqwest::Body::wrap_stream`).
        body: Body,
    },
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for FileSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for FileSource {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for FileSource {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes {
            file_name: None,
            data,
        }
    }
}

/// Files to upload, keyed by project-relative path.
///
/// Keys are unique; inserting an existing path replaces its source.
#[derive(Debug, Default)]
pub struct FileSet {
    files: BTreeMap<String, FileSource>,
}

impl FileSet {
    /// Empty file set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the file at `logical_path`.
    pub fn insert(&mut self, logical_path: impl Into<String>, source: impl Into<FileSource>) {
        self.files.insert(logical_path.into(), source.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, logical_path: impl Into<String>, source: impl Into<FileSource>) -> Self {
        self.insert(logical_path, source);
        self
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no files are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Logical paths in the set.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<FileSource>> FromIterator<(K, V)> for FileSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (path, source) in iter {
            set.insert(path, source);
        }
        set
    }
}

/// A named multipart file field awaiting assembly.
#[derive(Debug)]
pub struct FormFile {
    field_name: String,
    file_name: String,
    source: FileSource,
}

impl FormFile {
    /// File field with an explicit form name (e.g. `file` for glossary uploads).
    pub fn new(field_name: impl Into<String>, source: impl Into<FileSource>) -> Self {
        let source = source.into();
        let file_name = source_file_name(&source).unwrap_or_else(|| "upload".to_string());
        Self {
            field_name: field_name.into(),
            file_name,
            source,
        }
    }

    /// Form field name.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// File name sent in the part headers.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Content source.
    #[must_use]
    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Opens the source and turns it into a multipart part.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if a local file cannot be opened.
    pub async fn into_part(self) -> Result<(String, Part), ApiError> {
        let part = match self.source {
            FileSource::Path(path) => {
                let file = tokio::fs::File::open(&path)
                    .await
                    .map_err(|e| ApiError::io(path.clone(), e))?;
                Part::stream(Body::from(file))
            }
            FileSource::Bytes { data, .. } => Part::bytes(data),
            FileSource::Stream { body, .. } => Part::stream(body),
        };
        Ok((self.field_name, part.file_name(self.file_name)))
    }
}

/// Maps a file set to `files[<logical-path>]` form fields.
///
/// The part file name is the last segment of the logical path.
///
/// # Errors
///
/// Returns [`ApiError::InvalidFieldName`] if a logical path contains `"`,
/// CR or LF.
pub fn pack_files(files: FileSet) -> Result<Vec<FormFile>, ApiError> {
    files
        .files
        .into_iter()
        .map(|(logical_path, source)| {
            check_field_name(&logical_path)?;
            let file_name = logical_path
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .map(str::to_string)
                .or_else(|| source_file_name(&source))
                .unwrap_or_else(|| "upload".to_string());
            Ok(FormFile {
                field_name: format!("files[{logical_path}]"),
                file_name,
                source,
            })
        })
        .collect()
}

/// Rejects names that would break a `Content-Disposition` header.
pub(crate) fn check_field_name(name: &str) -> Result<(), ApiError> {
    if name.contains(HEADER_BREAKING) {
        return Err(ApiError::InvalidFieldName(name.to_string()));
    }
    Ok(())
}

const HEADER_BREAKING: [char; 3] = ['"', '\r', '\n'];

fn source_file_name(source: &FileSource) -> Option<String> {
    match source {
        FileSource::Path(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().replace(HEADER_BREAKING, "_")),
        FileSource::Bytes { file_name, .. } | FileSource::Stream { file_name, .. } => file_name
            .as_deref()
            .map(|name| name.replace(HEADER_BREAKING, "_")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pack_single_file_uses_bracketed_field_name() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("source.txt");
        std::fs::write(&local, b"hello strings").unwrap();

        let packed = pack_files(FileSet::new().with("a/b.txt", local.clone())).unwrap();

        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0].field_name(), "files[a/b.txt]");
        assert_eq!(packed[0].file_name(), "b.txt");
        match packed[0].source() {
            FileSource::Path(path) => {
                assert_eq!(std::fs::read(path).unwrap(), b"hello strings");
            }
            other => panic!("Expected path source, got: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_logical_path_keeps_last_source() {
        let mut set = FileSet::new();
        set.insert("strings.xml", "/first/strings.xml");
        set.insert("strings.xml", "/second/strings.xml");
        assert_eq!(set.len(), 1);

        let packed = pack_files(set).unwrap();
        match packed[0].source() {
            FileSource::Path(path) => assert_eq!(path, Path::new("/second/strings.xml")),
            other => panic!("Expected path source, got: {other:?}"),
        }
    }

    #[test]
    fn test_pack_does_not_check_existence() {
        let packed =
            pack_files(FileSet::new().with("missing.po", "/definitely/not/here.po")).unwrap();
        assert_eq!(packed.len(), 1);
        assert_eq!(packed[0].field_name(), "files[missing.po]");
    }

    #[test]
    fn test_into_part_reports_missing_file_as_io() {
        let packed =
            pack_files(FileSet::new().with("missing.po", "/definitely/not/here.po")).unwrap();
        let form_file = packed.into_iter().next().unwrap();
        let result = tokio_test::block_on(form_file.into_part());
        assert!(matches!(result, Err(ApiError::Io { .. })));
    }

    #[test]
    fn test_form_file_uses_source_file_name() {
        let file = FormFile::new("file", PathBuf::from("/tmp/glossary.tbx"));
        assert_eq!(file.field_name(), "file");
        assert_eq!(file.file_name(), "glossary.tbx");

        let bytes = FormFile::new(
            "file",
            FileSource::Bytes {
                file_name: Some("memory.tmx".to_string()),
                data: b"<tmx/>".to_vec(),
            },
        );
        assert_eq!(bytes.file_name(), "memory.tmx");
    }

    #[test]
    fn test_pack_rejects_header_breaking_paths() {
        for bad in ["a\"b.po", "de/x\r\ny.po", "line\nbreak.po"] {
            let result = pack_files(FileSet::new().with(bad, "/x/a.po"));
            match result {
                Err(ApiError::InvalidFieldName(name)) => assert_eq!(name, bad),
                other => panic!("Expected InvalidFieldName for {bad:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn test_source_file_name_is_sanitized() {
        let file = FormFile::new(
            "file",
            FileSource::Bytes {
                file_name: Some("evil\"\r\nname.tbx".to_string()),
                data: Vec::new(),
            },
        );
        assert_eq!(file.file_name(), "evil___name.tbx");
    }

    #[test]
    fn test_file_set_from_iterator() {
        let set: FileSet = [("de/a.po", "/x/a.po"), ("de/b.po", "/x/b.po")]
            .into_iter()
            .collect();
        let paths: Vec<&str> = set.paths().collect();
        assert_eq!(paths, vec!["de/a.po", "de/b.po"]);
    }
}
