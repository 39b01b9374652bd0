//! Batch mode: transform every XML document under a directory.
//!
//! Documents are processed one at a time. A failing document is recorded
//! and skipped; it never aborts the run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::XML_EXTENSION;
use crate::error::{NormalizerError, Result};
use crate::output::{save, OutputFormat};
use crate::pipeline::{transform_file, TransformMode};
use crate::xml::ParseOptions;

/// Settings shared by every document of a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub parse: ParseOptions,
    pub mode: TransformMode,
    pub format: OutputFormat,
}

/// A document that could not be transformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, in processing order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of documents attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    /// Convert into an error if any document failed.
    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(NormalizerError::BatchFailed {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Find all `.xml` files below `dir`, sorted by path.
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(NormalizerError::InputNotFound(dir.to_path_buf()));
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| NormalizerError::Io(e.into()))?;
        let is_xml = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(XML_EXTENSION));
        if entry.file_type().is_file() && is_xml {
            documents.push(entry.into_path());
        }
    }

    Ok(documents)
}

/// Output path for `document`, mirroring its position below `input_root`.
pub fn output_path_for(
    document: &Path,
    input_root: &Path,
    output_root: &Path,
    format: OutputFormat,
) -> PathBuf {
    let relative = document.strip_prefix(input_root).unwrap_or(document);
    output_root
        .join(relative)
        .with_extension(format.extension())
}

/// Transform one document and save it below `output_root`.
pub fn process_document(
    document: &Path,
    input_root: &Path,
    output_root: &Path,
    options: &BatchOptions,
) -> Result<PathBuf> {
    let node = transform_file(document, &options.parse, options.mode)?;
    let target = output_path_for(document, input_root, output_root, options.format);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    save(&node, &target, options.format)
}

/// Transform `documents` one by one, calling `on_document` after each.
///
/// A document whose output path was already claimed in this run, such as
/// `x.XML` next to `x.xml`, is recorded as a failure and left untouched.
pub fn run_batch<F>(
    documents: &[PathBuf],
    input_root: &Path,
    output_root: &Path,
    options: &BatchOptions,
    mut on_document: F,
) -> BatchReport
where
    F: FnMut(&Path),
{
    let mut report = BatchReport::default();
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();

    for document in documents {
        let target = output_path_for(document, input_root, output_root, options.format);
        let outcome = match claimed.get(&target).copied() {
            Some(first) => Err(NormalizerError::InvalidOutput {
                path: target,
                reason: format!("already taken by {}", first.display()),
            }),
            None => {
                claimed.insert(target, document);
                process_document(document, input_root, output_root, options)
            }
        };

        match outcome {
            Ok(path) => report.written.push(path),
            Err(e) => {
                tracing::warn!(
                    path = %document.display(),
                    error = %e,
                    "Failed to transform document"
                );
                report.failures.push(BatchFailure {
                    path: document.clone(),
                    message: e.to_string(),
                });
            }
        }
        on_document(document);
    }

    tracing::debug!(
        written = report.written.len(),
        failed = report.failures.len(),
        "Batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_documents_recursive_and_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("118/hr")).unwrap();
        fs::write(dir.path().join("118/hr/b.xml"), "<bill/>").unwrap();
        fs::write(dir.path().join("118/hr/a.XML"), "<bill/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let documents = collect_documents(dir.path()).unwrap();
        let names: Vec<_> = documents
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.XML", "b.xml"]);
    }

    #[test]
    fn test_collect_documents_missing_dir() {
        let dir = tempdir().unwrap();
        let err = collect_documents(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, NormalizerError::InputNotFound(_)));
    }

    #[test]
    fn test_output_path_for_mirrors_layout() {
        let path = output_path_for(
            Path::new("in/118/hr/BILLS-118hr1ih.xml"),
            Path::new("in"),
            Path::new("out"),
            OutputFormat::Json,
        );
        assert_eq!(path, Path::new("out/118/hr/BILLS-118hr1ih.json"));
    }

    #[test]
    fn test_run_batch_rejects_output_clash() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(
            input.path().join("x.XML"),
            "<bill><legis-num>upper</legis-num></bill>",
        )
        .unwrap();
        fs::write(
            input.path().join("x.xml"),
            "<bill><legis-num>lower</legis-num></bill>",
        )
        .unwrap();

        let documents = collect_documents(input.path()).unwrap();
        let report = run_batch(
            &documents,
            input.path(),
            output.path(),
            &BatchOptions::default(),
            |_| {},
        );

        assert_eq!(report.written, vec![output.path().join("x.json")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, documents[1]);
        assert!(report.failures[0].message.contains("already taken by"));

        let saved = fs::read_to_string(output.path().join("x.json")).unwrap();
        assert!(saved.contains("upper"));
    }

    #[test]
    fn test_run_batch_records_failures() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(
            input.path().join("good.xml"),
            "<bill><legis-num>H. R. 1</legis-num></bill>",
        )
        .unwrap();
        fs::write(input.path().join("bad.xml"), "<bill>").unwrap();

        let documents = collect_documents(input.path()).unwrap();
        let mut seen = 0;
        let report = run_batch(
            &documents,
            input.path(),
            output.path(),
            &BatchOptions::default(),
            |_| seen += 1,
        );

        assert_eq!(seen, 2);
        assert_eq!(report.total(), 2);
        assert_eq!(report.written, vec![output.path().join("good.json")]);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("bad.xml"));

        let saved = fs::read_to_string(output.path().join("good.json")).unwrap();
        assert!(saved.contains("\"legisNum\": \"H. R. 1\""));

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, NormalizerError::BatchFailed { failed: 1, total: 2 }));
    }
}
