//! Rendering and saving transformed trees.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{NormalizerError, Result};
use crate::node::Node;

/// Serialization format for transformed documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON with two-space indentation.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// File extension used for batch output.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Render a tree as text. Key order follows the tree's insertion order.
pub fn render(node: &Node, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(node)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(node)?,
    };
    Ok(text)
}

/// Save a tree to `path`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// The parent directory must already exist.
///
/// # Returns
/// Path to the saved file
pub fn save(node: &Node, path: &Path, format: OutputFormat) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| NormalizerError::InvalidOutput {
            path: path.to_path_buf(),
            reason: "no file name".to_string(),
        })?
        .to_string_lossy()
        .into_owned();

    if path.is_dir() {
        return Err(NormalizerError::InvalidOutput {
            path: path.to_path_buf(),
            reason: "is a directory".to_string(),
        });
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(NormalizerError::InvalidOutput {
            path: path.to_path_buf(),
            reason: format!("directory {} does not exist", parent.display()),
        });
    }

    // Render fully before touching the filesystem
    let content = render(node, format)?;
    let temp_file = parent.join(format!(".{file_name}.tmp"));

    write_atomically(&temp_file, path, |file| file.write_all(content.as_bytes()))?;
    tracing::info!(path = %path.display(), "Saved transformed document");

    Ok(path.to_path_buf())
}

/// Write `temp_file` with `write`, sync it and rename it over `path`.
///
/// The temp file is removed if any step fails.
fn write_atomically<F>(temp_file: &Path, path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let written = File::create(temp_file).and_then(|mut file| {
        write(&mut file)?;
        file.sync_all()
    });
    if let Err(e) = written {
        discard_temp(temp_file);
        return Err(e);
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            discard_temp(temp_file);
            return Err(e);
        }
    }

    fs::rename(temp_file, path).inspect_err(|_| discard_temp(temp_file))
}

fn discard_temp(temp_file: &Path) {
    if let Err(e) = fs::remove_file(temp_file) {
        tracing::warn!(path = %temp_file.display(), error = %e, "Failed to remove temp file");
    }
}
