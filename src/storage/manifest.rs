//! JSONL manifest that persists the artifact registry between runs.
//!
//! Each save appends one line, so separate `texreport` invocations build up
//! a single emission order that `consolidate` can replay.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::registry::ArtifactRegistry;
use super::store::SaveOutcome;
use crate::TexError;

/// One registered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    /// RFC 3339 timestamp of registration.
    pub recorded_at: String,
    /// Whether the artifact file was actually written.
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_sha256: Option<String>,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, content: Option<&str>) -> Self {
        let recorded_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        ManifestEntry {
            name: name.into(),
            recorded_at,
            written: content.is_some(),
            content_sha256: content.map(|c| crate::sha256_hex(c.as_bytes())),
        }
    }

    /// Entry for a save call, hashing the file when it was written.
    pub fn from_outcome(name: impl Into<String>, outcome: &SaveOutcome) -> Self {
        let content = match outcome {
            SaveOutcome::Written(path) => std::fs::read_to_string(path).ok(),
            SaveOutcome::Skipped { .. } => None,
        };
        let mut entry = ManifestEntry::new(name, content.as_deref());
        entry.written = outcome.is_written();
        entry
    }
}

/// JSONL reader/writer for [`ManifestEntry`] lines.
#[derive(Debug, Clone)]
pub struct RegistryManifest {
    path: PathBuf,
}

impl RegistryManifest {
    pub fn new(path: impl AsRef<Path>) -> Self {
        RegistryManifest { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one entry, creating the manifest and its directory if needed.
    pub fn append(&self, entry: &ManifestEntry) -> Result<(), TexError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| TexError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TexError::Message(format!("failed to open manifest: {e}")))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| TexError::Message(format!("failed to serialize entry: {e}")))?;

        writeln!(file, "{}", json)
            .map_err(|e| TexError::Message(format!("failed to write entry: {e}")))?;

        Ok(())
    }

    /// Read all entries in file order. A missing manifest reads as empty.
    pub fn read_all(&self) -> Result<Vec<ManifestEntry>, TexError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .map_err(|e| TexError::Message(format!("failed to open manifest: {e}")))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| {
                TexError::Message(format!("failed to read line {}: {e}", line_num + 1))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: ManifestEntry = serde_json::from_str(&line).map_err(|e| {
                TexError::Message(format!("failed to parse line {}: {e}", line_num + 1))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    pub fn load_registry(&self) -> Result<ArtifactRegistry, TexError> {
        Ok(self.read_all()?.into_iter().map(|e| e.name).collect())
    }

    /// Delete the manifest, starting a fresh emission order.
    pub fn reset(&self) -> Result<(), TexError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TexError::Message(format!("failed to remove manifest: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_digest_only_when_written() {
        let written = ManifestEntry::new("a", Some("content"));
        assert!(written.written);
        assert_eq!(written.content_sha256.as_deref(), Some(sha256::digest("content").as_str()));

        let skipped = ManifestEntry::new("b", None);
        assert!(!skipped.written);
        assert!(skipped.content_sha256.is_none());
    }

    #[test]
    fn test_append_read_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = RegistryManifest::new(dir.path().join("nested").join("order.jsonl"));

        assert!(manifest.load_registry().unwrap().is_empty());

        manifest.append(&ManifestEntry::new("first", Some("x"))).unwrap();
        manifest.append(&ManifestEntry::new("second", None)).unwrap();
        manifest.append(&ManifestEntry::new("first", Some("y"))).unwrap();

        let registry = manifest.load_registry().unwrap();
        assert_eq!(registry.names(), ["first", "second", "first"]);

        manifest.reset().unwrap();
        assert!(!manifest.exists());
        manifest.reset().unwrap();
    }
}
