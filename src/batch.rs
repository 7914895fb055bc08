//! Batch processing of input directories.
//!
//! Every document is processed inside its own failure boundary: a file
//! that cannot be read still yields a record (the fallback document) and
//! never stops the batch.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{file_stem, Document};
use crate::render::{to_json, JsonFormat};
use crate::source::SourceRegistry;
use crate::structure::OutlineExtractor;

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,

    /// JSON layout of written records
    pub format: JsonFormat,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Pretty,
        }
    }
}

/// Outcome for one input file.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Input path
    pub path: PathBuf,

    /// Inferred document (the fallback document if reading failed)
    pub document: Document,

    /// Read error, if any
    pub error: Option<String>,
}

impl BatchItem {
    /// Whether the input was read successfully.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Output file name: the input stem with a `.json` extension.
    pub fn output_name(&self) -> String {
        format!("{}.json", file_stem(&self.path))
    }
}

/// Runs the outline pipeline over many files.
pub struct BatchRunner {
    extractor: OutlineExtractor,
    registry: SourceRegistry,
    options: BatchOptions,
}

impl BatchRunner {
    /// Create a runner with the default sources.
    pub fn new(extractor: OutlineExtractor) -> Self {
        Self {
            extractor,
            registry: SourceRegistry::with_defaults(),
            options: BatchOptions::default(),
        }
    }

    /// Use a custom source registry.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set batch options.
    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// The batch options in use.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Recognized input files directly inside `dir`, sorted by path.
    pub fn collect_inputs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(Error::InputNotFound(dir.to_path_buf()));
        }
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && self.registry.supports_path(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Process one file. Never fails.
    pub fn process_file(&self, path: &Path) -> BatchItem {
        let stem = file_stem(path);
        match self.registry.read(path) {
            Ok(spans) => BatchItem {
                path: path.to_path_buf(),
                document: self.extractor.extract(&spans, &stem),
                error: None,
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                BatchItem {
                    path: path.to_path_buf(),
                    document: Document::fallback(&stem),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Process files, returning results in input order.
    pub fn process_paths(&self, paths: &[PathBuf]) -> Vec<BatchItem> {
        self.process_paths_with(paths, |_| {})
    }

    /// Process files, calling `on_done` as each one finishes.
    pub fn process_paths_with<F>(&self, paths: &[PathBuf], on_done: F) -> Vec<BatchItem>
    where
        F: Fn(&BatchItem) + Sync,
    {
        let run = |path: &PathBuf| {
            let item = self.process_file(path);
            on_done(&item);
            item
        };
        if self.options.parallel {
            paths.par_iter().map(run).collect()
        } else {
            paths.iter().map(run).collect()
        }
    }

    /// Process every recognized file in a directory.
    pub fn process_dir(&self, dir: &Path) -> Result<Vec<BatchItem>> {
        let paths = self.collect_inputs(dir)?;
        log::info!("Processing {} files from {}", paths.len(), dir.display());
        Ok(self.process_paths(&paths))
    }

    /// Write one record as `<stem>.json` into `out_dir`.
    pub fn write_record(&self, item: &BatchItem, out_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(out_dir)?;
        let out_path = out_dir.join(item.output_name());
        fs::write(&out_path, to_json(&item.document, self.options.format)?)?;
        Ok(out_path)
    }

    /// Write all records, returning the written paths.
    pub fn write_records(&self, items: &[BatchItem], out_dir: &Path) -> Result<Vec<PathBuf>> {
        items
            .iter()
            .map(|item| self.write_record(item, out_dir))
            .collect()
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(OutlineExtractor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_options_builder() {
        let options = BatchOptions::new().sequential().with_format(JsonFormat::Compact);
        assert!(!options.parallel);
        assert_eq!(options.format, JsonFormat::Compact);
        assert!(BatchOptions::default().parallel);
    }

    #[test]
    fn test_output_name() {
        let item = BatchItem {
            path: PathBuf::from("/in/file03.pdf"),
            document: Document::fallback("file03"),
            error: None,
        };
        assert_eq!(item.output_name(), "file03.json");
        assert!(item.is_ok());
    }

    #[test]
    fn test_missing_input_dir() {
        let runner = BatchRunner::default();
        let result = runner.process_dir(Path::new("/no/such/input/dir"));
        assert!(matches!(result, Err(Error::InputNotFound(_))));
    }

    #[test]
    fn test_unreadable_file_yields_fallback() {
        let runner = BatchRunner::default();
        let item = runner.process_file(Path::new("/no/such/file07.pdf"));
        assert!(!item.is_ok());
        assert_eq!(item.document, Document::fallback("file07"));
    }
}
