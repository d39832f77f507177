//! Zip implementation of the bundle encoder

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{ArchiveEncoder, BundleWriter};
use crate::error::{BackupError, BackupResult};

/// Writes bundles as deflate-compressed zip archives
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipEncoder;

impl ArchiveEncoder for ZipEncoder {
    fn extension(&self) -> &str {
        "zip"
    }

    fn create(&self, destination: &Path) -> BackupResult<Box<dyn BundleWriter>> {
        let file = File::create(destination).map_err(|e| {
            BackupError::Archive(format!(
                "Failed to create {}: {}",
                destination.display(),
                e
            ))
        })?;

        Ok(Box::new(ZipBundleWriter {
            writer: ZipWriter::new(BufWriter::new(file)),
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644),
        }))
    }
}

struct ZipBundleWriter {
    writer: ZipWriter<BufWriter<File>>,
    options: SimpleFileOptions,
}

impl BundleWriter for ZipBundleWriter {
    fn add_file(&mut self, source: &Path, entry_name: &str) -> BackupResult<()> {
        let file = File::open(source).map_err(|e| {
            BackupError::Archive(format!("Failed to open {}: {}", source.display(), e))
        })?;

        self.writer.start_file(entry_name, self.options)?;
        io::copy(&mut BufReader::new(file), &mut self.writer).map_err(|e| {
            BackupError::Archive(format!("Failed to archive {}: {}", source.display(), e))
        })?;

        Ok(())
    }

    fn finish(self: Box<Self>) -> BackupResult<()> {
        let bundle = *self;
        let mut inner = bundle.writer.finish()?;
        inner
            .flush()
            .map_err(|e| BackupError::Archive(format!("Failed to flush bundle: {}", e)))?;
        inner
            .get_ref()
            .sync_all()
            .map_err(|e| BackupError::Archive(format!("Failed to sync bundle: {}", e)))?;
        Ok(())
    }
}
