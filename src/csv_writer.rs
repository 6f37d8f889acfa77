use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::log;

use crate::models::CsvRow;

/// The dated output file. Created fresh, header first, flushed per row.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl CsvSink {
    pub fn output_path(out_dir: &Path, date: NaiveDate) -> PathBuf {
        out_dir.join(format!("partidos_{}.csv", date.format("%Y-%m-%d")))
    }

    pub fn create(out_dir: &Path, date: NaiveDate) -> Result<CsvSink> {
        let path = CsvSink::output_path(out_dir, date);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_path(&path)
            .with_context(|| format!("[CSV] Could not create {}", path.display()))?;
        writer.write_record(CsvRow::HEADER)?;
        writer.flush()?;
        log::info!("[CSV] Writing {}", path.display());
        Ok(CsvSink { path, writer, rows: 0 })
    }

    pub fn write(&mut self, row: &CsvRow) -> Result<()> {
        self.writer.serialize(row)
            .with_context(|| format!("[CSV] Could not write row to {}", self.path.display()))?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        log::debug!("[CSV] Closed {} after {} rows", self.path.display(), self.rows);
        Ok(self.path)
    }
}
