//! Sinks for classification results: CSV file or plain stdout.

use anyhow::Result;
use std::fs::File;
use std::path::Path;

use crate::types::ClassificationResult;

const CSV_HEADER: [&str; 5] = ["address", "name", "totalSupply", "maxSupply", "confidence (1-3)"];

/// Consumes classification records. Opened once before the pipeline loop,
/// closed once after; there are no concurrent writers.
pub trait ResultSink {
    fn write(&mut self, result: &ClassificationResult) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Creates the file and writes the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(CSV_HEADER)?;
        Ok(Self { writer })
    }
}

impl ResultSink for CsvSink {
    fn write(&mut self, result: &ClassificationResult) -> Result<()> {
        let max_supply = result
            .max_supply
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        self.writer.write_record(&[
            result.address.clone(),
            result.name.clone(),
            result.total_supply.to_string(),
            max_supply,
            result.confidence.to_string(),
        ])?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Prints one line per usable contract.
pub struct StdoutSink;

impl ResultSink for StdoutSink {
    fn write(&mut self, result: &ClassificationResult) -> Result<()> {
        let max_supply = result
            .max_supply
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{} (NAME: {}) totalSupply={} maxSupply={} confidence={}",
            result.address, result.name, result.total_supply, max_supply, result.confidence
        );
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
