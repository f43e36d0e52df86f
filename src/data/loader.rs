//! Table loading and writing

use crate::error::{DomusError, Result};
use polars::prelude::*;
use std::path::Path;

/// Load a table, dispatching on the file extension (csv, json, parquet).
///
/// Any failure to open or parse the file surfaces as a dataset-unreadable
/// error carrying the offending path.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" => load_parquet(path),
        _ => Err(DomusError::DatasetUnreadable {
            path: path.display().to_string(),
            reason: format!("unsupported file format: {ext:?}"),
        }),
    }
}

/// Load a CSV file with header and schema inference
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| unreadable(path, e))
}

/// Load a JSON file
pub fn load_json(path: &Path) -> Result<DataFrame> {
    let file = std::fs::File::open(path).map_err(|e| unreadable(path, e))?;
    JsonReader::new(file).finish().map_err(|e| unreadable(path, e))
}

/// Load a Parquet file
pub fn load_parquet(path: &Path) -> Result<DataFrame> {
    let file = std::fs::File::open(path).map_err(|e| unreadable(path, e))?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| unreadable(path, e))
}

/// Write a table as CSV with header
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}

fn unreadable(path: &Path, err: impl std::fmt::Display) -> DomusError {
    DomusError::DatasetUnreadable {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
