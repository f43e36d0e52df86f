//! Reference dataset preparation
//!
//! Builds the cleaned reference dataset from the raw housing CSV: selects
//! and renames the fixed column set, drops incomplete rows, and writes the
//! result.

use crate::data::loader;
use crate::error::Result;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Raw column name to cleaned column name, in output order
pub const COLUMN_MAPPING: [(&str, &str); 6] = [
    ("Gr Liv Area", "GrLivArea"),
    ("Bedroom AbvGr", "BedroomAbvGr"),
    ("Full Bath", "FullBath"),
    ("Year Built", "YearBuilt"),
    ("Total Bsmt SF", "TotalBsmtSF"),
    ("SalePrice", "SalePrice"),
];

/// Row counts before and after cleaning
#[derive(Debug, Clone, Copy)]
pub struct PrepareOutcome {
    pub rows_before: usize,
    pub rows_after: usize,
    pub mean_sale_price: f64,
}

/// Prepare the cleaned reference dataset.
///
/// Reads the raw CSV, keeps only the mapped columns under their cleaned
/// names, removes every row with a missing value in any of them, and
/// writes the cleaned CSV to `output`.
pub fn prepare(source: &Path, output: &Path) -> Result<PrepareOutcome> {
    let raw = loader::load_table(source)?;
    let rows_before = raw.height();

    let originals: Vec<&str> = COLUMN_MAPPING.iter().map(|(from, _)| *from).collect();
    let mut df = raw.select(originals)?;
    for (from, to) in COLUMN_MAPPING {
        df.rename(from, to)?;
    }

    let mut cleaned = drop_incomplete_rows(&df)?;
    let mean_sale_price = cleaned
        .column("SalePrice")?
        .mean()
        .unwrap_or(0.0);

    loader::write_csv(&mut cleaned, output)?;

    info!(
        rows_before,
        rows_after = cleaned.height(),
        output = %output.display(),
        "reference dataset prepared"
    );

    Ok(PrepareOutcome {
        rows_before,
        rows_after: cleaned.height(),
        mean_sale_price,
    })
}

/// Keep only rows where every column is non-null
fn drop_incomplete_rows(df: &DataFrame) -> Result<DataFrame> {
    let mut mask: Option<BooleanChunked> = None;
    for column in df.get_columns() {
        let not_null = column.is_not_null();
        mask = Some(match mask {
            Some(m) => &m & &not_null,
            None => not_null,
        });
    }

    match mask {
        Some(m) => Ok(df.filter(&m)?),
        None => Ok(df.clone()),
    }
}
