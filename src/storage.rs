use crate::models::{RenderRequest, Row};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde_json::{Number, Value};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read a render request from a JSON file, or from stdin when `path` is `-`.
pub fn load_request_json<P: AsRef<Path>>(path: P) -> Result<RenderRequest> {
    let path = path.as_ref();
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("reading request from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("opening {}", path.display()))?
            .read_to_string(&mut raw)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    serde_json::from_str(&raw).with_context(|| format!("parsing request {}", path.display()))
}

/// Load rows from a CSV with a header line.
///
/// Numeric cells become JSON numbers, empty cells become `null`, everything else stays a string.
pub fn load_rows_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.with_context(|| format!("reading {}", path.display()))?;
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, cell)| (h, cell_value(cell)))
                .collect(),
        );
    }
    Ok(rows)
}

fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    match cell.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}

/// Write PNG bytes to disk.
pub fn save_png<P: AsRef<Path>>(png: &[u8], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    f.write_all(png)?;
    Ok(())
}
