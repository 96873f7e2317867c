use crate::comparison::Comparison;
use crate::error::ExportError;
use lever_core::format::signed_percent;
use lever_core::{KpiId, KpiResult};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize, Deserialize)]
struct CsvLine {
    #[serde(rename = "KPI")]
    kpi: String,
    #[serde(rename = "Baseline")]
    baseline: String,
    #[serde(rename = "Scenario")]
    scenario: String,
    #[serde(rename = "Change")]
    change: String,
}

/// A parsed export line. `N/A` cells come back as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRecord {
    pub kpi: KpiId,
    pub baseline: Option<f64>,
    pub scenario: Option<f64>,
    pub change_percent: Option<f64>,
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v + 0.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `KPI,Baseline,Scenario,Change`, one line per KPI.
pub fn write_comparison_csv<W: io::Write>(
    comparison: &Comparison,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in comparison.rows() {
        wtr.serialize(CsvLine {
            kpi: row.kpi.name().to_string(),
            baseline: cell(row.baseline.ok()),
            scenario: cell(row.scenario.ok()),
            change: row
                .change_percent
                .map(signed_percent)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn comparison_csv_string(comparison: &Comparison) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_comparison_csv(comparison, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn save_comparison_csv(
    comparison: &Comparison,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_comparison_csv(comparison, io::BufWriter::new(file))
}

fn parse_cell(raw: &str, row: usize, column: &str) -> Result<Option<f64>, ExportError> {
    let raw = raw.trim();
    if raw == NOT_AVAILABLE {
        return Ok(None);
    }
    let number = raw.strip_suffix('%').unwrap_or(raw);
    number
        .parse::<f64>()
        .map(Some)
        .map_err(|e| ExportError::Malformed {
            row,
            message: format!("{column} `{raw}`: {e}"),
        })
}

/// Parses a file written by [`write_comparison_csv`].
pub fn read_comparison_csv<R: io::Read>(reader: R) -> Result<Vec<CsvRecord>, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (i, line) in rdr.deserialize::<CsvLine>().enumerate() {
        let line = line?;
        let row = i + 1;
        let kpi = line.kpi.parse::<KpiId>().map_err(|e| ExportError::Malformed {
            row,
            message: e.to_string(),
        })?;
        records.push(CsvRecord {
            kpi,
            baseline: parse_cell(&line.baseline, row, "Baseline")?,
            scenario: parse_cell(&line.scenario, row, "Scenario")?,
            change_percent: parse_cell(&line.change, row, "Change")?,
        });
    }
    Ok(records)
}

/// `step` followed by one column per KPI of the result's model. A failed KPI
/// fills its column with `N/A`.
pub fn write_series_csv<W: io::Write>(result: &KpiResult, writer: W) -> Result<(), ExportError> {
    let kpis = result.model.kpis();
    let columns: Vec<Option<&[f64]>> = kpis.iter().map(|k| result.series(*k).ok()).collect();
    let steps = columns.iter().flatten().map(|s| s.len()).max().unwrap_or(0);

    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec!["step".to_string()];
    header.extend(kpis.iter().map(|k| k.name().to_string()));
    wtr.write_record(&header)?;

    for step in 0..steps {
        let mut record = vec![step.to_string()];
        for column in &columns {
            record.push(match column.and_then(|s| s.get(step)) {
                Some(v) => v.to_string(),
                None => NOT_AVAILABLE.to_string(),
            });
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
