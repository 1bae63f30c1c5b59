use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::calculator::{SODIUM_RATIO_DECIMALS, round_to};
use crate::error::Result;
use crate::interface::render::{ComparisonRow, suitability_label};
use crate::models::{ConditionReport, Nutrient};

/// Failed nutrients of a condition, e.g. "Phosphorus high; Protein high".
fn failure_summary(report: &ConditionReport) -> String {
    report
        .failures()
        .filter_map(|v| v.reason.map(|r| format!("{} {}", v.nutrient, r)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Write dry-matter values and verdicts for each food to a CSV file.
pub fn write_csv(rows: &[ComparisonRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["food".to_string()];
    header.extend(Nutrient::ALL.iter().map(|n| format!("dm_{}_pc", n.key())));
    header.extend(
        [
            "kcal_per_dm_gram",
            "dm_reference_weight",
            "pancreatitis",
            "pancreatitis_failures",
            "renal",
            "renal_failures",
        ]
        .map(String::from),
    );
    wtr.write_record(&header)?;

    for row in rows {
        let dm = &row.dry_matter;
        let mut record = vec![dm.name.clone()];
        record.extend(Nutrient::ALL.iter().map(|&n| format!("{:.3}", dm.value(n))));
        record.push(format!("{:.3}", dm.kcal_per_gram));
        record.push(format!("{:.3}", dm.reference_weight));
        record.push(suitability_label(&row.report.pancreatitis).to_string());
        record.push(failure_summary(&row.report.pancreatitis));
        record.push(suitability_label(&row.report.renal).to_string());
        record.push(failure_summary(&row.report.renal));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    info!(path = %path.display(), foods = rows.len(), "wrote CSV");
    Ok(())
}

/// Write the full dry-matter results and verdicts to a JSON file.
pub fn write_report_json(rows: &[ComparisonRow], path: &Path) -> Result<()> {
    let entries: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let sodium_ratio = row
                .report
                .renal
                .verdicts
                .iter()
                .find(|v| v.nutrient == Nutrient::Sodium)
                .map(|v| round_to(v.value, SODIUM_RATIO_DECIMALS));

            serde_json::json!({
                "dry_matter": row.dry_matter,
                "sodium_g_per_kcal": sodium_ratio,
                "suitability": {
                    "pancreatitis": {
                        "suitable": row.report.pancreatitis.is_suitable(),
                        "verdicts": row.report.pancreatitis.verdicts,
                    },
                    "renal": {
                        "suitable": row.report.renal.is_suitable(),
                        "verdicts": row.report.renal.verdicts,
                    },
                },
            })
        })
        .collect();
    let json = serde_json::Value::Array(entries);

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    info!(path = %path.display(), foods = rows.len(), "wrote JSON report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{convert, evaluate};
    use crate::models::RawMeasurement;
    use crate::params::ParameterStore;
    use tempfile::NamedTempFile;

    fn example_row() -> ComparisonRow {
        let dry_matter = convert(&RawMeasurement::example()).unwrap();
        let report = evaluate(&dry_matter, &ParameterStore::new());
        ComparisonRow { dry_matter, report }
    }

    #[test]
    fn test_write_csv() {
        let file = NamedTempFile::new().unwrap();
        write_csv(&[example_row()], file.path()).unwrap();

        let mut rdr = csv::Reader::from_path(file.path()).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "food");
        assert_eq!(headers.len(), 1 + Nutrient::COUNT + 6);

        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(&record[0], "Example Scrumptious Food");
        let renal_idx = headers.iter().position(|h| h == "renal").unwrap();
        assert_eq!(&record[renal_idx], "unsuitable");
        assert!(record[renal_idx + 1].contains("Phosphorus high"));
    }

    #[test]
    fn test_write_report_json() {
        let file = NamedTempFile::new().unwrap();
        write_report_json(&[example_row()], file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json[0]["suitability"]["pancreatitis"]["suitable"], true);
        assert_eq!(json[0]["suitability"]["renal"]["suitable"], false);
        assert_eq!(json[0]["dry_matter"]["kcal_per_gram"], 3.913);
        assert_eq!(json[0]["sodium_g_per_kcal"], 0.000667);
    }
}
