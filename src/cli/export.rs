use std::path::PathBuf;

use crate::error::Result;
use crate::rewards;
use crate::settings::get_data_dir;

fn default_path() -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    get_data_dir().join("exports").join(format!("rewards-{date}.csv"))
}

/// Write the rewards table as CSV: header row matches the rendered
/// table columns, one record per customer, absent month cells as 0.
pub fn rewards(
    file: Option<String>,
    format: Option<String>,
    year: Option<i32>,
    output: Option<String>,
) -> Result<()> {
    let transactions = super::load_transactions(&file, format.as_deref(), year)?;
    let data = rewards::build_table(&transactions);

    let path = output.map(PathBuf::from).unwrap_or_else(default_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(&data.columns)?;
    for row in &data.rows {
        let mut record = vec![row.user_id.clone(), row.name.clone()];
        for month in &data.months {
            record.push(row.points_for(month).to_string());
        }
        record.push(row.total.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!("Wrote {}", path.display());
    Ok(())
}
