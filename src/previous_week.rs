use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Header of the column holding dish names, matching the exported `menu.csv`.
pub const DISH_COL: &str = "Dish";

/// Reads last week's menu CSV and returns its dish names in file order.
pub fn load_previous_week_dishes(csv_path: &Path) -> Result<Vec<String>> {
    if !csv_path.exists() {
        return Err(anyhow!("Previous week file not found at: {:?}", csv_path));
    }
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open previous week file at {:?}", csv_path))?;
    read_previous_week_dishes(file)
        .with_context(|| format!("Failed to read previous week menu from {:?}", csv_path))
}

/// Like [`load_previous_week_dishes`], but a bad upload only costs the exclusions:
/// the error is logged and reported to the user, and an empty list is returned.
pub fn load_or_empty(csv_path: &Path) -> Vec<String> {
    match load_previous_week_dishes(csv_path) {
        Ok(dishes) => {
            info!(count = dishes.len(), "loaded previous week dishes");
            dishes
        }
        Err(e) => {
            warn!(error = %format!("{:#}", e), "ignoring previous week upload");
            eprintln!(
                "Could not read previous week's menu ({:#}); continuing without exclusions.",
                e
            );
            Vec::new()
        }
    }
}

pub fn read_previous_week_dishes<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let dish_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(DISH_COL))
        .ok_or_else(|| anyhow!("Column '{}' not found", DISH_COL))?;

    let mut dishes = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        match record.get(dish_idx) {
            Some(dish) if !dish.is_empty() => dishes.push(dish.to_string()),
            _ => continue,
        }
    }
    Ok(dishes)
}
