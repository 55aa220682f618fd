use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

use crate::domain::Ingredient;

// Expected column headers
const NAME_COL: &str = "Name";
const HEALTH_BENEFIT_COL: &str = "Health benefit";
const KEY_COL: &str = "key";
const MESSAGE_COL: &str = "message";

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", name))
}

fn open_reader(csv_path: &Path, what: &str) -> Result<csv::Reader<std::fs::File>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("{} CSV file not found at: {:?}", what, csv_path));
    }
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open {} CSV file at {:?}", what, csv_path))?;
    Ok(ReaderBuilder::new().has_headers(true).from_reader(file))
}

/// Reads reference ingredients from a CSV with `Name` and an optional
/// `Health benefit` column. Rows with a blank name are skipped.
pub fn load_ingredient_catalog(csv_path: &Path) -> Result<Vec<Ingredient>> {
    let mut rdr = open_reader(csv_path, "Ingredient")?;
    let headers = rdr.headers()?.clone();

    // Name is mandatory, the benefit column may be missing entirely
    let name_idx = column(&headers, NAME_COL)?;
    let benefit_idx = column(&headers, HEALTH_BENEFIT_COL).ok();

    let mut ingredients = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let name = record.get(name_idx).unwrap_or_default().trim().to_string();
        if name.is_empty() {
            tracing::warn!(row = row_index + 1, "skipping ingredient row with empty name");
            continue;
        }

        // Blank cells count as no benefit
        let health_benefit = benefit_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        ingredients.push(Ingredient::unresolved(name, health_benefit));
    }

    Ok(ingredients)
}

/// Reads `key,message` pairs overriding the built-in message templates.
pub fn load_message_overrides(csv_path: &Path) -> Result<Vec<(String, String)>> {
    let mut rdr = open_reader(csv_path, "Message")?;
    let headers = rdr.headers()?.clone();
    let key_idx = column(&headers, KEY_COL)?;
    let message_idx = column(&headers, MESSAGE_COL)?;

    let mut overrides = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let key = record.get(key_idx).unwrap_or_default().trim();
        if key.is_empty() {
            continue; // Nothing to override
        }
        // Templates are kept verbatim, surrounding spaces included
        let message = record.get(message_idx).unwrap_or_default();
        overrides.push((key.to_string(), message.to_string()));
    }
    Ok(overrides)
}
