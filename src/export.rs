use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::menu_parser::{MenuEntry, ParsedMenu, ShoppingItem};

pub const MENU_FILE_NAME: &str = "menu.csv";
pub const SHOPPING_FILE_NAME: &str = "shopping_list.csv";

fn write_records<W: Write, T: Serialize>(records: &[T], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `Day,Meal Type,Dish` rows with a header line.
pub fn write_menu_csv<W: Write>(entries: &[MenuEntry], writer: W) -> Result<()> {
    write_records(entries, writer)
}

/// Writes a single `Item` column with a header line.
pub fn write_shopping_csv<W: Write>(items: &[ShoppingItem], writer: W) -> Result<()> {
    write_records(items, writer)
}

pub fn menu_to_csv_string(entries: &[MenuEntry]) -> Result<String> {
    let mut buf = Vec::new();
    write_menu_csv(entries, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

pub fn shopping_to_csv_string(items: &[ShoppingItem]) -> Result<String> {
    let mut buf = Vec::new();
    write_shopping_csv(items, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

// An empty sequence removes the file so a directory never mixes two exports.
fn replace_or_remove<T: Serialize>(path: PathBuf, records: &[T], label: &str) -> Result<Option<PathBuf>> {
    if records.is_empty() {
        match std::fs::remove_file(&path) {
            Ok(()) => info!(path = ?path, "removed stale {}", label),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).with_context(|| format!("Failed to remove {:?}", path)),
        }
        return Ok(None);
    }
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    write_records(records, file)?;
    info!(path = ?path, rows = records.len(), "exported {}", label);
    Ok(Some(path))
}

/// Writes `menu.csv` and `shopping_list.csv` into `dir`. A file whose sequence is
/// empty is not written, and any copy left by an earlier export is deleted.
/// Returns the paths actually written.
pub fn export_parsed_menu(dir: &Path, parsed: &ParsedMenu) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {:?}", dir))?;

    let menu = replace_or_remove(dir.join(MENU_FILE_NAME), &parsed.entries, "menu")?;
    let shopping = replace_or_remove(
        dir.join(SHOPPING_FILE_NAME),
        &parsed.shopping_list,
        "shopping list",
    )?;
    Ok(menu.into_iter().chain(shopping).collect())
}
