//! CLI command handler for CSV import

use std::path::Path;

use crate::error::{SpendError, SpendResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path) -> SpendResult<()> {
    if !file.exists() {
        return Err(SpendError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let result = ImportService::new(storage).import_file(file)?;

    println!("Import from '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Imported:  {}", result.imported);
    println!("  Skipped:   {}", result.error_count());

    if !result.errors.is_empty() {
        println!();
        println!("Rows with errors:");
        for (line, message) in &result.errors {
            println!("  line {}: {}", line, message);
        }
    }

    Ok(())
}
