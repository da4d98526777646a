//! YAML snapshot export
//!
//! Same content as the JSON snapshot, for reading by people.

use std::io::Write;

use crate::error::{SpendError, SpendResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full store to YAML
pub fn export_full_yaml<W: Write + ?Sized>(storage: &Storage, writer: &mut W) -> SpendResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = [
        "# spendlog snapshot".to_string(),
        format!("# Generated: {}", export.exported_at),
        format!("# App Version: {}", export.app_version),
        String::new(),
    ];
    for line in header {
        writeln!(writer, "{}", line).map_err(|e| SpendError::Export(e.to_string()))?;
    }

    serde_yaml::to_writer(writer, &export).map_err(|e| SpendError::Export(e.to_string()))?;

    Ok(())
}

/// Read a YAML snapshot back
pub fn import_from_yaml(yaml_str: &str) -> SpendResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| SpendError::Import(e.to_string()))?;

    export.validate().map_err(SpendError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use crate::models::{Money, TransactionInput};
    use crate::services::TransactionService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        TransactionService::new(&storage)
            .add(TransactionInput::expense(
                Money::from_cents(1_999),
                "Entertainment",
                "Cinema night",
                NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            ))
            .unwrap();

        let mut yaml_output = Vec::new();
        export_full_yaml(&storage, &mut yaml_output).unwrap();
        let yaml_string = String::from_utf8(yaml_output).unwrap();

        assert!(yaml_string.starts_with("# spendlog snapshot"));
        assert!(yaml_string.contains("Cinema night"));

        // Comments are valid YAML, no stripping needed
        let imported = import_from_yaml(&yaml_string).unwrap();
        assert_eq!(imported.transactions, storage.transactions.get_all().unwrap());
    }
}
