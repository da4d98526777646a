//! CSV import service
//!
//! Reads files in the ledger export layout (`Date,Type,Category,Description,Amount`)
//! back into the store. Bad rows are reported and skipped; the good ones
//! are added in one batch.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{SpendError, SpendResult};
use crate::models::{find_category, Money, TransactionInput, TransactionKind};
use crate::services::TransactionService;
use crate::storage::Storage;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct LedgerColumns {
    date: usize,
    kind: usize,
    category: usize,
    description: usize,
    amount: usize,
}

impl LedgerColumns {
    fn from_headers(headers: &StringRecord) -> SpendResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| SpendError::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            date: find("Date")?,
            kind: find("Type")?,
            category: find("Category")?,
            description: find("Description")?,
            amount: find("Amount")?,
        })
    }
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of transactions imported
    pub imported: usize,
    /// Error messages keyed by file line number
    pub errors: BTreeMap<usize, String>,
}

impl ImportResult {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn import_file(&self, path: &Path) -> SpendResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            SpendError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_from_reader(file)
    }

    /// Parse every row, then add the valid ones as a single batch
    pub fn import_from_reader<R: Read>(&self, reader: R) -> SpendResult<ImportResult> {
        let (inputs, errors) = parse_ledger(reader)?;

        let added = TransactionService::new(self.storage).add_many(inputs)?;
        debug!(
            imported = added.len(),
            skipped = errors.len(),
            "finished ledger import"
        );

        Ok(ImportResult {
            imported: added.len(),
            errors,
        })
    }
}

/// Parse a ledger CSV into validated inputs and per-line errors
pub fn parse_ledger<R: Read>(
    reader: R,
) -> SpendResult<(Vec<TransactionInput>, BTreeMap<usize, String>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| SpendError::Import(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let columns = LedgerColumns::from_headers(&headers)?;

    let mut inputs = Vec::new();
    let mut errors = BTreeMap::new();

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1
        let fallback_line = idx + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                errors.insert(fallback_line, format!("Error reading CSV record: {}", e));
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        match parse_record(&record, columns) {
            Ok(input) => inputs.push(input),
            Err(message) => {
                errors.insert(line, message);
            }
        }
    }

    Ok((inputs, errors))
}

fn parse_record(record: &StringRecord, columns: LedgerColumns) -> Result<TransactionInput, String> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .ok_or_else(|| format!("Missing {} value", name))
    };

    let date_str = field(columns.date, "date")?;
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", date_str))?;

    let kind: TransactionKind = field(columns.kind, "type")?.parse()?;

    let raw_category = field(columns.category, "category")?;
    let category = find_category(kind, raw_category)
        .map(str::to_string)
        .unwrap_or_else(|| raw_category.to_string());

    let amount_str = field(columns.amount, "amount")?;
    let amount = Money::parse(amount_str).map_err(|e| format!("{}: '{}'", e, amount_str))?;

    let description = field(columns.description, "description")?;

    let input = TransactionInput::new(kind, amount, category, description, date).normalized();
    input.validate().map_err(|e| e.to_string())?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use crate::services::BudgetService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    const LEDGER: &str = "Date,Type,Category,Description,Amount\n\
        2025-01-03,income,Salary,\"January pay\",3000.00\n\
        2025-01-05,expense,groceries,\"Big \"\"weekly\"\" shop\",85.40\n\
        not-a-date,expense,Groceries,\"Broken\",10.00\n\
        2025-01-07,expense,Salary,\"Wrong set\",10.00\n\
        2025-01-08,expense,Travel,\"Train\",-4.00\n";

    #[test]
    fn test_parse_ledger_reports_bad_lines() {
        let (inputs, errors) = parse_ledger(LEDGER.as_bytes()).unwrap();

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[1].category, "Groceries");
        assert_eq!(inputs[1].description, "Big \"weekly\" shop");
        assert_eq!(inputs[1].amount, Money::from_cents(8540));

        let lines: Vec<_> = errors.keys().copied().collect();
        assert_eq!(lines, vec![4, 5, 6]);
    }

    #[test]
    fn test_missing_column_is_an_import_error() {
        let err = parse_ledger("Date,Type,Amount\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SpendError::Import(_)));
    }

    #[test]
    fn test_import_adds_rows_and_derives_budgets() {
        let (_temp_dir, storage) = create_test_storage();
        BudgetService::new(&storage)
            .set_limit("Groceries", Money::from_cents(10000))
            .unwrap();

        let result = ImportService::new(&storage)
            .import_from_reader(LEDGER.as_bytes())
            .unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.error_count(), 3);
        assert_eq!(storage.transactions.count().unwrap(), 2);
        assert_eq!(
            storage.budgets.get("Groceries").unwrap().unwrap().spent(),
            Money::from_cents(8540)
        );
    }
}
