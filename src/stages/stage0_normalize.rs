use std::path::Path;

use tracing::info;

use crate::io::input::{self, InputError};
use crate::models::{Field, ResponseTable};

/// Execute Stage 0: Load and normalize the survey export.
///
/// Reads the CSV at `path`, renames the verbatim survey questions to
/// canonical field names and drops everything else. Any failure here aborts
/// the run before any output exists; there is no partial recovery.
pub fn normalize(path: &Path) -> Result<ResponseTable, InputError> {
    let table = input::load_survey_file(path)?;

    info!(
        "Loaded {} responses with {} canonical fields",
        table.len(),
        Field::SOURCE_FIELDS.len()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let data = crate::io::input::fixtures::survey_csv(&[("Negro(a)", "Sim")]);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&data)
            .unwrap();

        let table = normalize(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].raca, "Negro(a)");
    }

    #[test]
    fn test_normalize_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(normalize(&dir.path().join("missing.csv")).is_err());
    }
}
