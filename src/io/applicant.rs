//! Read/write applicant JSON files.
//!
//! The file shape is the same JSON the remote model service receives, so a
//! saved applicant can be replayed against any predictor:
//!
//! ```json
//! { "age": 28, "income": 1200000, "loan_amount": 2560000, "loan_tenure_months": 36,
//!   "avg_dpd": 20, "delinquency_ratio": 30, "credit_utilization_ratio": 30,
//!   "num_open_accounts": 2, "residence_type": "Owned", "loan_purpose": "Education",
//!   "loan_type": "Unsecured" }
//! ```

use std::fs::File;
use std::path::Path;

use crate::domain::ApplicantInput;
use crate::error::AppError;

/// Read an applicant file and check its field ranges.
pub fn read_applicant_json(path: &Path) -> Result<ApplicantInput, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open applicant JSON '{}': {e}", path.display())))?;
    let input: ApplicantInput = serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid applicant JSON '{}': {e}", path.display())))?;
    input.validate()?;
    Ok(input)
}

/// Write an applicant file (`cv assess --save`).
pub fn write_applicant_json(path: &Path, input: &ApplicantInput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create applicant JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, input)
        .map_err(|e| AppError::usage(format!("Failed to write applicant JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoanPurpose, LoanType, ResidenceType};
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn saved_applicant_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("applicant.json");
        let input = ApplicantInput {
            age: 45,
            residence_type: ResidenceType::Mortgage,
            loan_purpose: LoanPurpose::Home,
            loan_type: LoanType::Secured,
            ..ApplicantInput::default()
        };
        write_applicant_json(&path, &input).unwrap();
        let back = read_applicant_json(&path).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn out_of_range_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"age": 30, "income": 100000, "loan_amount": 50000, "loan_tenure_months": 12,
                "avg_dpd": 0, "delinquency_ratio": 0, "credit_utilization_ratio": 150,
                "num_open_accounts": 1, "residence_type": "Rented", "loan_purpose": "Auto",
                "loan_type": "Secured"}}"#
        )
        .unwrap();
        file.flush().unwrap();
        let err = read_applicant_json(file.path()).unwrap_err();
        assert!(err.message().contains("utilization"), "{err}");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"age": 30, "income": 1, "loan_amount": 1, "loan_tenure_months": 1, "avg_dpd": 0,
                "delinquency_ratio": 0, "credit_utilization_ratio": 0, "num_open_accounts": 1,
                "residence_type": "Castle", "loan_purpose": "Auto", "loan_type": "Secured"}"#,
        )
        .unwrap();
        file.flush().unwrap();
        let err = read_applicant_json(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unwritable_destination_is_usage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("applicant.json");
        let err = write_applicant_json(&path, &ApplicantInput::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_file_is_usage_error() {
        let dir = tempdir().unwrap();
        let err = read_applicant_json(&dir.path().join("not-here.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
