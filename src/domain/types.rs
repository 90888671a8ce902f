//! Shared domain types.
//!
//! These types are serializable so they can be:
//!
//! - sent to a remote model service as JSON
//! - loaded from applicant files (`cv assess --from`)
//! - exported alongside an assessment

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum applicant age accepted by the form.
pub const MIN_AGE: u32 = 18;
/// Maximum applicant age accepted by the form.
pub const MAX_AGE: u32 = 100;
/// Upper bound for percentage fields (delinquency, utilization).
pub const MAX_PERCENT: u32 = 100;
/// Open loan accounts range accepted by the form.
pub const MIN_OPEN_ACCOUNTS: u32 = 1;
pub const MAX_OPEN_ACCOUNTS: u32 = 4;

/// Current housing situation of the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ResidenceType {
    Owned,
    Rented,
    Mortgage,
}

impl ResidenceType {
    pub const ALL: [ResidenceType; 3] = [ResidenceType::Owned, ResidenceType::Rented, ResidenceType::Mortgage];

    pub fn display_name(self) -> &'static str {
        match self {
            ResidenceType::Owned => "Owned",
            ResidenceType::Rented => "Rented",
            ResidenceType::Mortgage => "Mortgage",
        }
    }
}

/// What the loan is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LoanPurpose {
    Education,
    Home,
    Auto,
    Personal,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 4] = [
        LoanPurpose::Education,
        LoanPurpose::Home,
        LoanPurpose::Auto,
        LoanPurpose::Personal,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            LoanPurpose::Education => "Education",
            LoanPurpose::Home => "Home",
            LoanPurpose::Auto => "Auto",
            LoanPurpose::Personal => "Personal",
        }
    }
}

/// Whether the loan is backed by collateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LoanType {
    Unsecured,
    Secured,
}

impl LoanType {
    pub const ALL: [LoanType; 2] = [LoanType::Unsecured, LoanType::Secured];

    pub fn display_name(self) -> &'static str {
        match self {
            LoanType::Unsecured => "Unsecured",
            LoanType::Secured => "Secured",
        }
    }
}

/// Applicant attributes as submitted by the form.
///
/// Amounts are in the applicant's currency (the bundled scorecard was built on
/// Indian Rupee figures). Percentages are whole numbers in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInput {
    pub age: u32,
    pub income: f64,
    pub loan_amount: f64,
    pub loan_tenure_months: u32,
    /// Average days past due per delinquency.
    pub avg_dpd: u32,
    pub delinquency_ratio: u32,
    pub credit_utilization_ratio: u32,
    pub num_open_accounts: u32,
    pub residence_type: ResidenceType,
    pub loan_purpose: LoanPurpose,
    pub loan_type: LoanType,
}

impl Default for ApplicantInput {
    /// The values the entry form starts with.
    fn default() -> Self {
        Self {
            age: 28,
            income: 1_200_000.0,
            loan_amount: 2_560_000.0,
            loan_tenure_months: 36,
            avg_dpd: 20,
            delinquency_ratio: 30,
            credit_utilization_ratio: 30,
            num_open_accounts: 2,
            residence_type: ResidenceType::Owned,
            loan_purpose: LoanPurpose::Education,
            loan_type: LoanType::Unsecured,
        }
    }
}

impl ApplicantInput {
    /// Check the declared field ranges.
    ///
    /// The form already clamps values at entry; this guards inputs that arrive
    /// from files or command-line flags.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(AppError::usage(format!(
                "Age must be between {MIN_AGE} and {MAX_AGE} (got {}).",
                self.age
            )));
        }
        if !(self.income.is_finite() && self.income >= 0.0) {
            return Err(AppError::usage("Income must be a non-negative amount."));
        }
        if !(self.loan_amount.is_finite() && self.loan_amount >= 0.0) {
            return Err(AppError::usage("Loan amount must be a non-negative amount."));
        }
        if self.delinquency_ratio > MAX_PERCENT {
            return Err(AppError::usage(format!(
                "Delinquency ratio must be within 0-100% (got {}).",
                self.delinquency_ratio
            )));
        }
        if self.credit_utilization_ratio > MAX_PERCENT {
            return Err(AppError::usage(format!(
                "Credit utilization ratio must be within 0-100% (got {}).",
                self.credit_utilization_ratio
            )));
        }
        if !(MIN_OPEN_ACCOUNTS..=MAX_OPEN_ACCOUNTS).contains(&self.num_open_accounts) {
            return Err(AppError::usage(format!(
                "Open loan accounts must be between {MIN_OPEN_ACCOUNTS} and {MAX_OPEN_ACCOUNTS} (got {}).",
                self.num_open_accounts
            )));
        }
        Ok(())
    }

    /// Loan amount divided by income; `0` when income is zero.
    pub fn loan_to_income_ratio(&self) -> f64 {
        crate::presenter::loan_to_income_ratio(self.loan_amount, self.income)
    }
}

/// Recognised credit rating grades, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "CCC")]
    Ccc,
    #[serde(rename = "CC")]
    Cc,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
}

impl Rating {
    pub const ALL: [Rating; 10] = [
        Rating::Aaa,
        Rating::Aa,
        Rating::A,
        Rating::Bbb,
        Rating::Bb,
        Rating::B,
        Rating::Ccc,
        Rating::Cc,
        Rating::C,
        Rating::D,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Aaa => "AAA",
            Rating::Aa => "AA",
            Rating::A => "A",
            Rating::Bbb => "BBB",
            Rating::Bb => "BB",
            Rating::B => "B",
            Rating::Ccc => "CCC",
            Rating::Cc => "CC",
            Rating::C => "C",
            Rating::D => "D",
        }
    }

    /// Parse a grade exactly as a model reports it (case-sensitive).
    pub fn parse(s: &str) -> Option<Rating> {
        Rating::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the external credit model for a single applicant.
///
/// `rating` is kept as the raw string the model returned; unrecognised grades
/// are still displayed (with a neutral color).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub probability: f64,
    pub credit_score: i64,
    pub rating: String,
}

impl RiskResult {
    pub fn grade(&self) -> Option<Rating> {
        Rating::parse(&self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_applicant_is_valid() {
        let input = ApplicantInput::default();
        assert!(input.validate().is_ok());
        assert!((input.loan_to_income_ratio() - 2.1333).abs() < 1e-3);
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        let mut input = ApplicantInput::default();
        input.age = 17;
        assert_eq!(input.validate().unwrap_err().exit_code(), 2);

        let mut input = ApplicantInput::default();
        input.num_open_accounts = 5;
        assert!(input.validate().is_err());

        let mut input = ApplicantInput::default();
        input.delinquency_ratio = 101;
        assert!(input.validate().is_err());

        let mut input = ApplicantInput::default();
        input.income = -1.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn zero_income_is_accepted() {
        let input = ApplicantInput {
            income: 0.0,
            ..ApplicantInput::default()
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.loan_to_income_ratio(), 0.0);
    }

    #[test]
    fn rating_parse_is_exact() {
        assert_eq!(Rating::parse("BBB"), Some(Rating::Bbb));
        assert_eq!(Rating::parse("bbb"), None);
        assert_eq!(Rating::parse("ZZZ"), None);
        for r in Rating::ALL {
            assert_eq!(Rating::parse(r.as_str()), Some(r));
        }
    }

    #[test]
    fn applicant_json_uses_form_spelling() {
        let json = serde_json::to_value(ApplicantInput::default()).unwrap();
        assert_eq!(json["residence_type"], "Owned");
        assert_eq!(json["loan_purpose"], "Education");
        assert_eq!(json["loan_type"], "Unsecured");
        assert_eq!(json["num_open_accounts"], 2);
    }
}
