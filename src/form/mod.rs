//! Applicant entry form.
//!
//! The form owns the field catalogue (labels, help text, ranges, steps) and the
//! current values. Out-of-range input is rejected here, at entry, so that the
//! presenter and the model only ever see values inside the declared ranges.
//!
//! The form is front-end agnostic: the TUI drives it with key presses, tests
//! drive it directly.

use crate::domain::{
    ApplicantInput, LoanPurpose, LoanType, ResidenceType, MAX_AGE, MAX_OPEN_ACCOUNTS, MAX_PERCENT, MIN_AGE,
    MIN_OPEN_ACCOUNTS,
};
use crate::error::AppError;

/// Step for the income and loan amount fields.
pub const AMOUNT_STEP: f64 = 10_000.0;

/// Form sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Personal,
    Financial,
    Loan,
    CreditHistory,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Personal, Section::Financial, Section::Loan, Section::CreditHistory];

    pub fn title(self) -> &'static str {
        match self {
            Section::Personal => "Personal Information",
            Section::Financial => "Financial Information",
            Section::Loan => "Loan Details",
            Section::CreditHistory => "Credit History",
        }
    }
}

/// One editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    ResidenceType,
    NumOpenAccounts,
    Income,
    LoanAmount,
    LoanPurpose,
    LoanType,
    LoanTenureMonths,
    AvgDpd,
    DelinquencyRatio,
    CreditUtilizationRatio,
}

/// What kind of value a field holds and which values it accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// Whole-number field with inclusive bounds and a +/- step.
    Numeric { min: f64, max: Option<f64>, step: f64 },
    /// Fixed list of options, cycled with +/-.
    Choice,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Age,
        Field::ResidenceType,
        Field::NumOpenAccounts,
        Field::Income,
        Field::LoanAmount,
        Field::LoanPurpose,
        Field::LoanType,
        Field::LoanTenureMonths,
        Field::AvgDpd,
        Field::DelinquencyRatio,
        Field::CreditUtilizationRatio,
    ];

    pub fn section(self) -> Section {
        match self {
            Field::Age | Field::ResidenceType | Field::NumOpenAccounts => Section::Personal,
            Field::Income | Field::LoanAmount => Section::Financial,
            Field::LoanPurpose | Field::LoanType | Field::LoanTenureMonths => Section::Loan,
            Field::AvgDpd | Field::DelinquencyRatio | Field::CreditUtilizationRatio => Section::CreditHistory,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::ResidenceType => "Residence Type",
            Field::NumOpenAccounts => "Open Loan Accounts",
            Field::Income => "Annual Income (₹)",
            Field::LoanAmount => "Loan Amount (₹)",
            Field::LoanPurpose => "Loan Purpose",
            Field::LoanType => "Loan Type",
            Field::LoanTenureMonths => "Loan Tenure (months)",
            Field::AvgDpd => "Average DPD",
            Field::DelinquencyRatio => "Delinquency Ratio (%)",
            Field::CreditUtilizationRatio => "Credit Utilization Ratio (%)",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Field::Age => "Applicant's age in years",
            Field::ResidenceType => "Current housing situation",
            Field::NumOpenAccounts => "Number of currently active loan accounts",
            Field::Income => "Annual income in Indian Rupees",
            Field::LoanAmount => "Requested loan amount in Indian Rupees",
            Field::LoanPurpose => "Purpose for taking the loan",
            Field::LoanType => "Whether the loan is secured by collateral",
            Field::LoanTenureMonths => "Loan repayment period in months",
            Field::AvgDpd => "Average Days Past Due per delinquency",
            Field::DelinquencyRatio => "Percentage of payments that were late",
            Field::CreditUtilizationRatio => "Percentage of available credit being used",
        }
    }

    pub fn bounds(self) -> Bounds {
        let pct = Bounds::Numeric {
            min: 0.0,
            max: Some(MAX_PERCENT as f64),
            step: 1.0,
        };
        match self {
            Field::Age => Bounds::Numeric {
                min: MIN_AGE as f64,
                max: Some(MAX_AGE as f64),
                step: 1.0,
            },
            Field::NumOpenAccounts => Bounds::Numeric {
                min: MIN_OPEN_ACCOUNTS as f64,
                max: Some(MAX_OPEN_ACCOUNTS as f64),
                step: 1.0,
            },
            Field::Income | Field::LoanAmount => Bounds::Numeric {
                min: 0.0,
                max: None,
                step: AMOUNT_STEP,
            },
            Field::LoanTenureMonths | Field::AvgDpd => Bounds::Numeric {
                min: 0.0,
                max: None,
                step: 1.0,
            },
            Field::DelinquencyRatio | Field::CreditUtilizationRatio => pct,
            Field::ResidenceType | Field::LoanPurpose | Field::LoanType => Bounds::Choice,
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self.bounds(), Bounds::Choice)
    }
}

/// Current form state.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    input: ApplicantInput,
}

impl Default for Form {
    fn default() -> Self {
        Self::new(ApplicantInput::default())
    }
}

impl Form {
    pub fn new(input: ApplicantInput) -> Self {
        Self { input }
    }

    /// Snapshot of the current values as an applicant submission.
    pub fn to_input(&self) -> ApplicantInput {
        self.input.clone()
    }

    pub fn input(&self) -> &ApplicantInput {
        &self.input
    }

    /// Move a field by `steps` increments, clamping numeric fields into range
    /// and cycling choice fields.
    pub fn adjust(&mut self, field: Field, steps: i64) {
        match field.bounds() {
            Bounds::Numeric { min, max, step } => {
                let current = self.numeric(field);
                let mut next = (current + step * steps as f64).max(min);
                if let Some(max) = max {
                    next = next.min(max);
                }
                self.set_numeric(field, next);
            }
            Bounds::Choice => match field {
                Field::ResidenceType => {
                    self.input.residence_type = cycle(&ResidenceType::ALL, self.input.residence_type, steps);
                }
                Field::LoanPurpose => {
                    self.input.loan_purpose = cycle(&LoanPurpose::ALL, self.input.loan_purpose, steps);
                }
                Field::LoanType => {
                    self.input.loan_type = cycle(&LoanType::ALL, self.input.loan_type, steps);
                }
                _ => {}
            },
        }
    }

    /// Replace a numeric field with typed text.
    ///
    /// Thousands separators (`,`, `_`, spaces) are ignored. Values that do not
    /// parse as a whole number or fall outside the field's range are rejected
    /// and leave the form unchanged.
    pub fn set_from_text(&mut self, field: Field, text: &str) -> Result<(), AppError> {
        let Bounds::Numeric { min, max, .. } = field.bounds() else {
            return Err(AppError::usage(format!("{} is chosen from a list, not typed.", field.label())));
        };

        let cleaned: String = text
            .trim()
            .chars()
            .filter(|c| !matches!(c, ',' | '_' | ' '))
            .collect();
        let not_whole = || AppError::usage(format!("{}: '{}' is not a whole number.", field.label(), text.trim()));
        // Counts are stored as u32; only the amounts take wider values.
        let value = match field {
            Field::Income | Field::LoanAmount => cleaned.parse::<u64>().map_err(|_| not_whole())? as f64,
            _ => f64::from(cleaned.parse::<u32>().map_err(|_| not_whole())?),
        };

        if value < min {
            return Err(AppError::usage(format!("{} must be at least {min}.", field.label())));
        }
        if let Some(max) = max {
            if value > max {
                return Err(AppError::usage(format!("{} must be at most {max}.", field.label())));
            }
        }

        self.set_numeric(field, value);
        Ok(())
    }

    /// Display text for a field's current value.
    pub fn value_text(&self, field: Field) -> String {
        match field {
            Field::ResidenceType => self.input.residence_type.display_name().to_string(),
            Field::LoanPurpose => self.input.loan_purpose.display_name().to_string(),
            Field::LoanType => self.input.loan_type.display_name().to_string(),
            Field::Income | Field::LoanAmount => format_amount(self.numeric(field)),
            _ => format!("{}", self.numeric(field) as u64),
        }
    }

    fn numeric(&self, field: Field) -> f64 {
        match field {
            Field::Age => self.input.age as f64,
            Field::NumOpenAccounts => self.input.num_open_accounts as f64,
            Field::Income => self.input.income,
            Field::LoanAmount => self.input.loan_amount,
            Field::LoanTenureMonths => self.input.loan_tenure_months as f64,
            Field::AvgDpd => self.input.avg_dpd as f64,
            Field::DelinquencyRatio => self.input.delinquency_ratio as f64,
            Field::CreditUtilizationRatio => self.input.credit_utilization_ratio as f64,
            Field::ResidenceType | Field::LoanPurpose | Field::LoanType => 0.0,
        }
    }

    fn set_numeric(&mut self, field: Field, value: f64) {
        let whole = value.round().max(0.0);
        let as_u32 = whole.min(u32::MAX as f64) as u32;
        match field {
            Field::Age => self.input.age = as_u32,
            Field::NumOpenAccounts => self.input.num_open_accounts = as_u32,
            Field::Income => self.input.income = whole,
            Field::LoanAmount => self.input.loan_amount = whole,
            Field::LoanTenureMonths => self.input.loan_tenure_months = as_u32,
            Field::AvgDpd => self.input.avg_dpd = as_u32,
            Field::DelinquencyRatio => self.input.delinquency_ratio = as_u32,
            Field::CreditUtilizationRatio => self.input.credit_utilization_ratio = as_u32,
            Field::ResidenceType | Field::LoanPurpose | Field::LoanType => {}
        }
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, steps: i64) -> T {
    let n = options.len() as i64;
    let idx = options.iter().position(|o| *o == current).unwrap_or(0) as i64;
    options[(idx + steps).rem_euclid(n) as usize]
}

/// Format a whole amount with thousands separators (`1,200,000`).
pub fn format_amount(value: f64) -> String {
    let digits = format!("{}", value.round().max(0.0) as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_clamps_into_range() {
        let mut form = Form::default();
        form.adjust(Field::NumOpenAccounts, 10);
        assert_eq!(form.input().num_open_accounts, 4);
        form.adjust(Field::NumOpenAccounts, -10);
        assert_eq!(form.input().num_open_accounts, 1);

        form.adjust(Field::Age, -100);
        assert_eq!(form.input().age, 18);

        form.adjust(Field::Income, -1000);
        assert_eq!(form.input().income, 0.0);
    }

    #[test]
    fn amount_fields_step_by_ten_thousand() {
        let mut form = Form::default();
        form.adjust(Field::LoanAmount, 1);
        assert_eq!(form.input().loan_amount, 2_570_000.0);
        form.adjust(Field::Income, -2);
        assert_eq!(form.input().income, 1_180_000.0);
    }

    #[test]
    fn choice_fields_cycle_both_ways() {
        let mut form = Form::default();
        form.adjust(Field::ResidenceType, 1);
        assert_eq!(form.input().residence_type, ResidenceType::Rented);
        form.adjust(Field::ResidenceType, -2);
        assert_eq!(form.input().residence_type, ResidenceType::Mortgage);
        form.adjust(Field::LoanType, 1);
        assert_eq!(form.input().loan_type, LoanType::Secured);
        form.adjust(Field::LoanType, 1);
        assert_eq!(form.input().loan_type, LoanType::Unsecured);
    }

    #[test]
    fn typed_values_outside_range_are_rejected() {
        let mut form = Form::default();
        assert!(form.set_from_text(Field::DelinquencyRatio, "101").is_err());
        assert!(form.set_from_text(Field::Age, "17").is_err());
        assert!(form.set_from_text(Field::Age, "abc").is_err());
        assert!(form.set_from_text(Field::LoanPurpose, "Home").is_err());
        assert_eq!(form, Form::default());

        form.set_from_text(Field::Income, "1,500,000").unwrap();
        assert_eq!(form.input().income, 1_500_000.0);
        form.set_from_text(Field::DelinquencyRatio, " 100 ").unwrap();
        assert_eq!(form.input().delinquency_ratio, 100);
    }

    #[test]
    fn oversized_counts_are_not_truncated() {
        let mut form = Form::default();
        let err = form.set_from_text(Field::LoanTenureMonths, "5000000000").unwrap_err();
        assert!(err.message().contains("not a whole number"), "{err}");
        assert!(form.set_from_text(Field::AvgDpd, "4294967296").is_err());
        assert_eq!(form, Form::default());

        form.set_from_text(Field::LoanTenureMonths, "4294967295").unwrap();
        assert_eq!(form.input().loan_tenure_months, u32::MAX);
        form.set_from_text(Field::LoanAmount, "5,000,000,000").unwrap();
        assert_eq!(form.input().loan_amount, 5_000_000_000.0);
    }

    #[test]
    fn form_output_is_always_valid() {
        let mut form = Form::default();
        for field in Field::ALL {
            form.adjust(field, 1_000);
        }
        assert!(form.to_input().validate().is_ok());
        for field in Field::ALL {
            form.adjust(field, -1_000);
        }
        assert!(form.to_input().validate().is_ok());
    }

    #[test]
    fn value_text_formats_amounts() {
        let form = Form::default();
        assert_eq!(form.value_text(Field::Income), "1,200,000");
        assert_eq!(form.value_text(Field::Age), "28");
        assert_eq!(form.value_text(Field::LoanPurpose), "Education");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
    }

    #[test]
    fn every_section_has_fields() {
        for section in Section::ALL {
            assert!(Field::ALL.iter().any(|f| f.section() == section), "{section:?}");
        }
    }
}
