//! Command-line parsing for the credit risk front-end.
//!
//! Argument parsing and command dispatch are kept apart from the presenter and
//! model code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ApplicantInput, LoanPurpose, LoanType, ResidenceType};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cv", version, about = "CreditVision: credit risk assessment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assess one applicant and print the result card.
    Assess(AssessArgs),
    /// Print the interpretation guide and model notes.
    Guide,
    /// Launch the interactive form (default).
    Tui(TuiArgs),
}

/// Where predictions come from. Falls back to the environment, then to the
/// bundled scorecard.
#[derive(Debug, Args, Clone, Default)]
pub struct ModelArgs {
    /// URL of a remote model service (POST, JSON). Env: CREDITVISION_MODEL_URL.
    #[arg(long, value_name = "URL")]
    pub model_url: Option<String>,

    /// Scorecard artifact JSON. Env: CREDITVISION_MODEL_PATH.
    #[arg(long = "model", value_name = "JSON")]
    pub model_path: Option<PathBuf>,
}

/// Options for `cv assess`.
#[derive(Debug, Args, Clone)]
pub struct AssessArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Read the applicant from a JSON file (overrides the field flags).
    #[arg(long, value_name = "JSON")]
    pub from: Option<PathBuf>,

    /// Applicant's age in years.
    #[arg(long, default_value_t = 28, value_parser = clap::value_parser!(u32).range(18..=100))]
    pub age: u32,

    /// Annual income.
    #[arg(long, default_value_t = 1_200_000.0)]
    pub income: f64,

    /// Requested loan amount.
    #[arg(long, default_value_t = 2_560_000.0)]
    pub loan_amount: f64,

    /// Loan repayment period in months.
    #[arg(long, default_value_t = 36)]
    pub tenure: u32,

    /// Average days past due per delinquency.
    #[arg(long, default_value_t = 20)]
    pub avg_dpd: u32,

    /// Percentage of payments that were late.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub delinquency: u32,

    /// Percentage of available credit being used.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub utilization: u32,

    /// Number of currently active loan accounts.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub open_accounts: u32,

    /// Current housing situation.
    #[arg(long, value_enum, default_value_t = ResidenceType::Owned)]
    pub residence: ResidenceType,

    /// Purpose for taking the loan.
    #[arg(long, value_enum, default_value_t = LoanPurpose::Education)]
    pub purpose: LoanPurpose,

    /// Whether the loan is secured by collateral.
    #[arg(long = "loan-type", value_enum, default_value_t = LoanType::Unsecured)]
    pub loan_type: LoanType,

    /// Print the assessment as JSON instead of the text card.
    #[arg(long)]
    pub json: bool,

    /// Also show the interpretation guide.
    #[arg(long)]
    pub guide: bool,

    /// Export the assessment to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Save the applicant to a JSON file that `--from` can read back.
    #[arg(long, value_name = "JSON")]
    pub save: Option<PathBuf>,
}

impl AssessArgs {
    /// Applicant described by the field flags.
    pub fn applicant(&self) -> ApplicantInput {
        ApplicantInput {
            age: self.age,
            income: self.income,
            loan_amount: self.loan_amount,
            loan_tenure_months: self.tenure,
            avg_dpd: self.avg_dpd,
            delinquency_ratio: self.delinquency,
            credit_utilization_ratio: self.utilization,
            num_open_accounts: self.open_accounts,
            residence_type: self.residence,
            loan_purpose: self.purpose,
            loan_type: self.loan_type,
        }
    }
}

/// Options for `cv tui`.
#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Start the form from an applicant JSON file.
    #[arg(long, value_name = "JSON")]
    pub from: Option<PathBuf>,

    /// Write logs to this file while the TUI runs.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assess_defaults_match_the_form() {
        let cli = Cli::parse_from(["cv", "assess"]);
        let Command::Assess(args) = cli.command else {
            panic!("expected assess");
        };
        assert_eq!(args.applicant(), ApplicantInput::default());
        assert!(!args.json);
    }

    #[test]
    fn assess_flags_are_applied() {
        let cli = Cli::parse_from([
            "cv",
            "assess",
            "--income",
            "0",
            "--residence",
            "mortgage",
            "--loan-type",
            "secured",
            "--open-accounts",
            "4",
            "--model-url",
            "http://localhost:8000/predict",
        ]);
        let Command::Assess(args) = cli.command else {
            panic!("expected assess");
        };
        let input = args.applicant();
        assert_eq!(input.income, 0.0);
        assert_eq!(input.residence_type, ResidenceType::Mortgage);
        assert_eq!(input.loan_type, LoanType::Secured);
        assert_eq!(input.num_open_accounts, 4);
        assert_eq!(args.model.model_url.as_deref(), Some("http://localhost:8000/predict"));
    }

    #[test]
    fn out_of_range_flags_are_rejected() {
        assert!(Cli::try_parse_from(["cv", "assess", "--age", "17"]).is_err());
        assert!(Cli::try_parse_from(["cv", "assess", "--open-accounts", "5"]).is_err());
        assert!(Cli::try_parse_from(["cv", "assess", "--delinquency", "101"]).is_err());
    }

    #[test]
    fn save_and_export_paths_are_separate() {
        let cli = Cli::parse_from(["cv", "assess", "--save", "a.json", "--export", "r.json"]);
        let Command::Assess(args) = cli.command else {
            panic!("expected assess");
        };
        assert_eq!(args.save, Some(PathBuf::from("a.json")));
        assert_eq!(args.export, Some(PathBuf::from("r.json")));
    }
}
