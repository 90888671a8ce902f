//! Top-level application orchestration.
//!
//! `src/main.rs` is tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - resolves the model source
//! - runs the assessment pipeline and prints or exports the result

use clap::Parser;
use tracing::info;

use crate::cli::{AssessArgs, Command, ModelArgs, TuiArgs};
use crate::config::ModelSettings;
use crate::error::AppError;
use crate::model::Predictor;

pub mod pipeline;

/// Entry point for the `cv` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Assess(args) => {
            crate::logging::init_stderr();
            handle_assess(args)
        }
        Command::Guide => {
            println!("{}", crate::report::format_guide());
            println!("{}", crate::report::format_about());
            Ok(())
        }
        Command::Tui(args) => {
            if let Some(path) = &args.log_file {
                crate::logging::init_file(path)?;
            }
            handle_tui(args)
        }
    }
}

/// Build the predictor selected by flags and environment.
pub fn predictor_from_args(args: &ModelArgs) -> Result<Box<dyn Predictor>, AppError> {
    let settings = ModelSettings::from_env(args.model_url.clone(), args.model_path.clone())?;
    crate::model::build_predictor(&settings)
}

fn handle_assess(args: AssessArgs) -> Result<(), AppError> {
    let input = match &args.from {
        Some(path) => crate::io::read_applicant_json(path)?,
        None => args.applicant(),
    };

    let predictor = predictor_from_args(&args.model)?;
    let assessment = pipeline::assess(predictor.as_ref(), input)?;

    if let Some(path) = &args.save {
        crate::io::write_applicant_json(path, &assessment.input)?;
        info!(path = %path.display(), "applicant saved");
    }

    if args.json {
        println!("{}", crate::io::assessment_to_json(&assessment)?);
    } else {
        println!("{}", crate::report::format_assessment(&assessment));
        if args.guide {
            println!("{}", crate::report::format_guide());
        }
    }

    if let Some(path) = &args.export {
        crate::io::write_assessment_json(path, &assessment)?;
        info!(path = %path.display(), "assessment exported");
    }

    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

/// Rewrite argv so `cv` defaults to `cv tui`.
///
/// Rules:
/// - `cv`                      -> `cv tui`
/// - `cv --model-url URL ...`  -> `cv tui --model-url URL ...`
/// - `cv --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "assess" | "guide" | "tui");
    if is_subcommand {
        return argv;
    }

    // A leading flag is treated as a TUI flag.
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["cv"])), args(&["cv", "tui"]));
    }

    #[test]
    fn leading_flag_goes_to_tui() {
        assert_eq!(
            rewrite_args(args(&["cv", "--model", "m.json"])),
            args(&["cv", "tui", "--model", "m.json"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(args(&["cv", "assess", "--json"])), args(&["cv", "assess", "--json"]));
        assert_eq!(rewrite_args(args(&["cv", "--help"])), args(&["cv", "--help"]));
        assert_eq!(rewrite_args(args(&["cv", "guide"])), args(&["cv", "guide"]));
    }

    #[test]
    fn saved_applicant_replays_through_from() {
        let dir = tempfile::tempdir().unwrap();
        let saved = dir.path().join("applicant.json");
        let export = dir.path().join("assessment.json");
        let model = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/scorecard.json");

        let cli = crate::cli::Cli::parse_from([
            "cv",
            "assess",
            "--model",
            model,
            "--age",
            "52",
            "--residence",
            "rented",
            "--save",
            saved.to_str().unwrap(),
            "--export",
            export.to_str().unwrap(),
        ]);
        let Command::Assess(assess) = cli.command else {
            panic!("expected assess");
        };
        let expected = assess.applicant();
        handle_assess(assess).unwrap();

        let back = crate::io::read_applicant_json(&saved).unwrap();
        assert_eq!(back, expected);
        let exported: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
        assert_eq!(exported["input"]["age"], 52);
    }
}
