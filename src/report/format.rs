//! Formatted terminal output.
//!
//! Formatting lives in one place so the presenter stays pure and output changes
//! are localized.

use crate::app::pipeline::Assessment;
use crate::form::format_amount;
use crate::presenter::{
    AFFORDABILITY_HIGH_RATIO, AFFORDABILITY_NORMAL_RATIO, PROBABILITY_HIGH_FROM, PROBABILITY_MEDIUM_FROM,
    SCORE_EXCELLENT_FROM, SCORE_GOOD_FROM,
};

/// Format one assessment as a plain-text result card.
pub fn format_assessment(a: &Assessment) -> String {
    let input = &a.input;
    let p = &a.presentation;
    let mut out = String::new();

    out.push_str("=== CreditVision: Credit Risk Assessment ===\n");
    out.push_str(&format!("Model: {}\n", a.model));
    out.push_str(&format!(
        "Applicant: age {} | {} | {} open account(s)\n",
        input.age,
        input.residence_type.display_name(),
        input.num_open_accounts,
    ));
    out.push_str(&format!(
        "Loan: ₹{} over {} months | {} | {}\n",
        format_amount(input.loan_amount),
        input.loan_tenure_months,
        input.loan_purpose.display_name(),
        input.loan_type.display_name(),
    ));
    out.push_str(&format!(
        "Income: ₹{} | Loan to income: {:.2} ({} {})\n",
        format_amount(input.income),
        p.affordability.ratio,
        p.affordability.tier.symbol(),
        p.affordability.label,
    ));
    out.push_str(&format!(
        "History: avg DPD {} | delinquency {}% | utilization {}%\n",
        input.avg_dpd, input.delinquency_ratio, input.credit_utilization_ratio,
    ));

    out.push_str("\nResults:\n");
    out.push_str(&format!(
        "  Default probability  {:>6.1}%  {}\n",
        a.result.probability * 100.0,
        p.probability.label,
    ));
    out.push_str(&format!(
        "  Credit score         {:>7}  {}\n",
        a.result.credit_score, p.score.label,
    ));
    out.push_str(&format!(
        "  Credit rating        {:>7}  {}\n",
        a.result.rating,
        p.rating_color.hex(),
    ));

    out
}

/// Interpretation guide for the three result figures.
pub fn format_guide() -> String {
    let mut out = String::new();
    out.push_str("Interpretation Guide\n\n");

    out.push_str("Default Probability:\n");
    out.push_str(&format!(
        "  Low    (0-{:.0}%)    Excellent creditworthiness\n",
        PROBABILITY_MEDIUM_FROM * 100.0
    ));
    out.push_str(&format!(
        "  Medium ({:.0}-{:.0}%)   Moderate risk\n",
        PROBABILITY_MEDIUM_FROM * 100.0,
        PROBABILITY_HIGH_FROM * 100.0
    ));
    out.push_str(&format!(
        "  High   ({:.0}%+)     High risk of default\n",
        PROBABILITY_HIGH_FROM * 100.0
    ));

    out.push_str("\nCredit Score Range:\n");
    out.push_str(&format!("  {SCORE_EXCELLENT_FROM}+        Excellent credit\n"));
    out.push_str(&format!(
        "  {SCORE_GOOD_FROM}-{}     Good credit\n",
        SCORE_EXCELLENT_FROM - 1
    ));
    out.push_str(&format!("  Below {SCORE_GOOD_FROM}   Poor credit\n"));

    out.push_str("\nLoan to Income Ratio:\n");
    out.push_str(&format!("  above {AFFORDABILITY_HIGH_RATIO:.0}      High Risk\n"));
    out.push_str(&format!(
        "  {AFFORDABILITY_NORMAL_RATIO:.0}-{AFFORDABILITY_HIGH_RATIO:.0}         Normal\n"
    ));
    out.push_str(&format!("  {AFFORDABILITY_NORMAL_RATIO:.0} or less   Low Risk\n"));

    out
}

/// Model overview and disclaimer.
pub fn format_about() -> String {
    let mut out = String::new();
    out.push_str("About the Model\n\n");
    out.push_str("Model Features:\n");
    out.push_str("  - Algorithm: logistic scorecard or a remote model service\n");
    out.push_str("  - Key factors: income, loan amount, credit history, demographics\n");
    out.push_str("  - Output: default probability, credit score and credit rating\n");
    out.push_str("\nRisk Factors Considered:\n");
    out.push_str("  - Financial: income, loan amount, loan to income ratio\n");
    out.push_str("  - Credit history: past delinquencies, credit utilization\n");
    out.push_str("  - Personal: age, residence type, loan purpose\n");
    out.push_str("  - Account info: number of open accounts, loan tenure\n");
    out.push_str("\nDisclaimer:\n");
    out.push_str("  This tool provides estimates based on machine learning models and should\n");
    out.push_str("  not be the sole basis for financial decisions. Always consult with financial\n");
    out.push_str("  advisors for comprehensive credit assessment.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicantInput, RiskResult};
    use crate::presenter::present;
    use chrono::Utc;

    fn sample() -> Assessment {
        let input = ApplicantInput::default();
        let result = RiskResult {
            probability: 0.274,
            credit_score: 735,
            rating: "BBB".to_string(),
        };
        let presentation = present(&input, &result);
        Assessment {
            assessed_at: Utc::now(),
            model: "test".to_string(),
            input,
            result,
            presentation,
        }
    }

    #[test]
    fn assessment_card_lists_results() {
        let txt = format_assessment(&sample());
        assert!(txt.contains("Loan to income: 2.13 (✓ Normal)"), "{txt}");
        assert!(txt.contains("27.4%  Medium Risk"), "{txt}");
        assert!(txt.contains("735  Good"), "{txt}");
        assert!(txt.contains("BBB  #f39c12"), "{txt}");
        assert!(txt.contains("₹2,560,000 over 36 months"), "{txt}");
    }

    #[test]
    fn guide_uses_the_classifier_thresholds() {
        let txt = format_guide();
        assert!(txt.contains("Low    (0-20%)"));
        assert!(txt.contains("High   (50%+)"));
        assert!(txt.contains("650-749"));
        assert!(txt.contains("Below 650"));
    }

    #[test]
    fn about_has_disclaimer() {
        assert!(format_about().contains("Disclaimer"));
    }
}
