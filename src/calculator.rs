// 🧮 Merger Calculator - pre-merger ratios and post-merger projection
//
// Fixed pipeline, one atomic pass:
//   1. EPS, P/E, D/E, ROE for each company
//   2. new_shares = purchase_price_b / share_price_a   (100% stock-for-stock)
//   3. post EPS   = (earnings_a + earnings_b) / (shares_a + new_shares)
//   4. equity     = equity_a + equity_b + new_shares * price_a - purchase_price_b
//   5. post D/E   = (debt_a + debt_b) / equity
//   6. post P/E   = price_a / post EPS              (A's price held constant)
//   7. stakes     = shares_a and new_shares as % of total shares
//
// The first zero denominator aborts with `MergerError::DivisionByZero`.

use crate::classification::{classify_leverage, classify_merger, MergerType};
use crate::error::AnalysisResult;
use crate::financials::MergerInputs;
use crate::ratios::{checked_div, de_ratio_named, eps_named, pe_ratio_named, roe_named};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Intermediate quantities of the stock-for-stock deal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealStructure {
    pub new_shares_issued: f64,
    pub total_shares_outstanding: f64,
    pub combined_earnings: f64,
    pub combined_debt: f64,
    pub combined_equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergerResult {
    // Pre-merger, per company
    pub eps_a: f64,
    pub eps_b: f64,
    pub pe_a: f64,
    pub pe_b: f64,
    pub de_a: f64,
    pub de_b: f64,
    pub roe_a: f64,
    pub roe_b: f64,

    // Post-merger
    pub post_merger_eps: f64,
    pub post_merger_de: f64,
    pub post_merger_pe: f64,

    // Ownership of the combined entity, percent
    pub stake_a_pct: f64,
    pub stake_b_pct: f64,

    pub merger_type: MergerType,
    pub stake_comment: String,
    pub de_comment: String,

    pub deal: DealStructure,
}

// ============================================================================
// ANALYSIS
// ============================================================================

pub fn analyze_merger(inputs: &MergerInputs) -> AnalysisResult<MergerResult> {
    let a = &inputs.company_a;
    let b = &inputs.company_b;

    // Pre-merger
    let eps_a = eps_named(a.earnings, a.shares_outstanding, "eps_a")?;
    let eps_b = eps_named(b.earnings, b.shares_outstanding, "eps_b")?;
    let pe_a = pe_ratio_named(eps_a, a.share_price, "pe_a")?;
    let pe_b = pe_ratio_named(eps_b, b.share_price, "pe_b")?;
    let de_a = de_ratio_named(a.total_debt, a.total_equity, "de_a")?;
    let de_b = de_ratio_named(b.total_debt, b.total_equity, "de_b")?;
    let roe_a = roe_named(a.earnings, a.total_equity, "roe_a")?;
    let roe_b = roe_named(b.earnings, b.total_equity, "roe_b")?;

    // Deal paid entirely in A's stock
    let new_shares_issued = checked_div(inputs.purchase_price_b, a.share_price, "new_shares_issued")?;

    let combined_earnings = a.earnings + b.earnings;
    let total_shares_outstanding = a.shares_outstanding + new_shares_issued;
    let post_merger_eps = eps_named(combined_earnings, total_shares_outstanding, "post_merger_eps")?;

    let combined_debt = a.total_debt + b.total_debt;
    let combined_equity = a.total_equity + b.total_equity
        + (new_shares_issued * a.share_price)
        - inputs.purchase_price_b;
    let post_merger_de = de_ratio_named(combined_debt, combined_equity, "post_merger_de")?;

    // A's pre-merger price is assumed unchanged after the deal
    let post_merger_pe = pe_ratio_named(post_merger_eps, a.share_price, "post_merger_pe")?;

    let stake_a_pct = a.shares_outstanding / total_shares_outstanding * 100.0;
    let stake_b_pct = new_shares_issued / total_shares_outstanding * 100.0;

    let (merger_type, stake_comment) = classify_merger(stake_a_pct);
    let de_comment = classify_leverage(post_merger_de);

    debug!(
        merger_type = merger_type.label(),
        stake_a_pct,
        stake_b_pct,
        post_merger_de,
        "merger analyzed"
    );

    Ok(MergerResult {
        eps_a,
        eps_b,
        pe_a,
        pe_b,
        de_a,
        de_b,
        roe_a,
        roe_b,
        post_merger_eps,
        post_merger_de,
        post_merger_pe,
        stake_a_pct,
        stake_b_pct,
        merger_type,
        stake_comment,
        de_comment,
        deal: DealStructure {
            new_shares_issued,
            total_shares_outstanding,
            combined_earnings,
            combined_debt,
            combined_equity,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergerError;
    use crate::financials::CompanyFinancials;

    const EPSILON: f64 = 1e-9;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < EPSILON
    }

    fn company(earnings: f64, shares: f64, price: f64, debt: f64, equity: f64) -> CompanyFinancials {
        CompanyFinancials {
            earnings,
            shares_outstanding: shares,
            share_price: price,
            total_debt: debt,
            total_equity: equity,
        }
    }

    #[test]
    fn test_canonical_scenario() {
        let result = analyze_merger(&MergerInputs::default()).unwrap();

        assert_eq!(result.eps_a, 5.0);
        assert_eq!(result.eps_b, 4.0);
        assert_eq!(result.pe_a, 2.0);
        assert_eq!(result.pe_b, 2.0);
        assert_eq!(result.de_a, 0.25);
        assert_eq!(result.de_b, 0.25);
        assert_eq!(result.roe_a, 0.625);
        assert_eq!(result.roe_b, 0.5);

        assert_eq!(result.deal.new_shares_issued, 1_000_000.0);
        assert_eq!(result.deal.total_shares_outstanding, 2_000_000.0);
        assert_eq!(result.deal.combined_earnings, 7_000_000.0);
        assert_eq!(result.deal.combined_debt, 3_000_000.0);
        assert_eq!(result.deal.combined_equity, 12_000_000.0);

        assert_eq!(result.post_merger_eps, 3.5);
        assert_eq!(result.post_merger_de, 0.25);
        assert!(approx(result.post_merger_pe, 10.0 / 3.5));
        assert!((result.post_merger_pe - 2.857).abs() < 1e-3);

        assert_eq!(result.stake_a_pct, 50.0);
        assert_eq!(result.stake_b_pct, 50.0);

        // 50 is not > 50
        assert_eq!(result.merger_type, MergerType::MergerOfEquals);
        assert_eq!(
            result.stake_comment,
            "Stake percentages suggest a merger of equals, with balanced control."
        );
        assert_eq!(
            result.de_comment,
            "The post-merger debt-to-equity ratio is within a healthy range."
        );
    }

    #[test]
    fn test_stakes_sum_to_hundred() {
        let cases = [
            (1_000_000.0, 10.0, 10_000_000.0),
            (3_000_000.0, 12.5, 7_500_000.0),
            (250_000.0, 42.0, 90_000_000.0),
            (10.0, 0.01, 1.0),
        ];

        for (shares_a, price_a, purchase) in cases {
            let mut inputs = MergerInputs::default();
            inputs.company_a.shares_outstanding = shares_a;
            inputs.company_a.share_price = price_a;
            inputs.purchase_price_b = purchase;

            let result = analyze_merger(&inputs).unwrap();
            assert!(
                (result.stake_a_pct + result.stake_b_pct - 100.0).abs() < 1e-9,
                "stakes {} + {} for {:?}",
                result.stake_a_pct,
                result.stake_b_pct,
                (shares_a, price_a, purchase)
            );
        }
    }

    #[test]
    fn test_small_purchase_is_acquisition() {
        // 1M existing + 250K new → A holds 80%
        let mut inputs = MergerInputs::default();
        inputs.purchase_price_b = 2_500_000.0;

        let result = analyze_merger(&inputs).unwrap();
        assert_eq!(result.stake_a_pct, 80.0);
        assert_eq!(result.stake_b_pct, 20.0);
        assert_eq!(result.merger_type, MergerType::Acquisition);
    }

    #[test]
    fn test_majority_acquisition_at_sixty_five() {
        // 65/35 split lands exactly on the threshold and falls through
        let inputs = MergerInputs::new(
            company(6_500_000.0, 650_000.0, 10.0, 1_000_000.0, 6_000_000.0),
            CompanyFinancials::example_b(),
            3_500_000.0,
        );

        let result = analyze_merger(&inputs).unwrap();
        assert_eq!(result.stake_a_pct, 65.0);
        assert_eq!(result.merger_type, MergerType::MajorityAcquisition);
    }

    #[test]
    fn test_high_leverage_comment() {
        let inputs = MergerInputs::new(
            company(5_000_000.0, 1_000_000.0, 10.0, 9_000_000.0, 5_000_000.0),
            company(2_000_000.0, 500_000.0, 8.0, 1_000_000.0, 5_000_000.0),
            10_000_000.0,
        );

        let result = analyze_merger(&inputs).unwrap();
        // (9M + 1M) / (5M + 5M) lands exactly on 1.0
        assert_eq!(result.post_merger_de, 1.0);
        assert_eq!(
            result.de_comment,
            "High post-merger D/E ratio indicates significant leverage, posing financial risks."
        );
    }

    #[test]
    fn test_issued_stock_nets_against_purchase_price() {
        let mut inputs = MergerInputs::default();
        inputs.company_a.share_price = 7.0;
        inputs.purchase_price_b = 3_000_000.0;

        let result = analyze_merger(&inputs).unwrap();
        let expected_equity = inputs.company_a.total_equity + inputs.company_b.total_equity;
        assert!((result.deal.combined_equity - expected_equity).abs() < 1e-6);
    }

    #[test]
    fn test_zero_shares_a_fails_on_eps() {
        let mut inputs = MergerInputs::default();
        inputs.company_a.shares_outstanding = 0.0;

        match analyze_merger(&inputs) {
            Err(MergerError::DivisionByZero { quantity }) => assert_eq!(quantity, "eps_a"),
            other => panic!("expected DivisionByZero, got {:?}", other),
        }
    }

    fn zero_division_quantity(inputs: &MergerInputs) -> &'static str {
        match analyze_merger(inputs) {
            Err(MergerError::DivisionByZero { quantity }) => quantity,
            other => panic!("expected DivisionByZero, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_equity_names_the_company() {
        let mut inputs = MergerInputs::default();
        inputs.company_b.total_equity = 0.0;
        assert_eq!(zero_division_quantity(&inputs), "de_b");

        let mut inputs = MergerInputs::default();
        inputs.company_a.total_equity = 0.0;
        assert_eq!(zero_division_quantity(&inputs), "de_a");
    }

    #[test]
    fn test_zero_earnings_fails_on_pe() {
        let mut inputs = MergerInputs::default();
        inputs.company_b.earnings = 0.0;
        assert_eq!(zero_division_quantity(&inputs), "pe_b");

        let mut inputs = MergerInputs::default();
        inputs.company_a.earnings = 0.0;
        assert_eq!(zero_division_quantity(&inputs), "pe_a");
    }

    #[test]
    fn test_zero_combined_equity_fails_on_post_merger_de() {
        // 8M + 4M - 12M of equity written off leaves nothing
        let mut inputs = MergerInputs::default();
        inputs.company_a.total_equity = 12_000_000.0;
        inputs.company_b.total_equity = -12_000_000.0;
        assert_eq!(zero_division_quantity(&inputs), "post_merger_de");
    }

    #[test]
    fn test_zero_price_a_fails_on_new_shares() {
        let mut inputs = MergerInputs::default();
        inputs.company_a.share_price = 0.0;
        // pe_a = 0 / 5 succeeds, so the deal step is the first to fail
        assert_eq!(zero_division_quantity(&inputs), "new_shares_issued");
    }

    #[test]
    fn test_repeated_analysis_is_bit_identical() {
        let mut inputs = MergerInputs::default();
        inputs.company_a.share_price = 13.37;
        inputs.purchase_price_b = 9_876_543.21;

        let first = analyze_merger(&inputs).unwrap();
        let second = analyze_merger(&inputs).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.post_merger_pe.to_bits(), second.post_merger_pe.to_bits());
        assert_eq!(first.stake_a_pct.to_bits(), second.stake_a_pct.to_bits());
    }
}
