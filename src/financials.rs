// 🏢 Company Financials - the eleven inputs of a two-company merger
//
// Company A is the acquirer and pays for Company B entirely in newly
// issued A shares. Values are plain f64; no currency or units.

use crate::error::{AnalysisResult, MergerError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Company {
    A,
    B,
}

impl Company {
    pub fn label(&self) -> &'static str {
        match self {
            Company::A => "Company A",
            Company::B => "Company B",
        }
    }
}

// ============================================================================
// COMPANY FINANCIALS
// ============================================================================

/// Preconditions (not enforced): shares_outstanding > 0, share_price > 0,
/// total_equity != 0. Violations surface as `DivisionByZero`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanyFinancials {
    pub earnings: f64,
    pub shares_outstanding: f64,
    pub share_price: f64,
    pub total_debt: f64,
    pub total_equity: f64,
}

impl CompanyFinancials {
    /// Illustrative acquirer: 5M earnings, 1M shares at $10, 2M debt, 8M equity
    pub fn example_a() -> Self {
        CompanyFinancials {
            earnings: 5_000_000.0,
            shares_outstanding: 1_000_000.0,
            share_price: 10.0,
            total_debt: 2_000_000.0,
            total_equity: 8_000_000.0,
        }
    }

    /// Illustrative target: 2M earnings, 500K shares at $8, 1M debt, 4M equity
    pub fn example_b() -> Self {
        CompanyFinancials {
            earnings: 2_000_000.0,
            shares_outstanding: 500_000.0,
            share_price: 8.0,
            total_debt: 1_000_000.0,
            total_equity: 4_000_000.0,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("earnings", self.earnings),
            ("shares_outstanding", self.shares_outstanding),
            ("share_price", self.share_price),
            ("total_debt", self.total_debt),
            ("total_equity", self.total_equity),
        ]
    }
}

// ============================================================================
// MERGER INPUTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergerInputs {
    pub company_a: CompanyFinancials,
    pub company_b: CompanyFinancials,
    /// Value paid for B, settled in new A shares at A's share price
    pub purchase_price_b: f64,
}

impl Default for MergerInputs {
    fn default() -> Self {
        MergerInputs {
            company_a: CompanyFinancials::example_a(),
            company_b: CompanyFinancials::example_b(),
            purchase_price_b: 10_000_000.0,
        }
    }
}

impl MergerInputs {
    pub fn new(company_a: CompanyFinancials, company_b: CompanyFinancials, purchase_price_b: f64) -> Self {
        MergerInputs {
            company_a,
            company_b,
            purchase_price_b,
        }
    }

    pub fn company(&self, which: Company) -> &CompanyFinancials {
        match which {
            Company::A => &self.company_a,
            Company::B => &self.company_b,
        }
    }

    /// Reject NaN and infinities coming in through a parsing boundary.
    /// Sign and zero are not checked here.
    pub fn ensure_finite(&self) -> AnalysisResult<()> {
        let tagged = [("a", &self.company_a), ("b", &self.company_b)];
        for (suffix, company) in tagged {
            for (name, value) in company.fields() {
                if !value.is_finite() {
                    return Err(MergerError::InvalidInput {
                        field: format!("{}_{}", name, suffix),
                        reason: format!("expected a finite number, got {}", value),
                    });
                }
            }
        }

        if !self.purchase_price_b.is_finite() {
            return Err(MergerError::InvalidInput {
                field: "purchase_price_b".to_string(),
                reason: format!("expected a finite number, got {}", self.purchase_price_b),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_illustrative_example() {
        let inputs = MergerInputs::default();
        assert_eq!(inputs.company_a.earnings, 5_000_000.0);
        assert_eq!(inputs.company_a.share_price, 10.0);
        assert_eq!(inputs.company_b.shares_outstanding, 500_000.0);
        assert_eq!(inputs.company_b.total_equity, 4_000_000.0);
        assert_eq!(inputs.purchase_price_b, 10_000_000.0);
    }

    #[test]
    fn test_company_accessor() {
        let inputs = MergerInputs::default();
        assert_eq!(inputs.company(Company::A).share_price, 10.0);
        assert_eq!(inputs.company(Company::B).share_price, 8.0);
        assert_eq!(Company::B.label(), "Company B");
    }

    #[test]
    fn test_ensure_finite_accepts_zero_and_negative() {
        let mut inputs = MergerInputs::default();
        inputs.company_a.shares_outstanding = 0.0;
        inputs.company_b.earnings = -250_000.0;
        assert!(inputs.ensure_finite().is_ok());
    }

    #[test]
    fn test_ensure_finite_names_bad_field() {
        let mut inputs = MergerInputs::default();
        inputs.company_b.total_debt = f64::NAN;
        match inputs.ensure_finite() {
            Err(MergerError::InvalidInput { field, .. }) => assert_eq!(field, "total_debt_b"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }

        let mut inputs = MergerInputs::default();
        inputs.purchase_price_b = f64::INFINITY;
        assert!(inputs.ensure_finite().is_err());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(MergerInputs::default()).unwrap();
        assert_eq!(json["company_a"]["shares_outstanding"], 1_000_000.0);
        assert_eq!(json["purchase_price_b"], 10_000_000.0);

        let back: MergerInputs = serde_json::from_value(json).unwrap();
        assert_eq!(back, MergerInputs::default());
    }
}
