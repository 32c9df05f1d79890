// 📊 Financial Ratios - EPS, P/E, D/E, ROE
//
// Each ratio is a single checked division:
//   EPS = earnings / shares outstanding
//   P/E = share price / EPS
//   D/E = total debt / total equity
//   ROE = net income / shareholder equity

use crate::error::{AnalysisResult, MergerError};

/// Divide, failing with `DivisionByZero` when the denominator is exactly zero.
pub(crate) fn checked_div(
    numerator: f64,
    denominator: f64,
    quantity: &'static str,
) -> AnalysisResult<f64> {
    if denominator == 0.0 {
        return Err(MergerError::DivisionByZero { quantity });
    }
    Ok(numerator / denominator)
}

/// Earnings per share
pub fn eps(earnings: f64, shares_outstanding: f64) -> AnalysisResult<f64> {
    eps_named(earnings, shares_outstanding, "eps")
}

/// Price-to-earnings ratio
pub fn pe_ratio(eps: f64, share_price: f64) -> AnalysisResult<f64> {
    pe_ratio_named(eps, share_price, "pe_ratio")
}

/// Debt-to-equity ratio
pub fn de_ratio(total_debt: f64, total_equity: f64) -> AnalysisResult<f64> {
    de_ratio_named(total_debt, total_equity, "de_ratio")
}

/// Return on equity
pub fn roe(net_income: f64, shareholder_equity: f64) -> AnalysisResult<f64> {
    roe_named(net_income, shareholder_equity, "roe")
}

// Same formulas, reporting `quantity` (e.g. "pe_b") on a zero denominator

pub(crate) fn eps_named(earnings: f64, shares_outstanding: f64, quantity: &'static str) -> AnalysisResult<f64> {
    checked_div(earnings, shares_outstanding, quantity)
}

pub(crate) fn pe_ratio_named(eps: f64, share_price: f64, quantity: &'static str) -> AnalysisResult<f64> {
    checked_div(share_price, eps, quantity)
}

pub(crate) fn de_ratio_named(total_debt: f64, total_equity: f64, quantity: &'static str) -> AnalysisResult<f64> {
    checked_div(total_debt, total_equity, quantity)
}

pub(crate) fn roe_named(net_income: f64, shareholder_equity: f64, quantity: &'static str) -> AnalysisResult<f64> {
    checked_div(net_income, shareholder_equity, quantity)
}
