// 📂 Scenario Batches - analyze many mergers from one CSV file
//
// Header:
//   name,earnings_a,shares_a,share_price_a,total_debt_a,total_equity_a,
//   earnings_b,shares_b,share_price_b,total_debt_b,total_equity_b,purchase_price_b
//
// Each row is analyzed on its own; one failing row never affects the rest.

use crate::calculator::{analyze_merger, MergerResult};
use crate::error::{AnalysisResult, MergerError};
use crate::financials::{CompanyFinancials, MergerInputs};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Flat CSV row, one merger per line
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ScenarioRow {
    name: String,
    earnings_a: f64,
    shares_a: f64,
    share_price_a: f64,
    total_debt_a: f64,
    total_equity_a: f64,
    earnings_b: f64,
    shares_b: f64,
    share_price_b: f64,
    total_debt_b: f64,
    total_equity_b: f64,
    purchase_price_b: f64,
}

impl From<ScenarioRow> for NamedScenario {
    fn from(row: ScenarioRow) -> Self {
        NamedScenario {
            name: row.name,
            inputs: MergerInputs::new(
                CompanyFinancials {
                    earnings: row.earnings_a,
                    shares_outstanding: row.shares_a,
                    share_price: row.share_price_a,
                    total_debt: row.total_debt_a,
                    total_equity: row.total_equity_a,
                },
                CompanyFinancials {
                    earnings: row.earnings_b,
                    shares_outstanding: row.shares_b,
                    share_price: row.share_price_b,
                    total_debt: row.total_debt_b,
                    total_equity: row.total_equity_b,
                },
                row.purchase_price_b,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub inputs: MergerInputs,
}

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub outcome: AnalysisResult<MergerResult>,
}

impl ScenarioOutcome {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn load_scenarios(csv_path: &Path) -> AnalysisResult<Vec<NamedScenario>> {
    let file = std::fs::File::open(csv_path)?;
    let scenarios = read_scenarios(file)?;
    info!(path = %csv_path.display(), count = scenarios.len(), "loaded merger scenarios");
    Ok(scenarios)
}

pub fn read_scenarios<R: Read>(reader: R) -> AnalysisResult<Vec<NamedScenario>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut scenarios = Vec::new();
    for (index, result) in rdr.deserialize::<ScenarioRow>().enumerate() {
        let row = result?;
        let scenario = NamedScenario::from(row);

        scenario.inputs.ensure_finite().map_err(|e| match e {
            MergerError::InvalidInput { field, reason } => MergerError::InvalidInput {
                field: format!("row {} ({}): {}", index + 1, scenario.name, field),
                reason,
            },
            other => other,
        })?;

        scenarios.push(scenario);
    }

    Ok(scenarios)
}

pub fn analyze_scenarios(scenarios: &[NamedScenario]) -> Vec<ScenarioOutcome> {
    scenarios
        .iter()
        .map(|scenario| {
            let outcome = analyze_merger(&scenario.inputs);
            if let Err(e) = &outcome {
                warn!(scenario = %scenario.name, error = %e, "scenario analysis failed");
            }
            ScenarioOutcome {
                name: scenario.name.clone(),
                outcome,
            }
        })
        .collect()
}
