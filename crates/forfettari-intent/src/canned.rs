//! Fixed answers that bypass retrieval and the language model entirely.

use serde::Serialize;

use crate::classify::{asks_coefficient, asks_tax_rate, asks_threshold, mentions_regime};
use crate::coefficient::{extract_code, resolve, Coefficient, COEFFICIENT_CITATIONS};

pub const REGIME_CITATIONS: [&str; 2] =
    ["Legge_190_2014_commi_54-89.txt", "Legge_197_2022_bilancio_2023_comma_54.txt"];

const REGIME_SUMMARY: &str = "\
Il regime forfettario si applica se nell'anno precedente i ricavi o i compensi, \
ragguagliati ad anno, non hanno superato 85.000 euro. \
Se in corso d'anno i ricavi o i compensi superano 100.000 euro il regime cessa \
immediatamente, già dall'anno stesso; se restano tra 85.000 e 100.000 euro si esce \
dall'anno successivo. \
Sul reddito, determinato applicando ai ricavi il coefficiente di redditività del \
proprio codice ATECO, si versa un'imposta sostitutiva del 15%, ridotta al 5% per i \
primi cinque anni di una nuova attività che rispetta i requisiti di legge.";

/// Which rule produced a canned answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CannedRule {
    RegimeThresholdAndRate,
    CoefficientTable { prefix: u8 },
    CoefficientSubCode { prefix: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CannedAnswer {
    #[serde(flatten)]
    pub rule: CannedRule,
    pub text: String,
    pub citations: Vec<String>,
}

type Rule = fn(&str) -> Option<CannedAnswer>;

/// Evaluated in order; the first rule that answers wins.
const RULES: &[Rule] = &[regime_threshold_and_rate, ateco_coefficient];

/// Canned answer for a lowercased question, if any rule applies.
pub fn answer_for(query: &str) -> Option<CannedAnswer> {
    RULES.iter().find_map(|rule| rule(query))
}

fn regime_threshold_and_rate(query: &str) -> Option<CannedAnswer> {
    (mentions_regime(query) && asks_threshold(query) && asks_tax_rate(query)).then(|| CannedAnswer {
        rule: CannedRule::RegimeThresholdAndRate,
        text: REGIME_SUMMARY.to_string(),
        citations: REGIME_CITATIONS.iter().map(|s| (*s).to_string()).collect(),
    })
}

fn ateco_coefficient(query: &str) -> Option<CannedAnswer> {
    if !asks_coefficient(query) {
        return None;
    }
    let coefficient = resolve(extract_code(query)?)?;
    let rule = match coefficient {
        Coefficient::Flat { prefix, .. } => CannedRule::CoefficientTable { prefix },
        Coefficient::SubCoded { prefix, .. } => CannedRule::CoefficientSubCode { prefix },
    };
    Some(CannedAnswer {
        rule,
        text: coefficient.describe(),
        citations: COEFFICIENT_CITATIONS.iter().map(|s| (*s).to_string()).collect(),
    })
}
