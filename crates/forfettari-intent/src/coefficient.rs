//! Profitability coefficients by ATECO activity code.
//!
//! The two-digit division prefix decides the coefficient, except for
//! divisions 46 and 47 where the group after the dot matters.

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;

/// First two-digit number after the `ateco` keyword, with an optional sub-code.
static ATECO_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ateco\D{0,20}?(\d{2})(?:\.(\d{1,2}))?").expect("ateco pattern compiles"));

/// Both coefficient answers cite the same sources.
pub const COEFFICIENT_CITATIONS: [&str; 2] =
    ["Legge_190_2014_allegato_4_coefficienti.txt", "Circolare_AdE_10E_2016.txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtecoCode<'a> {
    pub prefix: u8,
    /// Digits after the dot, e.g. `"81"` for `47.81`.
    pub sub_code: Option<&'a str>,
}

pub fn extract_code(query: &str) -> Option<AtecoCode<'_>> {
    let caps = ATECO_CODE.captures(query)?;
    let prefix = caps.get(1)?.as_str().parse().ok()?;
    Some(AtecoCode { prefix, sub_code: caps.get(2).map(|m| m.as_str()) })
}

#[derive(Debug, PartialEq, Eq)]
pub struct CoefficientRule {
    pub ranges: &'static [RangeInclusive<u8>],
    pub percent: u8,
    pub category: &'static str,
}

/// Ordered; the first rule containing the prefix wins.
pub const COEFFICIENT_TABLE: &[CoefficientRule] = &[
    CoefficientRule { ranges: &[10..=11], percent: 40, category: "Industrie alimentari e delle bevande" },
    CoefficientRule { ranges: &[45..=45], percent: 40, category: "Commercio all'ingrosso e al dettaglio" },
    CoefficientRule { ranges: &[41..=43, 68..=68], percent: 86, category: "Costruzioni e attività immobiliari" },
    CoefficientRule {
        ranges: &[55..=56],
        percent: 40,
        category: "Attività dei servizi di alloggio e di ristorazione",
    },
    CoefficientRule {
        ranges: &[64..=66, 69..=75, 85..=85, 86..=88],
        percent: 78,
        category: "Attività professionali, scientifiche, tecniche, sanitarie, di istruzione, servizi finanziari ed assicurativi",
    },
    CoefficientRule {
        ranges: &[
            1..=3,
            5..=9,
            12..=33,
            35..=39,
            49..=53,
            58..=63,
            77..=82,
            84..=84,
            90..=99,
        ],
        percent: 67,
        category: "Altre attività economiche",
    },
];

pub fn lookup(prefix: u8) -> Option<&'static CoefficientRule> {
    COEFFICIENT_TABLE.iter().find(|rule| rule.ranges.iter().any(|r| r.contains(&prefix)))
}

#[derive(Debug, PartialEq, Eq)]
pub struct SubCodeRule {
    pub label: &'static str,
    /// Leading digits after the dot that select this rule.
    pub groups: &'static [&'static str],
    pub percent: u8,
    pub description: &'static str,
}

impl SubCodeRule {
    fn matches(&self, sub_code: &str) -> bool {
        self.groups.iter().any(|g| sub_code.starts_with(g))
    }
}

const DIVISION_46: &[SubCodeRule] = &[
    SubCodeRule { label: "46.1", groups: &["1"], percent: 62, description: "Intermediari del commercio" },
    SubCodeRule {
        label: "46.2 - 46.9",
        groups: &["2", "3", "4", "5", "6", "7", "8", "9"],
        percent: 40,
        description: "Commercio all'ingrosso",
    },
];

const DIVISION_47: &[SubCodeRule] = &[
    SubCodeRule {
        label: "47.1 - 47.7, 47.9",
        groups: &["1", "2", "3", "4", "5", "6", "7", "9"],
        percent: 40,
        description: "Commercio al dettaglio",
    },
    SubCodeRule {
        label: "47.81",
        groups: &["81"],
        percent: 40,
        description: "Commercio ambulante di prodotti alimentari e bevande",
    },
    SubCodeRule {
        label: "47.82 - 47.89",
        groups: &["82", "83", "84", "85", "86", "87", "88", "89"],
        percent: 54,
        description: "Commercio ambulante di altri prodotti",
    },
];

/// Sub-code rules of a split division, or `None` when one coefficient covers it.
pub fn sub_code_rules(prefix: u8) -> Option<&'static [SubCodeRule]> {
    match prefix {
        46 => Some(DIVISION_46),
        47 => Some(DIVISION_47),
        _ => None,
    }
}

#[derive(Debug)]
pub enum Coefficient {
    Flat { prefix: u8, rule: &'static CoefficientRule },
    /// `matched` is set only when the query named a sub-code that picks one rule.
    SubCoded { prefix: u8, rules: &'static [SubCodeRule], matched: Option<&'static SubCodeRule> },
}

/// Resolve a code to its coefficient. Split divisions never reach the generic table.
pub fn resolve(code: AtecoCode<'_>) -> Option<Coefficient> {
    if let Some(rules) = sub_code_rules(code.prefix) {
        let matched = code.sub_code.and_then(|sub| rules.iter().find(|r| r.matches(sub)));
        return Some(Coefficient::SubCoded { prefix: code.prefix, rules, matched });
    }
    lookup(code.prefix).map(|rule| Coefficient::Flat { prefix: code.prefix, rule })
}

impl Coefficient {
    pub fn prefix(&self) -> u8 {
        match self {
            Self::Flat { prefix, .. } | Self::SubCoded { prefix, .. } => *prefix,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Flat { prefix, rule } => format!(
                "Per i codici ATECO che iniziano con {prefix:02} ({}) il coefficiente di redditività \
                 del regime forfettario è del {}%.",
                rule.category, rule.percent
            ),
            Self::SubCoded { prefix, matched: Some(rule), .. } => format!(
                "Per il codice ATECO {} ({}) il coefficiente di redditività del regime forfettario \
                 è del {}%. Attenzione: la divisione {prefix} ha coefficienti diversi a seconda della sottocategoria.",
                rule.label, rule.description, rule.percent
            ),
            Self::SubCoded { prefix, rules, matched: None } => {
                let mut text = format!(
                    "Il codice ATECO {prefix} non ha un unico coefficiente di redditività: \
                     dipende dalla sottocategoria."
                );
                for rule in rules.iter() {
                    text.push_str(&format!("\n- {} ({}): {}%", rule.label, rule.description, rule.percent));
                }
                text.push_str("\nIndica il codice completo per una risposta precisa.");
                text
            }
        }
    }
}
