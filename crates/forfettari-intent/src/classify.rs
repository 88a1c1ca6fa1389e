//! Keyword predicates over a lowercased question.
//!
//! Each rule is an independent, pure function so it can be checked on its
//! own. They are heuristics: adding a keyword widens a rule, nothing more.
//!
//! Keywords match whole words. A trailing `*` turns a keyword into a word
//! prefix (`scadenz*` matches "scadenza" and "scadenze").

use once_cell::sync::Lazy;
use regex::Regex;

/// Alternation of `keywords`, each anchored on word boundaries.
fn keyword_regex(keywords: &[&str]) -> Regex {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|keyword| {
            let (word, prefix) = match keyword.strip_suffix('*') {
                Some(stem) => (stem, true),
                None => (*keyword, false),
            };
            let starts_word = word.chars().next().is_some_and(|c| c.is_alphanumeric());
            let ends_word = !prefix && word.chars().last().is_some_and(|c| c.is_alphanumeric());
            format!(
                "{}{}{}",
                if starts_word { r"\b" } else { "" },
                regex::escape(word),
                if ends_word { r"\b" } else { "" }
            )
        })
        .collect();
    Regex::new(&alternatives.join("|")).expect("escaped keyword alternation compiles")
}

const REGIME: &[&str] = &["forfettari*", "forfetari*", "forfait*", "regime agevolato"];

const COEFFICIENT: &[&str] = &["coefficient*", "redditività", "redditivita"];

const THRESHOLD: &[&str] = &[
    "soglia",
    "soglie",
    "limite",
    "limiti",
    "tetto",
    "85.000",
    "85000",
    "85 mila",
    "100.000",
    "100000",
    "100 mila",
    "superamento",
    "supero",
    "sforamento",
    "fino a quanto",
];

const REVENUE: &[&str] = &["ricavi", "compensi", "fatturato"];

const TAX_RATE: &[&str] = &[
    "aliquot*",
    "imposta sostitutiva",
    "percentual*",
    "5%",
    "15%",
    "5 per cento",
    "15 per cento",
    "quanto si paga",
    "quante tasse",
    "tassazione",
];

const DEADLINE: &[&str] = &[
    "scadenz*",
    "entro quando",
    "termine",
    "termini",
    "quando si paga",
    "quando pagare",
    "versament*",
    "acconto",
    "acconti",
    "saldo",
    "f24",
];

const CONTRIBUTIONS: &[&str] = &["contribut*", "inps", "previdenz*", "gestione separata", "artigian*", "commerciant*"];

const EXCLUSIONS: &[&str] = &[
    "esclus*",
    "ostativ*",
    "incompatib*",
    "posso aderire",
    "posso accedere",
    "requisiti",
    "partecipazion*",
    "dipendent*",
    "non può",
    "non posso",
];

static REGIME_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(REGIME));
static COEFFICIENT_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(COEFFICIENT));
static THRESHOLD_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(THRESHOLD));
static REVENUE_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(REVENUE));
static TAX_RATE_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(TAX_RATE));
static DEADLINE_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(DEADLINE));
static CONTRIBUTIONS_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(CONTRIBUTIONS));
static EXCLUSIONS_RE: Lazy<Regex> = Lazy::new(|| keyword_regex(EXCLUSIONS));

/// Mentions the flat-rate regime by name.
pub fn mentions_regime(query: &str) -> bool {
    REGIME_RE.is_match(query)
}

/// Asks for the profitability coefficient of an activity code.
pub fn asks_coefficient(query: &str) -> bool {
    COEFFICIENT_RE.is_match(query)
}

/// Asks about the revenue/income threshold.
pub fn asks_threshold(query: &str) -> bool {
    THRESHOLD_RE.is_match(query)
}

/// Talks about revenue or fees, without necessarily asking for the threshold.
pub fn mentions_revenue(query: &str) -> bool {
    REVENUE_RE.is_match(query)
}

/// Asks about the substitute tax rate.
pub fn asks_tax_rate(query: &str) -> bool {
    TAX_RATE_RE.is_match(query)
}

pub fn asks_deadline(query: &str) -> bool {
    DEADLINE_RE.is_match(query)
}

pub fn asks_contributions(query: &str) -> bool {
    CONTRIBUTIONS_RE.is_match(query)
}

pub fn asks_exclusions(query: &str) -> bool {
    EXCLUSIONS_RE.is_match(query)
}
