//! Auxiliary search strings for known question categories.

use crate::classify::{
    asks_contributions, asks_deadline, asks_exclusions, asks_tax_rate, asks_threshold, mentions_revenue,
};

pub struct ExpansionGroup {
    pub name: &'static str,
    pub trigger: fn(&str) -> bool,
    pub queries: &'static [&'static str],
}

fn asks_threshold_or_revenue(query: &str) -> bool {
    asks_threshold(query) || mentions_revenue(query)
}

pub const EXPANSION_GROUPS: &[ExpansionGroup] = &[
    ExpansionGroup {
        name: "threshold",
        trigger: asks_threshold_or_revenue,
        queries: &[
            "limite ricavi compensi 85.000 euro regime forfettario",
            "superamento soglia 100.000 euro cessazione immediata",
            "ricavi compensi anno precedente ragguagliati ad anno",
        ],
    },
    ExpansionGroup {
        name: "tax",
        trigger: asks_tax_rate,
        queries: &[
            "imposta sostitutiva 15 per cento reddito imponibile",
            "aliquota 5 per cento primi cinque anni nuova attività",
            "imposta sostitutiva irpef addizionali regionali comunali irap",
        ],
    },
    ExpansionGroup {
        name: "deadline",
        trigger: asks_deadline,
        queries: &[
            "termini versamento imposta sostitutiva saldo acconto",
            "acconto 30 giugno 30 novembre modello f24",
            "dichiarazione dei redditi quadro lm termini",
        ],
    },
    ExpansionGroup {
        name: "contribution",
        trigger: asks_contributions,
        queries: &[
            "contributi previdenziali deducibili reddito forfettario",
            "riduzione contributiva 35 per cento artigiani commercianti",
            "gestione separata inps aliquota contributiva",
        ],
    },
    ExpansionGroup {
        name: "exclusion",
        trigger: asks_exclusions,
        queries: &[
            "cause di esclusione regime forfettario",
            "partecipazioni società di persone srl controllo diretto indiretto",
            "redditi lavoro dipendente superiori 30.000 euro",
        ],
    },
];

/// Deduplicated union of the search strings of every group the lowercased
/// query triggers, in group order. Empty when nothing triggers.
pub fn expansion_queries(query: &str) -> Vec<String> {
    union_dedup(EXPANSION_GROUPS.iter().filter(|g| (g.trigger)(query)).map(|g| g.queries))
}

fn union_dedup<'a>(lists: impl Iterator<Item = &'a [&'a str]>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for q in lists.flatten() {
        if !out.iter().any(|seen| seen == q) {
            out.push((*q).to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_trigger_no_expansion() {
        assert!(expansion_queries("come apro una partita iva").is_empty());
    }

    #[test]
    fn single_group() {
        let queries = expansion_queries("quando scade l'acconto?");
        assert_eq!(queries.len(), 3);
        assert!(queries[0].starts_with("termini versamento"));
    }

    #[test]
    fn groups_are_unioned_in_order() {
        let queries = expansion_queries("soglia ricavi e contributi inps");
        assert_eq!(queries.len(), 6);
        assert!(queries[0].starts_with("limite ricavi"));
        assert!(queries[3].starts_with("contributi previdenziali"));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let a: &[&str] = &["uno", "due"];
        let b: &[&str] = &["due", "tre", "uno"];
        assert_eq!(union_dedup([a, b].into_iter()), vec!["uno", "due", "tre"]);
    }

    #[test]
    fn group_names_are_unique() {
        let mut names: Vec<_> = EXPANSION_GROUPS.iter().map(|g| g.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EXPANSION_GROUPS.len());
    }
}
