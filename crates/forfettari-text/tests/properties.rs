use forfettari_core::config::ChunkingConfig;
use forfettari_core::SourceDocument;
use forfettari_text::chunker::{chunk, chunk_spans};
use forfettari_text::search::search;
use forfettari_text::TfIdfIndexer;
use proptest::prelude::*;

fn arb_chunking() -> impl Strategy<Value = ChunkingConfig> {
    (1usize..60).prop_flat_map(|size| (Just(size), 0..size)).prop_map(|(size, overlap)| ChunkingConfig::new(size, overlap))
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zàèìòù \n]{0,300}"
}

fn arb_corpus() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("(soglia|ricavi|imposta|forfettario|aliquota|inps|[a-z]{2,6})( (soglia|ricavi|imposta|forfettario|aliquota|inps|[a-z]{2,6})){0,30}", 1..6)
}

fn build(contents: &[String]) -> forfettari_core::Index {
    let docs: Vec<SourceDocument> = contents
        .iter()
        .enumerate()
        .map(|(i, c)| SourceDocument { name: format!("doc_{i}.txt"), content: c.clone() })
        .collect();
    TfIdfIndexer::new(ChunkingConfig::new(80, 20)).unwrap().build(&docs).unwrap()
}

proptest! {
    /// Every character of the trimmed text falls inside at least one window.
    #[test]
    fn chunk_windows_cover_the_text(text in arb_text(), config in arb_chunking()) {
        let len = text.trim().chars().count();
        let spans = chunk_spans(&text, &config).unwrap();
        let mut covered = vec![false; len];
        for span in &spans {
            prop_assert!(span.end - span.start <= config.chunk_size);
            for flag in &mut covered[span.clone()] {
                *flag = true;
            }
        }
        prop_assert!(covered.into_iter().all(|c| c));
    }

    /// Produced chunks are trimmed, non-empty and within the size limit.
    #[test]
    fn chunks_are_trimmed_and_bounded(text in arb_text(), config in arb_chunking()) {
        for c in chunk(&text, &config).unwrap() {
            prop_assert!(!c.is_empty());
            prop_assert_eq!(c.trim(), c.as_str());
            prop_assert!(c.chars().count() <= config.chunk_size);
        }
    }

    /// Vector norms are 0 or 1 and idf is strictly positive.
    #[test]
    fn index_invariants(corpus in arb_corpus()) {
        let index = build(&corpus);
        prop_assert!(index.idf.values().all(|v| *v > 0.0));
        for c in &index.chunks {
            let norm = c.vector.values().map(|v| v * v).sum::<f64>().sqrt();
            prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-9);
            prop_assert!(c.vector.keys().all(|k| index.idf.contains_key(k)));
        }
    }

    /// Results are sorted, above the threshold and bounded by top_k.
    #[test]
    fn search_respects_ordering_threshold_and_limit(
        corpus in arb_corpus(),
        query in "(soglia|ricavi|imposta|forfettario|zzz)( (soglia|ricavi|imposta|forfettario|zzz)){0,4}",
        top_k in 0usize..6,
        min_score in 0.0f64..0.5,
    ) {
        let index = build(&corpus);
        let results = search(&index, &query, top_k, min_score);
        prop_assert!(results.len() <= top_k);
        prop_assert!(results.iter().all(|r| r.score >= min_score));
        prop_assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    /// Queries made only of unknown words find nothing.
    #[test]
    fn out_of_vocabulary_query_is_empty(corpus in arb_corpus(), word in "[0-9]{3,8}") {
        let index = build(&corpus);
        prop_assert!(search(&index, &word, 10, 0.0).is_empty());
    }
}
