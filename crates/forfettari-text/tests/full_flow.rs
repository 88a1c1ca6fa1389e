use std::fs;
use std::path::Path;

use forfettari_core::config::ChunkingConfig;
use forfettari_core::{Error, Retriever};
use forfettari_text::{store, TfIdfIndexer, TfIdfSearchEngine};
use tempfile::TempDir;

const AGGREGATE: &str = "tutti_i_documenti.txt";

fn write_corpus(dir: &Path) {
    fs::write(dir.join("doc_a.txt"), "ricavi soglia forfettario").unwrap();
    fs::write(dir.join("doc_b.txt"), "imposta sostitutiva forfettario").unwrap();
    fs::write(dir.join(AGGREGATE), "ricavi soglia forfettario imposta sostitutiva forfettario").unwrap();
}

#[test]
fn build_save_load_search() {
    let tmp = TempDir::new().unwrap();
    let corpus = tmp.path().join("testi");
    fs::create_dir_all(&corpus).unwrap();
    write_corpus(&corpus);
    let index_file = tmp.path().join("rag_index/index.json");

    let indexer = TfIdfIndexer::new(ChunkingConfig::new(100, 10)).expect("indexer");
    let index = indexer.build_from_directory(&corpus, AGGREGATE).expect("build");
    assert_eq!(index.len(), 2, "aggregate file is not indexed");
    assert_eq!(index.sources(), vec!["doc_a.txt", "doc_b.txt"]);
    assert!(index.idf["forfettario"] < index.idf["ricavi"]);

    store::save(&index, &index_file).expect("save");
    let loaded = store::load(&index_file).expect("load");
    assert_eq!(loaded, index);

    let engine = TfIdfSearchEngine::new(loaded);
    let results = engine.search("soglia forfettario", 1, 0.0);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, "doc_a.txt");
    assert_eq!(results[0].chunk_id, 0);

    let all = engine.search("soglia forfettario", 10, 0.0);
    assert_eq!(all.len(), 2);
    assert!(all[0].score > all[1].score);
}

#[test]
fn empty_corpus_fails_without_touching_existing_index() {
    let tmp = TempDir::new().unwrap();
    let corpus = tmp.path().join("empty");
    fs::create_dir_all(&corpus).unwrap();
    fs::write(corpus.join(AGGREGATE), "only the aggregate").unwrap();
    let index_file = tmp.path().join("index.json");
    fs::write(&index_file, "previous").unwrap();

    let indexer = TfIdfIndexer::new(ChunkingConfig::default()).unwrap();
    let err = indexer.build_from_directory(&corpus, AGGREGATE).unwrap_err();
    assert!(matches!(err, Error::CorpusEmpty(_)));
    assert_eq!(fs::read_to_string(&index_file).unwrap(), "previous");
}

#[test]
fn long_documents_produce_contiguous_overlapping_chunks() {
    let tmp = TempDir::new().unwrap();
    let sentence = "Il contribuente che applica il regime forfettario determina il reddito imponibile. ";
    fs::write(tmp.path().join("lungo.txt"), sentence.repeat(40)).unwrap();

    let index = TfIdfIndexer::new(ChunkingConfig::new(300, 50))
        .unwrap()
        .build_from_directory(tmp.path(), AGGREGATE)
        .unwrap();
    assert!(index.len() > 1);
    for (expected, chunk) in index.chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_id, expected);
        assert!(chunk.text.chars().count() <= 300);
    }
}

#[test]
fn repeated_searches_are_stable() {
    let tmp = TempDir::new().unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        fs::write(tmp.path().join(name), "soglia ricavi compensi").unwrap();
    }
    let index = TfIdfIndexer::new(ChunkingConfig::default()).unwrap().build_from_directory(tmp.path(), AGGREGATE).unwrap();
    let engine = TfIdfSearchEngine::new(index);
    let first = engine.search("soglia", 3, 0.0);
    for _ in 0..5 {
        assert_eq!(engine.search("soglia", 3, 0.0), first);
    }
    let order: Vec<_> = first.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(order, vec!["a.txt", "b.txt", "c.txt"]);
}
