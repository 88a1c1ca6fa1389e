//! JSON persistence of a built [`Index`].
//!
//! `save` writes to a temporary file next to the destination and renames it
//! into place, so the previous index stays intact until the new one is
//! complete. `load` trusts the stored vectors and does not re-normalize.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use forfettari_core::{Error, Index, Result};

pub fn save(index: &Index, path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let tmp = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer(&mut writer, index).map_err(|e| encode_error(tmp.path(), e))?;
        writer.flush().map_err(|e| Error::io(tmp.path(), e))?;
    }
    tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    info!(path = %path.display(), chunks = index.len(), terms = index.idf.len(), "saved index");
    Ok(())
}

/// Write failures surface as `Io` on the file being written; only genuine
/// encoding failures are `Serialize`.
fn encode_error(path: &Path, err: serde_json::Error) -> Error {
    if err.is_io() {
        Error::io(path, err.into())
    } else {
        Error::Serialize(err)
    }
}

pub fn load(path: &Path) -> Result<Index> {
    let file = fs::File::open(path).map_err(|_| Error::IndexNotFound(path.to_path_buf()))?;
    let index: Index = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| Error::MalformedIndex { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), chunks = index.len(), terms = index.idf.len(), "loaded index");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use forfettari_core::Chunk;
    use tempfile::TempDir;

    fn sample() -> Index {
        Index {
            idf: [("soglia".to_string(), 1.405_465), ("forfettario".to_string(), 1.0)]
                .into_iter()
                .collect(),
            chunks: vec![Chunk {
                source: "doc_a.txt".to_string(),
                chunk_id: 0,
                text: "soglia forfettario".to_string(),
                vector: [("soglia".to_string(), 0.814_8), ("forfettario".to_string(), 0.579_7)]
                    .into_iter()
                    .collect(),
            }],
        }
    }

    #[test]
    fn round_trips_exactly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/index.json");
        let index = sample();
        save(&index, &path).unwrap();
        assert_eq!(load(&path).unwrap(), index);
    }

    #[test]
    fn save_replaces_previous_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        save(&Index::default(), &path).unwrap();
        save(&sample(), &path).unwrap();
        assert_eq!(load(&path).unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_index_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(load(&tmp.path().join("absent.json")), Err(Error::IndexNotFound(_))));
    }

    #[test]
    fn garbage_is_malformed_index() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load(&path), Err(Error::MalformedIndex { .. })));
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_while_encoding_is_io() {
        let err = serde_json::to_writer(FullDisk, &sample()).unwrap_err();
        let path = Path::new("rag_index/.tmp");
        match encode_error(path, err) {
            Error::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.to_string(), "no space left on device");
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn non_io_encoding_failure_stays_serialize() {
        let err = serde_json::from_str::<Index>("{").unwrap_err();
        assert!(matches!(encode_error(Path::new("x"), err), Error::Serialize(_)));
    }
}
