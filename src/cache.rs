//! On-disk cache of the encoded dictionary.
//!
//! The file is a bincode [`CacheHeader`] followed by the bincode payload. The
//! header records which model and prompt template produced the vectors and a
//! SHA-256 of the payload, so a cache from another model or a truncated file
//! is detected instead of silently reused.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use bincode::Options;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::Config;
use crate::dictionary::{build_store, load_raw};
use crate::embed::Embedder;
use crate::io_utils::io_error;
use crate::store::VectorStore;
use crate::{ContextoError, Result};

pub const CACHE_MAGIC: [u8; 4] = *b"CTXC";
/// Bumped whenever the layout of the header or payload changes.
pub const CACHE_VERSION: u32 = 1;
/// Upper bound on the encoded header, so a damaged length prefix cannot
/// trigger a huge allocation.
const MAX_HEADER_BYTES: u64 = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub model_id: String,
    pub prompt_template: String,
    pub dim: u32,
    pub words: u64,
    /// Hex SHA-256 of the encoded payload.
    pub checksum: String,
}

#[derive(Serialize, Deserialize)]
struct Payload {
    words: Vec<String>,
    matrix: Vec<f32>,
}

/// What a cache must have been built with to be reused.
#[derive(Debug, Clone, Copy)]
pub struct CacheKey<'a> {
    pub model_id: &'a str,
    pub prompt_template: &'a str,
}

/// Same wire format as `bincode::serialize`, with an allocation limit.
fn header_codec() -> impl Options {
    bincode::options()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_HEADER_BYTES)
}

fn codec_error(context: &str, e: bincode::Error) -> ContextoError {
    ContextoError::Cache(format!("{context}: {e}"))
}

/// Write `store` to `path`, replacing any previous cache atomically.
pub fn save(path: &Path, store: &VectorStore, key: CacheKey<'_>) -> Result<()> {
    let payload = bincode::serialize(&Payload {
        words: store.words().to_vec(),
        matrix: store.matrix().to_vec(),
    })
    .map_err(|e| codec_error("encoding payload", e))?;
    let header = CacheHeader {
        magic: CACHE_MAGIC,
        version: CACHE_VERSION,
        model_id: key.model_id.to_string(),
        prompt_template: key.prompt_template.to_string(),
        dim: store.dim() as u32,
        words: store.len() as u64,
        checksum: hex::encode(Sha256::digest(&payload)),
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| io_error("creating cache directory", dir, e))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| io_error("creating temporary cache file", dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        bincode::serialize_into(&mut writer, &header)
            .map_err(|e| codec_error("encoding header", e))?;
        writer.write_all(&payload)?;
        writer.flush()?;
    }
    tmp.persist(path)
        .map_err(|e| io_error("writing cache file", path, e.error))?;
    info!(path = %path.display(), words = store.len(), "cache saved");
    Ok(())
}

/// Read only the header of a cache file.
pub fn read_header(path: &Path) -> Result<CacheHeader> {
    let file = File::open(path).map_err(|e| io_error("opening cache file", path, e))?;
    let mut reader = BufReader::new(file);
    header_codec()
        .deserialize_from(&mut reader)
        .map_err(|e| codec_error("decoding header", e))
}

/// Load a cache and check it against `key`.
pub fn load(path: &Path, key: CacheKey<'_>) -> Result<VectorStore> {
    let file = File::open(path).map_err(|e| io_error("opening cache file", path, e))?;
    let mut reader = BufReader::new(file);
    let header: CacheHeader = header_codec()
        .deserialize_from(&mut reader)
        .map_err(|e| codec_error("decoding header", e))?;

    if header.magic != CACHE_MAGIC {
        return Err(ContextoError::Cache("not a contexto cache file".into()));
    }
    if header.version != CACHE_VERSION {
        return Err(ContextoError::Cache(format!(
            "cache format version {} is not supported (expected {CACHE_VERSION})",
            header.version
        )));
    }
    if header.model_id != key.model_id {
        return Err(ContextoError::Cache(format!(
            "cache was built with model '{}', not '{}'",
            header.model_id, key.model_id
        )));
    }
    if header.prompt_template != key.prompt_template {
        return Err(ContextoError::Cache(format!(
            "cache was built with prompt template '{}', not '{}'",
            header.prompt_template, key.prompt_template
        )));
    }

    let mut payload = Vec::new();
    reader.read_to_end(&mut payload)?;
    if hex::encode(Sha256::digest(&payload)) != header.checksum {
        return Err(ContextoError::Cache("payload checksum mismatch".into()));
    }
    let payload: Payload =
        bincode::deserialize(&payload).map_err(|e| codec_error("decoding payload", e))?;
    if payload.words.len() as u64 != header.words {
        return Err(ContextoError::Cache(format!(
            "header lists {} words, payload has {}",
            header.words,
            payload.words.len()
        )));
    }
    VectorStore::from_flat(payload.words, header.dim as usize, payload.matrix)
}

/// Load the cached store, or build it from the dictionary source and cache it.
///
/// A cache that fails any check is logged and rebuilt. With `force` the
/// existing cache is ignored.
pub fn load_or_build(config: &Config, embedder: &dyn Embedder, force: bool) -> Result<VectorStore> {
    let key = CacheKey {
        model_id: embedder.model_id(),
        prompt_template: &config.prompt_template,
    };
    let path = config.cache_path.as_path();
    if !force && path.exists() {
        match load(path, key) {
            Ok(store) => {
                info!(path = %path.display(), words = store.len(), "loaded cached dictionary");
                return Ok(store);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "discarding cache"),
        }
    }

    let raw = load_raw(&config.dictionary)?;
    let store = build_store(&raw, embedder, config)?;
    save(path, &store, key)?;
    Ok(store)
}
