//! Word list acquisition, cleaning and encoding.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::config::{Config, DictionarySource};
use crate::embed::Embedder;
use crate::io_utils::io_error;
use crate::store::VectorStore;
use crate::{ContextoError, Result};

/// Minimum number of characters a dictionary word must exceed.
pub const MIN_WORD_CHARS: usize = 2;

/// Download the raw word list with a single blocking GET.
pub fn fetch_word_list(url: &str) -> Result<String> {
    info!(%url, "downloading dictionary");
    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(ContextoError::HttpStatus(response.status().as_u16()));
    }
    Ok(response.text()?)
}

/// Read the raw word list from a local file.
pub fn read_word_list(path: &Path) -> Result<String> {
    info!(path = %path.display(), "reading dictionary file");
    std::fs::read_to_string(path)
        .map_err(|e| io_error("reading dictionary file", path, e).into())
}

/// Fetch the raw word list from wherever `source` points.
pub fn load_raw(source: &DictionarySource) -> Result<String> {
    match source {
        DictionarySource::Url(url) => fetch_word_list(url),
        DictionarySource::File(path) => read_word_list(path),
    }
}

/// Whether a normalized word belongs in the dictionary.
pub fn is_valid_word(word: &str) -> bool {
    word.chars().count() > MIN_WORD_CHARS
        && !word.contains('-')
        && word.chars().all(char::is_alphabetic)
}

/// Lowercase, trim and filter `raw`, then deduplicate and sort.
///
/// Applying this to its own output returns the same list.
pub fn clean_words<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| is_valid_word(w))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Substitute `word` into a prompt template's `{word}` placeholder.
pub fn apply_template(template: &str, word: &str) -> String {
    template.replace("{word}", word)
}

/// Clean `raw_text` and encode every word, in batches, into a store.
pub fn build_store(raw_text: &str, embedder: &dyn Embedder, config: &Config) -> Result<VectorStore> {
    let words = clean_words(raw_text.lines());
    if words.is_empty() {
        return Err(ContextoError::Dictionary(
            "word list contains no usable words".into(),
        ));
    }
    info!(words = words.len(), "dictionary cleaned");

    let start = Instant::now();
    let progress = ProgressBar::new(words.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} words ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut vectors = Vec::with_capacity(words.len());
    for batch in words.chunks(config.batch_size.max(1)) {
        let prompts: Vec<String> = batch
            .iter()
            .map(|w| apply_template(&config.prompt_template, w))
            .collect();
        let encoded = embedder.embed_batch(&prompts)?;
        if encoded.len() != batch.len() {
            return Err(ContextoError::Embedding(format!(
                "model returned {} vectors for {} words",
                encoded.len(),
                batch.len()
            )));
        }
        if let Some((i, v)) = encoded
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != embedder.dimension())
        {
            return Err(ContextoError::Embedding(format!(
                "model returned {} values for '{}', expected {}",
                v.len(),
                batch[i],
                embedder.dimension()
            )));
        }
        vectors.extend(encoded);
        progress.inc(batch.len() as u64);
    }
    progress.finish_and_clear();
    debug!(batches = words.len().div_ceil(config.batch_size.max(1)), "encoding finished");
    info!(
        seconds = start.elapsed().as_secs_f64(),
        model = embedder.model_id(),
        "vectorization complete"
    );

    VectorStore::new(words, vectors)
}
