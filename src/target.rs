//! Secret word selection from the curated candidate list.

use std::collections::HashSet;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::io_utils::format_io_error;
use crate::store::VectorStore;
use crate::{ContextoError, Result};

/// Read the candidate file: one word per line, trimmed and lowercased, blank
/// lines dropped. An unreadable file is logged and yields no candidates.
pub fn load_candidates(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_candidates(&text),
        Err(e) => {
            warn!("{}", format_io_error("reading candidates file", path, &e));
            Vec::new()
        }
    }
}

pub fn parse_candidates(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Candidates present in the dictionary, in file order, without repeats.
pub fn valid_candidates(candidates: &[String], store: &VectorStore) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|c| store.contains(c) && seen.insert(c.as_str()))
        .cloned()
        .collect()
}

/// Pick one candidate uniformly at random.
pub fn choose_secret<'a, R: Rng + ?Sized>(valid: &'a [String], rng: &mut R) -> Option<&'a str> {
    valid.choose(rng).map(String::as_str)
}

/// Resolve the secret for a new game: the fixed word when given, otherwise a
/// random valid candidate.
pub fn select_secret<R: Rng + ?Sized>(
    store: &VectorStore,
    fixed: Option<&str>,
    candidates: &[String],
    rng: &mut R,
) -> Result<String> {
    if let Some(word) = fixed {
        let word = word.trim().to_lowercase();
        if !store.contains(&word) {
            return Err(ContextoError::UnknownWord(word));
        }
        return Ok(word);
    }
    let valid = valid_candidates(candidates, store);
    tracing::debug!(candidates = candidates.len(), valid = valid.len(), "candidates filtered");
    choose_secret(&valid, rng)
        .map(str::to_string)
        .ok_or(ContextoError::NoCandidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> VectorStore {
        let words: Vec<String> = ["casa", "mar", "sol"].iter().map(|s| s.to_string()).collect();
        let vectors = vec![vec![1.0]; words.len()];
        VectorStore::new(words, vectors).unwrap()
    }

    #[test]
    fn parse_trims_and_lowercases() {
        assert_eq!(parse_candidates(" Casa \n\n  \nMAR\n"), vec!["casa", "mar"]);
    }

    #[test]
    fn intersection_keeps_file_order() {
        let c = parse_candidates("sol\nlua\ncasa\nsol");
        assert_eq!(valid_candidates(&c, &store()), vec!["sol", "casa"]);
    }

    #[test]
    fn missing_file_gives_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_candidates(&dir.path().join("missing.txt")).is_empty());
    }

    #[test]
    fn fixed_secret_must_exist() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_secret(&store(), Some("MAR"), &[], &mut rng).unwrap(), "mar");
        assert!(matches!(
            select_secret(&store(), Some("lua"), &[], &mut rng),
            Err(ContextoError::UnknownWord(_))
        ));
    }

    #[test]
    fn empty_intersection_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = parse_candidates("lua\nceu");
        assert!(matches!(
            select_secret(&store(), None, &c, &mut rng),
            Err(ContextoError::NoCandidates)
        ));
    }

    #[test]
    fn seeded_choice_is_reproducible() {
        let c = parse_candidates("casa\nmar\nsol");
        let a = select_secret(&store(), None, &c, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = select_secret(&store(), None, &c, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert!(c.contains(&a));
    }
}
