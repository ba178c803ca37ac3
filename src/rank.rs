//! Similarity ranking of the dictionary against the secret word.

use std::collections::HashMap;

use serde::Serialize;

use crate::store::VectorStore;
use crate::{ContextoError, Result};

/// Cosine similarity of two equal-length vectors. Zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut na = 0.0f32;
    let mut nb = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

/// Similarity of `query` against every row of `store`, in dictionary order.
pub fn similarities(store: &VectorStore, query: &[f32]) -> Vec<f32> {
    store.iter().map(|(_, v)| cosine_similarity(query, v)).collect()
}

/// Dictionary indices ordered by descending score. Ties keep dictionary order.
/// When `pinned` is given, that index comes first regardless of its score.
pub fn order_by_score(scores: &[f32], pinned: Option<usize>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        let pa = Some(a) == pinned;
        let pb = Some(b) == pinned;
        pb.cmp(&pa).then_with(|| scores[b].total_cmp(&scores[a]))
    });
    order
}

/// A word with its similarity to some reference word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub rank: usize,
    pub word: String,
    pub score: f32,
}

/// Word → 1-based rank for one secret word.
///
/// Ranks form a bijection onto `1..=len()`, and the secret is always rank 1.
#[derive(Debug, Clone)]
pub struct RankMap {
    secret: String,
    /// Words in rank order; `ordered[r - 1]` has rank `r`.
    ordered: Vec<String>,
    scores: Vec<f32>,
    ranks: HashMap<String, usize>,
}

impl RankMap {
    pub fn compute(store: &VectorStore, secret: &str) -> Result<Self> {
        let idx = store
            .index_of(secret)
            .ok_or_else(|| ContextoError::UnknownWord(secret.to_string()))?;
        let all = similarities(store, store.row(idx));
        let order = order_by_score(&all, Some(idx));

        let words = store.words();
        let mut ordered = Vec::with_capacity(order.len());
        let mut scores = Vec::with_capacity(order.len());
        let mut ranks = HashMap::with_capacity(order.len());
        for (pos, &i) in order.iter().enumerate() {
            ranks.insert(words[i].clone(), pos + 1);
            ordered.push(words[i].clone());
            scores.push(all[i]);
        }
        tracing::debug!(secret, words = ordered.len(), "ranking computed");
        Ok(Self {
            secret: secret.to_string(),
            ordered,
            scores,
            ranks,
        })
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn rank_of(&self, word: &str) -> Option<usize> {
        self.ranks.get(word).copied()
    }

    pub fn word_at(&self, rank: usize) -> Option<&str> {
        rank.checked_sub(1)
            .and_then(|i| self.ordered.get(i))
            .map(String::as_str)
    }

    pub fn score_of(&self, word: &str) -> Option<f32> {
        self.rank_of(word).map(|r| self.scores[r - 1])
    }
}

/// The `top_n` words most similar to `word`, excluding `word` itself.
pub fn neighbors(store: &VectorStore, word: &str, top_n: usize) -> Result<Vec<Neighbor>> {
    let idx = store
        .index_of(word)
        .ok_or_else(|| ContextoError::UnknownWord(word.to_string()))?;
    let scores = similarities(store, store.row(idx));
    let words = store.words();
    Ok(order_by_score(&scores, None)
        .into_iter()
        .filter(|&i| i != idx)
        .take(top_n)
        .enumerate()
        .map(|(pos, i)| Neighbor {
            rank: pos + 1,
            word: words[i].clone(),
            score: scores[i],
        })
        .collect())
}
