//! Immutable pairing of dictionary words with their embedding vectors.
//!
//! Row `i` of the matrix always belongs to `words[i]`. The only way to build a
//! store is through a constructor that checks this, so code holding a
//! `VectorStore` never has to re-check alignment.

use std::collections::HashMap;

use crate::{ContextoError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct VectorStore {
    words: Vec<String>,
    dim: usize,
    /// Row-major, `words.len() * dim` values.
    data: Vec<f32>,
    index: HashMap<String, usize>,
}

impl VectorStore {
    /// Pair `words` with one vector each.
    pub fn new(words: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if words.len() != vectors.len() {
            return Err(ContextoError::Store(format!(
                "{} words but {} vectors",
                words.len(),
                vectors.len()
            )));
        }
        let dim = vectors.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(words.len() * dim);
        for (word, v) in words.iter().zip(&vectors) {
            if v.len() != dim {
                return Err(ContextoError::Store(format!(
                    "vector for '{word}' has {} values, expected {dim}",
                    v.len()
                )));
            }
            data.extend_from_slice(v);
        }
        Self::from_flat(words, dim, data)
    }

    /// Build from a row-major matrix.
    pub fn from_flat(words: Vec<String>, dim: usize, data: Vec<f32>) -> Result<Self> {
        if words.is_empty() {
            return Err(ContextoError::Store("dictionary is empty".into()));
        }
        if dim == 0 {
            return Err(ContextoError::Store("vectors have zero dimension".into()));
        }
        if data.len() != words.len() * dim {
            return Err(ContextoError::Store(format!(
                "matrix has {} values, expected {} words x {dim}",
                data.len(),
                words.len()
            )));
        }
        let mut index = HashMap::with_capacity(words.len());
        for (i, w) in words.iter().enumerate() {
            if index.insert(w.clone(), i).is_some() {
                return Err(ContextoError::Store(format!("duplicate word '{w}'")));
            }
        }
        Ok(Self {
            words,
            dim,
            data,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The whole matrix, row-major.
    pub fn matrix(&self) -> &[f32] {
        &self.data
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Vector of the `i`-th dictionary word.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn vector(&self, word: &str) -> Option<&[f32]> {
        self.index_of(word).map(|i| self.row(i))
    }

    /// Iterate `(word, vector)` pairs in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> + '_ {
        self.words
            .iter()
            .zip(self.data.chunks_exact(self.dim))
            .map(|(w, v)| (w.as_str(), v))
    }
}
