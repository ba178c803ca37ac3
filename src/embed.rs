//! Word embedding backends.
//!
//! Every backend implements [`Embedder`]. The pretrained sentence models run
//! through `fastembed` and need the `model` feature; [`NgramEmbedder`] hashes
//! character trigrams and works offline with no model download.

use sha2::{Digest, Sha256};

use crate::Result;

/// Turns batches of text into fixed-length vectors.
pub trait Embedder {
    /// Identifier stored in the cache header. Vectors from different ids are
    /// never mixed.
    fn model_id(&self) -> &str;

    /// Length of every vector returned by [`Embedder::embed_batch`].
    fn dimension(&self) -> usize;

    /// Encode `texts`, returning one vector per input in the same order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Embedding backends selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    /// paraphrase-multilingual-MiniLM-L12-v2 (384 dimensions).
    #[default]
    MultilingualMinilm,
    /// paraphrase-multilingual-mpnet-base-v2 (768 dimensions).
    MultilingualMpnet,
    /// Hashed character trigrams, no download required.
    Ngram,
}

impl ModelKind {
    pub fn id(self) -> &'static str {
        match self {
            ModelKind::MultilingualMinilm => "paraphrase-multilingual-MiniLM-L12-v2",
            ModelKind::MultilingualMpnet => "paraphrase-multilingual-mpnet-base-v2",
            ModelKind::Ngram => NgramEmbedder::MODEL_ID,
        }
    }
}

/// Build the embedder for `kind`.
pub fn create_embedder(kind: ModelKind) -> Result<Box<dyn Embedder>> {
    match kind {
        ModelKind::Ngram => Ok(Box::new(NgramEmbedder::default())),
        #[cfg(feature = "model")]
        other => Ok(Box::new(ModelEmbedder::new(other)?)),
        #[cfg(not(feature = "model"))]
        other => Err(crate::ContextoError::Config(format!(
            "model '{}' needs the `model` feature; rebuild with it or use --model ngram",
            other.id()
        ))),
    }
}

/// Offline embedder: each character trigram of `^word$` is hashed to a
/// signed bucket, and the bucket counts are L2-normalized.
#[derive(Debug, Clone)]
pub struct NgramEmbedder {
    dim: usize,
}

impl NgramEmbedder {
    pub const MODEL_ID: &'static str = "ngram-trigram";
    pub const DEFAULT_DIM: usize = 256;

    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut out = vec![0.0f32; self.dim];
        let padded: Vec<char> = std::iter::once('^')
            .chain(text.chars())
            .chain(std::iter::once('$'))
            .collect();
        if text.is_empty() {
            return out;
        }
        for gram in padded.windows(3) {
            let gram: String = gram.iter().collect();
            let digest = Sha256::digest(gram.as_bytes());
            let bucket = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) as usize
                % self.dim;
            let sign = if digest[4] & 1 == 0 { 1.0 } else { -1.0 };
            out[bucket] += sign;
        }
        let norm = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            out.iter_mut().for_each(|x| *x /= norm);
        }
        out
    }
}

impl Default for NgramEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIM)
    }
}

impl Embedder for NgramEmbedder {
    fn model_id(&self) -> &str {
        Self::MODEL_ID
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

#[cfg(feature = "model")]
pub use model::ModelEmbedder;

#[cfg(feature = "model")]
mod model {
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

    use super::{Embedder, ModelKind};
    use crate::{ContextoError, Result};

    /// Pretrained sentence-embedding model run locally through ONNX.
    pub struct ModelEmbedder {
        kind: ModelKind,
        dim: usize,
        model: TextEmbedding,
    }

    impl ModelEmbedder {
        pub fn new(kind: ModelKind) -> Result<Self> {
            let (model, dim) = match kind {
                ModelKind::MultilingualMinilm => (EmbeddingModel::ParaphraseMLMiniLML12V2, 384),
                ModelKind::MultilingualMpnet => (EmbeddingModel::ParaphraseMLMpnetBaseV2, 768),
                ModelKind::Ngram => {
                    return Err(ContextoError::Config(
                        "the ngram embedder is not a pretrained model".into(),
                    ))
                }
            };
            tracing::info!(model = kind.id(), "loading embedding model");
            let model = TextEmbedding::try_new(
                InitOptions::new(model).with_show_download_progress(true),
            )
            .map_err(|e| ContextoError::Embedding(format!("loading {}: {e}", kind.id())))?;
            Ok(Self { kind, dim, model })
        }
    }

    impl Embedder for ModelEmbedder {
        fn model_id(&self) -> &str {
            self.kind.id()
        }

        fn dimension(&self) -> usize {
            self.dim
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            self.model
                .embed(refs, Some(texts.len().max(1)))
                .map_err(|e| ContextoError::Embedding(e.to_string()))
        }
    }
}
