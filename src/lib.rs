//! Contexto: guess the secret word by semantic distance.
//!
//! The dictionary is encoded once with a sentence-embedding model and cached
//! on disk. Each game picks a secret word, ranks every dictionary word by
//! cosine similarity to it, and reports the rank of each guess until the
//! player finds rank 1.

pub mod cache;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod embed;
pub mod error;
pub mod game;
pub mod io_utils;
pub mod logging;
pub mod rank;
pub mod repl;
pub mod session;
pub mod store;
pub mod target;

pub use cache::{load_or_build, CacheHeader, CacheKey, CACHE_VERSION};
pub use config::{Config, DictionarySource, Thresholds};
pub use dictionary::{build_store, clean_words, fetch_word_list, read_word_list};
pub use embed::{create_embedder, Embedder, ModelKind, NgramEmbedder};
pub use error::{ContextoError, Result};
pub use game::{Command, Game, GameState, Guess, Outcome, Proximity};
pub use rank::{cosine_similarity, neighbors, Neighbor, RankMap};
pub use session::{new_game, open_cached_store, open_store};
pub use store::VectorStore;
pub use target::{load_candidates, select_secret, valid_candidates};
