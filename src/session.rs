//! Wiring from configuration to a ready-to-play [`Game`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::cache::{load, load_or_build, CacheKey};
use crate::config::Config;
use crate::embed::create_embedder;
use crate::game::Game;
use crate::rank::RankMap;
use crate::store::VectorStore;
use crate::target::{load_candidates, select_secret};
use crate::Result;

/// Load the cached dictionary, building it first when needed.
pub fn open_store(config: &Config, force_rebuild: bool) -> Result<VectorStore> {
    config.validate()?;
    let embedder = create_embedder(config.model)?;
    load_or_build(config, embedder.as_ref(), force_rebuild)
}

/// Load the cached dictionary without ever building it.
pub fn open_cached_store(config: &Config) -> Result<VectorStore> {
    config.validate()?;
    let key = CacheKey {
        model_id: config.model.id(),
        prompt_template: &config.prompt_template,
    };
    load(&config.cache_path, key)
}

/// Pick a secret and rank the dictionary against it.
pub fn new_game(config: &Config, store: &VectorStore) -> Result<Game> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let candidates = if config.secret.is_some() {
        Vec::new()
    } else {
        load_candidates(&config.candidates_path)
    };
    let secret = select_secret(store, config.secret.as_deref(), &candidates, &mut rng)?;
    debug!(%secret, "secret chosen");
    info!("calculating today's distances");
    let ranks = RankMap::compute(store, &secret)?;
    Ok(Game::new(ranks, config.thresholds))
}
