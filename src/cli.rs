//! Command-line options shared by the `contexto` and `neighbors` binaries.

use std::path::PathBuf;

use clap::Args;

use crate::config::{self, Config, DictionarySource, Thresholds};
use crate::embed::ModelKind;

/// Options that locate and build the encoded dictionary.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Cache file holding the encoded dictionary
    #[arg(long, global = true, default_value = config::DEFAULT_CACHE_PATH)]
    pub cache: PathBuf,

    /// URL of the raw word list
    #[arg(long, global = true, default_value = config::DEFAULT_DICTIONARY_URL)]
    pub dictionary_url: String,

    /// Read the raw word list from a local file instead of downloading it
    #[arg(long, global = true, conflicts_with = "dictionary_url")]
    pub dictionary_file: Option<PathBuf>,

    /// Embedding backend
    #[arg(long, global = true, value_enum, default_value_t = ModelKind::default())]
    pub model: ModelKind,

    /// Words encoded per model call
    #[arg(long, global = true, default_value_t = config::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Text fed to the model for each word; `{word}` is replaced
    #[arg(long, global = true, default_value = config::DEFAULT_PROMPT_TEMPLATE)]
    pub prompt_template: String,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Options that only matter when playing.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Candidate secret words, one per line
    #[arg(long, global = true, default_value = config::DEFAULT_CANDIDATES_PATH)]
    pub candidates: PathBuf,

    /// Play against this word instead of a random candidate
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// Seed for the random secret choice
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Highest rank still shown as close
    #[arg(long, global = true, default_value_t = Thresholds::default().close)]
    pub close: usize,

    /// Highest rank still shown as warm
    #[arg(long, global = true, default_value_t = Thresholds::default().warm)]
    pub warm: usize,
}

impl StoreArgs {
    pub fn to_config(&self) -> Config {
        let dictionary = match &self.dictionary_file {
            Some(path) => DictionarySource::File(path.clone()),
            None => DictionarySource::Url(self.dictionary_url.clone()),
        };
        Config {
            cache_path: self.cache.clone(),
            dictionary,
            model: self.model,
            batch_size: self.batch_size,
            prompt_template: self.prompt_template.clone(),
            ..Config::default()
        }
    }
}

impl PlayArgs {
    /// Layer the play options over a store configuration.
    pub fn apply(&self, config: Config) -> Config {
        Config {
            candidates_path: self.candidates.clone(),
            secret: self.secret.clone(),
            seed: self.seed,
            thresholds: Thresholds {
                close: self.close,
                warm: self.warm,
            },
            ..config
        }
    }
}
