use std::path::PathBuf;

use crate::embed::ModelKind;

/// Word list used when no local dictionary file is given.
pub const DEFAULT_DICTIONARY_URL: &str =
    "https://raw.githubusercontent.com/pythonprobr/palavras/master/palavras.txt";
pub const DEFAULT_CACHE_PATH: &str = "dados_contexto.bin";
pub const DEFAULT_CANDIDATES_PATH: &str = "palavras.txt";
pub const DEFAULT_BATCH_SIZE: usize = 64;
/// `{word}` is replaced by each dictionary word before encoding.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "{word}";

/// Where the raw word list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    Url(String),
    File(PathBuf),
}

/// Rank cut-offs for the proximity markers shown next to each guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Ranks up to this value are "close".
    pub close: usize,
    /// Ranks up to this value are "warm"; anything above is "cold".
    pub warm: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            close: 300,
            warm: 1500,
        }
    }
}

/// Runtime configuration passed explicitly to every stage of the game.
#[derive(Debug, Clone)]
pub struct Config {
    pub cache_path: PathBuf,
    pub dictionary: DictionarySource,
    pub candidates_path: PathBuf,
    pub model: ModelKind,
    /// Number of words encoded per embedding call.
    pub batch_size: usize,
    pub prompt_template: String,
    /// Fixed secret word. Random selection is skipped when set.
    pub secret: Option<String>,
    /// Seed for the secret word selection.
    pub seed: Option<u64>,
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            dictionary: DictionarySource::Url(DEFAULT_DICTIONARY_URL.to_string()),
            candidates_path: PathBuf::from(DEFAULT_CANDIDATES_PATH),
            model: ModelKind::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            secret: None,
            seed: None,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Check values that would otherwise fail deep inside a stage.
    pub fn validate(&self) -> crate::Result<()> {
        if self.batch_size == 0 {
            return Err(crate::ContextoError::Config(
                "batch size must be at least 1".into(),
            ));
        }
        if !self.prompt_template.contains("{word}") {
            return Err(crate::ContextoError::Config(format!(
                "prompt template '{}' has no {{word}} placeholder",
                self.prompt_template
            )));
        }
        if self.thresholds.close >= self.thresholds.warm {
            return Err(crate::ContextoError::Config(format!(
                "close threshold {} must be below warm threshold {}",
                self.thresholds.close, self.thresholds.warm
            )));
        }
        Ok(())
    }
}
