use std::fs;

use contexto::cache::{load_or_build, read_header};
use contexto::{Config, DictionarySource, NgramEmbedder, CACHE_VERSION};

fn config(dir: &std::path::Path) -> Config {
    let dict = dir.join("words.txt");
    fs::write(&dict, "Mar\nsol\nlua\nceu\nestrela\nguarda-chuva\nno\n").unwrap();
    Config {
        cache_path: dir.join("cache").join("dados_contexto.bin"),
        dictionary: DictionarySource::File(dict),
        batch_size: 3,
        ..Config::default()
    }
}

#[test]
fn second_run_uses_cache() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let embedder = NgramEmbedder::default();

    let built = load_or_build(&config, &embedder, false).unwrap();
    assert_eq!(built.words(), ["ceu", "estrela", "lua", "mar", "sol"]);
    let header = read_header(&config.cache_path).unwrap();
    assert_eq!(header.version, CACHE_VERSION);
    assert_eq!(header.model_id, NgramEmbedder::MODEL_ID);

    // The source is gone, so only the cache can satisfy this.
    if let DictionarySource::File(p) = &config.dictionary {
        fs::remove_file(p).unwrap();
    }
    let loaded = load_or_build(&config, &embedder, false).unwrap();
    assert_eq!(loaded, built);
}

#[test]
fn stale_cache_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    load_or_build(&config, &NgramEmbedder::new(16), false).unwrap();

    let templated = Config {
        prompt_template: "palavra: {word}".into(),
        ..config.clone()
    };
    let rebuilt = load_or_build(&templated, &NgramEmbedder::new(16), false).unwrap();
    assert_eq!(rebuilt.len(), 5);
    let header = read_header(&config.cache_path).unwrap();
    assert_eq!(header.prompt_template, "palavra: {word}");
}

#[test]
fn garbage_cache_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    fs::create_dir_all(config.cache_path.parent().unwrap()).unwrap();
    fs::write(&config.cache_path, b"not a cache").unwrap();
    let store = load_or_build(&config, &NgramEmbedder::default(), false).unwrap();
    assert_eq!(store.len(), 5);
    assert!(read_header(&config.cache_path).is_ok());
}

#[test]
fn missing_source_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        cache_path: dir.path().join("c.bin"),
        dictionary: DictionarySource::File(dir.path().join("absent.txt")),
        ..Config::default()
    };
    let err = load_or_build(&config, &NgramEmbedder::default(), false).unwrap_err();
    assert!(err.to_string().contains("absent.txt"));
    assert!(!config.cache_path.exists());
}
