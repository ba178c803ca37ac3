use contexto::cache::{load, CacheKey};
use honggfuzz::fuzz;

fn main() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("fuzz.bin");
    let key = CacheKey {
        model_id: "ngram-trigram",
        prompt_template: "{word}",
    };
    loop {
        fuzz!(|data: &[u8]| {
            std::fs::write(&path, data).expect("write");
            // Arbitrary bytes must produce an error, never a panic.
            let _ = load(&path, key);
        });
    }
}
