use contexto::clean_words;
use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let text = String::from_utf8_lossy(data);
            let once = clean_words(text.lines());
            let twice = clean_words(&once);
            assert_eq!(once, twice);
        });
    }
}
