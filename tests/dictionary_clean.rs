use contexto::clean_words;
use contexto::dictionary::is_valid_word;
use proptest::prelude::*;
use quickcheck::quickcheck;

#[test]
fn keeps_accented_words_and_drops_the_rest() {
    let raw = ["Ação", "pé", "bem-vindo", "água", "casa2", "ÁGUA", "  mesa  "];
    assert_eq!(clean_words(raw), vec!["ação", "mesa", "água"]);
}

proptest! {
    #[test]
    fn cleaning_is_idempotent(raw in prop::collection::vec("[a-zA-Zçãé -]{0,8}", 0..50)) {
        let once = clean_words(&raw);
        let twice = clean_words(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn output_is_sorted_and_unique(raw in prop::collection::vec("\\PC{0,6}", 0..50)) {
        let words = clean_words(&raw);
        prop_assert!(words.windows(2).all(|w| w[0] < w[1]));
    }
}

quickcheck! {
    fn every_output_word_is_valid(raw: Vec<String>) -> bool {
        clean_words(&raw)
            .iter()
            .all(|w| is_valid_word(w) && w.trim() == w)
    }
}
