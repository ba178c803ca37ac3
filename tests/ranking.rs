use contexto::{neighbors, RankMap, VectorStore};
use proptest::prelude::*;

/// Unit vectors whose cosine with `[1, 0]` is exactly the given score.
fn store_with_scores(words: &[&str], scores: &[f32]) -> VectorStore {
    let vectors = scores
        .iter()
        .map(|&s| vec![s, (1.0 - s * s).max(0.0).sqrt()])
        .collect();
    VectorStore::new(words.iter().map(|w| w.to_string()).collect(), vectors).unwrap()
}

#[test]
fn ranks_follow_similarity() {
    let store = store_with_scores(&["apple", "banana", "grape"], &[0.2, 1.0, 0.5]);
    let map = RankMap::compute(&store, "banana").unwrap();
    assert_eq!(map.rank_of("banana"), Some(1));
    assert_eq!(map.rank_of("grape"), Some(2));
    assert_eq!(map.rank_of("apple"), Some(3));
    assert_eq!(map.rank_of("kiwi"), None);
    assert_eq!(map.secret(), "banana");
    assert!((map.score_of("grape").unwrap() - 0.5).abs() < 1e-5);
}

#[test]
fn neighbours_exclude_the_word() {
    let store = store_with_scores(&["apple", "banana", "grape", "melon"], &[0.2, 1.0, 0.5, 0.9]);
    let list = neighbors(&store, "banana", 2).unwrap();
    let words: Vec<_> = list.iter().map(|n| n.word.as_str()).collect();
    assert_eq!(words, vec!["melon", "grape"]);
    assert_eq!(list[0].rank, 1);
    assert!(neighbors(&store, "kiwi", 2).is_err());
}

fn arb_store() -> impl Strategy<Value = VectorStore> {
    (1usize..40, 1usize..6).prop_flat_map(|(n, dim)| {
        prop::collection::vec(prop::collection::vec(-1.0f32..1.0, dim), n).prop_map(move |vectors| {
            let words = (0..vectors.len()).map(|i| format!("w{i:03}")).collect();
            VectorStore::new(words, vectors).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn rank_map_is_a_bijection(store in arb_store(), pick in any::<prop::sample::Index>()) {
        let secret = store.words()[pick.index(store.len())].clone();
        let map = RankMap::compute(&store, &secret).unwrap();
        prop_assert_eq!(map.len(), store.len());
        prop_assert_eq!(map.rank_of(&secret), Some(1));
        let mut ranks: Vec<usize> = store.words().iter().map(|w| map.rank_of(w).unwrap()).collect();
        ranks.sort_unstable();
        prop_assert_eq!(ranks, (1..=store.len()).collect::<Vec<_>>());
        for r in 1..=map.len() {
            let w = map.word_at(r).unwrap();
            prop_assert_eq!(map.rank_of(w), Some(r));
        }
    }

    #[test]
    fn ranking_is_deterministic(store in arb_store(), pick in any::<prop::sample::Index>()) {
        let secret = store.words()[pick.index(store.len())].clone();
        let a = RankMap::compute(&store, &secret).unwrap();
        let b = RankMap::compute(&store, &secret).unwrap();
        for w in store.words() {
            prop_assert_eq!(a.rank_of(w), b.rank_of(w));
        }
    }

    #[test]
    fn scores_never_increase_with_rank(store in arb_store(), pick in any::<prop::sample::Index>()) {
        let secret = store.words()[pick.index(store.len())].clone();
        let map = RankMap::compute(&store, &secret).unwrap();
        for r in 2..map.len() {
            let a = map.score_of(map.word_at(r).unwrap()).unwrap();
            let b = map.score_of(map.word_at(r + 1).unwrap()).unwrap();
            prop_assert!(a >= b);
        }
    }
}
