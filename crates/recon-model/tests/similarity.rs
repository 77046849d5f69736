//! Property tests for the token-overlap similarity primitive.

use proptest::prelude::*;

use recon_model::token_overlap;

fn description() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z]{1,8}", 0..6).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn similarity_is_symmetric(a in description(), b in description()) {
        prop_assert_eq!(token_overlap(&a, &b), token_overlap(&b, &a));
    }

    #[test]
    fn similarity_is_bounded(a in description(), b in description()) {
        let score = token_overlap(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn self_similarity_is_one(a in proptest::collection::vec("[a-z]{1,8}", 1..6)) {
        let text = a.join(" ");
        prop_assert_eq!(token_overlap(&text, &text), 1.0);
    }
}
