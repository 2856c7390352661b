//! Property tests for secret key generation.

use std::collections::HashSet;

use proptest::prelude::*;

use django_deployer::domain::entities::{SecretKeyFile, SECRET_KEY_ALPHABET, SECRET_KEY_LENGTH};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: keys have the fixed length and only use the alphabet.
    #[test]
    fn property_key_shape(_seed in any::<u64>()) {
        let key = SecretKeyFile::generate_key();
        prop_assert_eq!(key.chars().count(), SECRET_KEY_LENGTH);
        prop_assert!(key.bytes().all(|b| SECRET_KEY_ALPHABET.contains(&b)));
        prop_assert!(!key.contains('\'') && !key.contains('"') && !key.contains('\\'));
    }
}

#[test]
fn keys_do_not_repeat() {
    let keys: HashSet<String> = (0..1000).map(|_| SecretKeyFile::generate_key()).collect();
    assert_eq!(keys.len(), 1000);
}
