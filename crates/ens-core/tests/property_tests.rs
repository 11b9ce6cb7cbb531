//! Property-based tests for ens-core
//!
//! Uses proptest to verify normalization and namehash invariants across
//! randomized inputs

use ens_core::{namehash, normalize, Node};
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate a single label of mixed-case ASCII letters and digits
fn label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9]{1,20}").unwrap()
}

/// Generate a dotted name of 1-4 labels
fn name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(label_strategy(), 1..=4).prop_map(|labels| labels.join("."))
}

/// Generate labels mixing ASCII with Latin-1 accented letters
fn accented_name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::string::string_regex("[a-zA-Z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{00FF}0-9]{1,12}").unwrap(),
        1..=3,
    )
    .prop_map(|labels| labels.join("."))
}

/// Latin labels written with fullwidth and ASCII letters
fn fullwidth_label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9\u{FF21}-\u{FF3A}\u{FF41}-\u{FF5A}\u{FF10}-\u{FF19}]{1,12}").unwrap()
}

/// Cyrillic-only labels
fn cyrillic_label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[\u{0430}-\u{044F}]{1,10}").unwrap()
}

/// Thai consonants, each optionally carrying a tone mark
fn thai_label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("([\u{0E01}-\u{0E2E}][\u{0E48}-\u{0E4B}]?){1,6}").unwrap()
}

/// Emoji, each optionally followed by the emoji presentation selector
fn emoji_label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("([\u{1F600}-\u{1F64F}\u{1F525}\u{2764}]\u{FE0F}?){1,4}").unwrap()
}

/// Dotted names whose labels each come from a single script
fn unicode_name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            label_strategy(),
            fullwidth_label_strategy(),
            cyrillic_label_strategy(),
            thai_label_strategy(),
            emoji_label_strategy(),
        ],
        1..=4,
    )
    .prop_map(|labels| labels.join("."))
}

fn to_fullwidth(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => {
                char::from_u32(c as u32 - 0x21 + 0xFF01).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

// ============================================================================
// Normalization Properties
// ============================================================================

proptest! {
    /// Property: normalizing a normalized name is a no-op
    #[test]
    fn prop_normalize_idempotent(name in name_strategy()) {
        let once = normalize(&name).unwrap();
        let twice = normalize(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: idempotence holds for non-ASCII letters too
    #[test]
    fn prop_normalize_idempotent_accented(name in accented_name_strategy()) {
        let once = normalize(&name).unwrap();
        let twice = normalize(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: idempotence holds across scripts, emoji and compatibility forms
    #[test]
    fn prop_normalize_idempotent_unicode(name in unicode_name_strategy()) {
        let once = normalize(&name).unwrap();
        let twice = normalize(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: normalized output carries no presentation selectors or fullwidth forms
    #[test]
    fn prop_unicode_output_is_folded(name in unicode_name_strategy()) {
        let normalized = normalize(&name).unwrap();
        prop_assert!(!normalized.as_str().contains('\u{FE0F}'), "output contains U+FE0F");
        prop_assert!(!normalized.as_str().chars().any(|c| ('\u{FF01}'..='\u{FF5E}').contains(&c)), "output contains fullwidth form");
    }

    /// Property: a Cyrillic letter inside a Latin label is rejected
    #[test]
    fn prop_mixed_script_label_rejected(
        latin in "[a-z]{1,10}",
        cyrillic in "[\u{0430}-\u{044F}]",
        pos in 0usize..16,
    ) {
        let mut label = latin.clone();
        let at = pos % (latin.len() + 1);
        label.insert_str(at, &cyrillic);
        let name = format!("{}.eth", label);
        prop_assert!(normalize(&name).is_err());
    }

    /// Property: normalized output never carries uppercase ASCII or control chars
    #[test]
    fn prop_normalized_output_is_clean(name in name_strategy()) {
        let normalized = normalize(&name).unwrap();
        prop_assert!(!normalized.as_str().chars().any(|c| c.is_ascii_uppercase()));
        prop_assert!(!normalized.as_str().chars().any(char::is_control));
    }

    /// Property: a control character anywhere is rejected
    #[test]
    fn prop_control_characters_rejected(
        name in name_strategy(),
        ctrl in prop::char::range('\u{0001}', '\u{001F}'),
        pos in 0usize..64,
    ) {
        let mut chars: Vec<char> = name.chars().collect();
        let at = pos % (chars.len() + 1);
        chars.insert(at, ctrl);
        // leading/trailing whitespace-class controls are trimmed, so keep it inside
        let input: String = std::iter::once('a').chain(chars).chain(std::iter::once('a')).collect();
        prop_assert!(normalize(&input).is_err());
    }
}

// ============================================================================
// Namehash Properties
// ============================================================================

proptest! {
    /// Property: same name = same node
    #[test]
    fn prop_namehash_deterministic(name in name_strategy()) {
        let a = namehash(&normalize(&name).unwrap());
        let b = namehash(&normalize(&name).unwrap());
        prop_assert_eq!(a, b);
    }

    /// Property: case variants of a name hash identically
    #[test]
    fn prop_namehash_case_insensitive(name in name_strategy()) {
        let upper = namehash(&normalize(&name.to_uppercase()).unwrap());
        let lower = namehash(&normalize(&name.to_lowercase()).unwrap());
        prop_assert_eq!(upper, lower);
    }

    /// Property: fullwidth spellings hash like their ASCII form
    #[test]
    fn prop_namehash_folds_fullwidth(name in name_strategy()) {
        let ascii = namehash(&normalize(&name).unwrap());
        let wide = namehash(&normalize(&to_fullwidth(&name)).unwrap());
        prop_assert_eq!(ascii, wide);
    }

    /// Property: emoji presentation selectors do not change the node
    #[test]
    fn prop_namehash_ignores_presentation_selector(label in emoji_label_strategy()) {
        let bare: String = label.chars().filter(|&c| c != '\u{FE0F}').collect();
        let decorated: String = bare.chars().flat_map(|c| [c, '\u{FE0F}']).collect();
        prop_assert_eq!(
            namehash(&normalize(&format!("{}.eth", bare)).unwrap()),
            namehash(&normalize(&format!("{}.eth", decorated)).unwrap())
        );
    }

    /// Property: no real name hashes to the root
    #[test]
    fn prop_namehash_never_root(name in name_strategy()) {
        prop_assert_ne!(namehash(&normalize(&name).unwrap()), Node::ROOT);
    }
}

#[test]
fn curated_names_have_distinct_nodes() {
    let names = [
        "eth",
        "foo.eth",
        "bar.eth",
        "foo.bar.eth",
        "bar.foo.eth",
        "eth.foo",
        "vitalik.eth",
        "vitalik.xyz",
        "a.b.c.d.eth",
        "caf\u{00E9}.eth",
        "cafe.eth",
        "\u{1F525}.eth",
        "__foo.eth",
        "foo-bar.eth",
        "foobar.eth",
        "\u{2764}.eth",
        "\u{0432}\u{0438}\u{043A}\u{0438}.eth",
        "\u{0E01}\u{0E48}\u{0E32}.eth",
    ];

    let nodes: HashSet<_> = names
        .iter()
        .map(|name| namehash(&normalize(name).unwrap()))
        .collect();

    assert_eq!(nodes.len(), names.len());
}

#[test]
fn equivalent_spellings_share_a_node() {
    let pairs = [
        ("\u{2764}\u{FE0F}.eth", "\u{2764}.eth"),
        ("\u{FF36}\u{FF29}\u{FF34}\u{FF21}\u{FF2C}\u{FF29}\u{FF2B}.eth", "vitalik.eth"),
        ("Caf\u{0065}\u{0301}.ETH", "caf\u{00E9}.eth"),
    ];
    for (variant, canonical) in pairs {
        assert_eq!(
            namehash(&normalize(variant).unwrap()),
            namehash(&normalize(canonical).unwrap()),
            "{:?} vs {:?}",
            variant,
            canonical
        );
    }
}

#[test]
fn confusable_spellings_are_rejected() {
    for name in [
        "vit\u{0430}lik.eth",
        "p\u{0430}ypal.eth",
        "g\u{03BF}\u{03BF}gle.eth",
        "foo\u{FF0E}eth",
    ] {
        assert!(normalize(name).is_err(), "{:?} should be rejected", name);
    }
}
