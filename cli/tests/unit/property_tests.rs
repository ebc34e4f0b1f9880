//! Property-based tests for HTML injection and the version record.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;

use agent_ui::domain::UiConfig;
use agent_ui::domain::inject::{inject, insertion_point};
use agent_ui::domain::package::sorted_versions;
use agent_ui::domain::version::{parse_version_record, render_version_record};

/// Opening head tag with random letter case and optional attributes.
fn head_tag() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(any::<bool>(), 4),
        "( [a-z]{1,8}=\"[a-z0-9 ]{0,8}\"){0,3}",
    )
        .prop_map(|(upper, attrs)| {
            let name: String = "head"
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            format!("<{name}{attrs}>")
        })
}

/// Arbitrary JSON values: scalars at the leaves, arrays and objects above.
fn json_value() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(serde_json::Value::from),
        // Quarter steps print and parse back exactly.
        (-1_000_000i32..1_000_000).prop_map(|n| serde_json::Value::from(f64::from(n) / 4.0)),
        any::<String>().prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                .prop_map(|entries| serde_json::Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Config objects whose keys arrive in no particular order.
fn ui_config() -> impl Strategy<Value = UiConfig> {
    prop::collection::vec(("[a-zA-Z_]{1,10}", json_value()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Keys of every object in `value`, depth first, in stored order.
fn key_paths(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                out.push(key.clone());
                key_paths(child, out);
            }
        }
        serde_json::Value::Array(items) => items.iter().for_each(|item| key_paths(item, out)),
        _ => {}
    }
}

fn injected_config(result: &str, from: usize) -> serde_json::Value {
    let marker = "window.AGENT_WEB_UI_CONFIG = ";
    let start = from + result[from..].find(marker).unwrap() + marker.len();
    let end = start + result[start..].find(";\n").unwrap();
    serde_json::from_str(&result[start..end]).unwrap()
}

proptest! {
    /// Removing the inserted block restores the original document byte for byte.
    #[test]
    fn prop_injection_only_inserts(
        before in "[a-zA-Z0-9 <>/!=\"-]{0,40}",
        tag in head_tag(),
        after in "[a-zA-Z0-9 <>/!=\"-]{0,80}",
        base_url in "[a-z0-9:/.]{0,30}",
        cfg in ui_config(),
    ) {
        let html = format!("{before}{tag}{after}");
        let result = inject(&html, &base_url, Some(&cfg)).unwrap();
        let point = insertion_point(&html).unwrap();
        let block_len = result.len() - html.len();

        prop_assert!(point <= before.len() + tag.len());
        let restored = format!("{}{}", &result[..point], &result[point + block_len..]);
        prop_assert_eq!(restored, html);
    }

    /// The injected config parses back to the supplied object with its key
    /// order intact, and injection is deterministic.
    #[test]
    fn prop_injected_config_round_trips(tag in head_tag(), cfg in ui_config()) {
        let html = format!("<html>{tag}</head><body></body></html>");
        let result = inject(&html, "http://localhost:8888", Some(&cfg)).unwrap();
        let point = insertion_point(&html).unwrap();

        prop_assert_eq!(&result, &inject(&html, "http://localhost:8888", Some(&cfg)).unwrap());
        let injected = injected_config(&result, point);
        let expected = serde_json::Value::Object(cfg);
        let (mut got_keys, mut want_keys) = (Vec::new(), Vec::new());
        key_paths(&injected, &mut got_keys);
        key_paths(&expected, &mut want_keys);
        prop_assert_eq!(got_keys, want_keys);
        prop_assert_eq!(injected, expected);
    }

    /// Config strings can never open or close an element inside the block.
    #[test]
    fn prop_block_has_no_raw_markup_from_values(cfg in ui_config(), base_url in ".{0,30}") {
        let html = "<head></head>";
        let result = inject(html, &base_url, Some(&cfg)).unwrap();
        let block = &result[6..result.len() - "</head>".len()];

        prop_assert_eq!(block.matches('<').count(), 2, "block: {}", block);
        prop_assert!(block.ends_with("</script>"));
    }

    /// Text without any head tag is always rejected.
    #[test]
    fn prop_missing_head_is_rejected(body in "[a-z <>/]{0,60}") {
        prop_assume!(!body.contains("<head"));
        prop_assert!(inject(&body, "", None).is_err());
    }
}

proptest! {
    /// A rendered version record parses back to the same version and package.
    #[test]
    fn prop_version_record_round_trips(
        version in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}(-[a-z]{1,6}\\.[0-9]{1,2})?",
        package in "(@[a-z]{1,8}/)?[a-z][a-z-]{0,15}",
    ) {
        let record = parse_version_record(&render_version_record(&version, &package)).unwrap();
        prop_assert_eq!(record.version, version);
        prop_assert_eq!(record.package, package);
    }

    /// Sorting keeps every version and orders valid semver ascending.
    #[test]
    fn prop_sorted_versions_is_ordered_permutation(
        raw in prop::collection::vec((0u64..20, 0u64..20, 0u64..20), 0..12),
    ) {
        let versions: Vec<String> = raw.iter().map(|(a, b, c)| format!("{a}.{b}.{c}")).collect();
        let sorted = sorted_versions(versions.iter().map(String::as_str));

        prop_assert_eq!(sorted.len(), versions.len());
        let parsed: Vec<semver::Version> =
            sorted.iter().map(|v| semver::Version::parse(v).unwrap()).collect();
        prop_assert!(parsed.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_mixed_case_head_with_attributes() {
    let html = r#"<!doctype html><HeAd data-theme="dark"><title>x</title></HeAd>"#;
    let result = inject(html, "/api", None).unwrap();
    assert!(result.starts_with("<!doctype html><HeAd data-theme=\"dark\">\n<script>"));
}

#[test]
fn test_header_tag_is_not_a_head_tag() {
    assert!(insertion_point("<body><header>hi</header></body>").is_none());
}
