//! String encoding of node kinds.

use std::collections::HashSet;

use bmtree::domain::BookmarkKind;
use rstest::rstest;

#[rstest]
#[case(BookmarkKind::Root, "root")]
#[case(BookmarkKind::Url, "url")]
#[case(BookmarkKind::Folder, "folder")]
#[case(BookmarkKind::Separator, "separator")]
#[case(BookmarkKind::Invalid, "invalid")]
fn given_kind_then_type_string_round_trips(#[case] kind: BookmarkKind, #[case] text: &str) {
    assert_eq!(kind.as_str(), text);
    assert_eq!(kind.to_string(), text);
    assert_eq!(BookmarkKind::from_type_str(kind.as_str()), kind);
    assert_eq!(text.parse::<BookmarkKind>().unwrap(), kind);
}

#[rstest]
#[case("not-a-real-kind")]
#[case("")]
#[case("Folder")]
#[case(" url")]
fn given_unknown_string_then_invalid(#[case] text: &str) {
    assert_eq!(BookmarkKind::from_type_str(text), BookmarkKind::Invalid);
    assert!(!BookmarkKind::from_type_str(text).is_valid());
}

#[test]
fn given_all_kinds_then_strings_are_distinct() {
    let strings: HashSet<&str> = BookmarkKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(strings.len(), BookmarkKind::ALL.len());
}

#[test]
fn given_kind_then_serde_uses_type_string() {
    assert_eq!(
        serde_json::to_string(&BookmarkKind::Separator).unwrap(),
        "\"separator\""
    );
    let parsed: BookmarkKind = serde_json::from_str("\"bogus\"").unwrap();
    assert_eq!(parsed, BookmarkKind::Invalid);
}
