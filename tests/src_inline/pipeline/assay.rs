use super::*;

fn tokens(raw: Option<&str>) -> Vec<String> {
    parse_assay_list(raw)
}

#[test]
fn test_bare_na_is_one_padded_token() {
    assert_eq!(tokens(Some("NA")), vec!["NA ".to_string()]);
}

#[test]
fn test_na_followed_by_more_assays_is_protected() {
    assert_eq!(tokens(Some("A,NA,B")), vec!["A", "NA ", "B"]);
    assert_eq!(tokens(Some("NA,NA")), vec!["NA ", "NA"]);
}

#[test]
fn test_missing_or_blank_gives_sentinel() {
    assert_eq!(tokens(None), vec![SENTINEL_TOKEN.to_string()]);
    assert_eq!(tokens(Some("")), vec![" ".to_string()]);
    assert_eq!(tokens(Some("   ")), vec![" ".to_string()]);
    assert!(is_sentinel(&tokens(None)));
}

#[test]
fn test_split_keeps_order_and_whitespace() {
    assert_eq!(tokens(Some("X,Y")), vec!["X", "Y"]);
    assert_eq!(tokens(Some("GLU, HBA1C")), vec!["GLU", " HBA1C"]);
    assert_eq!(tokens(Some("CBC")), vec!["CBC"]);
    assert!(!is_sentinel(&tokens(Some("CBC"))));
}

#[test]
fn test_never_empty() {
    for raw in ["", ",", "NA", "A,,B", " "] {
        assert!(!tokens(Some(raw)).is_empty(), "empty list for {raw:?}");
    }
}
