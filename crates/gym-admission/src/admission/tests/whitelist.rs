use std::collections::HashSet;

use super::common::*;
use crate::admission::domain::ProductType;
use crate::admission::whitelist::{
    dedup, export_csv, find, find_all_products_for_user, parse_at, validate_capacity,
    InMemoryWhitelistStore,
};

#[test]
fn parse_keeps_line_order_and_drops_blank_lines() {
    let text = "  Kim Chul Soo \n\n\tLee Young Hee\r\n   \nPark Ji Sung";

    let entries = parse_at(text, "ACME", "Acme", ProductType::Morning, evaluated_at());

    let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["Kim Chul Soo", "Lee Young Hee", "Park Ji Sung"]);
    assert!(entries
        .iter()
        .all(|entry| entry.product_type == ProductType::Morning && entry.company_code == "ACME"));

    let ids: HashSet<_> = entries.iter().map(|entry| entry.id.clone()).collect();
    assert_eq!(ids.len(), entries.len());
}

#[test]
fn find_matches_normalized_name_but_exact_code_and_product() {
    let entries = parse_at("Kim Chul Soo", "ACME", "Acme", ProductType::FullDay, evaluated_at());

    assert!(find(&entries, "ACME", " kim chulsoo ", ProductType::FullDay).is_some());
    assert!(find(&entries, "acme", "Kim Chul Soo", ProductType::FullDay).is_none());
    assert!(find(&entries, "ACME", "Kim Chul Soo", ProductType::Evening).is_none());
}

#[test]
fn find_returns_first_of_duplicate_names() {
    let mut entries = vec![entry("Acme", "Kim"), entry("Acme", "KIM")];
    entries[1].id = "second".to_string();

    let found = find(&entries, "ACME", "kim", ProductType::FullDay).expect("match");

    assert_eq!(found.id, entries[0].id);
}

#[test]
fn products_for_user_follow_fixed_order() {
    let store = InMemoryWhitelistStore::default();
    store.import_text("Kim Chul Soo\nLee", "ACME", "Acme", ProductType::Evening);
    store.import_text("kimchulsoo", "ACME", "Acme", ProductType::FullDay);
    store.import_text("Lee", "ACME", "Acme", ProductType::Morning);

    let products = find_all_products_for_user(&store, "ACME", "Kim Chul Soo");

    assert_eq!(products, vec![ProductType::FullDay, ProductType::Evening]);
    assert!(find_all_products_for_user(&store, "GLOBEX", "Lee").is_empty());
}

#[test]
fn replacing_a_list_discards_the_previous_import() {
    let store = InMemoryWhitelistStore::default();
    store.import_text("Kim", "ACME", "Acme", ProductType::FullDay);
    store.import_text("Lee", "ACME", "Acme", ProductType::FullDay);

    assert!(find_all_products_for_user(&store, "ACME", "Kim").is_empty());
    assert_eq!(
        find_all_products_for_user(&store, "ACME", "Lee"),
        vec![ProductType::FullDay]
    );
}

#[test]
fn dedup_collapses_normalized_company_and_name() {
    let entries = vec![entry("Acme", "Kim"), entry("ACME ", "kim"), entry("Acme", "Lee")];

    let unique = dedup(entries);

    let names: Vec<_> = unique.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["Kim", "Lee"]);
    assert_eq!(unique[0].company_name, "Acme");
}

#[test]
fn capacity_check_reports_both_counts() {
    let entries: Vec<_> = (0..5).map(|i| entry("Acme", &format!("n{i}"))).collect();

    let check = validate_capacity(&entries, 3);
    assert!(!check.valid);
    assert!(check.message.contains('5') && check.message.contains('3'));

    assert!(validate_capacity(&entries, 5).valid);
}

#[test]
fn csv_export_uses_three_part_layout() {
    let entries = vec![
        entry("Acme", "Kim"),
        entry("Globex", "Lee"),
        entry("Acme", "Park"),
    ];

    let csv = export_csv(&entries).expect("export succeeds");

    assert_eq!(
        csv,
        "NO,계열사명,성명\n,Acme,Globex,\n1,Acme,Kim\n2,Globex,Lee\n3,Acme,Park\n"
    );
}

#[test]
fn csv_export_of_empty_list_keeps_header_rows() {
    let csv = export_csv(&[]).expect("export succeeds");

    assert_eq!(csv, "NO,계열사명,성명\n,\n");
}
