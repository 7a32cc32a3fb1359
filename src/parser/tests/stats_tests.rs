//! Tests for parsing statistics functionality

use crate::parser::Stage;
use crate::parser::stats::ParseStats;

#[test]
fn test_parse_stats_counting() {
    let mut stats = ParseStats::new(4);
    stats.record_match(Stage::ExpectEventHeader);
    stats.record_match(Stage::ExpectArrivalData);
    stats.record_match(Stage::ExpectArrivalData);

    assert_eq!(stats.consumed_lines, 3);
    assert_eq!(stats.matches_for(Stage::ExpectArrivalData), 2);
    assert_eq!(stats.matches_for(Stage::ExpectOriginData), 0);
    assert!(!stats.is_balanced());

    stats.record_discard();
    assert!(stats.is_balanced());
    assert_eq!(stats.consumption_rate(), 75.0);
}

#[test]
fn test_parse_stats_empty() {
    let stats = ParseStats::new(0);

    assert!(stats.is_balanced());
    assert_eq!(stats.consumption_rate(), 0.0);
    assert!(stats.stage_matches.is_empty());
}

#[test]
fn test_stage_transitions_cover_all_stages() {
    let mut order = vec![Stage::FIRST];
    while let Some(next) = order.last().and_then(|stage| stage.next()) {
        order.push(next);
    }

    assert_eq!(order, Stage::ALL.to_vec());
    assert_eq!(Stage::ExpectArrivalData.next(), None);
}

#[test]
fn test_stage_names_and_kinds() {
    let headers: Vec<Stage> = Stage::ALL.into_iter().filter(|stage| stage.is_header()).collect();

    assert_eq!(headers.len(), 4);
    assert_eq!(Stage::ExpectOriginData.to_string(), "origin_data");
    assert_eq!(format!("[{:>12}]", Stage::ExpectOriginData), "[ origin_data]");
}

#[test]
fn test_stats_serialize_stage_keys() {
    let mut stats = ParseStats::new(1);
    stats.record_match(Stage::ExpectEventHeader);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["stage_matches"]["ExpectEventHeader"], 1);
    assert_eq!(json["consumed_lines"], 1);
}
