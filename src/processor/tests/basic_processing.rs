//! Basic processing integration tests

use super::*;
use crate::config::OutputConfig;
use crate::models::Event;
use crate::parser::RebParser;
use crate::processor::writer::{JsonWriter, WriteOutcome};
use crate::processor::{BulletinProcessor, convert_file};

#[tokio::test]
async fn test_basic_processing_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let input = create_bulletin_directory(&temp_dir);
    let output = temp_dir.path().join("json");

    let processor =
        BulletinProcessor::new(vec![path_string(&input)], test_config(&output)).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_discovered, 2);
    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.arrivals_total, 4);
    assert!(stats.is_successful());
    assert_eq!(stats.output_directory, Some(output.clone()));

    for name in ["event_12.json", "event_13.json"] {
        let json = fs::read_to_string(output.join(name)).unwrap();
        let event: Event = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_id.as_deref(), Some("12"));
        assert_eq!(event.origin.arrivals.len(), 2);
        assert!(event.raw_text.is_empty());
        assert!(event.source_path.unwrap().ends_with(&name.replace("json", "reb")));
    }

    assert!(!output.join("notes.json").exists());
}

#[tokio::test]
async fn test_processing_keeps_raw_text_on_request() {
    let temp_dir = TempDir::new().unwrap();
    let bulletin = write_bulletin(temp_dir.path(), "event_12.reb", &sample_bulletin());
    let output = temp_dir.path().join("json");

    let config = test_config(&output).with_raw_text().with_pretty_output();
    let processor = BulletinProcessor::new(vec![path_string(&bulletin)], config).unwrap();
    processor.process().await.unwrap();

    let json = fs::read_to_string(output.join("event_12.json")).unwrap();
    let event: Event = serde_json::from_str(&json).unwrap();

    assert_eq!(event.raw_text, sample_bulletin());
    assert!(json.contains("\n  \"event_id\": \"12\""));
}

#[tokio::test]
async fn test_processing_to_stdout_writes_no_files() {
    let temp_dir = TempDir::new().unwrap();
    let bulletin = write_bulletin(temp_dir.path(), "event_12.reb", &sample_bulletin());
    let config = RebConfig::default().with_workers(1).without_progress();

    let processor = BulletinProcessor::new(vec![path_string(&bulletin)], config).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.output_directory, None);
    assert!(!temp_dir.path().join("event_12.json").exists());
}

#[tokio::test]
async fn test_existing_output_is_skipped_without_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let bulletin = write_bulletin(temp_dir.path(), "event_12.reb", &sample_bulletin());
    let output = temp_dir.path().join("json");
    write_bulletin(&output, "event_12.json", "{}");

    let config = test_config(&output).without_overwrite();
    let processor = BulletinProcessor::new(vec![path_string(&bulletin)], config).unwrap();
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(fs::read_to_string(output.join("event_12.json")).unwrap(), "{}");
}

#[test]
fn test_convert_file_report() {
    let temp_dir = TempDir::new().unwrap();
    let bulletin = write_bulletin(temp_dir.path(), "event_12.reb", &sample_bulletin());
    let writer = JsonWriter::new(OutputConfig::default());

    let report = convert_file(&RebParser::new(), &writer, &bulletin).unwrap();

    assert_eq!(report.source, bulletin);
    assert_eq!(report.event_id.as_deref(), Some("12"));
    assert_eq!(report.magnitudes, 2);
    assert_eq!(report.arrivals, 2);
    assert_eq!(report.discarded_lines, 0);
    assert!(matches!(report.outcome, WriteOutcome::Rendered(ref json) if json.starts_with('{')));
}

#[tokio::test]
async fn test_custom_parser_tags_events() {
    let temp_dir = TempDir::new().unwrap();
    let bulletin = write_bulletin(temp_dir.path(), "event_12.reb", &sample_bulletin());
    let output = temp_dir.path().join("json");

    let processor = BulletinProcessor::new(vec![path_string(&bulletin)], test_config(&output))
        .unwrap()
        .with_parser(RebParser::new().with_created_by("Antelope Linux_a2"));
    processor.process().await.unwrap();

    let json = fs::read_to_string(output.join("event_12.json")).unwrap();
    let event: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(event.created_by.as_deref(), Some("Antelope Linux_a2"));
}
