//! JSON output for parsed bulletins
//!
//! Each event becomes one JSON document. With an output directory the
//! document is written to `<file stem>.json`; without one it is rendered for
//! the caller to print as a JSON line.

use crate::config::OutputConfig;
use crate::constants::OUTPUT_EXTENSION;
use crate::error::Result;
use crate::models::Event;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What happened to one rendered event
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// Document written to this path
    Written(PathBuf),

    /// Document already existed and overwriting is disabled
    Skipped(PathBuf),

    /// Document rendered for stdout
    Rendered(String),
}

/// JSON writer configured from [`OutputConfig`]
#[derive(Debug, Clone)]
pub struct JsonWriter {
    config: OutputConfig,
}

impl JsonWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Serialize an event, dropping the raw text unless it was requested
    pub fn render(&self, event: &Event) -> Result<String> {
        let mut value = serde_json::to_value(event)?;

        if !self.config.include_raw_text {
            if let Some(object) = value.as_object_mut() {
                object.remove("raw_text");
            }
        }

        let json = if self.config.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };

        Ok(json)
    }

    /// Target path for the document of a bulletin file
    pub fn output_path(&self, source: &Path) -> Option<PathBuf> {
        let directory = self.config.directory.as_ref()?;
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bulletin".to_string());

        Some(directory.join(format!("{}.{}", stem, OUTPUT_EXTENSION)))
    }

    /// Render an event and write it next to the other documents
    pub fn write_event(&self, event: &Event, source: &Path) -> Result<WriteOutcome> {
        let Some(target) = self.output_path(source) else {
            return Ok(WriteOutcome::Rendered(self.render(event)?));
        };

        if target.exists() && !self.config.overwrite {
            warn!("Output exists, skipping: {}", target.display());
            return Ok(WriteOutcome::Skipped(target));
        }

        let mut json = self.render(event)?;
        json.push('\n');
        std::fs::write(&target, json)?;

        debug!("Wrote {}", target.display());
        Ok(WriteOutcome::Written(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn event() -> Event {
        let mut event = Event::new("REB - Event 12 Vrancea");
        event.event_id = Some("12".to_string());
        event
    }

    #[test]
    fn test_render_omits_raw_text_by_default() {
        let writer = JsonWriter::new(OutputConfig::default());
        let json = writer.render(&event()).unwrap();

        assert!(!json.contains("raw_text"));
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""event_id":"12""#));
    }

    #[test]
    fn test_render_keeps_raw_text_on_request() {
        let writer = JsonWriter::new(OutputConfig {
            include_raw_text: true,
            pretty: true,
            ..OutputConfig::default()
        });
        let json = writer.render(&event()).unwrap();

        assert!(json.contains(r#""raw_text": "REB - Event 12 Vrancea""#));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_output_path_uses_file_stem() {
        let writer = JsonWriter::new(OutputConfig {
            directory: Some(PathBuf::from("/out")),
            ..OutputConfig::default()
        });

        assert_eq!(
            writer.output_path(Path::new("/data/event_12.reb")),
            Some(PathBuf::from("/out/event_12.json"))
        );
        assert_eq!(JsonWriter::new(OutputConfig::default()).output_path(Path::new("a.reb")), None);
    }

    #[test]
    fn test_write_event_respects_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("event_12.json");
        std::fs::write(&target, "{}").unwrap();

        let keep = JsonWriter::new(OutputConfig {
            directory: Some(temp_dir.path().to_path_buf()),
            overwrite: false,
            ..OutputConfig::default()
        });
        let outcome = keep.write_event(&event(), Path::new("event_12.reb")).unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped(target.clone()));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}");

        let replace = JsonWriter::new(OutputConfig {
            directory: Some(temp_dir.path().to_path_buf()),
            ..OutputConfig::default()
        });
        let outcome = replace.write_event(&event(), Path::new("event_12.reb")).unwrap();
        assert_eq!(outcome, WriteOutcome::Written(target.clone()));

        let written: Event = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(written.event_id.as_deref(), Some("12"));
        assert!(written.raw_text.is_empty());
    }
}
