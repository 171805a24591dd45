// File recording sinks - jsonl and csv session exports
//
// Reference implementation of the RecorderFactory/RecordSink seam.
// Each session gets its own timestamped file under the download root.

use std::path::Path;

use async_trait::async_trait;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::dispatch::errors::AdapterError;
use crate::dispatch::models::{ExportFormat, FetchedItem};
use crate::dispatch::traits::{RecordSink, RecorderFactory, RecorderOptions};

const STAMP: &[FormatItem<'static>] =
    format_description!("[year][month][day]-[hour][minute][second]");

/// Opens one export file per recording session, named
/// `<label>_<utc timestamp>.<ext>` under the given root.
pub struct FileRecorderFactory;

#[async_trait]
impl RecorderFactory for FileRecorderFactory {
    async fn open(
        &self,
        root: &Path,
        options: &RecorderOptions,
    ) -> Result<Box<dyn RecordSink>, AdapterError> {
        fs::create_dir_all(root)
            .await
            .map_err(|e| AdapterError::Recorder(format!("create {}: {}", root.display(), e)))?;

        let stamp = OffsetDateTime::now_utc()
            .format(STAMP)
            .map_err(|e| AdapterError::Recorder(e.to_string()))?;
        let filename = format!("{}_{}.{}", options.label, stamp, options.format.extension());
        let path = root.join(filename);
        debug!(path = %path.display(), "opening export file");

        match options.format {
            ExportFormat::Jsonl => {
                let file = File::create(&path)
                    .await
                    .map_err(|e| AdapterError::Recorder(format!("create {}: {}", path.display(), e)))?;
                Ok(Box::new(JsonlSink { file }))
            }
            ExportFormat::Csv => {
                let file = std::fs::File::create(&path)
                    .map_err(|e| AdapterError::Recorder(format!("create {}: {}", path.display(), e)))?;
                Ok(Box::new(CsvSink {
                    writer: csv::Writer::from_writer(file),
                }))
            }
        }
    }
}

/// One json object per line.
struct JsonlSink {
    file: File,
}

#[async_trait]
impl RecordSink for JsonlSink {
    async fn write(&mut self, item: &FetchedItem) -> Result<(), AdapterError> {
        let mut line =
            serde_json::to_vec(item).map_err(|e| AdapterError::Recorder(e.to_string()))?;
        line.push(b'\n');
        self.file
            .write_all(&line)
            .await
            .map_err(|e| AdapterError::Recorder(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), AdapterError> {
        self.file
            .flush()
            .await
            .map_err(|e| AdapterError::Recorder(e.to_string()))
    }
}

/// Header row plus one record per item. Rows are tiny, so the blocking
/// csv writer is fine inside the async sink.
struct CsvSink {
    writer: csv::Writer<std::fs::File>,
}

#[async_trait]
impl RecordSink for CsvSink {
    async fn write(&mut self, item: &FetchedItem) -> Result<(), AdapterError> {
        self.writer
            .serialize(item)
            .map_err(|e| AdapterError::Recorder(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), AdapterError> {
        self.writer
            .flush()
            .map_err(|e| AdapterError::Recorder(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> FetchedItem {
        FetchedItem {
            id: id.to_string(),
            title: title.to_string(),
            author: "tester".to_string(),
            publish_time: Some("2024-01-01 10:00:00".to_string()),
        }
    }

    fn options(format: ExportFormat) -> RecorderOptions {
        RecorderOptions {
            format,
            label: "detail".to_string(),
        }
    }

    async fn single_file(dir: &Path) -> std::path::PathBuf {
        let mut entries = fs::read_dir(dir).await.unwrap();
        let entry = entries.next_entry().await.unwrap().unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
        entry.path()
    }

    #[tokio::test]
    async fn test_jsonl_sink_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let factory = FileRecorderFactory;
        let mut sink = factory
            .open(dir.path(), &options(ExportFormat::Jsonl))
            .await
            .unwrap();

        sink.write(&item("1", "first")).await.unwrap();
        sink.write(&item("2", "second")).await.unwrap();
        sink.close().await.unwrap();

        let path = single_file(dir.path()).await;
        assert_eq!(path.extension().unwrap(), "jsonl");

        let content = fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: FetchedItem = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.id, "1");
    }

    #[tokio::test]
    async fn test_csv_sink_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let factory = FileRecorderFactory;
        let mut sink = factory
            .open(dir.path(), &options(ExportFormat::Csv))
            .await
            .unwrap();

        sink.write(&item("1", "first")).await.unwrap();
        sink.close().await.unwrap();

        let path = single_file(dir.path()).await;
        let content = fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("id"));
        assert!(lines[1].starts_with("1,first,tester"));
    }

    #[tokio::test]
    async fn test_session_file_name_carries_label() {
        let dir = tempfile::tempdir().unwrap();
        let factory = FileRecorderFactory;
        let mut sink = factory
            .open(dir.path(), &options(ExportFormat::Jsonl))
            .await
            .unwrap();
        sink.close().await.unwrap();

        let path = single_file(dir.path()).await;
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("detail_"));
    }
}
