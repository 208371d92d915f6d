//! # Bundled Preload
//!
//! The site ships a copy of the dataset alongside its pages for instant
//! rendering. The file is either a bare JSON array of records or a script
//! that assigns one (`window.DATA_PRELOAD = [ ... ];`); both are accepted.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use meridian_stats::RecordSet;
use serde_json::Value;

use crate::error::SourceError;
use crate::source::RecordSource;

#[derive(Debug, Clone)]
enum Origin {
    Inline(Arc<RecordSet>),
    File(PathBuf),
}

/// Records bundled with the deployment.
#[derive(Debug, Clone)]
pub struct PreloadSource {
    origin: Origin,
}

impl PreloadSource {
    pub fn from_records(records: RecordSet) -> Self {
        Self {
            origin: Origin::Inline(Arc::new(records)),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::File(path.into()),
        }
    }
}

/// Parse preload text into records.
pub fn parse_preload(text: &str) -> Result<RecordSet, SourceError> {
    let body = text.trim();
    let body = if body.starts_with('[') {
        body
    } else {
        let start = body
            .find('[')
            .ok_or_else(|| SourceError::decode("preload", "no JSON array found"))?;
        let end = body
            .rfind(']')
            .filter(|end| *end > start)
            .ok_or_else(|| SourceError::decode("preload", "unterminated JSON array"))?;
        &body[start..=end]
    };
    let values: Vec<Value> =
        serde_json::from_str(body).map_err(|e| SourceError::decode("preload", e))?;
    Ok(RecordSet::from_json_array(&values))
}

#[async_trait]
impl RecordSource for PreloadSource {
    fn name(&self) -> &str {
        "preload"
    }

    async fn fetch(&self) -> Result<RecordSet, SourceError> {
        match &self.origin {
            Origin::Inline(records) => Ok(records.as_ref().clone()),
            Origin::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: path.clone(),
                        source,
                    })?;
                let records = parse_preload(&text)?;
                tracing::debug!(path = %path.display(), records = records.len(), "read preload");
                Ok(records)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let set = parse_preload(r#"[{"Country":"Chile"},{"Country":"Peru"}, 7]"#).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn parses_script_assignment() {
        let text = "// generated\nwindow.DATA_PRELOAD = [{\"Country\": \"Chile\", \"Region\": [\"South America\"]}];\n";
        let set = parse_preload(text).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.headers().iter().any(|h| h == "Region"));
    }

    #[test]
    fn rejects_text_without_array() {
        assert!(matches!(
            parse_preload("window.DATA_PRELOAD = null;"),
            Err(SourceError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"[{"Country":"Kenya"}]"#).unwrap();
        let source = PreloadSource::from_file(file.path());
        assert_eq!(source.fetch().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = PreloadSource::from_file("/nonexistent/meridian/preload.json");
        assert!(matches!(source.fetch().await, Err(SourceError::Io { .. })));
    }
}
