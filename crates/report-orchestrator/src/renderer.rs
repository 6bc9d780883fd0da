use anyhow::{Context, Result};
use async_trait::async_trait;
use report_assembler::ReportDocument;
use std::path::PathBuf;

/// Turns an assembled document into an artifact and returns a handle to it
/// (a path, URL or identifier, depending on the renderer).
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(&self, document: &ReportDocument) -> Result<String>;

    fn renderer_name(&self) -> &str;
}

/// Writes each document as pretty-printed JSON into a directory
pub struct JsonFileRenderer {
    output_dir: PathBuf,
}

impl JsonFileRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    fn file_name(document: &ReportDocument) -> String {
        let safe_id: String = document
            .asset_id()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!(
            "{}-{}.json",
            safe_id,
            document.footer.generated_at.format("%Y%m%dT%H%M%S%.3f")
        )
    }
}

#[async_trait]
impl ReportRenderer for JsonFileRenderer {
    async fn render(&self, document: &ReportDocument) -> Result<String> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(Self::file_name(document));
        let body = serde_json::to_vec_pretty(document)?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(path.display().to_string())
    }

    fn renderer_name(&self) -> &str {
        "json-file"
    }
}
