//! Result card export
//!
//! Saves the finished draw as a JSON card so it can be shared outside the
//! terminal.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::DrawResult;
use crate::domain::value_objects::BirthDate;

/// Signature printed on every saved card
pub const WATERMARK: &str = "✨ nhattruong.ngn ft. AI Thần Toán (uy tín luôn) ✨";

/// Everything shown on a saved result card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultCard {
    pub title: String,
    pub birth_date: String,
    #[serde(flatten)]
    pub result: DrawResult,
    pub created_at: DateTime<Utc>,
    pub watermark: String,
}

impl ResultCard {
    pub fn new(birth_date: &BirthDate, result: &DrawResult, created_at: DateTime<Utc>) -> Self {
        Self {
            title: "Gieo Quẻ Mã Đáo Thành Công".to_string(),
            birth_date: birth_date.to_string(),
            result: result.clone(),
            created_at,
            watermark: WATERMARK.to_string(),
        }
    }

    /// `Loc-Ma-Dao-<year>-<unix millis>.json`
    pub fn file_name(&self, year: i32) -> String {
        format!("Loc-Ma-Dao-{}-{}.json", year, self.created_at.timestamp_millis())
    }
}

/// Writes result cards into a directory
#[derive(Debug, Clone)]
pub struct CardExporter {
    dir: PathBuf,
}

impl CardExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save the card and return the written path
    pub async fn export(&self, birth_date: &BirthDate, result: &DrawResult) -> Result<PathBuf, ExportError> {
        let card = ResultCard::new(birth_date, result, Utc::now());
        let path = self.dir.join(card.file_name(birth_date.year()));

        let json = serde_json::to_vec_pretty(&card)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, json).await?;

        tracing::info!(path = %path.display(), "Result card saved");
        Ok(path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to serialize card: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write card: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FortuneLabel;
    use crate::domain::value_objects::YearBounds;

    fn sample() -> (BirthDate, DrawResult) {
        let date = BirthDate::new(15, 1, 1995, YearBounds::default()).unwrap();
        let result = DrawResult::fallback(FortuneLabel::new("9", "Phát Tài"));
        (date, result)
    }

    #[test]
    fn test_file_name_uses_year_and_timestamp() {
        let (date, result) = sample();
        let created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let card = ResultCard::new(&date, &result, created_at);
        assert_eq!(card.file_name(1995), "Loc-Ma-Dao-1995-1700000000000.json");
    }

    #[tokio::test]
    async fn test_export_writes_readable_card() {
        let (date, result) = sample();
        let dir = std::env::temp_dir().join(format!("madao-export-{}", uuid::Uuid::new_v4()));
        let exporter = CardExporter::new(&dir);

        let path = exporter.export(&date, &result).await.unwrap();

        let saved: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved["birth_date"], "15/1/1995");
        assert_eq!(saved["fortune"]["name"], "Phát Tài");
        assert_eq!(saved["interpretation"]["luckyNumber"], "99");
        assert_eq!(saved["watermark"], WATERMARK);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
