//! Interpretation content attached to a drawn fortune
//!
//! # Architectural Note
//!
//! The serde field names ARE the JSON schema the generative backend is asked
//! to fill, so they stay camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Free-text reading of a fortune for one birth date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationContent {
    /// Can Chi year name
    #[serde(default)]
    pub zodiac: String,
    /// Ngũ hành element
    #[serde(default)]
    pub element: String,
    /// Pythagorean destiny number
    #[serde(default)]
    pub destiny_number: String,
    /// One-line personality verdict
    #[serde(default)]
    pub personality: String,
    pub career: String,
    pub money: String,
    pub love: String,
    #[serde(default)]
    pub health: String,
    #[serde(default)]
    pub lucky_color: String,
    #[serde(default)]
    pub lucky_number: String,
    #[serde(default)]
    pub lucky_hour: String,
    #[serde(default)]
    pub warning: String,
    /// Closing four-line lục bát verse
    pub poem: String,
}

/// Field names in the order they are requested from the backend
pub const INTERPRETATION_FIELDS: [&str; 13] = [
    "zodiac",
    "element",
    "destinyNumber",
    "personality",
    "career",
    "money",
    "love",
    "health",
    "luckyColor",
    "luckyNumber",
    "luckyHour",
    "warning",
    "poem",
];

impl InterpretationContent {
    /// Canned reading used when the backend cannot produce one
    pub fn fallback() -> Self {
        Self {
            zodiac: "Tuổi Mèo Con".to_string(),
            element: "Mệnh Kim Cương".to_string(),
            destiny_number: "Số 9".to_string(),
            personality: "Bề ngoài lạnh lùng, bên trong nhiều tiền (âm phủ).".to_string(),
            career: "Deadline dí chạy không kịp thở nhưng lương về là hết mệt.".to_string(),
            money: "Tiền vào cửa trước, lẻn ra cửa sau vì Shopee.".to_string(),
            love: "Ế trong tư thế ngẩng cao đầu.".to_string(),
            health: "Đau lưng mỏi gối vì ngồi code quá nhiều.".to_string(),
            lucky_color: "Hồng cánh sen".to_string(),
            lucky_number: "99".to_string(),
            lucky_hour: "12:00 trưa".to_string(),
            warning: "Bớt uống trà sữa lại.".to_string(),
            poem: "Đầu năm mua muối cuối năm mua vôi\n\
                   Tiền tài rủng rỉnh sướng cái thân tôi\n\
                   Tình duyên phơi phới như hoa nở\n\
                   Cả năm hạnh phúc cười hỉ hả thôi"
                .to_string(),
        }
    }

    /// Check the fields every result card renders unconditionally
    pub fn validate(&self) -> Result<(), MissingField> {
        let required = [
            ("career", &self.career),
            ("money", &self.money),
            ("love", &self.love),
            ("poem", &self.poem),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(MissingField(name));
            }
        }
        Ok(())
    }
}

/// A required interpretation field was blank
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("interpretation field '{0}' is empty")]
pub struct MissingField(pub &'static str);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_passes_validation() {
        let fallback = InterpretationContent::fallback();
        assert!(fallback.validate().is_ok());
        assert!(!fallback.health.is_empty());
        assert_eq!(fallback.poem.lines().count(), 4);
    }

    #[test]
    fn test_fallback_serializes_every_schema_field() {
        let value = serde_json::to_value(InterpretationContent::fallback()).unwrap();
        let object = value.as_object().unwrap();
        for field in INTERPRETATION_FIELDS {
            let text = object.get(field).and_then(|v| v.as_str());
            assert!(text.is_some_and(|t| !t.is_empty()), "missing {field}");
        }
        assert_eq!(object.len(), INTERPRETATION_FIELDS.len());
    }

    #[test]
    fn test_deserialize_defaults_optional_metadata() {
        let content: InterpretationContent = serde_json::from_str(
            r#"{"career": "A", "money": "B", "love": "C", "poem": "D"}"#,
        )
        .unwrap();
        assert_eq!(content.career, "A");
        assert_eq!(content.poem, "D");
        assert!(content.zodiac.is_empty());
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_required_field() {
        let content = InterpretationContent {
            career: "A".to_string(),
            money: "   ".to_string(),
            love: "C".to_string(),
            poem: "D".to_string(),
            ..Default::default()
        };
        assert_eq!(content.validate(), Err(MissingField("money")));
    }
}
