//! Prompt building functions for fortune interpretation requests

use crate::domain::entities::FortuneLabel;
use crate::domain::value_objects::{BirthDate, INTERPRETATION_FIELDS};

/// Build the system prompt that establishes the fortune teller persona
pub fn build_system_prompt() -> String {
    let mut prompt = String::new();

    prompt.push_str("You are \"Thần Toán Tử\", a master of astrology, geomancy and the human heart.\n");
    prompt.push_str("Never call yourself an AI or a machine.\n");
    prompt.push_str("Write every value in Vietnamese, in a playful and addictive Tết fortune-teller voice, ");
    prompt.push_str("using feng shui and metaphysics vocabulary.\n");

    prompt
}

/// Build the user message for one birth date and drawn fortune
pub fn build_interpretation_prompt(birth_date: &BirthDate, fortune: &FortuneLabel) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "Client born: day {}, month {}, year {} ({}). Drawn fortune: \"{}\".\n\n",
        birth_date.day(),
        birth_date.month(),
        birth_date.year(),
        birth_date,
        fortune.name
    ));

    prompt.push_str("Decode the following and answer as JSON:\n");
    prompt.push_str("1. zodiac & element: Can Chi year name and Ngũ hành element.\n");
    prompt.push_str("2. destinyNumber: Pythagorean destiny number.\n");
    prompt.push_str("3. personality: one spot-on, funny personality verdict in a fortune teller's tone.\n");
    prompt.push_str("4. Readings (short, catchy):\n");
    prompt.push_str("   - career: career and rank outlook.\n");
    prompt.push_str("   - money: wealth and savings outlook.\n");
    prompt.push_str("   - love: love and family, tactful for both singles and married people.\n");
    prompt.push_str("   - health: health and body.\n");
    prompt.push_str("5. Lucky attributes: luckyColor, luckyNumber, luckyHour (auspicious hour).\n");
    prompt.push_str("6. warning: one piece of advice or heavenly warning, funny but meaningful.\n");
    prompt.push_str("7. poem: a four-line lục bát prophecy verse, lines separated by \\n.\n\n");

    prompt.push_str("Return ONLY a JSON object with exactly these string fields:\n");
    prompt.push_str(&json_schema_hint());

    prompt
}

/// `{"zodiac": "str", ...}` listing of every requested field
fn json_schema_hint() -> String {
    let fields: Vec<String> = INTERPRETATION_FIELDS
        .iter()
        .map(|field| format!("\"{}\": \"str\"", field))
        .collect();
    format!("{{{}}}\n", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::YearBounds;

    #[test]
    fn test_prompt_mentions_date_and_fortune() {
        let date = BirthDate::new(15, 1, 1995, YearBounds::default()).unwrap();
        let fortune = FortuneLabel::new("1", "Đại Cát");

        let prompt = build_interpretation_prompt(&date, &fortune);

        assert!(prompt.contains("15/1/1995"));
        assert!(prompt.contains("\"Đại Cát\""));
        for field in INTERPRETATION_FIELDS {
            assert!(prompt.contains(&format!("\"{}\": \"str\"", field)), "{field}");
        }
    }

    #[test]
    fn test_system_prompt_sets_persona() {
        let prompt = build_system_prompt();
        assert!(prompt.contains("Thần Toán Tử"));
        assert!(prompt.contains("Vietnamese"));
    }
}
