/*!
 * Serde helpers for uploaded row data.
 *
 * Spreadsheet imports are loosely typed: an equipment number may arrive as a
 * JSON number, a quantity as a string, an empty cell as `null`. These helpers
 * normalise such values at the deserialization boundary so the pipeline only
 * ever sees `String` and `f64`.
 */

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize text that may be a string, a number or null.
///
/// Integral floats lose their trailing `.0` (`10000123.0` -> `"10000123"`),
/// null becomes the empty string.
///
/// ```rust
/// use serde::Deserialize;
/// use matreq_core::utils::serde::deserialize_lenient_string;
///
/// #[derive(Deserialize)]
/// struct Upload {
///     #[serde(default, deserialize_with = "deserialize_lenient_string")]
///     equipment_id: String,
/// }
///
/// let upload: Upload = serde_json::from_str(r#"{"equipment_id": 10000123}"#).unwrap();
/// assert_eq!(upload.equipment_id, "10000123");
/// ```
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(number_to_text(&n)),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "Expected text value, found: {other}"
        ))),
    }
}

/// Deserialize optional text; null and blank strings become `None`.
pub fn deserialize_optional_text<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = deserialize_lenient_string(deserializer)?;
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Deserialize a quantity given as number or numeric string.
///
/// Null and blank strings read as `0.0`, which the order builder treats as
/// "no quantity".
pub fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<Value> = Option::deserialize(deserializer)?;
    let quantity = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("Invalid numeric value: {n}")))?,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("Cannot parse '{s}' as quantity")))?
        }
        Some(other) => {
            return Err(D::Error::custom(format!(
                "Expected numeric value, found: {other}"
            )))
        }
    };

    // `f64::from_str` accepts "inf" and "NaN"
    if quantity.is_finite() {
        Ok(quantity)
    } else {
        Err(D::Error::custom(format!("Quantity must be finite, got {quantity}")))
    }
}

fn number_to_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}
