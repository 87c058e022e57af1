//! Parse and validate LLM output into a transaction record
//!
//! The model's reply is untrusted input: it is validated with the same
//! rigor as any external API response. A record is accepted iff all seven
//! fields are present as non-empty strings and `category` is a member of
//! the closed set.

use crate::error::ExtractorError;
use serde_json::Value;
use txnsift_domain::{Category, TransactionRecord};

/// Parse an LLM JSON response into a validated record
///
/// Handles responses wrapped in markdown code fences (some models add them
/// despite instructions). On schema violations the returned error carries
/// the offending JSON for diagnostics.
pub fn parse_llm_response(response: &str) -> Result<TransactionRecord, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::JsonParse(e.to_string()))?;

    validate_record(&json)
}

/// Extract JSON from a response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```json") || trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::JsonParse("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validate the parsed JSON against the record schema
fn validate_record(json: &Value) -> Result<TransactionRecord, ExtractorError> {
    let obj = json
        .as_object()
        .ok_or_else(|| schema_error("Expected a JSON object", json))?;

    let date = required_string(obj, "date", json)?;
    let time = required_string(obj, "time", json)?;
    let amount = required_string(obj, "amount", json)?;
    let account = required_string(obj, "account", json)?;
    let merchant_raw = required_string(obj, "merchant_raw", json)?;
    let merchant = required_string(obj, "merchant", json)?;

    let category_str = required_string(obj, "category", json)?;
    let category = Category::parse(&category_str)
        .ok_or_else(|| schema_error(&format!("Invalid category: {}", category_str), json))?;

    Ok(TransactionRecord {
        date,
        time,
        amount,
        account,
        merchant_raw,
        merchant,
        category,
    })
}

fn required_string(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    raw: &Value,
) -> Result<String, ExtractorError> {
    let value = obj
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| schema_error(&format!("Missing or invalid '{}'", field), raw))?;

    if value.is_empty() {
        return Err(schema_error(&format!("Field '{}' is empty", field), raw));
    }

    Ok(value.to_string())
}

fn schema_error(reason: &str, raw: &Value) -> ExtractorError {
    ExtractorError::SchemaValidation {
        reason: reason.to_string(),
        raw: raw.to_string(),
    }
}
