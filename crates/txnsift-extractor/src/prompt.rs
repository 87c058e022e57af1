//! LLM prompt engineering for transaction extraction

use txnsift_domain::Category;

/// Builds the extraction prompt for a normalized alert line
///
/// The prompt pins down every field's expected format, enumerates the
/// closed category set (generated from [`Category::ALL`], never
/// hand-duplicated), gives one worked example record, and embeds the alert
/// text verbatim between delimiters.
pub struct PromptBuilder {
    alert_text: String,
}

impl PromptBuilder {
    /// Create a prompt builder for the given normalized alert text
    pub fn new(alert_text: impl Into<String>) -> Self {
        Self {
            alert_text: alert_text.into(),
        }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Instruction and field format specification
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n");

        // 2. The closed category set
        prompt.push_str("  \"category\" can only be: ");
        prompt.push_str(&category_list());
        prompt.push_str(
            " ONLY. If the category does not match any of these, use \"Other\".\n\n",
        );

        // 3. Worked example
        prompt.push_str("Example:\n\n");
        prompt.push_str(EXAMPLE_RECORD);
        prompt.push_str("\n\n");

        // 4. The alert to analyze
        prompt.push_str("Transaction alert:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.alert_text);
        prompt.push_str("\n---\n\n");

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Render the category enumeration as a quoted, comma-separated list
fn category_list() -> String {
    let quoted: Vec<String> = Category::ALL
        .iter()
        .map(|c| format!("\"{}\"", c.as_str()))
        .collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            format!("{}, or {}", rest.join(", "), last)
        }
        _ => quoted.join(", "),
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Please format this credit card transaction as JSON.
  "date" should be in the format YYYY-MM-DD.
  "time" should be the human-readable time including the timezone abbreviation.
  "amount" should be the charge amount with a leading "$".
  "account" should be the account label, keeping any masked trailing digits.
  "merchant_raw" should be the exact merchant name as it appears on the credit card statement.
  "merchant" should be enriched to the common, well-known merchant name without store-specific, location, or point-of-sale provider info, formatted for legibility. If the merchant is part of a restaurant group, extract the specific restaurant name instead of the group name."#;

const EXAMPLE_RECORD: &str = r#"{"date": "2021-12-31", "time": "4:35 PM ET", "amount": "$1.00", "account": "Checking (...123)", "merchant_raw": "SQ* SWEET GREEN CHICAGO", "merchant": "Sweet Green", "category": "Food & Dining"}"#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Reply with a single JSON object only, no markdown code blocks, no explanations.";
