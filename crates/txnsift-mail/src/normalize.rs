//! Whitespace normalization for alert text

/// Collapse raw alert text onto a single line
///
/// Every newline (`\r\n`, `\n`, `\r`) becomes a single space, and any run of
/// two or more spaces collapses to one. Idempotent; never fails.
///
/// # Examples
///
/// ```
/// use txnsift_mail::clean_text;
///
/// let cleaned = clean_text("A charge of\n$12.34  was   made");
/// assert_eq!(cleaned, "A charge of $12.34 was made");
/// ```
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;
    for ch in text.chars() {
        let ch = match ch {
            '\n' | '\r' => ' ',
            other => other,
        };
        if ch == ' ' {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}

/// Normalization policy for inbound alert bodies
///
/// Wraps [`clean_text`] with an optional trailer marker: card issuers append
/// a fixed unsubscribe/disclaimer footer to every alert, and everything from
/// the marker onward is dropped before normalization.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    trailer_marker: Option<String>,
}

impl Normalizer {
    /// Create a normalizer with no trailer stripping
    pub fn new() -> Self {
        Self::default()
    }

    /// Truncate input at the first occurrence of `marker`
    pub fn with_trailer_marker(mut self, marker: impl Into<String>) -> Self {
        self.trailer_marker = Some(marker.into());
        self
    }

    /// Normalize a raw alert body
    pub fn normalize(&self, text: &str) -> String {
        let trimmed = match &self.trailer_marker {
            Some(marker) => match text.find(marker.as_str()) {
                Some(idx) => &text[..idx],
                None => text,
            },
            None => text,
        };
        clean_text(trimmed)
    }
}
