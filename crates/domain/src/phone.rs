//! WhatsApp address formatting
//!
//! Twilio addresses WhatsApp users as `whatsapp:+<E.164>`. These helpers
//! normalize free-form phone input into that shape. No digit-count or
//! country-code validation happens here; the provider rejects bad numbers.

/// Scheme prefix Twilio uses for WhatsApp addresses
pub const PROVIDER_PREFIX: &str = "whatsapp:";

/// Normalize a raw phone number into `+<digits>` form
///
/// Keeps ASCII digits and a `+` only when it is the first kept character,
/// then prepends `+` if it is missing.
pub fn format_number(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len() + 1);

    for c in raw.chars() {
        if c.is_ascii_digit() || (c == '+' && cleaned.is_empty()) {
            cleaned.push(c);
        }
    }

    if cleaned.starts_with('+') {
        cleaned
    } else {
        format!("+{cleaned}")
    }
}

/// Format a number and prepend the `whatsapp:` scheme
///
/// Input that already carries the scheme is formatted the same way, since
/// [`format_number`] drops its letters and colon.
pub fn add_provider_prefix(raw: &str) -> String {
    format!("{PROVIDER_PREFIX}{}", format_number(raw))
}

/// Remove a leading `whatsapp:` scheme, if any
pub fn strip_provider_prefix(address: &str) -> &str {
    address.strip_prefix(PROVIDER_PREFIX).unwrap_or(address)
}
