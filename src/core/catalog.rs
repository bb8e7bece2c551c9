//! Currencies offered for selection, with display names

pub const CURRENCIES: [(&str, &str); 25] = [
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("AUD", "Australian Dollar"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("CNY", "Chinese Yuan"),
    ("INR", "Indian Rupee"),
    ("SGD", "Singapore Dollar"),
    ("AED", "UAE Dirham"),
    ("SAR", "Saudi Riyal"),
    ("KWD", "Kuwaiti Dinar"),
    ("QAR", "Qatari Riyal"),
    ("THB", "Thai Baht"),
    ("MYR", "Malaysian Ringgit"),
    ("IDR", "Indonesian Rupiah"),
    ("PHP", "Philippine Peso"),
    ("VND", "Vietnamese Dong"),
    ("KRW", "South Korean Won"),
    ("HKD", "Hong Kong Dollar"),
    ("TWD", "Taiwan Dollar"),
    ("NZD", "New Zealand Dollar"),
    ("ZAR", "South African Rand"),
    ("BRL", "Brazilian Real"),
];

/// Display name for `code`, or the code itself when unknown.
pub fn currency_name(code: &str) -> &str {
    CURRENCIES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, name)| *name)
}

pub fn codes() -> impl Iterator<Item = &'static str> {
    CURRENCIES.iter().map(|(code, _)| *code)
}
