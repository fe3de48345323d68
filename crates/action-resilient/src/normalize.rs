//! Display-string normalization for price and title comparison.

/// Extract the integer value of a display-formatted currency string.
///
/// Every non-digit character (currency symbol, thousands separator,
/// non-breaking space) is stripped and the remaining digits are parsed
/// base-10 in their original order. An empty remainder is 0 by contract,
/// never an error: callers compare normalized integers, not raw strings.
pub fn normalize_price(raw: &str) -> u64 {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add((c as u8 - b'0') as u64)
        })
}

/// Sum independently normalized price strings (expected-subtotal builder).
pub fn sum_prices<S: AsRef<str>>(prices: &[S]) -> u64 {
    prices
        .iter()
        .fold(0u64, |acc, p| acc.saturating_add(normalize_price(p.as_ref())))
}

/// Fold Spanish accented characters to their ASCII base (ñ→n, á→a, …).
pub fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            'Á' | 'À' | 'Ä' => 'A',
            'É' | 'È' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Ü' => 'U',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

/// Lowercased, accent-folded, alphanumeric-only form for URL matching
/// ("Cumpleaños" → "cumpleanos").
pub fn slug(text: &str) -> String {
    fold_accents(text)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Flexible title comparison: case- and accent-insensitive, matching when
/// either normalized string contains the other (page titles often carry
/// extra text around the category name).
pub fn titles_match(actual: &str, expected: &str) -> bool {
    let actual = fold_accents(actual.trim()).to_lowercase();
    let expected = fold_accents(expected.trim()).to_lowercase();
    if actual.is_empty() || expected.is_empty() {
        return false;
    }
    actual.contains(&expected) || expected.contains(&actual)
}
