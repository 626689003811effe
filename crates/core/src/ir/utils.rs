//! Identifier canonicalization and reference resolution.

/// Canonicalize a raw string (URL template or property key) into a
/// PascalCase identifier.
///
/// Splits on `/`, `-`, and `_`; the character following any separator (and
/// the first character overall) is upper-cased, separators are dropped, and
/// every other character passes through unchanged. Total over any input.
pub fn canonicalize(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut upper_next = true;

    for ch in raw.chars() {
        if matches!(ch, '/' | '-' | '_') {
            upper_next = true;
            continue;
        }

        if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Resolve a `/`-delimited reference to its terminal component name.
///
/// An absent or empty reference resolves to the caller-supplied fallback;
/// this never fails.
pub fn resolve_reference(reference: Option<&str>, fallback: &str) -> String {
    match reference {
        Some(reference) if !reference.is_empty() => reference
            .rsplit('/')
            .next()
            .map_or_else(|| fallback.to_string(), str::to_string),
        _ => fallback.to_string(),
    }
}
