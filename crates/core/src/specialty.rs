//! Stylist specialty vocabulary.
//!
//! A stylist's specialty is a comma-separated list of braid techniques.
//! Terms are matched case-insensitively and stored in canonical spelling.

/// Every recognised specialty term, in canonical spelling.
pub const SPECIALTY_TERMS: &[&str] = &[
    "Box Braids",
    "Knotless Braids",
    "Cornrows",
    "Feed-in Braids",
    "Fulani Braids",
    "Goddess Braids",
    "Lemonade Braids",
    "Tribal Braids",
    "Senegalese Twists",
    "Passion Twists",
    "Faux Locs",
    "Butterfly Locs",
    "Kids Braids",
    "Crochet Braids",
];

/// Maximum number of characters in a stored specialty string.
pub const MAX_SPECIALTY_LENGTH: usize = 200;

/// Canonical spelling of `term`, if it is a known specialty.
pub fn canonical_term(term: &str) -> Option<&'static str> {
    let wanted = term.trim();
    SPECIALTY_TERMS
        .iter()
        .copied()
        .find(|t| t.eq_ignore_ascii_case(wanted))
}

/// Normalize a comma-separated specialty list.
///
/// Returns the canonical, de-duplicated list joined with `", "`, or the
/// unrecognised terms as an error message.
pub fn normalize_specialty(raw: &str) -> Result<String, String> {
    let mut known: Vec<&'static str> = Vec::new();
    let mut unknown: Vec<&str> = Vec::new();

    for term in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match canonical_term(term) {
            Some(t) if !known.contains(&t) => known.push(t),
            Some(_) => {}
            None => unknown.push(term),
        }
    }

    if !unknown.is_empty() {
        return Err(format!(
            "Unknown specialty: {}. Valid specialties: {}",
            unknown.join(", "),
            SPECIALTY_TERMS.join(", ")
        ));
    }
    if known.is_empty() {
        return Err("At least one specialty is required".to_string());
    }
    Ok(known.join(", "))
}
