//! Canonical asset-key derivation for team and map art.
//!
//! Both functions are pure and total; they exist only to build asset paths
//! and must stay in lock-step with the naming convention of the asset store.
//! Distinct names that slug to the same key are an accepted risk (the store
//! owns uniqueness), not something to detect or repair here.

/// Asset key for a map name: lower-cased with everything outside `[a-z0-9]`
/// dropped. `"Ascent"` -> `"ascent"`, `"Sub Base"` -> `"subbase"`.
pub fn map_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Asset key for a team name: lower-cased with each whitespace run collapsed
/// to a single underscore. Punctuation survives because team names carry it
/// and the logo files are named the same way.
pub fn team_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }
    slug
}

/// Path of a map's art on the asset store.
pub fn map_art_path(slug: &str) -> String {
    format!("/static/maps/{slug}.jpg")
}

/// Path of a team's logo on the asset store.
pub fn team_logo_path(slug: &str) -> String {
    format!("/static/logos/{slug}.webp")
}
