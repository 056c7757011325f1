//! URL slugs
//!
//! Lowercase ASCII words joined by single hyphens. Latin letters with
//! diacritics lose the mark (`é` -> `e`); other characters act as separators.
//!
//! A campaign slug is `{name}-{owner_id}-{campaign_id}`. The campaign ID is
//! always the last hyphen-separated segment and is digits only, so two rows
//! never share a slug no matter how their names slugify.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Width of the `campaigns.slug` column
pub const SLUG_MAX_LEN: usize = 255;

/// Room kept for the name; the rest holds `-{owner_id}-{campaign_id}`
const NAME_PART_MAX_LEN: usize = 200;

pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug base for a new campaign: name plus owner ID.
///
/// Names with nothing slug-worthy (e.g. entirely non-Latin) reduce to the
/// owner ID.
pub fn campaign_slug(name: &str, owner_id: i64) -> String {
    let mut name_part = slugify(name);
    // ASCII only, so any byte index is a char boundary
    name_part.truncate(NAME_PART_MAX_LEN);
    let name_part = name_part.trim_end_matches('-');

    if name_part.is_empty() {
        owner_id.to_string()
    } else {
        format!("{name_part}-{owner_id}")
    }
}

/// Final slug once the campaign ID is known
pub fn with_campaign_id(base: &str, campaign_id: i64) -> String {
    format!("{base}-{campaign_id}")
}
