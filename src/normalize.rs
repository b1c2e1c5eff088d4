//! Artist name normalization
//!
//! Canonicalizes artist names so that dash and space variants coming from
//! tags, user input, or the catalog compare equal.

use unicode_normalization::UnicodeNormalization;

/// Dash-like code points folded to ASCII `-`
const DASH_VARIANTS: [char; 6] = [
    '\u{2010}', // hyphen
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2212}', // minus sign
    '\u{2012}', // figure dash
    '\u{2015}', // horizontal bar
];

/// Space separators folded to ASCII space
const SPACE_VARIANTS: [char; 12] = [
    '\u{00A0}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}',
    '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}',
];

/// Normalize an artist name for matching.
///
/// Applies NFKD, folds dash and space variants to ASCII, then collapses
/// whitespace runs to a single space and trims. Idempotent.
pub fn normalize_artist_name(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .map(|c| {
            if DASH_VARIANTS.contains(&c) {
                '-'
            } else if SPACE_VARIANTS.contains(&c) {
                ' '
            } else {
                c
            }
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive artist comparison, raw first and then normalized
pub fn artist_names_match(candidate: &str, artist: &str) -> bool {
    candidate.to_lowercase() == artist.to_lowercase()
        || normalize_artist_name(candidate).to_lowercase()
            == normalize_artist_name(artist).to_lowercase()
}
