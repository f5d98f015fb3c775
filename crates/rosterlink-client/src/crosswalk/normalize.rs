//! Canonical comparison forms for names, team codes and positions.
//!
//! Every function here is total: any input, including the empty string,
//! produces a (possibly empty) lowercase `[a-z0-9]` string.

use crate::crosswalk::types::Position;

// Longest first so that ` iii` wins over ` ii` and ` jr.` over ` jr`.
const NAME_SUFFIXES: [&str; 10] = [
    " junior", " senior", " iii", " jr.", " sr.", " iv", " ii", " jr", " sr", " v",
];

const CANONICAL_DEFENSE: &str = "def";

pub fn normalize_name(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let stripped = strip_name_suffix(&lowered);
    keep_comparable_chars(stripped)
}

pub fn normalize_token(value: &str) -> String {
    keep_comparable_chars(&value.to_lowercase())
}

/// Team codes use the same character stripping as names, without suffix
/// removal.
pub fn normalize_team(value: Option<&str>) -> String {
    value.map(normalize_token).unwrap_or_default()
}

pub fn normalize_position(value: &str) -> String {
    let token = normalize_token(value);
    match token.as_str() {
        "dst" | "def" => CANONICAL_DEFENSE.to_string(),
        _ => token,
    }
}

/// Code stored on a record at intake: trimmed, upper case, with the defense
/// synonyms folded into `DEF`. Unknown codes pass through untouched.
pub fn canonical_position_code(value: &str) -> String {
    match Position::from_code(value) {
        Some(position) => position.code().to_string(),
        None => value.trim().to_ascii_uppercase(),
    }
}

fn strip_name_suffix(value: &str) -> &str {
    for suffix in NAME_SUFFIXES {
        if let Some(head) = value.strip_suffix(suffix) {
            return head;
        }
    }
    value
}

fn keep_comparable_chars(value: &str) -> String {
    value
        .chars()
        .filter(|character| character.is_ascii_lowercase() || character.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        canonical_position_code, normalize_name, normalize_position, normalize_team,
        normalize_token,
    };

    #[test]
    fn names_lose_case_punctuation_and_spacing() {
        assert_eq!(normalize_name("Patrick Mahomes"), "patrickmahomes");
        assert_eq!(normalize_name("  D'Andre  Swift "), "dandreswift");
        assert_eq!(normalize_name("Amon-Ra St. Brown"), "amonrastbrown");
    }

    #[test]
    fn generational_suffixes_are_stripped_once() {
        assert_eq!(normalize_name("Odell Beckham Jr."), "odellbeckham");
        assert_eq!(normalize_name("Odell Beckham Jr"), "odellbeckham");
        assert_eq!(normalize_name("Marvin Harrison Junior"), "marvinharrison");
        assert_eq!(normalize_name("Kenneth Walker III"), "kennethwalker");
        assert_eq!(normalize_name("Michael Pittman II"), "michaelpittman");
        assert_eq!(normalize_name("Henry Ruggs IV"), "henryruggs");
        assert_eq!(normalize_name("Some Player V"), "someplayer");
        assert_eq!(normalize_name("Ken Griffey Sr."), "kengriffey");
        assert_eq!(normalize_name("Name Jr. Jr."), "namejr");
    }

    #[test]
    fn suffix_requires_a_word_boundary() {
        assert_eq!(normalize_name("Trev"), "trev");
        assert_eq!(normalize_name("Jr"), "jr");
        assert_eq!(normalize_name("Travis Iv"), "travis");
    }

    #[test]
    fn empty_and_symbol_only_inputs_normalize_to_empty() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("  .-' "), "");
        assert_eq!(normalize_token(""), "");
        assert_eq!(normalize_team(None), "");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(normalize_name("José Ramírez"), "josramrez");
    }

    #[test]
    fn teams_do_not_get_suffix_stripping() {
        assert_eq!(normalize_team(Some("K.C.")), "kc");
        assert_eq!(normalize_token("Team Jr"), "teamjr");
    }

    #[test]
    fn defense_codes_share_one_position_key() {
        assert_eq!(normalize_position("DST"), "def");
        assert_eq!(normalize_position("D/ST"), "def");
        assert_eq!(normalize_position("DEF"), "def");
        assert_eq!(normalize_position("WR"), "wr");
    }

    #[test]
    fn intake_position_codes_are_canonical() {
        assert_eq!(canonical_position_code("dst"), "DEF");
        assert_eq!(canonical_position_code(" qb"), "QB");
        assert_eq!(canonical_position_code("lb"), "LB");
    }
}
