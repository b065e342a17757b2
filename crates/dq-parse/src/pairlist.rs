//! Bracketed pair-list grammar.
//!
//! A valid pair list is a comma-separated sequence of bracketed pairs, each
//! pair holding exactly two values: `[1,2],[3,4]`. The grammar is checked by
//! an explicit state machine before any splitting happens, so malformed
//! input is rejected wholesale instead of producing partial pairs.

use dq_model::Scalar;

use crate::scalar_from_token;

/// Scanner state while walking a candidate pair list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing consumed yet.
    Start,
    /// Inside a bracket; counts value characters and commas seen so far.
    Open { values: u32, commas: u32 },
    /// Immediately after a closing bracket.
    Closed,
    /// After the comma separating two pairs.
    Sep,
}

/// Structural validity of a pair-list string.
///
/// Input is expected to be pre-stripped of spaces and leading/trailing
/// commas. An empty string is not a valid pair list, and neither are nested
/// brackets, pairs with fewer than two values, or bare values between pairs.
pub fn matches_pair_grammar(value: &str) -> bool {
    let mut state = State::Start;
    for character in value.chars() {
        state = match (state, character) {
            (State::Start | State::Sep, '[') => State::Open { values: 0, commas: 0 },
            (State::Open { values, commas }, ']') if values >= 2 && commas == 1 => State::Closed,
            (State::Open { values, commas }, ',') if commas == 0 => State::Open {
                values,
                commas: commas + 1,
            },
            (State::Open { values, commas }, ch) if ch != '[' && ch != ']' && ch != ',' => {
                State::Open {
                    values: values + 1,
                    commas,
                }
            }
            (State::Closed, ',') => State::Sep,
            _ => return false,
        };
    }
    state == State::Closed
}

/// Parse a pre-validated pair-list string into scalar 2-tuples.
///
/// Returns `None` when the grammar check fails or any pair does not split
/// into exactly two elements. Integer-looking values stay integers.
pub fn parse_pair_list(raw: &str) -> Option<Vec<(Scalar, Scalar)>> {
    let cleaned: String = raw.chars().filter(|ch| *ch != ' ').collect();
    let cleaned = cleaned.trim_matches(',');
    if !matches_pair_grammar(cleaned) {
        return None;
    }

    let mut pairs = Vec::new();
    for chunk in cleaned.split("],") {
        let bare: String = chunk.chars().filter(|ch| *ch != '[' && *ch != ']').collect();
        let elements: Vec<&str> = bare.split(',').collect();
        let [first, second] = elements[..] else {
            return None;
        };
        pairs.push((
            scalar_from_token(&first.replace('\'', "")),
            scalar_from_token(&second.replace('\'', "")),
        ));
    }
    if pairs.is_empty() {
        return None;
    }
    Some(pairs)
}
