//! Word-likeness heuristic.
//!
//! Separates human-authored tokens (`search-button`, `primaryNav`) from
//! generated or hashed ones (`xk7j2`, `css-1q2w3e`). Selectors built from the
//! former tend to survive redeploys; the latter churn on every build.
//!
//! Rules:
//! - the token must be at least 3 ASCII letters or hyphens, nothing else;
//! - it is split on `-` and on every ASCII uppercase letter, and the separator
//!   is dropped (so `searchButton` splits into `search` and `utton`, and a
//!   leading uppercase letter produces an empty first sub-word);
//! - every sub-word must be longer than 2 bytes;
//! - no sub-word may contain 4 or more consecutive non-vowels.

const MIN_TOKEN_LEN: usize = 3;
const MAX_SHORT_WORD_LEN: usize = 2;
const MAX_NON_VOWEL_RUN: usize = 3;

pub fn is_word_like(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() < MIN_TOKEN_LEN {
        return false;
    }
    if !bytes.iter().all(|&b| b.is_ascii_alphabetic() || b == b'-') {
        return false;
    }
    token
        .split(|c: char| c == '-' || c.is_ascii_uppercase())
        .all(is_plausible_word)
}

fn is_plausible_word(word: &str) -> bool {
    if word.len() <= MAX_SHORT_WORD_LEN {
        return false;
    }
    let mut run = 0;
    for b in word.bytes() {
        if is_vowel(b) {
            run = 0;
        } else {
            run += 1;
            if run > MAX_NON_VOWEL_RUN {
                return false;
            }
        }
    }
    true
}

fn is_vowel(b: u8) -> bool {
    matches!(b.to_ascii_lowercase(), b'a' | b'e' | b'i' | b'o' | b'u')
}
