//! Honors-alternative detection
//!
//! The upstream data often lists a course and its honors section (`MATH 1A`,
//! `MATH 1AH`) in one group with an "And" conjunction, although either one
//! satisfies the requirement. This predicate recognises that pattern so the
//! expression builder can rewrite the conjunction to "or".

/// True when every code is the same `<prefix> <number>` up to one trailing
/// `H`, and at least one of them carries the `H`
///
/// Purely lexical: a code that is not exactly two whitespace-separated tokens
/// makes the whole set ineligible, and suffixes other than `H` are never
/// treated as honors.
pub fn is_honors_alternative<S: AsRef<str>>(codes: &[S]) -> bool {
    if codes.len() < 2 {
        return false;
    }

    let mut base: Option<(&str, &str)> = None;
    let mut any_honors = false;

    for code in codes {
        let mut tokens = code.as_ref().split_whitespace();
        let (Some(prefix), Some(number), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return false;
        };

        let normalized = number.strip_suffix('H').unwrap_or(number);
        any_honors |= normalized.len() != number.len();

        match base {
            None => base = Some((prefix, normalized)),
            Some(seen) if seen == (prefix, normalized) => {}
            Some(_) => return false,
        }
    }

    any_honors
}
