//! Field name expansion.
//!
//! User-supplied name lists are walked in lockstep with the token sequence:
//! padding tokens consume no name and produce no entry, empty or missing
//! names fall back to `.fieldN` (N counts every token, padding included), and
//! the `` prefix`suffix[count] `` macro expands in place into interleaved
//! `prefix_i`/`suffix_i` pairs.

use std::collections::VecDeque;

use crate::err::{CompileError, CompileResult};
use crate::format::FieldKind;

const MACRO_SEPARATOR: char = '`';

/// Produce one final name per non-padding token.
///
/// Callers only invoke this when at least one name was supplied; a template
/// with no names at all decodes to a bare scalar or an ordered tuple instead
/// of a mapping.
pub(crate) fn expand_names(tokens: &[FieldKind], supplied: &[String]) -> CompileResult<Vec<String>> {
    let mut names = Vec::with_capacity(tokens.iter().filter(|t| !t.is_pad()).count());
    let mut pending: VecDeque<String> = VecDeque::new();
    let mut supplied_iter = supplied.iter();

    for (token_index, token) in tokens.iter().enumerate() {
        if token.is_pad() {
            continue;
        }

        let name = loop {
            if let Some(expanded) = pending.pop_front() {
                break Some(expanded);
            }
            match supplied_iter.next() {
                None => break None,
                Some(raw) => {
                    if let Some(expansion) = expand_macro(raw, token_index, tokens)? {
                        // A clipped macro may expand to nothing; keep pulling.
                        pending = expansion;
                        continue;
                    }
                    break Some(raw.clone());
                }
            }
        };

        match name {
            Some(name) if !name.is_empty() => names.push(name),
            _ => names.push(fallback_name(token_index)),
        }
    }

    let extra = pending.len() + supplied_iter.count();
    if extra > 0 {
        return Err(CompileError::TooManyNames {
            extra,
            fields: names.len(),
        });
    }

    Ok(names)
}

pub(crate) fn fallback_name(token_index: usize) -> String {
    format!(".field{token_index}")
}

/// Expand a pair-array macro, or return `None` if `raw` is an ordinary name.
///
/// The pair count is clipped to the contiguous run of non-padding tokens
/// starting at `token_index`: expansion never spans across padding.
fn expand_macro(
    raw: &str,
    token_index: usize,
    tokens: &[FieldKind],
) -> CompileResult<Option<VecDeque<String>>> {
    if !raw.contains(MACRO_SEPARATOR) || !raw.ends_with(']') {
        return Ok(None);
    }
    let Some(bracket) = raw.find('[') else {
        return Ok(None);
    };

    let count: usize = raw[bracket + 1..raw.len() - 1]
        .parse()
        .map_err(|_| CompileError::InvalidMacroCount {
            name: raw.to_string(),
        })?;

    let head = &raw[..bracket];
    let Some((prefix, suffix)) = head.split_once(MACRO_SEPARATOR) else {
        return Ok(None);
    };

    let available = tokens[token_index..]
        .iter()
        .take_while(|t| !t.is_pad())
        .count();
    let pairs = count.min(available / 2);

    let mut expanded = VecDeque::with_capacity(pairs * 2);
    for i in 0..pairs {
        expanded.push_back(format!("{prefix}_{i}"));
        expanded.push_back(format!("{suffix}_{i}"));
    }
    Ok(Some(expanded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_format;

    fn expand(descriptor: &str, supplied: &[&str]) -> CompileResult<Vec<String>> {
        let parsed = parse_format(descriptor).unwrap();
        let supplied: Vec<String> = supplied.iter().map(|s| s.to_string()).collect();
        expand_names(&parsed.tokens, &supplied)
    }

    #[test]
    fn plain_names_map_in_order() {
        assert_eq!(expand("Hh", &["a", "b"]).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn padding_consumes_no_name() {
        assert_eq!(expand("H2xh", &["a", "b"]).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn fallback_indices_count_padding_tokens() {
        // Tokens: L(0) x(1..=4) h(5) h(6).
        assert_eq!(
            expand("L4x2h", &["first"]).unwrap(),
            vec!["first", ".field5", ".field6"]
        );
    }

    #[test]
    fn empty_name_gets_fallback() {
        assert_eq!(
            expand("ii", &["", "b"]).unwrap(),
            vec![".field0", "b"]
        );
    }

    #[test]
    fn macro_expands_interleaved_pairs() {
        assert_eq!(
            expand("4f", &["x`y[2]"]).unwrap(),
            vec!["x_0", "y_0", "x_1", "y_1"]
        );
    }

    #[test]
    fn macro_clips_at_first_padding_token() {
        // Six floats before the padding: room for three pairs of five asked.
        assert_eq!(
            expand("6f4xh", &["a`b[5]", "tail"]).unwrap(),
            vec!["a_0", "b_0", "a_1", "b_1", "a_2", "b_2", "tail"]
        );
    }

    #[test]
    fn macro_clips_to_requested_count() {
        assert_eq!(
            expand("6f", &["a`b[2]", "p", "q"]).unwrap(),
            vec!["a_0", "b_0", "a_1", "b_1", "p", "q"]
        );
    }

    #[test]
    fn name_with_brackets_but_no_separator_is_ordinary() {
        assert_eq!(expand("h", &["size[2]"]).unwrap(), vec!["size[2]"]);
    }

    #[test]
    fn bad_macro_count_is_fatal() {
        assert!(matches!(
            expand("4f", &["a`b[lots]"]),
            Err(CompileError::InvalidMacroCount { .. })
        ));
    }

    #[test]
    fn leftover_names_are_fatal() {
        assert!(matches!(
            expand("h", &["a", "b"]),
            Err(CompileError::TooManyNames { extra: 1, fields: 1 })
        ));
    }
}
