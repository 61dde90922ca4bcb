//! Keyword parsing and boolean query construction.

use std::collections::HashMap;

use crate::normalize::normalize;

/// Split a client's raw comma-separated keyword string into an ordered
/// list of normalized keywords.
///
/// Keywords are trimmed, de-quoted (a keyword may be wrapped in `"` to
/// mark a multi-word phrase), accent-stripped, and lowercased. Empty
/// entries are dropped. Order is preserved.
#[must_use]
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|kw| normalize(kw.trim().trim_matches('"').trim()))
        .filter(|kw| !kw.is_empty())
        .collect()
}

/// Build a boolean search query from an ordered keyword list.
///
/// Without an operator map every keyword is joined with ` OR `. With a
/// map, the operator inserted between two keywords is the one associated
/// with the *previous* keyword, defaulting to `OR`. Keywords containing
/// whitespace are wrapped in double quotes. Deterministic and
/// order-preserving.
#[must_use]
pub fn build_query(keywords: &[String], operators: Option<&HashMap<String, String>>) -> String {
    let quote = |kw: &str| -> String {
        if kw.contains(char::is_whitespace) {
            format!("\"{kw}\"")
        } else {
            kw.to_string()
        }
    };

    let Some(ops) = operators else {
        return keywords
            .iter()
            .map(|kw| quote(kw))
            .collect::<Vec<_>>()
            .join(" OR ");
    };

    let mut parts: Vec<String> = Vec::with_capacity(keywords.len() * 2);
    for (i, kw) in keywords.iter().enumerate() {
        if i > 0 {
            let op = ops
                .get(&keywords[i - 1])
                .map_or("OR", String::as_str);
            parts.push(op.to_string());
        }
        parts.push(quote(kw));
    }
    parts.join(" ")
}
