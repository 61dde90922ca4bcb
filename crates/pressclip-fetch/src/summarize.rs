//! Extractive summarizer.
//!
//! Frequency-based sentence scoring: build a word-frequency table over
//! the whole text (Portuguese stopwords excluded), score each sentence
//! as the sum of its words' frequencies, keep the top-N, and re-emit
//! them in original document order.

use std::collections::{HashMap, HashSet};

use regex::Regex;

/// Portuguese stopwords excluded from the frequency table.
const STOPWORDS_PT: &[&str] = &[
    "a", "à", "ao", "aos", "as", "às", "até", "com", "como", "da", "das", "de", "dela", "dele",
    "depois", "do", "dos", "e", "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram",
    "essa", "esse", "esta", "este", "eu", "foi", "for", "foram", "há", "isso", "isto", "já",
    "lhe", "mais", "mas", "me", "mesmo", "muito", "na", "não", "nas", "nem", "no", "nos", "nós",
    "o", "os", "ou", "para", "pela", "pelo", "por", "qual", "quando", "que", "quem", "se", "sem",
    "ser", "seu", "sua", "são", "só", "também", "te", "tem", "têm", "um", "uma", "você", "vocês",
];

/// Summarize `text` down to at most `num_sentences` sentences.
///
/// Text with `num_sentences` or fewer sentences is returned unchanged.
/// Otherwise the highest-scoring sentences are selected (ties broken by
/// original position, stable) and joined by single spaces in document
/// order, never in score order.
#[must_use]
pub fn summarize(text: &str, num_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= num_sentences {
        return text.to_string();
    }

    let word_re = Regex::new(r"\p{Alphabetic}+").expect("valid word regex");
    let stop: HashSet<&str> = STOPWORDS_PT.iter().copied().collect();

    let lowered = text.to_lowercase();
    let mut freqs: HashMap<&str, usize> = HashMap::new();
    for m in word_re.find_iter(&lowered) {
        let word = m.as_str();
        if !stop.contains(word) {
            *freqs.entry(word).or_insert(0) += 1;
        }
    }

    let mut scored: Vec<(usize, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let lowered = sentence.to_lowercase();
            let score = word_re
                .find_iter(&lowered)
                .map(|m| freqs.get(m.as_str()).copied().unwrap_or(0))
                .sum();
            (idx, score)
        })
        .collect();

    // Stable sort: equal scores keep their original relative order, so
    // ties resolve to the earlier sentence.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    let mut picked: Vec<usize> = scored
        .into_iter()
        .take(num_sentences)
        .map(|(idx, _)| idx)
        .collect();
    picked.sort_unstable();

    picked
        .into_iter()
        .map(|idx| sentences[idx].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into sentences after `.`, `!`, or `?` followed by
/// whitespace (or end of text).
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let boundary = chars
                .peek()
                .is_none_or(|&(_, next)| next.is_whitespace());
            if boundary {
                let sentence = text[start..=i].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = i + c.len_utf8();
            }
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminators_followed_by_whitespace() {
        let sentences = split_sentences("Primeira frase. Segunda frase! Terceira?");
        assert_eq!(
            sentences,
            vec!["Primeira frase.", "Segunda frase!", "Terceira?"]
        );
    }

    #[test]
    fn does_not_split_inside_abbreviation_like_tokens() {
        // "1.5" has no whitespace after the dot, so it is not a boundary.
        let sentences = split_sentences("Alta de 1.5 por cento. Fim.");
        assert_eq!(sentences, vec!["Alta de 1.5 por cento.", "Fim."]);
    }

    #[test]
    fn short_text_is_returned_unchanged() {
        let text = "Uma frase. Outra frase.";
        assert_eq!(summarize(text, 3), text);
        assert_eq!(summarize(text, 2), text);
    }

    #[test]
    fn text_without_terminator_is_unchanged() {
        let text = "manchete sem pontuação final";
        assert_eq!(summarize(text, 3), text);
    }

    #[test]
    fn selects_highest_scoring_sentences() {
        // "alfa" and "beta" repeat, so the first and third sentences
        // outscore the middle one.
        let text = "Alfa beta gama. Ruido puro. Alfa beta delta.";
        assert_eq!(summarize(text, 2), "Alfa beta gama. Alfa beta delta.");
    }

    #[test]
    fn output_preserves_document_order_not_score_order() {
        // The last sentence scores highest; the first scores second.
        // Output must still read first-then-last.
        let text = "Alfa dois. Ruido puro total. Alfa dois tres tres.";
        assert_eq!(summarize(text, 2), "Alfa dois. Alfa dois tres tres.");
    }

    #[test]
    fn stopwords_do_not_inflate_scores() {
        // The middle sentence is all stopwords and scores zero.
        let text = "Governo anuncia corte. De a para com que. Governo confirma corte novo.";
        assert_eq!(
            summarize(text, 2),
            "Governo anuncia corte. Governo confirma corte novo."
        );
    }

    #[test]
    fn empty_text_is_unchanged() {
        assert_eq!(summarize("", 3), "");
    }
}
