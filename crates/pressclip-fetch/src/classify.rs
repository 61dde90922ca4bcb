//! Keyword-count topic classifier.

/// Sentinel returned when no topic keyword occurs in the text.
pub const UNCLASSIFIED: &str = "Sem classificação";

/// Topic labels with their hand-authored keyword lists. Declaration
/// order is the tie-break: the first label to reach the maximum count
/// wins.
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Política",
        &["presidente", "governo", "ministro", "senado", "câmara", "política"],
    ),
    (
        "Economia",
        &["economia", "inflação", "juros", "pib", "comércio", "financeiro"],
    ),
    (
        "Esportes",
        &["jogo", "time", "futebol", "campeonato", "esportes", "olímpico"],
    ),
    (
        "Tecnologia",
        &["tecnologia", "startup", "inovação", "software", "hardware", "internet"],
    ),
    (
        "Cultura",
        &["cultura", "música", "filme", "arte", "literatura", "teatro"],
    ),
    (
        "Saúde",
        &["saúde", "hospital", "vacina", "doença", "médico", "tratamento"],
    ),
];

/// Classify a text by counting non-overlapping substring occurrences of
/// each topic's keywords over the lowercased input. The highest total
/// wins; all-zero yields [`UNCLASSIFIED`].
#[must_use]
pub fn classify(text: &str) -> &'static str {
    let lowered = text.to_lowercase();

    let mut best = UNCLASSIFIED;
    let mut best_count = 0usize;
    for (topic, keywords) in TOPIC_KEYWORDS {
        let count: usize = keywords
            .iter()
            .map(|kw| lowered.matches(kw).count())
            .sum();
        // Strictly greater: on a tie the earlier topic keeps the win.
        if count > best_count {
            best = *topic;
            best_count = count;
        }
    }
    best
}
