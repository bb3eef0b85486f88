//! Term-frequency / inverse-document-frequency vectorizer.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Vocabulary cap used by the training pipeline.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// TF-IDF vectorizer over unigrams and bigrams with a bounded vocabulary.
///
/// Fitting selects the most frequent terms (ties broken alphabetically, so
/// the vocabulary is deterministic for a given corpus) and computes smoothed
/// inverse document frequencies. Transformed vectors are L2-normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
    max_features: usize,
}

impl TfidfVectorizer {
    #[must_use]
    pub fn new(max_features: usize) -> Self {
        Self {
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            max_features,
        }
    }

    #[must_use]
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Learns the vocabulary and IDF weights from a corpus.
    pub fn fit(&mut self, documents: &[String]) {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| extract_terms(d)).collect();

        // Corpus frequency decides which terms survive the vocabulary cap;
        // document frequency feeds the IDF.
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for terms in &tokenized {
            for term in terms {
                *corpus_freq.entry(term.clone()).or_insert(0) += 1;
            }

            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut selected: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        selected.sort();

        self.vocabulary = selected
            .iter()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();
        self.terms = selected;

        let n_docs = documents.len() as f64;
        self.idf = self
            .terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
    }

    /// Transforms one text into an L2-normalized TF-IDF vector. Terms outside
    /// the vocabulary are ignored.
    #[must_use]
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.terms.len()];

        for term in extract_terms(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                vector[index] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        l2_normalize(&mut vector);
        vector
    }

    /// Transforms a batch of texts into a dense matrix, one row per input.
    #[must_use]
    pub fn transform_batch(&self, texts: &[String]) -> Array2<f64> {
        let mut matrix = Array2::zeros((texts.len(), self.terms.len()));

        for (i, text) in texts.iter().enumerate() {
            for (j, value) in self.transform(text).into_iter().enumerate() {
                matrix[[i, j]] = value;
            }
        }

        matrix
    }
}

/// Tokenizes into lower-case alphanumeric words of at least two characters,
/// then emits unigrams and bigrams.
fn extract_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(ToString::to_string).collect();

    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }

    terms
}

fn l2_normalize(vector: &mut [f64]) {
    let norm: f64 = vector.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn extracts_unigrams_and_bigrams() {
        let terms = extract_terms("tela manchada na borda");
        assert!(terms.contains(&"tela".to_string()));
        assert!(terms.contains(&"tela manchada".to_string()));
        assert!(terms.contains(&"na borda".to_string()));
        // Single-character tokens are dropped.
        assert!(!extract_terms("a tela").contains(&"a".to_string()));
    }

    #[test]
    fn fit_builds_a_deterministic_vocabulary() {
        let documents = corpus(&["bluetooth nao pareia", "bluetooth instavel"]);

        let mut first = TfidfVectorizer::new(DEFAULT_MAX_FEATURES);
        first.fit(&documents);
        let mut second = TfidfVectorizer::new(DEFAULT_MAX_FEATURES);
        second.fit(&documents);

        assert_eq!(first.terms, second.terms);
        assert!(first.n_terms() > 0);
    }

    #[test]
    fn vocabulary_is_capped() {
        let documents = corpus(&["alto falante queimado", "tela manchada na borda"]);

        let mut vectorizer = TfidfVectorizer::new(3);
        vectorizer.fit(&documents);

        assert_eq!(vectorizer.n_terms(), 3);
    }

    #[test]
    fn transform_is_l2_normalized() {
        let documents = corpus(&["sem imagem", "sem audio", "imagem tremida"]);

        let mut vectorizer = TfidfVectorizer::new(DEFAULT_MAX_FEATURES);
        vectorizer.fit(&documents);

        let vector = vectorizer.transform("sem imagem");
        let norm: f64 = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_terms_produce_a_zero_vector() {
        let documents = corpus(&["sem imagem"]);

        let mut vectorizer = TfidfVectorizer::new(DEFAULT_MAX_FEATURES);
        vectorizer.fit(&documents);

        let vector = vectorizer.transform("palavras completamente novas");
        assert!(vector.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn batch_shape_matches_inputs() {
        let documents = corpus(&["sem imagem", "sem audio"]);

        let mut vectorizer = TfidfVectorizer::new(DEFAULT_MAX_FEATURES);
        vectorizer.fit(&documents);

        let matrix = vectorizer.transform_batch(&documents);
        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), vectorizer.n_terms());
    }
}
