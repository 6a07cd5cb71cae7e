//! Text feature extraction

use crate::error::{CinerateError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Simple text tokenizer: lowercase, split on non-alphanumeric,
/// drop short tokens and stop words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextTokenizer {
    lowercase: bool,
    min_token_length: usize,
    stop_words: Vec<String>,
}

impl TextTokenizer {
    pub fn new() -> Self {
        Self {
            lowercase: true,
            min_token_length: 2,
            stop_words: Vec::new(),
        }
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn with_min_length(mut self, len: usize) -> Self {
        self.min_token_length = len;
        self
    }

    pub fn with_english_stop_words(mut self) -> Self {
        self.stop_words = vec![
            "a", "an", "the", "and", "or", "but", "if", "in", "on", "at", "to",
            "for", "of", "with", "by", "as", "is", "was", "are", "were", "be",
            "been", "being", "have", "has", "had", "do", "does", "did", "will",
            "would", "can", "could", "not", "no", "so", "than", "then", "there",
            "it", "its", "this", "that", "these", "those", "i", "you", "he",
            "she", "we", "they", "them", "his", "her", "their", "my", "your",
            "what", "which", "who", "all", "any", "both", "each", "few", "more",
            "most", "other", "some", "such", "only", "own", "same", "too",
            "very", "just", "about", "against", "between", "into", "through",
            "during", "before", "after", "above", "below", "from", "up", "down",
            "out", "off", "over", "under", "again", "further", "once", "here",
            "when", "where", "why", "how",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        self
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let processed = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        processed
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .filter(|s| s.len() >= self.min_token_length)
            .filter(|s| !self.stop_words.iter().any(|w| w == s))
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for TextTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Count-based text vectorizer.
///
/// The vocabulary is a learned artifact: it is built from the documents
/// given to `fit` and nothing else. When more distinct terms exist than
/// `max_features`, the most frequent terms win; ties break
/// lexicographically so that fitting the same corpus twice yields the
/// same vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizer {
    tokenizer: TextTokenizer,
    vocabulary: HashMap<String, usize>,
    max_features: usize,
    is_fitted: bool,
}

impl CountVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            tokenizer: TextTokenizer::new().with_english_stop_words(),
            vocabulary: HashMap::new(),
            max_features,
            is_fitted: false,
        }
    }

    /// Build the vocabulary from the training corpus
    pub fn fit(&mut self, documents: &[String]) -> Result<&mut Self> {
        let mut term_counts: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            for token in self.tokenizer.tokenize(doc) {
                *term_counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        self.vocabulary.clear();
        for (idx, (term, _)) in ranked.into_iter().enumerate() {
            self.vocabulary.insert(term, idx);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Map each document to a row of token occurrence counts.
    /// A document with no in-vocabulary tokens yields an all-zero row.
    pub fn transform(&self, documents: &[String]) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(CinerateError::ModelNotFitted);
        }

        let mut result = Array2::zeros((documents.len(), self.vocabulary.len()));

        for (doc_idx, doc) in documents.iter().enumerate() {
            for token in self.tokenizer.tokenize(doc) {
                if let Some(&col) = self.vocabulary.get(&token) {
                    result[[doc_idx, col]] += 1.0;
                }
            }
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Array2<f64>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Number of vocabulary terms after fitting
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec![String::new(); self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            names[idx] = term.clone();
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_splits_and_lowercases() {
        let tokenizer = TextTokenizer::new().with_lowercase(true).with_min_length(2);

        let tokens = tokenizer.tokenize("Great Movie! 10/10, loved it.");
        assert!(tokens.contains(&"great".to_string()));
        assert!(tokens.contains(&"movie".to_string()));
        assert!(tokens.contains(&"loved".to_string()));
        // single-char tokens are dropped
        assert!(!tokens.iter().any(|t| t.len() < 2));
    }

    #[test]
    fn test_tokenizer_stop_words() {
        let tokenizer = TextTokenizer::new().with_english_stop_words();
        let tokens = tokenizer.tokenize("the plot of the film");
        assert_eq!(tokens, vec!["plot", "film"]);
    }

    #[test]
    fn test_count_vectorizer_counts() {
        let docs = vec![
            "wonderful wonderful film".to_string(),
            "terrible film".to_string(),
        ];

        let mut vectorizer = CountVectorizer::new(10);
        let counts = vectorizer.fit_transform(&docs).unwrap();

        assert_eq!(counts.nrows(), 2);
        assert_eq!(counts.ncols(), 3);

        let names = vectorizer.feature_names();
        let wonderful = names.iter().position(|n| n == "wonderful").unwrap();
        assert_eq!(counts[[0, wonderful]], 2.0);
        assert_eq!(counts[[1, wonderful]], 0.0);
    }

    #[test]
    fn test_empty_document_is_zero_row() {
        let docs = vec!["some words here".to_string(), String::new()];

        let mut vectorizer = CountVectorizer::new(10);
        let counts = vectorizer.fit_transform(&docs).unwrap();

        assert!(counts.row(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let docs = vec!["alpha beta gamma delta epsilon".to_string()];

        let mut vectorizer = CountVectorizer::new(3);
        vectorizer.fit(&docs).unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 3);
        // equal counts break ties lexicographically
        let mut names = vectorizer.feature_names();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta", "delta"]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let docs: Vec<String> = (0..20)
            .map(|i| format!("token{} shared shared filler{}", i % 7, i % 3))
            .collect();

        let mut a = CountVectorizer::new(5);
        let mut b = CountVectorizer::new(5);
        a.fit(&docs).unwrap();
        b.fit(&docs).unwrap();

        assert_eq!(a.feature_names(), b.feature_names());
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let vectorizer = CountVectorizer::new(10);
        let result = vectorizer.transform(&["text".to_string()]);
        assert!(matches!(result, Err(CinerateError::ModelNotFitted)));
    }

    #[test]
    fn test_unseen_tokens_ignored_at_transform() {
        let mut vectorizer = CountVectorizer::new(10);
        vectorizer.fit(&["known words".to_string()]).unwrap();

        let counts = vectorizer
            .transform(&["completely novel vocabulary".to_string()])
            .unwrap();
        assert!(counts.row(0).iter().all(|&v| v == 0.0));
    }
}
