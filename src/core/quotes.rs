//! # Loading Quotes
//!
//! A line from a book, shown while a document loads. The bundled set lives in
//! `resources/loading.json`; an unreadable set behaves like an empty one and
//! every pick falls back to [`FALLBACK_QUOTE`].

use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const FALLBACK_QUOTE: &str = "Loading...";

const BUNDLED_QUOTES: &str = include_str!("../../resources/loading.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingQuote {
    pub book: String,
    pub quote: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    quotes: Vec<LoadingQuote>,
}

impl QuoteBook {
    /// Parse a JSON array of `{ "book", "quote" }` objects. Malformed input yields an empty book.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(quotes) => Self { quotes },
            Err(e) => {
                warn!("Ignoring loading quotes: {}", e);
                Self::default()
            }
        }
    }

    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_QUOTES)
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.quotes
            .choose(rng)
            .map(|q| q.quote.as_str())
            .unwrap_or(FALLBACK_QUOTE)
    }

    pub fn random(&self) -> &str {
        self.pick(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_book_falls_back() {
        let book = QuoteBook::from_json("[]");
        assert_eq!(book.pick(&mut StdRng::seed_from_u64(7)), FALLBACK_QUOTE);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let book = QuoteBook::from_json("{ \"book\": ");
        assert_eq!(book.random(), FALLBACK_QUOTE);
    }

    #[test]
    fn test_single_quote_is_always_picked() {
        let book = QuoteBook::from_json(r#"[{"book": "Walden", "quote": "Simplify, simplify."}]"#);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..5 {
            assert_eq!(book.pick(&mut rng), "Simplify, simplify.");
        }
    }

    #[test]
    fn test_bundled_quotes_parse() {
        let book = QuoteBook::bundled();
        assert!(!book.quotes.is_empty());
        let picked = book.pick(&mut StdRng::seed_from_u64(3));
        assert!(book.quotes.iter().any(|q| q.quote == picked));
    }
}
