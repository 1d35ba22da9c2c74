//! Local fallback quotes, served when the upstream source is unavailable

use rand::Rng;

use super::model::Quote;

/// Pre-authored fallback entry
#[derive(Debug, Clone, Copy)]
pub struct FallbackQuote {
    pub content: &'static str,
    pub author: &'static str,
    pub tag: &'static str,
}

pub static FALLBACK_QUOTES: [FallbackQuote; 3] = [
    FallbackQuote {
        content: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
        tag: "motivational",
    },
    FallbackQuote {
        content: "Innovation distinguishes between a leader and a follower.",
        author: "Steve Jobs",
        tag: "business",
    },
    FallbackQuote {
        content: "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        author: "Winston Churchill",
        tag: "success",
    },
];

impl FallbackQuote {
    /// Build a `Quote` flagged with `api_error`
    pub fn to_quote(self) -> Quote {
        let mut quote = Quote::local(self.content, self.author, vec![self.tag.to_string()]);
        quote.api_error = true;
        quote
    }
}

/// Pick one fallback entry uniformly at random
pub fn random_fallback() -> Quote {
    let index = rand::rng().random_range(0..FALLBACK_QUOTES.len());
    FALLBACK_QUOTES[index].to_quote()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_is_flagged() {
        let quote = random_fallback();
        assert!(quote.api_error);
        assert!(!quote.content.is_empty());
        assert!(FALLBACK_QUOTES.iter().any(|f| f.content == quote.content));
    }

    #[test]
    fn test_every_entry_eventually_selected() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            seen.insert(random_fallback().content);
            if seen.len() == FALLBACK_QUOTES.len() {
                break;
            }
        }
        assert_eq!(seen.len(), FALLBACK_QUOTES.len());
    }

    #[test]
    fn test_table_contents() {
        let authors: HashSet<_> = FALLBACK_QUOTES.iter().map(|f| f.author).collect();
        assert_eq!(
            authors,
            HashSet::from(["Steve Jobs", "Winston Churchill"])
        );
        assert!(FALLBACK_QUOTES.iter().all(|f| !f.content.is_empty()));
    }
}
