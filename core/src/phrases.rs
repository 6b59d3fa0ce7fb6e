use crate::market::{MarketProfile, canonical_genre};
use crate::string_normalization::clean_str;

/// Ordered search phrases for one (market, genre) pair.
///
/// Localized genre phrases come first because they find the playlists the
/// generic queries never surface, then "local term + genre" for each local
/// term, then "territory code + genre", then the bare genre as a catch-all.
/// The same phrases later feed the priority scoring, so order matters and
/// duplicates are removed while keeping the first occurrence.
pub fn build_search_phrases(profile: &MarketProfile, genre: &str) -> Vec<String> {
    let genre_key = canonical_genre(genre);
    let mut phrases: Vec<String> = Vec::new();

    for localized in profile.phrases_for(&genre_key) {
        phrases.push(localized.clone());
    }

    for term in &profile.local_terms {
        phrases.push(format!("{term} {genre_key}"));
    }

    phrases.push(format!("{} {genre_key}", profile.code.to_lowercase()));
    phrases.push(genre_key);

    dedup_cleaned(phrases)
}

fn dedup_cleaned(phrases: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut result = Vec::new();

    for phrase in phrases {
        let key = clean_str(&phrase);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        result.push(phrase);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::market_profile;

    #[test]
    fn localized_phrases_come_first() {
        let profile = market_profile("France");
        let phrases = build_search_phrases(&profile, "hip-hop");

        assert_eq!(phrases[0], "rap français");
        assert_eq!(*phrases.last().unwrap(), "hip-hop");
        assert!(phrases.contains(&"fr hip-hop".to_string()));
        assert!(phrases.contains(&"french hip-hop".to_string()));
    }

    #[test]
    fn duplicates_are_removed_keeping_first() {
        let profile = market_profile("France");
        let phrases = build_search_phrases(&profile, "hip-hop");

        // "rap français" and "rap francais" normalize identically
        assert_eq!(
            phrases
                .iter()
                .filter(|p| clean_str(p) == "rap francais")
                .count(),
            1
        );
    }

    #[test]
    fn unknown_market_still_yields_generic_phrases() {
        let profile = market_profile("Atlantis");
        let phrases = build_search_phrases(&profile, "pop");

        // "Atlantis pop" and the code-based "atlantis pop" normalize
        // identically, so only the first survives
        assert_eq!(phrases, vec!["Atlantis pop".to_string(), "pop".to_string()]);
    }
}
