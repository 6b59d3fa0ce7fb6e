use crate::string_normalization::clean_str;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Everything the discovery and ranking paths need to know about one market:
/// the territory code Spotify expects, the local-language terms that mark a
/// playlist as market-specific, and per-genre localized search phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketProfile {
    pub name: String,
    pub code: String,
    pub local_terms: Vec<String>,
    pub genre_phrases: FxHashMap<String, Vec<String>>,
}

impl MarketProfile {
    pub fn phrases_for(&self, genre: &str) -> &[String] {
        self.genre_phrases
            .get(&canonical_genre(genre))
            .map_or(&[], Vec::as_slice)
    }
}

/// Lower-cased, ASCII-folded genre key used by all policy tables.
/// "Hip Hop" and "rap" both land on "hip-hop".
pub fn canonical_genre(genre: &str) -> String {
    let cleaned = clean_str(genre);
    match cleaned.as_str() {
        "hip hop" | "hiphop" | "rap" => "hip-hop".to_string(),
        "edm" | "dance" => "electronic".to_string(),
        _ => cleaned,
    }
}

fn profile(
    name: &str,
    code: &str,
    local_terms: &[&str],
    genres: &[(&str, &[&str])],
) -> MarketProfile {
    let genre_phrases = genres
        .iter()
        .map(|(genre, phrases)| {
            (
                (*genre).to_string(),
                phrases.iter().map(|p| (*p).to_string()).collect(),
            )
        })
        .collect();

    MarketProfile {
        name: name.to_string(),
        code: code.to_string(),
        local_terms: local_terms.iter().map(|t| (*t).to_string()).collect(),
        genre_phrases,
    }
}

/// Fixed market table. Unknown markets degrade to a profile that uses the
/// market name itself as both territory code and sole matching term, so the
/// generic phrase and skip-list paths still apply.
pub fn market_profile(market: &str) -> MarketProfile {
    match market {
        "France" => profile(
            market,
            "FR",
            &["français", "francais", "french", "france"],
            &[
                (
                    "hip-hop",
                    &["rap français", "rap francais", "rap fr", "french rap"],
                ),
                (
                    "pop",
                    &["pop française", "chanson française", "variété française", "french pop"],
                ),
                ("electronic", &["électro française", "french house", "french touch"]),
                ("rock", &["rock français", "french rock"]),
            ],
        ),
        "UK" | "United Kingdom" => profile(
            market,
            "GB",
            &["uk", "british", "britain"],
            &[
                ("hip-hop", &["uk rap", "uk drill", "grime"]),
                ("pop", &["uk pop", "british pop"]),
                ("electronic", &["uk garage", "uk house", "drum and bass"]),
                ("rock", &["british rock", "britpop"]),
            ],
        ),
        "Germany" => profile(
            market,
            "DE",
            &["deutsch", "german", "deutschland"],
            &[
                ("hip-hop", &["deutschrap", "deutscher rap", "german rap"]),
                ("pop", &["deutschpop", "deutsche popmusik", "german pop"]),
                ("electronic", &["german techno", "techno deutschland", "berlin techno"]),
                ("rock", &["deutschrock", "german rock"]),
            ],
        ),
        "Spain" => profile(
            market,
            "ES",
            &["español", "espanol", "spanish", "españa"],
            &[
                ("hip-hop", &["rap español", "trap español", "spanish rap"]),
                ("pop", &["pop español", "música española", "spanish pop"]),
                ("electronic", &["electrónica española", "spanish house"]),
                ("rock", &["rock español", "rock en español"]),
            ],
        ),
        "US" | "United States" => profile(
            market,
            "US",
            &["american", "usa", "us"],
            &[
                ("hip-hop", &["hip hop", "rap us", "american rap"]),
                ("pop", &["american pop", "pop usa"]),
                ("electronic", &["us electronic", "american edm"]),
                ("rock", &["american rock", "us rock"]),
            ],
        ),
        "Japan" => profile(
            market,
            "JP",
            &["j-", "japanese", "japan"],
            &[
                ("hip-hop", &["j-rap", "japanese hip hop", "nihongo rap"]),
                ("pop", &["j-pop", "jpop", "japanese pop"]),
                ("electronic", &["japanese electronic", "j-electro"]),
                ("rock", &["j-rock", "japanese rock"]),
            ],
        ),
        "Thailand" => profile(
            market,
            "TH",
            &["thai", "thailand", "ไทย"],
            &[
                ("hip-hop", &["thai rap", "rap thai"]),
                ("pop", &["t-pop", "thai pop", "เพลงไทย"]),
                ("electronic", &["thai electronic"]),
                ("rock", &["thai rock"]),
            ],
        ),
        "Italy" => profile(
            market,
            "IT",
            &["italiano", "italian", "italia", "italy"],
            &[
                ("hip-hop", &["rap italiano", "trap italiana", "italian rap"]),
                ("pop", &["pop italiano", "musica italiana", "italian pop"]),
                ("electronic", &["elettronica italiana", "italo house"]),
                ("rock", &["rock italiano", "italian rock"]),
            ],
        ),
        "Netherlands" => profile(
            market,
            "NL",
            &["dutch", "nederlands", "holland"],
            &[
                ("hip-hop", &["nederhop", "dutch rap"]),
                ("pop", &["nederpop", "dutch pop"]),
                ("electronic", &["dutch house", "hardstyle", "dutch dance"]),
                ("rock", &["dutch rock"]),
            ],
        ),
        "Sweden" => profile(
            market,
            "SE",
            &["swedish", "svensk", "sweden"],
            &[
                ("hip-hop", &["svensk rap", "swedish rap"]),
                ("pop", &["svensk pop", "swedish pop"]),
                ("electronic", &["swedish house", "swedish electronic"]),
                ("rock", &["svensk rock", "swedish rock"]),
            ],
        ),
        "Norway" => profile(
            market,
            "NO",
            &["norwegian", "norsk", "norway"],
            &[
                ("hip-hop", &["norsk rap", "norwegian rap"]),
                ("pop", &["norsk pop", "norwegian pop"]),
                ("electronic", &["norwegian electronic", "nordic electronic"]),
                ("rock", &["norsk rock", "norwegian rock"]),
            ],
        ),
        "Brazil" => profile(
            market,
            "BR",
            &["brasileiro", "brasil", "brazilian", "brazil"],
            &[
                ("hip-hop", &["rap nacional", "trap brasil", "brazilian rap"]),
                ("pop", &["pop brasileiro", "mpb", "brazilian pop"]),
                ("electronic", &["brazilian bass", "eletrônica brasil"]),
                ("rock", &["rock brasileiro", "rock nacional"]),
            ],
        ),
        "Mexico" => profile(
            market,
            "MX",
            &["mexicano", "méxico", "mexico", "mexican"],
            &[
                ("hip-hop", &["rap mexicano", "trap mexicano", "mexican rap"]),
                ("pop", &["pop latino", "música mexicana", "mexican pop"]),
                ("electronic", &["electrónica mexicana"]),
                ("rock", &["rock mexicano", "rock en español"]),
            ],
        ),
        "Australia" => profile(
            market,
            "AU",
            &["australian", "aussie", "australia"],
            &[
                ("hip-hop", &["aussie rap", "australian hip hop"]),
                ("pop", &["australian pop", "aussie pop"]),
                ("electronic", &["australian electronic", "aussie dance"]),
                ("rock", &["aussie rock", "australian rock"]),
            ],
        ),
        "Canada" => profile(
            market,
            "CA",
            &["canadian", "canada"],
            &[
                ("hip-hop", &["canadian rap", "toronto rap"]),
                ("pop", &["canadian pop"]),
                ("electronic", &["canadian electronic"]),
                ("rock", &["canadian rock"]),
            ],
        ),
        "South Korea" => profile(
            market,
            "KR",
            &["k-", "korean", "korea"],
            &[
                ("hip-hop", &["k-hiphop", "khiphop", "korean rap"]),
                ("pop", &["k-pop", "kpop", "korean pop"]),
                ("electronic", &["k-electronic", "korean electronic"]),
                ("rock", &["k-rock", "korean rock"]),
            ],
        ),
        "Worldwide" => profile(market, "WW", &["global", "worldwide", "international"], &[]),
        _ => profile(market, market, &[market], &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_market_maps_to_territory_code() {
        assert_eq!(market_profile("France").code, "FR");
        assert_eq!(market_profile("United Kingdom").code, "GB");
        assert_eq!(market_profile("South Korea").code, "KR");
    }

    #[test]
    fn unknown_market_degrades_to_itself() {
        let profile = market_profile("Atlantis");
        assert_eq!(profile.code, "Atlantis");
        assert_eq!(profile.local_terms, vec!["Atlantis".to_string()]);
        assert!(profile.genre_phrases.is_empty());
    }

    #[test]
    fn genre_lookup_is_case_insensitive() {
        let profile = market_profile("France");
        assert_eq!(profile.phrases_for("Hip-Hop"), profile.phrases_for("hip-hop"));
        assert!(!profile.phrases_for("RAP").is_empty());
    }

    #[test]
    fn canonical_genre_folds_aliases() {
        assert_eq!(canonical_genre("Hip Hop"), "hip-hop");
        assert_eq!(canonical_genre("rap"), "hip-hop");
        assert_eq!(canonical_genre("EDM"), "electronic");
        assert_eq!(canonical_genre("Pop"), "pop");
    }
}
