use crate::market::{MarketProfile, canonical_genre};
use crate::string_normalization::{clean_str, contains_all_words, contains_term};
use serde::{Deserialize, Serialize};

/// One playlist as returned by search, before scoring. `source_query` is the
/// search phrase that first surfaced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlaylist {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub followers: u64,
    pub description: String,
    pub source_query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPlaylist {
    #[serde(rename = "playlist_id")]
    pub id: String,
    #[serde(rename = "playlist_name")]
    pub name: String,
    pub owner: String,
    pub followers: u64,
    pub description: String,
    pub source_query: String,
    pub priority: u32,
}

const QUALITY_TERMS: [&str; 7] = [
    "best",
    "top",
    "hits",
    "bangers",
    "essential",
    "ultimate",
    "must hear",
];

const OFFICIAL_TERMS: [&str; 7] = [
    "official",
    "officiel",
    "oficial",
    "spotify",
    "curated",
    "editorial",
    "new music friday",
];

/// Deny-list of name substrings for a (market, genre) pair. This is an
/// explicit policy table, not a generic rule: each genre carries a base list
/// of off-topic contexts, and specific pairs add cross-contamination terms
/// from other regional scenes. All entries are in normalized form.
pub fn skip_terms(market: &str, genre: &str) -> Vec<&'static str> {
    let genre_key = canonical_genre(genre);

    let mut terms: Vec<&'static str> = match genre_key.as_str() {
        "hip-hop" => vec!["sleep", "lofi", "lo-fi", "chill", "study"],
        "pop" => vec!["sleep", "lullaby", "instrumental", "karaoke"],
        "electronic" => vec!["sleep", "meditation", "spa"],
        "rock" => vec!["sleep", "lullaby"],
        _ => vec!["sleep"],
    };

    let cross: &[&str] = match (market, genre_key.as_str()) {
        ("France", "hip-hop") => &["deutschrap", "german rap", "uk drill", "rap italiano"],
        ("Germany", "hip-hop") => &["rap francais", "french rap", "uk drill"],
        ("UK", "hip-hop") => &["deutschrap", "rap francais", "french rap"],
        ("US", "hip-hop") => &["deutschrap", "rap francais", "uk drill"],
        ("Italy", "hip-hop") => &["rap francais", "deutschrap"],
        ("Spain", "hip-hop") => &["rap francais", "rap italiano"],
        ("Japan", "pop") => &["k-pop", "kpop", "t-pop"],
        ("South Korea", "pop") => &["j-pop", "jpop", "t-pop"],
        ("Thailand", "pop") => &["k-pop", "kpop", "j-pop", "jpop"],
        ("Netherlands", "electronic") => &["german techno", "uk garage"],
        ("Germany", "electronic") => &["dutch house", "hardstyle"],
        _ => &[],
    };
    terms.extend_from_slice(cross);

    terms
}

pub fn is_denied(name: &str, deny: &[&str]) -> bool {
    let cleaned = clean_str(name);
    deny.iter().any(|term| cleaned.contains(term))
}

/// Some pairs get underground phrasings scored exactly like the mainstream
/// localized phrases, so a "Rap Underground FR" playlist is not drowned out
/// by its mainstream siblings.
fn underground_phrases(market: &str, genre_key: &str) -> &'static [&'static str] {
    match (market, genre_key) {
        ("France", "hip-hop") => &["rap underground", "underground francais"],
        ("UK", "hip-hop") => &["uk underground", "underground grime"],
        ("US", "hip-hop") => &["underground hip hop", "underground rap"],
        ("Germany", "hip-hop") => &["deutschrap untergrund"],
        _ => &[],
    }
}

/// Extra +5 context phrases for markets where a mainstream editorial naming
/// convention dominates the genre.
fn mainstream_context_phrases(market: &str, genre_key: &str) -> &'static [&'static str] {
    match (market, genre_key) {
        ("France", "hip-hop") => &["planete rap", "rap bangers fr"],
        ("US", "hip-hop") => &["rapcaviar", "most necessary"],
        ("Germany", "hip-hop") => &["deutschrap brandneu", "modus mio"],
        ("UK", "electronic") => &["dance hits uk"],
        ("Japan", "pop") => &["tokyo super hits"],
        ("South Korea", "pop") => &["k-pop on", "k-pop rising"],
        _ => &[],
    }
}

fn playlist_priority(
    cleaned_name: &str,
    profile: &MarketProfile,
    genre_key: &str,
    current_year: i32,
) -> u32 {
    let mut priority = 0;

    if profile
        .local_terms
        .iter()
        .any(|term| contains_term(cleaned_name, term))
    {
        priority += 20;
    }

    let localized_match = profile
        .phrases_for(genre_key)
        .iter()
        .any(|phrase| contains_all_words(cleaned_name, phrase))
        || underground_phrases(&profile.name, genre_key)
            .iter()
            .any(|phrase| contains_all_words(cleaned_name, phrase));
    if localized_match {
        priority += 15;
    }

    let year = current_year.to_string();
    let recency = [year.as_str(), "2024", "new", "fresh", "latest", "now"];
    if recency.iter().any(|term| cleaned_name.contains(term)) {
        priority += 8;
    }

    let quality_count = QUALITY_TERMS
        .iter()
        .filter(|term| cleaned_name.contains(*term))
        .count() as u32;
    priority += (3 * quality_count).min(9);

    if OFFICIAL_TERMS
        .iter()
        .any(|term| cleaned_name.contains(term))
    {
        priority += 8;
    }

    if mainstream_context_phrases(&profile.name, genre_key)
        .iter()
        .any(|phrase| cleaned_name.contains(phrase))
    {
        priority += 5;
    }

    priority
}

/// Score and order playlist candidates for a (market, genre) pair.
///
/// Deny-listed names are dropped, every survivor gets an additive priority,
/// and the result is sorted descending by (priority, followers). The sort is
/// stable, so candidates tied on both keys keep their insertion order. Pure
/// function: no candidate is fabricated or duplicated, empty input gives
/// empty output.
pub fn rank_playlists(
    profile: &MarketProfile,
    genre: &str,
    current_year: i32,
    candidates: Vec<RawPlaylist>,
) -> Vec<RankedPlaylist> {
    let genre_key = canonical_genre(genre);
    let deny = skip_terms(&profile.name, &genre_key);

    let mut ranked: Vec<RankedPlaylist> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let cleaned_name = clean_str(&candidate.name);
            if deny.iter().any(|term| cleaned_name.contains(term)) {
                return None;
            }

            let priority = playlist_priority(&cleaned_name, profile, &genre_key, current_year);
            Some(RankedPlaylist {
                id: candidate.id,
                name: candidate.name,
                owner: candidate.owner,
                followers: candidate.followers,
                description: candidate.description,
                source_query: candidate.source_query,
                priority,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.followers.cmp(&a.followers))
    });

    ranked
}
