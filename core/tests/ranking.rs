use chartscout_core::{RawPlaylist, market_profile, rank_playlists, skip_terms};

fn candidate(id: &str, name: &str, followers: u64) -> RawPlaylist {
    RawPlaylist {
        id: id.to_string(),
        name: name.to_string(),
        owner: "tester".to_string(),
        followers,
        description: String::new(),
        source_query: "rap français".to_string(),
    }
}

#[test]
fn output_is_a_permutation_of_non_skipped_input() {
    let profile = market_profile("France");
    let input = vec![
        candidate("a", "Rap Français Officiel", 500_000),
        candidate("b", "Lofi Beats", 2_000_000),
        candidate("c", "Rap Central", 100_000),
        candidate("d", "Morning Jazz", 50_000),
    ];

    let ranked = rank_playlists(&profile, "hip-hop", 2026, input);

    let mut ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    // "Lofi Beats" is deny-listed, everything else survives exactly once
    assert_eq!(ids, vec!["a", "c", "d"]);
}

#[test]
fn deny_listed_names_never_appear() {
    let profile = market_profile("France");
    let input = vec![
        candidate("a", "Lofi Hip Hop Study", 3_000_000),
        candidate("b", "Sleep Rap", 1_000_000),
        candidate("c", "Deutschrap Brandneu", 900_000),
    ];

    let ranked = rank_playlists(&profile, "hip-hop", 2026, input);
    assert!(ranked.is_empty());
}

#[test]
fn local_term_bonus_dominates_otherwise_identical_candidates() {
    let profile = market_profile("France");
    let input = vec![
        candidate("plain", "Rap Centrale", 100),
        candidate("local", "Rap Français Centrale", 100),
    ];

    let ranked = rank_playlists(&profile, "hip-hop", 2026, input);

    let plain = ranked.iter().find(|p| p.id == "plain").unwrap();
    let local = ranked.iter().find(|p| p.id == "local").unwrap();
    assert!(local.priority >= plain.priority + 20);
    assert_eq!(ranked[0].id, "local");
}

#[test]
fn follower_count_breaks_priority_ties() {
    let profile = market_profile("France");
    let input = vec![
        candidate("small", "Rap Weekly", 10_000),
        candidate("big", "Rap Monthly", 500_000),
    ];

    let ranked = rank_playlists(&profile, "hip-hop", 2026, input);
    assert_eq!(ranked[0].priority, ranked[1].priority);
    assert_eq!(ranked[0].id, "big");
}

#[test]
fn equal_priority_and_followers_keep_insertion_order() {
    let profile = market_profile("France");
    let input = vec![
        candidate("first", "Rap Weekly", 42),
        candidate("second", "Rap Monthly", 42),
    ];

    let ranked = rank_playlists(&profile, "hip-hop", 2026, input);
    assert_eq!(ranked[0].id, "first");
    assert_eq!(ranked[1].id, "second");
}

#[test]
fn france_hip_hop_worked_example() {
    let profile = market_profile("France");
    let input = vec![
        candidate("officiel", "Rap Français Officiel", 500_000),
        candidate("lofi", "Lofi Beats", 2_000_000),
        candidate("central", "Rap Central", 100_000),
    ];

    let ranked = rank_playlists(&profile, "hip-hop", 2026, input);

    assert_eq!(ranked.len(), 2);
    // Lofi Beats is excluded despite the most followers; the local-term and
    // official-marker bonuses put the French playlist first
    assert_eq!(ranked[0].id, "officiel");
    assert_eq!(ranked[1].id, "central");
    assert!(ranked[0].priority > ranked[1].priority);
}

#[test]
fn accented_and_folded_spellings_match_the_same_terms() {
    let profile = market_profile("France");
    let input = vec![
        candidate("accented", "Rap Français", 10),
        candidate("folded", "Rap Francais", 10),
    ];

    let ranked = rank_playlists(&profile, "hip-hop", 2026, input);
    assert_eq!(ranked[0].priority, ranked[1].priority);
}

#[test]
fn recency_uses_the_supplied_year() {
    let profile = market_profile("UK");
    let base = rank_playlists(
        &profile,
        "electronic",
        2026,
        vec![candidate("base", "UK Garage Selection", 10)],
    );
    let dated = rank_playlists(
        &profile,
        "electronic",
        2026,
        vec![candidate("dated", "UK Garage Selection 2026", 10)],
    );

    assert_eq!(dated[0].priority, base[0].priority + 8);
}

#[test]
fn quality_term_bonus_is_capped() {
    let profile = market_profile("US");
    let ranked = rank_playlists(
        &profile,
        "pop",
        2026,
        vec![
            candidate("stacked", "Best Top Hits Essential Ultimate", 10),
            candidate("single", "Best Pop", 10),
        ],
    );

    let stacked = ranked.iter().find(|p| p.id == "stacked").unwrap();
    let single = ranked.iter().find(|p| p.id == "single").unwrap();
    // five quality terms cap at +9, one term earns +3
    assert_eq!(stacked.priority - single.priority, 6);
}

#[test]
fn unknown_market_and_genre_still_rank_deterministically() {
    let profile = market_profile("Atlantis");
    let input = vec![
        candidate("a", "Atlantis Vibes", 100),
        candidate("b", "Deep Sea Sleep", 900),
        candidate("c", "Best Atlantis Hits", 50),
    ];

    let ranked = rank_playlists(&profile, "vaporwave", 2026, input);

    // "sleep" is in the generic deny-list, the market name acts as the local term
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].id, "c");
    assert_eq!(ranked[1].id, "a");
}

#[test]
fn empty_input_gives_empty_output() {
    let profile = market_profile("France");
    assert!(rank_playlists(&profile, "hip-hop", 2026, vec![]).is_empty());
}

#[test]
fn ranked_playlists_serialize_with_wire_field_names() {
    let profile = market_profile("France");
    let ranked = rank_playlists(
        &profile,
        "hip-hop",
        2026,
        vec![candidate("a", "Rap Français", 12)],
    );

    let value = serde_json::to_value(&ranked[0]).unwrap();
    assert_eq!(value["playlist_id"], "a");
    assert_eq!(value["playlist_name"], "Rap Français");
    assert!(value["priority"].is_number());
    assert!(value.get("id").is_none());
}

#[test]
fn skip_terms_branch_on_the_pair() {
    let france = skip_terms("France", "hip-hop");
    let germany = skip_terms("Germany", "hip-hop");

    assert!(france.contains(&"lofi"));
    assert!(france.contains(&"deutschrap"));
    assert!(!germany.contains(&"deutschrap"));
    assert!(germany.contains(&"french rap"));
}
