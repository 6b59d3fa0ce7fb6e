pub mod market;
pub mod phrases;
pub mod ranking;
pub mod string_normalization;

// Re-export commonly used items
pub use market::{MarketProfile, canonical_genre, market_profile};
pub use phrases::build_search_phrases;
pub use ranking::{RankedPlaylist, RawPlaylist, is_denied, rank_playlists, skip_terms};
