pub mod apple_music;
pub mod discovery;
pub mod enrichment;
pub mod error;
pub mod handlers;
pub mod models;
pub mod spotify;
pub mod state;
pub mod warehouse;
