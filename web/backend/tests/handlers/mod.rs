mod analyze;
mod credits;
mod health;
mod profile;
mod tracks;
