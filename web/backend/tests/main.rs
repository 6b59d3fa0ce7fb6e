mod fixtures;
mod handlers;
