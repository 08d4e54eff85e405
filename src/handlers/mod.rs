pub mod auth;
pub mod footprints;
pub mod health;
pub mod news;
pub mod stats;
pub mod suggestions;
