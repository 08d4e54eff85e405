pub mod footprint;
pub mod user;
