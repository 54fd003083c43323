pub mod hide;
pub mod key;
pub mod unveil;
