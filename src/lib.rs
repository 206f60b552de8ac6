pub mod app;
pub mod braille;
pub mod club;
pub mod data;
pub mod filter;
pub mod map;
pub mod stats;
pub mod ui;
