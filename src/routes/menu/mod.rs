pub mod menu;
pub mod seed;
