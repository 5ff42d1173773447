pub mod event;
pub mod map;
pub mod mods;
