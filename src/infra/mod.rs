pub mod api;
pub mod terminal;
