pub mod detail;
pub mod export;
pub mod listing;
pub mod submission;
