pub mod completion;
pub mod config;
pub mod export;
pub mod notes;
pub mod pages;
pub mod version;
