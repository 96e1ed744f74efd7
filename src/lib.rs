// src/lib.rs

pub mod auth_models;
pub mod client;
pub mod drafts;
pub mod errors;
pub mod forms;
pub mod images;
pub mod media;
pub mod models;
pub mod selector;
pub mod session;
pub mod state;
pub mod submission;
pub mod ui;

#[cfg(test)]
mod test_support;
