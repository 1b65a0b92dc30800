//! Application services: form validation and the persistence seams they use.

pub mod chrome;
pub mod error;
pub mod feeds;
pub mod forms;
pub mod listeners;
pub mod podcasts;
pub mod repos;
pub mod settings;
pub mod stream;
