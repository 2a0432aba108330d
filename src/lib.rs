pub mod config;
pub mod domain;
pub mod forms;
pub mod models;
pub mod recommender;
pub mod repository;
pub mod routes;
pub mod seo;
pub mod services;
