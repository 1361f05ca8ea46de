pub mod db;
pub mod models;
pub mod orm;
pub mod queries;
pub mod store;
pub mod vote;
pub mod web;
