pub mod autocomplete;
pub mod chat;
pub mod clear;
pub mod health_route;
pub mod upload;
