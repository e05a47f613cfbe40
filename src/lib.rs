pub mod audit;
pub mod backend;
pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod money;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod session;
pub mod state;
