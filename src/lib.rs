pub mod config;
pub mod core_types;
pub mod corpus;
pub mod error;
pub mod export;
pub mod geometry;
pub mod html;
pub mod layouts;
pub mod optimizer;
pub mod scorer;
