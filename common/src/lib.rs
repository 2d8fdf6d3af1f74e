//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod error;
pub mod search_const;
pub mod config;
pub mod filter;
pub mod search_query;
pub mod query_model;
pub mod reducer;
pub mod item_type;
pub mod search_result;
pub mod facets;
pub mod aggregation;
pub mod page_cache;
pub mod session;
