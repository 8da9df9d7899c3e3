#![forbid(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod core;
pub mod error;
pub mod graph;
pub mod layout;
pub mod util;
