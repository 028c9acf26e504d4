// Crate root library declaration and module exports.
pub mod config;
pub mod model;
pub mod paths;
pub mod storage;
