pub mod analyze;
pub mod config;
pub mod inspect;
pub mod prompt;
pub mod report;
pub mod schema;
pub mod serve;
