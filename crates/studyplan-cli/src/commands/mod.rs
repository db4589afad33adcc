pub mod burnout;
pub mod config;
pub mod document;
pub mod generate;
pub mod insights;
pub mod priority;
pub mod redistribute;
pub mod revisions;
pub mod toggle;
