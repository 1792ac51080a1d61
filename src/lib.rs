pub mod client;
pub mod dns;
pub mod parser;
pub mod report;
pub mod settings;

pub use client::{DnsClient, Reply};
pub use settings::Settings;
