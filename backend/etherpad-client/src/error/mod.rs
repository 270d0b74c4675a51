pub mod config;
pub mod etherpad;
pub mod logger;

pub use config::ConfigError;
pub use etherpad::EtherpadError;
pub use logger::LoggerError;
