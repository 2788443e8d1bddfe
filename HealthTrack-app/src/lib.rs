// HealthTrack App
// Console host that mounts the screens and routes between them

pub mod config;
pub mod console;
pub mod render;
pub mod router;

pub use config::{AppConfig, ConfigError, SaverKind};
pub use console::{Command, ConsoleError, Session};
pub use router::Router;
