pub mod crawler;
pub mod notice;
pub mod settings;
pub mod vault;
pub mod watcher;

pub use crawler::{resolve, CrawlReport, Crawler, Resolution, ResolveOptions, Resolver};
pub use notice::{Notice, Notifier};
pub use settings::{Link, Settings, SettingsStorage};
pub use vault::{FileVault, MemoryVault, Vault, VaultError};
