pub mod app;
pub mod catalog;
pub mod color;
pub mod descriptor;
pub mod error;
pub mod grid;
pub mod level;
pub mod lock;
pub mod navigation;
pub mod serde_duration;
pub mod session;
pub mod settings;

pub use app::PaflamyApp;
pub use catalog::LevelCatalog;
pub use error::{CatalogError, DescriptorError, LevelError, SessionError};
pub use level::Level;
pub use navigation::{NavEffect, NavigationController, Stage};
pub use session::GameSession;
pub use settings::PaflamySettings;
