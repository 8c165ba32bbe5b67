mod loader;
mod model;
mod templates;
mod validation;

pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, LoadResult, RealFileSystem,
};
pub use model::{
    CONFIG_VERSION, Config, HeaderConfig, LicenseRuleConfig, ProjectConfig, ScannerConfig,
};
pub use templates::load_templates;
pub use validation::validate_config_semantics;
