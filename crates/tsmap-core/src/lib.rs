#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod error;
pub mod format;
pub mod mapper;
pub mod overrides;
pub mod scope;
pub mod tsconfig;
pub mod version;

pub use config::Config;
pub use error::{Error, Result};
pub use format::{classify_extension, resolve_format, ModuleFormat, ModuleFormatClassifier};
pub use mapper::{MappingRule, PathEntries, PathMapper, PathMappingConfig, Pattern, Specificity};
pub use overrides::{ModuleTypeOverride, ModuleTypeOverrides, OverrideKind};
pub use scope::{
    PackageScope, PackageScopeData, PackageScopeLookup, PackageType, ScopeCache, ScopeCacheStats,
};
pub use tsconfig::{find_tsconfig, TsConfig};
pub use version::VERSION;
