pub mod pack;
pub mod version;

pub use pack::{Agent, LifecycleStatus, Pack, PackDependency};
pub use version::{is_compatible, parse_version, Version};
