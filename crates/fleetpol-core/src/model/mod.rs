pub mod policy;
pub mod resource_map;
pub mod set;
pub mod update;

pub use policy::{Policy, PolicyKind};
pub use resource_map::ResourceMap;
pub use set::Set;
pub use update::{Update, Updates};
