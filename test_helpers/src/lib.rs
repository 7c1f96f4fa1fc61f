//! Test helpers shared across the workspace.
//!
//! - [`tree`] builds fixture trees from `serde_json::json!` literals.
//! - [`serializer`] provides a serializer that records how it was used.
//! - [`jail`] wraps `figment::Jail` for tests touching the filesystem, and
//!   writes files straight into a [`config_node::FileLoader`].

pub mod jail;
pub mod serializer;
pub mod tree;

pub use jail::{figment_error, load_jailed, loader_with_file, with_jail};
pub use serializer::{Call, Direction, RecordingSerializer};
pub use tree::{case_insensitive_tree, tree_from_json};
