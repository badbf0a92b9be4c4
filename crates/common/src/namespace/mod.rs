//! In-memory namespace of drives, folders and files
//!
//! This module defines the core types for drivefs' hierarchical namespace:
//!
//! - **[`Namespace`]**: The set of drives and every operation on the tree
//! - **[`Node`]**: A single entity, either a file or a folder
//! - **[`NamespacePath`]**: A parsed `/`-separated path
//! - **[`NamespaceError`]**: Every way an operation can be refused
//!
//! # Architecture
//!
//! ```text
//! Namespace --drives--> "C" (Folder)
//!                           |
//!              +------------+------------+
//!              |                         |
//!          Documents (Folder)      notes.txt (File)
//!              |
//!          file1.txt (File)
//! ```
//!
//! Every folder owns its children outright, so the tree cannot contain cycles
//! or shared entities. Dropping a folder drops its whole subtree, and moving
//! an entity hands ownership from one parent map to another.
//!
//! Paths always start with a drive name: `/C/Documents/file1.txt`. Leading and
//! trailing separators are ignored, and the empty path denotes the root where
//! drives are created.

#[allow(clippy::module_inception)]
mod namespace;
mod node;
mod path;

pub use namespace::{ErrorKind, Namespace, NamespaceError};
pub use node::{EntityKind, Entry, FileNode, FolderNode, Node, Stat};
pub use path::{NamespacePath, SEPARATOR};
