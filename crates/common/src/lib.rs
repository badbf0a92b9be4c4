/**
 * The in-memory namespace of drives, folders
 *  and files, plus the path resolution used to
 *  address entities inside it.
 */
pub mod namespace;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::namespace::{
        EntityKind, Entry, ErrorKind, Namespace, NamespaceError, NamespacePath, Stat,
    };
    pub use crate::version::{build_info, BuildInfo};
}
