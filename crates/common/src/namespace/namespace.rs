use indexmap::IndexMap;

use super::node::{EntityKind, Entry, FileNode, FolderNode, Node, Stat};
use super::path::{NamespacePath, SEPARATOR};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamespaceError {
    #[error("Invalid entity type.")]
    InvalidKind(String),
    #[error("Invalid path {0}.")]
    InvalidPath(String),
    #[error("Invalid name {0:?}: names must be non-empty and may not contain '/'.")]
    InvalidName(String),
    #[error("Drive {0} does not exist.")]
    DriveNotFound(String),
    #[error("Path {0} does not exist.")]
    PathNotFound(String),
    #[error("Entity {name} does not exist at {path}.")]
    EntityNotFound { name: String, path: String },
    #[error("Drive {0} already exists.")]
    DriveAlreadyExists(String),
    #[error("{} {name} already exists in {path}.", .kind.title())]
    EntityAlreadyExists {
        kind: EntityKind,
        name: String,
        path: String,
    },
    #[error("An entity with the name {name} already exists in {path}.")]
    AlreadyExists { name: String, path: String },
    #[error("Cannot create {0} under a non-folder entity.")]
    CreateUnderNonFolder(EntityKind),
    #[error("Cannot move to non-folder destination {0}.")]
    MoveToNonFolder(String),
    #[error("Path {0} is not a folder.")]
    NotAFolder(String),
    #[error("Cannot write to non-file entity {0}.")]
    WriteToNonFile(String),
    #[error("Cannot read from non-file entity {0}.")]
    ReadFromNonFile(String),
    #[error("Cannot move {from} into {to}: destination is inside source.")]
    MoveIntoSelf { from: String, to: String },
}

/// Coarse classification of a [`NamespaceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidKind,
    InvalidPath,
    NotFound,
    AlreadyExists,
    NotAFolder,
    NotAFile,
}

impl NamespaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NamespaceError::InvalidKind(_) => ErrorKind::InvalidKind,
            NamespaceError::InvalidPath(_)
            | NamespaceError::InvalidName(_)
            | NamespaceError::MoveIntoSelf { .. } => ErrorKind::InvalidPath,
            NamespaceError::DriveNotFound(_)
            | NamespaceError::PathNotFound(_)
            | NamespaceError::EntityNotFound { .. } => ErrorKind::NotFound,
            NamespaceError::DriveAlreadyExists(_)
            | NamespaceError::EntityAlreadyExists { .. }
            | NamespaceError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            NamespaceError::CreateUnderNonFolder(_)
            | NamespaceError::MoveToNonFolder(_)
            | NamespaceError::NotAFolder(_) => ErrorKind::NotAFolder,
            NamespaceError::WriteToNonFile(_) | NamespaceError::ReadFromNonFile(_) => {
                ErrorKind::NotAFile
            }
        }
    }
}

// Borrowed views of whatever a path resolved to.
//  Drives resolve to `Folder` as well; callers that care
//  about the difference look at the path length.
enum NodeRef<'a> {
    Folder(&'a FolderNode),
    File(&'a FileNode),
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Folder(folder) => NodeRef::Folder(folder),
            Node::File(file) => NodeRef::File(file),
        }
    }
}

enum NodeMut<'a> {
    Folder(&'a mut FolderNode),
    File(&'a mut FileNode),
}

impl<'a> From<&'a mut Node> for NodeMut<'a> {
    fn from(node: &'a mut Node) -> Self {
        match node {
            Node::Folder(folder) => NodeMut::Folder(folder),
            Node::File(file) => NodeMut::File(file),
        }
    }
}

/// The whole tree: a set of independent, uniquely named drives.
///
/// Every operation either applies exactly one change or returns an error
/// and leaves the tree untouched. The namespace does no locking of its own;
/// shared owners wrap it in a single lock.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    drives: IndexMap<String, FolderNode>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drive, folder or file named `name` under `path`.
    ///
    /// Drives may only be created at the root (an empty path); files and
    /// folders must be created inside an existing drive or folder.
    pub fn create(&mut self, path: &str, kind: &str, name: &str) -> Result<EntityKind, NamespaceError> {
        let kind: EntityKind = kind.parse()?;
        validate_name(name)?;
        let path = NamespacePath::parse(path);

        match kind {
            EntityKind::Drive => {
                if !path.is_root() {
                    return Err(NamespaceError::InvalidPath(path.to_string()));
                }
                if self.drives.contains_key(name) {
                    return Err(NamespaceError::DriveAlreadyExists(name.to_string()));
                }
                self.drives.insert(name.to_string(), FolderNode::new());
            }
            EntityKind::Folder | EntityKind::File => {
                let parent = match self.resolve_mut(&path)? {
                    NodeMut::Folder(folder) => folder,
                    NodeMut::File(_) => return Err(NamespaceError::CreateUnderNonFolder(kind)),
                };
                if parent.contains(name) {
                    return Err(NamespaceError::EntityAlreadyExists {
                        kind,
                        name: name.to_string(),
                        path: path.to_string(),
                    });
                }
                let node = if kind == EntityKind::File {
                    Node::new_file()
                } else {
                    Node::new_folder()
                };
                parent.insert(name.to_string(), node);
            }
        }

        tracing::debug!(%path, name, %kind, "created entity");
        Ok(kind)
    }

    /// Remove the entity at `path`, together with everything beneath it
    pub fn delete(&mut self, path: &str) -> Result<(), NamespaceError> {
        let path = NamespacePath::parse(path);
        let (parent_path, name) = path
            .split_leaf()
            .ok_or_else(|| NamespaceError::InvalidPath(path.to_string()))?;

        let removed = match self.resolve_mut(&parent_path)? {
            NodeMut::Folder(parent) => parent.remove(name),
            NodeMut::File(_) => None,
        };
        let removed = removed.ok_or_else(|| NamespaceError::EntityNotFound {
            name: name.to_string(),
            path: path.to_string(),
        })?;

        tracing::debug!(%path, kind = %removed.kind(), "deleted entity");
        Ok(())
    }

    /// Move the entity at `source` into the folder or drive at `destination`,
    /// keeping its name.
    ///
    /// Every precondition is checked before the entity is detached, so a
    /// refused move leaves both locations exactly as they were.
    pub fn mv(&mut self, source: &str, destination: &str) -> Result<(), NamespaceError> {
        let source = NamespacePath::parse(source);
        let destination = NamespacePath::parse(destination);
        let (source_parent, name) = source
            .split_leaf()
            .ok_or_else(|| NamespaceError::InvalidPath(source.to_string()))?;

        let exists = match self.resolve(&source_parent)? {
            NodeRef::Folder(parent) => parent.contains(name),
            NodeRef::File(_) => false,
        };
        if !exists {
            return Err(NamespaceError::EntityNotFound {
                name: name.to_string(),
                path: source.to_string(),
            });
        }

        match self.resolve(&destination)? {
            NodeRef::Folder(target) if target.contains(name) => {
                return Err(NamespaceError::AlreadyExists {
                    name: name.to_string(),
                    path: destination.to_string(),
                });
            }
            NodeRef::Folder(_) => {}
            NodeRef::File(_) => {
                return Err(NamespaceError::MoveToNonFolder(destination.to_string()))
            }
        }

        if destination.starts_with(&source) {
            return Err(NamespaceError::MoveIntoSelf {
                from: source.to_string(),
                to: destination.to_string(),
            });
        }

        let node = self
            .detach(&source_parent, name)
            .ok_or_else(|| NamespaceError::EntityNotFound {
                name: name.to_string(),
                path: source.to_string(),
            })?;
        if let Err((err, node)) = self.attach(&destination, name, node) {
            // destination was validated above; put the entity back regardless
            if let Err((restore_err, lost)) = self.attach(&source_parent, name, node) {
                tracing::error!(
                    %source,
                    kind = %lost.kind(),
                    error = %restore_err,
                    "failed to restore entity after a refused move"
                );
            }
            return Err(err);
        }

        tracing::debug!(%source, %destination, "moved entity");
        Ok(())
    }

    /// Replace the content of the file at `path`
    pub fn write(&mut self, path: &str, content: impl Into<String>) -> Result<(), NamespaceError> {
        let path = NamespacePath::parse(path);
        match self.resolve_mut(&path)? {
            NodeMut::File(file) => {
                file.write(content.into());
                tracing::debug!(%path, size = file.size(), "wrote file");
                Ok(())
            }
            NodeMut::Folder(_) => Err(NamespaceError::WriteToNonFile(path.to_string())),
        }
    }

    /// Current content of the file at `path`
    pub fn read(&self, path: &str) -> Result<&str, NamespaceError> {
        let path = NamespacePath::parse(path);
        match self.resolve(&path)? {
            NodeRef::File(file) => Ok(file.content()),
            NodeRef::Folder(_) => Err(NamespaceError::ReadFromNonFile(path.to_string())),
        }
    }

    /// Names and kinds of the direct children of the drive or folder at `path`
    pub fn ls(&self, path: &str) -> Result<Vec<Entry>, NamespaceError> {
        let path = NamespacePath::parse(path);
        match self.resolve(&path)? {
            NodeRef::Folder(folder) => Ok(folder.entries()),
            NodeRef::File(_) => Err(NamespaceError::NotAFolder(path.to_string())),
        }
    }

    /// Names of all drives, in creation order
    pub fn drives(&self) -> Vec<&str> {
        self.drives.keys().map(String::as_str).collect()
    }

    /// Metadata for the entity at `path`
    pub fn stat(&self, path: &str) -> Result<Stat, NamespaceError> {
        let path = NamespacePath::parse(path);
        let name = path.name().unwrap_or_default();
        let stat = match self.resolve(&path)? {
            NodeRef::File(file) => Stat::for_file(name, file),
            NodeRef::Folder(folder) if path.segments().len() == 1 => {
                Stat::for_container(name, EntityKind::Drive, folder)
            }
            NodeRef::Folder(folder) => Stat::for_container(name, EntityKind::Folder, folder),
        };
        Ok(stat)
    }

    fn resolve(&self, path: &NamespacePath<'_>) -> Result<NodeRef<'_>, NamespaceError> {
        let (drive_name, rest) = path
            .segments()
            .split_first()
            .ok_or_else(|| NamespaceError::DriveNotFound(String::new()))?;
        let drive = self
            .drives
            .get(*drive_name)
            .ok_or_else(|| NamespaceError::DriveNotFound(drive_name.to_string()))?;

        let mut current = NodeRef::Folder(drive);
        for segment in rest {
            current = match current {
                NodeRef::Folder(folder) => folder.get(segment).map(NodeRef::from),
                NodeRef::File(_) => None,
            }
            .ok_or_else(|| NamespaceError::PathNotFound(path.to_string()))?;
        }
        Ok(current)
    }

    fn resolve_mut(&mut self, path: &NamespacePath<'_>) -> Result<NodeMut<'_>, NamespaceError> {
        let (drive_name, rest) = path
            .segments()
            .split_first()
            .ok_or_else(|| NamespaceError::DriveNotFound(String::new()))?;
        let drive = self
            .drives
            .get_mut(*drive_name)
            .ok_or_else(|| NamespaceError::DriveNotFound(drive_name.to_string()))?;

        let mut current = NodeMut::Folder(drive);
        for segment in rest {
            current = match current {
                NodeMut::Folder(folder) => folder.get_mut(segment).map(NodeMut::from),
                NodeMut::File(_) => None,
            }
            .ok_or_else(|| NamespaceError::PathNotFound(path.to_string()))?;
        }
        Ok(current)
    }

    fn detach(&mut self, parent: &NamespacePath<'_>, name: &str) -> Option<Node> {
        match self.resolve_mut(parent).ok()? {
            NodeMut::Folder(folder) => folder.remove(name),
            NodeMut::File(_) => None,
        }
    }

    fn attach(
        &mut self,
        parent: &NamespacePath<'_>,
        name: &str,
        node: Node,
    ) -> Result<(), (NamespaceError, Node)> {
        let folder = match self.resolve_mut(parent) {
            Ok(NodeMut::Folder(folder)) => folder,
            Ok(NodeMut::File(_)) => {
                return Err((NamespaceError::NotAFolder(parent.to_string()), node))
            }
            Err(err) => return Err((err, node)),
        };
        if folder.contains(name) {
            return Err((
                NamespaceError::AlreadyExists {
                    name: name.to_string(),
                    path: parent.to_string(),
                },
                node,
            ));
        }
        folder.insert(name.to_string(), node);
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), NamespaceError> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(NamespaceError::InvalidName(name.to_string()));
    }
    Ok(())
}
