use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::namespace::NamespaceError;

/// The three kinds of entity the namespace knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Drive,
    Folder,
    File,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Drive => "drive",
            EntityKind::Folder => "folder",
            EntityKind::File => "file",
        }
    }

    /// Capitalized form used in human-readable messages
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Drive => "Drive",
            EntityKind::Folder => "Folder",
            EntityKind::File => "File",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = NamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drive" => Ok(EntityKind::Drive),
            "folder" => Ok(EntityKind::Folder),
            "file" => Ok(EntityKind::File),
            other => Err(NamespaceError::InvalidKind(other.to_string())),
        }
    }
}

// A leaf holding a single content payload
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    content: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Default for FileNode {
    fn default() -> Self {
        Self::new()
    }
}

impl FileNode {
    /// Create a new, empty file
    pub fn new() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content wholesale
    pub fn write(&mut self, content: String) {
        self.content = content;
        self.updated_at = OffsetDateTime::now_utc();
    }

    /// Content length in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

// A container mapping unique names to children.
//  Children keep their insertion order; a child moved
//  in from elsewhere lands at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderNode {
    children: IndexMap<String, Node>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Default for FolderNode {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderNode {
    /// Create a new, empty folder
    pub fn new() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            children: IndexMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Insert a child, returning any entity previously stored under `name`
    pub fn insert(&mut self, name: String, node: Node) -> Option<Node> {
        self.updated_at = OffsetDateTime::now_utc();
        self.children.insert(name, node)
    }

    /// Detach a child, handing ownership of it (and its subtree) to the caller
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        let removed = self.children.shift_remove(name);
        if removed.is_some() {
            self.updated_at = OffsetDateTime::now_utc();
        }
        removed
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.children()
            .map(|(name, node)| Entry {
                name: name.to_string(),
                kind: node.kind(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

/// An entity below drive level
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    pub fn new_file() -> Self {
        Node::File(FileNode::new())
    }

    pub fn new_folder() -> Self {
        Node::Folder(FolderNode::new())
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Node::File(_) => EntityKind::File,
            Node::Folder(_) => EntityKind::Folder,
        }
    }
}

/// One line of a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub kind: EntityKind,
}

/// Metadata about a single entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub kind: EntityKind,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Content length in bytes (files only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// MIME type guessed from the file name (files only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Number of direct children (drives and folders only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<usize>,
}

impl Stat {
    pub(crate) fn for_file(name: &str, file: &FileNode) -> Self {
        Self {
            name: name.to_string(),
            kind: EntityKind::File,
            created_at: file.created_at(),
            updated_at: file.updated_at(),
            size: Some(file.size()),
            mime_type: mime_guess::from_path(name).first().map(|mime| mime.to_string()),
            children: None,
        }
    }

    pub(crate) fn for_container(name: &str, kind: EntityKind, folder: &FolderNode) -> Self {
        Self {
            name: name.to_string(),
            kind,
            created_at: folder.created_at(),
            updated_at: folder.updated_at(),
            size: None,
            mime_type: None,
            children: Some(folder.len()),
        }
    }
}
