use std::fmt;

/// Separator between path segments
pub const SEPARATOR: char = '/';

/// A path into the namespace, split into its name segments.
///
/// Leading and trailing separators are stripped before splitting, so
/// `/C/Documents/`, `C/Documents` and `/C/Documents` are the same path.
/// Inner empty segments (`/C//Documents`) are kept and will simply fail
/// to resolve. The first segment always names a drive; an empty path is
/// the namespace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> NamespacePath<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let trimmed = raw.trim_matches(SEPARATOR);
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split(SEPARATOR).collect()
        };
        Self { segments }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Final segment of the path
    pub fn name(&self) -> Option<&'a str> {
        self.segments.last().copied()
    }

    /// Split into the parent path and the bare leaf name.
    ///
    /// Returns `None` for the root and for bare drive names, which have no
    /// parent container inside the namespace.
    pub fn split_leaf(&self) -> Option<(NamespacePath<'a>, &'a str)> {
        match self.segments.split_last() {
            Some((leaf, parent)) if !parent.is_empty() => Some((
                NamespacePath {
                    segments: parent.to_vec(),
                },
                *leaf,
            )),
            _ => None,
        }
    }

    /// Segment-wise prefix test; `/C/Doc` is not a prefix of `/C/Documents`
    pub fn starts_with(&self, prefix: &NamespacePath<'_>) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self
                .segments
                .iter()
                .zip(prefix.segments.iter())
                .all(|(a, b)| a == b)
    }
}

impl fmt::Display for NamespacePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{}", SEPARATOR);
        }
        for segment in &self.segments {
            write!(f, "{}{}", SEPARATOR, segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_strips_outer_separators() {
        let path = NamespacePath::parse("/C/Documents/file1.txt/");
        assert_eq!(path.segments(), &["C", "Documents", "file1.txt"]);
        assert_eq!(path.name(), Some("file1.txt"));

        assert_eq!(
            NamespacePath::parse("C/Documents"),
            NamespacePath::parse("//C/Documents//")
        );
    }

    #[test]
    fn test_root_paths() {
        for raw in ["", "/", "///"] {
            let path = NamespacePath::parse(raw);
            assert!(path.is_root(), "{raw:?} should be the root");
            assert_eq!(path.to_string(), "/");
        }
    }

    #[test]
    fn test_inner_empty_segments_are_kept() {
        let path = NamespacePath::parse("/C//Documents");
        assert_eq!(path.segments(), &["C", "", "Documents"]);
    }

    #[test]
    fn test_split_leaf() {
        let path = NamespacePath::parse("/C/Documents/file1.txt");
        let (parent, name) = path.split_leaf().unwrap();
        assert_eq!(parent.to_string(), "/C/Documents");
        assert_eq!(name, "file1.txt");

        let (parent, name) = NamespacePath::parse("/C/file").split_leaf().unwrap();
        assert_eq!(parent.segments(), &["C"]);
        assert_eq!(name, "file");

        assert!(NamespacePath::parse("/C").split_leaf().is_none());
        assert!(NamespacePath::parse("").split_leaf().is_none());
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let folder = NamespacePath::parse("/C/Doc");
        assert!(NamespacePath::parse("/C/Doc").starts_with(&folder));
        assert!(NamespacePath::parse("/C/Doc/inner").starts_with(&folder));
        assert!(!NamespacePath::parse("/C/Documents").starts_with(&folder));
        assert!(!NamespacePath::parse("/C").starts_with(&folder));
    }
}
