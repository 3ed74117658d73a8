//! Tree paths with explicit wildcard elements.

use std::fmt;

/// Text form of [`PathElement::AllChildren`].
pub const WILDCARD: &str = "*";

/// Text separator between path elements.
pub const SEPARATOR: char = '/';

/// One step of a tree path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathElement {
    /// A specific child: a workspace name, column, major or minor label.
    Concrete(String),
    /// Not resolved to a specific child; selecting it means every child.
    AllChildren,
}

impl PathElement {
    pub fn as_concrete(&self) -> Option<&str> {
        match self {
            Self::Concrete(label) => Some(label),
            Self::AllChildren => None,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::AllChildren)
    }
}

impl From<&str> for PathElement {
    fn from(label: &str) -> Self {
        Self::Concrete(label.to_string())
    }
}

impl From<String> for PathElement {
    fn from(label: String) -> Self {
        Self::Concrete(label)
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(label) => f.write_str(label),
            Self::AllChildren => f.write_str(WILDCARD),
        }
    }
}

/// Address of a tree node: an ordered sequence of path elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<PathElement>);

impl NodePath {
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }

    /// Parses `a/b/*`. `*` is the wildcard; the empty string is the empty path.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        text.split(SEPARATOR)
            .map(|segment| {
                if segment == WILDCARD {
                    PathElement::AllChildren
                } else {
                    PathElement::from(segment)
                }
            })
            .collect()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new path with `element` appended.
    pub fn child(&self, element: PathElement) -> Self {
        let mut elements = self.0.clone();
        elements.push(element);
        Self(elements)
    }

    /// The last concrete element, used as a node's display label.
    pub fn label(&self) -> Option<&str> {
        self.0.iter().rev().find_map(PathElement::as_concrete)
    }

    /// The concrete keys of a path whose wildcards are all trailing.
    ///
    /// `t/*` gives `[t]`, `c/m/*` gives `[c, m]`. Returns `None` when a
    /// wildcard is followed by a concrete element.
    pub fn trimmed_keys(&self) -> Option<Vec<&str>> {
        let concrete = self
            .0
            .iter()
            .position(PathElement::is_wildcard)
            .unwrap_or(self.0.len());
        if self.0[concrete..].iter().all(PathElement::is_wildcard) {
            Some(
                self.0[..concrete]
                    .iter()
                    .filter_map(PathElement::as_concrete)
                    .collect(),
            )
        } else {
            None
        }
    }
}

impl FromIterator<PathElement> for NodePath {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<empty>");
        }
        for (idx, element) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}
