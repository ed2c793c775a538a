//! Element tree data model

use std::slice;

use indexmap::map::Values;
use indexmap::IndexMap;

use crate::event::Attributes;

/// Top-level build result. Markup may hold several sibling roots, so this has
/// the same shape as an element's children.
pub type Forest = Children;

/// Reconstructed markup element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    /// Concatenation of every text run found directly under this element
    pub text: Option<String>,
    pub children: Children,
}

impl Element {
    /// Create an element with no attributes, text or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            text: None,
            children: Children::default(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Children) -> Self {
        self.children = children;
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Append character data, creating the text field on first use
    pub fn append_text(&mut self, fragment: &str) {
        match &mut self.text {
            Some(text) => text.push_str(fragment),
            None => self.text = Some(fragment.to_string()),
        }
    }

    /// True when the element has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of elements in this subtree, including this one
    pub fn element_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            count += 1;
            stack.extend(element.children.iter());
        }
        count
    }

    /// Height of this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((element, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(element.children.iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }
}

/// All children of one parent that share a tag name
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChildGroup {
    /// Ordered sequence, possibly holding a single element
    Sequence(Vec<Element>),
    /// Bare element left by the collapse pass
    Single(Box<Element>),
}

impl ChildGroup {
    pub fn as_slice(&self) -> &[Element] {
        match self {
            Self::Sequence(elements) => elements,
            Self::Single(element) => slice::from_ref(element.as_ref()),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Element> {
        self.as_slice().iter()
    }

    pub fn first(&self) -> Option<&Element> {
        self.as_slice().first()
    }

    /// Returns the element if this group was collapsed, None otherwise
    pub fn as_single(&self) -> Option<&Element> {
        match self {
            Self::Single(element) => Some(element.as_ref()),
            Self::Sequence(_) => None,
        }
    }

    /// Returns the elements if this group is still a sequence, None otherwise
    pub fn as_sequence(&self) -> Option<&[Element]> {
        match self {
            Self::Sequence(elements) => Some(elements.as_slice()),
            Self::Single(_) => None,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Append an element, turning a collapsed group back into a sequence
    pub fn push(&mut self, element: Element) {
        match self {
            Self::Sequence(elements) => elements.push(element),
            Self::Single(_) => {
                if let Self::Single(first) = std::mem::replace(self, Self::Sequence(Vec::new())) {
                    *self = Self::Sequence(vec![*first, element]);
                }
            }
        }
    }
}

/// Child elements of one parent, grouped by name or kept by position
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Children {
    /// Groups keyed by tag name, in order of each name's first appearance
    Named(IndexMap<String, ChildGroup>),
    /// Document order; each element carries its own name
    Positional(Vec<Element>),
}

impl Default for Children {
    fn default() -> Self {
        Self::Named(IndexMap::new())
    }
}

impl Children {
    pub fn named() -> Self {
        Self::Named(IndexMap::new())
    }

    pub const fn positional() -> Self {
        Self::Positional(Vec::new())
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Self::Positional(_))
    }

    /// Append a child under its own name (or at the end, positionally)
    pub fn push(&mut self, element: Element) {
        match self {
            Self::Named(groups) => match groups.get_mut(&element.name) {
                Some(group) => group.push(element),
                None => {
                    groups.insert(element.name.clone(), ChildGroup::Sequence(vec![element]));
                }
            },
            Self::Positional(elements) => elements.push(element),
        }
    }

    /// Name-keyed group; always None in positional mode
    pub fn group(&self, name: &str) -> Option<&ChildGroup> {
        match self {
            Self::Named(groups) => groups.get(name),
            Self::Positional(_) => None,
        }
    }

    /// Every direct child with the given name, in document order
    pub fn get(&self, name: &str) -> Vec<&Element> {
        match self {
            Self::Named(groups) => groups
                .get(name)
                .map(|group| group.iter().collect())
                .unwrap_or_default(),
            Self::Positional(elements) => elements.iter().filter(|e| e.name == name).collect(),
        }
    }

    pub fn first(&self, name: &str) -> Option<&Element> {
        match self {
            Self::Named(groups) => groups.get(name).and_then(ChildGroup::first),
            Self::Positional(elements) => elements.iter().find(|e| e.name == name),
        }
    }

    /// Direct children. Named children come group by group, each group in
    /// document order, so siblings `b c b` are visited as `b b c`; positional
    /// children come in document order.
    pub fn iter(&self) -> Iter<'_> {
        match self {
            Self::Named(groups) => Iter::Named {
                groups: groups.values(),
                current: Default::default(),
            },
            Self::Positional(elements) => Iter::Positional(elements.iter()),
        }
    }

    /// Number of direct child elements
    pub fn len(&self) -> usize {
        match self {
            Self::Named(groups) => groups.values().map(ChildGroup::len).sum(),
            Self::Positional(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements across every subtree
    pub fn element_count(&self) -> usize {
        self.iter().map(Element::element_count).sum()
    }

    /// Height of the tallest subtree, zero when empty
    pub fn depth(&self) -> usize {
        self.iter().map(Element::depth).max().unwrap_or(0)
    }

    /// Remove every direct child, in iteration order
    fn take_all(&mut self) -> Vec<Element> {
        match self {
            Self::Named(groups) => {
                let mut elements = Vec::new();
                for group in std::mem::take(groups).into_values() {
                    match group {
                        ChildGroup::Sequence(group) => elements.extend(group),
                        ChildGroup::Single(element) => elements.push(*element),
                    }
                }
                elements
            }
            Self::Positional(elements) => std::mem::take(elements),
        }
    }
}

/// Frees nested elements with a work list so dropping a deep tree cannot
/// exhaust the stack.
impl Drop for Children {
    fn drop(&mut self) {
        let mut pending = self.take_all();
        while let Some(mut element) = pending.pop() {
            pending.extend(element.children.take_all());
        }
    }
}

/// Iterator over the direct children of a [`Children`]
#[derive(Debug)]
pub enum Iter<'a> {
    Named {
        groups: Values<'a, String, ChildGroup>,
        current: slice::Iter<'a, Element>,
    },
    Positional(slice::Iter<'a, Element>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Named { groups, current } => loop {
                if let Some(element) = current.next() {
                    return Some(element);
                }
                *current = groups.next()?.iter();
            },
            Self::Positional(elements) => elements.next(),
        }
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a Element;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
