//! Flat markup parse events
//!
//! Events are produced by an upstream tokenizer and consumed in order by the
//! [`TreeBuilder`](crate::builder::TreeBuilder). Every `Open` is expected to be
//! matched by a later `Close` at the same depth.

use indexmap::IndexMap;

/// Attribute name to value mapping, in document order
pub type Attributes = IndexMap<String, String>;

/// Discriminant of an [`Event`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Open,
    Complete,
    Close,
    CharacterData,
}

/// A single parse occurrence emitted by a tokenizer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Start tag of an element with content
    Open {
        name: String,
        attributes: Attributes,
        /// Character data the tokenizer folded into the tag event
        text: Option<String>,
    },
    /// Self-contained element that never has children
    Complete {
        name: String,
        attributes: Attributes,
        text: Option<String>,
    },
    /// End tag of an element opened earlier
    Close { name: String },
    /// Literal text run
    CharacterData { text: String },
}

impl Event {
    pub fn open(name: impl Into<String>) -> Self {
        Self::Open {
            name: name.into(),
            attributes: Attributes::new(),
            text: None,
        }
    }

    pub fn complete(name: impl Into<String>) -> Self {
        Self::Complete {
            name: name.into(),
            attributes: Attributes::new(),
            text: None,
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        Self::Close { name: name.into() }
    }

    pub fn cdata(text: impl Into<String>) -> Self {
        Self::CharacterData { text: text.into() }
    }

    /// Add an attribute to an `Open` or `Complete` event; other kinds are returned unchanged
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Open { attributes, .. } | Self::Complete { attributes, .. } = &mut self {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Set the text carried by an `Open`, `Complete` or `CharacterData` event
    #[must_use]
    pub fn with_text(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Open { text, .. } | Self::Complete { text, .. } => *text = Some(value.into()),
            Self::CharacterData { text } => *text = value.into(),
            Self::Close { .. } => {}
        }
        self
    }

    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Open { .. } => EventKind::Open,
            Self::Complete { .. } => EventKind::Complete,
            Self::Close { .. } => EventKind::Close,
            Self::CharacterData { .. } => EventKind::CharacterData,
        }
    }

    /// Tag name, absent for character data
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Open { name, .. } | Self::Complete { name, .. } | Self::Close { name } => {
                Some(name)
            }
            Self::CharacterData { .. } => None,
        }
    }

    /// Attributes, present only on `Open` and `Complete`
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Self::Open { attributes, .. } | Self::Complete { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Open { text, .. } | Self::Complete { text, .. } => text.as_deref(),
            Self::CharacterData { text } => Some(text),
            Self::Close { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let open = Event::open("a").with_attribute("id", "1");
        assert_eq!(open.kind(), EventKind::Open);
        assert_eq!(open.name(), Some("a"));
        assert_eq!(
            open.attributes().and_then(|attrs| attrs.get("id")),
            Some(&"1".to_string())
        );
        assert_eq!(open.text(), None);

        let text = Event::cdata("hi");
        assert_eq!(text.kind(), EventKind::CharacterData);
        assert_eq!(text.name(), None);
        assert_eq!(text.attributes(), None);
        assert_eq!(text.text(), Some("hi"));
    }

    #[test]
    fn test_close_ignores_builders() {
        let close = Event::close("a").with_attribute("x", "y").with_text("z");
        assert_eq!(close, Event::close("a"));
        assert_eq!(close.attributes(), None);
        assert_eq!(close.text(), None);
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let event = Event::complete("b")
            .with_attribute("z", "1")
            .with_attribute("a", "2");
        let keys: Vec<&String> = event
            .attributes()
            .map(|attrs| attrs.keys().collect())
            .unwrap_or_default();
        assert_eq!(keys, ["z", "a"]);
    }
}
