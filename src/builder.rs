//! Event sequence to element tree builder
//!
//! The builder walks the flat event list once, depth first. Subtrees carry no
//! length markers, so only the matching `Close` event ends a subtree; the
//! builder keeps one [`EventCursor`] shared by every nesting level and an
//! explicit stack of open elements in place of recursion.

pub mod collapse;
pub mod config;
pub mod cursor;

pub use collapse::{collapse, collapse_groups};
pub use config::Config;
pub use cursor::EventCursor;

use tracing::{debug, instrument, trace, warn};

use crate::error::{Error, ErrorKind, Result};
use crate::event::{Attributes, Event};
use crate::model::{Children, Element, Forest};

/// Lifecycle of an element while the builder is filling it in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeState {
    /// Nothing seen since the element was opened
    AwaitingContent,
    /// Consuming a run of character data
    AccumulatingText,
    /// A child element was just attached
    AttachingChild,
}

/// An element that has been opened and not yet closed
#[derive(Debug)]
struct Frame {
    element: Element,
    state: NodeState,
    /// Index of the `Open` event
    opened_at: usize,
}

impl Frame {
    fn on_text(&mut self, text: &str) {
        self.element.append_text(text);
        self.transition(NodeState::AccumulatingText);
    }

    fn on_child(&mut self, child: Element) {
        self.element.children.push(child);
        self.transition(NodeState::AttachingChild);
    }

    fn transition(&mut self, next: NodeState) {
        if self.state != next {
            trace!(element = %self.element.name, from = ?self.state, to = ?next, "node state");
            self.state = next;
        }
    }
}

/// Builds an element forest from an ordered event slice
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    cursor: EventCursor<'a>,
    config: Config,
    stack: Vec<Frame>,
    forest: Forest,
}

impl<'a> TreeBuilder<'a> {
    /// Create a new builder with default configuration
    pub fn new(events: &'a [Event]) -> Self {
        Self::with_config(events, Config::default())
    }

    /// Create a new builder with custom configuration
    pub fn with_config(events: &'a [Event], config: Config) -> Self {
        Self {
            cursor: EventCursor::new(events),
            config,
            stack: Vec::new(),
            forest: Self::empty_children(config),
        }
    }

    /// Consume the events and return the finished forest
    #[instrument(level = "debug", skip_all, fields(events = self.cursor.remaining().len()))]
    pub fn build(mut self) -> Result<Forest> {
        while let Some(event) = self.cursor.current() {
            if !self.step(event)? {
                break;
            }
            self.cursor.advance();
        }

        self.finish_open_elements()?;

        if self.config.collapses() {
            collapse_groups(&mut self.forest);
        }

        if self.config.require_root && self.forest.is_empty() {
            return Err(Error::new(ErrorKind::EmptyInput).at(self.cursor.position()));
        }

        debug!(
            roots = self.forest.len(),
            elements = self.forest.element_count(),
            "tree built"
        );
        Ok(self.forest)
    }

    /// Apply one event; returns false when building should stop
    fn step(&mut self, event: &Event) -> Result<bool> {
        let position = self.cursor.position();
        match event {
            Event::CharacterData { text } => match self.stack.last_mut() {
                Some(frame) => frame.on_text(text),
                None => debug!(position, "dropping top-level character data"),
            },
            Event::Complete {
                name,
                attributes,
                text,
            } => {
                let leaf = self.new_element(name, attributes, text.as_deref());
                self.attach(leaf);
            }
            Event::Open {
                name,
                attributes,
                text,
            } => {
                self.check_depth(name, position)?;
                let mut frame = Frame {
                    element: self.new_element(name, attributes, None),
                    state: NodeState::AwaitingContent,
                    opened_at: position,
                };
                if let Some(seed) = text {
                    frame.on_text(seed);
                }
                self.stack.push(frame);
            }
            Event::Close { name } => return self.close(name, position),
        }
        Ok(true)
    }

    fn close(&mut self, name: &str, position: usize) -> Result<bool> {
        let Some(open) = self.stack.last() else {
            if self.config.strict {
                return Err(Error::new(ErrorKind::UnexpectedClose {
                    found: name.to_string(),
                })
                .at(position));
            }
            warn!(
                position,
                name,
                remaining = self.cursor.remaining().len().saturating_sub(1),
                "close event outside any element ends the build"
            );
            return Ok(false);
        };

        if open.element.name != name {
            if self.config.strict {
                return Err(Error::new(ErrorKind::MismatchedClose {
                    expected: open.element.name.clone(),
                    found: name.to_string(),
                })
                .at(position)
                .in_path(self.path()));
            }
            warn!(position, expected = %open.element.name, found = name, "mismatched close event");
        }

        if let Some(frame) = self.stack.pop() {
            let element = self.finish(frame);
            self.attach(element);
        }
        Ok(true)
    }

    /// Close whatever is still open once the events run out
    fn finish_open_elements(&mut self) -> Result<()> {
        if self.config.strict {
            if let Some(open) = self.stack.last() {
                return Err(Error::new(ErrorKind::UnterminatedElement {
                    name: open.element.name.clone(),
                })
                .at(open.opened_at)
                .in_path(self.path()));
            }
        }
        if !self.stack.is_empty() {
            warn!(
                open = self.stack.len(),
                innermost = ?self.stack.last().map(|frame| frame.opened_at),
                "unterminated elements, keeping partial nodes"
            );
        }
        while let Some(frame) = self.stack.pop() {
            let element = self.finish(frame);
            self.attach(element);
        }
        Ok(())
    }

    fn finish(&self, frame: Frame) -> Element {
        trace!(element = %frame.element.name, state = ?frame.state, "node closed");
        let mut element = frame.element;
        if self.config.collapses() {
            collapse_groups(&mut element.children);
        }
        element
    }

    fn attach(&mut self, element: Element) {
        match self.stack.last_mut() {
            Some(parent) => parent.on_child(element),
            None => self.forest.push(element),
        }
    }

    fn check_depth(&self, name: &str, position: usize) -> Result<()> {
        let max = self.config.max_depth;
        if max > 0 && self.stack.len() >= usize::from(max) {
            let path = format!("{}/{name}", self.path());
            return Err(Error::new(ErrorKind::MaxDepthExceeded { max })
                .at(position)
                .in_path(path.trim_start_matches('/')));
        }
        Ok(())
    }

    fn new_element(&self, name: &str, attributes: &Attributes, text: Option<&str>) -> Element {
        Element {
            name: name.to_string(),
            attributes: attributes.clone(),
            text: text.map(str::to_string),
            children: Self::empty_children(self.config),
        }
    }

    fn empty_children(config: Config) -> Children {
        if config.index_children_positionally {
            Children::positional()
        } else {
            Children::named()
        }
    }

    /// Names of the open elements joined with `/`
    fn path(&self) -> String {
        self.stack
            .iter()
            .map(|frame| frame.element.name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Build a forest from `events` using `config`
pub fn build(events: &[Event], config: Config) -> Result<Forest> {
    TreeBuilder::with_config(events, config).build()
}
