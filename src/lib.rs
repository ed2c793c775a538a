//! evtree: rebuild nested element trees from flat markup parse events
//!
//! A tokenizer reports markup as a flat list of open, close, complete and
//! character-data events. This crate turns that list back into a forest of
//! elements with attributes, accumulated text and children grouped by tag
//! name (or kept by position).
//!
//! # Examples
//! ```
//! use evtree::{build, Config, Event};
//!
//! # fn main() -> evtree::Result<()> {
//! let events = [Event::open("a"), Event::cdata("hi"), Event::close("a")];
//! let forest = build(&events, Config::default())?;
//! let text = forest.first("a").and_then(|a| a.text());
//! assert_eq!(text, Some("hi"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod event;
pub mod flatten;
pub mod formatter;
pub mod model;
pub mod script;
pub mod utils;

// Re-exports
pub use builder::{build, collapse, Config, TreeBuilder};
pub use error::{Error, ErrorKind, Result};
pub use event::{Attributes, Event, EventKind};
pub use flatten::flatten;
pub use model::{ChildGroup, Children, Element, Forest};
pub use script::{parse_script, write_script};
