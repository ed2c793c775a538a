//! Property-based tests for the tree builder
//!
//! These tests use proptest to verify:
//! 1. Building generated event streams yields the expected forest
//! 2. Roundtrip property: build(flatten(forest)) == forest
//! 3. Collapsing twice equals collapsing once
//! 4. Named and positional modes hold the same elements in the same order
//! 5. Arbitrary event streams never panic
//! 6. Event scripts read back exactly what was written

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use proptest::prelude::*;
use std::collections::BTreeMap;

use evtree::{
    build, collapse, flatten, parse_script, write_script, Attributes, Children, Config, Element,
    Event, EventKind, Forest,
};

/// Generated document node; `texts` are interleaved with the children
#[derive(Clone, Debug)]
struct Node {
    name: String,
    attributes: BTreeMap<String, String>,
    texts: Vec<String>,
    children: Vec<Node>,
    complete: bool,
}

impl Node {
    fn push_events(&self, events: &mut Vec<Event>) {
        let attributes = self.attributes.clone().into_iter().collect();
        if self.complete && self.children.is_empty() {
            events.push(Event::Complete {
                name: self.name.clone(),
                attributes,
                text: self.joined_text(),
            });
            return;
        }

        events.push(Event::Open {
            name: self.name.clone(),
            attributes,
            text: None,
        });
        let mut texts = self.texts.iter();
        for child in &self.children {
            if let Some(text) = texts.next() {
                events.push(Event::cdata(text.as_str()));
            }
            child.push_events(events);
        }
        for text in texts {
            events.push(Event::cdata(text.as_str()));
        }
        events.push(Event::close(self.name.as_str()));
    }

    fn joined_text(&self) -> Option<String> {
        if self.texts.is_empty() {
            None
        } else {
            Some(self.texts.concat())
        }
    }

    fn to_element(&self, positional: bool) -> Element {
        let mut element = Element::new(self.name.as_str());
        element.attributes = self.attributes.clone().into_iter().collect();
        element.text = self.joined_text();
        element.children = expected_forest(&self.children, positional);
        element
    }
}

fn to_events(nodes: &[Node]) -> Vec<Event> {
    let mut events = Vec::new();
    for node in nodes {
        node.push_events(&mut events);
    }
    events
}

fn expected_forest(nodes: &[Node], positional: bool) -> Forest {
    let mut forest = if positional {
        Children::positional()
    } else {
        Children::named()
    };
    for node in nodes {
        forest.push(node.to_element(positional));
    }
    forest
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "item"]).prop_map(str::to_string)
}

fn arb_attributes() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,3}", "[a-zA-Z0-9 \"]{0,6}", 0..3)
}

fn arb_texts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z \n]{0,5}", 0..3)
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = (arb_name(), arb_attributes(), arb_texts(), any::<bool>()).prop_map(
        |(name, attributes, texts, complete)| Node {
            name,
            attributes,
            texts,
            children: Vec::new(),
            complete,
        },
    );

    leaf.prop_recursive(5, 64, 5, |inner| {
        (
            arb_name(),
            arb_attributes(),
            arb_texts(),
            prop::collection::vec(inner, 0..5),
        )
            .prop_map(|(name, attributes, texts, children)| Node {
                name,
                attributes,
                texts,
                children,
                complete: false,
            })
    })
}

fn arb_document() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(arb_node(), 0..4)
}

fn arb_event() -> impl Strategy<Value = Event> {
    let name = prop::sample::select(vec!["a", "b"]);
    prop_oneof![
        name.clone().prop_map(Event::open),
        name.clone().prop_map(Event::close),
        name.prop_map(Event::complete),
        "[a-z]{0,3}".prop_map(Event::cdata),
    ]
}

fn arb_any_event() -> impl Strategy<Value = Event> {
    let attributes = prop::collection::vec((any::<String>(), any::<String>()), 0..3)
        .prop_map(|pairs| pairs.into_iter().collect::<Attributes>());
    let text = prop::option::of(any::<String>());
    prop_oneof![
        (any::<String>(), attributes.clone(), text.clone()).prop_map(|(name, attributes, text)| {
            Event::Open {
                name,
                attributes,
                text,
            }
        }),
        (any::<String>(), attributes, text).prop_map(|(name, attributes, text)| {
            Event::Complete {
                name,
                attributes,
                text,
            }
        }),
        any::<String>().prop_map(Event::close),
        any::<String>().prop_map(Event::cdata),
    ]
}

/// Walk named and positional children side by side
fn assert_modes_agree(named: &Children, positional: &Children) {
    assert_eq!(named.len(), positional.len());
    let names: Vec<&str> = positional.iter().map(|e| e.name.as_str()).collect();
    for name in names {
        let left = named.get(name);
        let right = positional.get(name);
        assert_eq!(left.len(), right.len(), "group {name}");
        for (l, r) in left.into_iter().zip(right) {
            assert_eq!(l.name, r.name);
            assert_eq!(l.attributes, r.attributes);
            assert_eq!(l.text, r.text);
            assert_modes_agree(&l.children, &r.children);
        }
    }
}

proptest! {
    /// Test that building a generated document reproduces its structure
    #[test]
    fn build_matches_document(doc in arb_document()) {
        let events = to_events(&doc);
        let forest = build(&events, Config::default()).unwrap();
        prop_assert_eq!(&forest, &expected_forest(&doc, false));

        let positional = build(&events, Config::default().with_positional(true)).unwrap();
        prop_assert_eq!(&positional, &expected_forest(&doc, true));
    }

    /// Test that every open or complete event yields exactly one element
    #[test]
    fn element_count_matches_events(doc in arb_document()) {
        let events = to_events(&doc);
        let tags = events
            .iter()
            .filter(|e| matches!(e.kind(), EventKind::Open | EventKind::Complete))
            .count();
        let forest = build(&events, Config::default().with_strict(true)).unwrap();
        prop_assert_eq!(forest.element_count(), tags);
    }

    /// Test that flattening then building returns the original forest
    #[test]
    fn flatten_roundtrip(
        doc in arb_document(),
        positional in any::<bool>(),
        collapsed in any::<bool>(),
    ) {
        let config = Config::default()
            .with_positional(positional)
            .with_collapse(collapsed);
        let forest = build(&to_events(&doc), config).unwrap();
        let rebuilt = build(&flatten(&forest), config).unwrap();
        prop_assert_eq!(rebuilt, forest);
    }

    /// Test that collapse is idempotent and matches collapsing while building
    #[test]
    fn collapse_idempotent(doc in arb_document()) {
        let events = to_events(&doc);
        let mut once = build(&events, Config::default()).unwrap();
        collapse(&mut once);
        let mut twice = once.clone();
        collapse(&mut twice);
        prop_assert_eq!(&once, &twice);

        let built = build(&events, Config::default().with_collapse(true)).unwrap();
        prop_assert_eq!(&built, &once);
    }

    /// Test that named and positional forests hold the same elements
    #[test]
    fn modes_agree(doc in arb_document()) {
        let events = to_events(&doc);
        let named = build(&events, Config::default()).unwrap();
        let positional = build(&events, Config::default().with_positional(true)).unwrap();
        assert_modes_agree(&named, &positional);
    }

    /// Test that arbitrary event streams build leniently without panicking
    #[test]
    fn arbitrary_events_never_panic(events in prop::collection::vec(arb_event(), 0..64)) {
        prop_assert!(build(&events, Config::default()).is_ok());
        let _result = build(&events, Config::default().with_strict(true));
    }

    /// Test that any event list survives a trip through the script format
    #[test]
    fn script_roundtrip(events in prop::collection::vec(arb_any_event(), 0..16)) {
        let script = write_script(&events);
        let parsed = parse_script(&script);
        prop_assert_eq!(parsed.ok(), Some(events), "script {:?}", script);
    }
}
