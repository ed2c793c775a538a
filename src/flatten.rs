//! Forest to event sequence serialization
//!
//! Each element becomes `Open`, one `CharacterData` for its text when it has
//! any, its children in stored order, then `Close`. Building the result again
//! with the same configuration yields the original forest.

use crate::event::Event;
use crate::model::{Element, Forest};

enum Step<'a> {
    Enter(&'a Element),
    Exit(&'a Element),
}

/// Flatten a forest back into events
pub fn flatten(forest: &Forest) -> Vec<Event> {
    let mut events = Vec::with_capacity(forest.element_count() * 3);
    let mut stack: Vec<Step<'_>> = Vec::new();
    push_children(&mut stack, forest);

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(element) => {
                events.push(Event::Open {
                    name: element.name.clone(),
                    attributes: element.attributes.clone(),
                    text: None,
                });
                if let Some(text) = &element.text {
                    events.push(Event::cdata(text.as_str()));
                }
                stack.push(Step::Exit(element));
                push_children(&mut stack, &element.children);
            }
            Step::Exit(element) => events.push(Event::close(element.name.as_str())),
        }
    }

    events
}

/// Push children so the first one is popped first
fn push_children<'a>(stack: &mut Vec<Step<'a>>, children: &'a Forest) {
    let elements: Vec<&Element> = children.iter().collect();
    stack.extend(elements.into_iter().rev().map(Step::Enter));
}
