//! Single-child group collapsing

use tracing::trace;

use crate::model::{ChildGroup, Children};

/// Replace every one-element group directly under `children` with the bare element.
/// Positional children have no groups and are left untouched.
pub fn collapse_groups(children: &mut Children) {
    let Children::Named(groups) = children else {
        return;
    };

    for (name, group) in groups.iter_mut() {
        if let ChildGroup::Sequence(elements) = group {
            if elements.len() != 1 {
                continue;
            }
            if let Some(element) = elements.pop() {
                trace!(name = %name, "collapsing single child group");
                *group = ChildGroup::Single(Box::new(element));
            }
        }
    }
}

/// Collapse one-element groups at every nesting level.
///
/// Applying this more than once has no further effect.
pub fn collapse(children: &mut Children) {
    let mut stack = vec![children];
    while let Some(children) = stack.pop() {
        collapse_groups(children);
        if let Children::Named(groups) = children {
            for group in groups.values_mut() {
                match group {
                    ChildGroup::Sequence(elements) => {
                        stack.extend(elements.iter_mut().map(|element| &mut element.children));
                    }
                    ChildGroup::Single(element) => stack.push(&mut element.children),
                }
            }
        }
    }
}
