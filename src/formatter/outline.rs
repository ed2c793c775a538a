use std::fmt::Write as _;

use super::{CommonFormatter, FormatConfig, Formatter};
use crate::model::{Element, Forest};

/// Renders one line per element, indented by depth:
/// `name key="value": "text"`
pub struct OutlineFormatter;

impl CommonFormatter for OutlineFormatter {}

impl Formatter for OutlineFormatter {
    fn format(&self, forest: &Forest, config: &FormatConfig) -> String {
        let mut out = String::new();
        let mut stack: Vec<(&Element, usize)> = Vec::new();
        Self::push_children(&mut stack, forest, 0);

        while let Some((element, depth)) = stack.pop() {
            let (indent, _) = Self::create_indentation(depth, config);
            let _ = write!(out, "{indent}{}", element.name);
            for (key, value) in &element.attributes {
                let _ = write!(out, " {key}={}", Self::quote(value));
            }
            if let Some(text) = &element.text {
                let _ = write!(out, ": {}", Self::quote(text));
            }
            out.push('\n');
            Self::push_children(&mut stack, &element.children, depth + 1);
        }
        out
    }
}

impl OutlineFormatter {
    fn push_children<'a>(
        stack: &mut Vec<(&'a Element, usize)>,
        children: &'a Forest,
        depth: usize,
    ) {
        let elements: Vec<&Element> = children.iter().collect();
        stack.extend(elements.into_iter().rev().map(|element| (element, depth)));
    }
}
