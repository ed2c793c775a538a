use super::{helpers, CommonFormatter, FormatConfig, Formatter};
use crate::model::{ChildGroup, Children, Element, Forest};

/// Renders a forest as JSON.
///
/// Elements become objects with `@attributes`, `#text` and one member per
/// child group; collapsed groups are bare objects. Positional children are
/// listed under `#children`, each carrying its tag as `#name`. A child group
/// whose name starts with `#`, `@` or `\` gets a leading `\` so it never
/// clashes with those reserved members.
pub struct JsonFormatter;

/// Member value still to be rendered
enum Value<'a> {
    Raw(String),
    Element(&'a Element),
    Array(&'a [Element], bool),
}

/// Pending output; nesting is expanded on an explicit stack
enum Task<'a> {
    Raw(String),
    Element {
        element: &'a Element,
        indent: usize,
        named: bool,
    },
    Array {
        elements: &'a [Element],
        indent: usize,
        named: bool,
    },
}

impl CommonFormatter for JsonFormatter {}

impl Formatter for JsonFormatter {
    fn format(&self, forest: &Forest, config: &FormatConfig) -> String {
        let mut stack = Vec::new();
        match forest {
            Children::Named(_) => {
                let members = Self::child_members(Vec::new(), forest, config);
                Self::push_object(&mut stack, members, 0, config);
            }
            Children::Positional(elements) => {
                Self::push_array(&mut stack, elements, 0, config, true);
            }
        }

        let mut out = String::new();
        while let Some(task) = stack.pop() {
            match task {
                Task::Raw(text) => out.push_str(&text),
                Task::Element {
                    element,
                    indent,
                    named,
                } => {
                    let members = Self::element_members(element, indent, config, named);
                    Self::push_object(&mut stack, members, indent, config);
                }
                Task::Array {
                    elements,
                    indent,
                    named,
                } => Self::push_array(&mut stack, elements, indent, config, named),
            }
        }
        out
    }
}

impl JsonFormatter {
    fn element_members<'a>(
        element: &'a Element,
        indent: usize,
        config: &FormatConfig,
        named: bool,
    ) -> Vec<(String, Value<'a>)> {
        let mut members = Vec::new();
        if named {
            members.push(("#name".to_string(), Value::Raw(Self::quote(&element.name))));
        }
        if !element.attributes.is_empty() || config.include_empty {
            members.push((
                "@attributes".to_string(),
                Value::Raw(Self::format_attributes(element, indent + 1, config)),
            ));
        }
        if let Some(text) = &element.text {
            members.push(("#text".to_string(), Value::Raw(Self::quote(text))));
        }
        Self::child_members(members, &element.children, config)
    }

    fn child_members<'a>(
        mut members: Vec<(String, Value<'a>)>,
        children: &'a Children,
        config: &FormatConfig,
    ) -> Vec<(String, Value<'a>)> {
        match children {
            Children::Named(groups) => {
                for (name, group) in groups {
                    let value = match group {
                        ChildGroup::Single(element) => Value::Element(element),
                        ChildGroup::Sequence(elements) => Value::Array(elements, false),
                    };
                    members.push((Self::group_key(name), value));
                }
            }
            Children::Positional(elements) => {
                if !elements.is_empty() || config.include_empty {
                    members.push(("#children".to_string(), Value::Array(elements, true)));
                }
            }
        }
        members
    }

    /// Key for a child group, escaped away from the reserved members
    fn group_key(name: &str) -> String {
        if name.starts_with(['#', '@', '\\']) {
            format!("\\{name}")
        } else {
            name.to_string()
        }
    }

    fn format_attributes(element: &Element, indent: usize, config: &FormatConfig) -> String {
        if element.attributes.is_empty() {
            return helpers::format_empty_object();
        }

        let (indent_str, inner_indent) = Self::create_indentation(indent, config);
        let items: Vec<String> = element
            .attributes
            .iter()
            .map(|(key, value)| {
                format!("{}{}: {}", inner_indent, Self::quote(key), Self::quote(value))
            })
            .collect();

        format!("{{\n{}\n{}}}", helpers::join_with_commas(items), indent_str)
    }

    /// Queue an object; tasks are pushed in reverse so the first member pops first
    fn push_object<'a>(
        stack: &mut Vec<Task<'a>>,
        members: Vec<(String, Value<'a>)>,
        indent: usize,
        config: &FormatConfig,
    ) {
        if members.is_empty() {
            stack.push(Task::Raw(helpers::format_empty_object()));
            return;
        }

        let (indent_str, inner_indent) = Self::create_indentation(indent, config);
        let mut tasks = vec![Task::Raw("{\n".to_string())];
        for (i, (key, value)) in members.into_iter().enumerate() {
            let separator = if i == 0 { "" } else { ",\n" };
            tasks.push(Task::Raw(format!(
                "{separator}{inner_indent}{}: ",
                Self::quote(&key)
            )));
            tasks.push(match value {
                Value::Raw(text) => Task::Raw(text),
                Value::Element(element) => Task::Element {
                    element,
                    indent: indent + 1,
                    named: false,
                },
                Value::Array(elements, named) => Task::Array {
                    elements,
                    indent: indent + 1,
                    named,
                },
            });
        }
        tasks.push(Task::Raw(format!("\n{indent_str}}}")));
        stack.extend(tasks.into_iter().rev());
    }

    fn push_array<'a>(
        stack: &mut Vec<Task<'a>>,
        elements: &'a [Element],
        indent: usize,
        config: &FormatConfig,
        named: bool,
    ) {
        if elements.is_empty() {
            stack.push(Task::Raw(helpers::format_empty_array()));
            return;
        }

        let (indent_str, inner_indent) = Self::create_indentation(indent, config);
        let mut tasks = vec![Task::Raw("[\n".to_string())];
        for (i, element) in elements.iter().enumerate() {
            let separator = if i == 0 { "" } else { ",\n" };
            tasks.push(Task::Raw(format!("{separator}{inner_indent}")));
            tasks.push(Task::Element {
                element,
                indent: indent + 1,
                named,
            });
        }
        tasks.push(Task::Raw(format!("\n{indent_str}]")));
        stack.extend(tasks.into_iter().rev());
    }
}
