//! Line-oriented event scripts
//!
//! A script stores one event per line so event streams can live in files:
//!
//! ```text
//! # comments and blank lines are ignored
//! open p class="intro"
//! text hello\n
//! complete br
//! complete img src='a.png' | "alt text"
//! close p
//! ```
//!
//! Quoted values and `text` lines understand the escapes `\\`, `\n`, `\t`,
//! `\r`, `\"` and `\'`. A trailing `| "..."` on `open` or `complete` sets the
//! text carried by the tag event itself. Tag names and attribute keys that
//! are empty or hold whitespace, quotes, `=`, `|` or a backslash are written quoted.

use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::event::{Attributes, Event};

/// Read an event script
#[instrument(level = "debug", skip_all, fields(bytes = input.len()))]
pub fn parse_script(input: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = LineParser::new(line, index + 1).parse()?;
        events.push(event);
    }
    debug!(events = events.len(), "script parsed");
    Ok(events)
}

/// Write events as a script that [`parse_script`] reads back unchanged
pub fn write_script(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            Event::Open {
                name,
                attributes,
                text,
            } => write_tag(&mut out, "open", name, attributes, text.as_deref()),
            Event::Complete {
                name,
                attributes,
                text,
            } => write_tag(&mut out, "complete", name, attributes, text.as_deref()),
            Event::Close { name } => {
                out.push_str("close ");
                write_token(&mut out, name);
            }
            Event::CharacterData { text } => {
                out.push_str("text ");
                escape_into(&mut out, text, false);
            }
        }
        out.push('\n');
    }
    out
}

fn write_tag(
    out: &mut String,
    directive: &str,
    name: &str,
    attrs: &Attributes,
    text: Option<&str>,
) {
    let _ = write!(out, "{directive} ");
    write_token(out, name);
    for (key, value) in attrs {
        out.push(' ');
        write_token(out, key);
        out.push_str("=\"");
        escape_into(out, value, true);
        out.push('"');
    }
    if let Some(text) = text {
        out.push_str(" | \"");
        escape_into(out, text, true);
        out.push('"');
    }
}

/// Stops an unquoted name or key
fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '=' | '"' | '\'' | '|' | '\\')
}

/// Write a name or key bare when it reads back unchanged, quoted otherwise
fn write_token(out: &mut String, token: &str) {
    if !token.is_empty() && !token.contains(is_delimiter) {
        out.push_str(token);
        return;
    }
    out.push('"');
    escape_into(out, token, true);
    out.push('"');
}

fn escape_into(out: &mut String, value: &str, quoted: bool) {
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '"' if quoted => out.push_str("\\\""),
            c => out.push(c),
        }
    }
}

/// Parser for one non-empty script line
struct LineParser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> LineParser<'a> {
    fn new(line: &'a str, number: usize) -> Self {
        Self {
            chars: line.chars().peekable(),
            line: number,
        }
    }

    fn parse(mut self) -> Result<Event> {
        let directive = self.parse_word(|_| false);
        match directive.as_str() {
            "open" | "complete" => {
                let name = self.parse_name()?;
                let attributes = self.parse_attributes()?;
                let text = self.parse_tag_text()?;
                self.expect_end()?;
                if directive == "open" {
                    Ok(Event::Open {
                        name,
                        attributes,
                        text,
                    })
                } else {
                    Ok(Event::Complete {
                        name,
                        attributes,
                        text,
                    })
                }
            }
            "close" => {
                let name = self.parse_name()?;
                self.expect_end()?;
                Ok(Event::Close { name })
            }
            "text" => {
                // a single separator; further spaces belong to the text
                if self.chars.peek() == Some(&' ') {
                    self.chars.next();
                }
                let text = self.parse_escaped(None)?;
                Ok(Event::CharacterData { text })
            }
            "" => Err(self.error("expected a directive")),
            other => Err(self.error(&format!("unknown directive `{other}`"))),
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        self.skip_whitespace();
        self.parse_token("a tag name")
    }

    /// A bare word, or any quoted string
    fn parse_token(&mut self, what: &str) -> Result<String> {
        if matches!(self.chars.peek(), Some('"' | '\'')) {
            return self.parse_quoted();
        }
        let token = self.parse_word(is_delimiter);
        if token.is_empty() {
            return Err(self.error(&format!("expected {what}")));
        }
        Ok(token)
    }

    fn parse_attributes(&mut self) -> Result<Attributes> {
        let mut attrs = Attributes::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                None | Some('|') => break,
                Some(_) => {}
            }

            let key = self.parse_token("an attribute name")?;
            if self.chars.next() != Some('=') {
                return Err(self.error(&format!("expected `=` after attribute `{key}`")));
            }
            let value = self.parse_quoted()?;

            if attrs.contains_key(&key) {
                return Err(self.error(&format!("duplicate attribute `{key}`")));
            }
            attrs.insert(key, value);
        }
        Ok(attrs)
    }

    fn parse_tag_text(&mut self) -> Result<Option<String>> {
        if self.chars.peek() != Some(&'|') {
            return Ok(None);
        }
        self.chars.next();
        self.skip_whitespace();
        self.parse_quoted().map(Some)
    }

    fn parse_quoted(&mut self) -> Result<String> {
        match self.chars.next() {
            Some(quote @ ('"' | '\'')) => self.parse_escaped(Some(quote)),
            _ => Err(self.error("expected a quoted value")),
        }
    }

    /// Read up to the closing quote, or to the end of the line when unquoted
    fn parse_escaped(&mut self, quote: Option<char>) -> Result<String> {
        let mut value = String::new();
        while let Some(ch) = self.chars.next() {
            if Some(ch) == quote {
                return Ok(value);
            }
            if ch != '\\' {
                value.push(ch);
                continue;
            }
            match self.chars.next() {
                Some('\\') => value.push('\\'),
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('"') => value.push('"'),
                Some('\'') => value.push('\''),
                Some(other) => return Err(self.error(&format!("invalid escape `\\{other}`"))),
                None => return Err(self.error("dangling escape at end of line")),
            }
        }
        match quote {
            Some(_) => Err(self.error("unterminated quoted value")),
            None => Ok(value),
        }
    }

    fn parse_word(&mut self, stop: impl Fn(char) -> bool) -> String {
        let mut word = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || stop(ch) {
                break;
            }
            word.push(ch);
            self.chars.next();
        }
        word
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.chars.peek().copied() {
            None => Ok(()),
            Some(ch) => Err(self.error(&format!("unexpected `{ch}`"))),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|ch| ch.is_whitespace()) {
            self.chars.next();
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::with_message(
            ErrorKind::InvalidScript { line: self.line },
            format!("line {}: {message}", self.line),
        )
    }
}
