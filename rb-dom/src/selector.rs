use std::{iter::Peekable, str::Chars};

use thiserror::Error;

use crate::document::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

/// One simple selector sequence, e.g. `ul`, `.tag` or `li.active#top`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    tag_name: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag_name.is_none() && self.id.is_none() && self.classes.is_empty()
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag_name) = doc.tag_name(node) else {
            return false;
        };
        if let Some(expected) = &self.tag_name {
            if !tag_name.eq_ignore_ascii_case(expected) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.element_id(node) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| doc.has_class(node, class))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSelectorError {
    #[error("empty selector")]
    Empty,
    #[error("dangling combinator")]
    DanglingCombinator,
    #[error("unexpected character {0:?} in selector")]
    UnexpectedChar(char),
}

/// A parsed selector: compounds joined right-to-left by combinators. The
/// combinator stored with a compound relates it to the compound before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<(Combinator, Compound)>,
}

impl Selector {
    pub fn parse(text: &str) -> Result<Self, ParseSelectorError> {
        let mut parts = Vec::new();
        let mut pending_child = false;
        let mut chars = text.chars().peekable();
        loop {
            while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
                chars.next();
            }
            match chars.peek() {
                None => break,
                Some('>') => {
                    chars.next();
                    if parts.is_empty() || pending_child {
                        return Err(ParseSelectorError::DanglingCombinator);
                    }
                    pending_child = true;
                }
                Some(_) => {
                    let compound = parse_compound(&mut chars)?;
                    let combinator = if pending_child {
                        Combinator::Child
                    } else {
                        Combinator::Descendant
                    };
                    parts.push((combinator, compound));
                    pending_child = false;
                }
            }
        }
        if pending_child {
            return Err(ParseSelectorError::DanglingCombinator);
        }
        if parts.is_empty() {
            return Err(ParseSelectorError::Empty);
        }
        Ok(Self { parts })
    }

    /// Whether `node` matches the rightmost compound with all combinators
    /// satisfied by its ancestor chain.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        matches_parts(doc, &self.parts, node)
    }
}

fn matches_parts(doc: &Document, parts: &[(Combinator, Compound)], node: NodeId) -> bool {
    let Some(((combinator, compound), rest)) = parts.split_last() else {
        return true;
    };
    if !compound.matches(doc, node) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    match combinator {
        Combinator::Child => doc
            .parent(node)
            .is_some_and(|parent| matches_parts(doc, rest, parent)),
        Combinator::Descendant => {
            let mut ancestor = doc.parent(node);
            while let Some(candidate) = ancestor {
                if matches_parts(doc, rest, candidate) {
                    return true;
                }
                ancestor = doc.parent(candidate);
            }
            false
        }
    }
}

fn parse_compound(chars: &mut Peekable<Chars<'_>>) -> Result<Compound, ParseSelectorError> {
    let mut compound = Compound::default();
    loop {
        match chars.peek().copied() {
            Some('.') => {
                chars.next();
                let class = parse_identifier(chars)?;
                compound.classes.push(class);
            }
            Some('#') => {
                chars.next();
                compound.id = Some(parse_identifier(chars)?);
            }
            Some(c) if is_identifier_char(c) => {
                if !compound.is_empty() {
                    return Err(ParseSelectorError::UnexpectedChar(c));
                }
                compound.tag_name = Some(parse_identifier(chars)?);
            }
            Some(c) if c.is_whitespace() || c == '>' => break,
            Some(c) => return Err(ParseSelectorError::UnexpectedChar(c)),
            None => break,
        }
    }
    Ok(compound)
}

fn parse_identifier(chars: &mut Peekable<Chars<'_>>) -> Result<String, ParseSelectorError> {
    let mut identifier = String::new();
    while let Some(&c) = chars.peek() {
        if !is_identifier_char(c) {
            break;
        }
        identifier.push(c);
        chars.next();
    }
    if identifier.is_empty() {
        return Err(ParseSelectorError::UnexpectedChar(
            chars.peek().copied().unwrap_or(' '),
        ));
    }
    Ok(identifier)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
