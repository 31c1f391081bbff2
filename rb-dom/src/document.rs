use std::collections::HashMap;

use crate::selector::{ParseSelectorError, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct ElementData {
    tag_name: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
}

#[derive(Debug, Clone)]
enum NodeData {
    Root,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// An element arena addressed by [`NodeId`] indices. Nodes are never freed
/// within a document lifetime; detached nodes simply become unreachable
/// from the root, mirroring how the page holds on to its elements.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Root,
            }],
        }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append_element(&mut self, parent: NodeId, tag_name: &str) -> NodeId {
        self.append_node(
            parent,
            NodeData::Element(ElementData {
                tag_name: tag_name.to_owned(),
                id: None,
                classes: Vec::new(),
                attrs: HashMap::new(),
            }),
        )
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append_node(parent, NodeData::Text(text.to_owned()))
    }

    fn append_node(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag_name.as_str())
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.element(node)?.id.as_deref()
    }

    pub fn set_element_id(&mut self, node: NodeId, id: &str) {
        if let Some(element) = self.element_mut(node) {
            element.id = Some(id.to_owned());
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.set_class(node, class, true);
    }

    /// Adds or removes `class`, like `classList.toggle(class, force)`.
    pub fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let present = element.classes.iter().position(|c| c == class);
        match (present, on) {
            (None, true) => element.classes.push(class.to_owned()),
            (Some(index), false) => {
                element.classes.remove(index);
            }
            _ => {}
        }
    }

    /// Flips `class` and returns whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let on = !self.has_class(node, class);
        self.set_class(node, class, on);
        on
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    /// Reads a `data-*` attribute by its camelCase dataset key, e.g.
    /// `dataset(node, "tagName")` reads `data-tag-name`.
    pub fn dataset(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attr(node, &dataset_attr_name(key))
    }

    pub fn set_dataset(&mut self, node: NodeId, key: &str, value: &str) {
        self.set_attr(node, &dataset_attr_name(key), value);
    }

    /// Concatenated text of the node and all its descendants, in document
    /// order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn collect_text(&self, node: NodeId, text: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(chunk) => text.push_str(chunk),
            NodeData::Root | NodeData::Element(_) => {
                for &child in &self.nodes[node.0].children {
                    self.collect_text(child, text);
                }
            }
        }
    }

    /// Replaces all children with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.append_text(node, text);
    }

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        selector.matches(self, node)
    }

    pub fn select(&self, selector: &str) -> Result<Option<NodeId>, ParseSelectorError> {
        self.select_within(self.root(), selector)
    }

    pub fn select_all(&self, selector: &str) -> Result<Vec<NodeId>, ParseSelectorError> {
        self.select_all_within(self.root(), selector)
    }

    /// First matching element among the descendants of `scope`, in document
    /// order. Combinators may still be satisfied by ancestors above the
    /// scope, as in the browser's scoped `querySelector`.
    pub fn select_within(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, ParseSelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.descendants(scope).find(|&node| selector.matches(self, node)))
    }

    pub fn select_all_within(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, ParseSelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .filter(|&node| selector.matches(self, node))
            .collect())
    }

    fn descendants(&self, scope: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.nodes[scope.0]
                .children
                .iter()
                .rev()
                .copied()
                .collect(),
        }
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.nodes[node.0].data {
            NodeData::Element(element) => Some(element),
            NodeData::Root | NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[node.0].data {
            NodeData::Element(element) => Some(element),
            NodeData::Root | NodeData::Text(_) => None,
        }
    }
}

/// Depth-first document-order traversal, elements only.
#[derive(Debug)]
struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let node = self.stack.pop()?;
            self.stack
                .extend(self.doc.nodes[node.0].children.iter().rev().copied());
            if self.doc.element(node).is_some() {
                return Some(node);
            }
        }
    }
}

fn dataset_attr_name(key: &str) -> String {
    let mut name = String::from("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}
