//! Tag filtering: the set of named tags scanned from the page, which
//! elements toggle them, and which items they show or hide.

use std::collections::BTreeSet;

use rand::Rng;
use rb_dom::{Document, NodeId};
use rb_entities::tag::{TagName, TagSet};

use crate::{hash, selectors, Result};

/// The hash query-string key owned by the tag manager.
pub const TAGS_PARAM: &str = "tags";

/// A named filter toggle and the elements displaying it.
#[derive(Debug, Default)]
pub struct Tag {
    is_active: bool,
    elements: Vec<NodeId>,
}

impl Tag {
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn toggle(&mut self) {
        self.is_active = !self.is_active;
    }

    fn refresh(&self, doc: &mut Document) {
        for &element in &self.elements {
            doc.set_class(element, selectors::CLASS_ACTIVE, self.is_active);
        }
    }
}

/// An item (e.g. one recipe card) annotated with the tag names found
/// within it. Immutable after construction.
#[derive(Debug)]
pub struct TaggedElement {
    element: NodeId,
    tags: TagSet,
}

impl TaggedElement {
    fn scan(doc: &Document, element: NodeId) -> Result<Self> {
        let mut tags = TagSet::new();
        for badge in doc.select_all_within(element, selectors::TAG)? {
            tags.insert(TagName::from(doc.text_content(badge)));
        }
        Ok(Self { element, tags })
    }

    pub const fn element(&self) -> NodeId {
        self.element
    }

    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }
}

/// Owns all tags and tagged items of a page. Tag entries keep their
/// first-seen scan order so that hash encoding stays deterministic.
#[derive(Debug, Default)]
pub struct TagManager {
    entries: Vec<(TagName, Tag)>,
    tagged: Vec<TaggedElement>,
}

impl TagManager {
    pub fn add_tag_element(&mut self, name: TagName, element: NodeId) {
        let index = match self.entries.iter().position(|(n, _)| *n == name) {
            Some(index) => index,
            None => {
                self.entries.push((name, Tag::default()));
                self.entries.len() - 1
            }
        };
        self.entries[index].1.elements.push(element);
    }

    pub fn add_tagged_element(&mut self, doc: &Document, element: NodeId) -> Result<()> {
        self.tagged.push(TaggedElement::scan(doc, element)?);
        Ok(())
    }

    pub fn tags(&self) -> impl Iterator<Item = (&TagName, &Tag)> {
        self.entries.iter().map(|(name, tag)| (name, tag))
    }

    pub fn tagged(&self) -> &[TaggedElement] {
        &self.tagged
    }

    pub fn is_any_active(&self) -> bool {
        self.entries.iter().any(|(_, tag)| tag.is_active)
    }

    pub fn active_names(&self) -> Vec<&TagName> {
        self.entries
            .iter()
            .filter(|(_, tag)| tag.is_active)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn toggle(&mut self, name: &TagName) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, tag)) => tag.toggle(),
            None => log::debug!("ignoring toggle of unknown tag {name}"),
        }
    }

    pub fn set_active(&mut self, name: &TagName, active: bool) {
        if let Some((_, tag)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            tag.set_active(active);
        }
    }

    pub fn deactivate_all(&mut self) {
        for (_, tag) in &mut self.entries {
            tag.set_active(false);
        }
    }

    /// AND semantics: an item matches iff its tag set contains every
    /// active tag name. With no active tags everything matches.
    pub fn matches(&self, tags: &TagSet) -> bool {
        self.entries
            .iter()
            .filter(|(_, tag)| tag.is_active)
            .all(|(name, _)| tags.contains(name))
    }

    /// Applies activation state to the document: `active` classes on tag
    /// elements, `hidden` on filtered-out items, and the visible count
    /// with its pluralized label where the page has a count element.
    /// Returns the number of visible items.
    pub fn refresh(&self, doc: &mut Document) -> Result<usize> {
        for (_, tag) in &self.entries {
            tag.refresh(doc);
        }
        let mut count = 0;
        for tagged in &self.tagged {
            let show = self.matches(&tagged.tags);
            doc.set_class(tagged.element, selectors::CLASS_HIDDEN, !show);
            if show {
                count += 1;
            }
        }
        if let Some(count_element) = doc.select(selectors::RECIPE_COUNT)? {
            if let Some(value) = doc.select_within(count_element, selectors::COUNT_VALUE)? {
                doc.set_text_content(value, &count.to_string());
            }
            if let Some(word) = doc.select_within(count_element, selectors::COUNT_WORD)? {
                let key = if count == 1 {
                    selectors::DATA_SINGULAR
                } else {
                    selectors::DATA_PLURAL
                };
                if let Some(label) = doc.dataset(word, key).map(str::to_owned) {
                    doc.set_text_content(word, &label);
                }
            }
        }
        Ok(count)
    }

    /// Uniform choice among the items passing the current filter.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NodeId> {
        let matching: Vec<_> = self
            .tagged
            .iter()
            .filter(|tagged| self.matches(&tagged.tags))
            .map(TaggedElement::element)
            .collect();
        if matching.is_empty() {
            return None;
        }
        Some(matching[rng.gen_range(0..matching.len())])
    }

    /// Writes the active tag set into the hash parameter list, leaving
    /// unrelated keys untouched.
    pub fn write_hash_params(&self, params: &mut Vec<(String, String)>) {
        if self.is_any_active() {
            let encoded = encode_tag_names(self.active_names().into_iter());
            hash::set_param(params, TAGS_PARAM, encoded);
        } else {
            hash::remove_param(params, TAGS_PARAM);
        }
    }

    /// Re-derives activation state from a hash fragment and refreshes the
    /// document. A missing or empty `tags` parameter deactivates all tags.
    pub fn apply_hash(&mut self, doc: &mut Document, hash_text: &str) -> Result<usize> {
        let params = hash::parse_params(hash_text);
        let names = decode_tag_names(hash::get_param(&params, TAGS_PARAM).unwrap_or(""));
        for (name, tag) in &mut self.entries {
            tag.set_active(names.contains(name));
        }
        self.refresh(doc)
    }
}

/// Comma-joins tag names, backslash-escaping `\` and `,` within names.
pub fn encode_tag_names<'a>(names: impl IntoIterator<Item = &'a TagName>) -> String {
    let mut encoded = String::new();
    for (i, name) in names.into_iter().enumerate() {
        if i > 0 {
            encoded.push(',');
        }
        for c in name.as_str().chars() {
            if c == '\\' || c == ',' {
                encoded.push('\\');
            }
            encoded.push(c);
        }
    }
    encoded
}

/// Reverses [`encode_tag_names`]: a single-pass scan with an escape flag.
pub fn decode_tag_names(text: &str) -> BTreeSet<TagName> {
    let mut names = BTreeSet::new();
    let mut escape = false;
    let mut current = String::new();
    for c in text.chars() {
        if escape {
            current.push(c);
            escape = false;
        } else if c == '\\' {
            escape = true;
        } else if c == ',' {
            names.insert(TagName::from(std::mem::take(&mut current)));
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        names.insert(TagName::from(current));
    }
    names
}
