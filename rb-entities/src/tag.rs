use std::{borrow::Borrow, collections::BTreeSet, fmt};

/// The name of a filter tag, exactly as displayed on its badge.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TagName(String);

impl TagName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TagName {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for TagName {
    fn from(from: &str) -> Self {
        Self(from.to_owned())
    }
}

impl Borrow<str> for TagName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of tag names carried by one tagged item.
pub type TagSet = BTreeSet<TagName>;
