//! Keys for the execution context.

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Opaque key under which a value is stored in an
/// [`ExecutionContext`](super::ExecutionContext).
///
/// Tags compare and hash like their string form, so lookups accept plain
/// `&str` as well as `Tag` values. Constant tags can be declared with
/// [`Tag::from_static`]:
///
/// ```
/// use phasegraph::context::Tag;
///
/// const ORDER_ID: Tag = Tag::from_static("order-id");
/// assert_eq!(ORDER_ID.as_str(), "order-id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// Create a tag from an owned or borrowed string.
    pub fn new(name: impl Into<String>) -> Self {
        Tag(Cow::Owned(name.into()))
    }

    /// Create a tag from a string literal, usable in `const` items.
    pub const fn from_static(name: &'static str) -> Self {
        Tag(Cow::Borrowed(name))
    }

    /// The tag's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Tag {
    fn from(name: &'static str) -> Self {
        Tag::from_static(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag(Cow::Owned(name))
    }
}

impl From<&String> for Tag {
    fn from(name: &String) -> Self {
        Tag::new(name.as_str())
    }
}
