use std::fmt;

use super::namespace::DRUGBANK_NS;

/// Namespace-qualified element or attribute name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    /// Resolved namespace URI (`None` for unqualified names)
    pub namespace: Option<String>,
    /// Local part of the name, without any prefix
    pub local: String,
}

impl QName {
    /// Name in the given namespace
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local: local.into(),
        }
    }

    /// Name without a namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    /// Name in the DrugBank namespace
    pub fn drugbank(local: impl Into<String>) -> Self {
        Self::new(DRUGBANK_NS, local)
    }
}

impl fmt::Display for QName {
    /// Clark notation: `{uri}local`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// A single attribute on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name
    pub name: QName,
    /// Unescaped attribute value
    pub value: String,
}

/// Read-only view of a tree node used by the path matcher.
///
/// Anything that can report its qualified tag, attributes, text and ordered
/// children can be queried with a [`FieldPath`](super::FieldPath).
pub trait XmlNode: Sized {
    /// Qualified tag of this node
    fn name(&self) -> &QName;

    /// Value of the attribute with the given qualified name
    fn attribute(&self, name: &QName) -> Option<&str>;

    /// Text content directly inside this node
    fn text(&self) -> Option<&str>;

    /// Child elements in document order
    fn children(&self) -> &[Self];
}

/// An owned XML element.
///
/// Every element owns its children outright, so `clone()` produces a fully
/// independent subtree: mutating a clone never reaches the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag
    pub name: QName,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Text before the first child (whitespace-only text of container elements is dropped)
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
    /// Text following this element's end tag, up to the next sibling or the
    /// parent's end tag. Whitespace-only tails are dropped.
    pub tail: Option<String>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            tail: None,
        }
    }

    /// Builder: add an unqualified attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(QName::local(name), value);
        self
    }

    /// Builder: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: set the text that follows this element inside its parent
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Builder: append a child
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, replacing an existing one with the same name
    pub fn set_attribute(&mut self, name: QName, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Append a child element
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Local tag name (namespace stripped)
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// Value of an unqualified attribute
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.namespace.is_none() && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Text with surrounding whitespace removed, `None` when empty
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// True if this element has at least one child element
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Total number of elements in this subtree, including `self`
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }

    /// Depth-first, document-order iterator over this subtree (including `self`)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl XmlNode for Element {
    fn name(&self) -> &QName {
        &self.name
    }

    fn attribute(&self, name: &QName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.value.as_str())
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Iterator returned by [`Element::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
