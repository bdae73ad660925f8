use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use super::element::{Attribute, Element, QName};
use super::TreeError;

/// Builds an owned [`Element`] tree from a namespace-aware quick-xml reader.
///
/// Namespaces are resolved from the document's own `xmlns` declarations into
/// URIs on every [`QName`]; prefixes are not kept. The loader reads the whole
/// document into memory before returning.
pub struct TreeLoader<R: BufRead> {
    reader: NsReader<R>,
}

impl TreeLoader<BufReader<File>> {
    /// Open a file for loading
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TreeError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<'a> TreeLoader<&'a [u8]> {
    /// Load from an in-memory string
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl<R: BufRead> TreeLoader<R> {
    /// Create a new loader from a BufRead source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = NsReader::from_reader(reader);
        xml_reader.config_mut().trim_text(false);
        Self { reader: xml_reader }
    }

    /// Consume the input and return the document root
    pub fn load(mut self) -> Result<Element, TreeError> {
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let element = self.element_from_start(e)?;
                    stack.push(element);
                }
                Event::Empty(ref e) => {
                    let element = self.element_from_start(e)?;
                    close_element(element, &mut stack, &mut root)?;
                }
                Event::Text(ref t) => {
                    let text = t.unescape()?;
                    append_text(&mut stack, &text)?;
                }
                Event::CData(ref c) => {
                    let text = std::str::from_utf8(c)?;
                    append_text(&mut stack, text)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        TreeError::InvalidStructure("End tag without matching start".to_string())
                    })?;
                    close_element(element, &mut stack, &mut root)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(TreeError::InvalidStructure(format!(
                "Unexpected EOF inside <{}>",
                open.name.local
            )));
        }

        let root = root
            .ok_or_else(|| TreeError::InvalidStructure("Document has no root element".to_string()))?;
        debug!(
            "Loaded <{}> with {} elements",
            root.name.local,
            root.subtree_len()
        );
        Ok(root)
    }

    /// Build an element (name and attributes, no content) from a start tag
    fn element_from_start(&self, start: &BytesStart) -> Result<Element, TreeError> {
        let (resolved, local) = self.reader.resolve_element(start.name());
        let mut element = Element::new(QName {
            namespace: namespace_uri(resolved)?,
            local: std::str::from_utf8(local.as_ref())?.to_string(),
        });

        for attr in start.attributes() {
            let attr = attr?;
            // xmlns declarations are resolved into names, not kept as attributes
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let (resolved, local) = self.reader.resolve_attribute(attr.key);
            let name = QName {
                namespace: namespace_uri(resolved)?,
                local: std::str::from_utf8(local.as_ref())?.to_string(),
            };
            let value = attr
                .decode_and_unescape_value(self.reader.decoder())?
                .into_owned();
            element.attributes.push(Attribute { name, value });
        }

        Ok(element)
    }
}

fn namespace_uri(resolved: ResolveResult) -> Result<Option<String>, TreeError> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(std::str::from_utf8(ns.into_inner())?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(TreeError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

/// Text before the first child belongs to the open element; text after a
/// child is that child's tail.
fn append_text(stack: &mut [Element], text: &str) -> Result<(), TreeError> {
    match stack.last_mut() {
        Some(open) => {
            let slot = match open.children.last_mut() {
                Some(previous) => &mut previous.tail,
                None => &mut open.text,
            };
            slot.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(TreeError::InvalidStructure(
            "Text content outside the root element".to_string(),
        )),
    }
}

fn close_element(
    mut element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), TreeError> {
    // Indentation between child elements is not content
    if element.has_children() && element.trimmed_text().is_none() {
        element.text = None;
    }
    for child in &mut element.children {
        if child.tail.as_deref().is_some_and(|t| t.trim().is_empty()) {
            child.tail = None;
        }
    }

    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(TreeError::InvalidStructure(format!(
                "Multiple root elements: found <{}> after the root",
                element.name.local
            )))
        }
    }
    Ok(())
}
