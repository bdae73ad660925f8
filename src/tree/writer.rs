use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::element::{Element, QName};
use super::namespace::Namespaces;
use super::TreeError;

/// Namespace of the reserved `xml:` prefix, which is never declared
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Indentation width used for pretty-printed output
pub const INDENT_WIDTH: usize = 2;

/// Serializes an [`Element`] tree as an indented UTF-8 XML document.
///
/// Elements in the binding's default namespace are written unprefixed under a
/// single `xmlns="..."` on the root. Every other namespace in use is declared
/// once on the root, with the prefix from the binding table or a generated
/// `nsN` prefix.
pub struct TreeWriter<'a> {
    namespaces: &'a Namespaces,
}

/// Prefixes chosen for one document
struct PrefixMap {
    default_uri: String,
    uses_default: bool,
    prefixes: IndexMap<String, String>,
}

impl<'a> TreeWriter<'a> {
    /// Create a writer using `namespaces` for prefix selection
    pub fn new(namespaces: &'a Namespaces) -> Self {
        Self { namespaces }
    }

    /// Write `root` as a complete document (declaration included)
    pub fn write<W: Write>(&self, root: &Element, out: W) -> Result<(), TreeError> {
        let prefixes = self.assign_prefixes(root);
        let mut writer = Writer::new_with_indent(out, b' ', INDENT_WIDTH);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        write_element(&mut writer, root, &prefixes, true, false)?;

        let mut out = writer.into_inner();
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }

    /// Serialize `root` into a string
    pub fn to_xml_string(&self, root: &Element) -> Result<String, TreeError> {
        let mut buf = Vec::new();
        self.write(root, &mut buf)?;
        String::from_utf8(buf).map_err(|e| TreeError::Utf8Error(e.utf8_error()))
    }

    /// Write `root` to `path`.
    ///
    /// Output goes to a temporary file next to `path` that is renamed into
    /// place only once the document is complete.
    pub fn write_file<P: AsRef<Path>>(&self, root: &Element, path: P) -> Result<(), TreeError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut buffered = BufWriter::new(tmp.as_file());
            self.write(root, &mut buffered)?;
        }
        tmp.persist(path).map_err(|e| e.error)?;

        debug!("Wrote {} elements to {}", root.subtree_len(), path.display());
        Ok(())
    }

    fn assign_prefixes(&self, root: &Element) -> PrefixMap {
        let default_uri = self.namespaces.default_uri().to_string();
        // The default namespace can only be declared on a root that lives in it
        let uses_default = root.name.namespace.as_deref() == Some(default_uri.as_str());
        let mut needed: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for element in root.descendants() {
            match element.name.namespace.as_deref() {
                Some(ns) if uses_default && ns == default_uri => {}
                Some(ns) => {
                    if seen.insert(ns) {
                        needed.push(ns.to_string());
                    }
                }
                None => {}
            }
            for attr in &element.attributes {
                // Attributes never take the default namespace, even the DrugBank one
                if let Some(ns) = attr.name.namespace.as_deref() {
                    if seen.insert(ns) {
                        needed.push(ns.to_string());
                    }
                }
            }
        }

        let mut prefixes = IndexMap::new();
        let mut generated = 0usize;
        for uri in needed {
            let prefix = match self.namespaces.prefix_for(&uri) {
                _ if uri == XML_NS => "xml".to_string(),
                Some(p) => p.to_string(),
                None => loop {
                    let candidate = format!("ns{}", generated);
                    generated += 1;
                    if self.namespaces.resolve(&candidate).is_none() {
                        break candidate;
                    }
                },
            };
            prefixes.insert(uri, prefix);
        }

        PrefixMap {
            default_uri,
            uses_default,
            prefixes,
        }
    }
}

impl PrefixMap {
    fn element_tag(&self, name: &QName) -> String {
        match name.namespace.as_deref() {
            Some(ns) if self.uses_default && ns == self.default_uri => name.local.clone(),
            Some(ns) => self.prefixed(ns, &name.local),
            None => name.local.clone(),
        }
    }

    fn attribute_key(&self, name: &QName) -> String {
        match name.namespace.as_deref() {
            Some(ns) => self.prefixed(ns, &name.local),
            None => name.local.clone(),
        }
    }

    fn prefixed(&self, ns: &str, local: &str) -> String {
        match self.prefixes.get(ns) {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        }
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    prefixes: &PrefixMap,
    is_root: bool,
    default_in_scope: bool,
) -> Result<(), TreeError> {
    let tag = prefixes.element_tag(&element.name);
    let mut start = BytesStart::new(tag.as_str());
    let mut default_in_scope = default_in_scope;

    if is_root {
        if prefixes.uses_default {
            start.push_attribute(("xmlns", prefixes.default_uri.as_str()));
            default_in_scope = true;
        }
        for (uri, prefix) in &prefixes.prefixes {
            if prefix == "xml" {
                continue;
            }
            let key = format!("xmlns:{}", prefix);
            start.push_attribute((key.as_str(), uri.as_str()));
        }
    }

    // Unqualified elements must not inherit the default namespace
    if element.name.namespace.is_none() && default_in_scope {
        start.push_attribute(("xmlns", ""));
        default_in_scope = false;
    }

    for attr in &element.attributes {
        let key = prefixes.attribute_key(&attr.name);
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        if let Some(text) = &element.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &element.children {
            write_element(writer, child, prefixes, false, default_in_scope)?;
        }
        writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
    }

    // Tail text follows the end tag
    if let Some(tail) = &element.tail {
        writer.write_event(Event::Text(BytesText::new(tail)))?;
    }
    Ok(())
}
