//! Relative path expressions over [`XmlNode`] trees.
//!
//! The accepted syntax is the small subset of the ElementTree path language
//! needed to address fields inside a record:
//!
//! ```text
//! db:targets/db:target              child steps with a bound prefix
//! db:drugbank-id[@primary='true']   attribute predicate
//! .//db:name                        any descendant
//! {http://www.drugbank.ca}name      Clark notation
//! db:*  *  .                        wildcards and self
//! db:synonym[2]  db:x[db:y='v']     position and child-text predicates
//! ```

use std::collections::HashSet;
use std::fmt;

use super::element::{QName, XmlNode};
use super::namespace::Namespaces;
use super::PathError;

/// A compiled relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    source: String,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    SelfNode,
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    AnyIn(Option<String>),
    Name(QName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    HasAttribute(QName),
    AttributeEquals(QName, String),
    HasChild(NameTest),
    ChildTextEquals(NameTest, String),
    Position(usize),
}

impl NameTest {
    fn matches(&self, name: &QName) -> bool {
        match self {
            NameTest::Any => true,
            NameTest::AnyIn(ns) => &name.namespace == ns,
            NameTest::Name(expected) => expected == name,
        }
    }
}

impl FieldPath {
    /// Compile `expr`, resolving prefixes against `namespaces`
    pub fn parse(expr: &str, namespaces: &Namespaces) -> Result<Self, PathError> {
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }
        if trimmed.starts_with('/') {
            return Err(PathError::InvalidStep(format!(
                "absolute paths are not supported: {}",
                trimmed
            )));
        }

        let tokens = split_steps(trimmed);
        let mut steps = Vec::with_capacity(tokens.len());
        let mut descendant = false;

        for (i, token) in tokens.iter().enumerate() {
            if token.is_empty() {
                // `a//b` splits into ["a", "", "b"]
                if i == tokens.len() - 1 || descendant {
                    return Err(PathError::EmptyStep(trimmed.to_string()));
                }
                descendant = true;
                continue;
            }

            let (test_src, predicate_srcs) = split_predicates(token)?;
            let (axis, test) = if test_src == "." {
                (Axis::SelfNode, NameTest::Any)
            } else {
                let axis = if descendant { Axis::Descendant } else { Axis::Child };
                (axis, parse_name_test(test_src, trimmed, namespaces)?)
            };
            let predicates = predicate_srcs
                .iter()
                .map(|p| parse_predicate(p, trimmed, namespaces))
                .collect::<Result<Vec<_>, _>>()?;

            steps.push(Step {
                axis,
                test,
                predicates,
            });
            descendant = false;
        }

        Ok(Self {
            source: trimmed.to_string(),
            steps,
        })
    }

    /// The expression this path was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// All matches relative to `node`, in document order
    pub fn select<'a, N: XmlNode>(&self, node: &'a N) -> Vec<&'a N> {
        let mut current = vec![node];

        for step in &self.steps {
            let mut next = Vec::new();
            let mut seen: HashSet<*const N> = HashSet::new();

            for context in current {
                let candidates: Vec<&'a N> = match step.axis {
                    Axis::SelfNode => apply_predicates(&step.predicates, vec![context]),
                    Axis::Child => apply_predicates(
                        &step.predicates,
                        context
                            .children()
                            .iter()
                            .filter(|c| step.test.matches(c.name()))
                            .collect(),
                    ),
                    Axis::Descendant => select_descendants(context, step),
                };

                for candidate in candidates {
                    if seen.insert(candidate as *const N) {
                        next.push(candidate);
                    }
                }
            }

            if next.is_empty() {
                return next;
            }
            current = next;
        }

        current
    }

    /// First match relative to `node`
    pub fn first<'a, N: XmlNode>(&self, node: &'a N) -> Option<&'a N> {
        self.select(node).into_iter().next()
    }

    /// Text of the first match; `None` if nothing matches or it has no text
    pub fn first_text<'a, N: XmlNode>(&self, node: &'a N) -> Option<&'a str> {
        self.first(node).and_then(|n| n.text())
    }

    /// Text of every match, keeping `None` for matches without text
    pub fn texts<'a, N: XmlNode>(&self, node: &'a N) -> Vec<Option<&'a str>> {
        self.select(node).into_iter().map(|n| n.text()).collect()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Descendants matching `step`, in document order.
///
/// Predicates are evaluated per group of siblings, so `[n]` picks the n-th
/// match under each parent rather than the n-th match overall.
fn select_descendants<'a, N: XmlNode>(context: &'a N, step: &Step) -> Vec<&'a N> {
    let mut ordered = Vec::new();
    let mut groups = Vec::new();
    collect_descendants(context, &step.test, &mut ordered, &mut groups);
    if step.predicates.is_empty() {
        return ordered;
    }

    let kept: HashSet<*const N> = groups
        .into_iter()
        .flat_map(|siblings| apply_predicates(&step.predicates, siblings))
        .map(|n| n as *const N)
        .collect();
    ordered
        .into_iter()
        .filter(|n| kept.contains(&(*n as *const N)))
        .collect()
}

fn collect_descendants<'a, N: XmlNode>(
    node: &'a N,
    test: &NameTest,
    ordered: &mut Vec<&'a N>,
    groups: &mut Vec<Vec<&'a N>>,
) {
    let mut siblings = Vec::new();
    for child in node.children() {
        if test.matches(child.name()) {
            ordered.push(child);
            siblings.push(child);
        }
        collect_descendants(child, test, ordered, groups);
    }
    if !siblings.is_empty() {
        groups.push(siblings);
    }
}

fn apply_predicates<'a, N: XmlNode>(predicates: &[Predicate], candidates: Vec<&'a N>) -> Vec<&'a N> {
    predicates
        .iter()
        .fold(candidates, |acc, predicate| apply_predicate(predicate, acc))
}

fn apply_predicate<'a, N: XmlNode>(predicate: &Predicate, candidates: Vec<&'a N>) -> Vec<&'a N> {
    match predicate {
        Predicate::Position(n) => candidates.into_iter().skip(n - 1).take(1).collect(),
        Predicate::HasAttribute(name) => candidates
            .into_iter()
            .filter(|c| c.attribute(name).is_some())
            .collect(),
        Predicate::AttributeEquals(name, value) => candidates
            .into_iter()
            .filter(|c| c.attribute(name) == Some(value.as_str()))
            .collect(),
        Predicate::HasChild(test) => candidates
            .into_iter()
            .filter(|c| c.children().iter().any(|gc| test.matches(gc.name())))
            .collect(),
        Predicate::ChildTextEquals(test, value) => candidates
            .into_iter()
            .filter(|c| {
                c.children()
                    .iter()
                    .any(|gc| test.matches(gc.name()) && gc.text().unwrap_or("") == value)
            })
            .collect(),
    }
}

/// Split on `/` outside of `[...]` and `{...}`
fn split_steps(expr: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in expr.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'') | (None, '"') => quote = Some(ch),
            (None, '[') | (None, '{') => depth += 1,
            (None, ']') | (None, '}') => depth = depth.saturating_sub(1),
            (None, '/') if depth == 0 => {
                tokens.push(&expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(&expr[start..]);
    tokens
}

/// Separate `name[p1][p2]` into `name` and `["p1", "p2"]`
fn split_predicates(token: &str) -> Result<(&str, Vec<&str>), PathError> {
    let name_end = match token.find('{') {
        // Clark names may not contain '[' inside the URI, so skip past '}'
        Some(0) => token
            .find('}')
            .and_then(|close| token[close..].find('[').map(|i| close + i))
            .unwrap_or(token.len()),
        _ => token.find('[').unwrap_or(token.len()),
    };

    let name = &token[..name_end];
    let mut rest = &token[name_end..];
    let mut predicates = Vec::new();

    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(PathError::InvalidStep(token.to_string()));
        }
        let close = find_closing_bracket(rest)
            .ok_or_else(|| PathError::InvalidPredicate(rest.to_string()))?;
        predicates.push(&rest[1..close]);
        rest = &rest[close + 1..];
    }

    if name.is_empty() {
        return Err(PathError::InvalidStep(token.to_string()));
    }
    Ok((name, predicates))
}

fn find_closing_bracket(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in s.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'') | (None, '"') => quote = Some(ch),
            (None, ']') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_name_test(src: &str, path: &str, namespaces: &Namespaces) -> Result<NameTest, PathError> {
    if src == "*" {
        return Ok(NameTest::Any);
    }
    if src == ".." {
        return Err(PathError::InvalidStep(
            "parent steps are not supported".to_string(),
        ));
    }

    let name = parse_qname(src, path, namespaces)?;
    if name.local == "*" {
        return Ok(NameTest::AnyIn(name.namespace));
    }
    if name.local.is_empty() || name.local.contains(['[', ']', '@', '=', '\'', '"']) {
        return Err(PathError::InvalidStep(src.to_string()));
    }
    Ok(NameTest::Name(name))
}

fn parse_qname(src: &str, path: &str, namespaces: &Namespaces) -> Result<QName, PathError> {
    if let Some(rest) = src.strip_prefix('{') {
        let (uri, local) = rest
            .split_once('}')
            .ok_or_else(|| PathError::InvalidStep(src.to_string()))?;
        return Ok(QName::new(uri, local));
    }

    match src.split_once(':') {
        Some((prefix, local)) => {
            let uri = namespaces
                .resolve(prefix)
                .ok_or_else(|| PathError::UnknownPrefix {
                    prefix: prefix.to_string(),
                    path: path.to_string(),
                })?;
            Ok(QName::new(uri, local))
        }
        None => Ok(QName::local(src)),
    }
}

fn parse_predicate(src: &str, path: &str, namespaces: &Namespaces) -> Result<Predicate, PathError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(PathError::InvalidPredicate(src.to_string()));
    }

    if src.bytes().all(|b| b.is_ascii_digit()) {
        let position: usize = src
            .parse()
            .map_err(|_| PathError::InvalidPredicate(src.to_string()))?;
        if position == 0 {
            return Err(PathError::InvalidPredicate(src.to_string()));
        }
        return Ok(Predicate::Position(position));
    }

    let (lhs, value) = match src.split_once('=') {
        Some((lhs, rhs)) => (lhs.trim(), Some(unquote(rhs.trim()).ok_or_else(|| {
            PathError::InvalidPredicate(src.to_string())
        })?)),
        None => (src, None),
    };

    if let Some(attr) = lhs.strip_prefix('@') {
        if attr.is_empty() {
            return Err(PathError::InvalidPredicate(src.to_string()));
        }
        let name = parse_qname(attr, path, namespaces)?;
        return Ok(match value {
            Some(v) => Predicate::AttributeEquals(name, v.to_string()),
            None => Predicate::HasAttribute(name),
        });
    }

    let test = parse_name_test(lhs, path, namespaces)
        .map_err(|_| PathError::InvalidPredicate(src.to_string()))?;
    Ok(match value {
        Some(v) => Predicate::ChildTextEquals(test, v.to_string()),
        None => Predicate::HasChild(test),
    })
}

fn unquote(s: &str) -> Option<&str> {
    let first = s.chars().next()?;
    if (first == '\'' || first == '"') && s.len() >= 2 && s.ends_with(first) {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}
