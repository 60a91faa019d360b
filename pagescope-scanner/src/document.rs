//! Read-only node tree the extractors walk.
//!
//! Nodes live in a flat arena and refer to their children by index, so every
//! traversal in this crate runs on an explicit stack and never recurses,
//! whatever the nesting depth of the page.

use scraper::Html;

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<NodeId>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Element(el) => &el.children,
            Node::Text(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Parse markup leniently. Malformed input still yields a best-effort
    /// tree; doctype, comment and processing-instruction nodes are dropped.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut doc = Document::default();

        // (source node, arena parent of the node once converted)
        let mut stack = vec![(parsed.tree.root(), None::<NodeId>)];

        while let Some((source, parent)) = stack.pop() {
            let converted = match source.value() {
                scraper::Node::Element(el) => Some(Node::Element(Element {
                    name: el.name().to_string(),
                    attrs: el
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                    children: Vec::new(),
                })),
                scraper::Node::Text(text) => Some(Node::Text(String::from(&*text.text))),
                _ => None,
            };

            // Nodes we drop hand their children up to the nearest kept ancestor.
            let child_parent = match converted {
                Some(node) => {
                    let id = doc.push(node, parent);
                    Some(id)
                }
                None => parent,
            };

            let children: Vec<_> = source.children().collect();
            for child in children.into_iter().rev() {
                stack.push((child, child_parent));
            }
        }

        doc
    }

    fn push(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(parent_id) => {
                if let Node::Element(el) = &mut self.nodes[parent_id] {
                    el.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in document (pre-)order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self, self.roots.iter().rev().copied().collect())
    }

    /// Every node below `id` in document order, not including `id` itself.
    pub fn descendants_of(&self, id: NodeId) -> Descendants<'_> {
        Descendants::new(self, self.nodes[id].children().iter().rev().copied().collect())
    }

    /// Element nodes only, in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> + '_ {
        self.descendants()
            .filter_map(|id| self.nodes[id].as_element().map(|el| (id, el)))
    }
}

/// Pre-order iterator over an explicit work stack.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    fn new(doc: &'a Document, stack: Vec<NodeId>) -> Self {
        Self { doc, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.nodes[id].children().iter().rev().copied());
        Some(id)
    }
}
