//! In-memory page document.
//!
//! The portfolio page's markup is owned by the host; this module is the
//! minimal tree the runtime components operate on. It supports exactly the
//! surface they need: lookup by id, anchors and `.reveal` elements in
//! document order, class manipulation, and replacing an element's contents
//! with pre-rendered markup (the equivalent of assigning `innerHTML`).
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Detached nodes
//! stay in the arena but are invisible to every query, which mirrors how a
//! browser treats elements removed from the document.

use maud::{Markup, html};
use std::collections::BTreeMap;

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum Child {
    Element(NodeId),
    /// Already-escaped markup produced by the renderers.
    Markup(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<Child>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only an empty `<body>`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            body: NodeId(0),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element. Attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element and append it to `parent` in one step.
    pub fn append_new(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// `child` must not be `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            !self.is_inclusive_ancestor(child, parent),
            "append_child would make {child:?} its own descendant"
        );
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(Child::Element(child));
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0]
                .children
                .retain(|c| !matches!(c, Child::Element(id) if *id == node));
        }
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    /// Whether the node is reachable from `<body>`.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.body {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    // ------------------------------------------------------------------
    // Attributes and classes
    // ------------------------------------------------------------------

    /// Set an attribute. `class` is routed to the class list.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "class" {
            self.nodes[node.0].classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            self.nodes[node.0]
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attributes.get(name).map(String::as_str)
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.set_attribute(node, "id", id);
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Replace the element's children with pre-rendered markup.
    pub fn set_inner_html(&mut self, node: NodeId, markup: Markup) {
        self.clear(node);
        let html = markup.into_string();
        if !html.is_empty() {
            self.nodes[node.0].children.push(Child::Markup(html));
        }
    }

    /// Remove every child of the element.
    pub fn clear(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            if let Child::Element(id) = child {
                self.nodes[id.0].parent = None;
            }
        }
    }

    /// Element children only (markup chunks are opaque).
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0]
            .children
            .iter()
            .filter_map(|c| match c {
                Child::Element(id) => Some(*id),
                Child::Markup(_) => None,
            })
            .collect()
    }

    /// Serialize the element's children.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_children(node, &mut out);
        out
    }

    /// Serialize the element including its own tag.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_element(node, &mut out);
        out
    }

    fn write_children(&self, node: NodeId, out: &mut String) {
        for child in &self.nodes[node.0].children {
            match child {
                Child::Element(id) => self.write_element(*id, out),
                Child::Markup(html) => out.push_str(html),
            }
        }
    }

    fn write_element(&self, node: NodeId, out: &mut String) {
        let element = &self.nodes[node.0];
        out.push('<');
        out.push_str(&element.tag);
        if let Some(id) = element.attributes.get("id") {
            push_attribute(out, "id", id);
        }
        if !element.classes.is_empty() {
            push_attribute(out, "class", &element.classes.join(" "));
        }
        for (name, value) in element.attributes.iter().filter(|(n, _)| *n != "id") {
            push_attribute(out, name, value);
        }
        out.push('>');
        self.write_children(node, out);
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }

    // ------------------------------------------------------------------
    // Queries (connected elements only, document order)
    // ------------------------------------------------------------------

    /// Every connected element below `<body>`, depth first.
    fn descendants(&self) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.body];
        while let Some(node) = stack.pop() {
            if node != self.body {
                found.push(node);
            }
            let children = self.child_elements(node);
            stack.extend(children.into_iter().rev());
        }
        found
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants()
            .into_iter()
            .find(|n| self.attribute(*n, "id") == Some(id))
    }

    /// Resolve an in-page fragment such as `#about` to its target element.
    pub fn query_fragment(&self, fragment: &str) -> Option<NodeId> {
        let id = fragment.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        self.get_element_by_id(id)
    }

    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Anchors whose `href` starts with `#` (the `a[href^="#"]` selector).
    pub fn fragment_anchors(&self) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|n| self.tag(*n) == "a")
            .filter(|n| self.attribute(*n, "href").is_some_and(|h| h.starts_with('#')))
            .collect()
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html! { (value) }.into_string());
    out.push('"');
}
