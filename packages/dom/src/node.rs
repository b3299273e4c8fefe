use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Element node data.
///
/// The `class` attribute is stored as a whitespace-separated token list, the
/// way a document would carry it, so class reconciliation works on the same
/// representation markup does.
#[derive(Debug, Default)]
pub struct Element {
    tag: String,
    attributes: HashMap<String, String>,
    styles: HashMap<String, String>,
    data: HashMap<String, String>,
    text: Option<String>,
    children: Vec<NodeRef>,
    parent: Option<Weak<RefCell<Element>>>,
}

/// Shared handle to an element node.
///
/// The tree is single-threaded and host-owned; handles are reference-counted
/// with interior mutability so several watchers can patch the same node
/// within one update cycle.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<Element>>);

/// Non-owning handle to an element node.
///
/// Watchers hold these so a node removed by the host is neither kept alive
/// nor touched afterwards.
#[derive(Clone)]
pub struct WeakNode(Weak<RefCell<Element>>);

impl NodeRef {
    pub fn new(tag: impl Into<String>) -> Self {
        NodeRef(Rc::new(RefCell::new(Element {
            tag: tag.into(),
            ..Element::default()
        })))
    }

    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(self, child: &NodeRef) -> Self {
        self.append_child(child);
        self
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.into(), value.into());
    }

    pub fn remove_attr(&self, name: &str) {
        self.0.borrow_mut().attributes.remove(name);
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.0.borrow().styles.get(name).cloned()
    }

    pub fn set_style(&self, name: impl Into<String>, value: impl Into<String>) {
        self.0.borrow_mut().styles.insert(name.into(), value.into());
    }

    pub fn remove_style(&self, name: &str) {
        self.0.borrow_mut().styles.remove(name);
    }

    pub fn data(&self, name: &str) -> Option<String> {
        self.0.borrow().data.get(name).cloned()
    }

    pub fn set_data(&self, name: impl Into<String>, value: impl Into<String>) {
        self.0.borrow_mut().data.insert(name.into(), value.into());
    }

    pub fn remove_data(&self, name: &str) {
        self.0.borrow_mut().data.remove(name);
    }

    pub fn text(&self) -> Option<String> {
        self.0.borrow().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.0.borrow_mut().text = Some(text.into());
    }

    /// The full `class` attribute value, empty when unset.
    pub fn class_name(&self) -> String {
        self.attr("class").unwrap_or_default()
    }

    /// Adds each whitespace-separated token of `class` that is not already
    /// present.
    pub fn add_class(&self, class: &str) {
        let mut tokens: Vec<String> = self
            .class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        for token in class.split_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
        self.set_attr("class", tokens.join(" "));
    }

    /// Removes each whitespace-separated token of `class`.
    pub fn remove_class(&self, class: &str) {
        let removed: Vec<&str> = class.split_whitespace().collect();
        let tokens: Vec<String> = self
            .class_name()
            .split_whitespace()
            .filter(|t| !removed.contains(t))
            .map(str::to_string)
            .collect();
        self.set_attr("class", tokens.join(" "));
    }

    /// True when every whitespace-separated token of `class` is present.
    pub fn has_class(&self, class: &str) -> bool {
        let tokens: Vec<String> = self
            .class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        class.split_whitespace().all(|t| tokens.iter().any(|c| c == t))
    }

    pub fn children(&self) -> Vec<NodeRef> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<NodeRef> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(NodeRef)
    }

    pub fn append_child(&self, child: &NodeRef) {
        child.detach();
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    /// Removes this node from its parent's child list, if any.
    pub fn detach(&self) {
        let parent = self.parent();
        if let Some(parent) = parent {
            parent
                .0
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
        self.0.borrow_mut().parent = None;
    }

    /// Depth-first search of descendants for the first element matching both
    /// `tag` and every token of `class`.
    pub fn find_by_tag_and_class(&self, tag: &str, class: &str) -> Option<NodeRef> {
        for child in self.children() {
            if child.tag() == tag && child.has_class(class) {
                return Some(child);
            }
            if let Some(found) = child.find_by_tag_and_class(tag, class) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first search of descendants for the first element with `tag`.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeRef> {
        for child in self.children() {
            if child.tag() == tag {
                return Some(child);
            }
            if let Some(found) = child.find_by_tag(tag) {
                return Some(found);
            }
        }
        None
    }

    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }
}

impl WeakNode {
    pub fn upgrade(&self) -> Option<NodeRef> {
        self.0.upgrade().map(NodeRef)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let element = self.0.borrow();
        f.debug_struct("NodeRef")
            .field("tag", &element.tag)
            .field("attributes", &element.attributes)
            .field("children", &element.children.len())
            .finish()
    }
}

impl fmt::Debug for WeakNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.upgrade() {
            Some(node) => write!(f, "WeakNode({})", NodeRef(node).tag()),
            None => write!(f, "WeakNode(<dropped>)"),
        }
    }
}
