use std::collections::BTreeMap;
use std::rc::Rc;

use formdeco_dom::{self as dom, NodeRef};
use tracing::debug;

use formdeco_common::{ConfigError, ConfigResult};

/// Active error messages, keyed by constraint name. Fully recomputed on
/// every update; ordered so rendering is deterministic.
pub type ErrorList = BTreeMap<String, String>;

/// Strategy seam for reconciling a container's error list.
pub trait RenderErrorList {
    /// Reconciles the container's list items against `error_list`. Items
    /// created while `temporary` is set carry the temporary marker class and
    /// are purged by [`clear`](RenderErrorList::clear) and
    /// [`clear_temporary`](RenderErrorList::clear_temporary).
    fn render(&self, container: &NodeRef, error_list: &ErrorList, temporary: bool);

    /// Purges temporary items and hides the list element.
    fn clear(&self, container: &NodeRef);

    /// Purges temporary items without hiding the list.
    fn clear_temporary(&self, container: &NodeRef);
}

/// Default error list renderer: a `ul.error-list` of `li.constraint-<name>`
/// items.
///
/// Reconciliation shows and hides items rather than recreating them, so the
/// same list rendered twice yields the same item set and transition state on
/// the nodes survives. Deletion is reserved for temporary items and for
/// items whose constraint can no longer be identified from their class.
#[derive(Debug, Clone)]
pub struct DefaultErrorListRenderer {
    pub list_class_name: String,
    pub list_element_type: String,
    pub list_item_element_type: String,
    pub list_item_class_name_prefix: String,
    pub list_item_temporary_class_name: String,
    /// Extra class added to every created item (Bootstrap's `help-block`).
    pub list_item_class_name: Option<String>,
}

impl DefaultErrorListRenderer {
    pub fn new() -> Self {
        Self {
            list_class_name: "error-list".to_string(),
            list_element_type: "ul".to_string(),
            list_item_element_type: "li".to_string(),
            list_item_class_name_prefix: "constraint-".to_string(),
            list_item_temporary_class_name: "constraint-temporary".to_string(),
            list_item_class_name: None,
        }
    }

    /// Present list element inside the container, if any.
    pub fn get_list_element(&self, container: &NodeRef) -> Option<NodeRef> {
        container.find_by_tag_and_class(&self.list_element_type, &self.list_class_name)
    }

    fn create_list_element(&self, container: &NodeRef) -> NodeRef {
        let list =
            NodeRef::new(self.list_element_type.as_str()).with_class(&self.list_class_name);
        container.append_child(&list);
        list
    }

    fn existing_list_items(&self, list_element: &NodeRef) -> Vec<NodeRef> {
        list_element
            .children()
            .into_iter()
            .filter(|child| child.tag() == self.list_item_element_type)
            .collect()
    }

    fn existing_list_item(&self, list_element: &NodeRef, constraint: &str) -> Option<NodeRef> {
        list_element.find_by_tag_and_class(
            &self.list_item_element_type,
            &self.constraint_class_name(constraint),
        )
    }

    fn create_list_item(
        &self,
        list_element: &NodeRef,
        constraint: &str,
        message: &str,
        temporary: bool,
    ) -> NodeRef {
        let item = NodeRef::new(self.list_item_element_type.as_str())
            .with_class(&self.constraint_class_name(constraint))
            .with_text(message);
        if temporary {
            item.add_class(&self.list_item_temporary_class_name);
        }
        if let Some(extra) = &self.list_item_class_name {
            item.add_class(extra);
        }
        list_element.append_child(&item);
        item
    }

    fn remove_temporary_items(&self, list_element: &NodeRef) {
        for item in self.existing_list_items(list_element) {
            if item.has_class(&self.list_item_temporary_class_name) {
                item.detach();
            }
        }
    }

    /// Extracts the constraint name from an item's class attribute.
    ///
    /// The first token carrying the item prefix wins; the temporary marker
    /// class is not a constraint.
    fn extract_constraint_name(&self, class_name: &str) -> Option<String> {
        class_name
            .split_whitespace()
            .filter(|token| *token != self.list_item_temporary_class_name)
            .find_map(|token| token.strip_prefix(&self.list_item_class_name_prefix))
            .map(str::to_string)
    }

    fn constraint_class_name(&self, constraint: &str) -> String {
        format!("{}{}", self.list_item_class_name_prefix, constraint)
    }

    fn render_error_items(&self, list_element: &NodeRef, error_list: &ErrorList, temporary: bool) {
        // Temporary items never survive a re-render.
        self.remove_temporary_items(list_element);

        for item in self.existing_list_items(list_element) {
            match self.extract_constraint_name(&item.class_name()) {
                Some(constraint) => {
                    if !error_list.contains_key(&constraint) {
                        dom::hide(Some(&item));
                    }
                }
                None => {
                    // Orphaned markup: the item can no longer be matched to a
                    // constraint.
                    debug!(class = %item.class_name(), "removing orphaned error list item");
                    item.detach();
                }
            }
        }

        for (constraint, message) in error_list {
            let item = self
                .existing_list_item(list_element, constraint)
                .unwrap_or_else(|| {
                    self.create_list_item(list_element, constraint, message, temporary)
                });
            dom::show(Some(&item));
        }
    }
}

impl Default for DefaultErrorListRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderErrorList for DefaultErrorListRenderer {
    fn render(&self, container: &NodeRef, error_list: &ErrorList, temporary: bool) {
        let list_element = self.get_list_element(container);

        if error_list.is_empty() {
            // Hidden, not deleted: the list element keeps its identity for
            // reuse.
            dom::hide(list_element.as_ref());
            return;
        }

        let list_element =
            list_element.unwrap_or_else(|| self.create_list_element(container));
        self.render_error_items(&list_element, error_list, temporary);
        dom::show(Some(&list_element));
    }

    fn clear(&self, container: &NodeRef) {
        if let Some(list_element) = self.get_list_element(container) {
            self.remove_temporary_items(&list_element);
            dom::hide(Some(&list_element));
        }
    }

    fn clear_temporary(&self, container: &NodeRef) {
        if let Some(list_element) = self.get_list_element(container) {
            self.remove_temporary_items(&list_element);
        }
    }
}

/// Error list renderer for Bootstrap forms: a `div.error-list` of
/// `span.help-block` items.
#[derive(Debug, Clone)]
pub struct BootstrapErrorListRenderer {
    base: DefaultErrorListRenderer,
}

impl BootstrapErrorListRenderer {
    pub fn new() -> Self {
        let mut base = DefaultErrorListRenderer::new();
        base.list_element_type = "div".to_string();
        base.list_item_element_type = "span".to_string();
        base.list_item_class_name = Some("help-block".to_string());
        Self { base }
    }

    pub fn base(&self) -> &DefaultErrorListRenderer {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut DefaultErrorListRenderer {
        &mut self.base
    }
}

impl Default for BootstrapErrorListRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderErrorList for BootstrapErrorListRenderer {
    fn render(&self, container: &NodeRef, error_list: &ErrorList, temporary: bool) {
        self.base.render(container, error_list, temporary);
    }

    fn clear(&self, container: &NodeRef) {
        self.base.clear(container);
    }

    fn clear_temporary(&self, container: &NodeRef) {
        self.base.clear_temporary(container);
    }
}

/// Built-in renderer strategies, selected by name at setup time.
#[derive(Clone)]
pub enum ErrorRenderer {
    Default(DefaultErrorListRenderer),
    Bootstrap(BootstrapErrorListRenderer),
    Custom(Rc<dyn RenderErrorList>),
}

impl ErrorRenderer {
    /// Resolves a built-in renderer by name: `default` or `bootstrap`. An
    /// unknown name is a fatal configuration error.
    pub fn built_in(name: &str) -> ConfigResult<Self> {
        match name {
            "default" => Ok(ErrorRenderer::Default(DefaultErrorListRenderer::new())),
            "bootstrap" => Ok(ErrorRenderer::Bootstrap(BootstrapErrorListRenderer::new())),
            other => Err(ConfigError::unknown_renderer(other)),
        }
    }
}

impl RenderErrorList for ErrorRenderer {
    fn render(&self, container: &NodeRef, error_list: &ErrorList, temporary: bool) {
        match self {
            ErrorRenderer::Default(renderer) => renderer.render(container, error_list, temporary),
            ErrorRenderer::Bootstrap(renderer) => renderer.render(container, error_list, temporary),
            ErrorRenderer::Custom(renderer) => renderer.render(container, error_list, temporary),
        }
    }

    fn clear(&self, container: &NodeRef) {
        match self {
            ErrorRenderer::Default(renderer) => renderer.clear(container),
            ErrorRenderer::Bootstrap(renderer) => renderer.clear(container),
            ErrorRenderer::Custom(renderer) => renderer.clear(container),
        }
    }

    fn clear_temporary(&self, container: &NodeRef) {
        match self {
            ErrorRenderer::Default(renderer) => renderer.clear_temporary(container),
            ErrorRenderer::Bootstrap(renderer) => renderer.clear_temporary(container),
            ErrorRenderer::Custom(renderer) => renderer.clear_temporary(container),
        }
    }
}
