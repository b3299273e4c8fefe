use std::rc::Rc;

use formdeco_dom::NodeRef;

use formdeco_common::ConfigResult;

use crate::decorators::{DecorateElement, Decorator};
use crate::dictionary::{MessageLookup, StringDictionary};
use crate::renderers::{ErrorRenderer, RenderErrorList};

/// Resolves the node a strategy should operate on, starting from the input
/// element. Returning `None` is a contained per-field condition, not an
/// error.
pub type Traverser = Rc<dyn Fn(&NodeRef) -> Option<NodeRef>>;

/// Host primitive resolving a field's input node from form and field names.
pub type FieldLookup = Rc<dyn Fn(&str, &str) -> Option<NodeRef>>;

/// Builder-style configuration, evaluated once when the engine is built.
///
/// Defaults: class-name decorator decorating the input itself, default
/// renderer placing the error list in the input's parent, built-in
/// dictionary, no language override.
#[derive(Clone)]
pub struct FormDecorationConfig {
    pub(crate) decorator: Decorator,
    pub(crate) decoration_traverser: Traverser,
    pub(crate) renderer: ErrorRenderer,
    pub(crate) error_traverser: Traverser,
    pub(crate) dictionary: Rc<dyn MessageLookup>,
    pub(crate) language: Option<String>,
    pub(crate) field_lookup: Option<FieldLookup>,
}

impl FormDecorationConfig {
    pub fn new() -> Self {
        Self {
            decorator: Decorator::ClassName(Default::default()),
            decoration_traverser: Rc::new(|node| Some(node.clone())),
            renderer: ErrorRenderer::Default(Default::default()),
            error_traverser: Rc::new(NodeRef::parent),
            dictionary: Rc::new(StringDictionary::new()),
            language: None,
            field_lookup: None,
        }
    }

    /// Selects one of the built-in decorators: `default`, `className` or
    /// `bootstrap`.
    pub fn use_built_in_decorator(mut self, name: &str) -> ConfigResult<Self> {
        self.decorator = Decorator::built_in(name)?;
        Ok(self)
    }

    /// Installs a pre-configured or custom decorator.
    pub fn set_decorator(mut self, decorator: Decorator) -> Self {
        self.decorator = decorator;
        self
    }

    /// Installs a custom decoration strategy.
    pub fn set_custom_decorator(mut self, decorator: impl DecorateElement + 'static) -> Self {
        self.decorator = Decorator::Custom(Rc::new(decorator));
        self
    }

    /// Sets the traversal resolving the node to decorate.
    pub fn set_decoration_traverser(
        mut self,
        traverser: impl Fn(&NodeRef) -> Option<NodeRef> + 'static,
    ) -> Self {
        self.decoration_traverser = Rc::new(traverser);
        self
    }

    /// Selects one of the built-in error list renderers: `default` or
    /// `bootstrap`.
    pub fn use_built_in_renderer(mut self, name: &str) -> ConfigResult<Self> {
        self.renderer = ErrorRenderer::built_in(name)?;
        Ok(self)
    }

    /// Installs a pre-configured or custom renderer.
    pub fn set_renderer(mut self, renderer: ErrorRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Installs a custom error list rendering strategy.
    pub fn set_custom_renderer(mut self, renderer: impl RenderErrorList + 'static) -> Self {
        self.renderer = ErrorRenderer::Custom(Rc::new(renderer));
        self
    }

    /// Sets the traversal resolving the error list container.
    pub fn set_error_traverser(
        mut self,
        traverser: impl Fn(&NodeRef) -> Option<NodeRef> + 'static,
    ) -> Self {
        self.error_traverser = Rc::new(traverser);
        self
    }

    /// Sets the language used for message lookups.
    pub fn set_language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    /// Replaces the message dictionary.
    pub fn set_dictionary(mut self, dictionary: impl MessageLookup + 'static) -> Self {
        self.dictionary = Rc::new(dictionary);
        self
    }

    /// Installs the host's field lookup primitive, used by imperative error
    /// display on fields that were never attached.
    pub fn set_field_lookup(
        mut self,
        lookup: impl Fn(&str, &str) -> Option<NodeRef> + 'static,
    ) -> Self {
        self.field_lookup = Some(Rc::new(lookup));
        self
    }

    pub fn decorator(&self) -> &Decorator {
        &self.decorator
    }

    pub fn renderer(&self) -> &ErrorRenderer {
        &self.renderer
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl Default for FormDecorationConfig {
    fn default() -> Self {
        Self::new()
    }
}
