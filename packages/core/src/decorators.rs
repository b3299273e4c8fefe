use std::rc::Rc;

use formdeco_dom::NodeRef;

use formdeco_common::{ConfigError, ConfigResult};

/// Input types that do not take an icon badge.
const NON_COMMON_ELEMENT_TYPES: &[&str] = &[
    "checkbox",
    "datetime-local",
    "date",
    "month",
    "radio",
    "time",
    "week",
];

/// Strategy seam for applying and removing validity markers on a node.
pub trait DecorateElement {
    /// Marks the target as valid or invalid.
    fn decorate_element(&self, target: &NodeRef, valid: bool);

    /// Removes every validity marker from the target.
    fn clear_decorations(&self, target: &NodeRef);
}

/// Decorator that toggles a valid/invalid CSS class pair.
///
/// The two classes are mutually exclusive on the target: decorating always
/// removes the opposite class first.
#[derive(Debug, Clone)]
pub struct ClassNameDecorator {
    valid_class_name: String,
    invalid_class_name: String,
}

impl ClassNameDecorator {
    pub fn new() -> Self {
        Self {
            valid_class_name: "valid".to_string(),
            invalid_class_name: "invalid".to_string(),
        }
    }

    pub fn set_valid_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.valid_class_name = class_name.into();
        self
    }

    pub fn set_invalid_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.invalid_class_name = class_name.into();
        self
    }

    pub fn valid_class_name(&self) -> &str {
        &self.valid_class_name
    }

    pub fn invalid_class_name(&self) -> &str {
        &self.invalid_class_name
    }
}

impl Default for ClassNameDecorator {
    fn default() -> Self {
        Self::new()
    }
}

impl DecorateElement for ClassNameDecorator {
    fn decorate_element(&self, target: &NodeRef, valid: bool) {
        if valid {
            target.remove_class(&self.invalid_class_name);
            target.add_class(&self.valid_class_name);
        } else {
            target.remove_class(&self.valid_class_name);
            target.add_class(&self.invalid_class_name);
        }
    }

    fn clear_decorations(&self, target: &NodeRef) {
        target.remove_class(&self.invalid_class_name);
        target.remove_class(&self.valid_class_name);
    }
}

/// Decorator for Bootstrap-style form groups.
///
/// Composes [`ClassNameDecorator`] (with `has-success`/`has-error`) and
/// additionally manages a single feedback icon inside the decorated
/// container. Inputs whose type is in the non-common list never get an icon.
#[derive(Debug, Clone)]
pub struct BootstrapDecorator {
    base: ClassNameDecorator,
    element_class_name: String,
    icon_element_name: String,
    icon_class_name: String,
    icon_valid_class_name: String,
    icon_invalid_class_name: String,
    use_icons: bool,
    non_common_element_types: Vec<String>,
}

impl BootstrapDecorator {
    pub fn new() -> Self {
        let mut base = ClassNameDecorator::new();
        base.set_valid_class_name("has-success")
            .set_invalid_class_name("has-error");
        Self {
            base,
            element_class_name: "has-feedback".to_string(),
            icon_element_name: "span".to_string(),
            icon_class_name: "form-control-feedback".to_string(),
            icon_valid_class_name: "fa fa-check".to_string(),
            icon_invalid_class_name: "fa fa-exclamation-circle".to_string(),
            use_icons: true,
            non_common_element_types: NON_COMMON_ELEMENT_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    pub fn base(&self) -> &ClassNameDecorator {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ClassNameDecorator {
        &mut self.base
    }

    pub fn set_use_icons(&mut self, use_icons: bool) -> &mut Self {
        self.use_icons = use_icons;
        self
    }

    pub fn set_icon_valid_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.icon_valid_class_name = class_name.into();
        self
    }

    pub fn set_icon_invalid_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.icon_invalid_class_name = class_name.into();
        self
    }

    pub fn add_non_common_element_type(&mut self, type_name: impl Into<String>) -> &mut Self {
        let type_name = type_name.into();
        if !self.non_common_element_types.contains(&type_name) {
            self.non_common_element_types.push(type_name);
        }
        self
    }

    pub fn remove_non_common_element_type(&mut self, type_name: &str) -> &mut Self {
        self.non_common_element_types.retain(|t| t != type_name);
        self
    }

    pub fn set_non_common_element_types(&mut self, types: Vec<String>) -> &mut Self {
        self.non_common_element_types = types;
        self
    }

    pub fn non_common_element_types(&self) -> &[String] {
        &self.non_common_element_types
    }

    /// The input whose `type` attribute governs icon policy: the target
    /// itself, or the first input inside a traversed container.
    fn input_type(target: &NodeRef) -> Option<String> {
        let input = if target.tag() == "input" {
            Some(target.clone())
        } else {
            target.find_by_tag("input")
        };
        input.and_then(|node| node.attr("type"))
    }

    fn icon_excluded(&self, target: &NodeRef) -> bool {
        match Self::input_type(target) {
            Some(input_type) => self.non_common_element_types.contains(&input_type),
            None => false,
        }
    }

    fn existing_icon_element(&self, container: &NodeRef) -> Option<NodeRef> {
        container.find_by_tag_and_class(&self.icon_element_name, &self.icon_class_name)
    }

    fn create_icon_element(&self, container: &NodeRef) -> NodeRef {
        let icon = NodeRef::new(self.icon_element_name.clone()).with_class(&self.icon_class_name);
        container.append_child(&icon);
        icon
    }
}

impl Default for BootstrapDecorator {
    fn default() -> Self {
        Self::new()
    }
}

impl DecorateElement for BootstrapDecorator {
    fn decorate_element(&self, target: &NodeRef, valid: bool) {
        self.base.decorate_element(target, valid);

        if !self.use_icons || self.icon_excluded(target) {
            return;
        }

        target.add_class(&self.element_class_name);

        let icon = self
            .existing_icon_element(target)
            .unwrap_or_else(|| self.create_icon_element(target));

        if valid {
            icon.remove_class(&self.icon_invalid_class_name);
            icon.add_class(&self.icon_valid_class_name);
        } else {
            icon.remove_class(&self.icon_valid_class_name);
            icon.add_class(&self.icon_invalid_class_name);
        }
    }

    fn clear_decorations(&self, target: &NodeRef) {
        self.base.clear_decorations(target);

        if self.use_icons {
            if let Some(icon) = self.existing_icon_element(target) {
                icon.detach();
            }
        }
    }
}

/// Built-in decorator strategies, selected by name at setup time.
#[derive(Clone)]
pub enum Decorator {
    ClassName(ClassNameDecorator),
    Bootstrap(BootstrapDecorator),
    Custom(Rc<dyn DecorateElement>),
}

impl Decorator {
    /// Resolves a built-in decorator by name: `default`/`className` or
    /// `bootstrap`. An unknown name is a fatal configuration error.
    pub fn built_in(name: &str) -> ConfigResult<Self> {
        match name {
            "default" | "className" => Ok(Decorator::ClassName(ClassNameDecorator::new())),
            "bootstrap" => Ok(Decorator::Bootstrap(BootstrapDecorator::new())),
            other => Err(ConfigError::unknown_decorator(other)),
        }
    }
}

impl DecorateElement for Decorator {
    fn decorate_element(&self, target: &NodeRef, valid: bool) {
        match self {
            Decorator::ClassName(decorator) => decorator.decorate_element(target, valid),
            Decorator::Bootstrap(decorator) => decorator.decorate_element(target, valid),
            Decorator::Custom(decorator) => decorator.decorate_element(target, valid),
        }
    }

    fn clear_decorations(&self, target: &NodeRef) {
        match self {
            Decorator::ClassName(decorator) => decorator.clear_decorations(target),
            Decorator::Bootstrap(decorator) => decorator.clear_decorations(target),
            Decorator::Custom(decorator) => decorator.clear_decorations(target),
        }
    }
}
