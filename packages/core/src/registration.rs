use std::collections::{BTreeMap, HashSet};
use std::fmt;

use formdeco_dom::{NodeRef, WeakNode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::FormDecorationConfig;
use crate::constraints::{collect_constraint_parameters, ConstraintParameters, ConstraintSet};
use crate::decorators::DecorateElement;
use crate::renderers::{ErrorList, RenderErrorList};

/// Stable field identity: form name plus field name.
///
/// Displays as `form["field"]`, the watch path the host keys its
/// notifications by. Radio buttons of one group share a single path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPath {
    form: String,
    field: String,
}

impl FieldPath {
    pub fn new(form: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            field: field.into(),
        }
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[\"{}\"]", self.form, self.field)
    }
}

/// Field state delivered by the host on every relevant change.
///
/// Transient: the engine reconciles from it and keeps only the last value
/// per field for temporary-error recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStatus {
    /// Constraint name to "currently violated".
    pub errors: ConstraintSet,
    pub pristine: bool,
    /// Value differs from the baseline (initial or last-submitted value).
    pub modified: bool,
    /// Host forces validation display before the user interacts.
    pub validation_forced: bool,
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        !self.errors.values().any(|&violated| violated)
    }

    pub fn is_dirty(&self) -> bool {
        !self.pristine
    }
}

impl Default for FieldStatus {
    fn default() -> Self {
        Self {
            errors: ConstraintSet::new(),
            pristine: true,
            modified: false,
            validation_forced: false,
        }
    }
}

/// Effective display state of a field, derived from [`FieldStatus`] on every
/// notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Untouched and not forced: no decoration, no errors.
    Pristine,
    /// Dirty (or forced), valid, value unchanged: no decoration, no errors.
    ValidUnchanged,
    /// Dirty (or forced), valid, value changed: valid decoration, no errors.
    ValidChanged,
    /// Dirty (or forced) and invalid: invalid decoration, active errors.
    Invalid,
}

impl DisplayState {
    pub fn from_status(status: &FieldStatus) -> Self {
        if !status.is_dirty() && !status.validation_forced {
            DisplayState::Pristine
        } else if !status.is_valid() {
            DisplayState::Invalid
        } else if status.modified {
            DisplayState::ValidChanged
        } else {
            DisplayState::ValidUnchanged
        }
    }
}

/// Per-field wiring created by [`FormDecoration::attach`].
///
/// Node handles are weak: a node removed by the host is silently skipped and
/// pruned, never resurrected or touched.
#[derive(Default)]
struct FieldBinding {
    decoration_targets: Vec<WeakNode>,
    error_container: Option<WeakNode>,
    parameters: ConstraintParameters,
    last_status: Option<FieldStatus>,
    temporary_active: bool,
}

impl FieldBinding {

    /// Adds a decoration target unless the same node is already wired.
    fn push_decoration_target(&mut self, target: &NodeRef) {
        let already_wired = self
            .decoration_targets
            .iter()
            .filter_map(WeakNode::upgrade)
            .any(|existing| existing.ptr_eq(target));
        if !already_wired {
            self.decoration_targets.push(target.downgrade());
        }
    }

    /// Live decoration targets; dead handles are pruned.
    fn live_decoration_targets(&mut self) -> Vec<NodeRef> {
        self.decoration_targets
            .retain(|target| target.upgrade().is_some());
        self.decoration_targets
            .iter()
            .filter_map(WeakNode::upgrade)
            .collect()
    }

    fn live_error_container(&self) -> Option<NodeRef> {
        self.error_container.as_ref().and_then(WeakNode::upgrade)
    }
}

/// The reconciliation engine.
///
/// Binds field state streams to the configured decorator and error list
/// renderer. The host calls [`attach`](Self::attach) once per DOM element,
/// then drives [`notify`](Self::notify) from its own change detection and
/// [`notify_input`](Self::notify_input) on user input events.
///
/// Decoration and error list updates for one notification are independent
/// and idempotent: either relative order yields the same final visible
/// state. One field's missing target never affects its siblings.
pub struct FormDecoration {
    config: FormDecorationConfig,
    bindings: BTreeMap<FieldPath, FieldBinding>,
    /// Field paths whose error list watcher is already wired. Append-only
    /// for the engine's lifetime; keeps radio groups from getting one error
    /// list per button.
    attached: HashSet<FieldPath>,
}

impl FormDecoration {
    pub fn new() -> Self {
        Self::with_config(FormDecorationConfig::new())
    }

    pub fn with_config(config: FormDecorationConfig) -> Self {
        Self {
            config,
            bindings: BTreeMap::new(),
            attached: HashSet::new(),
        }
    }

    pub fn config(&self) -> &FormDecorationConfig {
        &self.config
    }

    /// Registers a DOM element for decoration and error display.
    ///
    /// Idempotent per element. Every call wires a decoration target for
    /// `node` (each radio button of a group needs its own), while the error
    /// list watcher and constraint parameters are wired only once per field
    /// path.
    pub fn attach(&mut self, node: &NodeRef, form_name: &str, field_name: &str) -> FieldPath {
        let path = FieldPath::new(form_name, field_name);

        let decoration_target = (self.config.decoration_traverser)(node);
        let first_attachment = !self.attached.contains(&path);

        let binding = self.bindings.entry(path.clone()).or_default();

        match decoration_target {
            Some(target) => binding.push_decoration_target(&target),
            None => warn!(field = %path, "no decoration target resolved; element stays undecorated"),
        }

        if first_attachment {
            binding.parameters = collect_constraint_parameters(node);
            match (self.config.error_traverser)(node) {
                Some(container) => binding.error_container = Some(container.downgrade()),
                None => {
                    warn!(field = %path, "no error list container resolved; errors stay unrendered")
                }
            }
            self.attached.insert(path.clone());
        }

        path
    }

    /// Reconciles a field against its current state. Called by the host on
    /// every relevant change, synchronously.
    pub fn notify(&mut self, path: &FieldPath, status: &FieldStatus) {
        let Some(binding) = self.bindings.get_mut(path) else {
            warn!(field = %path, "notification for unattached field ignored");
            return;
        };
        binding.last_status = Some(status.clone());
        // The re-render below replaces any host-imposed display.
        binding.temporary_active = false;

        self.reconcile(path, status);
    }

    /// Reacts to a user input event on a field.
    ///
    /// Only meaningful while a temporary display is up: purges exactly the
    /// temporary items and resumes normal reconciliation from the last known
    /// state.
    pub fn notify_input(&mut self, path: &FieldPath) {
        let Some(binding) = self.bindings.get_mut(path) else {
            return;
        };
        if !binding.temporary_active {
            return;
        }
        binding.temporary_active = false;

        if let Some(container) = binding.live_error_container() {
            self.config.renderer.clear_temporary(&container);
        }

        match self.bindings.get(path).and_then(|b| b.last_status.clone()) {
            Some(status) => self.reconcile(path, &status),
            None => self.clear_field(path),
        }
    }

    /// Tears a field down: no further reconciliation runs against it.
    pub fn detach(&mut self, path: &FieldPath) {
        self.bindings.remove(path);
    }

    /// Imperative error display, for errors the local constraint set cannot
    /// express (server-side or cross-field validation).
    ///
    /// Decorates the field invalid and renders `messages`. With `temporary`
    /// set, the next input event on the field clears exactly these messages
    /// and resumes normal reconciliation.
    pub fn show_errors(
        &mut self,
        form_name: &str,
        field_name: &str,
        messages: &ErrorList,
        temporary: bool,
    ) {
        let path = FieldPath::new(form_name, field_name);

        if !self.bindings.contains_key(&path) {
            let Some(node) = self.lookup_field_node(form_name, field_name) else {
                warn!(field = %path, "cannot show errors for unknown field");
                return;
            };
            self.attach(&node, form_name, field_name);
        }

        let Some(binding) = self.bindings.get_mut(&path) else {
            return;
        };
        binding.temporary_active = temporary;
        let targets = binding.live_decoration_targets();
        let container = binding.live_error_container();

        for target in &targets {
            self.config.decorator.decorate_element(target, false);
        }
        match container {
            Some(container) => self.config.renderer.render(&container, messages, temporary),
            None => warn!(field = %path, "no error list container; messages not rendered"),
        }
    }

    fn lookup_field_node(&self, form_name: &str, field_name: &str) -> Option<NodeRef> {
        let lookup = self.config.field_lookup.as_ref()?;
        lookup(form_name, field_name)
    }

    /// Applies the decision rule to every live target of the field.
    fn reconcile(&mut self, path: &FieldPath, status: &FieldStatus) {
        let state = DisplayState::from_status(status);
        debug!(field = %path, ?state, "reconciling field");

        let (targets, container, parameters) = {
            let Some(binding) = self.bindings.get_mut(path) else {
                return;
            };
            (
                binding.live_decoration_targets(),
                binding.live_error_container(),
                binding.parameters.clone(),
            )
        };

        for target in &targets {
            match state {
                DisplayState::Invalid => self.config.decorator.decorate_element(target, false),
                DisplayState::ValidChanged => self.config.decorator.decorate_element(target, true),
                DisplayState::Pristine | DisplayState::ValidUnchanged => {
                    self.config.decorator.clear_decorations(target)
                }
            }
        }

        if let Some(container) = container {
            match state {
                DisplayState::Invalid => {
                    let error_list = self.build_error_list(&status.errors, &parameters);
                    self.config.renderer.render(&container, &error_list, false);
                }
                _ => self.config.renderer.clear(&container),
            }
        }
    }

    fn clear_field(&mut self, path: &FieldPath) {
        let (targets, container) = {
            let Some(binding) = self.bindings.get_mut(path) else {
                return;
            };
            (
                binding.live_decoration_targets(),
                binding.live_error_container(),
            )
        };
        for target in &targets {
            self.config.decorator.clear_decorations(target);
        }
        if let Some(container) = container {
            self.config.renderer.clear(&container);
        }
    }

    /// Builds the localized error list for the currently violated
    /// constraints.
    fn build_error_list(
        &self,
        constraints: &ConstraintSet,
        parameters: &ConstraintParameters,
    ) -> ErrorList {
        let mut error_list = ErrorList::new();
        for (name, &violated) in constraints {
            if !violated {
                continue;
            }
            let bound = parameters.get(name).map(|value| vec![*value]);
            let message = self.config.dictionary.get_string(
                name,
                bound.as_deref(),
                self.config.language.as_deref(),
            );
            error_list.insert(name.clone(), message);
        }
        error_list
    }
}

impl Default for FormDecoration {
    fn default() -> Self {
        Self::new()
    }
}
