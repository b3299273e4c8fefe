//! # Formdeco Core
//!
//! State-to-presentation reconciliation for form fields.
//!
//! ## Purpose
//!
//! The host framework validates field values and delivers state changes
//! (constraint violations, pristine/dirty, modified-since-baseline, forced
//! validation). This crate decides what decoration and which localized error
//! messages should be visible for each field, and incrementally patches the
//! decorated tree to match — no flicker, no duplicate nodes.
//!
//! ## Decision rule
//!
//! Executed on every notification, per field:
//!
//! - neither dirty nor forced → clear decorations and errors;
//! - invalid → decorate invalid, render the active constraint errors;
//! - valid and modified → decorate valid, clear errors;
//! - valid and unmodified → clear decorations and errors.
//!
//! ## Reconciliation contract
//!
//! **INVARIANT: reconciliation is idempotent and order-independent.**
//!
//! Decoration and error list updates for one notification are independent
//! watchers that may run in either relative order with the same final
//! visible state. Rendering the same error list twice yields the same item
//! set: items are located and reused, shown and hidden rather than recreated.
//! For a given field at most one error list element and one decorated
//! container exist at any time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formdeco_core::{FieldStatus, FormDecoration, FormDecorationConfig};
//!
//! let config = FormDecorationConfig::new()
//!     .use_built_in_decorator("bootstrap")?
//!     .use_built_in_renderer("bootstrap")?
//!     .set_language("en");
//!
//! let mut decoration = FormDecoration::with_config(config);
//! let path = decoration.attach(&input, "myForm", "email");
//! decoration.notify(&path, &status);
//! ```

pub mod config;
pub mod constraints;
pub mod decorators;
pub mod dictionary;
pub mod registration;
pub mod renderers;

#[cfg(test)]
mod tests_edge_cases;

#[cfg(test)]
mod tests_scenarios;

pub use config::{FieldLookup, FormDecorationConfig, Traverser};
pub use constraints::{
    collect_constraint_parameters, ConstraintParameters, ConstraintSet, ParameterValue,
};
pub use decorators::{BootstrapDecorator, ClassNameDecorator, DecorateElement, Decorator};
pub use dictionary::{
    LocaleMessages, MessageLookup, MessageRegistry, StringDictionary, FALLBACK_LOCALE,
};
pub use formdeco_common::{ConfigError, ConfigResult};
pub use registration::{DisplayState, FieldPath, FieldStatus, FormDecoration};
pub use renderers::{
    BootstrapErrorListRenderer, DefaultErrorListRenderer, ErrorList, ErrorRenderer,
    RenderErrorList,
};
