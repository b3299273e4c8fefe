//! # Formdeco DOM
//!
//! A minimal DOM-like element tree used as the decoration target.
//!
//! The host framework owns the real document; this crate models the slice of
//! it that decoration cares about: tags, attributes (including the `class`
//! attribute as a token list), inline styles, a per-node data map, text
//! content, and parent/child structure. Handles are shared
//! (`NodeRef`) with non-owning counterparts (`WeakNode`) so watchers never
//! keep a removed node alive.

pub mod node;
pub mod visibility;

pub use node::{Element, NodeRef, WeakNode};
pub use visibility::{hide, is_hidden, show};
