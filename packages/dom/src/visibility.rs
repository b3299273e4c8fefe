use crate::node::NodeRef;
use tracing::trace;

/// Data key holding the display mode a hidden element had before `hide`.
const OLD_DISPLAY_KEY: &str = "old-display";

/// True when the element is hidden via an inline `display: none`.
pub fn is_hidden(node: &NodeRef) -> bool {
    node.style("display").as_deref() == Some("none")
}

/// Hides the element, remembering its previous display mode.
///
/// Idempotent; a missing target is a no-op.
pub fn hide(node: Option<&NodeRef>) {
    let Some(node) = node else {
        trace!("hide called without a target");
        return;
    };
    if is_hidden(node) {
        return;
    }
    if let Some(display) = node.style("display") {
        node.set_data(OLD_DISPLAY_KEY, display);
    }
    node.set_style("display", "none");
}

/// Shows the element, restoring the display mode recorded by [`hide`].
///
/// Idempotent; a missing target is a no-op.
// TODO: pick the fallback display mode from the element tag instead of
// assuming block.
pub fn show(node: Option<&NodeRef>) {
    let Some(node) = node else {
        trace!("show called without a target");
        return;
    };
    if !is_hidden(node) {
        return;
    }
    let display = node.data(OLD_DISPLAY_KEY).unwrap_or_else(|| "block".into());
    node.set_style("display", display);
    node.remove_data(OLD_DISPLAY_KEY);
}
