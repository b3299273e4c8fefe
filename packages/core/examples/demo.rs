//! Miniature form driven against the engine, standing in for a host
//! framework: build a tree, attach fields, deliver state notifications and
//! print the decorated tree after each step.
//!
//! Run with `cargo run --example demo -p formdeco-core`.

use formdeco_common::CommonResult;
use formdeco_core::{
    ErrorList, FieldStatus, FormDecoration, FormDecorationConfig,
};
use formdeco_dom::{self as dom, NodeRef};

fn dump(node: &NodeRef, indent: usize) {
    let class = node.class_name();
    let hidden = if dom::is_hidden(node) { " (hidden)" } else { "" };
    let text = node
        .text()
        .map(|t| format!(" {:?}", t))
        .unwrap_or_default();
    println!(
        "{}<{} class={:?}>{}{}",
        " ".repeat(indent),
        node.tag(),
        class,
        text,
        hidden
    );
    for child in node.children() {
        dump(&child, indent + 2);
    }
}

fn main() -> CommonResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // <form><div class="form-group"><input/></div></form>
    let form = NodeRef::new("form");
    let group = NodeRef::new("div").with_class("form-group");
    let email = NodeRef::new("input")
        .with_attr("type", "email")
        .with_attr("minlength", "6");
    form.append_child(&group);
    group.append_child(&email);

    let config = FormDecorationConfig::new()
        .use_built_in_decorator("bootstrap")?
        .use_built_in_renderer("bootstrap")?
        .set_decoration_traverser(NodeRef::parent)
        .set_language("en");
    let mut decoration = FormDecoration::with_config(config);

    let path = decoration.attach(&email, "signup", "email");

    println!("-- user types a short, malformed address");
    let status = FieldStatus {
        errors: [
            ("email".to_string(), true),
            ("minlength".to_string(), true),
        ]
        .into_iter()
        .collect(),
        pristine: false,
        modified: true,
        validation_forced: false,
    };
    decoration.notify(&path, &status);
    dump(&form, 0);

    println!("-- the address becomes valid");
    let status = FieldStatus {
        errors: [
            ("email".to_string(), false),
            ("minlength".to_string(), false),
        ]
        .into_iter()
        .collect(),
        pristine: false,
        modified: true,
        validation_forced: false,
    };
    decoration.notify(&path, &status);
    dump(&form, 0);

    println!("-- the server rejects it after submit");
    let mut messages = ErrorList::new();
    messages.insert(
        "unique".to_string(),
        "This address is already registered".to_string(),
    );
    decoration.show_errors("signup", "email", &messages, true);
    dump(&form, 0);

    println!("-- the user edits the field again");
    decoration.notify_input(&path);
    dump(&form, 0);

    Ok(())
}
