/// End-to-end scenarios driving the engine the way a host framework would:
/// build a small form tree, attach fields, deliver state notifications, and
/// inspect the decorated tree.
use crate::*;
use formdeco_dom::{self as dom, NodeRef};

fn form_field() -> (NodeRef, NodeRef) {
    let group = NodeRef::new("div").with_class("form-group");
    let input = NodeRef::new("input").with_attr("type", "text");
    group.append_child(&input);
    (group, input)
}

fn status(errors: &[(&str, bool)], pristine: bool, modified: bool) -> FieldStatus {
    FieldStatus {
        errors: errors
            .iter()
            .map(|(name, violated)| (name.to_string(), *violated))
            .collect(),
        pristine,
        modified,
        validation_forced: false,
    }
}

fn error_list_element(container: &NodeRef) -> Option<NodeRef> {
    container.find_by_tag_and_class("ul", "error-list")
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_pristine_untouched_field_shows_nothing() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        decoration.notify(&path, &status(&[("required", true)], true, false));

        assert!(!input.has_class("valid"));
        assert!(!input.has_class("invalid"));
        assert!(error_list_element(&group).is_none());
    }

    #[test]
    fn test_dirty_invalid_field_renders_error_item() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        decoration.notify(&path, &status(&[("required", true)], false, true));

        assert!(input.has_class("invalid"));
        assert!(!input.has_class("valid"));

        let list = error_list_element(&group).expect("error list missing");
        let items = list.children();
        assert_eq!(items.len(), 1);
        assert!(items[0].has_class("constraint-required"));
        assert_eq!(
            items[0].text().as_deref(),
            Some("Please fill in this required field")
        );
    }

    #[test]
    fn test_invalid_to_valid_modified_transition() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        decoration.notify(&path, &status(&[("required", true)], false, true));
        decoration.notify(&path, &status(&[("required", false)], false, true));

        assert!(input.has_class("valid"));
        assert!(!input.has_class("invalid"));

        // The list and its item survive, hidden, for reuse.
        let list = error_list_element(&group).expect("error list missing");
        assert!(dom::is_hidden(&list));
        assert_eq!(list.children().len(), 1);
    }

    #[test]
    fn test_valid_unmodified_field_is_undecorated() {
        let (_group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        decoration.notify(&path, &status(&[("required", true)], false, true));
        decoration.notify(&path, &status(&[("required", false)], false, false));

        assert!(!input.has_class("valid"));
        assert!(!input.has_class("invalid"));
    }

    #[test]
    fn test_forced_validation_displays_before_interaction() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        let mut forced = status(&[("required", true)], true, false);
        forced.validation_forced = true;
        decoration.notify(&path, &forced);

        assert!(input.has_class("invalid"));
        assert!(error_list_element(&group).is_some());
    }

    #[test]
    fn test_radio_group_attaches_error_watcher_once() {
        let group = NodeRef::new("div");
        let male = NodeRef::new("input").with_attr("type", "radio");
        let female = NodeRef::new("input").with_attr("type", "radio");
        group.append_child(&male);
        group.append_child(&female);

        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&male, "myForm", "gender");
        let second = decoration.attach(&female, "myForm", "gender");
        assert_eq!(path, second);

        decoration.notify(&path, &status(&[("required", true)], false, false));

        // Both radio buttons get their own decoration...
        assert!(male.has_class("invalid"));
        assert!(female.has_class("invalid"));

        // ...but the shared container holds exactly one error list.
        let lists: Vec<_> = group
            .children()
            .into_iter()
            .filter(|c| c.has_class("error-list"))
            .collect();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].children().len(), 1);
    }

    #[test]
    fn test_temporary_errors_clear_on_next_input_event() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        // Normal reconciliation first: field is dirty and valid.
        decoration.notify(&path, &status(&[("required", false)], false, true));

        let mut messages = ErrorList::new();
        messages.insert("server".to_string(), "E-Mail is already taken".to_string());
        decoration.show_errors("myForm", "email", &messages, true);

        assert!(input.has_class("invalid"));
        let list = error_list_element(&group).expect("error list missing");
        let temporary: Vec<_> = list
            .children()
            .into_iter()
            .filter(|i| i.has_class("constraint-temporary"))
            .collect();
        assert_eq!(temporary.len(), 1);
        assert_eq!(
            temporary[0].text().as_deref(),
            Some("E-Mail is already taken")
        );

        // The next input event reverts to normal reconciliation.
        decoration.notify_input(&path);

        assert!(list
            .children()
            .iter()
            .all(|i| !i.has_class("constraint-temporary")));
        assert!(input.has_class("valid"));
        assert!(!input.has_class("invalid"));
    }

    #[test]
    fn test_constraint_parameters_reach_the_message() {
        let group = NodeRef::new("div");
        let input = NodeRef::new("input")
            .with_attr("type", "text")
            .with_attr("minlength", "5");
        group.append_child(&input);

        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "nickname");
        decoration.notify(&path, &status(&[("minlength", true)], false, true));

        let list = error_list_element(&group).expect("error list missing");
        assert_eq!(
            list.children()[0].text().as_deref(),
            Some("Please enter a value not less than 5 characters")
        );
    }

    #[test]
    fn test_bootstrap_stack_decorates_the_form_group() {
        let (group, input) = form_field();
        let config = FormDecorationConfig::new()
            .use_built_in_decorator("bootstrap")
            .and_then(|c| c.use_built_in_renderer("bootstrap"))
            .expect("setup failed")
            .set_decoration_traverser(NodeRef::parent);

        let mut decoration = FormDecoration::with_config(config);
        let path = decoration.attach(&input, "myForm", "email");
        decoration.notify(&path, &status(&[("required", true)], false, true));

        assert!(group.has_class("has-error"));
        assert!(group.has_class("has-feedback"));
        assert!(group
            .find_by_tag_and_class("span", "form-control-feedback")
            .is_some());

        let list = group
            .find_by_tag_and_class("div", "error-list")
            .expect("error list missing");
        assert!(list.children()[0].has_class("help-block"));
    }

    #[test]
    fn test_localized_messages_via_configured_language() {
        let (group, input) = form_field();
        let config = FormDecorationConfig::new().set_language("ru");
        let mut decoration = FormDecoration::with_config(config);

        let path = decoration.attach(&input, "myForm", "email");
        decoration.notify(&path, &status(&[("required", true)], false, true));

        let list = error_list_element(&group).expect("error list missing");
        assert_eq!(
            list.children()[0].text().as_deref(),
            Some("Пожалуйста заполните это обязательное поле")
        );
    }
}
