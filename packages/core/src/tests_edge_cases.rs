/// Edge case tests for the engine: vanished nodes, unattached fields,
/// repeated notifications, and per-field error containment.
use crate::*;
use formdeco_dom::NodeRef;

fn form_field() -> (NodeRef, NodeRef) {
    let group = NodeRef::new("div");
    let input = NodeRef::new("input").with_attr("type", "text");
    group.append_child(&input);
    (group, input)
}

fn invalid_status() -> FieldStatus {
    FieldStatus {
        errors: [("required".to_string(), true)].into_iter().collect(),
        pristine: false,
        modified: true,
        validation_forced: false,
    }
}

mod edge_case_tests {
    use super::*;

    #[test]
    fn test_notification_for_unattached_field_is_ignored() {
        let mut decoration = FormDecoration::new();
        let path = FieldPath::new("myForm", "ghost");

        decoration.notify(&path, &invalid_status());
        decoration.notify_input(&path);
    }

    #[test]
    fn test_vanished_nodes_are_skipped() {
        let mut decoration = FormDecoration::new();
        let path = {
            let (_group, input) = form_field();
            decoration.attach(&input, "myForm", "email")
        };

        // The whole subtree is gone; reconciliation must not touch it.
        decoration.notify(&path, &invalid_status());
        decoration.notify_input(&path);
    }

    #[test]
    fn test_detach_stops_reconciliation() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        decoration.detach(&path);
        decoration.notify(&path, &invalid_status());

        assert!(!input.has_class("invalid"));
        assert!(group.find_by_tag_and_class("ul", "error-list").is_none());
    }

    #[test]
    fn test_repeated_notification_is_idempotent() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        decoration.notify(&path, &invalid_status());
        let class_after_first = input.class_name();
        decoration.notify(&path, &invalid_status());

        assert_eq!(input.class_name(), class_after_first);
        let list = group
            .find_by_tag_and_class("ul", "error-list")
            .expect("error list missing");
        assert_eq!(list.children().len(), 1);
    }

    #[test]
    fn test_double_attachment_of_one_element_is_idempotent() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        decoration.attach(&input, "myForm", "email");
        let path = decoration.attach(&input, "myForm", "email");

        decoration.notify(&path, &invalid_status());

        let lists: Vec<_> = group
            .children()
            .into_iter()
            .filter(|c| c.has_class("error-list"))
            .collect();
        assert_eq!(lists.len(), 1);
    }

    #[test]
    fn test_failed_traversal_is_contained_to_its_field() {
        let (group, input) = form_field();
        let lone_input = NodeRef::new("input");

        let config = FormDecorationConfig::new();
        let mut decoration = FormDecoration::with_config(config);

        // This field's error traverser finds no parent: contained no-op.
        let orphan_path = decoration.attach(&lone_input, "myForm", "orphan");
        let path = decoration.attach(&input, "myForm", "email");

        decoration.notify(&orphan_path, &invalid_status());
        decoration.notify(&path, &invalid_status());

        // The healthy sibling still reconciles.
        assert!(input.has_class("invalid"));
        assert!(group.find_by_tag_and_class("ul", "error-list").is_some());
        // The orphan still gets its decoration; only the error list is lost.
        assert!(lone_input.has_class("invalid"));
    }

    #[test]
    fn test_show_errors_for_unknown_field_without_lookup_is_a_no_op() {
        let mut decoration = FormDecoration::new();
        let mut messages = ErrorList::new();
        messages.insert("server".to_string(), "rejected".to_string());

        decoration.show_errors("myForm", "ghost", &messages, true);
    }

    #[test]
    fn test_show_errors_resolves_unattached_field_through_lookup() {
        let (group, input) = form_field();
        let lookup_input = input.clone();
        let config = FormDecorationConfig::new()
            .set_field_lookup(move |form, field| {
                (form == "myForm" && field == "email").then(|| lookup_input.clone())
            });
        let mut decoration = FormDecoration::with_config(config);

        let mut messages = ErrorList::new();
        messages.insert("server".to_string(), "rejected".to_string());
        decoration.show_errors("myForm", "email", &messages, true);

        assert!(input.has_class("invalid"));
        let list = group
            .find_by_tag_and_class("ul", "error-list")
            .expect("error list missing");
        assert!(list.children()[0].has_class("constraint-temporary"));

        // The lookup-established binding honors the input event contract.
        decoration.notify_input(&FieldPath::new("myForm", "email"));
        assert!(list.children().is_empty());
    }

    #[test]
    fn test_show_errors_without_temporary_persists_until_next_notification() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        let mut messages = ErrorList::new();
        messages.insert("server".to_string(), "rejected".to_string());
        decoration.show_errors("myForm", "email", &messages, false);

        // An input event does not clear a non-temporary display.
        decoration.notify_input(&path);
        let list = group
            .find_by_tag_and_class("ul", "error-list")
            .expect("error list missing");
        assert_eq!(list.children().len(), 1);
        assert!(input.has_class("invalid"));

        // The next state notification reconciles over it.
        let mut valid = FieldStatus::default();
        valid.pristine = false;
        valid.modified = true;
        decoration.notify(&path, &valid);
        assert!(input.has_class("valid"));
    }

    #[test]
    fn test_wholesale_dictionary_replacement() {
        let (group, input) = form_field();
        let dictionary = StringDictionary::from_json(
            r#"{"en": {"generic": "Invalid value", "required": "Mandatory field"}}"#,
        )
        .expect("registry did not parse");

        let config = FormDecorationConfig::new().set_dictionary(dictionary);
        let mut decoration = FormDecoration::with_config(config);

        let path = decoration.attach(&input, "myForm", "email");
        decoration.notify(&path, &invalid_status());

        let list = group
            .find_by_tag_and_class("ul", "error-list")
            .expect("error list missing");
        assert_eq!(list.children()[0].text().as_deref(), Some("Mandatory field"));
    }

    #[test]
    fn test_clearing_and_rendering_converge_from_any_interleaving() {
        let (group, input) = form_field();
        let mut decoration = FormDecoration::new();
        let path = decoration.attach(&input, "myForm", "email");

        // Alternate between invalid and untouched states several times; the
        // final notification alone must determine the visible outcome.
        let mut pristine = FieldStatus::default();
        pristine.errors.insert("required".to_string(), true);

        for _ in 0..3 {
            decoration.notify(&path, &invalid_status());
            decoration.notify(&path, &pristine);
        }
        decoration.notify(&path, &invalid_status());

        assert!(input.has_class("invalid"));
        let list = group
            .find_by_tag_and_class("ul", "error-list")
            .expect("error list missing");
        assert_eq!(list.children().len(), 1);
        assert!(!formdeco_dom::is_hidden(&list));
    }
}
