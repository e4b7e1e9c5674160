//! Arrangement behavior tests
//!
//! These tests exercise the arranger chain, the rule factory and the writer
//! guards through the library API, including region wrapping and custom
//! rule configurations.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use csarrange::arrange::{build_arranger_chain, ChainElementArranger, CodeArranger};
use csarrange::model::{CodeAccess, CodeElement, ElementKind};
use csarrange::parser::parse_str;
use csarrange::process::arrange_str;
use csarrange::writer::CodeWriter;
use csarrange::{ArrangeError, Config, ElementRule};

fn field(name: &str) -> CodeElement {
    let mut element = CodeElement::new(
        ElementKind::Field {
            type_name: "int".to_string(),
            initializer: None,
        },
        name,
    );
    element.access = CodeAccess::Private;
    element
}

/// A config whose type members are grouped by access into regions.
fn region_config() -> Config {
    let mut member_rule = ElementRule::passthrough(&[
        "field",
        "constructor",
        "destructor",
        "delegate",
        "event",
        "property",
        "method",
    ]);
    member_rule.group_by = Some("access".to_string());
    member_rule.sort_by = Some("name".to_string());
    member_rule.region = Some("$(Access) Members".to_string());

    let mut type_rule = ElementRule::passthrough(&["type"]);
    type_rule.rules = vec![member_rule];

    let mut namespace_rule = ElementRule::passthrough(&["namespace"]);
    namespace_rule.rules = vec![ElementRule::sorted("using", "name"), type_rule.clone()];

    Config {
        rules: vec![
            ElementRule::sorted("using", "name"),
            namespace_rule,
            type_rule,
        ],
        ..Default::default()
    }
}

#[test]
fn test_empty_chain_cannot_arrange_anything() {
    let chain = ChainElementArranger::new();
    assert!(!chain.can_arrange(&field("_a")));
    assert!(chain.is_empty());
}

#[test]
fn test_empty_chain_with_parent_appends_unchanged() {
    let chain = ChainElementArranger::new();
    let mut parent = CodeElement::group("scope");
    chain.arrange_element(Some(&mut parent), field("_a")).unwrap();
    assert_eq!(parent.children.len(), 1);
    assert_eq!(parent.children[0].name, "_a");
}

#[test]
fn test_empty_chain_without_parent_is_invalid_operation() {
    let chain = ChainElementArranger::new();
    let result = chain.arrange_element(None, field("_a"));
    assert!(matches!(result, Err(ArrangeError::InvalidOperation(_))));
}

#[test]
fn test_factory_rejects_unknown_kind() {
    let rule = ElementRule::passthrough(&["gizmo"]);
    let result = build_arranger_chain(std::slice::from_ref(&rule));
    assert!(matches!(result, Err(ArrangeError::InvalidConfiguration(_))));
}

#[test]
fn test_factory_rejects_empty_kind_list() {
    let rule = ElementRule {
        kinds: vec![],
        ..ElementRule::passthrough(&[])
    };
    let result = build_arranger_chain(std::slice::from_ref(&rule));
    assert!(matches!(result, Err(ArrangeError::InvalidArgument(_))));
}

#[test]
fn test_arranger_from_bad_config_fails_before_arranging() {
    let mut config = Config::default();
    config.rules[0].sort_by = Some("charm".to_string());
    let result = CodeArranger::from_config(&config);
    assert!(matches!(result, Err(ArrangeError::InvalidConfiguration(_))));
}

#[test]
fn test_writer_rejects_unknown_tab_style_without_output() {
    let config = Config {
        tab_style: "banner".to_string(),
        ..Default::default()
    };
    let elements = parse_str("using System;\n").unwrap();
    let mut output = Vec::new();
    let result = CodeWriter::new(&config).write(&elements, &mut output);
    assert!(matches!(result, Err(ArrangeError::InvalidOperation(_))));
    assert!(output.is_empty());
}

#[test]
fn test_writer_accepts_empty_element_list() {
    let config = Config::default();
    let mut output = Vec::new();
    CodeWriter::new(&config).write(&[], &mut output).unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_access_grouping_orders_public_before_private() {
    let source = "class C\n{\n    private int _hidden;\n    public int Shown;\n}\n";
    let arranged = arrange_str(source, &region_config()).unwrap();

    let shown = arranged.find("Shown").unwrap();
    let hidden = arranged.find("_hidden").unwrap();
    assert!(shown < hidden, "public group must come first: {arranged}");
}

#[test]
fn test_region_wrapping_emits_named_regions() {
    let source = "class C\n{\n    private int _hidden;\n    public int Shown;\n}\n";
    let arranged = arrange_str(source, &region_config()).unwrap();

    assert!(arranged.contains("#region Public Members\n"), "{arranged}");
    assert!(arranged.contains("#endregion Public Members\n"), "{arranged}");
    assert!(arranged.contains("#region Private Members\n"), "{arranged}");
}

#[test]
fn test_region_wrapping_is_idempotent() {
    let source = "class C\n{\n    private int _b;\n    private int _a;\n    public int Shown;\n}\n";
    let config = region_config();
    let once = arrange_str(source, &config).unwrap();
    let twice = arrange_str(&once, &config).unwrap();
    assert_eq!(once, twice, "regions must not stack up across runs");
}

#[test]
fn test_regions_disabled_suppresses_wrappers() {
    let config = Config {
        regions_enabled: false,
        ..region_config()
    };
    let source = "class C\n{\n    private int _hidden;\n    public int Shown;\n}\n";
    let arranged = arrange_str(source, &config).unwrap();
    assert!(!arranged.contains("#region"), "{arranged}");
}

#[test]
fn test_descending_sort_configuration() {
    let mut config = region_config();
    // flip the member sort direction
    fn flip(rules: &mut [ElementRule]) {
        for rule in rules {
            rule.sort_direction = "descending".to_string();
            flip(&mut rule.rules);
        }
    }
    flip(&mut config.rules);

    let source = "class C\n{\n    private int _a;\n    private int _c;\n    private int _b;\n}\n";
    let arranged = arrange_str(source, &config).unwrap();
    let a = arranged.find("_a").unwrap();
    let b = arranged.find("_b").unwrap();
    let c = arranged.find("_c").unwrap();
    assert!(c < b && b < a, "descending name order expected: {arranged}");
}

#[test]
fn test_sorting_usings_inside_namespace() {
    let source = "namespace Demo\n{\n    using Zulu;\n    using Alpha;\n\n    public class C\n    {\n    }\n}\n";
    let arranged = arrange_str(source, &Config::default()).unwrap();
    let alpha = arranged.find("using Alpha;").unwrap();
    let zulu = arranged.find("using Zulu;").unwrap();
    assert!(alpha < zulu);
}

#[test]
fn test_static_grouping() {
    let mut member_rule = ElementRule::passthrough(&["field", "property", "method"]);
    member_rule.group_by = Some("static".to_string());
    member_rule.sort_by = Some("name".to_string());
    let mut type_rule = ElementRule::passthrough(&["type"]);
    type_rule.rules = vec![member_rule];
    let config = Config {
        rules: vec![type_rule],
        ..Default::default()
    };

    let source = "class C\n{\n    private int _instance;\n    private static int _shared;\n}\n";
    let arranged = arrange_str(source, &config).unwrap();
    let shared = arranged.find("_shared").unwrap();
    let instance = arranged.find("_instance").unwrap();
    assert!(shared < instance, "static group first: {arranged}");
}

#[test]
fn test_clone_then_arrange_leaves_original_untouched() {
    let elements = parse_str("class C\n{\n    public void B()\n    {\n    }\n    private int _a;\n}\n").unwrap();
    let original = elements.clone();

    let arranger = CodeArranger::from_config(&Config::default()).unwrap();
    let arranged = arranger.arrange(elements.clone()).unwrap();

    assert_eq!(elements, original, "input clone must not alias the arrangement");
    assert_ne!(arranged, original, "arrangement must have regrouped members");
}

#[test]
fn test_group_elements_have_no_source_identity() {
    let elements = parse_str("class C\n{\n    private int _a;\n}\n").unwrap();
    let arranger = CodeArranger::from_config(&Config::default()).unwrap();
    let arranged = arranger.arrange(elements).unwrap();

    let class = &arranged[0];
    let group = class
        .children
        .iter()
        .find(|c| c.is_group())
        .expect("default rules group members by kind");
    assert!(group.header_text.is_empty());
    assert_eq!(group.access, CodeAccess::NotSpecified);
}
