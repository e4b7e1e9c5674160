//! Integration tests for csarrange
//!
//! These tests drive the full parse → arrange → write pipeline on in-memory
//! source text and check preservation, rearrangement and failure behavior.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use csarrange::parser::{parse_str, LookaheadReader};
use csarrange::process::arrange_str;
use csarrange::{ArrangeError, Config, ElementKind};

#[test]
fn test_lookahead_reads_match_source_for_any_interleaving() {
    let source = "namespace N { class C<T> where T : IList<int> { } }";

    // several fixed interleaving patterns of peek/peek_ahead/read
    for pattern in 0..5u8 {
        let mut reader = LookaheadReader::from_string(source);
        let mut observed = String::new();
        let mut step = 0usize;
        loop {
            match (step + usize::from(pattern)) % 5 {
                0 => {
                    let _ = reader.peek().unwrap();
                }
                1 | 3 => {
                    let _ = reader.peek_ahead().unwrap();
                    let _ = reader.peek_ahead().unwrap();
                }
                _ => {}
            }
            match reader.read().unwrap() {
                Some(c) => observed.push(c),
                None => break,
            }
            step += 1;
        }
        assert_eq!(observed, source, "pattern {pattern} disturbed the stream");
    }
}

#[test]
fn test_pipeline_preserves_already_arranged_file() {
    // file already in default arrangement order: nothing changes, byte for byte
    let source = "using System;\n\nnamespace Demo\n{\n    public class Widget\n    {\n        private int _size;\n\n        public Widget(int size)\n        {\n            _size = size;\n        }\n\n        public int Size { get; set; }\n\n        public void Render()\n        {\n        }\n    }\n}\n";
    let arranged = arrange_str(source, &Config::default()).unwrap();
    assert_eq!(arranged, source);
}

#[test]
fn test_pipeline_reorders_members_by_kind() {
    let source = "class C\n{\n    public void Run()\n    {\n    }\n\n    private int _count;\n}\n";
    let arranged = arrange_str(source, &Config::default()).unwrap();

    let field_pos = arranged.find("_count").unwrap();
    let method_pos = arranged.find("Run").unwrap();
    assert!(
        field_pos < method_pos,
        "fields must precede methods: {arranged}"
    );
}

#[test]
fn test_round_trip_idempotence() {
    let source = "using Zulu;\nusing Alpha;\n\nnamespace Demo\n{\n    public class Widget\n    {\n        public void Beta()\n        {\n        }\n\n        // keep me\n        private int _b;\n        private int _a;\n\n        public string Name\n        {\n            get;\n            set;\n        }\n    }\n}\n";
    let config = Config::default();
    let once = arrange_str(source, &config).unwrap();
    let twice = arrange_str(&once, &config).unwrap();
    assert_eq!(once, twice, "second pass must produce no diff");
}

#[test]
fn test_stable_sort_keeps_source_order_for_equal_keys() {
    // same access on every member: sorting by access must not reorder them
    let source = "class C\n{\n    private int _zebra;\n    private int _apple;\n    private int _mango;\n}\n";
    let arranged = arrange_str(source, &Config::default()).unwrap();

    let zebra = arranged.find("_zebra").unwrap();
    let apple = arranged.find("_apple").unwrap();
    let mango = arranged.find("_mango").unwrap();
    assert!(zebra < apple && apple < mango, "source order lost: {arranged}");
}

#[test]
fn test_multiline_auto_property_is_inlined_end_to_end() {
    let ugly = "namespace PropertyChanges\n{\n    public class UglyCode\n    {\n        public string MyProperty\n        {\n            get;\n            set;\n        }\n    }\n}\n";
    let pretty = "namespace PropertyChanges\n{\n    public class UglyCode\n    {\n        public string MyProperty { get; set; }\n    }\n}\n";

    let arranged = arrange_str(ugly, &Config::default()).unwrap();
    assert_eq!(arranged, pretty);
}

#[test]
fn test_pretty_code_is_not_modified() {
    let pretty = "namespace PropertyChanges\n{\n    public class PrettyCode\n    {\n        public string MyProperty { get; set; }\n    }\n}\n";
    let arranged = arrange_str(pretty, &Config::default()).unwrap();
    assert_eq!(arranged, pretty, "already-pretty file must be untouched");
}

#[test]
fn test_property_with_backing_logic_is_preserved() {
    let source = "namespace PropertyChanges\n{\n    public class PropertyWithLogic\n    {\n        private string _myProperty;\n\n        public string MyProperty\n        {\n            get { return _myProperty; }\n            set { _myProperty = value; }\n        }\n    }\n}\n";
    let arranged = arrange_str(source, &Config::default()).unwrap();
    assert_eq!(
        arranged, source,
        "property with backing logic must stay multi-line and byte-identical"
    );
}

#[test]
fn test_auto_property_initializer_survives_the_pipeline() {
    let source = "namespace Demo\n{\n    public class Settings\n    {\n        public string Mode { get; } = \"default\";\n    }\n}\n";
    let arranged = arrange_str(source, &Config::default()).unwrap();
    assert_eq!(arranged, source);
}

#[test]
fn test_nested_classes_with_expression_bodied_properties() {
    let mut source = String::from("public class Outer\n{\n");
    for i in 0..4 {
        source.push_str(&format!(
            "    public class Nested{i}\n    {{\n        public int Count{i} {{ get; set; }}\n        public bool Overflow{i} => Count{i} > 100;\n    }}\n"
        ));
    }
    source.push_str("}\n");

    let elements = parse_str(&source).unwrap();
    assert_eq!(elements.len(), 1);
    let outer = &elements[0];
    assert_eq!(outer.children.len(), 4, "expected four nested classes");

    for (i, nested) in outer.children.iter().enumerate() {
        assert_eq!(nested.children.len(), 2, "expected two properties");
        match &nested.children[1].kind {
            ElementKind::Property { details, .. } => {
                assert!(details.is_expression_bodied);
                assert_eq!(
                    details.expression_body.as_deref(),
                    Some(format!("Count{i} > 100").as_str()),
                    "expression text must match the source exactly"
                );
            }
            other => panic!("expected an expression-bodied property, got {other:?}"),
        }
    }
}

#[test]
fn test_one_namespace_with_three_classes() {
    let source = "namespace Features\n{\n    public class A\n    {\n        public string P { get; } = \"a\";\n    }\n    public class B\n    {\n        public string P { get; } = \"b\";\n    }\n    public class C\n    {\n        public string P { get; } = \"c\";\n    }\n}\n";
    let elements = parse_str(source).unwrap();
    assert_eq!(elements.len(), 1, "one namespace expected");
    assert_eq!(elements[0].children.len(), 3, "three classes expected");
}

#[test]
fn test_comments_and_docs_travel_with_moved_members() {
    let source = "class C\n{\n    public void Run()\n    {\n    }\n\n    /// <summary>Cached size.</summary>\n    private int _size;\n}\n";
    let arranged = arrange_str(source, &Config::default()).unwrap();

    // the doc comment must still sit immediately above the field
    let doc_pos = arranged.find("/// <summary>Cached size.</summary>").unwrap();
    let field_pos = arranged.find("private int _size;").unwrap();
    let method_pos = arranged.find("public void Run()").unwrap();
    assert!(doc_pos < field_pos);
    assert!(field_pos < method_pos, "field group precedes methods");
}

#[test]
fn test_parse_failure_reports_position_through_pipeline() {
    let source = "namespace Demo\n{\n    class C\n    {\n        int = 5;\n    }\n}\n";
    let err = arrange_str(source, &Config::default()).unwrap_err();
    match err {
        ArrangeError::Parse { line, .. } => assert_eq!(line, 5),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_preprocessor_lines_are_preserved() {
    let source = "#if NET48\nusing System.Web;\n#endif\n\nnamespace Demo\n{\n    public class C\n    {\n    }\n}\n";
    let arranged = arrange_str(source, &Config::default()).unwrap();
    assert!(arranged.contains("#if NET48\n"));
    assert!(arranged.contains("#endif\n"));
}

#[test]
fn test_tabs_configuration_changes_indentation_of_moved_elements() {
    let config = Config {
        tab_style: "tabs".to_string(),
        ..Default::default()
    };
    // unmoved elements keep their source indentation; this just asserts the
    // pipeline accepts the tabs style end to end
    let source = "class C\n{\n    private int _a;\n}\n";
    let arranged = arrange_str(source, &config).unwrap();
    assert!(arranged.contains("private int _a;"));
}
