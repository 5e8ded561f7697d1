//! Property tests for signature extraction.
//!
//! Signature determinism and cross-view equality are the foundation the
//! matcher stands on, so they get generated coverage beyond the unit
//! tests: arbitrary method shapes are rendered to source, parsed, and
//! stringified through both views.

use mallard_graft::{
    elements_from_unit, signature, SyntacticMethod, TypeResolver,
};
use mallard_parse::parse_source;
use proptest::prelude::*;
use rustc_hash::FxHashSet;
use std::path::Path;

const RETURNS: &[&str] = &[
    "void",
    "int",
    "long",
    "String",
    "String[]",
    "List<String>",
    "java.util.Map<String, Integer>",
];

const PARAMS: &[&str] = &[
    "int",
    "long",
    "boolean",
    "String",
    "String[]",
    "List<String>",
    "java.util.Map<String, Integer>",
    "List<? extends Number>",
];

const THROWS: &[&str] = &["Exception", "RuntimeException", "java.io.IOException"];

/// Render a method declaration from generated indices.
fn render_method(name: &str, ret: usize, params: &[usize], throws: &[usize]) -> String {
    let mut out = format!("    public {} {name}(", RETURNS[ret]);
    let rendered: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} p{i}", PARAMS[*p]))
        .collect();
    out.push_str(&rendered.join(", "));
    out.push(')');
    if !throws.is_empty() {
        let list: Vec<&str> = throws.iter().map(|t| THROWS[*t]).collect();
        out.push_str(" throws ");
        out.push_str(&list.join(", "));
    }
    out.push_str(" {\n    }\n");
    out
}

fn render_unit(method: &str) -> String {
    format!(
        "package p;\n\nimport java.util.List;\n\npublic class C {{\n{method}}}\n"
    )
}

proptest! {
    #[test]
    fn signature_is_deterministic_and_cross_view_equal(
        name in "[a-z][a-zA-Z0-9]{0,8}",
        ret in 0..RETURNS.len(),
        params in prop::collection::vec(0..PARAMS.len(), 0..4),
        throws in prop::collection::vec(0..THROWS.len(), 0..2),
    ) {
        let source = render_unit(&render_method(&name, ret, &params, &throws));
        let unit = parse_source(&source).map_err(|e| {
            TestCaseError::fail(format!("generated source must parse: {e}"))
        })?;

        let known = FxHashSet::default();
        let resolver = TypeResolver::for_unit(&unit, &known);

        // Element view.
        let elements = elements_from_unit(&unit, &resolver, Path::new("p/C.java"));
        prop_assert_eq!(elements.len(), 1);
        let element_sig = signature(&elements[0].methods[0]);

        // Syntactic view of the same declaration.
        let decl = unit.type_by_name("C").map_or_else(
            || Err(TestCaseError::fail("class C missing")),
            Ok,
        )?;
        let method = decl.methods().next().map_or_else(
            || Err(TestCaseError::fail("method missing")),
            Ok,
        )?;
        let syntactic_sig = signature(&SyntacticMethod::new(method, &resolver));

        // Cross-view equality.
        prop_assert_eq!(&element_sig, &syntactic_sig);

        // Determinism: a fresh parse of the same text produces the same
        // string.
        let reparsed = parse_source(&source).map_err(|e| {
            TestCaseError::fail(format!("reparse failed: {e}"))
        })?;
        let resolver2 = TypeResolver::for_unit(&reparsed, &known);
        let elements2 = elements_from_unit(&reparsed, &resolver2, Path::new("p/C.java"));
        prop_assert_eq!(element_sig, signature(&elements2[0].methods[0]));
    }
}
