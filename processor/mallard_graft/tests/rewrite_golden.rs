//! Golden rewrite tests: full before/after text comparisons.
//!
//! The rewriter's whole value is that untouched text survives byte for
//! byte, so these assert complete output files rather than fragments.

#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use std::path::PathBuf;

use mallard_graft::{graft_interfaces, InterfaceDescriptor, TypeResolver};
use mallard_parse::parse_source;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

fn descriptor(fqn: &str, signatures: &[&str]) -> InterfaceDescriptor {
    InterfaceDescriptor {
        fqn: fqn.to_string(),
        simple_name: fqn.rsplit('.').next().unwrap().to_string(),
        signatures: signatures.iter().map(|s| (*s).to_string()).collect(),
        origin: PathBuf::from("I.java"),
    }
}

fn rewrite(source: &str, class: &str, descriptors: &[InterfaceDescriptor]) -> String {
    let unit = parse_source(source).unwrap();
    let resolver = TypeResolver::for_unit(&unit, &FxHashSet::default());
    let refs: Vec<&InterfaceDescriptor> = descriptors.iter().collect();
    graft_interfaces(source, &unit, class, &refs, &resolver)
        .unwrap()
        .text
}

#[test]
fn grafts_preserving_comments_annotations_and_formatting() {
    let source = r#"package com.jinelei.ducktype.sample;

import com.jinelei.ducktype.annotation.AddField;
import lombok.Data;

// Sample fixture carried over from the annotation module.
@AddField
@Data
public class SampleClass {
    private String code;

    public void methodVoid() {
        System.out.println("SampleClass methodVoid");
    }
}
"#;

    let expected = r#"package com.jinelei.ducktype.sample;

import com.jinelei.ducktype.annotation.AddField;
import lombok.Data;
import com.jinelei.ducktype.sample.intf.SampleInterface;

// Sample fixture carried over from the annotation module.
@AddField
@Data
public class SampleClass implements SampleInterface {
    private String code;

    @Override
    public void methodVoid() {
        System.out.println("SampleClass methodVoid");
    }
}
"#;

    let rewritten = rewrite(
        source,
        "SampleClass",
        &[descriptor(
            "com.jinelei.ducktype.sample.intf.SampleInterface",
            &["void methodVoid()"],
        )],
    );
    assert_eq!(rewritten, expected);
}

#[test]
fn grafts_onto_class_with_extends_and_existing_interface() {
    let source = r#"package zoo;

import java.util.AbstractList;

public class Pond extends Base implements AutoCloseable {
    @Override
    public void close() {
    }

    public void drain() {
    }
}
"#;

    let expected = r#"package zoo;

import java.util.AbstractList;
import zoo.sinks.Drainable;

public class Pond extends Base implements AutoCloseable, Drainable {
    @Override
    public void close() {
    }

    @Override
    public void drain() {
    }
}
"#;

    let rewritten = rewrite(
        source,
        "Pond",
        &[descriptor("zoo.sinks.Drainable", &["void drain()"])],
    );
    assert_eq!(rewritten, expected);
}

#[test]
fn rerun_over_own_output_is_byte_identical() {
    let source = "package p;\n\npublic class C {\n    public int size() {\n        return 0;\n    }\n}\n";
    let descriptors = [descriptor("p.Sized", &["int size()"])];

    let once = rewrite(source, "C", &descriptors);
    let twice = rewrite(&once, "C", &descriptors);
    assert_eq!(once, twice);
}
