//! The `AddField` side-path.
//!
//! For each class carrying the marker, a fresh compilation unit is
//! synthesised in the class's package: a public class of the same name
//! holding a single `private String name;` field. The original source is
//! neither read nor preserved. If the output root were ever placed on the
//! source path this unit would shadow the original class; the behaviour
//! is kept as specified.

/// Render the companion unit for a class.
pub fn companion_unit(package: &str, simple_name: &str) -> String {
    let mut out = String::new();
    if !package.is_empty() {
        out.push_str(&format!("package {package};\n\n"));
    }
    out.push_str(&format!(
        "public class {simple_name} {{\n    private String name;\n}}\n"
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mallard_ir::{Member, TypeKind};
    use mallard_parse::parse_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_the_fixed_unit() {
        assert_eq!(
            companion_unit("a.b", "S"),
            "package a.b;\n\npublic class S {\n    private String name;\n}\n"
        );
    }

    #[test]
    fn unnamed_package_omits_the_declaration() {
        assert_eq!(
            companion_unit("", "S"),
            "public class S {\n    private String name;\n}\n"
        );
    }

    #[test]
    fn generated_unit_parses_with_exactly_one_field() {
        let text = companion_unit("a.b", "Sample");
        let unit = match parse_source(&text) {
            Ok(unit) => unit,
            Err(err) => panic!("generated unit must parse: {err}"),
        };

        assert_eq!(unit.package_name(), "a.b");
        let class = match unit.type_by_name("Sample") {
            Some(class) => class,
            None => panic!("class missing"),
        };
        assert_eq!(class.kind, TypeKind::Class);

        let fields: Vec<_> = class
            .members
            .iter()
            .filter_map(|m| match m {
                Member::Field(f) => Some(f),
                _ => None,
            })
            .collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].names, vec!["name"]);
        assert_eq!(fields[0].ty.text, "String");
        assert!(fields[0]
            .modifiers
            .contains(mallard_ir::Modifiers::PRIVATE));
    }
}
