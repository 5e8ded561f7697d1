//! The host-side element model.
//!
//! A [`Round`] is the processor's snapshot of the elements the host
//! discovered: one [`TypeElement`] per top-level type declaration, with
//! type texts already canonicalised. The snapshot is rebuilt from parsed
//! sources every round; nothing survives between rounds.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use mallard_ir::{CompilationUnit, Modifiers, Span, TypeDecl, TypeKind};

use crate::signature::{qualify, MethodView, TypeResolver};

/// Kind of a type element, mirroring the declaration kinds the host
/// distinguishes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ElementKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl From<TypeKind> for ElementKind {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Class => ElementKind::Class,
            TypeKind::Interface => ElementKind::Interface,
            TypeKind::Enum => ElementKind::Enum,
            TypeKind::Record => ElementKind::Record,
            TypeKind::Annotation => ElementKind::Annotation,
        }
    }
}

/// A method as the host element model reports it: canonical type texts,
/// ready for signature extraction.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodElement {
    pub name: String,
    pub return_type: String,
    pub param_types: Vec<String>,
    pub throws: Vec<String>,
}

impl MethodView for MethodElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn return_type_text(&self) -> String {
        self.return_type.clone()
    }

    fn parameter_type_texts(&self) -> Vec<String> {
        self.param_types.clone()
    }

    fn thrown_type_texts(&self) -> Vec<String> {
        self.throws.clone()
    }
}

/// A top-level type element in the round snapshot.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeElement {
    pub kind: ElementKind,
    pub package: String,
    pub simple_name: String,
    pub name_span: Span,
    pub modifiers: Modifiers,
    /// Resolved fully qualified names of the annotations on the element.
    pub annotations: Vec<String>,
    /// Resolved fully qualified names of the declared implements list
    /// (type arguments stripped).
    pub interfaces: Vec<String>,
    pub methods: Vec<MethodElement>,
    /// Path of the originating source file.
    pub origin: PathBuf,
}

impl TypeElement {
    /// Fully qualified name of this element.
    pub fn fqn(&self) -> String {
        qualify(&self.package, &self.simple_name)
    }

    /// Whether the element carries an annotation, by resolved FQN.
    pub fn has_annotation(&self, fqn: &str) -> bool {
        self.annotations.iter().any(|a| a == fqn)
    }

    /// Terminal types cannot be extended and are never graft candidates.
    pub fn is_terminal(&self) -> bool {
        self.modifiers.is_terminal()
    }
}

/// Convert a parsed unit's top-level declarations into type elements.
pub fn elements_from_unit(
    unit: &CompilationUnit,
    resolver: &TypeResolver,
    origin: &Path,
) -> Vec<TypeElement> {
    unit.types
        .iter()
        .map(|decl| element_from_decl(unit, decl, resolver, origin))
        .collect()
}

fn element_from_decl(
    unit: &CompilationUnit,
    decl: &TypeDecl,
    resolver: &TypeResolver,
    origin: &Path,
) -> TypeElement {
    let annotations = decl
        .annotations
        .iter()
        .map(|a| resolver.canonical_base(&a.name))
        .collect();

    // For interfaces the super-interface list is the extends clause.
    let declared = match decl.kind {
        TypeKind::Interface => &decl.extends,
        _ => &decl.implements,
    };
    let interfaces = declared
        .iter()
        .map(|t| resolver.canonical_base(&t.text))
        .collect();

    let methods = decl
        .methods()
        .map(|m| MethodElement {
            name: m.name.clone(),
            return_type: m
                .return_type
                .as_ref()
                .map_or_else(String::new, |t| resolver.canonicalize(&t.text)),
            param_types: m
                .params
                .iter()
                .map(|p| {
                    let mut text = resolver.canonicalize(&p.ty.text);
                    if p.varargs {
                        text.push_str("[]");
                    }
                    text
                })
                .collect(),
            throws: m
                .throws
                .iter()
                .map(|t| resolver.canonicalize(&t.text))
                .collect(),
        })
        .collect();

    TypeElement {
        kind: decl.kind.into(),
        package: unit.package_name().to_string(),
        simple_name: decl.name.clone(),
        name_span: decl.name_span,
        modifiers: decl.modifiers,
        annotations,
        interfaces,
        methods,
        origin: origin.to_path_buf(),
    }
}

/// One processing round: a snapshot of the host's root elements.
#[derive(Debug, Default)]
pub struct Round {
    elements: Vec<TypeElement>,
    known: FxHashSet<String>,
}

impl Round {
    /// Build a round from the elements discovered by the host, in the
    /// host's iteration order.
    pub fn new(elements: Vec<TypeElement>) -> Self {
        let known = elements.iter().map(TypeElement::fqn).collect();
        Round { elements, known }
    }

    /// All root elements, in host order.
    pub fn root_elements(&self) -> &[TypeElement] {
        &self.elements
    }

    /// Elements annotated with the given marker FQN, in host order.
    pub fn annotated_with<'a>(
        &'a self,
        marker_fqn: &'a str,
    ) -> impl Iterator<Item = &'a TypeElement> {
        self.elements
            .iter()
            .filter(move |e| e.has_annotation(marker_fqn))
    }

    /// Fully qualified names of every type declared this round.
    pub fn known_types(&self) -> &FxHashSet<String> {
        &self.known
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::signature;
    use mallard_parse::parse_source;
    use pretty_assertions::assert_eq;

    fn round_from(sources: &[(&str, &str)]) -> Round {
        let units: Vec<_> = sources
            .iter()
            .map(|(path, src)| match parse_source(src) {
                Ok(unit) => (PathBuf::from(path), unit),
                Err(err) => panic!("fixture must parse: {err}"),
            })
            .collect();
        let mut known = FxHashSet::default();
        for (_, unit) in &units {
            for decl in &unit.types {
                known.insert(qualify(unit.package_name(), &decl.name));
            }
        }
        let mut elements = Vec::new();
        for (path, unit) in &units {
            let resolver = TypeResolver::for_unit(unit, &known);
            elements.extend(elements_from_unit(unit, &resolver, path));
        }
        Round::new(elements)
    }

    #[test]
    fn annotations_resolve_through_imports() {
        let round = round_from(&[(
            "a/b/I.java",
            "package a.b;\nimport com.example.anno.DuckType;\n@DuckType\ninterface I { void f(); }",
        )]);
        let annotated: Vec<_> = round
            .annotated_with("com.example.anno.DuckType")
            .map(|e| e.fqn())
            .collect();
        assert_eq!(annotated, vec!["a.b.I"]);
    }

    #[test]
    fn cross_view_signatures_agree() {
        // The element-model view of a method and the syntactic view of the
        // same declaration must stringify identically.
        let source = "package a.b;\nimport java.util.List;\nclass C {\n    List<String> f(int n, String... rest) throws Exception { return null; }\n}";
        let round = round_from(&[("a/b/C.java", source)]);
        let element_sig = signature(&round.root_elements()[0].methods[0]);

        let unit = match parse_source(source) {
            Ok(unit) => unit,
            Err(err) => panic!("fixture must parse: {err}"),
        };
        let resolver = TypeResolver::for_unit(&unit, round.known_types());
        let decl = match unit.type_by_name("C") {
            Some(decl) => decl,
            None => panic!("class C missing"),
        };
        let method = match decl.methods().next() {
            Some(m) => m,
            None => panic!("method missing"),
        };
        let syntactic_sig = signature(&crate::signature::SyntacticMethod::new(method, &resolver));

        assert_eq!(element_sig, syntactic_sig);
        assert_eq!(
            element_sig,
            "java.util.List<java.lang.String> f(int, java.lang.String[]) throws java.lang.Exception"
        );
    }

    #[test]
    fn interface_extends_is_reported_as_declared_interfaces() {
        let round = round_from(&[(
            "p/I.java",
            "package p;\ninterface I extends Comparable<I> { }",
        )]);
        assert_eq!(
            round.root_elements()[0].interfaces,
            vec!["java.lang.Comparable"]
        );
    }

    #[test]
    fn known_types_cover_all_units() {
        let round = round_from(&[
            ("p/A.java", "package p;\nclass A {}"),
            ("q/B.java", "package q;\nclass B {}"),
        ]);
        assert!(round.known_types().contains("p.A"));
        assert!(round.known_types().contains("q.B"));
    }
}
