//! The parsed compilation-unit tree.
//!
//! This is a declaration-level view of a Java source file. Method bodies,
//! initializers, and annotation arguments are not represented; only their
//! spans survive. Every node keeps the spans the rewriter needs as
//! insertion anchors, so a mutation is always expressible as "insert text
//! at this byte offset" against the original source.

use smallvec::SmallVec;

use crate::{Modifiers, Span};

/// A reference to a type as written in source, e.g. `List<String>` or
/// `a.b.Duck`. The text is the raw source slice; canonicalisation happens
/// in the signature layer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeRef {
    pub text: String,
    pub span: Span,
}

impl TypeRef {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        TypeRef {
            text: text.into(),
            span,
        }
    }
}

/// An annotation use site, e.g. `@Override` or `@a.b.DuckType(value = 1)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AnnotationUse {
    /// Dotted name as written, without `@` or arguments.
    pub name: String,
    /// Covers `@` through the closing parenthesis of any arguments.
    pub span: Span,
}

impl AnnotationUse {
    /// Last dotted segment, e.g. `DuckType` for `a.b.DuckType`.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// `package a.b;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PackageDecl {
    pub name: String,
    pub span: Span,
}

/// `import a.b.C;`, `import a.b.*;`, or `import static a.b.C.f;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImportDecl {
    /// Dotted path without any trailing `.*`.
    pub path: String,
    pub is_static: bool,
    pub on_demand: bool,
    /// Covers `import` through `;`.
    pub span: Span,
}

impl ImportDecl {
    /// Last segment of the path. Meaningless for on-demand imports.
    pub fn simple_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }
}

/// Kind of a top-level or nested type declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    /// `@interface`
    Annotation,
}

/// A single method (or constructor) declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodDecl {
    pub annotations: Vec<AnnotationUse>,
    pub modifiers: Modifiers,
    /// Span of `<T, ...>` method-level type parameters, when present.
    /// Not part of the canonical signature.
    pub type_params: Option<Span>,
    /// `None` for constructors.
    pub return_type: Option<TypeRef>,
    pub name: String,
    pub name_span: Span,
    pub params: SmallVec<[Param; 4]>,
    pub throws: Vec<TypeRef>,
    /// Body span including braces; `None` for abstract and native methods.
    pub body: Option<Span>,
    /// Byte offset of the declaration's first token (annotation, modifier,
    /// or return type). Annotations inserted at modifier position 0 land here.
    pub decl_start: u32,
    pub span: Span,
}

impl MethodDecl {
    /// Check for an annotation by simple name, e.g. `Override`.
    /// Matches both the unqualified and any qualified spelling.
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.simple_name() == simple_name)
    }
}

/// A formal parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub ty: TypeRef,
    pub name: String,
    /// `true` when declared with `...`. The host type model reports a
    /// varargs parameter as an array, so the signature layer normalises
    /// this to an array spelling.
    pub varargs: bool,
}

/// A field declaration. One declaration may introduce several names
/// (`int a, b;`). Mallard only reads fields for debug dumps.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDecl {
    pub annotations: Vec<AnnotationUse>,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub names: Vec<String>,
    pub span: Span,
}

/// A member of a type body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Member {
    Method(MethodDecl),
    Constructor(MethodDecl),
    Field(FieldDecl),
    /// Nested type declaration. Parsed but never grafted; the processor
    /// only considers top-level types.
    Type(TypeDecl),
    /// Static or instance initializer block.
    Init(Span),
}

/// A type declaration with its body members.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub annotations: Vec<AnnotationUse>,
    pub modifiers: Modifiers,
    pub name: String,
    pub name_span: Span,
    /// Span of `<T, ...>` type parameters, when present.
    pub type_params: Option<Span>,
    /// `extends` clause: at most one entry for classes, any number for
    /// interfaces.
    pub extends: Vec<TypeRef>,
    /// `implements` clause (classes only).
    pub implements: Vec<TypeRef>,
    /// Byte offset after which a fresh ` implements X` clause belongs:
    /// the end of the extends clause, type parameters, or the name,
    /// whichever comes last. Always before any `permits` clause.
    pub header_anchor: u32,
    /// Span of the body's opening `{`.
    pub body_open: Span,
    pub members: Vec<Member>,
    pub span: Span,
}

impl TypeDecl {
    /// Iterate the declared methods, constructors excluded.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }
}

/// One parsed source file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CompilationUnit {
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    /// The package name, or `""` for the unnamed package.
    pub fn package_name(&self) -> &str {
        self.package.as_ref().map_or("", |p| p.name.as_str())
    }

    /// Find a top-level type by simple name.
    pub fn type_by_name(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Insertion offset for a new import declaration: after the last
    /// import, else after the package declaration, else the start of the
    /// file.
    pub fn import_anchor(&self) -> u32 {
        self.imports
            .last()
            .map(|i| i.span.end)
            .or_else(|| self.package.as_ref().map(|p| p.span.end))
            .unwrap_or(0)
    }

    /// Check for an exact import of `path` (single-type, non-static).
    pub fn has_import(&self, path: &str) -> bool {
        self.imports
            .iter()
            .any(|i| !i.is_static && !i.on_demand && i.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unit_with_imports(paths: &[(&str, bool)]) -> CompilationUnit {
        let mut unit = CompilationUnit {
            package: Some(PackageDecl {
                name: "a.b".into(),
                span: Span::new(0, 12),
            }),
            ..CompilationUnit::default()
        };
        let mut at = 14;
        for (path, on_demand) in paths {
            unit.imports.push(ImportDecl {
                path: (*path).into(),
                is_static: false,
                on_demand: *on_demand,
                span: Span::new(at, at + 10),
            });
            at += 12;
        }
        unit
    }

    #[test]
    fn import_anchor_prefers_last_import() {
        let unit = unit_with_imports(&[("java.util.List", false), ("a.b.c", true)]);
        assert_eq!(unit.import_anchor(), 36);
    }

    #[test]
    fn import_anchor_falls_back_to_package() {
        let unit = unit_with_imports(&[]);
        assert_eq!(unit.import_anchor(), 12);
    }

    #[test]
    fn has_import_ignores_on_demand() {
        let unit = unit_with_imports(&[("a.b.I", false), ("x.y", true)]);
        assert!(unit.has_import("a.b.I"));
        assert!(!unit.has_import("x.y"));
    }

    #[test]
    fn annotation_simple_name() {
        let ann = AnnotationUse {
            name: "java.lang.Override".into(),
            span: Span::DUMMY,
        };
        assert_eq!(ann.simple_name(), "Override");
    }
}
