//! Canonical method signatures.
//!
//! The whole basis of structural matching is that a method seen through
//! the host's element model and the same method seen through the parsed
//! syntax tree stringify identically. Both views implement the small
//! read-only [`MethodView`] capability, and both normalise their type
//! texts through the same [`TypeResolver`], so equality holds by
//! construction.
//!
//! Canonical form: `R N(P1, P2)` with an optional ` throws E1, E2` suffix.
//! Single space after the return type, no space before `(`, `", "` as the
//! separator. Method-level type parameter declarations are not part of the
//! signature; type arguments inside parameter types are preserved.

use rustc_hash::{FxHashMap, FxHashSet};

use mallard_ir::{CompilationUnit, MethodDecl};

/// Read-only view of a method declaration, implemented by both the
/// element model and the syntactic adapter.
pub trait MethodView {
    fn name(&self) -> &str;
    fn return_type_text(&self) -> String;
    fn parameter_type_texts(&self) -> Vec<String>;
    fn thrown_type_texts(&self) -> Vec<String>;
}

/// Compute the canonical signature string of a method view.
pub fn signature(view: &impl MethodView) -> String {
    let mut out = String::new();
    out.push_str(&view.return_type_text());
    out.push(' ');
    out.push_str(view.name());
    out.push('(');
    out.push_str(&view.parameter_type_texts().join(", "));
    out.push(')');
    let thrown = view.thrown_type_texts();
    if !thrown.is_empty() {
        out.push_str(" throws ");
        out.push_str(&thrown.join(", "));
    }
    out
}

/// Syntactic view of a method: a parsed declaration plus the unit's
/// resolver. Produces the same canonical texts as the element model for
/// the same underlying declaration.
pub struct SyntacticMethod<'a> {
    decl: &'a MethodDecl,
    resolver: &'a TypeResolver,
}

impl<'a> SyntacticMethod<'a> {
    pub fn new(decl: &'a MethodDecl, resolver: &'a TypeResolver) -> Self {
        SyntacticMethod { decl, resolver }
    }
}

impl MethodView for SyntacticMethod<'_> {
    fn name(&self) -> &str {
        &self.decl.name
    }

    fn return_type_text(&self) -> String {
        self.decl
            .return_type
            .as_ref()
            .map_or_else(String::new, |t| self.resolver.canonicalize(&t.text))
    }

    fn parameter_type_texts(&self) -> Vec<String> {
        self.decl
            .params
            .iter()
            .map(|p| {
                let mut text = self.resolver.canonicalize(&p.ty.text);
                if p.varargs {
                    text.push_str("[]");
                }
                text
            })
            .collect()
    }

    fn thrown_type_texts(&self) -> Vec<String> {
        self.decl
            .throws
            .iter()
            .map(|t| self.resolver.canonicalize(&t.text))
            .collect()
    }
}

/// Primitive type names, which never resolve.
const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Well-known `java.lang` types, implicitly imported everywhere.
const JAVA_LANG: &[&str] = &[
    "AutoCloseable",
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "ClassCastException",
    "ClassNotFoundException",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "IllegalArgumentException",
    "IllegalStateException",
    "IndexOutOfBoundsException",
    "Integer",
    "InterruptedException",
    "Iterable",
    "Long",
    "Math",
    "Number",
    "NullPointerException",
    "NumberFormatException",
    "Object",
    "Override",
    "Process",
    "Record",
    "Runnable",
    "Runtime",
    "RuntimeException",
    "SafeVarargs",
    "Short",
    "StackTraceElement",
    "String",
    "StringBuilder",
    "StringBuffer",
    "SuppressWarnings",
    "System",
    "Thread",
    "Throwable",
    "UnsupportedOperationException",
    "Void",
];

/// Per-unit name resolution for type spellings.
///
/// Maps a syntactic type text to the canonical text the host type model
/// would report: fully qualified where a binding resolves, the original
/// spelling otherwise. Resolution order for a simple name follows Java's
/// shadowing rules: single-type import, same-package type, on-demand
/// import against the round's known types, then implicit `java.lang`.
#[derive(Debug, Default)]
pub struct TypeResolver {
    package: String,
    /// Single-type imports: simple name to fully qualified name.
    explicit: FxHashMap<String, String>,
    /// On-demand import package prefixes.
    on_demand: Vec<String>,
    /// Fully qualified names of every type declared in the round.
    known: FxHashSet<String>,
}

impl TypeResolver {
    /// Build a resolver for one compilation unit.
    ///
    /// `known` is the set of fully qualified type names visible this
    /// round; the unit's own top-level types are added to it.
    pub fn for_unit(unit: &CompilationUnit, known: &FxHashSet<String>) -> Self {
        let package = unit.package_name().to_string();
        let mut resolver = TypeResolver {
            package: package.clone(),
            explicit: FxHashMap::default(),
            on_demand: Vec::new(),
            known: known.clone(),
        };
        for import in &unit.imports {
            if import.is_static {
                continue;
            }
            if import.on_demand {
                resolver.on_demand.push(import.path.clone());
            } else {
                resolver
                    .explicit
                    .insert(import.simple_name().to_string(), import.path.clone());
            }
        }
        for decl in &unit.types {
            resolver.known.insert(qualify(&package, &decl.name));
        }
        resolver
    }

    /// Resolve a simple (undotted) name to its canonical text.
    fn resolve_simple(&self, name: &str) -> String {
        if PRIMITIVES.contains(&name) {
            return name.to_string();
        }
        if let Some(fqn) = self.explicit.get(name) {
            return fqn.clone();
        }
        let same_package = qualify(&self.package, name);
        if self.known.contains(&same_package) {
            return same_package;
        }
        for prefix in &self.on_demand {
            let candidate = format!("{prefix}.{name}");
            if self.known.contains(&candidate) {
                return candidate;
            }
        }
        if JAVA_LANG.contains(&name) {
            return format!("java.lang.{name}");
        }
        // Type variables and unresolvable names keep their spelling.
        name.to_string()
    }

    /// Canonicalise a full type text: whitespace normalised, simple base
    /// names resolved, type arguments handled recursively, varargs
    /// rewritten to the array spelling the host type model reports.
    pub fn canonicalize(&self, text: &str) -> String {
        let mut parser = TypeText::new(text);
        let out = parser.parse_type(self);
        if out.is_empty() {
            text.trim().to_string()
        } else {
            out
        }
    }

    /// Canonical base name of a type text with any type arguments and
    /// array dimensions stripped. Used for implements-list comparisons,
    /// which are by fully qualified name only.
    pub fn canonical_base(&self, text: &str) -> String {
        let canonical = self.canonicalize(text);
        let end = canonical
            .find(['<', '['])
            .unwrap_or(canonical.len());
        canonical[..end].trim().to_string()
    }
}

/// Join a package and simple name, tolerating the unnamed package.
pub fn qualify(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{package}.{simple_name}")
    }
}

/// Minimal recursive parser over a type text.
struct TypeText<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> TypeText<'a> {
    fn new(text: &'a str) -> Self {
        TypeText {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.pos < self.bytes.len() && self.bytes[self.pos] == byte {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Skip type-use annotations like `@Nullable` or `@Checked(mode = 1)`.
    fn skip_annotations(&mut self) {
        loop {
            self.skip_ws();
            if !self.eat(b'@') {
                return;
            }
            self.parse_dotted();
            self.skip_ws();
            if self.eat(b'(') {
                let mut depth = 1usize;
                while depth > 0 {
                    match self.peek() {
                        Some(b'(') => depth += 1,
                        Some(b')') => depth -= 1,
                        None => return,
                        _ => {}
                    }
                    self.pos += 1;
                }
            }
        }
    }

    fn parse_word(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
        {
            self.pos += 1;
        }
        // Safety of slicing: word boundaries fall on ASCII bytes.
        std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("")
    }

    /// Parse a dotted name, whitespace around dots tolerated.
    fn parse_dotted(&mut self) -> String {
        let mut name = self.parse_word().to_string();
        loop {
            let mark = self.pos;
            self.skip_ws();
            if self.eat(b'.') {
                // `...` is varargs, not a qualifier.
                if self.peek() == Some(b'.') {
                    self.pos = mark;
                    return name;
                }
                self.skip_ws();
                let segment = self.parse_word();
                if segment.is_empty() {
                    self.pos = mark;
                    return name;
                }
                name.push('.');
                name.push_str(segment);
            } else {
                self.pos = mark;
                return name;
            }
        }
    }

    fn parse_type(&mut self, resolver: &TypeResolver) -> String {
        self.skip_annotations();
        self.skip_ws();

        // Wildcards.
        if self.eat(b'?') {
            let mark = self.pos;
            self.skip_ws();
            let word_start = self.pos;
            let word = self.parse_word();
            if word == "extends" || word == "super" {
                let bound = self.parse_type(resolver);
                return format!("? {} {bound}", word);
            }
            self.pos = if word.is_empty() { mark } else { word_start };
            return "?".to_string();
        }

        let base = self.parse_dotted();
        if base.is_empty() {
            return String::new();
        }
        let mut out = if base.contains('.') {
            base
        } else {
            resolver.resolve_simple(&base)
        };

        self.skip_ws();
        if self.eat(b'<') {
            self.skip_ws();
            if self.eat(b'>') {
                out.push_str("<>");
            } else {
                let mut args = vec![self.parse_type(resolver)];
                loop {
                    self.skip_ws();
                    if self.eat(b',') {
                        args.push(self.parse_type(resolver));
                    } else {
                        break;
                    }
                }
                self.skip_ws();
                self.eat(b'>');
                out.push('<');
                out.push_str(&args.join(", "));
                out.push('>');
            }
        }

        loop {
            self.skip_ws();
            self.skip_annotations();
            let mark = self.pos;
            if self.eat(b'[') {
                self.skip_ws();
                if self.eat(b']') {
                    out.push_str("[]");
                    continue;
                }
                self.pos = mark;
                break;
            }
            if self.bytes[self.pos..].starts_with(b"...") {
                self.pos += 3;
                out.push_str("[]");
                continue;
            }
            break;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mallard_parse::parse_source;
    use pretty_assertions::assert_eq;

    struct FakeMethod {
        name: &'static str,
        ret: &'static str,
        params: Vec<&'static str>,
        throws: Vec<&'static str>,
    }

    impl MethodView for FakeMethod {
        fn name(&self) -> &str {
            self.name
        }
        fn return_type_text(&self) -> String {
            self.ret.to_string()
        }
        fn parameter_type_texts(&self) -> Vec<String> {
            self.params.iter().map(|s| (*s).to_string()).collect()
        }
        fn thrown_type_texts(&self) -> Vec<String> {
            self.throws.iter().map(|s| (*s).to_string()).collect()
        }
    }

    #[test]
    fn signature_format() {
        let method = FakeMethod {
            name: "copy",
            ret: "int",
            params: vec!["java.lang.String", "long"],
            throws: vec![],
        };
        assert_eq!(signature(&method), "int copy(java.lang.String, long)");
    }

    #[test]
    fn signature_with_throws() {
        let method = FakeMethod {
            name: "read",
            ret: "void",
            params: vec![],
            throws: vec!["java.io.IOException", "java.lang.RuntimeException"],
        };
        assert_eq!(
            signature(&method),
            "void read() throws java.io.IOException, java.lang.RuntimeException"
        );
    }

    fn resolver_for(source: &str) -> TypeResolver {
        let unit = match parse_source(source) {
            Ok(unit) => unit,
            Err(err) => panic!("fixture must parse: {err}"),
        };
        let mut known = FxHashSet::default();
        known.insert("a.b.Duck".to_string());
        known.insert("a.b.Pond".to_string());
        known.insert("x.y.Water".to_string());
        TypeResolver::for_unit(&unit, &known)
    }

    #[test]
    fn resolves_explicit_import() {
        let resolver = resolver_for("package p;\nimport java.util.List;\nclass C {}");
        assert_eq!(resolver.canonicalize("List"), "java.util.List");
    }

    #[test]
    fn resolves_same_package_before_java_lang() {
        let resolver = resolver_for("package a.b;\nclass Duck {}");
        assert_eq!(resolver.canonicalize("Duck"), "a.b.Duck");
        assert_eq!(resolver.canonicalize("Pond"), "a.b.Pond");
    }

    #[test]
    fn resolves_on_demand_against_known_types() {
        let resolver = resolver_for("package p;\nimport x.y.*;\nclass C {}");
        assert_eq!(resolver.canonicalize("Water"), "x.y.Water");
    }

    #[test]
    fn java_lang_fallback() {
        let resolver = resolver_for("package p;\nclass C {}");
        assert_eq!(resolver.canonicalize("String"), "java.lang.String");
        assert_eq!(resolver.canonicalize("Override"), "java.lang.Override");
    }

    #[test]
    fn primitives_and_type_variables_stay_verbatim() {
        let resolver = resolver_for("package p;\nclass C {}");
        assert_eq!(resolver.canonicalize("int"), "int");
        assert_eq!(resolver.canonicalize("T"), "T");
    }

    #[test]
    fn qualified_names_are_untouched() {
        let resolver = resolver_for("package p;\nclass C {}");
        assert_eq!(resolver.canonicalize("java.io.File"), "java.io.File");
    }

    #[test]
    fn generics_resolve_recursively() {
        let resolver =
            resolver_for("package p;\nimport java.util.List;\nimport java.util.Map;\nclass C {}");
        assert_eq!(
            resolver.canonicalize("Map<String,List<String>>"),
            "java.util.Map<java.lang.String, java.util.List<java.lang.String>>"
        );
    }

    #[test]
    fn whitespace_is_normalised() {
        let resolver = resolver_for("package p;\nimport java.util.List;\nclass C {}");
        assert_eq!(
            resolver.canonicalize("List < String >"),
            "java.util.List<java.lang.String>"
        );
    }

    #[test]
    fn arrays_and_varargs() {
        let resolver = resolver_for("package p;\nclass C {}");
        assert_eq!(resolver.canonicalize("String[]"), "java.lang.String[]");
        assert_eq!(resolver.canonicalize("int[][]"), "int[][]");
        assert_eq!(resolver.canonicalize("String..."), "java.lang.String[]");
    }

    #[test]
    fn wildcards() {
        let resolver = resolver_for("package p;\nimport java.util.List;\nclass C {}");
        assert_eq!(
            resolver.canonicalize("List<? extends Number>"),
            "java.util.List<? extends java.lang.Number>"
        );
        assert_eq!(resolver.canonicalize("List<?>"), "java.util.List<?>");
    }

    #[test]
    fn type_use_annotations_are_dropped() {
        let resolver = resolver_for("package p;\nclass C {}");
        assert_eq!(resolver.canonicalize("@Nullable String"), "java.lang.String");
    }

    #[test]
    fn canonical_base_strips_arguments() {
        let resolver = resolver_for("package p;\nimport java.util.List;\nclass C {}");
        assert_eq!(resolver.canonical_base("List<String>"), "java.util.List");
        assert_eq!(resolver.canonical_base("String[]"), "java.lang.String");
    }
}
