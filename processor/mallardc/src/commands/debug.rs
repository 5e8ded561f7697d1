//! Debug commands: dump the lexer and parser views of a file.

use mallard_diagnostic::span_utils;
use mallard_graft::{signature, SyntacticMethod, TypeResolver};
use mallard_ir::TokenKind;
use rustc_hash::FxHashSet;

use super::read_file;

/// `mallard lex <file>`: print the token stream.
pub fn lex_file(path: &str) {
    let source = read_file(path);
    let output = mallard_lexer::lex(&source);

    for token in &output.tokens {
        if token.kind == TokenKind::Eof {
            break;
        }
        let (line, col) = span_utils::span_line_col(&source, token.span);
        println!("{line}:{col}\t{:?}\t{}", token.kind, token.text(&source));
    }

    for error in &output.errors {
        let (line, col) = span_utils::span_line_col(&source, error.span);
        eprintln!("error at {line}:{col}: {error}");
    }
    if output.has_errors() {
        std::process::exit(1);
    }
}

/// `mallard parse <file>`: print the declaration structure with
/// canonical method signatures.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    let unit = match mallard_parse::parse_source(&source) {
        Ok(unit) => unit,
        Err(err) => {
            let (line, col) = span_utils::line_col(&source, err.span.start);
            eprintln!("error[{}] at {line}:{col}: {err}", err.code);
            std::process::exit(1);
        }
    };

    println!("package {}", unit.package_name());
    for import in &unit.imports {
        let star = if import.on_demand { ".*" } else { "" };
        println!("import {}{star}", import.path);
    }

    let known = FxHashSet::default();
    let resolver = TypeResolver::for_unit(&unit, &known);
    for decl in &unit.types {
        println!("{:?} {}", decl.kind, decl.name);
        for method in decl.methods() {
            println!("    {}", signature(&SyntacticMethod::new(method, &resolver)));
        }
    }
}
