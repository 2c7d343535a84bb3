#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::parse;
use fyn_diagnostic::ErrorCode;
use fyn_ir::{Position, Span};
use pretty_assertions::assert_eq;

/// Compact rendering: tokens by raw text, bindings with their sigil,
/// blocks as `{...}`.
fn shape(block: &Block) -> Vec<String> {
    block
        .items()
        .iter()
        .map(|item| match item {
            Item::Token(t) => t.source_text().into_owned(),
            Item::Block(b) => format!("{{{}}}", b.text()),
        })
        .collect()
}

#[test]
fn plain_tokens_pass_through() {
    let program = parse("1 2+").unwrap();
    assert_eq!(shape(&program), ["1", " ", "2", "+"]);
}

#[test]
fn braces_fold_into_one_block() {
    let program = parse("{1+}d").unwrap();
    assert_eq!(shape(&program), ["{1+}", "d"]);
    let Item::Block(block) = &program.items()[0] else {
        panic!("expected a block");
    };
    assert_eq!(block.span(), Span::new(0, 4));
    assert_eq!(block.pos(), Position::START);
    assert_eq!(block.len(), 2);
}

#[test]
fn nested_braces_fold_recursively() {
    let program = parse("{{1}{2}}").unwrap();
    let Item::Block(outer) = &program.items()[0] else {
        panic!("expected a block");
    };
    assert_eq!(shape(outer), ["{1}", "{2}"]);
    assert!(outer.items().iter().all(|i| matches!(i, Item::Block(_))));
}

#[test]
fn lambda_sigil_wraps_one_item() {
    let program = parse("@+ 1").unwrap();
    assert_eq!(shape(&program), ["{+}", " ", "1"]);
    let Item::Block(block) = &program.items()[0] else {
        panic!("expected a block");
    };
    assert_eq!(block.pos(), Position::START);
    assert_eq!(block.span(), Span::new(0, 1));
}

#[test]
fn two_item_lambda_wraps_two_items() {
    let program = parse("#1+d").unwrap();
    assert_eq!(shape(&program), ["{1+}", "d"]);
}

#[test]
fn whitespace_counts_as_an_item() {
    let program = parse("# 1").unwrap();
    assert_eq!(shape(&program), ["{ 1}"]);
}

#[test]
fn lambda_reads_folded_block() {
    let program = parse("@{1 2}").unwrap();
    let Item::Block(outer) = &program.items()[0] else {
        panic!("expected a block");
    };
    assert_eq!(outer.text(), "{1 2}");
    assert!(matches!(outer.items()[0], Item::Block(_)));
}

#[test]
fn bindings_carry_the_name() {
    let program = parse("5&x@d.&q").unwrap();
    assert_eq!(shape(&program), ["5", "&x", "{d}", ".&q"]);
    let Item::Token(var) = &program.items()[1] else {
        panic!("expected a token");
    };
    assert_eq!(var.kind, TokenKind::SetVar);
    assert_eq!(var.raw(), "x");
    assert_eq!(var.pos, Position::new(1, 2));
    let Item::Token(func) = &program.items()[3] else {
        panic!("expected a token");
    };
    assert_eq!(func.kind, TokenKind::SetFunc);
    assert_eq!(func.raw(), "q");
}

#[test]
fn binding_to_a_block_uses_its_text() {
    let program = parse("&{ab}").unwrap();
    let Item::Token(var) = &program.items()[0] else {
        panic!("expected a token");
    };
    assert_eq!(var.raw(), "ab");
}

#[test]
fn sigils_compose() {
    let program = parse("@@+").unwrap();
    assert_eq!(shape(&program), ["{{+}}"]);
    let program = parse(".&q@d").unwrap();
    assert_eq!(shape(&program), [".&q", "{d}"]);
}

#[test]
fn sigils_resolve_inside_blocks() {
    let program = parse("{&x x}").unwrap();
    let Item::Block(block) = &program.items()[0] else {
        panic!("expected a block");
    };
    assert_eq!(shape(block), ["&x", " ", "x"]);
}

#[test]
fn sigil_at_end_is_malformed() {
    let err = parse("1 @").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.token.raw(), "@");
    assert_eq!(err.token.pos, Position::new(1, 3));

    let err = parse("#1").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1001);
    assert!(err.message.contains("after 1"));
}

#[test]
fn sigil_cannot_read_past_its_block() {
    let err = parse("{&}x").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.token.pos, Position::new(1, 2));
}

#[test]
fn unclosed_brace_is_malformed() {
    let err = parse("1 {2 {3}").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.token.pos, Position::new(1, 3));
    let diag = err.to_diagnostic();
    assert_eq!(diag.labels[0].span, Span::new(2, 3));
}

#[test]
fn stray_close_passes_through() {
    let program = parse("1}").unwrap();
    let Item::Token(close) = &program.items()[1] else {
        panic!("expected a token");
    };
    assert_eq!(close.kind, TokenKind::BlockClose);
}

#[test]
fn program_block_text_is_the_normalized_source() {
    let program = parse("(1 2)@+f").unwrap();
    assert_eq!(program.text(), "(1 2){+}f");
}

#[test]
fn sigil_table() {
    assert_eq!(Sigil::from_raw("#").map(Sigil::reads), Some(2));
    assert_eq!(Sigil::from_raw(".&"), Some(Sigil::SetFunc));
    assert_eq!(Sigil::from_raw(":&"), None);
}

#[test]
fn deeply_nested_braces() {
    let depth = 1_000;
    let source = format!("{}1{}", "{".repeat(depth), "}".repeat(depth));
    let program = parse(&source).unwrap();
    assert_eq!(program.len(), 1);
}
