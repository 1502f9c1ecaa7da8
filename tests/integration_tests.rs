//! Integration tests for end-to-end translation.
//!
//! These tests verify that the complete pipeline works correctly from Go
//! source through preprocessing, tokenization, parsing and TypeScript emission.

use go2ts::{
    ast::ast::Node,
    compiler::compiler::{compile, CompileOptions},
    errors::errors::ErrorCategory,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    transpile, transpile_to,
};

fn translate(source: &str) -> String {
    let _ = env_logger::builder().is_test(true).try_init();
    transpile(source, &CompileOptions::default()).expect("source should translate")
}

#[test]
fn test_constant_declaration_dump() {
    let program = parse("const a = 2;".to_string(), None).expect("should parse");

    assert_eq!(program.body.len(), 1);
    assert_eq!(program.body[0].dump(), "ConstNode(Identifier(a) = Integer(2))");
}

#[test]
fn test_if_without_else() {
    let program = parse("if (2>1) {return true;}".to_string(), None).expect("should parse");

    let Node::IfElse(if_else) = &program.body[0] else {
        panic!("expected an if statement");
    };
    assert!(if_else.alternative.is_none());
    assert_eq!(if_else.consequence.body.len(), 1);
    assert_eq!(
        if_else.consequence.body[0].dump(),
        "ReturnStatement(Boolean(true))"
    );
}

#[test]
fn test_array_declaration() {
    assert_eq!(
        translate("var arr = [5]int{1,2,3,4,5}"),
        "let arr: number[] = [1, 2, 3, 4, 5];\n"
    );
}

#[test]
fn test_function_return_type_reaches_caller() {
    let output = translate("func add(a, b int) int { return a + b; }\nresult := add(1,2)");
    assert!(output.ends_with("let result: number = add(1,2);\n"));
}

#[test]
fn test_constant_bound_to_call_fails() {
    let source = "func add(a, b int) int { return a + b; }\nconst x = add(1, 2);";
    let error = transpile(source, &CompileOptions::default()).expect_err("should fail");

    assert_eq!(error.get_error_name(), "ConstantMisuse");
    assert_eq!(error.category(), ErrorCategory::Semantic);
}

#[test]
fn test_literals_restringify() {
    for literal in ["42", "\"hello world\"", "true", "false", "\"\""] {
        let program = parse(literal.to_string(), None).expect("should parse");
        let Node::ExpressionStatement(stmt) = &program.body[0] else {
            panic!("expected an expression statement");
        };
        assert_eq!(stmt.expression.to_string(), literal);
    }
}

#[test]
fn test_reparse_is_deterministic() {
    let source = "func add(x, y int) int {\n\treturn x + y\n}\nvar (\n\ta = 1\n\tb = [2]string{\"x\", \"y\"}\n)";

    let first = Node::Program(parse(source.to_string(), None).expect("should parse")).dump();
    let second = Node::Program(parse(source.to_string(), None).expect("should parse")).dump();
    assert_eq!(first, second);
}

#[test]
fn test_tokenize_ends_with_single_eof() {
    let tokens = tokenize("x := 1".to_string(), None);

    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
    assert_eq!(
        tokens.iter().filter(|token| token.kind == TokenKind::EOF).count(),
        1
    );
}

#[test]
fn test_grouped_declarations_emit_in_order() {
    let output = translate("var (\n\tg string = \"Grouped\"\n\th bool   = true\n\tc int    = 100\n)");

    assert_eq!(
        output.lines().collect::<Vec<&str>>(),
        vec![
            "let g: string = \"Grouped\";",
            "let h: boolean = true;",
            "let c: number = 100;",
        ]
    );
}

#[test]
fn test_deeply_nested_scope_resolution() {
    let source = "func a() {\n\tx := 1\n\tb := func() {\n\t\tc := func() {\n\t\t\ty := x\n\t\t}\n\t}\n}";
    assert!(translate(source).contains("\t\t\tlet y: number = x;\n"));

    let sibling = "func a() {\n\tx := 1\n}\nfunc b() {\n\ty := x\n}";
    let error = transpile(sibling, &CompileOptions::default()).expect_err("should fail");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_errors_carry_positions() {
    let error = transpile("x := 1\nvar y float = 2", &CompileOptions::default())
        .expect_err("should fail");

    assert_eq!(error.get_error_name(), "UnknownType");
    assert_eq!(error.get_position().0, 13);
    assert_eq!(error.category(), ErrorCategory::Syntax);
}

#[test]
fn test_stream_into_existing_sink() {
    let mut sink = b"// generated\n".to_vec();
    transpile_to("x := 1", &CompileOptions::default(), &mut sink).expect("should translate");

    assert_eq!(String::from_utf8(sink).unwrap(), "// generated\nlet x: number = 1;\n");
}

#[test]
fn test_failed_run_keeps_partial_output() {
    let program = parse("x := 1\ny := z".to_string(), None).expect("should parse");
    let mut sink = Vec::new();

    assert!(compile(&program, &mut sink, &CompileOptions::default()).is_err());
    assert_eq!(String::from_utf8(sink).unwrap(), "let x: number = 1;\n");
}

#[test]
fn test_translate_full_program() {
    let source = r#"package main

import "fmt"

func add(x, y int) int {
	return x + y
}

// Test comment

func checkPositive(num int) bool {
	return num > 0
}

func main() {
	var a int = 10
	var str string = "Hello"
	const flag bool = true
	var b int = 42

	var (
		g string = "Grouped"
		h bool   = true
		c int    = 100
	)

	j := []int{1, 2, 3, 4, 5}

	fmt.Println("Initial values:", a, str, b, g, h, c, j)

	result := add(a, b)
	fmt.Println("Result of add(a, b):", result)

	if flag != true {
		fmt.Println("Flag is false, unexpected.")
	} else {
		fmt.Println("Flag is true, as expected:", flag)
	}

	if checkPositive(result) {
		fmt.Println("Result is positive. Setting result to 10.")
		result = 10
	} else {
		fmt.Println("Result is not positive. Setting result to 20.")
		result = 20
	}

	fmt.Println("Final value of result:", result)
}
"#;

    let expected = r#"function add(x: number, y: number): number {
	return x + y;
}
function checkPositive(num: number): boolean {
	return num > 0;
}
function main(): void {
	let a: number = 10;
	let str: string = "Hello";
	const flag: boolean = true;
	let b: number = 42;
	let g: string = "Grouped";
	let h: boolean = true;
	let c: number = 100;
	let j: number[] = [1, 2, 3, 4, 5];
	console.log("Initial values:",a,str,b,g,h,c,j);
	let result: number = add(a,b);
	console.log("Result of add(a, b):",result);
	if (flag != true) {
		console.log("Flag is false, unexpected.");
	} else {
		console.log("Flag is true, as expected:",flag);
	}
	if (checkPositive(result)) {
		console.log("Result is positive. Setting result to 10.");
		result = 10;
	} else {
		console.log("Result is not positive. Setting result to 20.");
		result = 20;
	}
	console.log("Final value of result:",result);
}
"#;

    assert_eq!(translate(source), expected);
}
