//! Unit tests for the compiler module.
//!
//! This module contains tests for emission including:
//! - Declarations and the types chosen for them
//! - Functions, parameters and nested scopes
//! - Builtins and expression rendering
//! - Emitter errors

use crate::{
    ast::ast::Node,
    errors::errors::Error,
    parser::parser::parse,
};

use super::compiler::{compile, CompileOptions};

fn emit_with(source: &str, options: &CompileOptions) -> Result<String, Error> {
    let program = parse(source.to_string(), Some("test.go".to_string()))?;
    let mut out = Vec::new();
    compile(&program, &mut out, options)?;
    Ok(String::from_utf8(out).expect("emitted text should be utf-8"))
}

fn emit(source: &str) -> String {
    emit_with(source, &CompileOptions::default()).expect("source should compile")
}

fn emit_err(source: &str) -> Error {
    match emit_with(source, &CompileOptions::default()) {
        Ok(output) => panic!("expected an error, emitted:\n{}", output),
        Err(error) => error,
    }
}

#[test]
fn test_emit_array_declaration() {
    assert_eq!(
        emit("var arr = [5]int{1,2,3,4,5}"),
        "let arr: number[] = [1, 2, 3, 4, 5];\n"
    );
}

#[test]
fn test_emit_call_result_type() {
    let source = "func add(a, b int) int { return a + b; }\nresult := add(1,2)";

    assert_eq!(
        emit(source),
        "function add(a: number, b: number): number {\n\treturn a + b;\n}\nlet result: number = add(1,2);\n"
    );
}

#[test]
fn test_emit_primitive_declarations() {
    assert_eq!(emit("const a = 2"), "const a: number = 2;\n");
    assert_eq!(emit("s := \"hi\""), "let s: string = \"hi\";\n");
    assert_eq!(emit("var ok bool = true"), "let ok: boolean = true;\n");
    assert_eq!(emit("var n int"), "let n: number;\n");
    assert_eq!(emit("var a [5]int"), "let a: number[];\n");
}

#[test]
fn test_emit_explicit_type_wins() {
    assert_eq!(emit("var b bool = 1"), "let b: boolean = 1;\n");
}

#[test]
fn test_emit_grouped_declaration() {
    let output = emit("var (\n\ta = 1\n\tb string = \"x\"\n\tc = true\n)");

    assert_eq!(
        output,
        "let a: number = 1;\nlet b: string = \"x\";\nlet c: boolean = true;\n"
    );
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn test_emit_binary_initializer_types() {
    assert_eq!(
        emit("a := 1\nb := a + 2\nc := a > 1\nd := -a"),
        "let a: number = 1;\nlet b: number = a + 2;\nlet c: boolean = a > 1;\nlet d: number = -a;\n"
    );
}

#[test]
fn test_emit_mixed_operands_take_left_type() {
    assert_eq!(emit("s := \"a\" + 1"), "let s: string = \"a\" + 1;\n");
}

#[test]
fn test_emit_index_initializer() {
    assert_eq!(
        emit("xs := []int{1, 2}\ny := xs[0]"),
        "let xs: number[] = [1, 2];\nlet y: number = xs[0];\n"
    );
}

#[test]
fn test_emit_bare_array_of_names() {
    assert_eq!(
        emit("a := 1\nb := 2\ny := [a, b]"),
        "let a: number = 1;\nlet b: number = 2;\nlet y: number[] = [a, b];\n"
    );
    assert_eq!(
        emit("s := \"x\"\nn := [s, \"y\"][0]"),
        "let s: string = \"x\";\nlet n: string = [s, \"y\"][0];\n"
    );
}

#[test]
fn test_emit_indexed_literal() {
    assert_eq!(emit("x := [5][0]"), "let x: number = [5][0];\n");
}

#[test]
fn test_emit_parentheses_follow_tree() {
    assert_eq!(emit("x := (1 + 2) * 3"), "let x: number = (1 + 2) * 3;\n");
    assert_eq!(emit("x := 1 - (2 - 3)"), "let x: number = 1 - (2 - 3);\n");
    assert_eq!(emit("x := 1 + 2 * 3"), "let x: number = 1 + 2 * 3;\n");
}

#[test]
fn test_emit_builtins() {
    assert_eq!(
        emit("xs := [1, 2]\nfmt.Println(\"size\", len(xs))\nn := len(xs)"),
        "let xs: number[] = [1, 2];\nconsole.log(\"size\",xs.length);\nlet n: number = xs.length;\n"
    );
}

#[test]
fn test_emit_function_signatures() {
    assert_eq!(
        emit("func sum(nums ...int) int { return 0 }"),
        "function sum(...nums: number[]): number {\n\treturn 0;\n}\n"
    );
    assert_eq!(
        emit("func greet(name string) { return }"),
        "function greet(name: string): void {\n\treturn;\n}\n"
    );
}

#[test]
fn test_emit_if_else() {
    let source = "func check(n int) bool {\n\tif n > 0 {\n\t\treturn true\n\t} else {\n\t\treturn false\n\t}\n}";

    assert_eq!(
        emit(source),
        "function check(n: number): boolean {\n\tif (n > 0) {\n\t\treturn true;\n\t} else {\n\t\treturn false;\n\t}\n}\n"
    );
}

#[test]
fn test_emit_assignment() {
    assert_eq!(emit("x := 1\nx = x + 1"), "let x: number = 1;\nx = x + 1;\n");
}

#[test]
fn test_emit_nested_scopes_see_enclosing_names() {
    let source = "func outer() {\n\tx := 1\n\tinner := func() int {\n\t\ty := x\n\t\treturn y\n\t}\n}";

    assert_eq!(
        emit(source),
        "function outer(): void {\n\tlet x: number = 1;\n\tfunction inner(): number {\n\t\tlet y: number = x;\n\t\treturn y;\n\t}\n}\n"
    );
}

#[test]
fn test_emit_sibling_scopes_are_hidden() {
    let error = emit_err("func a() { x := 1 }\nfunc b() { y := x }");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_emit_block_scopes_end_with_block() {
    let error = emit_err("func f() {\n\tif true {\n\t\tx := 1\n\t}\n\ty := x\n}");
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_emit_hoists_top_level_functions() {
    let output = emit("func main() {\n\tr := add(1, 2)\n}\nfunc add(a, b int) int { return a + b }");
    assert!(output.contains("let r: number = add(1,2);"));
}

#[test]
fn test_emit_options() {
    let options = CompileOptions {
        indent: "  ".to_string(),
        call_main: true,
    };
    let output = emit_with("func main() {\n\tfmt.Println(1)\n}", &options).expect("should compile");

    assert_eq!(
        output,
        "function main(): void {\n  console.log(1);\n}\nmain();\n"
    );
}

#[test]
fn test_emit_call_main_needs_main() {
    let options = CompileOptions {
        call_main: true,
        ..CompileOptions::default()
    };
    let output = emit_with("x := 1", &options).expect("should compile");

    assert!(!output.contains("main();"));
}

#[test]
fn test_error_unresolved_name() {
    assert_eq!(emit_err("y := x").get_error_name(), "VariableNotDeclared");
    assert_eq!(emit_err("y := missing(1)").get_error_name(), "VariableNotDeclared");
    assert_eq!(emit_err("x = 1").get_error_name(), "VariableNotDeclared");
    assert_eq!(emit_err("y := [z, 1]").get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_error_index_non_array() {
    assert_eq!(emit_err("s := 1\ny := s[0]").get_error_name(), "NotIndexable");
}

#[test]
fn test_error_assign_to_constant() {
    assert_eq!(emit_err("const c = 1\nc = 2").get_error_name(), "AssignToConstant");
}

#[test]
fn test_error_anonymous_function_statement() {
    assert_eq!(emit_err("func() {}").get_error_name(), "UnsupportedNode");
}

#[test]
fn test_error_constant_bound_to_call_at_emission() {
    let mut program = parse("x := add(1, 2)".to_string(), None).expect("should parse");
    if let Node::Declaration(declaration) = &mut program.body[0] {
        declaration.is_constant = true;
    }

    let mut out = Vec::new();
    let error = compile(&program, &mut out, &CompileOptions::default())
        .expect_err("a constant bound to a call should not compile");
    assert_eq!(error.get_error_name(), "ConstantMisuse");
}
