use std::fs;

use quill::{
    error::{Error, LexErrorKind, RuntimeErrorKind},
    evaluate,
    interpreter::{environment::Context, value::Value},
};
use walkdir::WalkDir;

fn run(src: &str) -> Result<Value, Error> {
    evaluate(&Context::global(), "<test>", src)
}

fn assert_success(src: &str) -> Value {
    run(src).unwrap_or_else(|e| panic!("Script failed:\n{src}\n{e}"))
}

fn assert_value(src: &str, expected: &str) {
    assert_eq!(assert_success(src).to_string(), expected, "script:\n{src}");
}

fn assert_failure(src: &str) -> Error {
    match run(src) {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail:\n{src}"),
        Err(e) => e,
    }
}

fn runtime_kind(src: &str) -> RuntimeErrorKind {
    match assert_failure(src) {
        Error::Runtime(e) => e.kind,
        other => panic!("expected a runtime error, got:\n{other}"),
    }
}

#[test]
fn scripts_evaluate_to_true() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "ql"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        match evaluate(&Context::global(), &path.display().to_string(), &content) {
            Ok(value) => assert!(value.is_true(), "{path:?} evaluated to {value}"),
            Err(e) => panic!("Script {path:?} failed:\n{e}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn readme_examples_work() {
    let content = fs::read_to_string("README.md").expect("README.md is readable");
    let blocks = extract_quill_blocks(&content);
    assert!(!blocks.is_empty(), "No quill examples found in README.md");

    for (i, code) in blocks.iter().enumerate() {
        if let Err(e) = run(code) {
            panic!("README example {} failed:\n{code}\nError: {e}", i + 1);
        }
    }
}

fn extract_quill_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```quill") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

#[test]
fn number_literals_evaluate_to_themselves() {
    for literal in ["0", "7", "42", "3.25", "0.5", "1.", "1000000"] {
        let expected: f64 = literal.parse().unwrap();
        let value = assert_success(literal);
        assert_eq!(value, Value::from(expected), "literal {literal}");
    }
}

#[test]
fn operator_precedence() {
    assert_value("1 + 2 * 3", "7");
    assert_value("(1 + 2) * 3", "9");
    assert_value("2 ^ 3 ^ 2", "512");
    assert_value("-2 ^ 2", "-4");
    assert_value("10 - 4 - 3", "3");
    assert_value("1 < 2 and 2 < 3", "1");
    assert_value("not 1 == 2", "1");
    assert_value("7 / 2", "3.5");
}

#[test]
fn division_by_zero_is_not_an_illegal_operation() {
    assert_eq!(runtime_kind("5 / 0"), RuntimeErrorKind::DivisionByZero);

    let Error::Runtime(e) = assert_failure("var a = 5 / (2 - 2)") else {
        panic!("expected a runtime error");
    };
    assert_eq!(e.span.start.column, 13);
    assert_eq!(e.span.end.column, 18);
}

#[test]
fn variables() {
    assert_value("var x = 5\nx + 1", "6");
    assert_value("var x\nx", "null");
    assert_value("var x = 1; x = x + 1; x", "2");
    assert_value("var a = var b = 3\na + b", "6");
    assert_eq!(runtime_kind("y + 1"),
               RuntimeErrorKind::UndefinedVariable { name: "y".into() });
    assert_eq!(runtime_kind("y = 1"),
               RuntimeErrorKind::UndefinedVariable { name: "y".into() });
}

#[test]
fn predefined_constants() {
    assert_value("TRUE + FALSE", "1");
    assert_value("NULL", "null");
}

#[test]
fn functions_and_arity() {
    assert_value("fun add(a, b) -> { a + b }\nadd(2, 3)", "5");
    assert_eq!(runtime_kind("fun add(a, b) -> { a + b }\nadd(2)"),
               RuntimeErrorKind::TooFewArgs { count: 1,
                                              name:  "add".into(), });
    assert_eq!(runtime_kind("fun add(a, b) -> { a + b }\nadd(1, 2, 3, 4)"),
               RuntimeErrorKind::TooManyArgs { count: 2,
                                               name:  "add".into(), });
    assert_eq!(runtime_kind("println()"),
               RuntimeErrorKind::TooFewArgs { count: 1,
                                              name:  "println".into(), });
}

#[test]
fn statement_form_functions_return_null() {
    assert_value("fun f(a) { a + 1 }\nf(1)", "null");
    assert_value("var g = fun (a) -> { a * 2 }\ng(4)", "8");
    assert_value("fun f() -> {}\nf()", "null");
}

#[test]
fn functions_are_values() {
    assert_value("fun twice(f, x) -> { f(f(x)) }\ntwice(fun (n) -> { n + 3 }, 1)", "7");
    assert_value("fun named() -> { 1 }", "<function named>");
    assert_value("fun () -> { 1 }", "<anonymous function>");
    assert_value("isNumber", "<built-in function isNumber>");
    assert_eq!(runtime_kind("var x = 3\nx(1)"),
               RuntimeErrorKind::NotCallable { found: "Number" });
}

#[test]
fn for_loops() {
    assert_value("for i = 0 to 3 { i }", "[0, 1, 2]");
    assert_value("for i = 0 to 10 step 4 { i * 10 }", "[0, 40, 80]");
    assert_value("for i = 3 to 0 step -1 { i }", "[3, 2, 1]");
    assert_value("for i = 0 to 0 { i }", "[]");
    assert_value("var total = 0\nfor i = 1 to 5 {\n  total = total + i\n}", "null");
    assert_value("var total = 0\nfor i = 1 to 5 {\n  total = total + i\n}\ntotal", "10");
    assert_value("for i = 0 to 2 { i }\ni", "1");
    assert!(matches!(runtime_kind("for i = \"a\" to 3 { i }"),
                     RuntimeErrorKind::ExpectedNumber { bound: "start",
                                                        .. }));
}

#[test]
fn while_loops() {
    assert_value("var i = 0\nwhile i < 3 { i = i + 1 }", "[1, 2, 3]");
    assert_value("var i = 0\nwhile i < 3 {\n  i = i + 1\n}\ni", "3");
    assert_value("while 0 { 1 }", "[]");
}

#[test]
fn if_chains() {
    assert_value("if 0 { 1 } elif 1 { 2 } else { 3 }", "2");
    assert_value("if 0 { 1 }\nelif 0 { 2 }\nelse { 3 }", "3");
    assert_value("if 0 { 1 }", "null");
    assert_value("if 1 {\n  5\n}", "null");
    assert_value("var x = 2\nif x == 1 { \"one\" }\nelif x == 2 { \"two\" }", "two");
    assert_value("if \"\" { 1 } else { 2 }", "2");
    assert_value("if [1] { 1 } else { 2 }", "2");
}

#[test]
fn lists() {
    assert!(matches!(runtime_kind("[1,2,3][5]"),
                     RuntimeErrorKind::IndexOutOfBounds { len: 3, .. }));
    assert!(matches!(runtime_kind("[1,2,3][1.5]"),
                     RuntimeErrorKind::IndexOutOfBounds { .. }));
    assert!(matches!(runtime_kind("[1,2,3][-1]"),
                     RuntimeErrorKind::IndexOutOfBounds { .. }));
    assert_eq!(runtime_kind("[1,2,3][\"0\"]"),
               RuntimeErrorKind::InvalidIndex { found: "String" });
    assert_value("[1,2,3] + 4", "[1, 2, 3, 4]");
    assert_value("[1,2,3] - 1", "[1, 3]");
    assert_value("[[1, 2], [3, 4]][1][0]", "3");
    assert_value("[\"a\", 1]", "[\"a\", 1]");
    assert_value("[]", "[]");
}

#[test]
fn list_copies_share_elements() {
    assert_value("var a = [1]\nvar b = a\nb + 2\na", "[1, 2]");
    assert_value("fun push(xs) { xs + 9 }\nvar a = []\npush(a)\na", "[9]");
}

#[test]
fn lists_holding_themselves_print_a_placeholder() {
    assert_value("var a = []\na + a\na", "[[...]]");
    assert_value("var a = [1]\nvar b = [a, a]\na + b\nb", "[[1, [...]], [1, [...]]]");

    let first = assert_success("var a = []\na + a\na");
    let second = assert_success("var b = []\nb + b\nb");
    assert_eq!(first, second);
}

#[test]
fn strings() {
    assert_value("\"foo\" + \"bar\"", "foobar");
    assert_value("\"n = \" + 4", "n = 4");
    assert_value("2.5 + \"!\"", "2.5!");
    assert_value("\"tab\\tquote\\\"\"", "tab\tquote\"");
    assert_eq!(runtime_kind("\"a\" * 3"),
               RuntimeErrorKind::IllegalOperation { op:    "*",
                                                    left:  "String",
                                                    right: "Number", });
    assert_eq!(runtime_kind("-\"a\""),
               RuntimeErrorKind::IllegalUnaryOperation { op:      "-",
                                                         operand: "String", });
}

#[test]
fn type_predicates() {
    assert_value("isNumber(1) + isString(\"s\") + isList([]) + isFunction(println)", "4");
    assert_value("fun f() -> { 0 }\nisFunction(f)", "1");
    assert_value("isNumber(\"1\")", "0");
}

#[test]
fn illegal_character_spans_one_column() {
    let Error::Lex(e) = assert_failure("var x = 1\nx @ 2") else {
        panic!("expected a lex error");
    };
    assert_eq!(e.kind, LexErrorKind::IllegalCharacter { character: '@' });
    assert_eq!((e.span.start.line, e.span.start.column), (1, 2));
    assert_eq!((e.span.end.line, e.span.end.column), (1, 3));
}

#[test]
fn closures_see_later_updates() {
    assert_value("fun outer() -> {\n  var x = 1\n  fun inner() -> { x }\n  x = 2\n  inner()\n}\nouter()",
                 "2");
    assert_value("var n = 1\nfun get() -> { n }\nn = 10\nget()", "10");
}

#[test]
fn closures_capture_their_defining_call() {
    let src = "fun counter(start) -> {\n  fun () -> { start }\n}\nvar a = counter(1)\nvar b = \
               counter(2)\na() + b() * 10";
    assert_value(src, "21");
}

#[test]
fn parameters_do_not_leak() {
    assert_eq!(runtime_kind("fun f(p) -> { p }\nf(1)\np"),
               RuntimeErrorKind::UndefinedVariable { name: "p".into() });
    assert_value("var p = 5\nfun f(p) -> { p }\nf(1) + p", "6");
}

#[test]
fn recursion() {
    let src = "fun fib(n) -> {\n  if n < 2 { n } else { fib(n - 1) + fib(n - 2) }\n}\nfib(15)";
    assert_value(src, "610");
}

#[test]
fn syntax_errors_render_the_location() {
    let e = assert_failure("var x = (1 + 2");
    assert!(matches!(e, Error::Parse(_)));
    let rendered = e.to_string();
    assert!(rendered.starts_with("Invalid Syntax: Expected ')'"), "{rendered}");
    assert!(rendered.contains("At <test> (1:15)"), "{rendered}");
    let excerpt = format!("var x = (1 + 2\n{}^", " ".repeat(14));
    assert!(rendered.ends_with(&excerpt), "{rendered}");
}

#[test]
fn runtime_errors_render_a_stack_trace() {
    let src = "fun outer() -> {\n  fun inner(a) -> { a / 0 }\n  inner(1)\n}\nouter()";
    let e = assert_failure(src);
    let Error::Runtime(runtime) = &e else {
        panic!("expected a runtime error");
    };

    let labels: Vec<_> = runtime.trace.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["<program>", "outer", "inner"]);
    let lines: Vec<_> = runtime.trace.iter().map(|f| f.position.line).collect();
    assert_eq!(lines, vec![4, 2, 1]);

    let expected = format!("Runtime Error: Division by zero\n\
                            Stacktrace (most recent call last):\n\
                            \tat <program>(<test>:5)\n\
                            \tat outer(<test>:3)\n\
                            \tat inner(<test>:2)\n\
                            \n  fun inner(a) -> {{ a / 0 }}\n{}^",
                           " ".repeat(24));
    assert_eq!(e.to_string(), expected);
}

#[test]
fn frames_follow_the_defining_context() {
    let src = "fun inner(a) -> { a / 0 }\nfun outer() -> { inner(1) }\nouter()";
    let Error::Runtime(e) = assert_failure(src) else {
        panic!("expected a runtime error");
    };
    let labels: Vec<_> = e.trace.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec!["<program>", "inner"]);
}

#[test]
fn lex_errors_render_the_excerpt() {
    let rendered = assert_failure("1 !").to_string();
    assert!(rendered.starts_with("Expected Character: '=' (after '!')\nAt <test> (1:3)"),
            "{rendered}");

    let rendered = assert_failure("\"open").to_string();
    assert!(rendered.starts_with("Expected Character: '\"' (to close the string)"),
            "{rendered}");
}

#[test]
fn bindings_persist_across_evaluations() {
    let root = Context::global();
    evaluate(&root, "<first>", "fun sq(x) -> { x * x }").unwrap();
    let value = evaluate(&root, "<second>", "sq(12)").unwrap();
    assert_eq!(value.to_string(), "144");
}

#[test]
fn empty_programs_are_null() {
    assert_value("", "null");
    assert_value("\n\n# only a comment\n", "null");
}
