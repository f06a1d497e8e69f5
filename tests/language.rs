use std::{cell::RefCell, fs, io, rc::Rc};

use loxide::{
    ErrorReporter,
    ast::format_program,
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::core::Interpreter,
        scanner::{Token, TokenKind, scan},
        value::core::Value,
    },
    parse_source, run,
};
use walkdir::WalkDir;

/// An output sink the test can read back after the interpreter wrote to it.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("interpreter output is UTF-8")
    }
}

struct Outcome {
    value:             Option<Value>,
    stdout:            String,
    had_error:         bool,
    had_runtime_error: bool,
}

fn run_source(source: &str) -> Outcome {
    let buffer = SharedBuffer::default();
    let mut interpreter = Interpreter::with_output(Box::new(buffer.clone()));
    let mut reporter = ErrorReporter::new();

    let value = run(source, &mut interpreter, &mut reporter);

    Outcome { value,
              stdout: buffer.contents(),
              had_error: reporter.had_error(),
              had_runtime_error: reporter.had_runtime_error() }
}

fn assert_prints(source: &str, expected: &str) {
    let outcome = run_source(source);
    assert!(!outcome.had_error, "unexpected syntax error in {source:?}");
    assert!(!outcome.had_runtime_error,
            "unexpected runtime error in {source:?}");
    assert_eq!(outcome.stdout, expected, "output mismatch for {source:?}");
}

fn assert_runtime_error(source: &str) {
    let outcome = run_source(source);
    assert!(!outcome.had_error, "unexpected syntax error in {source:?}");
    assert!(outcome.had_runtime_error,
            "expected a runtime error in {source:?}");
}

fn assert_syntax_error(source: &str) {
    let outcome = run_source(source);
    assert!(outcome.had_error, "expected a syntax error in {source:?}");
    assert!(!outcome.had_runtime_error,
            "the evaluator must not run after syntax errors in {source:?}");
}

#[test]
fn prints_the_value_of_an_expression() {
    assert_prints("print 1 + 2;", "3\n");
}

#[test]
fn variables_declare_assign_and_read() {
    assert_prints("var a = 1; var b = 2; print a + b; a = 10; print a * b;",
                  "3\n20\n");
}

#[test]
fn var_without_initializer_binds_nil() {
    assert_prints("var a; print a == nil;", "true\n");
}

#[test]
fn assignment_is_an_expression_returning_its_value() {
    assert_prints("var a = 1; print a = 2; print a;", "2\n2\n");
}

#[test]
fn while_loops_iterate() {
    assert_prints("var i = 0; while (i < 3) { print i; i = i + 1; }",
                  "0\n1\n2\n");
}

#[test]
fn for_loops_desugar_to_while() {
    assert_prints("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
}

#[test]
fn for_loop_clauses_are_optional() {
    assert_prints("var i = 0; for (; i < 2;) { print i; i = i + 1; }",
                  "0\n1\n");
}

#[test]
fn recursive_functions_work() {
    assert_prints("fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } \
                   print fib(8);",
                  "21\n");
}

#[test]
fn closures_capture_their_declaration_environment() {
    assert_prints("fun make() { var c = 0; fun inc() { c = c + 1; return c; } return inc; } \
                   var f = make(); print f(); print f();",
                  "1\n2\n");
}

#[test]
fn closures_see_later_mutations_of_captured_variables() {
    assert_prints("var x = \"before\"; fun show() { print x; } show(); x = \"after\"; show();",
                  "before\nafter\n");
}

#[test]
fn blocks_shadow_and_restore() {
    assert_prints("var a = 1; { var a = 2; print a; } print a;", "2\n1\n");
}

#[test]
fn else_binds_to_the_nearest_if() {
    assert_prints("if (true) if (false) print \"inner\"; else print \"else\";",
                  "else\n");
}

#[test]
fn string_concatenation() {
    assert_prints("print \"foo\" + \"bar\";", "foobar\n");
}

#[test]
fn truthiness_only_rejects_nil_and_false() {
    assert_prints("if (0) print \"zero\"; if (\"\") print \"empty\"; \
                   if (nil) print \"nil\"; if (false) print \"false\";",
                  "zero\nempty\n");
}

#[test]
fn equality_rules() {
    assert_prints("print nil == nil; print nil == false; print 1 == \"1\"; \
                   print \"a\" == \"a\"; print true == true;",
                  "true\nfalse\nfalse\ntrue\ntrue\n");
}

#[test]
fn nan_is_not_equal_to_itself() {
    assert_prints("print 0 / 0 == 0 / 0;", "false\n");
}

#[test]
fn division_by_zero_is_infinite_not_an_error() {
    assert_prints("print 1 / 0; print -1 / 0;", "inf\n-inf\n");
}

#[test]
fn integral_numbers_print_without_a_fractional_part() {
    assert_prints("print 3.0; print 2.5 + 2.5; print 0.5; print 10 / 4;",
                  "3\n5\n0.5\n2.5\n");
}

#[test]
fn logical_operators_short_circuit() {
    assert_prints("var calls = 0; fun bump() { calls = calls + 1; return true; } \
                   print false and bump(); print calls; \
                   print true or bump(); print calls;",
                  "false\n0\ntrue\n0\n");
}

#[test]
fn logical_operators_return_the_deciding_operand() {
    assert_prints("print nil or \"fallback\"; print \"first\" and \"second\";",
                  "fallback\nsecond\n");
}

#[test]
fn unary_operators() {
    assert_prints("print -5; print --5; print !true; print !nil; print !!0;",
                  "-5\n5\nfalse\ntrue\ntrue\n");
}

#[test]
fn functions_and_natives_display_their_names() {
    assert_prints("fun greet() {} print greet; print clock;",
                  "<fn greet>\n<native fn clock>\n");
}

#[test]
fn clock_returns_a_positive_number_of_seconds() {
    assert_prints("print clock() > 0;", "true\n");
}

#[test]
fn return_defaults_to_nil() {
    assert_prints("fun early() { return; } fun fallthrough() {} \
                   print early() == nil; print fallthrough() == nil;",
                  "true\ntrue\n");
}

#[test]
fn return_escapes_nested_blocks() {
    assert_prints("fun find() { while (true) { if (true) { return \"deep\"; } } } \
                   print find();",
                  "deep\n");
}

#[test]
fn return_at_top_level_yields_the_final_value() {
    let outcome = run_source("return 42;");
    assert!(!outcome.had_runtime_error,
            "a top-level return is not a runtime error");
    assert_eq!(outcome.value, Some(Value::Number(42.0)));

    assert_eq!(run_source("return;").value, Some(Value::Nil));
}

#[test]
fn the_final_expression_statement_value_is_surfaced() {
    assert_eq!(run_source("1 + 2;").value, Some(Value::Number(3.0)));
    assert_eq!(run_source("1; 2;").value, Some(Value::Number(2.0)));
    assert_eq!(run_source("print 1;").value, None);
    assert_eq!(run_source("var x = 5;").value, None);
}

#[test]
fn definitions_persist_across_runs_of_one_interpreter() {
    let buffer = SharedBuffer::default();
    let mut interpreter = Interpreter::with_output(Box::new(buffer.clone()));
    let mut reporter = ErrorReporter::new();

    run("var kept = 41;", &mut interpreter, &mut reporter);
    run("print kept + 1;", &mut interpreter, &mut reporter);

    assert!(!reporter.had_error() && !reporter.had_runtime_error());
    assert_eq!(buffer.contents(), "42\n");
}

#[test]
fn mixed_plus_is_a_runtime_error() {
    assert_runtime_error("print \"a\" + 1;");
}

#[test]
fn comparison_requires_numbers() {
    assert_runtime_error("print 1 < \"2\";");
}

#[test]
fn negating_a_non_number_is_an_error() {
    assert_runtime_error("print -\"muffin\";");
}

#[test]
fn undefined_variable_reads_are_errors() {
    assert_runtime_error("print ghost;");
}

#[test]
fn runtime_errors_abort_the_statement_sequence() {
    let outcome = run_source("print 1; print \"a\" + 1; print 2;");
    assert!(outcome.had_runtime_error);
    assert_eq!(outcome.stdout, "1\n", "statements after the error must not run");
}

#[test]
fn failed_assignment_creates_no_binding() {
    let buffer = SharedBuffer::default();
    let mut interpreter = Interpreter::with_output(Box::new(buffer.clone()));
    let mut reporter = ErrorReporter::new();

    run("ghost = 1;", &mut interpreter, &mut reporter);
    assert!(reporter.had_runtime_error());
    reporter.reset();

    // Were the failed assignment to write through, this read would succeed.
    run("print ghost;", &mut interpreter, &mut reporter);
    assert!(reporter.had_runtime_error());
    assert_eq!(buffer.contents(), "");
}

#[test]
fn call_arity_is_checked() {
    assert_runtime_error("fun add(a, b) { return a + b; } print add(1);");
    assert_runtime_error("fun add(a, b) { return a + b; } print add(1, 2, 3);");
    assert_prints("fun add(a, b) { return a + b; } print add(1, 2);", "3\n");
}

#[test]
fn calling_a_non_callable_is_an_error() {
    assert_runtime_error("\"not a function\"();");
    assert_runtime_error("nil();");
}

#[test]
fn invalid_assignment_targets_are_reported() {
    assert_syntax_error("(a) = 1;");
    assert_syntax_error("var a = 1; a + 1 = 2;");
}

#[test]
fn unterminated_strings_are_reported() {
    assert_syntax_error("print \"no closing quote;");
}

#[test]
fn unexpected_characters_are_reported() {
    assert_syntax_error("var a = 1; @");
}

#[test]
fn stray_class_keywords_are_syntax_errors() {
    // `class` stays in the token set but no grammar rule accepts it.
    assert_syntax_error("class Breakfast {}");
}

#[test]
fn parser_recovers_and_keeps_the_good_statements() {
    let mut reporter = ErrorReporter::new();
    let program = parse_source("var = 1; print 1; var 2 = 3; print 2;", &mut reporter);

    assert!(reporter.had_error());
    // Both broken declarations are dropped, both prints survive.
    assert_eq!(program.len(), 2);
}

fn wide_call(count: usize) -> String {
    let params = (0..count).map(|i| format!("p{i}"))
                           .collect::<Vec<_>>()
                           .join(", ");
    let args = (0..count).map(|i| i.to_string())
                         .collect::<Vec<_>>()
                         .join(", ");
    format!("fun wide({params}) {{ return 0; }} wide({args});")
}

#[test]
fn calls_accept_up_to_255_arguments() {
    let outcome = run_source(&wide_call(255));
    assert!(!outcome.had_error && !outcome.had_runtime_error);
    assert_eq!(outcome.value, Some(Value::Number(0.0)));
}

#[test]
fn calls_past_255_arguments_report_but_still_parse() {
    let mut reporter = ErrorReporter::new();
    let program = parse_source(&wide_call(256), &mut reporter);

    assert!(reporter.had_error());
    assert_eq!(program.len(), 2, "the declaration and the call are both kept");
}

#[test]
fn scanner_ends_with_a_single_eof_on_the_final_line() {
    let mut reporter = ErrorReporter::new();
    let tokens = scan("var answer = 42; // the answer\nprint answer;", &mut reporter);

    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes,
               vec!["var", "answer", "=", "42", ";", "print", "answer", ";", ""]);

    let eof_count = tokens.iter()
                          .filter(|t| t.kind == TokenKind::Eof)
                          .count();
    assert_eq!(eof_count, 1);
    assert_eq!(tokens.last().map(|t| t.line), Some(2));
    assert!(!reporter.had_error());
}

#[test]
fn string_literals_span_lines_and_count_them() {
    let mut reporter = ErrorReporter::new();
    let tokens = scan("\"first\nsecond\"", &mut reporter);

    assert_eq!(tokens[0].kind, TokenKind::Str("first\nsecond".to_string()));
    assert_eq!(tokens[0].line, 2);
    assert_eq!(tokens.last().map(|t| t.line), Some(2));
}

#[test]
fn a_trailing_dot_is_not_part_of_a_number() {
    let mut reporter = ErrorReporter::new();
    let tokens = scan("123.", &mut reporter);

    assert_eq!(tokens[0].kind, TokenKind::Number(123.0));
    assert_eq!(tokens[0].lexeme, "123");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
}

#[test]
fn keywords_do_not_swallow_identifiers() {
    let mut reporter = ErrorReporter::new();
    let tokens = scan("or orchid class classy", &mut reporter);

    let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
    assert_eq!(kinds,
               vec![&TokenKind::Or,
                    &TokenKind::Identifier,
                    &TokenKind::Class,
                    &TokenKind::Identifier,
                    &TokenKind::Eof]);
}

#[test]
fn parse_diagnostics_render_verbatim() {
    let semicolon = Token { kind:   TokenKind::Semicolon,
                            lexeme: ";".to_string(),
                            line:   4, };
    let eof = Token { kind:   TokenKind::Eof,
                      lexeme: String::new(),
                      line:   7, };

    assert_eq!(ParseError::UnterminatedString { line: 3 }.to_string(),
               "[line 3] Error: Unterminated string.");
    assert_eq!(ParseError::UnexpectedCharacter { character: '@', line: 1 }.to_string(),
               "[line 1] Error: Unexpected character: @");
    assert_eq!(ParseError::ExpectedExpression { token: semicolon.clone() }.to_string(),
               "[line 4] Error at ';': Expect expression.");
    assert_eq!(ParseError::ExpectedExpression { token: eof }.to_string(),
               "[line 7] Error at end: Expect expression.");
    assert_eq!(ParseError::InvalidAssignmentTarget { token: Token { kind:   TokenKind::Equal,
                                                                    lexeme: "=".to_string(),
                                                                    line:   2, } }.to_string(),
               "[line 2] Error at '=': Invalid assignment target.");
    assert_eq!(ParseError::TooManyArguments { token: semicolon }.to_string(),
               "[line 4] Error at ';': Can't have more than 255 arguments.");
}

#[test]
fn runtime_diagnostics_render_verbatim() {
    assert_eq!(RuntimeError::OperandMustBeNumber { line: 1 }.to_string(),
               "Operand must be a number.\n[line 1]");
    assert_eq!(RuntimeError::OperandsMustBeNumbers { line: 1 }.to_string(),
               "Operands must be numbers.\n[line 1]");
    assert_eq!(RuntimeError::OperandsMustBeNumbersOrStrings { line: 1 }.to_string(),
               "Operands must be two numbers or two strings.\n[line 1]");
    assert_eq!(RuntimeError::UndefinedVariable { name: "x".to_string(),
                                                 line: 2, }.to_string(),
               "Undefined variable 'x'.\n[line 2]");
    assert_eq!(RuntimeError::NotCallable { line: 5 }.to_string(),
               "Can only call functions and classes.\n[line 5]");
    assert_eq!(RuntimeError::ArityMismatch { expected: 2,
                                             found:    1,
                                             line:     3, }.to_string(),
               "Expected 2 arguments but got 1.\n[line 3]");
}

#[test]
fn the_printer_renders_programs_back_to_source() {
    let mut reporter = ErrorReporter::new();
    let program = parse_source("print (1 + 2) * 3; var x = nil; x = \"hi\";", &mut reporter);

    assert_eq!(format_program(&program),
               "print (1 + 2) * 3;\nvar x = nil;\nx = \"hi\";");
}

#[test]
fn the_printer_shows_for_loops_desugared() {
    let mut reporter = ErrorReporter::new();
    let program = parse_source("for (var i = 0; i < 3; i = i + 1) print i;", &mut reporter);

    let rendered = format_program(&program);
    assert!(rendered.contains("while (i < 3)"),
            "expected a while loop in:\n{rendered}");
    assert!(!rendered.contains("for"), "no for-node survives parsing");
}

#[test]
fn script_files_produce_their_expected_output() {
    let mut checked = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| {
                                                  e.path()
                                                   .extension()
                                                   .is_some_and(|ext| ext == "lox")
                                              })
    {
        let path = entry.path();
        let source = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));

        let outcome = run_source(&source);
        assert!(!outcome.had_error, "syntax error in {path:?}");
        assert!(!outcome.had_runtime_error, "runtime error in {path:?}");

        let expected_path = path.with_extension("out");
        if let Ok(expected) = fs::read_to_string(&expected_path) {
            assert_eq!(outcome.stdout, expected, "output mismatch for {path:?}");
        }

        checked += 1;
    }

    assert!(checked > 0, "no scripts found under tests/scripts");
}
