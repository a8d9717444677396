use cshs::{
    Error,
    error::{ParseError, RuntimeErrorKind},
    parse_source, run_source_with_io, tokenize,
};
use pretty_assertions::assert_eq;

fn error_of(src: &str) -> Error {
    match run_source_with_io(src, "") {
        Ok((value, output)) => {
            panic!("Script succeeded with {value} but was expected to fail; output:\n{output}")
        },
        Err(e) => e,
    }
}

fn message_of(src: &str) -> String {
    error_of(src).to_string()
}

#[test]
fn unrecognized_character() {
    assert_eq!(message_of("int Main() {\n  return 1 @ 2;\n}"),
               "Lex error on line 2: Unrecognized character '@'.");
}

#[test]
fn invalid_escape() {
    assert_eq!(message_of("int Main() {\n\n  var s = \"a\\qb\";\n  return 0;\n}"),
               "Lex error on line 3: Invalid escape sequence '\\q' in string literal.");
}

#[test]
fn integer_literal_out_of_range() {
    assert_eq!(message_of("var big = 99999999999999999999;"),
               "Lex error on line 1: Integer literal 99999999999999999999 is out of range.");
}

#[test]
fn unterminated_string_is_a_lex_error() {
    let err = tokenize("var x = 1;\nvar s = \"abc;").unwrap_err();
    assert!(matches!(err, Error::Lex(_)), "unexpected error: {err}");
    assert_eq!(err.line(), 2);
}

#[test]
fn missing_semicolon() {
    assert_eq!(message_of("int Main() { return 0 }"),
               "Syntax error on line 1: Expected ';', found '}'.");
}

#[test]
fn missing_semicolon_is_reported_at_the_next_token() {
    let err = parse_source("int Main() {\n  var x = 1\n  return x;\n}").unwrap_err();
    assert_eq!(err,
               Error::Parse(ParseError::ExpectedToken { expected: "';'".to_string(),
                                                        found:    "return".to_string(),
                                                        line:     3, }));
}

#[test]
fn unclosed_block_reaches_end_of_input() {
    let err = parse_source("int Main() {\n  return 0;\n").unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::UnexpectedEndOfInput { line: 3 }));
}

#[test]
fn unclosed_call_reaches_end_of_input() {
    let err = parse_source("Console.WriteLine(1").unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::UnexpectedEndOfInput { line: 1 }));
}

#[test]
fn unexpected_token() {
    assert_eq!(message_of("int Main() { return * 2; }"),
               "Syntax error on line 1: Unexpected token '*'.");
}

#[test]
fn invalid_assignment_target() {
    assert_eq!(message_of("int Main() {\n  1 = 2;\n  return 0;\n}"),
               "Syntax error on line 2: Invalid assignment target.");
    assert!(matches!(parse_source("F() = 3;"),
                     Err(Error::Parse(ParseError::InvalidAssignmentTarget { .. }))));
}

#[test]
fn implicitly_typed_variable_needs_an_initializer() {
    assert_eq!(message_of("int Main() { var x; return 0; }"),
               "Syntax error on line 1: Implicitly-typed variable 'x' must be initialized.");
}

#[test]
fn syntax_errors_stop_before_anything_runs() {
    let err = error_of("Console.WriteLine(\"never\");\nint Main() { return 0 }");
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn runtime_error_message_names_kind_and_line() {
    assert_eq!(message_of("int Main() {\n  var x = 4;\n  return x / (x - 4);\n}"),
               "Runtime error on line 3: DivisionByZero: Division by zero.");
    assert_eq!(message_of("int Main() {\n  return y;\n}"),
               "Runtime error on line 2: UnboundVariable: Unknown variable 'y'.");
    assert_eq!(message_of("int Main() {\n  return Nope(1);\n}"),
               "Runtime error on line 2: UnknownFunction: Unknown function 'Nope'.");
}

#[test]
fn index_error_reports_index_and_size() {
    assert_eq!(message_of("int Main() {\n  var xs = [1, 2];\n  return xs[5];\n}"),
               "Runtime error on line 3: IndexOutOfRange: Index 5 is out of range for a list \
                of size 2.");
}

#[test]
fn arity_error_reports_counts() {
    let err = error_of("int Id(int x) { return x; }\nint Main() {\n  return Id(1, 2);\n}");
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::ArityMismatch));
    assert_eq!(err.line(), 3);
    assert_eq!(err.to_string(),
               "Runtime error on line 3: ArityMismatch: 'Id' expects 1 argument(s) but 2 were \
                supplied.");
}

#[test]
fn type_errors_describe_the_operands() {
    assert_eq!(message_of("int Main() { return true + 1; }"),
               "Runtime error on line 1: TypeMismatch: Cannot apply '+' to bool and int.");
    assert_eq!(message_of("int Main() { var n = 1; return n.size(); }"),
               "Runtime error on line 1: TypeMismatch: int has no method 'size'.");
}

#[test]
fn missing_main_is_reported_at_the_end_of_the_source() {
    let err = error_of("int Helper() {\n  return 1;\n}\n");
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::UnknownFunction));
    assert_eq!(err.line(), 4);
}

#[test]
fn main_with_parameters_cannot_be_called() {
    let err = error_of("int Main(List<string> args) { return 0; }");
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::ArityMismatch));
}

#[test]
fn errors_inside_nested_calls_carry_the_failing_line() {
    let err = error_of("int Inner(List<int> xs) {\n  return xs[3];\n}\nint Main() {\n  return \
                        Inner([1]);\n}");
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::IndexOutOfRange));
    assert_eq!(err.line(), 2);
}

#[test]
fn runaway_recursion_hits_the_call_limit() {
    let src = "int F(int n) { return F(n + 1); } int Main() { return F(0); }";
    let err = error_of(src);

    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::RecursionLimit));
    assert_eq!(err.to_string(),
               "Runtime error on line 1: RecursionLimit: Maximum call depth of 2000 exceeded.");
}

#[test]
fn mutual_recursion_hits_the_call_limit() {
    let src = "bool Even(int n) { if (n == 0) { return true; } return Odd(n - 1); }\n\
               bool Odd(int n) { if (n == 0) { return false; } return Even(n - 1); }\n\
               int Main() { Even(1000000); return 0; }";

    assert_eq!(error_of(src).runtime_kind(), Some(RuntimeErrorKind::RecursionLimit));
}

#[test]
fn deeply_nested_parentheses_are_rejected() {
    let src = format!("var x = {}1{};", "(".repeat(100_000), ")".repeat(100_000));
    let err = parse_source(&src).unwrap_err();

    assert_eq!(err, Error::Parse(ParseError::NestingTooDeep { limit: 256, line: 1 }));
    assert_eq!(err.to_string(), "Syntax error on line 1: Nesting exceeds the limit of 256 levels.");
}

#[test]
fn long_prefix_operator_runs_are_rejected() {
    let src = format!("var x = {}1;", "-".repeat(10_000));

    assert!(matches!(parse_source(&src),
                     Err(Error::Parse(ParseError::NestingTooDeep { .. }))));
}

#[test]
fn moderate_nesting_is_accepted() {
    let src = format!("int Main() {{ return {}7{}; }}", "(".repeat(200), ")".repeat(200));

    assert_eq!(run_source_with_io(&src, "").unwrap().0, cshs::Value::Int(7));
}

#[test]
fn keyword_used_as_variable_name() {
    assert_eq!(message_of("var new = 1;"),
               "Syntax error on line 1: Expected identifier, found 'keyword new'.");
}
