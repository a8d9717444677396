use cshs::{Error, Value, error::RuntimeErrorKind, parse_source, run_source_with_io};
use pretty_assertions::assert_eq;

fn run(src: &str) -> Result<(Value, String), Error> {
    run_source_with_io(src, "")
}

/// Wraps `body` in a `Main` that returns 0 and checks what it prints.
fn assert_output(body: &str, expected: &str) {
    let src = format!("int Main() {{\n{body}\nreturn 0;\n}}");
    match run(&src) {
        Ok((_, output)) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_program_output(src: &str, expected: &str) {
    match run(src) {
        Ok((_, output)) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(body: &str, kind: RuntimeErrorKind) {
    let src = format!("int Main() {{\n{body}\nreturn 0;\n}}");
    match run(&src) {
        Ok(_) => panic!("Script succeeded but was expected to fail with {kind}"),
        Err(e) => assert_eq!(e.runtime_kind(), Some(kind), "unexpected error: {e}"),
    }
}

#[test]
fn end_to_end_square() {
    assert_program_output("int Square(int x) { return x * x; } \
                           int Main() { Console.WriteLine(Square(5)); return 0; }",
                          "25\n");
}

#[test]
fn main_result_is_the_program_result() {
    let (value, _) = run("int Main() { return 7 * 6; }").unwrap();
    assert_eq!(value, Value::Int(42));

    let (value, _) = run("void Main() { }").unwrap();
    assert_eq!(value, Value::Unit);
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("Console.WriteLine(1 + 2 * 3);", "7\n");
    assert_output("Console.WriteLine((1 + 2) * 3);", "9\n");
    assert_output("Console.WriteLine(10 - 4 - 3);", "3\n");
    assert_output("Console.WriteLine(-7 / 2);", "-3\n");
    assert_output("Console.WriteLine(-7 % 3);", "-1\n");
    assert_output("Console.WriteLine(-(2 + 3) + +1);", "-4\n");
}

#[test]
fn integer_overflow_wraps() {
    assert_output("Console.WriteLine(9223372036854775807 + 1);", "-9223372036854775808\n");
}

#[test]
fn string_concatenation_uses_display_forms() {
    assert_output(r#"Console.WriteLine("n = " + 3);"#, "n = 3\n");
    assert_output(r#"Console.WriteLine(1 + 2 + "x");"#, "3x\n");
    assert_output(r#"Console.WriteLine("ok: " + true);"#, "ok: true\n");
}

#[test]
fn shadowing_in_the_same_block() {
    assert_output("var x = 1; var x = 2; Console.WriteLine(x);", "2\n");
}

#[test]
fn inner_blocks_see_and_update_outer_variables() {
    assert_output("var x = 1; { var y = 2; x = x + y; } Console.WriteLine(x);", "3\n");
    assert_output("var x = 1; { var x = 5; } Console.WriteLine(x);", "1\n");
}

#[test]
fn block_locals_do_not_escape() {
    assert_failure("{ var y = 2; } Console.WriteLine(y);",
                   RuntimeErrorKind::UnboundVariable);
}

#[test]
fn typed_declarations_get_defaults() {
    assert_output("int n; bool b; string s; List<int> xs; \
                   Console.WriteLine(n); Console.WriteLine(b); \
                   Console.WriteLine(s + \"|\"); Console.WriteLine(xs.size());",
                  "0\nfalse\n|\n0\n");
}

#[test]
fn compound_assignment() {
    assert_output("var x = 10; x += 5; x -= 3; x *= 2; x /= 4; x %= 4; Console.WriteLine(x);",
                  "2\n");
    assert_output("var xs = [1, 2]; xs[1] += 40; Console.WriteLine(xs[1]);", "42\n");
}

#[test]
fn assignment_is_an_expression() {
    assert_output("var a = 0; var b = 0; a = b = 4; Console.WriteLine(a + b);", "8\n");
}

#[test]
fn list_aliasing_shares_storage() {
    assert_output("var a = List(); a.push_back(1); var b = a; b.push_back(2); \
                   Console.WriteLine(a.size());",
                  "2\n");
}

#[test]
fn self_containing_list_prints_and_compares() {
    assert_output("var a = List(); a.push_back(a); Console.WriteLine(a.size()); \
                   Console.WriteLine(a);",
                  "1\n[[...]]\n");
    assert_output("var a = List(); a.push_back(a); var b = List(); b.push_back(b); \
                   Console.WriteLine(a == b); b.push_back(1); Console.WriteLine(a == b);",
                  "true\nfalse\n");
}

#[test]
fn shared_sublists_are_printed_in_full() {
    assert_output("var inner = [1]; var outer = [inner, inner]; Console.WriteLine(outer);",
                  "[[1], [1]]\n");
}

#[test]
fn new_list_forms() {
    assert_output("var a = new List<int>(); var b = new List<int> { 1, 2 }; \
                   var c = new List<string>() { \"x\" }; a.add(b.size()); \
                   Console.WriteLine(a); Console.WriteLine(b); Console.WriteLine(c);",
                  "[2]\n[1, 2]\n[x]\n");
}

#[test]
fn lists_are_shared_with_callees() {
    assert_program_output("void Fill(List<int> xs) { xs.add(1); xs.add(2); } \
                           int Main() { var xs = new List<int>(); Fill(xs); \
                           Console.WriteLine(xs); return 0; }",
                          "[1, 2]\n");
}

#[test]
fn list_methods() {
    assert_output("var xs = [1, 2, 3]; \
                   Console.WriteLine(xs.pop_back()); Console.WriteLine(xs); \
                   xs.clear(); Console.WriteLine(xs.size());",
                  "3\n[1, 2]\n0\n");
    assert_output("var xs = [1, 2]; xs[0] = 9; Console.WriteLine(xs[0] + xs[1]);", "11\n");
}

#[test]
fn string_methods_count_characters() {
    assert_output(r#"var s = "héllo"; Console.WriteLine(s.Length()); Console.WriteLine(s.size());"#,
                  "5\n5\n");
}

#[test]
fn short_circuit_skips_the_right_operand() {
    assert_output("Console.WriteLine(false && (1 / 0 == 0));", "false\n");
    assert_output("Console.WriteLine(true || (1 / 0 == 0));", "true\n");
}

#[test]
fn comparisons_and_logic() {
    assert_output("Console.WriteLine(1 < 2 && 2 <= 2 && 3 > 2 && 3 >= 4);", "false\n");
    assert_output(r#"Console.WriteLine("a" == "a");"#, "true\n");
    assert_output("Console.WriteLine([1, 2] == [1, 2]);", "true\n");
    assert_output("Console.WriteLine(!(1 != 1));", "true\n");
}

#[test]
fn equality_between_different_kinds_is_an_error() {
    assert_failure(r#"var b = 1 == "1";"#, RuntimeErrorKind::TypeMismatch);
}

#[test]
fn relational_operators_need_integers() {
    assert_failure(r#"var b = "a" < "b";"#, RuntimeErrorKind::TypeMismatch);
}

#[test]
fn conditions_must_be_booleans() {
    assert_failure("if (1) { }", RuntimeErrorKind::TypeMismatch);
    assert_failure("while (0) { }", RuntimeErrorKind::TypeMismatch);
}

#[test]
fn division_and_modulo_by_zero() {
    assert_failure("var x = 1 / 0;", RuntimeErrorKind::DivisionByZero);
    assert_failure("var x = 0 / 0;", RuntimeErrorKind::DivisionByZero);
    assert_failure("var x = 0 % 0;", RuntimeErrorKind::DivisionByZero);
    assert_failure("var x = -5 % 0;", RuntimeErrorKind::DivisionByZero);
}

#[test]
fn indexing_past_the_end_is_an_error() {
    assert_failure("var xs = [1, 2, 3]; var x = xs[xs.size()];",
                   RuntimeErrorKind::IndexOutOfRange);
    assert_failure("var xs = List(); var x = xs[0];", RuntimeErrorKind::IndexOutOfRange);
    assert_failure("var xs = [1]; var x = xs[-1];", RuntimeErrorKind::IndexOutOfRange);
    assert_failure("var xs = List(); xs.pop_back();", RuntimeErrorKind::IndexOutOfRange);
}

#[test]
fn indexing_needs_a_list_and_an_integer() {
    assert_failure("var x = 5; var y = x[0];", RuntimeErrorKind::TypeMismatch);
    assert_failure(r#"var xs = [1]; var y = xs["0"];"#, RuntimeErrorKind::TypeMismatch);
}

#[test]
fn if_else_chains() {
    assert_output("var x = 5; \
                   if (x < 3) { Console.WriteLine(\"small\"); } \
                   else if (x < 10) { Console.WriteLine(\"medium\"); } \
                   else { Console.WriteLine(\"large\"); }",
                  "medium\n");
}

#[test]
fn for_loop_counts() {
    assert_output("for (var i = 0; i < 3; i = i + 1) { Console.WriteLine(i); }", "0\n1\n2\n");
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
    assert_failure("for (var i = 0; i < 1; i += 1) { } Console.WriteLine(i);",
                   RuntimeErrorKind::UnboundVariable);
}

#[test]
fn while_loop() {
    assert_output("var n = 3; while (n > 0) { Console.WriteLine(n); n -= 1; }", "3\n2\n1\n");
}

#[test]
fn foreach_over_an_empty_list_prints_nothing() {
    assert_output("foreach (var x in List()) { Console.WriteLine(x); }", "");
}

#[test]
fn foreach_iterates_a_snapshot() {
    assert_output("var xs = [1, 2]; foreach (int x in xs) { xs.push_back(x); Console.WriteLine(x); } \
                   Console.WriteLine(xs.size());",
                  "1\n2\n4\n");
}

#[test]
fn foreach_needs_a_list() {
    assert_failure("foreach (var c in 5) { }", RuntimeErrorKind::TypeMismatch);
}

#[test]
fn return_unwinds_nested_loops() {
    assert_program_output("int Find(List<int> xs, int target) { \
                               for (var i = 0; i < xs.size(); i += 1) { \
                                   foreach (var x in [xs[i]]) { \
                                       if (x == target) { return i; } \
                                   } \
                               } \
                               return -1; \
                           } \
                           int Main() { Console.WriteLine(Find([4, 5, 6], 6)); \
                           Console.WriteLine(Find([4], 7)); return 0; }",
                          "2\n-1\n");
}

#[test]
fn forward_references_resolve() {
    assert_program_output("int Main() { Console.WriteLine(Later(2)); return 0; } \
                           int Later(int x) { return x + 1; }",
                          "3\n");
}

#[test]
fn recursion() {
    assert_program_output("int Fib(int n) { if (n < 2) { return n; } return Fib(n - 1) + Fib(n - 2); } \
                           int Main() { Console.WriteLine(Fib(15)); return 0; }",
                          "610\n");
}

#[test]
fn later_declaration_wins() {
    assert_program_output("int F() { return 1; } int F() { return 2; } \
                           int Main() { Console.WriteLine(F()); return 0; }",
                          "2\n");
}

#[test]
fn functions_do_not_see_the_callers_locals() {
    let err = run("int Peek() { return secret; } \
                   int Main() { var secret = 1; return Peek(); }").unwrap_err();
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::UnboundVariable));
}

#[test]
fn functions_see_globals() {
    assert_program_output("var greeting = \"hi\"; \
                           void Greet() { Console.WriteLine(greeting); } \
                           int Main() { greeting = \"hello\"; Greet(); return 0; }",
                          "hello\n");
}

#[test]
fn nested_functions_capture_their_scope() {
    assert_output("var count = 0; \
                   void Bump(int by) { count += by; } \
                   Bump(2); Bump(3); Console.WriteLine(count);",
                  "5\n");
}

#[test]
fn deep_recursion_below_the_call_limit() {
    assert_program_output("int Sum(int n) { if (n == 0) { return 0; } return n + Sum(n - 1); } \
                           int Main() { Console.WriteLine(Sum(1500)); return 0; }",
                          "1125750\n");
}

#[test]
fn nested_functions_can_recurse() {
    assert_output("int Fact(int n) { if (n <= 1) { return 1; } return n * Fact(n - 1); } \
                   Console.WriteLine(Fact(10));",
                  "3628800\n");
}

#[test]
fn functions_are_values() {
    assert_program_output("int Twice(int x) { return x * 2; } \
                           int Main() { var f = Twice; Console.WriteLine(f(4)); return 0; }",
                          "8\n");
}

#[test]
fn global_statements_run_before_main() {
    assert_program_output("Console.WriteLine(\"setup\"); \
                           int Main() { Console.WriteLine(\"main\"); return 0; }",
                          "setup\nmain\n");
}

#[test]
fn namespaces_and_usings_are_transparent() {
    assert_program_output("using System; using System.Collections.Generic; \
                           namespace Demo.App { \
                               int Main() { Console.WriteLine(Helper()); return 0; } \
                               namespace Inner { int Helper() { return 9; } } \
                           }",
                          "9\n");
}

#[test]
fn write_line_without_arguments_prints_a_blank_line() {
    assert_output("Console.WriteLine(); Console.WriteLine(1);", "\n1\n");
}

#[test]
fn read_line_consumes_input() {
    let src = "int Main() { \
                   var a = Console.ReadLine(); var b = Console.ReadLine(); var c = Console.ReadLine(); \
                   Console.WriteLine(a + \",\" + b + \",\" + c + \".\"); return 0; }";
    let (_, output) = run_source_with_io(src, "first\r\nsecond\n").unwrap();
    assert_eq!(output, "first,second,.\n");
}

#[test]
fn void_displays_as_void() {
    assert_program_output("void Nothing() { } int Main() { Console.WriteLine(Nothing()); return 0; }",
                          "void\n");
}

#[test]
fn unknown_names_are_errors() {
    assert_failure("Console.WriteLine(missing);", RuntimeErrorKind::UnboundVariable);
    assert_failure("missing = 1;", RuntimeErrorKind::UnboundVariable);
    assert_failure("Missing();", RuntimeErrorKind::UnknownFunction);
    assert_failure("Console.Beep();", RuntimeErrorKind::UnknownFunction);
}

#[test]
fn wrong_arity_is_an_error() {
    assert_program_output("int Add(int a, int b) { return a + b; } \
                           int Main() { Console.WriteLine(Add(1, 2)); return 0; }",
                          "3\n");

    let err = run("int Add(int a, int b) { return a + b; } int Main() { return Add(1); }")
        .unwrap_err();
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::ArityMismatch));

    assert_failure("Console.WriteLine(1, 2);", RuntimeErrorKind::ArityMismatch);
    assert_failure("var xs = List(); xs.push_back();", RuntimeErrorKind::ArityMismatch);
}

#[test]
fn unknown_methods_are_type_errors() {
    assert_failure("var xs = List(); xs.sort();", RuntimeErrorKind::TypeMismatch);
    assert_failure("var n = 3; n.size();", RuntimeErrorKind::TypeMismatch);
}

#[test]
fn arithmetic_type_errors() {
    assert_failure("var x = true + 1;", RuntimeErrorKind::TypeMismatch);
    assert_failure(r#"var x = "a" * 2;"#, RuntimeErrorKind::TypeMismatch);
    assert_failure(r#"var x = -"a";"#, RuntimeErrorKind::TypeMismatch);
    assert_failure("var x = !1;", RuntimeErrorKind::TypeMismatch);
}

#[test]
fn missing_main_is_an_unknown_function() {
    let err = run("int Helper() { return 1; }\n").unwrap_err();
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::UnknownFunction));
}

#[test]
fn output_before_a_runtime_error_is_kept() {
    use cshs::{interpreter::evaluator::core::Context, run_with_context, util::capture::SharedOutput};

    let output = SharedOutput::default();
    let mut context = Context::with_io(&b""[..], output.clone());
    let result = run_with_context(&mut context,
                                  "int Main() { Console.WriteLine(\"before\"); return 1 / 0; }");

    assert!(result.is_err());
    assert_eq!(output.contents(), "before\n");
}

#[test]
fn parsing_is_deterministic() {
    let src = "int Main() { var xs = [1, 2]; foreach (var x in xs) { Console.WriteLine(x * 2); } return 0; }";
    assert_eq!(parse_source(src), parse_source(src));
}
