use std::io::Cursor;

use cshs::{interpreter::evaluator::core::Context, repl::Repl, util::capture::SharedOutput};
use pretty_assertions::assert_eq;

const BANNER: &str = "C## REPL. End with Ctrl-D.\n";

/// Runs a whole session over `input` and returns the transcript.
fn session(input: &str) -> String {
    let output = SharedOutput::default();
    let context = Context::with_io(Cursor::new(input.as_bytes().to_vec()), output.clone());

    Repl::new(context).run().unwrap();
    output.contents()
}

#[test]
fn empty_session() {
    assert_eq!(session(""), format!("{BANNER}>>> \n"));
}

#[test]
fn echoes_expression_values_and_keeps_state() {
    let transcript = session("var x = 2;\nx * 21;\nint F() {\nreturn x;\n}\nF() + 1;\n");

    assert_eq!(transcript, format!("{BANNER}>>> >>> 42\n>>> ... ... >>> 3\n>>> \n"));
}

#[test]
fn void_results_are_not_echoed() {
    let transcript = session("Console.WriteLine(\"hi\");\n");

    assert_eq!(transcript, format!("{BANNER}>>> hi\n>>> \n"));
}

#[test]
fn errors_are_reported_and_the_session_continues() {
    let transcript = session("var a = 1;\nboom;\na + 1;\n");

    assert_eq!(transcript,
               format!("{BANNER}>>> >>> Error: Runtime error on line 1: UnboundVariable: \
                        Unknown variable 'boom'.\n>>> 2\n>>> \n"));
}

#[test]
fn blank_line_forces_evaluation() {
    let transcript = session("var y = 1\n\ny;\n");

    assert_eq!(transcript,
               format!("{BANNER}>>> ... Error: Syntax error on line 2: Unexpected end of \
                        input.\n>>> Error: Runtime error on line 1: UnboundVariable: Unknown \
                        variable 'y'.\n>>> \n"));
}

#[test]
fn pending_input_is_evaluated_at_end_of_input() {
    let transcript = session("int G() {\nreturn 1;");

    assert_eq!(transcript,
               format!("{BANNER}>>> ... ... \nError: Syntax error on line 3: Unexpected end of \
                        input.\n"));
}

#[test]
fn main_is_not_called_implicitly() {
    let transcript = session("int Main() { Console.WriteLine(\"main\"); return 0; }\nMain();\n");

    assert_eq!(transcript, format!("{BANNER}>>> >>> main\n0\n>>> \n"));
}

#[test]
fn console_input_is_shared_with_the_session() {
    let transcript = session("var name = Console.ReadLine();\nAda\nname + \"!\";\n");

    assert_eq!(transcript, format!("{BANNER}>>> >>> Ada!\n>>> \n"));
}

#[test]
fn functions_can_be_redefined() {
    let transcript = session("int V() { return 1; }\nint V() { return 2; }\nV();\n");

    assert_eq!(transcript, format!("{BANNER}>>> >>> >>> 2\n>>> \n"));
}

#[test]
fn runaway_recursion_does_not_end_the_session() {
    let transcript = session("int F(int n) { return F(n + 1); }\nF(0);\n1 + 1;\n");

    assert_eq!(transcript,
               format!("{BANNER}>>> >>> Error: Runtime error on line 1: RecursionLimit: Maximum \
                        call depth of 2000 exceeded.\n>>> 2\n>>> \n"));
}

#[test]
fn block_comment_spanning_lines_keeps_the_entry_open() {
    let transcript = session("var z = 5; /* {\n} */\nz;\n");

    assert_eq!(transcript, format!("{BANNER}>>> ... >>> 5\n>>> \n"));
}
