use std::sync::mpsc::{Receiver, Sender};

use chalkpp::interpreter::{BufferedConsole, CancellationToken, Console, Interpreter};
use chalkpp::tokenizer::tokenize;

/// Runs `source` against a buffered console fed with `replies` and
/// returns the transcript.
fn run_program(source: &str, replies: &[&str]) -> String {
    let program = tokenize(source);
    let mut interpreter = Interpreter::new();
    let mut console = BufferedConsole::with_replies(replies.iter().copied());
    interpreter.run(&program, &mut console);
    console.into_transcript()
}

#[test]
fn missing_import_marker_aborts_before_any_statement() {
    let transcript = run_program("print(\"never\")\nx = \"1\"", &[]);
    assert_eq!(transcript, "CRITICAL ERROR: 'import chalk++' missing!\n");
}

#[test]
fn empty_program_is_missing_the_marker() {
    let transcript = run_program("", &[]);
    assert_eq!(transcript, "CRITICAL ERROR: 'import chalk++' missing!\n");
}

#[test]
fn assignment_print_round_trip() {
    let transcript = run_program("import chalk++\nx = \"hello\"\nprint(x)", &[]);
    assert_eq!(transcript, "hello\n");
}

#[test]
fn print_of_unbound_name_is_a_literal() {
    let transcript = run_program("import chalk++\nprint(x)\nprint(\"quoted\")", &[]);
    assert_eq!(transcript, "x\nquoted\n");
}

#[test]
fn last_assignment_wins() {
    let transcript = run_program(
        "import chalk++\nx = \"first\"\nx = \"second\"\nprint(x)",
        &[],
    );
    assert_eq!(transcript, "second\n");
}

#[test]
fn directives_execute_as_nothing() {
    let transcript = run_program(
        "import chalk++\nint main()\nconsole::init\nprint(\"ran\")",
        &[],
    );
    assert_eq!(transcript, "ran\n");
}

#[test]
fn trailing_semicolons_are_stripped() {
    let transcript = run_program("import chalk++\ngreeting = \"hi\";\nprint(greeting);", &[]);
    assert_eq!(transcript, "hi\n");
}

#[test]
fn unbound_conditional_variable_reads_as_nothing() {
    let transcript = run_program(
        "import chalk++\nif y = \"nothing\"\n{\nprint(\"ran\")\n}",
        &[],
    );
    assert_eq!(transcript, "ran\n");
}

#[test]
fn conditional_comparison_is_case_insensitive() {
    let transcript = run_program(
        "import chalk++\nx = \"BOB\"\nif x = \"bob\"\n{\nprint(\"match\")\n}",
        &[],
    );
    assert_eq!(transcript, "match\n");
}

#[test]
fn conditional_comparison_folds_non_ascii_case() {
    let transcript = run_program(
        "import chalk++\nx = \"ÅGE\"\nif x = \"åge\"\n{\nprint(\"ran\")\n}",
        &[],
    );
    assert_eq!(transcript, "ran\n");
}

#[test]
fn failed_conditional_skips_its_whole_block() {
    let source = "import chalk++\nx = \"no\"\nif x = \"yes\"\n{\nif x = \"no\"\n{\nprint(\"inner\")\n}\nprint(\"outer\")\n}\nprint(\"after\")";
    let transcript = run_program(source, &[]);
    assert_eq!(transcript, "after\n");
}

#[test]
fn interactive_input_matching_branch() {
    let source = "import chalk++\nname = input(\"Name?\")\nif name = \"bob\"\n{\nprint(\"hi bob\")\n}";
    let transcript = run_program(source, &["Bob"]);
    assert_eq!(transcript, "Name?hi bob\n");
}

#[test]
fn interactive_input_non_matching_branch() {
    let source = "import chalk++\nname = input(\"Name?\")\nif name = \"bob\"\n{\nprint(\"hi bob\")\n}";
    let transcript = run_program(source, &["alice"]);
    assert_eq!(transcript, "Name?");
}

#[test]
fn malformed_print_halts_the_run() {
    let source = "import chalk++\nprint(\"one\")\nprint oops\nprint(\"never\")";
    let transcript = run_program(source, &[]);
    assert_eq!(
        transcript,
        "one\nENGINE ERROR: [line 3] Expected a parenthesized argument to print.\n"
    );
}

#[test]
fn malformed_input_halts_the_run() {
    let source = "import chalk++\nx = input(unquoted)\nprint(\"never\")";
    let transcript = run_program(source, &[]);
    assert_eq!(
        transcript,
        "ENGINE ERROR: [line 2] Expected a quoted prompt inside input(...).\n"
    );
}

#[test]
fn variable_store_resets_between_runs() {
    let mut interpreter = Interpreter::new();

    let first = tokenize("import chalk++\nx = \"bound\"");
    let mut console = BufferedConsole::new();
    interpreter.run(&first, &mut console);

    // `x` is unbound in the second run, so it prints as a literal.
    let second = tokenize("import chalk++\nprint(x)");
    let mut console = BufferedConsole::new();
    interpreter.run(&second, &mut console);
    assert_eq!(console.transcript(), "x\n");
}

/// Console that cancels the run after a fixed number of writes.
struct CancellingConsole {
    inner: BufferedConsole,
    token: CancellationToken,
    writes_left: usize,
}

impl Console for CancellingConsole {
    fn write(&mut self, text: &str, is_error: bool, newline: bool) {
        self.inner.write(text, is_error, newline);
        self.writes_left -= 1;
        if self.writes_left == 0 {
            self.token.cancel();
        }
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn request_line(&mut self, prompt: &str) -> String {
        self.inner.request_line(prompt)
    }
}

#[test]
fn infinite_loop_repeats_until_cancelled() {
    let program = tokenize("import chalk++\nwhile true {\nprint(\"tick\")\n}\nprint(\"unreachable\")");
    let mut interpreter = Interpreter::new();
    let mut console = CancellingConsole {
        inner: BufferedConsole::new(),
        token: interpreter.cancellation_token(),
        writes_left: 3,
    };
    interpreter.run(&program, &mut console);
    // Three iterations, then nothing: the statement after the loop block
    // is unreachable even once the loop is gone.
    assert_eq!(console.inner.transcript(), "tick\ntick\ntick\n");
}

#[test]
fn conditional_skip_inside_the_loop_body() {
    // The failed conditional must jump over its block and land on the
    // print that follows it, every iteration.
    let source = "import chalk++\nwhile true {\nif flag = \"set\"\n{\nprint(\"never\")\n}\nprint(\"tick\")\n}";
    let program = tokenize(source);
    let mut interpreter = Interpreter::new();
    let mut console = CancellingConsole {
        inner: BufferedConsole::new(),
        token: interpreter.cancellation_token(),
        writes_left: 2,
    };
    interpreter.run(&program, &mut console);
    assert_eq!(console.inner.transcript(), "tick\ntick\n");
}

#[test]
fn matched_conditional_block_close_ends_the_loop_iteration() {
    // Inside the loop the scan stops at the first bare `}`, which here is
    // the close of the matched if block, so `after` never prints.
    let source = "import chalk++\nwhile true {\nif flag = \"nothing\"\n{\nprint(\"tick\")\n}\nprint(\"after\")\n}";
    let program = tokenize(source);
    let mut interpreter = Interpreter::new();
    let mut console = CancellingConsole {
        inner: BufferedConsole::new(),
        token: interpreter.cancellation_token(),
        writes_left: 2,
    };
    interpreter.run(&program, &mut console);
    assert_eq!(console.inner.transcript(), "tick\ntick\n");
}

/// Console whose input requests are served by another thread over a
/// channel pair, the way an interactive shell drives the engine.
struct ChannelConsole {
    transcript: String,
    prompts: Sender<String>,
    replies: Receiver<String>,
}

impl Console for ChannelConsole {
    fn write(&mut self, text: &str, _is_error: bool, newline: bool) {
        self.transcript.push_str(text);
        if newline {
            self.transcript.push('\n');
        }
    }

    fn clear(&mut self) {
        self.transcript.clear();
    }

    fn request_line(&mut self, prompt: &str) -> String {
        self.write(prompt, false, false);
        let _ = self.prompts.send(prompt.to_string());
        self.replies.recv().unwrap_or_default()
    }
}

#[test]
fn cancellation_from_another_thread_unblocks_pending_input() {
    let (prompt_tx, prompt_rx) = std::sync::mpsc::channel();
    let (reply_tx, reply_rx) = std::sync::mpsc::channel();

    let mut interpreter = Interpreter::new();
    let token = interpreter.cancellation_token();

    let worker = std::thread::spawn(move || {
        let program = tokenize("import chalk++\nwhile true {\nx = input(\"loop?\")\n}");
        let mut console = ChannelConsole {
            transcript: String::new(),
            prompts: prompt_tx,
            replies: reply_rx,
        };
        interpreter.run(&program, &mut console);
        console.transcript
    });

    // Wait for the engine to block on input, stop it, then deliver the
    // sentinel so the blocked request can return.
    let first_prompt = prompt_rx.recv().expect("Engine should ask for input.");
    assert_eq!(first_prompt, "loop?");
    token.cancel();
    reply_tx.send(String::new()).expect("Worker is still alive.");

    let transcript = worker.join().expect("Engine thread should not panic.");
    assert_eq!(transcript, "loop?");
}
