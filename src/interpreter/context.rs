use super::Console;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Console over the process's standard streams, used by the `run`
/// subcommand. Errors go to stderr, everything else to stdout, and
/// `request_line` reads one line from stdin (EOF yields the empty
/// cancellation sentinel).
pub struct StdioConsole;

impl Console for StdioConsole {
    fn write(&mut self, text: &str, is_error: bool, newline: bool) {
        if is_error {
            if newline {
                eprintln!("{text}");
            } else {
                eprint!("{text}");
            }
        } else if newline {
            println!("{text}");
        } else {
            print!("{text}");
        }
    }

    fn clear(&mut self) {}

    fn request_line(&mut self, prompt: &str) -> String {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        let mut reply = String::new();
        match std::io::stdin().lock().read_line(&mut reply) {
            Ok(0) | Err(_) => String::new(),
            Ok(_) => reply.trim_end_matches(['\n', '\r']).to_string(),
        }
    }
}

/// Console that records the transcript in memory and answers input
/// requests from a scripted queue. An exhausted queue replies with the
/// empty sentinel, which is also what cancellation delivers.
pub struct BufferedConsole {
    transcript: String,
    replies: VecDeque<String>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self {
            transcript: String::new(),
            replies: VecDeque::new(),
        }
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcript: String::new(),
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn into_transcript(self) -> String {
        self.transcript
    }
}

impl Default for BufferedConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for BufferedConsole {
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
        self.replies.pop_front().unwrap_or_default()
    }
}
