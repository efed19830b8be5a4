pub mod formatter;

/// The substring every runnable program must carry on some statement.
pub const IMPORT_MARKER: &str = "import chalk++";

/// Continuation marker: lines starting with this are dropped entirely.
const CONTINUATION_MARKER: char = '^';

/// One normalized line of program text paired with its original
/// 1-based physical line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub line: u32,
}

/// The ordered statement sequence produced by tokenization.
///
/// Blank lines and continuation lines never appear here, so statement
/// indices, brace depth counting and control-flow jumps all operate on
/// the filtered sequence only.
#[derive(Debug, Clone, Default)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Checks the run precondition: some statement mentions the
    /// `import chalk++` marker.
    pub fn has_import_marker(&self) -> bool {
        self.statements.iter().any(|s| s.text.contains(IMPORT_MARKER))
    }

    /// Finds the closing `}` matching the block opened at `start`.
    ///
    /// Scans forward keeping a depth counter over statements containing
    /// `{` and `}`. Returns `start` itself when no closing statement
    /// exists before the program ends; unterminated blocks are accepted
    /// leniently rather than rejected.
    pub fn find_closing_brace(&self, start: usize) -> usize {
        let mut depth: i32 = 0;
        for (index, statement) in self.statements.iter().enumerate().skip(start) {
            if statement.text.contains('{') {
                depth += 1;
            }
            if statement.text.contains('}') {
                depth -= 1;
                if depth == 0 {
                    return index;
                }
            }
        }
        start
    }
}

/// Turns raw program text into the ordered statement sequence.
///
/// Each physical line is trimmed; empty results and lines starting with
/// the continuation marker `^` contribute no statement. Tokenization
/// never fails, a program with zero statements is valid input for the
/// engine (it fails the import precondition there).
pub fn tokenize(source: &str) -> Program {
    let statements = source
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = raw.trim();
            if text.is_empty() || text.starts_with(CONTINUATION_MARKER) {
                None
            } else {
                Some(Statement {
                    text: text.to_string(),
                    line: (index + 1) as u32,
                })
            }
        })
        .collect();
    Program { statements }
}
