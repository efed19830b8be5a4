mod error;

use compact_str::{CompactString, ToCompactString};
pub use error::ClassifyError;

/// A single classified statement with its extracted payload.
///
/// Classification is an ordered set of matcher rules, first match wins.
/// Grammar decoration that matches no rule becomes [`StatementKind::NoOp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `<target> = input("<prompt>")`
    Input {
        target: CompactString,
        prompt: CompactString,
    },
    /// `if <variable> = "<expected>"` (one or two equals signs).
    Conditional {
        variable: CompactString,
        expected: CompactString,
    },
    /// `print(<argument>)`
    Print { argument: CompactString },
    /// `<target> = <value>`
    Assign {
        target: CompactString,
        value: CompactString,
    },
    /// Comments, stray braces and other decoration. Executes as nothing.
    NoOp,
}

/// Classifies one raw statement text.
///
/// The trailing `;` and surrounding whitespace are stripped before any
/// rule applies. Only the input and print rules can fail: their
/// parenthesized payload is mandatory once the rule has matched. A
/// conditional that does not fit its pattern is not an error, it
/// classifies as a no-op so execution falls through into the block.
pub fn classify(text: &str) -> Result<StatementKind, ClassifyError> {
    let line = text.trim_end().trim_end_matches(';').trim();

    if line.contains("input(") {
        return classify_input(line);
    }
    if line.starts_with("if ") {
        return Ok(classify_conditional(line));
    }
    if line.starts_with("print") {
        return classify_print(line);
    }
    if let Some((left, right)) = line.split_once('=') {
        return Ok(StatementKind::Assign {
            target: left.trim().to_compact_string(),
            value: right.trim().trim_matches('"').to_compact_string(),
        });
    }
    Ok(StatementKind::NoOp)
}

fn classify_input(line: &str) -> Result<StatementKind, ClassifyError> {
    // Everything left of the first `=` names the variable; a line with
    // no `=` binds to its entire text, as degenerate as that is.
    let target = line.split_once('=').map_or(line, |(left, _)| left).trim();

    let offset = line.find("input(").expect("Rule matched on this substring.");
    let rest = line[offset + "input(".len()..]
        .strip_prefix('"')
        .ok_or(ClassifyError::MalformedInput)?;
    let end = rest.find("\")").ok_or(ClassifyError::MalformedInput)?;
    let prompt = &rest[..end];

    Ok(StatementKind::Input {
        target: target.to_compact_string(),
        prompt: prompt.to_compact_string(),
    })
}

fn classify_conditional(line: &str) -> StatementKind {
    let rest = &line["if ".len()..];
    let Some(eq) = rest.find('=') else {
        return StatementKind::NoOp;
    };
    let variable = rest[..eq].trim();
    let mut after = &rest[eq + 1..];
    if let Some(stripped) = after.strip_prefix('=') {
        after = stripped;
    }
    let Some(quoted) = after.trim_start().strip_prefix('"') else {
        return StatementKind::NoOp;
    };
    let Some(end) = quoted.find('"') else {
        return StatementKind::NoOp;
    };
    StatementKind::Conditional {
        variable: variable.to_compact_string(),
        expected: quoted[..end].trim().to_compact_string(),
    }
}

fn classify_print(line: &str) -> Result<StatementKind, ClassifyError> {
    let open = line.find('(').ok_or(ClassifyError::MalformedPrint)?;
    let inner = &line[open + 1..];
    let close = inner.find(')').ok_or(ClassifyError::MalformedPrint)?;
    Ok(StatementKind::Print {
        argument: inner[..close].trim().to_compact_string(),
    })
}
