use super::{Program, Statement};

/// Interface for creating new statement formatters.
pub trait StatementFormatter {
    /// Formats a single statement into a string.
    fn format(&self, statement: &Statement) -> String;
}

pub trait ToFormatter<F>
where
    F: StatementFormatter,
{
    fn create_formatter(&self) -> F;
}

pub struct BasicFormatter;

impl ToFormatter<BasicFormatter> for Program {
    fn create_formatter(&self) -> BasicFormatter {
        BasicFormatter {}
    }
}

impl StatementFormatter for BasicFormatter {
    fn format(&self, statement: &Statement) -> String {
        format!("({}) {}", statement.line, statement.text)
    }
}

pub struct DebugFormatter;

impl ToFormatter<DebugFormatter> for Program {
    fn create_formatter(&self) -> DebugFormatter {
        DebugFormatter {}
    }
}

impl StatementFormatter for DebugFormatter {
    fn format(&self, statement: &Statement) -> String {
        format!("{statement:?}")
    }
}
