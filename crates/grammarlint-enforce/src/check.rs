use grammarlint_core::kinds::NodeKindSet;
use grammarlint_core::syntax::{MalformedTree, Node};
use grammarlint_core::types::{ConfigError, Diagnostic};

/// Receives the diagnostics a check emits while a tree is walked.
pub trait DiagnosticSink {
    fn log(&mut self, line: u32, message: String);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn log(&mut self, line: u32, message: String) {
        self.push(Diagnostic::new(line, message));
    }
}

/// Failure raised by a check while visiting a tree.
///
/// Never escapes a file: the dispatcher turns it into a single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("malformed syntax tree at line {line}: {reason}")]
    MalformedTree { line: u32, reason: String },
}

impl CheckError {
    pub fn malformed(node: Node<'_>, reason: impl Into<String>) -> Self {
        CheckError::MalformedTree {
            line: node.line(),
            reason: reason.into(),
        }
    }
}

impl From<MalformedTree> for CheckError {
    fn from(err: MalformedTree) -> Self {
        CheckError::MalformedTree {
            line: err.line,
            reason: err.reason,
        }
    }
}

pub type CheckResult = Result<(), CheckError>;

/// A stateful visitor enforcing one convention.
///
/// Lifecycle: `init` once after construction, then per file `begin_tree`,
/// `enter_node`/`leave_node` for every node of a subscribed kind, and
/// `finish_tree`; `destroy` once at shutdown.
pub trait ConventionCheck {
    /// Name used in configuration files and reports.
    fn name(&self) -> &'static str;

    /// Kinds observed when the configuration does not list any.
    fn default_kinds(&self) -> NodeKindSet;

    /// Kinds an explicit configuration may subscribe to.
    fn acceptable_kinds(&self) -> NodeKindSet {
        NodeKindSet::all()
    }

    /// Kinds always observed in addition to an explicit configuration.
    fn required_kinds(&self) -> NodeKindSet {
        NodeKindSet::empty()
    }

    /// Validate settings and load resources. Errors here abort setup.
    fn init(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }

    fn begin_tree(&mut self, _root: Node<'_>, _sink: &mut dyn DiagnosticSink) -> CheckResult {
        Ok(())
    }

    fn enter_node(&mut self, _node: Node<'_>, _sink: &mut dyn DiagnosticSink) -> CheckResult {
        Ok(())
    }

    fn leave_node(&mut self, _node: Node<'_>, _sink: &mut dyn DiagnosticSink) -> CheckResult {
        Ok(())
    }

    fn finish_tree(&mut self, _root: Node<'_>, _sink: &mut dyn DiagnosticSink) -> CheckResult {
        Ok(())
    }

    fn destroy(&mut self) {}
}
