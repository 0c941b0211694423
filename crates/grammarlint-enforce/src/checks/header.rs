use std::fs;
use std::path::PathBuf;

use grammarlint_core::kinds::{NodeKind, NodeKindSet};
use grammarlint_core::syntax::Node;
use grammarlint_core::types::ConfigError;
use tracing::debug;

use super::child;
use crate::check::{CheckError, CheckResult, ConventionCheck, DiagnosticSink};

const NAME: &str = "HeaderCheck";
const HEADER_ACTION: &str = "header";

/// The `@header { ... }` action of a grammar (also `@parser::header` and
/// `@lexer::header`) must start with the license notice read from
/// `headerFile`, line by line. Extra lines after the notice are fine.
pub struct HeaderCheck {
    header_file: Option<PathBuf>,
    notice: Vec<String>,
}

impl HeaderCheck {
    pub fn new(header_file: Option<PathBuf>) -> Self {
        Self {
            header_file,
            notice: Vec::new(),
        }
    }

    /// Compare the lines of an action against the notice.
    ///
    /// `first_line` is the source line the action text starts on.
    fn compare(&self, first_line: u32, action: &str, sink: &mut dyn DiagnosticSink) {
        let lines = text_lines(action);
        // content conventionally starts on the line after `{`
        let start = usize::from(lines.first().is_some_and(|l| l.is_empty()));
        if lines.len() <= start {
            sink.log(first_line, "License notice is missing.".to_string());
            return;
        }

        for (offset, expected) in self.notice.iter().enumerate() {
            let index = start + offset;
            let line = first_line + index as u32;
            match lines.get(index) {
                None => {
                    sink.log(
                        line,
                        format!("License missing or wrong. Line missing, expected: {expected}"),
                    );
                    return;
                }
                Some(found) if found != expected => {
                    sink.log(
                        line,
                        format!(
                            "License missing or wrong. Mismatch found!\nexpected: {expected}\nfound: {found}"
                        ),
                    );
                    return;
                }
                Some(_) => {}
            }
        }
    }
}

/// Lines of an action body or notice file; trailing empty lines are dropped.
fn text_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

impl ConventionCheck for HeaderCheck {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_kinds(&self) -> NodeKindSet {
        NodeKindSet::of(&[NodeKind::Ampersand])
    }

    fn acceptable_kinds(&self) -> NodeKindSet {
        self.default_kinds()
    }

    fn init(&mut self) -> Result<(), ConfigError> {
        let path = self.header_file.as_ref().ok_or_else(|| {
            ConfigError::invalid(
                NAME,
                "The property 'headerFile' needs to be specified in order that HeaderCheck works",
            )
        })?;
        let content = fs::read_to_string(path).map_err(|err| {
            ConfigError::invalid(
                NAME,
                format!("Could not load the headerFile: {} ({err})", path.display()),
            )
        })?;
        let notice: Vec<String> = text_lines(&content)
            .into_iter()
            .map(str::to_string)
            .collect();
        if notice.iter().all(|l| l.trim().is_empty()) {
            return Err(ConfigError::invalid(
                NAME,
                format!("headerFile did not contain any content: {}", path.display()),
            ));
        }
        debug!(path = %path.display(), lines = notice.len(), "loaded license notice");
        self.notice = notice;
        Ok(())
    }

    fn enter_node(&mut self, node: Node<'_>, sink: &mut dyn DiagnosticSink) -> CheckResult {
        if !node.parent().is_some_and(|p| p.kind().is_grammar_root()) {
            return Ok(());
        }
        let (id, action) = match node.child_count() {
            2 => (child(node, 0)?, child(node, 1)?),
            3 => (child(node, 1)?, child(node, 2)?),
            n => {
                return Err(CheckError::malformed(
                    node,
                    format!("action with {n} children"),
                ))
            }
        };
        if id.text() == HEADER_ACTION {
            self.compare(node.line(), action.text(), sink);
        }
        Ok(())
    }

    fn destroy(&mut self) {
        self.notice.clear();
    }
}
