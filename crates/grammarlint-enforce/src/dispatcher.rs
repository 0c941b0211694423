//! Routes syntax tree nodes to the checks subscribed to their kind.
//!
//! Every registered check gets `begin_tree`/`finish_tree` once per file. Each
//! node gets one `enter_node` before any of its descendants and one
//! `leave_node` after its whole subtree, siblings strictly left to right.
//!
//! Failures inside a file (malformed tree, check error, panic) are caught here
//! and reported as one diagnostic at line 0; diagnostics emitted before the
//! failure are kept.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use grammarlint_core::kinds::{NodeKind, NodeKindSet};
use grammarlint_core::syntax::{Node, NodeId, SyntaxTree};
use grammarlint_core::types::{ConfigError, Severity};
use tracing::{debug, warn};

use crate::check::{CheckError, CheckResult, ConventionCheck, DiagnosticSink};

/// Registration record of one configured check.
pub struct CheckDescriptor {
    check: Box<dyn ConventionCheck>,
    kinds: NodeKindSet,
    severity: Severity,
}

impl CheckDescriptor {
    pub fn name(&self) -> &'static str {
        self.check.name()
    }

    pub fn kinds(&self) -> NodeKindSet {
        self.kinds
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Who produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticOrigin {
    /// Index of the check in registration order.
    Check(usize),
    /// The dispatcher itself, after a failure inside the file.
    Walker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckDiagnostic {
    pub origin: DiagnosticOrigin,
    pub line: u32,
    pub message: String,
}

pub struct CheckDispatcher {
    descriptors: Vec<CheckDescriptor>,
    /// Check indices per kind id.
    table: Vec<Vec<usize>>,
    destroyed: bool,
}

impl Default for CheckDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckDispatcher {
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            table: vec![Vec::new(); NodeKind::COUNT + 1],
            destroyed: false,
        }
    }

    /// Initialise `check` and register it. Returns its index.
    pub fn setup_check(
        &mut self,
        mut check: Box<dyn ConventionCheck>,
        tokens: Option<&[String]>,
        severity: Severity,
    ) -> Result<usize, ConfigError> {
        check.init()?;
        self.register(check, tokens, severity)
    }

    /// Register an already initialised check.
    ///
    /// A non-empty `tokens` list replaces the check's default kinds; every name
    /// must be a known kind the check accepts. Required kinds are always added.
    pub fn register(
        &mut self,
        check: Box<dyn ConventionCheck>,
        tokens: Option<&[String]>,
        severity: Severity,
    ) -> Result<usize, ConfigError> {
        let kinds = subscription(check.as_ref(), tokens)?;
        let index = self.descriptors.len();
        for kind in kinds.iter() {
            self.table[kind.id() as usize].push(index);
        }
        debug!(
            check = check.name(),
            kinds = kinds.len(),
            %severity,
            "registered check"
        );
        self.descriptors.push(CheckDescriptor {
            check,
            kinds,
            severity,
        });
        Ok(index)
    }

    pub fn checks(&self) -> &[CheckDescriptor] {
        &self.descriptors
    }

    pub fn check_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Checks subscribed to `kind`, by index.
    pub fn subscribers(&self, kind: NodeKind) -> &[usize] {
        &self.table[kind.id() as usize]
    }

    /// Walk one tree, returning every diagnostic in emission order.
    pub fn walk(&mut self, tree: &SyntaxTree) -> Vec<CheckDiagnostic> {
        let mut collector = Collector::default();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.traverse(tree, &mut collector)
        }));

        let failure = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err.to_string()),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };
        if let Some(reason) = failure {
            warn!(error = %reason, "tree walk aborted");
            collector.diagnostics.push(CheckDiagnostic {
                origin: DiagnosticOrigin::Walker,
                line: 0,
                message: format!("Got an exception - {reason}"),
            });
        }
        collector.diagnostics
    }

    fn traverse(&mut self, tree: &SyntaxTree, out: &mut Collector) -> Result<(), CheckError> {
        tree.validate()?;
        let root = tree.root();
        debug!(nodes = tree.len(), "walking tree");

        for (index, descriptor) in self.descriptors.iter_mut().enumerate() {
            out.current = index;
            descriptor.check.begin_tree(root, out)?;
        }

        enum Event {
            Enter(NodeId),
            Leave(NodeId),
        }

        let mut stack = vec![Event::Enter(root.id())];
        while let Some(event) = stack.pop() {
            match event {
                Event::Enter(id) => {
                    let node = tree.node(id);
                    self.notify(node, true, out)?;
                    stack.push(Event::Leave(id));
                    stack.extend(node.children().rev().map(|c| Event::Enter(c.id())));
                }
                Event::Leave(id) => self.notify(tree.node(id), false, out)?,
            }
        }

        for (index, descriptor) in self.descriptors.iter_mut().enumerate() {
            out.current = index;
            descriptor.check.finish_tree(root, out)?;
        }
        Ok(())
    }

    fn notify(
        &mut self,
        node: Node<'_>,
        entering: bool,
        out: &mut Collector,
    ) -> Result<(), CheckError> {
        for &index in &self.table[node.kind().id() as usize] {
            out.current = index;
            let check = &mut self.descriptors[index].check;
            if entering {
                check.enter_node(node, out)?;
            } else {
                check.leave_node(node, out)?;
            }
        }
        Ok(())
    }

    /// Release every check. Later calls do nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        for descriptor in &mut self.descriptors {
            descriptor.check.destroy();
        }
        debug!(checks = self.descriptors.len(), "destroyed checks");
    }
}

impl Drop for CheckDispatcher {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn subscription(
    check: &dyn ConventionCheck,
    tokens: Option<&[String]>,
) -> Result<NodeKindSet, ConfigError> {
    let names = match tokens {
        Some(names) if !names.is_empty() => names,
        _ => return Ok(check.default_kinds()),
    };
    let acceptable = check.acceptable_kinds();
    let mut kinds = check.required_kinds();
    for name in names {
        let kind = NodeKind::from_name(name)?;
        if !acceptable.contains(kind) {
            return Err(ConfigError::invalid(
                check.name(),
                format!("illegal token \"{name}\""),
            ));
        }
        kinds.insert(kind);
    }
    Ok(kinds)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "check panicked".to_string()
    }
}

/// Tags diagnostics with the check currently being notified.
#[derive(Default)]
struct Collector {
    current: usize,
    diagnostics: Vec<CheckDiagnostic>,
}

impl DiagnosticSink for Collector {
    fn log(&mut self, line: u32, message: String) {
        self.diagnostics.push(CheckDiagnostic {
            origin: DiagnosticOrigin::Check(self.current),
            line,
            message,
        });
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
