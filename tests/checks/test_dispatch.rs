// Dispatcher traversal properties over a real grammar.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use grammarlint_core::kinds::{NodeKind, NodeKindSet};
use grammarlint_core::syntax::{Node, NodeId, SyntaxTree};
use grammarlint_core::types::Severity;
use grammarlint_enforce::check::{CheckResult, ConventionCheck, DiagnosticSink};
use grammarlint_enforce::dispatcher::CheckDispatcher;
use grammarlint_parsers::parse_grammar;

use super::common::read_fixture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Enter(NodeKind, NodeId),
    Leave(NodeKind, NodeId),
}

type Events = Rc<RefCell<Vec<Event>>>;

struct Recorder {
    kinds: NodeKindSet,
    events: Events,
}

impl ConventionCheck for Recorder {
    fn name(&self) -> &'static str {
        "Recorder"
    }

    fn default_kinds(&self) -> NodeKindSet {
        self.kinds
    }

    fn enter_node(&mut self, node: Node<'_>, _sink: &mut dyn DiagnosticSink) -> CheckResult {
        self.events
            .borrow_mut()
            .push(Event::Enter(node.kind(), node.id()));
        Ok(())
    }

    fn leave_node(&mut self, node: Node<'_>, _sink: &mut dyn DiagnosticSink) -> CheckResult {
        self.events
            .borrow_mut()
            .push(Event::Leave(node.kind(), node.id()));
        Ok(())
    }
}

fn expr_tree() -> SyntaxTree {
    parse_grammar(&read_fixture("Expr.g")).unwrap()
}

fn kind_counts(tree: &SyntaxTree) -> HashMap<NodeKind, usize> {
    let mut counts = HashMap::new();
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        *counts.entry(node.kind()).or_insert(0) += 1;
        stack.extend(node.children());
    }
    counts
}

#[test]
/// A check subscribed to one kind sees exactly the nodes of that kind, once each way.
fn test_single_kind_subscription_sees_each_node_once() {
    let tree = expr_tree();
    let counts = kind_counts(&tree);
    assert!(counts.len() > 10, "fixture should exercise many kinds");

    for kind in NodeKind::ALL.iter().copied() {
        let events: Events = Rc::default();
        let mut dispatcher = CheckDispatcher::new();
        let tokens = vec![kind.name().to_string()];
        dispatcher
            .setup_check(
                Box::new(Recorder {
                    kinds: NodeKindSet::empty(),
                    events: Rc::clone(&events),
                }),
                Some(tokens.as_slice()),
                Severity::Warning,
            )
            .unwrap();
        assert!(dispatcher.walk(&tree).is_empty());

        let events = events.borrow();
        let expected = counts.get(&kind).copied().unwrap_or(0);
        let enters = events
            .iter()
            .filter(|e| matches!(e, Event::Enter(k, _) if *k == kind))
            .count();
        let leaves = events
            .iter()
            .filter(|e| matches!(e, Event::Leave(k, _) if *k == kind))
            .count();
        assert_eq!(enters, expected, "enter count for {kind}");
        assert_eq!(leaves, expected, "leave count for {kind}");
        assert_eq!(events.len(), 2 * expected, "foreign kinds seen for {kind}");
    }
}

#[test]
/// enter(A) < enter(B) and leave(B) < leave(A) whenever A is an ancestor of B.
fn test_ancestors_bracket_descendants() {
    let tree = expr_tree();
    let events: Events = Rc::default();
    let mut dispatcher = CheckDispatcher::new();
    dispatcher
        .setup_check(
            Box::new(Recorder {
                kinds: NodeKindSet::all(),
                events: Rc::clone(&events),
            }),
            None,
            Severity::Warning,
        )
        .unwrap();
    dispatcher.walk(&tree);

    let events = events.borrow();
    let mut enter_at = HashMap::new();
    let mut leave_at = HashMap::new();
    for (position, event) in events.iter().enumerate() {
        match event {
            Event::Enter(_, id) => enter_at.insert(*id, position),
            Event::Leave(_, id) => leave_at.insert(*id, position),
        };
    }
    assert_eq!(enter_at.len(), tree.len());
    assert_eq!(leave_at.len(), tree.len());

    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        let mut ancestor = node.parent();
        while let Some(a) = ancestor {
            assert!(enter_at[&a.id()] < enter_at[&node.id()]);
            assert!(leave_at[&node.id()] < leave_at[&a.id()]);
            ancestor = a.parent();
        }
        // a node's leave precedes its next sibling's enter
        if let Some(next) = node.next_sibling() {
            assert!(leave_at[&node.id()] < enter_at[&next.id()]);
        }
        stack.extend(node.children());
    }
}
