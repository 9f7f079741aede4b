//! Instrumented engine double: a flat fake DOM and an ordered event log.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::engine::{AnimationEngine, Playback};
use super::error::MotionResult;
use super::tween::{Props, Tween};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Create { context: u32, scope: Option<&'static str> },
    Revert(u32),
    Animate { context: u32, targets: Vec<String> },
    Set { context: u32, targets: Vec<String> },
    Cancel { context: u32, targets: Vec<String> },
    Control { context: u32, playback: Playback },
    Note(String),
}

#[derive(Clone)]
struct FakeNode {
    scope: &'static str,
    name: &'static str,
    class: &'static str,
}

pub struct TestContext {
    id: u32,
    scope: Option<&'static str>,
}

pub struct RecordingEngine {
    pub log: Rc<RefCell<Vec<Event>>>,
    available: bool,
    reduced_motion: bool,
    next_id: Cell<u32>,
    dom: Vec<FakeNode>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            available: true,
            reduced_motion: false,
            next_id: Cell::new(0),
            dom: Vec::new(),
        }
    }

    /// Nodes as (scope, name, class).
    pub fn with_dom(mut self, nodes: &[(&'static str, &'static str, &'static str)]) -> Self {
        self.dom = nodes
            .iter()
            .map(|&(scope, name, class)| FakeNode { scope, name, class })
            .collect();
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn reduced_motion(mut self) -> Self {
        self.reduced_motion = true;
        self
    }

    /// Second engine over the same DOM that writes into the same log.
    pub fn sharing_log(&self) -> Self {
        Self {
            log: Rc::clone(&self.log),
            available: self.available,
            reduced_motion: self.reduced_motion,
            next_id: Cell::new(0),
            dom: self.dom.clone(),
        }
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl AnimationEngine for RecordingEngine {
    type Target = String;
    type Scope = &'static str;
    type Context = TestContext;

    fn is_available(&self) -> bool {
        self.available
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn create_context(&self, scope: Option<&'static str>) -> TestContext {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.push(Event::Create { context: id, scope });
        TestContext { id, scope }
    }

    fn revert(&self, context: TestContext) {
        self.push(Event::Revert(context.id));
    }

    fn select(&self, context: &TestContext, query: &str) -> Vec<String> {
        self.dom
            .iter()
            .filter(|node| context.scope.map_or(true, |scope| scope == node.scope))
            .filter(|node| query.strip_prefix('.') == Some(node.class))
            .map(|node| node.name.to_string())
            .collect()
    }

    fn animate(&self, context: &mut TestContext, targets: &[String], _tween: &Tween) -> MotionResult<()> {
        self.push(Event::Animate { context: context.id, targets: targets.to_vec() });
        Ok(())
    }

    fn set(&self, context: &mut TestContext, targets: &[String], _props: &Props) -> MotionResult<()> {
        self.push(Event::Set { context: context.id, targets: targets.to_vec() });
        Ok(())
    }

    fn cancel(&self, context: &mut TestContext, targets: &[String]) {
        self.push(Event::Cancel { context: context.id, targets: targets.to_vec() });
    }

    fn control(&self, context: &mut TestContext, playback: Playback) {
        self.push(Event::Control { context: context.id, playback });
    }
}
