//! Scoped stack of in-flight registration calls.

use super::types::ActionInfo;
use std::cell::RefCell;
use std::rc::Rc;

/// How a traced call resolves its site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallSite {
    /// The code calling [`ActionTracer::wrap`], followed through any
    /// `#[track_caller]` wrappers.
    #[default]
    Caller,
    /// A site supplied by an outer wrapper.
    Explicit(ActionInfo),
    /// The site of the `backframes`-th enclosing traced call, skipping
    /// intermediate wrapper layers. `0` is the same as `Caller`; a count
    /// deeper than the stack falls back to `Caller`.
    Outer { backframes: usize },
}

/// A handle to one owner's stack of active call sites.
///
/// Clones share the stack. The stack belongs to a single owner on a single
/// thread: the handle is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```
/// use u_predicate::tracer::{ActionTracer, CallSite};
///
/// let tracer = ActionTracer::new();
/// let depth = tracer.wrap(CallSite::Caller, || tracer.depth());
/// assert_eq!(depth, 1);
/// assert_eq!(tracer.depth(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ActionTracer {
    frames: Rc<RefCell<Vec<ActionInfo>>>,
}

impl ActionTracer {
    /// Creates a tracer with an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of traced calls currently in flight.
    pub fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    /// The innermost active site.
    pub fn current(&self) -> Option<ActionInfo> {
        self.frames.borrow().last().cloned()
    }

    /// The outermost active site: the call the user actually wrote.
    pub fn origin(&self) -> Option<ActionInfo> {
        self.frames.borrow().first().cloned()
    }

    /// Snapshot of the active sites, outermost first.
    pub fn frames(&self) -> Vec<ActionInfo> {
        self.frames.borrow().clone()
    }

    /// Resolves `site` against the current stack.
    #[track_caller]
    pub fn resolve(&self, site: CallSite) -> ActionInfo {
        match site {
            CallSite::Explicit(info) => info,
            CallSite::Outer { backframes } => {
                let frames = self.frames.borrow();
                match frames.len().checked_sub(backframes) {
                    Some(idx) if backframes > 0 => frames[idx].clone(),
                    _ => ActionInfo::caller(),
                }
            }
            CallSite::Caller => ActionInfo::caller(),
        }
    }

    /// Pushes `info`; the returned guard pops it when dropped.
    pub fn enter(&self, info: ActionInfo) -> ActionGuard {
        let mut frames = self.frames.borrow_mut();
        let depth = frames.len();
        frames.push(info);
        tracing::trace!(depth = depth + 1, "entered traced call");
        ActionGuard {
            frames: Rc::clone(&self.frames),
            depth,
        }
    }

    /// Runs `call` with its site on the stack.
    ///
    /// The site is popped on every exit path, including unwinding, before
    /// the result (or an error inside it) reaches the caller.
    #[track_caller]
    pub fn wrap<R>(&self, site: CallSite, call: impl FnOnce() -> R) -> R {
        let info = self.resolve(site);
        let _guard = self.enter(info);
        call()
    }
}

/// Restores the stack to its depth before [`ActionTracer::enter`].
#[must_use = "the site is popped as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ActionGuard {
    frames: Rc<RefCell<Vec<ActionInfo>>>,
    depth: usize,
}

impl Drop for ActionGuard {
    fn drop(&mut self) {
        self.frames.borrow_mut().truncate(self.depth);
        tracing::trace!(depth = self.depth, "left traced call");
    }
}
