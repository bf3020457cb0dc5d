//! Call-site tracing for registration conflicts.
//!
//! A registration call wrapped by [`ActionTracer::wrap`] records where it
//! came from for as long as it runs. Nested wrapped calls stack up in LIFO
//! order; every exit path, including errors and panics, pops exactly what
//! was pushed. Code that detects a conflict reads the active site and
//! reports both colliding registrations with a [`ConflictError`].
//!
//! Sites come from one of three places ([`CallSite`]):
//!
//! - `#[track_caller]` locations (file and line), the default,
//! - an explicit [`ActionInfo`], e.g. captured with [`action_info!`](crate::action_info)
//!   or [`traced!`](crate::traced), which also record module path and source text,
//! - an enclosing traced call, skipping wrapper layers.

mod stack;
mod types;

pub use stack::{ActionGuard, ActionTracer, CallSite};
pub use types::{ActionInfo, ConflictError};

/// Captures an [`ActionInfo`] for the current source location.
///
/// The function is reported as the enclosing module path. With arguments,
/// their source text is recorded.
///
/// ```
/// let info = u_predicate::action_info!(registry.add("x"));
/// assert!(info.source.starts_with("registry"));
/// assert!(info.file.is_some());
/// ```
#[macro_export]
macro_rules! action_info {
    () => {
        $crate::tracer::ActionInfo::new(Some(file!()), line!(), module_path!(), "")
    };
    ($($source:tt)+) => {
        $crate::tracer::ActionInfo::new(
            Some(file!()),
            line!(),
            module_path!(),
            stringify!($($source)+),
        )
    };
}

/// Evaluates `$call` under `$tracer` with its own source text as the site.
///
/// ```
/// use u_predicate::tracer::ActionTracer;
///
/// let tracer = ActionTracer::new();
/// let source = u_predicate::traced!(tracer, tracer.current().map(|i| i.source));
/// assert!(source.is_some_and(|s| s.contains("current")));
/// ```
#[macro_export]
macro_rules! traced {
    ($tracer:expr, $call:expr) => {
        $tracer.wrap(
            $crate::tracer::CallSite::Explicit($crate::action_info!($call)),
            || $call,
        )
    };
}
