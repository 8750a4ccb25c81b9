// vim: tw=80
//! Configured behaviors: what a matching call does.

use fragile::Fragile;
use std::fmt;

use crate::call::CallArg;
use crate::constraint::{ArgConstraint, CallMatcher};
use crate::descriptor::Direction;
use crate::value::{value, FakeValue, Value};

/// What a rule does once its matcher accepts a call.
pub enum Action {
    /// Yield a fixed value, or nothing for void members.
    Return(Option<Value>),
    /// Fail the dispatch with the given message.  The failure propagates to
    /// the caller unchanged and short-circuits ref/out write-back.
    Fail(String),
    /// Run a side effect against the actual arguments, optionally producing
    /// the return value.
    Invoke(Box<dyn FnMut(&[CallArg]) -> Option<Value> + Send>),
}

impl Action {
    pub fn returns<T: FakeValue>(v: T) -> Self {
        Action::Return(Some(value(v)))
    }

    pub fn returns_value(v: Value) -> Self {
        Action::Return(Some(v))
    }

    pub fn does_nothing() -> Self {
        Action::Return(None)
    }

    pub fn fails(message: impl Into<String>) -> Self {
        Action::Fail(message.into())
    }

    /// Supply a closure that runs on every matching call.  The closure's
    /// return value, if any, becomes the call's return value.
    pub fn invokes<F>(f: F) -> Self
        where F: FnMut(&[CallArg]) -> Option<Value> + Send + 'static
    {
        Action::Invoke(Box::new(f))
    }

    /// Single-threaded version of [`invokes`](#method.invokes).  Can be
    /// used when the closure isn't `Send`.
    ///
    /// It is a runtime error to dispatch the matching call from a different
    /// thread than the one that created the action.
    pub fn invokes_st<F>(f: F) -> Self
        where F: FnMut(&[CallArg]) -> Option<Value> + 'static
    {
        let mut fragile = Fragile::new(f);
        Action::Invoke(Box::new(move |args| (fragile.get_mut())(args)))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Return(v) => f.debug_tuple("Return").field(v).finish(),
            Action::Fail(m) => f.debug_tuple("Fail").field(m).finish(),
            Action::Invoke(_) => f.write_str("Invoke(..)"),
        }
    }
}

/// A configured (matcher, action) pair.  `index` is the registration order,
/// the sole tie-break among rules that both match a call.
pub(crate) struct BehaviorRule {
    pub(crate) matcher: CallMatcher,
    pub(crate) action: Action,
    pub(crate) assignments: Vec<(usize, Value)>,
    pub(crate) index: usize,
}

impl BehaviorRule {
    /// Values to push back into ref/out argument slots after a successful
    /// match: explicit assignments take precedence, then the exact
    /// constraint value at each ref/out position.  A wildcard at a ref
    /// position writes nothing back.
    pub(crate) fn writebacks(&self) -> Vec<(usize, Value)> {
        let mut out: Vec<(usize, Value)> = self.assignments.clone();
        let params = self.matcher.member().params();
        for (i, c) in self.matcher.constraints().iter().enumerate() {
            if out.iter().any(|(j, _)| *j == i) {
                continue;
            }
            let Some(p) = params.get(i) else { continue };
            if !matches!(p.direction(), Direction::Ref | Direction::Out) {
                continue;
            }
            if let ArgConstraint::Exact(v) = c {
                out.push((i, v.clone()));
            }
        }
        out
    }
}

impl fmt::Debug for BehaviorRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BehaviorRule")
            .field("matcher", &self.matcher)
            .field("action", &self.action)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
