// vim: tw=80
//! Fake instances: dispatch, rule registration, property storage, and
//! verification queries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::call::{CallArg, CallLog, Invocation};
use crate::constraint::CallMatcher;
use crate::descriptor::{MemberDescriptor, TypeDesc};
use crate::dummy::{zero_value, DummyFactory};
use crate::error::{AssertionFailure, Fault};
use crate::rule::{Action, BehaviorRule};
use crate::value::{FakeValue, Value};
use crate::verify::{self, Repeated};

/// Mints fake instances and owns the cross-cutting collaborators: the
/// instance id counter and the dummy factory.
///
/// The counter lives here, not in process-wide state, so independent test
/// fixtures never observe each other's ids.
#[derive(Default)]
pub struct FakeContext {
    next_id: AtomicU64,
    dummies: Option<Arc<dyn DummyFactory>>,
}

impl FakeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose fakes consult `factory` for default return values and
    /// property materialization.
    pub fn with_dummies(factory: impl DummyFactory + 'static) -> Self {
        FakeContext {
            dummies: Some(Arc::new(factory)),
            ..Self::default()
        }
    }

    /// Create a new fake instance with a fresh id and empty state.
    pub fn fake(&self) -> Fake {
        Fake {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            dummies: self.dummies.clone(),
            inner: Mutex::new(Inner::default()),
        }
    }
}

/// Everything guarded by the per-instance lock.  The lock is held for the
/// duration of one dispatch, one property access, or one assertion query,
/// never across operations; operations on different fakes never contend.
#[derive(Default)]
struct Inner {
    rules: Vec<BehaviorRule>,
    log: CallLog,
    properties: Vec<PropertyCell>,
}

/// One materialized `(property, index tuple)` cell.  Distinct index tuples
/// are wholly independent cells.
struct PropertyCell {
    member: MemberDescriptor,
    indices: Vec<Value>,
    value: Value,
}

/// One fake instance: its configured rules, call log, and property cells.
///
/// Created through [`FakeContext::fake`].  The interception layer funnels
/// every call on the generated stand-in through [`call`](#method.call) and
/// every property access through [`get_property`](#method.get_property) and
/// [`set_property`](#method.set_property).
pub struct Fake {
    id: u64,
    dummies: Option<Arc<dyn DummyFactory>>,
    inner: Mutex<Inner>,
}

/// What a dispatch hands back to the interception layer.
#[derive(Clone, Debug)]
pub struct CallOutcome {
    /// The resolved return value, if any.
    pub return_value: Option<Value>,
    /// `(argument index, new value)` pairs the call site must apply to its
    /// ref/out slots before returning control to the caller.
    pub writebacks: Vec<(usize, Value)>,
}

impl CallOutcome {
    /// Downcast the resolved return value.
    pub fn returned<T: FakeValue + Clone>(&self) -> Option<T> {
        self.return_value.as_ref()
            .and_then(|v| v.downcast_ref::<T>().ok().cloned())
    }

    /// Downcast the written-back value for one argument slot.
    pub fn writeback<T: FakeValue + Clone>(&self, index: usize) -> Option<T> {
        self.writebacks.iter()
            .find(|(i, _)| *i == index)
            .and_then(|(_, v)| v.downcast_ref::<T>().ok().cloned())
    }
}

impl Fake {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Register a behavior rule and return its registration index.
    ///
    /// Among rules that match the same call, the one registered last wins;
    /// later configuration overrides earlier configuration for the same
    /// member.  Only rules registered before a call is dispatched are
    /// considered for it.
    pub fn register_rule(&self, matcher: CallMatcher, action: Action) -> usize {
        self.register_rule_assigning(matcher, action, Vec::new())
    }

    /// Like [`register_rule`](#method.register_rule), with explicit ref/out
    /// write-back values that override those derived from exact constraints.
    pub fn register_rule_assigning(
        &self,
        matcher: CallMatcher,
        action: Action,
        assignments: Vec<(usize, Value)>,
    ) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let index = inner.rules.len();
        inner.rules.push(BehaviorRule { matcher, action, assignments, index });
        index
    }

    /// Dispatch one intercepted call.
    ///
    /// The invocation is always recorded, matched or not.  The most
    /// recently registered matching rule is applied; with no match the
    /// default fallback produces a dummy (or zero) value for the return
    /// type, or no value at all.  A rule configured to fail propagates its
    /// [`Fault`] and skips write-back.
    pub fn call(
        &self,
        member: MemberDescriptor,
        mut args: Vec<CallArg>,
    ) -> Result<CallOutcome, Fault> {
        let mut inner = self.inner.lock().unwrap();
        let inner = &mut *inner;
        let rule = inner.rules.iter_mut().rev()
            .find(|r| r.matcher.matches(&member, &args));
        let outcome = match rule {
            Some(rule) => {
                if let Action::Fail(message) = &rule.action {
                    let fault = Fault { message: message.clone() };
                    inner.log.record(self.id, member, args, None);
                    return Err(fault);
                }
                let writebacks = rule.writebacks();
                let return_value = match &mut rule.action {
                    Action::Return(v) => v.clone(),
                    Action::Invoke(f) => f(&args),
                    Action::Fail(_) => unreachable!(),
                };
                // The recorded invocation reflects post-call argument
                // values.
                for (i, v) in &writebacks {
                    if let Some(arg) = args.get_mut(*i) {
                        arg.set_value(v.clone());
                    }
                }
                CallOutcome { return_value, writebacks }
            }
            None => {
                // Unmatched is not an error: fall back to a default value
                // for the return type.
                CallOutcome {
                    return_value: member.return_type()
                        .and_then(|ty| self.produce_default(ty)),
                    writebacks: Vec::new(),
                }
            }
        };
        inner.log.record(self.id, member, args, outcome.return_value.clone());
        Ok(outcome)
    }

    /// Read a property cell for the given index tuple (empty for
    /// non-indexed properties).
    ///
    /// The first get materializes a value through the dummy factory and
    /// pins it; every later get on the same index tuple returns the
    /// identical value.  Returns `None` only when no value was ever set and
    /// none could be produced, in which case nothing is pinned.
    pub fn get_property(
        &self,
        property: &MemberDescriptor,
        indices: &[Value],
    ) -> Option<Value> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(cell) = inner.properties.iter()
            .find(|c| c.member == *property && tuple_eq(&c.indices, indices))
        {
            return Some(cell.value.clone());
        }
        let produced = property.return_type()
            .and_then(|ty| self.produce_default(ty))?;
        inner.properties.push(PropertyCell {
            member: property.clone(),
            indices: indices.to_vec(),
            value: produced.clone(),
        });
        Some(produced)
    }

    /// Overwrite one index tuple's cell unconditionally.  Other tuples of
    /// the same property are unaffected.
    pub fn set_property(
        &self,
        property: &MemberDescriptor,
        indices: &[Value],
        value: Value,
    ) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(cell) = inner.properties.iter_mut()
            .find(|c| c.member == *property && tuple_eq(&c.indices, indices))
        {
            cell.value = value;
        } else {
            inner.properties.push(PropertyCell {
                member: property.clone(),
                indices: indices.to_vec(),
                value,
            });
        }
    }

    /// Verify that calls matching `matcher` happened per `repeated`,
    /// against the full ordered log of this instance.
    pub fn verify(
        &self,
        matcher: &CallMatcher,
        repeated: Repeated,
    ) -> Result<(), AssertionFailure> {
        let calls = self.calls();
        verify::verify(matcher, repeated, &calls)
    }

    /// Snapshot of every invocation recorded against this instance, in call
    /// order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.inner.lock().unwrap().log.snapshot()
    }

    // Dummy factory first, built-in zeros second.  A factory failure is
    // swallowed: "no dummy available" is not an error.
    fn produce_default(&self, ty: TypeDesc) -> Option<Value> {
        self.dummies.as_ref()
            .and_then(|d| d.produce(ty))
            .or_else(|| zero_value(ty))
    }
}

fn tuple_eq(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_value(&**y))
}
