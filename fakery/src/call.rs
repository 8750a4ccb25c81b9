// vim: tw=80
//! Recorded invocations and the per-instance call log.

use crate::descriptor::{Direction, MemberDescriptor};
use crate::value::{value, FakeValue, Value};

/// One actual argument, tagged with how it travels.
#[derive(Clone, Debug)]
pub struct CallArg {
    value: Value,
    direction: Direction,
}

impl CallArg {
    pub fn new(value: Value, direction: Direction) -> Self {
        CallArg { value, direction }
    }

    /// An ordinary by-value argument.
    pub fn input<T: FakeValue>(v: T) -> Self {
        CallArg::new(value(v), Direction::In)
    }

    /// A by-reference argument carrying its pre-call value.
    pub fn by_ref<T: FakeValue>(v: T) -> Self {
        CallArg::new(value(v), Direction::Ref)
    }

    /// An output argument.  The pre-call value is irrelevant to matching but
    /// must still be supplied so the slot can be rendered and written back.
    pub fn output<T: FakeValue>(v: T) -> Self {
        CallArg::new(value(v), Direction::Out)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn set_value(&mut self, v: Value) {
        self.value = v;
    }
}

/// One recorded call against a fake instance.  Appended to the log once and
/// never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Invocation {
    instance: u64,
    member: MemberDescriptor,
    args: Vec<CallArg>,
    return_value: Option<Value>,
    sequence: u64,
}

impl Invocation {
    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn member(&self) -> &MemberDescriptor {
        &self.member
    }

    pub fn args(&self) -> &[CallArg] {
        &self.args
    }

    pub fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    /// Position in this instance's call order, starting at 0.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Render the call with its actual argument values, for diagnostics.
    pub(crate) fn render(&self) -> String {
        let cells: Vec<String> = self.args.iter()
            .map(|a| format!("{:?}", a.value))
            .collect();
        self.member.render(&cells)
    }
}

/// Append-only log of invocations for one fake instance.  Sequence numbers
/// are assigned here and define the total order used by diagnostics.
#[derive(Debug, Default)]
pub(crate) struct CallLog {
    calls: Vec<Invocation>,
    next_seq: u64,
}

impl CallLog {
    pub fn record(
        &mut self,
        instance: u64,
        member: MemberDescriptor,
        args: Vec<CallArg>,
        return_value: Option<Value>,
    ) -> u64 {
        let sequence = self.next_seq;
        self.next_seq += 1;
        self.calls.push(Invocation {
            instance,
            member,
            args,
            return_value,
            sequence,
        });
        sequence
    }

    /// Snapshot of the log, safe to iterate while recording continues on
    /// other instances.
    pub fn snapshot(&self) -> Vec<Invocation> {
        self.calls.clone()
    }
}
