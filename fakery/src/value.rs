// vim: tw=80
//! Dynamically typed values that cross the interception boundary.

use downcast::*;
use std::fmt;
use std::sync::Arc;

/// A value that can flow through a fake: an argument, a return value, or a
/// stored property value.
///
/// There is a blanket implementation for every `'static` type that is
/// `Debug + PartialEq + Send + Sync`.  `Debug` supplies the natural textual
/// form used by assertion diagnostics, and `PartialEq` backs exact-value
/// constraints.
pub trait FakeValue: Any + fmt::Debug + Send + Sync {
    /// Dynamic equality: true iff `other` holds the same concrete type and
    /// the two values compare equal.
    fn eq_value(&self, other: &dyn FakeValue) -> bool;
}

downcast!(dyn FakeValue);

impl<T> FakeValue for T
    where T: fmt::Debug + PartialEq + Send + Sync + 'static
{
    fn eq_value(&self, other: &dyn FakeValue) -> bool {
        other.downcast_ref::<T>().map(|o| self == o).unwrap_or(false)
    }
}

/// Shared handle to a dynamically typed value.
///
/// `Arc` rather than `Box` so a property cell can hand out the identical
/// stored value on every get, and so invocations can be appended to the call
/// log without cloning the underlying data.
pub type Value = Arc<dyn FakeValue>;

/// Wrap a concrete value for the engine.
///
/// ```
/// use fakery::value;
///
/// let v = value(42i32);
/// assert_eq!(v.downcast_ref::<i32>().unwrap(), &42);
/// ```
pub fn value<T: FakeValue>(v: T) -> Value {
    Arc::new(v)
}
