// vim: tw=80
//! Post-hoc verification and the assertion diagnostic format.

use std::fmt;

use crate::call::Invocation;
use crate::constraint::CallMatcher;
use crate::error::AssertionFailure;

/// How many matching calls satisfy an assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeated {
    AtLeast(usize),
    Exactly(usize),
    Never,
}

impl Repeated {
    /// Shortcut for `AtLeast(1)`.
    pub fn at_least_once() -> Self {
        Repeated::AtLeast(1)
    }

    /// Shortcut for `Exactly(1)`.
    pub fn once() -> Self {
        Repeated::Exactly(1)
    }

    fn satisfied_by(&self, count: usize) -> bool {
        match self {
            Repeated::AtLeast(n) => count >= *n,
            Repeated::Exactly(n) => count == *n,
            Repeated::Never => count == 0,
        }
    }
}

impl fmt::Display for Repeated {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Repeated::AtLeast(1) => write!(f, "at least once"),
            Repeated::AtLeast(n) => write!(f, "at least {n} times"),
            Repeated::Exactly(1) => write!(f, "exactly once"),
            Repeated::Exactly(n) => write!(f, "exactly {n} times"),
            Repeated::Never => write!(f, "never"),
        }
    }
}

/// Count invocations accepted by `matcher` and check them against
/// `repeated`, rendering the diagnostic on failure.
pub(crate) fn verify(
    matcher: &CallMatcher,
    repeated: Repeated,
    calls: &[Invocation],
) -> Result<(), AssertionFailure> {
    let count = calls.iter()
        .filter(|c| matcher.matches(c.member(), c.args()))
        .count();
    if repeated.satisfied_by(count) {
        return Ok(());
    }
    Err(AssertionFailure {
        diagnostic: diagnostic(matcher, repeated, count, calls),
    })
}

// The diagnostic layout is a contract: tests assert on the literal text.
// A leading blank line, the expected signature, the observed count (or the
// no-calls variant), every recorded call 1-indexed in call order, and a
// trailing blank line.
fn diagnostic(
    matcher: &CallMatcher,
    repeated: Repeated,
    count: usize,
    calls: &[Invocation],
) -> String {
    let mut out = String::from("\n\n");
    out.push_str("  Assertion failed for the following call:\n");
    out.push_str(&format!("    {}\n", matcher.render_expected()));
    if calls.is_empty() {
        out.push_str(&format!(
            "  Expected to find it {repeated} but no calls were made to the fake object.\n"
        ));
    } else {
        out.push_str(&format!(
            "  Expected to find it {repeated} but found it #{count} times among the calls:\n"
        ));
        for (i, call) in calls.iter().enumerate() {
            out.push_str(&format!("    {}: {}\n", i + 1, call.render()));
        }
    }
    out.push('\n');
    out
}
