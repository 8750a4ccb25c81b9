// vim: tw=80
//! Argument constraints and the call matcher built from them.

use predicates::prelude::*;
use std::fmt;

use crate::call::CallArg;
use crate::descriptor::{Direction, MemberDescriptor};
use crate::error::ConfigError;
use crate::value::{value, FakeValue, Value};

/// Matcher for a single parameter position.
///
/// The set of constraint forms is deliberately closed; there is no
/// open-ended matcher object to implement.
pub enum ArgConstraint {
    /// Matches a value equal to the given one.  For `ref` parameters the
    /// comparison is against the argument's value at call time, before any
    /// write-back.
    Exact(Value),
    /// Matches any value the predicate accepts.
    Predicate(PredicateFn),
    /// Matches anything.  Also the effective constraint for every `out`
    /// parameter: `out` constraints are never evaluated for matching, only
    /// consulted for write-back.
    Ignored,
    /// Matches a trailing parameter array whose aggregated actual arguments
    /// equal the given sequence element-wise, in order, same count.
    Sequence(Vec<Value>),
}

/// A type-erased predicate over a single argument, with a label for
/// rendering the expected signature.
pub struct PredicateFn {
    f: Box<dyn Fn(&dyn FakeValue) -> bool + Send + Sync>,
    label: String,
}

impl ArgConstraint {
    pub fn exact<T: FakeValue>(v: T) -> Self {
        ArgConstraint::Exact(value(v))
    }

    pub fn ignored() -> Self {
        ArgConstraint::Ignored
    }

    /// Adapt a typed predicate from the `predicates` crate.  Arguments of a
    /// different concrete type never match.
    ///
    /// ```
    /// use fakery::{predicate, ArgConstraint};
    ///
    /// let c = ArgConstraint::matching(predicate::gt(4i32));
    /// ```
    pub fn matching<T, P>(p: P) -> Self
        where T: FakeValue, P: Predicate<T> + Send + Sync + 'static
    {
        let label = p.to_string();
        ArgConstraint::Predicate(PredicateFn {
            f: Box::new(move |v| {
                v.downcast_ref::<T>().map(|t| p.eval(t)).unwrap_or(false)
            }),
            label,
        })
    }

    /// Like [`matching`](#method.matching), but from a plain function.
    pub fn matching_fn<T, F>(f: F) -> Self
        where T: FakeValue, F: Fn(&T) -> bool + Send + Sync + 'static
    {
        ArgConstraint::Predicate(PredicateFn {
            f: Box::new(move |v| {
                v.downcast_ref::<T>().map(|t| f(t)).unwrap_or(false)
            }),
            label: "predicate".to_owned(),
        })
    }

    /// Sequence-equality over a trailing parameter array.
    pub fn sequence<T, I>(items: I) -> Self
        where T: FakeValue, I: IntoIterator<Item = T>
    {
        ArgConstraint::Sequence(items.into_iter().map(value).collect())
    }

    fn matches_value(&self, v: &dyn FakeValue) -> bool {
        match self {
            ArgConstraint::Exact(want) => want.eq_value(v),
            ArgConstraint::Predicate(p) => (p.f)(v),
            ArgConstraint::Ignored => true,
            // Only meaningful in aggregated position; a sequence constraint
            // never matches a single argument.
            ArgConstraint::Sequence(_) => false,
        }
    }

    pub(crate) fn render(&self) -> String {
        match self {
            ArgConstraint::Exact(v) => format!("{v:?}"),
            ArgConstraint::Predicate(p) => format!("<{}>", p.label),
            ArgConstraint::Ignored => "<Ignored>".to_owned(),
            ArgConstraint::Sequence(items) => {
                let cells: Vec<String> =
                    items.iter().map(|v| format!("{v:?}")).collect();
                format!("[{}]", cells.join(", "))
            }
        }
    }
}

impl fmt::Debug for ArgConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A member plus one constraint per parameter position: the left-hand side
/// of a behavior rule, and the query side of an assertion.
///
/// Construction validates the constraint count against the member's
/// declared parameters, so a malformed configuration is rejected before it
/// can be registered.
pub struct CallMatcher {
    member: MemberDescriptor,
    constraints: Vec<ArgConstraint>,
}

impl CallMatcher {
    pub fn new(member: MemberDescriptor, constraints: Vec<ArgConstraint>)
        -> Result<Self, ConfigError>
    {
        let declared = member.params().len();
        // A trailing parameter array may be matched either aggregated (one
        // constraint for the whole tail) or expanded (one constraint per
        // actual element).
        let ok = if member.is_variadic() {
            constraints.len() + 1 >= declared
        } else {
            constraints.len() == declared
        };
        if !ok {
            return Err(ConfigError::ConstraintCount {
                member: member.name().to_owned(),
                expected: declared,
                actual: constraints.len(),
            });
        }
        Ok(CallMatcher { member, constraints })
    }

    /// Shorthand: one `Ignored` constraint per declared parameter.
    pub fn ignoring_arguments(member: MemberDescriptor) -> Self {
        let constraints =
            member.params().iter().map(|_| ArgConstraint::Ignored).collect();
        CallMatcher { member, constraints }
    }

    pub fn member(&self) -> &MemberDescriptor {
        &self.member
    }

    pub fn constraints(&self) -> &[ArgConstraint] {
        &self.constraints
    }

    /// Does this matcher accept the given call?  Member identity first
    /// (including generic instantiation), then direction-aware
    /// argument-by-argument evaluation.
    pub(crate) fn matches(
        &self,
        call: &MemberDescriptor,
        args: &[CallArg],
    ) -> bool {
        self.member.applies_to(call) && self.matches_args(args)
    }

    fn matches_args(&self, args: &[CallArg]) -> bool {
        let declared = self.member.params().len();
        if self.member.is_variadic() && self.constraints.len() == declared {
            let head = declared - 1;
            if args.len() < head {
                return false;
            }
            match self.constraints.last() {
                Some(ArgConstraint::Sequence(want)) => {
                    let tail = &args[head..];
                    return self.head_matches(head, args)
                        && want.len() == tail.len()
                        && want.iter().zip(tail)
                            .all(|(w, a)| w.eq_value(&**a.value()));
                }
                Some(ArgConstraint::Ignored) if args.len() != declared => {
                    // Wildcard over the whole tail, whatever its length.
                    // The equal-length case falls through to the expanded
                    // path, which treats it identically.
                    return self.head_matches(head, args);
                }
                _ => {}
            }
        }
        // Expanded form: one constraint per actual argument.
        self.constraints.len() == args.len()
            && self.constraints.iter().zip(args)
                .all(|(c, a)| Self::match_one(c, a))
    }

    fn head_matches(&self, head: usize, args: &[CallArg]) -> bool {
        self.constraints[..head].iter().zip(&args[..head])
            .all(|(c, a)| Self::match_one(c, a))
    }

    fn match_one(c: &ArgConstraint, a: &CallArg) -> bool {
        // An out parameter's pre-call value is undefined; its constraint is
        // consulted only for write-back.
        if a.direction() == Direction::Out {
            return true;
        }
        c.matches_value(&**a.value())
    }

    /// Render the expected signature for a diagnostic: wildcards as
    /// `<Ignored>`, out parameters as `<out parameter>`.
    pub(crate) fn render_expected(&self) -> String {
        let params = self.member.params();
        let cells: Vec<String> = self.constraints.iter().enumerate()
            .map(|(i, c)| {
                // Expanded variadic constraints take the trailing
                // parameter's direction.
                let p = params.get(i).or_else(|| params.last());
                match p {
                    Some(p) if p.direction() == Direction::Out =>
                        "<out parameter>".to_owned(),
                    _ => c.render(),
                }
            })
            .collect();
        self.member.render(&cells)
    }
}

impl fmt::Debug for CallMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render_expected())
    }
}
