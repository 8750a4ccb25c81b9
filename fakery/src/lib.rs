// vim: tw=80
//! Call interception, matching, and verification engine for fake objects.
//!
//! Fakery is the core of a test-double library: given a description of a
//! member on some interface, it lets a test configure canned behaviors for
//! specific calls, records every call made against a fake instance, resolves
//! which configured behavior applies to an incoming call, and later verifies
//! that expected calls occurred, with a precise diagnostic when they did
//! not.
//!
//! The crate deliberately stops at the interception boundary.  The mechanism
//! that generates a stand-in object and physically intercepts its member
//! calls is an external collaborator: it funnels every intercepted call into
//! [`Fake::call`], applies the returned [`CallOutcome`] (the return value
//! plus any updated ref/out argument values) back to the call site, and
//! routes property accessors to [`Fake::get_property`] and
//! [`Fake::set_property`].
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Matching arguments`](#matching-arguments)
//! * [`Overriding behaviors`](#overriding-behaviors)
//! * [`Ref and out parameters`](#ref-and-out-parameters)
//! * [`Properties`](#properties)
//! * [`Verification`](#verification)
//! * [`Dummy values`](#dummy-values)
//!
//! ## Getting started
//!
//! Describe the member being faked, register a rule, and dispatch:
//!
//! ```
//! use fakery::*;
//!
//! let ctx = FakeContext::new();
//! let fake = ctx.fake();
//!
//! let foo = MemberDescriptor::method("MyTrait.foo")
//!     .param::<u32>()
//!     .returns::<u32>();
//!
//! let matcher = CallMatcher::new(
//!     foo.clone(),
//!     vec![ArgConstraint::exact(4u32)],
//! ).unwrap();
//! fake.register_rule(matcher, Action::returns(5u32));
//!
//! let outcome = fake.call(foo, vec![CallArg::input(4u32)]).unwrap();
//! assert_eq!(outcome.returned::<u32>(), Some(5));
//! ```
//!
//! ## Matching arguments
//!
//! Each parameter position takes one [`ArgConstraint`]: an exact value, a
//! predicate (anything implementing the [`Predicate`] trait, or a plain
//! function), a wildcard, or sequence equality over a trailing parameter
//! array.
//!
//! ```
//! use fakery::*;
//!
//! let ctx = FakeContext::new();
//! let fake = ctx.fake();
//! let foo = MemberDescriptor::method("MyTrait.foo")
//!     .param::<u32>()
//!     .returns::<u32>();
//!
//! fake.register_rule(
//!     CallMatcher::new(
//!         foo.clone(),
//!         vec![ArgConstraint::matching(predicate::gt(4u32))],
//!     ).unwrap(),
//!     Action::returns(99u32),
//! );
//!
//! let hit = fake.call(foo.clone(), vec![CallArg::input(5u32)]).unwrap();
//! assert_eq!(hit.returned::<u32>(), Some(99));
//!
//! // No rule matches; value types fall back to their zero value.
//! let miss = fake.call(foo, vec![CallArg::input(3u32)]).unwrap();
//! assert_eq!(miss.returned::<u32>(), Some(0));
//! ```
//!
//! A registration whose constraint count cannot line up with the member's
//! parameters is rejected immediately:
//!
//! ```
//! use fakery::*;
//!
//! let foo = MemberDescriptor::method("MyTrait.foo").param::<u32>();
//! assert!(CallMatcher::new(foo, vec![]).is_err());
//! ```
//!
//! ## Overriding behaviors
//!
//! Rules are evaluated most recent first, and the first match wins.
//! Configuring the same call twice means the second configuration answers:
//!
//! ```
//! use fakery::*;
//!
//! let ctx = FakeContext::new();
//! let fake = ctx.fake();
//! let foo = MemberDescriptor::method("MyTrait.foo").returns::<u32>();
//!
//! fake.register_rule(
//!     CallMatcher::ignoring_arguments(foo.clone()),
//!     Action::returns(1u32),
//! );
//! fake.register_rule(
//!     CallMatcher::ignoring_arguments(foo.clone()),
//!     Action::returns(2u32),
//! );
//!
//! let outcome = fake.call(foo, vec![]).unwrap();
//! assert_eq!(outcome.returned::<u32>(), Some(2));
//! ```
//!
//! ## Ref and out parameters
//!
//! A `ref` argument matches on its value at call time; an `out` argument
//! always matches, whatever constraint is attached.  On a successful match
//! the exact constraint value at each ref/out position is handed back as a
//! write-back for the call site to apply:
//!
//! ```
//! use fakery::*;
//!
//! let ctx = FakeContext::new();
//! let fake = ctx.fake();
//! let try_get = MemberDescriptor::method("IDictionary.TryGetValue")
//!     .param::<&'static str>()
//!     .out_param::<&'static str>()
//!     .returns::<bool>();
//!
//! fake.register_rule(
//!     CallMatcher::new(try_get.clone(), vec![
//!         ArgConstraint::exact("any key"),
//!         ArgConstraint::exact("a constraint string"),
//!     ]).unwrap(),
//!     Action::returns(true),
//! );
//!
//! let outcome = fake.call(try_get, vec![
//!     CallArg::input("any key"),
//!     CallArg::output("a different string"),
//! ]).unwrap();
//! assert_eq!(outcome.returned::<bool>(), Some(true));
//! assert_eq!(outcome.writeback::<&str>(1), Some("a constraint string"));
//! ```
//!
//! ## Properties
//!
//! Property access bypasses rule matching entirely.  Every
//! `(property, index tuple)` pair is an independent cell: the first get
//! materializes a value and pins it, a set overwrites it, and repeated gets
//! return the identical value.
//!
//! ```
//! use fakery::*;
//! use std::sync::Arc;
//!
//! let ctx = FakeContext::new();
//! let fake = ctx.fake();
//! let name = MemberDescriptor::property("IThing.Name")
//!     .returns::<String>();
//!
//! let first = fake.get_property(&name, &[]).unwrap();
//! let second = fake.get_property(&name, &[]).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//!
//! fake.set_property(&name, &[], value(String::from("renamed")));
//! let third = fake.get_property(&name, &[]).unwrap();
//! assert_eq!(third.downcast_ref::<String>().unwrap(), "renamed");
//! ```
//!
//! ## Verification
//!
//! [`Fake::verify`] scans the instance's full call log with the same
//! matching semantics used for dispatch and checks the count against a
//! [`Repeated`] constraint.  Failure yields an [`AssertionFailure`] whose
//! `Display` is a deterministic diagnostic listing every recorded call:
//!
//! ```
//! use fakery::*;
//!
//! let ctx = FakeContext::new();
//! let fake = ctx.fake();
//! let bar = MemberDescriptor::method("IFoo.Bar").param::<i32>();
//!
//! fake.call(bar.clone(), vec![CallArg::input(1)]).unwrap();
//!
//! let err = fake.verify(
//!     &CallMatcher::new(bar, vec![ArgConstraint::exact(3)]).unwrap(),
//!     Repeated::at_least_once(),
//! ).unwrap_err();
//! assert!(err.to_string().contains("found it #0 times"));
//! ```
//!
//! ## Dummy values
//!
//! When no rule matches a call, or an unconfigured property is first read,
//! the engine needs a placeholder value.  Primitive types fall back to
//! built-in zero values; for everything else a [`DummyFactory`] may be
//! attached to the [`FakeContext`].  A factory that cannot produce a value
//! is not an error: the call simply resolves to no value.
//!
//! ```
//! use fakery::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Token(&'static str);
//!
//! struct Dummies;
//! impl DummyFactory for Dummies {
//!     fn produce(&self, ty: TypeDesc) -> Option<Value> {
//!         (ty == TypeDesc::of::<Token>()).then(|| value(Token("dummy")))
//!     }
//! }
//!
//! let ctx = FakeContext::with_dummies(Dummies);
//! let fake = ctx.fake();
//! let get = MemberDescriptor::method("IVault.Get").returns::<Token>();
//!
//! let outcome = fake.call(get, vec![]).unwrap();
//! assert_eq!(outcome.returned::<Token>(), Some(Token("dummy")));
//! ```

mod call;
mod constraint;
mod descriptor;
mod dummy;
mod error;
mod fake;
mod rule;
mod value;
mod verify;

pub use crate::call::{CallArg, Invocation};
pub use crate::constraint::{ArgConstraint, CallMatcher, PredicateFn};
pub use crate::descriptor::{Direction, MemberDescriptor, Param, TypeDesc};
pub use crate::dummy::DummyFactory;
pub use crate::error::{AssertionFailure, ConfigError, Fault};
pub use crate::fake::{CallOutcome, Fake, FakeContext};
pub use crate::rule::Action;
pub use crate::value::{value, FakeValue, Value};
pub use crate::verify::Repeated;

pub use predicates::prelude::{predicate, Predicate};
