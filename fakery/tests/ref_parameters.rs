// vim: tw=80
//! By-reference parameters match on their value at call time and receive
//! the constraint value as a write-back after a match.
#![deny(warnings)]

use fakery::*;

fn check_your_references() -> MemberDescriptor {
    MemberDescriptor::method("IRefs.CheckYourReferences")
        .ref_param::<&'static str>()
        .returns::<bool>()
}

#[test]
fn matches_when_ref_value_matches() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::new(
            check_your_references(),
            vec![ArgConstraint::exact("a constraint string")],
        ).unwrap(),
        Action::returns(true),
    );

    let outcome = fake.call(
        check_your_references(),
        vec![CallArg::by_ref("a constraint string")],
    ).unwrap();
    assert_eq!(outcome.returned::<bool>(), Some(true));
}

#[test]
fn mismatching_ref_value_falls_back_to_default() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::new(
            check_your_references(),
            vec![ArgConstraint::exact("a constraint string")],
        ).unwrap(),
        Action::returns(true),
    );

    let outcome = fake.call(
        check_your_references(),
        vec![CallArg::by_ref("a different string")],
    ).unwrap();
    assert_eq!(outcome.returned::<bool>(), Some(false));
    assert!(outcome.writebacks.is_empty());
}

#[test]
fn constraint_value_assigned_to_ref_parameter() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::new(
            check_your_references(),
            vec![ArgConstraint::exact("a constraint string")],
        ).unwrap(),
        Action::returns(true),
    );

    let outcome = fake.call(
        check_your_references(),
        vec![CallArg::by_ref("a constraint string")],
    ).unwrap();
    assert_eq!(
        outcome.writeback::<&str>(0),
        Some("a constraint string"),
    );
}

#[test]
fn wildcard_ref_constraint_writes_nothing_back() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::ignoring_arguments(check_your_references()),
        Action::returns(true),
    );

    let outcome = fake.call(
        check_your_references(),
        vec![CallArg::by_ref("anything at all")],
    ).unwrap();
    assert_eq!(outcome.returned::<bool>(), Some(true));
    assert!(outcome.writebacks.is_empty());
}
