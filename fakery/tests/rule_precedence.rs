// vim: tw=80
//! Among rules that match the same call, the most recently registered one
//! wins; registration order is the sole tie-break.
#![deny(warnings)]

use fakery::*;

fn query() -> MemberDescriptor {
    MemberDescriptor::method("IRepo.Query")
        .param::<i32>()
        .returns::<i32>()
}

#[test]
fn second_configuration_wins() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::new(query(), vec![ArgConstraint::exact(5)]).unwrap(),
        Action::returns(50),
    );
    fake.register_rule(
        CallMatcher::new(query(), vec![ArgConstraint::exact(5)]).unwrap(),
        Action::returns(60),
    );

    let outcome = fake.call(query(), vec![CallArg::input(5)]).unwrap();
    assert_eq!(outcome.returned::<i32>(), Some(60));
}

#[test]
fn recency_beats_specificity() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::new(query(), vec![ArgConstraint::exact(5)]).unwrap(),
        Action::returns(50),
    );
    // A later wildcard shadows the earlier exact constraint even for the
    // exact value.
    fake.register_rule(
        CallMatcher::ignoring_arguments(query()),
        Action::returns(1),
    );

    let outcome = fake.call(query(), vec![CallArg::input(5)]).unwrap();
    assert_eq!(outcome.returned::<i32>(), Some(1));
}

#[test]
fn earlier_rules_still_answer_calls_the_later_ones_reject() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::new(query(), vec![ArgConstraint::exact(5)]).unwrap(),
        Action::returns(50),
    );
    fake.register_rule(
        CallMatcher::new(query(), vec![ArgConstraint::exact(6)]).unwrap(),
        Action::returns(60),
    );

    let five = fake.call(query(), vec![CallArg::input(5)]).unwrap();
    assert_eq!(five.returned::<i32>(), Some(50));
    let six = fake.call(query(), vec![CallArg::input(6)]).unwrap();
    assert_eq!(six.returned::<i32>(), Some(60));
}

#[test]
fn registration_indices_increase() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    let first = fake.register_rule(
        CallMatcher::ignoring_arguments(query()),
        Action::returns(1),
    );
    let second = fake.register_rule(
        CallMatcher::ignoring_arguments(query()),
        Action::returns(2),
    );
    assert!(second > first);
}

#[test]
fn only_rules_registered_before_dispatch_are_considered() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();

    let before = fake.call(query(), vec![CallArg::input(5)]).unwrap();
    assert_eq!(before.returned::<i32>(), Some(0));

    fake.register_rule(
        CallMatcher::ignoring_arguments(query()),
        Action::returns(7),
    );
    let after = fake.call(query(), vec![CallArg::input(5)]).unwrap();
    assert_eq!(after.returned::<i32>(), Some(7));
}
