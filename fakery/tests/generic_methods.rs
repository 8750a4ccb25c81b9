// vim: tw=80
//! Generic members: each instantiation is a distinct member, while a matcher
//! that leaves its type arguments open adopts the call site's instantiation.
#![deny(warnings)]

use fakery::*;

fn bar<T: 'static, U: 'static>() -> MemberDescriptor {
    MemberDescriptor::method("IGeneric.Bar")
        .type_arg::<T>()
        .type_arg::<U>()
        .param::<T>()
        .param::<U>()
        .returns::<i32>()
}

fn bar_any_instantiation() -> MemberDescriptor {
    MemberDescriptor::method("IGeneric.Bar")
        .generic_param()
        .generic_param()
        .returns::<i32>()
}

#[test]
fn distinct_instantiations_do_not_cross_match() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.call(bar::<i32, f64>(), vec![
        CallArg::input(1i32),
        CallArg::input(2.0f64),
    ]).unwrap();

    assert!(fake.verify(
        &CallMatcher::ignoring_arguments(bar::<i32, f64>()),
        Repeated::at_least_once(),
    ).is_ok());
    assert!(fake.verify(
        &CallMatcher::ignoring_arguments(bar::<bool, i64>()),
        Repeated::at_least_once(),
    ).is_err());
}

#[test]
fn open_matcher_accepts_every_instantiation() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.call(bar::<i32, f64>(), vec![
        CallArg::input(1i32),
        CallArg::input(2.0f64),
    ]).unwrap();
    fake.call(bar::<bool, i64>(), vec![
        CallArg::input(true),
        CallArg::input(3i64),
    ]).unwrap();

    assert!(fake.verify(
        &CallMatcher::ignoring_arguments(bar_any_instantiation()),
        Repeated::Exactly(2),
    ).is_ok());
}

#[test]
fn open_rule_answers_every_instantiation() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::ignoring_arguments(bar_any_instantiation()),
        Action::returns(7),
    );

    let a = fake.call(bar::<i32, f64>(), vec![
        CallArg::input(1i32),
        CallArg::input(2.0f64),
    ]).unwrap();
    assert_eq!(a.returned::<i32>(), Some(7));

    let b = fake.call(bar::<bool, i64>(), vec![
        CallArg::input(false),
        CallArg::input(0i64),
    ]).unwrap();
    assert_eq!(b.returned::<i32>(), Some(7));
}

#[test]
fn open_matcher_still_requires_the_same_shape() {
    let wider = MemberDescriptor::method("IGeneric.Bar")
        .type_arg::<i32>()
        .param::<i32>()
        .returns::<i32>();

    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.call(wider, vec![CallArg::input(1i32)]).unwrap();

    // Two generic slots cannot line up with a one-parameter call.
    assert!(fake.verify(
        &CallMatcher::ignoring_arguments(bar_any_instantiation()),
        Repeated::at_least_once(),
    ).is_err());
}

#[test]
fn typed_constraint_on_open_matcher_filters_by_value_type() {
    let ctx = FakeContext::new();
    let fake = ctx.fake();
    fake.register_rule(
        CallMatcher::new(bar_any_instantiation(), vec![
            ArgConstraint::exact(5i32),
            ArgConstraint::ignored(),
        ]).unwrap(),
        Action::returns(1),
    );

    let hit = fake.call(bar::<i32, f64>(), vec![
        CallArg::input(5i32),
        CallArg::input(0.0f64),
    ]).unwrap();
    assert_eq!(hit.returned::<i32>(), Some(1));

    // The same position carries an i64 under this instantiation; the i32
    // constraint cannot accept it.
    let miss = fake.call(bar::<i64, f64>(), vec![
        CallArg::input(5i64),
        CallArg::input(0.0f64),
    ]).unwrap();
    assert_eq!(miss.returned::<i32>(), Some(0));
}
