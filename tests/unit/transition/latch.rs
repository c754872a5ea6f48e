use super::*;

#[test]
fn state_machine_transitions() {
    use TransitionState::*;
    assert_eq!(Idle.begin(Phase::Show), Some(Updating));
    assert_eq!(Idle.begin(Phase::Hide), None);
    assert_eq!(Shown.begin(Phase::Show), None);
    assert_eq!(Shown.begin(Phase::Hide), Some(Updating));
    assert_eq!(Updating.begin(Phase::Show), None);
    assert_eq!(Updating.begin(Phase::Hide), None);

    assert_eq!(Updating.settle(Phase::Show), Some(Shown));
    assert_eq!(Updating.settle(Phase::Hide), Some(Idle));
    assert_eq!(Idle.settle(Phase::Show), None);
}

#[test]
fn latch_guards_overlapping_runs() {
    let latch = TransitionLatch::new();
    assert!(latch.try_begin(Phase::Show));
    assert!(!latch.try_begin(Phase::Show));
    assert!(!latch.try_begin(Phase::Hide));
    latch.settle(Phase::Show);
    assert_eq!(latch.state(), TransitionState::Shown);
    assert!(latch.try_begin(Phase::Hide));
    latch.abort(Phase::Hide);
    assert_eq!(latch.state(), TransitionState::Shown);
}

#[test]
fn clones_share_state_and_new_latches_do_not() {
    let a = TransitionLatch::new();
    let b = a.clone();
    assert!(a.is_shared_with(&b));
    assert!(a.try_begin(Phase::Show));
    assert_eq!(b.state(), TransitionState::Updating);

    let c = TransitionLatch::new();
    assert!(!a.is_shared_with(&c));
    assert_eq!(c.state(), TransitionState::Idle);

    assert!(TransitionLatch::global().is_shared_with(&TransitionLatch::global()));
}

#[test]
fn settle_outside_a_run_is_a_no_op() {
    let latch = TransitionLatch::new();
    latch.settle(Phase::Hide);
    assert_eq!(latch.state(), TransitionState::Idle);
}
