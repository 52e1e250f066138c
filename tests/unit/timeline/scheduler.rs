use super::*;

#[test]
fn pops_in_time_order_then_insertion_order() {
    let mut s = Scheduler::new();
    s.schedule(Millis(200), "late");
    s.schedule(Millis(100), "a");
    s.schedule(Millis(100), "b");

    assert_eq!(s.pop_due(Millis(50)), None);
    assert_eq!(s.pop_due(Millis(1000)), Some((Millis(100), "a")));
    assert_eq!(s.pop_due(Millis(1000)), Some((Millis(100), "b")));
    assert_eq!(s.pop_due(Millis(1000)), Some((Millis(200), "late")));
    assert!(s.is_empty());
}

#[test]
fn cancelled_cues_never_fire() {
    let mut s = Scheduler::new();
    let a = s.schedule(Millis(10), 1);
    s.schedule(Millis(20), 2);
    assert!(s.cancel(a));
    assert!(!s.cancel(a));
    assert_eq!(s.len(), 1);
    assert_eq!(s.next_due(), Some(Millis(20)));
    assert_eq!(s.pop_due(Millis(100)), Some((Millis(20), 2)));
}

#[test]
fn cancel_where_filters_by_time_and_cue() {
    let mut s = Scheduler::new();
    for i in 0..6u64 {
        s.schedule(Millis(i * 100), i);
    }
    let dropped = s.cancel_where(|at, cue| at >= Millis(300) && cue % 2 == 1);
    assert_eq!(dropped, 2);
    let mut fired = Vec::new();
    while let Some((_, cue)) = s.pop_due(Millis(10_000)) {
        fired.push(cue);
    }
    assert_eq!(fired, vec![0, 1, 2, 4]);
    assert_eq!(s.next_due(), None);
}
