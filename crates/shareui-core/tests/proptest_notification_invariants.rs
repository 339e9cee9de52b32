//! Property-based invariant tests for SharedCell notification.
//!
//! 1. Every active listener sees every write exactly once, in write order.
//! 2. Listeners are invoked in registration order within a cycle.
//! 3. Unsubscribed listeners never see writes made after unsubscribing,
//!    no matter how many times unsubscribe is called.
//! 4. Writes to one cell never reach listeners on another cell.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use shareui_core::{SharedCell, Subscription};

#[derive(Debug, Clone)]
enum Op {
    Write(i32),
    Unsubscribe(usize),
}

fn op_strategy(listeners: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Write),
        1 => (0..listeners).prop_map(Op::Unsubscribe),
    ]
}

proptest! {
    #[test]
    fn writes_reach_active_listeners_in_order(
        listeners in 1usize..6,
        ops in proptest::collection::vec(op_strategy(6), 0..40),
    ) {
        let cell = SharedCell::new(0i32);
        let trace: Rc<RefCell<Vec<(usize, i32)>>> = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<Subscription> = (0..listeners)
            .map(|idx| {
                let trace = Rc::clone(&trace);
                cell.subscribe(move |v| trace.borrow_mut().push((idx, *v)))
            })
            .collect();

        let mut active = vec![true; listeners];
        let mut expected = Vec::new();
        for op in &ops {
            match *op {
                Op::Write(value) => {
                    let report = cell.write(value);
                    let live: Vec<usize> = (0..listeners).filter(|i| active[*i]).collect();
                    prop_assert_eq!(report.delivered, live.len());
                    prop_assert_eq!(report.failed, 0);
                    expected.extend(live.into_iter().map(|i| (i, value)));
                }
                Op::Unsubscribe(idx) if idx < listeners => {
                    subs[idx].unsubscribe();
                    subs[idx].unsubscribe();
                    active[idx] = false;
                }
                Op::Unsubscribe(_) => {}
            }
        }

        prop_assert_eq!(&*trace.borrow(), &expected);
        prop_assert_eq!(cell.listener_count(), active.iter().filter(|a| **a).count());
    }

    #[test]
    fn cells_are_isolated(
        writes in proptest::collection::vec((any::<bool>(), any::<u8>()), 0..30)
    ) {
        let left = SharedCell::new(0u8);
        let right = SharedCell::new(0u8);
        let left_seen = Rc::new(RefCell::new(0usize));
        let right_seen = Rc::new(RefCell::new(0usize));
        let l = Rc::clone(&left_seen);
        let r = Rc::clone(&right_seen);
        let _ls = left.subscribe(move |_| *l.borrow_mut() += 1);
        let _rs = right.subscribe(move |_| *r.borrow_mut() += 1);

        let mut left_writes = 0;
        for (to_left, value) in &writes {
            if *to_left {
                left.write(*value);
                left_writes += 1;
            } else {
                right.write(*value);
            }
        }

        prop_assert_eq!(*left_seen.borrow(), left_writes);
        prop_assert_eq!(*right_seen.borrow(), writes.len() - left_writes);
        prop_assert_eq!(left.version() as usize, left_writes);
    }
}
