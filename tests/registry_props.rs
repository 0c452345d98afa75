//! Property tests: registry membership behaves like the multiset obtained by
//! replaying attach/detach in order, and broadcasts follow registration order.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use observe::{Subscriber, SubscriberRegistry, UpdateError};

/// Publisher stand-in: collects the ids of notified subscribers.
#[derive(Default)]
struct Trace {
    calls: RefCell<Vec<usize>>,
}

struct Probe {
    id: usize,
}

impl Subscriber<Trace> for Probe {
    fn update(&mut self, publisher: &Trace) -> Result<(), UpdateError> {
        publisher.calls.borrow_mut().push(self.id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Attach(usize),
    Detach(usize),
}

fn op_strategy(pool: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..pool).prop_map(Op::Attach),
        (0..pool).prop_map(Op::Detach),
    ]
}

const POOL: usize = 5;

proptest! {
    /// Replaying any op sequence against a plain Vec model yields the same
    /// membership, the same notification order, and the same set of failed detaches.
    #[test]
    fn registry_matches_list_model(ops in prop::collection::vec(op_strategy(POOL), 0..64)) {
        let probes: Vec<_> = (0..POOL).map(|id| Rc::new(RefCell::new(Probe { id }))).collect();
        let mut reg: SubscriberRegistry<Trace> = SubscriberRegistry::new();
        let mut model: Vec<usize> = Vec::new();

        for op in ops {
            match op {
                Op::Attach(id) => {
                    reg.attach(&probes[id]);
                    model.push(id);
                }
                Op::Detach(id) => {
                    let before = reg.len();
                    let result = reg.detach(&probes[id]);
                    match model.iter().position(|&m| m == id) {
                        Some(pos) => {
                            prop_assert!(result.is_ok());
                            model.remove(pos);
                        }
                        None => {
                            prop_assert!(result.unwrap_err().is_not_found());
                            prop_assert_eq!(reg.len(), before);
                        }
                    }
                }
            }

            prop_assert_eq!(reg.len(), model.len());
            for (id, probe) in probes.iter().enumerate() {
                let expected = model.iter().filter(|&&m| m == id).count();
                prop_assert_eq!(reg.occurrences(probe), expected);
            }
        }

        let trace = Trace::default();
        let report = reg.notify(&trace).unwrap();
        prop_assert_eq!(report.delivered, model.len());
        prop_assert_eq!(trace.calls.into_inner(), model);
    }

    /// A subscriber detached before a mutation misses it; attached ones do not.
    #[test]
    fn detached_subscribers_miss_broadcast(
        attached in prop::collection::vec(any::<bool>(), POOL..=POOL),
    ) {
        let probes: Vec<_> = (0..POOL).map(|id| Rc::new(RefCell::new(Probe { id }))).collect();
        let mut reg: SubscriberRegistry<Trace> = SubscriberRegistry::new();
        for probe in &probes {
            reg.attach(probe);
        }
        for (probe, keep) in probes.iter().zip(&attached) {
            if !keep {
                reg.detach(probe).unwrap();
            }
        }

        let trace = Trace::default();
        reg.notify(&trace).unwrap();

        let expected: Vec<usize> = (0..POOL).filter(|&id| attached[id]).collect();
        prop_assert_eq!(trace.calls.into_inner(), expected);
    }
}
