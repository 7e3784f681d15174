//! The safety check: can every process still run to completion?

use crate::snapshot::ResourceSnapshot;
use banker_types::{vector, SafetyVerdict};
use tracing::{debug, trace};

/// Decide whether `snapshot` admits some order in which every process
/// obtains its declared maximum and finishes.
///
/// The check sweeps over unfinished processes in ascending index order.
/// Any process whose holdings plus current availability cover its
/// declared maximum is retired: its row is zeroed and its holdings are
/// folded back into `available`, which can unblock later processes in
/// the same sweep. A full sweep that retires nobody means the remaining
/// processes can never finish.
///
/// The verdict does not depend on the sweep order - only on whether a
/// completion order exists at all - but the check is destructive: it
/// consumes the snapshot's allocation rows and inflates `available`.
/// Run it against a scratch snapshot only, and restore that snapshot
/// afterward regardless of the verdict. The exclusive borrow keeps any
/// other code from observing the intermediate state.
pub fn run_safety_check(snapshot: &mut ResourceSnapshot) -> SafetyVerdict {
    let processes = snapshot.process_count();
    let mut finished = vec![false; processes];
    let mut unfinished = processes;

    while unfinished > 0 {
        let mut progressed = false;

        for process in 0..processes {
            if finished[process] {
                continue;
            }

            let can_finish = vector::can_complete(
                &snapshot.available,
                snapshot.allocation.row(process),
                snapshot.maximum.row(process),
            );
            trace!(process, can_finish, "safety sweep probe");
            if !can_finish {
                continue;
            }

            finished[process] = true;
            unfinished -= 1;
            progressed = true;
            vector::reclaim(
                &mut snapshot.available,
                snapshot.allocation.row_mut(process),
                snapshot.maximum.row(process),
            );
        }

        if !progressed {
            debug!(unfinished, "no unfinished process can make progress");
            return SafetyVerdict::Deadlocked;
        }
    }

    SafetyVerdict::Safe
}

#[cfg(test)]
mod tests {
    use super::*;
    use banker_types::Matrix;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // The classic five-process, three-resource instance.
    fn classic_snapshot() -> ResourceSnapshot {
        ResourceSnapshot::new(
            vec![3, 3, 2],
            Matrix::from_rows(
                vec![
                    vec![0, 1, 0],
                    vec![2, 0, 0],
                    vec![3, 0, 2],
                    vec![2, 1, 1],
                    vec![0, 0, 2],
                ],
                3,
            )
            .unwrap(),
            Matrix::from_rows(
                vec![
                    vec![7, 5, 3],
                    vec![3, 2, 2],
                    vec![9, 0, 2],
                    vec![2, 2, 2],
                    vec![4, 3, 3],
                ],
                3,
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_classic_instance_is_safe() {
        let mut snapshot = classic_snapshot();
        assert_eq!(run_safety_check(&mut snapshot), SafetyVerdict::Safe);
    }

    #[test]
    fn test_check_retires_every_process_when_safe() {
        let mut snapshot = classic_snapshot();
        let supply: Vec<u64> = (0..3).map(|r| snapshot.total_supply(r)).collect();

        run_safety_check(&mut snapshot);

        // Everything held has been reclaimed into the available pool.
        assert_eq!(snapshot.available(), supply.as_slice());
        for process in 0..snapshot.process_count() {
            assert!(snapshot.allocation_row(process).iter().all(|&h| h == 0));
        }
    }

    #[test]
    fn test_starved_state_is_deadlocked() {
        // Nothing available and every process short of its maximum on
        // every resource type: nobody can ever finish.
        let mut snapshot = ResourceSnapshot::new(
            vec![0, 0],
            Matrix::from_rows(vec![vec![1, 1], vec![2, 1]], 2).unwrap(),
            Matrix::from_rows(vec![vec![2, 2], vec![3, 2]], 2).unwrap(),
        )
        .unwrap();
        assert_eq!(run_safety_check(&mut snapshot), SafetyVerdict::Deadlocked);
    }

    #[test]
    fn test_single_process_exact_fit_is_safe() {
        let mut snapshot = ResourceSnapshot::new(
            vec![1],
            Matrix::from_rows(vec![vec![1]], 1).unwrap(),
            Matrix::from_rows(vec![vec![2]], 1).unwrap(),
        )
        .unwrap();
        assert_eq!(run_safety_check(&mut snapshot), SafetyVerdict::Safe);
    }

    /// Relabel processes by `order` (row permutation of both tables).
    fn permuted(snapshot: &ResourceSnapshot, order: &[usize]) -> ResourceSnapshot {
        let cols = snapshot.resource_count();
        let allocation = order
            .iter()
            .map(|&p| snapshot.allocation_row(p).to_vec())
            .collect();
        let maximum = order
            .iter()
            .map(|&p| snapshot.maximum_row(p).to_vec())
            .collect();
        ResourceSnapshot::new(
            snapshot.available().to_vec(),
            Matrix::from_rows(allocation, cols).unwrap(),
            Matrix::from_rows(maximum, cols).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_verdict_is_independent_of_process_order() {
        // The sweep visits processes in index order, so relabeling the
        // processes exercises every other visiting order. The existence
        // of a completion schedule must not depend on it.
        let safe = classic_snapshot();
        let mut deadlocked = ResourceSnapshot::new(
            vec![0, 0, 0],
            Matrix::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0], vec![1, 1, 1]], 3).unwrap(),
            Matrix::from_rows(vec![vec![2, 1, 2], vec![1, 2, 1], vec![2, 2, 2]], 3).unwrap(),
        )
        .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            let mut order: Vec<usize> = (0..safe.process_count()).collect();
            order.shuffle(&mut rng);
            let mut shuffled = permuted(&safe, &order);
            assert_eq!(run_safety_check(&mut shuffled), SafetyVerdict::Safe);

            let mut order: Vec<usize> = (0..deadlocked.process_count()).collect();
            order.shuffle(&mut rng);
            let mut shuffled = permuted(&deadlocked, &order);
            assert_eq!(run_safety_check(&mut shuffled), SafetyVerdict::Deadlocked);
        }
        // The unpermuted baseline agrees.
        assert_eq!(run_safety_check(&mut deadlocked), SafetyVerdict::Deadlocked);
    }
}
