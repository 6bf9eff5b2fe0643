//! Generic sweep-line interval reconciliation, grounded in the reference
//! implementation's `DFA::reconcile` template method.
//!
//! Given a list of possibly-overlapping `(lo, hi, item)` claims, produces the
//! minimal set of disjoint, sorted intervals such that every covered byte maps
//! to exactly the set of items whose claim covers it.

/// One claim over an inclusive byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim<T> {
    pub lo: u8,
    pub hi: u8,
    pub item: T,
}

/// A reconciled, disjoint output interval together with every item whose
/// input claim covered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled<T> {
    pub lo: u8,
    pub hi: u8,
    pub items: Vec<T>,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    // Removals sort before additions at the same point: a byte vacated by one
    // claim and claimed by another at the same boundary belongs to the new
    // claimant only (see SPEC_FULL.md Open Question resolution #5).
    Remove,
    Add,
}

struct Event {
    point: u16,
    idx: usize,
    kind: EventKind,
}

/// Reconciles a list of interval claims into disjoint output intervals.
///
/// `claims` may be empty, in which case the result is empty. Claims may
/// overlap arbitrarily; each byte covered by at least one claim appears in
/// exactly one output interval, alongside every item that claimed it.
pub fn reconcile<T: Copy>(claims: &[Claim<T>]) -> Vec<Reconciled<T>> {
    if claims.is_empty() {
        return Vec::new();
    }

    let mut events: Vec<Event> = Vec::with_capacity(claims.len() * 2);
    for (idx, claim) in claims.iter().enumerate() {
        events.push(Event {
            point: claim.lo as u16,
            idx,
            kind: EventKind::Add,
        });
        events.push(Event {
            point: claim.hi as u16 + 1,
            idx,
            kind: EventKind::Remove,
        });
    }
    events.sort_by_key(|e| (e.point, e.kind, e.idx));

    let mut freqs = vec![0u32; claims.len()];
    let mut active: Vec<usize> = Vec::new();
    let mut out: Vec<Reconciled<T>> = Vec::new();

    let mut last_point = events[0].point;

    for event in &events {
        if event.point > last_point {
            if !active.is_empty() {
                let mut items: Vec<usize> = active.clone();
                items.sort_unstable();
                out.push(Reconciled {
                    lo: last_point as u8,
                    hi: (event.point - 1) as u8,
                    items: items.into_iter().map(|i| claims[i].item).collect(),
                });
            }
            last_point = event.point;
        }

        match event.kind {
            EventKind::Add => {
                if freqs[event.idx] == 0 {
                    active.push(event.idx);
                }
                freqs[event.idx] += 1;
            }
            EventKind::Remove => {
                freqs[event.idx] -= 1;
                if freqs[event.idx] == 0 {
                    active.retain(|&i| i != event.idx);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_inputs_pass_through() {
        let claims = [
            Claim { lo: 0, hi: 9, item: "a" },
            Claim { lo: 20, hi: 29, item: "b" },
        ];
        let result = reconcile(&claims);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].items, vec!["a"]);
        assert_eq!(result[1].items, vec!["b"]);
    }

    #[test]
    fn overlap_splits_into_three_bands() {
        let claims = [
            Claim { lo: 0, hi: 10, item: "a" },
            Claim { lo: 5, hi: 15, item: "b" },
        ];
        let result = reconcile(&claims);
        assert_eq!(
            result,
            vec![
                Reconciled { lo: 0, hi: 4, items: vec!["a"] },
                Reconciled { lo: 5, hi: 10, items: vec!["a", "b"] },
                Reconciled { lo: 11, hi: 15, items: vec!["b"] },
            ]
        );
    }

    #[test]
    fn adjacent_claims_do_not_merge_into_each_other() {
        let claims = [
            Claim { lo: 0, hi: 4, item: 1 },
            Claim { lo: 5, hi: 9, item: 2 },
        ];
        let result = reconcile(&claims);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].items, vec![1]);
        assert_eq!(result[1].items, vec![2]);
    }

    #[test]
    fn totality_union_of_outputs_equals_union_of_inputs() {
        let claims = [
            Claim { lo: 3, hi: 7, item: 'x' },
            Claim { lo: 6, hi: 12, item: 'y' },
            Claim { lo: 20, hi: 20, item: 'z' },
        ];
        let result = reconcile(&claims);

        let mut input_covered = std::collections::HashSet::new();
        for c in &claims {
            for b in c.lo..=c.hi {
                input_covered.insert(b);
            }
        }
        let mut output_covered = std::collections::HashSet::new();
        for r in &result {
            for b in r.lo..=r.hi {
                assert!(output_covered.insert(b), "byte {b} covered twice");
            }
        }
        assert_eq!(input_covered, output_covered);
    }

    #[test]
    fn empty_claims_produce_empty_output() {
        let claims: [Claim<u8>; 0] = [];
        assert!(reconcile(&claims).is_empty());
    }

    #[test]
    fn gap_between_non_adjacent_claims_is_not_covered() {
        let claims = [
            Claim { lo: 97, hi: 99, item: "rs" },
            Claim { lo: 101, hi: 103, item: "rs" },
        ];
        let result = reconcile(&claims);
        assert_eq!(
            result,
            vec![
                Reconciled { lo: 97, hi: 99, items: vec!["rs"] },
                Reconciled { lo: 101, hi: 103, items: vec!["rs"] },
            ]
        );
    }
}
