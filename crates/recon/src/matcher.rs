use std::collections::{HashMap, HashSet};

use crate::model::{Aggregate, Pairing};

/// Pair two sides by exact match-key.
///
/// Side A keys come first in A's order, each either paired or alone; then
/// the keys only B has, in B's order.
pub fn match_exact_key(side_a: Vec<Aggregate>, side_b: Vec<Aggregate>) -> Vec<Pairing> {
    let a_keys: HashSet<String> = side_a.iter().map(|a| a.key.clone()).collect();

    let mut b_only = Vec::new();
    let mut b_by_key: HashMap<String, Aggregate> = HashMap::new();
    for b in side_b {
        if a_keys.contains(&b.key) {
            b_by_key.insert(b.key.clone(), b);
        } else {
            b_only.push(b);
        }
    }

    let mut pairings = Vec::with_capacity(side_a.len() + b_only.len());
    for a in side_a {
        match b_by_key.remove(&a.key) {
            Some(b) => pairings.push(Pairing::Both { a, b }),
            None => pairings.push(Pairing::OnlyA(a)),
        }
    }
    pairings.extend(b_only.into_iter().map(Pairing::OnlyB));
    pairings
}
