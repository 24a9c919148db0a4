//! Even distribution of a money pool with exact-remainder correction.
//!
//! Each participant receives the rounded per-share value except the last one
//! (by input order), who absorbs the signed rounding remainder so the shares
//! always sum exactly to the pool.

use crate::model::Money;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvenSplit {
    /// Rounded (half up) pool / participant count.
    pub per_share: Money,
    /// One share per participant, input order. Only the last entry can
    /// differ from `per_share`.
    pub shares: Vec<Money>,
    /// Set when the last share had to be adjusted.
    pub correction: bool,
}

/// Splits a non-negative `pool` across `participants` shares.
///
/// Returns an empty split for zero participants: a pool nobody takes part in
/// distributes nothing.
pub fn split_even(pool: Money, participants: usize) -> EvenSplit {
    if participants == 0 {
        return EvenSplit {
            per_share: Money::ZERO,
            shares: Vec::new(),
            correction: false,
        };
    }

    let n = participants as i64;
    // Round-half-up division; exact for non-negative pools.
    let per_share = (pool.cents() + n / 2) / n;
    let remainder = pool.cents() - per_share * n;

    let mut shares = vec![Money::from_cents(per_share); participants];
    if let Some(last) = shares.last_mut() {
        *last = Money::from_cents(per_share + remainder);
    }

    EvenSplit {
        per_share: Money::from_cents(per_share),
        shares,
        correction: remainder != 0,
    }
}
