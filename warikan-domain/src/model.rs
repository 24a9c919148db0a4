use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Amount of money in integer minor units (cents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Caller-supplied identity of one participant. The calculator attaches no
/// meaning to the value beyond equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(pub u64);

/// Amount parsed from one raw input field. `magic` is set when the input
/// was not a plain decimal literal and needed arithmetic evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedAmount {
    pub amount: Money,
    pub magic: bool,
}

/// Parse state of a single money field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AmountField {
    Valid(ParsedAmount),
    Invalid { input: String },
}

impl AmountField {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn amount(&self) -> Option<Money> {
        match self {
            Self::Valid(parsed) => Some(parsed.amount),
            Self::Invalid { .. } => None,
        }
    }
}

/// A pool of money (tip or shared expenses) that is split evenly across all
/// participants. `automatic` marks a pool whose value was defaulted from the
/// leftover amount rather than entered; `correction` marks a split whose last
/// share was adjusted so the shares sum exactly to the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolField {
    pub field: AmountField,
    pub automatic: bool,
    pub correction: bool,
}

/// The addends making up one participant's computed total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParticipantShare {
    /// Amount the participant entered, absent when the field was blank.
    pub entered: Option<ParsedAmount>,
    /// Leftover assigned automatically to the single blank participant.
    pub backfill: Option<Money>,
    pub shared_share: Option<Money>,
    pub tip_share: Option<Money>,
}

impl ParticipantShare {
    pub fn total(&self) -> Money {
        self.entered.map(|parsed| parsed.amount).unwrap_or_default()
            + self.backfill.unwrap_or_default()
            + self.shared_share.unwrap_or_default()
            + self.tip_share.unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParticipantOutcome {
    Valid(ParticipantShare),
    Invalid { input: String },
}

impl ParticipantOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn total(&self) -> Option<Money> {
        match self {
            Self::Valid(share) => Some(share.total()),
            Self::Invalid { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantResult {
    pub id: ParticipantId,
    pub outcome: ParticipantOutcome,
}

/// Everything the calculator worked out for one set of inputs, valid or not.
/// Field states are reported independently so a caller can surface per-field
/// feedback while the user is still typing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calculation {
    pub amount: AmountField,
    pub tip: Option<PoolField>,
    pub shared_expenses: Option<PoolField>,
    pub participants: Vec<ParticipantResult>,
    /// Amount plus tip; absent when the amount did not parse.
    pub total: Option<Money>,
    pub backfill: Option<Money>,
    /// Unreconciled difference between the total and the sum of valid
    /// participant totals. Positive means money is unaccounted for.
    pub mismatch: Option<Money>,
}

/// Outcome of one calculation. Both variants carry the full field record;
/// the variant states whether the inputs reconcile into a usable split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalculationResult {
    Ok(Calculation),
    Error(Calculation),
}

impl CalculationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn calculation(&self) -> &Calculation {
        match self {
            Self::Ok(calculation) | Self::Error(calculation) => calculation,
        }
    }

    pub fn into_calculation(self) -> Calculation {
        match self {
            Self::Ok(calculation) | Self::Error(calculation) => calculation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0, "0.00")]
    #[case::cents_only(7, "0.07")]
    #[case::two_digit_cents(42, "0.42")]
    #[case::whole(1200, "12.00")]
    #[case::mixed(123456, "1234.56")]
    #[case::negative(-50, "-0.50")]
    #[case::negative_whole(-10000, "-100.00")]
    fn money_displays_major_and_minor_units(#[case] cents: i64, #[case] expected: &str) {
        assert_eq!(Money::from_cents(cents).to_string(), expected);
    }

    #[test]
    fn participant_share_total_sums_all_addends() {
        let share = ParticipantShare {
            entered: Some(ParsedAmount {
                amount: Money::from_cents(3000),
                magic: false,
            }),
            backfill: Some(Money::from_cents(500)),
            shared_share: Some(Money::from_cents(250)),
            tip_share: Some(Money::from_cents(100)),
        };
        assert_eq!(share.total(), Money::from_cents(3850));
    }

    #[test]
    fn blank_share_total_is_zero() {
        assert_eq!(ParticipantShare::default().total(), Money::ZERO);
    }
}
