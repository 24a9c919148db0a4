//! The split calculation: parses every raw field independently, resolves the
//! shared-expenses default, distributes tip and shared pools with remainder
//! correction, backfills the single blank participant, and reconciles the
//! totals into one tagged result.
//!
//! Pure and synchronous: safe to call on every keystroke, with every field's
//! validity reported independently so a form can show incremental feedback.

use warikan_domain::{
    AmountField, Calculation, CalculationResult, EvenSplit, Money, ParsedAmount,
    ParticipantOutcome, ParticipantResult, ParticipantShare, PoolField, split_even,
};

use crate::{
    model::{ParticipantEntry, ReceiptInput},
    ports::AmountParser,
};

#[derive(Clone, Copy)]
pub struct SplitCalculator<'a> {
    parser: &'a dyn AmountParser,
}

enum EntryState {
    Blank,
    Entered(ParsedAmount),
    Invalid,
}

impl<'a> SplitCalculator<'a> {
    pub fn new(parser: &'a dyn AmountParser) -> Self {
        Self { parser }
    }

    pub fn calculate(&self, input: &ReceiptInput<'_>) -> CalculationResult {
        let amount_field = self.parse_field(input.amount);

        // A tip field left blank means "no tip", which is not the same as 0.
        let tip_field = match input.tip {
            Some(raw) if !is_blank(raw) => Some(self.parse_field(raw)),
            _ => None,
        };

        let entries: Vec<(&ParticipantEntry<'_>, EntryState)> = input
            .participants
            .iter()
            .map(|entry| (entry, self.parse_entry(entry.raw_amount)))
            .collect();

        let AmountField::Valid(parsed_amount) = &amount_field else {
            return self.incomplete_result(amount_field, tip_field, input, entries);
        };
        let amount = parsed_amount.amount;

        let participant_count = entries.len();
        let explicit_sum: Money = entries
            .iter()
            .filter_map(|(_, state)| match state {
                EntryState::Entered(parsed) => Some(parsed.amount),
                _ => None,
            })
            .sum();
        let blank_count = entries
            .iter()
            .filter(|(_, state)| matches!(state, EntryState::Blank))
            .count();
        let remaining = amount - explicit_sum;

        // A shared-expenses field left blank means "split whatever is left
        // evenly"; with nothing left (or nobody to split across) the field
        // contributes nothing and disappears from the result.
        let mut shared = match input.shared_expenses {
            Some(_) if participant_count == 0 => None,
            Some(raw) if is_blank(raw) => (remaining.cents() > 0)
                .then(|| PoolField {
                    field: AmountField::Valid(ParsedAmount {
                        amount: remaining,
                        magic: false,
                    }),
                    automatic: true,
                    correction: false,
                }),
            Some(raw) => Some(PoolField {
                field: self.parse_field(raw),
                automatic: false,
                correction: false,
            }),
            None => None,
        };

        let shared_split = shared
            .as_ref()
            .and_then(|pool| pool.field.amount())
            .map(|pool| split_even(pool, participant_count));
        if let (Some(pool), Some(split)) = (shared.as_mut(), shared_split.as_ref()) {
            pool.correction = split.correction;
        }

        let tip_split = match &tip_field {
            Some(AmountField::Valid(parsed)) if participant_count > 0 => {
                Some(split_even(parsed.amount, participant_count))
            }
            _ => None,
        };

        let shared_total = shared
            .as_ref()
            .and_then(|pool| pool.field.amount())
            .unwrap_or(Money::ZERO);
        let backfill = (blank_count == 1 && participant_count > 1)
            .then(|| (remaining - shared_total).max(Money::ZERO));
        if let Some(value) = backfill {
            tracing::debug!(
                backfill_cents = value.cents(),
                remaining_cents = remaining.cents(),
                shared_total_cents = shared_total.cents(),
                "assigning leftover to the single blank participant"
            );
        }

        let participants: Vec<ParticipantResult> = entries
            .iter()
            .enumerate()
            .map(|(index, (entry, state))| ParticipantResult {
                id: entry.id,
                outcome: participant_outcome(
                    state,
                    entry.raw_amount,
                    backfill,
                    share_at(shared_split.as_ref(), index),
                    share_at(tip_split.as_ref(), index),
                ),
            })
            .collect();

        let tip_value = tip_field
            .as_ref()
            .and_then(AmountField::amount)
            .unwrap_or(Money::ZERO);
        let total = amount + tip_value;

        let any_participant_invalid = participants
            .iter()
            .any(|participant| !participant.outcome.is_valid());
        let valid_sum: Money = participants
            .iter()
            .filter_map(|participant| participant.outcome.total())
            .sum();

        // Leftover reconciliation: an explicit (or defaulted) shared pool is
        // the one mechanism allowed to account for a difference, so only its
        // absence, or a broken participant, turns the difference into a
        // reported mismatch.
        let mismatch = (participant_count > 0)
            .then(|| total - valid_sum)
            .filter(|diff| !diff.is_zero() && (any_participant_invalid || shared.is_none()));
        if let Some(diff) = mismatch {
            tracing::debug!(
                mismatch_cents = diff.cents(),
                total_cents = total.cents(),
                "participant totals do not reconcile"
            );
        }

        let tip_error = participant_count > 0
            && tip_field
                .as_ref()
                .is_some_and(|field| !field.is_valid());
        let shared_error = shared.as_ref().is_some_and(|pool| !pool.field.is_valid());

        let calculation = Calculation {
            amount: amount_field,
            tip: tip_field.map(|field| PoolField {
                field,
                automatic: false,
                correction: tip_split.as_ref().is_some_and(|split| split.correction),
            }),
            shared_expenses: shared,
            participants,
            total: Some(total),
            backfill,
            mismatch,
        };

        if tip_error || shared_error || any_participant_invalid || mismatch.is_some() {
            CalculationResult::Error(calculation)
        } else {
            CalculationResult::Ok(calculation)
        }
    }

    /// Result assembly when the amount itself did not parse: per-field parse
    /// feedback is still reported, but no totals, backfill, or mismatch can
    /// be derived without a total amount.
    fn incomplete_result(
        &self,
        amount_field: AmountField,
        tip_field: Option<AmountField>,
        input: &ReceiptInput<'_>,
        entries: Vec<(&ParticipantEntry<'_>, EntryState)>,
    ) -> CalculationResult {
        tracing::debug!(input = input.amount, "amount field did not parse");

        let shared = match input.shared_expenses {
            Some(raw) if !is_blank(raw) => Some(PoolField {
                field: self.parse_field(raw),
                automatic: false,
                correction: false,
            }),
            _ => None,
        };

        let participants = entries
            .into_iter()
            .map(|(entry, state)| ParticipantResult {
                id: entry.id,
                outcome: match state {
                    EntryState::Invalid => ParticipantOutcome::Invalid {
                        input: entry.raw_amount.to_string(),
                    },
                    EntryState::Entered(parsed) => ParticipantOutcome::Valid(ParticipantShare {
                        entered: Some(parsed),
                        ..ParticipantShare::default()
                    }),
                    EntryState::Blank => {
                        ParticipantOutcome::Valid(ParticipantShare::default())
                    }
                },
            })
            .collect();

        CalculationResult::Error(Calculation {
            amount: amount_field,
            tip: tip_field.map(|field| PoolField {
                field,
                automatic: false,
                correction: false,
            }),
            shared_expenses: shared,
            participants,
            total: None,
            backfill: None,
            mismatch: None,
        })
    }

    fn parse_field(&self, raw: &str) -> AmountField {
        match self.parser.parse(raw) {
            Some(parsed) => AmountField::Valid(parsed),
            None => AmountField::Invalid {
                input: raw.to_string(),
            },
        }
    }

    fn parse_entry(&self, raw: &str) -> EntryState {
        if is_blank(raw) {
            return EntryState::Blank;
        }
        match self.parser.parse(raw) {
            Some(parsed) => EntryState::Entered(parsed),
            None => EntryState::Invalid,
        }
    }
}

fn participant_outcome(
    state: &EntryState,
    raw_amount: &str,
    backfill: Option<Money>,
    shared_share: Option<Money>,
    tip_share: Option<Money>,
) -> ParticipantOutcome {
    match state {
        EntryState::Invalid => ParticipantOutcome::Invalid {
            input: raw_amount.to_string(),
        },
        EntryState::Entered(parsed) => ParticipantOutcome::Valid(ParticipantShare {
            entered: Some(*parsed),
            backfill: None,
            shared_share,
            tip_share,
        }),
        EntryState::Blank => {
            let share = ParticipantShare {
                entered: None,
                backfill,
                shared_share,
                tip_share,
            };
            // A blank entry nothing reaches is unresolved, not zero.
            let untouched =
                backfill.is_none() && shared_share.is_none() && tip_share.is_none();
            if untouched && share.total().is_zero() {
                ParticipantOutcome::Invalid {
                    input: raw_amount.to_string(),
                }
            } else {
                ParticipantOutcome::Valid(share)
            }
        }
    }
}

fn share_at(split: Option<&EvenSplit>, index: usize) -> Option<Money> {
    split.map(|split| split.shares[index])
}

fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}
