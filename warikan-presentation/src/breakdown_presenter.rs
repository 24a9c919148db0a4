use std::borrow::Cow;

use warikan_application::ParticipantDirectory;
use warikan_domain::{
    AmountField, Calculation, ParticipantId, ParticipantOutcome, ParticipantResult, PoolField,
};
use warikan_i18n as i18n;

/// Renders an already-computed [`Calculation`] as one text line per field:
/// the addend chain for every participant, markers for evaluated ("magic"),
/// automatic and corrected values, and the total/mismatch footer. No new
/// arithmetic happens here.
pub struct BreakdownPresenter;

impl BreakdownPresenter {
    pub fn render(calculation: &Calculation) -> String {
        Self::render_with_names(calculation, &EmptyParticipantDirectory)
    }

    pub fn render_with_names(
        calculation: &Calculation,
        directory: &dyn ParticipantDirectory,
    ) -> String {
        let mut lines = Vec::with_capacity(calculation.participants.len() + 4);

        lines.push(format!(
            "{}: {}",
            i18n::AMOUNT,
            amount_text(&calculation.amount)
        ));
        if let Some(tip) = &calculation.tip {
            lines.push(format!("{}: {}", i18n::TIP, pool_text(tip)));
        }
        if let Some(shared) = &calculation.shared_expenses {
            lines.push(format!(
                "{}: {}",
                i18n::SHARED_EXPENSES,
                pool_text(shared)
            ));
        }
        for participant in &calculation.participants {
            lines.push(participant_line(participant, directory));
        }
        if let Some(total) = calculation.total {
            lines.push(format!("{}: {total}", i18n::TOTAL));
        }
        if let Some(mismatch) = calculation.mismatch {
            lines.push(format!("{}: {mismatch}", i18n::MISMATCH));
        }

        lines.join("\n")
    }
}

fn amount_text(field: &AmountField) -> String {
    match field {
        AmountField::Valid(parsed) if parsed.magic => {
            format!("{} {}", parsed.amount, i18n::CALCULATED_MARK)
        }
        AmountField::Valid(parsed) => parsed.amount.to_string(),
        AmountField::Invalid { input } => i18n::invalid_input(input),
    }
}

fn pool_text(pool: &PoolField) -> String {
    let mut text = amount_text(&pool.field);
    if pool.automatic {
        text.push(' ');
        text.push_str(i18n::AUTOMATIC_MARK);
    }
    if pool.correction {
        text.push(' ');
        text.push_str(i18n::ADJUSTED_MARK);
    }
    text
}

fn participant_line(
    participant: &ParticipantResult,
    directory: &dyn ParticipantDirectory,
) -> String {
    let label = participant_label(participant.id, directory);

    match &participant.outcome {
        ParticipantOutcome::Invalid { input } => {
            format!("{label}: {}", i18n::invalid_input(input))
        }
        ParticipantOutcome::Valid(share) => {
            let mut addends: Vec<String> = Vec::new();
            if let Some(entered) = share.entered {
                addends.push(if entered.magic {
                    format!("{} {}", entered.amount, i18n::CALCULATED_MARK)
                } else {
                    entered.amount.to_string()
                });
            }
            if let Some(backfill) = share.backfill {
                addends.push(format!("{backfill} {}", i18n::AUTOMATIC_MARK));
            }
            if let Some(shared_share) = share.shared_share {
                addends.push(format!("{shared_share} {}", i18n::SHARED_MARK));
            }
            if let Some(tip_share) = share.tip_share {
                addends.push(format!("{tip_share} {}", i18n::TIP_MARK));
            }

            match addends.len() {
                0 => format!("{label}: {}", share.total()),
                1 => format!("{label}: {}", addends[0]),
                _ => format!("{label}: {} = {}", addends.join(" + "), share.total()),
            }
        }
    }
}

fn participant_label<'a>(
    id: ParticipantId,
    directory: &'a dyn ParticipantDirectory,
) -> Cow<'a, str> {
    match directory.display_name(id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("#{}", id.0)),
    }
}

struct EmptyParticipantDirectory;

impl ParticipantDirectory for EmptyParticipantDirectory {
    fn display_name(&self, _id: ParticipantId) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use warikan_application::{ParticipantEntry, ReceiptInput, SplitCalculator};
    use warikan_infrastructure::ExpressionAmountParser;

    static TEST_PARSER: ExpressionAmountParser = ExpressionAmountParser;

    fn sample_calculation() -> Calculation {
        let participants = [
            ParticipantEntry {
                id: ParticipantId(1),
                raw_amount: "30",
            },
            ParticipantEntry {
                id: ParticipantId(2),
                raw_amount: "15+20",
            },
            ParticipantEntry {
                id: ParticipantId(3),
                raw_amount: "20",
            },
        ];
        SplitCalculator::new(&TEST_PARSER)
            .calculate(&ReceiptInput {
                amount: "100",
                shared_expenses: Some("15"),
                participants: &participants,
                ..ReceiptInput::default()
            })
            .into_calculation()
    }

    #[test]
    fn renders_addend_chains_and_totals() {
        let rendered = BreakdownPresenter::render(&sample_calculation());

        assert!(rendered.contains("Amount: 100.00"));
        assert!(rendered.contains("Shared expenses: 15.00"));
        assert!(rendered.contains("#1: 30.00 + 5.00 (shared) = 35.00"));
        assert!(rendered.contains("#2: 35.00 (calc) + 5.00 (shared) = 40.00"));
        assert!(rendered.contains("Total: 100.00"));
    }

    #[test]
    fn render_uses_display_names_when_available() {
        let mut directory = HashMap::new();
        directory.insert(ParticipantId(1), "Alice".to_string());

        let rendered =
            BreakdownPresenter::render_with_names(&sample_calculation(), &directory);

        assert!(rendered.contains("Alice: 30.00"));
        assert!(!rendered.contains("#1:"));
        assert!(rendered.contains("#2:"));
    }

    #[test]
    fn renders_field_errors_with_raw_input() {
        let participants = [ParticipantEntry {
            id: ParticipantId(1),
            raw_amount: "thirty",
        }];
        let calculation = SplitCalculator::new(&TEST_PARSER)
            .calculate(&ReceiptInput {
                amount: "abc",
                participants: &participants,
                ..ReceiptInput::default()
            })
            .into_calculation();

        let rendered = BreakdownPresenter::render(&calculation);

        assert!(rendered.contains("Amount: invalid input 'abc'"));
        assert!(rendered.contains("#1: invalid input 'thirty'"));
    }

    #[test]
    fn renders_automatic_and_adjusted_marks() {
        let participants = [
            ParticipantEntry {
                id: ParticipantId(1),
                raw_amount: "",
            },
            ParticipantEntry {
                id: ParticipantId(2),
                raw_amount: "",
            },
            ParticipantEntry {
                id: ParticipantId(3),
                raw_amount: "",
            },
        ];
        let calculation = SplitCalculator::new(&TEST_PARSER)
            .calculate(&ReceiptInput {
                amount: "140",
                shared_expenses: Some(""),
                participants: &participants,
                ..ReceiptInput::default()
            })
            .into_calculation();

        let rendered = BreakdownPresenter::render(&calculation);

        assert!(rendered.contains("Shared expenses: 140.00 (auto) (adjusted)"));
        assert!(rendered.contains("#1: 46.67 (shared)"));
        assert!(rendered.contains("#3: 46.66 (shared)"));
    }

    #[test]
    fn renders_mismatch_footer() {
        let participants = [
            ParticipantEntry {
                id: ParticipantId(1),
                raw_amount: "30",
            },
            ParticipantEntry {
                id: ParticipantId(2),
                raw_amount: "40",
            },
        ];
        let calculation = SplitCalculator::new(&TEST_PARSER)
            .calculate(&ReceiptInput {
                amount: "100",
                participants: &participants,
                ..ReceiptInput::default()
            })
            .into_calculation();

        let rendered = BreakdownPresenter::render(&calculation);

        assert!(rendered.contains("Mismatch: 30.00"));
    }
}
