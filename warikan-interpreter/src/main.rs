#![warn(clippy::uninlined_format_args)]

use std::{borrow::Cow, collections::HashMap, env, fs, process};

use fxhash::FxHashSet;
use warikan_application::{ParticipantEntry, ReceiptInput, SplitCalculator};
use warikan_domain::ParticipantId;
use warikan_infrastructure::ExpressionAmountParser;
use warikan_presentation::BreakdownPresenter;

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let Some(path) = env::args().nth(1) else {
        return Err("Usage: warikan-interpreter <receipt-file>".into());
    };

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;
    let receipt = parse_receipt_file(&source)?;

    let entries: Vec<ParticipantEntry<'_>> = receipt
        .participants
        .iter()
        .enumerate()
        .map(|(index, (_, raw_amount))| ParticipantEntry {
            id: ParticipantId(index as u64 + 1),
            raw_amount,
        })
        .collect();
    let directory: HashMap<ParticipantId, String> = receipt
        .participants
        .iter()
        .enumerate()
        .map(|(index, (label, _))| (ParticipantId(index as u64 + 1), (*label).to_string()))
        .collect();

    let parser = ExpressionAmountParser;
    let result = SplitCalculator::new(&parser).calculate(&ReceiptInput {
        amount: receipt.amount,
        tip: receipt.tip,
        shared_expenses: receipt.shared,
        participants: &entries,
    });

    // Field errors are part of the breakdown, not a process failure.
    let calculation = result.into_calculation();
    println!(
        "{}",
        BreakdownPresenter::render_with_names(&calculation, &directory)
    );

    Ok(())
}

#[derive(Debug)]
struct ReceiptFile<'a> {
    amount: &'a str,
    tip: Option<&'a str>,
    shared: Option<&'a str>,
    /// Label and raw amount per participant, file order.
    participants: Vec<(&'a str, &'a str)>,
}

/// One `key: value` field per line. `amount`, `tip` and `shared` are
/// reserved keys; every other key names a participant. Blank lines and `#`
/// comments are skipped.
fn parse_receipt_file(source: &str) -> CliResult<ReceiptFile<'_>> {
    let mut amount: Option<&str> = None;
    let mut tip: Option<&str> = None;
    let mut shared: Option<&str> = None;
    let mut participants: Vec<(&str, &str)> = Vec::new();
    let mut seen_labels: FxHashSet<&str> = FxHashSet::default();

    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(format!("Line {}: expected 'name: amount'", index + 1).into());
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "amount" => set_reserved(&mut amount, key, value, index)?,
            "tip" => set_reserved(&mut tip, key, value, index)?,
            "shared" => set_reserved(&mut shared, key, value, index)?,
            "" => return Err(format!("Line {}: missing field name", index + 1).into()),
            label => {
                if !seen_labels.insert(label) {
                    return Err(
                        format!("Line {}: duplicate participant '{label}'", index + 1).into(),
                    );
                }
                participants.push((label, value));
            }
        }
    }

    let Some(amount) = amount else {
        return Err("Missing 'amount:' line".into());
    };

    Ok(ReceiptFile {
        amount,
        tip,
        shared,
        participants,
    })
}

fn set_reserved<'a>(
    slot: &mut Option<&'a str>,
    key: &str,
    value: &'a str,
    index: usize,
) -> CliResult<()> {
    if slot.replace(value).is_some() {
        return Err(format!("Line {}: duplicate '{key}:' field", index + 1).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_and_keeps_participant_order() {
        let source = "# dinner\namount: 120.50\ntip: 10\nshared:\n\nalice: 30\nbob: 25+5\ncarol:\n";
        let receipt = parse_receipt_file(source).expect("file should parse");

        assert_eq!(receipt.amount, "120.50");
        assert_eq!(receipt.tip, Some("10"));
        assert_eq!(receipt.shared, Some(""));
        assert_eq!(
            receipt.participants,
            vec![("alice", "30"), ("bob", "25+5"), ("carol", "")]
        );
    }

    #[test]
    fn amount_is_required() {
        let err = parse_receipt_file("alice: 30\n").expect_err("missing amount must fail");
        assert!(err.contains("amount"), "unexpected message: {err}");
    }

    #[test]
    fn duplicate_reserved_keys_are_rejected() {
        let err = parse_receipt_file("amount: 10\namount: 20\n")
            .expect_err("duplicate amount must fail");
        assert!(err.contains("duplicate"), "unexpected message: {err}");
    }

    #[test]
    fn duplicate_participants_are_rejected() {
        let err = parse_receipt_file("amount: 10\nalice: 5\nalice: 5\n")
            .expect_err("duplicate participant must fail");
        assert!(err.contains("alice"), "unexpected message: {err}");
    }

    #[test]
    fn lines_without_a_colon_are_rejected() {
        let err = parse_receipt_file("amount 10\n").expect_err("colon-less line must fail");
        assert!(err.contains("Line 1"), "unexpected message: {err}");
    }
}
