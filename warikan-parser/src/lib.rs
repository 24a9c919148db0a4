#![warn(clippy::uninlined_format_args)]

use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit0, digit1, one_of, space0},
    combinator::{all_consuming, opt, recognize},
    multi::{many0, many0_count},
};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use warikan_domain::{Money, ParsedAmount};

/// Parenthesis nesting beyond this depth is rejected to bound parser
/// recursion on pathological input.
const MAX_NESTING_DEPTH: usize = 64;

/// Largest accepted amount in cents: 2^53 - 1, the largest integer a double
/// represents exactly. Inputs round-tripped through front ends that store
/// numbers as doubles stay lossless below this bound.
const MAX_CENTS: i64 = 9_007_199_254_740_991;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("nothing to evaluate")]
    Empty,
    #[error("not a valid arithmetic expression")]
    Syntax,
    #[error("expression nested deeper than {MAX_NESTING_DEPTH} levels")]
    TooDeep,
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("amount is negative")]
    Negative,
    #[error("amount exceeds the representable range")]
    TooLarge,
}

/// Strips every character that can never occur in an amount expression and
/// normalizes the decimal comma to a dot. Never fails and is idempotent, so
/// a text field can be fed its own sanitized value on every keystroke.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            ',' => Some('.'),
            '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.' | ' ' => Some(c),
            _ => None,
        })
        .collect()
}

/// Parses a raw amount field into cents, reporting whether evaluation was
/// needed ("magic"). `None` covers blank input and every rejection; callers
/// that need the reason use [`evaluate_expression`].
pub fn parse_amount(raw: &str) -> Option<ParsedAmount> {
    let amount = evaluate_expression(raw).ok()?;
    let magic = literal_cents(raw) != Some(amount);
    Some(ParsedAmount { amount, magic })
}

/// Evaluates a raw amount field to cents.
///
/// Decimal commas are normalized to dots, a trailing run of `+ - * / (` (an
/// expression still being typed) is stripped, and the rest must be a pure
/// arithmetic formula over `+ - * / ( )` and decimal numbers — any other
/// character is a rejection, not something to skip ([`sanitize`] is the text
/// field's concern, not the evaluator's). The decimal result is converted to
/// cents by multiplying by 100 and rounding half away from zero; negative
/// and oversized amounts are rejected.
pub fn evaluate_expression(raw: &str) -> Result<Money, ExpressionError> {
    if raw.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }

    let normalized = raw.replace(',', ".");
    let stripped = strip_trailing_operators(&normalized);
    if stripped.is_empty() {
        return Err(ExpressionError::Syntax);
    }
    if nesting_depth(stripped) > MAX_NESTING_DEPTH {
        return Err(ExpressionError::TooDeep);
    }

    let (_, chain) = all_consuming((space0, expr, space0).map(|(_, chain, _)| chain))
        .parse(stripped)
        .map_err(|_| ExpressionError::Syntax)?;

    to_cents(chain.evaluate()?)
}

/// Cents value of a canonical decimal literal (`0 | [1-9][0-9]*`, optional
/// `.` and at least one fraction digit). Non-canonical forms have no literal
/// interpretation and therefore read as magic.
fn literal_cents(raw: &str) -> Option<Money> {
    let trimmed = raw.trim();
    if !is_canonical_literal(trimmed) {
        return None;
    }
    to_cents(trimmed.parse::<Decimal>().ok()?).ok()
}

fn is_canonical_literal(text: &str) -> bool {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };

    let int_ok = !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && (int_part.len() == 1 || !int_part.starts_with('0'));
    let frac_ok = frac_part.is_none_or(|frac| {
        !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit())
    });

    int_ok && frac_ok
}

fn strip_trailing_operators(input: &str) -> &str {
    input
        .trim_end_matches(|c: char| matches!(c, '+' | '-' | '*' | '/' | '(' | ' '))
        .trim_start()
}

fn nesting_depth(input: &str) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max_depth
}

fn to_cents(value: Decimal) -> Result<Money, ExpressionError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ExpressionError::Negative);
    }

    let cents = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(ExpressionError::TooLarge)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(ExpressionError::TooLarge)?;

    if cents > MAX_CENTS {
        return Err(ExpressionError::TooLarge);
    }
    Ok(Money::from_cents(cents))
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ExprOp {
    Push(Decimal),
    Negate,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Debug, PartialEq, Default)]
struct ExprChain {
    ops: Vec<ExprOp>,
}

impl ExprChain {
    fn push(&mut self, op: ExprOp) {
        self.ops.push(op);
    }

    fn evaluate(&self) -> Result<Decimal, ExpressionError> {
        let mut stack: Vec<Decimal> = Vec::with_capacity(self.ops.len());

        for op in &self.ops {
            match *op {
                ExprOp::Push(value) => stack.push(value),
                ExprOp::Negate => {
                    let value = pop(&mut stack)?;
                    stack.push(-value);
                }
                ExprOp::Add => apply(&mut stack, |a, b| {
                    a.checked_add(b).ok_or(ExpressionError::Overflow)
                })?,
                ExprOp::Sub => apply(&mut stack, |a, b| {
                    a.checked_sub(b).ok_or(ExpressionError::Overflow)
                })?,
                ExprOp::Mul => apply(&mut stack, |a, b| {
                    a.checked_mul(b).ok_or(ExpressionError::Overflow)
                })?,
                ExprOp::Div => apply(&mut stack, |a, b| {
                    if b.is_zero() {
                        return Err(ExpressionError::DivisionByZero);
                    }
                    a.checked_div(b).ok_or(ExpressionError::Overflow)
                })?,
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(ExpressionError::Syntax),
        }
    }
}

fn pop(stack: &mut Vec<Decimal>) -> Result<Decimal, ExpressionError> {
    stack.pop().ok_or(ExpressionError::Syntax)
}

fn apply(
    stack: &mut Vec<Decimal>,
    op: impl FnOnce(Decimal, Decimal) -> Result<Decimal, ExpressionError>,
) -> Result<(), ExpressionError> {
    let b = pop(stack)?;
    let a = pop(stack)?;
    stack.push(op(a, b)?);
    Ok(())
}

fn number(input: &str) -> IResult<&str, ExprChain> {
    let (rest, text) = recognize(alt((
        (digit1, opt((char('.'), digit0))).map(|_| ()),
        (char('.'), digit1).map(|_| ()),
    )))
    .parse(input)?;

    let Some(value) = parse_decimal(text) else {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Float,
        )));
    };

    let mut chain = ExprChain::default();
    chain.push(ExprOp::Push(value));
    Ok((rest, chain))
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    // The grammar admits "10." and ".5"; Decimal's parser does not.
    let text = text.strip_suffix('.').unwrap_or(text);
    if let Some(frac) = text.strip_prefix('.') {
        return format!("0.{frac}").parse().ok();
    }
    text.parse().ok()
}

fn primary(input: &str) -> IResult<&str, ExprChain> {
    alt((
        (char('('), space0, expr, space0, char(')')).map(|(_, _, chain, _, _)| chain),
        number,
    ))
    .parse(input)
}

// Unary minus is folded by count rather than recursion so a run of signs
// cannot deepen the parser stack.
fn factor(input: &str) -> IResult<&str, ExprChain> {
    (many0_count((char('-'), space0)), primary)
        .map(|(minus_count, mut chain)| {
            if minus_count % 2 == 1 {
                chain.push(ExprOp::Negate);
            }
            chain
        })
        .parse(input)
}

fn term(input: &str) -> IResult<&str, ExprChain> {
    (factor, many0((space0, one_of("*/"), space0, factor)))
        .map(|(first, rest)| {
            rest.into_iter().fold(first, |mut acc, (_, op, _, right)| {
                acc.ops.extend(right.ops);
                acc.push(if op == '*' { ExprOp::Mul } else { ExprOp::Div });
                acc
            })
        })
        .parse(input)
}

// Addition and subtraction, lowest precedence, left associative.
fn expr(input: &str) -> IResult<&str, ExprChain> {
    (term, many0((space0, one_of("+-"), space0, term)))
        .map(|(first, rest)| {
            rest.into_iter().fold(first, |mut acc, (_, op, _, right)| {
                acc.ops.extend(right.ops);
                acc.push(if op == '+' { ExprOp::Add } else { ExprOp::Sub });
                acc
            })
        })
        .parse(input)
}
