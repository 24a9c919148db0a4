use warikan_application::AmountParser;
use warikan_domain::ParsedAmount;
use warikan_parser::parse_amount;

/// [`AmountParser`] backed by the arithmetic expression grammar.
#[derive(Default)]
pub struct ExpressionAmountParser;

impl AmountParser for ExpressionAmountParser {
    fn parse(&self, raw: &str) -> Option<ParsedAmount> {
        parse_amount(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use warikan_domain::Money;

    #[rstest]
    #[case::literal("12.50", 1250, false)]
    #[case::expression("10+2,50", 1250, true)]
    fn delegates_to_the_expression_grammar(
        #[case] raw: &str,
        #[case] cents: i64,
        #[case] magic: bool,
    ) {
        let parsed = ExpressionAmountParser.parse(raw).expect("should parse");
        assert_eq!(parsed.amount, Money::from_cents(cents));
        assert_eq!(parsed.magic, magic);
    }

    #[rstest]
    #[case::blank("")]
    #[case::garbage("three")]
    fn rejects_unusable_input(#[case] raw: &str) {
        assert_eq!(ExpressionAmountParser.parse(raw), None);
    }
}
