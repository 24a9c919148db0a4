use warikan_domain::ParticipantId;

/// One participant line as typed. Order is significant: the last entry
/// absorbs the rounding correction and a single blank entry is the backfill
/// target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParticipantEntry<'a> {
    pub id: ParticipantId,
    pub raw_amount: &'a str,
}

/// The raw form fields of one calculation. `None` means the field does not
/// exist in the form; a blank string means it exists but was left empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReceiptInput<'a> {
    pub amount: &'a str,
    pub tip: Option<&'a str>,
    pub shared_expenses: Option<&'a str>,
    pub participants: &'a [ParticipantEntry<'a>],
}
