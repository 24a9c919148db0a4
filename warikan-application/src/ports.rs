use std::collections::HashMap;

use warikan_domain::{ParsedAmount, ParticipantId};

/// Parses one raw amount field into cents. `None` covers blank input and
/// every rejection; the calculator tells the two apart by looking at the
/// raw string itself.
pub trait AmountParser: Send + Sync {
    fn parse(&self, raw: &str) -> Option<ParsedAmount>;
}

/// Resolves participant ids to display names for rendering.
pub trait ParticipantDirectory: Send + Sync {
    fn display_name(&self, id: ParticipantId) -> Option<&str>;
}

impl ParticipantDirectory for HashMap<ParticipantId, String> {
    fn display_name(&self, id: ParticipantId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}
