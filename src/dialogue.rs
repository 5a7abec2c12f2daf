/// One display record of a radio exchange, tagged by speaker.
///
/// `Driver` and `Engineer` carry the line text with the speaker label
/// stripped; `Plain` carries a line that matched neither label, unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueLine {
    Driver(String),
    Engineer(String),
    Plain(String),
}

/// Split a raw exchange into ordered display records.
///
/// Pure prefix dispatch: a line starting with the literal `Driver:` or
/// `Engineer:` label is tagged with the label stripped and trimmed, blank
/// lines are dropped, and everything else passes through unchanged. Line
/// order is conversation order.
pub fn format_exchange(exchange: &str) -> Vec<DialogueLine> {
    exchange
        .lines()
        .filter_map(|line| {
            if line.trim().is_empty() {
                None
            } else if let Some(rest) = line.strip_prefix("Driver:") {
                Some(DialogueLine::Driver(rest.trim().to_string()))
            } else if let Some(rest) = line.strip_prefix("Engineer:") {
                Some(DialogueLine::Engineer(rest.trim().to_string()))
            } else {
                Some(DialogueLine::Plain(line.to_string()))
            }
        })
        .collect()
}
