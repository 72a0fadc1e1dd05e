use std::path::PathBuf;

/// A single ticket, loaded from a numbered text file in the store.
///
/// The filename stem, parsed as a decimal integer, is the ticket's
/// identifying number. The first line of the file is the title; the full
/// file text (title included) is kept for searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub number: u64,
    pub path: PathBuf,
    pub title: String,
    pub content: String,
}

impl Ticket {
    /// Filename for a ticket number, e.g. `5` -> `5.txt`.
    pub fn file_name(number: u64) -> String {
        format!("{}.txt", number)
    }
}

/// Extract the title from ticket content: everything up to the first line
/// break, with one trailing carriage return stripped. Content without a
/// line break is all title.
pub fn title_of(content: &str) -> &str {
    let first = match content.find('\n') {
        Some(i) => &content[..i],
        None => content,
    };
    first.strip_suffix('\r').unwrap_or(first)
}

/// Parse a ticket number out of a directory entry name. Returns `None`
/// unless the name is `<integer>.txt`.
pub fn parse_ticket_name(name: &str) -> Option<u64> {
    let stem = name.strip_suffix(".txt")?;
    stem.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- title_of ---

    #[test]
    fn title_stops_at_first_line_break() {
        assert_eq!(title_of("Buy milk\n\nGet milk from store"), "Buy milk");
    }

    #[test]
    fn title_strips_trailing_carriage_return() {
        assert_eq!(title_of("Buy milk\r\n\r\nbody"), "Buy milk");
    }

    #[test]
    fn title_without_line_break_is_whole_content() {
        assert_eq!(title_of("just a title"), "just a title");
    }

    #[test]
    fn title_of_empty_content() {
        assert_eq!(title_of(""), "");
    }

    #[test]
    fn title_of_lone_newline() {
        // First line is empty; the rest is body.
        assert_eq!(title_of("\nbody"), "");
    }

    #[test]
    fn title_keeps_interior_carriage_returns() {
        assert_eq!(title_of("a\rb\nrest"), "a\rb");
    }

    // --- parse_ticket_name ---

    #[test]
    fn parses_numeric_txt_names() {
        assert_eq!(parse_ticket_name("5.txt"), Some(5));
        assert_eq!(parse_ticket_name("12.txt"), Some(12));
    }

    #[test]
    fn rejects_non_numeric_stems() {
        assert_eq!(parse_ticket_name("notes.txt"), None);
        assert_eq!(parse_ticket_name("5a.txt"), None);
        assert_eq!(parse_ticket_name("5.5.txt"), None);
    }

    #[test]
    fn rejects_other_extensions() {
        assert_eq!(parse_ticket_name("5.md"), None);
        assert_eq!(parse_ticket_name("5"), None);
    }

    #[test]
    fn leading_zeros_parse_to_the_same_number() {
        assert_eq!(parse_ticket_name("007.txt"), Some(7));
    }

    #[test]
    fn ticket_file_name_round_trips() {
        assert_eq!(Ticket::file_name(42), "42.txt");
        assert_eq!(parse_ticket_name(&Ticket::file_name(42)), Some(42));
    }
}
