use std::ops::Range;

use serde::Serialize;

/// Length of one FITS header record (card).
pub const CARD_LEN: usize = 80;

/// Keyword names that never carry a value indicator.
const COMMENTARY_NAMES: [&str; 2] = ["COMMENT", "HISTORY"];

/// One header keyword: the decoded form of a single 80-byte card.
///
/// `name` is stored trimmed and upper-cased. `value` and `comment` are kept
/// verbatim apart from trailing-whitespace trimming during decode; commentary
/// records (COMMENT, HISTORY, blank name) have an empty `value` and carry
/// everything after the name field in `comment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub name: String,
    pub value: String,
    pub comment: String,
}

impl Keyword {
    pub fn new(name: &str, value: &str, comment: &str) -> Self {
        Keyword {
            name: name.trim().to_uppercase(),
            value: value.to_string(),
            comment: comment.to_string(),
        }
    }

    /// True for records that are written without a `= ` value indicator.
    fn is_commentary(name: &str) -> bool {
        name.is_empty() || COMMENTARY_NAMES.contains(&name)
    }

    /// Compare two keywords, either by name alone or by name, value and
    /// comment. All fields are compared trimmed and case-insensitively.
    pub fn matches(&self, other: &Keyword, name_only: bool) -> bool {
        if !eq_trimmed(&self.name, &other.name) {
            return false;
        }
        name_only
            || (eq_trimmed(&self.value, &other.value)
                && eq_trimmed(&self.comment, &other.comment))
    }
}

fn eq_trimmed(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Decode one 80-byte header card.
///
/// A card has a value iff byte 8 is `=`, byte 9 is a space and the name is
/// not COMMENT, HISTORY or blank. The value/comment split is the first `/`
/// in bytes [10,80) that falls outside a single-quoted string; the quote
/// flag simply toggles on every `'`, so an odd quote count leaves the rest
/// of the card "inside string" and any later slash is not a separator.
///
/// Input of any other length decodes to an all-empty keyword rather than an
/// error; callers that count records see such cards like any other.
pub fn decode_card(raw: &[u8]) -> Keyword {
    if raw.len() != CARD_LEN {
        return Keyword::default();
    }

    let name = String::from_utf8_lossy(&raw[..8]).trim().to_uppercase();

    let has_value =
        raw[8] == b'=' && raw[9] == b' ' && !Keyword::is_commentary(&name);
    if !has_value {
        let comment = String::from_utf8_lossy(&raw[8..]).trim_end().to_string();
        return Keyword {
            name,
            value: String::new(),
            comment,
        };
    }

    let mut in_string = false;
    let mut split = CARD_LEN;
    for (i, &byte) in raw.iter().enumerate().skip(10) {
        match byte {
            b'\'' => in_string = !in_string,
            b'/' if !in_string => {
                split = i;
                break;
            }
            _ => {}
        }
    }

    let value = String::from_utf8_lossy(&raw[10..split])
        .trim_end()
        .to_string();
    let comment = if split < CARD_LEN {
        String::from_utf8_lossy(&raw[split + 1..])
            .trim_end()
            .to_string()
    } else {
        String::new()
    };

    Keyword {
        name,
        value,
        comment,
    }
}

/// Encode a keyword back into an 80-byte, space-padded card.
///
/// The layout is the exact inverse of [`decode_card`]: name at [0,8),
/// `= ` at [8,10) for value-carrying records, the value from byte 10, one
/// space, a `/`, and the comment directly after the slash. Content that
/// would run past byte 80 is truncated at the card boundary.
pub fn encode_card(keyword: &Keyword) -> [u8; CARD_LEN] {
    let mut card = [b' '; CARD_LEN];

    let name = keyword.name.trim().to_uppercase();
    let name_bytes = name.as_bytes();
    let name_len = name_bytes.len().min(8);
    card[..name_len].copy_from_slice(&name_bytes[..name_len]);

    if Keyword::is_commentary(&name) || name == "END" {
        copy_clamped(&mut card, 8, keyword.comment.as_bytes());
        return card;
    }

    card[8] = b'=';
    card[9] = b' ';
    let value_end = copy_clamped(&mut card, 10, keyword.value.as_bytes());

    if !keyword.comment.is_empty() && value_end + 2 < CARD_LEN {
        card[value_end + 1] = b'/';
        copy_clamped(&mut card, value_end + 2, keyword.comment.as_bytes());
    }

    card
}

/// Copy `src` into `card` starting at `start`, clamped to the card length.
/// Returns the index one past the last byte written.
fn copy_clamped(card: &mut [u8; CARD_LEN], start: usize, src: &[u8]) -> usize {
    let len = src.len().min(CARD_LEN.saturating_sub(start));
    card[start..start + len].copy_from_slice(&src[..len]);
    start + len
}

/// Resolve `target` against `records[range]`, returning the index of the
/// last match.
///
/// The scan runs left to right and overwrites the recorded index on every
/// hit, so on headers with repeated keywords (multiple COMMENT or HISTORY
/// records) the later occurrence always wins. Callers depend on that
/// tie-break; do not replace it with a first-match search.
pub fn find_last_match(
    records: &[Keyword],
    range: Range<usize>,
    target: &Keyword,
    name_only: bool,
) -> Option<usize> {
    let mut found = None;
    for index in range {
        if records[index].matches(target, name_only) {
            found = Some(index);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(text: &str) -> Vec<u8> {
        let mut bytes = text.as_bytes().to_vec();
        assert!(bytes.len() <= CARD_LEN, "test card longer than 80 bytes");
        bytes.resize(CARD_LEN, b' ');
        bytes
    }

    #[test]
    fn test_decode_value_and_comment() {
        let raw = card("EXPTIME =                300.0 / exposure time in seconds");
        let keyword = decode_card(&raw);
        assert_eq!(keyword.name, "EXPTIME");
        assert_eq!(keyword.value.trim(), "300.0");
        assert_eq!(keyword.comment, " exposure time in seconds");
    }

    #[test]
    fn test_decode_value_without_comment() {
        let raw = card("NAXIS   =                    2");
        let keyword = decode_card(&raw);
        assert_eq!(keyword.name, "NAXIS");
        assert_eq!(keyword.value.trim(), "2");
        assert_eq!(keyword.comment, "");
    }

    #[test]
    fn test_decode_commentary_card() {
        let raw = card("COMMENT = not actually a value");
        let keyword = decode_card(&raw);
        assert_eq!(keyword.name, "COMMENT");
        assert_eq!(keyword.value, "");
        assert_eq!(keyword.comment, "= not actually a value");
    }

    #[test]
    fn test_decode_history_card() {
        let raw = card("HISTORY dark subtracted");
        let keyword = decode_card(&raw);
        assert_eq!(keyword.name, "HISTORY");
        assert_eq!(keyword.value, "");
        assert_eq!(keyword.comment, "dark subtracted");
    }

    #[test]
    fn test_decode_blank_name_card() {
        let raw = card("        free text in a blank card");
        let keyword = decode_card(&raw);
        assert_eq!(keyword.name, "");
        assert_eq!(keyword.value, "");
        assert_eq!(keyword.comment, "free text in a blank card");
    }

    #[test]
    fn test_decode_name_is_upper_cased() {
        let raw = card("filter  = 'R'");
        let keyword = decode_card(&raw);
        assert_eq!(keyword.name, "FILTER");
    }

    #[test]
    fn test_decode_slash_inside_quotes_is_not_a_separator() {
        let raw = card("OBJECT  = 'NGC 1977 / running man' / nickname");
        let keyword = decode_card(&raw);
        assert_eq!(keyword.value, "'NGC 1977 / running man'");
        assert_eq!(keyword.comment, " nickname");
    }

    #[test]
    fn test_decode_odd_quote_count_suppresses_separator() {
        // One unbalanced quote before the slash: the parity flag stays
        // "inside string" to the end of the card, so no comment is split off.
        let raw = card("OBJECT  = 'unterminated / not a comment");
        let keyword = decode_card(&raw);
        assert_eq!(keyword.value, "'unterminated / not a comment");
        assert_eq!(keyword.comment, "");
    }

    #[test]
    fn test_decode_wrong_length_yields_empty_keyword() {
        assert_eq!(decode_card(b"SIMPLE  =   T"), Keyword::default());
        assert_eq!(decode_card(&[b' '; 81]), Keyword::default());
        assert_eq!(decode_card(&[]), Keyword::default());
    }

    #[test]
    fn test_encode_value_and_comment_layout() {
        let keyword = Keyword::new("FILTER", "'R'", " photometric band");
        let raw = encode_card(&keyword);
        assert_eq!(&raw[..8], b"FILTER  ");
        assert_eq!(&raw[8..10], b"= ");
        assert_eq!(&raw[10..13], b"'R'");
        assert_eq!(raw[14], b'/');
    }

    #[test]
    fn test_encode_end_card_is_name_only() {
        let raw = encode_card(&Keyword::new("END", "", ""));
        assert_eq!(&raw[..8], b"END     ");
        assert!(raw[8..].iter().all(|&b| b == b' '));
    }

    #[test]
    fn test_encode_truncates_at_card_boundary() {
        let long = "x".repeat(120);
        let raw = encode_card(&Keyword::new("LONGVAL", &long, ""));
        assert_eq!(raw.len(), CARD_LEN);
        assert_eq!(&raw[10..], long.as_bytes()[..70].to_vec().as_slice());
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            Keyword::new("FILTER", "'R'", "photometric band"),
            Keyword::new("EXPTIME", "300.0", ""),
            Keyword::new("GAIN", "", "gain left unset"),
            Keyword::new("COMMENT", "", "calibration frame"),
            Keyword::new("HISTORY", "", "flat fielded"),
            Keyword::new("END", "", ""),
            Keyword::new("BLANKVAL", "", ""),
        ];
        for keyword in cases {
            let decoded = decode_card(&encode_card(&keyword));
            assert_eq!(decoded, keyword, "round trip failed for {:?}", keyword);
        }
    }

    #[test]
    fn test_matches_reflexive() {
        let keyword = Keyword::new("OBJECT", "'M31'", "target");
        assert!(keyword.matches(&keyword, false));
        assert!(keyword.matches(&keyword, true));
    }

    #[test]
    fn test_matches_symmetric() {
        let a = Keyword::new("object", "'m31'", "TARGET");
        let b = Keyword::new("OBJECT", "'M31'", "target");
        assert_eq!(a.matches(&b, false), b.matches(&a, false));
        assert_eq!(a.matches(&b, true), b.matches(&a, true));
        assert!(a.matches(&b, false));
    }

    #[test]
    fn test_matches_name_only_ignores_value_and_comment() {
        let a = Keyword::new("GAIN", "100", "high");
        let b = Keyword::new("GAIN", "200", "low");
        assert!(a.matches(&b, true));
        assert!(!a.matches(&b, false));
    }

    #[test]
    fn test_matches_trims_fields() {
        let a = Keyword::new("GAIN", " 100 ", " setting ");
        let b = Keyword::new("GAIN", "100", "setting");
        assert!(a.matches(&b, false));
    }

    #[test]
    fn test_find_last_match_prefers_later_index() {
        let records = vec![
            Keyword::new("HISTORY", "", "first pass"),
            Keyword::new("GAIN", "100", ""),
            Keyword::new("HISTORY", "", "second pass"),
        ];
        let target = Keyword::new("HISTORY", "", "");
        assert_eq!(find_last_match(&records, 0..records.len(), &target, true), Some(2));
    }

    #[test]
    fn test_find_last_match_honors_range() {
        let records = vec![
            Keyword::new("GAIN", "100", ""),
            Keyword::new("GAIN", "200", ""),
            Keyword::new("GAIN", "300", ""),
        ];
        let target = Keyword::new("GAIN", "", "");
        assert_eq!(find_last_match(&records, 0..2, &target, true), Some(1));
        assert_eq!(find_last_match(&records, 1..1, &target, true), None);
    }

    #[test]
    fn test_find_last_match_full_mode() {
        let records = vec![
            Keyword::new("HISTORY", "", "first pass"),
            Keyword::new("HISTORY", "", "second pass"),
        ];
        let target = Keyword::new("HISTORY", "", "first pass");
        assert_eq!(find_last_match(&records, 0..2, &target, false), Some(0));
        let missing = Keyword::new("HISTORY", "", "third pass");
        assert_eq!(find_last_match(&records, 0..2, &missing, false), None);
    }
}
