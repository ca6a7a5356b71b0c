//! Reader for the pair-table script format.
//!
//! The help generator writes each shard as a small script:
//!
//! ```text
//! function FileData_Pairs(x)
//! {
//! x.t("ieee","standards");
//! x.t("user\u2019s","guide");
//! }
//! ```
//!
//! Every `<receiver>.t("source","related")` call registers one pair. Anything
//! else in the file (the wrapper function, braces, comments) is ignored.

use std::iter::Peekable;
use std::str::CharIndices;

/// The registration call marker.
const CALL_MARKER: &str = ".t(";

/// Outcome of scanning one shard script.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedScript {
    /// Decoded `(source, related)` pairs in file order.
    pub pairs: Vec<(String, String)>,
    /// 1-based line numbers of registration calls that could not be decoded.
    pub rejected_lines: Vec<usize>,
}

/// Extract every registration call from `text`.
pub fn parse_pair_script(text: &str) -> ParsedScript {
    let mut parsed = ParsedScript::default();
    let mut offset = 0;

    while let Some(found) = text[offset..].find(CALL_MARKER) {
        let marker = offset + found;
        let args_start = marker + CALL_MARKER.len();

        if !has_receiver(&text[..marker]) {
            offset = args_start;
            continue;
        }

        match parse_call_args(&text[args_start..]) {
            Some((source, related, consumed)) => {
                parsed.pairs.push((source, related));
                offset = args_start + consumed;
            }
            None => {
                parsed.rejected_lines.push(line_number(text, marker));
                offset = args_start;
            }
        }
    }

    parsed
}

fn has_receiver(before: &str) -> bool {
    before
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn line_number(text: &str, position: usize) -> usize {
    text[..position].bytes().filter(|&b| b == b'\n').count() + 1
}

/// Parse `"a","b")` and return both strings plus the bytes consumed.
fn parse_call_args(args: &str) -> Option<(String, String, usize)> {
    let mut chars = args.char_indices().peekable();

    skip_whitespace(&mut chars);
    let source = parse_string_literal(&mut chars)?;
    skip_whitespace(&mut chars);
    expect(&mut chars, ',')?;
    skip_whitespace(&mut chars);
    let related = parse_string_literal(&mut chars)?;
    skip_whitespace(&mut chars);
    let close = expect(&mut chars, ')')?;

    Some((source, related, close + 1))
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
}

fn expect(chars: &mut Peekable<CharIndices<'_>>, wanted: char) -> Option<usize> {
    chars.next_if(|&(_, c)| c == wanted).map(|(i, _)| i)
}

fn parse_string_literal(chars: &mut Peekable<CharIndices<'_>>) -> Option<String> {
    let (_, quote) = chars.next_if(|&(_, c)| c == '"' || c == '\'')?;
    let mut value = String::new();

    loop {
        let (_, c) = chars.next()?;
        match c {
            c if c == quote => return Some(value),
            '\n' => return None,
            '\\' => value.push(parse_escape(chars)?),
            c => value.push(c),
        }
    }
}

fn parse_escape(chars: &mut Peekable<CharIndices<'_>>) -> Option<char> {
    let (_, c) = chars.next()?;
    let decoded = match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        '0' => '\0',
        'x' => char::from_u32(read_hex(chars, 2)?)?,
        'u' => {
            let unit = read_hex(chars, 4)?;
            if (0xD800..0xDC00).contains(&unit) {
                // High surrogate; the low half must follow as another \u escape.
                expect(chars, '\\')?;
                expect(chars, 'u')?;
                let low = read_hex(chars, 4)?;
                if !(0xDC00..0xE000).contains(&low) {
                    return None;
                }
                char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))?
            } else {
                char::from_u32(unit)?
            }
        }
        other => other,
    };
    Some(decoded)
}

fn read_hex(chars: &mut Peekable<CharIndices<'_>>, digits: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..digits {
        let (_, c) = chars.next()?;
        value = value * 16 + c.to_digit(16)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_parse_generator_output() {
        let script = "function FileData_Pairs(x)\n{\nx.t(\"ieee\",\"standards\");\nx.t(\"ieee\",\"802.3\");\nx.t(\"half\",\"ethernet\");\n}\n";
        let parsed = parse_pair_script(script);

        assert_eq!(
            parsed.pairs,
            vec![
                pair("ieee", "standards"),
                pair("ieee", "802.3"),
                pair("half", "ethernet"),
            ]
        );
        assert!(parsed.rejected_lines.is_empty());
    }

    #[test]
    fn test_unicode_escapes_are_decoded() {
        let parsed = parse_pair_script(r#"x.t("user\u2019s","guide");"#);
        assert_eq!(parsed.pairs, vec![pair("user\u{2019}s", "guide")]);
    }

    #[test]
    fn test_surrogate_pairs_are_combined() {
        let parsed = parse_pair_script(r#"x.t("\uD83D\uDE00","smile");"#);
        assert_eq!(parsed.pairs, vec![pair("\u{1F600}", "smile")]);
    }

    #[test]
    fn test_quotes_and_backslashes() {
        let parsed = parse_pair_script(r#"x.t('it\'s',"a\\b\"c");"#);
        assert_eq!(parsed.pairs, vec![pair("it's", "a\\b\"c")]);
    }

    #[test]
    fn test_marker_inside_literal_does_not_confuse_scanner() {
        let parsed = parse_pair_script(r#"x.t("a.t(b","c"); x.t("d","e");"#);
        assert_eq!(parsed.pairs, vec![pair("a.t(b", "c"), pair("d", "e")]);
    }

    #[test]
    fn test_broken_calls_are_reported_by_line() {
        let script = "function FileData_Pairs(x)\n{\nx.t(\"ok\",\"fine\");\nx.t(\"unterminated,\"x\");\nx.t(\"bad\\u12\",\"y\");\nx.t(\"also\",\"fine\");\n}";
        let parsed = parse_pair_script(script);

        assert_eq!(parsed.pairs, vec![pair("ok", "fine"), pair("also", "fine")]);
        assert_eq!(parsed.rejected_lines, vec![4, 5]);
    }

    #[test]
    fn test_empty_script() {
        let parsed = parse_pair_script("function FileData_Pairs(x)\n{\n}\n");
        assert!(parsed.pairs.is_empty());
        assert!(parsed.rejected_lines.is_empty());
    }
}
