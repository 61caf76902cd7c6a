//! # Punctuation Rules
//!
//! Prefix, suffix and infix rules shared by every blank pipeline. Offsets
//! returned here are byte lengths/ranges into the chunk being split.

use regex::Regex;

use crate::error::Result;

/// Punctuation split off at either end of a chunk.
const PUNCT: &[char] = &[
    '…', ',', ':', ';', '!', '?', '¿', '؟', '¡', '(', ')', '[', ']', '{', '}', '<', '>', '_', '#',
    '*', '&', '。', '？', '！', '，', '、', '；', '：', '～', '·', '।', '،', '۔', '؛', '٪',
];

const QUOTES: &[char] = &[
    '\'', '"', '”', '“', '`', '‘', '´', '’', '‚', '„', '»', '«', '「', '」', '『', '』', '（', '）',
    '〔', '〕', '【', '】', '《', '》', '〈', '〉',
];

const CURRENCY: &[char] = &['$', '£', '€', '¥', '฿', '₽', '₹', '₩', '₺', '₴', '₦', '¢'];

/// Prefix-only symbols.
const PREFIX_EXTRA: &[char] = &['§', '%', '=', '—', '–'];

/// Suffix-only symbols.
const SUFFIX_EXTRA: &[char] = &['—', '–'];

/// Possessive endings.
const POSSESSIVES: &[&str] = &["'s", "'S", "’s", "’S"];

/// Dashes that split two words (`t-shirt`), longest first.
const HYPHENS: &[&str] = &["---", "--", "——", "-", "–", "—", "~"];

fn is_quote(c: char) -> bool {
    QUOTES.contains(&c)
}

fn is_alnum(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}

/// Compiled affix rules.
#[derive(Debug, Clone)]
pub struct AffixRules {
    re_unit: Regex,
    re_url: Regex,
}

impl AffixRules {
    /// Compile the rule set.
    ///
    /// # Errors
    ///
    /// Returns `NerbinError::RegexError` if a pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_unit: Regex::new(
                r"[0-9](km/h|m/s|km²|km³|km|cm²|cm|mm|µm|nm|dm|kg|mg|µg|lbs|lb|oz|ft|yd|mph|kmh|hPa|mbar|ha|[KMGT]B|[kmgt]b|ml|m²|m³|m|g|l|%)$",
            )?,
            re_url: Regex::new(
                r"(?i)^(?:(?:https?|ftp)://\S+|www\.[^\s.]+\.\S+|[a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*\.(?:com|org|net|edu|gov|io|co|uk|de|fr|es|it|nl|pt|br|info|biz|dev|app|ai)(?:/\S*)?)$",
            )?,
        })
    }

    /// Whether the chunk is a URL that must stay a single token.
    pub fn is_url(&self, chunk: &str) -> bool {
        self.re_url.is_match(chunk)
    }

    /// Byte length of a prefix at the start of `chunk`, if any. Never
    /// consumes the whole chunk.
    pub fn prefix_len(&self, chunk: &str, elisions: &[&str]) -> Option<usize> {
        let mut chars = chunk.chars();
        let first = chars.next()?;
        let len = if first == '.' {
            let dots = chunk.chars().take_while(|c| *c == '.').count();
            if dots < 2 {
                return None;
            }
            dots
        } else if PUNCT.contains(&first)
            || is_quote(first)
            || CURRENCY.contains(&first)
            || PREFIX_EXTRA.contains(&first)
        {
            first.len_utf8()
        } else if first == '+' && !chars.next().is_some_and(|c| c.is_ascii_digit()) {
            1
        } else {
            return elisions
                .iter()
                .find_map(|e| elision_len(chunk, e))
                .filter(|n| *n < chunk.len());
        };

        (len < chunk.len()).then_some(len)
    }

    /// Byte length of a suffix at the end of `chunk`, if any. Never
    /// consumes the whole chunk.
    pub fn suffix_len(&self, chunk: &str) -> Option<usize> {
        let mut rev = chunk.chars().rev();
        let last = rev.next()?;
        let prev = rev.next();
        let prev2 = rev.next();

        let len = if let Some(p) = POSSESSIVES.iter().find(|p| chunk.ends_with(**p)) {
            p.len()
        } else if last == '.' && prev == Some('.') {
            chunk.chars().rev().take_while(|c| *c == '.').count()
        } else if PUNCT.contains(&last) || is_quote(last) || SUFFIX_EXTRA.contains(&last) {
            last.len_utf8()
        } else if last == '.' {
            let splits = prev.is_some_and(|p| {
                p.is_numeric()
                    || p.is_lowercase()
                    || matches!(p, '%' | '²' | '-' | '+')
                    || is_quote(p)
            }) || (prev.is_some_and(char::is_uppercase) && prev2.is_some_and(char::is_uppercase));
            if !splits {
                return None;
            }
            1
        } else if (last == '+' || CURRENCY.contains(&last)) && prev.is_some_and(|p| p.is_ascii_digit()) {
            last.len_utf8()
        } else if let Some(caps) = self.re_unit.captures(chunk) {
            caps.get(1).map(|m| chunk.len() - m.start())?
        } else {
            return None;
        };

        (len < chunk.len()).then_some(len)
    }

    /// Byte ranges of infixes in `chunk`, left to right, non-overlapping.
    pub fn infixes(&self, chunk: &str) -> Vec<(usize, usize)> {
        let chars: Vec<(usize, char)> = chunk.char_indices().collect();
        let byte_at = |i: usize| chars.get(i).map_or(chunk.len(), |(b, _)| *b);
        let mut ranges = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let prev = i.checked_sub(1).map(|p| chars[p].1);
            match infix_at(&chars, i, prev, chunk) {
                Some(n) => {
                    ranges.push((byte_at(i), byte_at(i + n)));
                    i += n;
                }
                None => i += 1,
            }
        }

        ranges
    }
}

/// Number of chars of the infix starting at char `i`, if one starts there.
fn infix_at(chars: &[(usize, char)], i: usize, prev: Option<char>, chunk: &str) -> Option<usize> {
    let c = chars[i].1;
    let next_after = |n: usize| chars.get(i + n).map(|(_, c)| *c);

    if c == '.' {
        let dots = chars[i..].iter().take_while(|(_, c)| *c == '.').count();
        if dots >= 2 {
            return Some(dots);
        }
        let before = prev.is_some_and(|p| p.is_lowercase() || is_quote(p));
        let after = next_after(1).is_some_and(|n| n.is_uppercase() || is_quote(n));
        return (before && after).then_some(1);
    }

    if c == '…' {
        return Some(1);
    }

    let prev_digit = prev.is_some_and(|p| p.is_ascii_digit());
    if matches!(c, '+' | '-' | '*' | '^')
        && prev_digit
        && next_after(1).is_some_and(|n| n.is_ascii_digit() || n == '-')
    {
        return Some(1);
    }

    let prev_alnum = prev.is_some_and(is_alnum);
    let rest = &chunk[chars[i].0..];
    if let Some(h) = HYPHENS.iter().find(|h| rest.starts_with(**h)) {
        let n = h.chars().count();
        if prev_alnum && next_after(n).is_some_and(char::is_alphabetic) {
            return Some(n);
        }
        return None;
    }

    let next_alpha = next_after(1).is_some_and(char::is_alphabetic);
    if c == ',' && prev.is_some_and(char::is_alphabetic) && next_alpha {
        return Some(1);
    }
    if matches!(c, ':' | '<' | '>' | '=' | '/') && prev_alnum && next_alpha {
        return Some(1);
    }

    None
}

/// Byte length of `elision` at the start of `chunk`, compared case-insensitively
/// with `'` and `’` treated as the same apostrophe. The rest must start with a letter.
fn elision_len(chunk: &str, elision: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut chars = chunk.chars();
    for expected in elision.chars() {
        let c = chars.next()?;
        let same = if expected == '\'' {
            c == '\'' || c == '’'
        } else {
            c.to_lowercase().eq(expected.to_lowercase())
        };
        if !same {
            return None;
        }
        consumed += c.len_utf8();
    }
    chars.next().filter(|c| c.is_alphabetic()).map(|_| consumed)
}
