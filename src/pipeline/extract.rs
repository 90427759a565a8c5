//! The four-strategy extraction ladder plus the always-succeeds fallback
//! (spec §4.3.1).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::{Relation, Semantic};

static FENCED_SEMANTIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```semantic\s*(.*?)```").unwrap());

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)```").unwrap());

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "with",
    "this", "that", "from", "here", "there", "what", "when", "where", "which", "about",
];

/// Entry point for the extraction ladder. Always returns `Some` unless the
/// fallback synthesis itself turns up zero usable tokens (spec §4.3.1).
pub fn extract(text: &str) -> Option<Semantic> {
    if let Some(semantic) = extract_fenced_semantic(text) {
        return Some(semantic);
    }
    if let Some(semantic) = extract_fenced_json(text) {
        return Some(semantic);
    }
    if let Some(semantic) = extract_bare_expression(text) {
        return Some(semantic);
    }
    fallback_semantic(text)
}

/// Strategies 1+2: a fenced ```semantic block. The regex is `(?s)` (dot
/// matches newline) and non-greedy, so it matches both the well-formed
/// multi-line fence and the inline variant whose closing fence follows the
/// content directly with no trailing newline.
fn extract_fenced_semantic(text: &str) -> Option<Semantic> {
    let caps = FENCED_SEMANTIC.captures(text)?;
    let body = caps.get(1)?.as_str();
    let value = parse_edn_like(body)?;
    value_to_semantic(&value)
}

/// Strategy 3: a ```json block whose content contains a `"concepts"` key.
fn extract_fenced_json(text: &str) -> Option<Semantic> {
    let caps = FENCED_JSON.captures(text)?;
    let body = caps.get(1)?.as_str();
    let value: Value = serde_json::from_str(body).ok()?;
    if value.get("concepts").is_none() {
        return None;
    }
    value_to_semantic(&value)
}

/// Strategy 4: a bare `{concepts: [...] …}` expression anywhere in the text.
fn extract_bare_expression(text: &str) -> Option<Semantic> {
    let bytes = text.as_bytes();
    let mut idx = 0;
    while let Some(start_rel) = text[idx..].find('{') {
        let start = idx + start_rel;
        if let Some(end) = matching_brace(bytes, start) {
            let candidate = &text[start..=end];
            if candidate.contains("concepts") {
                if let Some(value) = parse_edn_like(candidate) {
                    if let Some(semantic) = value_to_semantic(&value) {
                        return Some(semantic);
                    }
                }
            }
            idx = end + 1;
        } else {
            break;
        }
    }
    None
}

/// Index of the `}` matching the `{` at `start`, respecting quoted strings.
fn matching_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut i = start;
    while i < bytes.len() {
        let c = bytes[i];
        if in_string {
            if c == b'\\' {
                i += 1;
            } else if c == b'"' {
                in_string = false;
            }
        } else {
            match c {
                b'"' => in_string = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Strips code fences, lowercases, tokenizes on whitespace, drops stopwords
/// and short tokens, and forms a hub→spokes `resembles` fan-out (spec
/// §4.3.1). This is the pipeline's total fallback.
fn fallback_semantic(text: &str) -> Option<Semantic> {
    let stripped = text.replace("```", " ");
    let lower = stripped.to_lowercase();
    let tokens: Vec<String> = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| w.len() >= 3 && !STOPWORDS.contains(w))
        .map(|w| w.to_string())
        .collect();

    let mut distinct = Vec::new();
    for t in tokens {
        if !distinct.contains(&t) {
            distinct.push(t);
        }
    }
    distinct.truncate(8);

    if distinct.is_empty() {
        return None;
    }

    let hub = distinct[0].clone();
    let relations = distinct
        .iter()
        .skip(1)
        .take(4)
        .map(|spoke| Relation {
            rel_type: "resembles".to_string(),
            a: hub.clone(),
            b: spoke.clone(),
        })
        .collect();

    Some(Semantic::fallback(distinct, relations))
}

/// Converts a parsed JSON-ish value (from either the EDN-like parser or
/// plain `serde_json`) into the canonical `Semantic` shape.
fn value_to_semantic(value: &Value) -> Option<Semantic> {
    let concepts: Vec<String> = value
        .get("concepts")?
        .as_array()?
        .iter()
        .filter_map(|v| v.as_str().map(|s| s.to_string()))
        .collect();

    let relations: Vec<Relation> = value
        .get("relations")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|r| {
                    let rel_type = r.get("type")?.as_str()?.to_string();
                    let a = r.get("a")?.as_str()?.to_string();
                    let b = r.get("b")?.as_str()?.to_string();
                    Some(Relation { rel_type, a, b })
                })
                .collect()
        })
        .unwrap_or_default();

    let intent = value.get("intent").cloned();
    let confidence = value.get("confidence").and_then(|v| v.as_f64());

    Some(Semantic {
        concepts,
        relations,
        intent,
        confidence,
    })
}

/// A small recursive-descent reader for the EDN-lite subset producers emit
/// (spec §6): `:keyword` keys with no `:` separator before the value
/// (`{:concepts [...]}`), OR bareword/quoted keys with a `:` separator
/// (`{concepts: [...]}`). Commas are treated as whitespace, matching EDN.
fn parse_edn_like(src: &str) -> Option<Value> {
    let mut p = EdnParser {
        chars: src.chars().collect(),
        pos: 0,
    };
    p.skip_ws();
    p.parse_value()
}

struct EdnParser {
    chars: Vec<char>,
    pos: usize,
}

impl EdnParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace() || c == ',') {
            self.pos += 1;
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        self.skip_ws();
        match self.peek()? {
            '{' => self.parse_map(),
            '[' => self.parse_array(),
            '"' => self.parse_string().map(Value::String),
            ':' => {
                self.bump();
                let ident = self.read_token();
                Some(Value::String(ident))
            }
            _ => self.parse_scalar(),
        }
    }

    fn parse_map(&mut self) -> Option<Value> {
        self.bump(); // '{'
        let mut map = serde_json::Map::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                None => return None,
                _ => {}
            }
            let key = self.parse_key()?;
            self.skip_ws();
            if self.peek() == Some(':') {
                self.bump();
                self.skip_ws();
            }
            let value = self.parse_value()?;
            map.insert(key, value);
        }
        Some(Value::Object(map))
    }

    fn parse_array(&mut self) -> Option<Value> {
        self.bump(); // '['
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    break;
                }
                None => return None,
                _ => {}
            }
            items.push(self.parse_value()?);
        }
        Some(Value::Array(items))
    }

    fn parse_key(&mut self) -> Option<String> {
        match self.peek()? {
            ':' => {
                self.bump();
                Some(self.read_token())
            }
            '"' => self.parse_string(),
            _ => Some(self.read_token_until_colon()),
        }
    }

    fn parse_string(&mut self) -> Option<String> {
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            match self.bump()? {
                '"' => break,
                '\\' => {
                    if let Some(esc) = self.bump() {
                        out.push(esc);
                    }
                }
                c => out.push(c),
            }
        }
        Some(out)
    }

    fn parse_scalar(&mut self) -> Option<Value> {
        let token = self.read_token();
        if token.is_empty() {
            return None;
        }
        if let Ok(n) = token.parse::<f64>() {
            return serde_json::Number::from_f64(n).map(Value::Number);
        }
        match token.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            "nil" | "null" => Some(Value::Null),
            _ => Some(Value::String(token)),
        }
    }

    fn read_token(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | '{' | '}' | '[' | ']') {
                break;
            }
            out.push(c);
            self.pos += 1;
        }
        out
    }

    fn read_token_until_colon(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | '{' | '}' | '[' | ']' | ':') {
                break;
            }
            out.push(c);
            self.pos += 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_semantic_edn_block() {
        let text = "here is my answer\n```semantic\n{:concepts [\"coggy\" \"reasoning\"] :relations [{:type :inherits :a \"coggy\" :b \"reasoning\"}] :confidence 0.8}\n```";
        let s = extract(text).expect("semantic");
        assert_eq!(s.concepts, vec!["coggy", "reasoning"]);
        assert_eq!(s.relations.len(), 1);
        assert_eq!(s.relations[0].rel_type, "inherits");
        assert_eq!(s.confidence, Some(0.8));
    }

    #[test]
    fn extracts_fenced_json_block() {
        let text = "```json\n{\"concepts\": [\"a\", \"b\"], \"relations\": []}\n```";
        let s = extract(text).expect("semantic");
        assert_eq!(s.concepts, vec!["a", "b"]);
    }

    #[test]
    fn extracts_bare_expression() {
        let text = "no fences here but {concepts: [\"x\", \"y\"], relations: []} is embedded";
        let s = extract(text).expect("semantic");
        assert_eq!(s.concepts, vec!["x", "y"]);
    }

    #[test]
    fn falls_back_on_plain_prose() {
        let s = extract("the quick brown fox jumps over lazy dogs").expect("fallback");
        assert!(s.concepts.len() <= 8);
        assert_eq!(s.confidence, Some(0.35));
    }

    #[test]
    fn fallback_fails_on_degenerate_input() {
        assert!(extract("a an is").is_none());
    }
}
