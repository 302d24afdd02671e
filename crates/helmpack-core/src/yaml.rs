//! YAML 1.1 loading for values files
//!
//! Helm reads values with YAML 1.1 rules: `yes`/`off` are booleans and
//! `0644` is an octal integer. serde_yaml resolves scalars with 1.2 rules
//! and forgets whether a scalar was quoted, so documents are built here from
//! parser events instead. Only plain scalars are resolved; quoted and block
//! scalars stay strings.

use regex::Regex;
use serde_yaml::{Mapping, Number, Value};
use std::collections::HashMap;
use std::sync::LazyLock;
use yaml_rust2::parser::{Event, EventReceiver, Parser};
use yaml_rust2::scanner::TScalarStyle;

static INT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?0b[0-1_]+|[-+]?0[0-7_]+|[-+]?(?:0|[1-9][0-9_]*)|[-+]?0x[0-9a-fA-F_]+|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
    )
    .expect("valid regex")
});

static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?[0-9][0-9_]*\.[0-9_]*(?:[eE][-+][0-9]+)?|\.[0-9_]+(?:[eE][-+][0-9]+)?|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
    )
    .expect("valid regex")
});

/// Parse the first document of `content`
///
/// Anchors are expanded and `<<` merge keys applied. An empty stream is
/// `Null`. Errors are returned as the parser's message.
pub fn parse(content: &str) -> Result<Value, String> {
    let mut builder = Builder::default();
    let mut parser = Parser::new_from_str(content);
    parser
        .load(&mut builder, false)
        .map_err(|e| e.to_string())?;

    let mut value = builder.docs.into_iter().next().unwrap_or(Value::Null);
    value.apply_merge().map_err(|e| e.to_string())?;
    Ok(value)
}

/// Resolve a plain scalar with the YAML 1.1 implicit types
pub fn resolve_plain(text: &str) -> Value {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => return Value::Null,
        "yes" | "Yes" | "YES" | "true" | "True" | "TRUE" | "on" | "On" | "ON" => {
            return Value::Bool(true);
        }
        "no" | "No" | "NO" | "false" | "False" | "FALSE" | "off" | "Off" | "OFF" => {
            return Value::Bool(false);
        }
        _ => {}
    }

    if INT.is_match(text) {
        if let Some(number) = parse_int(text) {
            return Value::Number(number);
        }
    } else if FLOAT.is_match(text) {
        if let Some(float) = parse_float(text) {
            return Value::Number(Number::from(float));
        }
    }

    Value::String(text.to_string())
}

/// Integers beyond 64 bits are left as strings
fn parse_int(text: &str) -> Option<Number> {
    let cleaned = text.replace('_', "");
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };

    let magnitude = if let Some(bin) = digits.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()?
    } else if let Some(hex) = digits.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()?
    } else if digits.contains(':') {
        digits.split(':').try_fold(0u64, |acc, part| {
            acc.checked_mul(60)?.checked_add(part.parse::<u64>().ok()?)
        })?
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<u64>().ok()?
    };

    if negative {
        Some(Number::from(-i64::try_from(magnitude).ok()?))
    } else {
        Some(Number::from(magnitude))
    }
}

fn parse_float(text: &str) -> Option<f64> {
    let cleaned = text.replace('_', "").to_ascii_lowercase();
    let (sign, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };

    let magnitude = match body {
        ".inf" => f64::INFINITY,
        ".nan" => return Some(f64::NAN),
        _ if body.contains(':') => body.split(':').try_fold(0.0, |acc, part| {
            part.parse::<f64>().ok().map(|p| acc * 60.0 + p)
        })?,
        _ => body.parse::<f64>().ok()?,
    };
    Some(sign * magnitude)
}

/// A collection still being filled, with its anchor id (0 = none)
enum Node {
    Sequence(Vec<Value>, usize),
    Mapping(Mapping, Option<Value>, usize),
}

#[derive(Default)]
struct Builder {
    stack: Vec<Node>,
    docs: Vec<Value>,
    anchors: HashMap<usize, Value>,
}

impl Builder {
    fn insert(&mut self, value: Value, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, value.clone());
        }
        match self.stack.last_mut() {
            None => self.docs.push(value),
            Some(Node::Sequence(items, _)) => items.push(value),
            Some(Node::Mapping(map, pending_key, _)) => match pending_key.take() {
                None => *pending_key = Some(value),
                Some(key) => {
                    map.insert(key, value);
                }
            },
        }
    }
}

impl EventReceiver for Builder {
    fn on_event(&mut self, event: Event) {
        match event {
            Event::Scalar(text, style, anchor, ..) => {
                let value = if matches!(style, TScalarStyle::Plain) {
                    resolve_plain(&text)
                } else {
                    Value::String(text.to_string())
                };
                self.insert(value, anchor);
            }
            Event::SequenceStart(anchor, ..) => {
                self.stack.push(Node::Sequence(Vec::new(), anchor));
            }
            Event::MappingStart(anchor, ..) => {
                self.stack.push(Node::Mapping(Mapping::new(), None, anchor));
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let (value, anchor) = match self.stack.pop() {
                    Some(Node::Sequence(items, anchor)) => (Value::Sequence(items), anchor),
                    Some(Node::Mapping(map, _, anchor)) => (Value::Mapping(map), anchor),
                    None => return,
                };
                self.insert(value, anchor);
            }
            Event::Alias(id) => {
                let value = self.anchors.get(&id).cloned().unwrap_or(Value::Null);
                self.insert(value, 0);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(s: &str) -> Value {
        parse(s).unwrap()
    }

    #[test]
    fn test_yaml11_booleans() {
        let v = doc("enabled: yes\ndebug: off\nstrict: On\nflag: true\nname: on-call\n");

        assert_eq!(v["enabled"], Value::Bool(true));
        assert_eq!(v["debug"], Value::Bool(false));
        assert_eq!(v["strict"], Value::Bool(true));
        assert_eq!(v["flag"], Value::Bool(true));
        assert_eq!(v["name"].as_str(), Some("on-call"));
    }

    #[test]
    fn test_yaml11_integers() {
        let v = doc("mode: 0644\nhex: 0x1F\nbin: 0b101\nbig: 1_000\nneg: -12\nzero: 0\ntime: 1:30\n");

        assert_eq!(v["mode"].as_i64(), Some(420));
        assert_eq!(v["hex"].as_i64(), Some(31));
        assert_eq!(v["bin"].as_i64(), Some(5));
        assert_eq!(v["big"].as_i64(), Some(1000));
        assert_eq!(v["neg"].as_i64(), Some(-12));
        assert_eq!(v["zero"].as_i64(), Some(0));
        assert_eq!(v["time"].as_i64(), Some(90));
    }

    #[test]
    fn test_yaml11_floats_and_strings() {
        let v = doc("ratio: 1.5\nhalf: .5\nsci: 1e3\nexp: 1.0e+3\ninf: -.inf\nnotoctal: 08\nversion: 1.2.3\n");

        assert_eq!(v["ratio"].as_f64(), Some(1.5));
        assert_eq!(v["half"].as_f64(), Some(0.5));
        assert_eq!(v["sci"].as_str(), Some("1e3"));
        assert_eq!(v["exp"].as_f64(), Some(1000.0));
        assert_eq!(v["inf"].as_f64(), Some(f64::NEG_INFINITY));
        assert_eq!(v["notoctal"].as_str(), Some("08"));
        assert_eq!(v["version"].as_str(), Some("1.2.3"));
    }

    #[test]
    fn test_quoted_scalars_stay_strings() {
        let v = doc("mode: '0644'\nenabled: \"yes\"\nnote: |\n  0644\n");

        assert_eq!(v["mode"].as_str(), Some("0644"));
        assert_eq!(v["enabled"].as_str(), Some("yes"));
        assert_eq!(v["note"].as_str(), Some("0644\n"));
    }

    #[test]
    fn test_nulls() {
        let v = doc("a:\nb: ~\nc: null\n");

        assert!(v["a"].is_null());
        assert!(v["b"].is_null());
        assert!(v["c"].is_null());
    }

    #[test]
    fn test_anchors_and_merge_keys() {
        let v = doc(
            "base: &base\n  image: nginx\n  port: 80\nweb:\n  <<: *base\n  port: 8080\nlist: &l [1, 2]\ncopy: *l\n",
        );

        assert_eq!(v["web"]["image"].as_str(), Some("nginx"));
        assert_eq!(v["web"]["port"].as_i64(), Some(8080));
        assert!(v["web"].get("<<").is_none());
        assert_eq!(v["copy"], v["list"]);
    }

    #[test]
    fn test_nested_sequences_of_mappings() {
        let v = doc("items:\n  - name: a\n    on: yes\n  - [x, 0o17]\n");

        assert_eq!(v["items"][0]["name"].as_str(), Some("a"));
        assert_eq!(v["items"][1][1].as_str(), Some("0o17"));
    }

    #[test]
    fn test_empty_stream_is_null() {
        assert!(doc("").is_null());
        assert!(doc("# only a comment\n").is_null());
    }

    #[test]
    fn test_syntax_error() {
        assert!(parse("key: [unclosed\n").is_err());
    }
}
