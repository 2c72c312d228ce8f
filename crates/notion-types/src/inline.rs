//! Styled text runs.
//!
//! On the wire a text property is a list of runs, each run a 1- or 2-element
//! array: `["plain"]` or `["styled", [["b"], ["a", "https://..."]]]`.

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Inline style annotation attached to a run.
#[derive(Debug, Clone, PartialEq)]
pub enum TextStyle {
    Bold,
    Italic,
    Strikethrough,
    Code,
    Underline,
    Link(String),
    /// Text or background color, e.g. `red` or `blue_background`
    Highlight(String),
    Equation(String),
    /// Mention of a user id
    User(String),
    /// Mention of a page id
    Page(String),
    Date(Value),
    Other { code: String, args: Vec<Value> },
}

impl TextStyle {
    fn from_wire(code: &str, mut args: Vec<Value>) -> Self {
        let first_str = |args: &[Value]| args.first().and_then(Value::as_str).map(str::to_string);
        match (code, first_str(&args)) {
            ("b", _) => Self::Bold,
            ("i", _) => Self::Italic,
            ("s", _) => Self::Strikethrough,
            ("c", _) => Self::Code,
            ("_", _) => Self::Underline,
            ("a", Some(url)) => Self::Link(url),
            ("h", Some(color)) => Self::Highlight(color),
            ("e", Some(expr)) => Self::Equation(expr),
            ("u", Some(id)) => Self::User(id),
            ("p", Some(id)) => Self::Page(id),
            ("d", _) if !args.is_empty() => Self::Date(args.swap_remove(0)),
            _ => Self::Other {
                code: code.to_string(),
                args,
            },
        }
    }

    fn to_wire(&self) -> Vec<Value> {
        let tagged = |code: &str, arg: &str| vec![Value::from(code), Value::from(arg)];
        match self {
            Self::Bold => vec![Value::from("b")],
            Self::Italic => vec![Value::from("i")],
            Self::Strikethrough => vec![Value::from("s")],
            Self::Code => vec![Value::from("c")],
            Self::Underline => vec![Value::from("_")],
            Self::Link(url) => tagged("a", url),
            Self::Highlight(color) => tagged("h", color),
            Self::Equation(expr) => tagged("e", expr),
            Self::User(id) => tagged("u", id),
            Self::Page(id) => tagged("p", id),
            Self::Date(date) => vec![Value::from("d"), date.clone()],
            Self::Other { code, args } => {
                let mut wire = vec![Value::from(code.as_str())];
                wire.extend(args.iter().cloned());
                wire
            }
        }
    }
}

/// One run of literal text plus its style annotations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineSpan {
    pub text: String,
    pub styles: Vec<TextStyle>,
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Vec::new(),
        }
    }

    pub fn has_style(&self, style: &TextStyle) -> bool {
        self.styles.contains(style)
    }

    /// Link target, if the run carries an `a` annotation.
    pub fn link(&self) -> Option<&str> {
        self.styles.iter().find_map(|s| match s {
            TextStyle::Link(url) => Some(url.as_str()),
            _ => None,
        })
    }
}

impl<'de> Deserialize<'de> for InlineSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut parts = Vec::<Value>::deserialize(deserializer)?;
        if parts.is_empty() || parts.len() > 2 {
            return Err(D::Error::custom(format!(
                "text run must have 1 or 2 elements, found {}",
                parts.len()
            )));
        }

        let styles = if parts.len() == 2 {
            match parts.pop() {
                Some(Value::Array(annotations)) => annotations
                    .into_iter()
                    .map(parse_annotation)
                    .collect::<Result<Vec<_>, String>>()
                    .map_err(D::Error::custom)?,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(D::Error::custom(format!(
                        "text run styles must be an array, found {}",
                        other
                    )))
                }
            }
        } else {
            Vec::new()
        };

        match parts.pop() {
            Some(Value::String(text)) => Ok(Self { text, styles }),
            Some(other) => Err(D::Error::custom(format!(
                "text run must start with a string, found {}",
                other
            ))),
            None => Err(D::Error::custom("empty text run")),
        }
    }
}

fn parse_annotation(annotation: Value) -> Result<TextStyle, String> {
    let mut items = match annotation {
        Value::Array(items) => items,
        other => return Err(format!("style annotation must be an array, found {}", other)),
    };
    if items.is_empty() {
        return Err("empty style annotation".to_string());
    }
    match items.remove(0) {
        Value::String(code) => Ok(TextStyle::from_wire(&code, items)),
        other => Err(format!("style code must be a string, found {}", other)),
    }
}

impl Serialize for InlineSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.styles.is_empty() { 1 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.text)?;
        if !self.styles.is_empty() {
            let wire: Vec<Vec<Value>> = self.styles.iter().map(TextStyle::to_wire).collect();
            seq.serialize_element(&wire)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decodes_plain_and_styled_runs() {
        let spans: Vec<InlineSpan> = serde_json::from_value(json!([
            ["Hello "],
            ["world", [["b"], ["a", "https://example.com"]]],
            ["!", [["h", "red"], ["zz", 1]]]
        ]))
        .unwrap();

        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("Hello "),
                InlineSpan {
                    text: "world".to_string(),
                    styles: vec![
                        TextStyle::Bold,
                        TextStyle::Link("https://example.com".to_string())
                    ],
                },
                InlineSpan {
                    text: "!".to_string(),
                    styles: vec![
                        TextStyle::Highlight("red".to_string()),
                        TextStyle::Other {
                            code: "zz".to_string(),
                            args: vec![json!(1)],
                        },
                    ],
                },
            ]
        );
        assert_eq!(spans[1].link(), Some("https://example.com"));
    }

    #[test]
    fn test_rejects_malformed_runs() {
        assert!(serde_json::from_value::<Vec<InlineSpan>>(json!([[]])).is_err());
        assert!(serde_json::from_value::<Vec<InlineSpan>>(json!([[42]])).is_err());
        assert!(serde_json::from_value::<Vec<InlineSpan>>(json!([["a", "b"]])).is_err());
        assert!(serde_json::from_value::<Vec<InlineSpan>>(json!("title")).is_err());
    }

    #[test]
    fn test_serializes_back_to_wire_shape() {
        let span = InlineSpan {
            text: "x".to_string(),
            styles: vec![TextStyle::Italic, TextStyle::Page("p1".to_string())],
        };
        assert_eq!(
            serde_json::to_value(&span).unwrap(),
            json!(["x", [["i"], ["p", "p1"]]])
        );
        assert_eq!(serde_json::to_value(InlineSpan::plain("y")).unwrap(), json!(["y"]));
    }

    #[test]
    fn test_null_styles_are_plain() {
        let spans: Vec<InlineSpan> = serde_json::from_value(json!([["plain", null]])).unwrap();
        assert_eq!(spans, vec![InlineSpan::plain("plain")]);
    }
}
