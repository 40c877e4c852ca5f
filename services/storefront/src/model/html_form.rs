use std::sync::OnceLock;

use regex::{Captures, Regex};

const DEFAULT_FORM_METHOD: &str = "GET";

/// Form extracted from the HTML page rendered by the payment gateway,
/// only the parts needed for submission are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFormModel {
    pub action: String,
    pub method: String,
    pub fields: Vec<(String, String)>,
}

// tag bodies are quote-aware, a raw `>` is valid inside attribute values
fn form_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<form\b((?:[^>"']|"[^"]*"|'[^']*')*)>(.*?)(?:</form\s*>|\z)"#).unwrap()
    })
}
fn input_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?is)<input\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#).unwrap())
}
fn attribute_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`/]+)))?"#,
        )
        .unwrap()
    })
}
fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap())
}

struct TagAttributes(Vec<(String, Option<String>)>);

impl TagAttributes {
    fn parse(raw: &str) -> Self {
        let pairs = attribute_regex()
            .captures_iter(raw)
            .filter_map(|cap| {
                let name = cap.get(1)?.as_str().to_lowercase();
                let value = cap
                    .get(2)
                    .or_else(|| cap.get(3))
                    .or_else(|| cap.get(4))
                    .map(|m| decode_html_entities(m.as_str()));
                Some((name, value))
            })
            .collect::<Vec<_>>();
        Self(pairs)
    }
    fn value(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .and_then(|(_, v)| v.as_deref())
    }
    fn has(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k.as_str() == name)
    }
}

pub fn decode_html_entities(raw: &str) -> String {
    let out = entity_regex().replace_all(raw, |cap: &Captures| {
        let ent = &cap[1];
        let decoded = if let Some(hex) = ent.strip_prefix("#x").or(ent.strip_prefix("#X")) {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = ent.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            match ent {
                "quot" => Some('"'),
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _others => None,
            }
        };
        match decoded {
            Some(c) => c.to_string(),
            None => cap[0].to_string(),
        }
    });
    out.into_owned()
}

impl HtmlFormModel {
    /// The first `<form>` of the document, `None` if the document has none
    pub fn first_in(html: &str) -> Option<Self> {
        let cap = form_regex().captures(html)?;
        let form_attrs = TagAttributes::parse(cap.get(1).map_or("", |m| m.as_str()));
        let inner = cap.get(2).map_or("", |m| m.as_str());
        let action = form_attrs.value("action").unwrap_or("").to_string();
        let method = form_attrs
            .value("method")
            .map(|m| m.to_uppercase())
            .filter(|m| m == "POST" || m == "GET")
            .unwrap_or(DEFAULT_FORM_METHOD.to_string());
        let fields = input_regex()
            .captures_iter(inner)
            .filter_map(|c| {
                let attrs = TagAttributes::parse(c.get(1).map_or("", |m| m.as_str()));
                Self::successful_control(&attrs)
            })
            .collect::<Vec<_>>();
        Some(Self {
            action,
            method,
            fields,
        })
    }

    // controls which a browser would include when the form is submitted
    // programmatically, there is no submitter in such case
    fn successful_control(attrs: &TagAttributes) -> Option<(String, String)> {
        let name = attrs.value("name").filter(|n| !n.is_empty())?;
        if attrs.has("disabled") {
            return None;
        }
        let ctype = attrs.value("type").unwrap_or("text").to_lowercase();
        match ctype.as_str() {
            "submit" | "button" | "image" | "reset" | "file" => None,
            "checkbox" | "radio" if !attrs.has("checked") => None,
            "checkbox" | "radio" => {
                let v = attrs.value("value").unwrap_or("on");
                Some((name.to_string(), v.to_string()))
            }
            _others => {
                let v = attrs.value("value").unwrap_or("");
                Some((name.to_string(), v.to_string()))
            }
        }
    }
} // end of impl HtmlFormModel
