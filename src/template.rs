//! `.env` example generation from field descriptors.
//!
//! The output is itself a valid fallback file: parsing it yields every
//! declared default. A default the format cannot hold, such as one with a line
//! break, is written as a commented-out line instead.

use crate::dotenv;
use crate::field::Field;

/// Render one commented block per field, in declaration order.
pub fn render<C>(fields: &[Field<C>]) -> String {
    let mut out = String::new();

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if let Some(doc) = &field.doc {
            out.push_str(&format!("# {doc}\n"));
        }
        if field.required {
            if field.allow_empty {
                out.push_str("# required, may be empty\n");
            } else {
                out.push_str("# required\n");
            }
        }
        match (&field.default, field.required) {
            (Some(default), _) => match quote(default) {
                Some(quoted) => out.push_str(&format!("{}={quoted}\n", field.key)),
                None => out.push_str(&format!(
                    "# default cannot be written in a .env file\n# {}=\n",
                    field.key
                )),
            },
            (None, true) => out.push_str(&format!("{}=\n", field.key)),
            (None, false) => out.push_str(&format!("# {}=\n", field.key)),
        }
    }

    out
}

/// The first spelling of `value` (bare, double-quoted, single-quoted) that
/// the fallback parser reads back unchanged.
fn quote(value: &str) -> Option<String> {
    if value.contains(['\n', '\r']) {
        return None;
    }
    [
        value.to_string(),
        format!("\"{value}\""),
        format!("'{value}'"),
    ]
    .into_iter()
    .find(|candidate| dotenv::parse_value(candidate) == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dotenv::FallbackMap;
    use crate::fixtures::test::{TestConfig, test_fields};
    use std::path::Path;

    #[test]
    fn renders_blocks() {
        let out = render(&test_fields());
        assert!(out.starts_with("# The application host.\n# required\nHOST=\n"));
        assert!(out.contains("# The port number.\nPORT=8080\n"));
        assert!(out.contains("\nTIMEOUT=5s\n"));
        assert!(out.ends_with("\n# TOKEN=\n"));
    }

    #[test]
    fn required_allow_empty_annotation() {
        let fields = vec![
            Field::new("SUFFIX", |c: &mut TestConfig, v: String| c.host = v)
                .required()
                .allow_empty(),
        ];
        assert_eq!(render(&fields), "# required, may be empty\nSUFFIX=\n");
    }

    #[test]
    fn template_parses_back_to_defaults() {
        let fields = vec![
            Field::new("PLAIN", |c: &mut TestConfig, v: String| c.host = v).default("value"),
            Field::new("SPACED", |c: &mut TestConfig, v: String| c.host = v).default("My App"),
            Field::new("HASH", |c: &mut TestConfig, v: String| c.host = v).default("a #b"),
            Field::new("PADDED", |c: &mut TestConfig, v: String| c.host = v).default("  x  "),
            Field::new("DQ", |c: &mut TestConfig, v: String| c.host = v).default("say \"hi\""),
            Field::new("SQ", |c: &mut TestConfig, v: String| c.host = v).default("it's"),
            Field::new("EMPTY", |c: &mut TestConfig, v: String| c.host = v).default(""),
            Field::new("BOTH", |c: &mut TestConfig, v: String| c.host = v).default("\"x'\""),
            Field::new("WRAPPED", |c: &mut TestConfig, v: String| c.host = v).default("'a'"),
            Field::new("UNSET", |c: &mut TestConfig, v: String| c.host = v),
        ];
        let out = render(&fields);
        let map = FallbackMap::parse(&out, Path::new("template.env")).unwrap();

        for field in &fields {
            assert_eq!(
                map.get(field.key()),
                field.default_value(),
                "round trip of {}",
                field.key()
            );
        }
    }

    #[test]
    fn multiline_default_is_commented_out() {
        let fields = vec![
            Field::new("MULTI", |c: &mut TestConfig, v: String| c.host = v)
                .default("line1\nline2"),
        ];
        let out = render(&fields);
        assert_eq!(
            out,
            "# default cannot be written in a .env file\n# MULTI=\n"
        );
        let map = FallbackMap::parse(&out, Path::new("template.env")).unwrap();
        assert_eq!(map.get("MULTI"), None);
        assert!(map.is_empty());
    }

    #[test]
    fn quote_choices() {
        assert_eq!(quote("plain").as_deref(), Some("plain"));
        assert_eq!(quote("a #b").as_deref(), Some("\"a #b\""));
        assert_eq!(quote("say \"hi\"").as_deref(), Some("say \"hi\""));
        assert_eq!(quote("'a'").as_deref(), Some("\"'a'\""));
        assert_eq!(quote("\"x'\"").as_deref(), Some("\"\"x'\"\""));
        assert_eq!(quote("").as_deref(), Some(""));
        assert_eq!(quote("a\r\nb"), None);
    }
}
