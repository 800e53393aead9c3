use crate::dot::Value;

/// Format an attribute label.
///
/// A primary key is underlined. A weak entity's partial key (`is_weak` and
/// `is_pk`) underlines every other character, starting with the first, which
/// Graphviz renders as a dashed underline.
pub fn format_label(label: &str, is_weak: bool, is_pk: bool) -> Value {
    match (is_weak, is_pk) {
        (true, true) => {
            let mut html = String::new();
            for (i, ch) in label.chars().enumerate() {
                let escaped = escape_html(ch);
                if i % 2 == 0 {
                    html.push_str("<u>");
                    html.push_str(&escaped);
                    html.push_str("</u>");
                } else {
                    html.push_str(&escaped);
                }
            }
            Value::Html(html)
        }
        (false, true) => {
            let escaped: String = label.chars().map(escape_html).collect();
            Value::Html(format!("<U>{escaped}</U>"))
        }
        _ => Value::Text(label.to_string()),
    }
}

fn escape_html(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        _ => ch.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_label_unchanged() {
        assert_eq!(format_label("Sitz", false, false), Value::Text("Sitz".into()));
    }

    #[test]
    fn weak_without_pk_is_plain() {
        assert_eq!(format_label("Sitz", true, false), Value::Text("Sitz".into()));
    }

    #[test]
    fn pk_underlines_whole_label() {
        assert_eq!(format_label("X", false, true), Value::Html("<U>X</U>".into()));
        assert_eq!(format_label("X", false, true).to_string(), "<<U>X</U>>");
    }

    #[test]
    fn weak_pk_alternates_from_first_char() {
        assert_eq!(
            format_label("Nr", true, true),
            Value::Html("<u>N</u>r".into())
        );
        assert_eq!(
            format_label("abcde", true, true),
            Value::Html("<u>a</u>b<u>c</u>d<u>e</u>".into())
        );
    }

    #[test]
    fn weak_pk_counts_characters_not_bytes() {
        assert_eq!(
            format_label("äöü", true, true),
            Value::Html("<u>ä</u>ö<u>ü</u>".into())
        );
    }

    #[test]
    fn html_special_characters_escaped() {
        assert_eq!(
            format_label("a<b", false, true),
            Value::Html("<U>a&lt;b</U>".into())
        );
        assert_eq!(
            format_label("&x", true, true),
            Value::Html("<u>&amp;</u>x".into())
        );
    }
}
