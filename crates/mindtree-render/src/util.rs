use std::fmt::Write as _;

/// Writes a number for an SVG attribute: no `-0`, no float noise from our own arithmetic.
pub(crate) fn fmt_into(out: &mut String, v: f64) {
    let _ = write!(out, "{}", fmt_display(v));
}

pub(crate) fn fmt_display(v: f64) -> FmtDisplay {
    FmtDisplay(v)
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FmtDisplay(f64);

impl std::fmt::Display for FmtDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut v = self.0;
        if !v.is_finite() {
            return f.write_str("0");
        }

        if v.abs() < 1e-9 {
            v = 0.0;
        }
        let nearest = v.round();
        if (v - nearest).abs() < 1e-6 {
            v = nearest;
        }
        if v == -0.0 {
            v = 0.0;
        }

        write!(f, "{v}")
    }
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

/// Turns an arbitrary string into an SVG `id` token that is safe to use as a CSS selector
/// prefix: unsupported characters become `-`, and the id always starts with a letter.
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "mindmap".to_string();
    }

    let mut out = String::with_capacity(raw.len() + 3);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }

    if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
        out.insert_str(0, "m-");
    }
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_end_matches('-');
    if out.is_empty() || out == "m" {
        return "mindmap".to_string();
    }
    out.to_string()
}
