//! Minimal HCL writer for variable and provider blocks

use std::collections::BTreeSet;
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// A value that can appear on the right-hand side of an HCL assignment.
///
/// `None` means the property is left out entirely.
pub trait HclValue {
    fn to_hcl(&self) -> Option<String>;
}

impl HclValue for str {
    fn to_hcl(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        // A lone `${expr}` is passed through as a bare expression; anything
        // holding more than one interpolation stays a quoted template.
        if let Some(expr) = self.strip_prefix("${").and_then(|s| s.strip_suffix('}'))
            && !expr.contains("${")
        {
            return Some(expr.to_string());
        }
        Some(quote(self))
    }
}

impl HclValue for String {
    fn to_hcl(&self) -> Option<String> {
        self.as_str().to_hcl()
    }
}

impl HclValue for bool {
    fn to_hcl(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl HclValue for u16 {
    fn to_hcl(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: HclValue> HclValue for Option<T> {
    fn to_hcl(&self) -> Option<String> {
        self.as_ref().and_then(HclValue::to_hcl)
    }
}

impl HclValue for BTreeSet<String> {
    fn to_hcl(&self) -> Option<String> {
        Some(display_list(self.iter().map(String::as_str)))
    }
}

/// Quote a string literal, escaping what HCL requires.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// `["a", "b"]`
pub fn display_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.into_iter().map(quote).collect();
    format!("[{}]", quoted.join(", "))
}

/// Provider version constraint: bare versions are pinned to the minor line.
pub fn version_constraint(version: &str) -> String {
    let version = version.trim();
    let has_operator = version.starts_with(['~', '>', '<', '=', '!']);
    if has_operator || version.is_empty() {
        version.to_string()
    } else {
        format!("~> {version}")
    }
}

/// Line-oriented writer tracking block nesting.
#[derive(Debug, Default)]
pub struct HclWriter {
    out: String,
    depth: usize,
}

impl HclWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `key = value`, skipped when the value renders to nothing.
    pub fn property<V: HclValue + ?Sized>(&mut self, key: &str, value: &V) -> fmt::Result {
        match value.to_hcl() {
            Some(rendered) => self.line(format_args!("{key} = {rendered}")),
            None => Ok(()),
        }
    }

    /// Like [`property`](Self::property), but an empty string is written as `""`.
    pub fn string_property(&mut self, key: &str, value: &str) -> fmt::Result {
        let rendered = value.to_hcl().unwrap_or_else(|| quote(value));
        self.line(format_args!("{key} = {rendered}"))
    }

    /// Write `header` and indent everything up to the matching [`close`](Self::close).
    pub fn open(&mut self, header: &str) -> fmt::Result {
        self.line(format_args!("{header}"))?;
        self.depth += 1;
        Ok(())
    }

    pub fn close(&mut self, closer: &str) -> fmt::Result {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("{closer}"))
    }

    fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str(INDENT)?;
        }
        self.out.write_fmt(args)?;
        self.out.write_char('\n')
    }

    pub fn finish(self) -> String {
        self.out
    }
}
