//! Human-readable violation reports
//!
//! Renders one top-level violation tree as
//!
//! ```text
//! An instance of RootRecord has failed the validation:
//!  - property nested.items[0].name has failed the following constraints: minLength
//! ```
//!
//! Rendering is generic over [`ReportNode`] so any tree with the same shape
//! (such as the gate's own violation nodes) formats identically.

use indexmap::IndexMap;

/// A node that can be rendered into a violation report
pub trait ReportNode: Sized {
    /// Short type name of the owning record, if captured
    fn target_name(&self) -> Option<&str>;
    /// Field name, index or key
    fn property(&self) -> &str;
    /// Failed constraints, if this node has any
    fn constraints(&self) -> Option<&IndexMap<String, String>>;
    /// Nested nodes
    fn children(&self) -> &[Self];
}

/// Report rendering style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStyle {
    /// Wrap paths and constraint lists in ANSI bold
    pub decorate: bool,
    /// List constraint messages instead of constraint names
    pub show_messages: bool,
}

impl ReportStyle {
    /// Plain style: no ANSI codes, constraint names
    #[inline]
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// With ANSI decoration
    #[inline]
    #[must_use]
    pub fn decorated(mut self) -> Self {
        self.decorate = true;
        self
    }

    /// With messages instead of names
    #[inline]
    #[must_use]
    pub fn with_messages(mut self) -> Self {
        self.show_messages = true;
        self
    }

    fn bold(self) -> (&'static str, &'static str) {
        if self.decorate {
            ("\x1b[1m", "\x1b[22m")
        } else {
            ("", "")
        }
    }
}

/// Render a top-level node and everything below it
pub fn render<N: ReportNode>(node: &N, style: ReportStyle) -> String {
    let (start, end) = style.bold();
    let mut out = format!(
        "An instance of {start}{}{end} has failed the validation:\n",
        node.target_name().unwrap_or("an object")
    );

    if let Some(constraints) = node.constraints() {
        out.push_str(&failed_line(constraints, "", node.property(), style));
    }
    for child in node.children() {
        render_child(child, node.property(), style, &mut out);
    }
    out
}

fn render_child<N: ReportNode>(node: &N, parent_path: &str, style: ReportStyle, out: &mut String) {
    let property = node.property();
    let formatted = if property.parse::<i64>().is_ok() {
        format!("[{property}]")
    } else if parent_path.is_empty() {
        property.to_string()
    } else {
        format!(".{property}")
    };

    if let Some(constraints) = node.constraints() {
        out.push_str(&failed_line(constraints, parent_path, &formatted, style));
        return;
    }

    let path = format!("{parent_path}{formatted}");
    for child in node.children() {
        render_child(child, &path, style, out);
    }
}

fn failed_line(
    constraints: &IndexMap<String, String>,
    parent_path: &str,
    property: &str,
    style: ReportStyle,
) -> String {
    let (start, end) = style.bold();
    let listed = if style.show_messages {
        constraints.values().map(String::as_str).collect::<Vec<_>>().join(", ")
    } else {
        constraints.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    };
    format!(
        " - property {start}{parent_path}{property}{end} has failed the following constraints: {start}{listed}{end} \n"
    )
}
