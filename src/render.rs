//! ASCII tree rendering for field trees and heading outlines.

use compdoc_core::models::{Field, Heading};

const REQUIRED: char = '●';
const OPTIONAL: char = '○';

/// Get the marker for a field.
fn required_symbol(field: &Field) -> char {
    if field.is_required() {
        REQUIRED
    } else {
        OPTIONAL
    }
}

/// Render a source's fields, sorted by name, as an ASCII tree.
///
/// Example output:
/// ```text
/// http
/// ├── ● address (string)
/// ├── ○ encoding (string)
/// └── ○ tls (table)
///     ├── ○ ca_path (string)
///     └── ○ verify (bool)
/// ```
pub fn render_fields(root: &str, fields: &[Field]) -> String {
    let mut output = String::new();
    output.push_str(root);
    output.push('\n');
    let refs: Vec<&Field> = fields.iter().collect();
    render_field_children(&mut output, &refs, "");
    output
}

fn render_field_children(output: &mut String, fields: &[&Field], prefix: &str) {
    for (i, field) in fields.iter().enumerate() {
        let is_last = i == fields.len() - 1;
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
        output.push(required_symbol(field));
        output.push(' ');
        output.push_str(field.name());
        output.push_str(" (");
        output.push_str(field.kind());
        output.push_str(")\n");

        let continuation = if is_last { "    " } else { "│   " };
        let child_prefix = format!("{}{}", prefix, continuation);
        render_field_children(output, &field.sorted_fields(), &child_prefix);
    }
}

/// Render a page's heading tree as an indented outline.
///
/// Example output:
/// ```text
/// Configuration
/// ├── host
/// └── port
/// How It Works
/// ```
pub fn render_outline(headings: &[Heading]) -> String {
    let mut output = String::new();
    for heading in headings {
        render_heading(&mut output, heading, "", false, true);
    }
    output
}

/// Recursively render a heading and its children.
fn render_heading(
    output: &mut String,
    heading: &Heading,
    prefix: &str,
    is_last: bool,
    is_root: bool,
) {
    if is_root {
        output.push_str(&heading.value);
        output.push('\n');
    } else {
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
        output.push_str(&heading.value);
        output.push('\n');
    }

    let child_prefix = if is_root {
        String::new()
    } else {
        let continuation = if is_last { "    " } else { "│   " };
        format!("{}{}", prefix, continuation)
    };

    for (i, child) in heading.children.iter().enumerate() {
        let child_is_last = i == heading.children.len() - 1;
        render_heading(output, child, &child_prefix, child_is_last, false);
    }
}
