//! Strftime-subset rendering for schedule message templates.

use chrono::NaiveDate;

/// Date directives substituted by [`render_template`]. Anything outside this
/// set passes through as literal text so new template authors cannot break
/// existing runs.
const SUPPORTED_DIRECTIVES: &[char] = &[
    'Y', 'y', 'm', 'd', 'e', 'b', 'B', 'a', 'A', 'j', 'F',
];

/// Renders a message template against a reference date.
///
/// Supported strftime-style directives are substituted from the date, `%%`
/// emits a literal percent, and unknown directives (or a trailing lone `%`)
/// are kept verbatim. The result depends only on the inputs.
pub fn render_template(template: &str, reference_date: NaiveDate) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            rendered.push(ch);
            continue;
        }
        match chars.next() {
            Some('%') => rendered.push('%'),
            Some(directive) if SUPPORTED_DIRECTIVES.contains(&directive) => {
                let pattern = format!("%{directive}");
                rendered.push_str(&reference_date.format(&pattern).to_string());
            }
            Some(directive) => {
                rendered.push('%');
                rendered.push(directive);
            }
            None => rendered.push('%'),
        }
    }
    rendered
}
