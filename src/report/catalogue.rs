//! Plain-text catalogue of distinct exception texts.

/// Render the catalogue file: a header block, a blank line, then one
/// entry per line in the order given.
pub fn render_catalogue(texts: &[String], generated_at: &str) -> String {
    let mut out = String::with_capacity(128 + texts.iter().map(|t| t.len() + 1).sum::<usize>());
    out.push_str("Unique Exception Texts\n");
    out.push_str("=====================\n");
    out.push_str(&format!("Generated on: {}\n", generated_at));
    out.push_str(&format!("Total unique exception texts found: {}\n", texts.len()));
    out.push('\n');
    for text in texts {
        out.push_str(text);
        out.push('\n');
    }
    out
}
