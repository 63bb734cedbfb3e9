// Fixed-width layout of generated program text

/// Break `text` into lines of `width` characters, each ending in `\n`.
///
/// The last line holds whatever is left. Line breaks are not instructions,
/// so the result runs exactly like the input. A `width` of 0 puts
/// everything on one line.
pub fn wrap_lines(text: &str, width: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    if width == 0 {
        return format!("{}\n", text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / width + 1);
    let mut column = 0;
    for c in text.chars() {
        out.push(c);
        column += 1;
        if column == width {
            out.push('\n');
            column = 0;
        }
    }
    if column != 0 {
        out.push('\n');
    }
    out
}
