/// Collapses runs of blank lines in aggregated text
///
/// A blank line is a line that is empty or contains only whitespace. Every
/// run of two or more consecutive blank lines is replaced by a single empty
/// line; all other lines are kept byte-for-byte, including a lone blank line.
///
/// The transform is idempotent: normalizing normalized text is a no-op.
///
/// # Examples
///
/// ```
/// use docs_mirror::text::normalize;
///
/// assert_eq!(
///     normalize("Line 1\n\n\n\nLine 2\n\n\nLine 3"),
///     "Line 1\n\nLine 2\n\nLine 3"
/// );
/// ```
pub fn normalize(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            blank_run.push(line);
            continue;
        }
        flush_blank_run(&mut blank_run, &mut lines);
        lines.push(line);
    }
    flush_blank_run(&mut blank_run, &mut lines);

    lines.join("\n")
}

fn flush_blank_run<'a>(run: &mut Vec<&'a str>, lines: &mut Vec<&'a str>) {
    match run.len() {
        0 => {}
        1 => lines.push(run[0]),
        _ => lines.push(""),
    }
    run.clear();
}
