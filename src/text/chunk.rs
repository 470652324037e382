/// Separator used both to split text into lines and to re-join chunks
pub const LINE_SEPARATOR: &str = "\n";

/// Counts whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits text into line-aligned chunks of at most `max_words` words
///
/// Lines are accumulated greedily: a chunk is closed as soon as adding the
/// next line would push it over `max_words`, and the next chunk starts with
/// that line. A line is never split, so a single line longer than the bound
/// is emitted as a chunk of its own. Text that already fits is returned as
/// one chunk equal to the input.
///
/// Joining the result with [`LINE_SEPARATOR`] reproduces `text` exactly.
/// A `max_words` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use docs_mirror::text::chunk;
///
/// let chunks = chunk("one two\nthree four\nfive", 2);
/// assert_eq!(chunks, vec!["one two", "three four", "five"]);
/// assert_eq!(chunks.join("\n"), "one two\nthree four\nfive");
/// ```
pub fn chunk(text: &str, max_words: usize) -> Vec<String> {
    let max_words = max_words.max(1);

    if word_count(text) <= max_words {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_words = 0;

    for line in text.split(LINE_SEPARATOR) {
        let words = word_count(line);

        if !current.is_empty() && current_words + words > max_words {
            chunks.push(current.join(LINE_SEPARATOR));
            current.clear();
            current_words = 0;
        }

        current.push(line);
        current_words += words;
    }

    // split() always yields at least one line, so the last chunk is never empty
    chunks.push(current.join(LINE_SEPARATOR));

    chunks
}

/// Name under which a chunk is stored
///
/// A single chunk keeps the plain name; multi-chunk output is suffixed with
/// its 1-based part index.
pub fn part_name(name: &str, index: usize, total: usize) -> String {
    if total <= 1 {
        name.to_string()
    } else {
        format!("{} - Part {}", name, index)
    }
}
