use crate::text::is_heading_line;

/// A contiguous slice of a document, either one heading line or the body
/// between two headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_heading: bool,
}

impl Segment {
    fn body(text: String) -> Self {
        Self {
            text,
            is_heading: false,
        }
    }

    /// Whether the segment carries anything worth sending to a service.
    pub fn is_rewritable(&self, min_chars: usize) -> bool {
        !self.is_heading && self.text.trim().chars().count() >= min_chars
    }
}

/// Split on heading lines. Concatenating the `text` of the result gives back
/// the input byte for byte, and `#` lines inside code fences are not headings.
pub fn split_on_headings(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut body = String::new();
    let mut in_fence = false;

    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        } else if !in_fence && is_heading_line(line.trim_end_matches(['\r', '\n'])) {
            if !body.is_empty() {
                segments.push(Segment::body(std::mem::take(&mut body)));
            }
            segments.push(Segment {
                text: line.to_string(),
                is_heading: true,
            });
            continue;
        }
        body.push_str(line);
    }
    if !body.is_empty() {
        segments.push(Segment::body(body));
    }
    segments
}

/// Group each heading (or run of headings) with the body that follows it.
fn sections(segments: &[Segment]) -> Vec<String> {
    let mut sections = Vec::new();
    let mut pending = String::new();
    for segment in segments {
        pending.push_str(&segment.text);
        if !segment.is_heading {
            sections.push(std::mem::take(&mut pending));
        }
    }
    if !pending.is_empty() {
        sections.push(pending);
    }
    sections
}

/// Pack whole sections, in order, into chunks of at most `max_chars`.
///
/// A heading always travels with its body, so no chunk ends on a dangling
/// heading. A section longer than the limit becomes its own chunk; sections
/// are never cut.
pub fn pack_chunks(segments: &[Segment], max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for section in sections(segments) {
        let len = section.chars().count();
        if !current.is_empty() && current.chars().count() + len > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(&section);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Intro line.\n\n## First\nBody one.\n\n```sh\n# not a heading\n```\n<h2>Second</h2>\nBody two.\n";

    #[test]
    fn concatenation_is_lossless() {
        let segments = split_on_headings(DOC);
        let rebuilt: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt, DOC);
    }

    #[test]
    fn headings_are_isolated_and_fences_ignored() {
        let segments = split_on_headings(DOC);
        let headings: Vec<&str> = segments
            .iter()
            .filter(|s| s.is_heading)
            .map(|s| s.text.trim())
            .collect();
        assert_eq!(headings, vec!["## First", "<h2>Second</h2>"]);
        assert!(segments[2].text.contains("# not a heading"));
    }

    #[test]
    fn rewritable_needs_body_and_length() {
        let segments = split_on_headings("## Title\nshort\n");
        assert!(!segments[0].is_rewritable(1));
        assert!(segments[1].is_rewritable(5));
        assert!(!segments[1].is_rewritable(6));
    }

    #[test]
    fn chunks_respect_limit_without_cutting_segments() {
        let segments = vec![
            Segment::body("a".repeat(40)),
            Segment::body("b".repeat(40)),
            Segment::body("c".repeat(120)),
            Segment::body("d".repeat(10)),
        ];
        let chunks = pack_chunks(&segments, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], format!("{}{}", "a".repeat(40), "b".repeat(40)));
        assert_eq!(chunks[1], "c".repeat(120));
        assert_eq!(chunks[2], "d".repeat(10));
    }

    #[test]
    fn headings_stay_with_their_body() {
        let doc = "Lead in.\n## One\nFirst body.\n## Two\n### Sub\nSecond body.\n";
        let chunks = pack_chunks(&split_on_headings(doc), 20);
        assert_eq!(
            chunks,
            vec![
                "Lead in.\n",
                "## One\nFirst body.\n",
                "## Two\n### Sub\nSecond body.\n",
            ]
        );
        assert!(chunks.iter().all(|chunk| !split_on_headings(chunk)
            .last()
            .is_some_and(|segment| segment.is_heading)));
    }
}
