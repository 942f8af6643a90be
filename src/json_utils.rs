use tracing::{debug, instrument};

/// Type of a JSON node found by the structure scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Object,
    Array,
}

/// Coordinates of a JSON structure within a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjCoords {
    pub start: usize,
    pub end: usize, // inclusive index of the closing bracket/brace
    pub kind: NodeType,
}

impl ObjCoords {
    /// The structure's text, brackets included.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..=self.end]
    }
}

/// Find all balanced top-level JSON object/array structures in the given text.
/// Coordinates are byte indices; brackets inside string literals are ignored.
#[instrument(target = "wiki_navigator::json", skip(text), fields(text_len = text.len()))]
pub fn find_json_structures(text: &str) -> Vec<ObjCoords> {
    let mut results: Vec<ObjCoords> = Vec::new();
    let mut stack: Vec<(usize, NodeType)> = Vec::new();

    let mut in_string = false;
    let mut escape = false;

    for (i, &b) in text.as_bytes().iter().enumerate() {
        if in_string {
            if escape {
                escape = false;
                continue;
            }
            match b {
                b'\\' => escape = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let closing = match b {
            b'"' => {
                in_string = true;
                continue;
            }
            b'{' => {
                stack.push((i, NodeType::Object));
                continue;
            }
            b'[' => {
                stack.push((i, NodeType::Array));
                continue;
            }
            b'}' => NodeType::Object,
            b']' => NodeType::Array,
            _ => continue,
        };

        match stack.pop() {
            Some((start, kind)) if kind == closing => {
                if stack.is_empty() {
                    results.push(ObjCoords { start, end: i, kind });
                }
            }
            // Mismatched bracket: whatever was open is not valid JSON
            Some(_) => stack.clear(),
            None => {}
        }
    }

    debug!(target: "wiki_navigator::json", count = results.len(), "found root structures");
    results
}
