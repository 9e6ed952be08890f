//! Line-oriented handling of the narrow markdown dialect the tool renders:
//! a `# {id}. {title}` title row followed by `## ` delimited sections.
//!
//! This is deliberately not a CommonMark parser. Every operation here works
//! on a slice of document lines and either extracts a section or returns a
//! rewritten copy of the lines; nothing mutates in place.

/// Find the section named `name` (the line matching `## {name}`,
/// case-insensitive) and return its trimmed body lines, up to but excluding
/// the next `## ` heading. `None` when no such heading exists; a heading
/// directly followed by another heading yields `Some` with an empty body.
pub fn find_section(lines: &[String], name: &str) -> Option<Vec<String>> {
    let marker = format!("## {}", name);
    let start = lines
        .iter()
        .position(|line| line.trim().eq_ignore_ascii_case(&marker))?;
    let body = lines[start + 1..]
        .iter()
        .map(|line| line.trim().to_string())
        .take_while(|line| !line.starts_with("## "))
        .collect();
    Some(body)
}

/// Extract the title from the title row (`# {id}. {title}`): split the first
/// line on `.` and take the trailing segment. A title containing a dot keeps
/// only the part after the last one; the synchronizer's length threshold
/// guards against the fragments this can produce.
pub fn title_from_lines(lines: &[String]) -> Option<String> {
    let first = lines.first()?;
    let title = first
        .split('.')
        .filter(|part| !part.trim().is_empty())
        .next_back()?
        .trim()
        .to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Append `new_lines` at the end of the named section, just before the next
/// `## ` heading. When the section is the last one in the document there is
/// no following heading to trigger the emit, so the pending lines are
/// flushed after the scan.
pub fn insert_in_section(lines: &[String], section: &str, new_lines: &[String]) -> Vec<String> {
    if section.is_empty() || new_lines.is_empty() {
        return lines.to_vec();
    }
    let marker = format!("## {}", section);
    let mut out = Vec::with_capacity(lines.len() + new_lines.len());
    let mut in_section = false;
    for line in lines {
        if in_section && line.trim().starts_with("## ") {
            out.extend(new_lines.iter().cloned());
            in_section = false;
        }
        if line.trim().eq_ignore_ascii_case(&marker) {
            in_section = true;
        }
        out.push(line.clone());
    }
    if in_section {
        out.extend(new_lines.iter().cloned());
    }
    out
}

/// Drop every line inside the named section that contains `needle`
/// (case-insensitive). Lines outside the section are never touched.
pub fn remove_from_section(lines: &[String], section: &str, needle: &str) -> Vec<String> {
    if section.is_empty() || needle.is_empty() {
        return lines.to_vec();
    }
    let marker = format!("## {}", section);
    let needle = needle.to_lowercase();
    let mut out = Vec::with_capacity(lines.len());
    let mut in_section = false;
    for line in lines {
        if in_section && line.trim().starts_with("## ") {
            in_section = false;
        }
        if in_section && line.to_lowercase().contains(&needle) {
            continue;
        }
        if line.trim().eq_ignore_ascii_case(&marker) {
            in_section = true;
        }
        out.push(line.clone());
    }
    out
}

/// True for a line carrying a `__token__` status marker.
pub fn is_status_token(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 4 && line.starts_with("__") && line.ends_with("__")
}

/// Replace the `__Status__` token line inside the Status section with
/// `__{token}__`. Documents without a token get one appended to the section
/// instead.
pub fn replace_status_token(lines: &[String], token: &str) -> Vec<String> {
    let replacement = format!("__{}__", token);
    let mut out = Vec::with_capacity(lines.len());
    let mut in_section = false;
    let mut replaced = false;
    for line in lines {
        if in_section && line.trim().starts_with("## ") {
            in_section = false;
        }
        if in_section && !replaced && is_status_token(line) {
            out.push(replacement.clone());
            replaced = true;
            continue;
        }
        if line.trim().eq_ignore_ascii_case("## Status") {
            in_section = true;
        }
        out.push(line.clone());
    }
    if replaced {
        out
    } else {
        insert_in_section(&out, "Status", &[replacement, String::new()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Vec<String> {
        doc(&[
            "# 00003. Use testable database",
            "",
            "2023-07-05",
            "",
            "## Status",
            "",
            "__Proposed__",
            "",
            "## Context",
            "",
            "Entity framework is not testable for pure SQL",
            "Server models",
            "",
            "## Decision",
            "",
            "Use SQLite as the base line",
            "",
        ])
    }

    #[test]
    fn finds_a_section_body() {
        let body = find_section(&sample(), "Status").unwrap();
        assert_eq!(body, vec!["", "__Proposed__", ""]);
    }

    #[test]
    fn section_lookup_is_case_insensitive() {
        assert!(find_section(&sample(), "status").is_some());
        assert!(find_section(&sample(), "CONTEXT").is_some());
    }

    #[test]
    fn missing_section_is_none() {
        assert!(find_section(&sample(), "Consequences").is_none());
    }

    #[test]
    fn empty_section_is_found() {
        let lines = doc(&["## Status", "## Context", "body"]);
        let body = find_section(&lines, "Status").unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let lines = sample();
        let first = find_section(&lines, "Context");
        let second = find_section(&lines, "Context");
        assert_eq!(first, second);
    }

    #[test]
    fn title_row_yields_trailing_segment() {
        let title = title_from_lines(&sample()).unwrap();
        assert_eq!(title, "Use testable database");
    }

    #[test]
    fn title_without_id_prefix_is_whole_line() {
        let lines = doc(&["Just a plain first line"]);
        assert_eq!(
            title_from_lines(&lines).as_deref(),
            Some("Just a plain first line")
        );
    }

    #[test]
    fn title_of_empty_document_is_none() {
        assert!(title_from_lines(&[]).is_none());
        assert!(title_from_lines(&doc(&[""])).is_none());
    }

    #[test]
    fn insert_lands_before_the_next_heading() {
        let lines = doc(&["## Status", "", "## Context", "body"]);
        let out = insert_in_section(&lines, "Status", &doc(&["link line"]));
        assert_eq!(out, doc(&["## Status", "", "link line", "## Context", "body"]));
    }

    #[test]
    fn insert_preserves_surrounding_lines() {
        let lines = sample();
        let out = insert_in_section(&lines, "Status", &doc(&["x"]));
        // Every original line is still present, in order
        let filtered: Vec<&String> = out.iter().filter(|l| l.as_str() != "x").collect();
        let original: Vec<&String> = lines.iter().collect();
        assert_eq!(filtered, original);
    }

    #[test]
    fn insert_flushes_when_section_is_last() {
        let lines = doc(&["## Status", "", "__New__", ""]);
        let out = insert_in_section(&lines, "Status", &doc(&["link line"]));
        assert_eq!(out.last().unwrap(), "link line");
    }

    #[test]
    fn insert_with_empty_inputs_is_identity() {
        let lines = sample();
        assert_eq!(insert_in_section(&lines, "", &doc(&["x"])), lines);
        assert_eq!(insert_in_section(&lines, "Status", &[]), lines);
    }

    #[test]
    fn remove_matches_by_substring_within_section_only() {
        let lines = doc(&[
            "## Status",
            "",
            "Extends [00005.Use SQLite](.\\00005-use-sqlite)",
            "Refines [00007.Use Postgres](.\\00007-use-postgres)",
            "",
            "## Context",
            "Mentions [00005. again but outside the section",
        ]);
        let out = remove_from_section(&lines, "Status", "[00005.");
        assert!(!out.iter().any(|l| l.contains("[00005.") && l.contains("SQLite")));
        assert!(out.iter().any(|l| l.contains("[00007.")));
        assert!(out.iter().any(|l| l.contains("outside the section")));
    }

    #[test]
    fn remove_without_match_is_identity() {
        let lines = sample();
        assert_eq!(remove_from_section(&lines, "Status", "[00042."), lines);
    }

    #[test]
    fn replace_status_token_rewrites_in_place() {
        let out = replace_status_token(&sample(), "Final");
        assert!(out.iter().any(|l| l == "__Final__"));
        assert!(!out.iter().any(|l| l == "__Proposed__"));
    }

    #[test]
    fn replace_status_token_appends_when_absent() {
        let lines = doc(&["## Status", "", "## Context", "body"]);
        let out = replace_status_token(&lines, "Proposed");
        let pos_token = out.iter().position(|l| l == "__Proposed__").unwrap();
        let pos_context = out.iter().position(|l| l == "## Context").unwrap();
        assert!(pos_token < pos_context);
    }
}
