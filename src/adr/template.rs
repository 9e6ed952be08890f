//! Placeholder substitution for rendering a new record document.
//!
//! Templates are plain markdown with `{Token}` placeholders replaced
//! verbatim; there is no escaping or conditional logic.

use crate::model::Record;

pub const DEFAULT_TEMPLATE: &str = "# {RecordId}. {Title}

{DateTime}{Supersedes}

## Status

{Status}

## Context

{Context}

## Decision

{Decision}

## Consequences

{Consequences}
";

pub const DEFAULT_CONTEXT: &str = "Architecture for agile projects has to be described and \
defined differently. Not all decisions will be made at once, nor will all of them be done \
when the project begins.";

pub const DEFAULT_DECISION: &str = "We will keep a collection of records for \
\"architecturally significant\" decisions: those that affect the structure, non-functional \
characteristics, dependencies, interfaces, or construction techniques.";

pub const DEFAULT_CONSEQUENCES: &str = "See [cognitect 2011.11.15]\
(https://cognitect.com/blog/2011/11/15/documenting-architecture-decisions) for more \
information about ADR's.";

/// Render `template` for `record`, substituting every placeholder token.
/// Empty body fields fall back to the built-in default texts so a fresh
/// document is never blank.
pub fn render(template: &str, record: &Record) -> String {
    let supersedes = match &record.supersedes {
        None => String::new(),
        Some(s) => format!(
            "\n\n__Supersedes:__ [{:05} {}](./{}.md)",
            s.record_id, s.title, s.file_name
        ),
    };
    let non_empty = |value: &str, default: &str| {
        if value.is_empty() {
            default.to_string()
        } else {
            value.to_string()
        }
    };

    template
        .replace("{RecordId}", &format!("{:05}", record.record_id))
        .replace("{Title}", &record.title)
        .replace("{Status}", &format!("__{}__", record.status))
        .replace("{Context}", &non_empty(&record.context, DEFAULT_CONTEXT))
        .replace("{Decision}", &non_empty(&record.decision, DEFAULT_DECISION))
        .replace(
            "{Consequences}",
            &non_empty(&record.consequences, DEFAULT_CONSEQUENCES),
        )
        .replace(
            "{DateTime}",
            &record.date_time.format("%Y-%m-%d").to_string(),
        )
        .replace("{Supersedes}", &supersedes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdrStatus, Supersedes};

    fn record() -> Record {
        let mut record = Record {
            record_id: 4,
            title: "Use testable database".into(),
            status: AdrStatus::Proposed,
            ..Record::default()
        };
        record.prepare_for_storage();
        record
    }

    #[test]
    fn renders_all_placeholders() {
        let rendered = render(DEFAULT_TEMPLATE, &record());
        assert!(rendered.starts_with("# 00004. Use testable database"));
        assert!(rendered.contains("__Proposed__"));
        assert!(!rendered.contains('{'));
    }

    #[test]
    fn empty_bodies_fall_back_to_defaults() {
        let rendered = render(DEFAULT_TEMPLATE, &record());
        assert!(rendered.contains(DEFAULT_CONTEXT));
        assert!(rendered.contains(DEFAULT_DECISION));
    }

    #[test]
    fn explicit_context_wins_over_default() {
        let mut r = record();
        r.context = "Short and specific".into();
        let rendered = render(DEFAULT_TEMPLATE, &r);
        assert!(rendered.contains("Short and specific"));
        assert!(!rendered.contains(DEFAULT_CONTEXT));
    }

    #[test]
    fn supersedes_renders_a_link_block() {
        let mut r = record();
        r.supersedes = Some(Supersedes {
            record_id: 2,
            title: "Old decision".into(),
            file_name: "00002-old-decision".into(),
        });
        let rendered = render(DEFAULT_TEMPLATE, &r);
        assert!(rendered.contains("__Supersedes:__ [00002 Old decision](./00002-old-decision.md)"));
    }

    #[test]
    fn no_supersedes_leaves_no_residue() {
        let rendered = render(DEFAULT_TEMPLATE, &record());
        assert!(!rendered.contains("Supersedes:"));
    }
}
