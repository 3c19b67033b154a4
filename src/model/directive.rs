// File: ./src/model/directive.rs
// Classifies a sub-bullet's text and mutates the owning task accordingly.
// Anything that is not a recognized directive token is a verbatim comment.
use crate::error::ValidationError;
use crate::model::dates::{self, DateError};
use crate::model::item::{Reminder, Task};
use chrono_tz::Tz;

const TOKEN_REMINDED: &str = "@reminded";
const TOKEN_REMIND: &str = "@remind";
const TOKEN_TAGS: &str = "@tags ";
const TOKEN_DUE: &str = "@due ";

/// The four structured sub-bullet instructions, named by their bare token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DirectiveKind {
    Remind,
    Reminded,
    Tags,
    Due,
}

/// A failed directive, before the parser attaches file/project/line context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveIssue {
    BadDate { kind: DirectiveKind, source: DateError },
    Invalid(ValidationError),
}

/// Applies one sub-bullet to `task`. Classification goes most specific
/// prefix first, so `@reminded` is checked before `@remind`.
pub fn apply(text: &str, task: &mut Task, tz: Tz) -> Result<(), DirectiveIssue> {
    if text.starts_with(TOKEN_REMINDED) {
        add_reminder(text, task, tz, DirectiveKind::Reminded)
    } else if text.starts_with(TOKEN_REMIND) {
        add_reminder(text, task, tz, DirectiveKind::Remind)
    } else if let Some(rest) = text.strip_prefix(TOKEN_TAGS) {
        for tag in rest.split_whitespace() {
            task.add_tag(tag).map_err(DirectiveIssue::Invalid)?;
        }
        Ok(())
    } else if text.starts_with(TOKEN_DUE) {
        let when = dates::parse_instant(parenthesized(text), tz).map_err(|source| {
            DirectiveIssue::BadDate {
                kind: DirectiveKind::Due,
                source,
            }
        })?;
        task.set_due(when).map_err(DirectiveIssue::Invalid)
    } else {
        task.add_comment(text).map_err(DirectiveIssue::Invalid)
    }
}

fn add_reminder(
    text: &str,
    task: &mut Task,
    tz: Tz,
    kind: DirectiveKind,
) -> Result<(), DirectiveIssue> {
    let time = dates::parse_instant(parenthesized(text), tz)
        .map_err(|source| DirectiveIssue::BadDate { kind, source })?;
    task.add_reminder(Reminder {
        label: text.to_string(),
        time,
        acknowledged: kind == DirectiveKind::Reminded,
    });
    Ok(())
}

/// Contents of the first `(...)` group found anywhere in the line. A line
/// without one yields the empty token, which then fails date parsing with
/// the same error as an unparseable date.
fn parenthesized(line: &str) -> &str {
    let Some(open) = line.find('(') else {
        return "";
    };
    match line[open + 1..].find(')') {
        Some(close) => &line[open + 1..open + 1 + close],
        None => "",
    }
}
