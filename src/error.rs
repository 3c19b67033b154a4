// File: ./src/error.rs
// Typed error taxonomy for the outline loader. Every fatal condition carries
// its source location as structured fields; rendering is left to the caller.
use crate::model::dates::DateError;
use crate::model::directive::DirectiveKind;
use std::path::PathBuf;
use thiserror::Error;

/// Nesting violations: a line appeared without its required ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructureViolation {
    #[error("phase header without a project header")]
    PhaseOutsideProject,
    #[error("task bullet without a phase header")]
    TaskOutsidePhase,
    #[error("sub-bullet without a task")]
    BulletOutsideTask,
}

/// Content violations raised by the document model's mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a {entity} name must not be empty")]
    EmptyName { entity: &'static str },
    #[error("a comment must not be empty")]
    EmptyComment,
    #[error("tag '{tag}' is declared twice for task '{task}'")]
    DuplicateTag { task: String, tag: String },
    #[error("due date of task '{task}' is already set")]
    DueAlreadySet { task: String },
}

/// Fatal outcomes of a resolution call. A single variant is returned per
/// failed call; there are no partial results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}:{line}: {violation}", file.display())]
    Structure {
        file: PathBuf,
        line: usize,
        violation: StructureViolation,
    },

    #[error("{}:{line}: bad date in @{kind} directive (project '{project}'): {source}", file.display())]
    Directive {
        file: PathBuf,
        project: String,
        line: usize,
        kind: DirectiveKind,
        source: DateError,
    },

    #[error("{}:{line}: {source}", file.display())]
    Validation {
        file: PathBuf,
        line: usize,
        source: ValidationError,
    },

    #[error("no project matching {names:?} found in any configured file")]
    NotFound { names: Vec<String> },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown timezone designator '{name}'")]
    UnknownTimezone { name: String },
}
