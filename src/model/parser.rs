// File: ./src/model/parser.rs
// Line-classification state machine over one outline source. Builds the
// document model top-down and hands sub-bullets to the directive processor.
//
// Nesting is strict: # project, ## phase, * task (column 0), then a bullet
// indented by at least two spaces for directives/comments. A line that fits
// none of these shapes is ignored.
use crate::error::{Error, StructureViolation};
use crate::model::directive::{self, DirectiveIssue};
use crate::model::item::{Phase, Project, Task};
use chrono_tz::Tz;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_MARKER: &str = "# ";
const PHASE_MARKER: &str = "## ";
const BULLET_MARKER: &str = "* ";

pub struct OutlineParser<'a> {
    source: PathBuf,
    timezone: Tz,
    filter: Option<&'a HashSet<String>>,
}

/// Where the scan currently sits. `Skip` means we are inside a project the
/// active name filter excluded: its content is dropped without validation
/// until the next project header.
enum Scope {
    Idle,
    Skip,
    Build(Project),
}

struct Builder {
    out: Vec<Project>,
    scope: Scope,
    phase: Option<Phase>,
    task: Option<Task>,
}

impl Builder {
    fn close_task(&mut self) {
        if let Some(task) = self.task.take()
            && let Some(phase) = self.phase.as_mut()
        {
            phase.push_task(task);
        }
    }

    fn close_phase(&mut self) {
        self.close_task();
        if let Some(phase) = self.phase.take()
            && let Scope::Build(project) = &mut self.scope
        {
            project.push_phase(phase);
        }
    }

    fn close_project(&mut self) {
        self.close_phase();
        if let Scope::Build(project) = std::mem::replace(&mut self.scope, Scope::Idle) {
            self.out.push(project);
        }
    }
}

impl<'a> OutlineParser<'a> {
    pub fn new(source: impl Into<PathBuf>, timezone: Tz) -> Self {
        Self {
            source: source.into(),
            timezone,
            filter: None,
        }
    }

    /// Restricts the scan to the given canonical project names. Content of
    /// other projects is skipped, not validated.
    pub fn with_filter(mut self, filter: &'a HashSet<String>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Reads the source file and scans it. The handle is scoped to the read
    /// and closed on every exit path.
    pub fn parse_file(&self) -> Result<Vec<Project>, Error> {
        let text = fs::read_to_string(&self.source).map_err(|source| Error::Io {
            path: self.source.clone(),
            source,
        })?;
        self.parse_str(&text)
    }

    /// Scans one in-memory document. Fatal errors abort immediately; there
    /// is no recovery and no partial tree.
    pub fn parse_str(&self, text: &str) -> Result<Vec<Project>, Error> {
        let mut builder = Builder {
            out: Vec::new(),
            scope: Scope::Idle,
            phase: None,
            task: None,
        };

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;

            if raw.trim().is_empty() {
                continue;
            }

            if let Some(rest) = raw.strip_prefix(PROJECT_MARKER) {
                self.open_project(&mut builder, rest.trim(), line)?;
                continue;
            }

            if let Some(rest) = raw.strip_prefix(PHASE_MARKER) {
                self.open_phase(&mut builder, rest, line)?;
                continue;
            }

            if let Some(rest) = raw.strip_prefix(BULLET_MARKER) {
                self.open_task(&mut builder, rest, line)?;
                continue;
            }

            let unindented = raw.trim_start_matches(' ');
            let indent = raw.len() - unindented.len();
            if indent >= 2
                && let Some(rest) = unindented.strip_prefix(BULLET_MARKER)
            {
                self.apply_sub_bullet(&mut builder, rest, line)?;
            }
            // Anything else is not part of the outline grammar; ignore it.
        }

        builder.close_project();
        Ok(builder.out)
    }

    fn open_project(&self, builder: &mut Builder, name: &str, line: usize) -> Result<(), Error> {
        builder.close_project();
        if let Some(filter) = self.filter
            && !filter.contains(name)
        {
            builder.scope = Scope::Skip;
            return Ok(());
        }
        let project = Project::new(name).map_err(|source| Error::Validation {
            file: self.source.clone(),
            line,
            source,
        })?;
        log::debug!("{}:{line}: reading project '{name}'", self.source.display());
        builder.scope = Scope::Build(project);
        Ok(())
    }

    fn open_phase(&self, builder: &mut Builder, name: &str, line: usize) -> Result<(), Error> {
        match &builder.scope {
            Scope::Idle => Err(self.structure(StructureViolation::PhaseOutsideProject, line)),
            Scope::Skip => Ok(()),
            Scope::Build(project) => {
                let phase =
                    Phase::new(name, project.name()).map_err(|source| Error::Validation {
                        file: self.source.clone(),
                        line,
                        source,
                    })?;
                builder.close_phase();
                builder.phase = Some(phase);
                Ok(())
            }
        }
    }

    fn open_task(&self, builder: &mut Builder, title: &str, line: usize) -> Result<(), Error> {
        match &builder.scope {
            Scope::Idle => Err(self.structure(StructureViolation::TaskOutsidePhase, line)),
            Scope::Skip => Ok(()),
            Scope::Build(_) => {
                if builder.phase.is_none() {
                    return Err(self.structure(StructureViolation::TaskOutsidePhase, line));
                }
                let task = Task::new(title).map_err(|source| Error::Validation {
                    file: self.source.clone(),
                    line,
                    source,
                })?;
                builder.close_task();
                builder.task = Some(task);
                Ok(())
            }
        }
    }

    fn apply_sub_bullet(&self, builder: &mut Builder, text: &str, line: usize) -> Result<(), Error> {
        let project_name = match &builder.scope {
            Scope::Idle => {
                return Err(self.structure(StructureViolation::BulletOutsideTask, line));
            }
            Scope::Skip => return Ok(()),
            Scope::Build(project) => project.name().to_string(),
        };
        let Some(task) = builder.task.as_mut() else {
            return Err(self.structure(StructureViolation::BulletOutsideTask, line));
        };
        directive::apply(text, task, self.timezone).map_err(|issue| match issue {
            DirectiveIssue::BadDate { kind, source } => Error::Directive {
                file: self.source.clone(),
                project: project_name,
                line,
                kind,
                source,
            },
            DirectiveIssue::Invalid(source) => Error::Validation {
                file: self.source.clone(),
                line,
                source,
            },
        })
    }

    fn structure(&self, violation: StructureViolation, line: usize) -> Error {
        log::debug!(
            "{}:{line}: structure violation: {violation}",
            self.source.display()
        );
        Error::Structure {
            file: self.source.clone(),
            line,
            violation,
        }
    }
}
