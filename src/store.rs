// File: ./src/store.rs
// Resolves project names/aliases against the configured source files and
// aggregates every match. One store is built per process entry point and
// passed down; it never mutates after construction.
use crate::error::Error;
use crate::model::parser::OutlineParser;
use crate::model::Project;
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

pub struct BoardStore {
    files: Vec<PathBuf>,
    aliases: HashMap<String, String>,
    timezone: Tz,
}

impl BoardStore {
    /// `timezone` is the designator applied to every naive date token in the
    /// configured files (an IANA/chrono-tz zone name such as `UTC`).
    pub fn new(
        files: Vec<PathBuf>,
        aliases: HashMap<String, String>,
        timezone: &str,
    ) -> Result<Self, Error> {
        let timezone = timezone.parse::<Tz>().map_err(|_| Error::UnknownTimezone {
            name: timezone.to_string(),
        })?;
        Ok(Self {
            files,
            aliases,
            timezone,
        })
    }

    /// Exact-key alias lookup; a miss means the name is already canonical.
    pub fn resolve_name<'a>(&'a self, name_or_alias: &'a str) -> &'a str {
        self.aliases
            .get(name_or_alias)
            .map(String::as_str)
            .unwrap_or(name_or_alias)
    }

    /// Collects every project whose canonical name matches one of the
    /// requested names or aliases, walking the configured files in order.
    /// A name matching in several files yields several projects. An empty
    /// aggregate is a [`Error::NotFound`] naming the original inputs.
    pub fn get_projects(&self, names_or_aliases: &[String]) -> Result<Vec<Project>, Error> {
        let wanted: HashSet<String> = names_or_aliases
            .iter()
            .map(|n| self.resolve_name(n).to_string())
            .collect();

        let mut projects = Vec::new();
        for file in &self.files {
            let parser = OutlineParser::new(file, self.timezone).with_filter(&wanted);
            projects.extend(parser.parse_file()?);
        }

        if projects.is_empty() {
            return Err(Error::NotFound {
                names: names_or_aliases.to_vec(),
            });
        }
        log::debug!(
            "resolved {:?} to {} project(s)",
            names_or_aliases,
            projects.len()
        );
        Ok(projects)
    }

    /// Every project across every configured file, in file order then
    /// in-file order.
    pub fn get_all_projects(&self) -> Result<Vec<Project>, Error> {
        let mut projects = Vec::new();
        for file in &self.files {
            let parser = OutlineParser::new(file, self.timezone);
            projects.extend(parser.parse_file()?);
        }
        Ok(projects)
    }
}
