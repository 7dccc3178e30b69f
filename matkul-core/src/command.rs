//! Commands
//!
//! Line-oriented command vocabulary and the session that executes it
//! against one owned [`CourseGraph`].
//!
//! | Line                          | Command                 |
//! |-------------------------------|-------------------------|
//! | `ADD_MATKUL <name> [dep...]`  | [`Command::AddCourse`]  |
//! | `EDIT_MATKUL <name> [dep...]` | [`Command::EditCourse`] |
//! | `CETAK_URUTAN`                | [`Command::PrintSorted`]|
//! | `PRINT`                       | [`Command::Dump`]       |
//! | `EXIT`                        | [`Command::Exit`]       |

use std::str::FromStr;

use tracing::debug;

use crate::error::{GraphError, ParseError};
use crate::graph::{CourseGraph, GraphSnapshot};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new course with its prerequisites.
    AddCourse {
        name: String,
        prerequisites: Vec<String>,
    },

    /// Replace the prerequisites of an existing course.
    EditCourse {
        name: String,
        prerequisites: Vec<String>,
    },

    /// Print every course grouped by level.
    PrintSorted,

    /// Print both adjacency indexes.
    Dump,

    /// Stop reading commands.
    Exit,
}

impl Command {
    pub const ADD: &'static str = "ADD_MATKUL";
    pub const EDIT: &'static str = "EDIT_MATKUL";
    pub const PRINT_SORTED: &'static str = "CETAK_URUTAN";
    pub const DUMP: &'static str = "PRINT";
    pub const EXIT: &'static str = "EXIT";

    /// Keyword this command is spelled with.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::AddCourse { .. } => Self::ADD,
            Command::EditCourse { .. } => Self::EDIT,
            Command::PrintSorted => Self::PRINT_SORTED,
            Command::Dump => Self::DUMP,
            Command::Exit => Self::EXIT,
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(ParseError::Empty)?;

        let mut course_args = |keyword: &str| -> Result<(String, Vec<String>), ParseError> {
            let name = words.next().ok_or_else(|| ParseError::MissingCourseName {
                keyword: keyword.to_string(),
            })?;
            let prerequisites = words.by_ref().map(str::to_string).collect();
            Ok((name.to_string(), prerequisites))
        };

        // Trailing words after argument-less commands are ignored.
        match keyword {
            Self::ADD => {
                let (name, prerequisites) = course_args(keyword)?;
                Ok(Command::AddCourse {
                    name,
                    prerequisites,
                })
            }
            Self::EDIT => {
                let (name, prerequisites) = course_args(keyword)?;
                Ok(Command::EditCourse {
                    name,
                    prerequisites,
                })
            }
            Self::PRINT_SORTED => Ok(Command::PrintSorted),
            Self::DUMP => Ok(Command::Dump),
            Self::EXIT => Ok(Command::Exit),
            other => Err(ParseError::UnknownCommand {
                keyword: other.to_string(),
            }),
        }
    }
}

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The graph changed; nothing to print.
    Updated,

    /// Course names grouped by level.
    Sorted(Vec<String>),

    /// Diagnostic view of the graph.
    Dump(GraphSnapshot),

    /// The caller should stop reading commands.
    Exit,
}

/// One course graph and the commands executed against it.
#[derive(Debug, Default)]
pub struct Session {
    graph: CourseGraph,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &CourseGraph {
        &self.graph
    }

    /// Execute one command.
    ///
    /// A failed command leaves the graph unchanged.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, GraphError> {
        debug!(command = command.keyword(), "executing");
        match command {
            Command::AddCourse {
                name,
                prerequisites,
            } => {
                self.graph.add_course(&name, &prerequisites)?;
                Ok(Outcome::Updated)
            }
            Command::EditCourse {
                name,
                prerequisites,
            } => {
                self.graph.edit_course(&name, &prerequisites)?;
                Ok(Outcome::Updated)
            }
            Command::PrintSorted => Ok(Outcome::Sorted(self.graph.list_sorted()?)),
            Command::Dump => Ok(Outcome::Dump(self.graph.dump_state())),
            Command::Exit => Ok(Outcome::Exit),
        }
    }
}
