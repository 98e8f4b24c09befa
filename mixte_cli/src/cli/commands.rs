//! CLI subcommand definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use mixte_core::calculations::Course;

/// Login arguments; missing values are prompted for
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Email checked against the allow-list
    #[arg(short, long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct WhoamiCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Access gate commands.
#[derive(Debug, Subcommand)]
pub enum GateCommand {
    /// Check the session as a course page would, printing the redirect if any
    Check {
        /// Page path, e.g. /cours/poutres/index.html
        page: String,
    },

    /// Encode emails and @domains into an allow-list setting
    Encode {
        /// Entries, e.g. prof@esup.fr @etu.esup.fr
        #[arg(required = true)]
        entries: Vec<String>,
    },

    /// Show the decoded allow-list
    List,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,
}

/// Calculator commands.
#[derive(Debug, Subcommand)]
pub enum CalcCommand {
    /// List calculators by course
    List {
        /// Only this course
        #[arg(long, value_enum)]
        course: Option<CourseArg>,
    },

    /// Show the form fields of a calculator
    Fields {
        /// Calculator id, e.g. slab-moment
        kind: String,
    },

    /// Run a calculator from field values
    Run {
        /// Calculator id, e.g. slab-moment
        kind: String,

        /// Field value as id=value, repeatable
        #[arg(short = 's', long = "set", value_name = "ID=VALUE")]
        values: Vec<String>,

        /// Output the report as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Run a calculation stored as JSON (`-` reads stdin)
    Eval {
        file: PathBuf,

        /// Output the report as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Content protection commands.
#[derive(Debug, Subcommand)]
pub enum ProtectCommand {
    /// List blocked shortcuts
    Keys,

    /// Show what the guard does with a shortcut
    Check {
        /// Shortcut, e.g. Ctrl+S or F12
        combo: String,

        /// Pressed inside a form input
        #[arg(long)]
        input: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CourseArg {
    Slabs,
    Columns,
    Beams,
}

impl From<CourseArg> for Course {
    fn from(arg: CourseArg) -> Self {
        match arg {
            CourseArg::Slabs => Course::Slabs,
            CourseArg::Columns => Course::Columns,
            CourseArg::Beams => Course::Beams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_arg_conversion() {
        assert_eq!(Course::from(CourseArg::Slabs), Course::Slabs);
        assert_eq!(Course::from(CourseArg::Columns), Course::Columns);
        assert_eq!(Course::from(CourseArg::Beams), Course::Beams);
    }
}
