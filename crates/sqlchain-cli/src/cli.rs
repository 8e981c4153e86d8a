use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom schema file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub schema: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Row selection shared by reads and writes.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Match rows where FIELD equals VALUE (repeatable)
    #[arg(short = 'w', long = "where", value_name = "FIELD=VALUE")]
    pub conditions: Vec<String>,

    /// Match rows where FIELD is null (repeatable)
    #[arg(long = "null", value_name = "FIELD")]
    pub nulls: Vec<String>,

    /// Combine conditions with OR instead of AND
    #[arg(long)]
    pub any: bool,
}

impl FilterArgs {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.nulls.is_empty()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write an annotated example schema
    #[clap(name = "init")]
    Init,

    /// List declared tables and their field mappings
    #[clap(name = "tables", visible_alias = "ls")]
    Tables,

    /// Compile a SELECT statement
    #[command(arg_required_else_help = true)]
    #[clap(name = "select", visible_alias = "s")]
    Select {
        /// Table to read
        #[arg(required = true)]
        table: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Sort by field
        #[arg(long, value_name = "FIELD")]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Project these fields instead of `*`
        #[arg(long, value_delimiter = ',', value_name = "FIELDS")]
        columns: Vec<String>,

        /// Limit the number of rows
        #[arg(long)]
        limit: Option<u64>,

        /// Skip this many rows
        #[arg(long)]
        offset: Option<u64>,
    },

    /// Compile a COUNT statement
    #[command(arg_required_else_help = true)]
    #[clap(name = "count")]
    Count {
        /// Table to count
        #[arg(required = true)]
        table: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Compile an INSERT statement from a JSON object or array of objects
    #[command(arg_required_else_help = true)]
    #[clap(name = "insert", visible_alias = "i")]
    Insert {
        /// Table to insert into
        #[arg(required = true)]
        table: String,

        /// Record(s) as JSON, keyed by field
        #[arg(required = true, value_name = "JSON")]
        records: String,

        /// Emit REPLACE INTO instead of INSERT INTO
        #[arg(long)]
        replace: bool,
    },

    /// Compile an UPDATE statement
    #[command(arg_required_else_help = true)]
    #[clap(name = "update", visible_alias = "u")]
    Update {
        /// Table to update
        #[arg(required = true)]
        table: String,

        /// Assign VALUE to FIELD (repeatable)
        #[arg(long = "set", required = true, value_name = "FIELD=VALUE")]
        assignments: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Compile a DELETE statement; without filters every row is deleted
    #[command(arg_required_else_help = true)]
    #[clap(name = "delete", visible_alias = "rm")]
    Delete {
        /// Table to delete from
        #[arg(required = true)]
        table: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Compile a TRUNCATE statement
    #[command(arg_required_else_help = true)]
    #[clap(name = "truncate")]
    Truncate {
        /// Table to truncate
        #[arg(required = true)]
        table: String,
    },
}
