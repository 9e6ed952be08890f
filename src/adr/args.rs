use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adr")]
#[command(about = "Command-line tool for Architecture Decision Records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the ADR folders and create the first record
    Init {
        /// Folder where the records are stored
        #[arg(long)]
        adr_root: Option<String>,

        /// Folder where the templates are stored
        #[arg(long)]
        template_root: Option<String>,
    },

    /// Create a new record and open it in the editor
    #[command(alias = "n")]
    New {
        /// Title of the record
        title: String,

        /// Create an Architecture Significant Requirement instead of a decision
        #[arg(long, conflicts_with = "revision")]
        asr: bool,

        /// Create a revision superseding the record with this id
        #[arg(long)]
        revision: Option<String>,

        /// Initial text for the Context section
        #[arg(short, long)]
        context: Option<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Add a reference from one record to another
    Link {
        /// Id of the record the link is placed in
        source: String,

        /// Id of the record the link points to
        target: String,

        /// Remark describing the relation (e.g. Amends, Clarifies)
        reason: Option<String>,
    },

    /// Remove a reference between two records
    Unlink {
        /// Id of the record the link is placed in
        source: String,

        /// Id of the record the link points to
        target: String,
    },

    /// List all records
    #[command(alias = "ls")]
    List {
        /// Newest first
        #[arg(short, long)]
        desc: bool,
    },

    /// Search records by title and context
    Find {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,

        /// Newest first
        #[arg(short, long)]
        desc: bool,

        /// Also scan the full document text
        #[arg(short, long)]
        full: bool,
    },

    /// Rebuild metadata from the markdown documents
    Sync {
        /// First record id to synchronize
        #[arg(long, default_value_t = 1)]
        start_at: u32,

        /// Synchronize a single record
        #[arg(long)]
        record: Option<u32>,
    },

    /// Mark a record as proposed
    Proposed {
        /// Id of the record
        id: String,

        /// Remark appended to the Status section
        remark: Option<String>,
    },

    /// Mark a record as final
    Final {
        /// Id of the record
        id: String,

        /// Remark appended to the Status section
        remark: Option<String>,
    },

    /// Mark a record as accepted (the document becomes read-only)
    Accepted {
        /// Id of the record
        id: String,

        /// Remark appended to the Status section
        remark: Option<String>,
    },

    /// Mark a record as obsolete
    Obsolete {
        /// Id of the record
        id: String,

        /// Remark appended to the Status section
        remark: Option<String>,
    },
}
