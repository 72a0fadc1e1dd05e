use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tix", about = concat!("tix v", env!("CARGO_PKG_VERSION"), " - tickets are plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different ticket directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a ticket (opens the creator window without a title)
    New(NewArgs),
    /// List all tickets
    List,
    /// Print a ticket
    Show(ShowArgs),
    /// Search tickets by keywords
    Search(SearchArgs),
    /// Open a ticket with the OS default viewer
    Open(OpenArgs),
    /// Delete a ticket file
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Ticket title; omit to open the creator window
    pub title: Option<String>,
    /// Ticket description
    #[arg(short = 'm', long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Ticket number
    pub number: u64,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query; words are matched independently
    pub query: String,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Ticket number
    pub number: u64,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Ticket number
    pub number: u64,
    /// Delete without asking for confirmation
    #[arg(long)]
    pub yes: bool,
}
