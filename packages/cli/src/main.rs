//! `eef` — command-line client for evade84 nodes.
//!
//! Talks to the node configured in `~/.config/eef/config` (or the URL given
//! with `--node-url` / `EEF_NODE_URL`):
//!
//! - **`node`** — show the node's name and version, flagging incompatible
//!   versions.
//! - **`pool new`** — create a pool, optionally protected by keys.
//! - **`pool list`** — list the node's indexable pools.
//! - **`pool info`** — describe one pool.
//! - **`pool read`** — read messages from a pool.
//! - **`pool write`** — append a message to a pool.
//!
//! Every invocation performs at most one request. Any failure prints
//! `Error: <message>` to stderr and exits with status 1.

mod commands;

use std::process;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

/// eef — evade84 node client
///
/// Create, inspect, read, and write append-only message pools.
#[derive(Parser)]
#[command(name = "eef", version, about, long_about = None)]
struct Cli {
    /// Node URL to use instead of the one in the configuration file.
    #[arg(long, global = true, env = "EEF_NODE_URL", value_name = "URL")]
    node_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Do something with pools.
    #[command(subcommand)]
    Pool(PoolCommand),

    /// Information about the current node.
    Node,
}

#[derive(Subcommand)]
enum PoolCommand {
    /// Create a new pool.
    ///
    /// A reader key requires a master key, and a pool with a reader key
    /// cannot be indexable. Both rules are checked before contacting the
    /// node.
    New {
        /// Pool tag.
        tag: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,

        /// Signature of the pool creator.
        #[arg(short = 'c', long, value_name = "SIGNATURE")]
        creator: Option<String>,

        /// Pool description.
        #[arg(short = 'd', long, value_name = "TEXT")]
        description: Option<String>,

        /// List the pool in the node's public index.
        #[arg(short = 'i', long)]
        indexable: bool,

        /// Create the pool without asking for confirmation.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List indexable pools.
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get information about a pool.
    Info {
        /// Pool identifier.
        identifier: String,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Read messages from a pool.
    Read {
        /// Pool identifier.
        identifier: String,

        #[command(flatten)]
        keys: KeyArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Write a message to a pool.
    Write {
        /// Pool identifier.
        identifier: String,

        /// Message text.
        text: String,

        /// Message author signature.
        #[arg(short = 'f', long = "from", value_name = "SIGNATURE")]
        signature: Option<String>,

        /// Pool master key.
        #[arg(short = 'm', long, value_name = "KEY")]
        master_key: Option<String>,
    },
}

/// Key material accepted by commands that address a protected pool.
#[derive(Args)]
struct KeyArgs {
    /// Pool master key.
    #[arg(short = 'm', long, value_name = "KEY")]
    master_key: Option<String>,

    /// Pool reader key.
    #[arg(short = 'r', long, value_name = "KEY")]
    reader_key: Option<String>,
}

/// `--head` / `--tail` selection. Defaults to the last 50 items.
#[derive(Args)]
struct PageArgs {
    /// Get the first N items.
    #[arg(short = 'H', long, value_name = "N")]
    head: Option<u32>,

    /// Get the last N items.
    #[arg(short = 't', long, value_name = "N")]
    tail: Option<u32>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_env("EEF_LOG").unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        fatal(&e);
    }
}

/// Print an error message to stderr and exit with code 1.
fn fatal(err: &commands::CliError) -> ! {
    eprintln!("{} {}", style("Error:").red().for_stderr(), err);
    process::exit(1);
}
