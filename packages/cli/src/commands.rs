//! Command handlers: argument plumbing between clap, the client, and the
//! renderer.

use std::io::{self, BufRead, Write};

use eef::render;
use eef::{
    ClientConfig, ClientError, ConfigError, NodeClient, Pagination, PaginationError, ValidNewPool,
    ValidationError,
};
use eef_node_api::{KeyQuery, NewPoolRequest, WriteMessageRequest};
use thiserror::Error;
use tracing::debug;

use crate::{Cli, Command, KeyArgs, PageArgs, PoolCommand};

/// Everything that can end an invocation unsuccessfully.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to read confirmation: {0}")]
    Prompt(#[from] io::Error),

    #[error("aborted.")]
    Aborted,
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let node_url = cli.node_url.as_deref();
    match cli.command {
        Command::Node => node(node_url),
        Command::Pool(PoolCommand::New {
            tag,
            keys,
            creator,
            description,
            indexable,
            yes,
        }) => {
            let request = NewPoolRequest {
                tag,
                master_key: keys.master_key,
                reader_key: keys.reader_key,
                creator,
                description,
                indexable,
            };
            pool_new(node_url, request, yes)
        }
        Command::Pool(PoolCommand::List { page }) => pool_list(node_url, &page),
        Command::Pool(PoolCommand::Info { identifier, keys }) => {
            pool_info(node_url, &identifier, keys)
        }
        Command::Pool(PoolCommand::Read {
            identifier,
            keys,
            page,
        }) => pool_read(node_url, &identifier, keys, &page),
        Command::Pool(PoolCommand::Write {
            identifier,
            text,
            signature,
            master_key,
        }) => {
            let message = WriteMessageRequest {
                text,
                signature,
                master_key,
            };
            pool_write(node_url, &identifier, &message)
        }
    }
}

/// Build a client from `--node-url` when given, otherwise from the config
/// file.
fn connect(node_url: Option<&str>) -> Result<NodeClient, CliError> {
    let config = match node_url {
        Some(url) => ClientConfig::new(url)?,
        None => ClientConfig::load()?,
    };
    debug!(node_url = %config.node_url, "using node");
    Ok(NodeClient::new(&config)?)
}

fn resolve(page: &PageArgs) -> Result<Pagination, CliError> {
    let pagination = Pagination::resolve(page.head, page.tail)?;
    debug!(?pagination, "resolved pagination");
    Ok(pagination)
}

impl From<KeyArgs> for KeyQuery {
    fn from(keys: KeyArgs) -> Self {
        KeyQuery {
            master_key: keys.master_key,
            reader_key: keys.reader_key,
        }
    }
}

fn node(node_url: Option<&str>) -> Result<(), CliError> {
    let client = connect(node_url)?;
    let node = client.node()?;
    print!("{}", render::render_node(&node, client.node_url()));
    Ok(())
}

fn pool_new(node_url: Option<&str>, request: NewPoolRequest, yes: bool) -> Result<(), CliError> {
    let pool = ValidNewPool::new(request)?;

    if !yes {
        print!("{}", render::render_new_pool_summary(pool.request()));
        if !confirm("Continue?")? {
            return Err(CliError::Aborted);
        }
    }

    let client = connect(node_url)?;
    let created = client.pool_new(&pool)?;
    print!("{}", render::render_created(&created));
    Ok(())
}

fn pool_list(node_url: Option<&str>, page: &PageArgs) -> Result<(), CliError> {
    let pagination = resolve(page)?;
    let client = connect(node_url)?;
    let pools = client.pool_list(pagination)?;
    print!("{}", render::render_pools(&pools, pagination));
    Ok(())
}

fn pool_info(node_url: Option<&str>, identifier: &str, keys: KeyArgs) -> Result<(), CliError> {
    let client = connect(node_url)?;
    let pool = client.pool_info(identifier, &keys.into())?;
    print!("{}", render::render_pool(&pool));
    Ok(())
}

fn pool_read(
    node_url: Option<&str>,
    identifier: &str,
    keys: KeyArgs,
    page: &PageArgs,
) -> Result<(), CliError> {
    let pagination = resolve(page)?;
    let client = connect(node_url)?;
    let messages = client.pool_read(identifier, pagination, &keys.into())?;
    print!("{}", render::render_messages(identifier, &messages, pagination));
    Ok(())
}

fn pool_write(
    node_url: Option<&str>,
    identifier: &str,
    message: &WriteMessageRequest,
) -> Result<(), CliError> {
    let client = connect(node_url)?;
    let written = client.pool_write(identifier, message)?;
    print!("{}", render::render_written(&written));
    Ok(())
}

/// Ask a yes/no question on stdin. An empty answer means yes; end of input
/// means no.
fn confirm(question: &str) -> Result<bool, CliError> {
    print!("{question} [Y/n]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        println!();
        return Ok(false);
    }
    Ok(matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "" | "y" | "yes"
    ))
}
