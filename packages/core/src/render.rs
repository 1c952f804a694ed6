//! Human-readable text rendering of node responses.
//!
//! Every function returns a `String` ending in a newline; the CLI prints it
//! as-is. Styling goes through [`console::style`], which drops the escape
//! codes when stdout is not a terminal, so piped output is plain text.

use console::{style, Style};
use eef_node_api::{Message, Messages, NewPoolRequest, Node, Pool, Pools};

use crate::compat::is_compatible;
use crate::pagination::Pagination;

/// Render the `node` command output.
///
/// ```text
/// evade84-node 0.1.0 (compatible): public-relay at http://127.0.0.1:8000.
/// ```
pub fn render_node(node: &Node, node_url: &str) -> String {
    let compatibility = if is_compatible(&node.version) {
        style("(compatible)").green()
    } else {
        style("(incompatible)").black().on_red()
    };
    format!(
        "evade84-node {} {}: {} at {}.\n",
        node.version, compatibility, node.name, node_url
    )
}

/// Render a single pool in full detail (`pool info`).
///
/// ```text
/// 9c1d0e59:
/// Say hi.
///
/// tag: lobby
/// created by: <no signature>
/// indexable: yes
///
/// master key is required to write: no
/// master or reader key is required to read: no
/// ```
pub fn render_pool(pool: &Pool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}:\n", address(&pool.address)));
    out.push_str(&format!("{}\n\n", description(pool.description.as_deref())));
    out.push_str(&format!("tag: {}\n", tag(pool.tag.as_deref())));
    out.push_str(&format!("created by: {}\n", signature(pool.creator.as_deref())));
    out.push_str(&format!("indexable: {}\n\n", exposure(pool.indexable)));
    out.push_str(&format!(
        "master key is required to write: {}\n",
        requirement(pool.write_key_required)
    ));
    out.push_str(&format!(
        "master or reader key is required to read: {}\n",
        requirement(pool.read_key_required)
    ));
    out
}

/// Render the `pool list` output.
///
/// A page with `total == 0` renders a single notice instead of a heading.
pub fn render_pools(pools: &Pools, pagination: Pagination) -> String {
    if pools.total == 0 {
        return "There are no indexable pools at this node.\n".to_string();
    }

    let mut out = format!(
        "Showing {} {} indexable pools:\n",
        pagination.label(),
        pools.total
    );
    for pool in &pools.pools {
        out.push_str(&format!("{}:\n", address(&pool.address)));
        out.push_str(&format!("\t{}\n\n", description(pool.description.as_deref())));
        out.push_str(&format!("\ttag: {}\n", tag(pool.tag.as_deref())));
        out.push_str(&format!("\tcreated by: {}\n", signature(pool.creator.as_deref())));
        // The listing highlights protected pools instead of open ones.
        out.push_str(&format!(
            "\tmaster key is required to write: {}\n\n",
            flag(pool.write_key_required, false)
        ));
    }
    out
}

/// Render the `pool read` output, one `signature: text` line per message.
pub fn render_messages(identifier: &str, messages: &Messages, pagination: Pagination) -> String {
    if messages.total == 0 {
        return "Pool does not have any messages.\n".to_string();
    }

    let mut out = format!(
        "Reading pool {} {} {} messages:\n",
        identifier,
        pagination.label(),
        messages.total
    );
    for message in &messages.messages {
        out.push_str(&render_message_line(message));
    }
    out
}

/// Render the confirmation after `pool write`.
pub fn render_written(message: &Message) -> String {
    format!(
        "Wrote a new message to the pool:\n{}",
        render_message_line(message)
    )
}

/// Summary shown before `pool new` asks for confirmation.
pub fn render_new_pool_summary(pool: &NewPoolRequest) -> String {
    let master_key = pool.master_key.as_deref().is_some_and(|k| !k.is_empty());
    let reader_key = pool.reader_key.as_deref().is_some_and(|k| !k.is_empty());

    let mut out = format!("{}\n\n", style("You are going to create a new pool:").bold());
    out.push_str(&format!("tag: {}\n", tag(pool.tag.as_deref())));
    out.push_str(&format!("description: {}\n", description(pool.description.as_deref())));
    out.push_str(&format!("creator: {}\n", signature(pool.creator.as_deref())));
    out.push_str(&format!("indexable: {}\n", exposure(pool.indexable)));
    out.push_str(&format!(
        "master key is required to write: {}\n",
        requirement(master_key)
    ));
    out.push_str(&format!(
        "reader or master key is required to read: {}\n",
        requirement(reader_key)
    ));
    out
}

/// Render the result of `pool new`.
pub fn render_created(pool: &Pool) -> String {
    format!("Created a new pool: {}\n", pool.address)
}

fn render_message_line(message: &Message) -> String {
    format!("{}: {}\n", signature(message.signature.as_deref()), message.text)
}

// --- fragments ---------------------------------------------------------------

fn address(address: &str) -> String {
    style(address).italic().to_string()
}

fn description(description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        Some(d) => style(d).italic().to_string(),
        None => style("<no description>").dim().to_string(),
    }
}

fn tag(tag: Option<&str>) -> String {
    match tag.filter(|t| !t.is_empty()) {
        Some(t) => style(t).underlined().to_string(),
        None => style("<no tag>").dim().to_string(),
    }
}

fn signature(signature: Option<&str>) -> String {
    match signature.filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => style("<no signature>").dim().to_string(),
    }
}

/// A key requirement: "yes" is the protective answer.
fn requirement(required: bool) -> String {
    flag(required, true)
}

/// Public exposure: "yes" is the risky answer.
fn exposure(exposed: bool) -> String {
    flag(exposed, false)
}

fn flag(value: bool, yes_is_green: bool) -> String {
    flag_style(value, yes_is_green)
        .apply_to(if value { "yes" } else { "no" })
        .to_string()
}

fn flag_style(value: bool, yes_is_green: bool) -> Style {
    if value == yes_is_green {
        Style::new().green()
    } else {
        Style::new().red()
    }
}

// --- tests -------------------------------------------------------------------
