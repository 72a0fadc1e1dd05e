use std::io::{BufRead, Write};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::open::open_ticket;
use crate::io::store::TicketStore;
use crate::model::ticket::Ticket;
use crate::ops::search;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let store = store_from(cli.dir.as_deref())?;

    match cli.command {
        // No subcommand: open the lister window
        None => crate::tui::run_lister(store),
        Some(cmd) => match cmd {
            Commands::New(args) => match args.title {
                Some(title) => cmd_new(&store, &title, &args.description, json),
                None => crate::tui::run_creator(store),
            },
            Commands::List => cmd_list(&store, json),
            Commands::Show(args) => cmd_show(&store, args.number),
            Commands::Search(args) => cmd_search(&store, &args.query, json),
            Commands::Open(args) => cmd_open(&store, args.number),
            Commands::Delete(args) => cmd_delete(&store, args.number, args.yes),
        },
    }
}

/// Build the store, honoring the -C override.
pub fn store_from(dir: Option<&str>) -> Result<TicketStore, Box<dyn std::error::Error>> {
    match dir {
        Some(dir) => {
            let abs = std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
            Ok(TicketStore::new(abs))
        }
        None => Ok(TicketStore::from_env()),
    }
}

/// Find a ticket by number in a fresh scan.
fn find_ticket(store: &TicketStore, number: u64) -> Result<Ticket, Box<dyn std::error::Error>> {
    let tickets = store.scan()?;
    tickets
        .into_iter()
        .find(|t| t.number == number)
        .ok_or_else(|| format!("no ticket {}", number).into())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_new(
    store: &TicketStore,
    title: &str,
    description: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let number = store.create(title, description)?;
    if json {
        let out = CreatedJson {
            number,
            path: store.ticket_path(number).display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("created ticket {}", number);
    }
    Ok(())
}

fn cmd_list(store: &TicketStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tickets = store.scan()?;
    if json {
        let out = TicketListJson {
            tickets: tickets.iter().map(TicketJson::from_ticket).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for ticket in &tickets {
            println!("{}", ticket_line(ticket));
        }
    }
    Ok(())
}

fn cmd_show(store: &TicketStore, number: u64) -> Result<(), Box<dyn std::error::Error>> {
    let ticket = find_ticket(store, number)?;
    // Ticket files are CRLF on disk; print with plain newlines.
    print!("{}", ticket.content.replace("\r\n", "\n"));
    Ok(())
}

fn cmd_search(
    store: &TicketStore,
    query: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tickets = store.scan()?;
    let normalized = search::normalize_query(query);
    let flags = search::search(&tickets, query).unwrap_or_else(|| vec![false; tickets.len()]);

    let matches: Vec<&Ticket> = tickets
        .iter()
        .zip(&flags)
        .filter(|(_, hit)| **hit)
        .map(|(t, _)| t)
        .collect();

    if json {
        let out = SearchJson {
            query: normalized,
            matches: matches.iter().map(|t| TicketJson::from_ticket(t)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for ticket in &matches {
            println!("{}", ticket_line(ticket));
        }
    }
    Ok(())
}

fn cmd_open(store: &TicketStore, number: u64) -> Result<(), Box<dyn std::error::Error>> {
    let ticket = find_ticket(store, number)?;
    open_ticket(&ticket.path)?;
    Ok(())
}

fn cmd_delete(
    store: &TicketStore,
    number: u64,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ticket = find_ticket(store, number)?;
    if !yes && !confirm(&format!("Really delete ticket {}?", number))? {
        println!("not deleted");
        return Ok(());
    }
    store.delete(&ticket)?;
    println!("deleted ticket {}", number);
    Ok(())
}

/// Ask a yes/no question on the terminal. Only "y"/"yes" counts as yes.
fn confirm(prompt: &str) -> Result<bool, std::io::Error> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
