//! Terminal demo for the `shade` resolver.
//!
//! Wires the resolver to the default file store and the OS watcher, and
//! exposes the resolver operations as subcommands. `watch` keeps a polling
//! subscription alive and echoes scheme transitions until interrupted.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use shade::{FileStore, OsWatcher, Scheme, SchemeResolver};

#[derive(Parser)]
#[command(
    name = "shade-demo",
    about = "Inspect and set the shade color-scheme preference"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the stored preference and the resolved scheme
    Status,
    /// Pin a concrete scheme
    Set {
        /// Scheme to pin
        #[arg(value_enum)]
        scheme: SchemeArg,
    },
    /// Remove the stored preference and track the platform again
    Reset,
    /// Follow platform scheme transitions until interrupted
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 2)]
        interval: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemeArg {
    Light,
    Dark,
}

impl From<SchemeArg> for Scheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Light => Scheme::Light,
            SchemeArg::Dark => Scheme::Dark,
        }
    }
}

fn build_resolver(watcher: OsWatcher) -> SchemeResolver {
    SchemeResolver::builder()
        .store(FileStore::in_config_dir())
        .watcher(watcher)
        .build()
}

fn scheme_badge(scheme: Scheme) -> console::StyledObject<&'static str> {
    match scheme {
        Scheme::Light => style("light").black().on_white(),
        Scheme::Dark => style("dark").white().on_black(),
    }
}

fn print_status(resolver: &SchemeResolver) {
    let preference = resolver.preference();
    let scheme = resolver.scheme();
    let intent = if preference.is_system() {
        format!("{} (tracking the platform)", style("system").dim())
    } else {
        style(preference.as_str()).bold().to_string()
    };
    println!("preference: {intent}");
    println!("scheme:     {}", scheme_badge(scheme));
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Status => {
            print_status(&build_resolver(OsWatcher::new()));
        }
        Command::Set { scheme } => {
            let resolver = build_resolver(OsWatcher::new());
            resolver.set_scheme(scheme.into());
            print_status(&resolver);
        }
        Command::Reset => {
            let resolver = build_resolver(OsWatcher::new());
            resolver.reset_preference();
            print_status(&resolver);
        }
        Command::Watch { interval } => {
            let interval = Duration::from_secs(interval.max(1));
            let resolver = Arc::new(build_resolver(OsWatcher::poll_every(interval)));
            let _sub = resolver.watch();

            let mut last = resolver.scheme();
            print_status(&resolver);
            println!("{}", style("watching for platform changes...").dim());
            loop {
                thread::sleep(interval);
                let now = resolver.scheme();
                if now != last {
                    last = now;
                    println!("scheme changed: {}", scheme_badge(now));
                }
            }
        }
    }
}
