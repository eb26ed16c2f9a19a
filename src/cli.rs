// src/cli.rs
use std::env;

use crate::backend;
use crate::config::options::{PageKind, WatchOptions};
use crate::progress::Progress;
use crate::runner::{self, Outcome};

pub enum Mode {
    Cli(WatchOptions),
    Gui(WatchOptions),
}

// Decide CLI vs GUI
pub fn detect_mode() -> Result<Mode, Box<dyn std::error::Error>> {

    let mut options = WatchOptions::default();

    if std::env::args().len() == 1 {
        // only program name
        return Ok(Mode::Gui(options));
    }
    parse_cli(&mut options)?;
    Ok(Mode::Cli(options))
}

pub fn run(options: WatchOptions) -> Result<(), Box<dyn std::error::Error>> {
    if options.list_users {
        let key = options.api_key.clone().or_else(crate::store::load_api_key);
        match backend::fetch_users(key.as_deref()) {
            Ok(users) => {
                for u in users {
                    let pp = u.pp.map_or_else(|| s!("n/a"), |v| v.to_string());
                    println!("{} - PP: {}", u.name, pp);
                }
            }
            Err(e) => return Err(format!("directory fetch failed ({e})").into()),
        }
        return Ok(());
    }

    let mut progress = CliProgress;
    runner::run(&options, Some(&mut progress))
}

struct CliProgress;
impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn cycle_done(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped => println!("skipped (mobile context)"),
            Outcome::FetchFailed(e) => println!("fetch failed: {e}"),
            Outcome::Rejected(r) => println!("rejected: {r}"),
            Outcome::Unchanged => println!("unchanged"),
            Outcome::Dispatched => println!("dispatched"),
        }
    }
}

fn parse_cli(options: &mut WatchOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--page" => {
                let v = args.next().ok_or("Missing value for --page")?;
                options.page = match v.to_ascii_lowercase().as_str() {
                    "plateau" => PageKind::Plateau,
                    "interface" => PageKind::Interface,
                    other => return Err(format!("Unknown page: {}", other).into()),
                };}
            "--once" => options.once = true,
            "--list-users" => options.list_users = true,
            "--confirm-delivery" => options.confirm_delivery = true,
            "-i" | "--interval" => {
                let v: u64 = args.next().ok_or("Missing interval seconds")?.parse()?;
                if v == 0 { return Err("Interval must be at least 1 second".into()); }
                options.interval_secs = v; }
            "-k" | "--api-key" => options.api_key = Some(args.next().ok_or("Missing apiKey value")?),
            "--user-agent" => options.context.user_agent = Some(args.next().ok_or("Missing user-agent value")?),
            "--viewport" => {
                let v: u32 = args.next().ok_or("Missing viewport width")?.parse()?;
                options.context.viewport_width = Some(v); }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(())
}
