//! # Construction Mixte CLI
//!
//! `mixte` opens and closes the course session, checks pages against the
//! access gate and runs the calculators from the terminal. Calculators are
//! only reachable with a valid session, as in the course pages.

mod cli;

use std::io::{self, BufRead, Read, Write};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;

use cli::{CalcCommand, Cli, Command, ConfigCommand, GateCommand, LoginCommand, ProtectCommand, WhoamiCommand};
use mixte_core::access::{AccessGate, AllowList, FileStore, Session};
use mixte_core::calculations::{CalculationItem, CalculatorKind, Course, Report};
use mixte_core::forms::{FieldKind, FormValues};
use mixte_core::logging::init_logging;
use mixte_core::protection::{EventGuard, GuardEvent, KeyCombo, Target};
use mixte_core::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[FAIL] {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    let mut gate = AccessGate::from_config(FileStore::new(config.session_file()), &config.access);
    tracing::debug!(session_file = %gate.store().path().display(), "session store opened");

    match cli.command {
        Command::Login(cmd) => handle_login(&mut gate, cmd),
        Command::Logout => {
            gate.logout()?;
            println!("Logged out.");
            Ok(ExitCode::SUCCESS)
        }
        Command::Whoami(cmd) => handle_whoami(&mut gate, cmd),
        Command::Gate(cmd) => handle_gate(&mut gate, cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
        Command::Calc(cmd) => handle_calc(&mut gate, &config, cmd),
        Command::Protect(cmd) => handle_protect(&config, cmd),
    }
}

fn prompt_text(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn handle_login(gate: &mut AccessGate<FileStore>, cmd: LoginCommand) -> Result<ExitCode> {
    let last_name = match cmd.last_name {
        Some(v) => v,
        None => prompt_text("Last name: ")?,
    };
    let first_name = match cmd.first_name {
        Some(v) => v,
        None => prompt_text("First name: ")?,
    };
    let email = match cmd.email {
        Some(v) => v,
        None => prompt_text("Email: ")?,
    };

    let session = gate.login(&last_name, &first_name, &email, Utc::now())?;
    println!(
        "[OK] Welcome {} - session valid until {}",
        session.display_name(),
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(ExitCode::SUCCESS)
}

fn handle_whoami(gate: &mut AccessGate<FileStore>, cmd: WhoamiCommand) -> Result<ExitCode> {
    let Some(session) = gate.current_session(Utc::now()) else {
        println!("Not logged in.");
        return Ok(ExitCode::FAILURE);
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        let remaining = session.remaining(Utc::now());
        println!("Name:     {}", session.display_name());
        println!("Email:    {}", session.email);
        println!("Expires:  {}", session.expires_at.format("%Y-%m-%d %H:%M UTC"));
        println!("Left:     {} d {} h", remaining.num_days(), remaining.num_hours() % 24);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_gate(gate: &mut AccessGate<FileStore>, cmd: GateCommand) -> Result<ExitCode> {
    match cmd {
        GateCommand::Check { page } => match gate.require_session(Utc::now(), &page) {
            Ok(session) => {
                println!("[OK] {} may open {}", session.email, page);
                Ok(ExitCode::SUCCESS)
            }
            Err(redirect) => {
                println!("redirect {}", redirect);
                Ok(ExitCode::FAILURE)
            }
        },
        GateCommand::Encode { entries } => {
            println!("{}", AllowList::new(&entries).encode());
            Ok(ExitCode::SUCCESS)
        }
        GateCommand::List => {
            let list = gate.allow_list();
            if list.is_empty() {
                println!("Allow-list empty: everyone is admitted.");
            }
            for entry in list.entries() {
                println!("{}", entry);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                print!("{}", config.to_toml()?);
                println!();
                println!("# session file: {}", config.session_file().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_calc(gate: &mut AccessGate<FileStore>, config: &Config, cmd: CalcCommand) -> Result<ExitCode> {
    match cmd {
        CalcCommand::List { course } => {
            let courses: Vec<Course> = match course {
                Some(c) => vec![c.into()],
                None => Course::ALL.to_vec(),
            };
            for course in courses {
                println!("{}", course.title());
                for kind in course.calculators() {
                    println!("  {:<20} {}", kind.id(), kind.title());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        CalcCommand::Fields { kind } => {
            let kind: CalculatorKind = kind.parse()?;
            print_fields(kind);
            Ok(ExitCode::SUCCESS)
        }
        CalcCommand::Run { kind, values, json } => {
            let kind: CalculatorKind = kind.parse()?;
            require_session(gate, kind.course())?;
            let mut form = FormValues::initial(kind.fields());
            for assignment in &values {
                let (id, value) = FormValues::parse_assignment(assignment)?;
                if !kind.fields().iter().any(|f| f.id == id) {
                    bail!("'{}' is not a field of {} (see `mixte calc fields {}`)", id, kind, kind);
                }
                form.set(id, value);
            }
            let report = kind.run(&form)?;
            print_report(&report, config, json)
        }
        CalcCommand::Eval { file, json } => {
            let text = if file.as_os_str() == "-" {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                text
            } else {
                std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?
            };
            let item: CalculationItem = serde_json::from_str(&text).context("parsing calculation JSON")?;
            require_session(gate, item.kind().course())?;
            let report = item.calculate()?;
            print_report(&report, config, json)
        }
    }
}

/// Calculators sit behind the gate, like the course pages
fn require_session(gate: &mut AccessGate<FileStore>, course: Course) -> Result<Session> {
    let page = format!("/{}/{}/index.html", gate.content_root(), course.folder());
    match gate.require_session(Utc::now(), &page) {
        Ok(session) => Ok(session),
        Err(redirect) => bail!("login required: run `mixte login` (the course page redirects to {})", redirect),
    }
}

fn print_fields(kind: CalculatorKind) {
    println!("{} - {} ({})", kind.id(), kind.title(), kind.course());
    for field in kind.fields() {
        let requirement = match (field.required, field.default) {
            (true, _) => "required".to_string(),
            (false, Some(default)) => format!("default {}", default),
            (false, None) => "optional".to_string(),
        };
        let unit = if field.unit.is_empty() {
            String::new()
        } else {
            format!(" [{}]", field.unit)
        };
        println!("  {:<20} {}{} - {}", field.id, field.label, unit, requirement);
        if let FieldKind::Choice(source) = field.kind {
            println!("  {:<20} one of: {}", "", source.options().join(", "));
        }
    }
}

fn print_report(report: &Report, config: &Config, json: bool) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("═══════════════════════════════════════");
        print!("{}", report.to_text(&config.display.number_format()));
        println!("═══════════════════════════════════════");
    }
    Ok(if report.passes() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn handle_protect(config: &Config, cmd: ProtectCommand) -> Result<ExitCode> {
    let guard = EventGuard::from_config(&config.protection);
    match cmd {
        ProtectCommand::Keys => {
            if !guard.is_enabled() {
                println!("Protection disabled in configuration.");
            }
            for rule in guard.policy().rules() {
                let scope = if rule.content_only { " (outside inputs)" } else { "" };
                let feedback = if rule.notify { "notify" } else { "silent" };
                println!("  {:<16} {:<16} {}{}", rule.combo.to_string(), rule.action, feedback, scope);
            }
        }
        ProtectCommand::Check { combo, input } => {
            let combo: KeyCombo = combo.parse()?;
            let target = if input { Target::Input } else { Target::Content };
            let decision = guard.handle(&GuardEvent::KeyDown { combo, target });
            let label = match (decision.is_blocked(), decision.notifies()) {
                (false, _) => "[OK] allowed",
                (true, true) => "[BLOCKED] blocked with notification",
                (true, false) => "[BLOCKED] blocked silently",
            };
            println!("{} {}", combo, label);
        }
    }
    Ok(ExitCode::SUCCESS)
}
