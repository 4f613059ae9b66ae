/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
mod actions;
mod executed;
mod indicators;
mod planned;
mod purge;
mod view_cmd;

use crate::actions::ActionsArguments;
use crate::executed::ExecutedArguments;
use crate::indicators::IndicatorsArguments;
use crate::planned::PlannedArguments;
use crate::purge::PurgeArguments;
use adapta_core::config::Preferences;
use adapta_core::err;
use adapta_core::error::{AdaptaError, AdaptaResult};
use adapta_core::locale::Lang;
use adapta_core::snapshot::Snapshot;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use env_logger::fmt::style::{AnsiColor, Color, Style};
use log::warn;
use std::env;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;
use std::sync::LazyLock;
use std::time::SystemTime;

static START: LazyLock<SystemTime> = LazyLock::new(SystemTime::now);

#[derive(Parser, Debug)]
#[command(name = "adapta", version = "0.3.0")]
struct MainArguments {
    #[arg(short, long, help = "Output colors")]
    color: bool,
    #[arg(long = "no-color", help = "Disable output colors")]
    no_color: bool,
    #[arg(
        short = 'f',
        long = "file",
        value_name = "SNAPSHOT_FILE",
        help = "Sets the view snapshot (CSV) to load"
    )]
    file: Option<PathBuf>,
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANG",
        help = "Interface language ('es' or 'en'); stored as the new preference"
    )]
    lang: Option<String>,
    #[arg(
        short = 'b',
        long = "begin",
        value_name = "BEGIN_DATE",
        help = "Only include rows dated on or after this date (YYYY-MM-DD)"
    )]
    begin: Option<String>,
    #[arg(
        short = 'e',
        long = "end",
        value_name = "END_DATE",
        help = "Only include rows dated on or before this date (YYYY-MM-DD)"
    )]
    end: Option<String>,
    #[command(subcommand)]
    command: CommandArguments,
}

#[derive(Subcommand, Debug)]
enum CommandArguments {
    Actions(ActionsArguments),
    Planned(PlannedArguments),
    Executed(ExecutedArguments),
    Indicators(IndicatorsArguments),
    Purge(PurgeArguments),
}

impl CommandArguments {
    pub fn exec(self, session: &Session) -> AdaptaResult<()> {
        match self {
            CommandArguments::Actions(args) => args.into_exec_cmd(session)?.execute(session),
            CommandArguments::Planned(args) => args.into_exec_cmd(session)?.execute(session),
            CommandArguments::Executed(args) => args.into_exec_cmd(session)?.execute(session),
            CommandArguments::Indicators(args) => args.into_exec_cmd(session)?.execute(session),
            CommandArguments::Purge(args) => args.into_exec_cmd(session)?.execute(session),
        }
    }
}

/// Everything a command needs from the invocation, built once in `main` and
/// threaded explicitly.
pub struct Session {
    pub lang: Lang,
    /// `Some` when the user forced colors on or off; `None` leaves the
    /// terminal detection in place.
    pub color: Option<bool>,
    pub file: Option<PathBuf>,
    pub begin: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Session {
    pub fn load_snapshot(&self) -> AdaptaResult<Snapshot> {
        let path = self
            .file
            .as_ref()
            .ok_or_else(|| err!("A view snapshot is required; pass one with --file"))?;
        Snapshot::from_csv_path(path)
    }
}

/// Used to create a command from command arguments.
pub trait IntoExecCommand {
    type Command: ExecCommand;

    fn into_exec_cmd(self, session: &Session) -> AdaptaResult<Self::Command>;
}

pub trait ExecCommand {
    fn execute(&self, session: &Session) -> AdaptaResult<()>;
}

fn main() {
    let error_style = Style::default().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold();
    let warn_style = Style::default().fg_color(Some(Color::Ansi(AnsiColor::Yellow))).bold();
    let info_style = Style::default().bold();
    let debug_style = Style::default();
    let trace_style = Style::default().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)));
    Builder::from_default_env()
        .format(move |buf, record| {
            let level_style = match record.level() {
                log::Level::Error => error_style,
                log::Level::Warn => warn_style,
                log::Level::Info => info_style,
                log::Level::Debug => debug_style,
                log::Level::Trace => trace_style,
            };
            writeln!(
                buf,
                "{:08} [{}] - {level_style}{}{level_style:#}",
                START.elapsed().unwrap_or_default().as_micros(),
                record.level(),
                record.args()
            )
        })
        .init();

    let main_args = MainArguments::parse();

    let mut preferences = Preferences::load();
    let lang = match main_args.lang.as_deref() {
        Some(code) => match code.parse::<Lang>() {
            Ok(lang) => {
                if lang != preferences.lang {
                    preferences.lang = lang;
                    if let Err(e) = preferences.store() {
                        warn!("Unable to store the language preference: {}", e);
                    }
                }
                lang
            }
            Err(e) => {
                print_error(e);
                exit(1)
            }
        },
        None => preferences.lang,
    };

    let begin = match main_args.begin.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => {
            print_error(e);
            exit(1)
        }
    };
    let end = match main_args.end.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => {
            print_error(e);
            exit(1)
        }
    };

    let color = if main_args.no_color {
        Some(false)
    } else if main_args.color {
        Some(true)
    } else {
        None
    };

    let session = Session { lang, color, file: main_args.file, begin, end };
    if let Err(e) = main_args.command.exec(&session) {
        print_error(e);
        exit(1)
    }
}

fn parse_date(s: &str) -> AdaptaResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| err!(e; "Unable to parse date '{}'; expected YYYY-MM-DD", s))
}

fn print_error(e: AdaptaError) {
    eprint!("{}:", env::args().next().unwrap_or_else(|| "adapta".to_string()));
    eprint!(" {}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprint!(": {}", cause);
        source = cause.source();
    }
    eprintln!();
}
