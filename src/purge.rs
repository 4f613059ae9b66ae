/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::{ExecCommand, IntoExecCommand, Session};
use adapta_core::delete::{HttpEndpoint, purge_all};
use adapta_core::err;
use adapta_core::error::AdaptaResult;
use std::io::{self, BufRead, Write};

#[derive(clap::Args, Debug)]
#[command(name = "purge", about = "Delete registered actions on the server")]
pub struct PurgeArguments {
    #[arg(value_name = "ACTION_ID", help = "Ids of the actions to delete")]
    ids: Vec<String>,
    #[arg(long = "base-url", value_name = "URL", help = "Registry server base URL")]
    base_url: String,
    #[arg(
        long = "csrf-token",
        value_name = "TOKEN",
        help = "CSRF token forwarded with each request"
    )]
    csrf_token: Option<String>,
    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    yes: bool,
}

pub struct PurgeCommand {
    ids: Vec<String>,
    endpoint: HttpEndpoint,
    yes: bool,
}

impl IntoExecCommand for PurgeArguments {
    type Command = PurgeCommand;

    fn into_exec_cmd(self, session: &Session) -> AdaptaResult<PurgeCommand> {
        if self.ids.is_empty() {
            return Err(err!(session.lang.select_at_least_one()));
        }
        let endpoint = HttpEndpoint::new(self.base_url, self.csrf_token)?;
        Ok(PurgeCommand { ids: self.ids, endpoint, yes: self.yes })
    }
}

impl ExecCommand for PurgeCommand {
    fn execute(&self, session: &Session) -> AdaptaResult<()> {
        if !self.yes && !confirm(&session.lang.confirm_delete(self.ids.len()))? {
            println!("{}", session.lang.delete_cancelled());
            return Ok(());
        }
        let outcome = purge_all(&self.endpoint, &self.ids);
        println!("{}", session.lang.delete_summary(outcome.deleted, outcome.errors));
        Ok(())
    }
}

fn confirm(prompt: &str) -> AdaptaResult<bool> {
    eprint!("{} [s/N] ", prompt);
    io::stderr().flush().map_err(|e| err!(e; "Unable to flush the prompt"))?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| err!(e; "Unable to read the confirmation"))?;
    Ok(matches!(answer.trim(), "s" | "S" | "si" | "sí" | "y" | "Y" | "yes"))
}
