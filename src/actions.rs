/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::view_cmd::{ExportFormat, ViewCommand};
use crate::{IntoExecCommand, Session};
use adapta_core::error::AdaptaResult;
use adapta_core::view::{ViewConfig, ViewQuery};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(name = "actions", about = "Adaptation actions listing")]
pub struct ActionsArguments {
    #[arg(
        value_name = "SEARCH",
        help = "Filter rows by a case-insensitive substring, like the table search box"
    )]
    search: Option<String>,
    #[arg(
        long = "estado",
        value_name = "STATUS",
        help = "Filter by action status; 'Todos' clears the filter"
    )]
    status: Option<String>,
    #[arg(short = 'x', long = "export", value_enum, default_value_t, help = "Output format")]
    export: ExportFormat,
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the export to FILE instead of stdout"
    )]
    output: Option<PathBuf>,
}

impl IntoExecCommand for ActionsArguments {
    type Command = ViewCommand;

    fn into_exec_cmd(self, session: &Session) -> AdaptaResult<ViewCommand> {
        let query = ViewQuery {
            search: self.search,
            status: self.status,
            begin: session.begin,
            end: session.end,
        };
        Ok(ViewCommand::new(ViewConfig::actions(), query, self.export, self.output))
    }
}
