//! The `classbook shell` command: one long-lived state, many commands.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use classbook_core::model::format_average;
use classbook_core::session::EditSession;
use classbook_core::statistics::status_breakdown;
use classbook_core::{ClientError, Controller};
use classbook_report::render_chart;

use super::{breakdown_line, stats_lines, students_table, Connection};

const CHART_WIDTH: usize = 40;

const HELP: &str = "\
Commands:
  list                     show students
  add <name> <average>     add a student
  edit <id>                start editing a student
  name <text>              set the edited name
  average <value>          set the edited average
  save | cancel            commit or discard the edit
  delete <id>              ask to delete a student
  yes | no                 answer a pending delete
  stats                    class mean, max, min
  chart | toggle           show the chart, or switch line/pie
  refresh                  reload from the store
  help | quit";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub async fn execute(conn: &Connection) -> Result<()> {
    let mut shell = Shell {
        controller: conn.controller()?,
    };
    let mut out = std::io::stdout();

    if let Err(e) = shell.controller.refresh().await {
        writeln!(out, "Error: {e}")?;
    }
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        if shell.handle(&line, &mut out).await? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

pub(crate) struct Shell {
    pub(crate) controller: Controller,
}

impl Shell {
    /// Run one command line. Controller errors are reported to `out` and
    /// the shell carries on; only I/O errors abort.
    pub(crate) async fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));

        let outcome: Result<Option<String>, ClientError> = match command {
            "" => Ok(None),
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => Ok(Some(HELP.to_string())),
            "list" => Ok(Some(self.list_text())),
            "refresh" => self
                .controller
                .refresh()
                .await
                .map(|_| Some("Reloaded.".into())),
            "add" => match rest.rsplit_once(char::is_whitespace) {
                Some((name, average)) => self
                    .controller
                    .add(name, average)
                    .await
                    .map(|_| Some("Added.".into())),
                None => Ok(Some("usage: add <name> <average>".into())),
            },
            "edit" => match parse_id(rest) {
                Some(id) => self.controller.begin_edit(id).map(|_| self.draft_text()),
                None => Ok(Some("usage: edit <id>".into())),
            },
            "name" => self.controller.edit_name(rest).map(|_| self.draft_text()),
            "average" => self
                .controller
                .edit_average(rest)
                .map(|_| self.draft_text()),
            "save" => self
                .controller
                .confirm_edit()
                .await
                .map(|_| Some("Saved.".into())),
            "cancel" => {
                self.controller.cancel_edit();
                Ok(Some("Edit discarded.".into()))
            }
            "delete" => match parse_id(rest) {
                Some(id) => self.controller.request_delete(id).map(|_| {
                    let name = self
                        .controller
                        .state()
                        .collection()
                        .find(id)
                        .map(|s| s.name.clone())
                        .unwrap_or_default();
                    Some(format!("Delete {name}? (yes/no)"))
                }),
                None => Ok(Some("usage: delete <id>".into())),
            },
            "yes" | "y" => self
                .controller
                .confirm_delete()
                .await
                .map(|_| Some("Deleted.".into())),
            "no" | "n" => {
                self.controller.cancel_delete();
                Ok(Some("Nothing deleted.".into()))
            }
            "stats" => {
                let state = self.controller.state();
                Ok(Some(format!(
                    "{}\n{}",
                    stats_lines(state.stats()),
                    breakdown_line(&status_breakdown(state.students()))
                )))
            }
            "chart" => Ok(Some(self.chart_text())),
            "toggle" => {
                self.controller.toggle_chart();
                Ok(Some(self.chart_text()))
            }
            other => Ok(Some(format!("unknown command '{other}', try 'help'"))),
        };

        match outcome {
            Ok(Some(text)) => writeln!(out, "{}", text.trim_end())?,
            Ok(None) => {}
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn list_text(&self) -> String {
        let state = self.controller.state();
        if state.students().is_empty() {
            return "No students yet.".to_string();
        }
        format!(
            "{}\n{}",
            students_table(state.students()),
            stats_lines(state.stats())
        )
    }

    fn draft_text(&self) -> Option<String> {
        let EditSession::Open {
            target_id,
            draft_name,
            draft_average,
        } = self.controller.state().edit_session()
        else {
            return None;
        };
        let stored = self
            .controller
            .state()
            .collection()
            .find(*target_id)
            .map(|s| format!(" (stored: {}, {})", s.name, format_average(s.average)))
            .unwrap_or_default();
        Some(format!(
            "Editing #{target_id}: name='{draft_name}' average='{draft_average}'{stored}. 'save' or 'cancel'."
        ))
    }

    fn chart_text(&self) -> String {
        let state = self.controller.state();
        format!(
            "[{} chart]\n{}",
            state.chart_mode(),
            render_chart(state.chart_mode(), state.stats(), CHART_WIDTH)
        )
    }
}

fn parse_id(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
