//! Subcommand handlers
//!
//! Each handler drives one page controller and writes its view to `out`.
//! Failures that the view already explains are returned as plain messages.

mod cancel;
mod create;
mod dashboard;
mod edit;
mod list;
mod show;

use std::io::Write;
use std::time::Instant;

use agenda_core::{ScheduleForm, SubmitOutcome, ViewState};
use anyhow::{anyhow, bail};
use chrono::TimeZone;

use crate::cli::{Command, FormArgs};
use crate::context::AppContext;
use crate::utils::logging::log_command_execution;
use crate::utils::prompt::{Confirm, Preset};
use crate::utils::render;

pub use cancel::run as cancel;
pub use create::run as create;
pub use dashboard::run as dashboard;
pub use edit::run as edit;
pub use list::run as list;
pub use show::run as show;

/// Message returned when a form was not saved
pub const NOT_SAVED: &str = "Schedule was not saved";

/// Dispatch `command`, logging its duration and outcome
pub async fn execute(
    ctx: &AppContext,
    command: &Command,
    out: &mut dyn Write,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let name = command_name(command);

    let result = match command {
        Command::Dashboard => dashboard(ctx, out).await,
        Command::List(args) => list(ctx, args, out).await,
        Command::Show { id } => show(ctx, id, out).await,
        Command::Create(form) => create(ctx, form, out).await,
        Command::Edit { id, form } => edit(ctx, id, form, out).await,
        Command::Cancel { id, yes: true } => cancel(ctx, id, out, &mut Preset(true)).await,
        Command::Cancel { id, yes: false } => cancel(ctx, id, out, confirm).await,
    };

    log_command_execution(name, start.elapsed(), result.is_ok());
    result
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Dashboard => "dashboard",
        Command::List(_) => "list",
        Command::Show { .. } => "show",
        Command::Create(_) => "create",
        Command::Edit { .. } => "edit",
        Command::Cancel { .. } => "cancel",
    }
}

/// The loaded view, or its error message
fn ready<T>(state: &ViewState<T>) -> anyhow::Result<&T> {
    match state {
        ViewState::Ready(view) => Ok(view),
        ViewState::Error(message) => Err(anyhow!("{message}")),
        ViewState::Loading => Err(anyhow!("View did not finish loading")),
    }
}

fn flush_notifications(ctx: &AppContext, out: &mut dyn Write) -> std::io::Result<()> {
    for notification in ctx.notifications.drain() {
        out.write_all(render::notification(&notification).as_bytes())?;
    }
    Ok(())
}

/// Copy the given arguments into the form
///
/// A frequency without `--type` implies a recurring schedule. Contacts, when
/// given, replace every existing row.
fn apply_form_args<Tz: TimeZone>(form: &mut ScheduleForm<Tz>, args: &FormArgs) {
    if let Some(message) = &args.message {
        form.set_message(message);
    }
    if let Some(date) = &args.date {
        form.set_date(date);
    }
    if let Some(time) = &args.time {
        form.set_time(time);
    }
    match (args.kind, args.frequency) {
        (Some(kind), _) => form.set_kind(kind),
        (None, Some(_)) => form.set_kind(agenda_domain::ScheduleKind::Recurring),
        (None, None) => {}
    }
    if let Some(frequency) = args.frequency {
        form.set_frequency(Some(frequency));
    }

    if !args.contacts.is_empty() {
        let previous = form.draft().contacts.ids();
        for contact in &args.contacts {
            let id = form.append_contact();
            form.set_contact_name(id, &contact.name);
            form.set_contact_phone(id, &contact.phone);
        }
        for id in previous {
            form.remove_contact(id);
        }
    }
}

/// Report a submit outcome; anything but navigation is an error
fn finish_submit(
    ctx: &AppContext,
    outcome: SubmitOutcome,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Navigate(route) => {
            flush_notifications(ctx, out)?;
            writeln!(out, "Next: {route}")?;
            Ok(())
        }
        SubmitOutcome::Invalid(report) => {
            writeln!(out, "Please fix the following fields:")?;
            out.write_all(render::field_errors(&report).as_bytes())?;
            bail!(NOT_SAVED)
        }
        SubmitOutcome::Failed(_) => {
            flush_notifications(ctx, out)?;
            bail!(NOT_SAVED)
        }
        SubmitOutcome::Unavailable(message) => bail!(message),
    }
}
