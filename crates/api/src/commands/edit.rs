use std::io::Write;

use agenda_core::pages::{EditSchedulePage, EditState};
use agenda_domain::ScheduleId;
use anyhow::bail;

use super::{apply_form_args, finish_submit};
use crate::cli::FormArgs;
use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    id: &str,
    args: &FormArgs,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut page = EditSchedulePage::new(ScheduleId::new(id), ctx.tz, ctx.clock.clone());
    page.load(&ctx.service).await;

    if let EditState::Blocked(message) = page.state() {
        bail!("{message}");
    }
    if let Some(form) = page.form_mut() {
        apply_form_args(form, args);
    }

    let outcome = page.submit(&ctx.service).await;
    finish_submit(ctx, outcome, out)
}
