use std::io::Write;

use agenda_core::pages::ScheduleDetailsPage;
use agenda_domain::ScheduleId;
use anyhow::bail;

use super::{flush_notifications, ready};
use crate::context::AppContext;
use crate::utils::prompt::Confirm;
use crate::utils::render;

/// Show the schedule, ask for confirmation, then cancel it
pub async fn run(
    ctx: &AppContext,
    id: &str,
    out: &mut dyn Write,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let mut page = ScheduleDetailsPage::new(ScheduleId::new(id), ctx.tz);
    page.load(&ctx.service).await;

    let view = ready(page.state())?;
    out.write_all(render::details(view).as_bytes())?;
    if !view.has_actions() {
        bail!("Only scheduled messages can be canceled");
    }

    if !confirm.confirm("Cancel this schedule? It will not be sent.")? {
        writeln!(out, "Nothing was canceled")?;
        return Ok(());
    }

    let result = page.cancel(&ctx.service).await;
    flush_notifications(ctx, out)?;
    match result {
        Ok(route) => {
            writeln!(out, "Next: {route}")?;
            Ok(())
        }
        Err(_) => bail!("Schedule was not canceled"),
    }
}
