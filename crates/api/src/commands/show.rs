use std::io::Write;

use agenda_core::pages::ScheduleDetailsPage;
use agenda_domain::ScheduleId;

use super::ready;
use crate::context::AppContext;
use crate::utils::render;

pub async fn run(ctx: &AppContext, id: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut page = ScheduleDetailsPage::new(ScheduleId::new(id), ctx.tz);
    page.load(&ctx.service).await;

    let view = ready(page.state())?;
    out.write_all(render::details(view).as_bytes())?;
    if let Some(route) = page.edit_route() {
        writeln!(out, "\nActions: edit ({route}), cancel")?;
    }
    Ok(())
}
