use std::io::Write;

use agenda_core::pages::DashboardPage;

use super::ready;
use crate::context::AppContext;
use crate::utils::render;

pub async fn run(ctx: &AppContext, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut page = DashboardPage::new(ctx.tz, ctx.config.ui.dashboard_recent);
    page.load(&ctx.service).await;

    let view = ready(page.state())?;
    out.write_all(render::dashboard(view).as_bytes())?;
    Ok(())
}
