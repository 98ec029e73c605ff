use std::io::Write;

use agenda_core::pages::SchedulesListPage;

use super::ready;
use crate::cli::ListArgs;
use crate::context::AppContext;
use crate::utils::render;

pub async fn run(ctx: &AppContext, args: &ListArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.ui.page_size);
    let mut page = SchedulesListPage::new(ctx.tz).with_limit(limit);
    page.set_filter(args.status);
    let mut page = page.with_page(args.page);
    page.load(&ctx.service).await;

    let view = ready(page.state())?;
    out.write_all(render::list(view).as_bytes())?;
    Ok(())
}
