use std::io::Write;

use agenda_core::pages::CreateSchedulePage;

use super::{apply_form_args, finish_submit};
use crate::cli::FormArgs;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, args: &FormArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut page = CreateSchedulePage::new(ctx.tz, ctx.clock.clone());
    apply_form_args(page.form_mut(), args);

    let outcome = page.submit(&ctx.service).await;
    finish_submit(ctx, outcome, out)
}
