use std::rc::Rc;

use waypoint_core::{Component, Context, Scheduler};
use waypoint_router::*;

fn filter_panel(cx: &mut waypoint_core::RenderCx<'_>) -> Result<QueryParamSetter> {
    let (filter, set_filter) = use_query_param(cx, "filter")?;
    log::info!("filter panel: {}", filter.as_deref().unwrap_or("<none>"));
    Ok(set_filter)
}

fn board_header(cx: &mut waypoint_core::RenderCx<'_>) -> Result<PathParamSetter> {
    let (board, set_board) = use_path_param(cx, "boardId")?;
    log::info!("board header: {}", board.as_deref().unwrap_or("<none>"));
    Ok(set_board)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scheduler = Scheduler::new();
    let history = MemoryHistory::new(&scheduler, "/projects/1/board/7?filter=open#top");
    let config = RouterConfig::new().with_route(Route::new(
        "board",
        "/projects/:projectId/board/:boardId",
    )?);
    let router = Router::mount(
        &Context::new(scheduler.clone()),
        Rc::new(history.clone()),
        config,
    );

    let filters = Component::mount(router.context(), filter_panel);
    let header = Component::mount(router.context(), board_header);

    if let Some(Ok(set_filter)) = filters.output() {
        set_filter.set("closed");
    }
    scheduler.tick();

    if let Some(Ok(set_board)) = header.output() {
        set_board.set("8")?;
    }
    scheduler.tick();

    if let Some(Ok(set_filter)) = filters.output() {
        set_filter.remove();
    }
    scheduler.tick();

    for url in history.pushed() {
        println!("pushed {url}");
    }
    println!(
        "renders: filter panel {}, board header {}",
        filters.render_count(),
        header.render_count()
    );

    filters.unmount();
    header.unmount();
    router.unmount();
    Ok(())
}
