//! When steps for board synchronisation BDD scenarios.

use super::world::{BoardSyncWorld, run_async};
use corkboard::board::domain::{CardDrag, ListDrag};
use corkboard::ordering::{DragDescription, DragLocation};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"card "{card}" is dragged to list "{list}" at index {index:usize}"#)]
fn card_dragged(
    world: &mut BoardSyncWorld,
    card: String,
    list: String,
    index: usize,
) -> Result<(), eyre::Report> {
    let card_id = world.card(&card)?;
    let destination = world.list(&list)?;
    let visible = world
        .service
        .store()
        .card(card_id)
        .ok_or_else(|| eyre::eyre!("card {card} is not visible"))?;
    let drag: CardDrag = DragDescription::new(
        card_id,
        DragLocation::new(visible.list_id(), visible.position().index()),
        DragLocation::new(destination, index),
    );

    let pending = world
        .sync
        .submit_card_drag(drag)
        .wrap_err_with(|| format!("submit drag of card {card}"))?;
    world.last_sync = Some(run_async(pending));
    world.collect_failures();
    Ok(())
}

#[when(r#"list "{list}" is dragged to index {index:usize}"#)]
fn list_dragged(world: &mut BoardSyncWorld, list: String, index: usize) -> Result<(), eyre::Report> {
    let board_id = world.board()?;
    let list_id = world.list(&list)?;
    let visible = world
        .service
        .store()
        .list(list_id)
        .ok_or_else(|| eyre::eyre!("list {list} is not visible"))?;
    let drag: ListDrag = DragDescription::new(
        list_id,
        DragLocation::new(board_id, visible.position().index()),
        DragLocation::new(board_id, index),
    );

    let pending = world
        .sync
        .submit_list_drag(drag)
        .wrap_err_with(|| format!("submit drag of list {list}"))?;
    world.last_sync = Some(run_async(pending));
    world.collect_failures();
    Ok(())
}

#[when(r#"label "{label}" is toggled on card "{card}""#)]
fn label_toggled(world: &mut BoardSyncWorld, label: String, card: String) -> Result<(), eyre::Report> {
    let label_id = world.label(&label)?;
    let card_id = world.card(&card)?;

    let pending = world
        .toggle
        .toggle(card_id, label_id)
        .wrap_err_with(|| format!("toggle label {label} on card {card}"))?;
    world.last_toggle = Some(run_async(pending));
    world.collect_failures();
    Ok(())
}
