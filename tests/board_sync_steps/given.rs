//! Given steps for board synchronisation BDD scenarios.

use super::world::{BoardSyncWorld, names, run_async};
use corkboard::board::domain::{NewBoard, NewCard, NewLabel, NewList, UserId};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a board with lists "{lists}""#)]
fn board_with_lists(world: &mut BoardSyncWorld, lists: String) -> Result<(), eyre::Report> {
    let board = run_async(
        world
            .service
            .create_board(UserId::new(1), &NewBoard::new("Scenario")),
    )
    .wrap_err("create scenario board")?;
    run_async(world.service.load_board(board.id())).wrap_err("open scenario board")?;
    for title in names(&lists) {
        let list = run_async(world.service.create_list(board.id(), &NewList::new(&title)))
            .wrap_err_with(|| format!("create list {title}"))?;
        world.lists.insert(title, list.id());
    }
    world.board = Some(board.id());
    Ok(())
}

#[given(r#"list "{list}" holds cards "{cards}""#)]
fn list_holds_cards(
    world: &mut BoardSyncWorld,
    list: String,
    cards: String,
) -> Result<(), eyre::Report> {
    let list_id = world.list(&list)?;
    for title in names(&cards) {
        let card = run_async(world.service.create_card(list_id, &NewCard::new(&title)))
            .wrap_err_with(|| format!("create card {title}"))?;
        world.cards.insert(title, card.id());
    }
    Ok(())
}

#[given(r#"a label "{name}""#)]
fn a_label(world: &mut BoardSyncWorld, name: String) -> Result<(), eyre::Report> {
    let label = run_async(
        world
            .service
            .create_label(&NewLabel::new(&name, "#d73a4a")),
    )
    .wrap_err_with(|| format!("create label {name}"))?;
    world.labels.insert(name, label.id());
    Ok(())
}

#[given("the backend is offline")]
fn backend_offline(world: &mut BoardSyncWorld) -> Result<(), eyre::Report> {
    world
        .backend
        .set_offline(true)
        .wrap_err("take the backend offline")
}
