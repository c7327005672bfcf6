//! Then steps for board synchronisation BDD scenarios.

use super::world::{BoardSyncWorld, names, run_async};
use corkboard::board::{
    domain::{Card, List},
    ports::BoardPersistence,
    services::{SyncOutcome, ToggleOutcome},
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

fn visible_titles(world: &BoardSyncWorld, list: &str) -> Result<Vec<String>, eyre::Report> {
    let list_id = world.list(list)?;
    Ok(world
        .service
        .store()
        .cards_of(list_id)
        .iter()
        .map(|card| card.title().to_owned())
        .collect())
}

#[then(r#"list "{list}" shows cards "{cards}""#)]
fn list_shows_cards(world: &BoardSyncWorld, list: String, cards: String) -> Result<(), eyre::Report> {
    let shown = visible_titles(world, &list)?;
    let expected = names(&cards);
    if shown != expected {
        return Err(eyre::eyre!("list {list} shows {shown:?}, expected {expected:?}"));
    }
    Ok(())
}

#[then(r#"list "{list}" shows no cards"#)]
fn list_shows_no_cards(world: &BoardSyncWorld, list: String) -> Result<(), eyre::Report> {
    let shown = visible_titles(world, &list)?;
    if !shown.is_empty() {
        return Err(eyre::eyre!("list {list} still shows {shown:?}"));
    }
    Ok(())
}

#[then(r#"the lists read "{lists}""#)]
fn lists_read(world: &BoardSyncWorld, lists: String) -> Result<(), eyre::Report> {
    let shown: Vec<String> = world
        .service
        .store()
        .lists()
        .iter()
        .map(|list| list.title().to_owned())
        .collect();
    let expected = names(&lists);
    if shown != expected {
        return Err(eyre::eyre!("board shows lists {shown:?}, expected {expected:?}"));
    }
    Ok(())
}

#[then(r#"the backend stores cards "{cards}" for list "{list}""#)]
fn backend_stores_cards(
    world: &BoardSyncWorld,
    cards: String,
    list: String,
) -> Result<(), eyre::Report> {
    let list_id = world.list(&list)?;
    let stored = run_async(world.backend.cards_of(list_id))
        .wrap_err_with(|| format!("read stored cards of list {list}"))?;
    let titles: Vec<String> = stored.iter().map(|card: &Card| card.title().to_owned()).collect();
    let expected = names(&cards);
    if titles != expected {
        return Err(eyre::eyre!("backend stores {titles:?} for {list}, expected {expected:?}"));
    }
    Ok(())
}

#[then(r#"the backend stores lists "{lists}""#)]
fn backend_stores_lists(world: &BoardSyncWorld, lists: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?;
    let stored = run_async(world.backend.lists_of(board_id)).wrap_err("read stored lists")?;
    let titles: Vec<String> = stored.iter().map(|list: &List| list.title().to_owned()).collect();
    let expected = names(&lists);
    if titles != expected {
        return Err(eyre::eyre!("backend stores lists {titles:?}, expected {expected:?}"));
    }
    Ok(())
}

#[then(r#"the sync outcome is "{outcome}""#)]
fn sync_outcome_is(world: &BoardSyncWorld, outcome: String) -> Result<(), eyre::Report> {
    let expected = match outcome.as_str() {
        "unchanged" => SyncOutcome::Unchanged,
        "confirmed" => SyncOutcome::Confirmed,
        "rolled back" => SyncOutcome::RolledBack,
        other => return Err(eyre::eyre!("unknown sync outcome in scenario: {other}")),
    };
    let actual = world
        .last_sync
        .ok_or_else(|| eyre::eyre!("missing sync outcome"))?;
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, got {actual:?}"));
    }
    Ok(())
}

#[then(r#"the toggle outcome is "{outcome}""#)]
fn toggle_outcome_is(world: &BoardSyncWorld, outcome: String) -> Result<(), eyre::Report> {
    let expected = match outcome.as_str() {
        "attached" => ToggleOutcome::Attached,
        "detached" => ToggleOutcome::Detached,
        "rolled back" => ToggleOutcome::RolledBack,
        other => return Err(eyre::eyre!("unknown toggle outcome in scenario: {other}")),
    };
    let actual = world
        .last_toggle
        .ok_or_else(|| eyre::eyre!("missing toggle outcome"))?;
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, got {actual:?}"));
    }
    Ok(())
}

#[then(r#"card "{card}" carries labels "{labels}""#)]
fn card_carries_labels(
    world: &BoardSyncWorld,
    card: String,
    labels: String,
) -> Result<(), eyre::Report> {
    let card_id = world.card(&card)?;
    let carried: Vec<String> = world
        .service
        .store()
        .card_labels(card_id)
        .wrap_err_with(|| format!("read labels of card {card}"))?
        .iter()
        .map(|label| label.name().to_owned())
        .collect();
    let expected = names(&labels);
    if carried != expected {
        return Err(eyre::eyre!("card {card} carries {carried:?}, expected {expected:?}"));
    }
    Ok(())
}

#[then(r#"card "{card}" carries no labels"#)]
fn card_carries_no_labels(world: &BoardSyncWorld, card: String) -> Result<(), eyre::Report> {
    let card_id = world.card(&card)?;
    let visible = world
        .service
        .store()
        .card(card_id)
        .ok_or_else(|| eyre::eyre!("card {card} is not visible"))?;
    if !visible.labels().is_empty() {
        return Err(eyre::eyre!("card {card} still carries {:?}", visible.labels()));
    }
    Ok(())
}

#[then("a sync failure is reported")]
fn failure_reported(world: &BoardSyncWorld) -> Result<(), eyre::Report> {
    if world.reported.len() != 1 {
        return Err(eyre::eyre!(
            "expected one reported failure, got {:?}",
            world.reported
        ));
    }
    Ok(())
}

#[then("no sync failure is reported")]
fn no_failure_reported(world: &BoardSyncWorld) -> Result<(), eyre::Report> {
    if !world.reported.is_empty() {
        return Err(eyre::eyre!("unexpected failures: {:?}", world.reported));
    }
    Ok(())
}
