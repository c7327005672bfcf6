//! In-memory integration tests for drag-driven reordering.

use super::helpers::{Harness, harness, seed_board};
use corkboard::board::{
    domain::{BoardDrag, DropEvent},
    ports::{BoardPersistence, SyncOperation},
    services::SyncOutcome,
};
use corkboard::ordering::{DragDescription, DragLocation};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn card_moves_into_the_middle_of_another_list(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1", "c2", "c3"]), ("B", &["c4"])]).await?;
    let (list_a, list_b) = (seeded.list(0)?, seeded.list(1)?);
    let drag = DragDescription::new(
        seeded.card("c2")?,
        DragLocation::new(list_a, 1),
        DragLocation::new(list_b, 1),
    );

    let pending = harness.sync.submit_card_drag(drag)?;
    assert_eq!(harness.titles(list_a), ["c1", "c3"]);
    assert_eq!(harness.titles(list_b), ["c4", "c2"]);

    assert_eq!(pending.await, SyncOutcome::Confirmed);
    assert_eq!(harness.stored_titles(list_a).await?, ["c1", "c3"]);
    assert_eq!(harness.stored_titles(list_b).await?, ["c4", "c2"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn last_list_moves_to_the_front(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("L0", &[]), ("L1", &[]), ("L2", &[])]).await?;
    let drag = DragDescription::new(
        seeded.list(2)?,
        DragLocation::new(seeded.board, 2),
        DragLocation::new(seeded.board, 0),
    );

    let outcome = harness.sync.submit_drag(BoardDrag::List(drag))?.await;

    let visible: Vec<String> = harness
        .store()
        .lists()
        .iter()
        .map(|list| list.title().to_owned())
        .collect();
    let stored: Vec<String> = harness
        .backend
        .lists_of(seeded.board)
        .await?
        .iter()
        .map(|list| list.title().to_owned())
        .collect();
    assert_eq!(outcome, SyncOutcome::Confirmed);
    assert_eq!(visible, ["L2", "L0", "L1"]);
    assert_eq!(stored, visible);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_reorder_snaps_back_and_is_reported(mut harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1", "c2"]), ("B", &[])]).await?;
    let (list_a, list_b) = (seeded.list(0)?, seeded.list(1)?);
    let before = harness.store().card_snapshot();
    harness.backend.fail_next_writes(1)?;
    let drag = DragDescription::new(
        seeded.card("c1")?,
        DragLocation::new(list_a, 0),
        DragLocation::new(list_b, 0),
    );

    let outcome = harness.sync.submit_card_drag(drag)?.await;

    assert_eq!(outcome, SyncOutcome::RolledBack);
    assert_eq!(harness.store().card_snapshot(), before);
    assert_eq!(harness.stored_titles(list_a).await?, harness.titles(list_a));
    let failure = harness.failures.try_recv()?;
    assert_eq!(failure.operation(), SyncOperation::ReorderCards);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toolkit_drop_reports_drive_the_reorder(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1", "c2"]), ("B", &["c3"])]).await?;
    let (list_a, list_b) = (seeded.list(0)?, seeded.list(1)?);
    let raw = format!(
        r#"{{
            "draggableId": "card-{card}",
            "type": "card",
            "source": {{ "droppableId": "list-{list_b}", "index": 0 }},
            "destination": {{ "droppableId": "list-{list_a}", "index": 0 }}
        }}"#,
        card = seeded.card("c3")?,
    );
    let event: DropEvent = serde_json::from_str(&raw)?;

    let drag = BoardDrag::from_drop_event(seeded.board, &event)?
        .ok_or_else(|| eyre::eyre!("drop had a destination"))?;
    let outcome = harness.sync.submit_drag(drag)?.await;

    assert_eq!(outcome, SyncOutcome::Confirmed);
    assert_eq!(harness.titles(list_a), ["c3", "c1", "c2"]);
    assert!(harness.titles(list_b).is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_the_pickup_slot_changes_nothing(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1", "c2"])]).await?;
    let list_a = seeded.list(0)?;
    let drag = DragDescription::new(
        seeded.card("c2")?,
        DragLocation::new(list_a, 1),
        DragLocation::new(list_a, 1),
    );
    harness.backend.set_offline(true)?;

    let outcome = harness.sync.submit_card_drag(drag)?.await;

    assert_eq!(outcome, SyncOutcome::Unchanged);
    assert_eq!(harness.titles(list_a), ["c1", "c2"]);
    Ok(())
}
