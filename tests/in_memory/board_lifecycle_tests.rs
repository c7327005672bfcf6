//! In-memory integration tests for board, list and card lifecycles.

use super::helpers::{Harness, OWNER, harness, seed_board};
use corkboard::board::{
    adapters::memory::InMemoryBoardPersistence,
    ports::BoardPersistence,
    services::{BoardService, BoardStore},
};
use corkboard::ordering::Position;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reloading_reproduces_the_visible_arrangement(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1", "c2"]), ("B", &["c3"])]).await?;

    let fresh = BoardStore::new();
    let reloaded: BoardService<InMemoryBoardPersistence> =
        BoardService::new(fresh.clone(), Arc::clone(&harness.backend));
    reloaded.load_board(seeded.board).await?;

    assert_eq!(fresh.lists(), harness.store().lists());
    for list_id in &seeded.lists {
        assert_eq!(fresh.cards_of(*list_id), harness.store().cards_of(*list_id));
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_list_closes_the_gap_on_both_sides(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1"]), ("B", &["c2"]), ("C", &[])]).await?;

    harness.service.delete_list(seeded.list(0)?).await?;

    let visible: Vec<(String, Position)> = harness
        .store()
        .lists()
        .iter()
        .map(|list| (list.title().to_owned(), list.position()))
        .collect();
    let stored: Vec<(String, Position)> = harness
        .backend
        .lists_of(seeded.board)
        .await?
        .iter()
        .map(|list| (list.title().to_owned(), list.position()))
        .collect();
    assert_eq!(
        visible,
        [
            ("B".to_owned(), Position::new(0)),
            ("C".to_owned(), Position::new(1))
        ]
    );
    assert_eq!(stored, visible);
    assert!(harness.store().card(seeded.card("c1")?).is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_card_closes_the_gap_on_both_sides(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1", "c2", "c3"])]).await?;
    let list_a = seeded.list(0)?;

    harness.service.delete_card(seeded.card("c2")?).await?;

    assert_eq!(harness.titles(list_a), ["c1", "c3"]);
    assert_eq!(harness.stored_titles(list_a).await?, ["c1", "c3"]);
    assert!(harness.store().card_snapshot().all_contiguous());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_the_board_removes_it_from_the_owner(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1"])]).await?;

    harness.service.delete_board(seeded.board).await?;

    assert!(harness.service.boards_of(OWNER).await?.is_empty());
    assert!(harness.store().board().is_none());
    Ok(())
}
