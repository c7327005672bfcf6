//! In-memory integration tests for label toggling.

use super::helpers::{Harness, harness, seed_board};
use corkboard::board::{
    domain::{CardLabel, LabelAction, NewLabel},
    ports::SyncOperation,
    services::ToggleOutcome,
};
use rstest::rstest;
use std::collections::BTreeSet;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggling_attaches_then_detaches(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1"])]).await?;
    let card_id = seeded.card("c1")?;
    let label = harness
        .service
        .create_label(&NewLabel::new("bug", "#d73a4a"))
        .await?;

    let attached = harness.toggle.toggle(card_id, label.id())?.await;
    let after_attach = harness.backend.associations()?;
    let detached = harness.toggle.toggle(card_id, label.id())?.await;

    assert_eq!(attached, ToggleOutcome::Attached);
    assert_eq!(
        after_attach,
        BTreeSet::from([CardLabel::new(card_id, label.id())])
    );
    assert_eq!(detached, ToggleOutcome::Detached);
    assert!(harness.backend.associations()?.is_empty());
    assert!(harness.store().card_labels(card_id)?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn offline_toggle_restores_the_label_set(mut harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1"])]).await?;
    let card_id = seeded.card("c1")?;
    let label = harness
        .service
        .create_label(&NewLabel::new("bug", "#d73a4a"))
        .await?;
    harness.backend.set_offline(true)?;

    let pending = harness.toggle.toggle(card_id, label.id())?;
    let optimistic = harness.store().card_labels(card_id)?;
    let outcome = pending.await;

    assert_eq!(optimistic, vec![label.clone()]);
    assert_eq!(outcome, ToggleOutcome::RolledBack);
    assert!(harness.store().card_labels(card_id)?.is_empty());
    let failure = harness.failures.try_recv()?;
    assert_eq!(
        failure.operation(),
        SyncOperation::ToggleLabel {
            association: CardLabel::new(card_id, label.id()),
            action: LabelAction::Attach,
        }
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_card_forgets_its_labels(harness: Harness) -> eyre::Result<()> {
    let seeded = seed_board(&harness, &[("A", &["c1", "c2"])]).await?;
    let label = harness
        .service
        .create_label(&NewLabel::new("bug", "#d73a4a"))
        .await?;
    for title in ["c1", "c2"] {
        harness.toggle.toggle(seeded.card(title)?, label.id())?.await;
    }

    harness.service.delete_card(seeded.card("c1")?).await?;

    assert_eq!(
        harness.backend.associations()?,
        BTreeSet::from([CardLabel::new(seeded.card("c2")?, label.id())])
    );
    Ok(())
}
