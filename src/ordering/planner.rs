//! Pure computation of reorder plans from drag descriptions.

use super::{
    DragDescription, OrderingError, OrderingResult, Positioned, PositionedCollection, ReorderPlan,
    sequence_placements,
};

/// Computes the complete arrangement that results from `drag`.
///
/// Dropping an item where it was picked up yields an empty plan. Otherwise
/// the plan re-describes every child of the source parent and, for
/// cross-parent moves, every child of the destination parent. The moved
/// item is located by id; `drag.source.index` only takes part in the no-op
/// check. The destination index is clamped to the length of the destination
/// sequence.
///
/// # Errors
///
/// Returns [`OrderingError::NotFound`] when the dragged item is not in
/// `items`, or [`OrderingError::InvalidArgument`] when it does not belong to
/// the source parent.
pub fn plan_reorder<T: Positioned>(
    items: &PositionedCollection<T>,
    drag: &DragDescription<T::Id, T::ParentKey>,
) -> OrderingResult<ReorderPlan<T::Id, T::ParentKey>> {
    if drag.is_noop() {
        return Ok(ReorderPlan::empty());
    }

    let moved = items
        .get(drag.item_id)
        .ok_or_else(|| OrderingError::not_found(drag.item_id))?;
    if moved.parent_key() != drag.source.parent {
        return Err(OrderingError::InvalidArgument(format!(
            "item {} belongs to {}, not to drag source {}",
            drag.item_id,
            moved.parent_key(),
            drag.source.parent
        )));
    }

    let mut source_ids = items.ordered_ids(drag.source.parent);
    source_ids.retain(|id| *id != drag.item_id);

    if !drag.crosses_parents() {
        insert_clamped(&mut source_ids, drag.destination.index, drag.item_id);
        return Ok(ReorderPlan::from_placements(sequence_placements(
            &source_ids,
            drag.source.parent,
        )));
    }

    let mut destination_ids = items.ordered_ids(drag.destination.parent);
    insert_clamped(&mut destination_ids, drag.destination.index, drag.item_id);

    let mut placements = sequence_placements(&source_ids, drag.source.parent);
    placements.extend(sequence_placements(
        &destination_ids,
        drag.destination.parent,
    ));
    Ok(ReorderPlan::from_placements(placements))
}

fn insert_clamped<I>(ids: &mut Vec<I>, index: usize, id: I) {
    let at = index.min(ids.len());
    ids.insert(at, id);
}
