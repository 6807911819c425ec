use entity::user::UserRole;

use crate::store::FeedState;

/// Optimistic reaction toggle, applied to every live projection of the
/// post in one step. Returns the new reacted state, or `None` when the
/// session role may not react (business accounts get a disabled
/// affordance, not a silent success).
///
/// The confirming network call is the engine's job; nothing here is rolled
/// back if it later fails.
pub fn toggle(state: &mut FeedState, post_id: i64) -> Option<bool> {
    if state.role == UserRole::Business {
        return None;
    }

    let was_reacted = state.reacted.contains(&post_id);
    state.update_post_projections(post_id, |post| {
        if was_reacted {
            post.num_reaction = post.num_reaction.saturating_sub(1);
        } else {
            post.num_reaction += 1;
        }
    });

    if was_reacted {
        state.reacted.remove(&post_id);
    } else {
        state.reacted.insert(post_id);
    }

    // The authoritative flag on an open detail moves in the same step.
    if let Some(selection) = state.selection.as_mut() {
        if selection.post_id == post_id {
            if let Some(payload) = selection.payload_mut() {
                payload.is_reacted = !was_reacted;
            }
        }
    }

    Some(!was_reacted)
}
