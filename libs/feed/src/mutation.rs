use chrono::Utc;
use uuid::Uuid;

use entity::place::{round_coord, Place};
use entity::post::{NewPost, Post};
use entity::user::BusinessProfile;

use crate::store::FeedState;

/// Session-unique id for an optimistically created post: millisecond
/// timestamp in the high bits, a random word in the low bits so two
/// creations in the same millisecond cannot collide. Server ids are small
/// sequential integers, so this cannot shadow one before the next reload.
pub fn synthesize_post_id() -> i64 {
    let millis = Utc::now().timestamp_millis();
    let nonce = (Uuid::new_v4().as_u128() & 0xffff) as i64;
    (millis << 16) | nonce
}

/// Optimistic creation: the new post and its singleton place are prepended
/// to every projection before the server confirms. The server-issued id is
/// not reconciled back; the synthesized one stands until the next full
/// load.
pub fn create(state: &mut FeedState, input: &NewPost) -> Post {
    let id = synthesize_post_id();
    let latitude = round_coord(input.latitude);
    let longitude = round_coord(input.longitude);

    let post = Post {
        post_id: id,
        place_id: id,
        user_id: state.user_id.clone(),
        title: input.title.clone(),
        text: input.text.clone(),
        genre_id: input.genre.id(),
        num_reaction: 0,
        num_view: 0,
        post_date: Utc::now().to_rfc3339(),
        latitude,
        longitude,
        business_name: None,
        business_icon: None,
        images: if input.images.is_empty() {
            None
        } else {
            Some(input.images.clone())
        },
    };

    let place = Place {
        place_id: id,
        latitude,
        longitude,
        num_post: 1,
    };

    state.posts.insert(0, post.clone());
    state.filtered.insert(0, post.clone());
    state.places.insert(0, place);

    post
}

/// Removes the post from the raw collection and the filtered view and
/// closes the detail if it was showing it. Place counts are left as-is
/// until the next full load rebuilds the aggregate.
pub fn delete(state: &mut FeedState, post_id: i64) {
    state.posts.retain(|p| p.post_id != post_id);
    state.filtered.retain(|p| p.post_id != post_id);

    let selected = state
        .selection
        .as_ref()
        .is_some_and(|s| s.post_id == post_id);
    if selected {
        state.clear_selection();
    }
}

/// Fans a business-profile edit out to the denormalized fields of every
/// authored post, across all projections in one step. This is the one
/// propagation keyed by author rather than by post id.
pub fn apply_business_profile(state: &mut FeedState, profile: &BusinessProfile) {
    let name = profile.business_name.clone();
    let icon = profile.profile_image.clone();
    state.update_posts_by_user(&profile.user_id, |post| {
        post.business_name = Some(name.clone());
        post.business_icon = icon.clone();
    });
}
