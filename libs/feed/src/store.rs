use std::collections::HashSet;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use entity::place::Place;
use entity::post::Post;
use entity::user::UserRole;

use crate::filter::{self, FilterCriteria};
use crate::place;
use crate::selection::Selection;

/// The one owned copy of everything the engine derives. Raw posts,
/// filtered view, and the open detail are independently-held projections;
/// every mutation entry point must update all of them before releasing
/// the lock.
#[derive(Debug)]
pub struct FeedState {
    pub user_id: String,
    pub role: UserRole,
    pub posts: Vec<Post>,
    pub filtered: Vec<Post>,
    pub places: Vec<Place>,
    pub criteria: FilterCriteria,
    pub reacted: HashSet<i64>,
    pub selection: Option<Selection>,
    pub epoch: u64,
    pub keyword_debounce: Option<CancellationToken>,
}

impl FeedState {
    pub fn new(user_id: String, role: UserRole) -> Self {
        Self {
            user_id,
            role,
            posts: Vec::new(),
            filtered: Vec::new(),
            places: Vec::new(),
            criteria: FilterCriteria::default(),
            reacted: HashSet::new(),
            selection: None,
            epoch: 0,
            keyword_debounce: None,
        }
    }

    /// Initial-load install: raw collection, full filtered view, place
    /// aggregate, all in one step.
    pub fn install_posts(&mut self, posts: Vec<Post>) {
        self.filtered = posts.clone();
        self.places = place::aggregate(&posts);
        self.posts = posts;
    }

    /// Business accounts see the unfiltered feed; everyone else gets the
    /// criteria applied.
    pub fn recompute_filtered(&mut self, today: NaiveDate) {
        if self.role == UserRole::Business {
            self.filtered = self.posts.clone();
            return;
        }
        self.filtered = filter::apply(&self.posts, &self.criteria, today);
    }

    /// Applies `edit` to every copy of the post: raw, filtered, the
    /// selected post, and the detail's sibling list.
    pub fn update_post_projections(
        &mut self,
        post_id: i64,
        edit: impl Fn(&mut Post),
    ) {
        for post in self.posts.iter_mut().filter(|p| p.post_id == post_id) {
            edit(post);
        }
        for post in self.filtered.iter_mut().filter(|p| p.post_id == post_id)
        {
            edit(post);
        }
        if let Some(selection) = self.selection.as_mut() {
            if let Some(post) = selection.post.as_mut() {
                if post.post_id == post_id {
                    edit(post);
                }
            }
            if let Some(payload) = selection.payload_mut() {
                for post in payload
                    .posts_at_location
                    .iter_mut()
                    .filter(|p| p.post_id == post_id)
                {
                    edit(post);
                }
            }
        }
    }

    /// Same fan-out keyed by author instead of primary key; used by
    /// business-profile propagation.
    pub fn update_posts_by_user(
        &mut self,
        user_id: &str,
        edit: impl Fn(&mut Post),
    ) {
        for post in self.posts.iter_mut().filter(|p| p.user_id == user_id) {
            edit(post);
        }
        for post in self.filtered.iter_mut().filter(|p| p.user_id == user_id)
        {
            edit(post);
        }
        if let Some(selection) = self.selection.as_mut() {
            if let Some(post) = selection.post.as_mut() {
                if post.user_id == user_id {
                    edit(post);
                }
            }
            if let Some(payload) = selection.payload_mut() {
                for post in payload
                    .posts_at_location
                    .iter_mut()
                    .filter(|p| p.user_id == user_id)
                {
                    edit(post);
                }
            }
        }
    }

    /// Cancels whatever episode is open and clears it.
    pub fn clear_selection(&mut self) {
        if let Some(selection) = self.selection.take() {
            selection.cancel.cancel();
        }
    }
}
