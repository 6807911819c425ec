use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use client::posts::{CreatePostRequest, PostsApi};
use entity::place::Place;
use entity::post::{NewPost, Post};
use entity::user::{BusinessProfile, UserRole};

use crate::filter::{DateFilter, FilterCriteria, GenreFilter, KEYWORD_DEBOUNCE};
use crate::selection::{DetailPayload, EpisodeHandle, Phase, Selection};
use crate::store::FeedState;

pub mod filter;
pub mod mutation;
pub mod place;
pub mod reaction;
pub mod selection;
pub mod store;

/// The feed consistency engine: one owned store of the post collection and
/// its derived projections, with every mutation funneled through the entry
/// points below. Generic over the backend surface so tests can script it.
pub struct FeedEngine<C> {
    state: Arc<Mutex<FeedState>>,
    client: C,
}

impl<C> FeedEngine<C>
where
    C: PostsApi + Clone + Send + Sync + 'static,
{
    pub fn new(client: C, user_id: String, role: UserRole) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedState::new(user_id, role))),
            client,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap()
    }

    /// Fetches the post list and installs raw collection, filtered view,
    /// and place aggregate in one step. A failed load is logged and leaves
    /// every projection empty; there is no retry.
    pub async fn load_initial(&self) {
        info!(task = "load posts");
        match self.client.get_posts().await {
            Ok(response) => {
                let count = response.posts.len();
                self.lock().install_posts(response.posts);
                info!(task = "load posts", count);
            }
            Err(e) => {
                error!(task = "load posts", err = e.to_string());
            }
        }
    }

    /// Starts a selection episode: supersedes (and cancels) any episode in
    /// flight, shows the locally-known post immediately, and issues the
    /// authoritative detail fetch. The response is applied only if this
    /// episode is still the current one, checked by epoch; a response that
    /// lost the race is discarded without touching state.
    pub fn select(&self, post_id: i64) -> EpisodeHandle {
        let token = CancellationToken::new();
        let epoch = {
            let mut state = self.lock();
            state.clear_selection();
            state.epoch += 1;
            let prefill = state
                .posts
                .iter()
                .find(|p| p.post_id == post_id)
                .cloned();
            state.selection = Some(Selection {
                post_id,
                epoch: state.epoch,
                post: prefill,
                phase: Phase::Loading,
                cancel: token.clone(),
            });
            state.epoch
        };

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let cancel = token.clone();
        let task = tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = client.get_post_detail(post_id) => result,
            };

            let mut state = state.lock().unwrap();
            match state.selection.as_ref() {
                Some(selection) if selection.epoch == epoch => {}
                _ => return,
            }

            let (authoritative, phase) = match result {
                Ok(detail) => (
                    Some(detail.post),
                    Phase::Ready(DetailPayload {
                        is_reacted: detail.is_reacted,
                        posts_at_location: detail.posts_at_location,
                    }),
                ),
                Err(e) => {
                    error!(
                        task = "load post detail",
                        post_id,
                        err = e.to_string()
                    );
                    // Degrade to what the client already knows: reaction
                    // membership from the local set, siblings from the raw
                    // collection.
                    let place_id = state
                        .posts
                        .iter()
                        .find(|p| p.post_id == post_id)
                        .map(|p| p.place_id);
                    let siblings = match place_id {
                        Some(place_id) => state
                            .posts
                            .iter()
                            .filter(|p| {
                                p.place_id == place_id && p.post_id != post_id
                            })
                            .cloned()
                            .collect(),
                        None => Vec::new(),
                    };
                    (
                        None,
                        Phase::Failed(DetailPayload {
                            is_reacted: state.reacted.contains(&post_id),
                            posts_at_location: siblings,
                        }),
                    )
                }
            };

            if let Some(selection) = state.selection.as_mut() {
                if authoritative.is_some() {
                    selection.post = authoritative;
                }
                selection.phase = phase;
            }
        });

        EpisodeHandle { cancel: token, task }
    }

    /// Clears the selection unconditionally and cancels the detail fetch
    /// if one is still in flight.
    pub fn close_detail(&self) {
        self.lock().clear_selection();
    }

    /// Optimistic reaction toggle: add if absent, remove if present,
    /// followed by a fire-and-forget confirming call. Returns `None` for
    /// business accounts, which may not react. A confirm failure is
    /// logged; the optimistic mutation stands.
    pub fn toggle_reaction(&self, post_id: i64) -> Option<JoinHandle<()>> {
        {
            let mut state = self.lock();
            reaction::toggle(&mut state, post_id)?;
        }

        let client = self.client.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = client.toggle_reaction(post_id).await {
                error!(
                    task = "confirm reaction",
                    post_id,
                    err = e.to_string()
                );
            }
        }))
    }

    /// Optimistic creation; the returned post carries the synthesized id
    /// that stands until the next full load.
    pub fn create_post(&self, input: NewPost) -> (Post, JoinHandle<()>) {
        let post = {
            let mut state = self.lock();
            mutation::create(&mut state, &input)
        };

        let request = CreatePostRequest {
            title: input.title,
            text: input.text,
            genre: input.genre.label().to_string(),
            latitude: post.latitude,
            longitude: post.longitude,
            images: input.images,
        };
        let client = self.client.clone();
        let post_id = post.post_id;
        let handle = tokio::spawn(async move {
            if let Err(e) = client.create_post(request).await {
                error!(task = "confirm create", post_id, err = e.to_string());
            }
        });

        (post, handle)
    }

    /// Optimistic removal plus the confirming anonymize call.
    pub fn delete_post(&self, post_id: i64) -> JoinHandle<()> {
        {
            let mut state = self.lock();
            mutation::delete(&mut state, post_id);
        }

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.anonymize_post(post_id).await {
                error!(task = "confirm delete", post_id, err = e.to_string());
            }
        })
    }

    /// Propagates a business-profile edit to the denormalized fields of
    /// every authored post, across all projections.
    pub fn apply_business_profile(&self, profile: &BusinessProfile) {
        let mut state = self.lock();
        mutation::apply_business_profile(&mut state, profile);
    }

    /// Keyword edits are applied only after a quiescence window; a newer
    /// edit cancels the pending one.
    pub fn set_keyword(&self, keyword: String) -> JoinHandle<()> {
        let token = CancellationToken::new();
        {
            let mut state = self.lock();
            if let Some(pending) = state.keyword_debounce.take() {
                pending.cancel();
            }
            state.keyword_debounce = Some(token.clone());
        }

        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = sleep(KEYWORD_DEBOUNCE) => {
                    let mut state = state.lock().unwrap();
                    state.criteria.keyword = keyword;
                    state.recompute_filtered(Local::now().date_naive());
                }
            }
        })
    }

    pub fn set_genre(&self, genre: GenreFilter) {
        let mut state = self.lock();
        state.criteria.genre = genre;
        state.recompute_filtered(Local::now().date_naive());
    }

    pub fn set_date_filter(&self, date: DateFilter) {
        let mut state = self.lock();
        state.criteria.date = date;
        state.recompute_filtered(Local::now().date_naive());
    }

    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    pub fn filtered(&self) -> Vec<Post> {
        self.lock().filtered.clone()
    }

    pub fn places(&self) -> Vec<Place> {
        self.lock().places.clone()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.lock().selection.clone()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.lock().criteria.clone()
    }

    /// Reacted-state for a post: the open detail's payload is
    /// authoritative when present, the local reaction set otherwise.
    pub fn is_reacted(&self, post_id: i64) -> bool {
        let state = self.lock();
        let fallback = state.reacted.contains(&post_id);
        match state.selection.as_ref() {
            Some(selection) if selection.post_id == post_id => {
                selection.is_reacted(fallback)
            }
            _ => fallback,
        }
    }
}
