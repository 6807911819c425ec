use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use entity::post::Post;

/// Authoritative detail for the inspected post, or a locally-derived
/// approximation when the fetch failed.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct DetailPayload {
    pub is_reacted: bool,
    pub posts_at_location: Vec<Post>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Phase {
    Loading,
    Ready(DetailPayload),
    Failed(DetailPayload),
}

/// One selection episode: pin click to close. `epoch` ties the episode to
/// the detail fetch it issued; a response carrying any other epoch must
/// never mutate it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub post_id: i64,
    pub epoch: u64,
    /// Locally-known copy shown while the fetch is in flight; replaced by
    /// the server's post once the detail arrives.
    pub post: Option<Post>,
    pub phase: Phase,
    pub cancel: CancellationToken,
}

impl Selection {
    pub fn payload(&self) -> Option<&DetailPayload> {
        match &self.phase {
            Phase::Loading => None,
            Phase::Ready(payload) | Phase::Failed(payload) => Some(payload),
        }
    }

    pub fn payload_mut(&mut self) -> Option<&mut DetailPayload> {
        match &mut self.phase {
            Phase::Loading => None,
            Phase::Ready(payload) | Phase::Failed(payload) => Some(payload),
        }
    }

    /// Reacted-state with the fallback rule: the payload wins once present,
    /// the local reaction set covers the loading window.
    pub fn is_reacted(&self, reacted_fallback: bool) -> bool {
        match self.payload() {
            Some(payload) => payload.is_reacted,
            None => reacted_fallback,
        }
    }
}

/// Returned from `select` so the caller owns an explicit way to cancel the
/// fetch and, in tests, to await its completion.
#[derive(Debug)]
pub struct EpisodeHandle {
    pub cancel: CancellationToken,
    pub task: JoinHandle<()>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_payload_only_after_loading() {
        // Arrange
        let mut selection = Selection {
            post_id: 1,
            epoch: 1,
            post: None,
            phase: Phase::Loading,
            cancel: CancellationToken::new(),
        };

        // Assert
        assert!(selection.payload().is_none());

        // Act
        selection.phase = Phase::Ready(DetailPayload::default());

        // Assert
        assert!(selection.payload().is_some());
    }

    #[test]
    fn test_is_reacted_prefers_payload() {
        let mut selection = Selection {
            post_id: 1,
            epoch: 1,
            post: None,
            phase: Phase::Loading,
            cancel: CancellationToken::new(),
        };

        assert!(selection.is_reacted(true));

        selection.phase = Phase::Ready(DetailPayload {
            is_reacted: false,
            posts_at_location: vec![],
        });

        assert!(!selection.is_reacted(true));
    }
}
