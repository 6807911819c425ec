use std::collections::HashMap;

use entity::place::Place;
use entity::post::Post;

/// Rebuilds the place aggregate from the raw post collection in one pass.
/// Each distinct `place_id` yields one place carrying the coordinates of
/// its first-seen member and the member count, in first-seen order.
///
/// Runs on initial load and on create. Reaction toggles must not trigger
/// a rebuild: they cannot change membership, and rebuilding would churn
/// the identity of every place.
pub fn aggregate(posts: &[Post]) -> Vec<Place> {
    let mut places: Vec<Place> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for post in posts {
        match index.get(&post.place_id) {
            Some(&at) => places[at].num_post += 1,
            None => {
                index.insert(post.place_id, places.len());
                places.push(Place {
                    place_id: post.place_id,
                    latitude: post.latitude,
                    longitude: post.longitude,
                    num_post: 1,
                });
            }
        }
    }

    places
}

#[cfg(test)]
mod test {
    use super::*;

    fn post(post_id: i64, place_id: i64, lat: f64, lng: f64) -> Post {
        Post {
            post_id,
            place_id,
            latitude: lat,
            longitude: lng,
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_posts_sharing_a_place() {
        // Arrange
        let posts = vec![
            post(1, 10, 35.0, 139.0),
            post(2, 10, 35.0, 139.0),
        ];

        // Act
        let places = aggregate(&posts);

        // Assert
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id, 10);
        assert_eq!(places[0].num_post, 2);
    }

    #[test]
    fn test_first_seen_member_supplies_coordinates() {
        // Arrange
        let posts = vec![
            post(1, 10, 35.0, 139.0),
            post(2, 20, 36.0, 140.0),
            post(3, 10, 35.5, 139.5),
        ];

        // Act
        let places = aggregate(&posts);

        // Assert
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].latitude, 35.0);
        assert_eq!(places[0].num_post, 2);
        assert_eq!(places[1].place_id, 20);
        assert_eq!(places[1].num_post, 1);
    }

    #[test]
    fn test_count_matches_membership_after_growth() {
        // Arrange
        let mut posts = vec![post(1, 10, 35.0, 139.0)];
        for id in 2..=6 {
            posts.push(post(id, if id % 2 == 0 { 10 } else { 20 }, 35.0, 139.0));
        }

        // Act
        let places = aggregate(&posts);

        // Assert
        for place in &places {
            let members = posts
                .iter()
                .filter(|p| p.place_id == place.place_id)
                .count();
            assert_eq!(place.num_post as usize, members);
        }
    }

    #[test]
    fn test_empty_input_yields_no_places() {
        assert!(aggregate(&[]).is_empty());
    }
}
