use std::time::Duration;

use chrono::{Local, NaiveDate};

use entity::post::Post;

/// Quiescence window before a keyword edit is applied.
pub const KEYWORD_DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub enum GenreFilter {
    #[default]
    All,
    Only(i32),
}

#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct FilterCriteria {
    pub keyword: String,
    pub genre: GenreFilter,
    pub date: DateFilter,
}

/// Pure recomputation of the filtered view: an order-preserving
/// subsequence of `posts` where every active predicate passes. Callers
/// supply `today` (local midnight) so the result is reproducible.
pub fn apply(
    posts: &[Post],
    criteria: &FilterCriteria,
    today: NaiveDate,
) -> Vec<Post> {
    let keyword = criteria.keyword.to_lowercase();

    posts
        .iter()
        .filter(|post| {
            matches_keyword(post, &keyword)
                && matches_genre(post, criteria.genre)
                && matches_date(post, criteria.date, today)
        })
        .cloned()
        .collect()
}

fn matches_keyword(post: &Post, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }

    post.title.to_lowercase().contains(keyword)
        || post.text.to_lowercase().contains(keyword)
        || post.genre().label().contains(keyword)
}

fn matches_genre(post: &Post, genre: GenreFilter) -> bool {
    match genre {
        GenreFilter::All => true,
        GenreFilter::Only(id) => post.genre_id == id,
    }
}

fn matches_date(post: &Post, date: DateFilter, today: NaiveDate) -> bool {
    if date == DateFilter::All {
        return true;
    }

    // An unparsable date cannot be bucketed; the post is excluded.
    let Some(posted) = post.parsed_date() else {
        return false;
    };
    let posted_day = posted.with_timezone(&Local).date_naive();
    let diff = (today - posted_day).num_days();

    // -1 tolerates posts stamped just past local midnight by a skewed
    // clock right after creation.
    match date {
        DateFilter::All => true,
        DateFilter::Today => diff == 0,
        DateFilter::Week => (-1..=7).contains(&diff),
        DateFilter::Month => (-1..=30).contains(&diff),
    }
}

#[cfg(test)]
mod test {
    use chrono::Days;

    use super::*;

    fn post(post_id: i64, title: &str, genre_id: i32, days_ago: u64) -> Post {
        let posted = Local::now()
            .checked_sub_days(Days::new(days_ago))
            .unwrap();
        Post {
            post_id,
            title: title.to_string(),
            text: "".to_string(),
            genre_id,
            post_date: posted.to_rfc3339(),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    #[test]
    fn test_keyword_matches_title_case_insensitive() {
        // Arrange
        let posts = vec![post(1, "Cafe A", 0, 0), post(2, "Diner B", 0, 0)];
        let criteria = FilterCriteria {
            keyword: "cafe".to_string(),
            ..Default::default()
        };

        // Act
        let filtered = apply(&posts, &criteria, today());

        // Assert
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].post_id, 1);
    }

    #[test]
    fn test_keyword_matches_genre_label() {
        // Arrange
        let posts = vec![post(1, "Morning market", 0, 0), post(2, "Roadworks", 5, 0)];
        let criteria = FilterCriteria {
            keyword: "food".to_string(),
            ..Default::default()
        };

        // Act
        let filtered = apply(&posts, &criteria, today());

        // Assert
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].post_id, 1);
    }

    #[test]
    fn test_empty_keyword_matches_all() {
        let posts = vec![post(1, "Cafe A", 0, 0), post(2, "Diner B", 1, 0)];

        let filtered = apply(&posts, &FilterCriteria::default(), today());

        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_genre_exact_match() {
        // Arrange
        let posts = vec![post(1, "Cafe A", 0, 0), post(2, "Flea market", 1, 0)];
        let criteria = FilterCriteria {
            genre: GenreFilter::Only(1),
            ..Default::default()
        };

        // Act
        let filtered = apply(&posts, &criteria, today());

        // Assert
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].post_id, 2);
    }

    #[test]
    fn test_date_buckets() {
        // Arrange
        let posts = vec![
            post(1, "today", 0, 0),
            post(2, "three days", 0, 3),
            post(3, "two weeks", 0, 14),
            post(4, "two months", 0, 60),
        ];

        // Act
        let todays = apply(
            &posts,
            &FilterCriteria { date: DateFilter::Today, ..Default::default() },
            today(),
        );
        let week = apply(
            &posts,
            &FilterCriteria { date: DateFilter::Week, ..Default::default() },
            today(),
        );
        let month = apply(
            &posts,
            &FilterCriteria { date: DateFilter::Month, ..Default::default() },
            today(),
        );

        // Assert
        assert_eq!(todays.len(), 1);
        assert_eq!(week.len(), 2);
        assert_eq!(month.len(), 3);
    }

    #[test]
    fn test_slightly_future_post_passes_week_bucket() {
        // Arrange
        let posted = Local::now().checked_add_days(Days::new(1)).unwrap();
        let posts = vec![Post {
            post_id: 1,
            post_date: posted.to_rfc3339(),
            ..Default::default()
        }];
        let criteria =
            FilterCriteria { date: DateFilter::Week, ..Default::default() };

        // Act
        let filtered = apply(&posts, &criteria, today());

        // Assert
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_unparsable_date_excluded_from_buckets_only() {
        // Arrange
        let broken = Post {
            post_id: 1,
            post_date: "not a date".to_string(),
            ..Default::default()
        };
        let posts = vec![broken];

        // Act
        let all = apply(&posts, &FilterCriteria::default(), today());
        let week = apply(
            &posts,
            &FilterCriteria { date: DateFilter::Week, ..Default::default() },
            today(),
        );

        // Assert
        assert_eq!(all.len(), 1);
        assert!(week.is_empty());
    }

    #[test]
    fn test_apply_is_pure() {
        // Arrange
        let posts = vec![post(1, "Cafe A", 0, 0), post(2, "Diner B", 1, 2)];
        let criteria = FilterCriteria {
            keyword: "a".to_string(),
            date: DateFilter::Week,
            ..Default::default()
        };

        // Act
        let first = apply(&posts, &criteria, today());
        let second = apply(&posts, &criteria, today());

        // Assert
        assert_eq!(first, second);
        assert_eq!(posts[0].title, "Cafe A");
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_relative_order_preserved() {
        // Arrange
        let posts = vec![
            post(3, "cafe one", 0, 0),
            post(1, "cafe two", 0, 0),
            post(2, "cafe three", 0, 0),
        ];
        let criteria = FilterCriteria {
            keyword: "cafe".to_string(),
            ..Default::default()
        };

        // Act
        let filtered = apply(&posts, &criteria, today());

        // Assert
        let ids: Vec<i64> = filtered.iter().map(|p| p.post_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
