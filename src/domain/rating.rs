use crate::entities::comment;

/// Average of the loaded comments' ratings, rounded to the nearest
/// integer with .5 rounding away from zero. A recipe without comments
/// averages 0. Works over whatever collection the caller loaded;
/// staleness is the caller's problem.
pub fn average_rating(comments: &[comment::Model]) -> i64 {
    if comments.is_empty() {
        return 0;
    }
    let sum: i64 = comments.iter().map(|c| i64::from(c.rating)).sum();
    (sum as f64 / comments.len() as f64).round() as i64
}

/// First comment in the collection written by the given author, if any.
/// The data model allows several in principle; callers that want
/// one-comment-per-author semantics reject duplicates before insert.
pub fn comment_from_author(comments: &[comment::Model], author_id: i64) -> Option<&comment::Model> {
    comments.iter().find(|c| c.author_id == author_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(id: i64, rating: i32, author_id: i64) -> comment::Model {
        comment::Model {
            id,
            rating,
            content: "tried it last sunday".to_string(),
            created_at: Utc::now(),
            author_id,
            recipe_id: 1,
        }
    }

    #[test]
    fn average_of_no_comments_is_zero() {
        assert_eq!(average_rating(&[]), 0);
    }

    #[test]
    fn average_rounds_half_up() {
        // 3.5 rounds to 4
        assert_eq!(average_rating(&[comment(1, 3, 1), comment(2, 4, 2)]), 4);
    }

    #[test]
    fn average_rounds_to_nearest() {
        // 10/3 = 3.33.. -> 3
        let comments = [comment(1, 4, 1), comment(2, 3, 2), comment(3, 3, 3)];
        assert_eq!(average_rating(&comments), 3);
        // 14/3 = 4.66.. -> 5
        let comments = [comment(1, 5, 1), comment(2, 5, 2), comment(3, 4, 3)];
        assert_eq!(average_rating(&comments), 5);
    }

    #[test]
    fn single_comment_average_is_its_rating() {
        assert_eq!(average_rating(&[comment(1, 2, 1)]), 2);
    }

    #[test]
    fn lookup_finds_comment_by_author() {
        let comments = [comment(1, 5, 10), comment(2, 3, 20)];
        let found = comment_from_author(&comments, 20).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn lookup_misses_are_none_not_errors() {
        let comments = [comment(1, 5, 10)];
        assert!(comment_from_author(&comments, 99).is_none());
        assert!(comment_from_author(&[], 10).is_none());
    }
}
