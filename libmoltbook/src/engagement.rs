//! Client-side feed filtering
//!
//! Pure predicate filter over an already-fetched feed; no network I/O.
//! Used by agents to pick which posts are worth engaging with.

use crate::types::Post;

/// Filter configuration. Every axis is optional: `None` or an empty
/// keyword list means "no filtering on that axis".
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    /// Keep posts scoring at least this much.
    pub min_score: Option<i64>,
    /// Keep posts with at most this many comments (under-served threads).
    pub max_comments: Option<u64>,
    /// Keep posts whose title or content mentions any of these
    /// (case-insensitive).
    pub keywords: Vec<String>,
    /// Drop posts mentioning any of these (case-insensitive).
    pub exclude_keywords: Vec<String>,
}

impl FeedFilter {
    /// Whether a single post passes the filter.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(min) = self.min_score {
            if post.effective_score() < min {
                return false;
            }
        }
        if let Some(max) = self.max_comments {
            if post.comment_count.unwrap_or(0) > max {
                return false;
            }
        }

        let haystack = format!(
            "{} {}",
            post.title.as_deref().unwrap_or(""),
            post.content.as_deref().unwrap_or("")
        )
        .to_lowercase();

        if !self.keywords.is_empty()
            && !self
                .keywords
                .iter()
                .any(|k| haystack.contains(&k.to_lowercase()))
        {
            return false;
        }
        if self
            .exclude_keywords
            .iter()
            .any(|k| haystack.contains(&k.to_lowercase()))
        {
            return false;
        }
        true
    }
}

/// Filters a fetched feed down to the posts worth engaging with,
/// preserving the original order.
pub fn relevant_posts(posts: Vec<Post>, filter: &FeedFilter) -> Vec<Post> {
    posts.into_iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(score: i64, title: &str, content: &str, comments: u64) -> Post {
        serde_json::from_value(json!({
            "id": format!("post-{title}"),
            "title": title,
            "content": content,
            "score": score,
            "comment_count": comments,
        }))
        .unwrap()
    }

    #[test]
    fn keeps_only_matching_keyword_posts_above_min_score() {
        let posts = vec![
            post(10, "Security talk", "", 2),
            post(10, "Cats", "", 2),
        ];
        let filter = FeedFilter {
            min_score: Some(5),
            keywords: vec!["security".to_string()],
            ..Default::default()
        };
        let kept = relevant_posts(posts, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title.as_deref(), Some("Security talk"));
    }

    #[test]
    fn empty_keyword_list_matches_everything() {
        let posts = vec![post(1, "Anything", "goes", 0)];
        let filter = FeedFilter::default();
        assert_eq!(relevant_posts(posts, &filter).len(), 1);
    }

    #[test]
    fn keywords_match_content_case_insensitively() {
        let posts = vec![post(0, "Untitled", "Thoughts on SECURITY audits", 0)];
        let filter = FeedFilter {
            keywords: vec!["Security".to_string()],
            ..Default::default()
        };
        assert_eq!(relevant_posts(posts, &filter).len(), 1);
    }

    #[test]
    fn excluded_keyword_disqualifies() {
        let posts = vec![
            post(10, "Security giveaway", "", 1),
            post(10, "Security talk", "", 1),
        ];
        let filter = FeedFilter {
            keywords: vec!["security".to_string()],
            exclude_keywords: vec!["giveaway".to_string()],
            ..Default::default()
        };
        let kept = relevant_posts(posts, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title.as_deref(), Some("Security talk"));
    }

    #[test]
    fn max_comments_drops_busy_threads() {
        let posts = vec![post(10, "Busy", "", 50), post(10, "Quiet", "", 3)];
        let filter = FeedFilter {
            max_comments: Some(10),
            ..Default::default()
        };
        let kept = relevant_posts(posts, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title.as_deref(), Some("Quiet"));
    }

    #[test]
    fn order_is_preserved() {
        let posts = vec![
            post(5, "first", "", 0),
            post(9, "second", "", 0),
            post(7, "third", "", 0),
        ];
        let filter = FeedFilter {
            min_score: Some(6),
            ..Default::default()
        };
        let kept = relevant_posts(posts, &filter);
        let titles: Vec<_> = kept.iter().filter_map(|p| p.title.as_deref()).collect();
        assert_eq!(titles, vec!["second", "third"]);
    }
}
