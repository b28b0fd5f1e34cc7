//! In-memory post store answering the index and detail queries

use indexmap::IndexMap;

use super::{parse_date_string, ContentError, Post, PostDetail, PostSummary};
use crate::config::PostOrder;

/// Read side of the content layer
///
/// Pages are rendered only from what these two queries return.
pub trait ContentResolver {
    /// Every post, in listing order
    fn post_summaries(&self) -> Vec<PostSummary>;

    /// The post whose path equals `path` exactly
    fn post_detail(&self, path: &str) -> Option<PostDetail>;

    /// Like [`post_detail`](Self::post_detail), but a miss is an error
    fn require_post_detail(&self, path: &str) -> Result<PostDetail, ContentError> {
        self.post_detail(path)
            .ok_or_else(|| ContentError::PostNotFound(path.to_string()))
    }
}

/// Posts keyed by path, held in listing order
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: IndexMap<String, Post>,
}

impl PostStore {
    /// Build a store, ordering posts as configured
    ///
    /// When two posts claim the same path the first in listing order wins
    /// and the other is dropped with a warning.
    pub fn new(mut posts: Vec<Post>, order: PostOrder) -> Self {
        match order {
            PostOrder::Date => sort_by_date_desc(&mut posts),
            PostOrder::Source => posts.sort_by(|a, b| a.id.cmp(&b.id)),
        }

        let mut by_path: IndexMap<String, Post> = IndexMap::with_capacity(posts.len());
        for post in posts {
            if let Some(existing) = by_path.get(&post.path) {
                tracing::warn!(
                    "Duplicate path {:?}: keeping {} and ignoring {}",
                    post.path,
                    existing.id,
                    post.id
                );
                continue;
            }
            by_path.insert(post.path.clone(), post);
        }

        Self { posts: by_path }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Full posts, in listing order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }
}

impl ContentResolver for PostStore {
    fn post_summaries(&self) -> Vec<PostSummary> {
        self.posts.values().map(Post::summary).collect()
    }

    fn post_detail(&self, path: &str) -> Option<PostDetail> {
        self.posts.get(path).map(Post::detail)
    }
}

/// Newest first; unparseable dates last; ties broken by path
fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by_cached_key(|p| {
        let date = parse_date_string(&p.date);
        (date.is_none(), std::cmp::Reverse(date), p.path.clone())
    });
}
