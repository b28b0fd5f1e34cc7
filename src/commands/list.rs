//! List site content

use anyhow::Result;

use crate::Blog;

/// Print every post in index order
pub fn run(blog: &Blog, show_excerpt: bool) -> Result<()> {
    let store = blog.load_store()?;

    println!("Posts ({}):", store.len());
    for post in store.posts() {
        println!("  {} - {} [{}] ({})", post.date, post.title, post.path, post.id);
        if show_excerpt && !post.excerpt.is_empty() {
            println!("      {}", post.excerpt);
        }
    }

    Ok(())
}
