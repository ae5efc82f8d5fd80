use std::fmt::Write;

use crate::taxonomy::{Page, Post};

/// The index's list of posts, newest first. Posts sharing a date keep the
/// order they were added in.
#[allow(unused_must_use)]
pub(crate) fn render<'a, I>(posts: I) -> String
    where I: Iterator<Item = (&'a Page, &'a Post)>
{
    let mut posts: Vec<_> = posts.collect();
    posts.sort_by(|(_, a), (_, b)| b.date.cmp(&a.date));

    let mut list = String::from("<ul class=\"list\">");
    for (page, post) in posts {
        write!(&mut list,
            "<li><a href=\"{link}\"><h3>{title}</h3><small>\
            <time datetime=\"{date}\">{month}</time></small></a></li>",
            link = post.link,
            title = page.title,
            date = post.date.format("%Y-%m-%d"),
            month = post.date.format("%b, %Y"));
    }

    list.push_str("</ul>");
    list
}
