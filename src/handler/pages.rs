//! HTML page rendering
//!
//! Pages are assembled from string templates; every piece of quote or user
//! text goes through `escape_html` first.

use crate::quote::{Category, Quote};

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | QuoteWise</title>
    <link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
    <header class="site-header">
        <a class="brand" href="/">QuoteWise</a>
    </header>
    <main class="container">
{main}
    </main>
    <script src="/static/js/app.js"></script>
</body>
</html>"#,
        title = escape_html(title),
    )
}

/// Landing page with one link per category plus an unfiltered option
pub fn render_index() -> String {
    let cards: String = Category::ALL
        .iter()
        .map(|category| {
            format!(
                "            <a class=\"category-card\" href=\"/quote?category={tag}\">{label}</a>\n",
                tag = category.as_tag(),
                label = category.label(),
            )
        })
        .chain(std::iter::once(
            "            <a class=\"category-card random\" href=\"/quote\">Surprise me</a>\n".to_string(),
        ))
        .collect();

    let main = format!(
        r#"        <section class="hero">
            <h1>Find your daily inspiration</h1>
            <p>Pick a category to get a random quote.</p>
        </section>
        <nav class="categories">
{cards}        </nav>"#
    );
    layout("Inspirational Quotes", &main)
}

/// Quote page; `category` is echoed back exactly as the user sent it
pub fn render_quote(quote: &Quote, category: &str) -> String {
    let tags: String = quote
        .tags
        .iter()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape_html(t)))
        .collect();

    let notice = if quote.api_error {
        r#"
        <div class="notice" role="status">The quote service is unavailable right now, so here is one from our own collection.</div>"#
    } else {
        ""
    };

    let heading = if category.is_empty() {
        "Random quote".to_string()
    } else {
        format!("{} quote", escape_html(category))
    };

    // Only allow-listed tags reach the inline script
    let script_category = Category::resolve(Some(category)).map_or("", Category::as_tag);

    let main = format!(
        r#"        <h1 class="quote-heading">{heading}</h1>{notice}
        <article class="quote-card">
            <blockquote>
                <p>&ldquo;{content}&rdquo;</p>
                <footer>&mdash; {author}</footer>
            </blockquote>
            <div class="quote-tags">{tags}</div>
        </article>
        <div class="actions">
            <button id="newQuoteBtn" type="button" onclick="getNewQuote('{script_category}')">New quote</button>
            <button id="shareBtn" type="button" onclick="shareQuote()">Share</button>
            <a class="back" href="/">All categories</a>
        </div>"#,
        content = escape_html(&quote.content),
        author = escape_html(&quote.author),
    );
    layout("Your Quote", &main)
}
