//! HTML pages. Every page shares the base layout and navigation bar.

use std::fmt::{self, Write};

use common::Book;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn nav(out: &mut String) -> fmt::Result {
    writeln!(out, "<nav>")?;
    writeln!(out, "  <a href=\"/\">Home</a>")?;
    writeln!(out, "  <a href=\"/book/create\">Add a book</a>")?;
    writeln!(out, "</nav>")
}

fn base(title: &str, main: &str) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(main.len() + 512);
    writeln!(out, "<!doctype html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "  <meta charset=\"utf-8\">")?;
    writeln!(out, "  <title>{} - Reading List</title>", escape(title))?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<header><h1><a href=\"/\">Reading List</a></h1></header>")?;
    nav(&mut out)?;
    writeln!(out, "<main>")?;
    out.push_str(main);
    writeln!(out, "</main>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

/// The list page.
pub fn home(books: &[Book]) -> Result<String, fmt::Error> {
    let mut main = String::new();
    writeln!(main, "<h2>Latest Books</h2>")?;

    if books.is_empty() {
        writeln!(main, "<p>There's nothing to see here yet!</p>")?;
        return base("Home", &main);
    }

    writeln!(main, "<table>")?;
    writeln!(main, "  <tr><th>Title</th><th>Published</th><th>Pages</th><th>Rating</th></tr>")?;
    for book in books {
        writeln!(
            main,
            "  <tr><td><a href=\"/book/view?id={}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            book.id,
            escape(&book.title),
            book.published,
            book.pages,
            book.rating
        )?;
    }
    writeln!(main, "</table>")?;

    base("Home", &main)
}

/// The detail page for one book.
pub fn view(book: &Book) -> Result<String, fmt::Error> {
    let mut main = String::new();
    writeln!(main, "<div class=\"book\">")?;
    writeln!(main, "  <h2>{}</h2>", escape(&book.title))?;
    writeln!(main, "  <dl>")?;
    writeln!(main, "    <dt>Published</dt><dd>{}</dd>", book.published)?;
    writeln!(main, "    <dt>Pages</dt><dd>{}</dd>", book.pages)?;
    writeln!(main, "    <dt>Genres</dt><dd>{}</dd>", escape(&book.genres.join(", ")))?;
    writeln!(main, "    <dt>Rating</dt><dd>{}</dd>", book.rating)?;
    writeln!(main, "  </dl>")?;
    writeln!(main, "</div>")?;

    base(&book.title, &main)
}

/// The form for adding a book.
pub fn create_form() -> Result<String, fmt::Error> {
    let mut main = String::new();
    writeln!(main, "<h2>Add a Book</h2>")?;
    writeln!(main, "<form action=\"/book/create\" method=\"POST\">")?;
    for (name, label, kind) in [
        ("title", "Title", "text"),
        ("published", "Published", "number"),
        ("pages", "Pages", "number"),
        ("genres", "Genres (comma separated)", "text"),
        ("rating", "Rating", "text"),
    ] {
        writeln!(main, "  <div>")?;
        writeln!(main, "    <label for=\"{name}\">{label}</label>")?;
        writeln!(main, "    <input type=\"{kind}\" id=\"{name}\" name=\"{name}\">")?;
        writeln!(main, "  </div>")?;
    }
    writeln!(main, "  <input type=\"submit\" value=\"Add book\">")?;
    writeln!(main, "</form>")?;

    base("Add a Book", &main)
}
