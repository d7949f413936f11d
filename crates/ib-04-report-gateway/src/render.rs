//! HTML rendering of a `UsageTable`.
//!
//! Every entity-derived string goes through `escape_html`; query values
//! through `encode_query_value`.

use ib_03_usage_report::{HeaderCell, SortDirection, UsageTable, ViewRow};
use std::fmt::Write;

const PAGE_TITLE: &str = "Inline blocks";

/// Render the full admin page for `table`, linking back to `route`.
pub fn render_page(table: &UsageTable, route: &str) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{PAGE_TITLE}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{PAGE_TITLE}</h1>");

    render_table(&mut html, table, route);
    render_pager(&mut html, table, route);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_table(html: &mut String, table: &UsageTable, route: &str) {
    html.push_str("<table class=\"inline-block-usage\">\n<thead>\n<tr>");
    for cell in &table.header {
        render_header_cell(html, cell, route);
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    if table.rows.is_empty() {
        let _ = writeln!(
            html,
            "<tr><td colspan=\"{}\" class=\"empty message\">{}</td></tr>",
            table.header.len(),
            escape_html(table.empty_message)
        );
    }
    for row in &table.rows {
        render_row(html, row);
    }

    html.push_str("</tbody>\n</table>\n");
}

fn render_header_cell(html: &mut String, cell: &HeaderCell, route: &str) {
    match (cell.active_direction, cell.toggle_direction()) {
        (Some(active), Some(toggle)) => {
            let href = link(
                route,
                &[("order", cell.label.to_string()), ("sort", toggle.as_str().to_string())],
            );
            let _ = write!(
                html,
                "<th class=\"is-active\" aria-sort=\"{}\"><a href=\"{}\">{}</a></th>",
                match active {
                    SortDirection::Asc => "ascending",
                    SortDirection::Desc => "descending",
                },
                escape_html(&href),
                escape_html(cell.label)
            );
        }
        _ => {
            let _ = write!(html, "<th>{}</th>", escape_html(cell.label));
        }
    }
}

fn render_row(html: &mut String, row: &ViewRow) {
    let _ = writeln!(
        html,
        "<tr><td>{}</td><td><a href=\"{}\">{}</a></td><td><a href=\"{}\">{}</a></td></tr>",
        escape_html(&row.block_type),
        escape_html(&row.title_link.href),
        escape_html(&row.title_link.label),
        escape_html(&row.edit_link.href),
        escape_html(&row.edit_link.label()),
    );
}

fn render_pager(html: &mut String, table: &UsageTable, route: &str) {
    let links = table.pager_links();
    if links.is_empty() {
        return;
    }

    let page_link = |page: usize| escape_html(&link(route, &table.page_query(page)));

    html.push_str("<nav class=\"pager\" role=\"navigation\">\n<ul class=\"pager__items\">\n");
    if let Some(first) = links.first {
        let _ = writeln!(html, "<li class=\"pager__item--first\"><a href=\"{}\">« First</a></li>", page_link(first));
    }
    if let Some(previous) = links.previous {
        let _ = writeln!(html, "<li class=\"pager__item--previous\"><a href=\"{}\">‹ Previous</a></li>", page_link(previous));
    }
    if links.ellipsis_before {
        html.push_str("<li class=\"pager__item--ellipsis\">…</li>\n");
    }
    for page in &links.pages {
        if page.is_current {
            let _ = writeln!(html, "<li class=\"pager__item is-active\">{}</li>", page.page + 1);
        } else {
            let _ = writeln!(
                html,
                "<li class=\"pager__item\"><a href=\"{}\">{}</a></li>",
                page_link(page.page),
                page.page + 1
            );
        }
    }
    if links.ellipsis_after {
        html.push_str("<li class=\"pager__item--ellipsis\">…</li>\n");
    }
    if let Some(next) = links.next {
        let _ = writeln!(html, "<li class=\"pager__item--next\"><a href=\"{}\">Next ›</a></li>", page_link(next));
    }
    if let Some(last) = links.last {
        let _ = writeln!(html, "<li class=\"pager__item--last\"><a href=\"{}\">Last »</a></li>", page_link(last));
    }
    html.push_str("</ul>\n</nav>\n");
}

/// `route?k=v&k=v` with encoded values.
fn link<K: AsRef<str>>(route: &str, query: &[(K, String)]) -> String {
    let mut href = route.to_string();
    for (i, (key, value)) in query.iter().enumerate() {
        href.push(if i == 0 { '?' } else { '&' });
        href.push_str(&encode_query_value(key.as_ref()));
        href.push('=');
        href.push_str(&encode_query_value(value));
    }
    href
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use ib_03_usage_report::{
        EditLink, Link, Pager, TableSortQuery, BLOCK_TYPE_COLUMN, EMPTY_MESSAGE,
    };

    fn table(rows: Vec<ViewRow>, total: usize, page: usize, sort: Option<&str>) -> UsageTable {
        UsageTable {
            header: vec![
                HeaderCell {
                    label: BLOCK_TYPE_COLUMN,
                    active_direction: Some(SortDirection::Asc),
                },
                HeaderCell {
                    label: "Title",
                    active_direction: None,
                },
                HeaderCell {
                    label: "Link",
                    active_direction: None,
                },
            ],
            rows,
            pager: Pager::new(total, 25, page),
            empty_message: EMPTY_MESSAGE,
            sort: SortDirection::Asc,
            sort_query: TableSortQuery::new(sort.map(|_| BLOCK_TYPE_COLUMN), sort),
            scanned: total,
            skipped: 0,
            storage_error: None,
        }
    }

    fn row(block_type: &str, title: &str, page_title: Option<&str>) -> ViewRow {
        ViewRow {
            block_type: block_type.into(),
            title_link: Link {
                href: "/node/1".into(),
                label: title.into(),
            },
            edit_link: EditLink {
                href: "/node/1/layout".into(),
                page_title: page_title.map(str::to_owned),
            },
        }
    }

    const ROUTE: &str = "/admin/content/inline-blocks";

    #[test]
    fn test_escapes_entity_labels() {
        let html = render_page(
            &table(vec![row("<b>Hero</b>", "Tom & \"Jerry\"", Some("<script>"))], 1, 0, None),
            ROUTE,
        );

        assert!(html.contains("&lt;b&gt;Hero&lt;/b&gt;"));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
        assert!(html.contains("Edit (&lt;script&gt;)"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_empty_table_shows_placeholder_and_no_pager() {
        let html = render_page(&table(Vec::new(), 0, 0, None), ROUTE);

        assert!(html.contains("No blocks found"));
        assert!(!html.contains("class=\"pager\""));
    }

    #[test]
    fn test_header_links_toggle_sort() {
        let html = render_page(&table(Vec::new(), 0, 0, None), ROUTE);
        assert!(html.contains("href=\"/admin/content/inline-blocks?order=Block%20Type&amp;sort=desc\""));
        assert!(html.contains("<th>Title</th>"));
    }

    #[test]
    fn test_pager_links_keep_sort() {
        let html = render_page(&table(vec![row("Basic", "x", None)], 60, 1, Some("desc")), ROUTE);

        assert!(html.contains("?page=2&amp;order=Block%20Type&amp;sort=desc"));
        assert!(html.contains("<li class=\"pager__item is-active\">2</li>"));
        assert!(html.contains("Edit</a>"));
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(encode_query_value("Block Type"), "Block%20Type");
        assert_eq!(encode_query_value("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query_value("plain-text_1.0~"), "plain-text_1.0~");
    }
}
