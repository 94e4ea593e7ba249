// crates/contact-book-web/src/render.rs
// ============================================================================
// Module: HTML Rendering
// Description: Server-side HTML for pages, row fragments, and forms.
// Purpose: Turn view selections into escaped markup.
// Dependencies: contact-book-core, url
// ============================================================================

//! ## Overview
//! Rendering is pure: every function takes already-selected view data and
//! returns a `String`. Only the page layout renders notices, and callers
//! pass notices only when the response carries the layout. All interpolated
//! text goes through [`escape_html`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use contact_book_core::ContactField;
use contact_book_core::ContactRecord;
use contact_book_core::FormMode;
use contact_book_core::FormView;
use contact_book_core::LOAD_MORE_TRIGGER_ID;
use contact_book_core::ListView;
use contact_book_core::Notice;
use contact_book_core::SEARCH_TRIGGER_ID;
use url::form_urlencoded;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fragment-aware client script.
const CLIENT_SCRIPT_URL: &str = "https://unpkg.com/htmx.org@1.9.5";
/// Stylesheet served by external static plumbing.
const STYLESHEET_URL: &str = "/public/styles.css";
/// Confirmation prompt shown before deletes.
const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this contact?";
/// Column count of the listing table.
const LIST_COLUMNS: u8 = 5;

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Wraps page content in the document shell with the given notices.
#[must_use]
pub fn layout(title: &str, notices: &[Notice], content: &str) -> String {
    let mut html = String::with_capacity(content.len() + 512);
    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{STYLESHEET_URL}\">");
    let _ = writeln!(html, "<script src=\"{CLIENT_SCRIPT_URL}\"></script>");
    html.push_str("</head>\n<body>\n<main>\n");
    html.push_str(&render_notices(notices));
    html.push_str(content);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Renders the notice list; empty input renders nothing.
fn render_notices(notices: &[Notice]) -> String {
    if notices.is_empty() {
        return String::new();
    }
    let mut html = String::from("<div class=\"notices\">\n");
    for notice in notices {
        let _ = writeln!(
            html,
            "<p class=\"notice notice-{}\" role=\"status\">{}</p>",
            notice.kind.as_str(),
            escape_html(&notice.text)
        );
    }
    html.push_str("</div>\n");
    html
}

// ============================================================================
// SECTION: Listing
// ============================================================================

/// Renders a list view: the full page shell or just the rows.
///
/// Notices are ignored for row fragments.
#[must_use]
pub fn list_view(view: &ListView, notices: &[Notice]) -> String {
    match view {
        ListView::FullPage {
            ..
        } => layout("Contact App", notices, &list_body(view)),
        ListView::RowFragment {
            ..
        } => table_rows(view),
    }
}

/// Search form, table, and add link.
fn list_body(view: &ListView) -> String {
    let search = view.search().unwrap_or_default();
    let mut html = String::new();
    html.push_str("<form action=\"/contacts\" method=\"GET\" class=\"search\">\n");
    let _ = writeln!(html, "<label for=\"{SEARCH_TRIGGER_ID}\">Search</label>");
    let _ = writeln!(
        html,
        "<input id=\"{SEARCH_TRIGGER_ID}\" name=\"q\" type=\"search\" value=\"{}\" \
         hx-get=\"/contacts\" hx-trigger=\"search, keyup delay:200ms changed\" \
         hx-target=\"tbody\" hx-push-url=\"true\" hx-indicator=\"#spinner\">",
        escape_html(search)
    );
    html.push_str("<button type=\"submit\">Search</button>\n");
    html.push_str("<span id=\"spinner\" class=\"htmx-indicator\">Loading...</span>\n");
    html.push_str("</form>\n");
    html.push_str("<table>\n<thead>\n<tr>");
    html.push_str("<th>First</th><th>Last</th><th>Phone</th><th>Email</th><th></th>");
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    html.push_str(&table_rows(view));
    html.push_str("</tbody>\n</table>\n");
    html.push_str("<p><a href=\"/contacts/new\">Add Contact</a></p>\n");
    html
}

/// Rows for the window plus the load-more row while later pages exist.
fn table_rows(view: &ListView) -> String {
    let mut html = String::new();
    for record in &view.page().records {
        html.push_str(&contact_row(record));
    }
    if let Some(next) = view.load_more_page() {
        html.push_str(&load_more_row(view.search(), next));
    }
    html
}

/// One listing row.
fn contact_row(record: &ContactRecord) -> String {
    let id = record.id;
    format!(
        "<tr>\
         <td>{first}</td><td>{last}</td><td>{phone}</td><td>{email}</td>\
         <td><a href=\"/contacts/{id}/edit\">Edit</a> \
         <a href=\"/contacts/{id}\">View</a> \
         <button type=\"button\" hx-delete=\"/contacts/{id}\" hx-target=\"body\" \
         hx-push-url=\"true\" hx-confirm=\"{DELETE_CONFIRMATION}\">Delete</button></td>\
         </tr>\n",
        first = escape_html(&record.first_name),
        last = escape_html(&record.last_name),
        phone = escape_html(&record.phone_number),
        email = escape_html(&record.email),
    )
}

/// Trailing row that fetches and replaces itself with the next page.
fn load_more_row(search: Option<&str>, next_page: u32) -> String {
    format!(
        "<tr id=\"{LOAD_MORE_TRIGGER_ID}\" hx-get=\"{href}\" hx-trigger=\"revealed\" \
         hx-target=\"this\" hx-swap=\"outerHTML\">\
         <td colspan=\"{LIST_COLUMNS}\"><button type=\"button\">Load more</button></td></tr>\n",
        href = escape_html(&load_more_href(search, next_page)),
    )
}

/// Builds the next-page listing URL, preserving the search term.
#[must_use]
pub fn load_more_href(search: Option<&str>, next_page: u32) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &next_page.to_string());
    if let Some(term) = search {
        query.append_pair("q", term);
    }
    format!("/contacts?{}", query.finish())
}

// ============================================================================
// SECTION: Record Pages
// ============================================================================

/// Renders the read-only contact page.
#[must_use]
pub fn contact_page(record: &ContactRecord, notices: &[Notice]) -> String {
    let id = record.id;
    let body = format!(
        "<h1>{name}</h1>\n<div>\n<p>{email}</p>\n<p>{phone}</p>\n</div>\n\
         <div>\n<a href=\"/contacts/{id}/edit\">Edit</a>\n<a href=\"/contacts\">Back</a>\n</div>\n",
        name = escape_html(&record.display_name()),
        email = escape_html(&record.email),
        phone = escape_html(&record.phone_number),
    );
    layout("Contact App", notices, &body)
}

/// Renders the create or edit form.
#[must_use]
pub fn form_page(form: &FormView, notices: &[Notice]) -> String {
    let legend = match form.mode {
        FormMode::Create => "New Contact",
        FormMode::Edit(_) => "Contact Values",
    };
    let mut body = String::new();
    let _ = writeln!(body, "<form action=\"{}\" method=\"POST\">", form.mode.action());
    let _ = writeln!(body, "<fieldset>\n<legend>{legend}</legend>");
    for field in ContactField::ALL {
        body.push_str(&form_field(form, field));
    }
    body.push_str("</fieldset>\n<button type=\"submit\">Submit</button>\n</form>\n");
    if let FormMode::Edit(id) = form.mode {
        let _ = writeln!(
            body,
            "<button id=\"edit-delete-button\" type=\"button\" hx-delete=\"/contacts/{id}\" \
             hx-push-url=\"true\" hx-confirm=\"{DELETE_CONFIRMATION}\" hx-target=\"body\">\
             Delete</button>"
        );
    }
    body.push_str("<div>\n<a href=\"/contacts\">Back</a>\n</div>\n");
    layout("Contact App", notices, &body)
}

/// One labelled input with its error slot.
fn form_field(form: &FormView, field: ContactField) -> String {
    let name = field.name();
    let input_type = match field {
        ContactField::Email => "email",
        ContactField::PhoneNumber => "tel",
        ContactField::FirstName | ContactField::LastName => "text",
    };
    let probe = match (field, form.mode) {
        (ContactField::Email, FormMode::Edit(id)) => format!(
            " hx-get=\"/contacts/{id}/email\" hx-target=\"#email_error\" \
             hx-trigger=\"change, keyup delay:300ms changed\""
        ),
        _ => String::new(),
    };
    format!(
        "<div>\n<label for=\"{name}\">{label}</label>\n\
         <input id=\"{name}\" name=\"{name}\" type=\"{input_type}\" value=\"{value}\"{probe}>\n\
         <span id=\"{name}_error\" class=\"error\">{error}</span>\n</div>\n",
        label = field.label(),
        value = escape_html(form.values.get(field)),
        error = escape_html(form.errors.get(field)),
    )
}

// ============================================================================
// SECTION: Error Pages
// ============================================================================

/// Renders the 404 page.
#[must_use]
pub fn not_found_page(notices: &[Notice]) -> String {
    layout(
        "Not Found",
        notices,
        "<h1>Contact not found</h1>\n<p><a href=\"/contacts\">Back to contacts</a></p>\n",
    )
}

/// Renders the 500 page.
#[must_use]
pub fn server_error_page(notices: &[Notice]) -> String {
    layout(
        "Error",
        notices,
        "<h1>Something went wrong</h1>\n<p>The contact store could not complete the \
         request.</p>\n<p><a href=\"/contacts\">Back to contacts</a></p>\n",
    )
}

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Escapes text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use contact_book_core::ContactFields;
    use contact_book_core::ContactId;
    use contact_book_core::FragmentSignal;
    use contact_book_core::PageRequest;
    use contact_book_core::SearchPage;
    use contact_book_core::select_list_view;

    use super::*;

    fn record(raw_id: u64, first: &str) -> ContactRecord {
        ContactRecord::from_fields(
            ContactId::from_raw(raw_id).unwrap(),
            ContactFields::new(first, "Doe", format!("{first}@example.com"), "555-0100"),
        )
    }

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn load_more_href_preserves_term() {
        assert_eq!(load_more_href(None, 2), "/contacts?page=2");
        assert_eq!(load_more_href(Some("Ann Lee"), 3), "/contacts?page=3&q=Ann+Lee");
    }

    #[test]
    fn fragment_contains_rows_without_shell() {
        let page = SearchPage::new(PageRequest::new(1, 1), vec![record(1, "Ann")], 2);
        let view = select_list_view(FragmentSignal::Fragment, Some("A"), page);
        let html = list_view(&view, &[Notice::success("hidden")]);
        assert!(html.starts_with("<tr>"));
        assert!(!html.contains("<html"));
        assert!(!html.contains("hidden"));
        assert!(html.contains("id=\"load-more\""));
        assert!(html.contains("/contacts?page=2&amp;q=A"));
    }

    #[test]
    fn last_page_has_no_load_more_row() {
        let page = SearchPage::new(PageRequest::new(2, 1), vec![record(2, "Bo")], 2);
        let view = select_list_view(FragmentSignal::FullNavigation, None, page);
        let html = list_view(&view, &[]);
        assert!(html.contains("<tbody>"));
        assert!(!html.contains("load-more"));
    }

    #[test]
    fn full_page_renders_notices_and_escaped_rows() {
        let page = SearchPage::new(PageRequest::first(10), vec![record(1, "<b>")], 1);
        let view = select_list_view(FragmentSignal::FullNavigation, None, page);
        let html = list_view(&view, &[Notice::success("Created new contact!")]);
        assert!(html.contains("notice-success"));
        assert!(html.contains("Created new contact!"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn edit_form_wires_email_probe_and_errors() {
        let mut form = FormView::for_record(&record(7, "Ann"));
        form.errors.set(ContactField::Email, "Email is required");
        let html = form_page(&form, &[]);
        assert!(html.contains("action=\"/contacts/7/edit\""));
        assert!(html.contains("hx-get=\"/contacts/7/email\""));
        assert!(html.contains("<span id=\"email_error\" class=\"error\">Email is required</span>"));
        assert!(html.contains("hx-delete=\"/contacts/7\""));
    }

    #[test]
    fn create_form_has_no_probe_or_delete() {
        let html = form_page(&FormView::blank(), &[]);
        assert!(html.contains("action=\"/contacts/new\""));
        assert!(!html.contains("/email\""));
        assert!(!html.contains("hx-delete"));
    }
}
