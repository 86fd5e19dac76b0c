//! HTML rendering collaborator.
//!
//! The router never builds markup itself; it hands view data to a
//! [`Renderer`] held in its state. [`PlainHtmlRenderer`] is a dependency-free
//! default that emits minimal, escaped HTML with the form field names the
//! router expects (`first_name`, `last_name`, `phone`, `email`, `q`).

use contacts_core::models::Contact;
use contacts_core::operations::ContactList;

/// Turns view data into HTML documents.
pub trait Renderer: Send + Sync {
    fn render_list(&self, list: &ContactList, flash: Option<&str>) -> String;

    fn render_detail(&self, contact: &Contact) -> String;

    fn render_edit_form(&self, contact: &Contact) -> String;

    fn render_new_form(&self) -> String;
}

/// Minimal built-in renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHtmlRenderer;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn contact_fields(action: &str, values: Option<&Contact>, submit: &str) -> String {
    let value = |pick: fn(&Contact) -> &str| values.map(pick).map(escape_html).unwrap_or_default();
    format!(
        concat!(
            "<form action=\"{action}\" method=\"post\">\n",
            "<label>First Name <input name=\"first_name\" value=\"{first}\"></label>\n",
            "<label>Last Name <input name=\"last_name\" value=\"{last}\"></label>\n",
            "<label>Phone <input name=\"phone\" value=\"{phone}\"></label>\n",
            "<label>Email <input name=\"email\" value=\"{email}\"></label>\n",
            "<button>{submit}</button>\n",
            "</form>"
        ),
        action = action,
        first = value(|c| c.first_name.as_str()),
        last = value(|c| c.last_name.as_str()),
        phone = value(|c| c.phone.as_str()),
        email = value(|c| c.email.as_str()),
        submit = submit,
    )
}

impl Renderer for PlainHtmlRenderer {
    fn render_list(&self, list: &ContactList, flash: Option<&str>) -> String {
        let mut body = String::new();
        if let Some(flash) = flash {
            body.push_str(&format!("<p class=\"flash\">{}</p>\n", escape_html(flash)));
        }
        body.push_str(&format!(
            "<form action=\"/contacts\" method=\"get\"><input type=\"search\" name=\"q\" value=\"{}\"><button>Search</button></form>\n",
            escape_html(list.search_term.as_deref().unwrap_or(""))
        ));
        body.push_str("<table>\n<tr><th>First</th><th>Last</th><th>Phone</th><th>Email</th><th></th></tr>\n");
        for c in &list.contacts {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/contacts/{}\">View</a> <a href=\"/contacts/{}/edit\">Edit</a></td></tr>\n",
                escape_html(&c.first_name),
                escape_html(&c.last_name),
                escape_html(&c.phone),
                escape_html(&c.email),
                c.id,
                c.id
            ));
        }
        body.push_str("</table>\n<p><a href=\"/contacts/new\">Add Contact</a></p>");
        page("Contacts", &body)
    }

    fn render_detail(&self, contact: &Contact) -> String {
        let body = format!(
            "<h1>{} {}</h1>\n<div>Phone: {}</div>\n<div>Email: {}</div>\n<p><a href=\"/contacts/{}/edit\">Edit</a> <a href=\"/contacts\">Back</a></p>",
            escape_html(&contact.first_name),
            escape_html(&contact.last_name),
            escape_html(&contact.phone),
            escape_html(&contact.email),
            contact.id
        );
        page("Contact Details View", &body)
    }

    fn render_edit_form(&self, contact: &Contact) -> String {
        let mut body = contact_fields(
            &format!("/contacts/{}/edit", contact.id),
            Some(contact),
            "Save",
        );
        body.push_str(&format!(
            "\n<form action=\"/contacts/{}/delete\" method=\"post\"><button>Delete Contact</button></form>",
            contact.id
        ));
        page("Edit Contact", &body)
    }

    fn render_new_form(&self) -> String {
        page("New Contact", &contact_fields("/contacts/new", None, "Save"))
    }
}
