use shared_types::Contact;

/// Contact categories in descending priority, matched case-insensitively as a
/// substring of the contact's type.
pub const CONTACT_PRIORITY: [&str; 5] = [
    "Decision Maker",
    "Best Contact",
    "Site Contact",
    "Authorised Contact",
    "Occupant Contact",
];

/// Label the extraction service uses for an email-only row
const EMAIL_PLACEHOLDER_NAME: &str = "Email";

/// Render every named contact as `"{type}: {name} ({phone}) - {email}"`,
/// joined with `"; "`. Unnamed rows and the email placeholder row are skipped.
pub fn best_contact_summary(contacts: &[Contact]) -> String {
    contacts
        .iter()
        .filter(|contact| {
            let name = contact.name.trim();
            !name.is_empty() && name != EMAIL_PLACEHOLDER_NAME
        })
        .map(render_contact)
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_contact(contact: &Contact) -> String {
    let contact_type = if contact.contact_type.trim().is_empty() {
        "Contact"
    } else {
        contact.contact_type.as_str()
    };

    let mut line = format!("{}: {}", contact_type, contact.name);
    if let Some(phone) = non_blank(contact.phone.as_deref()) {
        line.push_str(&format!(" ({})", phone));
    }
    if let Some(email) = non_blank(contact.email.as_deref()) {
        line.push_str(&format!(" - {}", email));
    }
    line
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Pick the single most relevant contact: the first whose type matches the
/// highest-ranked category, otherwise the first contact in the list.
pub fn primary_contact(contacts: &[Contact]) -> Option<&Contact> {
    CONTACT_PRIORITY
        .iter()
        .find_map(|label| {
            let label = label.to_lowercase();
            contacts
                .iter()
                .find(|contact| contact.contact_type.to_lowercase().contains(&label))
        })
        .or_else(|| contacts.first())
}

/// Email of the first alternate contact, if any
pub fn best_contact_email(contacts: &[Contact]) -> String {
    contacts
        .first()
        .and_then(|contact| contact.email.clone())
        .unwrap_or_default()
}
