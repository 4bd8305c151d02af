//! Reconciler Crate
//!
//! Turns one extraction result into the fixed set of form fields an operator
//! reviews before submission. Everything here is a pure, total function: any
//! missing input becomes an empty string, never an error.
//!
//! # Rules
//!
//! - **Names**: the customer name is split into first and last name
//! - **Phones**: slots 1-2 come from the primary phone/mobile fields, slots 3-4
//!   from alternate contacts and extra phones, never holding the same number twice
//! - **Contacts**: every named contact is summarized; a ranked category list
//!   picks the primary contact
//!
//! # Example
//!
//! ```rust,ignore
//! use reconciler::reconcile;
//!
//! let fields = reconcile(&extraction);
//! assert_eq!(fields.ship_to_last_name, "Doe");
//! ```

pub mod contacts;
pub mod dates;
pub mod names;
pub mod phones;
pub mod work_order;

pub use contacts::{best_contact_email, best_contact_summary, primary_contact, CONTACT_PRIORITY};
pub use names::split_name;
pub use phones::{assign_phone_slots, phone_pool, PhoneSlots};
pub use work_order::work_order_fields;

use shared_types::{ExtractionResult, ReconciledFields};

/// Derive the canonical ship-to and contact fields from an extraction
pub fn reconcile(extraction: &ExtractionResult) -> ReconciledFields {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    let (first_name, last_name) = split_name(extraction.customer_name.as_deref());
    let phones = assign_phone_slots(extraction);
    let contacts = &extraction.alternate_contacts;

    ReconciledFields {
        ship_to_name: text(&extraction.customer_name),
        ship_to_first_name: first_name,
        ship_to_last_name: last_name,
        address1: extraction
            .address1
            .clone()
            .or_else(|| extraction.address.clone())
            .unwrap_or_default(),
        address2: text(&extraction.address2),
        city: text(&extraction.city),
        state: text(&extraction.state),
        zip_code: text(&extraction.zip_code),
        country: text(&extraction.country),
        email: text(&extraction.email),
        phone_slot_1: phones.slot_1,
        phone_slot_2: phones.slot_2,
        phone_slot_3: phones.slot_3,
        phone_slot_4: phones.slot_4,
        best_contact_summary: best_contact_summary(contacts),
        best_contact_email: best_contact_email(contacts),
        primary_contact_name: primary_contact(contacts)
            .map(|contact| contact.name.clone())
            .unwrap_or_default(),
    }
}
