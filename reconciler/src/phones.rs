use shared_types::ExtractionResult;

/// The four destination phone fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneSlots {
    pub slot_1: String,
    pub slot_2: String,
    pub slot_3: String,
    pub slot_4: String,
}

/// Fill all four slots. Slots 1-2 come from the primary phone fields, slots
/// 3-4 from the alternate-contact / extra-phone pool.
pub fn assign_phone_slots(extraction: &ExtractionResult) -> PhoneSlots {
    let (slot_1, slot_2) = primary_slots(extraction);
    let pool = phone_pool(extraction);
    let (slot_3, slot_4) = alternate_slots(extraction, &pool);

    PhoneSlots {
        slot_1,
        slot_2,
        slot_3,
        slot_4,
    }
}

fn primary_slots(extraction: &ExtractionResult) -> (String, String) {
    let phone = extraction.phone.as_deref();
    let slot_1 = phone.unwrap_or("").to_string();

    let slot_2 = match extraction.mobile.as_deref() {
        Some(mobile) if Some(mobile) != phone => mobile.to_string(),
        _ => extraction.work_phone.clone().unwrap_or_default(),
    };

    (slot_1, slot_2)
}

/// Every alternate contact's phone (in list order) followed by every extra
/// phone, deduplicated on exact match, first occurrence wins.
pub fn phone_pool(extraction: &ExtractionResult) -> Vec<String> {
    let contact_phones = extraction
        .alternate_contacts
        .iter()
        .filter_map(|contact| contact.phone.as_deref());
    let extra_phones = extraction.extra_phones.iter().map(String::as_str);

    let mut pool: Vec<String> = Vec::new();
    for phone in contact_phones.chain(extra_phones) {
        if !phone.is_empty() && !pool.iter().any(|seen| seen == phone) {
            pool.push(phone.to_string());
        }
    }
    pool
}

/// Non-empty main phone fields in priority order
fn main_phones(extraction: &ExtractionResult) -> impl Iterator<Item = &str> {
    [
        extraction.phone.as_deref(),
        extraction.mobile.as_deref(),
        extraction.home_phone.as_deref(),
        extraction.work_phone.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|phone| !phone.is_empty())
}

fn alternate_slots(extraction: &ExtractionResult, pool: &[String]) -> (String, String) {
    match pool {
        [first, second, ..] => (first.clone(), second.clone()),
        [only] => {
            let other = main_phones(extraction)
                .find(|phone| *phone != only.as_str())
                .unwrap_or("");
            (only.clone(), other.to_string())
        }
        [] => {
            let mut main = main_phones(extraction);
            match main.next() {
                Some(first) => {
                    let second = main.find(|phone| *phone != first).unwrap_or("");
                    (first.to_string(), second.to_string())
                }
                None => (String::new(), String::new()),
            }
        }
    }
}
