/// Minimum number of words in the description of works before a job can be sent
pub const MIN_DESCRIPTION_WORDS: usize = 5;

pub const DESCRIPTION_REQUIRED_MESSAGE: &str = "General Scope of Works required!  example: Restrectch carpet back in bedroom two or Floor preperation PO for adding to billing group";

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn is_description_valid(text: &str) -> bool {
    word_count(text) >= MIN_DESCRIPTION_WORDS
}
