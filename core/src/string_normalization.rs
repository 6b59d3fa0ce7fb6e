use unidecode::unidecode;

pub fn clean_str(input: &str) -> String {
    unidecode(input) // Convert Unicode to ASCII
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Substring match against an already-cleaned haystack.
pub fn contains_term(cleaned_name: &str, term: &str) -> bool {
    cleaned_name.contains(&clean_str(term))
}

/// True when every word of `phrase` appears somewhere in the cleaned name.
pub fn contains_all_words(cleaned_name: &str, phrase: &str) -> bool {
    let cleaned_phrase = clean_str(phrase);
    !cleaned_phrase.is_empty()
        && cleaned_phrase
            .split_whitespace()
            .all(|word| cleaned_name.contains(word))
}
