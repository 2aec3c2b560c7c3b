/// Re-case `correction` to follow the casing convention of `word`.
///
/// `Teh` gives a title-cased correction, `TEH` an upper-cased one, and
/// anything else gets the correction as stored.
///
/// Title-casing only raises the first character of the correction; the rest
/// keeps its stored casing so proper nouns such as `JavaScript` survive.
pub fn adapt_case(word: &str, correction: &str) -> String {
    if is_title_case(word) {
        to_title_case(correction)
    } else if is_upper_case(word) {
        correction.to_uppercase()
    } else {
        correction.to_string()
    }
}

/// First character upper-case, every other character already lower-case.
fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| c.to_lowercase().eq(Some(c))),
        _ => false,
    }
}

fn is_upper_case(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && word == word.to_uppercase()
}

fn to_title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
