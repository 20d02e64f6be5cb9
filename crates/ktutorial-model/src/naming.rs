//! Conversion of free text into script identifiers.

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convert text into `UpperCamelCase`.
///
/// Anything that is not a word character or a space acts as a word
/// separator. Only the first character of each word is changed; the rest is
/// kept as written, so `"the ID"` becomes `"TheID"`.
pub fn to_upper_camel_case(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if is_word_char(c) || c == ' ' { c } else { ' ' })
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    for word in cleaned.split(' ').filter(|word| !word.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Convert text into `lowerCamelCase`.
pub fn to_lower_camel_case(text: &str) -> String {
    let upper = to_upper_camel_case(text);
    let mut chars = upper.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
