//! Picks contact details out of free-form chat messages so the profile
//! sent with later messages is filled in as the user shares it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::session::UserInfoUpdate;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static NAME_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"my name is\s+([a-z\s]+)",
        r"i am\s+([a-z\s]+)",
        r"i'm\s+([a-z\s]+)",
        r"name:\s*([a-z\s]+)",
        r"call me\s+([a-z\s]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid name regex"))
    .collect()
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s\-()]{8,}\d").expect("valid phone regex"));

const MAX_NAME_WORDS: usize = 3;
const MIN_PHONE_DIGITS: usize = 10;

/// Extract whatever contact fields `message` contains
pub fn extract_contact_info(message: &str) -> UserInfoUpdate {
    UserInfoUpdate {
        name: extract_name(message),
        email: EMAIL_RE.find(message).map(|m| m.as_str().to_string()),
        phone: extract_phone(message),
    }
}

fn extract_name(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    for re in NAME_RES.iter() {
        let Some(captures) = re.captures(&lower) else {
            continue;
        };
        let words: Vec<&str> = captures[1].split_whitespace().collect();
        if !words.is_empty()
            && words.len() <= MAX_NAME_WORDS
            && words.iter().all(|w| w.chars().all(char::is_alphabetic))
        {
            return Some(title_case(&words));
        }
    }
    None
}

fn extract_phone(message: &str) -> Option<String> {
    PHONE_RE
        .find_iter(message)
        .map(|m| m.as_str().trim())
        .find(|candidate| candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS)
        .map(str::to_string)
}

fn title_case(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
