//! Validation engine.
//!
//! Pure per-field rules. Each call returns a new error map in which only the
//! entry of the validated field may have changed: added, replaced or removed.
//! Rules run in order: required, minimum length, format.

use crate::form::{Errors, FieldValue, Values};
use log::*;
use regex::Regex;
use std::sync::OnceLock;

/// Signature shared by every validator a form can use.
pub type Rule = fn(&Errors, &str, &FieldValue, &Values) -> Errors;

/// Extensions accepted by the `img` field.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

pub const USERNAME_REQUIRED: &str = "Потребителското име е задължително.";
pub const USERNAME_TOO_SHORT: &str = "Потребителското име трябва да е поне 3 символа.";
pub const EMAIL_REQUIRED: &str = "Имейлът е задължителен.";
pub const EMAIL_INVALID: &str = "Невалиден имейл адрес.";
pub const PASSWORD_REQUIRED: &str = "Паролата е задължителна.";
pub const PASSWORD_TOO_SHORT: &str = "Паролата трябва да е поне 6 символа.";
pub const REPASSWORD_REQUIRED: &str = "Моля, потвърдете паролата.";
pub const PASSWORDS_DIFFER: &str = "Паролите не съвпадат.";
pub const TITLE_REQUIRED: &str = "Заглавието е задължително.";
pub const TITLE_TOO_SHORT: &str = "Заглавието трябва да е поне 5 символа.";
pub const CONTENT_REQUIRED: &str = "Съдържанието е задължително.";
pub const CONTENT_TOO_SHORT: &str = "Съдържанието трябва да е поне 10 символа.";
pub const CATEGORY_REQUIRED: &str = "Моля, изберете категория.";
pub const REGION_REQUIRED: &str = "Моля, изберете регион.";
pub const IMAGE_REQUIRED: &str = "Моля, изберете снимка.";
pub const IMAGE_FORMAT: &str = "Позволени формати: jpg, jpeg, png, gif, webp.";
pub const COMMENT_REQUIRED: &str = "Коментарът не може да е празен.";
pub const COMMENT_TOO_SHORT: &str = "Коментарът трябва да е поне 2 символа.";
pub const SEARCH_REQUIRED: &str = "Въведете текст за търсене.";
pub const SEARCH_TOO_SHORT: &str = "Трябва да въведете минимум 3 символа за търсене.";

/// Validate `field` holding `value`, with `values` giving every field's
/// current value for cross-field rules. Unknown fields are always valid.
///
pub fn validate(errors: &Errors, field: &str, value: &FieldValue, values: &Values) -> Errors {
    let text = value.as_str().trim();
    let message = match field {
        "username" => required(text, USERNAME_REQUIRED)
            .or_else(|| min_chars(text, 3, USERNAME_TOO_SHORT)),
        "email" => required(text, EMAIL_REQUIRED).or_else(|| email_format(text)),
        "password" => required(text, PASSWORD_REQUIRED)
            .or_else(|| min_chars(text, 6, PASSWORD_TOO_SHORT)),
        "repassword" => required(text, REPASSWORD_REQUIRED)
            .or_else(|| same_as(value, values.get("password"), PASSWORDS_DIFFER)),
        "title" => required(text, TITLE_REQUIRED).or_else(|| min_chars(text, 5, TITLE_TOO_SHORT)),
        "content" => required(text, CONTENT_REQUIRED)
            .or_else(|| min_chars(text, 10, CONTENT_TOO_SHORT)),
        "category" => required(text, CATEGORY_REQUIRED),
        "region" => required(text, REGION_REQUIRED),
        "img" => required(text, IMAGE_REQUIRED).or_else(|| image_extension(text)),
        "comment" => required(text, COMMENT_REQUIRED)
            .or_else(|| min_chars(text, 2, COMMENT_TOO_SHORT)),
        "search" => required(text, SEARCH_REQUIRED)
            .or_else(|| min_chars(text, 3, SEARCH_TOO_SHORT)),
        _ => None,
    };
    with_entry(errors, field, message)
}

fn with_entry(errors: &Errors, field: &str, message: Option<&str>) -> Errors {
    let mut next = errors.clone();
    match message {
        Some(message) => {
            next.insert(field.to_owned(), message.to_owned());
        }
        None => {
            next.remove(field);
        }
    }
    next
}

fn required(text: &str, message: &'static str) -> Option<&'static str> {
    text.is_empty().then_some(message)
}

fn min_chars(text: &str, min: usize, message: &'static str) -> Option<&'static str> {
    (text.chars().count() < min).then_some(message)
}

fn same_as(value: &FieldValue, other: Option<&FieldValue>, message: &'static str) -> Option<&'static str> {
    let other = other.map(FieldValue::as_str).unwrap_or("");
    (value.as_str() != other).then_some(message)
}

fn email_format(text: &str) -> Option<&'static str> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
    let email = EMAIL.get_or_init(|| match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Failed to compile regex pattern '{}': {}", pattern, e);
            None
        }
    });
    match email {
        Some(re) if !re.is_match(text) => Some(EMAIL_INVALID),
        _ => None,
    }
}

fn image_extension(name: &str) -> Option<&'static str> {
    // Existing images are URLs; ignore any query string.
    let name = name.split(['?', '#']).next().unwrap_or(name);
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    (!IMAGE_EXTENSIONS.contains(&extension.as_str())).then_some(IMAGE_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FileRef;

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    fn values(pairs: &[(&str, &str)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), text(v)))
            .collect()
    }

    fn check(field: &str, value: &str) -> Option<String> {
        let all = values(&[(field, value)]);
        validate(&Errors::new(), field, &text(value), &all)
            .get(field)
            .cloned()
    }

    #[test]
    fn test_search_minimum_length() {
        assert_eq!(
            check("search", "ab").as_deref(),
            Some("Трябва да въведете минимум 3 символа за търсене.")
        );
        assert_eq!(check("search", "").as_deref(), Some(SEARCH_REQUIRED));
        assert_eq!(check("search", "abc"), None);
        assert_eq!(check("search", "спо"), None);
    }

    #[test]
    fn test_rules_run_in_order() {
        assert_eq!(check("username", "").as_deref(), Some(USERNAME_REQUIRED));
        assert_eq!(check("username", "  ").as_deref(), Some(USERNAME_REQUIRED));
        assert_eq!(check("username", "ив").as_deref(), Some(USERNAME_TOO_SHORT));
        assert_eq!(check("username", "иван"), None);

        assert_eq!(check("email", "").as_deref(), Some(EMAIL_REQUIRED));
        assert_eq!(check("email", "ivan@").as_deref(), Some(EMAIL_INVALID));
        assert_eq!(check("email", "ivan@example.bg"), None);

        assert_eq!(check("password", "12345").as_deref(), Some(PASSWORD_TOO_SHORT));
        assert_eq!(check("title", "Къс").as_deref(), Some(TITLE_TOO_SHORT));
        assert_eq!(check("content", "Кратко").as_deref(), Some(CONTENT_TOO_SHORT));
        assert_eq!(check("category", "").as_deref(), Some(CATEGORY_REQUIRED));
        assert_eq!(check("region", "r-1"), None);
        assert_eq!(check("comment", "a").as_deref(), Some(COMMENT_TOO_SHORT));
    }

    #[test]
    fn test_image_extensions() {
        let file = |name: &str| {
            FieldValue::File(FileRef {
                name: name.to_string(),
                size: 10,
            })
        };
        let run = |value: FieldValue| {
            validate(&Errors::new(), "img", &value, &Values::new())
                .get("img")
                .cloned()
        };
        assert_eq!(run(file("photo.JPG")), None);
        assert_eq!(run(file("photo.webp")), None);
        assert_eq!(run(file("photo.bmp")).as_deref(), Some(IMAGE_FORMAT));
        assert_eq!(run(file("photo")).as_deref(), Some(IMAGE_FORMAT));
        assert_eq!(run(text("")).as_deref(), Some(IMAGE_REQUIRED));
        assert_eq!(run(text("https://cdn.example/news/1.png?v=2")), None);
    }

    #[test]
    fn test_repassword_depends_on_password() {
        let all = values(&[("password", "secret1"), ("repassword", "secret1")]);
        let errors = validate(&Errors::new(), "repassword", &text("secret1"), &all);
        assert!(errors.is_empty());

        let changed = values(&[("password", "secret2"), ("repassword", "secret1")]);
        // Changing the password alone does not touch the confirmation's entry.
        let after_password = validate(&errors, "password", &text("secret2"), &changed);
        assert!(!after_password.contains_key("repassword"));
        // Re-validating the confirmation against the new values does.
        let after_repassword = validate(&after_password, "repassword", &text("secret1"), &changed);
        assert_eq!(
            after_repassword.get("repassword").map(String::as_str),
            Some(PASSWORDS_DIFFER)
        );
    }

    #[test]
    fn test_only_the_validated_field_changes() {
        let mut errors = Errors::new();
        errors.insert("title".to_string(), TITLE_REQUIRED.to_string());
        errors.insert("submit".to_string(), "duplicate title".to_string());

        let next = validate(&errors, "content", &text("x"), &Values::new());
        assert_eq!(next.get("title"), errors.get("title"));
        assert_eq!(next.get("submit"), errors.get("submit"));
        assert_eq!(next.get("content").map(String::as_str), Some(CONTENT_TOO_SHORT));
        // The input map is untouched.
        assert!(!errors.contains_key("content"));

        let cleared = validate(&next, "title", &text("Дълго заглавие"), &Values::new());
        assert!(!cleared.contains_key("title"));
        assert_eq!(cleared.get("content"), next.get("content"));
    }

    #[test]
    fn test_unknown_field_clears_entry() {
        let mut errors = Errors::new();
        errors.insert("remember".to_string(), "stale".to_string());
        let next = validate(&errors, "remember", &FieldValue::Flag(true), &Values::new());
        assert!(next.is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let all = values(&[("password", "secret1"), ("repassword", "other")]);
        for (field, value) in [("repassword", "other"), ("email", "bad"), ("search", "ok!")] {
            let once = validate(&Errors::new(), field, &text(value), &all);
            let twice = validate(&Errors::new(), field, &text(value), &all);
            assert_eq!(once, twice);
            assert_eq!(validate(&once, field, &text(value), &all), once);
        }
    }
}
