//! Initial values of the form screens and conversion of submitted values into
//! request bodies.

use super::field::{text, FieldValue, Values};
use super::FormState;
use crate::api::{Article, ArticleDraft, CommentDraft};

fn form(fields: &[(&str, FieldValue)]) -> FormState {
    FormState::new(
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect(),
    )
}

pub fn login_form() -> FormState {
    form(&[
        ("email", FieldValue::default()),
        ("password", FieldValue::default()),
        ("remember", FieldValue::Flag(false)),
    ])
}

pub fn register_form() -> FormState {
    form(&[
        ("username", FieldValue::default()),
        ("email", FieldValue::default()),
        ("password", FieldValue::default()),
        ("repassword", FieldValue::default()),
    ])
}

/// Empty add-article form.
///
pub fn article_form() -> FormState {
    form(&[
        ("title", FieldValue::default()),
        ("content", FieldValue::default()),
        ("category", FieldValue::default()),
        ("region", FieldValue::default()),
        ("img", FieldValue::default()),
    ])
}

/// Edit-article form prefilled from `article`. The current image URL stands
/// in for the image until a new file is picked.
///
pub fn edit_article_form(article: &Article) -> FormState {
    form(&[
        ("title", FieldValue::from(article.title.as_str())),
        ("content", FieldValue::from(article.content.as_str())),
        ("category", FieldValue::from(article.category.as_str())),
        ("region", FieldValue::from(article.region.as_str())),
        (
            "img",
            FieldValue::from(article.image_url.as_deref().unwrap_or_default()),
        ),
    ])
}

pub fn comment_form() -> FormState {
    form(&[("comment", FieldValue::default())])
}

pub fn search_form() -> FormState {
    form(&[("search", FieldValue::default())])
}

/// Article request body from submitted values. A text `img` value is an
/// existing image URL; a picked file has to be uploaded by the caller, whose
/// resulting URL is passed as `uploaded_image_url`.
///
pub fn article_draft(values: &Values, uploaded_image_url: Option<String>) -> ArticleDraft {
    let image_url = uploaded_image_url.or_else(|| match values.get("img") {
        Some(FieldValue::Text(url)) if !url.trim().is_empty() => Some(url.trim().to_owned()),
        _ => None,
    });
    ArticleDraft {
        title: text(values, "title").trim().to_owned(),
        content: text(values, "content").trim().to_owned(),
        category: text(values, "category").to_owned(),
        region: text(values, "region").to_owned(),
        image_url,
    }
}

/// Comment request body from submitted values.
///
pub fn comment_draft(article_id: &str, values: &Values) -> CommentDraft {
    CommentDraft {
        article_id: article_id.to_owned(),
        content: text(values, "comment").trim().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldEvent, FileRef};
    use fake::{Fake, Faker};

    #[test]
    fn test_screen_fields() {
        let names = |form: FormState| form.get_values().keys().cloned().collect::<Vec<_>>();
        assert_eq!(names(login_form()), vec!["email", "password", "remember"]);
        assert_eq!(
            names(register_form()),
            vec!["email", "password", "repassword", "username"]
        );
        assert_eq!(names(comment_form()), vec!["comment"]);
        assert_eq!(names(search_form()), vec!["search"]);
    }

    #[test]
    fn test_edit_form_is_prefilled_and_valid() {
        let mut article: Article = Faker.fake();
        article.title = "Ремонт на пътя".to_string();
        article.content = "Започва ремонт на пътя Пловдив - Асеновград.".to_string();
        article.category = "c-2".to_string();
        article.region = "r-3".to_string();
        article.image_url = Some("https://cdn.example/road.png".to_string());

        let mut form = edit_article_form(&article);
        assert!(form.validate_all());

        let draft = article_draft(form.get_values(), None);
        assert_eq!(draft.title, "Ремонт на пътя");
        assert_eq!(draft.image_url.as_deref(), Some("https://cdn.example/road.png"));
    }

    #[test]
    fn test_article_draft_prefers_uploaded_image() {
        let mut form = article_form();
        form.on_field_change("title", FieldEvent::Input("  Заглавие  ".to_string()))
            .on_field_change(
                "img",
                FieldEvent::File(FileRef {
                    name: "a.png".to_string(),
                    size: 1,
                }),
            );
        let draft = article_draft(form.get_values(), Some("https://cdn.example/a.png".to_string()));
        assert_eq!(draft.title, "Заглавие");
        assert_eq!(draft.image_url.as_deref(), Some("https://cdn.example/a.png"));

        assert_eq!(article_draft(form.get_values(), None).image_url, None);
    }

    #[test]
    fn test_comment_draft() {
        let mut form = comment_form();
        form.on_field_change("comment", FieldEvent::Input(" Браво! ".to_string()));
        let draft = comment_draft("n-1", form.get_values());
        assert_eq!(draft.article_id, "n-1");
        assert_eq!(draft.content, "Браво!");
    }
}
