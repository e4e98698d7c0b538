//! Display-only derivations for a form.
//!
//! Brand and contrast colors, legal attributes with their fallback chains,
//! and the publish window. Fallbacks are explicit accessors over the form
//! and its owning user; nothing here reads global state or mutates.

use chrono::{DateTime, Utc};
use formflow_db::entities::{form, user};
use serde::Serialize;
use url::Url;

/// Brand color used when a form has none configured.
pub const DEFAULT_BRAND_COLOR: &str = "#000000";

const WHITE: &str = "#ffffff";
const BLACK: &str = "#000000";

/// The form's effective brand color.
#[must_use]
pub fn brand_color(form: &form::Model) -> &str {
    form.brand_color.as_deref().unwrap_or(DEFAULT_BRAND_COLOR)
}

/// Two-valued contrast color for text rendered on the brand color.
///
/// Pure white when the effective brand color is pure black, else pure
/// black. Deliberately not a luminance calculation; the client styling
/// depends on exactly this rule.
#[must_use]
pub fn contrast_color(form: &form::Model) -> &'static str {
    if brand_color(form) == BLACK { WHITE } else { BLACK }
}

/// Whether the form is published at the given instant.
///
/// Published means `published_at` is set and not in the future.
#[must_use]
pub fn is_published(form: &form::Model, now: DateTime<Utc>) -> bool {
    form.published_at.is_some_and(|at| at <= now)
}

/// Public respondent-facing URL for the form.
pub fn public_url(base: &Url, form: &form::Model) -> Result<Url, url::ParseError> {
    base.join(&form.uuid)
}

/// Effective privacy policy link: the form's override, else the owner's
/// default.
#[must_use]
pub fn effective_privacy_link<'a>(form: &'a form::Model, owner: &'a user::Model) -> Option<&'a str> {
    form.privacy_link
        .as_deref()
        .or(owner.privacy_link.as_deref())
}

/// Effective legal notice link: the form's override, else the owner's
/// default.
#[must_use]
pub fn effective_legal_notice_link<'a>(
    form: &'a form::Model,
    owner: &'a user::Model,
) -> Option<&'a str> {
    form.legal_notice_link
        .as_deref()
        .or(owner.legal_notice_link.as_deref())
}

/// Display-only view of a form, as served to the respondent client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormPresentation {
    /// Effective brand color.
    pub brand_color: String,
    /// Contrast color for the brand color.
    pub contrast_color: String,
    /// Owner's company name.
    pub company_name: Option<String>,
    /// Owner's company description.
    pub company_description: Option<String>,
    /// Privacy link after the form -> owner fallback.
    pub active_privacy_link: Option<String>,
    /// Legal notice link after the form -> owner fallback.
    pub active_legal_notice_link: Option<String>,
    /// Privacy contact person; always the owner's.
    pub privacy_contact_person: Option<String>,
    /// Privacy contact email; always the owner's.
    pub privacy_contact_email: Option<String>,
    /// Public avatar URL, when an avatar asset exists.
    pub avatar: Option<String>,
}

/// Assemble the presentation view.
///
/// `avatar` is the resolved public URL when the form's avatar asset exists
/// in storage; existence is checked by the caller because it is the only
/// I/O-touching piece of the presentation.
#[must_use]
pub fn presentation(
    form: &form::Model,
    owner: &user::Model,
    avatar: Option<String>,
) -> FormPresentation {
    FormPresentation {
        brand_color: brand_color(form).to_string(),
        contrast_color: contrast_color(form).to_string(),
        company_name: owner.company_name.clone(),
        company_description: owner.company_description.clone(),
        active_privacy_link: effective_privacy_link(form, owner).map(str::to_string),
        active_legal_notice_link: effective_legal_notice_link(form, owner).map(str::to_string),
        privacy_contact_person: owner.privacy_contact_person.clone(),
        privacy_contact_email: owner.privacy_contact_email.clone(),
        avatar,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_form() -> form::Model {
        form::Model {
            id: "form1".to_string(),
            uuid: "11111111-2222-3333-4444-555555555555".to_string(),
            user_id: "user1".to_string(),
            name: "Feedback".to_string(),
            published_at: None,
            brand_color: None,
            privacy_link: None,
            legal_notice_link: None,
            avatar_path: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_owner() -> user::Model {
        user::Model {
            id: "user1".to_string(),
            name: "Philipp".to_string(),
            email: "philipp@example.com".to_string(),
            api_token: "token".to_string(),
            company_name: Some("Test Corp".to_string()),
            company_description: Some("Just a test description".to_string()),
            privacy_link: Some("https://privacy".to_string()),
            legal_notice_link: Some("https://legal".to_string()),
            privacy_contact_person: Some("Philipp".to_string()),
            privacy_contact_email: Some("privacy@example.com".to_string()),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_brand_color_defaults_to_black() {
        let form = test_form();
        assert_eq!(brand_color(&form), "#000000");
        assert_eq!(contrast_color(&form), "#ffffff");
    }

    #[test]
    fn test_contrast_color_is_binary() {
        let mut form = test_form();

        form.brand_color = Some("#ffffff".to_string());
        assert_eq!(brand_color(&form), "#ffffff");
        assert_eq!(contrast_color(&form), "#000000");

        form.brand_color = Some("#000000".to_string());
        assert_eq!(contrast_color(&form), "#ffffff");

        // Any non-black brand color gets black text, even dark ones.
        form.brand_color = Some("#010101".to_string());
        assert_eq!(contrast_color(&form), "#000000");
    }

    #[test]
    fn test_is_published_window() {
        let now = Utc::now();
        let mut form = test_form();

        assert!(!is_published(&form, now));

        form.published_at = Some(now.into());
        assert!(is_published(&form, now));

        form.published_at = Some((now + Duration::days(1)).into());
        assert!(!is_published(&form, now));
    }

    #[test]
    fn test_public_url_appends_uuid() {
        let base = Url::parse("https://forms.example.com/").unwrap();
        let form = test_form();
        let url = public_url(&base, &form).unwrap();
        assert_eq!(
            url.as_str(),
            "https://forms.example.com/11111111-2222-3333-4444-555555555555"
        );
    }

    #[test]
    fn test_legal_links_fall_back_to_owner() {
        let form = test_form();
        let owner = test_owner();

        let view = presentation(&form, &owner, None);
        assert_eq!(view.active_privacy_link.as_deref(), Some("https://privacy"));
        assert_eq!(view.active_legal_notice_link.as_deref(), Some("https://legal"));
        assert_eq!(view.company_name.as_deref(), Some("Test Corp"));
        assert_eq!(view.privacy_contact_person.as_deref(), Some("Philipp"));
    }

    #[test]
    fn test_form_overrides_win_over_owner_defaults() {
        let mut form = test_form();
        form.privacy_link = Some("https://otherPrivacyLink".to_string());
        form.legal_notice_link = Some("https://otherLink".to_string());
        let owner = test_owner();

        let view = presentation(&form, &owner, None);
        assert_eq!(
            view.active_privacy_link.as_deref(),
            Some("https://otherPrivacyLink")
        );
        assert_eq!(
            view.active_legal_notice_link.as_deref(),
            Some("https://otherLink")
        );
        // Contact fields always come from the owner.
        assert_eq!(
            view.privacy_contact_email.as_deref(),
            Some("privacy@example.com")
        );
    }

    #[test]
    fn test_presentation_carries_avatar_when_resolved() {
        let form = test_form();
        let owner = test_owner();

        let view = presentation(&form, &owner, Some("/assets/f/avatar.png".to_string()));
        assert_eq!(view.avatar.as_deref(), Some("/assets/f/avatar.png"));

        let view = presentation(&form, &owner, None);
        assert!(view.avatar.is_none());
    }
}
