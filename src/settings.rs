//! Navigation model for the settings hub.
//!
//! The hub lists settings pages in two groups. The profile entry shows the
//! signed-in user's details, so the model is built from the current
//! [`Credential`].
//!
//! # Example
//!
//! ```rust
//! use account_api::Credential;
//! use account_api::settings::{settings_groups, NOT_SPECIFIED};
//!
//! let credential = Credential::new(1, "T1").with_name("Ada").with_email("a@b.com");
//! let groups = settings_groups(Some(&credential));
//!
//! assert_eq!(groups[0].title, "Account");
//! let profile = &groups[0].items[0];
//! assert_eq!(profile.href, "/settings/profile");
//! assert_eq!(profile.details[2].text, NOT_SPECIFIED);
//! ```

use serde::Serialize;

use crate::auth::Credential;

/// Placeholder shown for a missing profile field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// What a detail line describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    /// Display name.
    Name,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Job title.
    Title,
}

/// One line of detail under a settings entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettingsDetail {
    /// Which field the line shows.
    pub kind: DetailKind,
    /// Text to display.
    pub text: String,
}

/// A link to one settings page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettingsItem {
    /// Page title.
    pub title: &'static str,
    /// One-sentence description.
    pub description: &'static str,
    /// Page path.
    pub href: &'static str,
    /// Detail lines, empty for most pages.
    pub details: Vec<SettingsDetail>,
}

impl SettingsItem {
    const fn new(title: &'static str, description: &'static str, href: &'static str) -> Self {
        Self {
            title,
            description,
            href,
            details: Vec::new(),
        }
    }
}

/// A titled group of settings entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettingsGroup {
    /// Group heading.
    pub title: &'static str,
    /// Entries in display order.
    pub items: Vec<SettingsItem>,
}

/// Builds the settings hub for the given session.
///
/// Without a credential the profile entry has empty name and email lines and
/// "Not specified" for phone and title.
#[must_use]
pub fn settings_groups(credential: Option<&Credential>) -> Vec<SettingsGroup> {
    let mut profile = SettingsItem::new(
        "Profile",
        "Edit your personal information and profile settings.",
        "/settings/profile",
    );
    profile.details = profile_details(credential);

    vec![
        SettingsGroup {
            title: "Account",
            items: vec![
                profile,
                SettingsItem::new(
                    "Address",
                    "Update and manage your address.",
                    "/settings/address",
                ),
                SettingsItem::new(
                    "Security",
                    "Manage your password and security settings.",
                    "/settings/security",
                ),
            ],
        },
        SettingsGroup {
            title: "Preferences",
            items: vec![
                SettingsItem::new(
                    "Notifications",
                    "Choose your email and in-app notification preferences.",
                    "/settings/notifications",
                ),
                SettingsItem::new(
                    "Privacy",
                    "Manage your privacy and data sharing preferences.",
                    "/settings/privacy",
                ),
                SettingsItem::new(
                    "Appearance",
                    "Change the application theme and display preferences.",
                    "/settings/appearance",
                ),
            ],
        },
    ]
}

fn profile_details(credential: Option<&Credential>) -> Vec<SettingsDetail> {
    let value = |field: fn(&Credential) -> Option<&String>| {
        credential
            .and_then(field)
            .filter(|v| !v.is_empty())
            .cloned()
    };
    let detail = |kind, text| SettingsDetail { kind, text };
    let placeholder = || NOT_SPECIFIED.to_string();

    vec![
        detail(DetailKind::Name, value(|c| c.name.as_ref()).unwrap_or_default()),
        detail(DetailKind::Email, value(|c| c.email.as_ref()).unwrap_or_default()),
        detail(
            DetailKind::Phone,
            value(|c| c.phone.as_ref()).unwrap_or_else(placeholder),
        ),
        detail(
            DetailKind::Title,
            value(|c| c.title.as_ref()).unwrap_or_else(placeholder),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_and_order() {
        let groups = settings_groups(None);
        let titles: Vec<_> = groups.iter().map(|g| g.title).collect();
        assert_eq!(titles, ["Account", "Preferences"]);

        let hrefs: Vec<_> = groups
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.href))
            .collect();
        assert_eq!(
            hrefs,
            [
                "/settings/profile",
                "/settings/address",
                "/settings/security",
                "/settings/notifications",
                "/settings/privacy",
                "/settings/appearance",
            ]
        );
    }

    #[test]
    fn test_profile_details_from_credential() {
        let credential = Credential::new(1, "T1")
            .with_name("Ada")
            .with_email("a@b.com")
            .with_phone("555")
            .with_title("Engineer");

        let groups = settings_groups(Some(&credential));
        let texts: Vec<_> = groups[0].items[0]
            .details
            .iter()
            .map(|d| d.text.as_str())
            .collect();
        assert_eq!(texts, ["Ada", "a@b.com", "555", "Engineer"]);
    }

    #[test]
    fn test_missing_phone_and_title_show_placeholder() {
        let credential = Credential::new(1, "T1").with_name("Ada");
        let groups = settings_groups(Some(&credential));
        let details = &groups[0].items[0].details;

        assert_eq!(details[2].kind, DetailKind::Phone);
        assert_eq!(details[2].text, NOT_SPECIFIED);
        assert_eq!(details[3].text, NOT_SPECIFIED);
    }

    #[test]
    fn test_only_profile_has_details() {
        let groups = settings_groups(None);
        let with_details = groups
            .iter()
            .flat_map(|g| &g.items)
            .filter(|i| !i.details.is_empty())
            .count();
        assert_eq!(with_details, 1);
    }

    #[test]
    fn test_serializes_detail_kind_in_snake_case() {
        let groups = settings_groups(None);
        let json = serde_json::to_value(&groups[0].items[0].details[0]).unwrap();
        assert_eq!(json["kind"], "name");
    }
}
