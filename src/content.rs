use serde::Deserialize;

pub const PROJECT_PLACEHOLDER_IMAGE: &str = "/placeholders/project.svg";
pub const ARCHIVE_PLACEHOLDER_IMAGE: &str = "/placeholders/archive.svg";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub identity: Identity,
    #[serde(default)]
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub archive: Vec<ArchiveEntry>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    pub contact: Contact,
    #[serde(default)]
    pub footer: FooterVariant,
    #[serde(default)]
    pub copyright_year: Option<u16>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub role: String,
    pub headline: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Identity {
    pub fn headline_words(&self) -> Vec<&str> {
        self.headline.split_whitespace().collect()
    }

    pub fn page_title(&self) -> &str {
        self.page_title.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_link")]
    pub url: String,
}

impl Project {
    pub fn image(&self) -> &str {
        non_blank(self.image_url.as_deref()).unwrap_or(PROJECT_PLACEHOLDER_IMAGE)
    }

    pub fn has_image(&self) -> bool {
        non_blank(self.image_url.as_deref()).is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ArchiveEntry {
    pub fn image(&self) -> &str {
        non_blank(self.image_url.as_deref()).unwrap_or(ARCHIVE_PLACEHOLDER_IMAGE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Github,
    Linkedin,
    Mail,
    #[serde(other)]
    Link,
}

impl SocialIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Github => "GH",
            Self::Linkedin => "in",
            Self::Mail => "@",
            Self::Link => "↗",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
    pub icon: SocialIcon,
}

impl SocialLink {
    pub fn opens_new_tab(&self) -> bool {
        self.href.starts_with("http")
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub heading: String,
    #[serde(default)]
    pub blurb: String,
    #[serde(default = "default_cta_label")]
    pub cta_label: String,
}

impl Contact {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

/// Two footers exist for the same page: a one-line credit and the full
/// contact section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterVariant {
    Minimal,
    #[default]
    Enhanced,
}

fn default_link() -> String {
    "#".to_string()
}

fn default_cta_label() -> String {
    "Get In Touch".to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_site() -> serde_json::Value {
        json!({
            "identity": {
                "name": "Ada Example",
                "shortName": "Ada",
                "headline": "Quiet  tools\tfor loud   problems"
            },
            "contact": { "email": "ada@example.com", "heading": "Say hi" }
        })
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let site: SiteContent = serde_json::from_value(minimal_site()).expect("valid content");

        assert!(site.projects.is_empty());
        assert!(site.archive.is_empty());
        assert_eq!(site.footer, FooterVariant::Enhanced);
        assert_eq!(site.contact.cta_label, "Get In Touch");
        assert_eq!(site.identity.page_title(), "Ada Example");
    }

    #[test]
    fn headline_splits_on_any_whitespace() {
        let site: SiteContent = serde_json::from_value(minimal_site()).expect("valid content");

        assert_eq!(
            site.identity.headline_words(),
            vec!["Quiet", "tools", "for", "loud", "problems"]
        );
    }

    #[test]
    fn missing_or_blank_images_fall_back_to_placeholders() {
        let project: Project = serde_json::from_value(json!({
            "title": "Untitled",
            "imageUrl": "   "
        }))
        .expect("valid project");
        let archived: ArchiveEntry =
            serde_json::from_value(json!({ "id": "09", "title": "Sketch" })).expect("valid entry");

        assert_eq!(project.image(), PROJECT_PLACEHOLDER_IMAGE);
        assert!(!project.has_image());
        assert_eq!(project.url, "#");
        assert_eq!(archived.image(), ARCHIVE_PLACEHOLDER_IMAGE);
    }

    #[test]
    fn unknown_social_icons_render_as_plain_links() {
        let link: SocialLink = serde_json::from_value(json!({
            "label": "Blog",
            "href": "https://example.com/blog",
            "icon": "rss"
        }))
        .expect("valid link");

        assert_eq!(link.icon, SocialIcon::Link);
        assert!(link.opens_new_tab());
    }

    #[test]
    fn footer_variant_parses_both_presentations() {
        let minimal: FooterVariant = serde_json::from_value(json!("minimal")).expect("variant");
        let enhanced: FooterVariant = serde_json::from_value(json!("enhanced")).expect("variant");

        assert_eq!(minimal, FooterVariant::Minimal);
        assert_eq!(enhanced, FooterVariant::Enhanced);
    }
}
