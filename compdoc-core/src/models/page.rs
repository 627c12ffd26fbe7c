use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::component::ComponentStatus;
use super::source::{DeliveryGuarantee, Source};

/// Metadata attached to one rendered documentation page.
///
/// Every attribute is optional; the layout only shows what is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    /// Site-relative path of the social preview image.
    pub image: Option<String>,
    pub permalink: Option<String>,
    pub hide_title: bool,
    pub event_types: Vec<String>,
    pub delivery_guarantee: Option<DeliveryGuarantee>,
    pub status: Option<ComponentStatus>,
    pub output_types: Vec<String>,
    pub edit_url: Option<String>,
    pub issues_url: Option<String>,
    pub source_url: Option<String>,
    /// Unix timestamp, in seconds.
    pub last_updated_at: Option<i64>,
    pub last_updated_by: Option<String>,
}

impl PageMetadata {
    /// Page metadata for a source's reference page.
    ///
    /// A source's output types double as the event types shown in its header.
    pub fn from_source(source: &Source) -> Self {
        let component = source.component();
        Self {
            title: component.display_title().map(str::to_string),
            description: component.description.clone(),
            event_types: source.output_types().to_vec(),
            delivery_guarantee: Some(source.delivery_guarantee()),
            status: Some(component.status),
            output_types: source.output_types().to_vec(),
            ..Self::default()
        }
    }
}

/// A node in a page's heading tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub children: Vec<Heading>,
}

/// Input for laying out a page: its metadata plus its table of contents.
///
/// `headings` is absent for pages without a table of contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    pub metadata: PageMetadata,
    #[serde(default)]
    pub headings: Option<Vec<Heading>>,
}

/// Site-wide settings the layout needs to build absolute URLs and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Absolute site origin, e.g. `https://docs.example.com`.
    pub site_url: String,
    /// Path of the page explaining statuses and delivery guarantees.
    pub guarantees_path: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            guarantees_path: "/docs/about/guarantees".to_string(),
        }
    }
}

impl SiteSettings {
    fn absolute(&self, path: &str) -> String {
        let origin = self.site_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", origin, path)
        } else {
            format!("{}/{}", origin, path)
        }
    }

    fn guarantee_anchor(&self, anchor: &str) -> String {
        format!("{}#{}", self.guarantees_path, anchor)
    }
}

/// Everything a documentation page shows, decided from its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    pub head: PageHead,
    /// Absent when the page hides its title.
    pub header: Option<PageHeader>,
    /// Absent when the page has no table of contents.
    pub sidebar: Option<Sidebar>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHead {
    pub title: Option<String>,
    pub meta: Vec<MetaTag>,
}

/// A `<meta>` tag, keyed either by `name` or by `property`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub attribute: MetaAttribute,
    pub key: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetaAttribute {
    Name,
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHeader {
    pub title: Option<String>,
    pub badges: Vec<EventBadge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBadge {
    pub label: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebar {
    pub status: Option<StatusSection>,
    /// Empty when the page has no headings.
    pub contents: Vec<Heading>,
    pub resources: Vec<ResourceLink>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSection {
    pub maturity: Badge,
    pub guarantee: Badge,
}

/// A status badge linking to its explanation on the guarantees page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub link: String,
    pub tone: Tone,
    pub icon: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Primary,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub kind: ResourceKind,
    pub label: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Edit,
    Issues,
    Source,
}

impl PageLayout {
    /// Lay out a page.
    ///
    /// `headings` is `None` when the page has no table of contents at all, in
    /// which case there is no sidebar. `Some(&[])` keeps the sidebar but
    /// leaves its contents empty.
    pub fn build(meta: &PageMetadata, headings: Option<&[Heading]>, site: &SiteSettings) -> Self {
        Self {
            head: build_head(meta, site),
            header: (!meta.hide_title).then(|| build_header(meta)),
            sidebar: headings.map(|headings| build_sidebar(meta, headings, site)),
        }
    }

    pub fn from_input(input: &PageInput, site: &SiteSettings) -> Self {
        Self::build(&input.metadata, input.headings.as_deref(), site)
    }
}

fn build_head(meta: &PageMetadata, site: &SiteSettings) -> PageHead {
    let mut tags = Vec::new();
    let mut push = |attribute, key: &str, content: String| {
        tags.push(MetaTag {
            attribute,
            key: key.to_string(),
            content,
        })
    };

    if let Some(description) = &meta.description {
        push(MetaAttribute::Name, "description", description.clone());
        push(MetaAttribute::Property, "og:description", description.clone());
    }
    if !meta.keywords.is_empty() {
        push(MetaAttribute::Name, "keywords", meta.keywords.join(","));
    }
    if let Some(image) = &meta.image {
        let url = site.absolute(image);
        push(MetaAttribute::Property, "og:image", url.clone());
        push(MetaAttribute::Property, "twitter:image", url);
        push(
            MetaAttribute::Name,
            "twitter:image:alt",
            format!("Image for {}", meta.title.as_deref().unwrap_or_default()),
        );
    }
    if let Some(permalink) = &meta.permalink {
        push(MetaAttribute::Property, "og:url", site.absolute(permalink));
    }

    PageHead {
        title: meta.title.clone(),
        meta: tags,
    }
}

fn build_header(meta: &PageMetadata) -> PageHeader {
    let mut badges = Vec::new();
    for (kind, label) in [("log", "LOG"), ("metric", "METRIC")] {
        if meta.event_types.iter().any(|t| t == kind) {
            badges.push(EventBadge {
                label: label.to_string(),
                tooltip: format!("This component works with {} events.", kind),
            });
        }
    }
    PageHeader {
        title: meta.title.clone(),
        badges,
    }
}

fn build_sidebar(meta: &PageMetadata, headings: &[Heading], site: &SiteSettings) -> Sidebar {
    let status = (meta.status.is_some() || meta.delivery_guarantee.is_some()).then(|| {
        StatusSection {
            maturity: maturity_badge(meta.status.unwrap_or_default(), site),
            guarantee: guarantee_badge(
                meta.delivery_guarantee
                    .unwrap_or(DeliveryGuarantee::AtLeastOnce),
                site,
            ),
        }
    });

    let mut resources = Vec::new();
    let links = [
        (ResourceKind::Edit, "Edit this page", "edit-1", &meta.edit_url),
        (ResourceKind::Issues, "View Issues", "message-circle", &meta.issues_url),
        (ResourceKind::Source, "View Source", "github", &meta.source_url),
    ];
    for (kind, label, icon, url) in links {
        if let Some(url) = url {
            resources.push(ResourceLink {
                kind,
                label: label.to_string(),
                url: url.clone(),
                icon: icon.to_string(),
            });
        }
    }

    Sidebar {
        status,
        contents: headings.to_vec(),
        resources,
        last_updated: last_updated_line(meta.last_updated_at, meta.last_updated_by.as_deref()),
    }
}

fn maturity_badge(status: ComponentStatus, site: &SiteSettings) -> Badge {
    match status {
        ComponentStatus::Beta => Badge {
            label: "beta".to_string(),
            link: site.guarantee_anchor("beta"),
            tone: Tone::Warning,
            icon: "alert-triangle".to_string(),
            tooltip: "This component is in beta and is not recommended for production environments."
                .to_string(),
        },
        ComponentStatus::ProdReady => Badge {
            label: "prod-ready".to_string(),
            link: site.guarantee_anchor("prod-ready"),
            tone: Tone::Primary,
            icon: "award".to_string(),
            tooltip: "This component has passed reliability standards that make it production ready."
                .to_string(),
        },
    }
}

fn guarantee_badge(guarantee: DeliveryGuarantee, site: &SiteSettings) -> Badge {
    match guarantee {
        DeliveryGuarantee::BestEffort => Badge {
            label: "best-effort".to_string(),
            link: site.guarantee_anchor("best-effort"),
            tone: Tone::Warning,
            icon: "shield-off".to_string(),
            tooltip: "This component makes a best-effort delivery guarantee, and in rare cases can lose data."
                .to_string(),
        },
        DeliveryGuarantee::AtLeastOnce => Badge {
            label: "at-least-once".to_string(),
            link: site.guarantee_anchor("at-least-once"),
            tone: Tone::Primary,
            icon: "shield".to_string(),
            tooltip: "This component offers an at-least-once delivery guarantee.".to_string(),
        },
    }
}

/// `Last updated on <date> by <author>`, dropping whichever part is unknown.
/// A zero timestamp counts as unknown.
fn last_updated_line(at: Option<i64>, by: Option<&str>) -> Option<String> {
    let date = at
        .filter(|secs| *secs != 0)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string());

    match (date, by) {
        (None, None) => None,
        (Some(date), None) => Some(format!("Last updated on {}", date)),
        (None, Some(by)) => Some(format!("Last updated by {}", by)),
        (Some(date), Some(by)) => Some(format!("Last updated on {} by {}", date, by)),
    }
}
