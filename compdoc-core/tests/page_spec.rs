use compdoc_core::models::*;
use compdoc_core::Attributes;
use pretty_assertions::assert_eq;
use serde_json::json;
use speculate2::speculate;

const NO_HEADINGS: &[Heading] = &[];

fn site() -> SiteSettings {
    SiteSettings {
        site_url: "https://docs.example.com".to_string(),
        guarantees_path: "/docs/about/guarantees".to_string(),
    }
}

fn heading(id: &str, value: &str, children: Vec<Heading>) -> Heading {
    Heading {
        id: id.to_string(),
        value: value.to_string(),
        children,
    }
}

fn meta_keys(layout: &PageLayout) -> Vec<&str> {
    layout.head.meta.iter().map(|m| m.key.as_str()).collect()
}

speculate! {
    before {
        let mut meta = PageMetadata {
            title: Some("STDIN source".to_string()),
            ..PageMetadata::default()
        };
    }

    describe "head" {
        it "only carries the title when nothing else is known" {
            let layout = PageLayout::build(&meta, None, &site());
            assert_eq!(layout.head.title.as_deref(), Some("STDIN source"));
            assert!(layout.head.meta.is_empty());
        }

        it "emits description, keywords, image and url tags" {
            meta.description = Some("Ingests standard input".to_string());
            meta.keywords = vec!["stdin".to_string(), "source".to_string()];
            meta.image = Some("/img/stdin.png".to_string());
            meta.permalink = Some("/docs/sources/stdin".to_string());

            let layout = PageLayout::build(&meta, None, &site());
            assert_eq!(
                meta_keys(&layout),
                [
                    "description",
                    "og:description",
                    "keywords",
                    "og:image",
                    "twitter:image",
                    "twitter:image:alt",
                    "og:url",
                ]
            );

            let content = |key: &str| {
                layout.head.meta.iter().find(|m| m.key == key).map(|m| m.content.clone())
            };
            assert_eq!(content("keywords").as_deref(), Some("stdin,source"));
            assert_eq!(content("og:image").as_deref(), Some("https://docs.example.com/img/stdin.png"));
            assert_eq!(content("twitter:image:alt").as_deref(), Some("Image for STDIN source"));
            assert_eq!(content("og:url").as_deref(), Some("https://docs.example.com/docs/sources/stdin"));
        }

        it "skips keywords when the list is empty" {
            meta.keywords = vec![];
            let layout = PageLayout::build(&meta, None, &site());
            assert!(!meta_keys(&layout).contains(&"keywords"));
        }
    }

    describe "header" {
        it "shows the title with log and metric badges" {
            meta.event_types = vec!["metric".to_string(), "log".to_string()];
            let header = PageLayout::build(&meta, None, &site()).header.expect("header");

            assert_eq!(header.title.as_deref(), Some("STDIN source"));
            let labels: Vec<&str> = header.badges.iter().map(|b| b.label.as_str()).collect();
            assert_eq!(labels, ["LOG", "METRIC"]);
            assert_eq!(header.badges[0].tooltip, "This component works with log events.");
        }

        it "ignores other event types" {
            meta.event_types = vec!["trace".to_string()];
            let header = PageLayout::build(&meta, None, &site()).header.expect("header");
            assert!(header.badges.is_empty());
        }

        it "is hidden with hide_title" {
            meta.hide_title = true;
            assert!(PageLayout::build(&meta, None, &site()).header.is_none());
        }
    }

    describe "sidebar" {
        it "is absent without a table of contents" {
            meta.status = Some(ComponentStatus::Beta);
            assert!(PageLayout::build(&meta, None, &site()).sidebar.is_none());
        }

        it "omits the status section when neither status nor guarantee is set" {
            let sidebar = PageLayout::build(&meta, Some(NO_HEADINGS), &site()).sidebar.expect("sidebar");
            assert!(sidebar.status.is_none());
            assert!(sidebar.contents.is_empty());
            assert!(sidebar.resources.is_empty());
            assert!(sidebar.last_updated.is_none());
        }

        it "warns about beta and best-effort components" {
            meta.status = Some(ComponentStatus::Beta);
            meta.delivery_guarantee = Some(DeliveryGuarantee::BestEffort);
            let status = PageLayout::build(&meta, Some(NO_HEADINGS), &site())
                .sidebar
                .and_then(|s| s.status)
                .expect("status section");

            assert_eq!(status.maturity.label, "beta");
            assert_eq!(status.maturity.tone, Tone::Warning);
            assert_eq!(status.maturity.link, "/docs/about/guarantees#beta");
            assert_eq!(status.guarantee.label, "best-effort");
            assert_eq!(status.guarantee.tone, Tone::Warning);
            assert_eq!(status.guarantee.link, "/docs/about/guarantees#best-effort");
        }

        it "defaults the missing half of the status section to the reliable badge" {
            meta.delivery_guarantee = Some(DeliveryGuarantee::BestEffort);
            let status = PageLayout::build(&meta, Some(NO_HEADINGS), &site())
                .sidebar
                .and_then(|s| s.status)
                .expect("status section");

            assert_eq!(status.maturity.label, "prod-ready");
            assert_eq!(status.maturity.tone, Tone::Primary);

            meta.delivery_guarantee = None;
            meta.status = Some(ComponentStatus::Beta);
            let status = PageLayout::build(&meta, Some(NO_HEADINGS), &site())
                .sidebar
                .and_then(|s| s.status)
                .expect("status section");
            assert_eq!(status.guarantee.label, "at-least-once");
            assert_eq!(status.guarantee.tone, Tone::Primary);
        }

        it "keeps the heading tree" {
            let headings = vec![
                heading("configuration", "Configuration", vec![
                    heading("host", "host", vec![]),
                ]),
                heading("how-it-works", "How It Works", vec![]),
            ];
            let sidebar = PageLayout::build(&meta, Some(headings.as_slice()), &site()).sidebar.expect("sidebar");
            assert_eq!(sidebar.contents, headings);
        }

        it "lists only the resources that are present" {
            meta.edit_url = Some("https://github.com/org/repo/edit/master/stdin.md".to_string());
            meta.source_url = Some("https://github.com/org/repo/tree/master/src/sources/stdin.rs".to_string());
            let sidebar = PageLayout::build(&meta, Some(NO_HEADINGS), &site()).sidebar.expect("sidebar");

            let kinds: Vec<ResourceKind> = sidebar.resources.iter().map(|r| r.kind).collect();
            assert_eq!(kinds, [ResourceKind::Edit, ResourceKind::Source]);
            assert_eq!(sidebar.resources[0].label, "Edit this page");
        }

        it "describes the last update" {
            meta.last_updated_at = Some(1_570_000_000);
            meta.last_updated_by = Some("Jane Doe".to_string());
            let sidebar = PageLayout::build(&meta, Some(NO_HEADINGS), &site()).sidebar.expect("sidebar");
            assert_eq!(
                sidebar.last_updated.as_deref(),
                Some("Last updated on 2019-10-02 by Jane Doe")
            );
        }

        it "hides a zero update timestamp" {
            meta.last_updated_at = Some(0);
            let sidebar = PageLayout::build(&meta, Some(NO_HEADINGS), &site()).sidebar.expect("sidebar");
            assert!(sidebar.last_updated.is_none());

            meta.last_updated_by = Some("Jane Doe".to_string());
            let sidebar = PageLayout::build(&meta, Some(NO_HEADINGS), &site()).sidebar.expect("sidebar");
            assert_eq!(sidebar.last_updated.as_deref(), Some("Last updated by Jane Doe"));
        }
    }

    describe "from_source" {
        it "derives the page from a source" {
            let attrs: Attributes = json!({
                "name": "statsd",
                "description": "Ingests StatsD metrics",
                "status": "beta",
                "delivery_guarantee": "best_effort",
                "output_types": ["metric"],
                "through_description": "the StatsD protocol",
            })
            .as_object()
            .cloned()
            .unwrap();
            let source = Source::from_attributes(&attrs).expect("valid source");

            let page = PageMetadata::from_source(&source);
            assert_eq!(page.title.as_deref(), Some("statsd"));
            assert_eq!(page.description.as_deref(), Some("Ingests StatsD metrics"));
            assert_eq!(page.status, Some(ComponentStatus::Beta));
            assert_eq!(page.delivery_guarantee, Some(DeliveryGuarantee::BestEffort));
            assert_eq!(page.event_types, ["metric"]);

            let layout = PageLayout::build(&page, Some(NO_HEADINGS), &site());
            let labels: Vec<String> = layout.header.unwrap().badges.into_iter().map(|b| b.label).collect();
            assert_eq!(labels, ["METRIC"]);
        }
    }

    describe "deserialization" {
        it "reads page metadata with missing attributes" {
            let page: PageMetadata = serde_json::from_value(json!({
                "title": "Home",
                "status": "prod-ready",
                "delivery_guarantee": "at_least_once",
                "last_updated_at": 0,
            }))
            .expect("valid page metadata");

            assert_eq!(page.status, Some(ComponentStatus::ProdReady));
            assert_eq!(page.delivery_guarantee, Some(DeliveryGuarantee::AtLeastOnce));
            assert!(page.keywords.is_empty());
            assert!(!page.hide_title);
        }
    }
}
