//! Cards rendered for repositories and blog posts.
use crate::dom::{Element, Node};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use html_sanitizer::strip_tags;
use portfolio_api::{BlogPost, Repository};
use std::fmt::Display;

/// Number of characters kept from a post summary.
pub const SUMMARY_LENGTH: usize = 180;

const GITHUB_ICON: &str = "./images/github.svg";
const ARROW: &str = "\u{2192}";

/// A rendered repository or blog post.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub description: String,
    /// Never empty.
    pub tags: Vec<String>,
    pub link: CardLink,
    pub icon_link: Option<IconLink>,
    pub image: Option<PreviewImage>,
    pub no_image: bool,
}

/// Text link out of the card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLink {
    pub href: String,
    pub text: &'static str,
}

/// Icon link out of the card.
#[derive(Debug, Clone, PartialEq)]
pub struct IconLink {
    pub href: String,
    pub title: &'static str,
    pub icon: &'static str,
    pub alt: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    pub src: String,
    pub alt: String,
}

impl Card {
    /// Drop the preview image after it failed to load.
    pub fn remove_image(&mut self) {
        self.image = None;
        self.no_image = true;
    }

    pub fn to_node(&self) -> Node {
        let tags = self
            .tags
            .iter()
            .map(|tag| Node::from(Element::new("li").text(tag.as_str())));

        let mut links = Element::new("div").class("work__links").child(
            Element::new("a")
                .class("link__text")
                .attr("href", self.link.href.as_str())
                .text(format!("{} ", self.link.text))
                .child(Element::new("span").text(ARROW)),
        );
        if let Some(icon) = &self.icon_link {
            links = links.child(
                Element::new("a")
                    .attr("href", icon.href.as_str())
                    .attr("title", icon.title)
                    .child(
                        Element::new("img")
                            .class("work__code")
                            .attr("src", icon.icon)
                            .attr("alt", icon.alt),
                    ),
            );
        }

        let text = Element::new("div")
            .class("work__text")
            .child(Element::new("h3").text(self.title.as_str()))
            .child(Element::new("p").text(self.description.as_str()))
            .child(Element::new("ul").class("work__list").children(tags))
            .child(links);

        let mut work_box = Element::new("div").class("work__box");
        if self.no_image {
            work_box = work_box.class("work__box--no-image");
        }
        work_box = work_box.child(text);

        if let Some(image) = &self.image {
            work_box = work_box.child(
                Element::new("div").class("work__image-box").child(
                    Element::new("img")
                        .class("work__image")
                        .attr("alt", image.alt.as_str())
                        .attr("src", image.src.as_str()),
                ),
            );
        }

        work_box.into()
    }
}

/// Card for a repository. Tags are the fetched languages, else the primary
/// language, else "Other".
pub fn repo_card(
    repo: &Repository,
    languages: &[String],
    raw_content: &str,
    default_owner: &str,
) -> Card {
    let tags = if languages.is_empty() {
        vec![repo
            .language
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or("Other".to_string())]
    } else {
        languages.to_vec()
    };

    let owner = repo
        .owner
        .as_ref()
        .map(|o| o.login.as_str())
        .unwrap_or(default_owner);

    Card {
        title: repo.name.clone(),
        description: repo
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description provided.".to_string()),
        tags,
        link: CardLink {
            href: repo.html_url.clone(),
            text: "Visit Repo",
        },
        icon_link: Some(IconLink {
            href: repo.html_url.clone(),
            title: "View on GitHub",
            icon: GITHUB_ICON,
            alt: "GitHub",
        }),
        image: Some(PreviewImage {
            src: preview_url(raw_content, owner, &repo.name, repo.branch()),
            alt: format!("{} preview", repo.name),
        }),
        no_image: false,
    }
}

/// Conventional location of a repository's site screenshot.
pub fn preview_url(raw_content: &str, owner: &str, name: &str, branch: &str) -> String {
    format!(
        "{}/{owner}/{name}/{branch}/SiteImage.png",
        raw_content.trim_end_matches('/')
    )
}

/// Card for a blog post.
pub fn blog_card(post: &BlogPost) -> Card {
    let title = post
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or("Untitled post".to_string());

    let image = post
        .thumbnail
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|src| PreviewImage {
            src: src.clone(),
            alt: post
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or("Medium post".to_string()),
        });

    Card {
        title,
        description: post
            .description
            .as_deref()
            .map(post_summary)
            .unwrap_or_default(),
        tags: vec![date_tag(post.published.as_deref())],
        link: CardLink {
            href: post.link.clone(),
            text: "Visit Blog",
        },
        icon_link: None,
        no_image: image.is_none(),
        image,
    }
}

/// Text of an html summary cut to [`SUMMARY_LENGTH`] characters with an
/// ellipsis. Empty summaries stay empty.
pub fn post_summary(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let mut summary = strip_tags(html)
        .chars()
        .take(SUMMARY_LENGTH)
        .collect::<String>();
    summary.push_str("...");
    summary
}

/// Localized publish date, or "Medium" when there is none.
pub fn date_tag(published: Option<&str>) -> String {
    date_tag_in(published, &Local)
}

pub fn date_tag_in<Tz>(published: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    published
        .and_then(|published| parse_published(published, tz))
        .map(|date| date.with_timezone(tz).format("%-m/%-d/%Y").to_string())
        .unwrap_or("Medium".to_string())
}

/// Feed dates are RFC 3339, RFC 2822, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.
/// A date and time without an offset is wall clock time in `tz`, a bare date
/// is midnight UTC, the same way a browser reads them.
fn parse_published<Tz: TimeZone>(published: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let published = published.trim();
    DateTime::parse_from_rfc3339(published)
        .or_else(|_| DateTime::parse_from_rfc2822(published))
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(published, "%Y-%m-%d %H:%M:%S")
                .ok()
                .and_then(|d| tz.from_local_datetime(&d).earliest())
                .map(|d| d.with_timezone(&Utc))
        })
        .or_else(|| {
            NaiveDate::parse_from_str(published, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })
}
