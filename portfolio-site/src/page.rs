//! Page state: root classes, the back to top button and card containers.
use crate::{
    card::Card,
    dom::Node,
    modality::ModalityDetector,
    scroll::ScrollWatcher,
};
use portfolio_config::SiteConfig;
use std::fmt::{self, Display};

/// Global input events.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    MouseDown,
    Scroll { offset_y: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Tab,
    /// Any other key by its name.
    Other(String),
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        match value {
            "Tab" => Key::Tab,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Ordered set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Inline style of the back to top button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub visibility: Visibility,
    pub opacity: f32,
    pub scale: f32,
}

impl ButtonStyle {
    pub fn shown() -> Self {
        Self {
            visibility: Visibility::Visible,
            opacity: 1.,
            scale: 1.,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visibility: Visibility::Hidden,
            opacity: 0.,
            scale: 0.,
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self::hidden()
    }
}

impl Display for ButtonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visibility = match self.visibility {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        };
        write!(
            f,
            "visibility: {visibility}; opacity: {}; transform: scale({})",
            self.opacity, self.scale
        )
    }
}

/// What a container currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A status message.
    Text(String),
    Cards(Vec<Card>),
}

/// An element that cards are appended to.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    id: String,
    content: Content,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Content::Text(String::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Replace everything in the container with `text`.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    pub fn clear(&mut self) {
        self.content = Content::Cards(Vec::new());
    }

    /// Append a card. Replaces a status message.
    pub fn mount(&mut self, card: Card) {
        match &mut self.content {
            Content::Cards(cards) => cards.push(card),
            Content::Text(_) => self.content = Content::Cards(vec![card]),
        }
    }

    /// Status message, if the container shows one.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Cards(_) => None,
        }
    }

    pub fn cards(&self) -> &[Card] {
        match &self.content {
            Content::Cards(cards) => cards,
            Content::Text(_) => &[],
        }
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        match &mut self.content {
            Content::Cards(cards) => cards,
            Content::Text(_) => &mut [],
        }
    }

    /// Inner html of the container.
    pub fn render_html(&self) -> String {
        match &self.content {
            Content::Text(text) => Node::Text(text.clone()).to_string(),
            Content::Cards(cards) => cards.iter().map(|c| c.to_node().to_string()).collect(),
        }
    }
}

/// The page the enhancements run against.
#[derive(Debug)]
pub struct Page {
    pub root_classes: ClassList,
    pub back_to_top: ButtonStyle,
    containers: Vec<Container>,
    modality: ModalityDetector,
    scroll: ScrollWatcher,
}

impl Page {
    /// A page with the given container ids.
    pub fn new<I, S>(config: &SiteConfig, container_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root_classes: ClassList::default(),
            back_to_top: ButtonStyle::hidden(),
            containers: container_ids.into_iter().map(Container::new).collect(),
            modality: ModalityDetector::new(config.marker_class.as_str()),
            scroll: ScrollWatcher::new(config.scroll_threshold),
        }
    }

    /// A page carrying both feed containers named in `config`.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config,
            [
                config.repos_container.as_str(),
                config.blog_container.as_str(),
            ],
        )
    }

    pub fn dispatch(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(_) | InputEvent::MouseDown => {
                self.modality.dispatch(event, &mut self.root_classes)
            }
            InputEvent::Scroll { offset_y } => {
                self.scroll.on_scroll(*offset_y, &mut self.back_to_top);
            }
        }
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Borrow two distinct containers at once.
    pub fn container_pair_mut(
        &mut self,
        first: &str,
        second: &str,
    ) -> (Option<&mut Container>, Option<&mut Container>) {
        let mut found = (None, None);
        for container in self.containers.iter_mut() {
            if found.0.is_none() && container.id == first {
                found.0 = Some(container);
            } else if found.1.is_none() && container.id == second {
                found.1 = Some(container);
            }
        }
        found
    }
}
