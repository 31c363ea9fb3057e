//! Project detail modal with deep-link support.

use std::time::Duration;

use armature_core::{Debouncer, ProjectCatalog, ProjectLink, ProjectRecord};
use armature_platform::History;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalImage {
    pub src: String,
    pub alt: String,
}

/// Contents of an open modal, built from a catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub achievement: String,
    pub link: Option<ProjectLink>,
    pub images: Vec<ModalImage>,
}

impl ModalView {
    pub fn from_record(record: &ProjectRecord) -> Self {
        let mut images = vec![ModalImage {
            src: record.img.clone(),
            alt: record.title.clone(),
        }];
        if let Some(second) = &record.img2 {
            images.push(ModalImage {
                src: second.clone(),
                alt: format!("{} additional view", record.title),
            });
        }
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            desc: record.desc.clone(),
            achievement: record.achievement.clone(),
            link: record.link.clone(),
            images,
        }
    }

    /// Markup for hosts that render HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<button class=\"modal-close\" title=\"Close\"><i class=\"fa-solid fa-xmark\"></i></button>\n",
        );
        html.push_str(&format!(
            "<h3><span class=\"bracket\">[</span> {} <span class=\"bracket\">]</span></h3>\n",
            escape(&self.title)
        ));
        html.push_str("<div class=\"modal-left\">\n");
        if !self.desc.is_empty() {
            html.push_str(&format!(
                "<div class=\"modal-content\"><p>&gt; {}</p></div>\n",
                escape(&self.desc)
            ));
        }
        if !self.achievement.is_empty() {
            html.push_str(&format!(
                "<div class=\"achievement\"><i class=\"fa-solid fa-check\"></i> {}</div>\n",
                escape(&self.achievement)
            ));
        }
        if let Some(link) = &self.link {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" class=\"action-btn primary\">{}</a>\n",
                escape(&link.url),
                escape(&link.label)
            ));
        }
        html.push_str("</div>\n<div class=\"modal-right\">\n");
        for image in &self.images {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">\n",
                escape(&image.src),
                escape(&image.alt)
            ));
        }
        html.push_str("</div>\n");
        html
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Backdrop, scroll lock, fragment and the modal element's delayed removal.
#[derive(Debug, Clone)]
pub struct ModalController {
    backdrop_open: bool,
    scroll_locked: bool,
    element: Option<ModalView>,
    removal: Debouncer<()>,
}

impl ModalController {
    pub fn new(close_delay: Duration) -> Self {
        Self {
            backdrop_open: false,
            scroll_locked: false,
            element: None,
            removal: Debouncer::new(close_delay),
        }
    }

    pub fn backdrop_open(&self) -> bool {
        self.backdrop_open
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// The modal element, which outlives the backdrop by the close delay.
    pub fn element(&self) -> Option<&ModalView> {
        self.element.as_ref()
    }

    /// Opens the modal for `id`. Unknown ids leave everything untouched.
    pub fn open<H: History + ?Sized>(
        &mut self,
        id: &str,
        catalog: &ProjectCatalog,
        history: &mut H,
    ) -> bool {
        let Some(record) = catalog.get(id) else {
            debug!(id, "ignoring unknown project id");
            return false;
        };
        self.element = None;
        self.removal.cancel();
        self.backdrop_open = true;
        self.scroll_locked = true;
        history.push_fragment(Some(id));
        self.element = Some(ModalView::from_record(record));
        info!(id, "opened project modal");
        true
    }

    /// Deep link: opens the project named by the current fragment, if any.
    pub fn open_from_fragment<H: History + ?Sized>(
        &mut self,
        catalog: &ProjectCatalog,
        history: &mut H,
    ) -> bool {
        match history.fragment() {
            Some(id) if catalog.contains(&id) => self.open(&id, catalog, history),
            _ => false,
        }
    }

    pub fn close<H: History + ?Sized>(&mut self, now: Duration, history: &mut H) {
        if !self.backdrop_open {
            return;
        }
        self.backdrop_open = false;
        self.scroll_locked = false;
        history.push_fragment(None);
        self.removal.schedule(now, ());
        debug!("project modal closing");
    }

    /// Clicks on the backdrop itself close the modal; clicks inside it do not.
    pub fn backdrop_clicked<H: History + ?Sized>(
        &mut self,
        on_backdrop: bool,
        now: Duration,
        history: &mut H,
    ) {
        if on_backdrop {
            self.close(now, history);
        }
    }

    /// Drops the element once the close delay has elapsed.
    pub fn poll(&mut self, now: Duration) {
        if self.removal.poll(now).is_some() {
            self.element = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHistory;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup() -> (ModalController, ProjectCatalog, MemoryHistory) {
        (
            ModalController::new(ms(400)),
            ProjectCatalog::builtin().unwrap(),
            MemoryHistory::new(None),
        )
    }

    #[test]
    fn open_sets_fragment_and_renders_title() {
        let (mut modal, catalog, mut history) = setup();
        assert!(modal.open("proj1", &catalog, &mut history));
        assert_eq!(history.fragment().as_deref(), Some("proj1"));
        assert_eq!(history.location(), "#proj1");
        assert!(modal.backdrop_open());
        assert!(modal.scroll_locked());
        let view = modal.element().unwrap();
        assert_eq!(view.title, "Tone Control/Karaoke Mixer Circuit");
        assert!(view
            .to_html()
            .contains("<span class=\"bracket\">[</span> Tone Control/Karaoke Mixer Circuit <span"));
    }

    #[test]
    fn close_clears_fragment_and_removes_after_delay() {
        let (mut modal, catalog, mut history) = setup();
        modal.open("proj1", &catalog, &mut history);
        modal.close(ms(1000), &mut history);
        assert_eq!(history.fragment(), None);
        assert!(!modal.backdrop_open());
        assert!(!modal.scroll_locked());

        modal.poll(ms(1399));
        assert!(modal.element().is_some());
        modal.poll(ms(1400));
        assert!(modal.element().is_none());
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let (mut modal, catalog, mut history) = setup();
        let entries = history.len();
        assert!(!modal.open("doesnotexist", &catalog, &mut history));
        assert!(!modal.backdrop_open());
        assert!(!modal.scroll_locked());
        assert!(modal.element().is_none());
        assert_eq!(history.fragment(), None);
        assert_eq!(history.len(), entries);
    }

    #[test]
    fn reopening_cancels_pending_removal() {
        let (mut modal, catalog, mut history) = setup();
        modal.open("proj1", &catalog, &mut history);
        modal.close(ms(0), &mut history);
        modal.open("proj5", &catalog, &mut history);
        modal.poll(ms(1000));
        let view = modal.element().unwrap();
        assert_eq!(view.id, "proj5");
        assert_eq!(view.images.len(), 2);
        assert_eq!(view.images[1].alt, "SpotMicro Robot additional view");
    }

    #[test]
    fn deep_link_opens_known_projects_only() {
        let catalog = ProjectCatalog::builtin().unwrap();

        let mut history = MemoryHistory::new(Some("#intern2"));
        let mut modal = ModalController::new(ms(400));
        assert!(modal.open_from_fragment(&catalog, &mut history));
        assert_eq!(modal.element().unwrap().id, "intern2");

        let mut history = MemoryHistory::new(Some("#doesnotexist"));
        let mut modal = ModalController::new(ms(400));
        assert!(!modal.open_from_fragment(&catalog, &mut history));
        assert!(modal.element().is_none());
        assert_eq!(history.fragment().as_deref(), Some("doesnotexist"));
    }

    #[test]
    fn only_backdrop_clicks_close() {
        let (mut modal, catalog, mut history) = setup();
        modal.open("proj2", &catalog, &mut history);
        modal.backdrop_clicked(false, ms(0), &mut history);
        assert!(modal.backdrop_open());
        modal.backdrop_clicked(true, ms(0), &mut history);
        assert!(!modal.backdrop_open());
    }

    #[test]
    fn markup_is_escaped_and_links_rendered() {
        let catalog = ProjectCatalog::builtin().unwrap();
        let html = ModalView::from_record(catalog.get("intern3").unwrap()).to_html();
        assert!(html.contains("Qualification Reports &amp; LLCR Data"));
        assert!(!html.contains("action-btn"));

        let html = ModalView::from_record(catalog.get("proj2").unwrap()).to_html();
        assert!(html.contains(
            "href=\"https://github.com/UnbrokenMango21/AssistiveTechHeadset\""
        ));
        assert!(html.contains("SOURCE_CODE [GITHUB]"));
    }
}
