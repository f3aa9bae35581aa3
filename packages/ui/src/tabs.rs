//! Sidebar tab state shared by both dashboards.
//!
//! A [`TabController`] holds a fixed, ordered set of panels with exactly one
//! active. Sidebar clicks go through [`TabController::navigate`], which also
//! reports whether the tab's data still needs its one-time load. Drill-downs
//! and back buttons use [`TabController::show`], which never loads. There is
//! no history: going back is another forward transition.

/// A panel that can be shown by a [`TabController`].
pub trait Tab: Copy + Eq + std::fmt::Debug + 'static {
    /// Stable identifier, used for element ids and CSS hooks.
    fn id(&self) -> &'static str;

    fn label(&self) -> &'static str;

    /// Whether the panel gets a sidebar link. Detail panels do not.
    fn in_sidebar(&self) -> bool {
        true
    }

    /// Whether the panel fetches data on its first visit.
    fn has_loader(&self) -> bool {
        false
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabController<T: Tab> {
    tabs: Vec<T>,
    active: T,
    loaded: Vec<T>,
}

impl<T: Tab> TabController<T> {
    /// Start with a single declared tab, which is also the initial one.
    pub fn new(first: T) -> Self {
        Self {
            tabs: vec![first],
            active: first,
            loaded: Vec::new(),
        }
    }

    /// Declare another tab. Duplicates are ignored.
    pub fn with(mut self, tab: T) -> Self {
        if !self.tabs.contains(&tab) {
            self.tabs.push(tab);
        }
        self
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn is_active(&self, tab: T) -> bool {
        self.active == tab
    }

    pub fn supports(&self, tab: T) -> bool {
        self.tabs.contains(&tab)
    }

    /// Declared tabs in declaration order.
    pub fn tabs(&self) -> &[T] {
        &self.tabs
    }

    pub fn sidebar(&self) -> impl Iterator<Item = T> + '_ {
        self.tabs.iter().copied().filter(|tab| tab.in_sidebar())
    }

    /// Sidebar transition. Returns `true` when the caller should run the
    /// tab's loader now; the load is then considered done.
    pub fn navigate(&mut self, tab: T) -> bool {
        if !self.supports(tab) {
            tracing::debug!(?tab, "ignoring navigation to undeclared tab");
            return false;
        }
        self.active = tab;
        if tab.has_loader() && !self.loaded.contains(&tab) {
            self.loaded.push(tab);
            return true;
        }
        false
    }

    /// Programmatic transition, without loading.
    pub fn show(&mut self, tab: T) {
        if self.supports(tab) {
            self.active = tab;
        }
    }

    /// Record that a tab's data was fetched outside of navigation.
    pub fn mark_loaded(&mut self, tab: T) {
        if !self.loaded.contains(&tab) {
            self.loaded.push(tab);
        }
    }

    /// Re-arm the one-time load of a tab.
    pub fn invalidate(&mut self, tab: T) {
        self.loaded.retain(|loaded| *loaded != tab);
    }

    pub fn is_loaded(&self, tab: T) -> bool {
        self.loaded.contains(&tab)
    }
}
