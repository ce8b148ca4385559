use std::ops::Sub;

use tracing::{debug, info};

use crate::jog_page::JogPage;

pub const MENU_COLLAPSED_WIDTH: u32 = 50;
pub const MENU_EXPANDED_WIDTH: u32 = 200;

/// Pages of the stacked central widget, in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Jog,
    Setting,
    Help,
}

impl Page {
    pub fn index(self) -> usize {
        match self {
            Page::Home => 0,
            Page::Jog => 1,
            Page::Setting => 2,
            Page::Help => 3,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "home" => Some(Page::Home),
            "jog" => Some(Page::Jog),
            "setting" => Some(Page::Setting),
            "help" => Some(Page::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Maximized,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Navigate(Page),
    ToggleMenu,
    ToggleMaximize,
    Minimize,
    Restore,
    DragStart(Point),
    DragMove(Point),
    DragEnd,
}

/// Application shell: page navigation, window chrome and status bar.
pub struct MainWindow {
    jog_page: JogPage,
    current_page: Page,
    menu_width: u32,
    state: WindowState,
    /// State to return to when restored from minimized.
    restore_state: WindowState,
    position: Point,
    drag_offset: Option<Point>,
    status_message: String,
}

impl MainWindow {
    pub fn new(jog_page: JogPage) -> Self {
        Self {
            jog_page,
            current_page: Page::Home,
            menu_width: MENU_EXPANDED_WIDTH,
            state: WindowState::Normal,
            restore_state: WindowState::Normal,
            position: Point::default(),
            drag_offset: None,
            status_message: String::new(),
        }
    }

    pub fn jog_page(&self) -> &JogPage {
        &self.jog_page
    }

    pub fn jog_page_mut(&mut self) -> &mut JogPage {
        &mut self.jog_page
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn menu_width(&self) -> u32 {
        self.menu_width
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn handle(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Navigate(page) => self.navigate(page),
            WindowEvent::ToggleMenu => self.toggle_menu(),
            WindowEvent::ToggleMaximize => self.toggle_maximize(),
            WindowEvent::Minimize => self.minimize(),
            WindowEvent::Restore => self.restore(),
            WindowEvent::DragStart(global) => self.begin_drag(global),
            WindowEvent::DragMove(global) => self.drag_to(global),
            WindowEvent::DragEnd => self.end_drag(),
        }
    }

    pub fn navigate(&mut self, page: Page) {
        debug!("Switching to page {:?} (index {})", page, page.index());
        self.current_page = page;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_width = if self.menu_width > MENU_COLLAPSED_WIDTH {
            MENU_COLLAPSED_WIDTH
        } else {
            MENU_EXPANDED_WIDTH
        };
    }

    pub fn toggle_maximize(&mut self) {
        self.state = match self.state {
            WindowState::Maximized => WindowState::Normal,
            WindowState::Normal | WindowState::Minimized => WindowState::Maximized,
        };
        self.restore_state = self.state;
    }

    pub fn minimize(&mut self) {
        if self.state != WindowState::Minimized {
            self.restore_state = self.state;
        }
        self.state = WindowState::Minimized;
    }

    pub fn restore(&mut self) {
        if self.state == WindowState::Minimized {
            self.state = self.restore_state;
        }
    }

    pub fn begin_drag(&mut self, global: Point) {
        self.drag_offset = Some(global - self.position);
    }

    pub fn drag_to(&mut self, global: Point) {
        if let Some(offset) = self.drag_offset {
            self.position = global - offset;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_offset = None;
    }

    /// Periodic status bar refresh.
    pub fn update_status(&mut self) {
        let message = if self.jog_page.controller().is_jogging() {
            "Jogging"
        } else {
            "Idle"
        };

        if message != self.status_message {
            info!("Status: {}", message);
            self.status_message = message.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        jog_page::{page::tests::RecordingDispatcher, JogEvent, JogForm},
        models::JogDirection,
    };

    fn window() -> MainWindow {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        MainWindow::new(JogPage::new(JogForm::default(), dispatcher))
    }

    #[test]
    fn navigation_selects_stacked_index() {
        let mut window = window();
        assert_eq!(window.current_page(), Page::Home);

        for (name, index) in [("home", 0), ("jog", 1), ("setting", 2), ("help", 3)] {
            let page = Page::from_name(name).unwrap();
            window.handle(WindowEvent::Navigate(page));
            assert_eq!(window.current_page().index(), index);
        }
        assert_eq!(Page::from_name("about"), None);
    }

    #[test]
    fn menu_alternates_between_widths() {
        let mut window = window();
        assert_eq!(window.menu_width(), MENU_EXPANDED_WIDTH);

        window.toggle_menu();
        assert_eq!(window.menu_width(), MENU_COLLAPSED_WIDTH);
        window.toggle_menu();
        assert_eq!(window.menu_width(), MENU_EXPANDED_WIDTH);
    }

    #[test]
    fn maximize_toggles_and_minimize_restores() {
        let mut window = window();

        window.toggle_maximize();
        assert_eq!(window.state(), WindowState::Maximized);

        window.minimize();
        assert_eq!(window.state(), WindowState::Minimized);
        window.restore();
        assert_eq!(window.state(), WindowState::Maximized);

        window.toggle_maximize();
        assert_eq!(window.state(), WindowState::Normal);
    }

    #[test]
    fn drag_moves_window_by_pointer_delta() {
        let mut window = window();

        window.drag_to(Point::new(500, 500));
        assert_eq!(window.position(), Point::new(0, 0));

        window.handle(WindowEvent::DragStart(Point::new(30, 10)));
        window.handle(WindowEvent::DragMove(Point::new(130, 60)));
        assert_eq!(window.position(), Point::new(100, 50));

        window.handle(WindowEvent::DragEnd);
        window.handle(WindowEvent::DragMove(Point::new(0, 0)));
        assert_eq!(window.position(), Point::new(100, 50));
    }

    #[tokio::test]
    async fn status_bar_follows_jog_state() {
        let mut window = window();
        window.update_status();
        assert_eq!(window.status_message(), "Idle");

        window
            .jog_page_mut()
            .handle(JogEvent::JogPressed(JogDirection::Positive))
            .await;
        window.update_status();
        assert_eq!(window.status_message(), "Jogging");
    }
}
