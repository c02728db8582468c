//! Mobile navigation menu and the document scroll lock it holds.
//!
//! DESIGN
//! ======
//! The document style is the one piece of shared mutable state the shell
//! touches, so it sits behind [`ScrollLock`]. Opening the menu snapshots the
//! current style and locks scrolling; every way of closing (toggle, Escape,
//! navigation, unmount) writes that snapshot back unchanged.

/// Scroll-related document style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollStyle {
    pub overflow: String,
    pub touch_action: String,
}

impl ScrollStyle {
    #[must_use]
    pub fn locked() -> Self {
        Self { overflow: "hidden".to_owned(), touch_action: "none".to_owned() }
    }
}

/// Access to the document's scroll style.
pub trait ScrollLock: Send + Sync {
    fn read(&self) -> ScrollStyle;
    fn write(&self, style: ScrollStyle);
}

/// Keys the shell reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// Open/closed state plus the style to restore on close.
#[derive(Debug, Default)]
pub struct MobileMenu {
    saved: Option<ScrollStyle>,
}

impl MobileMenu {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.saved.is_some()
    }

    pub fn open(&mut self, lock: &dyn ScrollLock) {
        if self.saved.is_some() {
            return;
        }
        self.saved = Some(lock.read());
        lock.write(ScrollStyle::locked());
    }

    pub fn close(&mut self, lock: &dyn ScrollLock) {
        if let Some(prior) = self.saved.take() {
            lock.write(prior);
        }
    }

    pub fn toggle(&mut self, lock: &dyn ScrollLock) {
        if self.is_open() {
            self.close(lock);
        } else {
            self.open(lock);
        }
    }

    /// Escape closes; anything else is ignored.
    pub fn handle_key(&mut self, key: Key, lock: &dyn ScrollLock) {
        if key == Key::Escape {
            self.close(lock);
        }
    }
}

#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;
