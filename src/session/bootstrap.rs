//! Dashboard shell session bootstrap.
//!
//! ARCHITECTURE
//! ============
//! Mounting a [`ShellSession`] starts exactly one identity fetch on a tokio
//! task. The result lands in a `watch` channel that renderers observe:
//!
//!   Loading ──ok──▶ Authenticated(snapshot)
//!      └────err──▶ Unauthenticated + replace(login)
//!
//! Path changes inside the shell never refetch; only a fresh mount does.
//! Failures are terminal for the mount (no retry) and all look alike, so
//! the visitor never learns whether the backend was down or the session
//! was invalid.
//!
//! CANCELLATION
//! ============
//! The fetch task holds only a `Weak` to the shell and applies its result
//! under the same lock that unmount takes. Unmounting therefore discards a
//! late result without aborting the request itself.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::api::{AuthApi, AuthApiError, IdentitySnapshot};
use super::menu::{Key, MobileMenu, ScrollLock};
use super::nav;

/// Client-side navigation, injected so tests and the server renderer can
/// observe it.
pub trait Navigator: Send + Sync {
    /// Replace the current location.
    fn replace(&self, path: &str);
    /// Re-fetch data for the whole current route tree.
    fn refresh(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Authenticated(IdentitySnapshot),
    Unauthenticated,
}

impl SessionState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn identity(&self) -> Option<&IdentitySnapshot> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Collaborators a shell needs, all injected.
#[derive(Clone)]
pub struct ShellEnv {
    pub api: Arc<dyn AuthApi>,
    pub navigator: Arc<dyn Navigator>,
    pub scroll: Arc<dyn ScrollLock>,
    pub login_path: String,
}

struct Inner {
    env: ShellEnv,
    state: watch::Sender<SessionState>,
    view: Mutex<ShellView>,
}

struct ShellView {
    mounted: bool,
    path: String,
    menu: MobileMenu,
}

impl Inner {
    fn view(&self) -> MutexGuard<'_, ShellView> {
        // A poisoned view only means a panicking renderer; the data is still usable.
        self.view.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn apply_identity(&self, result: Result<IdentitySnapshot, AuthApiError>) {
        let view = self.view();
        if !view.mounted {
            tracing::debug!("shell unmounted before identity fetch settled; result discarded");
            return;
        }

        match result {
            Ok(identity) => {
                tracing::debug!(plan = %identity.plan, "shell session authenticated");
                self.state.send_replace(SessionState::Authenticated(identity));
            }
            Err(e) => {
                tracing::warn!(error = %e, "identity fetch failed; evicting to login");
                self.state.send_replace(SessionState::Unauthenticated);
                self.env.navigator.replace(&self.env.login_path);
            }
        }
    }
}

/// One mounted dashboard shell.
///
/// Dropping it is unmounting: pending results are discarded and a locked
/// scroll style is restored.
pub struct ShellSession {
    inner: Arc<Inner>,
    fetch: Option<JoinHandle<()>>,
}

impl ShellSession {
    /// Mount a shell at `path` and start the identity fetch.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn mount(env: ShellEnv, path: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        let api = Arc::clone(&env.api);
        let inner = Arc::new(Inner {
            env,
            state,
            view: Mutex::new(ShellView { mounted: true, path: path.into(), menu: MobileMenu::default() }),
        });

        let fetch = tokio::spawn(fetch_identity(api, Arc::downgrade(&inner)));
        Self { inner, fetch: Some(fetch) }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Wait until the bootstrap leaves `Loading`.
    pub async fn settled(&self) -> SessionState {
        let mut rx = self.subscribe();
        rx.wait_for(|s| !s.is_loading())
            .await
            .map_or(SessionState::Unauthenticated, |state| (*state).clone())
    }

    /// Path change within the same mount. Closes the menu; never refetches.
    pub fn navigate(&self, path: impl Into<String>) {
        let mut view = self.inner.view();
        view.path = path.into();
        view.menu.close(self.inner.env.scroll.as_ref());
    }

    #[must_use]
    pub fn path(&self) -> String {
        self.inner.view().path.clone()
    }

    /// Section to highlight for the current path.
    #[must_use]
    pub fn active_tab(&self) -> Option<&'static str> {
        nav::derive_tab(&self.inner.view().path)
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.inner.view().menu.is_open()
    }

    pub fn open_menu(&self) {
        self.inner.view().menu.open(self.inner.env.scroll.as_ref());
    }

    pub fn close_menu(&self) {
        self.inner.view().menu.close(self.inner.env.scroll.as_ref());
    }

    pub fn toggle_menu(&self) {
        self.inner.view().menu.toggle(self.inner.env.scroll.as_ref());
    }

    pub fn handle_key(&self, key: Key) {
        self.inner.view().menu.handle_key(key, self.inner.env.scroll.as_ref());
    }

    /// Sign out: best-effort backend logout, then drop local identity, close
    /// the menu, go to login and refresh the route tree. A pending identity
    /// fetch is cancelled so it cannot bring the session back.
    pub async fn logout(&self) {
        if let Some(fetch) = &self.fetch {
            fetch.abort();
        }

        if let Err(e) = self.inner.env.api.logout().await {
            tracing::debug!(error = %e, "logout request failed; clearing local session anyway");
        }

        // Same discipline as `apply_identity`: state changes and navigation
        // happen under the view lock, and only while mounted.
        let env = &self.inner.env;
        let mut view = self.inner.view();
        if !view.mounted {
            tracing::debug!("shell unmounted during logout; navigation skipped");
            return;
        }
        view.menu.close(env.scroll.as_ref());
        self.inner.state.send_replace(SessionState::Unauthenticated);
        env.navigator.replace(&env.login_path);
        env.navigator.refresh();
    }

    /// Unmount explicitly. Returns the in-flight fetch, if any: the request
    /// may still complete, but its result is discarded.
    pub fn unmount(mut self) -> Option<JoinHandle<()>> {
        self.fetch.take()
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        let mut view = self.inner.view();
        view.mounted = false;
        view.menu.close(self.inner.env.scroll.as_ref());
    }
}

async fn fetch_identity(api: Arc<dyn AuthApi>, shell: Weak<Inner>) {
    let result = api.me().await;
    match shell.upgrade() {
        Some(inner) => inner.apply_identity(result),
        None => tracing::debug!("shell dropped before identity fetch settled; result discarded"),
    }
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;
