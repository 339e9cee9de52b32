#![forbid(unsafe_code)]

//! App-level providers: the user cell and the theme cell.

use shareui_core::{CellHandle, Computed, Notification, Provider, Result, Scope};

use crate::model::{Session, Theme, default_user};

/// Owns the two independent cells for one mounted app.
#[derive(Debug)]
pub struct AppProviders {
    user: Provider<Session>,
    theme: Provider<Theme>,
    scope: Scope,
}

impl AppProviders {
    /// Logged out, dark theme.
    #[must_use]
    pub fn mount() -> Self {
        Self::with_theme(Theme::default())
    }

    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        let user = Provider::mount("user", None);
        let theme = Provider::mount("theme", theme);
        let scope = Scope::named("app");
        scope.provide(user.handle()).provide(theme.handle());
        Self { user, theme, scope }
    }

    /// Scope offering both cells to the view tree.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    #[must_use]
    pub fn user(&self) -> CellHandle<Session> {
        self.user.handle()
    }

    #[must_use]
    pub fn theme(&self) -> CellHandle<Theme> {
        self.theme.handle()
    }

    #[must_use]
    pub fn user_provider(&self) -> &Provider<Session> {
        &self.user
    }

    #[must_use]
    pub fn theme_provider(&self) -> &Provider<Theme> {
        &self.theme
    }

    pub fn login(&self) -> Result<Notification> {
        login(&self.user())
    }

    pub fn logout(&self) -> Result<Notification> {
        logout(&self.user())
    }

    pub fn toggle_theme(&self) -> Result<Notification> {
        toggle_theme(&self.theme())
    }

    /// Parse and store a theme name; unknown names are rejected.
    pub fn set_theme(&self, name: &str) -> Result<Notification> {
        set_theme(&self.theme(), name.parse()?)
    }

    /// One-line summary that tracks both cells.
    pub fn status(&self) -> Result<Computed<String>> {
        Computed::from2(&self.user.reader(), &self.theme.reader(), |user, theme| {
            match user {
                Some(user) => format!("signed in as {} | theme: {theme}", user.name),
                None => format!("signed out | theme: {theme}"),
            }
        })
    }

    /// Drop both cells and all their listener registrations.
    pub fn unmount(self) {
        let Self { user, theme, .. } = self;
        user.unmount();
        theme.unmount();
    }
}

/// Write the default user.
pub fn login(user: &CellHandle<Session>) -> Result<Notification> {
    let next = default_user();
    tracing::info!(message = "session.login", user = next.name.as_str());
    user.write(Some(next))
}

pub fn logout(user: &CellHandle<Session>) -> Result<Notification> {
    tracing::info!(message = "session.logout");
    user.write(None)
}

/// Flip the session: logged out logs in, logged in logs out.
pub fn toggle_session(user: &CellHandle<Session>) -> Result<Notification> {
    if user.with(Option::is_some)? {
        logout(user)
    } else {
        login(user)
    }
}

pub fn set_theme(cell: &CellHandle<Theme>, theme: Theme) -> Result<Notification> {
    tracing::info!(message = "theme.set", theme = theme.as_str());
    cell.write(theme)
}

/// Flip the theme between dark and light.
pub fn toggle_theme(theme: &CellHandle<Theme>) -> Result<Notification> {
    set_theme(theme, theme.read()?.toggled())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use shareui_core::Error;

    #[test]
    fn fresh_mount_is_logged_out_and_dark() {
        let app = AppProviders::mount();
        assert_eq!(app.user().read(), Ok(None));
        assert_eq!(app.theme().read(), Ok(Theme::Dark));
    }

    #[test]
    fn scope_offers_both_cells() {
        let app = AppProviders::with_theme(Theme::Light);
        let user = app.scope().consume::<Session>().expect("user");
        let theme = app.scope().consume_reader::<Theme>().expect("theme");
        assert_eq!(user.id(), app.user_provider().cell().id());
        assert_eq!(theme.read(), Ok(Theme::Light));
    }

    #[test]
    fn toggle_session_alternates() {
        let app = AppProviders::mount();
        let user = app.user();
        toggle_session(&user).expect("login");
        assert_eq!(user.read(), Ok(Some(default_user())));
        toggle_session(&user).expect("logout");
        assert_eq!(user.read(), Ok(None));
    }

    #[test]
    fn logout_from_any_user() {
        let app = AppProviders::mount();
        app.user()
            .write(Some(User::new("Ada", ["Engines"])))
            .expect("live");
        app.logout().expect("live");
        assert_eq!(app.user().read(), Ok(None));
    }

    #[test]
    fn set_theme_validates() {
        let app = AppProviders::mount();
        assert!(app.set_theme("light").is_ok());
        assert_eq!(app.theme().read(), Ok(Theme::Light));
        assert_eq!(
            app.set_theme("neon"),
            Err(Error::InvalidTheme {
                value: "neon".into()
            })
        );
        assert_eq!(app.theme().read(), Ok(Theme::Light));
        assert_eq!(app.theme_provider().cell().version(), 1);
    }

    #[test]
    fn status_tracks_both_cells() {
        let app = AppProviders::mount();
        let status = app.status().expect("live");
        assert_eq!(status.get().as_deref(), Ok("signed out | theme: dark"));
        app.login().expect("live");
        app.toggle_theme().expect("live");
        assert_eq!(
            status.get().as_deref(),
            Ok("signed in as Duane | theme: light")
        );
    }

    #[test]
    fn methods_and_handle_helpers_agree() {
        let app = AppProviders::mount();
        let by_method = app.login().expect("live");
        assert_eq!(app.user().read(), Ok(Some(default_user())));
        let by_toggle = toggle_session(&app.user()).expect("live");
        assert_eq!(app.user().read(), Ok(None));
        assert_eq!(by_method, by_toggle);

        app.toggle_theme().expect("live");
        toggle_theme(&app.theme()).expect("live");
        assert_eq!(app.theme().read(), Ok(Theme::Dark));
        assert_eq!(app.theme_provider().cell().version(), 2);
    }

    #[test]
    fn set_theme_through_stale_handle_fails() {
        let app = AppProviders::mount();
        let theme = app.theme();
        app.unmount();
        assert_eq!(
            set_theme(&theme, Theme::Light),
            Err(Error::provider_gone::<Theme>())
        );
    }

    #[test]
    fn unmount_invalidates_handles() {
        let app = AppProviders::mount();
        let user = app.user();
        let theme = app.theme();
        app.unmount();
        assert!(toggle_session(&user).is_err());
        assert!(toggle_theme(&theme).is_err());
    }
}
