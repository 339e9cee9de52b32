//! Property-based render consistency for the profile views.
//!
//! 1. Profile shows the placeholder exactly when the user cell is `None`.
//! 2. For any user, the heading is "<name>'s Profile" and the interests
//!    list is forwarded verbatim (same strings, same order).
//! 3. After any sequence of control activations the incrementally updated
//!    view equals a freshly mounted view of the same state.

use proptest::prelude::*;
use shareui_runtime::Element;
use shareui_views::components::{PLACEHOLDER, SESSION_CONTROL, THEME_CONTROL};
use shareui_views::{AppProviders, User, mount_app};

fn user_strategy() -> impl Strategy<Value = User> {
    (
        "[A-Za-z][A-Za-z ']{0,12}",
        proptest::collection::vec("[ -~]{0,16}", 0..6),
    )
        .prop_map(|(name, interests)| User { name, interests })
}

fn list_items(view: &Element) -> Option<Vec<String>> {
    let list = Element::Node(view.find_tag("ul")?.clone());
    Some(list.texts().into_iter().map(str::to_string).collect())
}

proptest! {
    #[test]
    fn profile_matches_user_cell(user in proptest::option::of(user_strategy())) {
        let app = AppProviders::mount();
        let mut rt = mount_app(&app).expect("mount");
        app.user().write(user.clone()).expect("live");
        rt.flush().expect("flush");
        let view = rt.view();
        let section = Element::Node(view.find_tag("section").expect("profile").clone());
        let texts = section.texts();

        match user {
            None => {
                prop_assert_eq!(texts, vec![PLACEHOLDER]);
                prop_assert!(list_items(&view).is_none());
            }
            Some(user) => {
                let heading = format!("{}'s Profile", user.name);
                prop_assert_eq!(texts.first().copied(), Some(heading.as_str()));
                prop_assert!(!texts.contains(&PLACEHOLDER));
                prop_assert_eq!(list_items(&view), Some(user.interests.clone()));
            }
        }
    }

    #[test]
    fn incremental_view_equals_fresh_mount(
        clicks in proptest::collection::vec(any::<bool>(), 0..12),
    ) {
        let app = AppProviders::mount();
        let mut rt = mount_app(&app).expect("mount");
        for on_session in &clicks {
            let control = if *on_session { SESSION_CONTROL } else { THEME_CONTROL };
            rt.activate(control).expect("activate");
        }

        let fresh = mount_app(&app).expect("fresh mount");
        prop_assert_eq!(rt.view(), fresh.view());

        let logins = clicks.iter().filter(|c| **c).count();
        prop_assert_eq!(app.user().read().expect("live").is_some(), logins % 2 == 1);
    }
}
