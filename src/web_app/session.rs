// web_app/session.rs - Who is browsing
//
// Views never read browser storage themselves. The host builds a
// `CurrentUser` once (from local storage in the browser, from fixed values
// in tests) and provides it to the component tree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Local storage key of the logged-in student
pub const STUDENT_KEY: &str = "student-user";
/// Local storage key of the logged-in seller
pub const SELLER_KEY: &str = "seller-user";

/// Identity stored after login
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionUser {
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
        }
    }

    /// Parse a stored session entry; entries without a username are ignored
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str::<SessionUser>(raw)
            .ok()
            .filter(|user| !user.username.trim().is_empty())
    }
}

/// Source of the current student and seller identities
pub trait IdentityProvider: Send + Sync {
    fn student(&self) -> Option<SessionUser>;
    fn seller(&self) -> Option<SessionUser>;
}

/// Identities fixed at construction
#[derive(Clone, Debug, Default)]
pub struct FixedIdentity {
    pub student: Option<SessionUser>,
    pub seller: Option<SessionUser>,
}

impl IdentityProvider for FixedIdentity {
    fn student(&self) -> Option<SessionUser> {
        self.student.clone()
    }

    fn seller(&self) -> Option<SessionUser> {
        self.seller.clone()
    }
}

/// Identities saved in the browser's local storage by the login pages
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSession;

impl IdentityProvider for BrowserSession {
    fn student(&self) -> Option<SessionUser> {
        read_stored(STUDENT_KEY)
    }

    fn seller(&self) -> Option<SessionUser> {
        read_stored(SELLER_KEY)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "hydrate")] {
        fn read_stored(key: &str) -> Option<SessionUser> {
            let storage = leptos::prelude::window().local_storage().ok()??;
            let raw = storage.get_item(key).ok()??;
            SessionUser::parse(&raw)
        }
    } else {
        fn read_stored(_key: &str) -> Option<SessionUser> {
            None
        }
    }
}

/// Shared handle to the identity provider, cheap to clone into views
#[derive(Clone)]
pub struct CurrentUser(Arc<dyn IdentityProvider>);

impl CurrentUser {
    pub fn new(provider: impl IdentityProvider + 'static) -> Self {
        Self(Arc::new(provider))
    }

    pub fn browser() -> Self {
        Self::new(BrowserSession)
    }

    pub fn student(&self) -> Option<SessionUser> {
        self.0.student()
    }

    pub fn seller(&self) -> Option<SessionUser> {
        self.0.seller()
    }

    pub fn student_name(&self) -> Option<String> {
        self.student().map(|u| u.username)
    }

    pub fn seller_name(&self) -> Option<String> {
        self.seller().map(|u| u.username)
    }
}

impl std::fmt::Debug for CurrentUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUser")
            .field("student", &self.student_name())
            .field("seller", &self.seller_name())
            .finish()
    }
}

/// Reactive view of the current student's username.
///
/// Filled in by an effect, so it is only set after hydration and the server
/// render never depends on browser storage.
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub fn use_student_name() -> leptos::prelude::ReadSignal<Option<String>> {
    use_identity(CurrentUser::student_name)
}

/// Reactive view of the current seller's username
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub fn use_seller_name() -> leptos::prelude::ReadSignal<Option<String>> {
    use_identity(CurrentUser::seller_name)
}

#[cfg(any(feature = "ssr", feature = "hydrate"))]
fn use_identity(
    pick: fn(&CurrentUser) -> Option<String>,
) -> leptos::prelude::ReadSignal<Option<String>> {
    use leptos::prelude::*;

    let user = use_context::<CurrentUser>();
    let (name, set_name) = signal(None::<String>);
    Effect::new(move || {
        if let Some(user) = &user {
            set_name.set(pick(user));
        }
    });
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_entry() {
        let user = SessionUser::parse(r#"{"username":"asha","email":"asha@gmail.com","_id":"x"}"#);
        assert_eq!(
            user,
            Some(SessionUser {
                username: "asha".into(),
                email: Some("asha@gmail.com".into()),
            })
        );
    }

    #[test]
    fn test_parse_rejects_blank_or_garbage() {
        assert_eq!(SessionUser::parse(r#"{"username":"  "}"#), None);
        assert_eq!(SessionUser::parse("not json"), None);
        assert_eq!(SessionUser::parse(r#"{"email":"a@b.c"}"#), None);
    }

    #[test]
    fn test_fixed_identity() {
        let user = CurrentUser::new(FixedIdentity {
            student: Some(SessionUser::named("asha")),
            seller: None,
        });
        assert_eq!(user.student_name().as_deref(), Some("asha"));
        assert_eq!(user.seller_name(), None);
    }

    #[cfg(not(feature = "hydrate"))]
    #[test]
    fn test_browser_session_is_empty_outside_browser() {
        let user = CurrentUser::browser();
        assert_eq!(user.student(), None);
        assert_eq!(user.seller(), None);
    }
}
