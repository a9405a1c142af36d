use super::session::{AuthError, AuthService};
use crate::layout::global_context::AppGlobalContext;
use contracts::system::auth::{LoginRequest, SignupRequest, UserInfo};
use leptos::prelude::*;

/// Auth state shared through context
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub user: RwSignal<Option<UserInfo>>,
    service: StoredValue<AuthService>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.with(|u| u.is_some())
    }

    pub fn login(&self, request: LoginRequest) -> Result<(), AuthError> {
        let user = self.service.with_value(|s| s.login(request))?;
        self.user.set(Some(user));
        Ok(())
    }

    pub fn signup(&self, request: SignupRequest) -> Result<(), AuthError> {
        let user = self.service.with_value(|s| s.signup(request))?;
        self.user.set(Some(user));
        Ok(())
    }

    pub fn logout(&self) {
        self.service.with_value(|s| s.logout());
        self.user.set(None);
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let service = ctx.with_app(AuthService::new);

    // Restore session from localStorage on mount
    let restored = service.current_user();
    if let Some(user) = &restored {
        log::info!("Session restored for {}", user.email);
    }

    provide_context(AuthContext {
        user: RwSignal::new(restored),
        service: StoredValue::new(service),
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
