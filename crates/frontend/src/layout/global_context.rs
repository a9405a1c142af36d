use crate::shared::app_state::AppState;
use crate::shared::status_channel::SubscriptionId;
use leptos::prelude::*;
use web_sys::window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    /// Растёт при каждом изменении статусов; списки, карточки и дашборды
    /// читают его, чтобы пересчитаться
    pub status_revision: RwSignal<u64>,
    pub toasts: RwSignal<Vec<Toast>>,
    app: StoredValue<AppState>,
    subscription: StoredValue<Option<SubscriptionId>>,
}

impl AppGlobalContext {
    pub fn new(app: AppState) -> Self {
        let status_revision = RwSignal::new(0u64);
        let subscription = app.channel().subscribe(move |change| {
            log::debug!("Status change received: {:?}", change);
            status_revision.update(|rev| *rev += 1);
        });

        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            status_revision,
            toasts: RwSignal::new(vec![]),
            app: StoredValue::new(app),
            subscription: StoredValue::new(Some(subscription)),
        }
    }

    /// Snapshot of the app state handle (all fields are shared handles).
    pub fn app(&self) -> AppState {
        self.app.get_value()
    }

    pub fn with_app<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        self.app.with_value(f)
    }

    /// Reactive read: re-runs the caller when any status changes.
    pub fn track_statuses(&self) -> u64 {
        self.status_revision.get()
    }

    pub fn teardown(&self) {
        if let Some(id) = self.subscription.get_value() {
            self.with_app(|app| app.channel().unsubscribe(id));
            self.subscription.set_value(None);
        }
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            ToastKind::Success => log::info!("{}", message),
            ToastKind::Error => log::error!("{}", message),
        }
        let id = self
            .toasts
            .with_untracked(|t| t.iter().map(|toast| toast.id).max().unwrap_or(0) + 1);
        self.toasts.update(|toasts| toasts.push(Toast { id, kind, message }));

        let toasts = self.toasts;
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3_000).await;
            toasts.update(|toasts| toasts.retain(|t| t.id != id));
        });
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: std::collections::HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active").cloned() {
            let exists = self
                .opened
                .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == active_key));
            if !exists {
                let title = crate::layout::tabs::tab_title_for_key(&active_key);
                self.open_tab(&active_key, &title);
            } else {
                self.activate_tab(&active_key);
            }
        }

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let query_string = serde_qs::to_string(&std::collections::HashMap::from([(
                    "active".to_string(),
                    active_key.clone(),
                )]))
                .unwrap_or_default();

                let new_url = format!("?{}", query_string);

                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                // URL обновляется только при реальном изменении
                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            let _ = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            );
                        }
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            let tab = Tab {
                key: key.to_string(),
                title: title.to_string(),
            };
            self.opened.update(|tabs| tabs.push(tab));
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    pub fn close_all_tabs(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}
