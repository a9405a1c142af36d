//! Status overlay: user edits stored apart from the immutable seed data.
//!
//! Statuses use one storage key per (kind, id): `{namespace}:overlay:{kind}:{id}`.
//! Kind strings never contain `:`, so an order and a submission with the same
//! id never share a key. Flag sets (notification read marks) live under a
//! single key per kind, `{namespace}:overlay:{kind}`, as a JSON array of ids.

use super::storage::KeyValueStore;
use contracts::domain::common::EntityKind;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Orders,
    Submissions,
    /// Флаги прочтения уведомлений о заказах
    OrderNotifications,
    /// Флаги прочтения уведомлений о заявках
    SubmissionNotifications,
}

impl OverlayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayKind::Orders => "orders",
            OverlayKind::Submissions => "submissions",
            OverlayKind::OrderNotifications => "notifications.orders",
            OverlayKind::SubmissionNotifications => "notifications.submissions",
        }
    }
}

impl From<EntityKind> for OverlayKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Order => OverlayKind::Orders,
            EntityKind::Submission => OverlayKind::Submissions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusOverlay {
    store: KeyValueStore,
    prefix: String,
}

impl StatusOverlay {
    pub fn new(store: KeyValueStore, namespace: &str) -> Self {
        Self {
            store,
            prefix: format!("{}:overlay:", namespace),
        }
    }

    /// Префикс всех ключей overlay (используется `clear_all`)
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn kind_prefix(&self, kind: OverlayKind) -> String {
        format!("{}{}:", self.prefix, kind.as_str())
    }

    pub fn key(&self, kind: OverlayKind, id: &str) -> String {
        format!("{}{}", self.kind_prefix(kind), id)
    }

    pub fn get_status(&self, kind: OverlayKind, id: &str) -> Option<String> {
        self.store.get::<String>(&self.key(kind, id))
    }

    pub fn set_status(&self, kind: OverlayKind, id: &str, status: &str) {
        self.store.set(&self.key(kind, id), status);
    }

    /// Пакетная запись одного статуса для набора id
    pub fn set_many<I, S>(&self, kind: OverlayKind, ids: I, status: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.store.set(&self.key(kind, id.as_ref()), status);
        }
    }

    fn flag_set_key(&self, kind: OverlayKind) -> String {
        format!("{}{}", self.prefix, kind.as_str())
    }

    /// Набор отмеченных id вида (пустой, если ничего не отмечено)
    pub fn flags(&self, kind: OverlayKind) -> BTreeSet<String> {
        self.store
            .get::<BTreeSet<String>>(&self.flag_set_key(kind))
            .unwrap_or_default()
    }

    /// Добавляет id в набор флагов одной записью. Возвращает число новых id.
    pub fn add_flags<I, S>(&self, kind: OverlayKind, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = self.flags(kind);
        let before = set.len();
        set.extend(ids.into_iter().map(|id| id.as_ref().to_string()));
        let added = set.len() - before;
        if added > 0 {
            self.store.set(&self.flag_set_key(kind), &set);
        }
        added
    }

    pub fn remove_status(&self, kind: OverlayKind, id: &str) {
        self.store.remove(&self.key(kind, id));
    }

    /// All overlay entries of one kind, id → status.
    pub fn statuses(&self, kind: OverlayKind) -> BTreeMap<String, String> {
        let kind_prefix = self.kind_prefix(kind);
        self.store
            .keys_with_prefix(&kind_prefix)
            .into_iter()
            .filter_map(|key| {
                let status = self.store.get::<String>(&key)?;
                Some((key[kind_prefix.len()..].to_string(), status))
            })
            .collect()
    }

    /// Effective status: the overlay value when it is present and valid,
    /// otherwise the seed value.
    pub fn effective_status<S>(&self, kind: OverlayKind, id: &str, seed: S) -> S
    where
        S: FromStr<Err = String>,
    {
        match self.get_status(kind, id) {
            Some(raw) => match raw.parse::<S>() {
                Ok(status) => status,
                Err(e) => {
                    log::warn!(
                        "Ignoring overlay status for {}:{}: {}",
                        kind.as_str(),
                        id,
                        e
                    );
                    seed
                }
            },
            None => seed,
        }
    }

    /// Removes every overlay entry of this namespace. Other keys stay.
    pub fn clear_all(&self) -> usize {
        let removed = self.store.remove_with_prefix(&self.prefix);
        log::info!("Cleared {} overlay entries", removed);
        removed
    }
}
