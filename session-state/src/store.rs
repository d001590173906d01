use std::{collections::HashMap, future::Future, pin::Pin};

use tokio::sync::RwLock;
use tracing::trace;

/// Boxed `Send` future used by the store interface.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// In-place edit applied by [`SessionStore::update`] and [`SessionStore::upsert`].
pub type Mutation<'a, V> = Box<dyn FnOnce(&mut V) + Send + 'a>;

/// Key/value store of per-session values.
///
/// Implement this trait to back sessions with an external cache; call sites
/// only see get/put/delete plus the two read-modify-write operations.
/// Async because real backends perform I/O.
///
/// `update` and `upsert` apply their edit atomically with respect to other
/// writers of the same session, so handlers that await between reading and
/// writing never overwrite a concurrent change with a stale copy.
pub trait SessionStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Returns a copy of the value stored for `session`, if any.
    fn get<'a>(&'a self, session: &'a str) -> BoxFuture<'a, Option<V>>;

    /// Inserts or replaces the value for `session`.
    fn put<'a>(&'a self, session: &'a str, value: V) -> BoxFuture<'a, ()>;

    /// Removes the value for `session`, returning it.
    fn delete<'a>(&'a self, session: &'a str) -> BoxFuture<'a, Option<V>>;

    /// Applies `edit` to the stored value and returns a copy of the result.
    /// Absent sessions stay absent and yield `None`.
    fn update<'a>(
        &'a self,
        session: &'a str,
        edit: Mutation<'a, V>,
    ) -> BoxFuture<'a, Option<V>>;

    /// Like [`update`](Self::update), but starts from `init` when the session is absent.
    fn upsert<'a>(&'a self, session: &'a str, init: V, edit: Mutation<'a, V>) -> BoxFuture<'a, V>;
}

/// Process-wide in-memory store. Contents are lost on restart.
#[derive(Debug)]
pub struct InMemorySessionStore<V> {
    inner: RwLock<HashMap<String, V>>,
}

impl<V> InMemorySessionStore<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Number of sessions currently held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl<V> Default for InMemorySessionStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SessionStore<V> for InMemorySessionStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get<'a>(&'a self, session: &'a str) -> BoxFuture<'a, Option<V>> {
        Box::pin(async move { self.inner.read().await.get(session).cloned() })
    }

    fn put<'a>(&'a self, session: &'a str, value: V) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            trace!(session, "session store put");
            self.inner.write().await.insert(session.to_string(), value);
        })
    }

    fn delete<'a>(&'a self, session: &'a str) -> BoxFuture<'a, Option<V>> {
        Box::pin(async move {
            trace!(session, "session store delete");
            self.inner.write().await.remove(session)
        })
    }

    fn update<'a>(
        &'a self,
        session: &'a str,
        edit: Mutation<'a, V>,
    ) -> BoxFuture<'a, Option<V>> {
        Box::pin(async move {
            let mut map = self.inner.write().await;
            let value = map.get_mut(session)?;
            edit(value);
            trace!(session, "session store update");
            Some(value.clone())
        })
    }

    fn upsert<'a>(&'a self, session: &'a str, init: V, edit: Mutation<'a, V>) -> BoxFuture<'a, V> {
        Box::pin(async move {
            let mut map = self.inner.write().await;
            let value = map.entry(session.to_string()).or_insert(init);
            edit(value);
            trace!(session, "session store upsert");
            value.clone()
        })
    }
}
