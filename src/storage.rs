use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// The slice of a key-value store the journal needs: hashes for day records,
/// plain strings for recipes.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn hget_all(&self, key: &str) -> anyhow::Result<HashMap<String, String>>;
    async fn hset(&self, key: &str, field: &str, value: &str) -> anyhow::Result<()>;
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    /// Writes `value` only if `key` is absent. Returns whether the write happened.
    async fn set_nx(&self, key: &str, value: &str) -> anyhow::Result<bool>;
    async fn ping(&self) -> anyhow::Result<String>;
    async fn close(&self);
}

pub struct RedisStore {
    conn: RwLock<Option<ConnectionManager>>,
}

impl RedisStore {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(url).context("parse redis url")?;
        let conn = client
            .get_connection_manager()
            .await
            .with_context(|| format!("connect to redis at {}", url))?;
        Ok(Self {
            conn: RwLock::new(Some(conn)),
        })
    }

    async fn conn(&self) -> anyhow::Result<ConnectionManager> {
        self.conn
            .read()
            .await
            .clone()
            .ok_or_else(|| anyhow::anyhow!("redis connection closed"))
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn hget_all(&self, key: &str) -> anyhow::Result<HashMap<String, String>> {
        let mut conn = self.conn().await?;
        let fields: HashMap<String, String> = conn
            .hgetall(key)
            .await
            .with_context(|| format!("redis HGETALL {}", key))?;
        Ok(fields)
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> anyhow::Result<()> {
        let mut conn = self.conn().await?;
        let _: () = conn
            .hset(key, field, value)
            .await
            .with_context(|| format!("redis HSET {} {}", key, field))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .with_context(|| format!("redis GET {}", key))?;
        Ok(value)
    }

    async fn set_nx(&self, key: &str, value: &str) -> anyhow::Result<bool> {
        let mut conn = self.conn().await?;
        let written: bool = conn
            .set_nx(key, value)
            .await
            .with_context(|| format!("redis SETNX {}", key))?;
        Ok(written)
    }

    async fn ping(&self) -> anyhow::Result<String> {
        let mut conn = self.conn().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("redis PING")?;
        Ok(pong)
    }

    async fn close(&self) {
        if self.conn.write().await.take().is_some() {
            info!("redis connection closed");
        }
    }
}

/// Process-local store with the same semantics as [`RedisStore`]. Backs the
/// `memory` store backend and the test suites.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    hashes: HashMap<String, HashMap<String, String>>,
    strings: HashMap<String, String>,
    closed: bool,
}

impl MemoryInner {
    fn ensure_open(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.closed, "memory store closed");
        Ok(())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn hget_all(&self, key: &str) -> anyhow::Result<HashMap<String, String>> {
        let inner = self.inner.lock().await;
        inner.ensure_open()?;
        Ok(inner.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().await;
        inner.ensure_open()?;
        inner
            .hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let inner = self.inner.lock().await;
        inner.ensure_open()?;
        Ok(inner.strings.get(key).cloned())
    }

    async fn set_nx(&self, key: &str, value: &str) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().await;
        inner.ensure_open()?;
        if inner.strings.contains_key(key) {
            return Ok(false);
        }
        inner.strings.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<String> {
        self.inner.lock().await.ensure_open()?;
        Ok("PONG".into())
    }

    async fn close(&self) {
        self.inner.lock().await.closed = true;
    }
}
