//! RedisConnectionProvider - 本番用のストア接続
//!
//! - データベース選択は接続時パラメータで行う（接続確立時に SELECT が送られる）
//! - pop は RPOP（非ブロッキング）。BRPOP は使わない
//! - pop にタイムアウトは付けない（接続確立のみ connect_timeout で制限）

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::domain::{ConnectionError, StoreConfig, StoreError};
use crate::ports::{ConnectionProvider, QueueConnection};

#[derive(Debug, Clone, Copy, Default)]
pub struct RedisConnectionProvider;

impl RedisConnectionProvider {
    pub fn new() -> Self {
        Self
    }

    fn connection_info(store: &StoreConfig) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(store.host.clone(), store.port),
            redis: RedisConnectionInfo {
                db: i64::from(store.database),
                ..RedisConnectionInfo::default()
            },
        }
    }
}

#[async_trait]
impl ConnectionProvider for RedisConnectionProvider {
    async fn connect(
        &self,
        store: &StoreConfig,
    ) -> Result<Box<dyn QueueConnection>, ConnectionError> {
        let fail = |reason: String| ConnectionError::new(store.address(), store.database, reason);

        let client = Client::open(Self::connection_info(store))
            .map_err(|e| fail(format!("invalid address: {e}")))?;

        let mut conn = tokio::time::timeout(
            store.connect_timeout(),
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| fail(format!("timed out after {}ms", store.connect_timeout_ms)))?
        .map_err(|e| fail(e.to_string()))?;

        // 接続直後に一度だけ疎通確認
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| fail(format!("ping failed: {e}")))?;

        Ok(Box::new(RedisQueueConnection { conn }))
    }
}

struct RedisQueueConnection {
    conn: MultiplexedConnection,
}

#[async_trait]
impl QueueConnection for RedisQueueConnection {
    async fn pop_right(&mut self, queue: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let value: Option<Vec<u8>> = redis::cmd("RPOP")
            .arg(queue)
            .query_async(&mut self.conn)
            .await
            .map_err(|e| StoreError::pop(queue, e))?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_info_carries_database() {
        let store = StoreConfig {
            host: "cache.local".into(),
            port: 6380,
            database: 4,
            ..StoreConfig::default()
        };
        let info = RedisConnectionProvider::connection_info(&store);
        assert_eq!(info.redis.db, 4);
        assert!(matches!(
            info.addr,
            ConnectionAddr::Tcp(ref host, 6380) if host == "cache.local"
        ));
    }

    #[tokio::test]
    async fn closed_port_fails_with_connection_error() {
        let store = StoreConfig {
            host: "127.0.0.1".into(),
            port: 1,
            database: 0,
            connect_timeout_ms: 2_000,
        };
        let err = RedisConnectionProvider::new()
            .connect(&store)
            .await
            .err()
            .unwrap();
        assert_eq!(err.address, "127.0.0.1:1");
    }
}
