//! `RedisStore` against a scripted RESP responder.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use hitcount_gateway::config::StoreSection;
use hitcount_gateway::store::{CounterStore, RedisStore};

/// Read one RESP array command, returning its parts. `None` on EOF.
async fn read_command(reader: &mut BufReader<TcpStream>) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let n: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut parts = Vec::with_capacity(n);
    for _ in 0..n {
        line.clear();
        reader.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut buf = vec![0u8; len + 2];
        reader.read_exact(&mut buf).await.ok()?;
        buf.truncate(len);
        parts.push(String::from_utf8(buf).ok()?);
    }
    Some(parts)
}

/// Serve INCR with `:42` and GET with the given raw reply; anything else
/// (PING, SELECT, CLIENT ...) gets a plain status.
async fn scripted(get_reply: &'static str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((sock, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut reader = BufReader::new(sock);
                while let Some(cmd) = read_command(&mut reader).await {
                    let reply = match cmd.first().map(|c| c.to_ascii_uppercase()).as_deref() {
                        Some("INCR") => ":42\r\n",
                        Some("GET") => get_reply,
                        Some("PING") => "+PONG\r\n",
                        _ => "+OK\r\n",
                    };
                    if reader.get_mut().write_all(reply.as_bytes()).await.is_err() {
                        break;
                    }
                }
            });
        }
    });
    port
}

fn store_at(port: u16) -> RedisStore {
    let cfg = StoreSection {
        host: "127.0.0.1".into(),
        port,
        timeout_ms: 1000,
        ..StoreSection::default()
    };
    RedisStore::new(&cfg).unwrap()
}

#[tokio::test]
async fn incr_then_get_reads_integer_text() {
    let store = store_at(scripted("$2\r\n42\r\n").await);

    assert_eq!(store.incr("hits").await.unwrap(), 42);
    assert_eq!(store.get("hits").await.unwrap(), Some(42));
    store.ping().await.unwrap();
}

#[tokio::test]
async fn missing_key_reads_as_none() {
    let store = store_at(scripted("$-1\r\n").await);
    assert_eq!(store.get("hits").await.unwrap(), None);
}

#[tokio::test]
async fn non_integer_value_is_store_unavailable() {
    let store = store_at(scripted("$3\r\nabc\r\n").await);

    let err = store.get("hits").await.expect_err("abc is not a count");
    assert!(err.is_store_unavailable(), "{err}");
    assert!(err.to_string().contains("not an integer"), "{err}");
}
