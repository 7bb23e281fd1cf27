//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use message_relay::channel::DatagramSender;
use message_relay::config::RelayConfig;
use message_relay::http::HttpServer;
use message_relay::lifecycle::Shutdown;
use message_relay::storage::{Messages, Store};
use tokio::net::{TcpListener, UdpSocket};

/// Config with ephemeral ports, a store under `dir`, and the repo's assets.
pub fn test_config(dir: &Path) -> RelayConfig {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut config = RelayConfig::default();
    config.http.bind_address = "127.0.0.1:0".into();
    config.channel.address = "127.0.0.1:0".into();
    config.storage.path = dir.join("storage").join("data.json").display().to_string();
    config.assets.templates_dir = root.join("templates").display().to_string();
    config.assets.static_dir = root.join("static").display().to_string();
    config
}

/// Start the front door sending to `target`; returns its address.
pub async fn start_front_door(config: RelayConfig, target: SocketAddr, shutdown: &Shutdown) -> SocketAddr {
    let sender = DatagramSender::bind(target, config.channel.max_datagram_size).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, sender);
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    addr
}

/// A client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Wait up to `wait` for one datagram.
#[allow(dead_code)]
pub async fn recv_datagram(socket: &UdpSocket, wait: Duration) -> Option<Vec<u8>> {
    let mut buf = vec![0u8; 65_536];
    match tokio::time::timeout(wait, socket.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => Some(buf[..len].to_vec()),
        _ => None,
    }
}

/// Poll the store until it holds `count` records.
#[allow(dead_code)]
pub async fn wait_for_messages(store: &Store, count: usize) -> Messages {
    for _ in 0..100 {
        if let Ok(messages) = store.load().await {
            if messages.len() >= count {
                return messages;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("store never reached {count} messages");
}

/// Find a loopback port that is free for both TCP and UDP right now.
#[allow(dead_code)]
pub async fn free_port() -> u16 {
    loop {
        let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = tcp.local_addr().unwrap().port();
        if UdpSocket::bind(("127.0.0.1", port)).await.is_ok() {
            return port;
        }
    }
}
