use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::BufMut;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock answers incoming queries.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Answer every query.
    Reply,
    /// Never answer.
    Silent,
    /// Ignore the first `n` queries, answer from then on.
    ReplyAfter(usize),
    /// Answer with a mangled transaction id.
    ReplyWrongId,
}

/// UDP server answering DNS queries on a local ephemeral port.
pub struct MockDnsServer {
    pub addr: SocketAddr,
    requests: Arc<AtomicUsize>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: Behavior) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let (shutdown, mut shutdown_rx) = oneshot::channel();

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            let mut buf = [0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    received = socket.recv_from(&mut buf) => {
                        let (len, from) = match received {
                            Ok(pair) => pair,
                            Err(_) => break,
                        };
                        let count = seen.fetch_add(1, Ordering::SeqCst);

                        let reply = match behavior {
                            Behavior::Silent => continue,
                            Behavior::ReplyAfter(n) if count < n => continue,
                            Behavior::ReplyWrongId => {
                                let mut reply = build_response(&buf[..len]);
                                reply[0] ^= 0xff;
                                reply
                            }
                            _ => build_response(&buf[..len]),
                        };

                        socket.send_to(&reply, from).await.unwrap();
                    }
                }
            }
        });

        MockDnsServer {
            addr,
            requests,
            shutdown: Some(shutdown),
        }
    }

    /// Queries received so far, answered or not.
    pub fn requests_seen(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Builds a minimal answer to `query`: the transaction id and question are
/// echoed back, followed by one A record for 93.184.216.34 with a 60 second
/// TTL, compressed with a pointer at the question name.
fn build_response(query: &[u8]) -> Vec<u8> {
    let mut reply = vec![];

    reply.put_u16(u16::from_be_bytes([query[0], query[1]]));
    reply.put_u16(0x8180); // QR, RD, RA set, rcode 0
    reply.put_u16(1); // QDCOUNT
    reply.put_u16(1); // ANCOUNT
    reply.put_u16(0); // NSCOUNT
    reply.put_u16(0); // ARCOUNT
    reply.put(&query[12..]);

    reply.put_u16(0xc00c); // pointer to the question name
    reply.put_u16(1); // TYPE A
    reply.put_u16(1); // CLASS IN
    reply.put_u32(60);
    reply.put_u16(4);
    reply.put(&[93u8, 184, 216, 34][..]);

    reply
}
