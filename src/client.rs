use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::UdpSocket;
use tokio::time;

use crate::dns::{DomainName, Query, QueryType};

/// Largest datagram this client accepts back.
const RECV_BUFFER_SIZE: usize = 2048;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Maximum number of retries {0} exceeded")]
    RetriesExhausted(u32),
}

/// A client bound to one server address and one retry policy.
#[derive(Debug, Clone)]
pub struct DnsClient {
    pub server: SocketAddr,
    pub timeout: Duration,
    pub max_retries: u32,
}

/// Raw outcome of a successful exchange.
#[derive(Debug)]
pub struct Reply {
    pub bytes: Vec<u8>,
    /// Transaction id of the attempt that got answered.
    pub query_id: u16,
    /// Retries spent before the reply arrived; 0 means the first packet won.
    pub retries: u32,
    /// Measured from the first send, retransmissions included.
    pub elapsed: Duration,
}

impl DnsClient {
    /// Sends a query for `name` and waits for a single datagram back.
    ///
    /// Every attempt encodes a new packet with a fresh transaction id; one
    /// socket serves the whole exchange and is closed on every exit path
    /// when it drops.
    pub async fn lookup(&self, name: &DomainName, query_type: QueryType) -> Result<Reply, Error> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        let started = Instant::now();

        for attempt in 0..=self.max_retries {
            let query = Query::new(name.clone(), query_type);
            let packet: Vec<u8> = (&query).into();

            log::debug!(
                "sending {} octets to {} (attempt {} of {})",
                packet.len(),
                self.server,
                attempt + 1,
                self.max_retries + 1
            );
            socket.send_to(&packet, self.server).await?;

            match time::timeout(self.timeout, socket.recv_from(&mut buf)).await {
                Ok(Ok((len, from))) => {
                    if from != self.server {
                        log::warn!("reply came from {} instead of {}", from, self.server);
                    }
                    log::debug!("received {} octets after {:?}", len, started.elapsed());

                    return Ok(Reply {
                        bytes: buf[..len].to_vec(),
                        query_id: query.id,
                        retries: attempt,
                        elapsed: started.elapsed(),
                    });
                }
                Ok(Err(err)) => return Err(err.into()),
                Err(_) => {
                    if attempt < self.max_retries {
                        log::warn!("socket timeout, unanswered query");
                    }
                }
            }
        }

        Err(Error::RetriesExhausted(self.max_retries))
    }
}
