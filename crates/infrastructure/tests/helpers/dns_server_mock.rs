#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Answer served for A questions in `Answer` mode
pub const MOCK_A_ADDR: [u8; 4] = [93, 184, 216, 34];
pub const MOCK_TTL: u32 = 60;

const RCODE_SERVFAIL: u8 = 2;
const RCODE_NXDOMAIN: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// One A record for A questions, NODATA for every other type
    Answer,
    NxDomain,
    ServFail,
    /// Echoes a different transaction id
    WrongId,
    /// Never replies
    Silent,
}

/// Minimal UDP DNS server answering with hand-built wire responses
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Starts on an ephemeral localhost port
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let counter = queries.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::Relaxed);
                            if let Some(response) = Self::build_response(&buf[..len], behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of queries received so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    /// Builds the wire response for `query`, or `None` to stay silent
    pub fn build_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
        if behavior == MockBehavior::Silent || query.len() < 12 {
            return None;
        }

        let question_end = Self::question_end(query)?;
        let qtype = u16::from_be_bytes([query[question_end - 4], query[question_end - 3]]);
        let answer_a = behavior == MockBehavior::Answer && qtype == 1;

        let rcode = match behavior {
            MockBehavior::NxDomain => RCODE_NXDOMAIN,
            MockBehavior::ServFail => RCODE_SERVFAIL,
            _ => 0,
        };

        let mut response = Vec::with_capacity(512);

        // Transaction ID
        if behavior == MockBehavior::WrongId {
            let id = u16::from_be_bytes([query[0], query[1]]).wrapping_add(1);
            response.extend_from_slice(&id.to_be_bytes());
        } else {
            response.extend_from_slice(&query[0..2]);
        }

        // QR=1, RD=1 / RA=1, RCODE
        response.push(0x81);
        response.push(0x80 | rcode);

        // Question count: 1, answer count, no authority or additional
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, u8::from(answer_a)]);
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        response.extend_from_slice(&query[12..question_end]);

        if answer_a {
            response.extend_from_slice(&[
                0xc0, 0x0c, // Name pointer to question
                0x00, 0x01, // Type A
                0x00, 0x01, // Class IN
            ]);
            response.extend_from_slice(&MOCK_TTL.to_be_bytes());
            response.extend_from_slice(&[0x00, 0x04]);
            response.extend_from_slice(&MOCK_A_ADDR);
        }

        Some(response)
    }

    /// Offset just past QTYPE/QCLASS of the first question
    fn question_end(query: &[u8]) -> Option<usize> {
        let mut pos = 12;
        loop {
            let len = *query.get(pos)? as usize;
            pos += 1;
            if len == 0 {
                break;
            }
            pos += len;
        }
        let end = pos + 4;
        (end <= query.len()).then_some(end)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
