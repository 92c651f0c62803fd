use std::net::SocketAddr;
use std::time::Duration;

/// Address the server listens on when nothing else is configured.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:50051";

/// Endpoint the client dials when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:50051";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_address: SocketAddr,
    stream_interval: Duration,
    deadline_work: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 50051)),
            stream_interval: Duration::from_secs(1),
            deadline_work: Duration::from_secs(5),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Pause between two messages of a server stream.
    pub fn with_stream_interval(mut self, interval: Duration) -> Self {
        self.stream_interval = interval;
        self
    }

    /// Total time the deadline-aware handler spends before answering.
    pub fn with_deadline_work(mut self, work: Duration) -> Self {
        self.deadline_work = work;
        self
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    pub fn stream_interval(&self) -> Duration {
        self.stream_interval
    }

    pub fn deadline_work(&self) -> Duration {
        self.deadline_work
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    endpoint: String,
    connect_timeout: Duration,
    client_stream_interval: Duration,
    bidi_interval: Duration,
    channel_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(5),
            client_stream_interval: Duration::from_secs(2),
            bidi_interval: Duration::from_secs(1),
            channel_buffer: 16,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Points the client at a server listening on `addr` over plaintext HTTP/2.
    pub fn for_addr(addr: SocketAddr) -> Self {
        Self::new(format!("http://{}", addr))
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Pause between two sends of the client-streaming call.
    pub fn with_client_stream_interval(mut self, interval: Duration) -> Self {
        self.client_stream_interval = interval;
        self
    }

    /// Pause between two sends of the bidirectional call.
    pub fn with_bidi_interval(mut self, interval: Duration) -> Self {
        self.bidi_interval = interval;
        self
    }

    pub fn with_channel_buffer(mut self, buffer: usize) -> Self {
        self.channel_buffer = buffer.max(1);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn client_stream_interval(&self) -> Duration {
        self.client_stream_interval
    }

    pub fn bidi_interval(&self) -> Duration {
        self.bidi_interval
    }

    pub fn channel_buffer(&self) -> usize {
        self.channel_buffer
    }
}
