use crate::dispatcher::Dispatcher;
use crate::framing::FrameDecoder;
use log::{info, warn};
use shared::Outbound;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

pub struct Client {
    stream: TcpStream,
    nickname: String,

    decoder: FrameDecoder,
    dispatcher: Dispatcher,
}

impl Client {
    /// Connects to the arena server. The host/port pair goes through
    /// `ToSocketAddrs`, so bare IPv6 literals like `::1` work without
    /// bracket notation.
    pub async fn new(
        host: &str,
        port: u16,
        nickname: &str,
        max_games: u32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let stream = TcpStream::connect((host, port)).await?;
        info!("Connected to [{}]:{}", host, port);

        Ok(Client {
            stream,
            nickname: nickname.to_string(),
            decoder: FrameDecoder::new(),
            dispatcher: Dispatcher::new(max_games),
        })
    }

    async fn send(&mut self, msg: &Outbound) -> Result<(), Box<dyn std::error::Error>> {
        let wire = msg.to_wire();
        self.stream.write_all(wire.as_bytes()).await?;
        Ok(())
    }

    /// Runs the session: sends the client hello, then processes inbound
    /// bytes until the server closes the connection or the transport
    /// fails. Per-message faults are handled inside the dispatcher and
    /// never end the session.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let hello = Outbound::ClientHello {
            nickname: self.nickname.clone(),
        };
        self.send(&hello).await?;
        info!("Sent client hello as {:?}", self.nickname);

        let mut buffer = [0u8; 2048];

        loop {
            let n = self.stream.read(&mut buffer).await?;
            if n == 0 {
                if !self.decoder.pending().is_empty() {
                    warn!(
                        "Server closed the connection with {} unframed byte(s) pending",
                        self.decoder.pending().len()
                    );
                }
                info!("Disconnected from server");
                return Ok(());
            }

            for msg in self.decoder.feed(&buffer[..n]) {
                for out in self.dispatcher.handle(&msg) {
                    self.send(&out).await?;
                }
            }
        }
    }
}
