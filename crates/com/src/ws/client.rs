use {
    crate::*,
    codec::Codec,
    futures_util::{SinkExt, StreamExt},
    std::net::SocketAddr,
    tokio_websockets::{ClientBuilder, MaybeTlsStream, Message, WebSocketStream},
};

/// Viewer side of the protocol, used by the probe tool and the tests.
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl WsClient {
    /// Connect to a `WsServer`.
    pub async fn connect(addr: SocketAddr) -> Result<Self, ComError> {
        let uri: http::Uri = format!("ws://{}", addr).parse().map_err(|e| {
            ComError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid WebSocket URI: {e}"),
            ))
        })?;
        let (stream, _response) = ClientBuilder::from_uri(uri).connect().await?;
        Ok(Self { stream })
    }

    pub async fn send(&mut self, command: FromViewer) -> Result<(), ComError> {
        self.stream
            .send(Message::binary(command.to_bytes()))
            .await?;
        Ok(())
    }

    /// Receive the next server message.
    ///
    /// Returns `ComError::ConnectionClosed` once the server closes the
    /// connection. Non-binary messages are skipped. Cancel safe.
    pub async fn recv(&mut self) -> Result<ToViewer, ComError> {
        loop {
            match self.stream.next().await {
                Some(Ok(msg)) => {
                    if msg.is_binary() {
                        let payload = msg.into_payload();
                        if payload.len() > MAX_MESSAGE_SIZE {
                            return Err(ComError::MessageTooLarge(payload.len()));
                        }
                        return ToViewer::from_bytes(&payload).map_err(ComError::from);
                    }
                }
                Some(Err(e)) => return Err(ComError::from(e)),
                None => return Err(ComError::ConnectionClosed),
            }
        }
    }

    pub async fn close(mut self) -> Result<(), ComError> {
        self.stream.close().await?;
        Ok(())
    }
}
