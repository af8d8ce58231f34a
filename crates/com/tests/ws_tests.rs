use {
    com::*,
    std::time::Duration,
    tokio::time::timeout,
};

const WAIT: Duration = Duration::from_secs(5);

async fn next_event(server: &mut WsServer) -> SessionEvent {
    timeout(WAIT, server.recv())
        .await
        .expect("event timed out")
        .expect("server closed")
}

async fn connected(server: &mut WsServer) -> std::sync::Arc<Session> {
    match next_event(server).await {
        SessionEvent::Connected(session) => session,
        other => panic!("expected connect, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connect_command_disconnect() {
    let mut server = WsServer::bind("127.0.0.1:0", 4).await.expect("bind failed");
    let mut client = WsClient::connect(server.local_addr())
        .await
        .expect("connect failed");

    let session = connected(&mut server).await;
    let id = session.id();

    client.send(FromViewer::Ping).await.expect("send failed");
    match next_event(&mut server).await {
        SessionEvent::Message(from, FromViewer::Ping) => assert_eq!(from, id),
        other => panic!("expected ping, got {:?}", other),
    }

    client.close().await.expect("close failed");
    match next_event(&mut server).await {
        SessionEvent::Disconnected(from) => assert_eq!(from, id),
        other => panic!("expected disconnect, got {:?}", other),
    }
}

#[tokio::test]
async fn test_session_packets_reach_client() {
    let mut server = WsServer::bind("127.0.0.1:0", 4).await.expect("bind failed");
    let mut client = WsClient::connect(server.local_addr())
        .await
        .expect("connect failed");
    let session = connected(&mut server).await;

    let frame = ToViewer::Frame {
        frame: vec![1, 2, 3],
        sequence: 5,
        capture_time: 12.25,
        byte_length: 3,
    };
    session
        .deliver(&Packet::encode(&frame))
        .expect("deliver failed");
    session
        .reply(&ToViewer::stream_status(StreamStatus::Started, ""))
        .expect("reply failed");

    let mut received = Vec::new();
    for _ in 0..2 {
        received.push(
            timeout(WAIT, client.recv())
                .await
                .expect("recv timed out")
                .expect("recv failed"),
        );
    }
    assert!(received.contains(&frame));
    assert!(received.contains(&ToViewer::stream_status(StreamStatus::Started, "")));
}

#[tokio::test]
async fn test_sessions_get_distinct_ids() {
    let mut server = WsServer::bind("127.0.0.1:0", 4).await.expect("bind failed");
    let _a = WsClient::connect(server.local_addr())
        .await
        .expect("connect failed");
    let _b = WsClient::connect(server.local_addr())
        .await
        .expect("connect failed");

    let first = connected(&mut server).await;
    let second = connected(&mut server).await;
    assert_ne!(first.id(), second.id());
}

#[tokio::test]
async fn test_commands_arrive_in_order() {
    let mut server = WsServer::bind("127.0.0.1:0", 4).await.expect("bind failed");
    let mut client = WsClient::connect(server.local_addr())
        .await
        .expect("connect failed");
    let _session = connected(&mut server).await;

    client.send(FromViewer::Status).await.expect("send failed");
    client.send(FromViewer::Start).await.expect("send failed");
    assert!(matches!(
        next_event(&mut server).await,
        SessionEvent::Message(_, FromViewer::Status)
    ));
    assert!(matches!(
        next_event(&mut server).await,
        SessionEvent::Message(_, FromViewer::Start)
    ));
}
