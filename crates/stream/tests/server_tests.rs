mod common;

use {
    com::{FromViewer, StreamStatus, ToViewer, WsClient, WsServer},
    common::*,
    std::time::Duration,
    stream::*,
    tokio::{sync::oneshot, time::timeout},
};

const WAIT: Duration = Duration::from_secs(5);

async fn recv(client: &mut WsClient) -> ToViewer {
    timeout(WAIT, client.recv())
        .await
        .expect("recv timed out")
        .expect("recv failed")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_viewer_session_over_websocket() {
    let config = fast_config();
    let p = pipeline(config.clone());
    let server = WsServer::bind("127.0.0.1:0", config.frame_capacity())
        .await
        .expect("bind failed");
    let addr = server.local_addr();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let control = Control::new(p.registry.clone(), p.supervisor.clone());
    let running = tokio::spawn(control.run(server, async move {
        let _ = shutdown_rx.await;
    }));

    let mut client = WsClient::connect(addr).await.expect("connect failed");
    assert_eq!(
        recv(&mut client).await,
        ToViewer::stream_status(StreamStatus::Started, "")
    );
    assert_eq!(
        recv(&mut client).await,
        ToViewer::Status {
            source_available: true,
            running: true
        }
    );

    let mut last = 0;
    let mut frames = 0;
    while frames < 5 {
        if let ToViewer::Frame {
            frame,
            sequence,
            byte_length,
            capture_time,
        } = recv(&mut client).await
        {
            assert_eq!(&frame[..2], &[0xff, 0xd8]);
            assert_eq!(byte_length as usize, frame.len());
            assert!(capture_time > 1.0e9);
            assert!(sequence > last);
            last = sequence;
            frames += 1;
        }
    }

    client.send(FromViewer::Ping).await.expect("send failed");
    loop {
        if recv(&mut client).await == ToViewer::Pong {
            break;
        }
    }

    client.close().await.expect("close failed");
    let supervisor = p.supervisor.clone();
    assert!(wait_until(WAIT, || !supervisor.status().running).await);

    shutdown_tx.send(()).expect("control exited early");
    timeout(WAIT, running)
        .await
        .expect("shutdown timed out")
        .expect("control panicked");
    assert_eq!(p.script.lock().unwrap().closes, 1);
}
