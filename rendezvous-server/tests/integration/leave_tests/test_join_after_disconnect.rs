use rendezvous_core::{ClientSignal, ConnectionId};
use rendezvous_server::SignalingError;

use crate::integration::{connect, create_test_router, init_tracing, room};

#[tokio::test]
async fn test_join_after_disconnect_is_dropped() {
    init_tracing();

    let (router, output) = create_test_router();
    let a = connect(&router);
    let late = connect(&router);

    router.handle(a, ClientSignal::JoinRoom(room("r1"))).await;
    router.disconnect(late).await;

    let res = router.join(late, room("r1")).await;

    assert!(matches!(res, Err(SignalingError::UnknownConnection(id)) if id == late));
    assert_eq!(router.registry().members(&room("r1")), vec![a]);
    assert_eq!(router.room_of(&late), None);
    assert_eq!(router.connection_count(), 1);
    assert!(
        output.sent().await.is_empty(),
        "Nobody hears about a connection that is gone"
    );
}

#[tokio::test]
async fn test_join_from_never_connected_is_dropped() {
    init_tracing();

    let (router, output) = create_test_router();
    let a = connect(&router);
    let b = connect(&router);
    let stranger = ConnectionId::new();

    router.handle(a, ClientSignal::JoinRoom(room("r1"))).await;
    router.handle(stranger, ClientSignal::JoinRoom(room("r1"))).await;

    assert_eq!(router.registry().members(&room("r1")), vec![a]);
    assert_eq!(router.connection_count(), 2);

    router.handle(b, ClientSignal::JoinRoom(room("r1"))).await;

    assert_eq!(router.registry().members(&room("r1")), vec![a, b]);
    assert_eq!(output.sent().await.len(), 1);
}
