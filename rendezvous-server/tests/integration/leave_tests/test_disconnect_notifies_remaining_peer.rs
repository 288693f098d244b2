use rendezvous_core::{ClientSignal, ServerSignal};

use crate::integration::{connect, create_test_router, init_tracing, room};

#[tokio::test]
async fn test_disconnect_notifies_remaining_peer() {
    init_tracing();

    let (router, output) = create_test_router();
    let a = connect(&router);
    let b = connect(&router);

    router.handle(a, ClientSignal::JoinRoom(room("r1"))).await;
    router.handle(b, ClientSignal::JoinRoom(room("r1"))).await;
    output.clear().await;

    router.disconnect(b).await;

    assert_eq!(output.sent().await.len(), 1);
    assert_eq!(output.sent_to(&a).await, vec![ServerSignal::UserLeft { id: b }]);
    assert_eq!(router.registry().members(&room("r1")), vec![a]);
    assert_eq!(router.connection_count(), 1);
}

#[tokio::test]
async fn test_last_disconnect_deletes_room() {
    init_tracing();

    let (router, output) = create_test_router();
    let a = connect(&router);
    let b = connect(&router);
    let c = connect(&router);

    router.handle(a, ClientSignal::JoinRoom(room("r1"))).await;
    router.handle(b, ClientSignal::JoinRoom(room("r1"))).await;
    router.disconnect(a).await;
    router.disconnect(b).await;

    assert!(!router.registry().contains_room(&room("r1")));
    assert_eq!(router.registry().room_count(), 0);
    output.clear().await;

    router.handle(c, ClientSignal::JoinRoom(room("r1"))).await;

    assert!(output.sent().await.is_empty(), "Fresh room, nobody to notify");
    assert_eq!(router.registry().members(&room("r1")), vec![c]);
}

#[tokio::test]
async fn test_disconnect_without_room_is_noop() {
    init_tracing();

    let (router, output) = create_test_router();
    let a = connect(&router);

    router.disconnect(a).await;
    router.disconnect(a).await;

    assert!(output.sent().await.is_empty());
    assert_eq!(router.connection_count(), 0);
}
