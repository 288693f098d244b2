use rendezvous_core::{ClientSignal, ServerSignal};
use serde_json::json;

use crate::integration::{connect, create_test_router, init_tracing, room};

#[tokio::test]
async fn test_offer_answer_exchange() {
    init_tracing();

    let (router, output) = create_test_router();
    let a = connect(&router);
    let b = connect(&router);

    router.handle(a, ClientSignal::JoinRoom(room("r1"))).await;
    router.handle(b, ClientSignal::JoinRoom(room("r1"))).await;
    output.clear().await;

    router
        .handle(
            a,
            ClientSignal::Offer {
                room_id: room("r1"),
                sdp: json!("X"),
            },
        )
        .await;

    assert_eq!(
        output.sent_to(&b).await,
        vec![ServerSignal::Offer { sdp: json!("X") }]
    );
    assert!(output.sent_to(&a).await.is_empty(), "Sender gets no echo");

    router
        .handle(
            b,
            ClientSignal::Answer {
                room_id: room("r1"),
                sdp: json!("Y"),
            },
        )
        .await;

    assert_eq!(
        output.sent_to(&a).await,
        vec![ServerSignal::Answer { sdp: json!("Y") }]
    );
    assert_eq!(output.sent().await.len(), 2, "Exactly one recipient per event");
}

#[tokio::test]
async fn test_ice_candidate_forwarded_verbatim() {
    init_tracing();

    let (router, output) = create_test_router();
    let a = connect(&router);
    let b = connect(&router);

    router.handle(a, ClientSignal::JoinRoom(room("r1"))).await;
    router.handle(b, ClientSignal::JoinRoom(room("r1"))).await;
    output.clear().await;

    let candidate = json!({
        "candidate": "candidate:1 1 UDP 2122252543 192.0.2.1 54400 typ host",
        "sdpMid": "0",
        "sdpMLineIndex": 0
    });

    router
        .handle_text(
            b,
            &json!({
                "event": "ice-candidate",
                "data": { "roomId": "r1", "candidate": candidate }
            })
            .to_string(),
        )
        .await;

    assert_eq!(
        output.sent_to(&a).await,
        vec![ServerSignal::IceCandidate { candidate }]
    );
    assert!(output.sent_to(&b).await.is_empty());
}
