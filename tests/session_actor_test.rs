use kitchen_board::access::AllowAll;
use kitchen_board::board_actor::mock::{create_mock_board, expect_submit};
use kitchen_board::framework::ActorClient;
use kitchen_board::model::{builtin_categories, Catalog, Intent, Order, OrderId, Reply, Step, UserId};
use kitchen_board::session_actor::SessionContext;
use std::sync::Arc;

/// Integration test: Real Session actor with a mocked Board.
///
/// - Real session registry and state machine
/// - The test plays the board and checks the exact payload submitted
#[tokio::test]
async fn test_session_actor_with_mocked_board() {
    let (board, mut board_requests) = create_mock_board(10);

    let (session_actor, sessions) = kitchen_board::session_actor::new(None, Arc::new(AllowAll));
    let actor_handle = tokio::spawn(session_actor.run(SessionContext {
        board,
        catalog: Arc::new(Catalog::new(builtin_categories())),
    }));

    let chef = UserId::from(42);
    for intent in [
        Intent::Start,
        Intent::Text("GF-254".into()),
        Intent::Text("20".into()),
        Intent::AddItem("Борщ".into()),
        Intent::AddItem("Хлеб".into()),
        Intent::AddItem("Хлеб".into()),
        Intent::RemoveItem("Борщ".into()),
    ] {
        sessions.dispatch(chef.clone(), intent).await.unwrap();
    }

    let board_task = tokio::spawn(async move {
        let (create, respond_to) = expect_submit(&mut board_requests)
            .await
            .expect("Expected Submit request");
        assert_eq!(create.label, "GF-254");
        assert_eq!(create.prep_duration_minutes, 20);
        assert_eq!(create.items.len(), 1);
        assert_eq!(create.items[0].name, "Хлеб");
        assert_eq!(create.items[0].quantity, 2);

        let order = Order {
            id: OrderId(7),
            label: create.label,
            prep_duration_minutes: 20,
            created_at: 0,
            ends_at: 1_200_000,
            expires_at: 1_500_000,
            items: create.items,
        };
        respond_to.send(Ok(Ok(order))).unwrap();
        board_requests
    });

    let reply = sessions.dispatch(chef.clone(), Intent::Submit).await.unwrap();
    assert!(matches!(reply, Reply::Submitted(ref order) if order.id == OrderId(7)));
    let board_requests = board_task.await.unwrap();

    let draft = sessions.get(chef.clone()).await.unwrap().unwrap();
    assert_eq!(draft.step, Step::Idle);

    // Forgetting the user drops the draft entirely.
    assert!(sessions.delete(chef).await.unwrap());
    assert_eq!(sessions.active_sessions().await.unwrap(), 0);

    // Cleanup: the actor exits once the last client is gone.
    drop(sessions);
    actor_handle.await.unwrap();
    drop(board_requests);
}

/// A board that has gone away turns into `Unavailable`, not an error.
#[tokio::test]
async fn test_session_actor_survives_missing_board() {
    let (board, board_requests) = create_mock_board(10);
    drop(board_requests);

    let (session_actor, sessions) = kitchen_board::session_actor::new(None, Arc::new(AllowAll));
    let actor_handle = tokio::spawn(session_actor.run(SessionContext {
        board,
        catalog: Arc::new(Catalog::new(builtin_categories())),
    }));

    let chef = UserId::from("chef");
    for intent in [
        Intent::Start,
        Intent::Text("A1".into()),
        Intent::Text("5".into()),
        Intent::AddItem("Чай".into()),
    ] {
        sessions.dispatch(chef.clone(), intent).await.unwrap();
    }

    let reply = sessions.dispatch(chef.clone(), Intent::Submit).await.unwrap();
    assert_eq!(reply, Reply::Unavailable);

    let draft = sessions.get(chef).await.unwrap().unwrap();
    assert_eq!(draft.step, Step::SelectingItems);
    assert_eq!(draft.cart.quantity("Чай"), 1);

    drop(sessions);
    actor_handle.await.unwrap();
}
