//! 订单全流程集成测试
//!
//! 使用内存存储构造 ServerState，经过完整路由栈（认证中间件 + 管理员层）
//! 验证下单、查询、状态推进与权限边界。

use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode, header};
use order_server::auth::JwtService;
use order_server::catalog::CatalogStore;
use order_server::orders::OrderStore;
use order_server::{Config, Server, ServerState};
use serde_json::{Value, json};
use tower::Service;

async fn test_state() -> ServerState {
    let config = Config::with_overrides("./target/test-work", 0);
    let orders = OrderStore::open_in_memory().expect("order store");
    let catalog = CatalogStore::open_in_memory().await.expect("catalog store");
    let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
    ServerState::new(config, orders, catalog, jwt_service)
}

fn bearer(state: &ServerState, user_id: &str, name: &str, role: &str) -> String {
    let token = state
        .jwt_service
        .generate_token(user_id, name, role)
        .expect("token");
    format!("Bearer {token}")
}

fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).expect("request")
}

fn json_request(method: &str, uri: &str, auth: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(app: &mut axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(request).await.expect("router call");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// 5.00 x2 + 3.50 x1 = 13.50 的标准下单请求
fn bento_order_body() -> Value {
    json!({
        "restaurantId": "rest-bento-bar",
        "items": [
            {"menuItemId": "item-gyoza", "itemName": "Pork Gyoza (6pc)", "quantity": 2, "price": 5.00},
            {"menuItemId": "item-miso-soup", "itemName": "Miso Soup", "quantity": 1, "price": 3.50}
        ]
    })
}

#[tokio::test]
async fn test_full_cod_order_flow() {
    let state = test_state().await;
    let mut app = Server::build_router(state.clone());
    let alice = bearer(&state, "user-alice", "Alice", "customer");
    let bob = bearer(&state, "user-bob", "Bob", "customer");

    // 下单
    let (status, body) = send(
        &mut app,
        json_request("POST", "/api/orders", &alice, &bento_order_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    let order = &body["data"];
    assert_eq!(order["totalAmount"], json!(13.5));
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["paymentMode"], "COD");
    assert_eq!(order["customerName"], "Alice");
    assert_eq!(order["userId"], "user-alice");

    // 自己的订单列表带餐厅信息
    let (status, body) = send(&mut app, get("/api/orders/myorders", Some(&alice))).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["data"].as_array().expect("array");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["restaurant"]["name"], "Bento Bar");

    // 其他用户看不到
    let (status, body) = send(&mut app, get("/api/orders/myorders", Some(&bob))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn test_admin_walks_status_graph() {
    let state = test_state().await;
    let mut app = Server::build_router(state.clone());
    let alice = bearer(&state, "user-alice", "Alice", "customer");
    let admin = bearer(&state, "user-root", "Root", "admin");

    let (_, body) = send(
        &mut app,
        json_request("POST", "/api/orders", &alice, &bento_order_body()),
    )
    .await;
    let order_id = body["data"]["id"].as_str().expect("order id").to_string();
    let status_uri = format!("/api/orders/{order_id}/status");

    // 跳级被拒
    let (status, body) = send(
        &mut app,
        json_request("PUT", &status_uri, &admin, &json!({"status": "Delivered"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4004);

    // 逐级推进
    for next in ["Confirmed", "Preparing", "Out for Delivery", "Delivered"] {
        let (status, body) = send(
            &mut app,
            json_request("PUT", &status_uri, &admin, &json!({"status": next})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "transition to {next}");
        assert_eq!(body["data"]["status"], *next);
    }

    // 终态后一切变更被拒
    let (status, body) = send(
        &mut app,
        json_request("PUT", &status_uri, &admin, &json!({"status": "Cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4004);

    // 管理员总列表
    let (status, body) = send(&mut app, get("/api/orders", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["data"].as_array().expect("array");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["customerName"], "Alice");
    assert_eq!(orders[0]["status"], "Delivered");
}

#[tokio::test]
async fn test_repeat_transition_rejected() {
    let state = test_state().await;
    let mut app = Server::build_router(state.clone());
    let alice = bearer(&state, "user-alice", "Alice", "customer");
    let admin = bearer(&state, "user-root", "Root", "admin");

    let (_, body) = send(
        &mut app,
        json_request("POST", "/api/orders", &alice, &bento_order_body()),
    )
    .await;
    let order_id = body["data"]["id"].as_str().expect("order id").to_string();
    let status_uri = format!("/api/orders/{order_id}/status");

    let (status, _) = send(
        &mut app,
        json_request("PUT", &status_uri, &admin, &json!({"status": "Confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 重复提交同一状态是非法自环
    let (status, body) = send(
        &mut app,
        json_request("PUT", &status_uri, &admin, &json!({"status": "Confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4004);
}

#[tokio::test]
async fn test_cancel_then_dead_end() {
    let state = test_state().await;
    let mut app = Server::build_router(state.clone());
    let alice = bearer(&state, "user-alice", "Alice", "customer");
    let admin = bearer(&state, "user-root", "Root", "admin");

    let (_, body) = send(
        &mut app,
        json_request("POST", "/api/orders", &alice, &bento_order_body()),
    )
    .await;
    let order_id = body["data"]["id"].as_str().expect("order id").to_string();
    let status_uri = format!("/api/orders/{order_id}/status");

    for next in ["Confirmed", "Cancelled"] {
        let (status, _) = send(
            &mut app,
            json_request("PUT", &status_uri, &admin, &json!({"status": next})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "transition to {next}");
    }

    let (status, body) = send(
        &mut app,
        json_request("PUT", &status_uri, &admin, &json!({"status": "Preparing"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4004);
}

#[tokio::test]
async fn test_auth_and_role_gating() {
    let state = test_state().await;
    let mut app = Server::build_router(state.clone());
    let alice = bearer(&state, "user-alice", "Alice", "customer");

    // 未认证
    let (status, body) = send(&mut app, get("/api/orders/myorders", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    // 伪造令牌
    let (status, _) = send(
        &mut app,
        get("/api/orders/myorders", Some("Bearer not-a-real-token")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 普通用户访问管理员路由
    let (status, body) = send(&mut app, get("/api/orders", Some(&alice))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let (status, body) = send(
        &mut app,
        json_request(
            "PUT",
            "/api/orders/any-id/status",
            &alice,
            &json!({"status": "Confirmed"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);
}

#[tokio::test]
async fn test_public_routes_skip_auth() {
    let state = test_state().await;
    let mut app = Server::build_router(state);

    let (status, body) = send(&mut app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&mut app, get("/api/restaurants", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().expect("array").len() >= 2);

    let (status, body) = send(&mut app, get("/api/restaurants/rest-bento-bar/menu", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"].as_array().expect("array").is_empty());

    let (status, body) = send(&mut app, get("/api/restaurants/rest-nowhere", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5001);
}

#[tokio::test]
async fn test_computed_total_overrides_declared() {
    let state = test_state().await;
    let mut app = Server::build_router(state.clone());
    let alice = bearer(&state, "user-alice", "Alice", "customer");

    let body = json!({
        "restaurantId": "rest-luna-pizza",
        "items": [
            {"menuItemId": "item-margherita", "itemName": "Margherita", "quantity": 1, "price": 9.00}
        ],
        "totalAmount": 999.0
    });
    let (status, body) = send(&mut app, json_request("POST", "/api/orders", &alice, &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalAmount"], json!(9.0));
}

#[tokio::test]
async fn test_cross_restaurant_cart_rejected() {
    let state = test_state().await;
    let mut app = Server::build_router(state.clone());
    let alice = bearer(&state, "user-alice", "Alice", "customer");

    // item-margherita 属于 rest-luna-pizza
    let body = json!({
        "restaurantId": "rest-bento-bar",
        "items": [
            {"menuItemId": "item-margherita", "itemName": "Margherita", "quantity": 1, "price": 9.00}
        ]
    });
    let (status, body) = send(&mut app, json_request("POST", "/api/orders", &alice, &body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3001);

    // 拒绝后不留任何痕迹
    let (_, body) = send(&mut app, get("/api/orders/myorders", Some(&alice))).await;
    assert!(body["data"].as_array().expect("array").is_empty());
}

#[tokio::test]
async fn test_rejects_empty_and_invalid_orders() {
    let state = test_state().await;
    let mut app = Server::build_router(state.clone());
    let alice = bearer(&state, "user-alice", "Alice", "customer");

    let empty = json!({"restaurantId": "rest-bento-bar", "items": []});
    let (status, body) = send(&mut app, json_request("POST", "/api/orders", &alice, &empty)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4001);

    let zero_quantity = json!({
        "restaurantId": "rest-bento-bar",
        "items": [
            {"menuItemId": "item-gyoza", "itemName": "Pork Gyoza (6pc)", "quantity": 0, "price": 5.50}
        ]
    });
    let (status, body) = send(
        &mut app,
        json_request("POST", "/api/orders", &alice, &zero_quantity),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4002);

    let unknown_restaurant = json!({
        "restaurantId": "rest-nowhere",
        "items": [
            {"menuItemId": "item-gyoza", "itemName": "Pork Gyoza (6pc)", "quantity": 1, "price": 5.50}
        ]
    });
    let (status, body) = send(
        &mut app,
        json_request("POST", "/api/orders", &alice, &unknown_restaurant),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5001);
}

#[tokio::test]
async fn test_concurrent_status_updates_pick_one_winner() {
    use order_server::CurrentUser;
    use order_server::orders::set_status;
    use shared::dto::PlaceOrderRequest;
    use shared::models::{OrderItem, OrderStatus};

    let state = test_state().await;
    let request = PlaceOrderRequest {
        restaurant_id: "rest-bento-bar".to_string(),
        items: vec![OrderItem {
            menu_item_id: "item-gyoza".to_string(),
            item_name: "Pork Gyoza (6pc)".to_string(),
            quantity: 1,
            price: 5.50,
        }],
        total_amount: None,
        payment_mode: None,
    };
    let order = order_server::place_order(
        &state.orders,
        &state.catalog,
        "user-alice",
        "Alice",
        request,
    )
    .await
    .expect("place order");

    // 两个并发的相同推进，单写事务串行化后恰好一个成功
    let admin = CurrentUser {
        id: "admin-1".to_string(),
        name: "Root".to_string(),
        role: "admin".to_string(),
    };
    let store_a = state.orders.clone();
    let store_b = state.orders.clone();
    let id_a = order.id.clone();
    let id_b = order.id.clone();
    let admin_a = admin.clone();
    let admin_b = admin;
    let first = tokio::task::spawn_blocking(move || {
        set_status(&store_a, &admin_a, &id_a, OrderStatus::Confirmed)
    });
    let second = tokio::task::spawn_blocking(move || {
        set_status(&store_b, &admin_b, &id_b, OrderStatus::Confirmed)
    });
    let results = [first.await.expect("join"), second.await.expect("join")];

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    let loss = results
        .iter()
        .find(|r| r.is_err())
        .expect("one rejection")
        .as_ref()
        .err()
        .expect("error");
    assert_eq!(loss.code, order_server::ErrorCode::InvalidStatusTransition);

    let stored = state
        .orders
        .get(&order.id)
        .expect("load order")
        .expect("stored order");
    assert_eq!(stored.status, OrderStatus::Confirmed);
}
