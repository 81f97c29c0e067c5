//! Behaviour tests for the feedback lifecycle over HTTP.
//!
//! Scenarios run against the real services and the in-memory store, driving
//! the API with bearer tokens obtained through registration and login.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

#[allow(dead_code)]
#[path = "support/harness.rs"]
mod harness;

use actix_web::http::Method;
use harness::{RequestSpec, SharedWorld, WorldFixture, perform, register_and_login};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const STRENGTHS: &str = "Clear written design proposals";

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn give_positive_feedback(world: &SharedWorld) {
    let (token, employee_id) = {
        let ctx = world.borrow();
        (ctx.token("manager"), ctx.user_id("employee"))
    };
    let exchange = perform(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/feedbacks".to_owned(),
            bearer: Some(token),
            payload: Some(json!({
                "employeeId": employee_id,
                "strengths": STRENGTHS,
                "improvements": "Share drafts earlier",
                "sentiment": "positive"
            })),
            label: "create feedback request",
        },
    );
    world.borrow_mut().last_feedback_id = exchange.body["id"].as_i64();
}

fn acknowledge_as(world: &SharedWorld, alias: &str) {
    let (token, id) = {
        let ctx = world.borrow();
        (ctx.token(alias), ctx.last_feedback_id.expect("feedback id"))
    };
    perform(
        world,
        RequestSpec {
            method: Method::PUT,
            path: format!("/api/v1/feedbacks/{id}/acknowledge"),
            bearer: Some(token),
            payload: None,
            label: "acknowledge request",
        },
    );
}

fn update_feedback(world: &SharedWorld, payload: Value) {
    let (token, id) = {
        let ctx = world.borrow();
        (ctx.token("manager"), ctx.last_feedback_id.expect("feedback id"))
    };
    perform(
        world,
        RequestSpec {
            method: Method::PUT,
            path: format!("/api/v1/feedbacks/{id}"),
            bearer: Some(token),
            payload: Some(payload),
            label: "update feedback request",
        },
    );
}

fn last_body(world: &WorldFixture) -> Value {
    world.world().borrow().last().body.clone()
}

#[given("a registered manager")]
fn a_registered_manager(world: &WorldFixture) {
    register_and_login(&world.world(), "manager", "mara@example.com", "manager");
}

#[given("a registered employee")]
fn a_registered_employee(world: &WorldFixture) {
    register_and_login(&world.world(), "employee", "eli@example.com", "employee");
}

#[given("another registered employee")]
fn another_registered_employee(world: &WorldFixture) {
    register_and_login(&world.world(), "other employee", "oli@example.com", "employee");
}

#[given("the employee has requested feedback from the manager")]
fn the_employee_has_requested_feedback(world: &WorldFixture) {
    let world = world.world();
    let (token, manager_id) = {
        let ctx = world.borrow();
        (ctx.token("employee"), ctx.user_id("manager"))
    };
    let exchange = perform(
        &world,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/feedback-requests".to_owned(),
            bearer: Some(token),
            payload: Some(json!({"managerId": manager_id, "message": "How did the launch go?"})),
            label: "create feedback request",
        },
    );
    assert_eq!(exchange.status, 201);
}

#[given("the manager has given positive feedback to the employee")]
fn the_manager_has_given_positive_feedback(world: &WorldFixture) {
    let world = world.world();
    give_positive_feedback(&world);
    assert_eq!(world.borrow().last().status, 201);
}

#[when("the manager gives positive feedback to the employee")]
fn the_manager_gives_positive_feedback(world: &WorldFixture) {
    give_positive_feedback(&world.world());
}

#[when("the employee acknowledges the feedback")]
fn the_employee_acknowledges_the_feedback(world: &WorldFixture) {
    acknowledge_as(&world.world(), "employee");
}

#[when("the other employee acknowledges the feedback")]
fn the_other_employee_acknowledges_the_feedback(world: &WorldFixture) {
    acknowledge_as(&world.world(), "other employee");
}

#[when("the manager views their dashboard")]
fn the_manager_views_their_dashboard(world: &WorldFixture) {
    let world = world.world();
    let token = world.borrow().token("manager");
    perform(
        &world,
        RequestSpec {
            method: Method::GET,
            path: "/api/v1/dashboard/manager".to_owned(),
            bearer: Some(token),
            payload: None,
            label: "manager dashboard request",
        },
    );
}

#[when("the manager changes the sentiment to negative")]
fn the_manager_changes_the_sentiment(world: &WorldFixture) {
    update_feedback(&world.world(), json!({"sentiment": "negative"}));
}

#[when("the manager tries to mark the feedback acknowledged")]
fn the_manager_tries_to_mark_acknowledged(world: &WorldFixture) {
    update_feedback(&world.world(), json!({"acknowledged": true}));
}

#[when("the employee tries to give feedback to themselves")]
fn the_employee_tries_to_give_feedback(world: &WorldFixture) {
    let world = world.world();
    let (token, employee_id) = {
        let ctx = world.borrow();
        (ctx.token("employee"), ctx.user_id("employee"))
    };
    perform(
        &world,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/feedbacks".to_owned(),
            bearer: Some(token),
            payload: Some(json!({
                "employeeId": employee_id,
                "strengths": "Everything",
                "improvements": "Nothing",
                "sentiment": "positive"
            })),
            label: "self feedback request",
        },
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last().status, status, "body: {:?}", ctx.last().body);
}

#[then("the feedback is not acknowledged")]
fn the_feedback_is_not_acknowledged(world: &WorldFixture) {
    let body = last_body(world);
    assert_eq!(body["acknowledged"], Value::Bool(false));
    let ctx = world.world();
    let ctx = ctx.borrow();
    assert_eq!(body["managerId"].as_i64(), Some(ctx.user_id("manager")));
    assert_eq!(body["employeeId"].as_i64(), Some(ctx.user_id("employee")));
}

#[then("the feedback is acknowledged")]
fn the_feedback_is_acknowledged(world: &WorldFixture) {
    assert_eq!(last_body(world)["acknowledged"], Value::Bool(true));
}

#[then("the manager has {count} pending feedback requests")]
fn the_manager_has_pending_requests(world: &WorldFixture, count: usize) {
    let world = world.world();
    let token = world.borrow().token("manager");
    let exchange = perform(
        &world,
        RequestSpec {
            method: Method::GET,
            path: "/api/v1/feedback-requests".to_owned(),
            bearer: Some(token),
            payload: None,
            label: "list feedback requests",
        },
    );
    assert_eq!(exchange.status, 200);
    let requests = exchange.body.as_array().expect("request array");
    assert_eq!(requests.len(), count);
}

#[then("the dashboard reports {total} feedback with {positive} positive")]
fn the_dashboard_reports(world: &WorldFixture, total: u64, positive: u64) {
    let body = last_body(world);
    assert_eq!(body["total_feedback_given"].as_u64(), Some(total));
    assert_eq!(body["sentiment_summary"]["positive"].as_u64(), Some(positive));
    assert_eq!(body["sentiment_summary"]["neutral"].as_u64(), Some(0));
    assert_eq!(body["sentiment_summary"]["negative"].as_u64(), Some(0));
    assert_eq!(
        body["feedbacks"].as_array().map(Vec::len),
        Some(total as usize)
    );
}

#[then("the feedback sentiment is negative with the original strengths")]
fn the_feedback_sentiment_is_negative(world: &WorldFixture) {
    let body = last_body(world);
    assert_eq!(body["sentiment"], "negative");
    assert_eq!(body["strengths"], STRENGTHS);
    assert_eq!(body["acknowledged"], Value::Bool(false));
}

#[scenario(
    path = "tests/features/feedback_lifecycle.feature",
    name = "An employee acknowledges feedback from their manager"
)]
fn an_employee_acknowledges_feedback_from_their_manager(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/feedback_lifecycle.feature",
    name = "Feedback fulfils a pending request"
)]
fn feedback_fulfils_a_pending_request(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/feedback_lifecycle.feature",
    name = "Another employee cannot acknowledge the feedback"
)]
fn another_employee_cannot_acknowledge_the_feedback(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/feedback_lifecycle.feature",
    name = "The manager dashboard counts sentiments"
)]
fn the_manager_dashboard_counts_sentiments(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/feedback_lifecycle.feature",
    name = "A partial update keeps untouched fields"
)]
fn a_partial_update_keeps_untouched_fields(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/feedback_lifecycle.feature",
    name = "Acknowledged cannot be set through an update"
)]
fn acknowledged_cannot_be_set_through_an_update(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/feedback_lifecycle.feature",
    name = "An employee cannot write feedback"
)]
fn an_employee_cannot_write_feedback(world: WorldFixture) {
    drop(world);
}
