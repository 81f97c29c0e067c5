//! Directory handlers: managers list employees, employees list managers.

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::UserResponse;
use crate::inbound::http::actor::CurrentActor;
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/v1/users/employees",
    responses(
        (status = 200, description = "Employees ordered by id", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a manager", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listEmployees"
)]
#[get("/users/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    actor: CurrentActor,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.directory.list_employees(&actor.into_inner()).await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/managers",
    responses(
        (status = 200, description = "Managers ordered by id", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not an employee", body = Error)
    ),
    tags = ["directory"],
    operation_id = "listManagers"
)]
#[get("/users/managers")]
pub async fn list_managers(
    state: web::Data<HttpState>,
    actor: CurrentActor,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.directory.list_managers(&actor.into_inner()).await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, Role, User, UserId};
    use crate::inbound::http::test_utils::{MockPorts, bearer};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn managers_see_employees() {
        let mut ports = MockPorts::default();
        ports.authenticate_as(1, Role::Manager);
        ports.directory.expect_list_employees().return_once(|_| {
            Ok(vec![User::new(
                UserId::new(2),
                Email::new("grace@example.com").expect("email"),
                Role::Employee,
            )])
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(ports.into_data())
                .service(web::scope("/api/v1").service(list_employees).service(list_managers)),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/employees")
                .insert_header(bearer())
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!([{"id": 2, "email": "grace@example.com", "role": "employee"}])
        );
    }
}
