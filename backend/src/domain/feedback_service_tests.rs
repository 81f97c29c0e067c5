//! Tests for the feedback lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    FeedbackRepositoryError, FeedbackRequestRepositoryError, MockFeedbackRepository,
    MockFeedbackRequestRepository, MockUserRepository,
};
use crate::domain::{
    Email, ErrorCode, FeedbackContent, FeedbackDraft, Sentiment, User,
};

const MANAGER: UserId = UserId::new(1);
const EMPLOYEE: UserId = UserId::new(2);
const OTHER_EMPLOYEE: UserId = UserId::new(3);

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn actor(id: UserId, role: Role) -> Actor {
    Actor::new(
        id,
        Email::new(format!("user{}@example.com", id.get())).expect("email"),
        role,
    )
}

fn user(id: UserId, role: Role) -> User {
    User::new(
        id,
        Email::new(format!("user{}@example.com", id.get())).expect("email"),
        role,
    )
}

fn stored_feedback(acknowledged: bool) -> Feedback {
    Feedback::new(FeedbackDraft {
        id: FeedbackId::new(10),
        manager_id: MANAGER,
        employee_id: EMPLOYEE,
        strengths: "Owns incidents end to end".to_owned(),
        improvements: "Write shorter design docs".to_owned(),
        sentiment: Sentiment::Positive,
        acknowledged,
        created_at: fixture_timestamp(),
    })
    .expect("valid feedback")
}

fn submission() -> FeedbackSubmission {
    FeedbackSubmission {
        employee_id: EMPLOYEE,
        content: FeedbackContent::new(
            "Owns incidents end to end",
            "Write shorter design docs",
            Sentiment::Positive,
        )
        .expect("valid content"),
    }
}

struct Mocks {
    feedbacks: MockFeedbackRepository,
    requests: MockFeedbackRequestRepository,
    users: MockUserRepository,
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        feedbacks: MockFeedbackRepository::new(),
        requests: MockFeedbackRequestRepository::new(),
        users: MockUserRepository::new(),
    }
}

fn service(
    mocks: Mocks,
) -> FeedbackService<MockFeedbackRepository, MockFeedbackRequestRepository, MockUserRepository> {
    FeedbackService::new(
        Arc::new(mocks.feedbacks),
        Arc::new(mocks.requests),
        Arc::new(mocks.users),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

fn expect_employee_lookup(users: &mut MockUserRepository) {
    users
        .expect_find_by_id()
        .with(eq(EMPLOYEE))
        .times(1)
        .return_once(|id| Ok(Some(user(id, Role::Employee))));
}

fn expect_insert(feedbacks: &mut MockFeedbackRepository) {
    feedbacks.expect_insert().times(1).return_once(|new| {
        assert_eq!(new.manager_id, MANAGER);
        assert_eq!(new.employee_id, EMPLOYEE);
        assert_eq!(new.created_at, fixture_timestamp());
        Ok(Feedback::from_new(FeedbackId::new(10), new))
    });
}

#[rstest]
#[tokio::test]
async fn create_persists_feedback_and_discards_fulfilled_requests(mut mocks: Mocks) {
    expect_employee_lookup(&mut mocks.users);
    expect_insert(&mut mocks.feedbacks);
    mocks
        .requests
        .expect_delete_for_pair()
        .with(eq(MANAGER), eq(EMPLOYEE))
        .times(1)
        .return_once(|_, _| Ok(1));

    let created = service(mocks)
        .create(&actor(MANAGER, Role::Manager), submission())
        .await
        .expect("create succeeds");

    assert_eq!(created.manager_id(), MANAGER);
    assert_eq!(created.employee_id(), EMPLOYEE);
    assert!(!created.is_acknowledged());
    assert_eq!(created.sentiment(), Sentiment::Positive);
}

#[rstest]
#[tokio::test]
async fn create_succeeds_when_request_cleanup_fails(mut mocks: Mocks) {
    expect_employee_lookup(&mut mocks.users);
    expect_insert(&mut mocks.feedbacks);
    mocks
        .requests
        .expect_delete_for_pair()
        .times(1)
        .return_once(|_, _| Err(FeedbackRequestRepositoryError::connection("pool exhausted")));

    let created = service(mocks)
        .create(&actor(MANAGER, Role::Manager), submission())
        .await
        .expect("cleanup failure is swallowed");

    assert_eq!(created.id(), FeedbackId::new(10));
}

#[rstest]
#[tokio::test]
async fn create_rejects_non_managers_before_touching_storage(mut mocks: Mocks) {
    mocks.users.expect_find_by_id().times(0);
    mocks.feedbacks.expect_insert().times(0);
    mocks.requests.expect_delete_for_pair().times(0);

    let error = service(mocks)
        .create(&actor(EMPLOYEE, Role::Employee), submission())
        .await
        .expect_err("employees cannot create feedback");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case::missing_user(None)]
#[case::manager_target(Some(Role::Manager))]
#[tokio::test]
async fn create_requires_target_to_be_an_employee(
    mut mocks: Mocks,
    #[case] target_role: Option<Role>,
) {
    mocks
        .users
        .expect_find_by_id()
        .times(1)
        .return_once(move |id| Ok(target_role.map(|role| user(id, role))));
    mocks.feedbacks.expect_insert().times(0);

    let error = service(mocks)
        .create(&actor(MANAGER, Role::Manager), submission())
        .await
        .expect_err("target must be an employee");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], "employeeId");
    assert_eq!(details["code"], "not_an_employee");
}

#[rstest]
#[tokio::test]
async fn create_maps_connection_errors_to_service_unavailable(mut mocks: Mocks) {
    expect_employee_lookup(&mut mocks.users);
    mocks
        .feedbacks
        .expect_insert()
        .times(1)
        .return_once(|_| Err(FeedbackRepositoryError::connection("refused")));
    mocks.requests.expect_delete_for_pair().times(0);

    let error = service(mocks)
        .create(&actor(MANAGER, Role::Manager), submission())
        .await
        .expect_err("store unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn acknowledge_marks_own_feedback(mut mocks: Mocks) {
    mocks
        .feedbacks
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_feedback(false))));
    mocks
        .feedbacks
        .expect_mark_acknowledged()
        .with(eq(FeedbackId::new(10)))
        .times(1)
        .return_once(|_| Ok(Some(stored_feedback(true))));

    let acknowledged = service(mocks)
        .acknowledge(&actor(EMPLOYEE, Role::Employee), FeedbackId::new(10))
        .await
        .expect("acknowledge succeeds");

    assert!(acknowledged.is_acknowledged());
}

#[rstest]
#[tokio::test]
async fn acknowledge_twice_does_not_write_again(mut mocks: Mocks) {
    mocks
        .feedbacks
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_feedback(true))));
    mocks.feedbacks.expect_mark_acknowledged().times(0);

    let acknowledged = service(mocks)
        .acknowledge(&actor(EMPLOYEE, Role::Employee), FeedbackId::new(10))
        .await
        .expect("repeat acknowledge succeeds");

    assert_eq!(acknowledged, stored_feedback(true));
}

#[rstest]
#[case::other_employee(actor(OTHER_EMPLOYEE, Role::Employee))]
#[case::authoring_manager(actor(MANAGER, Role::Manager))]
#[tokio::test]
async fn acknowledge_hides_feedback_addressed_to_someone_else(
    mut mocks: Mocks,
    #[case] caller: Actor,
) {
    mocks
        .feedbacks
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_feedback(false))));
    mocks.feedbacks.expect_mark_acknowledged().times(0);

    let error = service(mocks)
        .acknowledge(&caller, FeedbackId::new(10))
        .await
        .expect_err("not visible");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn acknowledge_reports_missing_feedback_as_not_found(mut mocks: Mocks) {
    mocks
        .feedbacks
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let error = service(mocks)
        .acknowledge(&actor(EMPLOYEE, Role::Employee), FeedbackId::new(99))
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_applies_partial_changes_for_author(mut mocks: Mocks) {
    mocks
        .feedbacks
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_feedback(false))));
    mocks
        .feedbacks
        .expect_update()
        .times(1)
        .return_once(|_, update| {
            let mut updated = stored_feedback(false);
            updated.apply(update);
            Ok(Some(updated))
        });

    let update = FeedbackUpdate::default().with_sentiment(Sentiment::Negative);
    let updated = service(mocks)
        .update(&actor(MANAGER, Role::Manager), FeedbackId::new(10), update)
        .await
        .expect("update succeeds");

    assert_eq!(updated.sentiment(), Sentiment::Negative);
    assert_eq!(updated.strengths(), "Owns incidents end to end");
}

#[rstest]
#[tokio::test]
async fn empty_update_returns_current_record_without_writing(mut mocks: Mocks) {
    mocks
        .feedbacks
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_feedback(false))));
    mocks.feedbacks.expect_update().times(0);

    let unchanged = service(mocks)
        .update(
            &actor(MANAGER, Role::Manager),
            FeedbackId::new(10),
            FeedbackUpdate::default(),
        )
        .await
        .expect("empty update succeeds");

    assert_eq!(unchanged, stored_feedback(false));
}

#[rstest]
#[tokio::test]
async fn update_by_another_manager_is_not_found(mut mocks: Mocks) {
    mocks
        .feedbacks
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_feedback(false))));
    mocks.feedbacks.expect_update().times(0);

    let error = service(mocks)
        .update(
            &actor(UserId::new(5), Role::Manager),
            FeedbackId::new(10),
            FeedbackUpdate::default().with_sentiment(Sentiment::Neutral),
        )
        .await
        .expect_err("not the author");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_own_requires_employee_role(mut mocks: Mocks) {
    mocks.feedbacks.expect_list_for_employee().times(0);

    let error = service(mocks)
        .list_own(&actor(MANAGER, Role::Manager))
        .await
        .expect_err("managers have no own feedback view");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn list_given_reads_feedback_written_by_actor(mut mocks: Mocks) {
    mocks
        .feedbacks
        .expect_list_for_manager()
        .with(eq(MANAGER))
        .times(1)
        .return_once(|_| Ok(vec![stored_feedback(false)]));

    let given = service(mocks)
        .list_given(&actor(MANAGER, Role::Manager))
        .await
        .expect("list succeeds");

    assert_eq!(given.len(), 1);
}

#[rstest]
#[tokio::test]
async fn list_given_maps_query_errors_to_internal(mut mocks: Mocks) {
    mocks
        .feedbacks
        .expect_list_for_manager()
        .times(1)
        .return_once(|_| Err(FeedbackRepositoryError::query("syntax")));

    let error = service(mocks)
        .list_given(&actor(MANAGER, Role::Manager))
        .await
        .expect_err("query failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
