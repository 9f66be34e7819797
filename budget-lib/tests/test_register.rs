extern crate rstest;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use actix_web::App;
use rstest::rstest;
use tracing::instrument;

use budget_lib::auth::password::verify_password;
use budget_lib::flash::{FlashLevel, FlashMessage};
use utils::repos;
use utils::tracing_setup;
use utils::{get_flashes, location, new_username, Repos};

#[macro_use]
mod utils;

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_register(_tracing_setup: &(), repos: Repos) {
    let (user_repo, budget_repo, contact_repo) = repos;
    let service = test::init_service(build_app!(user_repo.clone(), budget_repo, contact_repo)).await;

    let username = new_username();
    let email = format!("{}@example.com", username);
    let response = post_form!(
        &service,
        "/register",
        &[
            ("username", username.as_str()),
            ("email", email.as_str()),
            ("password", "hunter22"),
            ("confirm_password", "hunter22"),
            ("full_name", "Test User"),
            ("security_question", "First pet?"),
            ("security_answer", "Rex"),
        ]
    );

    assert_eq!(StatusCode::SEE_OTHER, response.status());
    assert_eq!(Some("/login".to_owned()), location(&response));
    assert_eq!(
        vec![FlashMessage::success("Registration successful! Please log in.")],
        get_flashes(&response)
    );

    let user = user_repo.get_user_by_username(&username).await.unwrap();
    assert_eq!(email, user.email);
    assert_eq!(Some("Test User".to_owned()), user.full_name);
    assert_ne!("hunter22", user.password_hash);
    assert!(verify_password("hunter22", &user.password_hash).unwrap());
    let answer_hash = user.security_answer_hash.unwrap();
    assert!(verify_password("Rex", &answer_hash).unwrap());
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_password_mismatch(_tracing_setup: &(), repos: Repos) {
    let (user_repo, budget_repo, contact_repo) = repos;
    let service = test::init_service(build_app!(user_repo.clone(), budget_repo, contact_repo)).await;

    let username = new_username();
    let response = post_form!(
        &service,
        "/register",
        &[
            ("username", username.as_str()),
            ("email", "mismatch@example.com"),
            ("password", "hunter22"),
            ("confirm_password", "hunter23"),
        ]
    );

    assert_eq!(Some("/register".to_owned()), location(&response));
    assert_eq!(
        vec![FlashMessage::danger("Passwords do not match.")],
        get_flashes(&response)
    );
    assert!(user_repo.get_user_by_username(&username).await.is_err());
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_duplicate_username(_tracing_setup: &(), repos: Repos) {
    let (user_repo, budget_repo, contact_repo) = repos;
    let service = test::init_service(build_app!(user_repo.clone(), budget_repo, contact_repo)).await;

    let username = new_username();
    register!(&service, username.as_str(), "hunter22");

    let response = post_form!(
        &service,
        "/register",
        &[
            ("username", username.as_str()),
            ("email", "someone-else@example.com"),
            ("password", "other-pass"),
            ("confirm_password", "other-pass"),
        ]
    );

    assert_eq!(Some("/register".to_owned()), location(&response));
    assert_eq!(
        vec![FlashMessage::danger("Username already exists")],
        get_flashes(&response)
    );
    let user = user_repo.get_user_by_username(&username).await.unwrap();
    assert!(verify_password("hunter22", &user.password_hash).unwrap());
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_duplicate_email(_tracing_setup: &(), repos: Repos) {
    let (user_repo, budget_repo, contact_repo) = repos;
    let service = test::init_service(build_app!(user_repo.clone(), budget_repo, contact_repo)).await;

    let first = new_username();
    register!(&service, first.as_str(), "hunter22");

    let second = new_username();
    let email = format!("{}@example.com", first);
    let response = post_form!(
        &service,
        "/register",
        &[
            ("username", second.as_str()),
            ("email", email.as_str()),
            ("password", "hunter22"),
            ("confirm_password", "hunter22"),
        ]
    );

    assert_eq!(Some("/register".to_owned()), location(&response));
    let flashes = get_flashes(&response);
    assert_eq!(1, flashes.len());
    assert_eq!(FlashLevel::Danger, flashes[0].level);
    assert_eq!("Email already exists", flashes[0].message);
    assert!(user_repo.get_user_by_username(&second).await.is_err());
}

#[instrument(skip(repos))]
#[rstest]
#[actix_rt::test]
async fn test_missing_field(_tracing_setup: &(), repos: Repos) {
    let (user_repo, budget_repo, contact_repo) = repos;
    let service = test::init_service(build_app!(user_repo, budget_repo, contact_repo)).await;

    let response = post_form!(&service, "/register", &[("username", "nobody")]);

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!("Unable to parse form payload", body["error"]);
}
