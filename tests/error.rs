use serde_json::Value;
use td::error::{exit_codes, Error, JsonError};

#[test]
fn exit_code_user_error() {
    let err = Error::EmptyText;
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

    let err = Error::TaskNotFound(42);
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

    let err = Error::InvalidArgument("bad input".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn exit_code_operation_failed() {
    let err = Error::Api {
        action: "add task",
        status: 500,
    };
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);

    let err = Error::OperationFailed("boom".to_string());
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn api_error_carries_fixed_message() {
    let err = Error::Api {
        action: "mark task as done",
        status: 502,
    };
    assert_eq!(
        err.to_string(),
        "failed to mark task as done: server returned HTTP 502"
    );
}

#[test]
fn details_include_api_fields() {
    let err = Error::Api {
        action: "delete task",
        status: 404,
    };
    let details = err.details().expect("details");
    assert_eq!(details["action"], Value::String("delete task".to_string()));
    assert_eq!(details["status"], Value::from(404));
}

#[test]
fn json_error_includes_details() {
    let err = Error::InvalidConfig("bad config".to_string());
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::USER_ERROR);
    let details = json.details.expect("details");
    assert_eq!(details["message"], Value::String("bad config".to_string()));
}

#[test]
fn duplicate_task_names_the_text() {
    let err = Error::DuplicateTask("Buy milk".to_string());
    assert_eq!(err.to_string(), "\"Buy milk\" is already on the list");
    let details = err.details().expect("details");
    assert_eq!(details["text"], Value::String("Buy milk".to_string()));
}
