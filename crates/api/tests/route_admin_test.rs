use duxcall_api::handlers::admin::validate_route_fields;
use duxcall_core::{errors::CallError, models::route::UpsertRouteRequest};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn request(label: &str, phone: &str) -> UpsertRouteRequest {
    UpsertRouteRequest {
        label: label.to_string(),
        phone: phone.to_string(),
        is_enabled: false,
        sort_order: None,
    }
}

#[test]
fn test_fields_are_trimmed() {
    let payload = request(" Night line ", " 0311112222\n");

    let fields = validate_route_fields(" night ", &payload).unwrap();

    assert_eq!(fields, ("night", "Night line", "0311112222"));
}

#[rstest]
#[case(" ", "Night line", "0311112222", "key")]
#[case("night", "", "0311112222", "label")]
#[case("night", "Night line", "\t", "phone")]
fn test_blank_field_is_rejected(
    #[case] key: &str,
    #[case] label: &str,
    #[case] phone: &str,
    #[case] field: &str,
) {
    let payload = request(label, phone);

    match validate_route_fields(key, &payload) {
        Err(CallError::Validation(message)) => {
            assert_eq!(message, format!("Route {} must not be empty", field))
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}
