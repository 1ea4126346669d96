//! Role evaluation and navigation guarding

use listkit::guard::{guard, GuardDecision, RouteTable, DEMO_ROUTE};
use listkit::roles::{effective_roles, RoleEvaluator};
use serde_json::json;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_primary_roles_win_over_token() {
    let primary = strings(&["admin"]);
    let token = json!({"roles": ["user", "viewer"]});

    let roles = RoleEvaluator::new(Some(primary.as_slice()), Some(&token));
    assert!(roles.has_role("admin"));
    assert!(!roles.has_role("user"));
    assert!(roles.has_any_role(&["viewer", "admin"]));
    assert!(!roles.has_any_role(&["viewer"]));
}

#[test]
fn test_token_is_fallback_when_primary_empty() {
    let token = json!({"sub": "dev", "roles": ["user", 7]});
    assert_eq!(effective_roles(Some(&[][..]), Some(&token)), vec!["user", "7"]);
    assert_eq!(effective_roles(None, Some(&token)), vec!["user", "7"]);
    assert!(effective_roles(None, Some(&json!({"roles": "admin"}))).is_empty());
    assert!(effective_roles(None, None).is_empty());
}

#[test]
fn test_has_any_role_with_empty_inputs() {
    let roles = RoleEvaluator::from_roles(strings(&["admin"]));
    let none: [&str; 0] = [];
    assert!(!roles.has_any_role(&none));
    assert!(!RoleEvaluator::from_roles(Vec::new()).has_any_role(&["admin"]));
}

#[test]
fn test_guard_with_token_fallback_roles() {
    let table = RouteTable::standard();
    let token = json!({"roles": ["admin"]});
    let roles = RoleEvaluator::new(None, Some(&token));

    assert_eq!(guard(table.resolve("/admin"), true, &roles), GuardDecision::Proceed);
    assert_eq!(
        guard(table.resolve("/admin"), true, &RoleEvaluator::new(None, None)),
        GuardDecision::Redirect {
            name: DEMO_ROUTE.to_string()
        }
    );
    assert_eq!(
        guard(table.resolve("/admin"), false, &roles),
        GuardDecision::Login {
            redirect: "/admin".to_string()
        }
    );
}

#[test]
fn test_route_lookup_by_name() {
    let table = RouteTable::standard();
    let admin = table.by_name("Admin").unwrap();
    assert_eq!(admin.path, "/admin");
    assert_eq!(admin.meta.requires_role.as_deref(), Some("admin"));
    assert!(table.by_name("Missing").is_none());
}
