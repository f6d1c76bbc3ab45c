// Integration test entry point for end-to-end lint behavior.
#[path = "lint/test_rules_end_to_end.rs"]
mod test_rules_end_to_end;
#[path = "lint/test_driver_behavior.rs"]
mod test_driver_behavior;
