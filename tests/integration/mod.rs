//! Integration tests for listkit

mod auth_session;
mod autosave_field;
mod list_controller;
mod resource_list;
mod roles_and_guard;
