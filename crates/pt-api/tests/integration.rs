mod common;

mod auth_tests;
