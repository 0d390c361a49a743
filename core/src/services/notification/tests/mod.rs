//! Tests for the notification worker

mod worker_tests;
