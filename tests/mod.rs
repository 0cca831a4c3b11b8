mod api_tests;
mod renderer_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - firestore_mock: Mocking the document store for testing without Firestore
// - notifier_tests: Outcomes of the event-created notifier
// - api_tests: HTTP statuses of the test notification endpoint
// - renderer_tests: Background rendering of delivered push payloads
