mod create_service_tests;
