mod access_tests;
mod database_tests;
mod routes_tests;
