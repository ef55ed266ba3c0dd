pub mod json_fixture;
