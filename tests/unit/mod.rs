// Property tests for the text-processing services

pub mod exercise_parser_test;
pub mod response_cleaner_test;
