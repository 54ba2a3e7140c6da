mod enhance_use_case_tests;
mod support;
