mod rule_tests;
mod type_info_tests;
