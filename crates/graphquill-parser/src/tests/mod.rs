mod lexer_tests;
mod parser_error_tests;
mod parser_tests;
mod printer_tests;
mod visitor_tests;
