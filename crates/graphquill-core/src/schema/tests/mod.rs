mod schema_builder_tests;
mod schema_validation_tests;
mod sdl_printing_tests;
