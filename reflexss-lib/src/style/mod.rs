pub mod composer;
pub mod minify;
pub mod serializer;
